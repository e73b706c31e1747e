//! CRD generator
//!
//! Renders the CustomResourceDefinition manifests of every Dynamo custom
//! resource as YAML.
//!
//! Configuration:
//! - `CRD_OUTPUT_DIR`: write one `<crd-name>.yaml` per CRD into this directory.
//!   When unset, a multi-document stream is written to stdout.
//! - `RUST_LOG`: log filter (logs go to stderr)

use anyhow::Context;
use dynamo_crds::{add_to_registry, TypeRegistry};
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let mut registry = TypeRegistry::new();
    add_to_registry(&mut registry).context("failed to register Dynamo CRDs")?;
    info!("Generating {} CRD(s)", registry.len());

    match env::var("CRD_OUTPUT_DIR").ok().map(PathBuf::from) {
        Some(dir) => {
            fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
            for registered in registry.iter() {
                let name = registered.crd.metadata.name.as_deref().unwrap_or(&registered.plural);
                let path = dir.join(format!("{name}.yaml"));
                let yaml = serde_yaml::to_string(&registered.crd)?;
                fs::write(&path, yaml)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                info!("Wrote {} to {}", registered.gvk(), path.display());
            }
        }
        None => {
            let yaml = registry.to_yaml()?;
            std::io::stdout()
                .write_all(yaml.as_bytes())
                .context("failed to write CRDs to stdout")?;
        }
    }

    Ok(())
}
