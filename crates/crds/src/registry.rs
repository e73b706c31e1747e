//! Type registry
//!
//! A table of the custom resource kinds a process knows how to encode and
//! decode, keyed by group/version/kind. Registration is explicit and
//! idempotent, and the registry is an ordinary value owned by the caller.

use crate::error::CrdError;
use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use kube::{CustomResourceExt, Resource};
use std::collections::BTreeMap;
use tracing::debug;

/// A kind known to the registry
#[derive(Debug, Clone, PartialEq)]
pub struct RegisteredType {
    /// API group (e.g., "nvidia.com")
    pub group: String,
    /// API version (e.g., "v1alpha1")
    pub version: String,
    /// Kind (e.g., "DynamoDeployment")
    pub kind: String,
    /// Kind of the list wrapper (e.g., "DynamoDeploymentList")
    pub list_kind: String,
    /// Plural resource name used in API paths
    pub plural: String,
    /// Whether objects of this kind live in a namespace
    pub namespaced: bool,
    /// Generated CustomResourceDefinition manifest
    pub crd: CustomResourceDefinition,
}

impl RegisteredType {
    /// "group/version/kind" form used in logs and errors
    pub fn gvk(&self) -> String {
        format!("{}/{}/{}", self.group, self.version, self.kind)
    }
}

type Key = (String, String, String);

/// Registry of custom resource kinds
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: BTreeMap<Key, RegisteredType>,
}

impl TypeRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a custom resource kind.
    ///
    /// Returns `Ok(true)` when the kind was added and `Ok(false)` when the same
    /// kind was already registered. Registering a kind whose group/version/kind
    /// is taken by a different plural is a conflict.
    pub fn register<K>(&mut self) -> Result<bool, CrdError>
    where
        K: Resource<DynamicType = ()> + CustomResourceExt,
    {
        let crd = K::crd();
        let entry = RegisteredType {
            group: K::group(&()).into_owned(),
            version: K::version(&()).into_owned(),
            kind: K::kind(&()).into_owned(),
            list_kind: crd
                .spec
                .names
                .list_kind
                .clone()
                .unwrap_or_else(|| format!("{}List", K::kind(&()))),
            plural: K::plural(&()).into_owned(),
            namespaced: crd.spec.scope == "Namespaced",
            crd,
        };
        let key = (entry.group.clone(), entry.version.clone(), entry.kind.clone());

        if let Some(existing) = self.types.get(&key) {
            if existing.plural != entry.plural {
                return Err(CrdError::RegistrationConflict {
                    kind: entry.gvk(),
                    existing: existing.plural.clone(),
                    attempted: entry.plural,
                });
            }
            debug!("{} already registered", entry.gvk());
            return Ok(false);
        }

        debug!(
            "Registered {} (plural: {}, list kind: {})",
            entry.gvk(),
            entry.plural,
            entry.list_kind
        );
        self.types.insert(key, entry);
        Ok(true)
    }

    /// Look up a kind by group, version and kind
    pub fn get(&self, group: &str, version: &str, kind: &str) -> Option<&RegisteredType> {
        self.types
            .get(&(group.to_string(), version.to_string(), kind.to_string()))
    }

    /// Whether `K` has been registered
    pub fn is_registered<K>(&self) -> bool
    where
        K: Resource<DynamicType = ()>,
    {
        self.get(&K::group(&()), &K::version(&()), &K::kind(&())).is_some()
    }

    /// Find the kind whose list wrapper has the given name
    pub fn get_by_list_kind(
        &self,
        group: &str,
        version: &str,
        list_kind: &str,
    ) -> Option<&RegisteredType> {
        self.iter()
            .find(|t| t.group == group && t.version == version && t.list_kind == list_kind)
    }

    /// Number of registered kinds
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether nothing has been registered
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Registered kinds, ordered by group/version/kind
    pub fn iter(&self) -> impl Iterator<Item = &RegisteredType> {
        self.types.values()
    }

    /// CRD manifests of every registered kind
    pub fn crds(&self) -> impl Iterator<Item = &CustomResourceDefinition> {
        self.iter().map(|t| &t.crd)
    }

    /// Render every CRD manifest as a multi-document YAML stream
    pub fn to_yaml(&self) -> Result<String, CrdError> {
        let mut out = String::new();
        for crd in self.crds() {
            out.push_str("---\n");
            out.push_str(&serde_yaml::to_string(crd)?);
        }
        Ok(out)
    }
}
