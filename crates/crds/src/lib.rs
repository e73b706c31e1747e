//! Dynamo CRD Definitions
//!
//! Kubernetes Custom Resource Definitions for Dynamo deployments, the
//! condition helpers used to write their status, and the type registry
//! that tells a process which kinds it can encode and decode.

pub mod conditions;
pub mod dynamo_deployment;
pub mod error;
pub mod overrides;
pub mod registry;

#[cfg(test)]
mod registry_test;

pub use conditions::*;
pub use dynamo_deployment::*;
pub use error::CrdError;
pub use overrides::*;
pub use registry::{RegisteredType, TypeRegistry};

/// API group shared by all Dynamo custom resources
pub const API_GROUP: &str = "nvidia.com";

/// API version served by this crate
pub const API_VERSION: &str = "v1alpha1";

/// Registers every Dynamo custom resource with the given registry.
///
/// Safe to call more than once; repeated calls leave the registry unchanged.
pub fn add_to_registry(registry: &mut TypeRegistry) -> Result<(), CrdError> {
    registry.register::<DynamoDeployment>()?;
    Ok(())
}
