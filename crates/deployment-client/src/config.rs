//! Store configuration
//!
//! Loaded from environment variables:
//! - `DEFAULT_KUBE_NAMESPACE`: namespace used when the caller does not name one
//!   (default: "dynamo")

use crate::error::StoreError;
use std::env;

/// Namespace used when `DEFAULT_KUBE_NAMESPACE` is unset
pub const DEFAULT_NAMESPACE: &str = "dynamo";

/// Configuration for the deployment store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Default namespace for deployments
    pub namespace: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }
}

impl StoreConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, StoreError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, StoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let namespace = match lookup("DEFAULT_KUBE_NAMESPACE") {
            None => DEFAULT_NAMESPACE.to_string(),
            Some(ns) if ns.trim().is_empty() => {
                return Err(StoreError::InvalidConfig(
                    "DEFAULT_KUBE_NAMESPACE must not be empty".to_string(),
                ));
            }
            Some(ns) => ns.trim().to_string(),
        };
        Ok(Self { namespace })
    }
}
