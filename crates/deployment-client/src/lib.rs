//! DynamoDeployment store client
//!
//! Creates, reads, lists and deletes `DynamoDeployment` resources through the
//! Kubernetes API, and writes their status subresource.
//!
//! # Example
//!
//! ```no_run
//! use dynamo_deployment_client::{
//!     CreateDeploymentRequest, DeploymentStore, DeploymentStoreTrait,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // In-cluster config first, then kubeconfig
//! let store = DeploymentStore::try_default().await?;
//! let namespace = store.config().namespace.clone();
//!
//! let request = CreateDeploymentRequest::new("llm", &namespace, "llm-graph:v1")
//!     .with_label("team", "inference");
//! let created = store.create_deployment(request).await?;
//!
//! let all = store.list_deployments(&namespace, Some("team=inference")).await?;
//! # let _ = (created, all);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod request;
#[path = "trait.rs"]
pub mod store_trait;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;

#[cfg(test)]
mod mock_test;

pub use client::DeploymentStore;
pub use config::StoreConfig;
pub use error::StoreError;
pub use request::CreateDeploymentRequest;
pub use store_trait::DeploymentStoreTrait;
#[cfg(any(test, feature = "test-util"))]
pub use mock::MockDeploymentStore;
