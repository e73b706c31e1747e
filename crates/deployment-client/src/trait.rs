//! DeploymentStore trait for mocking
//!
//! The kube-backed `DeploymentStore` implements this trait, and tests can use
//! `MockDeploymentStore` instead of a running cluster.

use crate::error::StoreError;
use crate::request::CreateDeploymentRequest;
use dynamo_crds::{DynamoDeployment, DynamoDeploymentStatus};

/// Operations on DynamoDeployment resources
///
/// All async methods must be `Send` to work with Tokio's work-stealing runtime.
#[async_trait::async_trait]
pub trait DeploymentStoreTrait: Send + Sync {
    /// Submit a new deployment
    async fn create_deployment(&self, request: CreateDeploymentRequest) -> Result<DynamoDeployment, StoreError>;

    /// Fetch a deployment; `StoreError::NotFound` if it does not exist
    async fn get_deployment(&self, name: &str, namespace: &str) -> Result<DynamoDeployment, StoreError>;

    /// Delete a deployment; `StoreError::NotFound` if it does not exist
    async fn delete_deployment(&self, name: &str, namespace: &str) -> Result<(), StoreError>;

    /// List deployments in a namespace, optionally filtered by label selector
    async fn list_deployments(&self, namespace: &str, label_selector: Option<&str>) -> Result<Vec<DynamoDeployment>, StoreError>;

    /// Replace the status subresource of a deployment
    async fn update_status(&self, name: &str, namespace: &str, status: &DynamoDeploymentStatus) -> Result<DynamoDeployment, StoreError>;
}
