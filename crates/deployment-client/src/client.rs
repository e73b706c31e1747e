//! Kubernetes-backed deployment store
//!
//! Talks to the cluster API for `nvidia.com/v1alpha1` DynamoDeployment
//! resources.

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::request::CreateDeploymentRequest;
use crate::store_trait::DeploymentStoreTrait;
use dynamo_crds::{DynamoDeployment, DynamoDeploymentStatus};
use kube::api::{DeleteParams, ListParams, Patch, PatchParams, PostParams};
use kube::{Api, Client};
use serde_json::json;
use tracing::{debug, info};

/// DynamoDeployment store backed by the Kubernetes API
pub struct DeploymentStore {
    client: Client,
    config: StoreConfig,
}

impl std::fmt::Debug for DeploymentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeploymentStore")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl DeploymentStore {
    /// Create a store from an existing client
    pub fn new(client: Client, config: StoreConfig) -> Self {
        Self { client, config }
    }

    /// Connect using in-cluster configuration, falling back to kubeconfig,
    /// with configuration loaded from the environment.
    pub async fn try_default() -> Result<Self, StoreError> {
        let config = StoreConfig::from_env()?;
        // Errors only when a provider is already installed
        let _ = rustls::crypto::ring::default_provider().install_default();
        let client = Client::try_default().await?;
        info!("Connected to Kubernetes API (default namespace: {})", config.namespace);
        Ok(Self::new(client, config))
    }

    /// Configuration the store was created with
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    fn api(&self, namespace: &str) -> Api<DynamoDeployment> {
        Api::namespaced(self.client.clone(), namespace)
    }
}

/// Merge-patch body replacing the whole status.
///
/// Every field is written explicitly: merge patch keeps keys that are absent,
/// so an empty state or condition list must be sent as `""` / `[]` to clear it.
pub(crate) fn status_patch(
    status: &DynamoDeploymentStatus,
) -> Result<serde_json::Value, StoreError> {
    Ok(json!({
        "status": {
            "state": status.state,
            "conditions": serde_json::to_value(&status.conditions)?,
        }
    }))
}

#[async_trait::async_trait]
impl DeploymentStoreTrait for DeploymentStore {
    async fn create_deployment(&self, request: CreateDeploymentRequest) -> Result<DynamoDeployment, StoreError> {
        let key = request.key();
        let api = self.api(&request.namespace);
        let resource = request.into_resource();

        debug!("Creating DynamoDeployment {}", key);
        let created = api
            .create(&PostParams::default(), &resource)
            .await
            .map_err(|e| StoreError::from_kube(e, &key))?;
        info!("Created DynamoDeployment {} ({})", key, created.spec.dynamo_nim);
        Ok(created)
    }

    async fn get_deployment(&self, name: &str, namespace: &str) -> Result<DynamoDeployment, StoreError> {
        let key = format!("{namespace}/{name}");
        debug!("Fetching DynamoDeployment {}", key);
        self.api(namespace)
            .get(name)
            .await
            .map_err(|e| StoreError::from_kube(e, &key))
    }

    async fn delete_deployment(&self, name: &str, namespace: &str) -> Result<(), StoreError> {
        let key = format!("{namespace}/{name}");
        self.api(namespace)
            .delete(name, &DeleteParams::default())
            .await
            .map_err(|e| StoreError::from_kube(e, &key))?;
        info!("Deleted DynamoDeployment {}", key);
        Ok(())
    }

    async fn list_deployments(&self, namespace: &str, label_selector: Option<&str>) -> Result<Vec<DynamoDeployment>, StoreError> {
        let mut params = ListParams::default();
        if let Some(selector) = label_selector {
            params = params.labels(selector);
        }
        let list = self.api(namespace).list(&params).await?;
        debug!(
            "Listed {} DynamoDeployment(s) in {} (selector: {})",
            list.items.len(),
            namespace,
            label_selector.unwrap_or("<none>")
        );
        Ok(list.items)
    }

    async fn update_status(&self, name: &str, namespace: &str, status: &DynamoDeploymentStatus) -> Result<DynamoDeployment, StoreError> {
        let key = format!("{namespace}/{name}");
        let updated = self
            .api(namespace)
            .patch_status(name, &PatchParams::default(), &Patch::Merge(&status_patch(status)?))
            .await
            .map_err(|e| StoreError::from_kube(e, &key))?;
        debug!("Updated status of DynamoDeployment {} (state: {})", key, status.state);
        Ok(updated)
    }
}
