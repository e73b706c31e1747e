//! Mock DeploymentStore for unit testing
//!
//! Stores deployments in memory so callers can be tested without a cluster.

use crate::error::StoreError;
use crate::request::CreateDeploymentRequest;
use crate::store_trait::DeploymentStoreTrait;
use dynamo_crds::{DynamoDeployment, DynamoDeploymentStatus};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

type Key = (String, String);

/// In-memory DeploymentStore
#[derive(Clone, Default)]
pub struct MockDeploymentStore {
    deployments: Arc<Mutex<HashMap<Key, DynamoDeployment>>>,
    next_id: Arc<Mutex<u64>>,
}

impl std::fmt::Debug for MockDeploymentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockDeploymentStore")
            .field("deployments", &self.len())
            .finish_non_exhaustive()
    }
}

impl MockDeploymentStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored deployments across all namespaces
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no deployment is stored
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Key, DynamoDeployment>> {
        self.deployments.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn next_uid(&self) -> String {
        let mut id = self.next_id.lock().unwrap_or_else(|e| e.into_inner());
        *id += 1;
        format!("mock-uid-{}", *id)
    }
}

/// Match labels against an equality selector ("a=b,c==d,e!=f,g").
/// Unsupported set-based expressions never match.
pub(crate) fn selector_matches(selector: &str, labels: Option<&BTreeMap<String, String>>) -> bool {
    let empty = BTreeMap::new();
    let labels = labels.unwrap_or(&empty);

    selector
        .split(',')
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .all(|term| {
            if term.contains(" in ") || term.contains("notin") || term.contains('(') {
                return false;
            }
            if let Some((key, value)) = term.split_once("!=") {
                labels.get(key.trim()).map(String::as_str) != Some(value.trim())
            } else if let Some((key, value)) = term.split_once("==").or_else(|| term.split_once('=')) {
                labels.get(key.trim()).map(String::as_str) == Some(value.trim())
            } else if let Some(key) = term.strip_prefix('!') {
                !labels.contains_key(key.trim())
            } else {
                labels.contains_key(term)
            }
        })
}

#[async_trait::async_trait]
impl DeploymentStoreTrait for MockDeploymentStore {
    async fn create_deployment(&self, request: CreateDeploymentRequest) -> Result<DynamoDeployment, StoreError> {
        let key = (request.namespace.clone(), request.name.clone());
        let display = request.key();
        let uid = self.next_uid();

        let mut deployments = self.lock();
        if deployments.contains_key(&key) {
            return Err(StoreError::AlreadyExists(display));
        }
        let mut resource = request.into_resource();
        resource.metadata.uid = Some(uid);
        resource.metadata.generation = Some(1);
        deployments.insert(key, resource.clone());
        Ok(resource)
    }

    async fn get_deployment(&self, name: &str, namespace: &str) -> Result<DynamoDeployment, StoreError> {
        self.lock()
            .get(&(namespace.to_string(), name.to_string()))
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("{namespace}/{name}")))
    }

    async fn delete_deployment(&self, name: &str, namespace: &str) -> Result<(), StoreError> {
        self.lock()
            .remove(&(namespace.to_string(), name.to_string()))
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(format!("{namespace}/{name}")))
    }

    async fn list_deployments(&self, namespace: &str, label_selector: Option<&str>) -> Result<Vec<DynamoDeployment>, StoreError> {
        let mut items: Vec<DynamoDeployment> = self
            .lock()
            .iter()
            .filter(|((ns, _), _)| ns == namespace)
            .filter(|(_, d)| label_selector.is_none_or(|s| selector_matches(s, d.metadata.labels.as_ref())))
            .map(|(_, d)| d.clone())
            .collect();
        items.sort_by(|a, b| a.metadata.name.cmp(&b.metadata.name));
        Ok(items)
    }

    async fn update_status(&self, name: &str, namespace: &str, status: &DynamoDeploymentStatus) -> Result<DynamoDeployment, StoreError> {
        let mut deployments = self.lock();
        let deployment = deployments
            .get_mut(&(namespace.to_string(), name.to_string()))
            .ok_or_else(|| StoreError::NotFound(format!("{namespace}/{name}")))?;
        deployment.status = Some(status.clone());
        Ok(deployment.clone())
    }
}
