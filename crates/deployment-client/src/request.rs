//! Deployment creation request

use dynamo_crds::{DynamoDeployment, DynamoDeploymentSpec};
use k8s_openapi::api::core::v1::EnvVar;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use std::collections::BTreeMap;

/// Parameters for submitting a new DynamoDeployment
#[derive(Debug, Clone, PartialEq)]
pub struct CreateDeploymentRequest {
    /// Resource name
    pub name: String,
    /// Target namespace
    pub namespace: String,
    /// Artifact name and version (format: "name:version")
    pub dynamo_nim: String,
    /// Resource labels
    pub labels: BTreeMap<String, String>,
    /// Deployment-wide environment variables
    pub envs: Vec<EnvVar>,
}

impl CreateDeploymentRequest {
    /// Request with no labels and no environment variables
    pub fn new(
        name: impl Into<String>,
        namespace: impl Into<String>,
        dynamo_nim: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            dynamo_nim: dynamo_nim.into(),
            labels: BTreeMap::new(),
            envs: Vec::new(),
        }
    }

    /// Add a resource label
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    /// Add a deployment-wide environment variable with a literal value
    pub fn with_env(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push(EnvVar {
            name: name.into(),
            value: Some(value.into()),
            ..Default::default()
        });
        self
    }

    /// "namespace/name" key used in logs and errors
    pub fn key(&self) -> String {
        format!("{}/{}", self.namespace, self.name)
    }

    /// Build the resource to submit. Services start without overrides.
    pub fn into_resource(self) -> DynamoDeployment {
        let mut spec = DynamoDeploymentSpec::new(self.dynamo_nim);
        spec.envs = self.envs;

        let mut resource = DynamoDeployment::new(&self.name, spec);
        resource.metadata = ObjectMeta {
            name: Some(self.name),
            namespace: Some(self.namespace),
            labels: (!self.labels.is_empty()).then_some(self.labels),
            ..Default::default()
        };
        resource
    }
}
