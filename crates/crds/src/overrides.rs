//! Per-service deployment overrides
//!
//! Each entry in a deployment's `services` map adjusts one service defined by
//! the artifact. Unset fields keep the artifact's defaults.

use k8s_openapi::api::core::v1::{EnvVar, ResourceRequirements};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Overrides applied to a single service of a Dynamo artifact
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DynamoNimDeploymentOverrides {
    /// Replica count for the service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i32>,

    /// Compute resources for the service containers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceRequirements>,

    /// Extra environment variables for this service only
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub envs: Vec<EnvVar>,

    /// Labels added to the service's workload
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,

    /// Annotations added to the service's workload
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
}

impl DynamoNimDeploymentOverrides {
    /// True when no field is set, i.e. the service runs with artifact defaults
    pub fn is_empty(&self) -> bool {
        self.replicas.is_none()
            && self.resources.is_none()
            && self.envs.is_empty()
            && self.labels.is_empty()
            && self.annotations.is_empty()
    }
}
