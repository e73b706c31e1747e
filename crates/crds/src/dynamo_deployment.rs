//! DynamoDeployment CRD
//!
//! Deploys a Dynamo artifact (a packaged inference graph) to the cluster,
//! with optional per-service overrides and deployment-wide environment
//! variables. The operator reports progress through `status.state` and a
//! list of conditions keyed by type.

use crate::conditions::{new_condition, ConditionStatus, ConditionsExt, ENDPOINT_EXPOSED};
use crate::error::CrdError;
use crate::overrides::DynamoNimDeploymentOverrides;
use k8s_openapi::api::core::v1::EnvVar;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::Condition;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// DynamoDeploymentSpec defines the desired state of a DynamoDeployment
#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Default)]
#[kube(
    group = "nvidia.com",
    version = "v1alpha1",
    kind = "DynamoDeployment",
    plural = "dynamodeployments",
    shortname = "dd",
    namespaced,
    status = "DynamoDeploymentStatus",
    derive = "PartialEq",
    printcolumn = r#"{"name":"Artifact", "type":"string", "jsonPath":".spec.dynamoNim"}"#,
    printcolumn = r#"{"name":"State", "type":"string", "jsonPath":".status.state"}"#,
    printcolumn = r#"{"name":"Age", "type":"date", "jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct DynamoDeploymentSpec {
    /// Artifact to deploy (e.g., "my-graph:v3")
    pub dynamo_nim: String,

    /// Per-service overrides, keyed by the service name defined in the artifact.
    /// Services without an entry, or with a null entry, use the artifact's
    /// configuration as is.
    #[serde(
        default,
        deserialize_with = "deserialize_services",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    #[schemars(with = "BTreeMap<String, DynamoNimDeploymentOverrides>")]
    pub services: BTreeMap<String, DynamoNimDeploymentOverrides>,

    /// Environment variables set on every service of the deployment
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub envs: Vec<EnvVar>,
}

/// Accepts `null` for the whole map and for individual entries; a null entry
/// becomes an empty override.
fn deserialize_services<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<String, DynamoNimDeploymentOverrides>, D::Error>
where
    D: Deserializer<'de>,
{
    let services: Option<BTreeMap<String, Option<DynamoNimDeploymentOverrides>>> =
        Option::deserialize(deserializer)?;
    Ok(services
        .unwrap_or_default()
        .into_iter()
        .map(|(name, overrides)| (name, overrides.unwrap_or_default()))
        .collect())
}

impl DynamoDeploymentSpec {
    /// Create a spec for the given artifact with no overrides or envs
    pub fn new(dynamo_nim: impl Into<String>) -> Self {
        Self {
            dynamo_nim: dynamo_nim.into(),
            ..Self::default()
        }
    }

    /// Overrides for a service; `None` means the artifact default applies
    pub fn overrides_for(&self, service: &str) -> Option<&DynamoNimDeploymentOverrides> {
        self.services.get(service)
    }
}

impl TryFrom<serde_json::Value> for DynamoDeploymentSpec {
    type Error = CrdError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        Ok(serde_json::from_value(value)?)
    }
}

/// DynamoDeploymentStatus defines the observed state of a DynamoDeployment
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DynamoDeploymentStatus {
    /// Lifecycle label written by the operator (free-form)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub state: String,

    /// Observed conditions, at most one per type
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
}

/// Build the endpoint URL reported in the `EndpointExposed` condition
pub fn endpoint_url(is_secured: bool, endpoint_host: &str) -> String {
    let protocol = if is_secured { "https" } else { "http" };
    format!("{protocol}://{endpoint_host}")
}

impl DynamoDeployment {
    /// Status block, created empty if the object has none yet
    pub fn ensure_status(&mut self) -> &mut DynamoDeploymentStatus {
        self.status.get_or_insert_with(DynamoDeploymentStatus::default)
    }

    /// Current state label, if any has been written
    pub fn state(&self) -> Option<&str> {
        self.status
            .as_ref()
            .map(|s| s.state.as_str())
            .filter(|s| !s.is_empty())
    }

    /// Overwrite the state label. Any string is accepted.
    pub fn set_state(&mut self, state: impl Into<String>) {
        self.ensure_status().state = state.into();
    }

    /// Insert or replace a condition, keyed by its type.
    ///
    /// An existing condition of the same type is replaced at its current
    /// position; otherwise the condition is appended.
    pub fn add_status_condition(&mut self, condition: Condition) {
        self.ensure_status().conditions.upsert(condition);
    }

    /// Record the externally reachable endpoint as an `EndpointExposed` condition
    pub fn set_endpoint_status(&mut self, is_secured: bool, endpoint_host: &str) {
        self.add_status_condition(new_condition(
            ENDPOINT_EXPOSED,
            ConditionStatus::True,
            ENDPOINT_EXPOSED,
            endpoint_url(is_secured, endpoint_host),
        ));
    }

    /// Condition of the given type, if present
    pub fn condition(&self, type_: &str) -> Option<&Condition> {
        self.status.as_ref()?.conditions.find_type(type_)
    }

    /// Whether the condition of the given type is present and "True"
    pub fn is_condition_true(&self, type_: &str) -> bool {
        self.status
            .as_ref()
            .is_some_and(|s| s.conditions.is_true(type_))
    }

    /// URL recorded by the last `set_endpoint_status` call
    pub fn endpoint_url(&self) -> Option<&str> {
        self.condition(ENDPOINT_EXPOSED).map(|c| c.message.as_str())
    }

    /// Desired state
    pub fn spec(&self) -> &DynamoDeploymentSpec {
        &self.spec
    }

    /// Replace the desired state
    pub fn set_spec(&mut self, spec: DynamoDeploymentSpec) {
        self.spec = spec;
    }

    /// Replace the spec from an untyped value.
    ///
    /// The current spec is left untouched when the value does not have the
    /// shape of a `DynamoDeploymentSpec`.
    pub fn set_spec_from_value(&mut self, value: serde_json::Value) -> Result<(), CrdError> {
        self.spec = DynamoDeploymentSpec::try_from(value)?;
        Ok(())
    }
}
