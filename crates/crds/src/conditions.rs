//! Status conditions
//!
//! Helpers for building `meta/v1` conditions and for keeping a condition
//! list keyed by `type`: at most one entry per type, replacements keep
//! their position, new types are appended.

use k8s_openapi::apimachinery::pkg::apis::meta::v1::{Condition, Time};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Condition type written when a deployment endpoint is reachable
pub const ENDPOINT_EXPOSED: &str = "EndpointExposed";

/// Tri-state condition status
///
/// Serializes as the Kubernetes wire strings "True", "False" and "Unknown".
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "PascalCase")]
pub enum ConditionStatus {
    /// The condition holds
    True,
    /// The condition does not hold
    False,
    /// The controller cannot tell yet
    #[default]
    Unknown,
}

impl ConditionStatus {
    /// Wire representation used in `Condition::status`
    pub fn as_str(self) -> &'static str {
        match self {
            ConditionStatus::True => "True",
            ConditionStatus::False => "False",
            ConditionStatus::Unknown => "Unknown",
        }
    }

    /// Parse the wire representation; anything unrecognised is `None`
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "True" => Some(ConditionStatus::True),
            "False" => Some(ConditionStatus::False),
            "Unknown" => Some(ConditionStatus::Unknown),
            _ => None,
        }
    }
}

impl From<bool> for ConditionStatus {
    fn from(value: bool) -> Self {
        if value {
            ConditionStatus::True
        } else {
            ConditionStatus::False
        }
    }
}

impl fmt::Display for ConditionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build a condition stamped with the current time.
pub fn new_condition(
    type_: impl Into<String>,
    status: ConditionStatus,
    reason: impl Into<String>,
    message: impl Into<String>,
) -> Condition {
    Condition {
        type_: type_.into(),
        status: status.as_str().to_string(),
        reason: reason.into(),
        message: message.into(),
        last_transition_time: Time(chrono::Utc::now()),
        observed_generation: None,
    }
}

/// Operations on a condition list keyed by condition type
pub trait ConditionsExt {
    /// Insert `condition`, replacing an existing entry of the same type in place.
    fn upsert(&mut self, condition: Condition);

    /// Find the condition with the given type
    fn find_type(&self, type_: &str) -> Option<&Condition>;

    /// Whether the condition with the given type exists and is "True"
    fn is_true(&self, type_: &str) -> bool {
        self.find_type(type_)
            .is_some_and(|c| ConditionStatus::from_wire(&c.status) == Some(ConditionStatus::True))
    }
}

impl ConditionsExt for Vec<Condition> {
    fn upsert(&mut self, condition: Condition) {
        match self.iter_mut().find(|existing| existing.type_ == condition.type_) {
            Some(existing) => *existing = condition,
            None => self.push(condition),
        }
    }

    fn find_type(&self, type_: &str) -> Option<&Condition> {
        self.iter().find(|c| c.type_ == type_)
    }
}
