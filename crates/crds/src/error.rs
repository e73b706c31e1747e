//! CRD crate errors

use thiserror::Error;

/// Errors that can occur when working with Dynamo custom resources
#[derive(Debug, Error)]
pub enum CrdError {
    /// A value could not be converted into a deployment spec
    #[error("Invalid spec: {0}")]
    InvalidSpec(#[from] serde_json::Error),

    /// The same group/version/kind was registered with a different shape
    #[error("Registration conflict for {kind}: already registered as {existing}, attempted {attempted}")]
    RegistrationConflict {
        /// Fully qualified kind (group/version/kind)
        kind: String,
        /// Plural of the existing registration
        existing: String,
        /// Plural of the rejected registration
        attempted: String,
    },

    /// YAML rendering error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_yaml::Error),
}
