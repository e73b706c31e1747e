//! Deployment store errors

use thiserror::Error;

/// Errors that can occur when talking to the cluster API
#[derive(Debug, Error)]
pub enum StoreError {
    /// Kubernetes API error
    #[error("Kubernetes error: {0}")]
    Kube(#[from] kube::Error),

    /// Deployment not found
    #[error("Deployment not found: {0}")]
    NotFound(String),

    /// A deployment with the same name already exists
    #[error("Deployment already exists: {0}")]
    AlreadyExists(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// HTTP status code of a Kubernetes API error, if this is one
    pub fn api_code(&self) -> Option<u16> {
        match self {
            StoreError::Kube(kube::Error::Api(response)) => Some(response.code),
            _ => None,
        }
    }

    /// Map 404/409 API responses to the dedicated variants
    pub(crate) fn from_kube(err: kube::Error, key: &str) -> Self {
        let err = StoreError::Kube(err);
        match err.api_code() {
            Some(404) => StoreError::NotFound(key.to_string()),
            Some(409) => StoreError::AlreadyExists(key.to_string()),
            _ => err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kube::error::ErrorResponse;

    fn api_error(code: u16) -> kube::Error {
        kube::Error::Api(ErrorResponse {
            status: "Failure".to_string(),
            message: format!("request failed with {code}"),
            reason: "Test".to_string(),
            code,
        })
    }

    #[test]
    fn test_from_kube_not_found() {
        let err = StoreError::from_kube(api_error(404), "dynamo/llm");
        assert!(matches!(err, StoreError::NotFound(key) if key == "dynamo/llm"));
    }

    #[test]
    fn test_from_kube_conflict() {
        let err = StoreError::from_kube(api_error(409), "dynamo/llm");
        assert!(matches!(err, StoreError::AlreadyExists(key) if key == "dynamo/llm"));
    }

    #[test]
    fn test_from_kube_other_codes_pass_through() {
        let err = StoreError::from_kube(api_error(500), "dynamo/llm");
        assert_eq!(err.api_code(), Some(500));
        assert!(matches!(err, StoreError::Kube(_)));
    }

    #[test]
    fn test_api_code_only_for_api_errors() {
        assert_eq!(StoreError::NotFound("x".to_string()).api_code(), None);
    }
}
