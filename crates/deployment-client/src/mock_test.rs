//! Unit tests for MockDeploymentStore

#[cfg(test)]
mod tests {
    use crate::mock::{selector_matches, MockDeploymentStore};
    use crate::{CreateDeploymentRequest, DeploymentStoreTrait, StoreError};
    use dynamo_crds::{ConditionStatus, DynamoDeploymentStatus, ENDPOINT_EXPOSED};
    use std::collections::BTreeMap;

    fn request(name: &str, namespace: &str) -> CreateDeploymentRequest {
        CreateDeploymentRequest::new(name, namespace, "llm-graph:v1")
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let store = MockDeploymentStore::new();

        let created = store.create_deployment(request("llm", "dynamo")).await.unwrap();
        assert!(created.metadata.uid.is_some());

        let fetched = store.get_deployment("llm", "dynamo").await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_create_duplicate_fails() {
        let store = MockDeploymentStore::new();
        store.create_deployment(request("llm", "dynamo")).await.unwrap();

        let result = store.create_deployment(request("llm", "dynamo")).await;
        assert!(matches!(result, Err(StoreError::AlreadyExists(key)) if key == "dynamo/llm"));

        // Same name in another namespace is a different resource
        store.create_deployment(request("llm", "other")).await.unwrap();
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let store = MockDeploymentStore::new();
        let result = store.get_deployment("missing", "dynamo").await;
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete() {
        let store = MockDeploymentStore::new();
        store.create_deployment(request("llm", "dynamo")).await.unwrap();

        store.delete_deployment("llm", "dynamo").await.unwrap();
        assert!(store.is_empty());

        let again = store.delete_deployment("llm", "dynamo").await;
        assert!(matches!(again, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_filters_namespace_and_labels() {
        let store = MockDeploymentStore::new();
        store
            .create_deployment(request("b", "dynamo").with_label("team", "search"))
            .await
            .unwrap();
        store
            .create_deployment(request("a", "dynamo").with_label("team", "search"))
            .await
            .unwrap();
        store
            .create_deployment(request("c", "dynamo").with_label("team", "chat"))
            .await
            .unwrap();
        store
            .create_deployment(request("d", "other").with_label("team", "search"))
            .await
            .unwrap();

        let all = store.list_deployments("dynamo", None).await.unwrap();
        assert_eq!(all.len(), 3);

        let search = store.list_deployments("dynamo", Some("team=search")).await.unwrap();
        let names: Vec<_> = search.iter().filter_map(|d| d.metadata.name.as_deref()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_update_status() {
        let store = MockDeploymentStore::new();
        let mut deployment = store.create_deployment(request("llm", "dynamo")).await.unwrap();

        deployment.set_state("Running");
        deployment.set_endpoint_status(true, "llm.example.com");
        let status = deployment.status.clone().unwrap();
        let updated = store.update_status("llm", "dynamo", &status).await.unwrap();

        assert_eq!(updated.state(), Some("Running"));
        assert_eq!(updated.endpoint_url(), Some("https://llm.example.com"));
        assert!(updated.is_condition_true(ENDPOINT_EXPOSED));

        let fetched = store.get_deployment("llm", "dynamo").await.unwrap();
        assert_eq!(fetched.status, Some(status));
    }

    #[tokio::test]
    async fn test_update_status_missing() {
        let store = MockDeploymentStore::new();
        let status = DynamoDeploymentStatus {
            state: "Failed".to_string(),
            conditions: vec![dynamo_crds::new_condition(
                "Ready",
                ConditionStatus::False,
                "Missing",
                "",
            )],
        };

        let result = store.update_status("llm", "dynamo", &status).await;
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_debug_shows_stored_count() {
        let store = MockDeploymentStore::new();
        store.create_deployment(request("llm", "dynamo")).await.unwrap();

        let rendered = format!("{store:?}");
        assert!(rendered.starts_with("MockDeploymentStore"));
        assert!(rendered.contains("deployments: 1"));
    }

    #[test]
    fn test_selector_matches() {
        let labels: BTreeMap<String, String> = [("team", "search"), ("tier", "gpu")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        assert!(selector_matches("team=search", Some(&labels)));
        assert!(selector_matches("team==search, tier=gpu", Some(&labels)));
        assert!(selector_matches("tier", Some(&labels)));
        assert!(selector_matches("team!=chat", Some(&labels)));
        assert!(selector_matches("!owner", Some(&labels)));
        assert!(!selector_matches("team=chat", Some(&labels)));
        assert!(!selector_matches("tier in (gpu)", Some(&labels)));
        assert!(!selector_matches("team=search", None));
        assert!(selector_matches("", None));
    }
}
