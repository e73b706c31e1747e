//! Unit tests for the type registry

#[cfg(test)]
mod tests {
    use crate::*;
    use kube::CustomResource;
    use schemars::JsonSchema;
    use serde::{Deserialize, Serialize};

    // Same group/version/kind as DynamoDeployment, different plural
    mod conflicting {
        use super::*;

        #[derive(CustomResource, Debug, Clone, Serialize, Deserialize, JsonSchema)]
        #[kube(
            group = "nvidia.com",
            version = "v1alpha1",
            kind = "DynamoDeployment",
            plural = "dynamodeploys",
            namespaced
        )]
        pub struct OtherSpec {
            pub name: String,
        }
    }

    #[test]
    fn test_add_to_registry_registers_deployment() {
        let mut registry = TypeRegistry::new();
        assert!(registry.is_empty());

        add_to_registry(&mut registry).unwrap();

        assert_eq!(registry.len(), 1);
        assert!(registry.is_registered::<DynamoDeployment>());
        let entry = registry.get(API_GROUP, API_VERSION, "DynamoDeployment").unwrap();
        assert_eq!(entry.plural, "dynamodeployments");
        assert_eq!(entry.list_kind, "DynamoDeploymentList");
        assert!(entry.namespaced);
        assert_eq!(entry.gvk(), "nvidia.com/v1alpha1/DynamoDeployment");
        assert_eq!(
            entry.crd.metadata.name.as_deref(),
            Some("dynamodeployments.nvidia.com")
        );
    }

    #[test]
    fn test_register_is_idempotent() {
        let mut registry = TypeRegistry::new();

        assert!(registry.register::<DynamoDeployment>().unwrap());
        assert!(!registry.register::<DynamoDeployment>().unwrap());
        add_to_registry(&mut registry).unwrap();

        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_register_conflict() {
        let mut registry = TypeRegistry::new();
        registry.register::<DynamoDeployment>().unwrap();

        let err = registry
            .register::<conflicting::DynamoDeployment>()
            .unwrap_err();

        match err {
            CrdError::RegistrationConflict { existing, attempted, .. } => {
                assert_eq!(existing, "dynamodeployments");
                assert_eq!(attempted, "dynamodeploys");
            }
            other => panic!("Unexpected error: {other}"),
        }
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_lookup_by_list_kind() {
        let mut registry = TypeRegistry::new();
        add_to_registry(&mut registry).unwrap();

        let entry = registry
            .get_by_list_kind(API_GROUP, API_VERSION, "DynamoDeploymentList")
            .unwrap();
        assert_eq!(entry.kind, "DynamoDeployment");
        assert!(registry.get(API_GROUP, "v1", "DynamoDeployment").is_none());
    }

    #[test]
    fn test_separate_registries_are_independent() {
        let mut first = TypeRegistry::new();
        let second = TypeRegistry::new();

        add_to_registry(&mut first).unwrap();

        assert!(first.is_registered::<DynamoDeployment>());
        assert!(!second.is_registered::<DynamoDeployment>());
    }

    #[test]
    fn test_to_yaml_renders_crd() {
        let mut registry = TypeRegistry::new();
        add_to_registry(&mut registry).unwrap();

        let yaml = registry.to_yaml().unwrap();

        assert!(yaml.starts_with("---\n"));
        assert!(yaml.contains("kind: CustomResourceDefinition"));
        assert!(yaml.contains("name: dynamodeployments.nvidia.com"));
        assert!(yaml.contains("dynamoNim"));
        assert!(yaml.contains("shortNames"));
    }
}
