//! # OpenShift API Types
//!
//! Typed clients for the OpenShift objects the operator creates. Declared
//! with kube-derive so they get `Resource` impls and work with `Api<K>`;
//! the CRDs themselves belong to the platform and are never generated here.
//!
//! - `image.rs` - `ImageStream` (image.openshift.io/v1)
//! - `build.rs` - `BuildConfig` (build.openshift.io/v1)

mod build;
mod image;

pub use build::{
    BuildConfig, BuildConfigSpec, BuildOutput, BuildSource, BuildSourceType, BuildStrategy,
    BuildStrategyType, BuildTriggerPolicy, BuildTriggerType, GitBuildSource, ImageChangeTrigger,
    SourceBuildStrategy,
};
pub use image::{ImageLookupPolicy, ImageStream, ImageStreamSpec, TagReference};

use k8s_openapi::api::core::v1::ObjectReference;

/// Reference to an `ImageStreamTag` (`<stream>:<tag>`), optionally in another namespace
pub fn image_stream_tag_ref(
    stream_tag: impl Into<String>,
    namespace: Option<&str>,
) -> ObjectReference {
    ObjectReference {
        kind: Some("ImageStreamTag".to_string()),
        name: Some(stream_tag.into()),
        namespace: namespace.map(ToString::to_string),
        ..ObjectReference::default()
    }
}

/// Reference to an external image by pull spec
pub fn docker_image_ref(pull_spec: impl Into<String>) -> ObjectReference {
    ObjectReference {
        kind: Some("DockerImage".to_string()),
        name: Some(pull_spec.into()),
        ..ObjectReference::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kube::Resource;

    #[test]
    fn test_api_coordinates() {
        assert_eq!(ImageStream::api_version(&()), "image.openshift.io/v1");
        assert_eq!(ImageStream::plural(&()), "imagestreams");
        assert_eq!(BuildConfig::api_version(&()), "build.openshift.io/v1");
        assert_eq!(BuildConfig::plural(&()), "buildconfigs");
    }

    #[test]
    fn test_image_change_trigger_serializes_as_empty_object() {
        let value = serde_json::to_value(BuildTriggerPolicy::image_change()).unwrap();
        assert_eq!(value, serde_json::json!({"type": "ImageChange", "imageChange": {}}));

        let value = serde_json::to_value(BuildTriggerPolicy::config_change()).unwrap();
        assert_eq!(value, serde_json::json!({"type": "ConfigChange"}));
    }

    #[test]
    fn test_references_omit_unset_fields() {
        let value = serde_json::to_value(image_stream_tag_ref("app-output:latest", None)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"kind": "ImageStreamTag", "name": "app-output:latest"})
        );

        let value = serde_json::to_value(docker_image_ref("registry/image:1")).unwrap();
        assert_eq!(value, serde_json::json!({"kind": "DockerImage", "name": "registry/image:1"}));
    }
}
