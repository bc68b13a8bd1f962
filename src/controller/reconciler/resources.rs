//! # Derived Objects
//!
//! Builders for the objects provisioned per Component. Names follow
//! `<component>-output`, `<component>-runtime` and `<component>-bc`; every
//! object carries `app=<component>` and a controller owner reference so the
//! garbage collector removes it together with the Component.

use crate::constants::{
    APP_LABEL, BUILD_CONFIG_SUFFIX, BUILD_TYPE_IMAGES, DEFAULT_GIT_REF, DEFAULT_IMAGE_TAG,
    OUTPUT_IMAGE_STREAM_SUFFIX, RUNTIME_IMAGE_STREAM_SUFFIX,
};
use crate::controller::reconciler::types::ReconcilerError;
use crate::crd::Component;
use crate::openshift::{
    docker_image_ref, image_stream_tag_ref, BuildConfig, BuildConfigSpec, BuildOutput,
    BuildSource, BuildSourceType, BuildStrategy, BuildStrategyType, BuildTriggerPolicy,
    GitBuildSource, ImageLookupPolicy, ImageStream, ImageStreamSpec, SourceBuildStrategy,
    TagReference,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ObjectMeta, OwnerReference};
use kube::{Resource, ResourceExt};
use std::collections::BTreeMap;

/// s2i builder image for a build type, if one is registered
pub fn runtime_image_for(build_type: &str) -> Option<&'static str> {
    BUILD_TYPE_IMAGES
        .iter()
        .find(|(known, _)| *known == build_type)
        .map(|(_, image)| *image)
}

pub fn output_image_stream_name(component: &str) -> String {
    format!("{component}{OUTPUT_IMAGE_STREAM_SUFFIX}")
}

pub fn runtime_image_stream_name(component: &str) -> String {
    format!("{component}{RUNTIME_IMAGE_STREAM_SUFFIX}")
}

pub fn build_config_name(component: &str) -> String {
    format!("{component}{BUILD_CONFIG_SUFFIX}")
}

/// Controller owner reference pointing at the Component
///
/// # Errors
///
/// Fails when the Component has no uid (it was never persisted).
pub fn owner_reference(component: &Component) -> Result<OwnerReference, ReconcilerError> {
    component
        .controller_owner_ref(&())
        .ok_or(ReconcilerError::MissingObjectKey(".metadata.uid"))
}

fn object_meta(
    name: String,
    namespace: &str,
    component: &str,
    owner: &OwnerReference,
) -> ObjectMeta {
    ObjectMeta {
        name: Some(name),
        namespace: Some(namespace.to_string()),
        labels: Some(BTreeMap::from([(APP_LABEL.to_string(), component.to_string())])),
        owner_references: Some(vec![owner.clone()]),
        ..ObjectMeta::default()
    }
}

/// Empty ImageStream that receives the build output
pub fn build_output_image_stream(
    namespace: &str,
    component: &str,
    owner: &OwnerReference,
) -> ImageStream {
    let name = output_image_stream_name(component);
    let mut stream = ImageStream::new(&name, ImageStreamSpec::default());
    stream.metadata = object_meta(name, namespace, component, owner);
    stream
}

/// ImageStream tracking the s2i builder image for the build type
///
/// # Errors
///
/// Returns `UnknownBuildType` when no image is registered for `build_type`.
pub fn build_runtime_image_stream(
    namespace: &str,
    component: &str,
    build_type: &str,
    owner: &OwnerReference,
) -> Result<ImageStream, ReconcilerError> {
    let image = runtime_image_for(build_type)
        .ok_or_else(|| ReconcilerError::UnknownBuildType(build_type.to_string()))?;

    let name = runtime_image_stream_name(component);
    let spec = ImageStreamSpec {
        lookup_policy: Some(ImageLookupPolicy { local: false }),
        tags: vec![TagReference {
            name: DEFAULT_IMAGE_TAG.to_string(),
            from: Some(docker_image_ref(image)),
        }],
    };
    let mut stream = ImageStream::new(&name, spec);
    stream.metadata = object_meta(name, namespace, component, owner);
    Ok(stream)
}

/// Source-strategy BuildConfig wiring the codebase, the runtime stream and the output stream
pub fn build_build_config(
    namespace: &str,
    component: &str,
    git_url: &str,
    git_ref: &str,
    owner: &OwnerReference,
) -> BuildConfig {
    let name = build_config_name(component);
    let spec = BuildConfigSpec {
        triggers: vec![
            BuildTriggerPolicy::config_change(),
            BuildTriggerPolicy::image_change(),
        ],
        source: BuildSource {
            r#type: BuildSourceType::Git,
            git: Some(GitBuildSource {
                uri: git_url.to_string(),
                r#ref: Some(git_ref.to_string()),
            }),
        },
        strategy: BuildStrategy {
            r#type: BuildStrategyType::Source,
            source_strategy: Some(SourceBuildStrategy {
                from: image_stream_tag_ref(
                    format!("{}:{DEFAULT_IMAGE_TAG}", runtime_image_stream_name(component)),
                    Some(namespace),
                ),
                incremental: Some(true),
            }),
        },
        output: BuildOutput {
            to: Some(image_stream_tag_ref(
                format!("{}:{DEFAULT_IMAGE_TAG}", output_image_stream_name(component)),
                None,
            )),
        },
    };
    let mut build_config = BuildConfig::new(&name, spec);
    build_config.metadata = object_meta(name, namespace, component, owner);
    build_config
}

/// Everything provisioned for one Component, in creation order
#[derive(Debug, Clone)]
pub struct DerivedObjects {
    pub output_image_stream: ImageStream,
    pub runtime_image_stream: ImageStream,
    pub build_config: BuildConfig,
}

impl DerivedObjects {
    /// Build all three objects for a Component
    ///
    /// Resolves the build type first, so an unknown build type fails before
    /// anything is sent to the API server.
    ///
    /// # Errors
    ///
    /// `MissingObjectKey` for a Component without namespace or uid,
    /// `UnknownBuildType` for an unregistered build type.
    pub fn for_component(component: &Component) -> Result<Self, ReconcilerError> {
        let name = component.name_any();
        let namespace = component
            .namespace()
            .ok_or(ReconcilerError::MissingObjectKey(".metadata.namespace"))?;
        let owner = owner_reference(component)?;

        let runtime_image_stream =
            build_runtime_image_stream(&namespace, &name, &component.spec.build_type, &owner)?;

        Ok(Self {
            output_image_stream: build_output_image_stream(&namespace, &name, &owner),
            runtime_image_stream,
            build_config: build_build_config(
                &namespace,
                &name,
                &component.spec.codebase,
                DEFAULT_GIT_REF,
                &owner,
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crd::ComponentSpec;

    fn component(build_type: &str) -> Component {
        let mut component = Component::new(
            "myapp",
            ComponentSpec {
                build_type: build_type.to_string(),
                codebase: "https://github.com/example/myapp".to_string(),
            },
        );
        component.metadata.namespace = Some("dev".to_string());
        component.metadata.uid = Some("0b5c7c4e-1111-4c3a-9f3e-2a1f7b6c9d10".to_string());
        component
    }

    #[test]
    fn test_runtime_image_lookup() {
        assert_eq!(
            runtime_image_for("nodejs"),
            Some("nodeshift/centos7-s2i-nodejs:10.x")
        );
        assert_eq!(runtime_image_for("java"), None);
        assert_eq!(runtime_image_for(""), None);
    }

    #[test]
    fn test_owner_reference_targets_component_as_controller() {
        let owner = owner_reference(&component("nodejs")).unwrap();
        assert_eq!(owner.api_version, "devopsconsole.openshift.io/v1alpha1");
        assert_eq!(owner.kind, "Component");
        assert_eq!(owner.name, "myapp");
        assert_eq!(owner.controller, Some(true));
    }

    #[test]
    fn test_owner_reference_requires_uid() {
        let mut component = component("nodejs");
        component.metadata.uid = None;
        assert!(matches!(
            owner_reference(&component),
            Err(ReconcilerError::MissingObjectKey(".metadata.uid"))
        ));
    }

    #[test]
    fn test_derived_objects_are_named_labelled_and_owned() {
        let objects = DerivedObjects::for_component(&component("nodejs")).unwrap();

        let metas = [
            &objects.output_image_stream.metadata,
            &objects.runtime_image_stream.metadata,
            &objects.build_config.metadata,
        ];
        let names: Vec<&str> = metas.iter().filter_map(|m| m.name.as_deref()).collect();
        assert_eq!(names, vec!["myapp-output", "myapp-runtime", "myapp-bc"]);

        for meta in metas {
            assert_eq!(meta.namespace.as_deref(), Some("dev"));
            assert_eq!(
                meta.labels.as_ref().and_then(|l| l.get("app")).map(String::as_str),
                Some("myapp")
            );
            let owners = meta.owner_references.as_ref().unwrap();
            assert_eq!(owners.len(), 1);
            assert_eq!(owners[0].uid, "0b5c7c4e-1111-4c3a-9f3e-2a1f7b6c9d10");
        }
    }

    #[test]
    fn test_output_stream_has_empty_spec() {
        let objects = DerivedObjects::for_component(&component("nodejs")).unwrap();
        assert_eq!(objects.output_image_stream.spec, ImageStreamSpec::default());
    }

    #[test]
    fn test_runtime_stream_tags_builder_image() {
        let objects = DerivedObjects::for_component(&component("nodejs")).unwrap();
        let spec = &objects.runtime_image_stream.spec;
        assert_eq!(spec.lookup_policy, Some(ImageLookupPolicy { local: false }));
        assert_eq!(spec.tags.len(), 1);
        assert_eq!(spec.tags[0].name, "latest");
        let from = spec.tags[0].from.as_ref().unwrap();
        assert_eq!(from.kind.as_deref(), Some("DockerImage"));
        assert_eq!(from.name.as_deref(), Some("nodeshift/centos7-s2i-nodejs:10.x"));
    }

    #[test]
    fn test_build_config_wires_streams_and_source() {
        let objects = DerivedObjects::for_component(&component("nodejs")).unwrap();
        let spec = &objects.build_config.spec;

        let git = spec.source.git.as_ref().unwrap();
        assert_eq!(spec.source.r#type, BuildSourceType::Git);
        assert_eq!(git.uri, "https://github.com/example/myapp");
        assert_eq!(git.r#ref.as_deref(), Some("master"));

        let to = spec.output.to.as_ref().unwrap();
        assert_eq!(to.kind.as_deref(), Some("ImageStreamTag"));
        assert_eq!(to.name.as_deref(), Some("myapp-output:latest"));

        let strategy = spec.strategy.source_strategy.as_ref().unwrap();
        assert_eq!(spec.strategy.r#type, BuildStrategyType::Source);
        assert_eq!(strategy.from.name.as_deref(), Some("myapp-runtime:latest"));
        assert_eq!(strategy.from.namespace.as_deref(), Some("dev"));
        assert_eq!(strategy.incremental, Some(true));

        let trigger_types: Vec<_> = spec.triggers.iter().map(|t| t.r#type).collect();
        assert_eq!(
            trigger_types,
            vec![
                crate::openshift::BuildTriggerType::ConfigChange,
                crate::openshift::BuildTriggerType::ImageChange
            ]
        );
    }

    #[test]
    fn test_unknown_build_type_fails_before_building() {
        let result = DerivedObjects::for_component(&component("cobol"));
        assert!(matches!(
            result,
            Err(ReconcilerError::UnknownBuildType(ref t)) if t == "cobol"
        ));
    }
}
