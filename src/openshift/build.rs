//! # BuildConfig
//!
//! `build.openshift.io/v1` BuildConfig, reduced to the fields the operator writes.
//! The upstream type inlines its common build spec, so `source`, `strategy`
//! and `output` sit directly under `spec`.

use k8s_openapi::api::core::v1::ObjectReference;
use serde::{Deserialize, Serialize};

/// BuildConfig defines how to build a container image from source
#[derive(kube::CustomResource, Debug, Clone, PartialEq, Deserialize, Serialize)]
#[kube(
    kind = "BuildConfig",
    group = "build.openshift.io",
    version = "v1",
    namespaced,
    schema = "disabled"
)]
#[serde(rename_all = "camelCase")]
pub struct BuildConfigSpec {
    /// Events that start a new build
    #[serde(default)]
    pub triggers: Vec<BuildTriggerPolicy>,
    /// Where the source comes from
    pub source: BuildSource,
    /// How the source is turned into an image
    pub strategy: BuildStrategy,
    /// Where the built image is pushed
    #[serde(default)]
    pub output: BuildOutput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum BuildSourceType {
    Git,
    Dockerfile,
    Binary,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildSource {
    pub r#type: BuildSourceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git: Option<GitBuildSource>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GitBuildSource {
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r#ref: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum BuildStrategyType {
    Source,
    Docker,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildStrategy {
    pub r#type: BuildStrategyType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_strategy: Option<SourceBuildStrategy>,
}

/// Source-to-image strategy: builds `source` on top of the `from` builder image
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceBuildStrategy {
    pub from: ObjectReference,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incremental: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildOutput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<ObjectReference>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum BuildTriggerType {
    ConfigChange,
    ImageChange,
    GitHub,
    Generic,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildTriggerPolicy {
    pub r#type: BuildTriggerType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_change: Option<ImageChangeTrigger>,
}

impl BuildTriggerPolicy {
    /// Rebuild whenever the BuildConfig itself changes
    pub fn config_change() -> Self {
        Self {
            r#type: BuildTriggerType::ConfigChange,
            image_change: None,
        }
    }

    /// Rebuild whenever the strategy's builder image changes
    pub fn image_change() -> Self {
        Self {
            r#type: BuildTriggerType::ImageChange,
            image_change: Some(ImageChangeTrigger::default()),
        }
    }
}

/// An empty trigger watches the image referenced by the build strategy
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageChangeTrigger {
    #[serde(
        rename = "lastTriggeredImageID",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub last_triggered_image_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<ObjectReference>,
}
