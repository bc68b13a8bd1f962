//! # Component Spec
//!
//! The `Component` custom resource definition.

use serde::{Deserialize, Serialize};

/// Component Custom Resource Definition
///
/// A Component names a source repository and the kind of runtime it builds
/// on. The operator provisions an s2i pipeline for it: an output ImageStream,
/// a runtime ImageStream and a BuildConfig.
///
/// # Example
///
/// ```yaml
/// apiVersion: devopsconsole.openshift.io/v1alpha1
/// kind: Component
/// metadata:
///   name: myapp
///   namespace: dev
/// spec:
///   buildType: nodejs
///   codebase: https://github.com/nodeshift-starters/nodejs-rest-http
/// ```
#[derive(kube::CustomResource, Debug, Clone, Default, Deserialize, Serialize, schemars::JsonSchema)]
#[kube(
    kind = "Component",
    group = "devopsconsole.openshift.io",
    version = "v1alpha1",
    namespaced,
    status = "crate::crd::ComponentStatus",
    shortname = "comp",
    printcolumn = r#"{"name":"BuildType", "type":"string", "jsonPath":".spec.buildType"}, {"name":"Phase", "type":"string", "jsonPath":".status.phase"}, {"name":"Ready", "type":"string", "jsonPath":".status.conditions[?(@.type==\"Ready\")].status"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct ComponentSpec {
    /// Runtime the component builds on, e.g. "nodejs"
    /// Selects the s2i builder image for the runtime ImageStream
    #[serde(default)]
    pub build_type: String,
    /// Git URL of the source repository
    #[serde(default)]
    pub codebase: String,
}
