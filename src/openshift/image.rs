//! # ImageStream
//!
//! `image.openshift.io/v1` ImageStream, reduced to the fields the operator writes.

use k8s_openapi::api::core::v1::ObjectReference;
use serde::{Deserialize, Serialize};

/// ImageStream tracks tagged container image references
#[derive(kube::CustomResource, Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[kube(
    kind = "ImageStream",
    group = "image.openshift.io",
    version = "v1",
    namespaced,
    schema = "disabled"
)]
#[serde(rename_all = "camelCase")]
pub struct ImageStreamSpec {
    /// Whether pods may resolve the stream's tags by name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lookup_policy: Option<ImageLookupPolicy>,
    /// Tags tracked by this stream
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<TagReference>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageLookupPolicy {
    #[serde(default)]
    pub local: bool,
}

/// A named tag and the image it points at
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagReference {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<ObjectReference>,
}
