//! # CRD Validation Tests
//!
//! Deserialization of sample Component manifests and checks on the
//! generated CustomResourceDefinition.

use component_operator::crd::Component;
use component_operator::openshift::ImageStream;
use kube::CustomResourceExt;

#[test]
fn test_component_with_all_fields() {
    let yaml = r#"
apiVersion: devopsconsole.openshift.io/v1alpha1
kind: Component
metadata:
  name: myapp
  namespace: dev
spec:
  buildType: nodejs
  codebase: https://github.com/nodeshift-starters/nodejs-rest-http
status:
  revNumber: "1001"
  phase: Ready
  description: Provisioned ImageStreams and BuildConfig for revision 1001
  conditions:
    - type: Ready
      status: "True"
      reason: ProvisioningSucceeded
  observedGeneration: 1
"#;

    let component: Component =
        serde_yaml::from_str(yaml).expect("Should deserialize Component with all fields");

    assert_eq!(component.spec.build_type, "nodejs");
    assert_eq!(
        component.spec.codebase,
        "https://github.com/nodeshift-starters/nodejs-rest-http"
    );
    let status = component.status.expect("status present");
    assert_eq!(status.rev_number(), Some("1001"));
    assert_eq!(status.phase.as_deref(), Some("Ready"));
    assert_eq!(status.conditions.len(), 1);
    assert_eq!(status.conditions[0].status, "True");
    assert_eq!(status.observed_generation, Some(1));
}

#[test]
fn test_component_minimal() {
    let yaml = r#"
apiVersion: devopsconsole.openshift.io/v1alpha1
kind: Component
metadata:
  name: bare
spec: {}
"#;

    let component: Component =
        serde_yaml::from_str(yaml).expect("Should deserialize Component with empty spec");
    assert!(component.spec.build_type.is_empty());
    assert!(component.spec.codebase.is_empty());
    assert!(component.status.is_none());
}

#[test]
fn test_empty_rev_number_counts_as_unset() {
    let yaml = r#"
apiVersion: devopsconsole.openshift.io/v1alpha1
kind: Component
metadata:
  name: myapp
spec:
  buildType: nodejs
status:
  revNumber: ""
"#;

    let component: Component = serde_yaml::from_str(yaml).expect("Should deserialize");
    assert_eq!(component.status.and_then(|s| s.rev_number().map(String::from)), None);
}

#[test]
fn test_generated_crd_shape() {
    let crd = Component::crd();
    assert_eq!(
        crd.metadata.name.as_deref(),
        Some("components.devopsconsole.openshift.io")
    );
    assert_eq!(crd.spec.group, "devopsconsole.openshift.io");
    assert_eq!(crd.spec.scope, "Namespaced");
    assert_eq!(crd.spec.names.kind, "Component");
    assert_eq!(crd.spec.names.plural, "components");
    assert_eq!(crd.spec.names.short_names, Some(vec!["comp".to_string()]));

    assert_eq!(crd.spec.versions.len(), 1);
    let version = &crd.spec.versions[0];
    assert_eq!(version.name, "v1alpha1");
    assert!(version.served);
    assert!(version.storage);
    assert!(version
        .subresources
        .as_ref()
        .is_some_and(|s| s.status.is_some()));
    assert!(version.schema.is_some());
}

#[test]
fn test_crd_serializes_to_yaml() {
    let yaml = serde_yaml::to_string(&Component::crd()).expect("CRD serializes");
    assert!(yaml.contains("kind: CustomResourceDefinition"));
    assert!(yaml.contains("buildType"));
    assert!(yaml.contains("revNumber"));
}

#[test]
fn test_image_stream_from_cluster_ignores_unknown_fields() {
    let yaml = r#"
apiVersion: image.openshift.io/v1
kind: ImageStream
metadata:
  name: myapp-runtime
  namespace: dev
spec:
  lookupPolicy:
    local: false
  tags:
    - name: latest
      from:
        kind: DockerImage
        name: nodeshift/centos7-s2i-nodejs:10.x
      importPolicy: {}
      referencePolicy:
        type: Source
status:
  dockerImageRepository: image-registry.openshift-image-registry.svc:5000/dev/myapp-runtime
"#;

    let stream: ImageStream = serde_yaml::from_str(yaml).expect("Should deserialize ImageStream");
    assert_eq!(stream.spec.tags.len(), 1);
    assert_eq!(
        stream.spec.tags[0].from.as_ref().and_then(|f| f.name.as_deref()),
        Some("nodeshift/centos7-s2i-nodejs:10.x")
    );
}
