//! # CRD Generator
//!
//! Prints the `Component` CustomResourceDefinition as YAML.
//!
//! ```bash
//! cargo run --bin crdgen > config/crd/component.yaml
//! cargo run --bin crdgen | oc apply -f -
//! ```

use component_operator::crd::Component;
use kube::CustomResourceExt;

fn main() -> anyhow::Result<()> {
    print!("{}", serde_yaml::to_string(&Component::crd())?);
    Ok(())
}
