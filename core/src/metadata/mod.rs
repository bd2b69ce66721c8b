//! DICOM instance metadata consumed by the conformance criteria

mod instance;
pub mod tags;

pub use instance::InstanceMetadata;
pub use tags::{parse_tag, tag_key};
