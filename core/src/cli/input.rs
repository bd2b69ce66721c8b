use crate::error::Result;
use crate::metadata::InstanceMetadata;
use crate::types::{Measurement, MeasurementContext, MeasurementEntry, Timepoint};
use dicom::object::open_file;
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Context entry as written in a context file
///
/// `dicomFile` names the image the measurement was taken on; its attributes
/// fill the metadata, with explicit `metadata` values taking precedence.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EntryInput {
    measurement: Measurement,
    timepoint: Timepoint,
    #[serde(default)]
    metadata: InstanceMetadata,
    #[serde(default)]
    dicom_file: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContextInput {
    #[serde(default)]
    targets: Vec<EntryInput>,
    #[serde(default)]
    non_targets: Vec<EntryInput>,
}

/// Loads a measurement context file
///
/// Relative `dicomFile` paths resolve against the context file's directory.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or a referenced
/// DICOM file cannot be opened
pub fn load_context(path: &Path) -> Result<MeasurementContext> {
    let json = std::fs::read_to_string(path)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    parse_context(&json, base_dir)
}

/// Parses a measurement context document
pub fn parse_context(json: &str, base_dir: &Path) -> Result<MeasurementContext> {
    let input: ContextInput = serde_json::from_str(json)?;

    Ok(MeasurementContext {
        targets: resolve_entries(input.targets, base_dir)?,
        non_targets: resolve_entries(input.non_targets, base_dir)?,
    })
}

fn resolve_entries(entries: Vec<EntryInput>, base_dir: &Path) -> Result<Vec<MeasurementEntry>> {
    entries
        .into_iter()
        .map(|entry| resolve_entry(entry, base_dir))
        .collect()
}

fn resolve_entry(entry: EntryInput, base_dir: &Path) -> Result<MeasurementEntry> {
    let metadata = match entry.dicom_file {
        Some(file) => {
            let path = base_dir.join(file);
            debug!("Reading metadata from {}", path.display());
            let dcm = open_file(&path)?;
            InstanceMetadata::from_dicom(&dcm).merged_with(entry.metadata)
        }
        None => entry.metadata,
    };

    Ok(MeasurementEntry::new(entry.measurement, entry.timepoint).with_metadata(metadata))
}
