//! Ingestion pipeline: validate an upload, then replace the company's assets

use crate::error::{IngestResult, ValidationError};
use crate::store::AssetStore;
use crate::validate::{parse_payload, CoordinatePolicy};

/// The `assetFile` part of an upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilePart {
    /// A file object: name as sent by the client plus raw content
    File { name: String, content: Vec<u8> },
    /// A plain form value where a file was expected
    Text(String),
}

/// An upload as received from the client, before validation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadForm {
    pub company_id: Option<String>,
    pub asset_file: Option<FilePart>,
}

impl UploadForm {
    pub fn new(company_id: impl Into<String>, asset_file: FilePart) -> Self {
        Self {
            company_id: Some(company_id.into()),
            asset_file: Some(asset_file),
        }
    }
}

/// Validate `form` and install its assets for the company
///
/// Returns the number of assets ingested. Nothing in the store changes
/// unless every check passes.
pub fn ingest(
    store: &AssetStore,
    form: UploadForm,
    policy: CoordinatePolicy,
) -> IngestResult<usize> {
    let (company_id, asset_file) = match (form.company_id, form.asset_file) {
        (Some(company_id), Some(asset_file)) if !company_id.is_empty() => {
            (company_id, asset_file)
        }
        _ => return Err(ValidationError::MissingField.into()),
    };

    let content = match asset_file {
        FilePart::File { content, .. } => content,
        FilePart::Text(_) => return Err(ValidationError::BadFileType.into()),
    };

    let assets: Vec<_> = parse_payload(&content, policy)?
        .into_iter()
        .map(|payload| payload.stamp(&company_id))
        .collect();
    let count = assets.len();

    store.replace(&company_id, assets);

    Ok(count)
}
