//! Asset upload and listing handlers

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, Query, State};
use axum::Json;
use geoasset_core::{ingest, Asset, FilePart, UploadForm, UploadResponse};

use crate::error::ApiError;
use crate::state::AppState;

/// Multipart field carrying the company identifier
pub const COMPANY_ID_FIELD: &str = "companyId";
/// Multipart field carrying the asset file
pub const ASSET_FILE_FIELD: &str = "assetFile";

/// Company filter from a query string
///
/// The first `companyId` pair wins, so a repeated parameter is not an
/// error. An empty value means no filter.
pub fn company_filter(params: &[(String, String)]) -> Option<&str> {
    params
        .iter()
        .find(|(key, _)| key == COMPANY_ID_FIELD)
        .map(|(_, value)| value.as_str())
        .filter(|id| !id.is_empty())
}

/// POST /assets
/// Replace a company's assets with the content of an uploaded JSON file
pub async fn upload_assets(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let form = match multipart {
        Ok(multipart) => read_upload_form(multipart).await?,
        Err(rejection) => {
            tracing::debug!(%rejection, "Upload is not a multipart form");
            UploadForm::default()
        }
    };

    let company_id = form.company_id.clone().unwrap_or_default();
    let count = ingest(state.store(), form, state.config().coordinates)?;

    tracing::info!(company_id = %company_id, count, "Assets ingested");

    Ok(Json(UploadResponse::ok(count)))
}

/// GET /assets?companyId=<id>
/// List all assets, or those of one company
pub async fn list_assets(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Json<Vec<Asset>> {
    Json(state.store().list(company_filter(&params)))
}

/// Collect the fields of an upload; the first occurrence of each field wins
async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, ApiError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            COMPANY_ID_FIELD if form.company_id.is_none() => {
                form.company_id = Some(field.text().await?);
            }
            ASSET_FILE_FIELD if form.asset_file.is_none() => {
                let file_name = field.file_name().map(str::to_string);
                let part = match file_name {
                    Some(name) => FilePart::File {
                        name,
                        content: field.bytes().await?.to_vec(),
                    },
                    None => FilePart::Text(field.text().await?),
                };
                form.asset_file = Some(part);
            }
            _ => {}
        }
    }

    Ok(form)
}
