//! Asset models

use serde::{Deserialize, Serialize};

/// A geocoded asset owned by one company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    /// Street address (non-empty)
    pub address: String,
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// Owning company, assigned at ingestion
    pub company_id: String,
}

/// One element of an uploaded asset file, before it is assigned to a company
///
/// Any `companyId` (or other unknown key) present in the upload is ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AssetPayload {
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl AssetPayload {
    /// Attach the owning company, producing a storable asset
    pub fn stamp(self, company_id: &str) -> Asset {
        Asset {
            address: self.address,
            latitude: self.latitude,
            longitude: self.longitude,
            company_id: company_id.to_string(),
        }
    }
}

/// Response body for a successful upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    /// Number of assets now stored for the company
    pub count: usize,
}

impl UploadResponse {
    pub fn ok(count: usize) -> Self {
        Self {
            success: true,
            count,
        }
    }
}
