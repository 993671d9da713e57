//! Change notifications emitted by the asset store

use serde::{Deserialize, Serialize};

/// Something changed in the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum StoreEvent {
    /// A company's asset set was replaced
    #[serde(rename_all = "camelCase")]
    AssetsReplaced { company_id: String, count: usize },
}

impl StoreEvent {
    /// SSE event name for this event
    pub fn name(&self) -> &'static str {
        match self {
            StoreEvent::AssetsReplaced { .. } => "assets-replaced",
        }
    }

    /// Company the event concerns
    pub fn company_id(&self) -> &str {
        match self {
            StoreEvent::AssetsReplaced { company_id, .. } => company_id,
        }
    }
}
