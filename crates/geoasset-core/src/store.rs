//! Asset Store - the in-memory container for uploaded assets
//!
//! Assets are partitioned by company identifier. A company's assets are
//! only ever replaced as a whole; there is no append or per-asset update.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::broadcast;

use crate::models::{Asset, StoreEvent};

/// Capacity of the change-event channel
const EVENT_CAPACITY: usize = 64;

/// Thread-safe store for company assets
///
/// Each company's sequence is held as an `Arc<[Asset]>` that is swapped in
/// one write critical section, so readers observe either the previous or
/// the new sequence, never a mix.
#[derive(Debug)]
pub struct AssetStore {
    /// Map of company ID → that company's current assets
    companies: RwLock<BTreeMap<String, Arc<[Asset]>>>,
    /// Change notifications
    events: broadcast::Sender<StoreEvent>,
}

impl Default for AssetStore {
    fn default() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            companies: RwLock::new(BTreeMap::new()),
            events,
        }
    }
}

impl AssetStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all assets of `company_id` with `assets`
    ///
    /// Every stored asset gets `company_id` as its owner, whatever it carried
    /// before. Callers must not pass an empty `company_id`.
    pub fn replace(&self, company_id: &str, assets: Vec<Asset>) {
        debug_assert!(!company_id.is_empty(), "company_id must not be empty");

        let assets: Arc<[Asset]> = assets
            .into_iter()
            .map(|mut asset| {
                if asset.company_id != company_id {
                    asset.company_id = company_id.to_string();
                }
                asset
            })
            .collect();
        let count = assets.len();

        {
            let mut companies = self.companies.write();
            companies.insert(company_id.to_string(), assets);

            // Sent under the write lock so events follow write order.
            // No receivers is not an error.
            let _ = self.events.send(StoreEvent::AssetsReplaced {
                company_id: company_id.to_string(),
                count,
            });
        }

        tracing::debug!(company_id, count, "Replaced company assets");
    }

    /// List assets, either of one company or of all companies
    ///
    /// An unknown company yields an empty list. Without a filter the result
    /// is every company's sequence concatenated in ascending company order.
    pub fn list(&self, company_id: Option<&str>) -> Vec<Asset> {
        match company_id {
            Some(id) => self
                .snapshot(id)
                .map(|assets| assets.to_vec())
                .unwrap_or_default(),
            None => {
                let snapshots: Vec<Arc<[Asset]>> =
                    self.companies.read().values().cloned().collect();
                snapshots
                    .iter()
                    .flat_map(|assets| assets.iter().cloned())
                    .collect()
            }
        }
    }

    /// Current sequence for a company without copying the assets
    pub fn snapshot(&self, company_id: &str) -> Option<Arc<[Asset]>> {
        self.companies.read().get(company_id).cloned()
    }

    /// Check if a company has ever been ingested
    pub fn contains(&self, company_id: &str) -> bool {
        self.companies.read().contains_key(company_id)
    }

    /// Number of assets, for one company or overall
    pub fn count(&self, company_id: Option<&str>) -> usize {
        let companies = self.companies.read();
        match company_id {
            Some(id) => companies.get(id).map_or(0, |assets| assets.len()),
            None => companies.values().map(|assets| assets.len()).sum(),
        }
    }

    /// All company IDs with a stored sequence, in ascending order
    pub fn company_ids(&self) -> Vec<String> {
        self.companies.read().keys().cloned().collect()
    }

    /// Subscribe to change notifications
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }
}
