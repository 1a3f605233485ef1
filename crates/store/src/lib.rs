pub mod config;
pub mod id;
pub mod json_store;
pub mod repository;

pub mod mock;

use slotbook_core::errors::SlotResult;
use slotbook_core::models::slot::SlotStatus;
use tracing::info;

pub use config::StoreConfig;
pub use json_store::JsonSlotStore;
pub use repository::SlotRepository;

/// Per-status slot counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlotSummary {
    pub free: usize,
    pub busy: usize,
    pub canceled: usize,
}

impl SlotSummary {
    pub fn total(&self) -> usize {
        self.free + self.busy + self.canceled
    }
}

pub fn summarize(repo: &dyn SlotRepository) -> SlotSummary {
    repo.list_slots()
        .iter()
        .fold(SlotSummary::default(), |mut summary, slot| {
            match slot.status {
                SlotStatus::Free => summary.free += 1,
                SlotStatus::Busy => summary.busy += 1,
                SlotStatus::Canceled => summary.canceled += 1,
            }
            summary
        })
}

/// Builds a store from `config` and loads whatever the sink already holds.
pub fn open_store(config: &StoreConfig) -> SlotResult<JsonSlotStore> {
    let store = JsonSlotStore::new(config);
    store.load()?;

    match store.data_path() {
        Some(path) => info!(path = %path.display(), "Slot store opened"),
        None => info!("Slot store opened without persistence"),
    }

    Ok(store)
}
