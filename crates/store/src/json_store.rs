//! # JSON Slot Store
//!
//! In-memory slot table guarded by a single mutex, with optional wholesale
//! persistence to a JSON file.
//!
//! The file holds an array of slot records. It is read completely on
//! [`SlotRepository::load`] and rewritten completely on
//! [`SlotRepository::save`]; there is no append mode.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use slotbook_core::errors::{SlotError, SlotResult};
use slotbook_core::models::slot::{Slot, SlotStatus, UserId};
use tempfile::NamedTempFile;
use tracing::{debug, error, info, warn};

use crate::config::StoreConfig;
use crate::id::allocate_id;
use crate::repository::SlotRepository;

type SlotTable = HashMap<String, Slot>;

pub struct JsonSlotStore {
    slots: Mutex<SlotTable>,
    // Orders concurrent saves so an older snapshot never overwrites a newer one.
    save_lock: Mutex<()>,
    data_path: Option<PathBuf>,
}

impl JsonSlotStore {
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
            save_lock: Mutex::new(()),
            data_path: config.data_path.clone(),
        }
    }

    /// Store without a persistence sink; `load` and `save` are no-ops.
    pub fn in_memory() -> Self {
        Self::new(&StoreConfig::default())
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self::new(&StoreConfig {
            data_path: Some(path.into()),
            ..StoreConfig::default()
        })
    }

    pub fn data_path(&self) -> Option<&Path> {
        self.data_path.as_deref()
    }

    // Every transition validates before it mutates, so a poisoned table is still consistent.
    fn table(&self) -> MutexGuard<'_, SlotTable> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn collect<P>(&self, predicate: P) -> Vec<Slot>
    where
        P: Fn(&Slot) -> bool,
    {
        self.table()
            .values()
            .filter(|slot| predicate(slot))
            .cloned()
            .collect()
    }

    fn update<F>(&self, slot_id: &str, action: &'static str, transition: F) -> SlotResult<Slot>
    where
        F: FnOnce(&mut Slot, DateTime<Utc>) -> SlotResult<()>,
    {
        let mut table = self.table();
        let slot = table
            .get_mut(slot_id)
            .ok_or_else(|| SlotError::NotFound(slot_id.to_string()))?;

        if let Err(err) = transition(&mut *slot, Utc::now()) {
            if err.is_internal() {
                error!(slot_id, action, error = %err, "Slot table inconsistency");
            } else {
                debug!(slot_id, action, error = %err, "Slot transition rejected");
            }
            return Err(err);
        }

        debug!(slot_id, action, status = %slot.status, "Slot updated");
        Ok(slot.clone())
    }
}

/// Checks decoded records and keys them by id.
fn index_records(records: Vec<Slot>) -> SlotResult<SlotTable> {
    let mut table = HashMap::with_capacity(records.len());

    for (position, mut slot) in records.into_iter().enumerate() {
        if slot.id.trim().is_empty() {
            return Err(SlotError::DataCorruption(format!(
                "record {position} has an empty id"
            )));
        }
        if slot.start_at >= slot.end_at {
            return Err(SlotError::DataCorruption(format!(
                "slot {} has start {} not before end {}",
                slot.id, slot.start_at, slot.end_at
            )));
        }
        if slot.status == SlotStatus::Busy && slot.booked_by.is_none() {
            return Err(SlotError::DataCorruption(format!(
                "busy slot {} has no booking user",
                slot.id
            )));
        }
        if table.contains_key(&slot.id) {
            return Err(SlotError::DataCorruption(format!(
                "duplicate slot id {}",
                slot.id
            )));
        }
        // Older writers left the booking on canceled slots.
        if slot.status == SlotStatus::Canceled {
            slot.booked_by = None;
        }
        table.insert(slot.id.clone(), slot);
    }

    let mut active: Vec<&Slot> = table.values().filter(|slot| slot.is_active()).collect();
    active.sort_by_key(|slot| slot.start_at);
    if let Some(pair) = active
        .windows(2)
        .find(|pair| pair[1].overlaps(pair[0].start_at, pair[0].end_at))
    {
        return Err(SlotError::DataCorruption(format!(
            "slots {} and {} overlap",
            pair[0].id, pair[1].id
        )));
    }

    Ok(table)
}

fn write_atomically(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(bytes)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|err| err.error)?;
    Ok(())
}

impl SlotRepository for JsonSlotStore {
    fn load(&self) -> SlotResult<()> {
        let Some(path) = self.data_path.as_deref() else {
            debug!("No data path configured, starting with an empty slot table");
            return Ok(());
        };

        // A missing file and an empty one both mean "nothing stored yet".
        let contents = match fs::read(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!(path = %path.display(), "Slot file does not exist yet, starting empty");
                Vec::new()
            }
            Err(err) => return Err(SlotError::Persistence(err)),
        };

        let records: Vec<Slot> = if contents.iter().all(u8::is_ascii_whitespace) {
            Vec::new()
        } else {
            serde_json::from_slice(&contents).map_err(|err| {
                SlotError::DataCorruption(format!("failed to parse {}: {err}", path.display()))
            })?
        };

        let loaded = index_records(records).inspect_err(|err| {
            warn!(path = %path.display(), error = %err, "Rejected slot file");
        })?;

        let count = loaded.len();
        *self.table() = loaded;

        info!(path = %path.display(), count, "Loaded slots");
        Ok(())
    }

    fn save(&self) -> SlotResult<()> {
        let Some(path) = self.data_path.as_deref() else {
            return Ok(());
        };

        let _ordering = self.save_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut snapshot = self.list_slots();
        snapshot.sort_by(|a, b| a.start_at.cmp(&b.start_at).then_with(|| a.id.cmp(&b.id)));

        let bytes = serde_json::to_vec_pretty(&snapshot).map_err(io::Error::from)?;
        write_atomically(path, &bytes)?;

        info!(path = %path.display(), count = snapshot.len(), "Saved slots");
        Ok(())
    }

    fn create_slot(&self, start_at: DateTime<Utc>, end_at: DateTime<Utc>) -> SlotResult<Slot> {
        if start_at >= end_at {
            return Err(SlotError::InvalidRange {
                start: start_at,
                end: end_at,
            });
        }

        let mut table = self.table();

        if let Some(existing) = table
            .values()
            .find(|slot| slot.is_active() && slot.overlaps(start_at, end_at))
        {
            debug!(conflicting = %existing.id, "Slot creation conflicts");
            return Err(SlotError::Conflict {
                id: existing.id.clone(),
            });
        }

        let id = allocate_id(&mut rand::thread_rng(), |candidate| {
            table.contains_key(candidate)
        })?;
        let slot = Slot::new(id, start_at, end_at, Utc::now())?;
        table.insert(slot.id.clone(), slot.clone());

        debug!(slot_id = %slot.id, start = %start_at, end = %end_at, "Slot created");
        Ok(slot)
    }

    fn cancel_slot(&self, slot_id: &str) -> SlotResult<Slot> {
        self.update(slot_id, "cancel_slot", |slot, now| slot.cancel(now))
    }

    fn get_slot(&self, slot_id: &str) -> Option<Slot> {
        self.table().get(slot_id).cloned()
    }

    fn list_slots(&self) -> Vec<Slot> {
        self.collect(|_| true)
    }

    fn list_free_slots(&self) -> Vec<Slot> {
        self.collect(|slot| slot.status == SlotStatus::Free)
    }

    fn book_slot(&self, slot_id: &str, user: UserId) -> SlotResult<Slot> {
        self.update(slot_id, "book_slot", |slot, now| slot.book(user, now))
    }

    fn cancel_booking(&self, slot_id: &str, user: UserId) -> SlotResult<Slot> {
        self.update(slot_id, "cancel_booking", |slot, now| slot.release(user, now))
    }

    fn list_slots_by_user(&self, user: UserId) -> Vec<Slot> {
        self.collect(|slot| slot.is_booked_by(user))
    }
}
