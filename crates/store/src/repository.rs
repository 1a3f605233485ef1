use chrono::{DateTime, Utc};
use slotbook_core::errors::SlotResult;
use slotbook_core::models::slot::{Slot, UserId};

/// Slot lifecycle operations consumed by the command layer.
///
/// Every method returns snapshots; callers never hold a live reference into
/// the table. Persistence happens only through explicit `load`/`save` calls.
pub trait SlotRepository: Send + Sync {
    /// Replaces the table with the contents of the persistence sink.
    fn load(&self) -> SlotResult<()>;

    /// Writes the whole table to the persistence sink.
    fn save(&self) -> SlotResult<()>;

    fn create_slot(&self, start_at: DateTime<Utc>, end_at: DateTime<Utc>) -> SlotResult<Slot>;

    fn cancel_slot(&self, slot_id: &str) -> SlotResult<Slot>;

    fn get_slot(&self, slot_id: &str) -> Option<Slot>;

    fn list_slots(&self) -> Vec<Slot>;

    fn list_free_slots(&self) -> Vec<Slot>;

    fn book_slot(&self, slot_id: &str, user: UserId) -> SlotResult<Slot>;

    /// Releases `user`'s booking, returning the slot to free.
    fn cancel_booking(&self, slot_id: &str, user: UserId) -> SlotResult<Slot>;

    fn list_slots_by_user(&self, user: UserId) -> Vec<Slot>;
}
