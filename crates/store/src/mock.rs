use chrono::{DateTime, Utc};
use mockall::mock;
use slotbook_core::errors::SlotResult;
use slotbook_core::models::slot::{Slot, UserId};

use crate::repository::SlotRepository;

// Mock repository for testing code that consumes the repository contract
mock! {
    pub SlotRepo {}

    impl SlotRepository for SlotRepo {
        fn load(&self) -> SlotResult<()>;

        fn save(&self) -> SlotResult<()>;

        fn create_slot(
            &self,
            start_at: DateTime<Utc>,
            end_at: DateTime<Utc>,
        ) -> SlotResult<Slot>;

        fn cancel_slot(&self, slot_id: &str) -> SlotResult<Slot>;

        fn get_slot(&self, slot_id: &str) -> Option<Slot>;

        fn list_slots(&self) -> Vec<Slot>;

        fn list_free_slots(&self) -> Vec<Slot>;

        fn book_slot(&self, slot_id: &str, user: UserId) -> SlotResult<Slot>;

        fn cancel_booking(&self, slot_id: &str, user: UserId) -> SlotResult<Slot>;

        fn list_slots_by_user(&self, user: UserId) -> Vec<Slot>;
    }
}
