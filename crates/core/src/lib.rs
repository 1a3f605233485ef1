pub mod errors;
pub mod models;

pub use errors::{SlotError, SlotResult};
pub use models::slot::{Slot, SlotStatus, UserId};
