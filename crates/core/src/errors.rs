use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::slot::UserId;

#[derive(Error, Debug)]
pub enum SlotError {
    #[error("Invalid time range: start {start} must be before end {end}")]
    InvalidRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("Time slot conflicts with existing slot {id}")]
    Conflict { id: String },

    #[error("Slot not found: {0}")]
    NotFound(String),

    #[error("Slot already canceled: {0}")]
    AlreadyCanceled(String),

    #[error("Slot already booked: {0}")]
    AlreadyBooked(String),

    #[error("Slot canceled: {0}")]
    Canceled(String),

    #[error("Slot is not booked: {0}")]
    NotBooked(String),

    #[error("Invalid user id: {0}")]
    InvalidUser(UserId),

    #[error("Slot {id} is not booked by user {user}")]
    NotOwner { id: String, user: UserId },

    #[error("Invalid slot state: {0}")]
    InvalidState(String),

    #[error("Data corruption: {0}")]
    DataCorruption(String),

    #[error("Persistence error: {0}")]
    Persistence(#[from] std::io::Error),
}

impl SlotError {
    /// Errors that point at a broken table or sink rather than at the caller's request.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            SlotError::InvalidState(_) | SlotError::DataCorruption(_) | SlotError::Persistence(_)
        )
    }
}

pub type SlotResult<T> = Result<T, SlotError>;
