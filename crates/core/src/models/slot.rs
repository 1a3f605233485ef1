use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::{SlotError, SlotResult};

/// Identifier of the chat user a slot is booked by.
pub type UserId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    Free,
    Busy,
    Canceled,
}

impl SlotStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotStatus::Free => "free",
            SlotStatus::Busy => "busy",
            SlotStatus::Canceled => "canceled",
        }
    }
}

impl fmt::Display for SlotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A bookable time interval, `[start_at, end_at)`.
///
/// Field names on disk follow the flat-file format: `id`, `start`, `end`,
/// `status`, `bookedBy`, `createdAt`, `updatedAt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "start")]
    pub start_at: DateTime<Utc>,
    #[serde(rename = "end")]
    pub end_at: DateTime<Utc>,
    pub status: SlotStatus,
    #[serde(
        rename = "bookedBy",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_booked_by"
    )]
    pub booked_by: Option<UserId>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// `0` is reserved on disk for "not booked", so it never names a user.
pub fn is_valid_user(user: UserId) -> bool {
    user != 0
}

fn ensure_valid_user(user: UserId) -> SlotResult<()> {
    if is_valid_user(user) {
        Ok(())
    } else {
        Err(SlotError::InvalidUser(user))
    }
}

// Older files store `0` for "not booked".
fn deserialize_booked_by<'de, D>(deserializer: D) -> Result<Option<UserId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<UserId>::deserialize(deserializer)?;
    Ok(raw.filter(|user| is_valid_user(*user)))
}

impl Slot {
    /// Creates a free slot, rejecting empty or inverted ranges.
    pub fn new(
        id: impl Into<String>,
        start_at: DateTime<Utc>,
        end_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> SlotResult<Self> {
        if start_at >= end_at {
            return Err(SlotError::InvalidRange {
                start: start_at,
                end: end_at,
            });
        }

        Ok(Self {
            id: id.into(),
            start_at,
            end_at,
            status: SlotStatus::Free,
            booked_by: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Half-open interval overlap: touching endpoints do not overlap.
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        start < self.end_at && end > self.start_at
    }

    /// Active slots take part in conflict detection.
    pub fn is_active(&self) -> bool {
        self.status != SlotStatus::Canceled
    }

    pub fn is_booked_by(&self, user: UserId) -> bool {
        is_valid_user(user) && self.booked_by == Some(user)
    }

    pub fn book(&mut self, user: UserId, now: DateTime<Utc>) -> SlotResult<()> {
        ensure_valid_user(user)?;
        match self.status {
            SlotStatus::Busy => Err(SlotError::AlreadyBooked(self.id.clone())),
            SlotStatus::Canceled => Err(SlotError::Canceled(self.id.clone())),
            SlotStatus::Free => {
                if let Some(holder) = self.booked_by {
                    return Err(SlotError::InvalidState(format!(
                        "free slot {} is already associated with user {}",
                        self.id, holder
                    )));
                }
                self.status = SlotStatus::Busy;
                self.booked_by = Some(user);
                self.touch(now);
                Ok(())
            }
        }
    }

    pub fn cancel(&mut self, now: DateTime<Utc>) -> SlotResult<()> {
        if self.status == SlotStatus::Canceled {
            return Err(SlotError::AlreadyCanceled(self.id.clone()));
        }
        self.status = SlotStatus::Canceled;
        self.booked_by = None;
        self.touch(now);
        Ok(())
    }

    /// Returns a busy slot to free. Only the user holding the booking may do so.
    pub fn release(&mut self, user: UserId, now: DateTime<Utc>) -> SlotResult<()> {
        ensure_valid_user(user)?;
        match self.status {
            SlotStatus::Canceled => Err(SlotError::Canceled(self.id.clone())),
            SlotStatus::Free => Err(SlotError::NotBooked(self.id.clone())),
            SlotStatus::Busy if !self.is_booked_by(user) => Err(SlotError::NotOwner {
                id: self.id.clone(),
                user,
            }),
            SlotStatus::Busy => {
                self.status = SlotStatus::Free;
                self.booked_by = None;
                self.touch(now);
                Ok(())
            }
        }
    }

    // Clock skew must never push updated_at behind created_at.
    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now.max(self.created_at);
    }
}
