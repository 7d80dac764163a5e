use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::{Court, Slot, SlotDate};

/// A temporary claim on a (date, court, slot). Exists only while unexpired;
/// created by a successful booking, destroyed by release or expiry sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hold {
    /// When the hold was written, in UTC.
    pub created_at: DateTime<Utc>,
}

impl Hold {
    pub fn new(created_at: DateTime<Utc>) -> Self {
        Self { created_at }
    }

    /// A hold is expired once its age reaches the TTL.
    pub fn expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.created_at >= ttl
    }
}

/// Result of a successful booking. Carries an explicit expiry timestamp plus
/// the TTL in seconds so a client can render a countdown without re-deriving
/// TTL logic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookResult {
    pub date: SlotDate,
    pub court: Court,
    /// Accepted slots, in calendar order.
    pub accepted: Vec<Slot>,
    pub expires_at: DateTime<Utc>,
    pub ttl_seconds: u64,
}

/// Result of a release. `released` is the subset of requested slots that
/// actually carried a live hold; releasing an already-gone slot is not an
/// error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseResult {
    pub released: Vec<Slot>,
}
