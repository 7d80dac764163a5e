use chrono::{DateTime, Duration, Utc};

use crate::types::{Court, Hold, Slot, SlotDate};

/// Defines the contract for hold storage backends.
///
/// A store is not thread-safe on its own; the engine serializes `book`,
/// `release`, and `sweep` against each other (see `ReservationEngine`).
pub trait HoldStore {
    /// All holds in the (date, court) ledger, in no particular order.
    /// An absent ledger reads as empty.
    fn get(&self, date: SlotDate, court: Court) -> Vec<(Slot, Hold)>;

    /// Unconditional overwrite: a fresh hold always replaces any stale entry
    /// for the slot. Conflict checking happens before this is called.
    fn put(&mut self, date: SlotDate, court: Court, slot: Slot, created_at: DateTime<Utc>);

    /// Removes the slot's hold if present. Returns whether one was removed.
    fn remove(&mut self, date: SlotDate, court: Court, slot: Slot) -> bool;

    /// Removes every hold whose age reached `ttl`, across all ledgers.
    /// Returns the number of holds removed. Idempotent for a fixed `now`.
    fn sweep(&mut self, now: DateTime<Utc>, ttl: Duration) -> usize;

    /// Total live holds across all ledgers (expired-but-unswept included).
    fn live_holds(&self) -> usize;
}
