use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use crate::store::HoldStore;
use crate::types::{Court, Hold, Slot, SlotDate};

type DayLedger = HashMap<Slot, Hold>;

pub struct InMemoryHoldStore {
    // Map of (date, court) -> slot -> hold. Ledgers are created lazily on
    // first put and live for the process lifetime; only holds within them
    // are evicted. Sweeping is a full scan of every ledger, which is the
    // scaling limit of this backend.
    ledgers: HashMap<(SlotDate, Court), DayLedger>,
}

impl InMemoryHoldStore {
    pub fn new() -> Self {
        Self {
            ledgers: HashMap::new(),
        }
    }
}

impl Default for InMemoryHoldStore {
    fn default() -> Self {
        Self::new()
    }
}

impl HoldStore for InMemoryHoldStore {
    fn get(&self, date: SlotDate, court: Court) -> Vec<(Slot, Hold)> {
        self.ledgers
            .get(&(date, court))
            .map(|ledger| ledger.iter().map(|(slot, hold)| (*slot, *hold)).collect())
            .unwrap_or_default()
    }

    fn put(&mut self, date: SlotDate, court: Court, slot: Slot, created_at: DateTime<Utc>) {
        self.ledgers
            .entry((date, court))
            .or_default()
            .insert(slot, Hold::new(created_at));
    }

    fn remove(&mut self, date: SlotDate, court: Court, slot: Slot) -> bool {
        self.ledgers
            .get_mut(&(date, court))
            .is_some_and(|ledger| ledger.remove(&slot).is_some())
    }

    fn sweep(&mut self, now: DateTime<Utc>, ttl: Duration) -> usize {
        let mut removed = 0;
        for ledger in self.ledgers.values_mut() {
            let before = ledger.len();
            ledger.retain(|_, hold| !hold.expired(now, ttl));
            removed += before - ledger.len();
        }
        removed
    }

    fn live_holds(&self) -> usize {
        self.ledgers.values().map(HashMap::len).sum()
    }
}
