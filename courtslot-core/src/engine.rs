use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use serde::Serialize;

use crate::calendar::SlotCalendar;
use crate::error::BookingError;
use crate::store::HoldStore;
use crate::store_in_memory::InMemoryHoldStore;
use crate::types::{BookResult, Court, ReleaseResult, Slot, SlotDate};

/// Engine timing parameters. The hold TTL and the same-day booking bumper
/// are independent windows; neither is derived from the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// How long an unconfirmed hold stays alive.
    pub hold_ttl: Duration,
    /// Minimum lead time before a same-day slot's start.
    pub lead_time: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            hold_ttl: Duration::minutes(10),
            lead_time: Duration::minutes(30),
        }
    }
}

/// Read-only availability view for one date: the full slot grid, live holds
/// per court, and (for the current day only) the slots blocked by the
/// lead-time bumper regardless of hold state.
#[derive(Debug, Clone, Serialize)]
pub struct AvailabilityView {
    pub date: SlotDate,
    pub slots: Vec<Slot>,
    pub busy: BTreeMap<Court, Vec<Slot>>,
    pub blocked: Vec<Slot>,
}

/// The only component that mutates the hold store under external request.
/// Holds a store by handle so tests get a fresh one per engine; all methods
/// take `&mut self`, leaving serialization of concurrent callers to the
/// owner (the server wraps the engine in a mutex).
///
/// Both clocks are explicit inputs: `now_utc` stamps holds and drives
/// expiry, `local_now` is the facility wall clock driving the same-day
/// cutoff. The engine never reads ambient time.
pub struct ReservationEngine {
    store: Box<dyn HoldStore + Send>,
    config: EngineConfig,
}

impl ReservationEngine {
    /// Engine over an empty in-memory store with default timing.
    pub fn new() -> Self {
        Self::with_store(Box::new(InMemoryHoldStore::new()), EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self::with_store(Box::new(InMemoryHoldStore::new()), config)
    }

    pub fn with_store(store: Box<dyn HoldStore + Send>, config: EngineConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> EngineConfig {
        self.config
    }

    /// Places a hold on a contiguous run of slots.
    ///
    /// Checks run in order: empty selection, grid membership, same-day
    /// cutoff, contiguity, then (after a sweep) conflicts against live
    /// holds. On success every slot is stamped with `now_utc` and the
    /// result carries the explicit expiry instant.
    pub fn book(
        &mut self,
        date: SlotDate,
        court: Court,
        slots: &[Slot],
        now_utc: DateTime<Utc>,
        local_now: NaiveDateTime,
    ) -> Result<BookResult, BookingError> {
        if slots.is_empty() {
            return Err(BookingError::EmptySelection);
        }

        let mut indices = Vec::with_capacity(slots.len());
        for slot in slots {
            match SlotCalendar::index_of(*slot) {
                Some(index) => indices.push(index),
                None => {
                    return Err(BookingError::InvalidSlot {
                        label: slot.to_string(),
                    });
                }
            }
        }

        if date.0 == local_now.date() {
            let mut too_soon: Vec<Slot> = slots
                .iter()
                .copied()
                .filter(|slot| Self::below_cutoff(*slot, local_now, self.config.lead_time))
                .collect();
            if !too_soon.is_empty() {
                too_soon.sort_unstable();
                too_soon.dedup();
                return Err(BookingError::TooSoon { slots: too_soon });
            }
        }

        // A reservation spans one continuous block; gaps and duplicates are
        // never a valid single booking.
        indices.sort_unstable();
        if !indices.windows(2).all(|pair| pair[1] == pair[0] + 1) {
            return Err(BookingError::NonContiguous);
        }

        // Purge stale holds first so no request ever loses to a phantom
        // conflict against an already-expired hold.
        self.store.sweep(now_utc, self.config.hold_ttl);

        let held: HashSet<Slot> = self
            .store
            .get(date, court)
            .into_iter()
            .map(|(slot, _)| slot)
            .collect();
        let mut conflicts: Vec<Slot> = slots
            .iter()
            .copied()
            .filter(|slot| held.contains(slot))
            .collect();
        if !conflicts.is_empty() {
            conflicts.sort_unstable();
            return Err(BookingError::Conflict { conflicts });
        }

        let mut accepted = slots.to_vec();
        accepted.sort_unstable();
        for slot in &accepted {
            self.store.put(date, court, *slot, now_utc);
        }

        Ok(BookResult {
            date,
            court,
            accepted,
            expires_at: now_utc + self.config.hold_ttl,
            ttl_seconds: self.config.hold_ttl.num_seconds().max(0) as u64,
        })
    }

    /// Releases holds early. Returns the subset of slots that actually had
    /// a live hold; releasing an already-gone slot is not an error.
    pub fn release(
        &mut self,
        date: SlotDate,
        court: Court,
        slots: &[Slot],
        now_utc: DateTime<Utc>,
    ) -> Result<ReleaseResult, BookingError> {
        if slots.is_empty() {
            return Err(BookingError::EmptySelection);
        }
        for slot in slots {
            if !SlotCalendar::is_valid(*slot) {
                return Err(BookingError::InvalidSlot {
                    label: slot.to_string(),
                });
            }
        }

        self.store.sweep(now_utc, self.config.hold_ttl);

        let mut released = Vec::new();
        for slot in slots {
            if self.store.remove(date, court, *slot) {
                released.push(*slot);
            }
        }
        released.sort_unstable();

        Ok(ReleaseResult { released })
    }

    /// Availability for one date, post-sweep. `blocked` is populated only
    /// when `date` is the facility's current day; it uses the exact cutoff
    /// predicate `book` rejects with, so the two can never diverge.
    pub fn availability(
        &mut self,
        date: SlotDate,
        now_utc: DateTime<Utc>,
        local_now: NaiveDateTime,
    ) -> AvailabilityView {
        self.store.sweep(now_utc, self.config.hold_ttl);

        let mut busy = BTreeMap::new();
        for court in Court::ALL {
            let mut held: Vec<Slot> = self
                .store
                .get(date, court)
                .into_iter()
                .map(|(slot, _)| slot)
                .collect();
            held.sort_unstable();
            busy.insert(court, held);
        }

        let blocked = if date.0 == local_now.date() {
            SlotCalendar::all_slots()
                .iter()
                .copied()
                .filter(|slot| Self::below_cutoff(*slot, local_now, self.config.lead_time))
                .collect()
        } else {
            Vec::new()
        };

        AvailabilityView {
            date,
            slots: SlotCalendar::all_slots().to_vec(),
            busy,
            blocked,
        }
    }

    /// Manual sweep, for callers that want eviction outside a read/write.
    pub fn sweep(&mut self, now_utc: DateTime<Utc>) -> usize {
        self.store.sweep(now_utc, self.config.hold_ttl)
    }

    pub fn live_holds(&self) -> usize {
        self.store.live_holds()
    }

    /// The single cutoff rule shared by `book` rejection and the `blocked`
    /// display hint: a same-day slot is below the bumper when it starts at
    /// or before `local_now + lead_time`.
    fn below_cutoff(slot: Slot, local_now: NaiveDateTime, lead_time: Duration) -> bool {
        let Some(time) = slot.start_time() else {
            return false;
        };
        let start = NaiveDateTime::new(local_now.date(), time);
        start <= local_now + lead_time
    }
}

impl Default for ReservationEngine {
    fn default() -> Self {
        Self::new()
    }
}
