use std::sync::OnceLock;

use crate::types::Slot;

/// Number of half-hour slots in a business day: 08:00 through 20:30.
pub const SLOTS_PER_DAY: usize = 26;

/// First slot of the day, in minutes since midnight.
const DAY_START_MIN: u16 = 8 * 60;
/// Grid pitch in minutes.
const SLOT_STEP_MIN: u16 = 30;

/// The fixed half-hour time grid for a business day. Pure and static after
/// initialization; the same 26-element sequence applies to every date.
pub struct SlotCalendar;

impl SlotCalendar {
    /// The full ordered grid, generated once.
    pub fn all_slots() -> &'static [Slot; SLOTS_PER_DAY] {
        static GRID: OnceLock<[Slot; SLOTS_PER_DAY]> = OnceLock::new();
        GRID.get_or_init(|| {
            let mut grid = [Slot::from_minutes(0); SLOTS_PER_DAY];
            for (i, slot) in grid.iter_mut().enumerate() {
                *slot = Slot::from_minutes(DAY_START_MIN + i as u16 * SLOT_STEP_MIN);
            }
            grid
        })
    }

    /// Position of a slot in the grid, or `None` if it is off-grid.
    /// The grid is arithmetic, so this is a direct computation.
    pub fn index_of(slot: Slot) -> Option<usize> {
        let minutes = slot.minutes_from_midnight();
        if minutes < DAY_START_MIN || (minutes - DAY_START_MIN) % SLOT_STEP_MIN != 0 {
            return None;
        }
        let index = usize::from((minutes - DAY_START_MIN) / SLOT_STEP_MIN);
        (index < SLOTS_PER_DAY).then_some(index)
    }

    pub fn is_valid(slot: Slot) -> bool {
        Self::index_of(slot).is_some()
    }

    /// Parses a `"HH:MM"` label and checks it sits on the grid.
    pub fn parse_label(label: &str) -> Option<Slot> {
        let slot = Slot::parse(label)?;
        Self::is_valid(slot).then_some(slot)
    }
}
