mod hold;
mod primitives;

pub use hold::{BookResult, Hold, ReleaseResult};
pub use primitives::{Court, Slot, SlotDate};
