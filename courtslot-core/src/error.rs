use thiserror::Error;

use crate::types::Slot;

/// Request-rejection outcomes. Every one of these is a normal, expected
/// result of concurrent demand for scarce slots; none is retried by the
/// engine and none is a fault.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    /// Date failed `YYYY-MM-DD` parsing.
    #[error("invalid date")]
    InvalidDate,

    /// Court key is not in the fixed enumeration.
    #[error("unknown court")]
    UnknownResource,

    /// The slot list was empty.
    #[error("no slots selected")]
    EmptySelection,

    /// A requested slot is not on the calendar grid.
    #[error("invalid slot '{label}'")]
    InvalidSlot { label: String },

    /// The requested slots do not form an unbroken calendar run.
    #[error("selection must be contiguous")]
    NonContiguous,

    /// Same-day request for slots starting inside the lead-time bumper.
    #[error("selection starts too soon")]
    TooSoon { slots: Vec<Slot> },

    /// One or more requested slots already carry a live hold.
    #[error("slots already held")]
    Conflict { conflicts: Vec<Slot> },

    /// Checkout total is not a positive amount. Payment-adjacent; never
    /// produced by the engine itself.
    #[error("invalid amount")]
    InvalidAmount,
}

impl BookingError {
    /// Stable wire tag for the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            BookingError::InvalidDate => "INVALID_DATE",
            BookingError::UnknownResource => "UNKNOWN_RESOURCE",
            BookingError::EmptySelection => "EMPTY_SELECTION",
            BookingError::InvalidSlot { .. } => "INVALID_SLOT",
            BookingError::NonContiguous => "NON_CONTIGUOUS",
            BookingError::TooSoon { .. } => "TOO_SOON",
            BookingError::Conflict { .. } => "CONFLICT",
            BookingError::InvalidAmount => "INVALID_AMOUNT",
        }
    }
}
