use serde::{Deserialize, Serialize};

use courtslot_core::calendar::SlotCalendar;
use courtslot_core::error::BookingError;
use courtslot_core::types::{Court, Slot, SlotDate};

// ─── Validation Helpers ─────────────────────────────────────────────────────

/// Converts the loose wire strings of a booking-shaped request into typed
/// values, classifying every failure into the engine's error taxonomy.
pub fn parse_selection(
    date: &str,
    court: &str,
    slots: &[String],
) -> Result<(SlotDate, Court, Vec<Slot>), BookingError> {
    let date = SlotDate::parse(date).ok_or(BookingError::InvalidDate)?;
    let court = Court::from_key(court).ok_or(BookingError::UnknownResource)?;
    if slots.is_empty() {
        return Err(BookingError::EmptySelection);
    }
    let mut parsed = Vec::with_capacity(slots.len());
    for label in slots {
        let slot = SlotCalendar::parse_label(label).ok_or_else(|| BookingError::InvalidSlot {
            label: label.clone(),
        })?;
        parsed.push(slot);
    }
    Ok((date, court, parsed))
}

/// Checkout totals must parse to a finite, strictly positive amount.
pub fn parse_amount(total: &str) -> Result<f64, BookingError> {
    let amount: f64 = total.trim().parse().map_err(|_| BookingError::InvalidAmount)?;
    if !amount.is_finite() || amount <= 0.0 {
        return Err(BookingError::InvalidAmount);
    }
    Ok(amount)
}

// ─── Request Types ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct AvailabilityParams {
    pub date: Option<String>,
}

#[derive(Deserialize)]
pub struct BookRequest {
    pub date: String,
    pub court: String,
    #[serde(default)]
    pub slots: Vec<String>,
    /// Contact details are accepted and logged; holds store no identity.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Deserialize)]
pub struct ReleaseRequest {
    pub date: String,
    pub court: String,
    #[serde(default)]
    pub slots: Vec<String>,
}

#[derive(Deserialize)]
pub struct CheckoutRequest {
    pub date: String,
    pub court: String,
    pub total: String,
}

// ─── Response Types ─────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub live_holds: usize,
    pub version: String,
}

#[derive(Serialize)]
pub struct SweepResponse {
    pub evicted: usize,
}

#[derive(Serialize)]
pub struct CheckoutSummary {
    pub date: String,
    pub court: String,
    pub court_name: String,
    pub total: f64,
}

// ─── Error Mapping ──────────────────────────────────────────────────────────

/// Every rejection kind is a 400 except `Conflict`, which is a 409 carrying
/// the contested slots.
pub fn error_body(err: &BookingError) -> serde_json::Value {
    let mut body = serde_json::json!({
        "success": false,
        "kind": err.kind(),
        "error": err.to_string(),
    });
    match err {
        BookingError::Conflict { conflicts } => {
            body["conflicts"] = serde_json::json!(conflicts);
        }
        BookingError::TooSoon { slots } => {
            body["slots"] = serde_json::json!(slots);
        }
        _ => {}
    }
    body
}
