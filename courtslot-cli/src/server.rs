use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDateTime, Utc};
use tokio::sync::Mutex;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;

use courtslot_core::engine::{EngineConfig, ReservationEngine};
use courtslot_core::error::BookingError;

use crate::handlers::*;

// All mutation funnels through one engine behind a single mutex; coarse,
// but every operation is in-memory and non-blocking inside the lock.
pub type AppState = Arc<Mutex<ReservationEngine>>;

pub async fn run(host: &str, port: u16, config: EngineConfig) {
    let engine = ReservationEngine::with_config(config);
    let state: AppState = Arc::new(Mutex::new(engine));

    let app = Router::new()
        .route("/health", get(health))
        .route("/api/availability", get(availability))
        .route("/api/book", post(book))
        .route("/api/release", post(release))
        .route("/api/checkout", post(checkout))
        .route("/api/sweep", post(sweep))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = format!("{}:{}", host, port);

    tracing::info!(
        hold_ttl_secs = config.hold_ttl.num_seconds(),
        lead_time_mins = config.lead_time.num_minutes(),
        "Courtslot server starting on http://{}",
        addr
    );

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind");

    axum::serve(listener, app)
        .await
        .expect("Server error");
}

// ─── Clocks ─────────────────────────────────────────────────────────────────

// Hold timestamps are UTC; the same-day cutoff runs on the facility's wall
// clock. Both are read once per request here, never inside the engine.
fn clocks() -> (DateTime<Utc>, NaiveDateTime) {
    (Utc::now(), Local::now().naive_local())
}

// ─── Handlers ───────────────────────────────────────────────────────────────

async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    let engine = state.lock().await;
    Json(ApiResponse::ok(HealthResponse {
        status: "ok".to_string(),
        live_holds: engine.live_holds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

async fn availability(
    State(state): State<AppState>,
    Query(params): Query<AvailabilityParams>,
) -> (StatusCode, Json<serde_json::Value>) {
    let date = params
        .date
        .as_deref()
        .and_then(courtslot_core::types::SlotDate::parse);
    let Some(date) = date else {
        return reject(&BookingError::InvalidDate);
    };

    let (now_utc, local_now) = clocks();
    let mut engine = state.lock().await;
    let view = engine.availability(date, now_utc, local_now);

    (
        StatusCode::OK,
        Json(serde_json::json!({ "success": true, "data": view })),
    )
}

async fn book(
    State(state): State<AppState>,
    Json(req): Json<BookRequest>,
) -> (StatusCode, Json<serde_json::Value>) {
    let (date, court, slots) = match parse_selection(&req.date, &req.court, &req.slots) {
        Ok(parsed) => parsed,
        Err(e) => return reject(&e),
    };

    let name = req.name.as_deref().unwrap_or("").trim();
    let email = req.email.as_deref().unwrap_or("").trim();

    let (now_utc, local_now) = clocks();
    let mut engine = state.lock().await;

    match engine.book(date, court, &slots, now_utc, local_now) {
        Ok(result) => {
            tracing::info!(
                date = %date,
                court = court.key(),
                slots = result.accepted.len(),
                expires_at = %result.expires_at,
                name,
                email,
                "Slots held"
            );
            (
                StatusCode::CREATED,
                Json(serde_json::json!({ "success": true, "data": result })),
            )
        }
        Err(e) => {
            tracing::info!(date = %date, court = court.key(), kind = e.kind(), "Booking rejected");
            reject(&e)
        }
    }
}

async fn release(
    State(state): State<AppState>,
    Json(req): Json<ReleaseRequest>,
) -> (StatusCode, Json<serde_json::Value>) {
    let (date, court, slots) = match parse_selection(&req.date, &req.court, &req.slots) {
        Ok(parsed) => parsed,
        Err(e) => return reject(&e),
    };

    let (now_utc, _) = clocks();
    let mut engine = state.lock().await;

    match engine.release(date, court, &slots, now_utc) {
        Ok(result) => {
            tracing::info!(
                date = %date,
                court = court.key(),
                released = result.released.len(),
                "Holds released"
            );
            (
                StatusCode::OK,
                Json(serde_json::json!({ "success": true, "data": result })),
            )
        }
        Err(e) => reject(&e),
    }
}

async fn checkout(
    Json(req): Json<CheckoutRequest>,
) -> (StatusCode, Json<serde_json::Value>) {
    let Some(date) = courtslot_core::types::SlotDate::parse(&req.date) else {
        return reject(&BookingError::InvalidDate);
    };
    let Some(court) = courtslot_core::types::Court::from_key(&req.court) else {
        return reject(&BookingError::UnknownResource);
    };
    let amount = match parse_amount(&req.total) {
        Ok(amount) => amount,
        Err(e) => return reject(&e),
    };

    // No payment processing happens here; the summary is what a checkout
    // page would render. Unpaid holds simply expire.
    let summary = CheckoutSummary {
        date: date.to_string(),
        court: court.key().to_string(),
        court_name: court.display_name().to_string(),
        total: amount,
    };
    tracing::info!(date = %date, court = court.key(), total = amount, "Checkout summary issued");

    (
        StatusCode::OK,
        Json(serde_json::json!({ "success": true, "data": summary })),
    )
}

async fn sweep(State(state): State<AppState>) -> Json<ApiResponse<SweepResponse>> {
    let mut engine = state.lock().await;
    let evicted = engine.sweep(Utc::now());
    tracing::info!(evicted, "Expired holds swept");
    Json(ApiResponse::ok(SweepResponse { evicted }))
}

// ─── Error Responses ────────────────────────────────────────────────────────

fn reject(err: &BookingError) -> (StatusCode, Json<serde_json::Value>) {
    let status = match err {
        BookingError::Conflict { .. } => StatusCode::CONFLICT,
        _ => StatusCode::BAD_REQUEST,
    };
    (status, Json(error_body(err)))
}
