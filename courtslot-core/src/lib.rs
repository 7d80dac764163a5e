//! # courtslot-core
//!
//! The in-memory reservation kernel for court time slots.
//! Provides a fixed half-hour slot grid, contiguous-range booking,
//! conflict detection, and lazy TTL expiry of unconfirmed holds.

pub mod calendar;
pub mod engine;
pub mod error;
pub mod store;
#[path = "store_in_memory.rs"]
pub mod store_in_memory;
pub mod types;

#[cfg(test)]
mod engine_test;
