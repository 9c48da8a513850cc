//! The daily scheduling view model: the hourly time grid, reconciliation
//! of locally created events against backend-reported free slots, and the
//! state machine that owns the result.

pub mod grid;
pub mod planner;
pub mod reconcile;

pub use grid::{TimeSlot, TimeWindow, hour_slots};
pub use planner::{QueryToken, SchedulePlanner};
pub use reconcile::{SlotStatus, booking_prefill, classify_slot};
