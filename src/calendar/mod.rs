//! Client for the external calendar free-busy backend: querying free time
//! windows and creating study-session events.

pub mod client;
pub mod types;

pub use client::{CalendarError, create_event, find_free_time};
pub use types::{EventCandidate, EventRecord, FreeSlot, FreeTimeOutcome, FreeTimeQuery};
