//! Classifying each grid slot against locally known events and the free
//! slots reported by the backend.

use serde::Serialize;

use crate::calendar::{EventRecord, FreeSlot};
use crate::schedule::grid::TimeSlot;

/// How a grid slot relates to the known events and free slots. An event
/// match is authoritative: a slot that is both occupied and inside a
/// reported free interval is `HasEvent`, and the booking affordance is
/// suppressed there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotStatus {
    HasEvent,
    IsFree,
    Unknown,
}

impl SlotStatus {
    /// A slot can only be booked from a reported free interval.
    pub fn is_bookable(&self) -> bool {
        matches!(self, SlotStatus::IsFree)
    }
}

// Containment is by truncated starting hour only: a 9:30-10:30 event
// occupies the 09:00 slot and not the 10:00 slot. Unparseable bounds
// never match.
fn event_occupies(event: &EventRecord, slot: TimeSlot) -> bool {
    match (event.start_hour(), event.end_hour()) {
        (Some(start), Some(end)) => (start..end).contains(&slot.hour()),
        _ => false,
    }
}

fn free_slot_covers(free: &FreeSlot, slot: TimeSlot) -> bool {
    match (free.start_hour(), free.end_hour()) {
        (Some(start), Some(end)) => (start..end).contains(&slot.hour()),
        _ => false,
    }
}

/// Classify one slot. `events` must already be filtered to the selected
/// date by its canonical `YYYY-MM-DD` key.
pub fn classify_slot(slot: TimeSlot, events: &[EventRecord], free_slots: &[FreeSlot]) -> SlotStatus {
    if events.iter().any(|e| event_occupies(e, slot)) {
        return SlotStatus::HasEvent;
    }
    if free_slots.iter().any(|f| free_slot_covers(f, slot)) {
        return SlotStatus::IsFree;
    }
    SlotStatus::Unknown
}

/// Prefill for the creation modal opened from a free slot: the display
/// bounds of the first free interval covering it. `None` when the slot is
/// occupied or unknown, so occupied slots never offer creation.
pub fn booking_prefill(
    slot: TimeSlot,
    events: &[EventRecord],
    free_slots: &[FreeSlot],
) -> Option<(String, String)> {
    if !classify_slot(slot, events, free_slots).is_bookable() {
        return None;
    }
    free_slots
        .iter()
        .find(|f| free_slot_covers(f, slot))
        .and_then(|f| Some((f.display_start()?, f.display_end()?)))
}
