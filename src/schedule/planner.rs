//! The state machine behind the scheduling view. All state lives here and
//! is only changed through the named transitions, so the view layer never
//! mutates fields ad hoc.

use chrono::NaiveDate;

use crate::calendar::{EventRecord, FreeSlot, FreeTimeOutcome};
use crate::schedule::grid::{TimeSlot, TimeWindow, hour_slots};
use crate::schedule::reconcile::{SlotStatus, classify_slot};

/// Identifies one issued free-time query. Responses carry their token
/// back so stale results can be dropped instead of racing the latest
/// query in arrival order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryToken(u64);

#[derive(Debug)]
pub struct SchedulePlanner {
    selected_date: NaiveDate,
    events: Vec<EventRecord>,
    free_slots: Vec<FreeSlot>,
    last_error: Option<String>,
    auth_url: Option<String>,
    generation: u64,
}

impl SchedulePlanner {
    pub fn new(selected_date: NaiveDate) -> Self {
        Self {
            selected_date,
            events: Vec::new(),
            free_slots: Vec::new(),
            last_error: None,
            auth_url: None,
            generation: 0,
        }
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    pub fn free_slots(&self) -> &[FreeSlot] {
        &self.free_slots
    }

    pub fn events(&self) -> &[EventRecord] {
        &self.events
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn auth_url(&self) -> Option<&str> {
        self.auth_url.as_deref()
    }

    /// Events on the selected date, matched by the canonical `YYYY-MM-DD`
    /// key rather than any timestamp representation of the day.
    pub fn events_for_selected_date(&self) -> Vec<&EventRecord> {
        self.events
            .iter()
            .filter(|e| e.date == self.selected_date)
            .collect()
    }

    /// Switching the day invalidates any outstanding query and the free
    /// slots shown for the previous day.
    pub fn set_selected_date(&mut self, date: NaiveDate) {
        self.selected_date = date;
        self.free_slots.clear();
        self.last_error = None;
        self.generation += 1;
    }

    /// Issues the token for a new free-time query. Any response tagged
    /// with an earlier token is stale from this point on.
    pub fn begin_query(&mut self) -> QueryToken {
        self.generation += 1;
        QueryToken(self.generation)
    }

    /// Applies a settled query outcome. Returns `false` (leaving state
    /// untouched) when the token is not the latest issued one.
    pub fn apply_outcome(&mut self, token: QueryToken, outcome: FreeTimeOutcome) -> bool {
        if token.0 != self.generation {
            tracing::debug!(
                "Dropping stale free-time response (token {} < {})",
                token.0,
                self.generation
            );
            return false;
        }
        match outcome {
            FreeTimeOutcome::Slots(slots) => self.apply_free_slots(slots),
            FreeTimeOutcome::Failed(message) => self.report_error(message),
            FreeTimeOutcome::AuthRequired(url) => self.require_auth(url),
        }
        true
    }

    /// Replaces the displayed free slots wholesale.
    pub fn apply_free_slots(&mut self, slots: Vec<FreeSlot>) {
        self.free_slots = slots;
        self.last_error = None;
        self.auth_url = None;
    }

    /// Authorization required is not an error and not success: the link
    /// is surfaced and the free-slot state is left untouched.
    pub fn require_auth(&mut self, url: String) {
        self.auth_url = Some(url);
    }

    /// A failed query clears the previously displayed free slots.
    pub fn report_error(&mut self, message: String) {
        self.free_slots.clear();
        self.last_error = Some(message);
    }

    /// Appends an acknowledged event to local state.
    pub fn apply_event_created(&mut self, event: EventRecord) {
        self.events.push(event);
        self.last_error = None;
    }

    /// Applies a creation acknowledgment. An acknowledgment without the
    /// created event is a failure: nothing is appended and the error is
    /// reported instead.
    pub fn apply_creation_ack(
        &mut self,
        success: bool,
        event: Option<EventRecord>,
    ) -> Result<(), String> {
        match (success, event) {
            (true, Some(event)) => {
                self.apply_event_created(event);
                Ok(())
            }
            (true, None) => {
                let message = "Event creation response was missing the created event".to_string();
                self.report_error(message.clone());
                Err(message)
            }
            (false, _) => {
                let message = "Failed to create event".to_string();
                self.report_error(message.clone());
                Err(message)
            }
        }
    }

    /// The classified slot rows for the selected date over `window`.
    pub fn grid(&self, window: Option<TimeWindow>) -> Vec<(TimeSlot, SlotStatus)> {
        let events: Vec<EventRecord> = self
            .events_for_selected_date()
            .into_iter()
            .cloned()
            .collect();
        hour_slots(window)
            .into_iter()
            .map(|slot| (slot, classify_slot(slot, &events, &self.free_slots)))
            .collect()
    }
}
