//! The fixed hourly partition of a day used to render availability.

/// An hour-aligned slot on the daily grid. Always in `[0, 23]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeSlot(u8);

impl TimeSlot {
    pub fn hour(&self) -> u8 {
        self.0
    }

    /// Display form, e.g. `09:00`.
    pub fn label(&self) -> String {
        format!("{:02}:00", self.0)
    }
}

/// A half-open `[start_hour, end_hour)` window over the day.
///
/// Only non-empty windows can be constructed; `start_hour == end_hour` is
/// the empty window and is represented as `None` at the call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start_hour: u8,
    end_hour: u8,
}

impl TimeWindow {
    /// Returns `None` unless `0 <= start_hour < end_hour <= 24`.
    pub fn new(start_hour: u8, end_hour: u8) -> Option<Self> {
        if start_hour < end_hour && end_hour <= 24 {
            Some(Self {
                start_hour,
                end_hour,
            })
        } else {
            None
        }
    }

    pub fn start_hour(&self) -> u8 {
        self.start_hour
    }

    pub fn end_hour(&self) -> u8 {
        self.end_hour
    }
}

/// The ordered sequence of hour slots covered by `window`. An absent
/// window yields an empty sequence, never an error.
pub fn hour_slots(window: Option<TimeWindow>) -> Vec<TimeSlot> {
    match window {
        Some(w) => (w.start_hour..w.end_hour).map(TimeSlot).collect(),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_count_matches_window_width() {
        for start in 0..24u8 {
            for end in (start + 1)..=24u8 {
                let window = TimeWindow::new(start, end).unwrap();
                let slots = hour_slots(Some(window));
                assert_eq!(slots.len(), (end - start) as usize);
            }
        }
    }

    #[test]
    fn test_slots_are_strictly_increasing() {
        let window = TimeWindow::new(9, 20).unwrap();
        let slots = hour_slots(Some(window));
        for pair in slots.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        assert_eq!(slots.first().unwrap().hour(), 9);
        assert_eq!(slots.last().unwrap().hour(), 19);
    }

    #[test]
    fn test_empty_window_yields_no_slots() {
        assert!(TimeWindow::new(9, 9).is_none());
        assert!(TimeWindow::new(12, 9).is_none());
        assert!(hour_slots(None).is_empty());
    }

    #[test]
    fn test_window_rejects_out_of_range_end() {
        assert!(TimeWindow::new(9, 25).is_none());
        assert!(TimeWindow::new(0, 24).is_some());
    }

    #[test]
    fn test_slot_label() {
        let window = TimeWindow::new(8, 10).unwrap();
        let labels: Vec<String> = hour_slots(Some(window))
            .iter()
            .map(|s| s.label())
            .collect();
        assert_eq!(labels, vec!["08:00", "09:00"]);
    }
}
