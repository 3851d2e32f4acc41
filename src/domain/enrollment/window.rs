//! The rolling enrollment window.
//!
//! Each cycle has two phases: OPEN while `now` is within
//! `[window_start, enrollment_end)`, then CLOSED within
//! `[enrollment_end, window_end)`. When `now >= window_end` the window rolls
//! over into a fresh cycle and an expiry sweep fires.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, ValidationError};

/// How `window_start` advances at rollover.
///
/// Observed variants of the schedule differ here, so the choice is a
/// configuration policy rather than a constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RolloverPolicy {
    /// `window_start += class_duration_days`: the new cycle abuts the old
    /// one exactly.
    #[default]
    FixedIncrement,

    /// `window_start = window_end + 1s`: the new cycle starts one second
    /// after the old one ended.
    SnapToEnd,
}

/// Phase of the current cycle at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowPhase {
    /// Before the window opened (only possible with a future-dated start).
    NotYetOpen,
    /// Accepting new orders.
    Open,
    /// Enrollment closed, class in progress.
    Closed,
    /// Past `window_end`; a rollover is due.
    RolloverDue,
}

/// A rolling enrollment schedule.
///
/// # Invariants
///
/// - `enrollment_period_days <= class_duration_days`
/// - The window advances only by whole-window increments at rollover
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentWindow {
    /// Instant the current cycle's enrollment opened.
    window_start: Timestamp,

    /// Length of the sub-window in which new orders are accepted.
    enrollment_period_days: u32,

    /// Total cycle length; at `window_start + class_duration_days` the
    /// window rolls over and a sweep fires.
    class_duration_days: u32,
}

impl EnrollmentWindow {
    /// Creates a window, validating the period nesting invariant.
    pub fn new(
        window_start: Timestamp,
        enrollment_period_days: u32,
        class_duration_days: u32,
    ) -> Result<Self, ValidationError> {
        if enrollment_period_days == 0 {
            return Err(ValidationError::out_of_range(
                "enrollment_period_days",
                1,
                class_duration_days as i64,
                0,
            ));
        }
        if enrollment_period_days > class_duration_days {
            return Err(ValidationError::out_of_range(
                "enrollment_period_days",
                1,
                class_duration_days as i64,
                enrollment_period_days as i64,
            ));
        }
        Ok(Self {
            window_start,
            enrollment_period_days,
            class_duration_days,
        })
    }

    /// Instant the current cycle opened.
    pub fn window_start(&self) -> Timestamp {
        self.window_start
    }

    /// Instant enrollment closes for the current cycle.
    pub fn enrollment_end(&self) -> Timestamp {
        self.window_start.add_days(self.enrollment_period_days as i64)
    }

    /// Instant the current cycle ends and a rollover is due.
    pub fn window_end(&self) -> Timestamp {
        self.window_start.add_days(self.class_duration_days as i64)
    }

    /// Phase of the cycle at `now`.
    pub fn phase(&self, now: Timestamp) -> WindowPhase {
        if now.is_before(&self.window_start) {
            WindowPhase::NotYetOpen
        } else if now.is_before(&self.enrollment_end()) {
            WindowPhase::Open
        } else if now.is_before(&self.window_end()) {
            WindowPhase::Closed
        } else {
            WindowPhase::RolloverDue
        }
    }

    /// True iff new orders are accepted at `now`.
    pub fn is_accepting_orders(&self, now: Timestamp) -> bool {
        self.phase(now) == WindowPhase::Open
    }

    /// Days elapsed into the enrollment sub-window at `now`.
    ///
    /// Feeds the countdown duration policy. May be negative or past the
    /// schedule length; the policy handles the range check.
    pub fn registration_day_index(&self, now: Timestamp) -> i64 {
        now.days_since(&self.window_start)
    }

    /// True when `now` has reached the end of the cycle.
    pub fn rollover_due(&self, now: Timestamp) -> bool {
        now.is_at_or_after(&self.window_end())
    }

    /// When the next enrollment opens, from the perspective of `now`.
    ///
    /// Used for the "registration closed, come back on ..." message.
    pub fn next_open(&self, now: Timestamp) -> Timestamp {
        match self.phase(now) {
            WindowPhase::NotYetOpen => self.window_start,
            _ => self.window_end(),
        }
    }

    /// Advances into the next cycle according to `policy`.
    ///
    /// Callers check [`EnrollmentWindow::rollover_due`] first; advancing is
    /// unconditional so a late timer still moves exactly one whole window.
    pub fn advance(&mut self, policy: RolloverPolicy) {
        self.window_start = match policy {
            RolloverPolicy::FixedIncrement => {
                self.window_start.add_days(self.class_duration_days as i64)
            }
            RolloverPolicy::SnapToEnd => self.window_end().plus_secs(1),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window() -> EnrollmentWindow {
        EnrollmentWindow::new(Timestamp::from_unix_secs(1_000_000), 7, 37).unwrap()
    }

    #[test]
    fn rejects_enrollment_longer_than_class() {
        let start = Timestamp::from_unix_secs(0);
        assert!(EnrollmentWindow::new(start, 40, 37).is_err());
        assert!(EnrollmentWindow::new(start, 0, 37).is_err());
        assert!(EnrollmentWindow::new(start, 37, 37).is_ok());
    }

    #[test]
    fn derived_bounds_follow_the_start() {
        let w = window();
        assert_eq!(w.enrollment_end(), w.window_start().add_days(7));
        assert_eq!(w.window_end(), w.window_start().add_days(37));
    }

    #[test]
    fn open_phase_covers_the_enrollment_sub_window() {
        let w = window();
        assert!(w.is_accepting_orders(w.window_start()));
        assert!(w.is_accepting_orders(w.window_start().add_days(6)));
        assert!(!w.is_accepting_orders(w.enrollment_end()));
        assert_eq!(w.phase(w.enrollment_end()), WindowPhase::Closed);
    }

    #[test]
    fn before_start_is_not_accepting() {
        let w = window();
        let before = w.window_start().add_days(-1);
        assert!(!w.is_accepting_orders(before));
        assert_eq!(w.phase(before), WindowPhase::NotYetOpen);
    }

    #[test]
    fn rollover_due_only_at_window_end() {
        let w = window();
        // One second before the end: still in the cycle
        let just_before = w.window_end().add_days(-1).plus_secs(86_399);
        assert!(!w.rollover_due(just_before));
        assert_eq!(w.phase(just_before), WindowPhase::Closed);

        assert!(w.rollover_due(w.window_end()));
        assert_eq!(w.phase(w.window_end()), WindowPhase::RolloverDue);
    }

    #[test]
    fn registration_day_index_counts_from_window_start() {
        let w = window();
        assert_eq!(w.registration_day_index(w.window_start()), 0);
        assert_eq!(
            w.registration_day_index(w.window_start().add_days(3).plus_secs(7_200)),
            3
        );
    }

    #[test]
    fn fixed_increment_advance_abuts_cycles() {
        let mut w = window();
        let old_end = w.window_end();
        w.advance(RolloverPolicy::FixedIncrement);

        assert_eq!(w.window_start(), old_end);
        assert!(w.window_end() > old_end);
    }

    #[test]
    fn snap_to_end_advance_starts_one_second_later() {
        let mut w = window();
        let old_end = w.window_end();
        w.advance(RolloverPolicy::SnapToEnd);

        assert_eq!(w.window_start(), old_end.plus_secs(1));
    }

    #[test]
    fn window_end_strictly_increases_across_rollovers() {
        let mut w = window();
        let mut last_end = w.window_end();
        for _ in 0..5 {
            w.advance(RolloverPolicy::FixedIncrement);
            assert!(w.window_end() > last_end);
            last_end = w.window_end();
        }
    }

    #[test]
    fn next_open_points_to_new_cycle_when_closed() {
        let w = window();
        let closed_at = w.enrollment_end().plus_secs(60);
        assert_eq!(w.next_open(closed_at), w.window_end());

        let before = w.window_start().add_days(-2);
        assert_eq!(w.next_open(before), w.window_start());
    }
}
