//! Role-specific grant duration policy.

use serde::{Deserialize, Serialize};

use super::{PolicyError, RoleTier};

/// Computes how many days a grant is valid for.
///
/// `Warriors` always gets the fixed duration. `Fellows` follows a countdown
/// schedule indexed by how many days into the enrollment sub-window the
/// purchase happened, so every cohort member expires on the same day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationPolicy {
    /// Fixed duration for tiers without a schedule, and the fallback when a
    /// schedule lookup is out of range.
    pub fixed_days: u32,

    /// Countdown schedule for the Fellows tier, one entry per enrollment day.
    pub fellows_schedule: Vec<u32>,
}

impl DurationPolicy {
    /// The policy observed in production: 30 fixed days, 7-day countdown.
    pub fn standard() -> Self {
        Self {
            fixed_days: 30,
            fellows_schedule: vec![30, 29, 28, 27, 26, 25, 24],
        }
    }

    /// Duration in days for a role purchased on the given enrollment day.
    ///
    /// `registration_day_index` is days elapsed since the window opened,
    /// starting at 0.
    ///
    /// # Errors
    ///
    /// `PolicyError::OutOfRange` if the index falls outside the schedule.
    /// Callers log the error and fall back to [`DurationPolicy::fixed_days`].
    pub fn duration_for(
        &self,
        role: RoleTier,
        registration_day_index: i64,
    ) -> Result<u32, PolicyError> {
        match role {
            RoleTier::Warriors => Ok(self.fixed_days),
            RoleTier::Fellows => {
                if registration_day_index < 0
                    || registration_day_index as usize >= self.fellows_schedule.len()
                {
                    return Err(PolicyError::OutOfRange {
                        day_index: registration_day_index,
                        schedule_len: self.fellows_schedule.len(),
                    });
                }
                Ok(self.fellows_schedule[registration_day_index as usize])
            }
        }
    }

    /// Duration with the out-of-range fallback applied.
    ///
    /// Returns the computed duration and whether the fallback was used.
    pub fn duration_or_default(&self, role: RoleTier, registration_day_index: i64) -> (u32, bool) {
        match self.duration_for(role, registration_day_index) {
            Ok(days) => (days, false),
            Err(_) => (self.fixed_days, true),
        }
    }
}

impl Default for DurationPolicy {
    fn default() -> Self {
        Self::standard()
    }
}
