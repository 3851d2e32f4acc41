//! RunTickHandler - the periodic scheduler pulse.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::state::CoreState;
use crate::domain::foundation::Timestamp;
use crate::ports::{Directory, Notifier};

/// What a pulse did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// The window had not ended yet.
    NoRollover,
    /// The window rolled over; `swept` grants were removed and revoked.
    RolledOver { swept: usize },
}

/// Handler for the timer trigger.
///
/// The sweep and window advance are one critical section inside
/// [`CoreState::tick`]; directory revocations and the broadcast run
/// afterwards on the copied-out grant list, so a slow platform never blocks
/// incoming settlements.
pub struct RunTickHandler {
    state: Arc<CoreState>,
    directory: Arc<dyn Directory>,
    notifier: Arc<dyn Notifier>,
}

impl RunTickHandler {
    pub fn new(
        state: Arc<CoreState>,
        directory: Arc<dyn Directory>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            state,
            directory,
            notifier,
        }
    }

    pub async fn handle(&self, now: Timestamp) -> TickOutcome {
        let Some(event) = self.state.tick(now) else {
            return TickOutcome::NoRollover;
        };

        info!(
            swept = event.removed.len(),
            window_start = %event.window.window_start(),
            window_end = %event.window.window_end(),
            "Enrollment window rolled over"
        );

        for grant in &event.removed {
            if let Err(err) = self.directory.revoke_role(&grant.user_id, grant.role).await {
                warn!(user_id = %grant.user_id, role = %grant.role, error = %err,
                    "Failed to revoke expired role on directory");
            }
        }

        let notice = format!(
            "Enrollment for the new period opens now and closes on {}.",
            event.window.enrollment_end().format_date()
        );
        if let Err(err) = self.notifier.broadcast(&notice).await {
            warn!(error = %err, "Rollover broadcast failed");
        }

        TickOutcome::RolledOver {
            swept: event.removed.len(),
        }
    }
}
