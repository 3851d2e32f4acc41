//! ConfirmPaymentHandler - processes payment-gateway webhook notifications.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::state::CoreState;
use crate::domain::foundation::{OrderId, Timestamp, UserId};
use crate::domain::ledger::{LedgerError, OrderStatus};
use crate::domain::registry::RoleTier;
use crate::ports::{AuditLog, AuditRecord, Directory, Notifier};

/// Transaction statuses that count as payment confirmation.
pub const CONFIRMING_STATUSES: [&str; 2] = ["settlement", "capture"];

/// Command carrying one webhook notification.
#[derive(Debug, Clone)]
pub struct ConfirmPaymentCommand {
    pub order_id: OrderId,
    /// Raw gateway status string, e.g. `settlement`, `capture`, `deny`.
    pub transaction_status: String,
}

/// Result of webhook processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmPaymentResult {
    /// First confirmation: grant issued, audit row appended, user notified.
    Settled { user_id: UserId, role: RoleTier },
    /// Duplicate delivery for an already-settled order. Success, no effect.
    AlreadySettled,
    /// Unknown order id, non-confirming status, or a canceled order.
    Ignored,
}

/// Handler for the payment-confirmation webhook.
///
/// The settle-and-grant step is one critical section on the core state;
/// directory, audit and notification calls happen afterwards with copied
/// data. Their failures are logged and do not roll back the settlement:
/// the ledger and registry record the decision, not the external effect.
pub struct ConfirmPaymentHandler {
    state: Arc<CoreState>,
    directory: Arc<dyn Directory>,
    audit: Arc<dyn AuditLog>,
    notifier: Arc<dyn Notifier>,
}

impl ConfirmPaymentHandler {
    pub fn new(
        state: Arc<CoreState>,
        directory: Arc<dyn Directory>,
        audit: Arc<dyn AuditLog>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            state,
            directory,
            audit,
            notifier,
        }
    }

    pub async fn handle(&self, cmd: ConfirmPaymentCommand) -> ConfirmPaymentResult {
        if !CONFIRMING_STATUSES.contains(&cmd.transaction_status.as_str()) {
            info!(
                order_id = %cmd.order_id,
                status = %cmd.transaction_status,
                "Ignoring non-confirming transaction status"
            );
            return ConfirmPaymentResult::Ignored;
        }

        let now = Timestamp::now();
        let outcome = match self.state.settle_and_grant(&cmd.order_id, now) {
            Ok(outcome) => outcome,
            Err(LedgerError::AlreadyTerminal { id, status }) => {
                info!(order_id = %id, ?status, "Confirmation for terminal order, no-op");
                // A canceled order never produced a grant, so there is
                // nothing for the gateway to treat as settled.
                return match status {
                    OrderStatus::Canceled => ConfirmPaymentResult::Ignored,
                    _ => ConfirmPaymentResult::AlreadySettled,
                };
            }
            Err(LedgerError::NotFound(id)) => {
                warn!(order_id = %id, "Confirmation for unknown order");
                return ConfirmPaymentResult::Ignored;
            }
        };

        if outcome.duration_fallback {
            warn!(
                order_id = %outcome.order.id,
                role = %outcome.order.role,
                "Registration day outside duration schedule, default duration applied"
            );
        }

        let user_id = outcome.order.user_id.clone();
        let role = outcome.order.role;

        // Revoke the replaced role first when the tier changed, so the user
        // does not keep both on the platform.
        if let Some(previous) = &outcome.replaced {
            if previous.role != role {
                if let Err(err) = self.directory.revoke_role(&user_id, previous.role).await {
                    warn!(user_id = %user_id, role = %previous.role, error = %err,
                        "Failed to revoke replaced role on directory");
                }
            }
        }

        if let Err(err) = self.directory.grant_role(&user_id, role).await {
            warn!(user_id = %user_id, role = %role, error = %err,
                "Failed to apply role on directory");
        }

        if let Err(err) = self
            .audit
            .append(AuditRecord {
                order_id: outcome.order.id.clone(),
                user_id: user_id.clone(),
                role,
                status: outcome.order.status,
                timestamp: now,
            })
            .await
        {
            warn!(order_id = %outcome.order.id, error = %err, "Audit append failed");
        }

        let message = format!(
            "Payment for order `{}` confirmed. Role `{}` is yours until {}.",
            outcome.order.id,
            role,
            outcome.grant.expires_at.format_date()
        );
        if let Err(err) = self.notifier.notify_user(&user_id, &message).await {
            warn!(user_id = %user_id, error = %err, "Settlement notification failed");
        }

        info!(order_id = %outcome.order.id, user_id = %user_id, role = %role,
            expires_at = %outcome.grant.expires_at, "Order settled and role granted");

        ConfirmPaymentResult::Settled { user_id, role }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::enrollment::{EnrollmentWindow, RolloverPolicy};
    use crate::domain::registry::DurationPolicy;
    use crate::ports::{AuditError, DirectoryError, NotifyError};
    use async_trait::async_trait;
    use std::sync::Mutex;

    // ════════════════════════════════════════════════════════════════════
    // Mock Implementations
    // ════════════════════════════════════════════════════════════════════

    #[derive(Default)]
    struct MockDirectory {
        granted: Mutex<Vec<(UserId, RoleTier)>>,
        revoked: Mutex<Vec<(UserId, RoleTier)>>,
        fail: bool,
    }

    impl MockDirectory {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl Directory for MockDirectory {
        async fn grant_role(&self, user_id: &UserId, role: RoleTier) -> Result<(), DirectoryError> {
            if self.fail {
                return Err(DirectoryError::ActionFailed("missing permission".into()));
            }
            self.granted.lock().unwrap().push((user_id.clone(), role));
            Ok(())
        }

        async fn revoke_role(
            &self,
            user_id: &UserId,
            role: RoleTier,
        ) -> Result<(), DirectoryError> {
            if self.fail {
                return Err(DirectoryError::ActionFailed("missing permission".into()));
            }
            self.revoked.lock().unwrap().push((user_id.clone(), role));
            Ok(())
        }
    }

    #[derive(Default)]
    struct MockAuditLog {
        records: Mutex<Vec<AuditRecord>>,
    }

    #[async_trait]
    impl AuditLog for MockAuditLog {
        async fn append(&self, record: AuditRecord) -> Result<(), AuditError> {
            self.records.lock().unwrap().push(record);
            Ok(())
        }
    }

    #[derive(Default)]
    struct MockNotifier {
        messages: Mutex<Vec<(UserId, String)>>,
        broadcasts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Notifier for MockNotifier {
        async fn notify_user(&self, user_id: &UserId, message: &str) -> Result<(), NotifyError> {
            self.messages
                .lock()
                .unwrap()
                .push((user_id.clone(), message.to_string()));
            Ok(())
        }

        async fn broadcast(&self, message: &str) -> Result<(), NotifyError> {
            self.broadcasts.lock().unwrap().push(message.to_string());
            Ok(())
        }
    }

    // ════════════════════════════════════════════════════════════════════
    // Test Helpers
    // ════════════════════════════════════════════════════════════════════

    fn user() -> UserId {
        UserId::new("424242").unwrap()
    }

    fn open_state() -> Arc<CoreState> {
        let window = EnrollmentWindow::new(Timestamp::now().add_days(-1), 7, 37).unwrap();
        Arc::new(CoreState::new(
            window,
            DurationPolicy::standard(),
            RolloverPolicy::FixedIncrement,
        ))
    }

    struct Fixture {
        state: Arc<CoreState>,
        directory: Arc<MockDirectory>,
        audit: Arc<MockAuditLog>,
        notifier: Arc<MockNotifier>,
        handler: ConfirmPaymentHandler,
    }

    fn fixture_with_directory(directory: MockDirectory) -> Fixture {
        let state = open_state();
        let directory = Arc::new(directory);
        let audit = Arc::new(MockAuditLog::default());
        let notifier = Arc::new(MockNotifier::default());
        let handler = ConfirmPaymentHandler::new(
            state.clone(),
            directory.clone(),
            audit.clone(),
            notifier.clone(),
        );
        Fixture {
            state,
            directory,
            audit,
            notifier,
            handler,
        }
    }

    fn fixture() -> Fixture {
        fixture_with_directory(MockDirectory::default())
    }

    fn pending_order(state: &CoreState, role: RoleTier) -> OrderId {
        state.create_order(user(), role, Timestamp::now())
    }

    // ════════════════════════════════════════════════════════════════════
    // Settlement Tests
    // ════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn settlement_grants_role_and_audits_once() {
        let fx = fixture();
        let order_id = pending_order(&fx.state, RoleTier::Fellows);

        let result = fx
            .handler
            .handle(ConfirmPaymentCommand {
                order_id: order_id.clone(),
                transaction_status: "settlement".to_string(),
            })
            .await;

        assert_eq!(
            result,
            ConfirmPaymentResult::Settled {
                user_id: user(),
                role: RoleTier::Fellows
            }
        );
        assert!(fx.state.grant_for(&user()).is_some());
        assert_eq!(fx.directory.granted.lock().unwrap().len(), 1);
        assert_eq!(fx.audit.records.lock().unwrap().len(), 1);
        assert_eq!(fx.notifier.messages.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn capture_status_also_confirms() {
        let fx = fixture();
        let order_id = pending_order(&fx.state, RoleTier::Warriors);

        let result = fx
            .handler
            .handle(ConfirmPaymentCommand {
                order_id,
                transaction_status: "capture".to_string(),
            })
            .await;

        assert!(matches!(result, ConfirmPaymentResult::Settled { .. }));
    }

    #[tokio::test]
    async fn duplicate_delivery_is_a_noop_with_one_side_effect_set() {
        let fx = fixture();
        let order_id = pending_order(&fx.state, RoleTier::Fellows);

        let cmd = ConfirmPaymentCommand {
            order_id,
            transaction_status: "settlement".to_string(),
        };
        let first = fx.handler.handle(cmd.clone()).await;
        let second = fx.handler.handle(cmd).await;

        assert!(matches!(first, ConfirmPaymentResult::Settled { .. }));
        assert_eq!(second, ConfirmPaymentResult::AlreadySettled);

        // Exactly one grant, one audit row, one notification
        assert_eq!(fx.directory.granted.lock().unwrap().len(), 1);
        assert_eq!(fx.audit.records.lock().unwrap().len(), 1);
        assert_eq!(fx.notifier.messages.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn concurrent_deliveries_produce_exactly_one_grant() {
        let fx = fixture();
        let order_id = pending_order(&fx.state, RoleTier::Fellows);

        let cmd = ConfirmPaymentCommand {
            order_id,
            transaction_status: "settlement".to_string(),
        };
        let (a, b) = tokio::join!(fx.handler.handle(cmd.clone()), fx.handler.handle(cmd));

        let settled = [&a, &b]
            .iter()
            .filter(|r| matches!(r, ConfirmPaymentResult::Settled { .. }))
            .count();
        assert_eq!(settled, 1);
        assert_eq!(fx.notifier.messages.lock().unwrap().len(), 1);
    }

    // ════════════════════════════════════════════════════════════════════
    // Ignore Tests
    // ════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn non_confirming_status_is_ignored_without_mutation() {
        let fx = fixture();
        let order_id = pending_order(&fx.state, RoleTier::Fellows);

        let result = fx
            .handler
            .handle(ConfirmPaymentCommand {
                order_id: order_id.clone(),
                transaction_status: "deny".to_string(),
            })
            .await;

        assert_eq!(result, ConfirmPaymentResult::Ignored);
        assert!(fx.state.grant_for(&user()).is_none());
        assert_eq!(
            fx.state.find_active_order(&user()).unwrap().id,
            order_id,
            "order must stay pending"
        );
    }

    #[tokio::test]
    async fn confirmation_for_canceled_order_is_ignored() {
        let fx = fixture();
        let first = pending_order(&fx.state, RoleTier::Fellows);
        // A repurchase cancels the prior pending order
        let _second = pending_order(&fx.state, RoleTier::Warriors);

        let result = fx
            .handler
            .handle(ConfirmPaymentCommand {
                order_id: first,
                transaction_status: "settlement".to_string(),
            })
            .await;

        // No grant was ever issued for the canceled order
        assert_eq!(result, ConfirmPaymentResult::Ignored);
        assert!(fx.state.grant_for(&user()).is_none());
        assert!(fx.audit.records.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_order_is_ignored() {
        let fx = fixture();

        let result = fx
            .handler
            .handle(ConfirmPaymentCommand {
                order_id: "order-999-1".parse().unwrap(),
                transaction_status: "settlement".to_string(),
            })
            .await;

        assert_eq!(result, ConfirmPaymentResult::Ignored);
        assert!(fx.audit.records.lock().unwrap().is_empty());
    }

    // ════════════════════════════════════════════════════════════════════
    // External Failure Tests
    // ════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn directory_failure_does_not_roll_back_settlement() {
        let fx = fixture_with_directory(MockDirectory::failing());
        let order_id = pending_order(&fx.state, RoleTier::Fellows);

        let result = fx
            .handler
            .handle(ConfirmPaymentCommand {
                order_id,
                transaction_status: "settlement".to_string(),
            })
            .await;

        // Core bookkeeping reflects the decision even though the platform
        // action failed
        assert!(matches!(result, ConfirmPaymentResult::Settled { .. }));
        assert!(fx.state.grant_for(&user()).is_some());
        assert_eq!(fx.audit.records.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn tier_change_revokes_replaced_role() {
        let fx = fixture();

        let first = pending_order(&fx.state, RoleTier::Fellows);
        fx.handler
            .handle(ConfirmPaymentCommand {
                order_id: first,
                transaction_status: "settlement".to_string(),
            })
            .await;

        let second = pending_order(&fx.state, RoleTier::Warriors);
        fx.handler
            .handle(ConfirmPaymentCommand {
                order_id: second,
                transaction_status: "settlement".to_string(),
            })
            .await;

        let revoked = fx.directory.revoked.lock().unwrap();
        assert_eq!(revoked.as_slice(), &[(user(), RoleTier::Fellows)]);
    }
}
