//! The core state container.
//!
//! One explicitly constructed container owns the Ledger, Registry and Window
//! for the whole process: built at startup (optionally from a restored
//! snapshot), shared with every handler, captured back into a snapshot at
//! checkpoint and shutdown.
//!
//! # Locking
//!
//! A single `RwLock` covers all three structures. Every read-modify-write
//! sequence (`create_order`, `settle_and_grant`, `tick`, `restore`) takes
//! the exclusive lock; pure reads take the shared lock. Nothing performs
//! I/O while holding the lock; handlers copy data out and call collaborators
//! afterwards.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::enrollment::{EnrollmentWindow, RolloverPolicy};
use crate::domain::foundation::{OrderId, Timestamp, UserId};
use crate::domain::ledger::{LedgerError, Order, OrderLedger, OrderStatus};
use crate::domain::registry::{DurationPolicy, EntitlementGrant, EntitlementRegistry, RoleTier};
use crate::domain::StateSnapshot;

/// Everything guarded by the single lock.
#[derive(Debug)]
struct CoreInner {
    ledger: OrderLedger,
    registry: EntitlementRegistry,
    window: EnrollmentWindow,
}

/// Outcome of a successful first settlement.
#[derive(Debug, Clone)]
pub struct SettlementOutcome {
    /// The settled order.
    pub order: Order,
    /// The grant issued for it.
    pub grant: EntitlementGrant,
    /// The grant this one replaced, if the user already held one.
    pub replaced: Option<EntitlementGrant>,
    /// True when the duration schedule was out of range and the fixed
    /// default was used instead.
    pub duration_fallback: bool,
}

/// Result of a scheduler pulse that crossed the window end.
#[derive(Debug, Clone)]
pub struct RolloverEvent {
    /// The window after advancing.
    pub window: EnrollmentWindow,
    /// Grants removed by the sweep, for external revocation.
    pub removed: Vec<EntitlementGrant>,
}

/// Shared core state: Ledger + Registry + Window behind one lock.
#[derive(Debug)]
pub struct CoreState {
    inner: RwLock<CoreInner>,
    duration_policy: DurationPolicy,
    rollover_policy: RolloverPolicy,
}

impl CoreState {
    /// Builds a fresh container around an initial window.
    pub fn new(
        window: EnrollmentWindow,
        duration_policy: DurationPolicy,
        rollover_policy: RolloverPolicy,
    ) -> Self {
        Self {
            inner: RwLock::new(CoreInner {
                ledger: OrderLedger::new(),
                registry: EntitlementRegistry::new(),
                window,
            }),
            duration_policy,
            rollover_policy,
        }
    }

    /// Builds a container from a restored snapshot.
    pub fn from_snapshot(
        snapshot: StateSnapshot,
        duration_policy: DurationPolicy,
        rollover_policy: RolloverPolicy,
    ) -> Self {
        Self {
            inner: RwLock::new(CoreInner {
                ledger: snapshot.ledger,
                registry: snapshot.registry,
                window: snapshot.window,
            }),
            duration_policy,
            rollover_policy,
        }
    }

    // A poisoned lock means a panic mid-mutation elsewhere; the maps are
    // still structurally valid, so recover the guard instead of unwinding
    // every caller.
    fn read(&self) -> RwLockReadGuard<'_, CoreInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CoreInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// True iff the enrollment window accepts new orders at `now`.
    pub fn is_accepting_orders(&self, now: Timestamp) -> bool {
        self.read().window.is_accepting_orders(now)
    }

    /// When the next enrollment opens, for the closed-window message.
    pub fn next_open(&self, now: Timestamp) -> Timestamp {
        self.read().window.next_open(now)
    }

    /// Creates a pending order, canceling any prior pending one for the user.
    pub fn create_order(&self, user_id: UserId, role: RoleTier, now: Timestamp) -> OrderId {
        self.write().ledger.create_order(user_id, role, now)
    }

    /// Cancels an order; no-op if already terminal.
    pub fn cancel_order(&self, order_id: &OrderId) -> Result<(), LedgerError> {
        self.write().ledger.cancel(order_id)
    }

    /// Settles an order and issues its grant as one critical section.
    ///
    /// The ledger's terminal-state check acts as a compare-and-set: of two
    /// racing settlements for the same order, exactly one reaches the grant.
    /// The duration comes from the countdown policy indexed by the current
    /// window's registration day, with the fixed default as fallback.
    ///
    /// # Errors
    ///
    /// - `LedgerError::NotFound` for an unknown order
    /// - `LedgerError::AlreadyTerminal` for a repeated confirmation
    pub fn settle_and_grant(
        &self,
        order_id: &OrderId,
        now: Timestamp,
    ) -> Result<SettlementOutcome, LedgerError> {
        let mut inner = self.write();

        let order = inner.ledger.settle(order_id)?;

        let day_index = inner.window.registration_day_index(now);
        let (duration_days, duration_fallback) =
            self.duration_policy.duration_or_default(order.role, day_index);

        let (grant, replaced) =
            inner
                .registry
                .grant(order.user_id.clone(), order.role, duration_days, now);

        Ok(SettlementOutcome {
            order,
            grant,
            replaced,
            duration_fallback,
        })
    }

    /// Returns a user's orders as `(order_id, status)`, most recent first.
    pub fn query_status(&self, user_id: &UserId) -> Vec<(OrderId, OrderStatus)> {
        self.read()
            .ledger
            .orders_for_user(user_id)
            .into_iter()
            .map(|o| (o.id.clone(), o.status))
            .collect()
    }

    /// The most recent non-canceled order for a user.
    pub fn find_active_order(&self, user_id: &UserId) -> Option<Order> {
        self.read().ledger.find_active_for_user(user_id).cloned()
    }

    /// The active grant for a user, if any.
    pub fn grant_for(&self, user_id: &UserId) -> Option<EntitlementGrant> {
        self.read().registry.grant_for(user_id).cloned()
    }

    /// Scheduler pulse. At most one rollover per call.
    ///
    /// When `now` has reached the window end: sweeps the registry, advances
    /// the window per the configured policy, and returns the rollover event.
    /// Sweep and advance happen under one write guard, so concurrent
    /// `is_accepting_orders` readers never observe a half-rolled window.
    pub fn tick(&self, now: Timestamp) -> Option<RolloverEvent> {
        let mut inner = self.write();

        if !inner.window.rollover_due(now) {
            return None;
        }

        let removed = inner.registry.sweep(now);
        inner.window.advance(self.rollover_policy);

        Some(RolloverEvent {
            window: inner.window,
            removed,
        })
    }

    /// Captures one consistent snapshot of all three structures.
    pub fn snapshot(&self) -> StateSnapshot {
        let inner = self.read();
        StateSnapshot {
            ledger: inner.ledger.clone(),
            registry: inner.registry.clone(),
            window: inner.window,
        }
    }

    /// Fully replaces in-memory state with a restored snapshot.
    pub fn restore(&self, snapshot: StateSnapshot) {
        let mut inner = self.write();
        inner.ledger = snapshot.ledger;
        inner.registry = snapshot.registry;
        inner.window = snapshot.window;
    }
}
