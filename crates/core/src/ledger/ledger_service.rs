use std::sync::Arc;

use chrono::Utc;
use log::{debug, info};
use rust_decimal::Decimal;

use super::ledger_model::{LedgerSnapshot, LedgerState};
use super::{attempt_invest, attempt_withdraw, register, validate_deposit};
use crate::accounts::{Account, ActivePlan, Pool};
use crate::errors::{DepositError, Error, Result, ValidationError};
use crate::events::{self, Notification, NotificationSink};
use crate::payments::PaymentMethods;
use crate::plans::{PlanCatalog, PlanId};
use crate::policy::LedgerPolicy;
use crate::transactions::{Transaction, TransactionLog};
use crate::utils::Clock;

/// In-memory ledger for a single interactive session.
///
/// Every operation runs one pure transition over the current state and only
/// swaps in the result when it succeeds, so a rejection leaves the account and
/// the log untouched. Each call emits exactly one notification.
pub struct LedgerService {
    policy: LedgerPolicy,
    catalog: PlanCatalog,
    payment_methods: PaymentMethods,
    clock: Arc<dyn Clock>,
    notification_sink: Arc<dyn NotificationSink>,
    state: Option<LedgerState>,
}

impl LedgerService {
    /// Creates a LedgerService with no signed-in user.
    pub fn new(
        policy: LedgerPolicy,
        catalog: PlanCatalog,
        clock: Arc<dyn Clock>,
        notification_sink: Arc<dyn NotificationSink>,
    ) -> Result<Self> {
        policy.validate()?;
        Ok(Self {
            policy,
            catalog,
            payment_methods: PaymentMethods::default(),
            clock,
            notification_sink,
            state: None,
        })
    }

    pub fn with_payment_methods(mut self, payment_methods: PaymentMethods) -> Self {
        self.payment_methods = payment_methods;
        self
    }

    pub fn policy(&self) -> &LedgerPolicy {
        &self.policy
    }

    pub fn plans(&self) -> &PlanCatalog {
        &self.catalog
    }

    pub fn payment_methods(&self) -> &PaymentMethods {
        &self.payment_methods
    }

    pub fn is_active(&self) -> bool {
        self.state.is_some()
    }

    pub fn account(&self) -> Option<&Account> {
        self.state.as_ref().map(|s| &s.account)
    }

    pub fn transactions(&self) -> Option<&TransactionLog> {
        self.state.as_ref().map(|s| &s.transactions)
    }

    /// Starts a new session, replacing any previous one.
    ///
    /// The log restarts with the single completed welcome-bonus entry.
    pub fn register(&mut self, phone: &str) -> Result<&Account> {
        if phone.trim().is_empty() {
            return Err(self.reject(Error::Validation(ValidationError::InvalidInput(
                "Phone number cannot be empty".to_string(),
            ))));
        }

        let now = self.clock.now().with_timezone(&Utc);
        let (account, bonus_tx) = register(phone, self.policy.welcome_bonus, now);
        info!(
            "Registered account {} with welcome bonus {}",
            account.phone, bonus_tx.amount
        );
        self.notify(Notification::success(events::welcome(bonus_tx.amount)));

        let state = self.state.insert(LedgerState {
            account,
            transactions: TransactionLog::seeded(bonus_tx),
        });
        Ok(&state.account)
    }

    /// Ends the session. Returns false if there was none.
    pub fn logout(&mut self) -> bool {
        let was_active = self.state.take().is_some();
        if was_active {
            debug!("Session closed");
            self.notify(Notification::success(events::session_closed()));
        }
        was_active
    }

    /// Records a deposit request awaiting manual approval.
    ///
    /// A reference already present in the log is rejected so ids stay unique.
    pub fn deposit(
        &mut self,
        amount: Decimal,
        method: &str,
        reference: Option<&str>,
    ) -> Result<Transaction> {
        let now = self.clock.now().with_timezone(&Utc);
        let min_deposit = self.policy.min_deposit;
        let outcome = self
            .state
            .as_ref()
            .ok_or(Error::NoActiveSession)
            .and_then(|s| {
                let tx = validate_deposit(amount, min_deposit, method, reference, now)?;
                if s.transactions.get(&tx.id).is_some() {
                    return Err(DepositError::DuplicateReference(tx.id).into());
                }
                Ok(tx)
            });

        let tx = match outcome {
            Ok(tx) => tx,
            Err(err) => return Err(self.reject(err)),
        };

        info!("Deposit {} of {} via {} pending approval", tx.id, tx.amount, method);
        if let Some(state) = self.state.as_mut() {
            state.transactions.prepend(tx.clone());
        }
        self.notify(Notification::success(events::deposit_submitted()));
        Ok(tx)
    }

    /// Requests a payout from balance and referral earnings.
    pub fn withdraw(&mut self, amount: Decimal, method: &str) -> Result<Transaction> {
        let now = self.clock.now();
        let outcome = self
            .state
            .as_ref()
            .ok_or(Error::NoActiveSession)
            .and_then(|s| {
                attempt_withdraw(&s.account, amount, method, &now, &self.policy)
                    .map_err(Error::from)
            });

        let (account, tx) = match outcome {
            Ok(result) => result,
            Err(err) => return Err(self.reject(err)),
        };

        info!("Withdrawal {} of {} via {} pending payout", tx.id, tx.amount, method);
        if let Some(state) = self.state.as_mut() {
            state.account = account;
            state.transactions.prepend(tx.clone());
        }
        self.notify(Notification::success(events::withdrawal_submitted()));
        Ok(tx)
    }

    /// Buys a plan. No transaction is recorded for the purchase itself.
    pub fn invest(&mut self, plan_id: PlanId) -> Result<ActivePlan> {
        let now = self.clock.now().with_timezone(&Utc);
        let outcome = self
            .state
            .as_ref()
            .ok_or(Error::NoActiveSession)
            .and_then(|s| {
                attempt_invest(&s.account, plan_id, &self.catalog, now).map_err(Error::from)
            });

        let (account, active) = match outcome {
            Ok(result) => result,
            Err(err) => return Err(self.reject(err)),
        };

        let plan_name = self
            .catalog
            .get(active.plan_id)
            .map(|p| p.name.clone())
            .unwrap_or_default();
        info!("Activated plan {} ({}) as {}", active.plan_id, plan_name, active.id);
        if let Some(state) = self.state.as_mut() {
            state.account = account;
        }
        self.notify(Notification::success(events::investment_completed(
            &plan_name,
        )));
        Ok(active)
    }

    /// Applies funds settled outside the engine, such as an approved deposit
    /// or a referral payout. No transaction is recorded.
    pub fn credit(&mut self, pool: Pool, amount: Decimal) -> Result<&Account> {
        let outcome = match self.state.as_ref() {
            None => Err(Error::NoActiveSession),
            Some(s) => {
                let mut account = s.account.clone();
                account.credit(pool, amount).map(|_| account)
            }
        };

        let account = match outcome {
            Ok(account) => account,
            Err(err) => return Err(self.reject(err)),
        };

        info!("Credited {} to {}", amount, pool);
        self.notify(Notification::success(events::credit_applied(pool, amount)));
        match self.state.as_mut() {
            Some(state) => {
                state.account = account;
                Ok(&state.account)
            }
            None => Err(Error::NoActiveSession),
        }
    }

    /// Captures the session for saving at a process boundary.
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot::new(self.state.clone(), self.clock.now().with_timezone(&Utc))
    }

    /// Replaces the session with a previously saved one.
    pub fn restore(&mut self, snapshot: LedgerSnapshot) -> Result<()> {
        if let Some(state) = snapshot.state.as_ref() {
            state.account.validate()?;
        }
        debug!(
            "Restored snapshot saved at {} (active session: {})",
            snapshot.saved_at,
            snapshot.state.is_some()
        );
        self.state = snapshot.state;
        Ok(())
    }

    fn notify(&self, notification: Notification) {
        self.notification_sink.emit(notification);
    }

    fn reject(&self, err: Error) -> Error {
        debug!("Rejected: {}", err);
        self.notify(Notification::error(events::rejection(&err)));
        err
    }
}
