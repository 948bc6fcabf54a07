#[cfg(test)]
mod tests {
    use crate::accounts::Pool;
    use crate::errors::{DepositError, Error, InvestError, ValidationError, WithdrawError};
    use crate::events::{MockNotificationSink, NotificationKind};
    use crate::ledger::{LedgerService, LedgerSnapshot};
    use crate::plans::PlanCatalog;
    use crate::policy::LedgerPolicy;
    use crate::transactions::{TransactionStatus, TransactionType};
    use crate::utils::{FixedClock, DEFAULT_LEDGER_TZ};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    // --- Helpers ---

    /// Local wall-clock time in Maputo. 2024-05-15 is a Wednesday.
    fn clock_at(day: u32, hour: u32, minute: u32) -> Arc<FixedClock> {
        let naive = NaiveDate::from_ymd_opt(2024, 5, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap();
        Arc::new(FixedClock::at_local(DEFAULT_LEDGER_TZ, naive).unwrap())
    }

    fn service_at(day: u32, hour: u32) -> (LedgerService, MockNotificationSink) {
        let sink = MockNotificationSink::new();
        let service = LedgerService::new(
            LedgerPolicy::default(),
            PlanCatalog::default(),
            clock_at(day, hour, 0),
            Arc::new(sink.clone()),
        )
        .unwrap();
        (service, sink)
    }

    fn registered_at(day: u32, hour: u32) -> (LedgerService, MockNotificationSink) {
        let (mut service, sink) = service_at(day, hour);
        service.register("841234567").unwrap();
        sink.clear();
        (service, sink)
    }

    // --- Registration ---

    #[test]
    fn test_register_seeds_bonus_and_log() {
        let (mut service, sink) = service_at(15, 12);
        let account = service.register("841234567").unwrap().clone();

        assert_eq!(account.bonus, dec!(100));
        assert_eq!(account.balance, Decimal::ZERO);
        assert_eq!(account.referral_earnings, Decimal::ZERO);
        assert!(!account.has_invested);

        let log = service.transactions().unwrap();
        assert_eq!(log.len(), 1);
        let bonus = log.latest().unwrap();
        assert_eq!(bonus.transaction_type, TransactionType::Bonus);
        assert_eq!(bonus.status, TransactionStatus::Completed);
        assert_eq!(bonus.amount, dec!(100));

        let note = sink.last().unwrap();
        assert_eq!(note.kind, NotificationKind::Success);
        assert_eq!(note.message, "Bem-vindo! Recebeste 100 MT de bónus.");
    }

    #[test]
    fn test_register_replaces_previous_session() {
        let (mut service, _) = registered_at(15, 12);
        service.deposit(dec!(500), "mpesa", None).unwrap();
        assert_eq!(service.transactions().unwrap().len(), 2);

        service.register("829999999").unwrap();
        assert_eq!(service.account().unwrap().phone, "829999999");
        assert_eq!(service.transactions().unwrap().len(), 1);
    }

    #[test]
    fn test_register_rejects_blank_phone() {
        let (mut service, sink) = service_at(15, 12);
        assert!(matches!(
            service.register("   "),
            Err(Error::Validation(_))
        ));
        assert!(!service.is_active());
        assert!(sink.last().unwrap().is_error());
    }

    #[test]
    fn test_logout_drops_session() {
        let (mut service, _) = registered_at(15, 12);
        assert!(service.logout());
        assert!(service.account().is_none());
        assert!(!service.logout());
        assert!(matches!(
            service.invest(1),
            Err(Error::NoActiveSession)
        ));
    }

    // --- Deposits ---

    #[test]
    fn test_deposit_is_pending_and_leaves_pools() {
        let (mut service, sink) = registered_at(15, 12);
        let tx = service.deposit(dec!(300), "mpesa", Some("QX12ABC")).unwrap();

        assert_eq!(tx.id, "QX12ABC");
        assert_eq!(tx.status, TransactionStatus::Pending);
        assert_eq!(service.account().unwrap().balance, Decimal::ZERO);
        assert_eq!(service.transactions().unwrap().latest().unwrap().id, "QX12ABC");
        assert_eq!(
            sink.last().unwrap().message,
            "Depósito enviado para aprovação manual."
        );
    }

    #[test]
    fn test_deposit_accepted_outside_withdrawal_window() {
        // Sunday night
        let (mut service, _) = registered_at(19, 23);
        assert!(service.deposit(dec!(300), "emola", None).is_ok());
    }

    #[test]
    fn test_deposit_below_minimum_changes_nothing() {
        let (mut service, sink) = registered_at(15, 12);
        let before_account = service.account().unwrap().clone();
        let before_log = service.transactions().unwrap().clone();

        let err = service.deposit(dec!(299), "mpesa", None).unwrap_err();
        assert!(matches!(
            err,
            Error::Deposit(DepositError::BelowMinimum { .. })
        ));
        assert_eq!(service.account().unwrap(), &before_account);
        assert_eq!(service.transactions().unwrap(), &before_log);
        assert_eq!(sink.last().unwrap().message, "O depósito mínimo é de 300 MT.");
    }

    #[test]
    fn test_deposit_rejects_reused_reference() {
        let (mut service, sink) = registered_at(15, 12);
        service.deposit(dec!(300), "mpesa", Some("QX12ABC")).unwrap();
        let before_log = service.transactions().unwrap().clone();

        let err = service
            .deposit(dec!(500), "emola", Some(" QX12ABC "))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Deposit(DepositError::DuplicateReference(ref id)) if id == "QX12ABC"
        ));
        assert_eq!(service.transactions().unwrap(), &before_log);
        assert_eq!(sink.last().unwrap().message, "Esta referência já foi usada.");

        // generated ids never collide with each other
        service.deposit(dec!(300), "mpesa", None).unwrap();
        service.deposit(dec!(300), "mpesa", None).unwrap();
        assert_eq!(service.transactions().unwrap().len(), 4);
    }

    #[test]
    fn test_deposit_without_session() {
        let (mut service, sink) = service_at(15, 12);
        assert!(matches!(
            service.deposit(dec!(500), "mpesa", None),
            Err(Error::NoActiveSession)
        ));
        assert!(sink.last().unwrap().is_error());
    }

    // --- Investments ---

    #[test]
    fn test_invest_uses_bonus_then_balance_then_referral() {
        let (mut service, sink) = registered_at(15, 12);
        service.credit(Pool::Balance, dec!(100)).unwrap();
        service.credit(Pool::ReferralEarnings, dec!(100)).unwrap();
        let log_len = service.transactions().unwrap().len();

        let active = service.invest(1).unwrap();
        let account = service.account().unwrap();

        assert_eq!(account.bonus, Decimal::ZERO);
        assert_eq!(account.balance, Decimal::ZERO);
        assert_eq!(account.referral_earnings, Decimal::ZERO);
        assert!(account.has_invested);
        assert_eq!(account.active_plans, vec![active]);
        // Investments write no ledger entry
        assert_eq!(service.transactions().unwrap().len(), log_len);
        assert_eq!(
            sink.last().unwrap().message,
            "Investimento no plano BMW Série 1 realizado com sucesso!"
        );
    }

    #[test]
    fn test_invest_insufficient_is_all_or_nothing() {
        let (mut service, sink) = registered_at(15, 12);
        service.credit(Pool::Balance, dec!(150)).unwrap();
        let before = service.account().unwrap().clone();

        let err = service.invest(1).unwrap_err();
        assert!(matches!(
            err,
            Error::Invest(InvestError::InsufficientFunds { .. })
        ));
        assert_eq!(service.account().unwrap(), &before);
        assert_eq!(
            sink.last().unwrap().message,
            "Saldo insuficiente. Por favor faz um depósito."
        );
    }

    #[test]
    fn test_invest_unknown_plan() {
        let (mut service, _) = registered_at(15, 12);
        assert!(matches!(
            service.invest(42),
            Err(Error::Invest(InvestError::UnknownPlan(42)))
        ));
    }

    // --- Withdrawals ---

    #[test]
    fn test_full_flow_withdraw_after_invest() {
        let (mut service, sink) = registered_at(15, 12);
        service.credit(Pool::Balance, dec!(5000)).unwrap();
        service.invest(1).unwrap();
        // bonus 100 covered part of the 300 price
        assert_eq!(service.account().unwrap().balance, dec!(4800));

        let tx = service.withdraw(dec!(800), "emola").unwrap();
        assert_eq!(tx.transaction_type, TransactionType::Withdrawal);
        assert_eq!(tx.status, TransactionStatus::Pending);
        assert_eq!(service.account().unwrap().balance, dec!(4000));
        assert_eq!(service.transactions().unwrap().latest().unwrap().id, tx.id);
        assert_eq!(
            sink.last().unwrap().message,
            "Pedido de levantamento realizado!"
        );
    }

    #[test]
    fn test_withdraw_on_saturday_is_rejected() {
        let (mut service, sink) = registered_at(18, 12);
        service.credit(Pool::Balance, dec!(5000)).unwrap();
        service.invest(1).unwrap();
        let before = service.account().unwrap().clone();
        let log_len = service.transactions().unwrap().len();

        let err = service.withdraw(dec!(150), "mpesa").unwrap_err();
        assert!(matches!(
            err,
            Error::Withdraw(WithdrawError::OutsideWindow { .. })
        ));
        assert_eq!(service.account().unwrap(), &before);
        assert_eq!(service.transactions().unwrap().len(), log_len);
        assert_eq!(
            sink.last().unwrap().message,
            "Levantamentos apenas de Seg a Sex, das 10h às 19h."
        );
    }

    #[test]
    fn test_withdraw_requires_investment() {
        let (mut service, sink) = registered_at(15, 12);
        service.credit(Pool::Balance, dec!(1000)).unwrap();
        let err = service.withdraw(dec!(200), "mpesa").unwrap_err();
        assert!(matches!(
            err,
            Error::Withdraw(WithdrawError::NoInvestmentYet)
        ));
        assert_eq!(
            sink.last().unwrap().message,
            "Deves fazer um investimento antes de levantar."
        );
    }

    #[test]
    fn test_each_operation_emits_one_notification() {
        let (mut service, sink) = registered_at(15, 12);
        service.credit(Pool::Balance, dec!(1000)).unwrap();
        let _ = service.invest(99);
        let _ = service.withdraw(dec!(10), "mpesa");
        service.deposit(dec!(300), "mpesa", None).unwrap();
        assert_eq!(sink.len(), 4);
    }

    // --- Credit ---

    #[test]
    fn test_credit_rejects_non_positive() {
        let (mut service, _) = registered_at(15, 12);
        assert!(matches!(
            service.credit(Pool::Balance, Decimal::ZERO),
            Err(Error::Validation(_))
        ));
        assert_eq!(service.account().unwrap().balance, Decimal::ZERO);
    }

    #[test]
    fn test_credit_overflow_is_rejected_and_later_operations_work() {
        let (mut service, sink) = registered_at(15, 12);
        let err = service.credit(Pool::Balance, Decimal::MAX).unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::AmountOutOfRange)
        ));
        assert_eq!(service.account().unwrap().balance, Decimal::ZERO);
        assert_eq!(sink.last().unwrap().message, "Valor demasiado alto.");

        service.credit(Pool::Balance, Decimal::MAX - dec!(100)).unwrap();
        assert!(service.credit(Pool::Balance, Decimal::MAX).is_err());
        assert!(service.credit(Pool::ReferralEarnings, dec!(1)).is_err());

        service.invest(1).unwrap();
        let account = service.account().unwrap();
        assert_eq!(account.bonus, Decimal::ZERO);
        assert_eq!(account.balance, Decimal::MAX - dec!(300));
        service.withdraw(dec!(1000), "mpesa").unwrap();
    }

    // --- Snapshots ---

    #[test]
    fn test_snapshot_restore_round_trip() {
        let (mut service, _) = registered_at(15, 12);
        service.credit(Pool::Balance, dec!(700)).unwrap();
        service.invest(2).unwrap();
        service.deposit(dec!(400), "mpesa", None).unwrap();

        let json = service.snapshot().to_json().unwrap();

        let (mut fresh, _) = service_at(16, 9);
        fresh
            .restore(LedgerSnapshot::from_json(&json).unwrap())
            .unwrap();
        assert_eq!(fresh.account(), service.account());
        assert_eq!(fresh.transactions(), service.transactions());
    }

    #[test]
    fn test_restore_rejects_negative_pools() {
        let (mut service, _) = registered_at(15, 12);
        let mut snapshot = service.snapshot();
        if let Some(state) = snapshot.state.as_mut() {
            state.account.balance = dec!(-1);
        }
        assert!(matches!(
            service.restore(snapshot),
            Err(Error::Validation(_))
        ));
        assert_eq!(service.account().unwrap().balance, Decimal::ZERO);
    }

    #[test]
    fn test_restore_rejects_unrepresentable_pools() {
        let (mut service, _) = registered_at(15, 12);
        let mut snapshot = service.snapshot();
        if let Some(state) = snapshot.state.as_mut() {
            state.account.balance = Decimal::MAX;
            state.account.referral_earnings = Decimal::MAX;
        }
        assert!(matches!(
            service.restore(snapshot),
            Err(Error::Validation(ValidationError::AmountOutOfRange))
        ));
        assert_eq!(service.account().unwrap().balance, Decimal::ZERO);
        service.credit(Pool::Balance, dec!(200)).unwrap();
        assert!(service.invest(1).is_ok());
    }

    #[test]
    fn test_new_rejects_invalid_policy() {
        let mut policy = LedgerPolicy::default();
        policy.withdraw_window.days.clear();
        let result = LedgerService::new(
            policy,
            PlanCatalog::default(),
            clock_at(15, 12, 0),
            Arc::new(MockNotificationSink::new()),
        );
        assert!(matches!(result, Err(Error::InvalidConfigValue(_))));
    }
}
