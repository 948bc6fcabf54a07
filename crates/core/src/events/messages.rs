//! Portuguese (Mozambique) notification texts.

use chrono::Weekday;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::accounts::Pool;
use crate::constants::{CURRENCY_SYMBOL, DISPLAY_DECIMAL_PRECISION};
use crate::errors::{DepositError, Error, InvestError, ValidationError, WithdrawError};

/// Formats an amount the way the app displays it: `5.000 MT`, `1.234,50 MT`.
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(
        DISPLAY_DECIMAL_PRECISION,
        RoundingStrategy::MidpointAwayFromZero,
    );
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let abs = rounded.abs();
    let integer = abs.trunc();
    let fraction = abs - integer;

    let digits = integer.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if !fraction.is_zero() {
        let cents = (fraction * Decimal::from(100)).trunc().to_u32().unwrap_or(0);
        out.push_str(&format!(",{:02}", cents));
    }
    out.push(' ');
    out.push_str(CURRENCY_SYMBOL);
    out
}

fn weekday_abbrev(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Seg",
        Weekday::Tue => "Ter",
        Weekday::Wed => "Qua",
        Weekday::Thu => "Qui",
        Weekday::Fri => "Sex",
        Weekday::Sat => "Sáb",
        Weekday::Sun => "Dom",
    }
}

/// Describes a day set as a range when contiguous ("Seg a Sex"), else a list.
pub fn describe_days(days: &[Weekday]) -> String {
    let mut sorted: Vec<Weekday> = days.to_vec();
    sorted.sort_by_key(|d| d.num_days_from_monday());
    sorted.dedup();

    let contiguous = sorted
        .windows(2)
        .all(|w| w[1].num_days_from_monday() == w[0].num_days_from_monday() + 1);

    match sorted.as_slice() {
        [] => String::new(),
        [only] => weekday_abbrev(*only).to_string(),
        [first, .., last] if contiguous => {
            format!("{} a {}", weekday_abbrev(*first), weekday_abbrev(*last))
        }
        _ => sorted
            .iter()
            .map(|d| weekday_abbrev(*d))
            .collect::<Vec<_>>()
            .join(", "),
    }
}

fn pool_label(pool: Pool) -> &'static str {
    match pool {
        Pool::Balance => "saldo",
        Pool::Bonus => "bónus",
        Pool::ReferralEarnings => "ganhos de convite",
    }
}

pub fn welcome(bonus: Decimal) -> String {
    format!("Bem-vindo! Recebeste {} de bónus.", format_amount(bonus))
}

pub fn deposit_submitted() -> String {
    "Depósito enviado para aprovação manual.".to_string()
}

pub fn withdrawal_submitted() -> String {
    "Pedido de levantamento realizado!".to_string()
}

pub fn investment_completed(plan_name: &str) -> String {
    format!("Investimento no plano {} realizado com sucesso!", plan_name)
}

pub fn credit_applied(pool: Pool, amount: Decimal) -> String {
    format!("{} adicionados ao {}.", format_amount(amount), pool_label(pool))
}

pub fn session_closed() -> String {
    "Sessão terminada.".to_string()
}

/// Maps a rejection to the message shown to the user.
pub fn rejection(err: &Error) -> String {
    match err {
        Error::Deposit(DepositError::BelowMinimum { minimum, .. }) => {
            format!("O depósito mínimo é de {}.", format_amount(*minimum))
        }
        Error::Deposit(DepositError::DuplicateReference(_)) => {
            "Esta referência já foi usada.".to_string()
        }
        Error::Withdraw(WithdrawError::OutsideWindow {
            days,
            start_hour,
            end_hour,
        }) => format!(
            "Levantamentos apenas de {}, das {}h às {}h.",
            describe_days(days),
            start_hour,
            end_hour
        ),
        Error::Withdraw(WithdrawError::BelowMinimum { minimum, .. }) => {
            format!("Mínimo para levantamento é {}", format_amount(*minimum))
        }
        Error::Withdraw(WithdrawError::NoInvestmentYet) => {
            "Deves fazer um investimento antes de levantar.".to_string()
        }
        Error::Withdraw(WithdrawError::InsufficientFunds { .. }) => "Saldo insuficiente.".to_string(),
        Error::Invest(InvestError::InsufficientFunds { .. }) => {
            "Saldo insuficiente. Por favor faz um depósito.".to_string()
        }
        Error::Invest(InvestError::UnknownPlan(_)) => "Plano não encontrado.".to_string(),
        Error::NoActiveSession => "Inicia sessão para continuar.".to_string(),
        Error::Validation(ValidationError::AmountOutOfRange) => {
            "Valor demasiado alto.".to_string()
        }
        other => format!("Pedido inválido: {}", other),
    }
}
