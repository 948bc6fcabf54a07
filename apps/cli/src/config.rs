use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, Context};
use chrono_tz::Tz;
use planledger_core::payments::{PaymentChannel, PaymentMethods, EMOLA, MPESA};
use planledger_core::utils::{parse_tz, DEFAULT_LEDGER_TZ};
use planledger_core::LedgerPolicy;
use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

pub struct Config {
    pub policy: LedgerPolicy,
    pub tz: Tz,
    pub snapshot_path: Option<PathBuf>,
    pub log_format: LogFormat,
    pub demo: bool,
    pub payment_methods: PaymentMethods,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut policy = LedgerPolicy::default();
        if let Some(v) = var("PLANLEDGER_MIN_DEPOSIT") {
            policy.min_deposit = parse_decimal("PLANLEDGER_MIN_DEPOSIT", &v)?;
        }
        if let Some(v) = var("PLANLEDGER_MIN_WITHDRAWAL") {
            policy.min_withdrawal = parse_decimal("PLANLEDGER_MIN_WITHDRAWAL", &v)?;
        }
        if let Some(v) = var("PLANLEDGER_WELCOME_BONUS") {
            policy.welcome_bonus = parse_decimal("PLANLEDGER_WELCOME_BONUS", &v)?;
        }
        if let Some(v) = var("PLANLEDGER_WINDOW_START_HOUR") {
            policy.withdraw_window.start_hour = v
                .trim()
                .parse()
                .with_context(|| format!("Invalid PLANLEDGER_WINDOW_START_HOUR '{}'", v))?;
        }
        if let Some(v) = var("PLANLEDGER_WINDOW_END_HOUR") {
            policy.withdraw_window.end_hour = v
                .trim()
                .parse()
                .with_context(|| format!("Invalid PLANLEDGER_WINDOW_END_HOUR '{}'", v))?;
        }
        policy.validate()?;

        let tz = match var("PLANLEDGER_TZ") {
            Some(name) => parse_tz(&name).ok_or_else(|| anyhow!("Invalid PLANLEDGER_TZ '{}'", name))?,
            None => DEFAULT_LEDGER_TZ,
        };

        let log_format = match var("PLANLEDGER_LOG_FORMAT") {
            Some(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        let demo = var("PLANLEDGER_DEMO")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let mut payment_methods = PaymentMethods::default();
        for key in [MPESA, EMOLA] {
            let upper = key.to_ascii_uppercase();
            let number = var(&format!("PLANLEDGER_{}_NUMBER", upper));
            let owner = var(&format!("PLANLEDGER_{}_OWNER", upper));
            if number.is_none() && owner.is_none() {
                continue;
            }
            if let Some(current) = payment_methods.get(key).cloned() {
                payment_methods.set(
                    key,
                    PaymentChannel {
                        name: current.name,
                        number: number.unwrap_or(current.number),
                        owner: owner.unwrap_or(current.owner),
                    },
                );
            }
        }

        Ok(Self {
            policy,
            tz,
            snapshot_path: var("PLANLEDGER_SNAPSHOT_PATH").map(PathBuf::from),
            log_format,
            demo,
            payment_methods,
        })
    }
}

fn parse_decimal(key: &str, value: &str) -> anyhow::Result<Decimal> {
    Decimal::from_str(value.trim()).with_context(|| format!("Invalid {} '{}'", key, value))
}
