use chrono::Weekday;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Minimum amount accepted for a deposit request (MT)
pub const MIN_DEPOSIT: Decimal = dec!(300);

/// Minimum amount accepted for a withdrawal request (MT)
pub const MIN_WITHDRAWAL: Decimal = dec!(150);

/// Non-withdrawable bonus credited on registration (MT)
pub const WELCOME_BONUS: Decimal = dec!(100);

/// Share of a referred user's activity paid to the referrer.
///
/// Declared for completeness; no accrual path reads it. Referral earnings are
/// credited from outside the engine.
pub const REFERRAL_PERCENTAGE: Decimal = dec!(0.20);

/// Top-up applied by the demo command when demo mode is enabled (MT)
pub const DEMO_CREDIT: Decimal = dec!(5000);

/// First hour (inclusive) of the withdrawal window, local time
pub const WITHDRAW_WINDOW_START_HOUR: u32 = 10;

/// Hour (exclusive) at which the withdrawal window closes, local time
pub const WITHDRAW_WINDOW_END_HOUR: u32 = 19;

/// Business days on which withdrawals may be requested
pub const WITHDRAW_WINDOW_DAYS: [Weekday; 5] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
];

/// Display symbol for amounts
pub const CURRENCY_SYMBOL: &str = "MT";

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Id prefixes for generated records
pub mod id_prefixes {
    pub const BONUS: &str = "tx";
    pub const DEPOSIT: &str = "dep";
    pub const WITHDRAWAL: &str = "wd";
    pub const ACTIVE_PLAN: &str = "plan";
}
