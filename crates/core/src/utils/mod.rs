pub mod time_utils;

pub use time_utils::{parse_tz, Clock, FixedClock, SystemClock, DEFAULT_LEDGER_TZ};
