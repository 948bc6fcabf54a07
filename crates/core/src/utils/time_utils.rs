use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Default timezone for the withdrawal window.
/// Mobile-money operating hours are published in Mozambique local time.
pub const DEFAULT_LEDGER_TZ: Tz = chrono_tz::Africa::Maputo;

/// Source of "now" for operations that depend on wall-clock time.
///
/// The zoned value drives the withdrawal window; records store its UTC instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Tz>;
}

/// Reads the system clock and projects it into a fixed zone.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    tz: Tz,
}

impl SystemClock {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    pub fn tz(&self) -> Tz {
        self.tz
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new(DEFAULT_LEDGER_TZ)
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Tz> {
        Utc::now().with_timezone(&self.tz)
    }
}

/// Always returns the same instant. Used by tests and replays.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Tz>,
}

impl FixedClock {
    pub fn new(now: DateTime<Tz>) -> Self {
        Self { now }
    }

    /// Builds a clock from a local wall-clock time in the given zone.
    ///
    /// Ambiguous local times (DST fold) resolve to the earlier instant.
    /// Returns None for local times skipped by a DST gap.
    pub fn at_local(tz: Tz, local: NaiveDateTime) -> Option<Self> {
        tz.from_local_datetime(&local).earliest().map(Self::new)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Tz> {
        self.now
    }
}

/// Parses an IANA zone name such as "Africa/Maputo".
pub fn parse_tz(name: &str) -> Option<Tz> {
    name.trim().parse::<Tz>().ok()
}
