use std::borrow::Cow;
use std::fmt::{Display, Formatter};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Candle timeframe token (`1m` through `1w`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Interval(Cow<'static, str>);

impl Interval {
    pub const MIN_1: Self = Self::token("1m");
    pub const MIN_5: Self = Self::token("5m");
    pub const MIN_15: Self = Self::token("15m");
    pub const MIN_30: Self = Self::token("30m");
    pub const HOUR_1: Self = Self::token("1h");
    pub const HOUR_2: Self = Self::token("2h");
    pub const HOUR_4: Self = Self::token("4h");
    pub const HOUR_12: Self = Self::token("12h");
    pub const DAY_1: Self = Self::token("1d");
    pub const WEEK_1: Self = Self::token("1w");

    const DOCUMENTED: [Self; 10] = [
        Self::MIN_1,
        Self::MIN_5,
        Self::MIN_15,
        Self::MIN_30,
        Self::HOUR_1,
        Self::HOUR_2,
        Self::HOUR_4,
        Self::HOUR_12,
        Self::DAY_1,
        Self::WEEK_1,
    ];

    const fn token(token: &'static str) -> Self {
        Self(Cow::Borrowed(token))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this value is one of the documented interval tokens.
    pub fn is_valid(&self) -> bool {
        Self::DOCUMENTED.iter().any(|known| known == self)
    }

    /// Span of one candle at this interval.
    ///
    /// Total over all strings: tokens outside the documented set map to
    /// [`Duration::ZERO`] rather than failing.
    pub fn duration(&self) -> Duration {
        const MINUTE: u64 = 60;
        const HOUR: u64 = 60 * MINUTE;
        const DAY: u64 = 24 * HOUR;

        let seconds = match self.as_str() {
            "1m" => MINUTE,
            "5m" => 5 * MINUTE,
            "15m" => 15 * MINUTE,
            "30m" => 30 * MINUTE,
            "1h" => HOUR,
            "2h" => 2 * HOUR,
            "4h" => 4 * HOUR,
            "12h" => 12 * HOUR,
            "1d" => DAY,
            "1w" => 7 * DAY,
            _ => 0,
        };
        Duration::from_secs(seconds)
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Interval {
    fn from(value: &str) -> Self {
        Self(Cow::Owned(value.to_owned()))
    }
}

impl From<String> for Interval {
    fn from(value: String) -> Self {
        Self(Cow::Owned(value))
    }
}
