//! Domain vocabulary: the string-token identifier types accepted by the
//! upstream API (exchange, interval, indicator) and the OHLCV candle record.
//!
//! The identifier types are deliberately *not* closed enums. They wrap the
//! literal wire token, expose the documented set as associated constants, and
//! answer `is_valid()` by exact membership — so a caller can still reach a
//! token the API added after this crate shipped, at the cost of skipping the
//! static check.

mod candle;
mod exchange;
mod indicator;
mod interval;

pub use candle::Candle;
pub use exchange::Exchange;
pub use indicator::Indicator;
pub use interval::Interval;
