use std::borrow::Cow;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Technical-analysis indicator token.
///
/// The token doubles as the GET endpoint path segment (`/{indicator}`), so it
/// is kept as the exact lowercase string the API documents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Indicator(Cow<'static, str>);

impl Indicator {
    pub const RSI: Self = Self::token("rsi");
    pub const MACD: Self = Self::token("macd");
    pub const EMA: Self = Self::token("ema");
    pub const SMA: Self = Self::token("sma");
    pub const BBANDS: Self = Self::token("bbands");
    pub const STOCH: Self = Self::token("stoch");
    pub const STOCHRSI: Self = Self::token("stochrsi");
    pub const ATR: Self = Self::token("atr");
    pub const ADX: Self = Self::token("adx");
    pub const CCI: Self = Self::token("cci");
    pub const AROON: Self = Self::token("aroon");
    pub const MFI: Self = Self::token("mfi");
    pub const OBV: Self = Self::token("obv");
    pub const SAR: Self = Self::token("sar");
    pub const SUPERTREND: Self = Self::token("supertrend");
    pub const ICHIMOKU: Self = Self::token("ichimoku");
    pub const VWAP: Self = Self::token("vwap");
    pub const HMA: Self = Self::token("hma");
    pub const WMA: Self = Self::token("wma");
    pub const DEMA: Self = Self::token("dema");
    pub const TEMA: Self = Self::token("tema");
    pub const WILLIAMS: Self = Self::token("williams");
    pub const UO: Self = Self::token("uo");
    pub const ROC: Self = Self::token("roc");
    pub const BBP: Self = Self::token("bbp");
    pub const AO: Self = Self::token("ao");
    pub const CMF: Self = Self::token("cmf");
    pub const KELTNER: Self = Self::token("keltner");
    pub const DONCHIAN: Self = Self::token("donchian");
    pub const PIVOT: Self = Self::token("pivot");
    pub const FIBONACCI: Self = Self::token("fibonacci");
    pub const VOLUME: Self = Self::token("volume");
    pub const CANDLE: Self = Self::token("candle");

    const DOCUMENTED: [Self; 33] = [
        Self::RSI,
        Self::MACD,
        Self::EMA,
        Self::SMA,
        Self::BBANDS,
        Self::STOCH,
        Self::STOCHRSI,
        Self::ATR,
        Self::ADX,
        Self::CCI,
        Self::AROON,
        Self::MFI,
        Self::OBV,
        Self::SAR,
        Self::SUPERTREND,
        Self::ICHIMOKU,
        Self::VWAP,
        Self::HMA,
        Self::WMA,
        Self::DEMA,
        Self::TEMA,
        Self::WILLIAMS,
        Self::UO,
        Self::ROC,
        Self::BBP,
        Self::AO,
        Self::CMF,
        Self::KELTNER,
        Self::DONCHIAN,
        Self::PIVOT,
        Self::FIBONACCI,
        Self::VOLUME,
        Self::CANDLE,
    ];

    const fn token(token: &'static str) -> Self {
        Self(Cow::Borrowed(token))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this value is one of the documented indicator tokens.
    pub fn is_valid(&self) -> bool {
        Self::DOCUMENTED.iter().any(|known| known == self)
    }
}

impl Display for Indicator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Indicator {
    fn from(value: &str) -> Self {
        Self(Cow::Owned(value.to_owned()))
    }
}

impl From<String> for Indicator {
    fn from(value: String) -> Self {
        Self(Cow::Owned(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documented_indicators_are_valid() {
        for indicator in Indicator::DOCUMENTED {
            assert!(indicator.is_valid(), "{indicator} should be valid");
        }
    }

    #[test]
    fn near_miss_tokens_are_rejected() {
        for raw in ["RSI", "Macd", "bollinger", "ema200", ""] {
            assert!(!Indicator::from(raw).is_valid(), "{raw:?} should be invalid");
        }
    }

    #[test]
    fn raw_tokens_pass_through_unchanged() {
        // Forward-compatible: an undocumented token is usable, just not valid.
        let custom = Indicator::from("somenewoscillator");
        assert_eq!(custom.as_str(), "somenewoscillator");
        assert!(!custom.is_valid());
    }
}
