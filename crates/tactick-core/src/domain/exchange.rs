use std::borrow::Cow;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Exchange identifier accepted by the upstream API.
///
/// The documented set lives in the associated constants; [`Exchange::is_valid`]
/// checks exact membership. Any other string is still constructible through
/// the `From` impls so callers can target exchanges the API added after this
/// crate was published.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Exchange(Cow<'static, str>);

impl Exchange {
    pub const BINANCE: Self = Self::token("binance");
    pub const BINANCE_US: Self = Self::token("binanceus");
    pub const BINANCE_USDM: Self = Self::token("binanceusdm");
    pub const BITFINEX: Self = Self::token("bitfinex");
    pub const BITGET: Self = Self::token("bitget");
    pub const BITMEX: Self = Self::token("bitmex");
    pub const BITSTAMP: Self = Self::token("bitstamp");
    pub const BYBIT: Self = Self::token("bybit");
    pub const COINBASE: Self = Self::token("coinbase");
    pub const CRYPTO_COM: Self = Self::token("cryptocom");
    pub const GATE_IO: Self = Self::token("gateio");
    pub const HUOBI: Self = Self::token("huobi");
    pub const KRAKEN: Self = Self::token("kraken");
    pub const KUCOIN: Self = Self::token("kucoin");
    pub const MEXC: Self = Self::token("mexc");
    pub const OKX: Self = Self::token("okx");
    pub const PHEMEX: Self = Self::token("phemex");
    pub const POLONIEX: Self = Self::token("poloniex");

    const DOCUMENTED: [Self; 18] = [
        Self::BINANCE,
        Self::BINANCE_US,
        Self::BINANCE_USDM,
        Self::BITFINEX,
        Self::BITGET,
        Self::BITMEX,
        Self::BITSTAMP,
        Self::BYBIT,
        Self::COINBASE,
        Self::CRYPTO_COM,
        Self::GATE_IO,
        Self::HUOBI,
        Self::KRAKEN,
        Self::KUCOIN,
        Self::MEXC,
        Self::OKX,
        Self::PHEMEX,
        Self::POLONIEX,
    ];

    const fn token(token: &'static str) -> Self {
        Self(Cow::Borrowed(token))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this value is one of the documented exchange tokens.
    pub fn is_valid(&self) -> bool {
        Self::DOCUMENTED.iter().any(|known| known == self)
    }
}

impl Display for Exchange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Exchange {
    fn from(value: &str) -> Self {
        Self(Cow::Owned(value.to_owned()))
    }
}

impl From<String> for Exchange {
    fn from(value: String) -> Self {
        Self(Cow::Owned(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documented_exchanges_are_valid() {
        for exchange in Exchange::DOCUMENTED {
            assert!(exchange.is_valid(), "{exchange} should be valid");
        }
    }

    #[test]
    fn near_miss_tokens_are_rejected() {
        for raw in ["Binance", "BINANCE", "binnance", "gate.io", "okex", ""] {
            assert!(!Exchange::from(raw).is_valid(), "{raw:?} should be invalid");
        }
    }

    #[test]
    fn display_matches_wire_token() {
        assert_eq!(Exchange::CRYPTO_COM.to_string(), "cryptocom");
        assert_eq!(Exchange::BINANCE_USDM.as_str(), "binanceusdm");
    }

    #[test]
    fn serde_round_trips_plain_string() {
        let json = serde_json::to_string(&Exchange::KRAKEN).expect("serialize");
        assert_eq!(json, "\"kraken\"");

        let parsed: Exchange = serde_json::from_str("\"kucoin\"").expect("deserialize");
        assert_eq!(parsed, Exchange::KUCOIN);
    }
}
