//! Fluent request builders.
//!
//! Each builder is a single-shot accumulator: configure in any order (later
//! setters overwrite earlier ones), then finalize with `get()`/`execute()`,
//! which validates the required fields and issues exactly one HTTP call.
//!
//! Parameter bags are pass-through: keys like `period` or `backtrack` are
//! forwarded verbatim without checking them against the indicator's accepted
//! parameter set, by upstream design.

use serde_json::{Map, Value};

use crate::client::Client;
use crate::domain::{Candle, Exchange, Indicator, Interval};
use crate::error::Error;
use crate::response::{BulkResponse, IndicatorResponse};

/// Builds a direct single-indicator GET request.
///
/// Requires exchange, symbol, interval and indicator; everything else rides
/// in the free-form parameter bag.
#[derive(Debug, Clone)]
pub struct DirectBuilder<'a> {
    client: &'a Client,
    exchange: String,
    symbol: String,
    interval: String,
    indicator: String,
    params: Map<String, Value>,
}

impl<'a> DirectBuilder<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self {
            client,
            exchange: String::new(),
            symbol: String::new(),
            interval: String::new(),
            indicator: String::new(),
            params: Map::new(),
        }
    }

    pub fn exchange(mut self, exchange: Exchange) -> Self {
        self.exchange = exchange.as_str().to_owned();
        self
    }

    pub fn symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = symbol.into();
        self
    }

    pub fn interval(mut self, interval: Interval) -> Self {
        self.interval = interval.as_str().to_owned();
        self
    }

    pub fn indicator(mut self, indicator: Indicator) -> Self {
        self.indicator = indicator.as_str().to_owned();
        self
    }

    /// Adds one free-form query parameter.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Merges a set of free-form query parameters.
    pub fn params(mut self, params: Map<String, Value>) -> Self {
        self.params.extend(params);
        self
    }

    /// How many candles back the single returned value should be taken from.
    pub fn backtrack(self, backtrack: u32) -> Self {
        self.param("backtrack", backtrack)
    }

    /// How many historical values to return in one response.
    pub fn backtracks(self, backtracks: u32) -> Self {
        self.param("backtracks", backtracks)
    }

    /// Validates the required fields and performs the GET.
    ///
    /// Fails with [`Error::InvalidArgument`] naming the first missing field,
    /// checked in the order exchange, symbol, interval, indicator.
    pub async fn get(self) -> Result<IndicatorResponse, Error> {
        self.validate()?;

        let mut params = Map::new();
        params.insert(String::from("exchange"), Value::String(self.exchange));
        params.insert(String::from("symbol"), Value::String(self.symbol));
        params.insert(String::from("interval"), Value::String(self.interval));
        params.extend(self.params);

        self.client.get_indicator(&self.indicator, params).await
    }

    fn validate(&self) -> Result<(), Error> {
        if self.exchange.is_empty() {
            return Err(Error::invalid_argument("exchange is required"));
        }
        if self.symbol.is_empty() {
            return Err(Error::invalid_argument("symbol is required"));
        }
        if self.interval.is_empty() {
            return Err(Error::invalid_argument("interval is required"));
        }
        if self.indicator.is_empty() {
            return Err(Error::invalid_argument("indicator is required"));
        }
        Ok(())
    }
}

/// Builds one construct of a bulk request: a market (exchange, symbol,
/// interval) plus an ordered list of indicator entries.
///
/// A construct is never executed on its own; it is added to a
/// [`BulkBuilder`].
#[derive(Debug, Clone)]
pub struct ConstructBuilder {
    exchange: String,
    symbol: String,
    interval: String,
    indicators: Vec<Map<String, Value>>,
}

impl ConstructBuilder {
    pub fn new(exchange: Exchange, symbol: impl Into<String>, interval: Interval) -> Self {
        Self {
            exchange: exchange.as_str().to_owned(),
            symbol: symbol.into(),
            interval: interval.as_str().to_owned(),
            indicators: Vec::new(),
        }
    }

    /// Appends an indicator entry. `params` typically carries an `id` for
    /// response lookup and indicator tuning like `period`; it is forwarded
    /// unvalidated.
    pub fn add_indicator(mut self, indicator: Indicator, params: Map<String, Value>) -> Self {
        let mut entry = Map::new();
        entry.insert(
            String::from("indicator"),
            Value::String(indicator.as_str().to_owned()),
        );
        entry.extend(params);
        self.indicators.push(entry);
        self
    }

    /// Finalizes the construct into the wire map embedded in a bulk payload.
    ///
    /// Fails with [`Error::InvalidArgument`] when no indicator was added.
    pub fn to_map(&self) -> Result<Map<String, Value>, Error> {
        if self.indicators.is_empty() {
            return Err(Error::invalid_argument("at least one indicator is required"));
        }

        let mut map = Map::new();
        map.insert(String::from("exchange"), Value::String(self.exchange.clone()));
        map.insert(String::from("symbol"), Value::String(self.symbol.clone()));
        map.insert(String::from("interval"), Value::String(self.interval.clone()));
        map.insert(
            String::from("indicators"),
            Value::Array(self.indicators.iter().cloned().map(Value::Object).collect()),
        );
        Ok(map)
    }
}

/// Builds a bulk POST request out of finalized constructs.
#[derive(Debug, Clone)]
pub struct BulkBuilder<'a> {
    client: &'a Client,
    constructs: Vec<Map<String, Value>>,
}

impl<'a> BulkBuilder<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self {
            client,
            constructs: Vec::new(),
        }
    }

    /// Finalizes and appends a construct.
    ///
    /// An invalid construct (no indicators) surfaces here as
    /// [`Error::InvalidArgument`] rather than being dropped, so a bulk
    /// request can never silently lose a market the caller asked for.
    pub fn add_construct(mut self, construct: &ConstructBuilder) -> Result<Self, Error> {
        self.constructs.push(construct.to_map()?);
        Ok(self)
    }

    /// POSTs `{construct: [...]}` to `/bulk`.
    ///
    /// Fails with [`Error::InvalidArgument`] when no construct was added.
    pub async fn execute(self) -> Result<BulkResponse, Error> {
        if self.constructs.is_empty() {
            return Err(Error::invalid_argument("at least one construct is required"));
        }

        let mut payload = Map::new();
        payload.insert(
            String::from("construct"),
            Value::Array(self.constructs.into_iter().map(Value::Object).collect()),
        );

        self.client.post_bulk(payload).await
    }
}

/// Builds a `/manual` POST request: an indicator computed over
/// caller-supplied candles instead of exchange data.
#[derive(Debug, Clone)]
pub struct ManualBuilder<'a> {
    client: &'a Client,
    indicator: String,
    candles: Vec<Value>,
    params: Map<String, Value>,
}

impl<'a> ManualBuilder<'a> {
    pub(crate) fn new(client: &'a Client, indicator: Indicator) -> Self {
        Self {
            client,
            indicator: indicator.as_str().to_owned(),
            candles: Vec::new(),
            params: Map::new(),
        }
    }

    /// Sets the candle series from typed records, preserving order.
    pub fn candles(mut self, candles: &[Candle]) -> Self {
        self.candles = candles.iter().map(Candle::to_value).collect();
        self
    }

    /// Sets the candle series from raw wire arrays
    /// (`[timestamp, open, high, low, close, volume]` each).
    pub fn raw_candles(mut self, candles: Vec<Value>) -> Self {
        self.candles = candles;
        self
    }

    /// Adds one free-form body parameter.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Merges a set of free-form body parameters.
    pub fn params(mut self, params: Map<String, Value>) -> Self {
        self.params.extend(params);
        self
    }

    /// POSTs `{indicator, candles, ...params}` to `/manual`.
    ///
    /// Fails with [`Error::InvalidArgument`] when no candles were supplied.
    pub async fn execute(self) -> Result<IndicatorResponse, Error> {
        if self.candles.is_empty() {
            return Err(Error::invalid_argument("candles are required"));
        }

        let mut payload = Map::new();
        payload.insert(String::from("indicator"), Value::String(self.indicator));
        payload.insert(String::from("candles"), Value::Array(self.candles));
        payload.extend(self.params);

        self.client.post_indicator("/manual", payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client() -> Client {
        Client::new("test_secret")
    }

    #[tokio::test]
    async fn direct_builder_reports_first_missing_field_in_order() {
        let client = client();

        let error = client.direct().get().await.expect_err("nothing set");
        assert_eq!(error.to_string(), "invalid argument: exchange is required");

        let error = client
            .direct()
            .exchange(Exchange::BINANCE)
            .get()
            .await
            .expect_err("symbol missing");
        assert_eq!(error.to_string(), "invalid argument: symbol is required");

        let error = client
            .direct()
            .exchange(Exchange::BINANCE)
            .symbol("BTC/USDT")
            .get()
            .await
            .expect_err("interval missing");
        assert_eq!(error.to_string(), "invalid argument: interval is required");

        let error = client
            .direct()
            .exchange(Exchange::BINANCE)
            .symbol("BTC/USDT")
            .interval(Interval::HOUR_1)
            .get()
            .await
            .expect_err("indicator missing");
        assert_eq!(error.to_string(), "invalid argument: indicator is required");
    }

    #[test]
    fn direct_builder_later_params_overwrite_earlier_ones() {
        let client = client();
        let builder = client
            .direct()
            .param("period", 14)
            .param("period", 21)
            .backtrack(5);

        assert_eq!(builder.params.get("period"), Some(&json!(21)));
        assert_eq!(builder.params.get("backtrack"), Some(&json!(5)));
    }

    #[test]
    fn construct_to_map_requires_an_indicator() {
        let construct = ConstructBuilder::new(Exchange::BINANCE, "BTC/USDT", Interval::HOUR_1);

        let error = construct.to_map().expect_err("no indicators");
        assert_eq!(
            error.to_string(),
            "invalid argument: at least one indicator is required"
        );
    }

    #[test]
    fn construct_to_map_embeds_indicators_in_addition_order() {
        let construct = ConstructBuilder::new(Exchange::BINANCE, "BTC/USDT", Interval::HOUR_1)
            .add_indicator(
                Indicator::RSI,
                Map::from_iter([
                    (String::from("period"), json!(14)),
                    (String::from("id"), json!("rsi_1")),
                ]),
            )
            .add_indicator(
                Indicator::MACD,
                Map::from_iter([(String::from("id"), json!("macd_1"))]),
            );

        let map = construct.to_map().expect("valid construct");
        assert_eq!(map.get("exchange"), Some(&json!("binance")));
        assert_eq!(map.get("symbol"), Some(&json!("BTC/USDT")));
        assert_eq!(map.get("interval"), Some(&json!("1h")));

        let indicators = map
            .get("indicators")
            .and_then(Value::as_array)
            .expect("indicators array");
        assert_eq!(indicators.len(), 2);
        assert_eq!(indicators[0]["indicator"], json!("rsi"));
        assert_eq!(indicators[0]["id"], json!("rsi_1"));
        assert_eq!(indicators[1]["indicator"], json!("macd"));
    }

    #[test]
    fn bulk_add_construct_propagates_invalid_constructs() {
        let client = client();
        let empty = ConstructBuilder::new(Exchange::BINANCE, "BTC/USDT", Interval::HOUR_1);

        let result = client.bulk().add_construct(&empty);
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn bulk_execute_requires_a_construct() {
        let client = client();

        let error = client.bulk().execute().await.expect_err("empty bulk");
        assert_eq!(
            error.to_string(),
            "invalid argument: at least one construct is required"
        );
    }

    #[tokio::test]
    async fn manual_execute_requires_candles() {
        let client = client();

        let error = client
            .manual(Indicator::EMA)
            .param("period", 50)
            .execute()
            .await
            .expect_err("no candles");
        assert_eq!(error.to_string(), "invalid argument: candles are required");
    }

    #[test]
    fn manual_candle_structs_convert_in_order() {
        let client = client();
        let candles = [
            Candle::new(1_609_459_200, 28_923.63, 28_923.63, 28_923.63, 28_923.63, 0.0),
            Candle::new(1_609_462_800, 29_083.37, 29_188.78, 28_963.64, 29_103.37, 1_107.05),
        ];

        let builder = client.manual(Indicator::EMA).candles(&candles);

        assert_eq!(builder.candles.len(), 2);
        assert_eq!(builder.candles[0][0], json!(1_609_459_200));
        assert_eq!(builder.candles[1][4], json!(29_103.37));
    }
}
