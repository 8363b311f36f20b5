use serde::ser::SerializeTuple;
use serde::{Serialize, Serializer};
use serde_json::{json, Value};

/// One OHLCV price bar, as submitted to the `/manual` endpoint.
///
/// On the wire a candle is the fixed-order array
/// `[timestamp, open, high, low, close, volume]` with the timestamp in unix
/// seconds; construction does not validate price relationships because the
/// upstream API accepts whatever series the caller supplies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candle {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    pub const fn new(
        timestamp: i64,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// The wire representation as a JSON array.
    pub fn to_value(&self) -> Value {
        json!([
            self.timestamp,
            self.open,
            self.high,
            self.low,
            self.close,
            self.volume
        ])
    }
}

impl Serialize for Candle {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_tuple(6)?;
        seq.serialize_element(&self.timestamp)?;
        seq.serialize_element(&self.open)?;
        seq.serialize_element(&self.high)?;
        seq.serialize_element(&self.low)?;
        seq.serialize_element(&self.close)?;
        seq.serialize_element(&self.volume)?;
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_format_preserves_field_order() {
        let candle = Candle::new(1_609_459_200, 28_923.63, 29_000.0, 28_800.0, 28_950.5, 1_107.05);

        let value = candle.to_value();
        let array = value.as_array().expect("candle serializes to an array");
        assert_eq!(array.len(), 6);
        assert_eq!(array[0], json!(1_609_459_200));
        assert_eq!(array[1], json!(28_923.63));
        assert_eq!(array[2], json!(29_000.0));
        assert_eq!(array[3], json!(28_800.0));
        assert_eq!(array[4], json!(28_950.5));
        assert_eq!(array[5], json!(1_107.05));
    }

    #[test]
    fn serde_matches_to_value() {
        let candle = Candle::new(1_609_462_800, 29_083.37, 29_188.78, 28_963.64, 29_103.37, 0.0);

        let via_serde = serde_json::to_value(candle).expect("serialize");
        assert_eq!(via_serde, candle.to_value());
    }
}
