//! Typed wrappers over the API's heterogeneous JSON responses.
//!
//! Every indicator returns a different object shape (`rsi` has a scalar
//! `value`, `macd` has `valueMACD`/`valueMACDSignal`/`valueMACDHist`, and so
//! on), so the response models keep an open data bag of
//! [`serde_json::Value`]s behind the well-known `indicator`/`id` envelope
//! fields and offer typed accessors that signal absence instead of panicking.

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Response for a single indicator request (direct GET or `/manual` POST),
/// and one element of a bulk response.
///
/// `indicator` and `id` are pulled out of the raw object when present *as
/// strings*; everything else stays in `data` untouched. Serializing merges
/// them back, so decode→encode reproduces the original key/value set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndicatorResponse {
    /// Indicator name echoed by the server, when present.
    pub indicator: Option<String>,
    /// Caller-assigned id echoed by bulk responses, when present.
    pub id: Option<String>,
    /// All remaining top-level fields of the response object.
    pub data: Map<String, Value>,
}

impl IndicatorResponse {
    /// The main result of the indicator.
    ///
    /// Returns the `value` field when the indicator has a single scalar
    /// output; indicators without one (MACD, bbands, ...) get the entire
    /// data bag so callers can pick their fields.
    pub fn value(&self) -> Value {
        match self.data.get("value") {
            Some(value) => value.clone(),
            None => Value::Object(self.data.clone()),
        }
    }

    /// A raw field of the data bag.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// A numeric field of the data bag, `None` on absence or type mismatch.
    pub fn get_float(&self, key: &str) -> Option<f64> {
        self.data.get(key).and_then(Value::as_f64)
    }

    /// A string field of the data bag, `None` on absence or type mismatch.
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(Value::as_str)
    }

    /// Whether the data bag contains `key`.
    pub fn has(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    pub(crate) fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }
}

impl<'de> Deserialize<'de> for IndicatorResponse {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut data = Map::<String, Value>::deserialize(deserializer)?;
        let indicator = take_string(&mut data, "indicator");
        let id = take_string(&mut data, "id");
        Ok(Self {
            indicator,
            id,
            data,
        })
    }
}

impl Serialize for IndicatorResponse {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut merged = self.data.clone();
        if let Some(indicator) = non_empty(&self.indicator) {
            merged.insert(String::from("indicator"), Value::String(indicator.to_owned()));
        }
        if let Some(id) = non_empty(&self.id) {
            merged.insert(String::from("id"), Value::String(id.to_owned()));
        }
        merged.serialize(serializer)
    }
}

/// Removes `key` from the map when its value is a JSON string.
///
/// Non-string values stay in the bag: the envelope fields are only claimed
/// for their intended role.
fn take_string(map: &mut Map<String, Value>, key: &str) -> Option<String> {
    if matches!(map.get(key), Some(Value::String(_))) {
        match map.remove(key) {
            Some(Value::String(value)) => Some(value),
            _ => None,
        }
    } else {
        None
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}

/// Response of the `/bulk` endpoint: an ordered list of per-indicator
/// responses.
///
/// Decoding is best-effort per element: an entry that is not a JSON object
/// is dropped and the rest of the batch survives. A body that is not a JSON
/// array at all fails the whole decode.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BulkResponse {
    pub responses: Vec<IndicatorResponse>,
}

impl BulkResponse {
    /// The first response whose `id` equals `id`, if any.
    pub fn find_by_id(&self, id: &str) -> Option<&IndicatorResponse> {
        self.responses
            .iter()
            .find(|response| response.id.as_deref() == Some(id))
    }

    /// All responses for `indicator`, in original order.
    pub fn filter_by_indicator(&self, indicator: &str) -> Vec<&IndicatorResponse> {
        self.responses
            .iter()
            .filter(|response| response.indicator.as_deref() == Some(indicator))
            .collect()
    }

    pub fn count(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, IndicatorResponse> {
        self.responses.iter()
    }

    pub(crate) fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }
}

impl<'de> Deserialize<'de> for BulkResponse {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Vec::<Value>::deserialize(deserializer)?;
        let responses = raw
            .into_iter()
            .filter_map(|element| serde_json::from_value::<IndicatorResponse>(element).ok())
            .collect();
        Ok(Self { responses })
    }
}

impl<'a> IntoIterator for &'a BulkResponse {
    type Item = &'a IndicatorResponse;
    type IntoIter = std::slice::Iter<'a, IndicatorResponse>;

    fn into_iter(self) -> Self::IntoIter {
        self.responses.iter()
    }
}
