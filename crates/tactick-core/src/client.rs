//! API client: credential handling, request execution and response
//! classification.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde_json::{Map, Value};

use crate::builders::{BulkBuilder, ConstructBuilder, DirectBuilder, ManualBuilder};
use crate::domain::{Exchange, Indicator, Interval};
use crate::error::Error;
use crate::response::{BulkResponse, IndicatorResponse};
use crate::transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, TransportError};

/// Default API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.taapi.io";

/// Environment variable consulted by [`Client::from_env`].
pub const SECRET_ENV_VAR: &str = "TACTICK_SECRET";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Entry point for all requests.
///
/// Holds the API secret and transport configuration; every builder borrows
/// the client and issues exactly one call on finalize. A configured client is
/// safe to share across tasks for independent calls — each call allocates its
/// own request and response state.
#[derive(Clone)]
pub struct Client {
    secret: String,
    base_url: String,
    timeout: Duration,
    transport: Arc<dyn HttpTransport>,
}

impl fmt::Debug for Client {
    // The secret is deliberately left out.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Creates a client with the default endpoint and a 30 second timeout.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            base_url: String::from(DEFAULT_BASE_URL),
            timeout: DEFAULT_TIMEOUT,
            transport: Arc::new(ReqwestTransport::new()),
        }
    }

    /// Creates a client from the `TACTICK_SECRET` environment variable.
    pub fn from_env() -> Result<Self, Error> {
        let secret = std::env::var(SECRET_ENV_VAR)
            .map_err(|_| Error::invalid_argument(format!("{SECRET_ENV_VAR} is not set")))?;
        Ok(Self::new(secret))
    }

    /// Overrides the API endpoint (primarily for testing).
    pub fn set_base_url(&mut self, base_url: impl Into<String>) -> &mut Self {
        let base_url = base_url.into();
        self.base_url = base_url.trim_end_matches('/').to_owned();
        self
    }

    /// Overrides the per-request timeout.
    pub fn set_timeout(&mut self, timeout: Duration) -> &mut Self {
        self.timeout = timeout;
        self
    }

    /// Swaps the HTTP transport, e.g. for a scripted test double.
    pub fn with_transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = transport;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Starts an empty direct request.
    pub fn direct(&self) -> DirectBuilder<'_> {
        DirectBuilder::new(self)
    }

    /// Starts a direct request pre-seeded with an exchange.
    pub fn exchange(&self, exchange: Exchange) -> DirectBuilder<'_> {
        self.direct().exchange(exchange)
    }

    /// Starts a direct request pre-seeded with a symbol.
    pub fn symbol(&self, symbol: impl Into<String>) -> DirectBuilder<'_> {
        self.direct().symbol(symbol)
    }

    /// Starts a direct request pre-seeded with an interval.
    pub fn interval(&self, interval: Interval) -> DirectBuilder<'_> {
        self.direct().interval(interval)
    }

    /// Starts a direct request pre-seeded with an indicator.
    pub fn indicator(&self, indicator: Indicator) -> DirectBuilder<'_> {
        self.direct().indicator(indicator)
    }

    /// Starts an empty bulk request.
    pub fn bulk(&self) -> BulkBuilder<'_> {
        BulkBuilder::new(self)
    }

    /// Starts a construct for use in a bulk request.
    pub fn construct(
        &self,
        exchange: Exchange,
        symbol: impl Into<String>,
        interval: Interval,
    ) -> ConstructBuilder {
        ConstructBuilder::new(exchange, symbol, interval)
    }

    /// Starts a manual request for the given indicator.
    pub fn manual(&self, indicator: Indicator) -> ManualBuilder<'_> {
        ManualBuilder::new(self, indicator)
    }

    /// GETs `/{indicator}` with the secret and the flat parameter set in the
    /// query string.
    pub(crate) async fn get_indicator(
        &self,
        indicator: &str,
        params: Map<String, Value>,
    ) -> Result<IndicatorResponse, Error> {
        let url = format!(
            "{}/{}?{}",
            self.base_url,
            indicator,
            self.build_query(&params)
        );
        let request = HttpRequest::get(url)
            .with_header("accept", "application/json")
            .with_timeout(self.timeout);

        let response = self.transport.execute(request).await?;
        if !response.is_success() {
            return Err(classify_status(response));
        }
        IndicatorResponse::from_json(&response.body).map_err(Error::from)
    }

    pub(crate) async fn post_indicator(
        &self,
        endpoint: &str,
        payload: Map<String, Value>,
    ) -> Result<IndicatorResponse, Error> {
        let body = self.post_raw(endpoint, payload).await?;
        IndicatorResponse::from_json(&body).map_err(Error::from)
    }

    pub(crate) async fn post_bulk(
        &self,
        payload: Map<String, Value>,
    ) -> Result<BulkResponse, Error> {
        let body = self.post_raw("/bulk", payload).await?;
        BulkResponse::from_json(&body).map_err(Error::from)
    }

    /// POSTs a JSON payload with the secret injected as a body field and
    /// returns the raw success body.
    async fn post_raw(
        &self,
        endpoint: &str,
        mut payload: Map<String, Value>,
    ) -> Result<String, Error> {
        payload.insert(String::from("secret"), Value::String(self.secret.clone()));
        let body = serde_json::to_string(&Value::Object(payload))
            .map_err(|error| TransportError::with_source("failed to encode request body", error))?;

        let request = HttpRequest::post(format!("{}{}", self.base_url, endpoint))
            .with_header("content-type", "application/json")
            .with_header("accept", "application/json")
            .with_body(body)
            .with_timeout(self.timeout);

        let response = self.transport.execute(request).await?;
        if !response.is_success() {
            return Err(classify_status(response));
        }
        Ok(response.body)
    }

    /// Query string with the secret first, then every parameter stringified:
    /// JSON strings verbatim, everything else via its JSON rendering.
    fn build_query(&self, params: &Map<String, Value>) -> String {
        let mut query = format!("secret={}", urlencoding::encode(&self.secret));
        for (key, value) in params {
            query.push('&');
            query.push_str(&urlencoding::encode(key));
            query.push('=');
            query.push_str(&urlencoding::encode(&query_value(value)));
        }
        query
    }
}

fn query_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Maps a non-2xx response onto the error taxonomy: 429 becomes a rate-limit
/// error carrying the `Retry-After` hint, everything else an API error with
/// a best-effort message from the `error` or `message` body fields.
fn classify_status(response: HttpResponse) -> Error {
    let body: Option<Map<String, Value>> = serde_json::from_str(&response.body).ok();

    if response.status == 429 {
        let retry_after = response
            .header("retry-after")
            .and_then(|value| value.trim().parse::<u64>().ok())
            .unwrap_or(0);
        let message = body
            .as_ref()
            .and_then(|body| body.get("error"))
            .and_then(Value::as_str)
            .unwrap_or("rate limit exceeded")
            .to_owned();
        return Error::RateLimited {
            message,
            retry_after: Duration::from_secs(retry_after),
            body,
        };
    }

    let message = body
        .as_ref()
        .and_then(|body| body.get("error").or_else(|| body.get("message")))
        .and_then(Value::as_str)
        .unwrap_or("unknown api error")
        .to_owned();
    Error::Api {
        status: response.status,
        message,
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn base_url_override_trims_trailing_slash() {
        let mut client = Client::new("s");
        client.set_base_url("https://mock.test/");
        assert_eq!(client.base_url(), "https://mock.test");
    }

    #[test]
    fn query_injects_secret_first_and_encodes_values() {
        let client = Client::new("s3cret&more");
        let mut params = Map::new();
        params.insert(String::from("symbol"), json!("BTC/USDT"));
        params.insert(String::from("period"), json!(14));

        let query = client.build_query(&params);

        assert!(query.starts_with("secret=s3cret%26more"));
        assert!(query.contains("symbol=BTC%2FUSDT"));
        assert!(query.contains("period=14"));
    }

    #[test]
    fn query_values_stringify_without_json_quotes() {
        assert_eq!(query_value(&json!("1h")), "1h");
        assert_eq!(query_value(&json!(14)), "14");
        assert_eq!(query_value(&json!(2.5)), "2.5");
        assert_eq!(query_value(&json!(true)), "true");
    }

    #[test]
    fn status_429_maps_to_rate_limit_with_retry_hint() {
        let response = HttpResponse::new(429, r#"{"error":"too many requests"}"#)
            .with_header("Retry-After", "30");

        let error = classify_status(response);

        assert!(error.is_rate_limited());
        assert_eq!(error.retry_after(), Some(Duration::from_secs(30)));
        assert!(error.to_string().contains("too many requests"));
    }

    #[test]
    fn status_429_without_header_defaults_to_zero_retry() {
        let error = classify_status(HttpResponse::new(429, "not json"));

        assert_eq!(error.retry_after(), Some(Duration::ZERO));
        assert!(error.to_string().contains("rate limit exceeded"));
    }

    #[test]
    fn api_error_message_falls_back_from_error_to_message_to_generic() {
        let error = classify_status(HttpResponse::new(400, r#"{"error":"bad symbol"}"#));
        assert!(error.to_string().contains("bad symbol"));

        let error = classify_status(HttpResponse::new(500, r#"{"message":"upstream down"}"#));
        assert!(error.to_string().contains("upstream down"));

        let error = classify_status(HttpResponse::new(502, "<html>"));
        assert!(error.to_string().contains("unknown api error"));
        assert_eq!(error.status(), Some(502));
    }
}
