//! # Tactick Core
//!
//! Typed client for the taapi.io technical-analysis REST API.
//!
//! ## Overview
//!
//! The crate is a thin, typed convenience layer over the API's fixed
//! HTTP/JSON contract:
//!
//! - **Domain tokens** for exchanges, intervals and indicators with
//!   validity checks
//! - **Fluent builders** for direct, bulk and manual (own-candle) requests
//! - **Typed response wrappers** over the per-indicator JSON shapes
//! - **Structured errors** separating local, API, rate-limit and network
//!   failures
//!
//! It deliberately does *not* cache, retry, or throttle: a 429 is surfaced
//! with the server's `Retry-After` hint and backoff stays in the caller's
//! hands.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`builders`] | Fluent request builders (direct, construct, bulk, manual) |
//! | [`client`] | The [`Client`], credential handling and response dispatch |
//! | [`domain`] | Exchange/interval/indicator tokens and the candle record |
//! | [`error`] | Error taxonomy |
//! | [`response`] | Typed response wrappers with open data bags |
//! | [`transport`] | HTTP transport trait and the reqwest implementation |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tactick_core::{Client, Exchange, Indicator, Interval};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::from_env()?;
//!
//!     let rsi = client
//!         .exchange(Exchange::BINANCE)
//!         .symbol("BTC/USDT")
//!         .interval(Interval::HOUR_1)
//!         .indicator(Indicator::RSI)
//!         .get()
//!         .await?;
//!
//!     println!("RSI: {}", rsi.value());
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return `Result` with a structured [`Error`]:
//!
//! ```rust
//! use tactick_core::Error;
//!
//! fn handle_error(error: Error) {
//!     match error {
//!         Error::RateLimited { retry_after, .. } => {
//!             // Back off for `retry_after`, then try again
//!             let _ = retry_after;
//!         }
//!         Error::InvalidArgument(message) => {
//!             // A builder field is missing; fix the request
//!             let _ = message;
//!         }
//!         Error::Api { status, .. } => {
//!             // The API rejected the request
//!             let _ = status;
//!         }
//!         _ => {}
//!     }
//! }
//! ```
//!
//! ## Security
//!
//! The API secret travels as a query parameter on GETs and a body field on
//! POSTs, exactly as the upstream contract requires; it is never logged.

pub mod builders;
pub mod client;
pub mod domain;
pub mod error;
pub mod response;
pub mod transport;

pub use builders::{BulkBuilder, ConstructBuilder, DirectBuilder, ManualBuilder};
pub use client::{Client, DEFAULT_BASE_URL, SECRET_ENV_VAR};
pub use domain::{Candle, Exchange, Indicator, Interval};
pub use error::Error;
pub use response::{BulkResponse, IndicatorResponse};
pub use transport::{
    HttpMethod, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, TransportError,
};
