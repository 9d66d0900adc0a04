//! HTTP client for the remote product/offer query service and the
//! spreadsheet upload endpoint.
//!
//! This is the one I/O component of the workspace: configuration is injected
//! through [`ApiConfig`] (no ambient base URL or token), responses are flat
//! key-value records handled by the wire types in [`types`], and failures
//! surface the best available message: the service's own `message` field,
//! else the raw response text, else a templated message with the HTTP
//! status. The client never retries; overlapping calls are the caller's
//! concern and the last applied result wins.

pub mod client;
pub mod error;
pub mod types;

pub use client::{ApiClient, ApiConfig};
pub use error::ApiError;
pub use types::{ApiProduct, EnrichResponse, ExcelItem, ExcelSummary, PricedRecord};
