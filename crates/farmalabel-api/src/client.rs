//! HTTP client for the product/offer query service.
//!
//! Failure posture (no retries; retry policy belongs to the caller):
//! every non-success response is mapped to [`ApiError::Service`] carrying
//! the most descriptive message available, in order: the service's JSON
//! `message` field (plus its `detail`, when present), the raw response text,
//! or a templated message with the HTTP status.

use std::time::Duration;

use farmalabel_core::AppConfig;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;
use crate::types::{ApiProduct, EnrichResponse, ExcelItem, ExcelSummary};

/// Header carrying the access token, when one is configured.
const TOKEN_HEADER: &str = "X-API-TOKEN";

/// Header naming the uploading user; server-side audit logging only.
const USER_HEADER: &str = "x-user";

/// Injected client configuration; the pure crates never see this.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl From<&AppConfig> for ApiConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            base_url: config.api_base_url.clone(),
            token: config.api_token.clone(),
            timeout_secs: config.request_timeout_secs,
            user_agent: config.user_agent.clone(),
        }
    }
}

/// Client for the remote product/offer query service and the mesón Excel
/// endpoints.
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Creates a client with configured timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ApiError::InvalidBaseUrl`] if the base
    /// URL does not parse.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        // Validate the base URL once at construction instead of on every call.
        reqwest::Url::parse(&config.base_url).map_err(|e| ApiError::InvalidBaseUrl {
            base_url: config.base_url.clone(),
            reason: e.to_string(),
        })?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token,
        })
    }

    /// Fetches a single product by exact merchant SKU.
    ///
    /// # Errors
    ///
    /// [`ApiError::Service`] on any non-success response (404 included; the
    /// service phrases "not found" itself), [`ApiError::Http`] on transport
    /// failure, [`ApiError::Deserialize`] on an unexpected body.
    pub async fn get_product(&self, codigo: &str) -> Result<ApiProduct, ApiError> {
        let url = self.endpoint(&["api", "products", codigo])?;
        let response = self.request(Method::GET, url).send().await?;
        read_json(response, "producto").await
    }

    /// Free-text product search.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`ApiClient::get_product`].
    pub async fn search_products(&self, query: &str) -> Result<Vec<ApiProduct>, ApiError> {
        let url = self.endpoint(&["api", "products", "search", query])?;
        let response = self.request(Method::GET, url).send().await?;
        read_json(response, "búsqueda de productos").await
    }

    /// Searches the mesón Excel index. Hits carry no pricing; follow up with
    /// [`ApiClient::enrich_from_dpofe`].
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`ApiClient::get_product`]; an `ok: false` envelope
    /// is also a [`ApiError::Service`].
    pub async fn search_excel(&self, term: &str) -> Result<Vec<ExcelItem>, ApiError> {
        let mut url = self.endpoint(&["api", "meson", "excel", "search"])?;
        url.query_pairs_mut().append_pair("term", term);
        let response = self.request(Method::GET, url).send().await?;
        read_envelope(response, "items", "búsqueda en Excel").await
    }

    /// Enriches an Excel search hit with pricing from the POS discount
    /// source.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`ApiClient::get_product`].
    pub async fn enrich_from_dpofe(&self, sku: &str) -> Result<EnrichResponse, ApiError> {
        let url = self.endpoint(&["api", "meson", "excel", "enrich", sku])?;
        let response = self.request(Method::GET, url).send().await?;
        read_json(response, "enriquecimiento de SKU").await
    }

    /// Uploads a mesón spreadsheet. `user` travels in the `x-user` header
    /// for server-side audit logging only; it has no behavioral effect.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`ApiClient::get_product`]; an `ok: false` envelope
    /// is also a [`ApiError::Service`].
    pub async fn upload_meson_excel(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        user: &str,
    ) -> Result<ExcelSummary, ApiError> {
        let url = self.endpoint(&["api", "meson", "excel", "upload"])?;
        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);
        let response = self
            .request(Method::POST, url)
            .header(USER_HEADER, user)
            .multipart(form)
            .send()
            .await?;
        read_envelope(response, "summary", "subida de Excel").await
    }

    /// Reads the current state of the mesón Excel index.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`ApiClient::search_excel`].
    pub async fn excel_status(&self) -> Result<ExcelSummary, ApiError> {
        let url = self.endpoint(&["api", "meson", "excel", "status"])?;
        let response = self.request(Method::GET, url).send().await?;
        read_envelope(response, "summary", "estado del Excel").await
    }

    /// Builds an endpoint URL from path segments (segments are
    /// percent-encoded, so SKUs and search terms go in raw).
    fn endpoint(&self, segments: &[&str]) -> Result<reqwest::Url, ApiError> {
        let mut url =
            reqwest::Url::parse(&self.base_url).map_err(|e| ApiError::InvalidBaseUrl {
                base_url: self.base_url.clone(),
                reason: e.to_string(),
            })?;
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidBaseUrl {
                base_url: self.base_url.clone(),
                reason: "cannot be a base".to_string(),
            })?
            // A bare origin parses with a single empty segment; drop it so
            // the first pushed segment does not produce "//api".
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: reqwest::Url) -> RequestBuilder {
        let mut request = self.client.request(method, url);
        if let Some(token) = &self.token {
            request = request.header(TOKEN_HEADER, token);
        }
        request
    }
}

/// Reads a plain JSON response body into `T`, applying the failure-message
/// mapping on non-success statuses.
async fn read_json<T: DeserializeOwned>(
    response: reqwest::Response,
    context: &str,
) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.text().await?;
    let parsed: Option<Value> = serde_json::from_str(&body).ok();

    if !status.is_success() {
        return Err(service_error(status, parsed.as_ref(), &body, context));
    }

    serde_json::from_str(&body).map_err(|e| ApiError::Deserialize {
        context: context.to_string(),
        source: e,
    })
}

/// Reads an `{ "ok": true, "<field>": … }` envelope, treating both HTTP
/// failure and `ok: false` as service errors.
async fn read_envelope<T: DeserializeOwned>(
    response: reqwest::Response,
    field: &str,
    context: &str,
) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.text().await?;
    let parsed: Option<Value> = serde_json::from_str(&body).ok();

    let ok = parsed
        .as_ref()
        .and_then(|v| v.get("ok"))
        .and_then(Value::as_bool)
        == Some(true);
    if !status.is_success() || !ok {
        return Err(service_error(status, parsed.as_ref(), &body, context));
    }

    let payload = parsed
        .as_ref()
        .and_then(|v| v.get(field))
        .cloned()
        .unwrap_or(Value::Null);
    serde_json::from_value(payload).map_err(|e| ApiError::Deserialize {
        context: context.to_string(),
        source: e,
    })
}

/// Best-available-message mapping: service `message` (with `detail`
/// appended when present), else the raw body, else a templated message with
/// the status code.
fn service_error(status: StatusCode, json: Option<&Value>, body: &str, context: &str) -> ApiError {
    tracing::warn!(status = status.as_u16(), context, "service call failed");
    let message_field = json
        .and_then(|v| v.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string);
    let detail = json
        .and_then(|v| v.get("detail"))
        .and_then(Value::as_str);

    let base = message_field.unwrap_or_else(|| {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            format!("Error en {context} ({})", status.as_u16())
        } else {
            trimmed.to_string()
        }
    });
    let message = match detail {
        Some(detail) => format!("{base} · Detalle: {detail}"),
        None => base,
    };

    ApiError::Service {
        status: status.as_u16(),
        message,
    }
}
