//! Remote HTTP transport for the fill backend.
//!
//! Talks to the fill microservice's two endpoints: `POST /fill-pdf`
//! (filled bytes plus an `X-Fill-Stats` JSON header) and `GET /health`
//! (which lists the form types with a registered template). All calls
//! are bounded by the client timeout; a timed-out or failed health probe
//! reads as "template absent".

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::client::{
    FillRequest, FillResponse, FillTransport, TemplateStore, TransportError, WireStats,
    body_excerpt,
};

/// Default bound on a single backend call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Name of the response header carrying the fill-statistics payload.
const STATS_HEADER: &str = "X-Fill-Stats";

#[derive(Serialize)]
struct WireRequest<'a> {
    form_type: &'a str,
    field_data: &'a std::collections::BTreeMap<String, String>,
    flatten: bool,
}

#[derive(Deserialize)]
struct HealthResponse {
    #[serde(default)]
    templates: Vec<String>,
}

/// Fill backend reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpFillBackend {
    client: reqwest::blocking::Client,
    base_url: String,
    token: Option<String>,
    timeout_secs: u64,
}

impl HttpFillBackend {
    /// Create a backend client with the default 30 s timeout.
    pub fn new(
        base_url: impl Into<String>,
        token: Option<String>,
    ) -> Result<Self, TransportError> {
        Self::with_timeout(base_url, token, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a backend client with an explicit call timeout.
    pub fn with_timeout(
        base_url: impl Into<String>,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Unreachable(e.to_string()))?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            client,
            base_url,
            token,
            timeout_secs: timeout.as_secs(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Form types the backend has a registered template for, from the
    /// health endpoint.
    pub fn templates(&self) -> Result<Vec<String>, TransportError> {
        let response = self
            .client
            .get(self.endpoint("/health"))
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    TransportError::Timeout(self.timeout_secs)
                } else {
                    TransportError::Unreachable(e.to_string())
                }
            })?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(TransportError::Rejected {
                status: status.as_u16(),
                body: body_excerpt(&body),
            });
        }
        let health: HealthResponse = response
            .json()
            .map_err(|e| TransportError::Unreachable(e.to_string()))?;
        Ok(health.templates)
    }
}

impl FillTransport for HttpFillBackend {
    fn fill(&self, request: &FillRequest) -> Result<FillResponse, TransportError> {
        let wire = WireRequest {
            form_type: &request.form_type,
            field_data: &request.field_data,
            flatten: false,
        };
        let mut builder = self.client.post(self.endpoint("/fill-pdf")).json(&wire);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout(self.timeout_secs)
            } else {
                TransportError::Unreachable(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(TransportError::Rejected {
                status: status.as_u16(),
                body: body_excerpt(&body),
            });
        }

        // Stats ride in a header so the body can stay raw PDF bytes.
        // A missing or malformed header degrades to None, never an error.
        let stats: Option<WireStats> = response
            .headers()
            .get(STATS_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| serde_json::from_str(s).ok());

        let document = response
            .bytes()
            .map_err(|e| TransportError::Unreachable(e.to_string()))?
            .to_vec();

        Ok(FillResponse { document, stats })
    }
}

impl TemplateStore for HttpFillBackend {
    fn has_template(&self, form_type: &str) -> bool {
        match self.templates() {
            Ok(templates) => templates.iter().any(|t| t == form_type),
            Err(_) => false,
        }
    }
}
