//! random.org JSON-RPC adapter with local fallback.
//!
//! Every call makes at most one `generateIntegers` request. A missing key,
//! a JSON-RPC error, a transport failure or timeout, or a malformed result
//! is logged and replaced by [`local_integers`] for the full count. The
//! returned [`Drawn`] tag records which path produced the values.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::error::SourceError;
use crate::source::{Drawn, RandomSource, local_integers, ordered};

pub const DEFAULT_ENDPOINT: &str = "https://api.random.org/json-rpc/4/invoke";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub const API_KEY_ENV: &str = "RANDOM_ORG_API_KEY";
pub const ENDPOINT_ENV: &str = "RANDOM_ORG_ENDPOINT";
pub const TIMEOUT_MS_ENV: &str = "RANDOM_ORG_TIMEOUT_MS";

/// Settings for [`RandomOrgClient`], fixed at construction.
#[derive(Clone)]
pub struct RandomOrgConfig {
    api_key: Option<String>,
    endpoint: String,
    timeout: Duration,
}

impl Default for RandomOrgConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl fmt::Debug for RandomOrgConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomOrgConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl RandomOrgConfig {
    /// Read `RANDOM_ORG_API_KEY`, `RANDOM_ORG_ENDPOINT` and
    /// `RANDOM_ORG_TIMEOUT_MS` from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(key) = lookup(API_KEY_ENV) {
            config = config.with_api_key(key);
        }
        if let Some(endpoint) = lookup(ENDPOINT_ENV).filter(|e| !e.trim().is_empty()) {
            config = config.with_endpoint(endpoint);
        }
        if let Some(raw) = lookup(TIMEOUT_MS_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => config = config.with_timeout(Duration::from_millis(ms)),
                _ => warn!(value = %raw, "ignoring invalid RANDOM_ORG_TIMEOUT_MS"),
            }
        }
        config
    }

    /// Set the API key. A blank key counts as no key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        self.api_key = (!key.trim().is_empty()).then_some(key);
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    method: &'static str,
    params: GenerateIntegers<'a>,
    id: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateIntegers<'a> {
    api_key: &'a str,
    n: usize,
    min: i64,
    max: i64,
}

#[derive(Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<RpcResult>,
    #[serde(default)]
    error: Option<RpcError>,
}

#[derive(Deserialize)]
struct RpcResult {
    random: RandomData,
}

#[derive(Deserialize)]
struct RandomData {
    data: Vec<i64>,
}

#[derive(Deserialize)]
struct RpcError {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
}

/// Client for random.org's `generateIntegers`.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct RandomOrgClient {
    config: RandomOrgConfig,
    http: reqwest::Client,
}

impl RandomOrgClient {
    pub fn new(config: RandomOrgConfig) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(SourceError::BuildClient)?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &RandomOrgConfig {
        &self.config
    }

    /// Request `n` integers in `[min, max]` without any fallback.
    ///
    /// # Errors
    /// * [`SourceError::MissingApiKey`] if no key is configured.
    /// * [`SourceError::Http`] on transport failure or timeout.
    /// * [`SourceError::Status`] on a non-success HTTP status.
    /// * [`SourceError::Rpc`] if the service answers with an `error` object.
    /// * [`SourceError::UnexpectedResponse`] if the result is missing, has the
    ///   wrong length, or holds out-of-range values.
    pub async fn try_integers(
        &self,
        n: usize,
        min: i64,
        max: i64,
    ) -> Result<Vec<i64>, SourceError> {
        let api_key = self.config.api_key().ok_or(SourceError::MissingApiKey)?;
        let (min, max) = ordered(min, max);
        if n == 0 {
            return Ok(Vec::new());
        }

        let request = RpcRequest {
            jsonrpc: "2.0",
            method: "generateIntegers",
            params: GenerateIntegers {
                api_key,
                n,
                min,
                max,
            },
            id: 1,
        };
        let response = self
            .http
            .post(&self.config.endpoint)
            .json(&request)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status));
        }

        let body: RpcResponse = response.json().await?;
        if let Some(RpcError { code, message }) = body.error {
            return Err(SourceError::Rpc { code, message });
        }
        let data = body
            .result
            .ok_or_else(|| SourceError::UnexpectedResponse("missing result".to_string()))?
            .random
            .data;
        if data.len() != n {
            return Err(SourceError::UnexpectedResponse(format!(
                "expected {n} integers, got {}",
                data.len()
            )));
        }
        if let Some(v) = data.iter().find(|v| !(min..=max).contains(*v)) {
            return Err(SourceError::UnexpectedResponse(format!(
                "integer {v} outside [{min}, {max}]"
            )));
        }
        Ok(data)
    }
}

impl RandomSource for RandomOrgClient {
    fn integers(
        &self,
        n: usize,
        min: i64,
        max: i64,
    ) -> impl Future<Output = Drawn<Vec<i64>>> + Send {
        async move {
            match self.try_integers(n, min, max).await {
                Ok(values) => {
                    debug!(n, min, max, "drew integers from random.org");
                    Drawn::external(values)
                }
                Err(SourceError::MissingApiKey) => {
                    warn!(n, "no random.org API key configured, using local randomness");
                    Drawn::fallback(local_integers(n, min, max))
                }
                Err(err) => {
                    error!(%err, n, min, max, "random.org request failed, using local randomness");
                    Drawn::fallback(local_integers(n, min, max))
                }
            }
        }
    }
}
