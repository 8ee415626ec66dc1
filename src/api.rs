// API client module: a small blocking HTTP client for the LUT service.
// Both endpoints take a JSON body and answer with JSON; the client does not
// validate the response schema beyond decoding it.

use crate::error::{ApiError, ApiResult};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Base URL used when neither `--base-url` nor `LUT_API_URL` is set.
pub const DEFAULT_BASE_URL: &str = "https://fhd5rgv0o0dd8i-8000.proxy.runpod.net/";

/// LUT trained when the caller does not name one.
pub const DEFAULT_TRAIN_LUT_NAME: &str = "user_123";

/// Number of tokens requested when the caller does not pass a length.
pub const DEFAULT_GENERATE_LENGTH: u32 = 20;

const GENERATE: &str = "generate";
const TRAIN_LUT: &str = "train_lut";

/// Blocking client bound to one base URL. Cloning is cheap; the underlying
/// reqwest client shares its connection pool.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

/// Body of `POST /generate`. `lut_name` is left out of the JSON entirely
/// when it is `None`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    pub prompt: String,
    pub length: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lut_name: Option<String>,
}

impl GenerateRequest {
    /// Build a generate body; `lut_name` of `None` keeps the key out.
    pub fn new(prompt: &str, length: u32, lut_name: Option<&str>) -> Self {
        GenerateRequest {
            prompt: prompt.to_string(),
            length,
            lut_name: lut_name.map(str::to_string),
        }
    }
}

/// Body of `POST /train_lut`. Unlike [`GenerateRequest`] every key is always
/// sent; a missing context goes out as `null`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrainRequest {
    pub label: String,
    pub lut_name: String,
    pub label_context: Option<String>,
}

impl TrainRequest {
    /// Build a training body, falling back to the `user_123` LUT.
    pub fn new(label: &str, lut_name: Option<&str>, label_context: Option<&str>) -> Self {
        TrainRequest {
            label: label.to_string(),
            lut_name: lut_name.unwrap_or(DEFAULT_TRAIN_LUT_NAME).to_string(),
            label_context: label_context.map(str::to_string),
        }
    }
}

/// Status code and decoded body of a successful exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiReply {
    pub status: u16,
    pub body: Value,
}

impl ApiReply {
    /// The `completion` text of a generate reply, if present.
    pub fn completion(&self) -> Option<&str> {
        completion(&self.body)
    }
}

/// Reads the `completion` field of a generate response, if the server sent
/// one as a string.
pub fn completion(body: &Value) -> Option<&str> {
    body.get("completion").and_then(Value::as_str)
}

/// Endpoints are appended to the base URL as path segments, so it must be
/// an http(s) URL with a path and nothing after it.
fn check_base_url(base_url: &str) -> ApiResult<()> {
    let invalid = |reason: &str| ApiError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason: reason.to_string(),
    };
    let url = reqwest::Url::parse(base_url).map_err(|e| invalid(&e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }
    if url.cannot_be_a_base() {
        return Err(invalid("URL cannot hold an endpoint path"));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("query strings and fragments are not supported"));
    }
    Ok(())
}

impl ApiClient {
    /// Build a client for `base_url`. `timeout` of `None` means requests
    /// wait as long as the server takes.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> ApiResult<Self> {
        check_base_url(base_url)?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::Build)?;
        Ok(ApiClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL with trailing slashes removed; endpoints are appended to it.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }

    /// Ask the server to continue `prompt` for `length` tokens, optionally
    /// conditioned on the LUT called `lut_name`.
    pub fn generate(&self, prompt: &str, length: u32, lut_name: Option<&str>) -> ApiResult<ApiReply> {
        self.send_generate(&GenerateRequest::new(prompt, length, lut_name))
    }

    /// Send an already built generate body.
    pub fn send_generate(&self, req: &GenerateRequest) -> ApiResult<ApiReply> {
        self.post(GENERATE, req)
    }

    /// Train `label` into the LUT `lut_name` (`user_123` when `None`).
    ///
    /// The service is not idempotent here: sending the same label twice
    /// trains it twice.
    pub fn train_lut(
        &self,
        label: &str,
        lut_name: Option<&str>,
        label_context: Option<&str>,
    ) -> ApiResult<ApiReply> {
        self.send_train(&TrainRequest::new(label, lut_name, label_context))
    }

    /// Send an already built training body.
    pub fn send_train(&self, req: &TrainRequest) -> ApiResult<ApiReply> {
        self.post(TRAIN_LUT, req)
    }

    fn post<T: Serialize>(&self, endpoint: &'static str, payload: &T) -> ApiResult<ApiReply> {
        let url = self.endpoint_url(endpoint);
        debug!(%url, "sending request");
        let started = Instant::now();
        let res = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .map_err(|source| ApiError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = res.status();
        let elapsed_ms = started.elapsed().as_millis() as u64;
        if !status.is_success() {
            let body = res.text().unwrap_or_default();
            warn!(endpoint, status = status.as_u16(), elapsed_ms, "request rejected");
            return Err(ApiError::Status {
                endpoint,
                status: status.as_u16(),
                body,
            });
        }
        info!(endpoint, status = status.as_u16(), elapsed_ms, "request completed");

        let body: Value = res.json().map_err(|source| ApiError::Decode { endpoint, source })?;
        Ok(ApiReply {
            status: status.as_u16(),
            body,
        })
    }
}
