use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::core::payments::error::PaymentsError;

const SESSION_COOKIE: &str = "_tokenKey";

/// Status and body of a finished request.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status.is_success()
    }

    /// Decodes the body as JSON, returning `None` when it carries no data:
    /// an empty body, `null`, `false`, `0` or `""`.
    pub fn json_body(&self, endpoint: &'static str) -> Result<Option<Value>, PaymentsError> {
        if self.body.trim().is_empty() {
            return Ok(None);
        }
        let value: Value = serde_json::from_str(&self.body)
            .map_err(|source| PaymentsError::Decode { endpoint, source })?;
        if is_empty_value(&value) {
            return Ok(None);
        }
        Ok(Some(value))
    }

    /// Decodes the whole body as `T`, without treating empty values specially.
    pub fn decode<T: DeserializeOwned>(&self, endpoint: &'static str) -> Result<T, PaymentsError> {
        serde_json::from_str(&self.body)
            .map_err(|source| PaymentsError::Decode { endpoint, source })
    }
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Transport used by the payments API. Paths are absolute (`/api/v0/...`)
/// and may carry a query string. Bodies are sent as-is.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> Result<RawResponse, PaymentsError>;

    async fn get(&self, path: &str) -> Result<RawResponse, PaymentsError> {
        self.send(Method::GET, path, None).await
    }

    async fn post(&self, path: &str, body: Option<String>) -> Result<RawResponse, PaymentsError> {
        self.send(Method::POST, path, body).await
    }

    async fn patch(&self, path: &str, body: Option<String>) -> Result<RawResponse, PaymentsError> {
        self.send(Method::PATCH, path, body).await
    }

    async fn delete(&self, path: &str) -> Result<RawResponse, PaymentsError> {
        self.send(Method::DELETE, path, None).await
    }
}

/// `HttpClient` backed by reqwest, talking to one satellite.
pub struct ReqwestHttpClient {
    client: reqwest::Client,
    base_url: Url,
    token: Option<String>,
}

impl ReqwestHttpClient {
    pub fn new(
        base_url: &str,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, PaymentsError> {
        let base_url = Url::parse(base_url)?;
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            token,
        })
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> Result<RawResponse, PaymentsError> {
        let url = self.base_url.join(path)?;
        log::debug!("{} {}", method, url);

        let mut request = self
            .client
            .request(method.clone(), url)
            .header("Accept", "application/json")
            .header("Content-Type", "application/json");
        if let Some(token) = &self.token {
            request = request.header("Cookie", format!("{}={}", SESSION_COOKIE, token));
        }
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        log::debug!("{} {} -> {}", method, path, status.as_u16());

        Ok(RawResponse::new(status, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_body_empty_values_are_none() {
        for body in ["", "  ", "null", "false", "0", "\"\""] {
            let resp = RawResponse::new(StatusCode::OK, body);
            assert!(resp.json_body("test").unwrap().is_none(), "body {:?}", body);
        }
    }

    #[test]
    fn json_body_keeps_data() {
        for body in ["[]", "{}", "true", "1", "\"once\""] {
            let resp = RawResponse::new(StatusCode::OK, body);
            assert!(resp.json_body("test").unwrap().is_some(), "body {:?}", body);
        }
    }

    #[test]
    fn json_body_rejects_malformed_json() {
        let resp = RawResponse::new(StatusCode::OK, "{not json");
        let err = resp.json_body("balance").unwrap_err();
        assert!(err.to_string().contains("balance"));
    }

    #[test]
    fn decode_reads_whole_body() {
        let resp = RawResponse::new(StatusCode::OK, "false");
        assert!(!resp.decode::<bool>("package").unwrap());
    }

    #[test]
    fn is_ok_covers_success_range() {
        assert!(RawResponse::new(StatusCode::OK, "").is_ok());
        assert!(RawResponse::new(StatusCode::NO_CONTENT, "").is_ok());
        assert!(!RawResponse::new(StatusCode::NOT_FOUND, "").is_ok());
    }

    #[test]
    fn reqwest_client_rejects_bad_base_url() {
        let result = ReqwestHttpClient::new("not a url", None, Duration::from_secs(1));
        assert!(matches!(result, Err(PaymentsError::InvalidBaseUrl(_))));
    }
}
