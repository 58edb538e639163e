use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::Value;
use std::time::Duration;

use crate::error::OracleError;

/// JSON-over-HTTP surface of the security oracle. Paths are relative to the
/// oracle base URL.
#[async_trait]
pub trait OracleTransport: Send + Sync {
    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, OracleError>;

    async fn get_json(
        &self,
        path: &str,
        query: &[(&str, &str)],
        bearer: Option<&str>,
    ) -> Result<Value, OracleError>;
}

#[derive(Clone)]
pub struct HttpTransport {
    base_url: String,
    http: Client,
}

impl HttpTransport {
    /// `timeout` bounds every outbound call.
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, OracleError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    async fn decode(resp: Response) -> Result<Value, OracleError> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(OracleError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(resp.json().await?)
    }
}

#[async_trait]
impl OracleTransport for HttpTransport {
    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, OracleError> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self.http.post(url).json(body).send().await?;
        Self::decode(resp).await
    }

    async fn get_json(
        &self,
        path: &str,
        query: &[(&str, &str)],
        bearer: Option<&str>,
    ) -> Result<Value, OracleError> {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.http.get(url).query(query);
        if let Some(token) = bearer {
            req = req.bearer_auth(token);
        }
        let resp = req.send().await?;
        Self::decode(resp).await
    }
}
