//! Bearer credential acquisition for the security oracle.
//!
//! Tokens are cached in the shared cache under [`TOKEN_CACHE_KEY`]. Within one
//! `TokenCache` a miss is single-flight: concurrent callers wait for the
//! first fetch and then read its token. Separate processes sharing the cache
//! can still each fetch a fresh token on expiry; both tokens are valid and
//! the later write wins.

use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::cache::SharedCache;
use crate::error::OracleError;
use crate::oracle::transport::OracleTransport;

pub const TOKEN_CACHE_KEY: &str = "security-oracle:access-token";

const DEFAULT_EXPIRES_IN_SECS: i64 = 3600;
const MIN_TTL_SECS: i64 = 60;
const EXPIRY_MARGIN_SECS: i64 = 60;
const MAX_TTL_SECS: i64 = 86_400;

/// One request-body shape accepted by some deployment of the token endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthStrategy {
    pub name: &'static str,
    pub key_field: &'static str,
    pub secret_field: &'static str,
}

impl AuthStrategy {
    fn payload(&self, creds: &OracleCredentials) -> Value {
        let mut body = Map::new();
        body.insert(self.key_field.to_string(), Value::String(creds.api_key.clone()));
        body.insert(
            self.secret_field.to_string(),
            Value::String(creds.api_secret.clone()),
        );
        Value::Object(body)
    }
}

/// Tried in order until one yields a token.
pub const AUTH_STRATEGIES: [AuthStrategy; 3] = [
    AuthStrategy {
        name: "snake_app",
        key_field: "app_key",
        secret_field: "app_secret",
    },
    AuthStrategy {
        name: "camel_app",
        key_field: "appKey",
        secret_field: "appSecret",
    },
    AuthStrategy {
        name: "snake_api",
        key_field: "api_key",
        secret_field: "api_secret",
    },
];

#[derive(Clone, PartialEq, Eq)]
pub struct OracleCredentials {
    pub api_key: String,
    pub api_secret: String,
}

impl OracleCredentials {
    /// Both halves must be non-empty.
    pub fn from_parts(api_key: Option<String>, api_secret: Option<String>) -> Option<Self> {
        match (api_key, api_secret) {
            (Some(api_key), Some(api_secret)) if !api_key.is_empty() && !api_secret.is_empty() => {
                Some(Self { api_key, api_secret })
            }
            _ => None,
        }
    }
}

impl std::fmt::Debug for OracleCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OracleCredentials")
            .field("api_key", &"<redacted>")
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_in: i64,
}

pub struct TokenCache {
    credentials: Option<OracleCredentials>,
    transport: Arc<dyn OracleTransport>,
    cache: Arc<dyn SharedCache>,
    strategies: Vec<AuthStrategy>,
    refresh: Mutex<()>,
}

impl TokenCache {
    pub fn new(
        credentials: Option<OracleCredentials>,
        transport: Arc<dyn OracleTransport>,
        cache: Arc<dyn SharedCache>,
    ) -> Self {
        Self {
            credentials,
            transport,
            cache,
            strategies: AUTH_STRATEGIES.to_vec(),
            refresh: Mutex::new(()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }

    /// `Ok(None)` means no credentials are configured and callers should go
    /// unauthenticated.
    pub async fn get_token(&self) -> Result<Option<String>, OracleError> {
        let Some(creds) = self.credentials.as_ref() else {
            return Ok(None);
        };

        if let Some(token) = self.cache.get(TOKEN_CACHE_KEY) {
            debug!("oracle.token.cache_hit");
            return Ok(Some(token));
        }

        let _refresh = self.refresh.lock().await;
        if let Some(token) = self.cache.get(TOKEN_CACHE_KEY) {
            debug!("oracle.token.refreshed_by_peer");
            return Ok(Some(token));
        }

        info!(strategies = self.strategies.len(), "oracle.token.fetch");
        let mut last_error: Option<OracleError> = None;
        for (idx, strategy) in self.strategies.iter().enumerate() {
            let attempt = idx + 1;
            debug!(attempt, strategy = strategy.name, "oracle.token.attempt");

            let issued = match self.transport.post_json("/token", &strategy.payload(creds)).await {
                Ok(body) => extract_token(&body),
                Err(err) => Err(err),
            };

            match issued {
                Ok(issued) => {
                    let ttl = cache_ttl(issued.expires_in);
                    self.cache.set(TOKEN_CACHE_KEY, issued.token.clone(), ttl);
                    info!(
                        attempt,
                        strategy = strategy.name,
                        ttl_secs = ttl.as_secs(),
                        "oracle.token.cached"
                    );
                    return Ok(Some(issued.token));
                }
                Err(err) => {
                    warn!(attempt, strategy = strategy.name, %err, "oracle.token.strategy_failed");
                    last_error = Some(err);
                }
            }
        }

        Err(OracleError::CredentialAcquisition {
            attempts: self.strategies.len(),
            last_error: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "no auth strategies configured".to_string()),
        })
    }
}

/// Serve tokens for at least a minute and at most a day, never into their
/// final minute. `expires_in` is oracle-supplied and may be any i64.
pub fn cache_ttl(expires_in: i64) -> Duration {
    let secs = expires_in
        .saturating_sub(EXPIRY_MARGIN_SECS)
        .clamp(MIN_TTL_SECS, MAX_TTL_SECS);
    Duration::from_secs(secs as u64)
}

/// Reads a token-endpoint response. The token may sit at the top level or
/// inside a `result`/`data` object.
pub fn extract_token(body: &Value) -> Result<IssuedToken, OracleError> {
    // 1 is success; a zero code carries no verdict and the body is read as is.
    if let Some(code) = body.get("code").and_then(as_i64) {
        if code != 0 && code != 1 {
            let message = body
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown error")
                .to_string();
            return Err(OracleError::Rejected { code, message });
        }
    }

    let nested = ["result", "data"]
        .iter()
        .filter_map(|k| body.get(*k))
        .find(|v| v.as_object().is_some_and(|o| !o.is_empty()));
    let source = nested.unwrap_or(body);

    let token = ["access_token", "token"]
        .iter()
        .filter_map(|k| source.get(*k).and_then(Value::as_str))
        .find(|t| !t.is_empty())
        .ok_or_else(|| OracleError::Malformed("no access token in token response".to_string()))?;

    let expires_in = nested
        .and_then(|n| n.get("expires_in"))
        .or_else(|| body.get("expires_in"))
        .and_then(as_i64)
        .unwrap_or(DEFAULT_EXPIRES_IN_SECS);

    Ok(IssuedToken {
        token: token.to_string(),
        expires_in,
    })
}

fn as_i64(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
