pub mod client;
pub mod deployer;
pub mod token_cache;
pub mod transport;

#[cfg(test)]
pub(crate) mod fake;

pub use client::SecurityOracleClient;
pub use deployer::{DeployerResolver, MockDeployerResolver};
pub use token_cache::{OracleCredentials, TokenCache};
pub use transport::{HttpTransport, OracleTransport};

use serde_json::Value;

/// Oracle flags arrive as strings, numbers or booleans depending on the
/// endpoint. `None` means the value carries no usable signal.
pub fn flag(value: Option<&Value>) -> Option<bool> {
    match value? {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_i64() {
            Some(1) => Some(true),
            Some(0) => Some(false),
            _ => None,
        },
        Value::String(s) => match s.as_str() {
            "1" | "true" | "True" => Some(true),
            "0" | "false" | "False" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// The `result` object of an oracle envelope, falling back to `data.result`.
pub(crate) fn result_container(body: &Value) -> Option<&Value> {
    let non_empty = |v: &&Value| v.as_object().is_some_and(|o| !o.is_empty());
    body.get("result")
        .filter(non_empty)
        .or_else(|| body.get("data").and_then(|d| d.get("result")).filter(non_empty))
}
