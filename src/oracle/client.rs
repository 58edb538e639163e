use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::SecurityReport;
use crate::error::OracleError;
use crate::oracle::deployer::DeployerResolver;
use crate::oracle::token_cache::TokenCache;
use crate::oracle::transport::OracleTransport;
use crate::oracle::{flag, result_container};
use crate::scoring::SafetySignals;

pub const HONEYPOT_WARNING: &str = "Honeypot detected";
pub const UNVERIFIED_SOURCE_WARNING: &str = "Contract source not verified";
pub const NO_REPORT_WARNING: &str = "No token security report available";
pub const MALICIOUS_DEPLOYER_WARNING: &str = "Deployer related to honeypot activity";

/// Two-stage contract vetting against the security oracle.
pub struct SecurityOracleClient {
    transport: Arc<dyn OracleTransport>,
    tokens: TokenCache,
    deployers: Arc<dyn DeployerResolver>,
}

impl SecurityOracleClient {
    pub fn new(
        transport: Arc<dyn OracleTransport>,
        tokens: TokenCache,
        deployers: Arc<dyn DeployerResolver>,
    ) -> Self {
        Self {
            transport,
            tokens,
            deployers,
        }
    }

    /// Never fails: sub-check errors become warnings on the report.
    pub async fn check(&self, chain_id: u64, address: &str) -> SecurityReport {
        info!(chain_id, address, "oracle.check.start");

        let token = match self.tokens.get_token().await {
            Ok(token) => token,
            Err(err) => {
                warn!(%err, "oracle.check.unauthenticated");
                None
            }
        };
        let token = token.as_deref();

        let (token_check, deployer_check) = tokio::join!(
            self.token_security(chain_id, address, token),
            self.deployer_security(chain_id, address, token),
        );

        let mut signals = SafetySignals::default();
        match token_check {
            Ok(found) => signals.merge(found),
            Err(err) => {
                warn!(chain_id, address, %err, "oracle.token_security.failed");
                signals
                    .warnings
                    .push(format!("Token security check failed: {err}"));
            }
        }
        match deployer_check {
            Ok(found) => signals.merge(found),
            Err(err) => {
                warn!(chain_id, address, %err, "oracle.address_security.failed");
                signals
                    .warnings
                    .push(format!("Deployer address check failed: {err}"));
            }
        }

        let report = signals.into_report();
        info!(
            chain_id,
            address,
            is_safe = report.is_safe,
            safety_score = report.safety_score,
            warnings = report.warnings.len(),
            "oracle.check.done"
        );
        report
    }

    async fn token_security(
        &self,
        chain_id: u64,
        address: &str,
        token: Option<&str>,
    ) -> Result<SafetySignals, OracleError> {
        let path = format!("/token_security/{chain_id}");
        let body = self
            .transport
            .get_json(&path, &[("contract_addresses", address)], token)
            .await?;
        debug!(chain_id, address, authenticated = token.is_some(), "oracle.token_security.response");

        let mut signals = SafetySignals::default();
        let entry = result_container(&body)
            .and_then(|c| c.get(address.to_lowercase()).or_else(|| c.get(address)))
            .filter(|e| e.as_object().is_some_and(|o| !o.is_empty()));

        let Some(entry) = entry else {
            warn!(chain_id, address, "oracle.token_security.no_report");
            signals.warnings.push(NO_REPORT_WARNING.to_string());
            return Ok(signals);
        };

        if flag(entry.get("is_honeypot")) == Some(true) {
            warn!(chain_id, address, "oracle.token_security.honeypot");
            signals.honeypot = true;
            signals.warnings.push(HONEYPOT_WARNING.to_string());
        }
        if flag(entry.get("is_open_source")) == Some(false) {
            signals.warnings.push(UNVERIFIED_SOURCE_WARNING.to_string());
        }
        Ok(signals)
    }

    async fn deployer_security(
        &self,
        chain_id: u64,
        address: &str,
        token: Option<&str>,
    ) -> Result<SafetySignals, OracleError> {
        let mut signals = SafetySignals::default();
        let Some(deployer) = self.deployers.resolve(chain_id, address).await else {
            info!(chain_id, address, "oracle.address_security.skipped");
            return Ok(signals);
        };

        let path = format!("/address_security/{deployer}");
        let chain = chain_id.to_string();
        let body = self
            .transport
            .get_json(&path, &[("chain_id", chain.as_str())], token)
            .await?;

        let Some(result) = result_container(&body) else {
            debug!(chain_id, %deployer, "oracle.address_security.empty");
            return Ok(signals);
        };

        if flag(result.get("honeypot_related_address")) == Some(true) {
            warn!(chain_id, %deployer, "oracle.address_security.malicious_deployer");
            signals.malicious_creator = true;
            signals.warnings.push(MALICIOUS_DEPLOYER_WARNING.to_string());
        }
        Ok(signals)
    }
}
