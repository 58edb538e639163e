use anyhow::{anyhow, Result};
use std::time::Duration;

use crate::monitoring::LogFormat;
use crate::oracle::OracleCredentials;
use crate::scoring::UtilityWeights;

#[derive(Clone)]
pub struct Config {
    // Security oracle
    pub oracle_base_url: String,
    pub oracle_api_key: Option<String>,
    pub oracle_api_secret: Option<String>,
    pub oracle_timeout_secs: u64,
    pub mock_deployer_address: String,

    // Planning
    pub default_chain_id: u64,
    pub intent_wallet_address: String,
    pub utility_weights: UtilityWeights,
    pub parallel_security_checks: bool,

    // Audit / logs
    pub plan_journal_path: Option<String>,
    pub log_format: LogFormat,
}

fn env_bool(key: &str, default: bool) -> bool {
    match std::env::var(key).ok().map(|s| s.trim().to_lowercase()) {
        None => default,
        Some(v) if v.is_empty() => default,
        Some(v) if v == "1" || v == "true" || v == "yes" || v == "y" || v == "on" => true,
        Some(v) if v == "0" || v == "false" || v == "no" || v == "n" || v == "off" => false,
        Some(_) => default,
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|x| x.trim().parse().ok())
}

fn env_nonempty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Security oracle
        let oracle_base_url = std::env::var("SECURITY_ORACLE_BASE_URL")
            .unwrap_or_else(|_| "https://api.gopluslabs.io/api/v1".to_string());
        let oracle_api_key = env_nonempty("SECURITY_ORACLE_API_KEY");
        let oracle_api_secret = env_nonempty("SECURITY_ORACLE_API_SECRET");
        let oracle_timeout_secs = env_parse::<u64>("SECURITY_ORACLE_TIMEOUT_SECS").unwrap_or(30);
        if oracle_timeout_secs == 0 {
            return Err(anyhow!("SECURITY_ORACLE_TIMEOUT_SECS must be > 0"));
        }
        let mock_deployer_address = std::env::var("MOCK_DEPLOYER_ADDRESS")
            .unwrap_or_else(|_| "0xc8b759860149542a98a3eb57c14aadf59d6d89b9".to_string());

        // Planning
        let default_chain_id = env_parse::<u64>("DEFAULT_CHAIN_ID").unwrap_or(1043);
        let intent_wallet_address = std::env::var("INTENT_WALLET_ADDRESS")
            .unwrap_or_else(|_| "0x718a09981d305c2293d0c85e9d957ad25cb2a1c7".to_string());
        let defaults = UtilityWeights::default();
        let utility_weights = UtilityWeights {
            apy: env_parse::<f64>("UTILITY_APY_WEIGHT").unwrap_or(defaults.apy),
            safety: env_parse::<f64>("UTILITY_SAFETY_WEIGHT").unwrap_or(defaults.safety),
        };
        validate_weights(&utility_weights)?;
        let parallel_security_checks = env_bool("PARALLEL_SECURITY_CHECKS", true);

        let plan_journal_path = env_nonempty("PLAN_JOURNAL_PATH");
        let log_format = LogFormat::from_env();

        Ok(Self {
            oracle_base_url,
            oracle_api_key,
            oracle_api_secret,
            oracle_timeout_secs,
            mock_deployer_address,
            default_chain_id,
            intent_wallet_address,
            utility_weights,
            parallel_security_checks,
            plan_journal_path,
            log_format,
        })
    }

    pub fn oracle_credentials(&self) -> Option<OracleCredentials> {
        OracleCredentials::from_parts(self.oracle_api_key.clone(), self.oracle_api_secret.clone())
    }

    pub fn oracle_timeout(&self) -> Duration {
        Duration::from_secs(self.oracle_timeout_secs)
    }
}

fn validate_weights(w: &UtilityWeights) -> Result<()> {
    if !w.apy.is_finite() || !w.safety.is_finite() || w.apy < 0.0 || w.safety < 0.0 {
        return Err(anyhow!("utility weights must be finite and non-negative: {w:?}"));
    }
    Ok(())
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("oracle_base_url", &self.oracle_base_url)
            .field("oracle_api_key_set", &self.oracle_api_key.is_some())
            .field("oracle_api_secret_set", &self.oracle_api_secret.is_some())
            .field("oracle_timeout_secs", &self.oracle_timeout_secs)
            .field("mock_deployer_address", &self.mock_deployer_address)
            .field("default_chain_id", &self.default_chain_id)
            .field("intent_wallet_address", &self.intent_wallet_address)
            .field("utility_weights", &self.utility_weights)
            .field("parallel_security_checks", &self.parallel_security_checks)
            .field("plan_journal_path", &self.plan_journal_path)
            .field("log_format", &self.log_format)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_bool_reads_common_spellings() {
        std::env::set_var("INTENTLINK_TEST_BOOL_ON", "Yes");
        std::env::set_var("INTENTLINK_TEST_BOOL_OFF", " off ");
        std::env::set_var("INTENTLINK_TEST_BOOL_JUNK", "maybe");
        assert!(env_bool("INTENTLINK_TEST_BOOL_ON", false));
        assert!(!env_bool("INTENTLINK_TEST_BOOL_OFF", true));
        assert!(env_bool("INTENTLINK_TEST_BOOL_JUNK", true));
        assert!(!env_bool("INTENTLINK_TEST_BOOL_MISSING", false));
    }

    #[test]
    fn negative_weights_rejected() {
        assert!(validate_weights(&UtilityWeights { apy: -0.1, safety: 0.5 }).is_err());
        assert!(validate_weights(&UtilityWeights { apy: f64::NAN, safety: 0.5 }).is_err());
        assert!(validate_weights(&UtilityWeights::default()).is_ok());
    }

    #[test]
    fn debug_output_hides_secrets() {
        let cfg = Config {
            oracle_base_url: "http://oracle".into(),
            oracle_api_key: Some("live-key".into()),
            oracle_api_secret: Some("live-secret".into()),
            oracle_timeout_secs: 30,
            mock_deployer_address: "0xdep".into(),
            default_chain_id: 1043,
            intent_wallet_address: "0xwallet".into(),
            utility_weights: UtilityWeights::default(),
            parallel_security_checks: true,
            plan_journal_path: None,
            log_format: LogFormat::Text,
        };
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("live-key"));
        assert!(!rendered.contains("live-secret"));
        assert!(cfg.oracle_credentials().is_some());
    }
}
