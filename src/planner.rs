use anyhow::Result;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::cache::{MemoryCache, SharedCache};
use crate::config::Config;
use crate::domain::{CandidateDescriptor, ParsedIntent, Plan, ScoredCandidate, SecurityReport};
use crate::error::PlanningError;
use crate::oracle::{
    HttpTransport, MockDeployerResolver, OracleTransport, SecurityOracleClient, TokenCache,
};
use crate::plan::build_plan;
use crate::ranker::{rank, Ranking};
use crate::scoring::UtilityWeights;
use crate::whitelist::Whitelist;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanOutcome {
    pub ranking: Ranking,
    pub plan: Plan,
}

/// Vets whitelisted candidates, ranks the safe ones and builds a plan for the
/// winner. Every collaborator is injected.
pub struct Planner {
    oracle: SecurityOracleClient,
    whitelist: Whitelist,
    weights: UtilityWeights,
    intent_wallet: String,
    parallel_checks: bool,
}

impl Planner {
    pub fn new(
        oracle: SecurityOracleClient,
        whitelist: Whitelist,
        weights: UtilityWeights,
        intent_wallet: String,
        parallel_checks: bool,
    ) -> Self {
        Self {
            oracle,
            whitelist,
            weights,
            intent_wallet,
            parallel_checks,
        }
    }

    /// Production wiring: reqwest transport, in-process token cache, stub
    /// deployer resolver and the built-in whitelist.
    pub fn from_config(cfg: &Config) -> Result<Self> {
        let transport: Arc<dyn OracleTransport> =
            Arc::new(HttpTransport::new(cfg.oracle_base_url.clone(), cfg.oracle_timeout())?);
        let cache: Arc<dyn SharedCache> = Arc::new(MemoryCache::new());
        let tokens = TokenCache::new(cfg.oracle_credentials(), transport.clone(), cache);
        info!(authenticated = tokens.is_configured(), "planner.oracle_credentials");

        let oracle = SecurityOracleClient::new(
            transport,
            tokens,
            Arc::new(MockDeployerResolver::new(cfg.mock_deployer_address.clone())),
        );
        Ok(Self::new(
            oracle,
            Whitelist::builtin(),
            cfg.utility_weights,
            cfg.intent_wallet_address.clone(),
            cfg.parallel_security_checks,
        ))
    }

    pub async fn run_security_check(&self, chain_id: u64, address: &str) -> SecurityReport {
        self.oracle.check(chain_id, address).await
    }

    /// Checks run concurrently when enabled; results keep whitelist order
    /// either way, so tie-breaks do not depend on completion order.
    pub async fn rank_candidates(
        &self,
        whitelist: &[CandidateDescriptor],
        chain_id: u64,
    ) -> Result<Ranking, PlanningError> {
        info!(
            chain_id,
            candidates = whitelist.len(),
            parallel = self.parallel_checks,
            "planner.rank.start"
        );

        let reports: Vec<SecurityReport> = if self.parallel_checks {
            join_all(
                whitelist
                    .iter()
                    .map(|c| self.run_security_check(chain_id, &c.address)),
            )
            .await
        } else {
            let mut reports = Vec::with_capacity(whitelist.len());
            for candidate in whitelist {
                reports.push(self.run_security_check(chain_id, &candidate.address).await);
            }
            reports
        };

        let checked = whitelist.iter().cloned().zip(reports).collect();
        rank(chain_id, checked, &self.weights)
    }

    pub fn build_plan(&self, chosen: &ScoredCandidate, intent: &ParsedIntent, chain_id: u64) -> Plan {
        build_plan(chosen, intent, &self.intent_wallet, chain_id)
    }

    /// Whitelist selection → security checks → ranking → plan.
    pub async fn plan(&self, intent: &ParsedIntent, chain_id: u64) -> Result<PlanOutcome, PlanningError> {
        let candidates = self.whitelist.candidates_for(chain_id, intent);
        let ranking = self.rank_candidates(&candidates, chain_id).await?;
        let plan = self.build_plan(&ranking.chosen, intent, chain_id);
        Ok(PlanOutcome { ranking, plan })
    }
}
