use std::collections::HashMap;
use tracing::{info, warn};

use crate::domain::{CandidateDescriptor, ParsedIntent, ProtocolKind};

/// BlockDAG Awakening testnet.
pub const AWAKENING_CHAIN_ID: u64 = 1043;

#[derive(Debug, Clone, Default)]
pub struct ChainCandidates {
    pub staking: Vec<CandidateDescriptor>,
    pub lending: Vec<CandidateDescriptor>,
}

/// Static, vetted-by-hand protocol contracts per chain.
#[derive(Debug, Clone, Default)]
pub struct Whitelist {
    chains: HashMap<u64, ChainCandidates>,
}

impl Whitelist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_chain(mut self, chain_id: u64, candidates: ChainCandidates) -> Self {
        self.chains.insert(chain_id, candidates);
        self
    }

    /// Placeholder APY/TVL figures until live protocol stats are wired in.
    pub fn builtin() -> Self {
        Self::new().with_chain(
            AWAKENING_CHAIN_ID,
            ChainCandidates {
                staking: vec![CandidateDescriptor {
                    address: "0x1b227DF9c8D34CaB880774737FBf426E66Ba98Ed".into(),
                    protocol: ProtocolKind::Staking,
                    advertised_apy: 0.12,
                    advertised_tvl: 500_000.0,
                    label: "MockStakingFarm".into(),
                }],
                lending: vec![CandidateDescriptor {
                    address: "0xa23bDd28F9221F275897D8A26A8eb97A341cd257".into(),
                    protocol: ProtocolKind::Lending,
                    advertised_apy: 0.05,
                    advertised_tvl: 2_500_000.0,
                    label: "MockLending".into(),
                }],
            },
        )
    }

    /// Lend/borrow intents get lending protocols, everything else staking.
    /// Unknown chains yield an empty list.
    pub fn candidates_for(&self, chain_id: u64, intent: &ParsedIntent) -> Vec<CandidateDescriptor> {
        let Some(chain) = self.chains.get(&chain_id) else {
            warn!(chain_id, "whitelist.unknown_chain");
            return vec![];
        };

        let category = intent.category();
        let (kind, list) = if intent.wants_lending() {
            (ProtocolKind::Lending, &chain.lending)
        } else {
            if !category.contains("stake") && !category.contains("farm") {
                warn!(chain_id, category = %category, "whitelist.category_unclear_default_staking");
            }
            (ProtocolKind::Staking, &chain.staking)
        };

        info!(chain_id, kind = kind.as_str(), count = list.len(), "whitelist.selected");
        list.clone()
    }
}
