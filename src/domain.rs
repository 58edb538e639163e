use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProtocolKind {
    Staking,
    Lending,
}

impl ProtocolKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProtocolKind::Staking => "staking",
            ProtocolKind::Lending => "lending",
        }
    }
}

/// A whitelisted protocol contract eligible for an intent category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CandidateDescriptor {
    pub address: String,
    pub protocol: ProtocolKind,
    /// Fractional, 0.12 => 12%.
    pub advertised_apy: f64,
    /// Display only, never scored.
    pub advertised_tvl: f64,
    #[serde(default)]
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SecurityReport {
    pub is_safe: bool,
    /// Always within 0..=100.
    pub safety_score: u8,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredCandidate {
    pub descriptor: CandidateDescriptor,
    pub report: SecurityReport,
    pub utility: f64,
}

impl ScoredCandidate {
    pub fn address(&self) -> &str {
        &self.descriptor.address
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParsedIntent {
    /// Free-form category, e.g. `stake_and_compound`.
    pub intent_type: String,
    pub asset: String,
    pub amount: f64,
    #[serde(default)]
    pub amount_unit: String,
    #[serde(default)]
    pub target: String,
}

impl ParsedIntent {
    pub fn category(&self) -> String {
        self.intent_type.to_lowercase()
    }

    pub fn wants_lending(&self) -> bool {
        let category = self.category();
        category.contains("lend") || category.contains("borrow")
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IntentStatus {
    Parsed,
    Planned,
    Simulated,
    Signed,
    Executing,
    Completed,
    Failed,
    Clarify,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PlanStatus {
    Ready,
    Simulated,
    Approved,
    Executed,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PlanStep {
    Approve {
        asset: String,
        amount: f64,
        spender: String,
    },
    Stake {
        contract: String,
        asset: String,
        amount: f64,
    },
    Lend {
        contract: String,
        asset: String,
        amount: f64,
    },
}

impl PlanStep {
    pub fn kind(&self) -> &'static str {
        match self {
            PlanStep::Approve { .. } => "approve",
            PlanStep::Stake { .. } => "stake",
            PlanStep::Lend { .. } => "lend",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Plan {
    /// Always `[Approve, Stake | Lend]`.
    pub steps: Vec<PlanStep>,
    pub chosen_protocol: ProtocolKind,
    pub chosen_contract_address: String,
    pub intent_wallet: String,
    pub chain_id: u64,
    pub status: PlanStatus,
}
