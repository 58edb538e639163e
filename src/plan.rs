use tracing::info;

use crate::domain::{ParsedIntent, Plan, PlanStatus, PlanStep, ProtocolKind, ScoredCandidate};

/// Approve the chosen contract, then stake or lend into it.
///
/// Lending is used when the candidate is a lending protocol or when the intent
/// category mentions lending or borrowing, whatever the candidate's kind.
pub fn build_plan(
    chosen: &ScoredCandidate,
    intent: &ParsedIntent,
    intent_wallet: &str,
    chain_id: u64,
) -> Plan {
    let contract = chosen.descriptor.address.clone();
    let asset = intent.asset.clone();
    let amount = intent.amount;

    let lend = chosen.descriptor.protocol == ProtocolKind::Lending || intent.wants_lending();
    let action = if lend {
        PlanStep::Lend {
            contract: contract.clone(),
            asset: asset.clone(),
            amount,
        }
    } else {
        PlanStep::Stake {
            contract: contract.clone(),
            asset: asset.clone(),
            amount,
        }
    };

    info!(
        chain_id,
        contract = %contract,
        action = action.kind(),
        asset = %asset,
        amount,
        "plan.built"
    );

    Plan {
        steps: vec![
            PlanStep::Approve {
                asset,
                amount,
                spender: contract.clone(),
            },
            action,
        ],
        chosen_protocol: chosen.descriptor.protocol,
        chosen_contract_address: contract,
        intent_wallet: intent_wallet.to_string(),
        chain_id,
        status: PlanStatus::Ready,
    }
}
