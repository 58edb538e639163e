use tracing::info;

use crate::domain::{IntentStatus, ParsedIntent};

const KNOWN_STAKE_PHRASE: &str = "stake 1000 bdag";

#[derive(Debug, Clone, PartialEq)]
pub enum IntentParse {
    Parsed(ParsedIntent),
    Clarify(Vec<String>),
}

impl IntentParse {
    pub fn status(&self) -> IntentStatus {
        match self {
            IntentParse::Parsed(_) => IntentStatus::Parsed,
            IntentParse::Clarify(_) => IntentStatus::Clarify,
        }
    }
}

/// Fixed-phrase stand-in for a language model. Recognises one staking
/// request and asks for clarification on anything else.
pub fn parse_intent(input: &str) -> IntentParse {
    let parsed = if input.to_lowercase().contains(KNOWN_STAKE_PHRASE) {
        IntentParse::Parsed(ParsedIntent {
            intent_type: "stake_and_compound".into(),
            asset: "BDAG".into(),
            amount: 1000.0,
            amount_unit: "token".into(),
            target: "highest_risk_adjusted_apr".into(),
        })
    } else {
        IntentParse::Clarify(vec![
            "Sorry, I can only understand staking intents right now.".into(),
        ])
    };
    info!(status = ?parsed.status(), "intent.parsed");
    parsed
}
