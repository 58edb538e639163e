use serde::{Deserialize, Serialize};

use crate::domain::SecurityReport;

const WARNING_PENALTY: i64 = 10; // per warning
const HONEYPOT_PENALTY: i64 = 80;
const MALICIOUS_CREATOR_PENALTY: i64 = 50;

/// Raw signals gathered from the oracle sub-checks for one contract.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetySignals {
    pub honeypot: bool,
    pub malicious_creator: bool,
    pub warnings: Vec<String>,
}

impl SafetySignals {
    pub fn merge(&mut self, other: SafetySignals) {
        self.honeypot |= other.honeypot;
        self.malicious_creator |= other.malicious_creator;
        self.warnings.extend(other.warnings);
    }

    pub fn into_report(self) -> SecurityReport {
        let (is_safe, safety_score) =
            assess(self.honeypot, self.malicious_creator, self.warnings.len());
        SecurityReport {
            is_safe,
            safety_score,
            warnings: self.warnings,
        }
    }
}

/// Returns `(is_safe, safety_score)`. Only the two hard flags decide safety;
/// warnings just lower the score.
pub fn assess(honeypot: bool, malicious_creator: bool, warning_count: usize) -> (bool, u8) {
    let is_safe = !honeypot && !malicious_creator;

    let warnings = i64::try_from(warning_count).unwrap_or(i64::MAX);
    let mut score = 100i64.saturating_sub(warnings.saturating_mul(WARNING_PENALTY));
    if honeypot {
        score -= HONEYPOT_PENALTY;
    }
    if malicious_creator {
        score -= MALICIOUS_CREATOR_PENALTY;
    }

    (is_safe, score.clamp(0, 100) as u8)
}

/// Policy weights for the utility blend. Defaults are 0.5 / 0.5.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UtilityWeights {
    pub apy: f64,
    pub safety: f64,
}

impl Default for UtilityWeights {
    fn default() -> Self {
        Self {
            apy: 0.5,
            safety: 0.5,
        }
    }
}

impl UtilityWeights {
    /// Rounded to 6 decimal places.
    pub fn utility(&self, apy: f64, safety_score: u8) -> f64 {
        let raw = apy * self.apy + (f64::from(safety_score) / 100.0) * self.safety;
        round6(raw)
    }
}

pub fn round6(x: f64) -> f64 {
    (x * 1_000_000.0).round() / 1_000_000.0
}
