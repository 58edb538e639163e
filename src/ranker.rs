use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::domain::{CandidateDescriptor, ScoredCandidate, SecurityReport};
use crate::error::PlanningError;
use crate::scoring::UtilityWeights;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ranking {
    /// Safe candidates, in whitelist order.
    pub candidates: Vec<ScoredCandidate>,
    pub chosen: ScoredCandidate,
}

/// Drops unsafe candidates and picks the highest utility. Ties go to the
/// candidate that appears first in `checked`.
pub fn rank(
    chain_id: u64,
    checked: Vec<(CandidateDescriptor, SecurityReport)>,
    weights: &UtilityWeights,
) -> Result<Ranking, PlanningError> {
    let total = checked.len();
    let candidates: Vec<ScoredCandidate> = checked
        .into_iter()
        .filter_map(|(descriptor, report)| {
            if !report.is_safe {
                warn!(
                    address = %descriptor.address,
                    warnings = ?report.warnings,
                    "ranker.skip_unsafe"
                );
                return None;
            }
            let utility = weights.utility(descriptor.advertised_apy, report.safety_score);
            info!(
                address = %descriptor.address,
                apy = descriptor.advertised_apy,
                safety_score = report.safety_score,
                utility,
                "ranker.scored"
            );
            Some(ScoredCandidate {
                descriptor,
                report,
                utility,
            })
        })
        .collect();

    let mut best: Option<&ScoredCandidate> = None;
    for candidate in &candidates {
        match best {
            Some(b) if candidate.utility <= b.utility => {}
            _ => best = Some(candidate),
        }
    }

    let Some(chosen) = best.cloned() else {
        return Err(PlanningError::NoSafeCandidates {
            chain_id,
            checked: total,
        });
    };

    info!(
        address = %chosen.descriptor.address,
        protocol = chosen.descriptor.protocol.as_str(),
        utility = chosen.utility,
        safe = candidates.len(),
        checked = total,
        "ranker.chosen"
    );
    Ok(Ranking { candidates, chosen })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProtocolKind;

    fn descriptor(address: &str, apy: f64) -> CandidateDescriptor {
        CandidateDescriptor {
            address: address.into(),
            protocol: ProtocolKind::Staking,
            advertised_apy: apy,
            advertised_tvl: 0.0,
            label: String::new(),
        }
    }

    fn report(is_safe: bool, safety_score: u8) -> SecurityReport {
        SecurityReport {
            is_safe,
            safety_score,
            warnings: vec![],
        }
    }

    #[test]
    fn higher_utility_wins() {
        let ranking = rank(
            1043,
            vec![
                (descriptor("0xA", 0.12), report(true, 100)),
                (descriptor("0xB", 0.05), report(true, 80)),
            ],
            &UtilityWeights::default(),
        )
        .unwrap();

        assert_eq!(ranking.candidates[0].utility, 0.56);
        assert_eq!(ranking.candidates[1].utility, 0.425);
        assert_eq!(ranking.chosen.address(), "0xA");
    }

    #[test]
    fn only_unsafe_candidates_is_terminal() {
        let err = rank(
            1043,
            vec![(descriptor("0xA", 0.5), report(false, 10))],
            &UtilityWeights::default(),
        )
        .unwrap_err();
        assert_eq!(err, PlanningError::NoSafeCandidates { chain_id: 1043, checked: 1 });
    }

    #[test]
    fn empty_whitelist_is_terminal() {
        let err = rank(7, vec![], &UtilityWeights::default()).unwrap_err();
        assert_eq!(err, PlanningError::NoSafeCandidates { chain_id: 7, checked: 0 });
    }

    #[test]
    fn unsafe_candidates_never_chosen_even_with_best_apy() {
        let ranking = rank(
            1043,
            vec![
                (descriptor("0xRUG", 9.0), report(false, 0)),
                (descriptor("0xOK", 0.01), report(true, 50)),
            ],
            &UtilityWeights::default(),
        )
        .unwrap();
        assert_eq!(ranking.candidates.len(), 1);
        assert_eq!(ranking.chosen.address(), "0xOK");
    }

    #[test]
    fn ties_go_to_first_in_whitelist_order() {
        let pairs = vec![
            (descriptor("0xLOW", 0.0), report(true, 80)),
            (descriptor("0xFIRST", 0.10), report(true, 90)),
            (descriptor("0xSECOND", 0.10), report(true, 90)),
        ];
        let weights = UtilityWeights::default();

        let first = rank(1043, pairs.clone(), &weights).unwrap();
        let again = rank(1043, pairs, &weights).unwrap();
        assert_eq!(first.chosen.address(), "0xFIRST");
        assert_eq!(first, again);
    }

    #[test]
    fn custom_weights_change_the_choice() {
        let pairs = vec![
            (descriptor("0xYIELD", 0.40), report(true, 60)),
            (descriptor("0xSAFE", 0.02), report(true, 100)),
        ];
        let yield_heavy = UtilityWeights { apy: 1.0, safety: 0.0 };
        let safety_heavy = UtilityWeights { apy: 0.0, safety: 1.0 };

        assert_eq!(rank(1, pairs.clone(), &yield_heavy).unwrap().chosen.address(), "0xYIELD");
        assert_eq!(rank(1, pairs, &safety_heavy).unwrap().chosen.address(), "0xSAFE");
    }
}
