use anyhow::Result;
use chrono::{DateTime, Local};
use std::{fs::OpenOptions, io::Write, path::Path};

use crate::domain::{ParsedIntent, PlanStep};
use crate::planner::PlanOutcome;

/// Appends a markdown audit entry: every safe candidate with its utility and
/// warnings, then the chosen plan.
pub fn append_plan_record(
    journal_path: impl AsRef<Path>,
    submitted_by: &str,
    intent: &ParsedIntent,
    outcome: &PlanOutcome,
) -> Result<()> {
    let now: DateTime<Local> = Local::now();

    let mut f = OpenOptions::new()
        .create(true)
        .append(true)
        .open(journal_path)?;

    let plan = &outcome.plan;
    writeln!(f, "## Plan {}\n", now.to_rfc3339())?;
    writeln!(f, "- Chain: {}", plan.chain_id)?;
    writeln!(f, "- Intent: {} {} {}", intent.intent_type, intent.amount, intent.asset)?;
    writeln!(f, "- Submitted by: {submitted_by}")?;
    writeln!(f, "- Intent wallet: {}", plan.intent_wallet)?;
    writeln!(
        f,
        "- Chosen: {} ({}) utility {:.6}\n",
        plan.chosen_contract_address,
        plan.chosen_protocol.as_str(),
        outcome.ranking.chosen.utility
    )?;

    writeln!(f, "### Candidates\n")?;
    for c in &outcome.ranking.candidates {
        writeln!(
            f,
            "- {} | {} | APY {:.2}% | TVL {:.0} | score {} | utility {:.6}",
            c.descriptor.address,
            c.descriptor.protocol.as_str(),
            c.descriptor.advertised_apy * 100.0,
            c.descriptor.advertised_tvl,
            c.report.safety_score,
            c.utility
        )?;
        for w in &c.report.warnings {
            writeln!(f, "  - warning: {w}")?;
        }
    }

    writeln!(f, "\n### Steps\n")?;
    for (i, step) in plan.steps.iter().enumerate() {
        let line = match step {
            PlanStep::Approve { asset, amount, spender } => {
                format!("approve {amount} {asset} for {spender}")
            }
            PlanStep::Stake { contract, asset, amount } => {
                format!("stake {amount} {asset} into {contract}")
            }
            PlanStep::Lend { contract, asset, amount } => {
                format!("lend {amount} {asset} to {contract}")
            }
        };
        writeln!(f, "{}. {line}", i + 1)?;
    }
    writeln!(f, "\n---\n")?;

    Ok(())
}
