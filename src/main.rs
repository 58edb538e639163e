use anyhow::{anyhow, Result};
use clap::Parser;
use tracing::{error, info, warn};

use intentlink_planner::config::Config;
use intentlink_planner::intent::{parse_intent, IntentParse};
use intentlink_planner::monitoring::LogFormat;
use intentlink_planner::{journal, monitoring, Planner};

#[derive(Parser, Debug)]
#[command(name = "intentlink", about = "Plan a security-vetted DeFi action from an intent")]
struct Args {
    /// Natural-language request, e.g. "stake 1000 BDAG"
    #[arg(long)]
    input: String,

    /// Wallet that submitted the intent, recorded in the plan journal
    #[arg(long)]
    wallet: String,

    /// Defaults to DEFAULT_CHAIN_ID
    #[arg(long)]
    chain_id: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load local .env if present (no-op in prod/systemd envs)
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    monitoring::init_tracing(LogFormat::from_env());

    let cfg = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(err) => {
            error!(%err, "config.invalid");
            return Err(err);
        }
    };
    info!(?cfg, "boot");

    let chain_id = args.chain_id.unwrap_or(cfg.default_chain_id);
    info!(wallet = %args.wallet, chain_id, "intent.received");

    let intent = match parse_intent(&args.input) {
        IntentParse::Parsed(intent) => intent,
        IntentParse::Clarify(questions) => {
            warn!(?questions, "intent.clarify");
            return Err(anyhow!("intent needs clarification: {}", questions.join(" ")));
        }
    };

    let planner = Planner::from_config(&cfg)?;
    let outcome = match planner.plan(&intent, chain_id).await {
        Ok(outcome) => outcome,
        Err(err) => {
            error!(%err, "planner.failed");
            return Err(err.into());
        }
    };

    if let Some(path) = cfg.plan_journal_path.as_deref() {
        journal::append_plan_record(path, &args.wallet, &intent, &outcome)?;
        info!(path, "journal.appended");
    }

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
