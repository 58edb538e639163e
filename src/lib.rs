pub mod cache;
pub mod config;
pub mod domain;
pub mod error;
pub mod intent;
pub mod journal;
pub mod monitoring;
pub mod oracle;
pub mod plan;
pub mod planner;
pub mod ranker;
pub mod scoring;
pub mod whitelist;

pub use domain::{
    CandidateDescriptor, ParsedIntent, Plan, PlanStep, ProtocolKind, ScoredCandidate,
    SecurityReport,
};
pub use error::{OracleError, PlanningError};
pub use planner::{PlanOutcome, Planner};
