use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OracleError {
    /// Every auth strategy failed. Callers fall back to unauthenticated calls.
    #[error("could not acquire oracle credential after {attempts} attempts: {last_error}")]
    CredentialAcquisition { attempts: usize, last_error: String },

    #[error("oracle transport error: {0}")]
    Transport(String),

    #[error("oracle returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("oracle rejected request (code {code}): {message}")]
    Rejected { code: i64, message: String },

    #[error("malformed oracle response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for OracleError {
    fn from(err: reqwest::Error) -> Self {
        OracleError::Transport(err.to_string())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PlanningError {
    /// Terminal: no plan may be produced.
    #[error("no safe candidates on chain {chain_id} ({checked} checked)")]
    NoSafeCandidates { chain_id: u64, checked: usize },
}
