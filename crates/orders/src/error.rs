use alloy_primitives::TxHash;
use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum ReconciliationError {
    #[error("invalid backend URL `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("backend unreachable: {0}")]
    Http(#[from] reqwest::Error),
    #[error("backend answered {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("transaction {0} was already reported")]
    AlreadyReported(TxHash),
}
