use thiserror::Error;

/// Message shown when the server does not answer within the request timeout.
pub const TIMEOUT_MESSAGE: &str = "Response took longer than expected and timed out.";

#[derive(Error, Debug)]
pub enum LoanError {
    #[error("{}", TIMEOUT_MESSAGE)]
    Timeout,
    /// The server rejected the input; carries `detail[0].msg` verbatim.
    #[error("{0}")]
    Rejected(String),
    #[error("Server returned status {status} without a readable error message.")]
    MalformedRejection { status: u16 },
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Could not decode server response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Server returned an empty payment plan.")]
    EmptyPlan,
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, LoanError>;
