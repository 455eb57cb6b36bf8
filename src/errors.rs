use crate::chain::Chain;
use std::env::VarError;

/// The three families every failure resolves to.
///
/// Callers that need to distinguish a remote rejection from a broken exchange
/// should match on [`EtherscanError::kind`] rather than on message text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller-side contract violation, detected before any network I/O.
    Validation,
    /// The remote service answered but reported a semantic failure.
    Api,
    /// The HTTP exchange itself could not be completed as intended.
    Transport,
}

#[derive(Debug, thiserror::Error)]
pub enum EtherscanError {
    #[error("Chain {0} not supported")]
    ChainNotSupported(Chain),
    #[error("Missing field: {0}")]
    Builder(String),
    #[error(transparent)]
    EnvVarNotFound(#[from] VarError),
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
    #[error("Invalid transaction hash: {0}")]
    InvalidTxHash(String),
    #[error("Invalid block number: {0}")]
    InvalidBlockNumber(String),

    #[error("API error {code}: {message}")]
    Api { code: String, message: String },
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
    #[error("Invalid API Key")]
    InvalidApiKey,
    #[error("JSON-RPC error {code}: {message}")]
    JsonRpc { code: i64, message: String },
    #[error("Contract execution call failed: {0}")]
    ExecutionFailed(String),
    #[error("Balance failed")]
    BalanceFailed,
    #[error("Transaction receipt failed")]
    TransactionReceiptFailed,
    #[error("Gas estimation failed")]
    GasEstimationFailed,
    #[error("Eth supply failed")]
    EthSupplyFailed,
    #[error("Block number by timestamp failed")]
    BlockNumberByTimestampFailed,
    #[error("Contract source code not verified: {0}")]
    ContractCodeNotVerified(String),
    #[error("Bad status code: {0}")]
    BadStatusCode(String),

    #[error("Request timed out: {0}")]
    Timeout(String),
    #[error("HTTP status {status}: {text}")]
    BadHttpStatus { status: u16, text: String },
    #[error(transparent)]
    Reqwest(reqwest::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error("Invalid hex quantity: {0}")]
    InvalidHexQuantity(String),
}

impl EtherscanError {
    /// Classify this error into one of the three failure families.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ChainNotSupported(_) |
            Self::Builder(_) |
            Self::EnvVarNotFound(_) |
            Self::InvalidAddress(_) |
            Self::InvalidTxHash(_) |
            Self::InvalidBlockNumber(_) => ErrorKind::Validation,

            Self::Api { .. } |
            Self::RateLimitExceeded |
            Self::InvalidApiKey |
            Self::JsonRpc { .. } |
            Self::ExecutionFailed(_) |
            Self::BalanceFailed |
            Self::TransactionReceiptFailed |
            Self::GasEstimationFailed |
            Self::EthSupplyFailed |
            Self::BlockNumberByTimestampFailed |
            Self::ContractCodeNotVerified(_) |
            Self::BadStatusCode(_) => ErrorKind::Api,

            Self::Timeout(_) |
            Self::BadHttpStatus { .. } |
            Self::Reqwest(_) |
            Self::Serde(_) |
            Self::InvalidHexQuantity(_) => ErrorKind::Transport,
        }
    }
}

// A timed-out exchange must stay distinguishable from other transport
// failures, so the reqwest conversion cannot be a plain `#[from]`.
impl From<reqwest::Error> for EtherscanError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            EtherscanError::Timeout(err.to_string())
        } else {
            EtherscanError::Reqwest(err)
        }
    }
}
