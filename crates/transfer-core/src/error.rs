//! Error types for the transfer core
//!
//! One discriminated error type for every failure the submission flow can
//! surface. The `Display` string of each variant is the message shown to the
//! user, so the precondition texts are fixed.

use std::fmt;

/// Result type
pub type Result<T> = std::result::Result<T, Error>;

/// Transfer core errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No source account is available for the current shielded toggle
    #[error("Source address is not defined")]
    SourceAddressUndefined,

    /// Chain parameters have not been loaded
    #[error("Chain ID is undefined")]
    ChainIdUndefined,

    /// No asset has been chosen
    #[error("No asset is selected")]
    NoAssetSelected,

    /// Gas estimation has not produced a config for the active variant
    #[error("No gas config")]
    NoGasConfig,

    /// A transaction is still displayed or being signed
    #[error("A transaction is already in progress")]
    TransactionInProgress,

    /// The signing service returned nothing
    #[error("Invalid transaction response")]
    InvalidTransactionResponse,

    /// The record factory produced no transaction for a response
    #[error("Couldn't create TransferData object")]
    EmptyTransferData,

    /// The record factory produced more than one transaction for a response
    #[error("Batched transfers are not supported: response produced {0} transactions")]
    BatchedTransferData(usize),

    /// Failure raised by the signing/broadcast service
    #[error("{0}")]
    Executor(String),

    /// Invalid address format
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Invalid amount
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Memo too long
    #[error("Memo too long: {0}")]
    MemoTooLong(String),

    /// Invalid memo
    #[error("Invalid memo: {0}")]
    InvalidMemo(String),

    /// Transaction store error
    #[error("Storage error: {0}")]
    Store(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Chain parameter error
    #[error("Chain parameter error: {0}")]
    Params(#[from] nam_transfer_params::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Check if error was raised before the signing service was invoked
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Error::SourceAddressUndefined
                | Error::ChainIdUndefined
                | Error::NoAssetSelected
                | Error::NoGasConfig
        )
    }

    /// Check if error is a user-facing error (vs internal error)
    pub fn is_user_error(&self) -> bool {
        self.is_precondition()
            || matches!(
                self,
                Error::InvalidAddress(_)
                    | Error::InvalidAmount(_)
                    | Error::MemoTooLong(_)
                    | Error::InvalidMemo(_)
                    | Error::Executor(_)
                    | Error::TransactionInProgress
            )
    }

    /// Get error category for logging
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::SourceAddressUndefined
            | Error::ChainIdUndefined
            | Error::NoAssetSelected
            | Error::NoGasConfig
            | Error::TransactionInProgress => ErrorCategory::Precondition,
            Error::InvalidTransactionResponse
            | Error::EmptyTransferData
            | Error::BatchedTransferData(_) => ErrorCategory::Response,
            Error::Executor(_) => ErrorCategory::Executor,
            Error::InvalidAddress(_)
            | Error::InvalidAmount(_)
            | Error::MemoTooLong(_)
            | Error::InvalidMemo(_) => ErrorCategory::Input,
            Error::Store(_) => ErrorCategory::Storage,
            Error::Config(_)
            | Error::Params(_)
            | Error::Io(_)
            | Error::Serialization(_)
            | Error::Other(_) => ErrorCategory::Internal,
        }
    }
}

/// Error categories for classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Submission preconditions not met
    Precondition,
    /// Signing service returned an unusable result
    Response,
    /// Signing service failed
    Executor,
    /// Invalid user input
    Input,
    /// Transaction store errors
    Storage,
    /// Internal/system errors
    Internal,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Precondition => write!(f, "Precondition"),
            ErrorCategory::Response => write!(f, "Response"),
            ErrorCategory::Executor => write!(f, "Executor"),
            ErrorCategory::Input => write!(f, "Input"),
            ErrorCategory::Storage => write!(f, "Storage"),
            ErrorCategory::Internal => write!(f, "Internal"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precondition_messages() {
        assert_eq!(
            Error::SourceAddressUndefined.to_string(),
            "Source address is not defined"
        );
        assert_eq!(Error::ChainIdUndefined.to_string(), "Chain ID is undefined");
        assert_eq!(Error::NoAssetSelected.to_string(), "No asset is selected");
        assert_eq!(Error::NoGasConfig.to_string(), "No gas config");
    }

    #[test]
    fn test_executor_message_is_passed_through() {
        let error = Error::Executor("Request rejected by user".to_string());
        assert_eq!(error.to_string(), "Request rejected by user");
        assert!(error.is_user_error());
        assert!(!error.is_precondition());
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(Error::NoGasConfig.category(), ErrorCategory::Precondition);
        assert_eq!(Error::EmptyTransferData.category(), ErrorCategory::Response);
        assert_eq!(
            Error::BatchedTransferData(2).category(),
            ErrorCategory::Response
        );
        assert_eq!(
            Error::Store("locked".to_string()).category(),
            ErrorCategory::Storage
        );
        assert_eq!(
            Error::MemoTooLong("test".to_string()).category(),
            ErrorCategory::Input
        );
    }

    #[test]
    fn test_category_display() {
        assert_eq!(ErrorCategory::Precondition.to_string(), "Precondition");
        assert_eq!(ErrorCategory::Executor.to_string(), "Executor");
    }
}
