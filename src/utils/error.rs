//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while talking to the FAST Protocol or Etherscan APIs
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    #[error("Etherscan returned an error status: {0}")]
    EtherscanStatus(String),
}

/// Errors that can occur while parsing API payloads
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("JSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid payload shape: {0}")]
    InvalidShape(String),

    #[error("Invalid balance value: {0}")]
    InvalidBalance(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Errors raised when constructing records from untrusted data
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Wallet address is empty")]
    EmptyAddress,

    #[error("Negative balance for wallet {address}: {balance}")]
    NegativeBalance { address: String, balance: String },

    #[error("Collection id or name is empty")]
    EmptyCollectionId,

    #[error("Negative total value for collection {id}: {value}")]
    NegativeValue { id: String, value: String },
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
