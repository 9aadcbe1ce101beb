//! Error types for the ABO generator.

use rust_decimal::Decimal;
use thiserror::Error;

/// Result type alias for generator operations
pub type Result<T> = std::result::Result<T, AboError>;

/// Errors that can occur while building or rendering an ABO document.
///
/// Every variant is a validation failure of caller-supplied data, except
/// `Io` and `Csv` which only the outer layers (file sink, batch loader) raise.
#[derive(Error, Debug)]
pub enum AboError {
    /// Account identifier does not match `[prefix-]number/bank`
    #[error("Invalid account number: {0}")]
    InvalidAccountNumber(String),

    /// Document configuration out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Symbol value wider than its fixed-width field
    #[error("{kind} symbol {value} does not fit into {width} digits")]
    SymbolTooLarge {
        kind: &'static str,
        value: u64,
        width: usize,
    },

    /// Transaction amount that cannot be represented in the amount field
    #[error("Invalid amount {amount}: {reason}")]
    InvalidAmount {
        amount: Decimal,
        reason: &'static str,
    },

    /// Sum of all transaction amounts is wider than 15 digits
    #[error("Total amount {total} is too high for the ABO format (max 15 digits)")]
    TotalAmountOverflow { total: u128 },

    /// Failed to read input or write the rendered document
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// A batch input row failed validation
    #[error("Invalid payment at row {row}: {source}")]
    InvalidRecord {
        row: usize,
        #[source]
        source: Box<AboError>,
    },
}
