//! CSV batch input.
//!
//! Reads payment rows of the form
//!
//! ```text
//! account,amount,variable_symbol,constant_symbol,specific_symbol,message
//! 2600382187/2010,1000.00,123,308,,Invoice 1
//! ```
//!
//! Only `account` and `amount` are required; blank or missing symbol columns
//! default to zero.

use crate::document::Document;
use crate::error::{AboError, Result};
use crate::transaction::{Symbols, Transaction};
use csv::{ReaderBuilder, Trim};
use log::debug;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

/// Raw payment row as read from CSV.
#[derive(Debug, Deserialize)]
pub struct PaymentRecord {
    /// Destination account in `[prefix-]number/bank` notation
    pub account: String,

    /// Amount in major units, e.g. `1000.50`
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,

    #[serde(default)]
    pub variable_symbol: Option<u64>,

    #[serde(default)]
    pub constant_symbol: Option<u64>,

    #[serde(default)]
    pub specific_symbol: Option<u64>,

    /// Free text, cut to 35 characters
    #[serde(default)]
    pub message: Option<String>,
}

impl PaymentRecord {
    /// Validates the row into a transaction.
    pub fn to_transaction(&self) -> Result<Transaction> {
        let symbols = Symbols {
            variable: self.variable_symbol.unwrap_or(0),
            constant: self.constant_symbol.unwrap_or(0),
            specific: self.specific_symbol.unwrap_or(0),
        };

        let message = self.message.as_deref().filter(|m| !m.is_empty());
        Transaction::new(&self.account, self.amount, symbols, message)
    }
}

/// Loads all payment rows from `reader` into `document`.
///
/// Every row is validated before anything is appended: if any row fails, the
/// document is left untouched and the error names the row (the header is
/// row 1). Returns the number of transactions appended.
pub fn load_csv<R: Read>(document: &mut Document, reader: R) -> Result<usize> {
    let mut csv_reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut parsed = Vec::new();
    for (row_idx, result) in csv_reader.deserialize::<PaymentRecord>().enumerate() {
        let row = row_idx + 2; // 1-indexed, accounting for header row

        let transaction = result
            .map_err(AboError::from)
            .and_then(|record| record.to_transaction())
            .map_err(|e| AboError::InvalidRecord {
                row,
                source: Box::new(e),
            })?;
        parsed.push(transaction);
    }

    let count = parsed.len();
    for transaction in parsed {
        document.push(transaction);
    }

    debug!("Loaded {} payments from CSV", count);
    Ok(count)
}
