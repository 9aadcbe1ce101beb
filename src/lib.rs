//! # ABO Generator
//!
//! Builds fixed-width ABO banking interchange files (CSOB-compatible
//! variant) from a batch of payment or collection orders.
//!
//! ## Design Principles
//!
//! - **Exact amounts**: `rust_decimal` input, stored as integer minor units
//! - **Validate early**: bad accounts, symbols and settings fail on entry
//! - **Byte-exact output**: fixed field widths, CRLF line endings
//! - **Deterministic output**: generation date comes from an injectable [`Clock`]
//!
//! ## Example
//!
//! ```no_run
//! use abo_generator::{Document, DocumentConfig, Symbols};
//! use chrono::NaiveDate;
//! use rust_decimal::Decimal;
//!
//! let due = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
//! let mut doc = Document::new("19-2000145399/0800", due, DocumentConfig::default()).unwrap();
//! doc.add_transaction("2600382187/2010", Decimal::new(100000, 2), Symbols::variable(123), None)
//!     .unwrap();
//! doc.write_to(std::io::stdout()).unwrap();
//! ```

pub mod account;
pub mod amount;
pub mod batch;
pub mod clock;
pub mod document;
pub mod error;
pub mod format;
pub mod transaction;

pub use account::AccountNumber;
pub use amount::MinorUnits;
pub use batch::{load_csv, PaymentRecord};
pub use clock::{Clock, FixedClock, SystemClock};
pub use document::{Document, DocumentConfig, TransactionType};
pub use error::{AboError, Result};
pub use transaction::{Symbols, Transaction};
