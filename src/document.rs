//! ABO document assembly.
//!
//! A [`Document`] holds the batch-level configuration and the ordered list of
//! transactions, and renders the whole file:
//!
//! ```text
//! UHL1<ddmmyy><client name 20><client number 10><interval start 3><interval end 3><code 6><secret code 6>
//! 1 <type> 001000 <origin bank>
//! 2 <origin prefix 6>-<origin number 10> <total 15> <due ddmmyy>
//! <transaction line>...
//! 3 +
//! 5 +
//! ```
//!
//! Every line ends with CRLF. The origin account in the group header is
//! zero-filled on the right, unlike the transaction lines; banks parse it
//! that way, so it is reproduced as-is.

use crate::account::AccountNumber;
use crate::amount::MinorUnits;
use crate::clock::{Clock, SystemClock};
use crate::error::{AboError, Result};
use crate::format;
use crate::transaction::{Symbols, Transaction};
use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;
use std::io::Write;

const DATE_FORMAT: &str = "%d%m%y";
const CLIENT_NAME_WIDTH: usize = 20;
const CLIENT_NUMBER_WIDTH: usize = 10;
const INTERVAL_WIDTH: usize = 3;
const INTERVAL_MIN: u16 = 1;
const INTERVAL_MAX: u16 = 999;
const CODE_WIDTH: usize = 6;

/// Accounting file type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransactionType {
    /// Outgoing payments (1501).
    #[default]
    Payment,

    /// Direct-debit collections (1502).
    Collection,
}

impl TransactionType {
    /// Numeric code written into the accounting-file header.
    pub fn code(&self) -> u16 {
        match self {
            TransactionType::Payment => 1501,
            TransactionType::Collection => 1502,
        }
    }
}

/// Batch-level settings for a [`Document`].
///
/// The defaults are an empty client name, client number 0, interval
/// `1..=999`, codes 0 and [`TransactionType::Payment`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentConfig {
    pub client_name: String,
    pub client_number: u64,
    pub interval_start: u16,
    pub interval_end: u16,
    pub code: u32,
    pub secret_code: u32,
    pub transaction_type: TransactionType,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        DocumentConfig {
            client_name: String::new(),
            client_number: 0,
            interval_start: INTERVAL_MIN,
            interval_end: INTERVAL_MAX,
            code: 0,
            secret_code: 0,
            transaction_type: TransactionType::Payment,
        }
    }
}

impl DocumentConfig {
    pub fn with_client_name(mut self, name: impl Into<String>) -> Self {
        self.client_name = name.into();
        self
    }

    pub fn with_client_number(mut self, number: u64) -> Self {
        self.client_number = number;
        self
    }

    pub fn with_interval(mut self, start: u16, end: u16) -> Self {
        self.interval_start = start;
        self.interval_end = end;
        self
    }

    pub fn with_code(mut self, code: u32) -> Self {
        self.code = code;
        self
    }

    pub fn with_secret_code(mut self, secret_code: u32) -> Self {
        self.secret_code = secret_code;
        self
    }

    pub fn with_transaction_type(mut self, transaction_type: TransactionType) -> Self {
        self.transaction_type = transaction_type;
        self
    }

    fn validate(&self) -> Result<()> {
        if !format::fits(u128::from(self.client_number), CLIENT_NUMBER_WIDTH) {
            return Err(AboError::InvalidConfiguration(format!(
                "client number {} is longer than {} digits",
                self.client_number, CLIENT_NUMBER_WIDTH
            )));
        }

        let in_range = |v: u16| (INTERVAL_MIN..=INTERVAL_MAX).contains(&v);
        if !in_range(self.interval_start)
            || !in_range(self.interval_end)
            || self.interval_end < self.interval_start
        {
            return Err(AboError::InvalidConfiguration(format!(
                "wrong interval {}..{}",
                self.interval_start, self.interval_end
            )));
        }

        for (what, value) in [("code", self.code), ("secret code", self.secret_code)] {
            if !format::fits(u128::from(value), CODE_WIDTH) {
                return Err(AboError::InvalidConfiguration(format!(
                    "{} {} is longer than {} digits",
                    what, value, CODE_WIDTH
                )));
            }
        }

        Ok(())
    }
}

/// Keeps only `A-Z` and `0-9` of the upper-cased name.
fn normalize_client_name(name: &str) -> String {
    name.to_uppercase()
        .chars()
        .filter(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        .collect()
}

/// An ABO document under construction.
///
/// Transactions are append-only and rendered in insertion order. Adding
/// requires `&mut self`; callers sharing a document between threads must wrap
/// it in their own lock.
///
/// # Examples
///
/// ```
/// use abo_generator::{Document, DocumentConfig, FixedClock, Symbols};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let due = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
/// let config = DocumentConfig::default().with_client_name("Acme s.r.o.");
/// let mut doc = Document::new("19-2000145399/0800", due, config).unwrap();
/// doc.add_transaction("2600382187/2010", Decimal::new(100000, 2), Symbols::variable(123), None)
///     .unwrap();
///
/// let today = FixedClock(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
/// let text = doc.render_with(&today).unwrap();
/// assert!(text.starts_with("UHL1150324ACMESRO"));
/// ```
#[derive(Debug, Clone)]
pub struct Document {
    origin: AccountNumber,
    due_date: NaiveDate,
    client_name: String,
    client_number: u64,
    interval_start: u16,
    interval_end: u16,
    code: u32,
    secret_code: u32,
    transaction_type: TransactionType,
    transactions: Vec<Transaction>,
}

impl Document {
    /// Creates an empty document.
    ///
    /// The origin account and the configuration are validated here, so an
    /// invalid setup fails before any transaction is added.
    pub fn new(origin: &str, due_date: NaiveDate, config: DocumentConfig) -> Result<Self> {
        let origin = AccountNumber::parse(origin)?;
        config.validate()?;

        Ok(Document {
            origin,
            due_date,
            client_name: normalize_client_name(&config.client_name),
            client_number: config.client_number,
            interval_start: config.interval_start,
            interval_end: config.interval_end,
            code: config.code,
            secret_code: config.secret_code,
            transaction_type: config.transaction_type,
            transactions: Vec::new(),
        })
    }

    pub fn origin(&self) -> &AccountNumber {
        &self.origin
    }

    pub fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    /// Normalized client name, not yet cut to the header width.
    pub fn client_name(&self) -> &str {
        &self.client_name
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    /// Transactions in insertion order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Validates and appends one payment.
    ///
    /// On error nothing is appended.
    pub fn add_transaction(
        &mut self,
        destination: &str,
        amount: Decimal,
        symbols: Symbols,
        message: Option<&str>,
    ) -> Result<()> {
        let transaction = Transaction::new(destination, amount, symbols, message)?;
        self.push(transaction);
        Ok(())
    }

    /// Appends an already validated transaction.
    pub fn push(&mut self, transaction: Transaction) {
        debug!(
            "Transaction #{}: {} to {}",
            self.transactions.len() + 1,
            transaction.amount(),
            transaction.destination()
        );
        self.transactions.push(transaction);
    }

    /// Sum of all transaction amounts.
    ///
    /// Fails with [`AboError::TotalAmountOverflow`] once the sum no longer
    /// fits into the 15-digit total field.
    pub fn total_amount(&self) -> Result<MinorUnits> {
        let total: u128 = self
            .transactions
            .iter()
            .map(|tx| u128::from(tx.amount().value()))
            .sum();

        match u64::try_from(total) {
            Ok(value) if format::fits(total, MinorUnits::WIDTH) => Ok(MinorUnits::from_minor(value)),
            _ => Err(AboError::TotalAmountOverflow { total }),
        }
    }

    /// Renders the document dated with the local system date.
    pub fn render(&self) -> Result<String> {
        self.render_with(&SystemClock)
    }

    /// Renders the document, taking the generation date from `clock`.
    ///
    /// The output is rebuilt from the current state on every call. The only
    /// failure left at this point is [`AboError::TotalAmountOverflow`].
    pub fn render_with<C: Clock + ?Sized>(&self, clock: &C) -> Result<String> {
        let group_header = self.group_header()?;

        let mut content = self.document_header(clock.today());
        content.push_str(&self.accounting_file_header());
        content.push_str(&group_header);
        for transaction in &self.transactions {
            content.push_str(&transaction.render());
        }
        content.push_str("3 +\r\n5 +\r\n");

        debug!(
            "Rendered ABO document with {} transactions ({} bytes)",
            self.transactions.len(),
            content.len()
        );
        Ok(content)
    }

    /// Renders with the system clock and writes the bytes to `writer`.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        self.write_to_with(writer, &SystemClock)
    }

    /// Renders with `clock` and writes the bytes to `writer`.
    pub fn write_to_with<W: Write, C: Clock + ?Sized>(&self, mut writer: W, clock: &C) -> Result<()> {
        let content = self.render_with(clock)?;
        writer.write_all(content.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    fn document_header(&self, generated: NaiveDate) -> String {
        format!(
            "UHL1{date}{name}{number}{start}{end}{code}{secret}\r\n",
            date = generated.format(DATE_FORMAT),
            name = format::text(&self.client_name, CLIENT_NAME_WIDTH),
            number = format::zero_pad(self.client_number, CLIENT_NUMBER_WIDTH),
            start = format::zero_pad(self.interval_start, INTERVAL_WIDTH),
            end = format::zero_pad(self.interval_end, INTERVAL_WIDTH),
            code = format::zero_pad(self.code, CODE_WIDTH),
            secret = format::zero_pad(self.secret_code, CODE_WIDTH),
        )
    }

    // Batch sequence 001, processing batch 000.
    fn accounting_file_header(&self) -> String {
        format!(
            "1 {} 001000 {}\r\n",
            self.transaction_type.code(),
            self.origin.bank()
        )
    }

    fn group_header(&self) -> Result<String> {
        let total = self.total_amount()?;

        Ok(format!(
            "2 {prefix}-{number} {total} {due}\r\n",
            prefix = format::zero_fill_right(self.origin.prefix(), AccountNumber::PREFIX_WIDTH),
            number = format::zero_fill_right(self.origin.number(), AccountNumber::NUMBER_WIDTH),
            total = format::zero_pad(total.value(), MinorUnits::WIDTH),
            due = self.due_date.format(DATE_FORMAT),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use std::str::FromStr;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn clock() -> FixedClock {
        FixedClock(date(2024, 3, 15))
    }

    fn document(config: DocumentConfig) -> Document {
        Document::new("19-2000145399/0800", date(2024, 3, 20), config).unwrap()
    }

    fn lines(text: &str) -> Vec<&str> {
        text.split_terminator("\r\n").collect()
    }

    #[test]
    fn test_client_name_normalized_at_construction() {
        let doc = document(DocumentConfig::default().with_client_name("Acme s.r.o."));
        assert_eq!(doc.client_name(), "ACMESRO");

        let doc = document(DocumentConfig::default().with_client_name("Žluťoučký kůň 42 a.s."));
        assert_eq!(doc.client_name(), "LUOUKK42AS");
    }

    #[test]
    fn test_client_name_truncated_only_when_rendered() {
        let name = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
        let doc = document(DocumentConfig::default().with_client_name(name));
        assert_eq!(doc.client_name(), name);

        let text = doc.render_with(&clock()).unwrap();
        assert!(lines(&text)[0].starts_with("UHL1150324ABCDEFGHIJKLMNOPQRST0000000000"));
    }

    #[test]
    fn test_document_header_fields() {
        let config = DocumentConfig::default()
            .with_client_name("Acme")
            .with_client_number(1234567890)
            .with_interval(5, 42)
            .with_code(123)
            .with_secret_code(654321);
        let text = document(config).render_with(&clock()).unwrap();

        assert_eq!(
            lines(&text)[0],
            format!("UHL1150324{:<20}1234567890005042000123654321", "ACME")
        );
    }

    #[test]
    fn test_accounting_file_header_per_type() {
        let text = document(DocumentConfig::default()).render_with(&clock()).unwrap();
        assert_eq!(lines(&text)[1], "1 1501 001000 0800");

        let config = DocumentConfig::default().with_transaction_type(TransactionType::Collection);
        let text = document(config).render_with(&clock()).unwrap();
        assert_eq!(lines(&text)[1], "1 1502 001000 0800");
    }

    #[test]
    fn test_group_header_pads_origin_on_the_right() {
        let mut doc = document(DocumentConfig::default());
        doc.add_transaction("456/0100", dec("10"), Symbols::default(), None).unwrap();
        doc.add_transaction("789/0100", dec("0.55"), Symbols::default(), None).unwrap();

        let text = doc.render_with(&clock()).unwrap();
        assert_eq!(lines(&text)[2], "2 190000-2000145399 000000000001055 200324");

        let doc = Document::new("123/0100", date(2024, 1, 2), DocumentConfig::default()).unwrap();
        let text = doc.render_with(&clock()).unwrap();
        assert_eq!(lines(&text)[2], "2 000000-1230000000 000000000000000 020124");
    }

    #[test]
    fn test_empty_document_layout() {
        let text = document(DocumentConfig::default()).render_with(&clock()).unwrap();
        let expected = format!(
            "UHL1150324{}0000000000001999000000000000\r\n\
             1 1501 001000 0800\r\n\
             2 190000-2000145399 000000000000000 200324\r\n\
             3 +\r\n\
             5 +\r\n",
            " ".repeat(20)
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn test_interval_boundaries() {
        let ok = |start, end| {
            Document::new(
                "456/0100",
                date(2024, 1, 1),
                DocumentConfig::default().with_interval(start, end),
            )
        };

        assert!(ok(1, 999).is_ok());
        assert!(ok(7, 7).is_ok());
        for (start, end) in [(0, 999), (1, 1000), (10, 9), (1000, 1000), (0, 0)] {
            assert!(
                matches!(ok(start, end), Err(AboError::InvalidConfiguration(_))),
                "interval {start}..{end} should be rejected"
            );
        }
    }

    #[test]
    fn test_client_number_boundaries() {
        let with_number = |n| {
            Document::new(
                "456/0100",
                date(2024, 1, 1),
                DocumentConfig::default().with_client_number(n),
            )
        };

        assert!(with_number(9_999_999_999).is_ok());
        assert!(matches!(
            with_number(10_000_000_000),
            Err(AboError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_code_boundaries() {
        let base = || DocumentConfig::default();
        assert!(Document::new("456/0100", date(2024, 1, 1), base().with_code(999_999)).is_ok());
        assert!(Document::new("456/0100", date(2024, 1, 1), base().with_code(1_000_000)).is_err());
        assert!(
            Document::new("456/0100", date(2024, 1, 1), base().with_secret_code(1_000_000)).is_err()
        );
    }

    #[test]
    fn test_invalid_origin_rejected() {
        let err = Document::new("19-2000145399", date(2024, 1, 1), DocumentConfig::default())
            .unwrap_err();
        assert!(matches!(err, AboError::InvalidAccountNumber(_)));
    }

    #[test]
    fn test_failed_add_appends_nothing() {
        let mut doc = document(DocumentConfig::default());
        doc.add_transaction("456/0100", dec("1"), Symbols::default(), None).unwrap();

        assert!(doc.add_transaction("bad", dec("1"), Symbols::default(), None).is_err());
        assert!(doc
            .add_transaction("456/0100", dec("1"), Symbols::variable(10_000_000_000), None)
            .is_err());
        assert!(doc.add_transaction("456/0100", dec("-1"), Symbols::default(), None).is_err());

        assert_eq!(doc.transactions().len(), 1);
    }

    #[test]
    fn test_total_amount_overflow() {
        let mut doc = document(DocumentConfig::default());
        doc.add_transaction("456/0100", dec("9999999999999.99"), Symbols::default(), None)
            .unwrap();
        assert_eq!(doc.total_amount().unwrap().value(), 999_999_999_999_999);

        doc.add_transaction("789/0100", dec("0.01"), Symbols::default(), None).unwrap();
        assert!(matches!(
            doc.render_with(&clock()),
            Err(AboError::TotalAmountOverflow { total }) if total == 1_000_000_000_000_000
        ));
    }

    #[test]
    fn test_render_is_repeatable_and_tracks_additions() {
        let mut doc = document(DocumentConfig::default());
        doc.add_transaction("456/0100", dec("1"), Symbols::default(), None).unwrap();

        let first = doc.render_with(&clock()).unwrap();
        let second = doc.render_with(&clock()).unwrap();
        assert_eq!(first, second);

        doc.add_transaction("789/0100", dec("2"), Symbols::default(), None).unwrap();
        let third = doc.render_with(&clock()).unwrap();
        assert_ne!(first, third);
        assert_eq!(lines(&third).len(), lines(&first).len() + 1);
        assert!(lines(&third)[2].contains(" 000000000000300 "));
    }

    #[test]
    fn test_write_to_emits_rendered_bytes() {
        let mut doc = document(DocumentConfig::default());
        doc.add_transaction("456/0100", dec("1"), Symbols::default(), Some("x")).unwrap();

        let mut out = Vec::new();
        doc.write_to_with(&mut out, &clock()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), doc.render_with(&clock()).unwrap());
    }
}
