//! Payment lines of an ABO document.

use crate::account::AccountNumber;
use crate::amount::MinorUnits;
use crate::error::{AboError, Result};
use crate::format;
use rust_decimal::Decimal;

/// Maximum number of message characters kept on a line.
pub const MESSAGE_WIDTH: usize = 35;

/// Payment symbols carried by each transaction line.
///
/// All three default to zero, which the bank reads as "not set".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Symbols {
    /// Variable symbol (up to 10 digits)
    pub variable: u64,

    /// Constant symbol (up to 4 digits)
    pub constant: u64,

    /// Specific symbol (up to 10 digits)
    pub specific: u64,
}

impl Symbols {
    pub const VARIABLE_WIDTH: usize = 10;
    pub const CONSTANT_WIDTH: usize = 4;
    pub const SPECIFIC_WIDTH: usize = 10;

    /// Symbols with only the variable symbol set.
    pub fn variable(variable: u64) -> Self {
        Symbols {
            variable,
            ..Symbols::default()
        }
    }

    pub fn with_constant(mut self, constant: u64) -> Self {
        self.constant = constant;
        self
    }

    pub fn with_specific(mut self, specific: u64) -> Self {
        self.specific = specific;
        self
    }

    /// Checks every symbol against its field width.
    fn validate(&self) -> Result<()> {
        check_symbol("variable", self.variable, Self::VARIABLE_WIDTH)?;
        check_symbol("constant", self.constant, Self::CONSTANT_WIDTH)?;
        check_symbol("specific", self.specific, Self::SPECIFIC_WIDTH)?;
        Ok(())
    }
}

fn check_symbol(kind: &'static str, value: u64, width: usize) -> Result<()> {
    if format::fits(u128::from(value), width) {
        Ok(())
    } else {
        Err(AboError::SymbolTooLarge { kind, value, width })
    }
}

/// One validated payment line.
///
/// Created through [`Transaction::new`] (or `Document::add_transaction`) and
/// immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    destination: AccountNumber,
    amount: MinorUnits,
    symbols: Symbols,
    message: String,
}

impl Transaction {
    /// Validates the inputs and builds a transaction.
    ///
    /// The destination goes through [`AccountNumber::parse`], the amount
    /// through [`MinorUnits::from_major`]. Symbols wider than their field are
    /// rejected; the message is cut to its first 35 characters.
    ///
    /// The message is copied as given. Pass ASCII text if the rendered
    /// document has to stay ASCII-only.
    pub fn new(
        destination: &str,
        amount: Decimal,
        symbols: Symbols,
        message: Option<&str>,
    ) -> Result<Self> {
        let destination = AccountNumber::parse(destination)?;
        let amount = MinorUnits::from_major(amount)?;
        symbols.validate()?;
        let message = message
            .map(|m| m.chars().take(MESSAGE_WIDTH).collect())
            .unwrap_or_default();

        Ok(Transaction {
            destination,
            amount,
            symbols,
            message,
        })
    }

    pub fn destination(&self) -> &AccountNumber {
        &self.destination
    }

    pub fn amount(&self) -> MinorUnits {
        self.amount
    }

    pub fn symbols(&self) -> Symbols {
        self.symbols
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Renders the CRLF-terminated transaction line.
    ///
    /// Every field here is zero-filled on the left. Widths were checked in
    /// [`Transaction::new`], so rendering cannot fail.
    pub fn render(&self) -> String {
        format!(
            "{prefix}-{number} {amount} {variable} {bank}{constant} {specific} AV:{message}\r\n",
            prefix = format::zero_fill_left(self.destination.prefix(), AccountNumber::PREFIX_WIDTH),
            number = format::zero_fill_left(self.destination.number(), AccountNumber::NUMBER_WIDTH),
            amount = format::zero_pad(self.amount.value(), MinorUnits::WIDTH),
            variable = format::zero_pad(self.symbols.variable, Symbols::VARIABLE_WIDTH),
            bank = format::zero_fill_left(self.destination.bank(), AccountNumber::BANK_WIDTH),
            constant = format::zero_pad(self.symbols.constant, Symbols::CONSTANT_WIDTH),
            specific = format::zero_pad(self.symbols.specific, Symbols::SPECIFIC_WIDTH),
            message = self.message,
        )
    }
}
