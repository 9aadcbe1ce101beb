//! Czech domestic account numbers in `[prefix-]number/bank` notation.

use crate::error::{AboError, Result};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static ACCOUNT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?P<prefix>[0-9]{1,6})-)?(?P<number>[0-9]{1,10})/(?P<bank>[0-9]{4})$")
        .expect("account number pattern is valid")
});

/// A parsed account identifier.
///
/// All three parts are kept as digit strings so that leading zeros in the
/// bank code (`0100`, `0800`) survive untouched.
///
/// # Examples
///
/// ```
/// use abo_generator::AccountNumber;
///
/// let account = AccountNumber::parse("19-2000145399/0800").unwrap();
/// assert_eq!(account.prefix(), "19");
/// assert_eq!(account.number(), "2000145399");
/// assert_eq!(account.bank(), "0800");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccountNumber {
    prefix: String,
    number: String,
    bank: String,
}

impl AccountNumber {
    /// Width of the prefix field.
    pub const PREFIX_WIDTH: usize = 6;

    /// Width of the base number field.
    pub const NUMBER_WIDTH: usize = 10;

    /// Width of the bank code field.
    pub const BANK_WIDTH: usize = 4;

    /// Parses `[prefix-]number/bank`.
    ///
    /// The whole input must match and only ASCII digits count; surrounding
    /// whitespace, other Unicode digits or any other character fails with
    /// [`AboError::InvalidAccountNumber`].
    pub fn parse(text: &str) -> Result<Self> {
        let caps = ACCOUNT_PATTERN
            .captures(text)
            .ok_or_else(|| AboError::InvalidAccountNumber(text.to_string()))?;

        let group = |name: &str| {
            caps.name(name)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default()
        };

        Ok(AccountNumber {
            prefix: group("prefix"),
            number: group("number"),
            bank: group("bank"),
        })
    }

    /// Prefix digits, empty when the account has none.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Base account number digits.
    pub fn number(&self) -> &str {
        &self.number
    }

    /// Four-digit bank code.
    pub fn bank(&self) -> &str {
        &self.bank
    }
}

impl FromStr for AccountNumber {
    type Err = AboError;

    fn from_str(s: &str) -> Result<Self> {
        AccountNumber::parse(s)
    }
}

impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.prefix.is_empty() {
            write!(f, "{}-", self.prefix)?;
        }
        write!(f, "{}/{}", self.number, self.bank)
    }
}
