//! Alias text format: one or more ASCII letters followed by optional digits.
//!
//! The letters are the prefix, the digits the disambiguation number. A bare
//! prefix means number 0 and number 0 is never rendered.

use std::fmt;
use std::str::FromStr;

use super::errors::AliasError;

/// A parsed alias.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Alias {
    pub prefix: String,
    pub number: u32,
}

impl Alias {
    pub fn new(prefix: impl Into<String>, number: u32) -> Self {
        Alias {
            prefix: prefix.into(),
            number,
        }
    }
}

impl fmt::Display for Alias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.number == 0 {
            f.write_str(&self.prefix)
        } else {
            write!(f, "{}{}", self.prefix, self.number)
        }
    }
}

impl FromStr for Alias {
    type Err = AliasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_alias(s)
    }
}

/// Split an alias into prefix and number.
pub fn parse_alias(alias: &str) -> Result<Alias, AliasError> {
    let invalid = || AliasError::InvalidAliasFormat(alias.to_string());

    let split = alias
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(alias.len());
    let (prefix, digits) = alias.split_at(split);
    if prefix.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }

    let number = if digits.is_empty() {
        0
    } else {
        digits.parse::<u32>().map_err(|_| invalid())?
    };
    Ok(Alias::new(prefix, number))
}

/// Render `prefix` + `number`, omitting a zero number.
pub fn format_alias(prefix: &str, number: u32) -> String {
    if number == 0 {
        prefix.to_string()
    } else {
        format!("{prefix}{number}")
    }
}
