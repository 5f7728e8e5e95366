//! Name canonicalization.
//!
//! Every tracked entity is keyed by its canonical name: ASCII-letter words,
//! each capitalized (`"goblin  BOSS"` becomes `"Goblin Boss"`), joined by a
//! single space. Two names denote the same entity iff their canonical forms
//! are equal.

use std::fmt;
use std::str::FromStr;

use super::errors::AliasError;

/// A name normalized to capitalized, single-space separated letter words.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CanonicalName(String);

impl CanonicalName {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Word parts in order. Never empty.
    pub fn parts(&self) -> impl Iterator<Item = &str> {
        self.0.split(' ')
    }

    pub fn part_count(&self) -> usize {
        self.parts().count()
    }
}

impl fmt::Display for CanonicalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CanonicalName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for CanonicalName {
    type Err = AliasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        canonicalize(s)
    }
}

/// Canonicalize a free-form entity name.
///
/// Runs of whitespace collapse to one separator and the ends are trimmed.
/// Fails with [`AliasError::NotCanonicalizable`] when a word contains a
/// non-letter or when there are no words at all.
pub fn canonicalize(name: &str) -> Result<CanonicalName, AliasError> {
    let mut parts = Vec::new();
    for word in name.split_whitespace() {
        if !word.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(AliasError::NotCanonicalizable(name.to_string()));
        }
        let mut chars = word.chars();
        let mut part = String::with_capacity(word.len());
        if let Some(first) = chars.next() {
            part.push(first.to_ascii_uppercase());
        }
        part.extend(chars.map(|c| c.to_ascii_lowercase()));
        parts.push(part);
    }

    if parts.is_empty() {
        return Err(AliasError::NotCanonicalizable(name.to_string()));
    }
    Ok(CanonicalName(parts.join(" ")))
}
