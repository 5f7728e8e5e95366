//! # Alias Allocation
//!
//! Assigns every tracked entity (player character, monster, swarm member) a
//! short alias such as `Gob`, `Gob1` or `GBo`: a letters-only prefix derived
//! from the entity's name plus an optional disambiguation number.
//!
//! ## Guarantees
//!
//! - **Uniqueness**: no two registered entities share an alias.
//! - **Stability**: the same canonical name always reuses its prefix; only the
//!   number changes (`Goblin` -> `Gob`, `Gob1`, `Gob2`).
//! - **Low ambiguity**: new prefixes are chosen to match as few other tracked
//!   names as possible when a user types them.
//! - **Reproducibility**: identical seed pairs and identical `add` sequences
//!   produce identical aliases.
//!
//! The registry holds no durable state. Callers rebuild it from their
//! persisted `(alias, name)` pairs, add new entities, persist the returned
//! aliases and drop it.
//!
//! ```
//! use rollcall::alias::AliasRegistry;
//!
//! let mut registry = AliasRegistry::from_pairs([("Gob", "Goblin")])?;
//! assert_eq!(registry.add("goblin", 3, false)?, "Gob1");
//! assert_eq!(registry.check_ambiguity("Gob")?, 1);
//! # Ok::<(), rollcall::alias::AliasError>(())
//! ```
//!
//! A registry is not synchronized. Serialize `add` calls for one collection
//! (one encounter) behind whatever lock guards that collection's record.

pub mod ambiguity;
pub mod candidates;
pub mod errors;
pub mod format;
pub mod name;
pub mod numbers;

use std::collections::BTreeMap;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::logutil::escape_log;

pub use errors::AliasError;
pub use format::{format_alias, parse_alias, Alias};
pub use name::{canonicalize, CanonicalName};
pub use numbers::NumberSet;

use candidates::{best_candidate, scored_candidates};

/// Default cap on prefix length.
pub const DEFAULT_MAX_PREFIX_LENGTH: usize = 10;
/// Default number of candidates considered for a new prefix.
pub const DEFAULT_CANDIDATE_BUDGET: usize = 16;

/// Bounds on prefix generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasLimits {
    #[serde(default = "default_max_prefix_length")]
    pub max_prefix_length: usize,
    #[serde(default = "default_candidate_budget")]
    pub candidate_budget: usize,
}

fn default_max_prefix_length() -> usize {
    DEFAULT_MAX_PREFIX_LENGTH
}

fn default_candidate_budget() -> usize {
    DEFAULT_CANDIDATE_BUDGET
}

impl Default for AliasLimits {
    fn default() -> Self {
        AliasLimits {
            max_prefix_length: DEFAULT_MAX_PREFIX_LENGTH,
            candidate_budget: DEFAULT_CANDIDATE_BUDGET,
        }
    }
}

/// Name -> prefix and prefix -> numbers for one collection of entities.
#[derive(Debug, Clone, Default)]
pub struct AliasRegistry {
    limits: AliasLimits,
    prefix_of: BTreeMap<CanonicalName, String>,
    numbers_in_use: BTreeMap<String, NumberSet>,
}

impl AliasRegistry {
    /// An empty registry with default limits.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: AliasLimits) -> Self {
        AliasRegistry {
            limits,
            ..Self::default()
        }
    }

    /// Rebuild a registry from already-assigned `(alias, name)` pairs.
    pub fn from_pairs<I, A, N>(pairs: I) -> Result<Self, AliasError>
    where
        I: IntoIterator<Item = (A, N)>,
        A: AsRef<str>,
        N: AsRef<str>,
    {
        Self::from_pairs_with_limits(pairs, AliasLimits::default())
    }

    /// Like [`AliasRegistry::from_pairs`] with explicit limits.
    ///
    /// Any malformed alias, non-canonicalizable name, name seen under two
    /// prefixes or repeated alias aborts construction.
    pub fn from_pairs_with_limits<I, A, N>(pairs: I, limits: AliasLimits) -> Result<Self, AliasError>
    where
        I: IntoIterator<Item = (A, N)>,
        A: AsRef<str>,
        N: AsRef<str>,
    {
        let mut registry = Self::with_limits(limits);
        for (alias, name) in pairs {
            let (alias, name) = (alias.as_ref(), name.as_ref());
            if let Err(e) = registry.seed(alias, name) {
                warn!(
                    "rejecting alias seed {} for {}: {}",
                    escape_log(alias),
                    escape_log(name),
                    e
                );
                return Err(e);
            }
        }
        debug!(
            "alias registry seeded with {} aliases over {} names",
            registry.len(),
            registry.prefix_of.len()
        );
        Ok(registry)
    }

    fn seed(&mut self, alias: &str, name: &str) -> Result<(), AliasError> {
        let Alias { prefix, number } = parse_alias(alias)?;
        let canonical = canonicalize(name)?;

        if let Some(existing) = self.prefix_of.get(&canonical) {
            if *existing != prefix {
                return Err(AliasError::InconsistentPrefix {
                    name: canonical.to_string(),
                    existing: existing.clone(),
                    conflicting: prefix,
                });
            }
        }
        if self
            .numbers_in_use
            .get(&prefix)
            .is_some_and(|set| set.contains(number))
        {
            return Err(AliasError::DuplicateAlias(format_alias(&prefix, number)));
        }

        self.register(canonical, prefix, number);
        Ok(())
    }

    fn register(&mut self, name: CanonicalName, prefix: String, number: u32) {
        self.numbers_in_use
            .entry(prefix.clone())
            .or_default()
            .insert(number);
        self.prefix_of.entry(name).or_insert(prefix);
    }

    /// Assign an alias to a new entity called `name`.
    ///
    /// A name already tracked keeps its prefix and gets the next free number.
    /// Otherwise candidate prefixes of `prefix_length` letters (clamped to
    /// `1..=max_prefix_length`) are scored and the least ambiguous wins. With
    /// `always_add_number` the number is never 0, so the alias always shows a
    /// number.
    pub fn add(
        &mut self,
        name: &str,
        prefix_length: usize,
        always_add_number: bool,
    ) -> Result<String, AliasError> {
        let canonical = canonicalize(name)?;

        let (prefix, number) = match self.prefix_of.get(&canonical) {
            Some(prefix) => {
                let number = self
                    .numbers_in_use
                    .get(prefix)
                    .map(|set| set.smallest_free(always_add_number))
                    .unwrap_or(u32::from(always_add_number));
                (prefix.clone(), number)
            }
            None => {
                let target = prefix_length.clamp(1, self.limits.max_prefix_length.max(1));
                let candidates = scored_candidates(
                    &canonical,
                    target,
                    self.limits.candidate_budget,
                    self.prefix_of.keys(),
                    &self.numbers_in_use,
                    always_add_number,
                );
                let best = best_candidate(candidates)
                    .ok_or_else(|| AliasError::NoCandidateAvailable(canonical.to_string()))?;
                (best.prefix, best.number)
            }
        };

        let alias = format_alias(&prefix, number);
        debug!("assigned alias {} to {}", alias, canonical);
        self.register(canonical, prefix, number);
        Ok(alias)
    }

    /// How many tracked names the alias's prefix could abbreviate.
    ///
    /// 0 means it matches nothing tracked.
    pub fn check_ambiguity(&self, alias: &str) -> Result<usize, AliasError> {
        let Alias { prefix, .. } = parse_alias(alias)?;
        Ok(ambiguity::ambiguity(&prefix, self.prefix_of.keys()))
    }

    /// Every registered alias, ordered by prefix bytes then number.
    pub fn aliases(&self) -> Vec<String> {
        self.numbers_in_use
            .iter()
            .flat_map(|(prefix, set)| set.iter().map(move |n| format_alias(prefix, n)))
            .collect()
    }

    /// The prefix assigned to a canonical name, if tracked.
    pub fn prefix_of(&self, name: &CanonicalName) -> Option<&str> {
        self.prefix_of.get(name).map(String::as_str)
    }

    pub fn tracked_names(&self) -> impl Iterator<Item = &CanonicalName> {
        self.prefix_of.keys()
    }

    pub fn limits(&self) -> AliasLimits {
        self.limits
    }

    /// Number of registered aliases.
    pub fn len(&self) -> usize {
        self.numbers_in_use.values().map(NumberSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.numbers_in_use.is_empty()
    }
}
