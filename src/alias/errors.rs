use thiserror::Error;

/// Errors raised by the alias allocator.
///
/// None of these are worth retrying: every operation is a pure function of
/// its inputs and the registry state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AliasError {
    /// The name contains something other than ASCII letters and whitespace,
    /// or has no letters at all.
    #[error("name cannot be canonicalized: {0:?}")]
    NotCanonicalizable(String),

    /// Alias text does not match `letters` followed by optional `digits`.
    #[error("invalid alias format: {0:?}")]
    InvalidAliasFormat(String),

    /// Seed data lists the same canonical name under two different prefixes.
    #[error("inconsistent prefix for {name}: already {existing}, got {conflicting}")]
    InconsistentPrefix {
        name: String,
        existing: String,
        conflicting: String,
    },

    /// Seed data lists the same alias twice.
    #[error("duplicate alias in seed data: {0}")]
    DuplicateAlias(String),

    /// Candidate generation produced nothing for a new name.
    #[error("no alias candidate available for {0}")]
    NoCandidateAvailable(String),
}
