//! Ambiguity scoring.
//!
//! A prefix is read as a sequence of runs, each one uppercase letter followed
//! by any number of lowercase letters (`"GrOb"` is `["Gr", "Ob"]`). It could
//! abbreviate a canonical name when run *i* is a case-sensitive prefix of word
//! part *i* for every run and the name has at least as many parts as there
//! are runs. The ambiguity of a prefix is how many tracked names it could
//! abbreviate.
//!
//! Scores are always computed on demand; the tracked set grows with every
//! added entity.

use super::name::CanonicalName;

/// Segment `prefix` into uppercase-initiated runs.
///
/// Returns `None` when the text does not segment that way (empty, leading
/// lowercase letter, or any non-letter), which can abbreviate nothing.
pub fn uppercase_runs(prefix: &str) -> Option<Vec<&str>> {
    let mut runs = Vec::new();
    let mut start = None;
    for (i, b) in prefix.bytes().enumerate() {
        if b.is_ascii_uppercase() {
            if let Some(s) = start {
                runs.push(&prefix[s..i]);
            }
            start = Some(i);
        } else if !b.is_ascii_lowercase() || start.is_none() {
            return None;
        }
    }
    runs.push(&prefix[start?..]);
    Some(runs)
}

/// Whether `prefix` could be an alias for `name`.
pub fn could_abbreviate(prefix: &str, name: &CanonicalName) -> bool {
    match uppercase_runs(prefix) {
        Some(runs) => runs_match(&runs, name),
        None => false,
    }
}

fn runs_match(runs: &[&str], name: &CanonicalName) -> bool {
    runs.len() <= name.part_count()
        && runs
            .iter()
            .zip(name.parts())
            .all(|(run, part)| part.starts_with(run))
}

/// Count the tracked names `prefix` could abbreviate.
pub fn ambiguity<'a, I>(prefix: &str, tracked: I) -> usize
where
    I: IntoIterator<Item = &'a CanonicalName>,
{
    let Some(runs) = uppercase_runs(prefix) else {
        return 0;
    };
    tracked
        .into_iter()
        .filter(|name| runs_match(&runs, name))
        .count()
}
