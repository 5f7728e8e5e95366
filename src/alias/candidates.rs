//! Candidate prefix generation.
//!
//! A candidate is built by truncating each leading word part of a canonical
//! name and concatenating the truncations, so `"Goblin Boss"` at length 3
//! yields `"GBo"` and `"GoB"`. The search walks truncation lengths depth-first,
//! trying the middle of each part's allowed range first and fanning out
//! (`mid, mid+1, mid-1, mid+2, ...`), and stops as soon as the budget is
//! filled.

use std::collections::BTreeMap;

use log::trace;

use super::ambiguity::ambiguity;
use super::name::CanonicalName;
use super::numbers::{smallest_free_number, NumberSet};

/// A generated prefix with the score used to pick between candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub prefix: String,
    /// Tracked names the prefix could abbreviate, excluding the new name.
    pub ambiguity: usize,
    /// Smallest free number under the prefix.
    pub number: u32,
    /// Position in generation order.
    pub order: usize,
}

impl Candidate {
    fn rank(&self) -> (usize, u32, usize, &str) {
        (self.ambiguity, self.number, self.order, &self.prefix)
    }
}

struct Frame {
    part: usize,
    prefix: String,
}

/// Generate up to `budget` distinct prefixes for `name`.
///
/// At most `target_length` leading parts are used and each contributes at
/// least one letter. When the considered parts hold fewer letters than
/// `target_length` the target shrinks to fit, so a non-empty name always
/// yields at least one prefix for a non-zero target and budget.
pub fn generate(name: &CanonicalName, target_length: usize, budget: usize) -> Vec<String> {
    let mut out = Vec::new();
    if target_length == 0 || budget == 0 {
        return out;
    }

    let parts: Vec<&str> = name.parts().take(target_length).collect();
    let n = parts.len();
    // tail[i]: letters available in parts[i..]
    let mut tail = vec![0usize; n + 1];
    for i in (0..n).rev() {
        tail[i] = tail[i + 1] + parts[i].len();
    }
    let target = target_length.min(tail[0]);

    let mut stack = vec![Frame {
        part: 0,
        prefix: String::with_capacity(target),
    }];
    while let Some(frame) = stack.pop() {
        if out.len() >= budget {
            break;
        }
        if frame.part == n {
            out.push(frame.prefix);
            continue;
        }

        let remaining = target - frame.prefix.len();
        let later_parts = n - frame.part - 1;
        let lo = remaining.saturating_sub(tail[frame.part + 1]).max(1);
        let hi = parts[frame.part]
            .len()
            .min(remaining.saturating_sub(later_parts));
        if lo > hi {
            continue;
        }

        // Pushed in reverse so the stack pops them in exploration order.
        for len in balanced_order(lo, hi).into_iter().rev() {
            let mut prefix = frame.prefix.clone();
            prefix.push_str(&parts[frame.part][..len]);
            stack.push(Frame {
                part: frame.part + 1,
                prefix,
            });
        }
    }
    out
}

/// `lo..=hi` starting at the midpoint and alternating outward.
fn balanced_order(lo: usize, hi: usize) -> Vec<usize> {
    let mid = lo + (hi - lo) / 2;
    let mut order = Vec::with_capacity(hi - lo + 1);
    order.push(mid);
    let mut d = 1;
    while mid + d <= hi || mid >= lo + d {
        if mid + d <= hi {
            order.push(mid + d);
        }
        if mid >= lo + d {
            order.push(mid - d);
        }
        d += 1;
    }
    order
}

/// Generate and score candidates against the names tracked so far.
pub fn scored_candidates<'a, I>(
    name: &CanonicalName,
    target_length: usize,
    budget: usize,
    tracked: I,
    numbers_in_use: &BTreeMap<String, NumberSet>,
    force_non_zero: bool,
) -> Vec<Candidate>
where
    I: IntoIterator<Item = &'a CanonicalName> + Clone,
{
    generate(name, target_length, budget)
        .into_iter()
        .enumerate()
        .map(|(order, prefix)| {
            let candidate = Candidate {
                ambiguity: ambiguity(&prefix, tracked.clone()),
                number: smallest_free_number(&prefix, numbers_in_use, force_non_zero),
                order,
                prefix,
            };
            trace!(
                "candidate {} ambiguity={} number={}",
                candidate.prefix,
                candidate.ambiguity,
                candidate.number
            );
            candidate
        })
        .collect()
}

/// Lowest ambiguity, then lowest number, then generation order, then prefix.
pub fn best_candidate(candidates: Vec<Candidate>) -> Option<Candidate> {
    candidates
        .into_iter()
        .min_by(|a, b| a.rank().cmp(&b.rank()))
}
