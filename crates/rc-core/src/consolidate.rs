//! Redirect consolidation
//!
//! Replaces groups of exact redirects that share a path prefix (and map onto a
//! shared destination prefix) with a single prefix rule.
//!
//! The default strategy sweeps prefix lengths from one segment upwards so each
//! redirect is folded into the broadest prefix that still reproduces its
//! destination. A group is only accepted if its rule cannot shadow a redirect
//! that an earlier group already claimed (and vice versa), taking the final rule
//! order into account.

use std::cmp::{Ordering, Reverse};
use std::collections::BTreeMap;

use log::debug;

use crate::legacy;
use crate::partition::{partition, Partition};
use crate::path::{rewrite_preserves, truncate_to_segments};
use crate::types::Redirect;
use crate::validate::{check_unique_sources, InputError};

/// Error type for consolidation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConsolidateError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("Exact redirect '{from}' passed to prefix rule ordering")]
    ExactInPrefixTier { from: String },
}

/// Consolidation algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Shortest prefix first, grouping only candidates whose suffix survives.
    #[default]
    Iterative,
    /// Longest shared path first, filtering suffixes after grouping.
    Legacy,
}

impl Strategy {
    pub fn name(self) -> &'static str {
        match self {
            Self::Iterative => "iterative",
            Self::Legacy => "legacy",
        }
    }

    /// The strategy to cross-check against.
    pub fn other(self) -> Self {
        match self {
            Self::Iterative => Self::Legacy,
            Self::Legacy => Self::Iterative,
        }
    }
}

/// Result of consolidation, split by rule kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Consolidated {
    /// Exact rules sorted by `from`.
    pub exact: Vec<Redirect>,
    /// Prefix rules in evaluation order.
    pub prefix: Vec<Redirect>,
}

impl Consolidated {
    pub fn len(&self) -> usize {
        self.exact.len() + self.prefix.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exact.is_empty() && self.prefix.is_empty()
    }

    /// All rules in evaluation order: exact rules, then prefix rules.
    pub fn rules(&self) -> impl Iterator<Item = &Redirect> {
        self.exact.iter().chain(self.prefix.iter())
    }

    pub fn into_rules(self) -> Vec<Redirect> {
        let mut rules = self.exact;
        rules.extend(self.prefix);
        rules
    }
}

/// Consolidate a raw redirect list.
///
/// Absolute redirects pass through as exact rules. Fails if two entries share
/// the same `from`.
pub fn consolidate(redirects: &[Redirect], strategy: Strategy) -> Result<Consolidated, ConsolidateError> {
    check_unique_sources(redirects)?;
    let Partition { absolute, relative } = partition(redirects);
    let grouping = group(&relative, strategy);
    let out = merge(grouping, relative, absolute)?;

    debug!(
        "{} consolidation: {} -> {} ({} exact, {} prefix)",
        strategy.name(),
        redirects.len(),
        out.len(),
        out.exact.len(),
        out.prefix.len()
    );

    Ok(out)
}

/// Consolidate redirects already known to be relative.
pub fn consolidate_relative(relative: &[Redirect], strategy: Strategy) -> Result<Consolidated, ConsolidateError> {
    check_unique_sources(relative)?;
    let grouping = group(relative, strategy);
    merge(grouping, relative.to_vec(), Vec::new())
}

fn group(relative: &[Redirect], strategy: Strategy) -> Grouping {
    match strategy {
        Strategy::Iterative => group_iterative(relative),
        Strategy::Legacy => legacy::group_legacy(relative),
    }
}

// =============================================================================
// Grouping
// =============================================================================

/// Prefix rules found so far and the relative redirect indices each one claims.
pub(crate) struct Grouping {
    rules: Vec<Redirect>,
    owner: Vec<Option<usize>>,
}

impl Grouping {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            rules: Vec::new(),
            owner: vec![None; len],
        }
    }

    pub(crate) fn is_grouped(&self, index: usize) -> bool {
        self.owner[index].is_some()
    }

    pub(crate) fn accept(&mut self, rule: Redirect, members: &[usize]) {
        let rule_index = self.rules.len();
        self.rules.push(rule);
        for &index in members {
            self.owner[index] = Some(rule_index);
        }
    }

    /// First redirect whose destination would change if `rule` (claiming
    /// `members`) joined the table, given prefix evaluation order.
    fn shadowing_conflict<'a>(
        &self,
        relative: &'a [Redirect],
        rule: &Redirect,
        members: &[usize],
    ) -> Option<&'a Redirect> {
        // `rule` evaluated before the rule that owns an already grouped redirect
        for (index, owner) in self.owner.iter().enumerate() {
            let Some(owner) = owner else { continue };
            let redirect = &relative[index];
            if prefix_precedence(rule, &self.rules[*owner]) == Ordering::Less
                && !rewrite_preserves(&rule.from, &rule.to, &redirect.from, &redirect.to)
            {
                return Some(redirect);
            }
        }

        // Existing rules evaluated before `rule` that would capture its members
        for existing in &self.rules {
            if prefix_precedence(existing, rule) != Ordering::Less {
                continue;
            }
            for &index in members {
                let redirect = &relative[index];
                if !rewrite_preserves(&existing.from, &existing.to, &redirect.from, &redirect.to) {
                    return Some(redirect);
                }
            }
        }

        None
    }
}

struct Candidate<'a> {
    to_prefix: &'a str,
    index: usize,
}

/// `(fromPrefix, toPrefix)` for `redirect` at prefix length `len`, if the part
/// of `from` beyond the prefix is also a literal suffix of `to`.
fn candidate(redirect: &Redirect, len: usize) -> Option<(String, &str)> {
    let from_prefix = truncate_to_segments(&redirect.from, len);
    let suffix = redirect.from.strip_prefix(from_prefix.as_str())?;
    let to_prefix = redirect.to.strip_suffix(suffix)?;
    Some((from_prefix, to_prefix))
}

pub(crate) fn group_iterative(relative: &[Redirect]) -> Grouping {
    let mut grouping = Grouping::new(relative.len());
    let max_segments = relative.iter().map(Redirect::segment_count).max().unwrap_or(0);

    for len in 1..max_segments {
        let mut groups: BTreeMap<String, Vec<Candidate<'_>>> = BTreeMap::new();
        for (index, redirect) in relative.iter().enumerate() {
            if grouping.is_grouped(index) {
                continue;
            }
            if let Some((from_prefix, to_prefix)) = candidate(redirect, len) {
                groups
                    .entry(from_prefix)
                    .or_default()
                    .push(Candidate { to_prefix, index });
            }
        }

        for (from_prefix, members) in groups {
            if members.len() < 2 {
                continue;
            }
            let to_prefix = members[0].to_prefix;
            if members.iter().any(|m| m.to_prefix != to_prefix) {
                continue;
            }

            let rule = Redirect::prefix(from_prefix, to_prefix);
            let indices: Vec<usize> = members.iter().map(|m| m.index).collect();
            if let Some(shadowed) = grouping.shadowing_conflict(relative, &rule, &indices) {
                debug!(
                    "Skipping '{}' -> '{}': would redirect '{}' away from '{}'",
                    rule.from, rule.to, shadowed.from, shadowed.to
                );
                continue;
            }

            debug!(
                "Grouped {} redirects under '{}' -> '{}' (length {})",
                indices.len(),
                rule.from,
                rule.to,
                len
            );
            grouping.accept(rule, &indices);
        }
    }

    grouping
}

// =============================================================================
// Ordering
// =============================================================================

/// Evaluation order of prefix rules: more segments first, then `from` ascending.
pub fn prefix_precedence(a: &Redirect, b: &Redirect) -> Ordering {
    b.segment_count()
        .cmp(&a.segment_count())
        .then_with(|| a.from.cmp(&b.from))
}

/// Sort exact rules by `from`.
pub fn sort_exact_rules(rules: &mut [Redirect]) {
    rules.sort_by(|a, b| a.from.cmp(&b.from));
}

/// Put prefix rules into evaluation order.
///
/// Only prefix rules may be passed; an exact rule here means the caller mixed
/// up the two tiers.
pub fn order_prefix_rules(mut rules: Vec<Redirect>) -> Result<Vec<Redirect>, ConsolidateError> {
    if let Some(rule) = rules.iter().find(|r| r.exact) {
        return Err(ConsolidateError::ExactInPrefixTier {
            from: rule.from.clone(),
        });
    }

    rules.sort_by(|a, b| a.from.cmp(&b.from));
    // Longer paths take precedence over shorter ones. Stable, so ties keep `from` order.
    rules.sort_by_key(|r| Reverse(r.segment_count()));
    Ok(rules)
}

fn merge(
    grouping: Grouping,
    relative: Vec<Redirect>,
    absolute: Vec<Redirect>,
) -> Result<Consolidated, ConsolidateError> {
    let Grouping { rules, owner } = grouping;

    let mut exact: Vec<Redirect> = relative
        .into_iter()
        .zip(owner)
        .filter(|(_, owner)| owner.is_none())
        .map(|(redirect, _)| redirect)
        .chain(absolute)
        .map(|mut redirect| {
            redirect.exact = true;
            redirect
        })
        .collect();
    sort_exact_rules(&mut exact);

    let prefix = order_prefix_rules(rules)?;

    Ok(Consolidated { exact, prefix })
}
