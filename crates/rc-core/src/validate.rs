//! Input checks run before consolidation

use std::collections::HashMap;

use crate::types::{Redirect, SourceRedirect};

/// Error type for malformed redirect lists.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("Duplicate redirect source '{from}' (entries {first} and {second})")]
    DuplicateSource {
        from: String,
        first: usize,
        second: usize,
    },
    #[error("Entry {index} ('{from}') is a consolidated prefix rule, not a raw redirect")]
    PrefixRuleInSource { from: String, index: usize },
}

/// Turn source entries into raw redirects, rejecting consolidated prefix rules.
///
/// An entry with an explicit `"exact": false` was copied from a consolidated
/// table. Treating it as a raw redirect would drop every path under its prefix.
pub fn check_source_redirects(sources: Vec<SourceRedirect>) -> Result<Vec<Redirect>, InputError> {
    if let Some((index, source)) = sources.iter().enumerate().find(|(_, s)| s.is_prefix_rule()) {
        return Err(InputError::PrefixRuleInSource {
            from: source.from.clone(),
            index,
        });
    }
    Ok(sources.into_iter().map(Redirect::from).collect())
}

/// Reject lists where two entries share the same `from`.
///
/// Consolidation keys redirects by source path, so a repeated source has no
/// single correct destination.
pub fn check_unique_sources(redirects: &[Redirect]) -> Result<(), InputError> {
    let mut seen: HashMap<&str, usize> = HashMap::with_capacity(redirects.len());
    for (index, redirect) in redirects.iter().enumerate() {
        if let Some(&first) = seen.get(redirect.from.as_str()) {
            return Err(InputError::DuplicateSource {
                from: redirect.from.clone(),
                first,
                second: index,
            });
        }
        seen.insert(&redirect.from, index);
    }
    Ok(())
}
