//! Longest-path-first consolidation
//!
//! Groups redirects by their longest shared truncated path, then drops members
//! whose destination does not keep the same suffix. Produces more rules than
//! the iterative strategy on typical input and is kept for cross-checking.

use std::collections::BTreeMap;

use log::debug;

use crate::consolidate::Grouping;
use crate::types::Redirect;

/// Redirects sharing a truncated path, with each member's suffix beyond it.
struct PrefixMatch {
    prefix: String,
    members: Vec<(usize, String)>,
}

pub(crate) fn group_legacy(relative: &[Redirect]) -> Grouping {
    let matches = shared_prefixes(relative);

    let mut grouping = Grouping::new(relative.len());
    for PrefixMatch { prefix, members } in matches {
        let kept: Vec<(usize, &str)> = members
            .iter()
            .filter_map(|(index, suffix)| {
                let to_prefix = relative[*index].to.strip_suffix(suffix.as_str())?;
                Some((*index, to_prefix))
            })
            .collect();

        if kept.len() < 2 {
            continue;
        }

        let to_prefix = kept[0].1;
        if kept.iter().any(|(_, p)| *p != to_prefix) {
            continue;
        }

        debug!("Legacy group '{}' -> '{}' ({} redirects)", prefix, to_prefix, kept.len());
        let indices: Vec<usize> = kept.iter().map(|(index, _)| *index).collect();
        grouping.accept(Redirect::prefix(prefix, to_prefix), &indices);
    }

    grouping
}

/// Every truncated path shared by at least two redirects, longest first.
///
/// Paths are split on `/` keeping the empty component before the leading
/// slash, and a redirect is claimed by the first (longest) shared prefix it
/// takes part in.
fn shared_prefixes(relative: &[Redirect]) -> Vec<PrefixMatch> {
    let paths: Vec<Vec<&str>> = relative.iter().map(|r| r.from.split('/').collect()).collect();
    let max_len = paths.iter().map(Vec::len).max().unwrap_or(0);

    let mut handled = vec![false; paths.len()];
    let mut out = Vec::new();

    // Length 1 is the empty component before the first slash
    for len in (2..=max_len).rev() {
        let mut by_prefix: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for (index, path) in paths.iter().enumerate() {
            if path.len() < len || handled[index] {
                continue;
            }
            by_prefix.entry(path[..len].join("/")).or_default().push(index);
        }

        for (prefix, indices) in by_prefix {
            if indices.len() < 2 {
                continue;
            }
            let members = indices
                .iter()
                .map(|&index| {
                    handled[index] = true;
                    let rest = paths[index][len..].join("/");
                    let suffix = if rest.is_empty() { rest } else { format!("/{rest}") };
                    (index, suffix)
                })
                .collect();
            out.push(PrefixMatch { prefix, members });
        }
    }

    out
}
