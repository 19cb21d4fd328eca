//! Absolute / relative split

use crate::types::Redirect;

/// Redirects split by whether they involve a full URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    /// Redirects whose `from` or `to` is a full URL. Always kept as exact rules.
    pub absolute: Vec<Redirect>,
    /// Site-internal redirects, eligible for consolidation.
    pub relative: Vec<Redirect>,
}

/// Split redirects into absolute and relative, preserving input order within
/// each side.
pub fn partition(redirects: &[Redirect]) -> Partition {
    let mut out = Partition::default();
    for redirect in redirects {
        if redirect.is_absolute() {
            out.absolute.push(redirect.clone());
        } else {
            out.relative.push(redirect.clone());
        }
    }
    out
}
