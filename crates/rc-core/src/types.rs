//! Core type definitions for Redirect Compactor
//!
//! `Redirect` is the rule shape written to the consolidated table and passed
//! between stages. `SourceRedirect` is the record as read from a source list,
//! where `exact` may be absent.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::path;

// =============================================================================
// Redirect
// =============================================================================

/// A single redirect rule.
///
/// When `exact` is false the rule applies to every request path that starts
/// with `from`, and the unmatched remainder of the path is appended to `to`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Redirect {
    /// Request path (or full URL) that triggers the rule
    pub from: String,
    /// Destination path or URL
    pub to: String,
    /// Match `from` verbatim instead of as a prefix
    #[serde(default)]
    pub exact: bool,
}

impl Redirect {
    /// Raw redirect as it appears in a source list (no `exact` flag).
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            exact: false,
        }
    }

    /// Rule matching `from` verbatim.
    pub fn exact(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            exact: true,
            ..Self::new(from, to)
        }
    }

    /// Rule matching any path starting with `from`.
    pub fn prefix(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::new(from, to)
    }

    /// Copy of this redirect with the `exact` flag forced.
    pub fn with_exact(&self, exact: bool) -> Self {
        Self {
            exact,
            ..self.clone()
        }
    }

    /// True if either side is a full URL rather than a site path.
    pub fn is_absolute(&self) -> bool {
        path::is_absolute(&self.from) || path::is_absolute(&self.to)
    }

    /// Number of segments in `from`.
    pub fn segment_count(&self) -> usize {
        path::segment_count(&self.from)
    }
}

// =============================================================================
// SourceRedirect
// =============================================================================

/// A redirect as it appears in a source list.
///
/// `exact` is kept tri-state so that an explicit `false` (a prefix rule copied
/// from a consolidated table) can be told apart from an absent flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRedirect {
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exact: Option<bool>,
}

impl SourceRedirect {
    pub fn new(from: impl Into<String>, to: impl Into<String>, exact: Option<bool>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            exact,
        }
    }

    /// True if the entry is explicitly tagged as a prefix rule.
    pub fn is_prefix_rule(&self) -> bool {
        self.exact == Some(false)
    }
}

impl From<SourceRedirect> for Redirect {
    fn from(source: SourceRedirect) -> Self {
        Redirect {
            from: source.from,
            to: source.to,
            exact: source.exact.unwrap_or(false),
        }
    }
}
