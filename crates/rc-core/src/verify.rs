//! Rule application and round-trip verification
//!
//! A consolidated list is evaluated the way the hosting layer evaluates it: the
//! first exact rule whose `from` equals the request path wins, otherwise the
//! first prefix rule whose `from` starts the request path. Verification replays
//! every original redirect through that evaluation and reports any difference.

use std::fmt;

use log::info;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::path;
use crate::types::Redirect;

/// A behavioral difference between the original list and a converted one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "lowercase")]
#[ts(export)]
pub enum ConversionError {
    /// No rule covers the original `from` anymore.
    Missing {
        #[serde(rename = "oldRedirect")]
        original: Redirect,
    },
    /// A rule covers the original `from` but sends it somewhere else.
    Wrong {
        #[serde(rename = "oldRedirect")]
        original: Redirect,
        #[serde(rename = "convertedRedirect")]
        applied: Redirect,
    },
}

impl ConversionError {
    /// The original redirect this finding refers to.
    pub fn original(&self) -> &Redirect {
        match self {
            Self::Missing { original } | Self::Wrong { original, .. } => original,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Missing { .. } => "missing",
            Self::Wrong { .. } => "wrong",
        }
    }
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { original } => {
                write!(f, "missing: '{}' -> '{}' has no rule", original.from, original.to)
            }
            Self::Wrong { original, applied } => {
                let kind = if applied.exact { "exact" } else { "prefix" };
                write!(
                    f,
                    "wrong: '{}' -> '{}' now handled by {} rule '{}' -> '{}'",
                    original.from, original.to, kind, applied.from, applied.to
                )
            }
        }
    }
}

/// The rule applied to `path`: first exact match, else first matching prefix.
pub fn applied_rule<'a>(rules: &'a [Redirect], path: &str) -> Option<&'a Redirect> {
    rules
        .iter()
        .find(|r| r.exact && r.from == path)
        .or_else(|| rules.iter().find(|r| !r.exact && path.starts_with(r.from.as_str())))
}

/// Destination produced by `rule` for `path`, or `None` if it does not match.
pub fn apply(rule: &Redirect, path: &str) -> Option<String> {
    if rule.exact {
        (rule.from == path).then(|| rule.to.clone())
    } else {
        path::rewrite(&rule.from, &rule.to, path)
    }
}

/// Replay every original redirect through `converted` and collect differences.
///
/// An empty result means `converted` redirects every original `from` exactly
/// where the original list did.
pub fn verify_conversion(original: &[Redirect], converted: &[Redirect]) -> Vec<ConversionError> {
    let mut errors = Vec::new();

    for old in original {
        let Some(rule) = applied_rule(converted, &old.from) else {
            errors.push(ConversionError::Missing {
                original: old.clone(),
            });
            continue;
        };

        if apply(rule, &old.from).as_deref() != Some(old.to.as_str()) {
            errors.push(ConversionError::Wrong {
                original: old.clone(),
                applied: rule.clone(),
            });
        }
    }

    info!("Checked {} redirects", original.len());
    errors
}
