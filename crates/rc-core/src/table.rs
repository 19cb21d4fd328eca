//! Ordered redirect table

use serde::{Deserialize, Serialize};

use crate::consolidate::Consolidated;
use crate::types::Redirect;
use crate::verify::{applied_rule, apply, verify_conversion, ConversionError};

/// Rules in evaluation order, as written to and read from the output artifact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RedirectTable {
    rules: Vec<Redirect>,
}

impl RedirectTable {
    pub fn new(rules: Vec<Redirect>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[Redirect] {
        &self.rules
    }

    pub fn into_rules(self) -> Vec<Redirect> {
        self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn exact_count(&self) -> usize {
        self.rules.iter().filter(|r| r.exact).count()
    }

    pub fn prefix_count(&self) -> usize {
        self.rules.len() - self.exact_count()
    }

    /// Where a request for `path` ends up, or `None` if no rule applies.
    pub fn resolve(&self, path: &str) -> Option<String> {
        let rule = applied_rule(&self.rules, path)?;
        apply(rule, path)
    }

    /// Check this table against the list it was built from.
    pub fn verify(&self, original: &[Redirect]) -> Vec<ConversionError> {
        verify_conversion(original, &self.rules)
    }
}

impl From<Consolidated> for RedirectTable {
    fn from(consolidated: Consolidated) -> Self {
        Self::new(consolidated.into_rules())
    }
}
