use log::{info, warn};

use rc_core::{consolidate, ConsolidateError, Consolidated, ConversionError, Redirect, RedirectTable, Strategy};

/// What to do when the consolidated table does not reproduce the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerifyPolicy {
    /// Abort without producing a table.
    #[default]
    Fail,
    /// Log every finding and keep the table.
    Warn,
}

#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    pub strategy: Strategy,
    pub policy: VerifyPolicy,
    /// Also run and verify the other strategy, for comparison only.
    pub cross_check: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileStats {
    pub rules_before: usize,
    pub absolute: usize,
    pub rules_after: usize,
    pub exact: usize,
    pub prefix: usize,
}

impl CompileStats {
    fn new(redirects: &[Redirect], consolidated: &Consolidated) -> Self {
        Self {
            rules_before: redirects.len(),
            absolute: redirects.iter().filter(|r| r.is_absolute()).count(),
            rules_after: consolidated.len(),
            exact: consolidated.exact.len(),
            prefix: consolidated.prefix.len(),
        }
    }
}

/// One strategy's table together with its verification findings.
#[derive(Debug, Clone)]
pub struct StrategyReport {
    pub strategy: Strategy,
    pub table: RedirectTable,
    pub stats: CompileStats,
    pub errors: Vec<ConversionError>,
}

#[derive(Debug, Clone)]
pub struct CompileOutput {
    pub table: RedirectTable,
    pub stats: CompileStats,
    /// Findings tolerated under `VerifyPolicy::Warn`; always empty under `Fail`.
    pub errors: Vec<ConversionError>,
    pub cross_check: Option<StrategyReport>,
}

#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error(transparent)]
    Consolidate(#[from] ConsolidateError),
    #[error("{strategy} consolidation failed verification with {} finding(s)", .errors.len())]
    Verification {
        strategy: &'static str,
        errors: Vec<ConversionError>,
    },
}

/// Consolidate `redirects` and verify the result against them.
pub fn compile_redirects(redirects: &[Redirect], options: &CompileOptions) -> Result<CompileOutput, CompileError> {
    let cross_check = if options.cross_check {
        let report = run_strategy(redirects, options.strategy.other())?;
        for error in &report.errors {
            warn!("[{}] {}", report.strategy.name(), error);
        }
        Some(report)
    } else {
        None
    };

    let StrategyReport {
        strategy,
        table,
        stats,
        errors,
    } = run_strategy(redirects, options.strategy)?;

    if !errors.is_empty() {
        match options.policy {
            VerifyPolicy::Fail => {
                return Err(CompileError::Verification {
                    strategy: strategy.name(),
                    errors,
                })
            }
            VerifyPolicy::Warn => {
                for error in &errors {
                    warn!("[{}] {}", strategy.name(), error);
                }
            }
        }
    }

    Ok(CompileOutput {
        table,
        stats,
        errors,
        cross_check,
    })
}

fn run_strategy(redirects: &[Redirect], strategy: Strategy) -> Result<StrategyReport, CompileError> {
    let consolidated = consolidate(redirects, strategy)?;
    let stats = CompileStats::new(redirects, &consolidated);
    info!(
        "{}: {} --> {} ({} exact, {} prefix)",
        strategy.name(),
        stats.rules_before,
        stats.rules_after,
        stats.exact,
        stats.prefix
    );

    let table = RedirectTable::from(consolidated);
    let errors = table.verify(redirects);

    Ok(StrategyReport {
        strategy,
        table,
        stats,
        errors,
    })
}
