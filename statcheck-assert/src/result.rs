// Per-metric outcomes and the per-query report built from them

use statcheck_core::{Error, Result};
use statcheck_query::Metric;
use std::fmt;

use crate::strategy::{ComparisonStrategy, Outcome};

#[derive(Debug, Clone, PartialEq)]
pub struct CheckResult {
    pub metric: Metric,
    pub strategy: ComparisonStrategy,
    pub estimated: Option<f64>,
    pub actual: Option<f64>,
    pub outcome: Outcome,
}

impl CheckResult {
    pub fn passed(&self) -> bool {
        self.outcome.pass
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}]: estimated {}, actual {}: {}",
            self.metric,
            self.strategy,
            render(self.estimated),
            render(self.actual),
            self.outcome.detail
        )
    }
}

fn render(value: Option<f64>) -> String {
    value.map_or_else(|| "<none>".to_string(), |v| v.to_string())
}

/// Every declared check for one query, in declaration order
#[derive(Debug, Clone, PartialEq)]
pub struct AssertionResult {
    pub sql: String,
    pub results: Vec<CheckResult>,
}

impl AssertionResult {
    pub fn passed(&self) -> bool {
        self.results.iter().all(CheckResult::passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &CheckResult> {
        self.results.iter().filter(|result| !result.passed())
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    pub fn into_result(self) -> Result<()> {
        if self.passed() {
            Ok(())
        } else {
            Err(Error::Mismatch(self.to_string()))
        }
    }

    /// Panics with the full report when any check failed.
    #[track_caller]
    pub fn assert_passed(&self) {
        if !self.passed() {
            panic!("{}", self);
        }
    }
}

/// Lists the failing checks only; a passing result renders a one-line summary.
impl fmt::Display for AssertionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.passed() {
            return write!(f, "{} checks passed for [{}]", self.results.len(), self.sql);
        }

        writeln!(
            f,
            "{} of {} checks failed for [{}]",
            self.failure_count(),
            self.results.len(),
            self.sql
        )?;
        for failure in self.failures() {
            writeln!(f, "  {}", failure)?;
        }
        Ok(())
    }
}
