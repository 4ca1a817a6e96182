use statcheck_core::Result;
use statcheck_query::Metric;

use crate::strategy::{no_error, ComparisonStrategy};

/// One declared comparison: a metric and the rule it is judged by
#[derive(Debug, Clone, PartialEq)]
pub struct MetricCheck {
    pub metric: Metric,
    pub strategy: ComparisonStrategy,
}

/// Checks declared against a single query. Built once, then only read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Checks {
    checks: Vec<MetricCheck>,
}

impl Checks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn estimate(mut self, metric: Metric, strategy: ComparisonStrategy) -> Self {
        self.checks.push(MetricCheck { metric, strategy });
        self
    }

    /// Textual declaration, e.g. `("DISTINCT_VALUES_COUNT", Some("i_item_sk"), "noError")`.
    pub fn estimate_named(self, metric: &str, column: Option<&str>, strategy: &str) -> Result<Self> {
        let metric = Metric::from_parts(metric, column)?;
        let strategy = strategy.parse::<ComparisonStrategy>()?;
        Ok(self.estimate(metric, strategy))
    }

    /// Nulls fraction, distinct values and range, all exact.
    pub fn verify_exact_column_statistics(self, column: &str) -> Self {
        self.verify_column_statistics(column, no_error())
    }

    pub fn verify_column_statistics(self, column: &str, strategy: ComparisonStrategy) -> Self {
        self.verify_character_column_statistics(column, strategy)
            .estimate(Metric::min(column), strategy)
            .estimate(Metric::max(column), strategy)
    }

    /// Character columns have no numeric range, so only nulls and distinct values.
    pub fn verify_character_column_statistics(self, column: &str, strategy: ComparisonStrategy) -> Self {
        self.estimate(Metric::nulls_fraction(column), strategy)
            .estimate(Metric::distinct_values_count(column), strategy)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MetricCheck> {
        self.checks.iter()
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    pub fn validate(&self) -> Result<()> {
        for check in &self.checks {
            check.metric.validate()?;
            check.strategy.validate()?;
        }
        Ok(())
    }
}
