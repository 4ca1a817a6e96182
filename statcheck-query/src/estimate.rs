// Reads the optimizer's estimate for a metric off the planned query

use std::sync::Arc;

use statcheck_core::{Error, Query, Result, Session, SetupStage, COLLECT_PLAN_STATISTICS_FOR_ALL_QUERIES};
use tracing::debug;

use crate::engine::QueryEngine;
use crate::metric::{ColumnMetricKind, Metric};
use crate::plan::PlanWithStatistics;

/// Engines skip statistics for ordinary (non-EXPLAIN) queries unless asked.
pub fn ensure_statistics_collection(session: &Session) -> Result<()> {
    if session.collects_plan_statistics() {
        Ok(())
    } else {
        Err(Error::Configuration(format!(
            "session must set {} = true",
            COLLECT_PLAN_STATISTICS_FOR_ALL_QUERIES
        )))
    }
}

pub struct EstimateExtractor {
    engine: Arc<dyn QueryEngine>,
}

impl EstimateExtractor {
    pub fn new(engine: Arc<dyn QueryEngine>) -> Self {
        Self { engine }
    }

    /// Plan once; read any number of metrics from the result.
    pub async fn plan(&self, query: &Query) -> Result<PlannedQuery> {
        ensure_statistics_collection(query.session())?;
        debug!("Planning [{}]", query.sql());

        let plan = self
            .engine
            .plan(query.sql(), query.session())
            .await
            .map_err(|e| Error::Setup {
                stage: SetupStage::Plan,
                sql: query.sql().to_string(),
                message: e.to_string(),
            })?;

        Ok(PlannedQuery {
            sql: query.sql().to_string(),
            plan,
        })
    }

    pub async fn extract(&self, query: &Query, metric: &Metric) -> Result<Option<f64>> {
        self.plan(query).await?.estimate(metric)
    }
}

#[derive(Debug, Clone)]
pub struct PlannedQuery {
    sql: String,
    plan: PlanWithStatistics,
}

impl PlannedQuery {
    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn plan(&self) -> &PlanWithStatistics {
        &self.plan
    }

    /// `Ok(None)` when the plan has no estimate for the metric. A column that
    /// is not an output of the query is an error.
    pub fn estimate(&self, metric: &Metric) -> Result<Option<f64>> {
        match metric {
            Metric::OutputRowCount => Ok(self
                .plan
                .final_statistics()
                .and_then(|statistics| statistics.output_row_count)
                .and_then(finite)),
            Metric::Column { column, kind } => {
                let symbol = self.plan.output_symbol(column).ok_or_else(|| {
                    let outputs: Vec<&str> = self.plan.output_names().collect();
                    Error::ColumnNotFound(format!(
                        "'{}' is not an output column of [{}]; outputs are {:?}",
                        column, self.sql, outputs
                    ))
                })?;

                let Some(symbol_statistics) = self
                    .plan
                    .final_statistics()
                    .and_then(|statistics| statistics.symbol(symbol))
                else {
                    debug!("No statistics for symbol {} of [{}]", symbol, self.sql);
                    return Ok(None);
                };

                let value = match kind {
                    ColumnMetricKind::DistinctValuesCount => symbol_statistics.distinct_values_count,
                    ColumnMetricKind::NullsFraction => symbol_statistics.nulls_fraction,
                    ColumnMetricKind::Min => symbol_statistics.low_value,
                    ColumnMetricKind::Max => symbol_statistics.high_value,
                };
                Ok(value.and_then(finite))
            }
        }
    }
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}
