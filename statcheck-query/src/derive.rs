// Ground truth for a metric: wrap the user query in a single-row aggregate and
// run it through the same engine and session.
//
// The user query is embedded verbatim. Predicate semantics (char padding,
// decimal coercion) stay whatever the engine implements.

use std::sync::Arc;

use statcheck_core::{Error, Query, Result, ResultSet, SetupStage};
use tracing::debug;

use crate::engine::QueryEngine;
use crate::metric::{ColumnMetricKind, Metric};

/// Double-quoted SQL identifier with embedded quotes doubled.
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Aggregate query whose single scalar is `metric` evaluated over `sql`.
pub fn derived_sql(sql: &str, metric: &Metric) -> String {
    let aggregate = match metric {
        Metric::OutputRowCount => "count(*)".to_string(),
        Metric::Column { column, kind } => {
            let column = quote_identifier(column);
            match kind {
                ColumnMetricKind::DistinctValuesCount => format!("count(DISTINCT {})", column),
                // nullif keeps an empty input from dividing by zero; it reads back as NULL
                ColumnMetricKind::NullsFraction => format!(
                    "CAST(count(*) FILTER (WHERE {} IS NULL) AS double) / nullif(count(*), 0)",
                    column
                ),
                ColumnMetricKind::Min => format!("min({})", column),
                ColumnMetricKind::Max => format!("max({})", column),
            }
        }
    };
    format!("SELECT {} FROM ({})", aggregate, sql)
}

pub struct ActualMetricDeriver {
    engine: Arc<dyn QueryEngine>,
}

impl ActualMetricDeriver {
    pub fn new(engine: Arc<dyn QueryEngine>) -> Self {
        Self { engine }
    }

    pub async fn derive(&self, query: &Query, metric: &Metric) -> Result<Option<f64>> {
        metric.validate()?;
        let derived = query.with_sql(derived_sql(query.sql(), metric));
        debug!("Deriving {} with [{}]", metric, derived);

        let result = self
            .engine
            .execute(derived.sql(), derived.session())
            .await
            .map_err(|e| Error::Setup {
                stage: SetupStage::Execute,
                sql: derived.sql().to_string(),
                message: e.to_string(),
            })?;

        read_scalar(derived.sql(), &result)
    }
}

/// No rows reads as absent, as does SQL NULL or a non-numeric scalar.
fn read_scalar(sql: &str, result: &ResultSet) -> Result<Option<f64>> {
    match result.rows.as_slice() {
        [] => Ok(None),
        [row] if row.len() == 1 => Ok(row.get(0).and_then(|value| value.as_f64())),
        [row] => Err(Error::UnexpectedResult {
            sql: sql.to_string(),
            message: format!("expected a single column, got {}", row.len()),
        }),
        rows => Err(Error::UnexpectedResult {
            sql: sql.to_string(),
            message: format!("expected a single row, got {}", rows.len()),
        }),
    }
}
