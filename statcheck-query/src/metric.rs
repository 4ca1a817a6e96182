// Measurable quantities of a query's output

use serde::{Deserialize, Serialize};
use statcheck_core::{Error, Result};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ColumnMetricKind {
    DistinctValuesCount,
    NullsFraction,
    Min,
    Max,
}

impl ColumnMetricKind {
    pub fn name(&self) -> &'static str {
        match self {
            ColumnMetricKind::DistinctValuesCount => "DISTINCT_VALUES_COUNT",
            ColumnMetricKind::NullsFraction => "NULL_FRACTION",
            ColumnMetricKind::Min => "MIN",
            ColumnMetricKind::Max => "MAX",
        }
    }
}

/// A statistic of a query's output, either query-wide or for one output column.
/// Column metrics only apply to plain top-level output columns.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Metric {
    OutputRowCount,
    Column { column: String, kind: ColumnMetricKind },
}

pub const OUTPUT_ROW_COUNT: Metric = Metric::OutputRowCount;

impl Metric {
    pub fn column(column: impl Into<String>, kind: ColumnMetricKind) -> Self {
        Metric::Column {
            column: column.into(),
            kind,
        }
    }

    pub fn distinct_values_count(column: impl Into<String>) -> Self {
        Self::column(column, ColumnMetricKind::DistinctValuesCount)
    }

    pub fn nulls_fraction(column: impl Into<String>) -> Self {
        Self::column(column, ColumnMetricKind::NullsFraction)
    }

    pub fn min(column: impl Into<String>) -> Self {
        Self::column(column, ColumnMetricKind::Min)
    }

    pub fn max(column: impl Into<String>) -> Self {
        Self::column(column, ColumnMetricKind::Max)
    }

    /// Build from the canonical name and an optional column, e.g.
    /// `("DISTINCT_VALUES_COUNT", Some("i_item_sk"))`.
    pub fn from_parts(name: &str, column: Option<&str>) -> Result<Self> {
        let kind = match name.trim() {
            "OUTPUT_ROW_COUNT" => {
                return match column {
                    None => Ok(Metric::OutputRowCount),
                    Some(column) => Err(Error::InvalidMetric(format!(
                        "OUTPUT_ROW_COUNT does not take a column, got '{}'",
                        column
                    ))),
                };
            }
            "DISTINCT_VALUES_COUNT" => ColumnMetricKind::DistinctValuesCount,
            "NULL_FRACTION" | "NULLS_FRACTION" => ColumnMetricKind::NullsFraction,
            "MIN" => ColumnMetricKind::Min,
            "MAX" => ColumnMetricKind::Max,
            other => return Err(Error::InvalidMetric(format!("unknown metric '{}'", other))),
        };

        let column = column
            .map(str::trim)
            .filter(|column| !column.is_empty())
            .ok_or_else(|| Error::InvalidMetric(format!("{} requires a column", kind.name())))?;
        Ok(Self::column(column, kind))
    }

    pub fn column_name(&self) -> Option<&str> {
        match self {
            Metric::OutputRowCount => None,
            Metric::Column { column, .. } => Some(column),
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            Metric::Column { column, kind } if column.trim().is_empty() => Err(Error::InvalidMetric(
                format!("{} requires a column", kind.name()),
            )),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::OutputRowCount => write!(f, "OUTPUT_ROW_COUNT"),
            Metric::Column { column, kind } => write!(f, "{}({})", kind.name(), column),
        }
    }
}

impl FromStr for Metric {
    type Err = Error;

    /// Parses `OUTPUT_ROW_COUNT` or `NAME(column)`.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        match s.split_once('(') {
            None => Self::from_parts(s, None),
            Some((name, rest)) => {
                let column = rest
                    .strip_suffix(')')
                    .ok_or_else(|| Error::InvalidMetric(format!("unbalanced parentheses in '{}'", s)))?;
                Self::from_parts(name, Some(column))
            }
        }
    }
}
