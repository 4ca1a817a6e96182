pub mod plan;
pub mod engine;
pub mod metric;
pub mod estimate;
pub mod derive;

pub use plan::{
    OutputColumn, PlanNode, PlanNodeKind, PlanNodeStatistics, PlanWithStatistics, Symbol,
    SymbolStatistics,
};
pub use engine::QueryEngine;
pub use metric::{ColumnMetricKind, Metric, OUTPUT_ROW_COUNT};
pub use estimate::{ensure_statistics_collection, EstimateExtractor, PlannedQuery};
pub use derive::{derived_sql, quote_identifier, ActualMetricDeriver};
