use async_trait::async_trait;
use statcheck_core::{ResultSet, Result, Session};
use crate::plan::PlanWithStatistics;

/// Boundary to the SQL engine under test.
///
/// One instance is shared by many checks and called from several tasks at
/// once, so both calls take `&self`. The caller owns its lifetime. Futures
/// returned by `execute` may be dropped before completion when a check is
/// abandoned; implementations must stop the underlying work on drop.
#[async_trait]
pub trait QueryEngine: Send + Sync {
    /// Plan `sql` without executing it. Statistics are only attached when the
    /// session enables collection for non-EXPLAIN queries.
    async fn plan(&self, sql: &str, session: &Session) -> Result<PlanWithStatistics>;

    async fn execute(&self, sql: &str, session: &Session) -> Result<ResultSet>;

    /// Queries the engine can run at the same time.
    fn max_concurrent_queries(&self) -> usize {
        usize::MAX
    }
}
