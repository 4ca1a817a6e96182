// Runs declared statistics checks for one query against a shared engine
//
// A check plans the query once and derives each distinct metric once. Every
// engine call is a task in a JoinSet, gated by the query slots; dropping the
// check (timeout, failed sibling) aborts whatever is still running. The slots
// belong to the assertion, so checks running side by side share one budget.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use statcheck_core::{Error, HarnessConfig, Query, Result, Session};
use statcheck_query::{
    ensure_statistics_collection, ActualMetricDeriver, EstimateExtractor, Metric, PlannedQuery,
    QueryEngine,
};
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, info, warn};

use crate::checks::Checks;
use crate::result::{AssertionResult, CheckResult};
use crate::slots::QuerySlots;

enum Completed {
    Planned(PlannedQuery),
    Derived(Metric, Option<f64>),
}

pub struct StatisticsAssertion {
    extractor: Arc<EstimateExtractor>,
    deriver: Arc<ActualMetricDeriver>,
    session: Arc<Session>,
    config: HarnessConfig,
    slots: QuerySlots,
}

impl StatisticsAssertion {
    pub fn new(engine: Arc<dyn QueryEngine>, session: Session) -> Result<Self> {
        Self::with_config(engine, session, HarnessConfig::default())
    }

    /// The session is reused for both the estimate and the actual path and
    /// must enable statistics collection for ordinary queries.
    pub fn with_config(engine: Arc<dyn QueryEngine>, session: Session, config: HarnessConfig) -> Result<Self> {
        config.validate()?;
        ensure_statistics_collection(&session)?;
        let slots = QuerySlots::new(config.max_concurrent_queries.min(engine.max_concurrent_queries()));
        Ok(Self {
            extractor: Arc::new(EstimateExtractor::new(Arc::clone(&engine))),
            deriver: Arc::new(ActualMetricDeriver::new(engine)),
            session: Arc::new(session),
            config,
            slots,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    pub fn slots(&self) -> &QuerySlots {
        &self.slots
    }

    pub async fn check<F>(&self, sql: &str, build: F) -> Result<AssertionResult>
    where
        F: FnOnce(Checks) -> Checks,
    {
        self.check_with_session(sql, Arc::clone(&self.session), build).await
    }

    pub async fn check_with_session<F>(&self, sql: &str, session: Arc<Session>, build: F) -> Result<AssertionResult>
    where
        F: FnOnce(Checks) -> Checks,
    {
        let checks = build(Checks::new());
        self.run(&Query::new(sql, session), &checks).await
    }

    /// Mismatches are collected into the result; any error means the check
    /// itself could not be carried out.
    pub async fn run(&self, query: &Query, checks: &Checks) -> Result<AssertionResult> {
        match self.config.check_timeout() {
            Some(limit) => tokio::time::timeout(limit, self.run_checks(query, checks))
                .await
                .map_err(|_| {
                    warn!("Check of [{}] timed out after {:?}", query.sql(), limit);
                    Error::Timeout(limit)
                })?,
            None => self.run_checks(query, checks).await,
        }
    }

    async fn run_checks(&self, query: &Query, checks: &Checks) -> Result<AssertionResult> {
        if checks.is_empty() {
            return Err(Error::Configuration(format!("no checks declared for [{}]", query.sql())));
        }
        checks.validate()?;
        ensure_statistics_collection(query.session())?;

        let slots = self.slots.clone();
        let metrics: BTreeSet<Metric> = checks.iter().map(|check| check.metric.clone()).collect();
        info!(
            "Checking {} metrics of [{}] with {} query slots",
            metrics.len(),
            query.sql(),
            slots.max_slots()
        );

        let mut tasks: JoinSet<Result<Completed>> = JoinSet::new();
        {
            let extractor = Arc::clone(&self.extractor);
            let slots = slots.clone();
            let query = query.clone();
            tasks.spawn(async move {
                slots
                    .run(extractor.plan(&query))
                    .await
                    .map(Completed::Planned)
            });
        }
        for metric in metrics {
            let deriver = Arc::clone(&self.deriver);
            let slots = slots.clone();
            let query = query.clone();
            tasks.spawn(async move {
                let actual = slots.run(deriver.derive(&query, &metric)).await?;
                Ok::<_, Error>(Completed::Derived(metric, actual))
            });
        }

        let mut planned = None;
        let mut actuals = HashMap::new();
        // returning early drops `tasks`, which aborts the rest
        while let Some(joined) = tasks.join_next().await {
            match joined.map_err(join_failure)?? {
                Completed::Planned(plan) => planned = Some(plan),
                Completed::Derived(metric, actual) => {
                    debug!("Actual {} = {:?}", metric, actual);
                    actuals.insert(metric, actual);
                }
            }
        }

        let planned = planned.ok_or_else(|| Error::Cancelled("planning task did not report".to_string()))?;
        let mut results = Vec::with_capacity(checks.len());
        for check in checks.iter() {
            let estimated = planned.estimate(&check.metric)?;
            let actual = actuals.get(&check.metric).copied().flatten();
            let outcome = check.strategy.judge(estimated, actual);
            if !outcome.pass {
                warn!("{} of [{}] failed: {}", check.metric, query.sql(), outcome.detail);
            }
            results.push(CheckResult {
                metric: check.metric.clone(),
                strategy: check.strategy,
                estimated,
                actual,
                outcome,
            });
        }

        let result = AssertionResult {
            sql: query.sql().to_string(),
            results,
        };
        info!(
            "{} of {} checks passed for [{}]",
            result.results.len() - result.failure_count(),
            result.results.len(),
            query.sql()
        );
        Ok(result)
    }
}

fn join_failure(err: JoinError) -> Error {
    if err.is_panic() {
        std::panic::resume_unwind(err.into_panic());
    }
    Error::Cancelled(err.to_string())
}
