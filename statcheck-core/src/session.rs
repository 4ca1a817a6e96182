// Session and query handles shared by the estimate and the actual paths

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Stats for non-EXPLAIN queries are not collected unless this is "true".
pub const COLLECT_PLAN_STATISTICS_FOR_ALL_QUERIES: &str = "collect_plan_statistics_for_all_queries";

/// Catalog, schema and system properties a query is planned and executed under
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    catalog: Option<String>,
    schema: Option<String>,
    properties: BTreeMap<String, String>,
}

impl Session {
    pub fn builder() -> SessionBuilder {
        SessionBuilder::default()
    }

    pub fn catalog(&self) -> Option<&str> {
        self.catalog.as_deref()
    }

    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    pub fn collects_plan_statistics(&self) -> bool {
        self.property(COLLECT_PLAN_STATISTICS_FOR_ALL_QUERIES) == Some("true")
    }
}

#[derive(Debug, Default)]
pub struct SessionBuilder {
    catalog: Option<String>,
    schema: Option<String>,
    properties: BTreeMap<String, String>,
}

impl SessionBuilder {
    pub fn catalog(mut self, catalog: impl Into<String>) -> Self {
        self.catalog = Some(catalog.into());
        self
    }

    pub fn schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    pub fn system_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    pub fn build(self) -> Session {
        Session {
            catalog: self.catalog,
            schema: self.schema,
            properties: self.properties,
        }
    }
}

/// SQL text bound to the session it runs under
#[derive(Debug, Clone)]
pub struct Query {
    sql: Arc<str>,
    session: Arc<Session>,
}

impl Query {
    pub fn new(sql: impl Into<Arc<str>>, session: Arc<Session>) -> Self {
        Self {
            sql: sql.into(),
            session,
        }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn shared_session(&self) -> Arc<Session> {
        Arc::clone(&self.session)
    }

    /// Same session, different text; the deriver issues its aggregates this way.
    pub fn with_sql(&self, sql: impl Into<Arc<str>>) -> Self {
        Self {
            sql: sql.into(),
            session: self.shared_session(),
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}
