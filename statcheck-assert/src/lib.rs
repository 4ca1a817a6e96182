pub mod strategy;
pub mod checks;
pub mod result;
pub mod slots;
pub mod assertion;

pub use strategy::{
    absolute_error, default_tolerance, no_error, relative_error, ComparisonStrategy, Outcome,
    DEFAULT_TOLERANCE,
};
pub use checks::{Checks, MetricCheck};
pub use result::{AssertionResult, CheckResult};
pub use slots::QuerySlots;
pub use assertion::StatisticsAssertion;
