pub mod error;
pub mod session;
pub mod row;
pub mod config;
pub mod formats;

pub use error::{Error, Result, SetupStage};
pub use session::{Query, Session, SessionBuilder, COLLECT_PLAN_STATISTICS_FOR_ALL_QUERIES};
pub use row::{ResultSet, Row, Value};
pub use config::{ConfigError, HarnessConfig};
pub use formats::HiveFormatsConfig;
