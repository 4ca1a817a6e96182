use std::fmt;
use thiserror::Error;

/// Engine stage that failed while a check was being set up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupStage {
    Plan,
    Execute,
}

impl fmt::Display for SetupStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupStage::Plan => write!(f, "plan"),
            SetupStage::Execute => write!(f, "execute"),
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    /// The engine could not plan or execute a query issued by the harness.
    #[error("Failed to {stage} query [{sql}]: {message}")]
    Setup {
        stage: SetupStage,
        sql: String,
        message: String,
    },

    /// Raised by query engine implementations.
    #[error("Engine error: {0}")]
    Engine(String),

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Invalid metric: {0}")]
    InvalidMetric(String),

    #[error("Invalid comparison strategy: {0}")]
    InvalidStrategy(String),

    #[error("Unexpected result for [{sql}]: {message}")]
    UnexpectedResult { sql: String, message: String },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Check timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("Check cancelled: {0}")]
    Cancelled(String),

    #[error("Statistics mismatch:\n{0}")]
    Mismatch(String),
}

impl Error {
    /// Setup failures abort a check; everything else is a declaration problem
    /// or a reported mismatch.
    pub fn is_setup_failure(&self) -> bool {
        matches!(self, Error::Setup { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
