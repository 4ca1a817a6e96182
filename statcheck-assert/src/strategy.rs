// Tolerance rules for judging an estimate against the ground truth

use serde::{Deserialize, Serialize};
use statcheck_core::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Relative slack accepted from a cost-based optimizer's cardinality estimates
pub const DEFAULT_TOLERANCE: f64 = 0.1;

/// Round-off allowed by `NoError` for non-integral values
pub const FLOAT_EPSILON: f64 = 1e-9;

pub const NO_GROUND_TRUTH: &str = "no ground truth computed";
pub const NO_ESTIMATE: &str = "no estimate produced";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub pass: bool,
    pub detail: String,
}

impl Outcome {
    fn pass(detail: String) -> Self {
        Self { pass: true, detail }
    }

    fn fail(detail: impl Into<String>) -> Self {
        Self {
            pass: false,
            detail: detail.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ComparisonStrategy {
    NoError,
    AbsoluteError(f64),
    RelativeError(f64),
}

pub fn no_error() -> ComparisonStrategy {
    ComparisonStrategy::NoError
}

pub fn absolute_error(bound: f64) -> ComparisonStrategy {
    ComparisonStrategy::AbsoluteError(bound)
}

pub fn relative_error(bound: f64) -> ComparisonStrategy {
    ComparisonStrategy::RelativeError(bound)
}

pub fn default_tolerance() -> ComparisonStrategy {
    ComparisonStrategy::RelativeError(DEFAULT_TOLERANCE)
}

impl ComparisonStrategy {
    pub fn validate(&self) -> Result<()> {
        match self {
            ComparisonStrategy::NoError => Ok(()),
            ComparisonStrategy::AbsoluteError(bound) | ComparisonStrategy::RelativeError(bound) => {
                if bound.is_finite() && *bound >= 0.0 {
                    Ok(())
                } else {
                    Err(Error::InvalidStrategy(format!(
                        "{}: bound must be finite and non-negative",
                        self
                    )))
                }
            }
        }
    }

    /// Missing ground truth fails first, then a missing estimate; neither is
    /// ever tolerated.
    pub fn judge(&self, estimated: Option<f64>, actual: Option<f64>) -> Outcome {
        let Some(actual) = actual else {
            return Outcome::fail(NO_GROUND_TRUTH);
        };
        let Some(estimated) = estimated else {
            return Outcome::fail(NO_ESTIMATE);
        };

        let error = (estimated - actual).abs();
        match self {
            ComparisonStrategy::NoError => {
                // integral actuals (row and distinct counts) must match exactly
                let allowed = if actual.fract() == 0.0 { 0.0 } else { FLOAT_EPSILON };
                if error <= allowed {
                    Outcome::pass(format!("{} equals {}", estimated, actual))
                } else {
                    Outcome::fail(format!("expected exactly {}, error is {}", actual, error))
                }
            }
            ComparisonStrategy::AbsoluteError(bound) => {
                if error <= *bound {
                    Outcome::pass(format!("error {} within {}", error, bound))
                } else {
                    Outcome::fail(format!("error {} exceeds absolute bound {}", error, bound))
                }
            }
            ComparisonStrategy::RelativeError(bound) => {
                let allowed = bound * actual.abs().max(1.0);
                if error <= allowed {
                    Outcome::pass(format!("error {} within {}", error, allowed))
                } else {
                    Outcome::fail(format!(
                        "error {} exceeds {} ({} relative to {})",
                        error, allowed, bound, actual
                    ))
                }
            }
        }
    }
}

impl fmt::Display for ComparisonStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComparisonStrategy::NoError => write!(f, "noError"),
            ComparisonStrategy::AbsoluteError(bound) => write!(f, "absoluteError({})", bound),
            ComparisonStrategy::RelativeError(bound) => write!(f, "relativeError({})", bound),
        }
    }
}

impl FromStr for ComparisonStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let strategy = match s {
            "noError" | "noError()" => no_error(),
            "defaultTolerance" | "defaultTolerance()" => default_tolerance(),
            _ => {
                let (name, rest) = s
                    .split_once('(')
                    .ok_or_else(|| Error::InvalidStrategy(format!("unknown strategy '{}'", s)))?;
                let bound = rest
                    .strip_suffix(')')
                    .and_then(|bound| bound.trim().parse::<f64>().ok())
                    .ok_or_else(|| Error::InvalidStrategy(format!("bad bound in '{}'", s)))?;
                match name.trim() {
                    "absoluteError" => absolute_error(bound),
                    "relativeError" => relative_error(bound),
                    other => return Err(Error::InvalidStrategy(format!("unknown strategy '{}'", other))),
                }
            }
        };
        strategy.validate()?;
        Ok(strategy)
    }
}
