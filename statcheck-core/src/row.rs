use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Int32(i32),
    Int64(i64),
    Float64(f64),
    /// Fixed-point number: `unscaled * 10^-scale`.
    Decimal { unscaled: i128, scale: u32 },
    Boolean(bool),
    String(String),
    Binary(Vec<u8>),
    /// Microseconds since the epoch.
    Timestamp(i64),
    /// Days since the epoch.
    Date(i32),
    Null,
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric reading of a scalar. Dates and timestamps read as their
    /// epoch offsets, which is how optimizers keep their low/high values.
    /// Non-finite floats read as absent.
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            Value::Int32(v) => *v as f64,
            Value::Int64(v) => *v as f64,
            Value::Float64(v) => *v,
            Value::Decimal { unscaled, scale } => *unscaled as f64 / 10f64.powi(*scale as i32),
            Value::Boolean(v) => {
                if *v {
                    1.0
                } else {
                    0.0
                }
            }
            Value::Timestamp(v) => *v as f64,
            Value::Date(v) => *v as f64,
            Value::String(_) | Value::Binary(_) | Value::Null => return None,
        };
        value.is_finite().then_some(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub values: Vec<Value>,
}

impl Row {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Rows returned by the engine for one query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl ResultSet {
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    /// Single-column, single-row result.
    pub fn scalar(column: impl Into<String>, value: Value) -> Self {
        Self {
            columns: vec![column.into()],
            rows: vec![Row::new(vec![value])],
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}
