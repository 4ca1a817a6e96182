// Plan tree as returned by an engine's planning stage, with the optimizer's
// statistics estimates attached per node

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Planner-internal name of a value flowing between plan nodes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol(pub String);

impl Symbol {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Estimated statistics for one symbol. `None` means unknown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SymbolStatistics {
    pub distinct_values_count: Option<f64>,
    pub nulls_fraction: Option<f64>,
    pub low_value: Option<f64>,
    pub high_value: Option<f64>,
}

/// Estimates attached to a single plan node
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanNodeStatistics {
    pub output_row_count: Option<f64>,
    pub symbols: HashMap<Symbol, SymbolStatistics>,
}

impl PlanNodeStatistics {
    pub fn with_row_count(output_row_count: f64) -> Self {
        Self {
            output_row_count: Some(output_row_count),
            symbols: HashMap::new(),
        }
    }

    pub fn with_symbol(mut self, symbol: Symbol, statistics: SymbolStatistics) -> Self {
        self.symbols.insert(symbol, statistics);
        self
    }

    pub fn symbol(&self, symbol: &Symbol) -> Option<&SymbolStatistics> {
        self.symbols.get(symbol)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlanNodeKind {
    Output,
    TableScan { table: String },
    Filter,
    Project,
    Aggregate,
    Exchange,
    Other(String),
}

/// A column visible at a node, by user-facing name and planner symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputColumn {
    pub name: String,
    pub symbol: Symbol,
}

impl OutputColumn {
    pub fn new(name: impl Into<String>, symbol: Symbol) -> Self {
        Self {
            name: name.into(),
            symbol,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanNode {
    pub kind: PlanNodeKind,
    pub outputs: Vec<OutputColumn>,
    pub statistics: Option<PlanNodeStatistics>,
    pub sources: Vec<PlanNode>,
}

impl PlanNode {
    pub fn new(kind: PlanNodeKind, outputs: Vec<OutputColumn>) -> Self {
        Self {
            kind,
            outputs,
            statistics: None,
            sources: Vec::new(),
        }
    }

    pub fn with_statistics(mut self, statistics: PlanNodeStatistics) -> Self {
        self.statistics = Some(statistics);
        self
    }

    pub fn with_source(mut self, source: PlanNode) -> Self {
        self.sources.push(source);
        self
    }

    /// Sole input of a node that has exactly one.
    pub fn single_source(&self) -> Option<&PlanNode> {
        match self.sources.as_slice() {
            [source] => Some(source),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanWithStatistics {
    pub root: PlanNode,
}

impl PlanWithStatistics {
    pub fn new(root: PlanNode) -> Self {
        Self { root }
    }

    /// Symbol the root publishes under `column`.
    pub fn output_symbol(&self, column: &str) -> Option<&Symbol> {
        self.root
            .outputs
            .iter()
            .find(|output| output.name == column)
            .map(|output| &output.symbol)
    }

    pub fn output_names(&self) -> impl Iterator<Item = &str> {
        self.root.outputs.iter().map(|output| output.name.as_str())
    }

    /// Statistics describing the query's final rows: the first node carrying
    /// an estimate when walking down from the root through single-input nodes.
    /// Output and exchange nodes usually carry none of their own.
    pub fn final_statistics(&self) -> Option<&PlanNodeStatistics> {
        let mut node = Some(&self.root);
        while let Some(current) = node {
            if let Some(statistics) = &current.statistics {
                return Some(statistics);
            }
            node = current.single_source();
        }
        None
    }
}
