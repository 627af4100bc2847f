use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::classify::{Priority, SecurityPercent};

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A single cell as handed over by the spreadsheet reader.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Bool(bool),
    Empty,
}

impl CellValue {
    /// Empty for alias resolution: no value, or the empty string.
    /// Whitespace-only text is *not* empty here; the normalizer drops it later.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.is_empty(),
            Self::Number(_) | Self::Bool(_) => false,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{s}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Empty => Ok(()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// One spreadsheet row: header name (verbatim from the source file) to cell.
/// Read-only input to the engine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    cells: HashMap<String, CellValue>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, header: impl Into<String>, value: impl Into<CellValue>) {
        self.cells.insert(header.into(), value.into());
    }

    pub fn get(&self, header: &str) -> Option<&CellValue> {
        self.cells.get(header)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &CellValue)> {
        self.cells.iter()
    }
}

impl<K, V> FromIterator<(K, V)> for RawRow
where
    K: Into<String>,
    V: Into<CellValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = RawRow::new();
        for (k, v) in iter {
            row.insert(k, v);
        }
        row
    }
}

/// Both dataset snapshots for one run.
#[derive(Debug, Clone, Default)]
pub struct ReconInput {
    pub inventory: Vec<RawRow>,
    pub thresholds: Vec<RawRow>,
}

impl ReconInput {
    /// Callers must not reconcile unless both snapshots have rows.
    pub fn is_reconcilable(&self) -> bool {
        !self.inventory.is_empty() && !self.thresholds.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Alert,
    Ok,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alert => write!(f, "alert"),
            Self::Ok => write!(f, "ok"),
        }
    }
}

/// Inventory row with a known threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconciledItem {
    /// 1-based position in the inventory dataset, skipped rows included.
    pub sequence_id: usize,
    pub identifier: String,
    pub quantity: f64,
    pub threshold: f64,
    pub status: Status,
}

impl ReconciledItem {
    pub fn is_alert(&self) -> bool {
        self.status == Status::Alert
    }

    pub fn priority(&self) -> Priority {
        crate::classify::priority_of(self.quantity, self.threshold)
    }

    pub fn security_percent(&self) -> SecurityPercent {
        crate::classify::security_percent(self.quantity, self.threshold)
    }
}

/// Inventory row whose identifier has no threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnmatchedItem {
    pub sequence_id: usize,
    pub identifier: String,
    pub quantity: f64,
}

/// Result of one reconciliation call. Replaced wholesale on every run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Reconciliation {
    pub matched: Vec<ReconciledItem>,
    pub unmatched: Vec<UnmatchedItem>,
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PriorityCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconSummary {
    pub total: usize,
    pub alerts: usize,
    pub ok: usize,
    pub percent_alert: i64,
    pub unmatched: usize,
    pub by_priority: PriorityCounts,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconMeta {
    pub config_name: String,
    pub engine_version: String,
    pub run_at: String,
    pub inventory_rows: usize,
    pub threshold_rows: usize,
    pub thresholds_loaded: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconReport {
    pub meta: ReconMeta,
    pub summary: ReconSummary,
    pub matched: Vec<ReconciledItem>,
    pub unmatched: Vec<UnmatchedItem>,
}
