//! `stockguard-recon` — Stock-versus-threshold reconciliation engine.
//!
//! Pure engine crate: receives pre-loaded spreadsheet rows, returns classified
//! items. No CLI or IO dependencies.

pub mod classify;
pub mod coerce;
pub mod columns;
pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod filter;
pub mod key;
pub mod model;
pub mod summary;

pub use classify::{priority_of, security_percent, Priority, SecurityPercent};
pub use columns::{ColumnAliases, Field};
pub use config::ReconConfig;
pub use engine::{reconcile, run};
pub use error::ReconError;
pub use filter::{filter_by_status, StatusFilter};
pub use model::{
    CellValue, RawRow, ReconInput, ReconReport, ReconSummary, ReconciledItem, Reconciliation,
    Status, UnmatchedItem,
};
pub use summary::compute_summary;
