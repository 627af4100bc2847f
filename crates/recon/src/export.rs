//! Row shapes for the exported analysis sheet.
//!
//! Column labels and their order are part of the sheet contract downstream
//! users rely on; writers in `stockguard-io` consume these rows as-is.

use serde::Serialize;

use crate::filter::{filter_by_status, StatusFilter};
use crate::model::{ReconciledItem, Status, UnmatchedItem};

pub const EXPORT_HEADERS: [&str; 7] = [
    "Référence interne",
    "Quantité en stock",
    "Seuil (U)",
    "Commentaire",
    "Statut",
    "Priorité",
    "% Sécurité",
];

pub const UNMATCHED_HEADERS: [&str; 3] = ["Référence interne", "Quantité en stock", "Statut"];

pub const COMMENT_ALERT: &str = "Demande d'achat nécessaire";
pub const COMMENT_OK: &str = "Stock suffisant";
pub const STATUS_NO_THRESHOLD: &str = "Seuil non défini";

/// A cell of an export row, typed so writers can keep numbers numeric.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExportCell {
    Text(String),
    Number(f64),
}

impl std::fmt::Display for ExportCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{s}"),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    #[serde(rename = "Référence interne")]
    pub reference: String,
    #[serde(rename = "Quantité en stock")]
    pub quantity: f64,
    #[serde(rename = "Seuil (U)")]
    pub threshold: f64,
    #[serde(rename = "Commentaire")]
    pub comment: &'static str,
    #[serde(rename = "Statut")]
    pub status: &'static str,
    #[serde(rename = "Priorité")]
    pub priority: &'static str,
    #[serde(rename = "% Sécurité")]
    pub security: String,
}

impl ExportRow {
    pub fn from_item(item: &ReconciledItem) -> Self {
        let (comment, status) = match item.status {
            Status::Alert => (COMMENT_ALERT, "ALERTE"),
            Status::Ok => (COMMENT_OK, "OK"),
        };
        Self {
            reference: item.identifier.clone(),
            quantity: item.quantity,
            threshold: item.threshold,
            comment,
            status,
            priority: item.priority().label(),
            security: item.security_percent().to_string(),
        }
    }

    /// Cells in `EXPORT_HEADERS` order.
    pub fn cells(&self) -> Vec<ExportCell> {
        vec![
            ExportCell::Text(self.reference.clone()),
            ExportCell::Number(self.quantity),
            ExportCell::Number(self.threshold),
            ExportCell::Text(self.comment.to_string()),
            ExportCell::Text(self.status.to_string()),
            ExportCell::Text(self.priority.to_string()),
            ExportCell::Text(self.security.clone()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnmatchedExportRow {
    #[serde(rename = "Référence interne")]
    pub reference: String,
    #[serde(rename = "Quantité en stock")]
    pub quantity: f64,
    #[serde(rename = "Statut")]
    pub status: &'static str,
}

impl UnmatchedExportRow {
    pub fn from_item(item: &UnmatchedItem) -> Self {
        Self {
            reference: item.identifier.clone(),
            quantity: item.quantity,
            status: STATUS_NO_THRESHOLD,
        }
    }

    /// Cells in `UNMATCHED_HEADERS` order.
    pub fn cells(&self) -> Vec<ExportCell> {
        vec![
            ExportCell::Text(self.reference.clone()),
            ExportCell::Number(self.quantity),
            ExportCell::Text(self.status.to_string()),
        ]
    }
}

/// Export rows for the matched items passing `filter`.
pub fn export_rows(matched: &[ReconciledItem], filter: StatusFilter) -> Vec<ExportRow> {
    filter_by_status(matched, filter)
        .into_iter()
        .map(ExportRow::from_item)
        .collect()
}

pub fn unmatched_rows(unmatched: &[UnmatchedItem]) -> Vec<UnmatchedExportRow> {
    unmatched.iter().map(UnmatchedExportRow::from_item).collect()
}
