//! Column resolution across the header spellings found in real stock exports.
//!
//! Each semantic field has an ordered alias list. The first alias that is
//! present in the row with a non-empty value wins, so order is precedence.

use serde::{Deserialize, Serialize};

use crate::model::{CellValue, RawRow};

pub const IDENTIFIER_ALIASES: &[&str] = &[
    "Reference interne",
    "Référence interne",
    "Reference",
    "Référence",
    // Repeated spellings are harmless: resolution stops at the first hit.
    "Reference",
    "Référence",
    "Pièce",
    "Piece",
    "Article",
];

pub const QUANTITY_ALIASES: &[&str] = &[
    "Quantité en stock",
    "Quantite en stock",
    "Quantité Stock",
    "Quantite Stock",
    "Quantité",
    "Quantite",
    "Stock",
    "QTE",
];

pub const THRESHOLD_ALIASES: &[&str] = &[
    "Seuil (U)",
    "Seuil",
    "seuil",
    "SEUIL",
    "Minimum",
    "Quantité seuil",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Identifier,
    Quantity,
    Threshold,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Identifier => write!(f, "identifier"),
            Self::Quantity => write!(f, "quantity"),
            Self::Threshold => write!(f, "threshold"),
        }
    }
}

/// Ordered header aliases per field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnAliases {
    pub identifier: Vec<String>,
    pub quantity: Vec<String>,
    pub threshold: Vec<String>,
}

impl Default for ColumnAliases {
    fn default() -> Self {
        Self {
            identifier: to_owned(IDENTIFIER_ALIASES),
            quantity: to_owned(QUANTITY_ALIASES),
            threshold: to_owned(THRESHOLD_ALIASES),
        }
    }
}

fn to_owned(aliases: &[&str]) -> Vec<String> {
    aliases.iter().map(|a| a.to_string()).collect()
}

impl ColumnAliases {
    pub fn for_field(&self, field: Field) -> &[String] {
        match field {
            Field::Identifier => &self.identifier,
            Field::Quantity => &self.quantity,
            Field::Threshold => &self.threshold,
        }
    }

    pub fn resolve_field<'r>(&self, row: &'r RawRow, field: Field) -> Option<&'r CellValue> {
        resolve(row, self.for_field(field))
    }

    /// First alias of `field` that appears among `headers`, if any.
    /// Used by callers to report which column a file will be read from.
    pub fn matching_header<'h>(&self, headers: &'h [String], field: Field) -> Option<&'h str> {
        self.for_field(field)
            .iter()
            .find_map(|alias| headers.iter().find(|h| *h == alias))
            .map(|h| h.as_str())
    }
}

/// Value of the first alias present in `row` whose cell is not empty.
pub fn resolve<'r, S: AsRef<str>>(row: &'r RawRow, aliases: &[S]) -> Option<&'r CellValue> {
    aliases
        .iter()
        .filter_map(|alias| row.get(alias.as_ref()))
        .find(|value| !value.is_empty())
}
