//! Identifier normalization: the join key between stock and threshold rows.

use crate::model::CellValue;

/// A usable identifier: the trimmed text for display plus its case-folded join key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemKey {
    pub display: String,
    pub key: String,
}

/// Trim and case-fold a raw identifier. Blank identifiers yield `None`;
/// callers skip those rows entirely.
pub fn normalize(raw: &CellValue) -> Option<ItemKey> {
    let text = raw.to_string();
    let display = text.trim();
    if display.is_empty() {
        return None;
    }
    Some(ItemKey {
        display: display.to_string(),
        key: display.to_lowercase(),
    })
}
