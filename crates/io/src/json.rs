// JSON import/export
//
// Input: an array of objects, one per row, as produced by common
// sheet-to-JSON converters. Output: one array of header-keyed objects per
// sheet, keys kept in column order.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use serde_json::{Map, Value};
use stockguard_recon::export::ExportCell;
use stockguard_recon::{CellValue, RawRow};

use crate::error::IoError;
use crate::table::LoadedSheet;
use crate::xlsx::SheetData;

pub fn import(path: &Path) -> Result<LoadedSheet, IoError> {
    let content = std::fs::read_to_string(path).map_err(|e| IoError::read(path, e))?;
    import_from_str(&content).map_err(|e| IoError::parse(path, e))
}

fn import_from_str(content: &str) -> Result<LoadedSheet, String> {
    let value: Value = serde_json::from_str(content).map_err(|e| e.to_string())?;
    let Value::Array(items) = value else {
        return Err("expected a JSON array of row objects".into());
    };

    let mut headers: Vec<String> = Vec::new();
    let mut rows = Vec::with_capacity(items.len());

    for (idx, item) in items.into_iter().enumerate() {
        let Value::Object(fields) = item else {
            return Err(format!("row {}: expected an object", idx + 1));
        };
        let mut row = RawRow::new();
        for (key, value) in fields {
            let cell = cell_value(value);
            if cell.is_empty() {
                continue;
            }
            if !headers.contains(&key) {
                headers.push(key.clone());
            }
            row.insert(key, cell);
        }
        if !row.is_empty() {
            rows.push(row);
        }
    }

    Ok(LoadedSheet { sheet_name: None, headers, rows })
}

fn cell_value(value: Value) -> CellValue {
    match value {
        Value::Null => CellValue::Empty,
        Value::Bool(b) => CellValue::Bool(b),
        Value::Number(n) => n.as_f64().map(CellValue::Number).unwrap_or(CellValue::Empty),
        Value::String(s) if s.is_empty() => CellValue::Empty,
        Value::String(s) => CellValue::Text(s),
        // Nested values have no cell meaning; keep their text so nothing is lost silently.
        other @ (Value::Array(_) | Value::Object(_)) => CellValue::Text(other.to_string()),
    }
}

/// Write sheets as `{ "<sheet name>": [ {header: value, ...}, ... ], ... }`.
pub fn export(path: &Path, sheets: &[SheetData<'_>]) -> Result<(), IoError> {
    let mut book = Map::new();
    for sheet in sheets {
        let rows: Vec<Value> = sheet
            .rows
            .iter()
            .map(|cells| {
                let mut obj = Map::new();
                for (header, cell) in sheet.headers.iter().zip(cells) {
                    obj.insert(header.to_string(), cell_json(cell));
                }
                Value::Object(obj)
            })
            .collect();
        book.insert(sheet.name.to_string(), Value::Array(rows));
    }

    let file = File::create(path).map_err(|e| IoError::write(path, e))?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &Value::Object(book)).map_err(|e| IoError::write(path, e))?;
    Ok(())
}

fn cell_json(cell: &ExportCell) -> Value {
    match cell {
        ExportCell::Text(s) => Value::String(s.clone()),
        ExportCell::Number(n) => serde_json::Number::from_f64(*n)
            .map(Value::Number)
            .unwrap_or(Value::Null),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn import_rows() {
        let sheet = import_from_str(
            r#"[
                {"Reference": "A1", "Stock": 5},
                {"Reference": "B2", "Stock": "", "QTE": 3},
                {"Reference": null}
            ]"#,
        )
        .unwrap();
        assert_eq!(sheet.len(), 2);
        assert_eq!(sheet.headers, vec!["Reference", "Stock", "QTE"]);
        assert_eq!(sheet.rows[0].get("Stock"), Some(&CellValue::Number(5.0)));
        assert_eq!(sheet.rows[1].get("Stock"), None);
    }

    #[test]
    fn reject_non_array() {
        assert!(import_from_str(r#"{"Reference": "A1"}"#).is_err());
        assert!(import_from_str(r#"[1, 2]"#).unwrap_err().contains("row 1"));
    }

    #[test]
    fn export_keeps_column_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.json");
        let sheet = SheetData {
            name: "Analyse Stock",
            headers: &["Référence interne", "Quantité en stock", "% Sécurité"],
            rows: vec![vec![
                ExportCell::Text("A1".into()),
                ExportCell::Number(5.0),
                ExportCell::Text("50 %".into()),
            ]],
        };
        export(&path, &[sheet]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let a = content.find("Référence interne").unwrap();
        let b = content.find("Quantité en stock").unwrap();
        let c = content.find("% Sécurité").unwrap();
        assert!(a < b && b < c);

        let value: Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["Analyse Stock"][0]["Quantité en stock"], 5.0);
    }
}
