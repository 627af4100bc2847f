// Excel/ODS import (calamine) and XLSX export (rust_xlsxwriter)

use std::path::Path;
use std::time::Instant;

use calamine::{open_workbook_auto, Data, Reader, Sheets};
use rust_xlsxwriter::{Format, FormatAlign, Workbook as XlsxWorkbook, Worksheet};
use stockguard_recon::export::ExportCell;
use stockguard_recon::CellValue;

use crate::error::IoError;
use crate::table::{rows_from_grid, LoadedSheet};

/// Read the first worksheet, or `sheet` when given.
pub fn import(path: &Path, sheet: Option<&str>) -> Result<LoadedSheet, IoError> {
    let start_time = Instant::now();

    let mut workbook: Sheets<_> = open_workbook_auto(path)
        .map_err(|e| IoError::read(path, format!("failed to open spreadsheet: {e}")))?;

    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
    let Some(first) = sheet_names.first() else {
        return Err(IoError::NoSheets(path.to_path_buf()));
    };

    let sheet_name = match sheet {
        Some(wanted) => sheet_names
            .iter()
            .find(|name| name.as_str() == wanted)
            .cloned()
            .ok_or_else(|| IoError::SheetNotFound {
                path: path.to_path_buf(),
                sheet: wanted.to_string(),
                available: sheet_names.clone(),
            })?,
        None => first.clone(),
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| IoError::parse(path, format!("failed to read sheet '{sheet_name}': {e}")))?;

    let mut skipped_errors = 0usize;
    let grid: Vec<Vec<CellValue>> = range
        .rows()
        .map(|row| {
            row.iter()
                .map(|cell| {
                    let value = cell_value(cell);
                    if matches!(cell, Data::Error(_)) {
                        skipped_errors += 1;
                    }
                    value
                })
                .collect()
        })
        .collect();

    if skipped_errors > 0 {
        log::warn!(
            "{} [{}]: {} error cell(s) read as empty",
            path.display(),
            sheet_name,
            skipped_errors
        );
    }

    let mut loaded = rows_from_grid(grid);
    loaded.sheet_name = Some(sheet_name);

    log::debug!(
        "read {} rows from {} in {:?}",
        loaded.len(),
        path.display(),
        start_time.elapsed()
    );

    Ok(loaded)
}

/// Cell as the engine sees it. Dates stay as their serial number, as the
/// raw sheet-to-rows conversion reports them.
fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) if s.is_empty() => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(n) => CellValue::Number(*n),
        Data::Int(n) => CellValue::Number(*n as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(_) => CellValue::Empty,
    }
}

/// One worksheet to write.
#[derive(Debug, Clone)]
pub struct SheetData<'a> {
    pub name: &'a str,
    pub headers: &'a [&'a str],
    pub rows: Vec<Vec<ExportCell>>,
}

/// Write worksheets to an XLSX file: bold frozen header row, autofilter,
/// numbers kept numeric.
pub fn export(path: &Path, sheets: &[SheetData<'_>]) -> Result<(), IoError> {
    let start_time = Instant::now();
    let mut workbook = XlsxWorkbook::new();

    for data in sheets {
        let worksheet = workbook
            .add_worksheet()
            .set_name(data.name)
            .map_err(|e| IoError::write(path, format!("failed to create sheet '{}': {e}", data.name)))?;
        write_sheet(worksheet, data).map_err(|e| IoError::write(path, e))?;
    }

    workbook
        .save(path)
        .map_err(|e| IoError::write(path, format!("failed to save workbook: {e}")))?;

    log::debug!(
        "wrote {} sheet(s) to {} in {:?}",
        sheets.len(),
        path.display(),
        start_time.elapsed()
    );
    Ok(())
}

fn write_sheet(worksheet: &mut Worksheet, data: &SheetData<'_>) -> Result<(), rust_xlsxwriter::XlsxError> {
    let header_format = Format::new().set_bold().set_align(FormatAlign::Center);

    let mut widths: Vec<usize> = data.headers.iter().map(|h| h.chars().count()).collect();

    for (col, header) in data.headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    for (row_idx, row) in data.rows.iter().enumerate() {
        let xl_row = row_idx as u32 + 1;
        for (col, cell) in row.iter().enumerate() {
            match cell {
                ExportCell::Number(n) => {
                    worksheet.write_number(xl_row, col as u16, *n)?;
                }
                ExportCell::Text(s) => {
                    worksheet.write_string(xl_row, col as u16, s)?;
                }
            }
            if let Some(w) = widths.get_mut(col) {
                *w = (*w).max(cell.to_string().chars().count());
            }
        }
    }

    for (col, width) in widths.iter().enumerate() {
        worksheet.set_column_width(col as u16, (*width as f64 + 2.0).min(60.0))?;
    }

    if !data.headers.is_empty() {
        worksheet.set_freeze_panes(1, 0)?;
        worksheet.autofilter(0, 0, data.rows.len() as u32, data.headers.len() as u16 - 1)?;
    }

    Ok(())
}
