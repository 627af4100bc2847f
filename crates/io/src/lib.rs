// File I/O operations: spreadsheet files in, analysis sheet out.

pub mod csv;
pub mod error;
pub mod json;
pub mod table;
pub mod xlsx;

use std::path::Path;

use chrono::NaiveDate;

pub use error::IoError;
pub use table::LoadedSheet;
pub use xlsx::SheetData;

/// File formats recognised by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// xlsx, xlsm, xlsb, xls, ods (read only, via calamine; xlsx also written)
    Spreadsheet,
    Csv,
    Tsv,
    Json,
}

impl FileFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Some(Self::Spreadsheet),
            "csv" | "txt" => Some(Self::Csv),
            "tsv" | "tab" => Some(Self::Tsv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Worksheet to read instead of the first one.
    pub sheet: Option<String>,
    /// CSV delimiter; sniffed from the content when unset.
    pub delimiter: Option<u8>,
}

/// Load the rows of a stock or threshold file.
pub fn load_rows(path: &Path, options: &LoadOptions) -> Result<LoadedSheet, IoError> {
    let format = FileFormat::from_path(path).ok_or_else(|| IoError::UnsupportedFormat(path.to_path_buf()))?;

    if options.sheet.is_some() && format != FileFormat::Spreadsheet {
        log::warn!("{}: --sheet ignored for non-spreadsheet input", path.display());
    }

    let loaded = match format {
        FileFormat::Spreadsheet => xlsx::import(path, options.sheet.as_deref())?,
        FileFormat::Csv => match options.delimiter {
            Some(d) => csv::import_with_delimiter(path, d)?,
            None => csv::import(path)?,
        },
        FileFormat::Tsv => csv::import_with_delimiter(path, options.delimiter.unwrap_or(b'\t'))?,
        FileFormat::Json => json::import(path)?,
    };

    log::info!(
        "{}: {} row(s), columns: {}",
        path.display(),
        loaded.len(),
        loaded.headers.join(" | ")
    );
    Ok(loaded)
}

/// Write the analysis. XLSX and JSON keep every sheet; CSV/TSV hold only the first.
pub fn write_export(path: &Path, sheets: &[SheetData<'_>]) -> Result<(), IoError> {
    let format = FileFormat::from_path(path).ok_or_else(|| IoError::UnsupportedOutput(path.to_path_buf()))?;
    let is_xlsx = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("xlsx"));

    match format {
        FileFormat::Spreadsheet if is_xlsx => xlsx::export(path, sheets),
        FileFormat::Spreadsheet => Err(IoError::UnsupportedOutput(path.to_path_buf())),
        FileFormat::Csv | FileFormat::Tsv => {
            let delimiter = if format == FileFormat::Tsv { b'\t' } else { b',' };
            let Some(first) = sheets.first() else {
                return csv::export_with_delimiter(path, &[], &[], delimiter);
            };
            if sheets.len() > 1 {
                log::warn!(
                    "{}: CSV holds one sheet, only '{}' written",
                    path.display(),
                    first.name
                );
            }
            csv::export_with_delimiter(path, first.headers, &first.rows, delimiter)
        }
        FileFormat::Json => json::export(path, sheets),
    }
}

/// `<prefix>_<YYYY-MM-DD>.xlsx`
pub fn default_export_name(prefix: &str, date: NaiveDate) -> String {
    format!("{prefix}_{}.xlsx", date.format("%Y-%m-%d"))
}
