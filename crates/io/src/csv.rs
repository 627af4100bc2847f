// CSV/TSV import/export

use std::io::Read;
use std::path::Path;

use stockguard_recon::export::ExportCell;
use stockguard_recon::CellValue;

use crate::error::IoError;
use crate::table::{rows_from_grid, LoadedSheet};

pub fn import(path: &Path) -> Result<LoadedSheet, IoError> {
    let content = read_file_as_utf8(path)?;
    let delimiter = sniff_delimiter(&content);
    import_from_string(&content, delimiter).map_err(|e| IoError::parse(path, e))
}

pub fn import_with_delimiter(path: &Path, delimiter: u8) -> Result<LoadedSheet, IoError> {
    let content = read_file_as_utf8(path)?;
    import_from_string(&content, delimiter).map_err(|e| IoError::parse(path, e))
}

/// Detect the most likely field delimiter by checking consistency across the first few lines.
///
/// For each candidate (tab, semicolon, comma, pipe), count fields per line. The delimiter
/// that produces the most consistent field count (>1 field) wins.
fn sniff_delimiter(content: &str) -> u8 {
    let candidates: &[u8] = &[b'\t', b';', b',', b'|'];
    let sample_lines: Vec<&str> = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .take(10)
        .collect();

    if sample_lines.is_empty() {
        return b',';
    }

    let mut best = b',';
    let mut best_score = 0u64;

    for &delim in candidates {
        let counts: Vec<usize> = sample_lines
            .iter()
            .map(|line| {
                csv::ReaderBuilder::new()
                    .delimiter(delim)
                    .has_headers(false)
                    .flexible(true)
                    .from_reader(line.as_bytes())
                    .records()
                    .next()
                    .and_then(|r| r.ok())
                    .map(|r| r.len())
                    .unwrap_or(1)
            })
            .collect();

        if counts.first().copied().unwrap_or(0) <= 1 {
            continue;
        }

        // Consistent lines weighted by field count; more columns breaks ties.
        let target = counts[0];
        let consistent = counts.iter().filter(|&&c| c == target).count() as u64;
        let score = consistent * target as u64;

        if score > best_score {
            best_score = score;
            best = delim;
        }
    }

    best
}

/// Read file and convert to UTF-8 if needed (Excel on Windows writes Windows-1252 CSVs).
pub fn read_file_as_utf8(path: &Path) -> Result<String, IoError> {
    let mut file = std::fs::File::open(path).map_err(|e| IoError::read(path, e))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(|e| IoError::read(path, e))?;

    // Excel prepends a BOM to "CSV UTF-8" exports.
    let bytes = match bytes.strip_prefix(b"\xEF\xBB\xBF") {
        Some(rest) => rest.to_vec(),
        None => bytes,
    };

    match String::from_utf8(bytes) {
        Ok(s) => Ok(s),
        Err(e) => {
            log::debug!("{} is not UTF-8, decoding as Windows-1252", path.display());
            let bytes = e.into_bytes();
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            Ok(decoded.into_owned())
        }
    }
}

fn import_from_string(content: &str, delimiter: u8) -> Result<LoadedSheet, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut grid: Vec<Vec<CellValue>> = Vec::new();
    for result in reader.records() {
        let record = result?;
        grid.push(
            record
                .iter()
                .map(|field| {
                    if field.is_empty() {
                        CellValue::Empty
                    } else {
                        CellValue::Text(field.to_string())
                    }
                })
                .collect(),
        );
    }

    Ok(rows_from_grid(grid))
}

pub fn export_with_delimiter(
    path: &Path,
    headers: &[&str],
    rows: &[Vec<ExportCell>],
    delimiter: u8,
) -> Result<(), IoError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(path)
        .map_err(|e| IoError::write(path, e))?;

    writer.write_record(headers).map_err(|e| IoError::write(path, e))?;
    for row in rows {
        let record: Vec<String> = row.iter().map(|cell| cell.to_string()).collect();
        writer.write_record(&record).map_err(|e| IoError::write(path, e))?;
    }

    writer.flush().map_err(|e| IoError::write(path, e))?;
    Ok(())
}
