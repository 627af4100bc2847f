use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum IoError {
    /// File could not be opened or read.
    Read { path: PathBuf, message: String },
    /// File content could not be parsed in its format.
    Parse { path: PathBuf, message: String },
    /// Output file could not be written.
    Write { path: PathBuf, message: String },
    /// Extension not recognised as a readable format.
    UnsupportedFormat(PathBuf),
    /// Extension not writable (unknown, or a read-only spreadsheet format).
    UnsupportedOutput(PathBuf),
    /// Workbook has no worksheets.
    NoSheets(PathBuf),
    /// Requested worksheet is not in the workbook.
    SheetNotFound { path: PathBuf, sheet: String, available: Vec<String> },
}

impl IoError {
    pub(crate) fn read(path: &std::path::Path, message: impl fmt::Display) -> Self {
        Self::Read { path: path.to_path_buf(), message: message.to_string() }
    }

    pub(crate) fn parse(path: &std::path::Path, message: impl fmt::Display) -> Self {
        Self::Parse { path: path.to_path_buf(), message: message.to_string() }
    }

    pub(crate) fn write(path: &std::path::Path, message: impl fmt::Display) -> Self {
        Self::Write { path: path.to_path_buf(), message: message.to_string() }
    }
}

impl fmt::Display for IoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, message } => write!(f, "cannot read {}: {message}", path.display()),
            Self::Parse { path, message } => write!(f, "cannot parse {}: {message}", path.display()),
            Self::Write { path, message } => write!(f, "cannot write {}: {message}", path.display()),
            Self::UnsupportedFormat(path) => write!(
                f,
                "unsupported file format: {} (expected .xlsx, .xls, .ods, .csv, .tsv or .json)",
                path.display()
            ),
            Self::UnsupportedOutput(path) => write!(
                f,
                "cannot write {}: output must be .xlsx, .csv, .tsv or .json",
                path.display()
            ),
            Self::NoSheets(path) => write!(f, "{} contains no sheets", path.display()),
            Self::SheetNotFound { path, sheet, available } => write!(
                f,
                "{}: sheet '{sheet}' not found (available: {})",
                path.display(),
                available.join(", ")
            ),
        }
    }
}

impl std::error::Error for IoError {}
