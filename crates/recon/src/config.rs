use serde::Deserialize;

use crate::columns::{ColumnAliases, Field};
use crate::error::ReconError;

pub const DEFAULT_SHEET_NAME: &str = "Analyse Stock";
pub const DEFAULT_FILE_PREFIX: &str = "analyse_stock";
/// Worksheet listing items without threshold, written next to the analysis.
pub const UNMATCHED_SHEET_NAME: &str = "Sans seuil";

/// Characters Excel refuses in worksheet names.
const FORBIDDEN_SHEET_CHARS: &[char] = &['[', ']', ':', '*', '?', '/', '\\'];

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ReconConfig {
    pub name: String,
    pub columns: ColumnAliases,
    pub export: ExportConfig,
}

impl Default for ReconConfig {
    fn default() -> Self {
        Self {
            name: "default".into(),
            columns: ColumnAliases::default(),
            export: ExportConfig::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// File shape
// ---------------------------------------------------------------------------

/// On-disk form. Every section is optional; omitted alias lists keep the
/// built-in spellings.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    columns: ColumnOverrides,
    #[serde(default)]
    export: ExportConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ColumnOverrides {
    identifier: Option<Vec<String>>,
    quantity: Option<Vec<String>>,
    threshold: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    pub sheet_name: String,
    pub file_prefix: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            sheet_name: DEFAULT_SHEET_NAME.into(),
            file_prefix: DEFAULT_FILE_PREFIX.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl ReconConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let raw: RawConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;

        let defaults = ColumnAliases::default();
        let config = ReconConfig {
            name: raw.name.unwrap_or_else(|| "default".into()),
            columns: ColumnAliases {
                identifier: raw.columns.identifier.unwrap_or(defaults.identifier),
                quantity: raw.columns.quantity.unwrap_or(defaults.quantity),
                threshold: raw.columns.threshold.unwrap_or(defaults.threshold),
            },
            export: raw.export,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        for field in [Field::Identifier, Field::Quantity, Field::Threshold] {
            let aliases = self.columns.for_field(field);
            if aliases.is_empty() {
                return Err(ReconError::ConfigValidation(format!(
                    "columns.{field}: at least one header alias is required"
                )));
            }
            if let Some(pos) = aliases.iter().position(|a| a.trim().is_empty()) {
                return Err(ReconError::ConfigValidation(format!(
                    "columns.{field}[{pos}]: header alias is blank"
                )));
            }
        }

        let sheet = &self.export.sheet_name;
        let len = sheet.chars().count();
        if len == 0 || len > 31 {
            return Err(ReconError::ConfigValidation(format!(
                "export.sheet_name must be 1-31 characters, got {len}"
            )));
        }
        if let Some(c) = sheet.chars().find(|c| FORBIDDEN_SHEET_CHARS.contains(c)) {
            return Err(ReconError::ConfigValidation(format!(
                "export.sheet_name contains forbidden character '{c}'"
            )));
        }
        // Excel compares sheet names case-insensitively.
        if sheet.to_lowercase() == UNMATCHED_SHEET_NAME.to_lowercase() {
            return Err(ReconError::ConfigValidation(format!(
                "export.sheet_name '{sheet}' is reserved for items without threshold"
            )));
        }
        if self.export.file_prefix.trim().is_empty() {
            return Err(ReconError::ConfigValidation(
                "export.file_prefix must not be blank".into(),
            ));
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
