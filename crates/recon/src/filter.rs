//! Status filter applied to the matched list before display or export.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::{ReconciledItem, Status};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Alert,
    Ok,
}

impl StatusFilter {
    pub fn accepts(&self, status: Status) -> bool {
        match self {
            Self::All => true,
            Self::Alert => status == Status::Alert,
            Self::Ok => status == Status::Ok,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" | "tous" => Ok(Self::All),
            "alert" | "alerte" => Ok(Self::Alert),
            "ok" => Ok(Self::Ok),
            other => Err(format!("unknown status filter '{other}' (expected all, alert or ok)")),
        }
    }
}

impl std::fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Alert => write!(f, "alert"),
            Self::Ok => write!(f, "ok"),
        }
    }
}

/// Items whose status passes `filter`, in their original order.
pub fn filter_by_status(matched: &[ReconciledItem], filter: StatusFilter) -> Vec<&ReconciledItem> {
    matched.iter().filter(|item| filter.accepts(item.status)).collect()
}
