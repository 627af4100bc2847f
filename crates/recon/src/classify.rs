//! Per-item classification: alert status, priority tier, security percentage.

use std::fmt;

use serde::Serialize;

use crate::model::Status;

impl Status {
    /// `Alert` exactly when stock is below the threshold.
    pub fn from_levels(quantity: f64, threshold: f64) -> Self {
        if quantity < threshold {
            Self::Alert
        } else {
            Self::Ok
        }
    }
}

/// Urgency bucket of an item, from the quantity/threshold ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    None,
    Low,
    Medium,
    High,
}

impl Priority {
    /// Label used in the exported sheet.
    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "Aucune",
            Self::Low => "🟡 Basse",
            Self::Medium => "🟠 Moyenne",
            Self::High => "🔴 Haute",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Priority tier. Stock at or above threshold is always `None`, which also
/// covers a zero threshold for any non-negative quantity.
pub fn priority_of(quantity: f64, threshold: f64) -> Priority {
    if quantity >= threshold {
        return Priority::None;
    }
    let ratio = quantity / threshold;
    if ratio < 0.3 {
        Priority::High
    } else if ratio < 0.6 {
        Priority::Medium
    } else {
        Priority::Low
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SecurityPercent {
    NotApplicable,
    Percent(i64),
}

impl fmt::Display for SecurityPercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotApplicable => write!(f, "N/A"),
            Self::Percent(p) => write!(f, "{p} %"),
        }
    }
}

/// Stock as a rounded percentage of threshold; not applicable for a zero
/// threshold or when the ratio is not a finite number.
pub fn security_percent(quantity: f64, threshold: f64) -> SecurityPercent {
    if threshold == 0.0 {
        return SecurityPercent::NotApplicable;
    }
    let ratio = quantity / threshold * 100.0;
    if !ratio.is_finite() {
        return SecurityPercent::NotApplicable;
    }
    SecurityPercent::Percent(round_half_up(ratio))
}

/// Round to the nearest integer, halves towards positive infinity.
/// `x` must be finite; out-of-range values saturate.
pub fn round_half_up(x: f64) -> i64 {
    let r = x.floor();
    let rounded = if x - r >= 0.5 { r + 1.0 } else { r };
    rounded as i64
}
