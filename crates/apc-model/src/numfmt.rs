//! Locale-style numeric parsing for monetary cells.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Decimal-mark convention for parsing monetary values.
///
/// `Point` reads `1,234.56`, `Comma` reads `1.234,56`. Group separators
/// are tolerated but not required. This stands in for system-locale
/// parsing: the caller picks the convention the file was written in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberFormat {
    #[default]
    Point,
    Comma,
}

impl NumberFormat {
    /// Parses a monetary cell under this convention. Returns `None` for
    /// empty input or anything that is not a plain number.
    pub fn parse(&self, raw: &str) -> Option<f64> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        let (group, decimal) = match self {
            NumberFormat::Point => (',', '.'),
            NumberFormat::Comma => ('.', ','),
        };
        let mut normalized = String::with_capacity(trimmed.len());
        for ch in trimmed.chars() {
            if ch == group {
                continue;
            }
            if ch == decimal {
                normalized.push('.');
            } else {
                normalized.push(ch);
            }
        }
        normalized.parse::<f64>().ok()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NumberFormat::Point => "point",
            NumberFormat::Comma => "comma",
        }
    }
}

impl fmt::Display for NumberFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Formats a monetary amount canonically: `.` decimal mark, no group
/// separators, and integral amounts without a fractional part.
pub fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        let s = format!("{value}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
