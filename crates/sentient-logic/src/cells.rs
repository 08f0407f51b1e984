//! Spreadsheet cell values and soft-failing coercions.
//!
//! Race and gear sheets are hand-authored, so numeric columns contain blanks,
//! stray text, `NaN`s and mixed percentage conventions. Every coercion here
//! degrades to a caller-supplied default instead of failing.

use serde::{Deserialize, Serialize};

use crate::constants::NAN_LITERAL;

/// One cell of an input table, as exported to JSON.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    #[default]
    Empty,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Cell {
    /// Trimmed text content, or `None` for blanks, `nan` literals and non-text cells
    /// that carry no meaningful string.
    pub fn text(&self) -> Option<String> {
        let s = match self {
            Cell::Empty => return None,
            Cell::Bool(b) => b.to_string(),
            Cell::Number(n) if n.is_nan() => return None,
            Cell::Number(n) => n.to_string(),
            Cell::Text(t) => t.trim().to_string(),
        };
        if s.is_empty() || s.eq_ignore_ascii_case(NAN_LITERAL) {
            None
        } else {
            Some(s)
        }
    }

    /// Trimmed text content, or an empty string.
    pub fn text_or_empty(&self) -> String {
        self.text().unwrap_or_default()
    }

    pub fn is_blank(&self) -> bool {
        self.text().is_none()
    }
}

/// Coerce a cell to a finite number, falling back to `default`.
pub fn number(cell: &Cell, default: f64) -> f64 {
    let v = match cell {
        Cell::Number(n) => *n,
        Cell::Text(t) => match t.trim().parse::<f64>() {
            Ok(v) => v,
            Err(_) => return default,
        },
        Cell::Empty | Cell::Bool(_) => return default,
    };
    if v.is_finite() {
        v
    } else {
        default
    }
}

/// Coerce a cell to a decimal fraction.
///
/// `"20%"` becomes 0.2. A bare value with magnitude above 1 is read as a
/// whole-number percentage (`20` → 0.2); values already in \[-1, 1\] pass
/// through.
pub fn percent(cell: &Cell, default: f64) -> f64 {
    if let Cell::Text(t) = cell {
        let s = t.trim();
        if s.is_empty() {
            return default;
        }
        if let Some(prefix) = s.strip_suffix('%') {
            return match prefix.trim().parse::<f64>() {
                Ok(v) if v.is_finite() => v / 100.0,
                _ => default,
            };
        }
    }
    let v = number(cell, default);
    if v.abs() > 1.0 {
        v / 100.0
    } else {
        v
    }
}

/// Extract a gold amount from cells like `"200 Gold"`, `"200"` or `200`.
/// Text without any digits yields 0.
pub fn gold_cost(cell: &Cell) -> i64 {
    match cell {
        Cell::Text(t) => first_integer(t).unwrap_or(0),
        Cell::Number(n) if n.is_finite() => n.trunc() as i64,
        _ => 0,
    }
}

/// First integer-looking substring (optional leading `-`) in `s`.
fn first_integer(s: &str) -> Option<i64> {
    let bytes = s.as_bytes();
    let start = bytes.iter().position(u8::is_ascii_digit)?;
    let end = bytes[start..]
        .iter()
        .position(|b| !b.is_ascii_digit())
        .map_or(bytes.len(), |n| start + n);
    let negative = start > 0 && bytes[start - 1] == b'-';
    let magnitude: i64 = s[start..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}
