//! Tabular input and header schema resolution.
//!
//! A [`Table`] is the JSON export of one spreadsheet tab: a header row plus
//! rows of [`Cell`]s. Headers are authored inconsistently (trailing
//! non-breaking spaces, shouty capitals, duplicated names), so each canonical
//! field lists the header variants it accepts and is resolved to a column
//! index once, before any row is read.

use serde::{Deserialize, Serialize};

use crate::cells::Cell;
use crate::error::{CatalogError, TableKind};

/// A header row and its data rows.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self { columns, rows }
    }

    /// Parse a table from its JSON export.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Headers normalized for lookup, with duplicates disambiguated the way
    /// spreadsheet exports do it: `name`, `name.1`, `name.2`, ...
    pub fn normalized_columns(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::with_capacity(self.columns.len());
        for raw in &self.columns {
            let base = normalize_header(raw);
            let mut candidate = base.clone();
            let mut n = 0;
            while out.contains(&candidate) {
                n += 1;
                candidate = format!("{}.{}", base, n);
            }
            out.push(candidate);
        }
        out
    }

    pub fn schema(&self, table: TableKind) -> Schema {
        Schema {
            table,
            headers: self.normalized_columns(),
        }
    }
}

/// Normalize a header for comparison: non-breaking spaces become spaces,
/// runs of whitespace collapse to one, ends are trimmed, case is folded.
pub fn normalize_header(raw: &str) -> String {
    raw.replace('\u{a0}', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Column lookup for one table.
#[derive(Debug, Clone)]
pub struct Schema {
    table: TableKind,
    headers: Vec<String>,
}

impl Schema {
    /// Indices of every present variant, in variant preference order.
    pub fn optional(&self, variants: &[&str]) -> Column {
        let indices = variants
            .iter()
            .filter_map(|v| {
                let key = normalize_header(v);
                self.headers.iter().position(|h| *h == key)
            })
            .collect();
        Column { indices }
    }

    /// Like [`Schema::optional`], but at least one variant must be present.
    /// `field` names the column in the error.
    pub fn required(&self, field: &'static str, variants: &[&str]) -> Result<Column, CatalogError> {
        let column = self.optional(variants);
        if column.is_present() {
            Ok(column)
        } else {
            Err(CatalogError::missing_column(self.table, field))
        }
    }

    /// The first column of the table, whatever it is called.
    pub fn first(&self) -> Column {
        Column {
            indices: if self.headers.is_empty() { vec![] } else { vec![0] },
        }
    }
}

/// A resolved field: candidate column indices in preference order.
#[derive(Debug, Clone, Default)]
pub struct Column {
    indices: Vec<usize>,
}

static EMPTY: Cell = Cell::Empty;

impl Column {
    pub fn is_present(&self) -> bool {
        !self.indices.is_empty()
    }

    /// First non-blank cell among the candidate columns, else the first
    /// candidate's cell, else `Empty`. Short rows read as `Empty`.
    pub fn cell<'a>(&self, row: &'a [Cell]) -> &'a Cell {
        let mut fallback: Option<&'a Cell> = None;
        for &i in &self.indices {
            let cell = row.get(i).unwrap_or(&EMPTY);
            if !cell.is_blank() {
                return cell;
            }
            fallback.get_or_insert(cell);
        }
        fallback.unwrap_or(&EMPTY)
    }

    pub fn text(&self, row: &[Cell]) -> Option<String> {
        self.cell(row).text()
    }

    pub fn text_or_empty(&self, row: &[Cell]) -> String {
        self.cell(row).text_or_empty()
    }
}
