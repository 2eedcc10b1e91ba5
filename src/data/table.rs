//! Uploaded Table
//!
//! Parses a CSV upload into typed columns. The first row is the header.
//! Each column is typed by looking at every non-empty cell:
//!
//! - all integers, no gaps: `Integer`
//! - all numbers (gaps allowed): `Float`
//! - anything else: `Text`
//!
//! Empty cells and the usual null markers (`NaN`, `NA`, `null`, ...) become
//! [`Cell::Missing`]. A column with no rows at all is `Text`. Rows shorter
//! than the header are padded with missing cells; longer rows are an error.

use serde::Serialize;

use super::error::{DataError, DataResult};

/// Cell values read as missing, compared after trimming
pub const MISSING_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Whether a trimmed field is a missing-value marker
pub fn is_missing(field: &str) -> bool {
    MISSING_TOKENS.contains(&field)
}

/// Inferred type of a column
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Integer,
    Float,
    Text,
}

impl ColumnKind {
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnKind::Integer | ColumnKind::Float)
    }
}

/// A single parsed value
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum Cell {
    Int(i64),
    Float(f64),
    Text(String),
    Missing,
}

impl Cell {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Int(v) => Some(*v as f64),
            Cell::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Int(v) => write!(f, "{}", v),
            Cell::Float(v) => write!(f, "{}", v),
            Cell::Text(s) => write!(f, "{}", s),
            Cell::Missing => write!(f, "NaN"),
        }
    }
}

/// A parsed CSV upload
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DataTable {
    pub headers: Vec<String>,
    pub kinds: Vec<ColumnKind>,
    pub rows: Vec<Vec<Cell>>,
}

impl DataTable {
    /// Parse raw upload bytes
    pub fn from_csv_bytes(bytes: &[u8]) -> DataResult<Self> {
        let text = std::str::from_utf8(bytes).map_err(|e| DataError::Encoding(e.to_string()))?;
        Self::from_csv_str(text)
    }

    /// Parse CSV text
    pub fn from_csv_str(text: &str) -> DataResult<Self> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        if text.trim().is_empty() {
            return Err(DataError::Empty);
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers = dedupe_headers(reader.headers()?.iter());
        let width = headers.len();

        let mut raw: Vec<Vec<Option<String>>> = Vec::new();
        for (line_num, result) in reader.records().enumerate() {
            let record = result?;

            // Blank lines come through as a single empty field
            if record.len() == 1 && record.get(0).is_some_and(|f| f.trim().is_empty()) {
                continue;
            }

            if record.len() > width {
                return Err(DataError::RaggedRow {
                    line: line_num + 2,
                    expected: width,
                    found: record.len(),
                });
            }

            let mut row: Vec<Option<String>> = record
                .iter()
                .map(|field| {
                    let field = field.trim();
                    (!is_missing(field)).then(|| field.to_string())
                })
                .collect();
            row.resize(width, None);
            raw.push(row);
        }

        let kinds: Vec<ColumnKind> = if raw.is_empty() {
            vec![ColumnKind::Text; width]
        } else {
            (0..width)
                .map(|col| infer_kind(raw.iter().map(|row| row[col].as_deref())))
                .collect()
        };

        let rows = raw
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .zip(&kinds)
                    .map(|(value, kind)| to_cell(value, *kind))
                    .collect()
            })
            .collect();

        Ok(Self {
            headers,
            kinds,
            rows,
        })
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// First `n` rows
    pub fn head(&self, n: usize) -> &[Vec<Cell>] {
        &self.rows[..n.min(self.rows.len())]
    }

    /// Indices of numeric columns
    pub fn numeric_columns(&self) -> Vec<usize> {
        self.kinds
            .iter()
            .enumerate()
            .filter(|(_, kind)| kind.is_numeric())
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Cells of one column, top to bottom
    pub fn column(&self, idx: usize) -> impl Iterator<Item = &Cell> + '_ {
        self.rows.iter().filter_map(move |row| row.get(idx))
    }
}

/// Fill empty header names and make duplicates unique (`a`, `a.1`, `a.2`)
fn dedupe_headers<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut headers: Vec<String> = Vec::new();
    for (idx, name) in raw.enumerate() {
        let base = match name.trim() {
            "" => format!("Unnamed: {}", idx),
            trimmed => trimmed.to_string(),
        };

        let mut candidate = base.clone();
        let mut suffix = 1;
        while headers.contains(&candidate) {
            candidate = format!("{}.{}", base, suffix);
            suffix += 1;
        }
        headers.push(candidate);
    }
    headers
}

fn infer_kind<'a>(values: impl Iterator<Item = Option<&'a str>>) -> ColumnKind {
    let mut all_int = true;
    let mut has_missing = false;

    for value in values {
        match value {
            None => has_missing = true,
            Some(v) => {
                if v.parse::<i64>().is_ok() {
                    continue;
                }
                all_int = false;
                if v.parse::<f64>().is_err() {
                    return ColumnKind::Text;
                }
            }
        }
    }

    if all_int && !has_missing {
        ColumnKind::Integer
    } else {
        ColumnKind::Float
    }
}

fn to_cell(value: Option<String>, kind: ColumnKind) -> Cell {
    let Some(value) = value else {
        return Cell::Missing;
    };

    match kind {
        ColumnKind::Integer => value.parse().map(Cell::Int).unwrap_or(Cell::Text(value)),
        ColumnKind::Float => value.parse().map(Cell::Float).unwrap_or(Cell::Text(value)),
        ColumnKind::Text => Cell::Text(value),
    }
}
