//! Descriptive statistics
//!
//! Per-column summaries of an uploaded table. Numeric columns get count,
//! mean, sample standard deviation, min, quartiles and max; text columns
//! are left out. A table without any numeric column gets a categorical
//! summary (count, unique, top, freq) of its text columns instead.

use serde::Serialize;
use std::collections::HashMap;

use super::error::DataResult;
use super::table::{Cell, DataTable};

/// Rows shown in the upload preview
pub const HEAD_ROWS: usize = 5;

/// Statistic labels for numeric summaries, in display order
pub const NUMERIC_STATS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

/// Statistic labels for categorical summaries, in display order
pub const CATEGORICAL_STATS: [&str; 4] = ["count", "unique", "top", "freq"];

/// Summary of one numeric column. Statistics of an empty column are NaN.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NumericSummary {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    #[serde(rename = "25%")]
    pub q25: f64,
    #[serde(rename = "50%")]
    pub q50: f64,
    #[serde(rename = "75%")]
    pub q75: f64,
    pub max: f64,
}

impl NumericSummary {
    pub fn from_values(column: impl Into<String>, mut values: Vec<f64>) -> Self {
        values.sort_by(|a, b| a.total_cmp(b));
        let count = values.len();

        let mean = if count == 0 {
            f64::NAN
        } else {
            values.iter().sum::<f64>() / count as f64
        };

        // Sample standard deviation (n - 1)
        let std = if count < 2 {
            f64::NAN
        } else {
            let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (count - 1) as f64;
            var.sqrt()
        };

        Self {
            column: column.into(),
            count,
            mean,
            std,
            min: values.first().copied().unwrap_or(f64::NAN),
            q25: quantile(&values, 0.25),
            q50: quantile(&values, 0.50),
            q75: quantile(&values, 0.75),
            max: values.last().copied().unwrap_or(f64::NAN),
        }
    }

    /// Values in [`NUMERIC_STATS`] order
    pub fn values(&self) -> [f64; 8] {
        [
            self.count as f64,
            self.mean,
            self.std,
            self.min,
            self.q25,
            self.q50,
            self.q75,
            self.max,
        ]
    }
}

/// Summary of one text column
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoricalSummary {
    pub column: String,
    pub count: usize,
    pub unique: usize,
    /// Most frequent value; ties go to the first seen
    pub top: Option<String>,
    pub freq: usize,
}

impl CategoricalSummary {
    pub fn from_values<'a>(column: impl Into<String>, values: impl Iterator<Item = &'a str>) -> Self {
        // value -> (first row seen, occurrences)
        let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
        let mut count = 0;

        for value in values {
            counts.entry(value).or_insert((count, 0)).1 += 1;
            count += 1;
        }

        // Ties go to the value seen first
        let top = counts
            .iter()
            .max_by(|(_, (seen_a, n_a)), (_, (seen_b, n_b))| {
                n_a.cmp(n_b).then(seen_b.cmp(seen_a))
            })
            .map(|(value, (_, n))| (*value, *n));

        Self {
            column: column.into(),
            count,
            unique: counts.len(),
            top: top.map(|(v, _)| v.to_string()),
            freq: top.map(|(_, n)| n).unwrap_or(0),
        }
    }
}

/// Statistics table for a whole upload
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "kind", content = "columns", rename_all = "lowercase")]
pub enum Description {
    Numeric(Vec<NumericSummary>),
    Categorical(Vec<CategoricalSummary>),
    /// The table has no columns at all
    Empty,
}

impl Description {
    /// Column names covered by the statistics
    pub fn columns(&self) -> Vec<&str> {
        match self {
            Description::Numeric(cols) => cols.iter().map(|c| c.column.as_str()).collect(),
            Description::Categorical(cols) => cols.iter().map(|c| c.column.as_str()).collect(),
            Description::Empty => Vec::new(),
        }
    }

    /// Display rows: one per statistic, one formatted value per column
    pub fn rows(&self) -> Vec<(&'static str, Vec<String>)> {
        match self {
            Description::Numeric(cols) => NUMERIC_STATS
                .iter()
                .enumerate()
                .map(|(idx, label)| {
                    let values = cols.iter().map(|c| format_stat(c.values()[idx])).collect();
                    (*label, values)
                })
                .collect(),
            Description::Categorical(cols) => CATEGORICAL_STATS
                .iter()
                .map(|label| {
                    let values = cols
                        .iter()
                        .map(|c| match *label {
                            "count" => c.count.to_string(),
                            "unique" => c.unique.to_string(),
                            "top" => c.top.clone().unwrap_or_else(|| "NaN".to_string()),
                            _ => c.freq.to_string(),
                        })
                        .collect();
                    (*label, values)
                })
                .collect(),
            Description::Empty => Vec::new(),
        }
    }
}

/// Describe every column of `table`
pub fn describe(table: &DataTable) -> Description {
    let numeric = table.numeric_columns();

    if !numeric.is_empty() {
        return Description::Numeric(
            numeric
                .into_iter()
                .map(|idx| {
                    let values = table.column(idx).filter_map(Cell::as_f64).collect();
                    NumericSummary::from_values(&table.headers[idx], values)
                })
                .collect(),
        );
    }

    if table.column_count() == 0 {
        return Description::Empty;
    }

    Description::Categorical(
        table
            .headers
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                CategoricalSummary::from_values(name, table.column(idx).filter_map(Cell::as_text))
            })
            .collect(),
    )
}

/// Head rows plus statistics, ready to display or serialize
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UploadSummary {
    pub rows: usize,
    pub columns: Vec<String>,
    pub head: Vec<Vec<Cell>>,
    pub description: Description,
}

impl UploadSummary {
    pub fn from_table(table: &DataTable) -> Self {
        Self {
            rows: table.row_count(),
            columns: table.headers.clone(),
            head: table.head(HEAD_ROWS).to_vec(),
            description: describe(table),
        }
    }
}

/// Parse an upload and summarize it
pub fn summarize(bytes: &[u8]) -> DataResult<UploadSummary> {
    let table = DataTable::from_csv_bytes(bytes)?;
    Ok(UploadSummary::from_table(&table))
}

/// Linear interpolation between closest ranks; `sorted` must be ascending
fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }

    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

fn format_stat(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{:.6}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_numeric_summary() {
        let s = NumericSummary::from_values("x", vec![4.0, 1.0, 3.0, 2.0]);
        assert_eq!(s.count, 4);
        assert!(approx(s.mean, 2.5));
        assert!(approx(s.std, 1.2909944487358056));
        assert!(approx(s.min, 1.0));
        assert!(approx(s.q25, 1.75));
        assert!(approx(s.q50, 2.5));
        assert!(approx(s.q75, 3.25));
        assert!(approx(s.max, 4.0));
    }

    #[test]
    fn test_single_value_has_nan_std() {
        let s = NumericSummary::from_values("x", vec![7.0]);
        assert_eq!(s.count, 1);
        assert!(s.std.is_nan());
        assert!(approx(s.q75, 7.0));
    }

    #[test]
    fn test_text_columns_are_excluded() {
        let table = DataTable::from_csv_str(
            "city,visits,notes\nOslo,10,first\nLima,20,second\nPune,30,third",
        )
        .unwrap();

        let description = describe(&table);
        assert_eq!(description.columns(), vec!["visits"]);
        match &description {
            Description::Numeric(cols) => {
                assert_eq!(cols.len(), 1);
                assert_eq!(cols[0].count, 3);
                assert!(approx(cols[0].mean, 20.0));
                assert!(approx(cols[0].std, 10.0));
            }
            other => panic!("expected numeric description, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_values_are_not_counted() {
        let table = DataTable::from_csv_str("v,w\n1,a\n,b\n3,c").unwrap();
        let Description::Numeric(cols) = describe(&table) else {
            panic!("expected numeric description");
        };
        assert_eq!(cols[0].count, 2);
        assert!(approx(cols[0].mean, 2.0));
    }

    #[test]
    fn test_all_text_table_gets_categorical_summary() {
        let table = DataTable::from_csv_str("fruit\napple\npear\napple").unwrap();
        let Description::Categorical(cols) = describe(&table) else {
            panic!("expected categorical description");
        };
        assert_eq!(cols[0].count, 3);
        assert_eq!(cols[0].unique, 2);
        assert_eq!(cols[0].top.as_deref(), Some("apple"));
        assert_eq!(cols[0].freq, 2);
    }

    #[test]
    fn test_nan_token_is_not_counted() {
        let table = DataTable::from_csv_str("v,w\n1,a\nNaN,b\n3,c").unwrap();
        let Description::Numeric(cols) = describe(&table) else {
            panic!("expected numeric description");
        };
        assert_eq!(cols[0].count, 2);
        assert!(approx(cols[0].mean, 2.0));
        assert!(approx(cols[0].max, 3.0));
    }

    #[test]
    fn test_na_token_keeps_column_numeric() {
        let table = DataTable::from_csv_str("v,w\n1,a\nNA,b\n3,c").unwrap();
        let description = describe(&table);
        assert_eq!(description.columns(), vec!["v"]);
        let Description::Numeric(cols) = description else {
            panic!("expected numeric description");
        };
        assert_eq!(cols[0].count, 2);
        assert!(approx(cols[0].mean, 2.0));
    }

    #[test]
    fn test_header_only_upload_is_categorical() {
        let Description::Categorical(cols) = describe(&DataTable::from_csv_str("a,b\n").unwrap())
        else {
            panic!("expected categorical description");
        };
        assert_eq!(cols.len(), 2);
        assert_eq!(cols[0].count, 0);
        assert_eq!(cols[0].unique, 0);
        assert_eq!(cols[0].top, None);
        assert_eq!(cols[0].freq, 0);
    }

    #[test]
    fn test_large_unique_text_column() {
        let rows = 200_000;
        let mut csv = String::from("id\n");
        for i in 0..rows {
            csv.push_str(&format!("k{}\n", i));
        }

        let started = std::time::Instant::now();
        let summary = summarize(csv.as_bytes()).unwrap();
        assert!(started.elapsed() < std::time::Duration::from_secs(10));

        let Description::Categorical(cols) = summary.description else {
            panic!("expected categorical description");
        };
        assert_eq!(cols[0].count, rows);
        assert_eq!(cols[0].unique, rows);
        assert_eq!(cols[0].top.as_deref(), Some("k0"));
        assert_eq!(cols[0].freq, 1);
    }

    #[test]
    fn test_top_tie_goes_to_first_seen() {
        let s = CategoricalSummary::from_values("c", ["b", "a", "a", "b", "c"].into_iter());
        assert_eq!(s.top.as_deref(), Some("b"));
        assert_eq!(s.freq, 2);
        assert_eq!(s.unique, 3);
    }

    #[test]
    fn test_display_rows() {
        let table = DataTable::from_csv_str("a,b\n1,2\n3,4").unwrap();
        let rows = describe(&table).rows();
        assert_eq!(rows.len(), 8);
        assert_eq!(rows[0], ("count", vec!["2.000000".to_string(), "2.000000".to_string()]));
        assert_eq!(rows[1].1[0], "2.000000");
    }

    #[test]
    fn test_summarize() {
        let summary = summarize(b"n,label\n1,a\n2,b\n3,c\n4,d\n5,e\n6,f").unwrap();
        assert_eq!(summary.rows, 6);
        assert_eq!(summary.head.len(), HEAD_ROWS);
        assert_eq!(summary.description.columns(), vec!["n"]);
    }
}
