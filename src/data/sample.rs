//! Sample time series
//!
//! One row per calendar day of a year with a random-walk sales figure,
//! a customer count and a category label. The RNG is passed in so a
//! seeded generator gives the same table every time.

use chrono::{Datelike, Month, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};
use std::io::Write;

use super::error::{DataError, DataResult};

/// Identity of this generator, part of every cache key
pub const GENERATOR_NAME: &str = "daily_sales_v1";

/// Starting level of the sales random walk
const SALES_BASELINE: f64 = 100.0;

/// Customer counts are drawn from this half-open range
const CUSTOMERS_LOW: u32 = 50;
const CUSTOMERS_HIGH: u32 = 200;

/// Category label of a sample row
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Segment {
    A,
    B,
    C,
}

impl Segment {
    pub fn all() -> &'static [Segment] {
        &[Segment::A, Segment::B, Segment::C]
    }
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Segment::A => write!(f, "A"),
            Segment::B => write!(f, "B"),
            Segment::C => write!(f, "C"),
        }
    }
}

/// One day of sample data
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SampleRow {
    pub date: NaiveDate,
    pub sales: f64,
    pub customers: u32,
    pub category: Segment,
}

/// Average sales for one calendar month
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MonthlySales {
    /// 1-based month number
    pub month: u32,
    /// English month name
    pub name: &'static str,
    pub sales: f64,
}

/// Generated table, ordered by date with one row per day
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SampleSeries {
    pub year: i32,
    pub rows: Vec<SampleRow>,
}

/// Create the RNG for a sample table.
///
/// `None` draws fresh entropy, so values differ run to run.
pub fn rng_for(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Generate the sample table for `year`.
///
/// Columns are drawn in order: all sales steps, then all customer counts,
/// then all categories.
pub fn generate<R: Rng>(year: i32, rng: &mut R) -> DataResult<SampleSeries> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1).ok_or(DataError::InvalidYear(year))?;
    let end = NaiveDate::from_ymd_opt(year, 12, 31).ok_or(DataError::InvalidYear(year))?;

    let dates: Vec<NaiveDate> = start.iter_days().take_while(|d| *d <= end).collect();
    let days = dates.len();

    let mut level = 0.0;
    let sales: Vec<f64> = (0..days)
        .map(|_| {
            level += rng.sample::<f64, _>(StandardNormal);
            level + SALES_BASELINE
        })
        .collect();

    let customers: Vec<u32> = (0..days)
        .map(|_| rng.gen_range(CUSTOMERS_LOW..CUSTOMERS_HIGH))
        .collect();

    let segments = Segment::all();
    let categories: Vec<Segment> = (0..days)
        .map(|_| segments[rng.gen_range(0..segments.len())])
        .collect();

    let rows = dates
        .into_iter()
        .zip(sales)
        .zip(customers)
        .zip(categories)
        .map(|(((date, sales), customers), category)| SampleRow {
            date,
            sales,
            customers,
            category,
        })
        .collect();

    Ok(SampleSeries { year, rows })
}

impl SampleSeries {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Mean sales per calendar month, in month order
    pub fn monthly_sales(&self) -> Vec<MonthlySales> {
        let mut sums = [(0.0_f64, 0_usize); 12];
        for row in &self.rows {
            let slot = &mut sums[row.date.month0() as usize];
            slot.0 += row.sales;
            slot.1 += 1;
        }

        sums.iter()
            .enumerate()
            .filter(|(_, (_, count))| *count > 0)
            .map(|(idx, (sum, count))| {
                let month = idx as u32 + 1;
                MonthlySales {
                    month,
                    name: month_name(month),
                    sales: sum / *count as f64,
                }
            })
            .collect()
    }

    /// Write the table as CSV with a header row
    pub fn write_csv<W: Write>(&self, writer: W) -> DataResult<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        for row in &self.rows {
            wtr.serialize(row)?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// CSV rendition of the whole table
    pub fn to_csv(&self) -> DataResult<String> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        String::from_utf8(buf).map_err(|e| DataError::Encoding(e.to_string()))
    }
}

fn month_name(month: u32) -> &'static str {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name())
        .unwrap_or("Unknown")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn seeded(year: i32, seed: u64) -> SampleSeries {
        generate(year, &mut rng_for(Some(seed))).unwrap()
    }

    #[test]
    fn test_leap_year_has_366_unique_sorted_days() {
        let series = seeded(2024, 1);
        assert_eq!(series.len(), 366);

        let unique: HashSet<_> = series.rows.iter().map(|r| r.date).collect();
        assert_eq!(unique.len(), 366);
        assert!(series.rows.windows(2).all(|w| w[1].date == w[0].date.succ_opt().unwrap()));

        assert_eq!(series.rows[0].date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(series.rows[365].date, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
    }

    #[test]
    fn test_common_year_has_365_days() {
        assert_eq!(seeded(2023, 1).len(), 365);
    }

    #[test]
    fn test_value_ranges() {
        let series = seeded(2024, 99);
        for row in &series.rows {
            assert!((CUSTOMERS_LOW..CUSTOMERS_HIGH).contains(&row.customers));
            assert!(row.sales.is_finite());
        }
    }

    #[test]
    fn test_same_seed_same_values() {
        assert_eq!(seeded(2024, 42), seeded(2024, 42));
        assert_ne!(seeded(2024, 42).rows, seeded(2024, 43).rows);
    }

    #[test]
    fn test_unseeded_keeps_shape() {
        let a = generate(2024, &mut rng_for(None)).unwrap();
        let b = generate(2024, &mut rng_for(None)).unwrap();
        assert_eq!(a.len(), b.len());
        assert_eq!(a.rows[10].date, b.rows[10].date);
    }

    #[test]
    fn test_monthly_sales() {
        let series = seeded(2024, 5);
        let monthly = series.monthly_sales();
        assert_eq!(monthly.len(), 12);
        assert_eq!(monthly[0].name, "January");
        assert_eq!(monthly[1].name, "February");
        assert_eq!(monthly[11].name, "December");

        let feb: Vec<f64> = series
            .rows
            .iter()
            .filter(|r| r.date.month() == 2)
            .map(|r| r.sales)
            .collect();
        assert_eq!(feb.len(), 29);
        let mean = feb.iter().sum::<f64>() / feb.len() as f64;
        assert!((monthly[1].sales - mean).abs() < 1e-9);
    }

    #[test]
    fn test_csv_has_header_and_all_rows() {
        let csv = seeded(2024, 3).to_csv().unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("date,sales,customers,category"));
        assert_eq!(lines.count(), 366);
        assert!(csv.contains("2024-02-29,"));
    }
}
