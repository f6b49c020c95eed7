//! Feature Table Implementation

use crate::{FeatureVector, TableError};
use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// First day of the given calendar month, `None` for an invalid month
pub fn month_start(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// One row of the processed accident statistics
///
/// Column names follow the Munich open-data export; extra columns in the
/// CSV (`Year`, `Month`) are ignored on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRecord {
    /// First day of the month this row covers
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    /// Alcohol-related accidents ("Alkoholunfälle")
    #[serde(rename = "Alkoholunfälle")]
    pub alcohol: f64,
    /// Hit-and-run accidents ("Fluchtunfälle")
    #[serde(rename = "Fluchtunfälle")]
    pub hit_and_run: f64,
    /// All traffic accidents ("Verkehrsunfälle")
    #[serde(rename = "Verkehrsunfälle")]
    pub total: f64,
}

impl MonthlyRecord {
    /// Feature values in model input order, index 0 is the forecast target
    pub fn features(&self) -> FeatureVector {
        [self.alcohol, self.hit_and_run, self.total]
    }
}

/// Date-ordered monthly feature table
///
/// Rows are sorted ascending by date at construction; duplicate months are
/// rejected so that a date range maps to at most one row per month.
pub struct FeatureTable {
    rows: Vec<MonthlyRecord>,
}

impl FeatureTable {
    /// Load the table from a CSV file with a parseable `Date` column
    pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Self, TableError> {
        let mut reader = csv::Reader::from_path(path.as_ref())?;
        let mut rows = Vec::new();
        for result in reader.deserialize() {
            let record: MonthlyRecord = result?;
            rows.push(record);
        }
        let table = Self::from_records(rows)?;
        info!(
            "Historical data loaded: {} months ({:?} to {:?})",
            table.len(),
            table.first_date(),
            table.last_date()
        );
        Ok(table)
    }

    /// Build a table from in-memory records, sorting by date
    pub fn from_records(mut rows: Vec<MonthlyRecord>) -> Result<Self, TableError> {
        rows.sort_by_key(|r| r.date);
        for pair in rows.windows(2) {
            if pair[0].date == pair[1].date {
                return Err(TableError::DuplicateDate(pair[0].date));
            }
        }
        Ok(Self { rows })
    }

    /// Feature vectors for months in `[target - months, target - 1 month]`,
    /// oldest first
    ///
    /// Gaps in the history shorten the result; callers requiring a full
    /// window must check the returned length.
    pub fn window_ending_before(&self, target: NaiveDate, months: u32) -> Vec<FeatureVector> {
        let Some(start) = target.checked_sub_months(Months::new(months)) else {
            return Vec::new();
        };
        let Some(end) = target.checked_sub_months(Months::new(1)) else {
            return Vec::new();
        };
        let window: Vec<FeatureVector> = self
            .rows
            .iter()
            .filter(|r| r.date >= start && r.date <= end)
            .map(|r| r.features())
            .collect();
        debug!(
            "Selected {} of {} requested months before {}",
            window.len(),
            months,
            target
        );
        window
    }

    /// Number of months in the table
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table holds no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Earliest covered month
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.rows.first().map(|r| r.date)
    }

    /// Latest covered month
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.rows.last().map(|r| r.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(year: i32, month: u32, alcohol: f64) -> MonthlyRecord {
        MonthlyRecord {
            date: month_start(year, month).unwrap(),
            alcohol,
            hit_and_run: alcohol * 10.0,
            total: alcohol * 100.0,
        }
    }

    fn year_of_records(year: i32) -> Vec<MonthlyRecord> {
        (1..=12).map(|m| record(year, m, m as f64)).collect()
    }

    #[test]
    fn test_rows_sorted_on_construction() {
        let mut rows = year_of_records(2020);
        rows.reverse();
        let table = FeatureTable::from_records(rows).unwrap();
        assert_eq!(table.first_date(), month_start(2020, 1));
        assert_eq!(table.last_date(), month_start(2020, 12));
    }

    #[test]
    fn test_duplicate_month_rejected() {
        let mut rows = year_of_records(2020);
        rows.push(record(2020, 6, 99.0));
        let result = FeatureTable::from_records(rows);
        assert!(matches!(result, Err(TableError::DuplicateDate(_))));
    }

    #[test]
    fn test_full_window_selection() {
        let table = FeatureTable::from_records(year_of_records(2020)).unwrap();
        let window = table.window_ending_before(month_start(2021, 1).unwrap(), 12);
        assert_eq!(window.len(), 12);
        // Oldest first, January through December
        assert_eq!(window[0][0], 1.0);
        assert_eq!(window[11][0], 12.0);
    }

    #[test]
    fn test_window_excludes_target_month() {
        let table = FeatureTable::from_records(year_of_records(2020)).unwrap();
        let window = table.window_ending_before(month_start(2020, 12).unwrap(), 12);
        // December itself must not be part of the window
        assert_eq!(window.len(), 11);
        assert_eq!(window[10][0], 11.0);
    }

    #[test]
    fn test_window_with_gap_is_short() {
        let mut rows = year_of_records(2020);
        rows.remove(5); // drop June
        let table = FeatureTable::from_records(rows).unwrap();
        let window = table.window_ending_before(month_start(2021, 1).unwrap(), 12);
        assert_eq!(window.len(), 11);
    }

    #[test]
    fn test_window_outside_covered_range() {
        let table = FeatureTable::from_records(year_of_records(2020)).unwrap();
        let window = table.window_ending_before(month_start(2024, 1).unwrap(), 12);
        assert!(window.is_empty());
    }

    #[test]
    fn test_csv_load_ignores_extra_columns() {
        let data = "\
Date,Year,Month,Alkoholunfälle,Fluchtunfälle,Verkehrsunfälle
2020-02-01,2020,02,28,740,3312
2020-01-01,2020,01,28,774,3941
";
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let rows: Vec<MonthlyRecord> = reader.deserialize().map(|r| r.unwrap()).collect();
        let table = FeatureTable::from_records(rows).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.first_date(), month_start(2020, 1));
        let window = table.window_ending_before(month_start(2020, 3).unwrap(), 12);
        assert_eq!(window, vec![[28.0, 774.0, 3941.0], [28.0, 740.0, 3312.0]]);
    }
}
