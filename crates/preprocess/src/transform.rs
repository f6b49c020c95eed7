//! Raw Export Reshaping

use crate::PreprocessError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::{Read, Write};
use tracing::{info, warn};

/// Rows after this year are discarded; later months of the export are
/// provisional
pub const CUTOFF_YEAR: i32 = 2020;

/// One row of the raw statistical-office export
#[derive(Debug, Deserialize)]
pub struct RawRow {
    /// Accident category ("Alkoholunfälle", "Fluchtunfälle", ...)
    #[serde(rename = "MONATSZAHL")]
    pub category: String,
    /// Accident type; only the "insgesamt" aggregate is kept
    #[serde(rename = "AUSPRAEGUNG")]
    pub kind: String,
    #[serde(rename = "JAHR")]
    pub year: i32,
    /// Raw month field, either "<year><month>" or the literal "Summe"
    #[serde(rename = "MONAT")]
    pub month: String,
    /// Accident count; empty for months not yet published
    #[serde(rename = "WERT")]
    pub value: Option<f64>,
}

/// One month of the pivoted feature table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessedRow {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Year")]
    pub year: i32,
    /// Zero-padded month number, kept as a column for readability
    #[serde(rename = "Month")]
    pub month: String,
    #[serde(rename = "Alkoholunfälle")]
    pub alcohol: f64,
    #[serde(rename = "Fluchtunfälle")]
    pub hit_and_run: f64,
    #[serde(rename = "Verkehrsunfälle")]
    pub total: f64,
}

/// Column slot for a raw category, matching the serving feature order
fn feature_index(category: &str) -> Option<usize> {
    match category {
        "Alkoholunfälle" => Some(0),
        "Fluchtunfälle" => Some(1),
        "Verkehrsunfälle" => Some(2),
        _ => None,
    }
}

/// Month number from the trailing two characters of the raw month field
fn month_index(raw: &str) -> Option<u32> {
    let suffix = raw.get(raw.len().saturating_sub(2)..)?;
    let month = suffix.parse::<u32>().ok()?;
    (1..=12).contains(&month).then_some(month)
}

/// Reshape the raw export into date-sorted monthly feature rows
///
/// Keeps only "insgesamt" aggregate rows, drops annual "Summe" rows and
/// years after the cutoff, pivots the categories into columns (summing
/// duplicates, missing counts as zero), and drops months where all three
/// features are zero. Malformed rows are skipped with a warning rather
/// than aborting the run.
pub fn reshape<R: Read>(input: R) -> Result<Vec<ProcessedRow>, PreprocessError> {
    let mut reader = csv::Reader::from_reader(input);
    let mut cells: BTreeMap<NaiveDate, [f64; 3]> = BTreeMap::new();
    let mut skipped = 0usize;

    for result in reader.deserialize::<RawRow>() {
        let row = match result {
            Ok(row) => row,
            Err(e) => {
                warn!("Skipping unreadable row: {e}");
                skipped += 1;
                continue;
            }
        };

        if row.kind != "insgesamt" {
            continue;
        }
        if row.month == "Summe" {
            continue;
        }
        if row.year > CUTOFF_YEAR {
            continue;
        }

        let Some(index) = feature_index(&row.category) else {
            warn!("Skipping unknown category {:?}", row.category);
            skipped += 1;
            continue;
        };
        let Some(month) = month_index(&row.month) else {
            warn!("Skipping unrecognized month field {:?}", row.month);
            skipped += 1;
            continue;
        };
        let Some(date) = NaiveDate::from_ymd_opt(row.year, month, 1) else {
            skipped += 1;
            continue;
        };

        let entry = cells.entry(date).or_insert([0.0; 3]);
        entry[index] += row.value.unwrap_or(0.0);
    }

    if skipped > 0 {
        warn!("Skipped {skipped} raw rows");
    }

    let rows: Vec<ProcessedRow> = cells
        .into_iter()
        .filter(|(_, values)| values.iter().any(|v| *v != 0.0))
        .map(|(date, values)| ProcessedRow {
            date,
            year: date.year(),
            month: format!("{:02}", date.month()),
            alcohol: values[0],
            hit_and_run: values[1],
            total: values[2],
        })
        .collect();

    if rows.is_empty() {
        return Err(PreprocessError::EmptyOutput);
    }
    info!("Reshaped raw export into {} monthly rows", rows.len());
    Ok(rows)
}

/// Write the pivoted table with the column layout the serving side expects
pub fn write_csv<W: Write>(rows: &[ProcessedRow], output: W) -> Result<(), PreprocessError> {
    let mut writer = csv::Writer::from_writer(output);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
