//! CSV ingestion and cleaning.
//!
//! Reads a raw customer CSV, validates and normalizes every row, and
//! writes a cleaned CSV in the fixed [`CLEAN_HEADER`] column order. Rows
//! are matched to columns by header name, so the raw file's column order
//! does not matter. Row-level failures are recovered locally: the row is
//! skipped, counted and logged, and the stream continues. Only file I/O
//! failures abort the run.

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use tracing::warn;

use crate::error::Result;
use crate::label;
use crate::record::{CustomerRecord, CLEAN_HEADER};

/// Accepted/rejected counts for one cleaning run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub accepted: usize,
    pub rejected: usize,
}

/// A single row failing to parse or validate. Consumed inside
/// [`clean_file`]; never escapes as a run-level error.
#[derive(Debug)]
struct RowError {
    field: &'static str,
    value: String,
    reason: &'static str,
}

impl std::fmt::Display for RowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}: '{}'", self.field, self.reason, self.value)
    }
}

/// Clean `input` into `output`, returning the row counts.
///
/// The output directory is created if absent and the output file is
/// overwritten. An input with no data rows produces a header-only output
/// and a zero count, not an error.
pub fn clean_file(input: &Path, output: &Path) -> Result<IngestReport> {
    let delimiter = sniff_delimiter(input)?;

    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_path(input)?;
    let headers = reader.headers()?.clone();

    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(File::create(output)?);
    writer.write_record(CLEAN_HEADER)?;

    let mut report = IngestReport::default();
    for row in reader.records() {
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                report.rejected += 1;
                warn!(error = %e, "row ignored: unreadable");
                continue;
            }
        };

        match parse_row(&headers, &row) {
            Ok(record) => {
                writer.serialize(&record)?;
                report.accepted += 1;
            }
            Err(e) => {
                report.rejected += 1;
                warn!(field = e.field, value = %e.value, "row ignored: {}", e);
            }
        }
    }

    writer.flush()?;
    if report.accepted == 0 && report.rejected == 0 {
        warn!(input = %input.display(), "input has no data rows");
    }
    Ok(report)
}

/// Pick the delimiter by counting candidates in the header line.
/// Comma wins ties; an unreadable or empty first line falls back to comma.
fn sniff_delimiter(path: &Path) -> Result<u8> {
    let mut first_line = String::new();
    BufReader::new(File::open(path)?).read_line(&mut first_line)?;

    let mut best = b',';
    let mut best_count = 0usize;
    for candidate in [b',', b';', b'\t'] {
        let count = first_line
            .as_bytes()
            .iter()
            .filter(|&&b| b == candidate)
            .count();
        if count > best_count {
            best = candidate;
            best_count = count;
        }
    }
    Ok(best)
}

/// Extract a field by header name; missing columns read as empty.
fn field<'a>(headers: &StringRecord, row: &'a StringRecord, name: &str) -> &'a str {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .and_then(|idx| row.get(idx))
        .unwrap_or("")
}

/// Parse a numeric field: invariant format first, decimal-comma retry
/// second ("1234,5" and "1.234,5" both read as 1234.5). Empty is zero.
fn parse_numeric(raw: &str, name: &'static str) -> std::result::Result<f64, RowError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    if let Ok(v) = trimmed.parse::<f64>() {
        return Ok(v);
    }
    if trimmed.contains(',') {
        let localized = trimmed.replace('.', "").replace(',', ".");
        if let Ok(v) = localized.parse::<f64>() {
            return Ok(v);
        }
    }
    Err(RowError {
        field: name,
        value: trimmed.to_string(),
        reason: "is not numeric",
    })
}

/// Build and validate one record from a raw row.
fn parse_row(
    headers: &StringRecord,
    row: &StringRecord,
) -> std::result::Result<CustomerRecord, RowError> {
    let record = CustomerRecord {
        customer_id: field(headers, row, "CustomerID").trim().to_string(),
        gender: field(headers, row, "Gender").trim().to_string(),
        tenure: parse_numeric(field(headers, row, "Tenure"), "Tenure")?,
        monthly_charges: parse_numeric(field(headers, row, "MonthlyCharges"), "MonthlyCharges")?,
        total_charges: parse_numeric(field(headers, row, "TotalCharges"), "TotalCharges")?,
        contract: field(headers, row, "Contract").trim().to_string(),
        internet_service: field(headers, row, "InternetService").trim().to_string(),
        churn: label::normalize_yes_no(field(headers, row, "Churn")),
    };

    if record.customer_id.is_empty() {
        return Err(RowError {
            field: "CustomerID",
            value: String::new(),
            reason: "is blank",
        });
    }
    if !(0.0..=120.0).contains(&record.tenure) {
        return Err(RowError {
            field: "Tenure",
            value: record.tenure.to_string(),
            reason: "is out of range [0, 120]",
        });
    }
    if record.monthly_charges <= 0.0 {
        return Err(RowError {
            field: "MonthlyCharges",
            value: record.monthly_charges.to_string(),
            reason: "must be positive",
        });
    }

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn clean_to_string(raw: &str) -> (IngestReport, String) {
        let input = write_temp(raw);
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("clean").join("out.csv");
        let report = clean_file(input.path(), &output).unwrap();
        let written = fs::read_to_string(&output).unwrap();
        (report, written)
    }

    const HEADER: &str =
        "CustomerID,Gender,Tenure,MonthlyCharges,TotalCharges,Contract,InternetService,Churn\n";

    #[test]
    fn test_accepts_valid_rows() {
        let raw = format!(
            "{HEADER}C1,Female,3,120,360,Month-to-month,Fiber optic,Yes\n\
             C2,Male,24,50.5,1212,Two year,DSL,No\n"
        );
        let (report, out) = clean_to_string(&raw);
        assert_eq!(report, IngestReport { accepted: 2, rejected: 0 });
        assert_eq!(out.lines().count(), 3);
        assert!(out.starts_with(&HEADER.replace('\n', "")));
    }

    #[test]
    fn test_rejects_blank_customer_id() {
        let raw = format!("{HEADER} ,Female,3,120,360,M2M,DSL,Yes\n");
        let (report, out) = clean_to_string(&raw);
        assert_eq!(report, IngestReport { accepted: 0, rejected: 1 });
        assert_eq!(out.lines().count(), 1); // header only
    }

    #[test]
    fn test_rejects_tenure_out_of_range() {
        let raw = format!(
            "{HEADER}C1,Female,121,120,360,M2M,DSL,Yes\nC2,Male,-1,120,360,M2M,DSL,No\n"
        );
        let (report, _) = clean_to_string(&raw);
        assert_eq!(report, IngestReport { accepted: 0, rejected: 2 });
    }

    #[test]
    fn test_rejects_nonpositive_monthly_charges() {
        let raw = format!("{HEADER}C1,Female,3,0,360,M2M,DSL,Yes\n");
        let (report, _) = clean_to_string(&raw);
        assert_eq!(report, IngestReport { accepted: 0, rejected: 1 });
    }

    #[test]
    fn test_malformed_numeric_is_counted_not_fatal() {
        let raw = format!(
            "{HEADER}C1,Female,3,120,360,M2M,DSL,Yes\n\
             C2,Male,3,abc,360,M2M,DSL,No\n\
             C3,Male,5,80,400,M2M,DSL,No\n\
             C4,Male,6,81,500,M2M,DSL,No\n\
             C5,Male,7,82,600,M2M,DSL,Yes\n"
        );
        let (report, out) = clean_to_string(&raw);
        assert_eq!(report, IngestReport { accepted: 4, rejected: 1 });
        assert_eq!(out.lines().count(), 5); // header + 4 data rows
    }

    #[test]
    fn test_decimal_comma_retry() {
        let raw = format!("{HEADER}C1,Female,3,\"1234,5\",\"1.234,5\",M2M,DSL,Yes\n");
        let (report, out) = clean_to_string(&raw);
        assert_eq!(report.accepted, 1);
        let data = out.lines().nth(1).unwrap();
        assert!(data.contains("1234.5"));
    }

    #[test]
    fn test_empty_numeric_parses_to_zero() {
        // Empty TotalCharges is fine; empty MonthlyCharges becomes 0 and
        // fails the positivity check instead.
        let raw = format!("{HEADER}C1,Female,3,120,,M2M,DSL,Yes\nC2,Male,3,,10,M2M,DSL,No\n");
        let (report, out) = clean_to_string(&raw);
        assert_eq!(report, IngestReport { accepted: 1, rejected: 1 });
        assert!(out.lines().nth(1).unwrap().starts_with("C1"));
    }

    #[test]
    fn test_label_normalized_on_output() {
        let raw = format!(
            "{HEADER}C1,Female,3,120,360,M2M,DSL,YES\n\
             C2,Male,3,120,360,M2M,DSL,1\n\
             C3,Male,3,120,360,M2M,DSL,\n\
             C4,Male,3,120,360,M2M,DSL,Maybe\n"
        );
        let (_, out) = clean_to_string(&raw);
        let labels: Vec<&str> = out
            .lines()
            .skip(1)
            .map(|l| l.rsplit(',').next().unwrap())
            .collect();
        assert_eq!(labels, vec!["Yes", "Yes", "No", "Maybe"]);
    }

    #[test]
    fn test_columns_matched_by_name_not_position() {
        let raw = "Churn,CustomerID,MonthlyCharges,Tenure,TotalCharges,Gender,InternetService,Contract\n\
                   Yes,C1,120,3,360,Female,DSL,Two year\n";
        let (report, out) = clean_to_string(raw);
        assert_eq!(report.accepted, 1);
        let data = out.lines().nth(1).unwrap();
        assert_eq!(data, "C1,Female,3.0,120.0,360.0,Two year,DSL,Yes");
    }

    #[test]
    fn test_semicolon_delimiter_sniffed() {
        let raw = "CustomerID;Gender;Tenure;MonthlyCharges;TotalCharges;Contract;InternetService;Churn\n\
                   C1;Female;3;120;360;M2M;DSL;Yes\n";
        let (report, _) = clean_to_string(raw);
        assert_eq!(report, IngestReport { accepted: 1, rejected: 0 });
    }

    #[test]
    fn test_empty_input_is_clean_exit() {
        let (report, out) = clean_to_string(HEADER);
        assert_eq!(report, IngestReport::default());
        assert_eq!(out.lines().count(), 1);
    }

    #[test]
    fn test_fields_trimmed() {
        let raw = format!("{HEADER}  C1 , Female ,3,120,360, Month-to-month , DSL , yes \n");
        let (_, out) = clean_to_string(&raw);
        assert_eq!(
            out.lines().nth(1).unwrap(),
            "C1,Female,3.0,120.0,360.0,Month-to-month,DSL,Yes"
        );
    }
}
