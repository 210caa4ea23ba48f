//! Tabular parsing for bulk score imports.
//!
//! Column handling is deliberately lossy: headers are matched by
//! case-insensitive substring (`email` / `score`) so arbitrary vendor
//! spreadsheets work without a column mapping step, and rows that do not
//! yield both an email and a finite score are dropped without being
//! reported. Only a file with zero usable rows is an error.

use std::io::Read;
use std::path::Path;

use calamine::{open_workbook_auto, Reader};

use crate::errors::AppError;

/// One usable (email, score) pair extracted from the uploaded file.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRow {
    pub email: String,
    pub score: f64,
}

/// File family, chosen by extension alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    /// Delimited text with the given byte delimiter.
    Delimited(u8),
    /// Excel workbook, first sheet.
    Workbook,
}

pub fn detect_format(filename: &str) -> Result<TableFormat, AppError> {
    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "csv" | "txt" => Ok(TableFormat::Delimited(b',')),
        "tsv" => Ok(TableFormat::Delimited(b'\t')),
        "xlsx" | "xls" | "xlsm" | "xlsb" => Ok(TableFormat::Workbook),
        _ => Err(AppError::UnsupportedFormat(if ext.is_empty() {
            filename.to_string()
        } else {
            ext
        })),
    }
}

/// Parses the spooled upload into score rows.
pub fn parse_score_rows(path: &Path, format: TableFormat) -> Result<Vec<ScoreRow>, AppError> {
    match format {
        TableFormat::Delimited(delimiter) => {
            let file = std::fs::File::open(path)
                .map_err(|e| AppError::Validation(format!("Failed to read uploaded file: {e}")))?;
            Ok(parse_delimited(file, delimiter))
        }
        TableFormat::Workbook => parse_workbook(path),
    }
}

/// Reads delimited text, returning every valid row.
/// Malformed records are skipped, not surfaced.
pub fn parse_delimited<R: Read>(reader: R, delimiter: u8) -> Vec<ScoreRow> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = match rdr.headers() {
        Ok(h) => h.iter().map(str::to_string).collect(),
        Err(_) => return Vec::new(),
    };
    let columns = find_columns(&headers);

    let mut rows = Vec::new();
    for record in rdr.records() {
        let Ok(record) = record else { continue };
        let cells: Vec<String> = record.iter().map(str::to_string).collect();
        if let Some(row) = row_from_cells(&cells, columns) {
            rows.push(row);
        }
    }
    rows
}

fn parse_workbook(path: &Path) -> Result<Vec<ScoreRow>, AppError> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| AppError::Validation(format!("Failed to open workbook: {e}")))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(AppError::NoValidData)?
        .map_err(|e| AppError::Validation(format!("Failed to read worksheet: {e}")))?;

    let mut row_iter = range.rows();
    let headers: Vec<String> = match row_iter.next() {
        Some(header_row) => header_row.iter().map(|c| c.to_string()).collect(),
        None => return Ok(Vec::new()),
    };
    let columns = find_columns(&headers);

    let mut rows = Vec::new();
    for cells in row_iter {
        let cells: Vec<String> = cells.iter().map(|c| c.to_string()).collect();
        if let Some(row) = row_from_cells(&cells, columns) {
            rows.push(row);
        }
    }
    Ok(rows)
}

/// Locates the email and score columns by case-insensitive substring match
/// on trimmed header names. First matching header per field wins; a header
/// matching neither substring contributes to no field.
fn find_columns(headers: &[String]) -> (Option<usize>, Option<usize>) {
    let mut email_idx = None;
    let mut score_idx = None;
    for (i, header) in headers.iter().enumerate() {
        let normalized = header.trim().to_lowercase();
        if email_idx.is_none() && normalized.contains("email") {
            email_idx = Some(i);
        }
        if score_idx.is_none() && normalized.contains("score") {
            score_idx = Some(i);
        }
    }
    (email_idx, score_idx)
}

/// A row is valid only if both the email cell is non-blank and the score
/// cell parses to a finite number.
fn row_from_cells(cells: &[String], columns: (Option<usize>, Option<usize>)) -> Option<ScoreRow> {
    let (email_idx, score_idx) = columns;
    let email = cells.get(email_idx?)?.trim();
    if email.is_empty() {
        return None;
    }
    let score = cells.get(score_idx?)?.trim().parse::<f64>().ok()?;
    if !score.is_finite() {
        return None;
    }
    Some(ScoreRow {
        email: email.to_string(),
        score,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse_csv(data: &str) -> Vec<ScoreRow> {
        parse_delimited(Cursor::new(data.as_bytes()), b',')
    }

    #[test]
    fn test_detect_format_by_extension() {
        assert_eq!(detect_format("scores.csv").unwrap(), TableFormat::Delimited(b','));
        assert_eq!(detect_format("SCORES.TSV").unwrap(), TableFormat::Delimited(b'\t'));
        assert_eq!(detect_format("results.xlsx").unwrap(), TableFormat::Workbook);
        assert!(matches!(
            detect_format("resume.pdf"),
            Err(AppError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            detect_format("no_extension"),
            Err(AppError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_header_match_is_case_and_whitespace_insensitive() {
        for header in ["Email ,Score", "EMAIL,score", "candidate_email, Test Score "] {
            let data = format!("{header}\nalice@x.com,85\n");
            let rows = parse_csv(&data);
            assert_eq!(
                rows,
                vec![ScoreRow {
                    email: "alice@x.com".to_string(),
                    score: 85.0
                }],
                "header variant {header:?} should resolve"
            );
        }
    }

    #[test]
    fn test_header_matching_neither_substring_contributes_nothing() {
        let rows = parse_csv("Name,Points\nalice,85\n");
        assert!(rows.is_empty());
    }

    #[test]
    fn test_scenario_a_rows_parse() {
        let rows = parse_csv("Email,Score\nalice@x.com,85\nbob@x.com,55\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].email, "alice@x.com");
        assert_eq!(rows[0].score, 85.0);
        assert_eq!(rows[1].email, "bob@x.com");
        assert_eq!(rows[1].score, 55.0);
    }

    #[test]
    fn test_invalid_rows_silently_dropped() {
        let data = "Email,Score\n\
                    alice@x.com,85\n\
                    ,90\n\
                    bob@x.com,not-a-number\n\
                    carol@x.com,NaN\n\
                    dave@x.com,\n";
        let rows = parse_csv(data);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].email, "alice@x.com");
    }

    #[test]
    fn test_email_value_is_trimmed() {
        let rows = parse_csv("Email,Score\n  alice@x.com  ,70\n");
        assert_eq!(rows[0].email, "alice@x.com");
    }

    #[test]
    fn test_tsv_delimiter() {
        let rows = parse_delimited(Cursor::new(b"email\tscore\nalice@x.com\t62.5\n".as_slice()), b'\t');
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].score, 62.5);
    }

    #[test]
    fn test_first_matching_header_wins() {
        let rows = parse_csv("email,backup_email,score\nalice@x.com,alt@x.com,80\n");
        assert_eq!(rows[0].email, "alice@x.com");
    }

    #[test]
    fn test_short_records_skipped() {
        let rows = parse_csv("name,email,score\nrow-with-too-few-cells\nalice,alice@x.com,75\n");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].email, "alice@x.com");
    }
}
