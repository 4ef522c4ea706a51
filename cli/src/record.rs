// Trial Registry
// Copyright (C) 2026 Trial Registry developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License version 3 as
// published by the Free Software Foundation.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Single-row tabular trial records and their CSV form.
//!
//! A trial payload is a flat table with a header row and exactly one value
//! row. Which columns it carries depends on the disease under study, but
//! every record produced by the assembly workflow shares [COMMON_COLUMNS].
//! Bulk export merges many records into one table over the union of their
//! columns, with ledger metadata appended per row.
//!
//! Fields containing commas, quotes or line breaks are quoted and embedded
//! quotes doubled, following the usual CSV conventions.

use std::str::Utf8Error;

use thiserror::Error as ThisError;

/// Columns every assembled trial record carries.
pub const COMMON_COLUMNS: [&str; 13] = [
    "Trial Name",
    "Disease",
    "Patient ID",
    "Patient Name",
    "Date of Birth",
    "Age",
    "Gender",
    "Medical Condition",
    "Treatment Group",
    "Medication",
    "Dosage",
    "Start Date",
    "Expected End Date",
];

/// Ledger columns appended to each row of a bulk export.
///
/// The `(ledger)` suffix keeps the chain timestamps from clashing with the
/// payload's own `Start Date` column.
pub const LEDGER_COLUMNS: [&str; 5] = [
    "Trial ID",
    "Status",
    "Researcher",
    "Start Date (ledger)",
    "Last Updated (ledger)",
];

/// A single-row trial record: ordered columns and their values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    columns: Vec<String>,
    values: Vec<String>,
}

/// Error parsing a [Record] from CSV bytes.
#[derive(Debug, ThisError)]
pub enum ParseError {
    #[error("record is not valid UTF-8")]
    InvalidUtf8(#[from] Utf8Error),

    #[error("record is empty, expected a header row and a value row")]
    MissingHeader,

    #[error("record has a header row but no value row")]
    MissingValues,

    #[error("expected a single value row, found {0}")]
    ExtraRows(usize),

    #[error("value row has {values} fields but the header has {columns}")]
    ColumnMismatch { columns: usize, values: usize },

    #[error("unclosed quote in field starting at byte {0}")]
    UnclosedQuote(usize),
}

impl Record {
    /// Parse a record from CSV bytes with a header row and one value row.
    ///
    /// Blank lines are ignored. Both `\n` and `\r\n` line endings are
    /// accepted.
    pub fn parse(bytes: &[u8]) -> Result<Record, ParseError> {
        let text = std::str::from_utf8(bytes)?;
        let mut rows = parse_rows(text)?;
        rows.retain(|row| !(row.len() == 1 && row[0].is_empty()));

        let mut rows = rows.into_iter();
        let columns = rows.next().ok_or(ParseError::MissingHeader)?;
        let values = rows.next().ok_or(ParseError::MissingValues)?;
        let extra = rows.count();
        if extra > 0 {
            return Err(ParseError::ExtraRows(extra + 1));
        }
        if values.len() != columns.len() {
            return Err(ParseError::ColumnMismatch {
                columns: columns.len(),
                values: values.len(),
            });
        }
        Ok(Record { columns, values })
    }

    /// The value under `column`, if the record has that column.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|index| self.values[index].as_str())
    }

    /// Set the value under `column`, appending the column if the record
    /// does not have it yet.
    pub fn set(&mut self, column: &str, value: String) {
        match self.columns.iter().position(|c| c == column) {
            Some(index) => self.values[index] = value,
            None => {
                self.columns.push(column.to_string());
                self.values.push(value);
            }
        }
    }

    /// Column and value pairs in record order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().map(String::as_str))
    }

    /// The [COMMON_COLUMNS] this record lacks. Non-empty results warrant a
    /// warning; records from other assembly tools are still accepted.
    pub fn missing_common_columns(&self) -> Vec<&'static str> {
        COMMON_COLUMNS
            .iter()
            .copied()
            .filter(|column| self.get(column).is_none())
            .collect()
    }

    /// Serialize the record back to CSV.
    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        write_row(&mut out, &self.columns);
        write_row(&mut out, &self.values);
        out
    }
}

/// Merge records into one CSV table.
///
/// The header is the union of all columns in first-seen order; rows leave
/// absent columns blank.
pub fn merge_to_csv(records: &[Record]) -> String {
    let mut columns: Vec<String> = Vec::new();
    for record in records {
        for column in &record.columns {
            if !columns.iter().any(|c| c == column) {
                columns.push(column.clone());
            }
        }
    }

    let mut out = String::new();
    write_row(&mut out, &columns);
    for record in records {
        let row: Vec<String> = columns
            .iter()
            .map(|column| record.get(column).unwrap_or("").to_string())
            .collect();
        write_row(&mut out, &row);
    }
    out
}

fn parse_rows(text: &str) -> Result<Vec<Vec<String>>, ParseError> {
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    // Whether the current field opened with a quote. Needed so that a
    // quoted empty field still counts as a field.
    let mut quoted = false;
    let mut in_quotes = false;
    let mut quote_start = 0;

    let mut chars = text.char_indices().peekable();
    while let Some((position, c)) = chars.next() {
        if in_quotes {
            if c == '"' {
                if let Some((_, '"')) = chars.peek() {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
            continue;
        }

        match c {
            '"' if field.is_empty() && !quoted => {
                in_quotes = true;
                quoted = true;
                quote_start = position;
            }
            ',' => {
                row.push(std::mem::take(&mut field));
                quoted = false;
            }
            '\n' => {
                row.push(std::mem::take(&mut field));
                quoted = false;
                rows.push(std::mem::take(&mut row));
            }
            '\r' => {
                // Part of a CRLF line ending, or a literal carriage return.
                if !matches!(chars.peek(), Some((_, '\n'))) {
                    field.push('\r');
                }
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(ParseError::UnclosedQuote(quote_start));
    }
    if !field.is_empty() || !row.is_empty() || quoted {
        row.push(field);
        rows.push(row);
    }
    Ok(rows)
}

fn write_row(out: &mut String, fields: &[String]) {
    for (index, field) in fields.iter().enumerate() {
        if index > 0 {
            out.push(',');
        }
        write_field(out, field);
    }
    out.push('\n');
}

fn write_field(out: &mut String, field: &str) {
    if field.contains(|c| matches!(c, '"' | ',' | '\n' | '\r')) {
        out.push('"');
        for c in field.chars() {
            if c == '"' {
                out.push('"');
            }
            out.push(c);
        }
        out.push('"');
    } else {
        out.push_str(field);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn diabetes_record() -> Vec<u8> {
        let columns = COMMON_COLUMNS.join(",") + ",Blood Sugar Level";
        let values = "Trial 1 - Jane - Diabetes,Diabetes,P-1,Jane,1990-04-02,36,Female,\
                      Type 2 diabetes,Experimental,Metformin,500,2026-08-01,2027-02-01,140";
        format!("{}\n{}\n", columns, values).into_bytes()
    }

    #[test]
    fn parse_reads_columns_and_values() {
        let record = Record::parse(&diabetes_record()).unwrap();
        assert_eq!(record.get("Disease"), Some("Diabetes"));
        assert_eq!(record.get("Blood Sugar Level"), Some("140"));
        assert_eq!(record.get("Cholesterol Level"), None);
        assert!(record.missing_common_columns().is_empty());
    }

    #[test]
    fn missing_common_columns_are_reported() {
        let record = Record::parse(b"Disease,Patient ID\nDiabetes,P-1\n").unwrap();
        let missing = record.missing_common_columns();
        assert!(missing.contains(&"Trial Name"));
        assert!(missing.contains(&"Medication"));
        assert!(!missing.contains(&"Disease"));
        assert_eq!(missing.len(), COMMON_COLUMNS.len() - 2);
    }

    #[test]
    fn quoted_fields_survive_a_round_trip() {
        let mut record = Record::parse(b"Patient Name,Medical Condition\nJane,stable\n").unwrap();
        record.set("Patient Name", "Doe, Jane \"JD\"".to_string());
        record.set("Medical Condition", "line one\nline two".to_string());
        let reparsed = Record::parse(record.to_csv().as_bytes()).unwrap();
        assert_eq!(reparsed, record);
        assert_eq!(reparsed.get("Patient Name"), Some("Doe, Jane \"JD\""));
    }

    #[test]
    fn crlf_and_trailing_blank_lines_are_accepted() {
        let record = Record::parse(b"Disease,Age\r\nDiabetes,36\r\n\r\n").unwrap();
        assert_eq!(record.get("Age"), Some("36"));
    }

    #[test]
    fn quoted_empty_field_is_a_field() {
        let record = Record::parse(b"Disease,Age\n\"\",36\n").unwrap();
        assert_eq!(record.get("Disease"), Some(""));
    }

    #[test]
    fn parse_rejects_malformed_records() {
        assert!(matches!(
            Record::parse(b""),
            Err(ParseError::MissingHeader)
        ));
        assert!(matches!(
            Record::parse(b"Disease,Age\n"),
            Err(ParseError::MissingValues)
        ));
        assert!(matches!(
            Record::parse(b"Disease,Age\nDiabetes,36\nFlu,20\n"),
            Err(ParseError::ExtraRows(2))
        ));
        assert!(matches!(
            Record::parse(b"Disease,Age\nDiabetes\n"),
            Err(ParseError::ColumnMismatch {
                columns: 2,
                values: 1
            })
        ));
        assert!(matches!(
            Record::parse(b"Disease,Age\n\"Diabetes,36\n"),
            Err(ParseError::UnclosedQuote(_))
        ));
    }

    #[test]
    fn set_overwrites_existing_columns() {
        let mut record = Record::parse(b"Status,Age\ndraft,36\n").unwrap();
        record.set("Status", "Active".to_string());
        assert_eq!(record.get("Status"), Some("Active"));
        assert_eq!(record.fields().count(), 2);
    }

    #[test]
    fn merge_unions_columns_and_blanks_absent_values() {
        let mut diabetes = Record::parse(b"Disease,Blood Sugar Level\nDiabetes,140\n").unwrap();
        let mut cancer = Record::parse(b"Disease,Cancer Stage\nCancer,Stage II\n").unwrap();
        for (record, id) in [(&mut diabetes, 1u64), (&mut cancer, 2u64)] {
            record.set("Trial ID", id.to_string());
        }

        let csv = merge_to_csv(&[diabetes, cancer]);
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("Disease,Blood Sugar Level,Trial ID,Cancer Stage")
        );
        assert_eq!(lines.next(), Some("Diabetes,140,1,"));
        assert_eq!(lines.next(), Some("Cancer,,2,Stage II"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn merge_of_nothing_is_an_empty_table() {
        assert_eq!(merge_to_csv(&[]), "\n");
    }
}
