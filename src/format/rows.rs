// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Thalassa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Thalassa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::fmt;

use memchr::memchr_iter;
use serde_json::Value;

/// One raw input row: column name → cell value. `Value::Null` marks a
/// missing cell so the dataset stage can drop the row.
pub type Row = BTreeMap<String, Value>;

/// Parses rows from either supported representation, sniffing by the first
/// non-whitespace byte: `[` means a JSON array, anything else a delimited
/// text table.
pub fn rows_from_str(text: &str) -> Result<Vec<Row>, RowParseError> {
    if text.trim_start().starts_with('[') {
        rows_from_json_str(text)
    } else {
        rows_from_delimited(text)
    }
}

/// Parses a JSON array of flat objects.
pub fn rows_from_json_str(text: &str) -> Result<Vec<Row>, RowParseError> {
    let value: Value =
        serde_json::from_str(text).map_err(|source| RowParseError::Json { source })?;
    let Value::Array(items) = value else {
        return Err(RowParseError::NotAnArray);
    };

    let mut rows = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let Value::Object(fields) = item else {
            return Err(RowParseError::RowNotAnObject { index });
        };
        rows.push(fields.into_iter().collect());
    }
    Ok(rows)
}

/// Parses a header-plus-lines text table.
///
/// The delimiter is auto-detected from the header among `,`, `;` and tab.
/// Cells are typed opportunistically (integer, then float, then string);
/// empty cells and cells beyond the header width become `Value::Null` and
/// surplus cells are ignored. Quoting support is deliberately minimal: a
/// cell fully wrapped in double quotes is unwrapped, nothing more.
pub fn rows_from_delimited(text: &str) -> Result<Vec<Row>, RowParseError> {
    let mut lines = text.lines().filter(|line| !line.trim().is_empty());
    let Some(header) = lines.next() else {
        return Ok(Vec::new());
    };

    let delimiter = detect_delimiter(header);
    let columns: Vec<String> = split_fields(header, delimiter)
        .into_iter()
        .map(|field| unquote(field).to_owned())
        .collect();

    let mut rows = Vec::new();
    for line in lines {
        let fields = split_fields(line, delimiter);
        let mut row = Row::new();
        for (index, column) in columns.iter().enumerate() {
            let cell = fields.get(index).copied().unwrap_or("");
            row.insert(column.clone(), parse_cell(cell));
        }
        rows.push(row);
    }
    Ok(rows)
}

fn detect_delimiter(header: &str) -> u8 {
    [b',', b';', b'\t']
        .into_iter()
        .max_by_key(|&delimiter| memchr_iter(delimiter, header.as_bytes()).count())
        .unwrap_or(b',')
}

fn split_fields(line: &str, delimiter: u8) -> Vec<&str> {
    let mut fields = Vec::new();
    let mut start = 0;
    for at in memchr_iter(delimiter, line.as_bytes()) {
        fields.push(&line[start..at]);
        start = at + 1;
    }
    fields.push(&line[start..]);
    fields
}

fn unquote(field: &str) -> &str {
    let trimmed = field.trim();
    trimmed
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(trimmed)
}

fn parse_cell(cell: &str) -> Value {
    let text = unquote(cell);
    if text.is_empty() {
        return Value::Null;
    }
    if let Ok(int) = text.parse::<i64>() {
        return Value::from(int);
    }
    if let Ok(float) = text.parse::<f64>() {
        if let Some(number) = serde_json::Number::from_f64(float) {
            return Value::Number(number);
        }
    }
    Value::from(text)
}

#[derive(Debug)]
pub enum RowParseError {
    Json { source: serde_json::Error },
    NotAnArray,
    RowNotAnObject { index: usize },
}

impl fmt::Display for RowParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json { source } => write!(f, "cannot parse rows as JSON: {source}"),
            Self::NotAnArray => f.write_str("expected a JSON array of row objects"),
            Self::RowNotAnObject { index } => {
                write!(f, "row {index} is not a flat JSON object")
            }
        }
    }
}

impl std::error::Error for RowParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json { source } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::{rows_from_delimited, rows_from_json_str, rows_from_str, RowParseError};

    #[test]
    fn json_rows_parse_into_column_maps() {
        let rows = rows_from_json_str(
            r#"[{"source": "NL", "target": "BE", "weight": 12.5, "year": 2020}]"#,
        )
        .expect("rows");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["source"], Value::from("NL"));
        assert_eq!(rows[0]["weight"], Value::from(12.5));
    }

    #[test]
    fn json_top_level_must_be_an_array() {
        let error = rows_from_json_str(r#"{"source": "NL"}"#).unwrap_err();
        assert!(matches!(error, RowParseError::NotAnArray));
    }

    #[test]
    fn json_rows_must_be_objects() {
        let error = rows_from_json_str(r#"[{"source": "NL"}, 42]"#).unwrap_err();
        assert!(matches!(error, RowParseError::RowNotAnObject { index: 1 }));
    }

    #[test]
    fn delimited_detects_semicolon_and_types_cells() {
        let rows = rows_from_delimited("source;target;weight\nNL;BE;120\nBE;NL;4.5\n")
            .expect("rows");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["weight"], Value::from(120));
        assert_eq!(rows[1]["weight"], Value::from(4.5));
        assert_eq!(rows[1]["source"], Value::from("BE"));
    }

    #[test]
    fn delimited_missing_and_empty_cells_become_null() {
        let rows = rows_from_delimited("source,target,weight\nNL,,120\nBE,NL\n").expect("rows");
        assert_eq!(rows[0]["target"], Value::Null);
        assert_eq!(rows[1]["weight"], Value::Null);
    }

    #[test]
    fn delimited_unwraps_fully_quoted_cells() {
        let rows = rows_from_delimited("source,product\nNL,\"cut flowers\"\n").expect("rows");
        assert_eq!(rows[0]["product"], Value::from("cut flowers"));
    }

    #[test]
    fn delimited_empty_input_yields_no_rows() {
        assert!(rows_from_delimited("").expect("rows").is_empty());
        assert!(rows_from_delimited("\n  \n").expect("rows").is_empty());
    }

    #[test]
    fn sniffing_picks_the_right_parser() {
        let json = rows_from_str(r#"  [{"source": "NL"}]"#).expect("rows");
        assert_eq!(json.len(), 1);

        let delimited = rows_from_str("source,target\nNL,BE\n").expect("rows");
        assert_eq!(delimited.len(), 1);
    }
}
