use super::aliases::{aliases_for, Column, TABULAR_ALIASES};
use crate::domain::model::{ImportOutcome, ImportWarning, Record, ShippingBox};
use crate::utils::error::{BoxfitError, Result};
use crate::utils::validation::parse_positive_number;
use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};
use serde_json::Value;
use std::io::Cursor;

fn cell_to_value(cell: &Data) -> Option<Value> {
    match cell {
        Data::Empty => None,
        Data::Int(i) => Some(Value::from(*i)),
        Data::Float(f) => serde_json::Number::from_f64(*f).map(Value::Number),
        Data::String(s) => Some(Value::String(s.clone())),
        Data::Bool(b) => Some(Value::Bool(*b)),
        Data::DateTime(dt) => serde_json::Number::from_f64(dt.as_f64()).map(Value::Number),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(Value::String(s.clone())),
        Data::Error(e) => Some(Value::String(e.to_string())),
    }
}

/// 讀取第一張工作表：首列為標頭，其後每個非空白列轉成一筆 `Record`
pub fn read_workbook(payload: &[u8]) -> Result<Vec<Record>> {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(payload.to_vec()))?;

    let Some(sheet_name) = workbook.sheet_names().first().cloned() else {
        return Err(BoxfitError::import("XLSX file contains no sheets."));
    };
    tracing::debug!("Reading worksheet '{}'", sheet_name);

    let range = workbook.worksheet_range(&sheet_name)?;
    let mut rows = range.rows();

    let headers: Vec<Option<String>> = match rows.next() {
        Some(header_row) => header_row
            .iter()
            .map(|cell| match cell {
                Data::Empty => None,
                Data::String(s) => Some(s.clone()),
                other => Some(other.to_string()),
            })
            .collect(),
        None => return Ok(Vec::new()),
    };

    let records = rows
        .map(|row| {
            let data = headers
                .iter()
                .zip(row.iter())
                .filter_map(|(header, cell)| {
                    let header = header.as_ref()?;
                    cell_to_value(cell).map(|value| (header.clone(), value))
                })
                .collect();
            Record { data }
        })
        .filter(|record| !record.data.is_empty())
        .collect();

    Ok(records)
}

fn lookup<'a>(record: &'a Record, column: Column) -> Option<&'a Value> {
    aliases_for(TABULAR_ALIASES, column)
        .iter()
        .find_map(|alias| record.data.get(*alias))
}

fn coerce_name(value: &Value) -> Option<String> {
    let name = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => match n.as_f64() {
            Some(f) => f.to_string(),
            None => n.to_string(),
        },
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };
    (!name.is_empty()).then_some(name)
}

fn coerce_dimension(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite() && *v > 0.0),
        Value::String(s) => parse_positive_number(s),
        _ => None,
    }
}

fn raw_display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// 把試算表列轉成紙箱；有問題的列只記警告，不會中斷匯入
pub fn records_to_boxes(records: &[Record]) -> ImportOutcome {
    let mut outcome = ImportOutcome::default();

    for (index, record) in records.iter().enumerate() {
        let row = index + 1;

        let Some(name) = lookup(record, Column::Name).and_then(coerce_name) else {
            outcome.warnings.push(ImportWarning {
                row,
                message: "'Name' is missing or invalid.".to_string(),
            });
            continue;
        };

        let (Some(length), Some(width), Some(height)) = (
            lookup(record, Column::Length),
            lookup(record, Column::Width),
            lookup(record, Column::Height),
        ) else {
            outcome.warnings.push(ImportWarning {
                row,
                message: format!(
                    "(Name: {}) One or more dimension columns (Length, Width, Height) are missing.",
                    name
                ),
            });
            continue;
        };

        match (
            coerce_dimension(length),
            coerce_dimension(width),
            coerce_dimension(height),
        ) {
            (Some(l), Some(w), Some(h)) => outcome.boxes.push(ShippingBox::new(name, [l, w, h])),
            _ => outcome.warnings.push(ImportWarning {
                row,
                message: format!(
                    "(Name: {}) Invalid or non-positive dimension(s). L: {}, W: {}, H: {}",
                    name,
                    raw_display(length),
                    raw_display(width),
                    raw_display(height)
                ),
            }),
        }
    }

    outcome
}

pub fn parse_tabular(payload: &[u8]) -> Result<ImportOutcome> {
    let records = read_workbook(payload)?;
    Ok(records_to_boxes(&records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        serde_json::from_value(json!({ "data": value })).unwrap()
    }

    #[test]
    fn test_aliases_tried_in_priority_order() {
        let records = vec![record(json!({
            "Box Name": "ignored",
            "Name": "  LAMP ",
            "Dim L": 13,
            "W": "13",
            "hgt": 40.0
        }))];
        let outcome = records_to_boxes(&records);
        assert_eq!(
            outcome.boxes,
            vec![ShippingBox::new("LAMP", [13.0, 13.0, 40.0])]
        );
    }

    #[test]
    fn test_numeric_names_are_stringified() {
        let records = vec![record(json!({"ID": 12126, "L": 12, "W": 12, "H": 6}))];
        let outcome = records_to_boxes(&records);
        assert_eq!(outcome.boxes[0].name, "12126");
    }

    #[test]
    fn test_one_bad_row_among_valid_rows() {
        let records = vec![
            record(json!({"Name": "6C", "Length": 6, "Width": 6, "Height": 6})),
            record(json!({"Name": "bad", "Length": 0, "Width": "x", "Height": 6})),
            record(json!({"Name": "8C", "Length": 8, "Width": 8, "Height": 8})),
        ];
        let outcome = records_to_boxes(&records);
        assert_eq!(outcome.boxes.len(), 2);
        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(outcome.warnings[0].row, 2);
        assert_eq!(
            outcome.warnings[0].message,
            "(Name: bad) Invalid or non-positive dimension(s). L: 0, W: x, H: 6"
        );
    }

    #[test]
    fn test_missing_fields_skip_row() {
        let records = vec![
            record(json!({"Length": 6, "Width": 6, "Height": 6})),
            record(json!({"Name": "   ", "Length": 6, "Width": 6, "Height": 6})),
            record(json!({"Name": "flat", "Length": 6, "Width": 6})),
        ];
        let outcome = records_to_boxes(&records);
        assert!(outcome.boxes.is_empty());
        assert_eq!(outcome.warnings.len(), 3);
        assert!(outcome.warnings[2].message.contains("are missing"));
    }

    #[test]
    fn test_garbage_payload_is_structural_error() {
        assert!(parse_tabular(b"not a workbook").is_err());
    }
}
