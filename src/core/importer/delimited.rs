use super::aliases::{aliases_for, Column, DELIMITED_ALIASES};
use crate::domain::model::{ImportOutcome, ImportWarning, ShippingBox};
use crate::utils::error::{BoxfitError, Result};
use crate::utils::validation::parse_positive_number;
use csv::{ByteRecord, ReaderBuilder, Trim};
use std::collections::HashMap;

/// 依別名表把標頭對應到欄位索引，缺任何一欄就整份失敗
fn resolve_header(header: &[String]) -> Result<HashMap<Column, usize>> {
    let normalized: Vec<String> = header
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_lowercase())
        .collect();

    let mut columns = HashMap::new();
    for column in Column::ALL {
        let aliases = aliases_for(DELIMITED_ALIASES, column);
        let index = aliases
            .iter()
            .find_map(|alias| normalized.iter().position(|h| h == alias));

        match index {
            Some(index) => {
                columns.insert(column, index);
            }
            None => {
                return Err(BoxfitError::MissingColumn {
                    column: column.to_string(),
                    aliases: aliases.join(", "),
                })
            }
        }
    }

    Ok(columns)
}

/// 非 UTF-8 位元組以替代字元取代，單一欄位不會讓整份匯入失敗
fn decode_fields(record: &ByteRecord) -> Vec<String> {
    record
        .iter()
        .map(|field| String::from_utf8_lossy(field).trim().to_string())
        .collect()
}

pub fn parse_delimited(payload: &[u8]) -> Result<ImportOutcome> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(payload);

    let mut records = reader.byte_records();
    let header = match records.next() {
        Some(header) => decode_fields(&header?),
        None => return Err(BoxfitError::import("CSV file is empty.")),
    };
    let columns = resolve_header(&header)?;
    let required_len = columns.values().copied().max().unwrap_or(0) + 1;
    tracing::debug!("Resolved CSV columns: {:?}", columns);

    let mut outcome = ImportOutcome::default();

    for record in records {
        let record = record?;
        let row = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or_default();
        let fields = decode_fields(&record);

        // 只有空白的一行才略過；",,," 這類空欄位列仍要警告
        if fields.len() == 1 && fields[0].is_empty() {
            continue;
        }

        if fields.len() < required_len {
            outcome.warnings.push(ImportWarning {
                row,
                message: "Malformed row, too few columns.".to_string(),
            });
            continue;
        }

        let field = |column: Column| {
            fields
                .get(columns[&column])
                .map(String::as_str)
                .unwrap_or_default()
        };

        let name = field(Column::Name);
        if name.is_empty() {
            outcome.warnings.push(ImportWarning {
                row,
                message: "'Name' is missing.".to_string(),
            });
            continue;
        }

        let (length, width, height) = (
            field(Column::Length),
            field(Column::Width),
            field(Column::Height),
        );

        match (
            parse_positive_number(length),
            parse_positive_number(width),
            parse_positive_number(height),
        ) {
            (Some(l), Some(w), Some(h)) => {
                outcome.boxes.push(ShippingBox::new(name, [l, w, h]));
            }
            _ => outcome.warnings.push(ImportWarning {
                row,
                message: format!(
                    "(Name: {}) Invalid or non-positive dimension(s). L: {}, W: {}, H: {}",
                    name, length, width, height
                ),
            }),
        }
    }

    Ok(outcome)
}
