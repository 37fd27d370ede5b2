use std::fmt;

/// 目錄檔案必須提供的四個邏輯欄位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Name,
    Length,
    Width,
    Height,
}

impl Column {
    pub const ALL: [Column; 4] = [Column::Name, Column::Length, Column::Width, Column::Height];

    pub fn as_str(&self) -> &'static str {
        match self {
            Column::Name => "name",
            Column::Length => "length",
            Column::Width => "width",
            Column::Height => "height",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub type AliasTable = [(Column, &'static [&'static str])];

/// CSV 標頭別名，比對前會 trim 並轉小寫
pub const DELIMITED_ALIASES: &AliasTable = &[
    (Column::Name, &["name", "box name", "id"]),
    (Column::Length, &["length", "len", "l"]),
    (Column::Width, &["width", "wid", "w"]),
    (Column::Height, &["height", "hgt", "h"]),
];

/// 試算表欄位別名，依順序逐列精確比對
pub const TABULAR_ALIASES: &AliasTable = &[
    (Column::Name, &["Name", "name", "Box Name", "ID", "id"]),
    (Column::Length, &["Length", "length", "Dim L", "L", "len"]),
    (Column::Width, &["Width", "width", "Dim W", "W", "wid"]),
    (Column::Height, &["Height", "height", "Dim H", "H", "hgt"]),
];

pub fn aliases_for(table: &AliasTable, column: Column) -> &'static [&'static str] {
    table
        .iter()
        .find(|(candidate, _)| *candidate == column)
        .map(|(_, aliases)| *aliases)
        .unwrap_or(&[])
}
