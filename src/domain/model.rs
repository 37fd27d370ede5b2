use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// 一個可用的出貨紙箱：名稱加上三邊長度（預設目錄單位為英吋）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingBox {
    pub name: String,
    pub dimensions: [f64; 3],
}

impl ShippingBox {
    pub fn new(name: impl Into<String>, dimensions: [f64; 3]) -> Self {
        Self {
            name: name.into(),
            dimensions,
        }
    }

    /// `24x18x6` 形式的尺寸字串，保持原始順序
    pub fn dimensions_label(&self) -> String {
        self.dimensions
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join("x")
    }
}

impl fmt::Display for ShippingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.dimensions_label())
    }
}

pub type Catalog = Vec<ShippingBox>;

/// 試算表的一列：欄位名稱對應原始值，只在匯入階段使用
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Record {
    pub data: HashMap<String, serde_json::Value>,
}

/// 匯入時被略過的單列
#[derive(Debug, Clone, PartialEq)]
pub struct ImportWarning {
    pub row: usize,
    pub message: String,
}

impl fmt::Display for ImportWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}: {}", self.row, self.message)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ImportOutcome {
    pub boxes: Catalog,
    pub warnings: Vec<ImportWarning>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Recommendation {
    Found { shipping_box: ShippingBox, cushion: f64 },
    NoSuitableBox,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::Found {
                shipping_box,
                cushion,
            } => write!(
                f,
                "The closest box available is: {}\n(with {} inches of cushion)",
                shipping_box, cushion
            ),
            Recommendation::NoSuitableBox => write!(f, "No suitable box available."),
        }
    }
}
