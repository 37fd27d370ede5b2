pub mod aliases;
pub mod delimited;
pub mod tabular;

use crate::core::validator::is_valid_catalog;
use crate::domain::model::{Catalog, ImportOutcome, ShippingBox};
use crate::utils::error::{BoxfitError, Result};
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Json,
    Csv,
    Xlsx,
}

impl CatalogFormat {
    pub const ALL: [CatalogFormat; 3] = [CatalogFormat::Json, CatalogFormat::Csv, CatalogFormat::Xlsx];

    pub fn from_extension(extension: &str) -> Result<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "xlsx" => Ok(Self::Xlsx),
            _ => Err(BoxfitError::UnsupportedFormat {
                extension: extension.to_string(),
            }),
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let extension = path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        Self::from_extension(extension)
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
        }
    }

    /// 匯出時使用的預設檔名
    pub fn default_file_name(&self) -> String {
        format!("box-definitions.{}", self.extension())
    }
}

impl fmt::Display for CatalogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// 依格式解析原始內容。
///
/// JSON 直接反序列化，格式錯誤即失敗；CSV 與 XLSX 逐列容錯，
/// 略過的列會以警告形式附在結果上。
pub fn import_catalog(format: CatalogFormat, payload: &[u8]) -> Result<ImportOutcome> {
    let outcome = match format {
        CatalogFormat::Json => ImportOutcome {
            boxes: serde_json::from_slice::<Vec<ShippingBox>>(payload)?,
            warnings: Vec::new(),
        },
        CatalogFormat::Csv => delimited::parse_delimited(payload)?,
        CatalogFormat::Xlsx => tabular::parse_tabular(payload)?,
    };

    for warning in &outcome.warnings {
        tracing::warn!("Skipping {} {}", format.extension().to_uppercase(), warning);
    }

    tracing::info!(
        "📥 Parsed {} boxes from {} ({} rows skipped)",
        outcome.boxes.len(),
        format,
        outcome.warnings.len()
    );

    Ok(outcome)
}

/// 匯入結果要通過驗證才會成為新的目錄；空結果也視為不合格
pub fn accept_import(outcome: ImportOutcome) -> Result<Catalog> {
    if outcome.boxes.is_empty() {
        return Err(BoxfitError::invalid_catalog("no usable boxes were found"));
    }

    if !is_valid_catalog(&outcome.boxes) {
        return Err(BoxfitError::invalid_catalog(
            "every box needs a name and three positive dimensions",
        ));
    }

    Ok(outcome.boxes)
}

pub async fn import_file<P: AsRef<Path>>(path: P) -> Result<ImportOutcome> {
    let path = path.as_ref();
    let format = CatalogFormat::from_path(path)?;
    tracing::debug!("Importing {} as {}", path.display(), format);

    let payload = tokio::fs::read(path).await?;
    import_catalog(format, &payload)
}
