use crate::utils::error::{BoxfitError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(BoxfitError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(BoxfitError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(BoxfitError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(BoxfitError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(BoxfitError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(BoxfitError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(BoxfitError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// 解析為有限且大於 0 的數值；其他情況一律回傳 None
pub fn parse_positive_number(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value > 0.0)
}

/// 驗證使用者輸入的單一尺寸欄位，依序檢查：空白、數字、正數、上限
pub fn parse_dimension_input(field_label: &str, raw: &str, max_value: f64) -> Result<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(BoxfitError::input(format!(
            "Invalid input: {} cannot be empty.",
            field_label
        )));
    }

    let value = match trimmed.parse::<f64>() {
        Ok(value) if !value.is_nan() => value,
        _ => {
            return Err(BoxfitError::input(format!(
                "Invalid input: {} must be a number.",
                field_label
            )))
        }
    };

    if value <= 0.0 {
        return Err(BoxfitError::input(format!(
            "Invalid input: {} must be a positive number.",
            field_label
        )));
    }

    if value > max_value {
        return Err(BoxfitError::input(format!(
            "Invalid input: {} must be less than or equal to {}.",
            field_label, max_value
        )));
    }

    Ok(value)
}
