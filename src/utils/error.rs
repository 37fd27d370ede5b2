use thiserror::Error;

#[derive(Error, Debug)]
pub enum BoxfitError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Spreadsheet read error: {0}")]
    SpreadsheetReadError(#[from] calamine::XlsxError),

    #[error("Spreadsheet write error: {0}")]
    SpreadsheetWriteError(#[from] rust_xlsxwriter::XlsxError),

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("Could not connect to GitHub: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    /// 使用者輸入的尺寸不合法，訊息直接顯示給使用者
    #[error("{message}")]
    InputError { message: String },

    #[error("Unsupported file format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("Invalid CSV: Missing required column for '{column}'. Expected one of: {aliases}")]
    MissingColumn { column: String, aliases: String },

    #[error("Import failed: {message}")]
    ImportError { message: String },

    #[error("Invalid box definitions format: {message}")]
    InvalidCatalog { message: String },

    #[error("{message}")]
    RemoteError { status: Option<u16>, message: String },

    #[error("Internal state unavailable: {message}")]
    StateUnavailable { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Import,
    Storage,
    Remote,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl BoxfitError {
    pub fn input(message: impl Into<String>) -> Self {
        Self::InputError {
            message: message.into(),
        }
    }

    pub fn import(message: impl Into<String>) -> Self {
        Self::ImportError {
            message: message.into(),
        }
    }

    pub fn invalid_catalog(message: impl Into<String>) -> Self {
        Self::InvalidCatalog {
            message: message.into(),
        }
    }

    pub fn remote(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::RemoteError {
            status,
            message: message.into(),
        }
    }

    pub fn state_unavailable(message: impl Into<String>) -> Self {
        Self::StateUnavailable {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InputError { .. } => ErrorCategory::Input,
            Self::CsvError(_)
            | Self::SerializationError(_)
            | Self::SpreadsheetReadError(_)
            | Self::UnsupportedFormat { .. }
            | Self::MissingColumn { .. }
            | Self::ImportError { .. }
            | Self::InvalidCatalog { .. } => ErrorCategory::Import,
            Self::IoError(_) | Self::SpreadsheetWriteError(_) | Self::ZipError(_) => {
                ErrorCategory::Storage
            }
            Self::HttpError(_) | Self::RemoteError { .. } => ErrorCategory::Remote,
            Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::StateUnavailable { .. } => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Remote => ErrorSeverity::Medium,
            ErrorCategory::Import | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Storage | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的訊息（不含內部錯誤鏈）
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::InputError { message } | Self::RemoteError { message, .. } => message.clone(),
            Self::HttpError(e) => format!(
                "Error: Could not connect to GitHub or unexpected error. {}",
                e
            ),
            Self::UnsupportedFormat { .. } => "Error reading file: Unsupported file format".into(),
            Self::InvalidCatalog { .. } => {
                "Invalid box definitions format. Please check your file.".into()
            }
            Self::MissingColumn { .. }
            | Self::ImportError { .. }
            | Self::CsvError(_)
            | Self::SerializationError(_)
            | Self::SpreadsheetReadError(_) => format!("Error reading file: {}", self),
            _ => self.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::InputError { .. } => "Enter three positive numbers no larger than the maximum",
            Self::UnsupportedFormat { .. } => "Use a .json, .csv or .xlsx file",
            Self::MissingColumn { .. } => {
                "Add a header row with Name, Length, Width and Height columns"
            }
            Self::InvalidCatalog { .. } => {
                "Make sure every box has a name and three positive dimensions"
            }
            Self::RemoteError {
                status: Some(401), ..
            } => "Set a valid token with `boxfit gist set-token`",
            Self::RemoteError {
                status: Some(403), ..
            } => "Check token scopes or wait for the rate limit to reset",
            Self::RemoteError {
                status: Some(404), ..
            } => "Check the gist id with `boxfit gist set-id`",
            Self::RemoteError { .. } | Self::HttpError(_) => {
                "Check your network connection and try again"
            }
            Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => "Review boxfit.toml and command line flags",
            Self::IoError(_) | Self::ZipError(_) | Self::SpreadsheetWriteError(_) => {
                "Check that the state directory and output path are writable"
            }
            Self::StateUnavailable { .. } => "Restart boxfit",
            _ => "Check the file contents and try again",
        }
    }
}

pub type Result<T> = std::result::Result<T, BoxfitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_column_message_names_aliases() {
        let err = BoxfitError::MissingColumn {
            column: "height".to_string(),
            aliases: "height, hgt, h".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid CSV: Missing required column for 'height'. Expected one of: height, hgt, h"
        );
        assert_eq!(err.category(), ErrorCategory::Import);
        assert_eq!(err.severity(), ErrorSeverity::High);
    }

    #[test]
    fn test_input_errors_are_low_severity() {
        let err = BoxfitError::input("Invalid input: Length cannot be empty.");
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert_eq!(
            err.user_friendly_message(),
            "Invalid input: Length cannot be empty."
        );
    }

    #[test]
    fn test_state_unavailable_is_critical_system_error() {
        let err = BoxfitError::state_unavailable("store lock poisoned");
        assert_eq!(err.category(), ErrorCategory::System);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }

    #[test]
    fn test_remote_suggestion_depends_on_status() {
        let unauthorized = BoxfitError::remote(Some(401), "bad token");
        let missing = BoxfitError::remote(Some(404), "gone");
        assert_ne!(
            unauthorized.recovery_suggestion(),
            missing.recovery_suggestion()
        );
        assert_eq!(unauthorized.category(), ErrorCategory::Remote);
    }
}
