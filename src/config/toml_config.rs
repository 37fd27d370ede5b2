use crate::utils::error::{BoxfitError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_range, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "boxfit.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub recommend: RecommendConfig,
    pub gist: GistConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub state_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            state_dir: ".boxfit".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendConfig {
    pub max_dimension: f64,
    pub default_cushion: f64,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            max_dimension: 1000.0,
            default_cushion: 0.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GistConfig {
    pub api_base: String,
    pub filename: String,
    pub description: String,
    pub timeout_seconds: u64,
}

impl Default for GistConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.github.com".to_string(),
            filename: "box-definitions.json".to_string(),
            description: "Box Definitions for Box Calculator".to_string(),
            timeout_seconds: 30,
        }
    }
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| BoxfitError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 指定路徑必須存在；未指定時讀取目前目錄的 boxfit.toml，沒有就用預設值
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::from_file(DEFAULT_CONFIG_FILE)
            }
            None => Ok(Self::default()),
        }
    }

    /// 替換環境變數 (例如 ${GITHUB_API})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| BoxfitError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_path("storage.state_dir", &self.storage.state_dir)?;
        validate_range(
            "recommend.max_dimension",
            self.recommend.max_dimension,
            1.0,
            1_000_000.0,
        )?;
        validate_range(
            "recommend.default_cushion",
            self.recommend.default_cushion,
            0.0,
            self.recommend.max_dimension,
        )?;
        validate_url("gist.api_base", &self.gist.api_base)?;
        validate_non_empty_string("gist.filename", &self.gist.filename)?;
        validate_range("gist.timeout_seconds", self.gist.timeout_seconds, 1, 600)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config.recommend.max_dimension, 1000.0);
        assert_eq!(config.gist.api_base, "https://api.github.com");
        assert_eq!(config.gist.filename, "box-definitions.json");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_sections() {
        let toml_content = r#"
[recommend]
default_cushion = 2

[gist]
timeout_seconds = 5
"#;
        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.recommend.default_cushion, 2.0);
        assert_eq!(config.recommend.max_dimension, 1000.0);
        assert_eq!(config.gist.timeout_seconds, 5);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("BOXFIT_TEST_API_BASE", "http://localhost:9999");

        let toml_content = r#"
[gist]
api_base = "${BOXFIT_TEST_API_BASE}"
"#;
        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.gist.api_base, "http://localhost:9999");

        std::env::remove_var("BOXFIT_TEST_API_BASE");
    }

    #[test]
    fn test_config_validation() {
        let invalid_url = AppConfig::from_toml_str("[gist]\napi_base = \"not a url\"\n").unwrap();
        assert!(invalid_url.validate().is_err());

        let negative_cushion =
            AppConfig::from_toml_str("[recommend]\ndefault_cushion = -1.0\n").unwrap();
        assert!(negative_cushion.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[storage]\nstate_dir = \"/tmp/boxfit-state\"\n")
            .unwrap();

        let config = AppConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.storage.state_dir, "/tmp/boxfit-state");
    }
}
