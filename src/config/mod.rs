pub mod toml_config;

use crate::core::importer::CatalogFormat;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "boxfit")]
#[command(about = "Recommend the tightest stock shipping box for an item")]
pub struct CliConfig {
    /// Path to a TOML configuration file (defaults to ./boxfit.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the stored catalog, gist id and token
    #[arg(long, global = true, env = "BOXFIT_STATE_DIR")]
    pub state_dir: Option<String>,

    /// GitHub token used when none has been stored
    #[arg(long, global = true, env = "BOXFIT_GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Find the closest box for an item
    Recommend {
        #[arg(allow_hyphen_values = true)]
        length: String,
        #[arg(allow_hyphen_values = true)]
        width: String,
        #[arg(allow_hyphen_values = true)]
        height: String,
        /// Padding added to every dimension (0, 2, 4 and 6 are the usual presets)
        #[arg(long, allow_hyphen_values = true)]
        cushion: Option<f64>,
        /// Clear the configured default cushion before matching
        #[arg(long, conflicts_with = "cushion")]
        reset: bool,
    },
    /// Replace the active catalog with the boxes in a .json, .csv or .xlsx file
    Import { file: PathBuf },
    /// Write the active catalog to disk
    Export {
        #[arg(long, value_enum, default_value = "json")]
        format: ExportFormat,
        /// Output file (defaults to box-definitions.<ext>)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Inspect or reset the active catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Sync the catalog with a GitHub gist
    Gist {
        #[command(subcommand)]
        action: GistAction,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Csv,
    Xlsx,
    /// Zip archive holding all three formats
    Bundle,
}

impl ExportFormat {
    /// 單一格式對應的目錄格式；打包輸出沒有對應
    pub fn catalog_format(&self) -> Option<CatalogFormat> {
        match self {
            ExportFormat::Json => Some(CatalogFormat::Json),
            ExportFormat::Csv => Some(CatalogFormat::Csv),
            ExportFormat::Xlsx => Some(CatalogFormat::Xlsx),
            ExportFormat::Bundle => None,
        }
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum CatalogAction {
    /// Print every box in the active catalog
    List,
    /// Restore the built-in catalog
    Reset,
}

#[derive(Debug, Clone, Subcommand)]
pub enum GistAction {
    /// Create or update the gist with the active catalog
    Save,
    /// Replace the active catalog with the gist content
    Load,
    /// Store the GitHub token
    SetToken { token: String },
    /// Store the id of an existing gist
    SetId { id: String },
}
