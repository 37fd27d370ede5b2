pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::gist::GistClient;
pub use crate::adapters::store::{LocalStore, MemoryStore};
pub use crate::config::{toml_config::AppConfig, CliConfig};
pub use crate::core::importer::{accept_import, import_catalog, CatalogFormat};
pub use crate::core::matcher::find_closest_box;
pub use crate::core::workflow::Session;
pub use crate::domain::defaults::default_catalog;
pub use crate::domain::model::{Catalog, ImportOutcome, ImportWarning, Recommendation, ShippingBox};
pub use crate::utils::error::{BoxfitError, Result};
