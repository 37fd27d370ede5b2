pub mod exporter;
pub mod importer;
pub mod matcher;
pub mod validator;
pub mod workflow;

pub use crate::domain::model::{Catalog, ImportOutcome, ImportWarning, Recommendation, ShippingBox};
pub use crate::domain::ports::{BlobStore, RemoteDocumentService};
pub use crate::utils::error::Result;
