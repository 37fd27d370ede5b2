use crate::adapters::store::{CATALOG_KEY, GIST_ID_KEY, TOKEN_KEY};
use crate::config::toml_config::RecommendConfig;
use crate::core::exporter::export_catalog;
use crate::core::importer::{accept_import, import_file, CatalogFormat};
use crate::core::matcher::find_closest_box;
use crate::core::validator::is_valid_catalog_value;
use crate::domain::defaults::default_catalog;
use crate::domain::model::{Catalog, ImportWarning, Recommendation, ShippingBox};
use crate::domain::ports::{BlobStore, RemoteDocumentService};
use crate::utils::error::{BoxfitError, Result};
use crate::utils::validation::parse_dimension_input;
use std::path::Path;

/// 執行期狀態：目前的目錄、緩衝值、token 與 gist id。
///
/// 目錄只會整份替換，不會逐筆修改。
pub struct Session<S: BlobStore> {
    store: S,
    catalog: Catalog,
    cushion: f64,
    token: Option<String>,
    gist_id: Option<String>,
    max_dimension: f64,
}

fn parse_stored_catalog(blob: &str) -> Option<Catalog> {
    let value: serde_json::Value = serde_json::from_str(blob).ok()?;
    if !is_valid_catalog_value(&value) {
        return None;
    }
    serde_json::from_value(value).ok()
}

impl<S: BlobStore> Session<S> {
    pub async fn open(store: S, settings: &RecommendConfig) -> Result<Self> {
        let catalog = match store.get(CATALOG_KEY).await? {
            Some(blob) => parse_stored_catalog(&blob).unwrap_or_else(|| {
                tracing::warn!("Stored catalog is invalid, falling back to the built-in boxes");
                default_catalog()
            }),
            None => default_catalog(),
        };
        tracing::debug!("Active catalog has {} boxes", catalog.len());

        let token = store.get(TOKEN_KEY).await?.filter(|t| !t.trim().is_empty());
        let gist_id = store.get(GIST_ID_KEY).await?.filter(|id| !id.trim().is_empty());

        Ok(Self {
            store,
            catalog,
            cushion: settings.default_cushion,
            token,
            gist_id,
            max_dimension: settings.max_dimension,
        })
    }

    pub fn catalog(&self) -> &[ShippingBox] {
        &self.catalog
    }

    pub fn cushion(&self) -> f64 {
        self.cushion
    }

    pub fn set_cushion(&mut self, cushion: f64) -> Result<()> {
        if !cushion.is_finite() || cushion < 0.0 {
            return Err(BoxfitError::input(format!(
                "Invalid input: Cushion must be zero or a positive number, got {}.",
                cushion
            )));
        }
        self.cushion = cushion;
        Ok(())
    }

    /// 緩衝歸零
    pub fn reset(&mut self) {
        self.cushion = 0.0;
    }

    pub fn recommend(&self, length: &str, width: &str, height: &str) -> Result<Recommendation> {
        let length = parse_dimension_input("Length", length, self.max_dimension)?;
        let width = parse_dimension_input("Width", width, self.max_dimension)?;
        let height = parse_dimension_input("Height", height, self.max_dimension)?;

        let recommendation = match find_closest_box(
            length + self.cushion,
            width + self.cushion,
            height + self.cushion,
            &self.catalog,
        ) {
            Some(shipping_box) => Recommendation::Found {
                shipping_box: shipping_box.clone(),
                cushion: self.cushion,
            },
            None => Recommendation::NoSuitableBox,
        };

        tracing::debug!(
            "Recommendation for {}x{}x{} (+{}): {:?}",
            length,
            width,
            height,
            self.cushion,
            recommendation
        );
        Ok(recommendation)
    }

    /// 整份替換目錄並寫回儲存區；寫入失敗時不更動目前目錄
    async fn replace_catalog(&mut self, catalog: Catalog) -> Result<()> {
        let blob = serde_json::to_string(&catalog)?;
        self.store.set(CATALOG_KEY, &blob).await?;
        self.catalog = catalog;
        Ok(())
    }

    pub async fn import_file<P: AsRef<Path>>(&mut self, path: P) -> Result<Vec<ImportWarning>> {
        let outcome = import_file(path).await?;
        let warnings = outcome.warnings.clone();
        let catalog = accept_import(outcome)?;

        tracing::info!("✅ Box definitions updated: {} boxes", catalog.len());
        self.replace_catalog(catalog).await?;
        Ok(warnings)
    }

    pub async fn reset_catalog(&mut self) -> Result<()> {
        self.replace_catalog(default_catalog()).await
    }

    pub fn export(&self, format: CatalogFormat) -> Result<Vec<u8>> {
        export_catalog(format, &self.catalog)
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn gist_id(&self) -> Option<&str> {
        self.gist_id.as_deref()
    }

    pub fn require_token(&self) -> Result<&str> {
        self.token().ok_or_else(|| BoxfitError::MissingConfigError {
            field: "GitHub token (run `boxfit gist set-token <TOKEN>`)".to_string(),
        })
    }

    /// 沒有已儲存的 token 時才使用，不寫回儲存區
    pub fn seed_token(&mut self, token: Option<String>) {
        if self.token.is_none() {
            self.token = token.filter(|t| !t.trim().is_empty());
        }
    }

    pub async fn set_token(&mut self, token: &str) -> Result<()> {
        let token = token.trim();
        if token.is_empty() {
            return Err(BoxfitError::input("GitHub token input cancelled."));
        }
        self.store.set(TOKEN_KEY, token).await?;
        self.token = Some(token.to_string());
        Ok(())
    }

    pub async fn set_gist_id(&mut self, id: &str) -> Result<()> {
        let id = id.trim();
        if id.is_empty() {
            return Err(BoxfitError::input("Gist id cannot be empty."));
        }
        self.store.set(GIST_ID_KEY, id).await?;
        self.gist_id = Some(id.to_string());
        Ok(())
    }

    /// 有 gist id 就更新，沒有就建立新的並記住 id
    pub async fn save_remote<R>(&mut self, remote: &R) -> Result<String>
    where
        R: RemoteDocumentService + ?Sized,
    {
        let content = serde_json::to_string_pretty(&self.catalog)?;

        match self.gist_id.clone() {
            Some(id) => {
                remote.update(&id, &content).await?;
                Ok(id)
            }
            None => {
                let id = remote.create(&content).await?;
                self.set_gist_id(&id).await?;
                Ok(id)
            }
        }
    }

    pub async fn load_remote<R>(&mut self, remote: &R) -> Result<usize>
    where
        R: RemoteDocumentService + ?Sized,
    {
        let Some(id) = self.gist_id.clone() else {
            return Err(BoxfitError::remote(
                None,
                "No saved Gist ID found. Please save to GitHub first to create or specify a Gist ID.",
            ));
        };

        let content = remote.fetch(&id).await?;
        let value: serde_json::Value = serde_json::from_str(&content).map_err(|e| {
            tracing::error!("JSON parsing error from gist {}: {}", id, e);
            BoxfitError::remote(
                None,
                "Error: Could not parse box definitions from the Gist. The content may be corrupted.",
            )
        })?;

        if !is_valid_catalog_value(&value) {
            return Err(BoxfitError::remote(
                None,
                "Error: Invalid box definitions loaded from GitHub. Please check the Gist content.",
            ));
        }

        let catalog: Catalog = serde_json::from_value(value)?;
        let count = catalog.len();
        self.replace_catalog(catalog).await?;
        tracing::info!("☁️ Loaded {} boxes from gist {}", count, id);
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::store::MemoryStore;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeRemote {
        documents: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl RemoteDocumentService for FakeRemote {
        async fn create(&self, content: &str) -> Result<String> {
            let mut documents = self.documents.lock().unwrap();
            let id = format!("gist-{}", documents.len() + 1);
            documents.push((id.clone(), content.to_string()));
            Ok(id)
        }

        async fn update(&self, id: &str, content: &str) -> Result<()> {
            let mut documents = self.documents.lock().unwrap();
            match documents.iter_mut().find(|(doc_id, _)| doc_id == id) {
                Some(doc) => {
                    doc.1 = content.to_string();
                    Ok(())
                }
                None => Err(BoxfitError::remote(Some(404), "not found")),
            }
        }

        async fn fetch(&self, id: &str) -> Result<String> {
            let documents = self.documents.lock().unwrap();
            documents
                .iter()
                .find(|(doc_id, _)| doc_id == id)
                .map(|(_, content)| content.clone())
                .ok_or_else(|| BoxfitError::remote(Some(404), "not found"))
        }
    }

    async fn session_with(store: MemoryStore) -> Session<MemoryStore> {
        Session::open(store, &RecommendConfig::default()).await.unwrap()
    }

    #[tokio::test]
    async fn test_open_falls_back_to_defaults() {
        let session = session_with(MemoryStore::new()).await;
        assert_eq!(session.catalog(), default_catalog().as_slice());

        let broken = MemoryStore::new()
            .with_entry(CATALOG_KEY, r#"[{"name": "flat", "dimensions": [1, 2]}]"#);
        let session = session_with(broken).await;
        assert_eq!(session.catalog().len(), default_catalog().len());
    }

    #[tokio::test]
    async fn test_open_uses_stored_catalog() {
        let store = MemoryStore::new()
            .with_entry(CATALOG_KEY, r#"[{"name": "only", "dimensions": [3, 2, 1]}]"#)
            .with_entry(GIST_ID_KEY, "abc");
        let session = session_with(store).await;
        assert_eq!(session.catalog(), &[ShippingBox::new("only", [3.0, 2.0, 1.0])]);
        assert_eq!(session.gist_id(), Some("abc"));
        assert_eq!(session.token(), None);
    }

    #[tokio::test]
    async fn test_recommend_adds_cushion() {
        let store = MemoryStore::new().with_entry(
            CATALOG_KEY,
            r#"[{"name": "6C", "dimensions": [6, 6, 6]}, {"name": "8C", "dimensions": [8, 8, 8]}]"#,
        );
        let mut session = session_with(store).await;

        let plain = session.recommend("5", "5", "5").unwrap();
        assert!(matches!(plain, Recommendation::Found { ref shipping_box, .. } if shipping_box.name == "6C"));

        session.set_cushion(2.0).unwrap();
        let padded = session.recommend("5", "5", "5").unwrap();
        assert_eq!(
            padded,
            Recommendation::Found {
                shipping_box: ShippingBox::new("8C", [8.0, 8.0, 8.0]),
                cushion: 2.0
            }
        );

        session.set_cushion(4.0).unwrap();
        assert_eq!(
            session.recommend("5", "5", "5").unwrap(),
            Recommendation::NoSuitableBox
        );

        session.reset();
        assert_eq!(session.cushion(), 0.0);
        assert!(session.set_cushion(-1.0).is_err());
    }

    #[tokio::test]
    async fn test_recommend_stops_at_first_invalid_field() {
        let session = session_with(MemoryStore::new()).await;
        let err = session.recommend("5", "abc", "").unwrap_err();
        assert_eq!(err.to_string(), "Invalid input: Width must be a number.");

        let err = session.recommend("5", "5", "1001").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid input: Height must be less than or equal to 1000."
        );
    }

    #[tokio::test]
    async fn test_remote_save_then_load() {
        let remote = FakeRemote::default();
        let mut session = session_with(MemoryStore::new()).await;

        let id = session.save_remote(&remote).await.unwrap();
        assert_eq!(id, "gist-1");
        assert_eq!(session.gist_id(), Some("gist-1"));

        // 第二次儲存走更新路徑
        assert_eq!(session.save_remote(&remote).await.unwrap(), "gist-1");
        assert_eq!(remote.documents.lock().unwrap().len(), 1);

        let count = session.load_remote(&remote).await.unwrap();
        assert_eq!(count, default_catalog().len());
    }

    #[tokio::test]
    async fn test_remote_load_rejects_invalid_content() {
        let remote = FakeRemote::default();
        remote
            .documents
            .lock()
            .unwrap()
            .push(("bad".to_string(), r#"[{"name": "x", "dimensions": [0, 1, 1]}]"#.to_string()));

        let store = MemoryStore::new().with_entry(GIST_ID_KEY, "bad");
        let mut session = session_with(store).await;
        let before = session.catalog().to_vec();

        let err = session.load_remote(&remote).await.unwrap_err();
        assert!(err.to_string().contains("Invalid box definitions loaded from GitHub"));
        assert_eq!(session.catalog(), before.as_slice());
    }

    #[tokio::test]
    async fn test_remote_load_requires_gist_id() {
        let remote = FakeRemote::default();
        let mut session = session_with(MemoryStore::new()).await;
        assert!(session.load_remote(&remote).await.is_err());
    }
}
