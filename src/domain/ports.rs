use crate::utils::error::Result;
use async_trait::async_trait;

/// 扁平的 key/value 儲存區，值為整段字串
pub trait BlobStore: Send + Sync {
    fn get(&self, key: &str) -> impl std::future::Future<Output = Result<Option<String>>> + Send;
    fn set(&self, key: &str, value: &str) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// 遠端文件服務（目前為 GitHub Gist）
#[async_trait]
pub trait RemoteDocumentService: Send + Sync {
    async fn create(&self, content: &str) -> Result<String>;
    async fn update(&self, id: &str, content: &str) -> Result<()>;
    async fn fetch(&self, id: &str) -> Result<String>;
}
