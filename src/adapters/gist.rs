use crate::config::toml_config::GistConfig;
use crate::domain::ports::RemoteDocumentService;
use crate::utils::error::{BoxfitError, Result};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

#[derive(Serialize)]
struct GistFile<'a> {
    content: &'a str,
}

#[derive(Serialize)]
struct CreateGist<'a> {
    description: &'a str,
    public: bool,
    files: HashMap<&'a str, GistFile<'a>>,
}

#[derive(Serialize)]
struct UpdateGist<'a> {
    files: HashMap<&'a str, GistFile<'a>>,
}

#[derive(Deserialize)]
struct GistResponse {
    id: String,
    #[serde(default)]
    files: HashMap<String, GistFileContent>,
}

#[derive(Deserialize)]
struct GistFileContent {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ApiMessage {
    message: Option<String>,
}

#[derive(Debug, Clone, Copy)]
enum Operation {
    Save,
    Update,
    Load,
}

/// 把 GitHub 的失敗回應轉成給使用者看的訊息
fn status_error(operation: Operation, status: StatusCode, body: &str) -> BoxfitError {
    let mut message = match (status.as_u16(), operation) {
        (401, _) => "Error: GitHub token is invalid or lacks required permissions.".to_string(),
        (403, _) => {
            "Error: GitHub request forbidden. Check token, permissions, or rate limits.".to_string()
        }
        (404, Operation::Update) => {
            "Error: GitHub Gist not found for update. Ensure Gist ID is correct.".to_string()
        }
        (404, Operation::Load) => {
            "Error: GitHub Gist not found. Ensure the Gist ID is correct.".to_string()
        }
        (code, Operation::Load) => format!("Error: Failed to load from GitHub (HTTP {}).", code),
        (code, _) => format!("Error: Failed to save to GitHub (HTTP {}).", code),
    };

    match serde_json::from_str::<ApiMessage>(body) {
        Ok(ApiMessage {
            message: Some(details),
        }) => message.push_str(&format!(" Details: {}", details)),
        Ok(_) => {}
        Err(_) => {
            if let Some(reason) = status.canonical_reason() {
                message.push_str(&format!(" Server response: {}", reason));
            }
        }
    }

    tracing::error!("GitHub {:?} failed with HTTP {}: {}", operation, status, body);
    BoxfitError::remote(Some(status.as_u16()), message)
}

pub struct GistClient {
    client: Client,
    api_base: String,
    token: String,
    filename: String,
    description: String,
}

impl GistClient {
    pub fn new(config: &GistConfig, token: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("boxfit/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            token: token.into(),
            filename: config.filename.clone(),
            description: config.description.clone(),
        })
    }

    fn files<'a>(&'a self, content: &'a str) -> HashMap<&'a str, GistFile<'a>> {
        HashMap::from([(self.filename.as_str(), GistFile { content })])
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.api_base, path))
            .header("Authorization", format!("token {}", self.token))
            .header("Accept", "application/vnd.github.v3+json")
    }

    async fn read_gist(operation: Operation, response: Response) -> Result<GistResponse> {
        let status = response.status();
        let body = response.text().await?;
        tracing::debug!("GitHub responded with HTTP {}", status);

        if !status.is_success() {
            return Err(status_error(operation, status, &body));
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Unexpected GitHub response body: {}", e);
            BoxfitError::remote(
                Some(status.as_u16()),
                "Error: GitHub returned a response that could not be understood.",
            )
        })
    }
}

#[async_trait]
impl RemoteDocumentService for GistClient {
    async fn create(&self, content: &str) -> Result<String> {
        let body = CreateGist {
            description: &self.description,
            public: false,
            files: self.files(content),
        };
        let response = self
            .request(reqwest::Method::POST, "/gists")
            .json(&body)
            .send()
            .await?;

        let gist = Self::read_gist(Operation::Save, response).await?;
        tracing::info!("☁️ Created gist {}", gist.id);
        Ok(gist.id)
    }

    async fn update(&self, id: &str, content: &str) -> Result<()> {
        let body = UpdateGist {
            files: self.files(content),
        };
        let response = self
            .request(reqwest::Method::PATCH, &format!("/gists/{}", id))
            .json(&body)
            .send()
            .await?;

        Self::read_gist(Operation::Update, response).await?;
        tracing::info!("☁️ Updated gist {}", id);
        Ok(())
    }

    async fn fetch(&self, id: &str) -> Result<String> {
        let response = self
            .request(reqwest::Method::GET, &format!("/gists/{}", id))
            .send()
            .await?;

        let mut gist = Self::read_gist(Operation::Load, response).await?;
        gist.files
            .remove(&self.filename)
            .and_then(|file| file.content)
            .ok_or_else(|| {
                BoxfitError::remote(
                    None,
                    format!("Error: '{}' not found in the loaded Gist.", self.filename),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_messages() {
        let unauthorized = status_error(Operation::Save, StatusCode::UNAUTHORIZED, "");
        assert_eq!(
            unauthorized.to_string(),
            "Error: GitHub token is invalid or lacks required permissions. Server response: Unauthorized"
        );

        let missing = status_error(
            Operation::Load,
            StatusCode::NOT_FOUND,
            r#"{"message": "Not Found"}"#,
        );
        assert_eq!(
            missing.to_string(),
            "Error: GitHub Gist not found. Ensure the Gist ID is correct. Details: Not Found"
        );

        let update_missing = status_error(Operation::Update, StatusCode::NOT_FOUND, "{}");
        assert_eq!(
            update_missing.to_string(),
            "Error: GitHub Gist not found for update. Ensure Gist ID is correct."
        );

        let server = status_error(Operation::Save, StatusCode::BAD_GATEWAY, "{}");
        assert_eq!(
            server.to_string(),
            "Error: Failed to save to GitHub (HTTP 502)."
        );
    }
}
