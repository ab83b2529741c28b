use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::types::{NodesResponse, StylesResponse};
use crate::errors::{FigmaError, FigmaResult};

pub const DEFAULT_API_BASE: &str = "https://api.figma.com/v1/files";
pub const FILE_KEY_VAR: &str = "FIGMA_FILE_KEY";
pub const ACCESS_TOKEN_VAR: &str = "FIGMA_PERSONAL_ACCESS_TOKEN";
pub const API_BASE_VAR: &str = "FIGMA_API_BASE";
pub const TOKEN_HEADER: &str = "X-FIGMA-TOKEN";

/// Connection settings read from the environment.
///
/// Both values stay optional until a request is made so that a missing
/// variable is reported by the call that needs it.
#[derive(Debug, Clone)]
pub struct FigmaCredentials {
    pub file_key: Option<String>,
    pub access_token: Option<String>,
    pub api_base: String,
}

impl Default for FigmaCredentials {
    fn default() -> Self {
        Self {
            file_key: None,
            access_token: None,
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

impl FigmaCredentials {
    pub fn new(file_key: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            file_key: Some(file_key.into()),
            access_token: Some(access_token.into()),
            ..Self::default()
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Reads the `FIGMA_*` variables. Empty values count as missing.
    pub fn from_env() -> Self {
        let read = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());
        Self {
            file_key: read(FILE_KEY_VAR),
            access_token: read(ACCESS_TOKEN_VAR),
            api_base: read(API_BASE_VAR).unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
        }
    }

    fn require(&self) -> FigmaResult<(&str, &str)> {
        let file_key = self
            .file_key
            .as_deref()
            .ok_or(FigmaError::MissingEnv(FILE_KEY_VAR))?;
        let access_token = self
            .access_token
            .as_deref()
            .ok_or(FigmaError::MissingEnv(ACCESS_TOKEN_VAR))?;
        Ok((file_key, access_token))
    }
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// One authenticated GET. Implemented over reqwest for real runs.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str, access_token: &str) -> FigmaResult<HttpResponse>;
}

#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &str, access_token: &str) -> FigmaResult<HttpResponse> {
        let response = self
            .client
            .get(url)
            .header(TOKEN_HEADER, access_token)
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(HttpResponse { status, body })
    }
}

pub struct FigmaClient<T: Transport = ReqwestTransport> {
    credentials: FigmaCredentials,
    transport: T,
}

impl FigmaClient<ReqwestTransport> {
    pub fn from_env() -> Self {
        Self::new(FigmaCredentials::from_env(), ReqwestTransport::default())
    }
}

impl<T: Transport> FigmaClient<T> {
    pub fn new(credentials: FigmaCredentials, transport: T) -> Self {
        Self {
            credentials,
            transport,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// GET `{api_base}/{file_key}{path}` and decode the body as `R`.
    pub async fn fetch<R: DeserializeOwned>(&self, path: &str) -> FigmaResult<R> {
        let (file_key, access_token) = self.credentials.require()?;
        let url = format!(
            "{}/{}{}",
            self.credentials.api_base.trim_end_matches('/'),
            file_key,
            path
        );
        debug!("GET {}", url);

        let response = self.transport.get(&url, access_token).await?;
        if !(200..300).contains(&response.status) {
            return Err(FigmaError::Status {
                status: response.status,
                body: response.body,
            });
        }
        Ok(serde_json::from_str(&response.body)?)
    }

    /// Lists the styles of the file to learn the node id of each one.
    ///
    /// See <https://www.figma.com/developers/api#get-file-styles-endpoint>
    pub async fn fetch_styles(&self) -> FigmaResult<StylesResponse> {
        self.fetch("/styles").await
    }

    /// Fetches the style nodes in one batch to read their color values.
    ///
    /// See <https://www.figma.com/developers/api#get-file-nodes-endpoint>
    pub async fn fetch_nodes(&self, node_ids: &[String]) -> FigmaResult<NodesResponse> {
        self.fetch(&format!("/nodes?ids={}", node_ids.join(",")))
            .await
    }
}
