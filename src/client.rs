//! HTTP client for the key routes, and the `KeyApi` seam the dashboard drives.

use async_trait::async_trait;

use crate::errors::ClientError;
use crate::models::{
    ApiKey, CreateApiKeyRequest, DeleteApiKeyResponse, ErrorResponse, RenameApiKeyRequest,
};

/// Remote key operations as seen by the dashboard.
#[async_trait]
pub trait KeyApi: Send + Sync {
    async fn list(&self) -> Result<Vec<ApiKey>, ClientError>;
    async fn create(&self, name: &str) -> Result<ApiKey, ClientError>;
    async fn rename(&self, id: &str, name: &str) -> Result<ApiKey, ClientError>;
    async fn delete(&self, id: &str) -> Result<(), ClientError>;
}

/// Talks to a server exposing the key routes under `/api`. No timeout and no
/// retry: a stalled request stays pending until the server answers.
#[derive(Debug, Clone)]
pub struct KeysClient {
    http: reqwest::Client,
    base_url: String,
}

impl KeysClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn keys_url(&self) -> String {
        format!("{}/api/keys", self.base_url)
    }

    fn key_url(&self, id: &str) -> String {
        format!("{}/api/keys/{}", self.base_url, id)
    }
}

#[async_trait]
impl KeyApi for KeysClient {
    async fn list(&self) -> Result<Vec<ApiKey>, ClientError> {
        let resp = self.http.get(self.keys_url()).send().await?;
        Ok(check_response(resp).await?.json().await?)
    }

    async fn create(&self, name: &str) -> Result<ApiKey, ClientError> {
        let body = CreateApiKeyRequest {
            name: name.to_string(),
        };
        let resp = self.http.post(self.keys_url()).json(&body).send().await?;
        Ok(check_response(resp).await?.json().await?)
    }

    async fn rename(&self, id: &str, name: &str) -> Result<ApiKey, ClientError> {
        let body = RenameApiKeyRequest {
            name: name.to_string(),
        };
        let resp = self.http.patch(self.key_url(id)).json(&body).send().await?;
        Ok(check_response(resp).await?.json().await?)
    }

    async fn delete(&self, id: &str) -> Result<(), ClientError> {
        let resp = self.http.delete(self.key_url(id)).send().await?;
        let body: DeleteApiKeyResponse = check_response(resp).await?.json().await?;
        if !body.success {
            return Err(ClientError::Status {
                status: 200,
                message: "Server did not confirm the delete".to_string(),
            });
        }
        Ok(())
    }
}

/// Maps non-2xx responses to `ClientError::Status`, keeping the server's
/// `{error}` message when the body carries one.
async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    if resp.status().is_success() {
        return Ok(resp);
    }

    let status = resp.status().as_u16();
    let message = match resp.json::<ErrorResponse>().await {
        Ok(body) => body.error,
        Err(_) => format!("HTTP {status}"),
    };
    Err(ClientError::Status { status, message })
}
