use crate::adapters::endpoint_url;
use crate::adapters::firestore::FirestoreDocument;
use crate::config::ReceiptConfig;
use crate::domain::model::RecipientEmail;
use crate::domain::ports::DirectoryStore;
use crate::utils::error::{ReceiptError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};

pub const USERS_COLLECTION: &str = "users";

/// 讀取 `users/{customerId}` 文件
pub struct FirestoreDirectory {
    client: Client,
    endpoint: String,
    project_id: String,
    access_token: Option<String>,
}

impl FirestoreDirectory {
    pub fn new(client: Client, config: &ReceiptConfig) -> Self {
        Self {
            client,
            endpoint: config.firestore_endpoint.clone(),
            project_id: config.project_id.clone(),
            access_token: config.access_token.clone(),
        }
    }
}

#[async_trait]
impl DirectoryStore for FirestoreDirectory {
    async fn read_email(&self, customer_id: &str) -> Result<Option<RecipientEmail>> {
        let url = endpoint_url(
            &self.endpoint,
            &[
                "v1",
                "projects",
                self.project_id.as_str(),
                "databases",
                "(default)",
                "documents",
                USERS_COLLECTION,
                customer_id,
            ],
        )?;

        tracing::debug!("Reading directory document {}", url);
        let mut request = self.client.get(url);
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            tracing::debug!(customer_id, "Directory document does not exist");
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ReceiptError::DirectoryError {
                message: format!("status {}: {}", status.as_u16(), body),
            });
        }

        let document: FirestoreDocument = response.json().await?;
        let fields = document
            .decoded_fields()
            .map_err(|e| ReceiptError::DirectoryError {
                message: format!("cannot decode {}: {}", document.name, e),
            })?;

        Ok(fields
            .get("email")
            .and_then(|v| v.as_str())
            .and_then(RecipientEmail::parse))
    }
}
