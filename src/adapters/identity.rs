use crate::adapters::endpoint_url;
use crate::config::ReceiptConfig;
use crate::domain::model::RecipientEmail;
use crate::domain::ports::{IdentityLookup, IdentityRecord};
use crate::utils::error::{ReceiptError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

/// 身分服務的 `accounts:lookup` REST 端點
pub struct FirebaseAuthClient {
    client: Client,
    endpoint: String,
    project_id: String,
    access_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<UserRecord>,
}

#[derive(Debug, Deserialize)]
struct UserRecord {
    email: Option<String>,
}

impl FirebaseAuthClient {
    pub fn new(client: Client, config: &ReceiptConfig) -> Self {
        Self {
            client,
            endpoint: config.auth_endpoint.clone(),
            project_id: config.project_id.clone(),
            access_token: config.access_token.clone(),
        }
    }
}

#[async_trait]
impl IdentityLookup for FirebaseAuthClient {
    async fn lookup(&self, customer_id: &str) -> Result<IdentityRecord> {
        let url = endpoint_url(
            &self.endpoint,
            &["v1", "projects", self.project_id.as_str(), "accounts:lookup"],
        )?;

        tracing::debug!("Looking up identity {} via {}", customer_id, url);
        let mut request = self
            .client
            .post(url)
            .json(&serde_json::json!({ "localId": [customer_id] }));
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ReceiptError::IdentityError {
                message: format!("status {}: {}", status.as_u16(), body),
            });
        }

        // 查無此人時回應裡沒有 `users`
        let lookup: LookupResponse = response.json().await?;
        Ok(match lookup.users.into_iter().next() {
            Some(user) => IdentityRecord::Found(
                user.email.and_then(|email| RecipientEmail::parse(&email)),
            ),
            None => IdentityRecord::NotFound,
        })
    }
}
