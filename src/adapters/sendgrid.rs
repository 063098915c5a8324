use crate::adapters::endpoint_url;
use crate::domain::model::{Delivery, OutboundMessage};
use crate::domain::ports::MailSender;
use crate::utils::error::{ReceiptError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

/// SendGrid v3 `mail/send`
pub struct SendGridMailer {
    client: Client,
    endpoint: String,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct MailSendRequest<'a> {
    personalizations: [Personalization<'a>; 1],
    from: Address<'a>,
    subject: &'a str,
    content: [Content<'a>; 2],
}

#[derive(Debug, Serialize)]
struct Personalization<'a> {
    to: [Address<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Address<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    r#type: &'a str,
    value: &'a str,
}

impl<'a> From<&'a OutboundMessage> for MailSendRequest<'a> {
    fn from(message: &'a OutboundMessage) -> Self {
        Self {
            personalizations: [Personalization {
                to: [Address {
                    email: message.to.as_str(),
                }],
            }],
            from: Address {
                email: &message.from,
            },
            subject: &message.subject,
            // text/plain 必須排在 text/html 前面
            content: [
                Content {
                    r#type: "text/plain",
                    value: &message.text,
                },
                Content {
                    r#type: "text/html",
                    value: &message.html,
                },
            ],
        }
    }
}

impl SendGridMailer {
    pub fn new(client: Client, endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl MailSender for SendGridMailer {
    async fn send(&self, order_id: &str, message: &OutboundMessage) -> Result<Delivery> {
        let url = endpoint_url(&self.endpoint, &["v3", "mail", "send"])?;

        tracing::debug!(order_id, "Submitting receipt to {}", url);
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&MailSendRequest::from(message))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(Delivery::Sent);
        }

        let body = response.text().await.unwrap_or_default();
        Err(ReceiptError::ProviderError {
            status: status.as_u16(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::RecipientEmail;
    use serde_json::json;

    #[test]
    fn test_request_body_shape() {
        let message = OutboundMessage {
            to: RecipientEmail::parse("a@b.com").unwrap(),
            from: "noreply@example.com".to_string(),
            subject: "Your order ord-1 at SimpleShop".to_string(),
            text: "plain".to_string(),
            html: "<p>html</p>".to_string(),
        };

        let body = serde_json::to_value(MailSendRequest::from(&message)).unwrap();

        assert_eq!(
            body,
            json!({
                "personalizations": [{ "to": [{ "email": "a@b.com" }] }],
                "from": { "email": "noreply@example.com" },
                "subject": "Your order ord-1 at SimpleShop",
                "content": [
                    { "type": "text/plain", "value": "plain" },
                    { "type": "text/html", "value": "<p>html</p>" }
                ]
            })
        );
    }
}
