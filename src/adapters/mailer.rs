use crate::adapters::sendgrid::SendGridMailer;
use crate::config::ReceiptConfig;
use crate::domain::model::{Delivery, OutboundMessage};
use crate::domain::ports::MailSender;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;

/// 啟動時依 API key 是否存在決定：真的寄信，或整個行程都只記 log。
pub enum Mailer {
    Live(SendGridMailer),
    Disabled,
}

impl Mailer {
    pub fn from_config(client: Client, config: &ReceiptConfig) -> Self {
        match &config.sendgrid_api_key {
            Some(key) => Mailer::Live(SendGridMailer::new(
                client,
                config.sendgrid_endpoint.clone(),
                key.clone(),
            )),
            None => {
                tracing::warn!("SendGrid API key not set; email sending disabled");
                Mailer::Disabled
            }
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, Mailer::Live(_))
    }
}

#[async_trait]
impl MailSender for Mailer {
    async fn send(&self, order_id: &str, message: &OutboundMessage) -> Result<Delivery> {
        match self {
            Mailer::Live(sender) => sender.send(order_id, message).await,
            Mailer::Disabled => {
                tracing::info!(
                    order_id,
                    recipient = %message.to,
                    "SendGrid API key not set; skipping email send for order"
                );
                Ok(Delivery::Skipped)
            }
        }
    }
}
