// Application layer: 組裝各元件，並把觸發事件交給 dispatcher。

use crate::adapters::directory::FirestoreDirectory;
use crate::adapters::identity::FirebaseAuthClient;
use crate::adapters::mailer::Mailer;
use crate::adapters::trigger::TriggerPayload;
use crate::config::ReceiptConfig;
use crate::core::dispatcher::ReceiptDispatcher;
use crate::domain::model::{DispatchOutcome, EmailSource};
use crate::domain::ports::{DirectoryStore, IdentityLookup, IdentityRecord, MailSender};
use crate::utils::error::ReceiptError;
use reqwest::Client;
use serde::Serialize;

pub type LiveDispatcher = ReceiptDispatcher<FirebaseAuthClient, FirestoreDirectory, Mailer>;

/// 冷啟動時呼叫一次；三個 adapter 共用同一個 HTTP client
pub fn build_dispatcher(config: &ReceiptConfig) -> LiveDispatcher {
    let client = Client::new();
    ReceiptDispatcher::new(
        FirebaseAuthClient::new(client.clone(), config),
        FirestoreDirectory::new(client.clone(), config),
        Mailer::from_config(client, config),
        config.template(),
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvocationResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<EmailSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl InvocationResponse {
    fn dispatched(order_id: String, outcome: DispatchOutcome) -> Self {
        let (status, recipient, source) = match outcome {
            DispatchOutcome::Sent { recipient, source } => ("sent", Some(recipient), Some(source)),
            DispatchOutcome::SendFailed { recipient } => ("send_failed", Some(recipient), None),
            DispatchOutcome::Skipped { recipient } => ("skipped", Some(recipient), None),
            DispatchOutcome::NoEmail => ("no_email", None, None),
        };

        Self {
            order_id: Some(order_id),
            status,
            recipient: recipient.map(|r| r.to_string()),
            source,
            detail: None,
        }
    }

    fn ignored(order_id: Option<String>) -> Self {
        Self {
            order_id,
            status: "ignored",
            recipient: None,
            source: None,
            detail: None,
        }
    }

    fn rejected(detail: String) -> Self {
        Self {
            order_id: None,
            status: "rejected",
            recipient: None,
            source: None,
            detail: Some(detail),
        }
    }
}

fn reject(e: ReceiptError) -> InvocationResponse {
    tracing::error!(error = %e, "❌ Rejected order event");
    InvocationResponse::rejected(e.to_string())
}

/// 無法解析的事件只記 log 並回報 `rejected`，不讓觸發框架重試
pub async fn handle_payload<I, D, M>(
    dispatcher: &ReceiptDispatcher<I, D, M>,
    payload: serde_json::Value,
) -> InvocationResponse
where
    I: IdentityLookup,
    D: DirectoryStore,
    M: MailSender,
{
    let trigger = match TriggerPayload::from_value(payload) {
        Ok(trigger) => trigger,
        Err(e) => return reject(e),
    };

    if !trigger.is_creation() {
        let order_id = trigger.order_id().map(str::to_string);
        tracing::info!(order_id = ?order_id, "Ignoring update to an existing order");
        return InvocationResponse::ignored(order_id);
    }

    let event = match trigger.into_event() {
        Ok(event) => event,
        Err(e) => return reject(e),
    };

    let outcome = dispatcher.handle(&event).await;
    InvocationResponse::dispatched(event.order_id, outcome)
}
