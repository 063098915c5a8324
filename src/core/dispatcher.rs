use crate::core::formatter::ReceiptTemplate;
use crate::core::resolver::resolve_recipient;
use crate::domain::model::{Delivery, DispatchOutcome, OrderCreatedEvent};
use crate::domain::ports::{DirectoryStore, IdentityLookup, MailSender};

/// 訂單建立後寄出收據。每次呼叫互相獨立，只共享啟動時建立的唯讀元件。
pub struct ReceiptDispatcher<I: IdentityLookup, D: DirectoryStore, M: MailSender> {
    identity: I,
    directory: D,
    mailer: M,
    template: ReceiptTemplate,
}

impl<I: IdentityLookup, D: DirectoryStore, M: MailSender> ReceiptDispatcher<I, D, M> {
    pub fn new(identity: I, directory: D, mailer: M, template: ReceiptTemplate) -> Self {
        Self {
            identity,
            directory,
            mailer,
            template,
        }
    }

    pub fn template(&self) -> &ReceiptTemplate {
        &self.template
    }

    /// 永遠不回傳錯誤：各種失敗都只記錄 log 並反映在 outcome。
    pub async fn handle(&self, event: &OrderCreatedEvent) -> DispatchOutcome {
        let order_id = event.order_id.as_str();
        let customer_id = event.order.customer_id.as_str();

        tracing::debug!(
            order_id,
            customer_id,
            create_time = ?event.create_time,
            "Handling order creation"
        );

        let Some((recipient, source)) =
            resolve_recipient(&self.identity, &self.directory, customer_id).await
        else {
            tracing::info!(order_id, customer_id, "No email for order");
            return DispatchOutcome::NoEmail;
        };

        let message = self
            .template
            .render(order_id, &event.order, recipient.clone());

        match self.mailer.send(order_id, &message).await {
            Ok(Delivery::Sent) => {
                tracing::info!(order_id, recipient = %recipient, "✅ Sent receipt for order");
                DispatchOutcome::Sent { recipient, source }
            }
            Ok(Delivery::Skipped) => DispatchOutcome::Skipped { recipient },
            Err(e) => {
                tracing::error!(order_id, error = %e, "❌ Failed to send email for order");
                DispatchOutcome::SendFailed { recipient }
            }
        }
    }
}
