use crate::domain::model::{Delivery, OutboundMessage, RecipientEmail};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 身分服務的查詢結果。只有 `NotFound`（或查詢失敗）才會改讀目錄文件；
/// 找到使用者但沒有 email 就到此為止。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityRecord {
    Found(Option<RecipientEmail>),
    NotFound,
}

/// 身分服務：以 customerId 查詢使用者。
#[async_trait]
pub trait IdentityLookup: Send + Sync {
    async fn lookup(&self, customer_id: &str) -> Result<IdentityRecord>;
}

/// 目錄資料庫：讀取 `users/{customerId}` 文件的 email 欄位。
#[async_trait]
pub trait DirectoryStore: Send + Sync {
    async fn read_email(&self, customer_id: &str) -> Result<Option<RecipientEmail>>;
}

#[async_trait]
pub trait MailSender: Send + Sync {
    async fn send(&self, order_id: &str, message: &OutboundMessage) -> Result<Delivery>;
}
