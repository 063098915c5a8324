use crate::domain::model::{EmailSource, RecipientEmail};
use crate::domain::ports::{DirectoryStore, IdentityLookup, IdentityRecord};

/// 先查身分服務；查無此人或查詢出錯才讀目錄文件。
/// 身分服務找到使用者但沒有 email 時不再讀目錄。
pub async fn resolve_recipient<I, D>(
    identity: &I,
    directory: &D,
    customer_id: &str,
) -> Option<(RecipientEmail, EmailSource)>
where
    I: IdentityLookup + ?Sized,
    D: DirectoryStore + ?Sized,
{
    if customer_id.trim().is_empty() {
        tracing::warn!("Order has no customerId, skipping email lookup");
        return None;
    }

    match identity.lookup(customer_id).await {
        Ok(IdentityRecord::Found(Some(email))) => return Some((email, EmailSource::Identity)),
        Ok(IdentityRecord::Found(None)) => {
            tracing::debug!(customer_id, "Identity record has no email");
            return None;
        }
        Ok(IdentityRecord::NotFound) => {
            tracing::debug!(customer_id, "No identity record, trying directory");
        }
        Err(e) => {
            tracing::warn!(customer_id, error = %e, "Identity lookup failed, trying directory");
        }
    }

    match directory.read_email(customer_id).await {
        Ok(Some(email)) => Some((email, EmailSource::Directory)),
        Ok(None) => None,
        Err(e) => {
            tracing::warn!(customer_id, error = %e, "Directory read failed");
            None
        }
    }
}
