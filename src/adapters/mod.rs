// Adapters layer: 身分服務、目錄資料庫、寄信服務的 HTTP 實作，以及觸發事件解析。

pub mod directory;
pub mod firestore;
pub mod identity;
pub mod mailer;
pub mod sendgrid;
pub mod trigger;

use crate::utils::error::{ReceiptError, Result};
use url::Url;

/// 在 base URL 後面逐段附加路徑，每段都會做 percent-encoding
pub(crate) fn endpoint_url(base: &str, segments: &[&str]) -> Result<Url> {
    let mut url = Url::parse(base).map_err(|e| ReceiptError::InvalidConfigValueError {
        field: "endpoint".to_string(),
        value: base.to_string(),
        reason: format!("Invalid URL format: {}", e),
    })?;

    url.path_segments_mut()
        .map_err(|_| ReceiptError::InvalidConfigValueError {
            field: "endpoint".to_string(),
            value: base.to_string(),
            reason: "URL cannot be a base".to_string(),
        })?
        .pop_if_empty()
        .extend(segments);

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url_joins_segments() {
        let url = endpoint_url("https://firestore.googleapis.com/", &["v1", "projects", "demo"]).unwrap();
        assert_eq!(url.as_str(), "https://firestore.googleapis.com/v1/projects/demo");
    }

    #[test]
    fn test_endpoint_url_encodes_ids() {
        let url = endpoint_url("http://127.0.0.1:8080", &["users", "a/b c"]).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/users/a%2Fb%20c");
    }

    #[test]
    fn test_endpoint_url_rejects_garbage() {
        assert!(endpoint_url("not a url", &["v1"]).is_err());
        assert!(endpoint_url("mailto:someone@example.com", &["v1"]).is_err());
    }
}
