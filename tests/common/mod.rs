#![allow(dead_code)]

use httpmock::MockServer;
use order_receipt::ReceiptConfig;
use std::io::Write;
use std::sync::{Arc, Mutex};
use tracing::subscriber::DefaultGuard;

pub const PROJECT: &str = "demo-project";

pub const LOOKUP_PATH: &str = "/v1/projects/demo-project/accounts:lookup";

pub fn user_doc_path(customer_id: &str) -> String {
    format!(
        "/v1/projects/demo-project/databases/(default)/documents/users/{}",
        customer_id
    )
}

/// 三個外部服務都指向同一個 mock server
pub fn config_for(server: &MockServer, api_key: Option<&str>) -> ReceiptConfig {
    ReceiptConfig {
        sendgrid_api_key: api_key.map(str::to_string),
        from_email: "noreply@example.com".to_string(),
        sendgrid_endpoint: server.base_url(),
        project_id: PROJECT.to_string(),
        auth_endpoint: server.base_url(),
        firestore_endpoint: server.base_url(),
        access_token: None,
        shop_name: "SimpleShop".to_string(),
        verbose_logging: false,
    }
}

/// 把目前執行緒的 log 寫進記憶體，供測試檢查輸出內容
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0
            .lock()
            .expect("log buffer poisoned")
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl LogCapture {
    /// `#[tokio::test]` 預設是單執行緒 runtime，guard 存活期間的 log 都會被收集
    pub fn install(&self) -> DefaultGuard {
        let writer = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn lines_containing(&self, needle: &str) -> Vec<String> {
        let buf = self.0.lock().expect("log buffer poisoned");
        String::from_utf8_lossy(&buf)
            .lines()
            .filter(|line| line.contains(needle))
            .map(str::to_string)
            .collect()
    }
}
