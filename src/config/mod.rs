#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::formatter::ReceiptTemplate;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use std::path::{Path, PathBuf};
use toml_config::TomlConfig;

pub const DEFAULT_FROM_EMAIL: &str = "noreply@example.com";
pub const DEFAULT_SHOP_NAME: &str = "SimpleShop";
pub const DEFAULT_SENDGRID_ENDPOINT: &str = "https://api.sendgrid.com";
pub const DEFAULT_AUTH_ENDPOINT: &str = "https://identitytoolkit.googleapis.com";
pub const DEFAULT_FIRESTORE_ENDPOINT: &str = "https://firestore.googleapis.com";

pub const CONFIG_PATH_VAR: &str = "RECEIPT_CONFIG";
pub const VERBOSE_VAR: &str = "RECEIPT_VERBOSE";

/// 啟動時解析一次，之後唯讀共用。
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptConfig {
    /// 未設定時寄信功能停用，不視為錯誤
    pub sendgrid_api_key: Option<String>,
    pub from_email: String,
    pub sendgrid_endpoint: String,
    pub project_id: String,
    pub auth_endpoint: String,
    pub firestore_endpoint: String,
    pub access_token: Option<String>,
    pub shop_name: String,
    /// 開啟本 crate 的 debug log
    pub verbose_logging: bool,
}

impl ReceiptConfig {
    /// 每個設定依序取：設定檔 → 環境變數 → 預設值
    pub fn resolve<F>(file: Option<&TomlConfig>, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let default_file = TomlConfig::default();
        let file = file.unwrap_or(&default_file);

        let pick = |from_file: &Option<String>, vars: &[&str]| -> Option<String> {
            non_empty(from_file.clone())
                .or_else(|| vars.iter().find_map(|name| non_empty(env(*name))))
        };

        let project_id = pick(
            &file.firebase.project_id,
            &["FIREBASE_PROJECT_ID", "GOOGLE_CLOUD_PROJECT"],
        );
        let project_id = validation::validate_required_field("firebase.project_id", &project_id)?;

        Ok(Self {
            sendgrid_api_key: pick(&file.sendgrid.key, &["SENDGRID_API_KEY"]),
            from_email: pick(&file.sendgrid.from, &["SENDGRID_FROM"])
                .unwrap_or_else(|| DEFAULT_FROM_EMAIL.to_string()),
            sendgrid_endpoint: pick(&file.sendgrid.endpoint, &["SENDGRID_ENDPOINT"])
                .unwrap_or_else(|| DEFAULT_SENDGRID_ENDPOINT.to_string()),
            project_id: project_id.clone(),
            auth_endpoint: pick(&file.firebase.auth_endpoint, &["IDENTITY_ENDPOINT"])
                .unwrap_or_else(|| DEFAULT_AUTH_ENDPOINT.to_string()),
            firestore_endpoint: pick(&file.firebase.firestore_endpoint, &["FIRESTORE_ENDPOINT"])
                .unwrap_or_else(|| DEFAULT_FIRESTORE_ENDPOINT.to_string()),
            access_token: pick(&file.firebase.access_token, &["GOOGLE_ACCESS_TOKEN"]),
            shop_name: pick(&file.shop.name, &["SHOP_NAME"])
                .unwrap_or_else(|| DEFAULT_SHOP_NAME.to_string()),
            verbose_logging: file
                .logging
                .verbose
                .or_else(|| env(VERBOSE_VAR).and_then(|v| parse_flag(&v)))
                .unwrap_or(false),
        })
    }

    /// 讀取設定檔（若有）並以行程環境變數補齊
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let env_path = std::env::var(CONFIG_PATH_VAR).ok().and_then(|p| non_empty(Some(p)));
        let file = match path.map(Path::to_path_buf).or_else(|| env_path.map(PathBuf::from)) {
            Some(path) => {
                tracing::debug!("Loading config file {}", path.display());
                Some(TomlConfig::from_file(path)?)
            }
            None => None,
        };

        Self::resolve(file.as_ref(), |name| std::env::var(name).ok())
    }

    pub fn mail_enabled(&self) -> bool {
        self.sendgrid_api_key.is_some()
    }

    pub fn template(&self) -> ReceiptTemplate {
        ReceiptTemplate::new(self.from_email.clone(), self.shop_name.clone())
    }
}

impl Validate for ReceiptConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("sendgrid.endpoint", &self.sendgrid_endpoint)?;
        validation::validate_url("firebase.auth_endpoint", &self.auth_endpoint)?;
        validation::validate_url("firebase.firestore_endpoint", &self.firestore_endpoint)?;
        validation::validate_non_empty_string("firebase.project_id", &self.project_id)?;
        validation::validate_email_address("sendgrid.from", &self.from_email)?;
        validation::validate_non_empty_string("shop.name", &self.shop_name)?;

        if !self.mail_enabled() {
            tracing::warn!("SendGrid API key not set; receipts will be logged but not sent");
        }

        tracing::info!("✅ Configuration validation passed");
        Ok(())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
