use crate::utils::error::{ReceiptError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

/// 設定檔內容，所有欄位皆可省略；缺少的值由環境變數或預設值補上。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub sendgrid: SendGridSection,
    #[serde(default)]
    pub firebase: FirebaseSection,
    #[serde(default)]
    pub shop: ShopSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SendGridSection {
    pub key: Option<String>,
    pub from: Option<String>,
    pub endpoint: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FirebaseSection {
    pub project_id: Option<String>,
    pub auth_endpoint: Option<String>,
    pub firestore_endpoint: Option<String>,
    pub access_token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShopSection {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingSection {
    pub verbose: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ReceiptError::IoError)?;
        Self::from_toml_str(&content, |name| std::env::var(name).ok())
    }

    /// 從 TOML 字串解析配置，`${VAR}` 由 `env` 查詢替換
    pub fn from_toml_str<F>(content: &str, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let processed_content = Self::substitute_env_vars(content, env);

        toml::from_str(&processed_content).map_err(|e| ReceiptError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 找不到的變數替換成空字串，之後視為未設定
    fn substitute_env_vars<F>(content: &str, env: F) -> String
    where
        F: Fn(&str) -> Option<String>,
    {
        static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
        let re = PLACEHOLDER.get_or_init(|| {
            Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder regex is valid")
        });

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            env(var_name).unwrap_or_default()
        })
        .into_owned()
    }
}
