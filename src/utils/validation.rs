use crate::utils::error::{ReceiptError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(ReceiptError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ReceiptError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(ReceiptError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value
        .as_ref()
        .ok_or_else(|| ReceiptError::MissingConfigError {
            field: field_name.to_string(),
        })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ReceiptError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// 只做基本格式檢查：`local@domain`，domain 需含 `.`
pub fn validate_email_address(field_name: &str, value: &str) -> Result<()> {
    validate_non_empty_string(field_name, value)?;

    let invalid = |reason: &str| ReceiptError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    };

    if value.chars().any(char::is_whitespace) {
        return Err(invalid("Email address cannot contain whitespace"));
    }

    match value.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.contains('@') => {
            if domain.starts_with('.') || domain.ends_with('.') || !domain.contains('.') {
                return Err(invalid("Email domain is malformed"));
            }
            Ok(())
        }
        _ => Err(invalid("Email address must have the form local@domain")),
    }
}
