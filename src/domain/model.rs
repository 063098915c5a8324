use crate::domain::lenient;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 訂單文件，由文件資料庫擁有；本系統只讀。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default, deserialize_with = "lenient::string")]
    pub customer_id: String,
    #[serde(default)]
    pub items: Option<Vec<LineItem>>,
    #[serde(default, deserialize_with = "lenient::optional_number")]
    pub total: Option<f64>,
}

impl Order {
    pub fn line_items(&self) -> &[LineItem] {
        self.items.as_deref().unwrap_or(&[])
    }

    pub fn total_or_zero(&self) -> f64 {
        self.total.unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    /// 照原值顯示，`2.0` 印成 `2`、`1.5` 印成 `1.5`
    #[serde(
        default,
        rename = "qty",
        alias = "quantity",
        deserialize_with = "lenient::number"
    )]
    pub quantity: f64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderCreatedEvent {
    pub order_id: String,
    pub order: Order,
    pub create_time: Option<DateTime<Utc>>,
}

/// 執行期解析出的收件地址，不落地保存。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipientEmail(String);

impl RecipientEmail {
    /// 空字串視為「沒有 email」
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecipientEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailSource {
    Identity,
    Directory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub to: RecipientEmail,
    pub from: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    Skipped,
}

/// 每次觸發的最終狀態；對觸發框架而言全部都是成功。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Sent {
        recipient: RecipientEmail,
        source: EmailSource,
    },
    SendFailed {
        recipient: RecipientEmail,
    },
    Skipped {
        recipient: RecipientEmail,
    },
    NoEmail,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_order_defaults_when_fields_absent() {
        let order: Order = serde_json::from_value(json!({ "customerId": "u1" })).unwrap();

        assert_eq!(order.customer_id, "u1");
        assert!(order.line_items().is_empty());
        assert_eq!(order.total_or_zero(), 0.0);
    }

    #[test]
    fn test_line_item_accepts_qty_and_quantity() {
        let order: Order = serde_json::from_value(json!({
            "customerId": "u1",
            "items": [
                { "name": "Widget", "qty": 2, "price": 9.99 },
                { "name": "Gadget", "quantity": 3, "price": 1.5 }
            ],
            "total": 24.48
        }))
        .unwrap();

        let items = order.line_items();
        assert_eq!(items[0].quantity, 2.0);
        assert_eq!(items[1].quantity, 3.0);
        assert_eq!(items[1].name, "Gadget");
    }

    #[test]
    fn test_null_items_treated_as_empty() {
        let order: Order =
            serde_json::from_value(json!({ "customerId": "u1", "items": null, "total": null }))
                .unwrap();

        assert!(order.line_items().is_empty());
        assert_eq!(order.total_or_zero(), 0.0);
    }

    #[test]
    fn test_line_item_tolerates_loose_types() {
        let order: Order = serde_json::from_value(json!({
            "customerId": null,
            "items": [
                { "name": "Widget", "qty": 2.0, "price": 9.99 },
                { "name": "Rope", "qty": 1.5, "price": "4.25" },
                { "name": null, "qty": null, "price": null },
                { "name": "Bolt", "qty": "3" }
            ],
            "total": "19.98"
        }))
        .unwrap();

        let items = order.line_items();
        assert_eq!(items[0].quantity, 2.0);
        assert_eq!(items[0].quantity.to_string(), "2");
        assert_eq!(items[1].quantity.to_string(), "1.5");
        assert_eq!(items[1].price, 4.25);
        assert_eq!(items[2].name, "");
        assert_eq!(items[2].quantity, 0.0);
        assert_eq!(items[2].price, 0.0);
        assert_eq!(items[3].quantity, 3.0);
        assert_eq!(items[3].price, 0.0);
        assert_eq!(order.customer_id, "");
        assert_eq!(order.total_or_zero(), 19.98);
    }

    #[test]
    fn test_line_item_rejects_non_numeric_text() {
        let result: std::result::Result<Order, _> = serde_json::from_value(json!({
            "customerId": "u1",
            "items": [{ "name": "Widget", "qty": "two", "price": 1.0 }]
        }));

        let message = result.unwrap_err().to_string();
        assert!(message.contains("expected a number"));
    }

    #[test]
    fn test_recipient_email_rejects_blank() {
        assert!(RecipientEmail::parse("").is_none());
        assert!(RecipientEmail::parse("   ").is_none());
        assert_eq!(
            RecipientEmail::parse(" a@b.com ").unwrap().as_str(),
            "a@b.com"
        );
    }
}
