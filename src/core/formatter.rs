use crate::domain::model::{Order, OutboundMessage, RecipientEmail};

/// 寄件者資訊，啟動時由設定決定。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptTemplate {
    pub from: String,
    pub shop_name: String,
}

impl ReceiptTemplate {
    pub fn new(from: impl Into<String>, shop_name: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            shop_name: shop_name.into(),
        }
    }

    pub fn subject(&self, order_id: &str) -> String {
        format!("Your order {} at {}", order_id, self.shop_name)
    }

    pub fn text_body(&self, order_id: &str, order: &Order) -> String {
        let item_lines = order
            .line_items()
            .iter()
            .map(|i| format!("- {} x{} : {}", i.name, i.quantity, i.price))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "Thank you for your order!\n\nOrder ID: {}\n\nItems:\n{}\n\nTotal: {}",
            order_id,
            item_lines,
            order.total_or_zero()
        )
    }

    pub fn html_body(&self, order_id: &str, order: &Order) -> String {
        let item_lines = order
            .line_items()
            .iter()
            .map(|i| {
                format!("{} x{} — {}", escape_html(&i.name), i.quantity, i.price)
            })
            .collect::<Vec<_>>()
            .join("<br/>");

        format!(
            "<p>Thank you for your order!</p>\
             <p><strong>Order ID:</strong> {}</p>\
             <p><strong>Items:</strong><br/>{}</p>\
             <p><strong>Total:</strong> {}</p>",
            escape_html(order_id),
            item_lines,
            order.total_or_zero()
        )
    }

    pub fn render(&self, order_id: &str, order: &Order, to: RecipientEmail) -> OutboundMessage {
        OutboundMessage {
            to,
            from: self.from.clone(),
            subject: self.subject(order_id),
            text: self.text_body(order_id, order),
            html: self.html_body(order_id, order),
        }
    }
}

/// 只跳脫 `& < > " '` 五個字元，內容只會出現在元素文字中，不放進屬性或 script
fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
