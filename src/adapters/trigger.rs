use crate::adapters::firestore::FirestoreDocument;
use crate::domain::model::{Order, OrderCreatedEvent};
use crate::utils::error::{ReceiptError, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

pub const ORDERS_COLLECTION: &str = "orders";

/// 觸發事件的三種形態：直接給訂單、單一文件，或文件資料庫的變更通知
/// （`value` 為新文件，`oldValue` 只有在更新時才有內容）。
#[derive(Debug, Clone)]
pub enum TriggerPayload {
    Plain { order_id: String, order: Order },
    Document(FirestoreDocument),
    Change {
        value: FirestoreDocument,
        old_value: Option<Value>,
    },
}

#[derive(Deserialize)]
struct PlainPayload {
    order_id: String,
    order: Order,
}

#[derive(Deserialize)]
struct DocumentPayload {
    document: FirestoreDocument,
}

#[derive(Deserialize)]
struct ChangePayload {
    value: FirestoreDocument,
    #[serde(default, rename = "oldValue")]
    old_value: Option<Value>,
}

impl TriggerPayload {
    pub fn from_json(raw: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(raw).map_err(|e| ReceiptError::InvalidEventError {
            message: format!("payload is not JSON: {}", e),
        })?;
        Self::from_value(value)
    }

    /// 依頂層 key 決定形態，讓 serde 的錯誤訊息原樣保留
    pub fn from_value(value: Value) -> Result<Self> {
        let Some(fields) = value.as_object() else {
            return Err(ReceiptError::InvalidEventError {
                message: format!("payload must be a JSON object, got {}", value),
            });
        };

        if fields.contains_key("document") {
            let payload: DocumentPayload = parse_shape("document", value)?;
            Ok(TriggerPayload::Document(payload.document))
        } else if fields.contains_key("value") {
            let payload: ChangePayload = parse_shape("change notification", value)?;
            Ok(TriggerPayload::Change {
                value: payload.value,
                old_value: payload.old_value,
            })
        } else {
            let payload: PlainPayload = parse_shape("order", value)?;
            Ok(TriggerPayload::Plain {
                order_id: payload.order_id,
                order: payload.order,
            })
        }
    }

    /// 只處理新建立的訂單；`oldValue` 有內容代表是更新
    pub fn is_creation(&self) -> bool {
        match self {
            TriggerPayload::Change { old_value, .. } => match old_value {
                None | Some(Value::Null) => true,
                Some(Value::Object(previous)) => previous.is_empty(),
                Some(_) => false,
            },
            _ => true,
        }
    }

    pub fn order_id(&self) -> Option<&str> {
        match self {
            TriggerPayload::Plain { order_id, .. } => Some(order_id.as_str()),
            TriggerPayload::Document(document) => document.document_id(),
            TriggerPayload::Change { value, .. } => value.document_id(),
        }
    }

    pub fn into_event(self) -> Result<OrderCreatedEvent> {
        match self {
            TriggerPayload::Plain { order_id, order } => {
                if order_id.trim().is_empty() {
                    return Err(ReceiptError::InvalidEventError {
                        message: "order_id is empty".to_string(),
                    });
                }
                Ok(OrderCreatedEvent {
                    order_id,
                    order,
                    create_time: None,
                })
            }
            TriggerPayload::Document(document) => event_from_document(document),
            TriggerPayload::Change { value, .. } => event_from_document(value),
        }
    }
}

fn parse_shape<T: DeserializeOwned>(shape: &str, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| ReceiptError::InvalidEventError {
        message: format!("malformed {} payload: {}", shape, e),
    })
}

fn event_from_document(document: FirestoreDocument) -> Result<OrderCreatedEvent> {
    if document.collection() != Some(ORDERS_COLLECTION) {
        return Err(ReceiptError::InvalidEventError {
            message: format!("document {} is not in {}", document.name, ORDERS_COLLECTION),
        });
    }
    let order_id = document
        .document_id()
        .ok_or_else(|| ReceiptError::InvalidEventError {
            message: format!("document name {:?} has no id", document.name),
        })?
        .to_string();
    let order: Order = serde_json::from_value(document.decoded_fields()?).map_err(|e| {
        ReceiptError::InvalidEventError {
            message: format!("malformed order document {}: {}", document.name, e),
        }
    })?;

    Ok(OrderCreatedEvent {
        order_id,
        order,
        create_time: document.create_time,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn order_document(id: &str) -> Value {
        json!({
            "name": format!("projects/demo/databases/(default)/documents/orders/{}", id),
            "fields": {
                "customerId": { "stringValue": "u9" },
                "items": { "arrayValue": { "values": [
                    { "mapValue": { "fields": {
                        "name": { "stringValue": "Rope" },
                        "qty": { "doubleValue": 1.5 },
                        "price": { "doubleValue": 4.0 }
                    }}}
                ]}},
                "total": { "integerValue": "12" }
            },
            "createTime": "2026-10-01T12:00:00Z"
        })
    }

    #[test]
    fn test_plain_payload() {
        let raw = json!({
            "order_id": "ord-1",
            "order": { "customerId": "u1", "items": [{ "name": "Widget", "qty": 2, "price": 9.99 }], "total": 19.98 }
        })
        .to_string();

        let event = TriggerPayload::from_json(&raw).unwrap().into_event().unwrap();

        assert_eq!(event.order_id, "ord-1");
        assert_eq!(event.order.customer_id, "u1");
        assert_eq!(event.order.line_items()[0].quantity, 2.0);
        assert!(event.create_time.is_none());
    }

    #[test]
    fn test_document_payload() {
        let payload = TriggerPayload::from_value(json!({ "document": order_document("ord-9") })).unwrap();
        assert!(payload.is_creation());

        let event = payload.into_event().unwrap();

        assert_eq!(event.order_id, "ord-9");
        assert_eq!(event.order.customer_id, "u9");
        assert_eq!(event.order.total_or_zero(), 12.0);
        assert_eq!(event.order.line_items()[0].quantity, 1.5);
        assert!(event.create_time.is_some());
    }

    #[test]
    fn test_change_notification_create() {
        let payload = TriggerPayload::from_value(json!({
            "value": order_document("ord-10"),
            "oldValue": {},
            "updateMask": {}
        }))
        .unwrap();

        assert!(payload.is_creation());
        assert_eq!(payload.order_id(), Some("ord-10"));
        assert_eq!(payload.into_event().unwrap().order.customer_id, "u9");
    }

    #[test]
    fn test_change_notification_update_is_not_creation() {
        let payload = TriggerPayload::from_value(json!({
            "value": order_document("ord-11"),
            "oldValue": order_document("ord-11"),
            "updateMask": { "fieldPaths": ["total"] }
        }))
        .unwrap();

        assert!(!payload.is_creation());
        assert_eq!(payload.order_id(), Some("ord-11"));
    }

    #[test]
    fn test_document_outside_orders_is_rejected() {
        let payload = TriggerPayload::from_value(json!({
            "document": {
                "name": "projects/demo/databases/(default)/documents/users/u1",
                "fields": {}
            }
        }))
        .unwrap();

        assert!(matches!(
            payload.into_event(),
            Err(ReceiptError::InvalidEventError { .. })
        ));
    }

    #[test]
    fn test_plain_error_names_the_field() {
        let err = TriggerPayload::from_value(json!({ "order": { "customerId": "u1" } })).unwrap_err();

        let message = err.to_string();
        assert!(message.contains("malformed order payload"));
        assert!(message.contains("order_id"));
        assert!(!message.contains("untagged"));
    }

    #[test]
    fn test_unknown_shape_is_rejected() {
        assert!(TriggerPayload::from_json(r#"{"hello":"world"}"#).is_err());
        assert!(TriggerPayload::from_json("not json").is_err());
        assert!(TriggerPayload::from_json("[1, 2]").is_err());
    }

    #[test]
    fn test_blank_order_id_is_rejected() {
        let raw = json!({ "order_id": " ", "order": { "customerId": "u1" } }).to_string();
        assert!(TriggerPayload::from_json(&raw).unwrap().into_event().is_err());
    }
}
