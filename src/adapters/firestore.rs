//! 文件資料庫 REST 格式：每個欄位都包成 `{"stringValue": "..."}` 這類 typed value，
//! 這裡把它們還原成一般 JSON 再交給 serde。

use crate::utils::error::{ReceiptError, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Map, Number, Value};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirestoreDocument {
    pub name: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
    #[serde(default)]
    pub create_time: Option<DateTime<Utc>>,
}

impl FirestoreDocument {
    /// 文件路徑最後一段即為文件 ID
    pub fn document_id(&self) -> Option<&str> {
        self.name.rsplit('/').next().filter(|id| !id.is_empty())
    }

    /// 文件所屬 collection，例如 `.../documents/orders/abc` → `orders`
    pub fn collection(&self) -> Option<&str> {
        self.name.rsplit('/').nth(1).filter(|c| !c.is_empty())
    }

    pub fn decoded_fields(&self) -> Result<Value> {
        decode_fields(&self.fields)
    }
}

pub fn decode_fields(fields: &Map<String, Value>) -> Result<Value> {
    let mut decoded = Map::with_capacity(fields.len());
    for (key, value) in fields {
        decoded.insert(key.clone(), decode_value(value)?);
    }
    Ok(Value::Object(decoded))
}

pub fn decode_value(value: &Value) -> Result<Value> {
    let Some((kind, inner)) = value.as_object().and_then(|obj| obj.iter().next()) else {
        return Err(invalid(format!("expected typed value, got {}", value)));
    };

    match kind.as_str() {
        "nullValue" => Ok(Value::Null),
        "booleanValue" | "stringValue" | "timestampValue" | "referenceValue" | "bytesValue" => {
            Ok(inner.clone())
        }
        "geoPointValue" => Ok(inner.clone()),
        // integerValue 以十進位字串傳輸
        "integerValue" => match inner {
            Value::String(s) => s
                .parse::<i64>()
                .map(|n| Value::Number(n.into()))
                .map_err(|e| invalid(format!("bad integerValue {:?}: {}", s, e))),
            Value::Number(_) => Ok(inner.clone()),
            other => Err(invalid(format!("bad integerValue {}", other))),
        },
        "doubleValue" => match inner {
            Value::Number(_) => Ok(inner.clone()),
            Value::String(s) => s
                .parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Value::Number)
                .ok_or_else(|| invalid(format!("bad doubleValue {:?}", s))),
            other => Err(invalid(format!("bad doubleValue {}", other))),
        },
        "arrayValue" => {
            let values = inner
                .get("values")
                .and_then(Value::as_array)
                .map(|values| values.iter().map(decode_value).collect::<Result<Vec<_>>>())
                .transpose()?
                .unwrap_or_default();
            Ok(Value::Array(values))
        }
        "mapValue" => match inner.get("fields").and_then(Value::as_object) {
            Some(fields) => decode_fields(fields),
            None => Ok(Value::Object(Map::new())),
        },
        other => Err(invalid(format!("unsupported value type {}", other))),
    }
}

fn invalid(message: String) -> ReceiptError {
    ReceiptError::InvalidEventError { message }
}
