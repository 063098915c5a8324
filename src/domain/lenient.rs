//! 訂單文件由前端寫入，欄位型別不一定可靠；這些 deserializer 接受
//! `null`、浮點數形式的整數與數字字串，避免單一欄位讓整張收據無法寄出。

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberLike {
    Number(f64),
    Text(String),
}

pub fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional_number(deserializer)?.unwrap_or_default())
}

pub fn optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberLike>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberLike::Number(n)) => Ok(Some(n)),
        Some(NumberLike::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("expected a number, got {:?}", s))),
    }
}

pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
