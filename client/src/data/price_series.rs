// Validation of OHLC payloads returned by `GET /stock/{symbol}`.
use serde_json::{Map, Value};
use shared::models::PriceBar;

use crate::error::ClientError;

const PRICE_FIELDS: [&str; 4] = ["open", "high", "low", "close"];

/// Accepts the payload only if it is an array whose every element carries a
/// non-empty `date`, `open`, `high`, `low` and `close`. One bad element
/// rejects the whole series.
pub fn validate_price_series(payload: Value) -> Result<Vec<PriceBar>, ClientError> {
    let items = match payload {
        Value::Array(items) => items,
        other => {
            return Err(ClientError::Validation(format!(
                "price series is not an array (got {})",
                json_type(&other)
            )))
        }
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| parse_bar(index, item))
        .collect()
}

fn parse_bar(index: usize, item: &Value) -> Result<PriceBar, ClientError> {
    let obj = item.as_object().ok_or_else(|| {
        ClientError::Validation(format!("price point {} is not an object", index))
    })?;

    let date = match present(obj, "date") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(_) => return Err(invalid(index, "date", "is not a string")),
        None => return Err(invalid(index, "date", "is missing or empty")),
    };

    let mut prices = [0.0f64; 4];
    for (slot, field) in prices.iter_mut().zip(PRICE_FIELDS) {
        *slot = match present(obj, field) {
            Some(Value::Number(n)) => n
                .as_f64()
                .ok_or_else(|| invalid(index, field, "is out of range"))?,
            Some(Value::String(s)) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| invalid(index, field, "is not numeric"))?,
            Some(_) => return Err(invalid(index, field, "is not numeric")),
            None => return Err(invalid(index, field, "is missing or empty")),
        };
    }
    let [open, high, low, close] = prices;

    Ok(PriceBar { date, open, high, low, close })
}

/// Returns the field when it exists, is not null and is not a blank string.
fn present<'a>(obj: &'a Map<String, Value>, field: &str) -> Option<&'a Value> {
    match obj.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.trim().is_empty() => None,
        Some(v) => Some(v),
    }
}

fn invalid(index: usize, field: &str, reason: &str) -> ClientError {
    ClientError::Validation(format!("price point {}: field '{}' {}", index, field, reason))
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
