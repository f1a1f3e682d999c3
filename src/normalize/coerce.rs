use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;

/// Reads `key`, treating an explicit `null` the same as a missing key.
pub fn field<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value.get(key).filter(|v| !v.is_null())
}

/// First present (non-null) value among `keys`.
pub fn first_field<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| field(value, key))
}

pub fn safe_string(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// First non-empty string among `keys`, or an empty string.
pub fn first_string(value: &Value, keys: &[&str]) -> String {
    keys.iter()
        .map(|key| safe_string(field(value, key)))
        .find(|s| !s.is_empty())
        .unwrap_or_default()
}

/// Price-like coercion. Numbers and numeric strings parse exactly; anything else is zero.
pub fn safe_decimal(value: Option<&Value>) -> Decimal {
    match value {
        Some(Value::Number(n)) => parse_decimal(&n.to_string()),
        Some(Value::String(s)) => parse_decimal(s.trim()),
        _ => Decimal::ZERO,
    }
}

fn parse_decimal(text: &str) -> Decimal {
    if text.is_empty() {
        return Decimal::ZERO;
    }
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .unwrap_or(Decimal::ZERO)
}

fn safe_integer(value: Option<&Value>) -> Option<i64> {
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Some(Value::String(s)) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(|f| f.trunc() as i64)
            })
        }
        _ => None,
    }
}

/// Non-negative counter; missing or invalid input counts as zero.
pub fn safe_count(value: Option<&Value>) -> u64 {
    safe_integer(value)
        .and_then(|n| u64::try_from(n).ok())
        .unwrap_or(0)
}

/// Line quantity: at least 1, defaulting to 1 when missing or invalid.
pub fn safe_quantity(value: Option<&Value>) -> u32 {
    safe_integer(value)
        .map(|n| n.clamp(1, i64::from(u32::MAX)))
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or(1)
}

pub fn safe_bool(value: Option<&Value>, default: bool) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" => true,
            "false" | "0" | "no" => false,
            _ => default,
        },
        _ => default,
    }
}

/// Accepts a value that may be an already-parsed object/array or a JSON-encoded
/// string. Anything else, or a string that fails to parse, yields `fallback`.
pub fn try_json(value: Option<&Value>, fallback: Value) -> Value {
    match value {
        Some(v @ (Value::Object(_) | Value::Array(_))) => v.clone(),
        Some(Value::String(s)) => match serde_json::from_str::<Value>(s) {
            Ok(Value::Null) | Err(_) => fallback,
            Ok(parsed) => parsed,
        },
        _ => fallback,
    }
}

/// Lists arrive bare, under `items`, or under `data` (which may itself hold `items`).
pub fn unwrap_array(value: &Value) -> &[Value] {
    if let Value::Array(items) = value {
        return items;
    }
    if let Some(Value::Array(items)) = value.get("items") {
        return items;
    }
    match value.get("data") {
        Some(Value::Array(items)) => items,
        Some(inner @ Value::Object(_)) => unwrap_array(inner),
        _ => &[],
    }
}

/// Single records may arrive wrapped under `data`.
pub fn unwrap_object(value: &Value) -> &Value {
    match value.get("data") {
        Some(inner @ Value::Object(_)) => inner,
        _ => value,
    }
}
