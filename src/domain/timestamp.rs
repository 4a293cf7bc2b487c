//! Timestamps arrive as any JSON number; integers are kept exactly.

use serde::de::{Deserialize, Deserializer, Error, Unexpected};
use serde_json::Value;

/// Whole units from any JSON number. Fractions truncate toward zero and values
/// outside `i64` saturate.
pub(crate) fn from_number(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|number| number as i64))
}

pub(crate) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    from_number(&value).ok_or_else(|| invalid(&value))
}

/// Absent (with `#[serde(default)]`) and `null` become `None`.
pub(crate) fn deserialize_option<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<i64>, D::Error> {
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(value) => from_number(&value).map(Some).ok_or_else(|| invalid(&value)),
    }
}

fn invalid<E: Error>(value: &Value) -> E {
    let unexpected = match value {
        Value::Bool(flag) => Unexpected::Bool(*flag),
        Value::String(text) => Unexpected::Str(text),
        Value::Array(_) => Unexpected::Seq,
        Value::Object(_) => Unexpected::Map,
        Value::Null | Value::Number(_) => Unexpected::Unit,
    };
    E::invalid_type(unexpected, &"a numeric timestamp")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn integers_are_exact_and_floats_truncate() {
        assert_eq!(from_number(&json!(1_700_000_000_123_i64)), Some(1_700_000_000_123));
        assert_eq!(from_number(&json!(1_700_000_000_000.0)), Some(1_700_000_000_000));
        assert_eq!(from_number(&json!(1.9)), Some(1));
        assert_eq!(from_number(&json!(-1.9)), Some(-1));
        assert_eq!(from_number(&json!(u64::MAX)), Some(i64::MAX));
        assert_eq!(from_number(&json!("1")), None);
    }

    #[test]
    fn non_numbers_are_rejected_with_a_type_error() {
        let err = deserialize(&json!("yesterday")).unwrap_err();
        assert!(err.to_string().contains("a numeric timestamp"), "{err}");

        assert_eq!(deserialize_option(&json!(null)).unwrap(), None);
        assert_eq!(deserialize_option(&json!(5.5)).unwrap(), Some(5));
        assert!(deserialize_option(&json!(true)).is_err());
    }
}
