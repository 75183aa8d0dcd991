//! Plumbing shared by the `{"type": "<kind>", "<kind>": {...}}` unions the
//! API uses for blocks, rich text and mentions.

use serde::de::{DeserializeOwned, Error as _};
use serde::Deserialize;
use serde_json::{Map, Value};

pub(crate) const TYPE_KEY: &str = "type";

/// A tagged object split into its discriminant, its payload and whatever
/// other top-level fields came with it.
#[derive(Debug)]
pub(crate) struct TaggedObject {
    pub kind: String,
    pub payload: Option<Value>,
    pub rest: Map<String, Value>,
}

impl TaggedObject {
    pub fn split(object: Map<String, Value>) -> Result<Self, serde_json::Error> {
        Self::split_reserved(object, &[])
    }

    /// Like `split`, but a kind named after one of `reserved` leaves that
    /// field in `rest` and yields no payload.
    pub fn split_reserved(
        mut object: Map<String, Value>,
        reserved: &[&str],
    ) -> Result<Self, serde_json::Error> {
        let kind = match object.remove(TYPE_KEY) {
            Some(Value::String(kind)) => kind,
            Some(other) => {
                return Err(serde_json::Error::custom(format!(
                    "field `type` must be a string, found {}",
                    describe(&other)
                )))
            }
            None => return Err(serde_json::Error::missing_field(TYPE_KEY)),
        };
        let payload = if reserved.contains(&kind.as_str()) {
            None
        } else {
            object.remove(&kind)
        };
        Ok(Self {
            kind,
            payload,
            rest: object,
        })
    }

    /// The remaining top-level fields as a JSON object.
    pub fn rest_value(&mut self) -> Value {
        Value::Object(std::mem::take(&mut self.rest))
    }
}

/// Hydrate a payload record. An absent or `null` payload decodes as `{}`.
pub(crate) fn decode_payload<T: DeserializeOwned>(
    kind: &str,
    payload: Option<Value>,
) -> Result<T, serde_json::Error> {
    let payload = match payload {
        None | Some(Value::Null) => Value::Object(Map::new()),
        Some(object @ Value::Object(_)) => object,
        Some(other) => {
            return Err(serde_json::Error::custom(format!(
                "`{}` payload must be an object, found {}",
                kind,
                describe(&other)
            )))
        }
    };
    from_value_unbounded(payload)
        .map_err(|e| serde_json::Error::custom(format!("invalid `{}` payload: {}", kind, e)))
}

/// Parse JSON text with no nesting limit, growing the stack on demand.
pub(crate) fn from_str_unbounded<T: DeserializeOwned>(
    json: &str,
) -> Result<T, serde_json::Error> {
    let mut de = serde_json::Deserializer::from_str(json);
    de.disable_recursion_limit();
    let value = T::deserialize(serde_stacker::Deserializer::new(&mut de))?;
    de.end()?;
    Ok(value)
}

/// `serde_json::from_value` that grows the stack on demand.
pub(crate) fn from_value_unbounded<T: DeserializeOwned>(
    value: Value,
) -> Result<T, serde_json::Error> {
    T::deserialize(serde_stacker::Deserializer::new(value))
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn splits_kind_payload_and_rest() {
        let tagged = TaggedObject::split(object(json!({
            "id": "b1",
            "type": "divider",
            "divider": {}
        })))
        .unwrap();
        assert_eq!(tagged.kind, "divider");
        assert_eq!(tagged.payload, Some(json!({})));
        assert_eq!(tagged.rest.get("id"), Some(&json!("b1")));
        assert!(!tagged.rest.contains_key("divider"));
    }

    #[test]
    fn reserved_kind_stays_in_rest() {
        let tagged =
            TaggedObject::split_reserved(object(json!({"id": "b1", "type": "id"})), &["id"])
                .unwrap();
        assert_eq!(tagged.kind, "id");
        assert_eq!(tagged.payload, None);
        assert_eq!(tagged.rest.get("id"), Some(&json!("b1")));
    }

    #[test]
    fn missing_type_is_an_error() {
        let err = TaggedObject::split(object(json!({"divider": {}}))).unwrap_err();
        assert!(err.to_string().contains("type"));
    }

    #[test]
    fn non_string_type_is_an_error() {
        assert!(TaggedObject::split(object(json!({"type": 3}))).is_err());
    }

    #[test]
    fn null_payload_decodes_as_empty_object() {
        let decoded: Map<String, Value> = decode_payload("divider", Some(Value::Null)).unwrap();
        assert!(decoded.is_empty());
        let decoded: Map<String, Value> = decode_payload("divider", None).unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn text_nested_past_the_default_limit_parses() {
        let depth = 300;
        let json = format!("{}{}", "[".repeat(depth), "]".repeat(depth));
        assert!(serde_json::from_str::<Value>(&json).is_err());
        let value: Value = from_str_unbounded(&json).unwrap();
        assert!(value.is_array());
    }

    #[test]
    fn trailing_text_is_rejected() {
        assert!(from_str_unbounded::<Value>("{} {}").is_err());
    }

    #[test]
    fn scalar_payload_is_rejected() {
        let err = decode_payload::<Map<String, Value>>("paragraph", Some(json!("oops")))
            .unwrap_err();
        assert!(err.to_string().contains("paragraph"));
    }
}
