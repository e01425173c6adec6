use serde_json::{Map as JsonMap, Number, Value as JsonValue};

use crate::error::CassiaError;
use crate::value::Value;

// Order-independent encoding used by the equality fast path. The encoding is
// injective over structural-equality classes of encodable values: kind tags
// keep Seq/Set/Map/Record apart, record keys iterate sorted, map pairs and
// set elements are sorted by their own encoding, and -0.0 folds into 0.0.
// Cycles and non-finite floats refuse to encode, which routes the caller to
// the slow path.
pub(crate) fn encode(value: &Value) -> Result<String, CassiaError> {
    let mut trail = Vec::new();
    let json = encode_value(value, &mut trail)?;
    serde_json::to_string(&json).map_err(|_| CassiaError::Unencodable)
}

fn encode_value(value: &Value, trail: &mut Vec<usize>) -> Result<JsonValue, CassiaError> {
    match value {
        Value::Nil => Ok(JsonValue::Null),
        Value::Bool(b) => Ok(JsonValue::Bool(*b)),
        Value::Int(n) => Ok(JsonValue::Number((*n).into())),
        Value::Float(f) => {
            let folded = if *f == 0.0 { 0.0 } else { *f };
            Number::from_f64(folded)
                .map(JsonValue::Number)
                .ok_or(CassiaError::Unencodable)
        }
        Value::Str(s) => Ok(JsonValue::String(s.to_string())),
        Value::Seq(h) => {
            enter(trail, h.identity())?;
            let mut items = Vec::with_capacity(h.len());
            for item in h.borrow().iter() {
                items.push(encode_value(item, trail)?);
            }
            trail.pop();
            Ok(tagged("seq", JsonValue::Array(items)))
        }
        Value::Record(h) => {
            enter(trail, h.identity())?;
            let mut fields = JsonMap::new();
            for (key, item) in h.borrow().iter() {
                fields.insert(key.clone(), encode_value(item, trail)?);
            }
            trail.pop();
            Ok(tagged("rec", JsonValue::Object(fields)))
        }
        Value::Map(h) => {
            enter(trail, h.identity())?;
            let mut pairs = Vec::with_capacity(h.len());
            for (key, item) in h.borrow().iter() {
                let key_json = encode_value(key, trail)?;
                let item_json = encode_value(item, trail)?;
                pairs.push((key_json.to_string(), key_json, item_json));
            }
            trail.pop();
            pairs.sort_by(|(a, _, _), (b, _, _)| a.cmp(b));
            let pairs = pairs
                .into_iter()
                .map(|(_, k, v)| JsonValue::Array(vec![k, v]))
                .collect();
            Ok(tagged("map", JsonValue::Array(pairs)))
        }
        Value::Set(h) => {
            enter(trail, h.identity())?;
            let mut items = Vec::with_capacity(h.len());
            for item in h.borrow().iter() {
                let item_json = encode_value(item, trail)?;
                items.push((item_json.to_string(), item_json));
            }
            trail.pop();
            items.sort_by(|(a, _), (b, _)| a.cmp(b));
            let items = items.into_iter().map(|(_, v)| v).collect();
            Ok(tagged("set", JsonValue::Array(items)))
        }
    }
}

fn enter(trail: &mut Vec<usize>, identity: usize) -> Result<(), CassiaError> {
    if trail.contains(&identity) {
        return Err(CassiaError::Unencodable);
    }
    trail.push(identity);
    Ok(())
}

fn tagged(tag: &str, body: JsonValue) -> JsonValue {
    let mut wrapper = JsonMap::new();
    wrapper.insert(tag.to_string(), body);
    JsonValue::Object(wrapper)
}
