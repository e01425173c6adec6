use std::collections::HashMap;

use crate::value::{MapHandle, RecordHandle, SeqHandle, SetHandle, Value};

/// Deep, independent copy. Primitives come back as-is; every compound value
/// is rebuilt, so no mutable sub-structure is shared with the source. Each
/// new handle is registered against its source's identity before the
/// children are cloned, which makes cloning terminate on cyclic inputs and
/// reproduces their cycles in the copy.
pub fn clone_value(value: &Value) -> Value {
    clone_with(value, &mut HashMap::new())
}

pub(crate) fn clone_set(handle: &SetHandle) -> SetHandle {
    clone_set_handle(handle, &mut HashMap::new())
}

fn clone_with(value: &Value, seen: &mut HashMap<usize, Value>) -> Value {
    match value {
        Value::Nil | Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::Str(_) => {
            value.clone()
        }
        Value::Seq(h) => {
            if let Some(done) = seen.get(&h.identity()) {
                return done.clone();
            }
            let out = SeqHandle::new();
            seen.insert(h.identity(), Value::Seq(out.clone()));
            for item in h.items() {
                out.push(clone_with(&item, seen));
            }
            Value::Seq(out)
        }
        Value::Record(h) => {
            if let Some(done) = seen.get(&h.identity()) {
                return done.clone();
            }
            let out = RecordHandle::new();
            seen.insert(h.identity(), Value::Record(out.clone()));
            for (key, item) in h.fields() {
                out.insert(key, clone_with(&item, seen));
            }
            Value::Record(out)
        }
        Value::Map(h) => {
            if let Some(done) = seen.get(&h.identity()) {
                return done.clone();
            }
            let out = MapHandle::new();
            seen.insert(h.identity(), Value::Map(out.clone()));
            // Pairs are copied positionally; the source already upholds key
            // uniqueness.
            for (key, item) in h.entries() {
                out.push_entry(clone_with(&key, seen), clone_with(&item, seen));
            }
            Value::Map(out)
        }
        Value::Set(h) => Value::Set(clone_set_handle(h, seen)),
    }
}

// Re-inserts through push so the dedup invariant is re-established even if
// the source was built behind the contract's back.
fn clone_set_handle(handle: &SetHandle, seen: &mut HashMap<usize, Value>) -> SetHandle {
    if let Some(Value::Set(done)) = seen.get(&handle.identity()) {
        return done.clone();
    }
    let out = SetHandle::new();
    seen.insert(handle.identity(), Value::Set(out.clone()));
    for item in handle.items() {
        out.push(clone_with(&item, seen));
    }
    out
}
