use crate::deep::clone_value;
use crate::equality::equals;
use crate::value::{SeqHandle, SetHandle, Value};

/// Index of the first element structurally equal to `needle`.
pub fn index_of(items: &[Value], needle: &Value) -> Option<usize> {
    items.iter().position(|item| equals(item, needle))
}

/// New collection of `a`'s kind holding a deep clone of each element of `a`
/// that has a structural counterpart in `b`, in `a`'s order. Neither input
/// is modified. Seq results keep duplicate occurrences; Set results re-apply
/// the dedup invariant.
pub fn intersect(a: &Value, b: &Value) -> Value {
    let other = elements(b);
    let kept = elements(a)
        .iter()
        .filter(|item| index_of(&other, item).is_some())
        .map(clone_value)
        .collect();
    rebuild(a, kept)
}

/// True when every element of `a` has a structural counterpart in `b`.
/// With `allow_equal` false this demands a proper subset: structurally equal
/// collections do not qualify.
pub fn subset(a: &Value, b: &Value, allow_equal: bool) -> bool {
    let other = elements(b);
    if !elements(a)
        .iter()
        .all(|item| index_of(&other, item).is_some())
    {
        return false;
    }
    allow_equal || !equals(a, b)
}

/// New collection of `a`'s kind with clones of `a`'s elements followed by
/// clones of `b`'s. On a Set the dedup invariant collapses repeats; on a Seq
/// this is plain concatenation.
pub fn union(a: &Value, b: &Value) -> Value {
    let mut joined: Vec<Value> = elements(a).iter().map(clone_value).collect();
    joined.extend(elements(b).iter().map(clone_value));
    rebuild(a, joined)
}

/// New collection of `a`'s kind holding clones of the elements of `a` with
/// no structural counterpart in `b`.
pub fn difference(a: &Value, b: &Value) -> Value {
    let other = elements(b);
    let kept = elements(a)
        .iter()
        .filter(|item| index_of(&other, item).is_none())
        .map(clone_value)
        .collect();
    rebuild(a, kept)
}

// Seq and Set carry elements; every other kind contributes none.
fn elements(value: &Value) -> Vec<Value> {
    match value {
        Value::Seq(h) => h.items(),
        Value::Set(h) => h.items(),
        _ => Vec::new(),
    }
}

fn rebuild(like: &Value, items: Vec<Value>) -> Value {
    match like {
        Value::Set(_) => Value::Set(SetHandle::from_items(items)),
        _ => Value::Seq(SeqHandle::from_items(items)),
    }
}
