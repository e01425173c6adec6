use std::collections::HashMap;
use std::mem;

use crate::canonical;
use crate::value::Value;

/// Structural equality over any two values, cyclic ones included.
///
/// Primitives compare by kind and content, with no coercion. Compound values
/// of different kinds are never equal. For same-kind compounds a canonical
/// encoding of both operands is attempted first; when either side cannot be
/// encoded (cycles, non-finite floats) the comparison falls back to the
/// recursive walk, which carries a registry of in-progress pairs so that
/// self-referential values terminate.
pub fn equals(a: &Value, b: &Value) -> bool {
    if !a.is_compound() || !b.is_compound() {
        return eq_primitive(a, b);
    }
    // Same backing cell: identity implies structural equality.
    if a.identity() == b.identity() {
        return true;
    }
    if mem::discriminant(a) != mem::discriminant(b) {
        return false;
    }
    if let (Ok(left), Ok(right)) = (canonical::encode(a), canonical::encode(b)) {
        return left == right;
    }
    eq_values(a, b, &mut PairRegistry::default())
}

fn eq_primitive(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Nil, Value::Nil) => true,
        (Value::Bool(l), Value::Bool(r)) => l == r,
        (Value::Int(l), Value::Int(r)) => l == r,
        (Value::Float(l), Value::Float(r)) => l == r,
        (Value::Str(l), Value::Str(r)) => l == r,
        _ => false,
    }
}

// Pairs currently being compared, keyed by the left operand's identity.
// Entries are never removed; the registry lives for one top-level `equals`.
#[derive(Default)]
struct PairRegistry {
    pairs: HashMap<usize, Vec<usize>>,
}

impl PairRegistry {
    // False when the pair is already in progress somewhere up the stack.
    fn enter(&mut self, left: usize, right: usize) -> bool {
        let rights = self.pairs.entry(left).or_default();
        if rights.contains(&right) {
            return false;
        }
        rights.push(right);
        true
    }
}

fn eq_values(a: &Value, b: &Value, seen: &mut PairRegistry) -> bool {
    match (a, b) {
        (Value::Seq(x), Value::Seq(y)) => {
            if x.ptr_eq(y) {
                return true;
            }
            if !seen.enter(x.identity(), y.identity()) {
                return true;
            }
            let xs = x.borrow();
            let ys = y.borrow();
            xs.len() == ys.len()
                && xs
                    .iter()
                    .zip(ys.iter())
                    .all(|(l, r)| eq_values(l, r, seen))
        }
        (Value::Record(x), Value::Record(y)) => {
            if x.ptr_eq(y) {
                return true;
            }
            if !seen.enter(x.identity(), y.identity()) {
                return true;
            }
            let xs = x.borrow();
            let ys = y.borrow();
            xs.len() == ys.len()
                && xs.iter().all(|(key, left)| match ys.get(key) {
                    Some(right) => eq_values(left, right, seen),
                    None => false,
                })
        }
        (Value::Map(x), Value::Map(y)) => {
            if x.ptr_eq(y) {
                return true;
            }
            if !seen.enter(x.identity(), y.identity()) {
                return true;
            }
            let xs = x.borrow();
            let ys = y.borrow();
            xs.len() == ys.len()
                && xs.iter().all(|(key, left)| {
                    let found = ys.iter().find(|(k, _)| eq_values(key, k, seen));
                    match found {
                        Some((_, right)) => eq_values(left, right, seen),
                        None => false,
                    }
                })
        }
        (Value::Set(x), Value::Set(y)) => {
            if x.ptr_eq(y) {
                return true;
            }
            if !seen.enter(x.identity(), y.identity()) {
                return true;
            }
            let xs = x.borrow();
            let ys = y.borrow();
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|item| ys.iter().any(|other| eq_values(item, other, seen)))
        }
        _ => eq_primitive(a, b),
    }
}
