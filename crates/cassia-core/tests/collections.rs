use cassia_core::{equals, MapHandle, RecordHandle, SeqHandle, SetHandle, Value};

fn ints(ns: &[i64]) -> Value {
    Value::seq(ns.iter().map(|n| Value::Int(*n)).collect())
}

#[test]
fn put_folds_structurally_equal_keys() {
    let map = MapHandle::new();
    map.put(ints(&[1, 2]), Value::str("x"));
    map.put(Value::str("other"), Value::str("z"));
    map.put(ints(&[1, 2]), Value::str("y"));
    assert_eq!(map.len(), 2);
    assert_eq!(map.get(&ints(&[1, 2])), Some(Value::str("y")));
    // Replacement keeps the pair's position.
    assert!(equals(&map.keys()[0], &ints(&[1, 2])));
    assert_eq!(map.values(), vec![Value::str("y"), Value::str("z")]);
}

#[test]
fn get_misses_return_none() {
    let map = MapHandle::new();
    map.put(Value::Int(1), Value::str("a"));
    assert_eq!(map.get(&Value::Int(2)), None);
    assert_eq!(map.get(&Value::Float(1.0)), None);
}

#[test]
fn remove_preserves_remaining_order() {
    let map = MapHandle::new();
    map.put(Value::Int(1), Value::str("a"));
    map.put(Value::Int(2), Value::str("b"));
    map.put(Value::Int(3), Value::str("c"));
    let removed = map.remove(&Value::Int(2));
    assert_eq!(removed, Some(Value::str("b")));
    assert_eq!(map.keys(), vec![Value::Int(1), Value::Int(3)]);
}

#[test]
fn remove_miss_is_a_noop() {
    let map = MapHandle::new();
    map.put(Value::Int(1), Value::str("a"));
    assert_eq!(map.remove(&Value::Int(9)), None);
    assert_eq!(map.len(), 1);
}

#[test]
fn from_pairs_collapses_to_last_written() {
    let map = MapHandle::from_pairs(vec![
        (ints(&[1]), Value::str("first")),
        (ints(&[1]), Value::str("second")),
    ]);
    assert_eq!(map.len(), 1);
    assert_eq!(map.get(&ints(&[1])), Some(Value::str("second")));
}

#[test]
fn from_flat_pairs_up_the_sequence() {
    let map = MapHandle::from_flat(vec![
        Value::str("a"),
        Value::Int(1),
        Value::str("b"),
        Value::Int(2),
        Value::str("a"),
        Value::Int(3),
    ]);
    assert_eq!(map.len(), 2);
    assert_eq!(map.get(&Value::str("a")), Some(Value::Int(3)));
    assert_eq!(map.get(&Value::str("b")), Some(Value::Int(2)));
}

#[test]
fn from_flat_odd_tail_pairs_with_nil() {
    let map = MapHandle::from_flat(vec![Value::str("a")]);
    assert_eq!(map.get(&Value::str("a")), Some(Value::Nil));
}

#[test]
fn set_push_dedups() {
    let set = SetHandle::new();
    assert!(set.push(ints(&[1, 2])));
    assert!(!set.push(ints(&[1, 2])));
    assert_eq!(set.len(), 1);
}

#[test]
fn set_from_items_collapses_duplicates() {
    let set = SetHandle::from_items(vec![
        Value::Int(1),
        Value::Int(2),
        Value::Int(1),
        Value::Int(3),
    ]);
    assert_eq!(
        set.items(),
        vec![Value::Int(1), Value::Int(2), Value::Int(3)]
    );
}

#[test]
fn concat_skips_duplicates_and_keeps_order() {
    let a = SetHandle::from_items(vec![Value::Int(1), Value::Int(2)]);
    let b = SetHandle::from_items(vec![Value::Int(2), Value::Int(3), Value::Int(3)]);
    let joined = a.concat(&b);
    assert_eq!(
        joined.items(),
        vec![Value::Int(1), Value::Int(2), Value::Int(3)]
    );
    assert_eq!(a.len(), 2, "receiver must not be mutated");
    assert_eq!(b.len(), 2, "argument must not be mutated");
}

#[test]
fn concat_result_is_independent_of_the_receiver() {
    let inner = RecordHandle::new();
    inner.insert("n", Value::Int(1));
    let a = SetHandle::from_items(vec![Value::Record(inner.clone())]);
    let joined = a.concat(&SetHandle::new());
    inner.insert("n", Value::Int(99));
    let copied = joined.items();
    let record = copied[0].as_record().expect("record element");
    assert_eq!(record.get("n"), Some(Value::Int(1)));
}

#[test]
fn record_handle_basics() {
    let record = RecordHandle::new();
    record.insert("b", Value::Int(2));
    record.insert("a", Value::Int(1));
    assert!(record.contains_key("a"));
    assert_eq!(record.get("b"), Some(Value::Int(2)));
    assert_eq!(record.keys(), vec!["a".to_string(), "b".to_string()]);
    assert_eq!(record.remove("a"), Some(Value::Int(1)));
    assert_eq!(record.len(), 1);
    assert_eq!(record.remove("missing"), None);
}

#[test]
fn seq_handle_mutation_helpers() {
    let seq = SeqHandle::from_items(vec![Value::Int(1), Value::Int(2)]);
    seq.set(0, Value::str("swapped"));
    seq.push(Value::Int(3));
    assert_eq!(seq.get(0), Some(Value::str("swapped")));
    assert_eq!(seq.get(9), None);
    assert_eq!(seq.len(), 3);
}
