use cassia_core::{
    difference, equals, index_of, intersect, render, subset, union, RecordHandle, SetHandle, Value,
};

fn ints(ns: &[i64]) -> Value {
    Value::seq(ns.iter().map(|n| Value::Int(*n)).collect())
}

fn set_of(ns: &[i64]) -> Value {
    Value::set(ns.iter().map(|n| Value::Int(*n)).collect())
}

#[test]
fn intersect_keeps_left_order_and_inputs() {
    let a = ints(&[1, 2, 3]);
    let b = ints(&[2, 3, 4]);
    let out = intersect(&a, &b);
    assert_eq!(render(&out), "[2, 3]");
    assert_eq!(render(&a), "[1, 2, 3]");
    assert_eq!(render(&b), "[2, 3, 4]");
}

#[test]
fn intersect_matches_structurally() {
    let a = Value::seq(vec![ints(&[1, 2]), ints(&[3])]);
    let b = Value::seq(vec![ints(&[1, 2])]);
    let out = intersect(&a, &b);
    assert_eq!(render(&out), "[[1, 2]]");
}

#[test]
fn intersect_on_sets_returns_a_set() {
    let out = intersect(&set_of(&[1, 2, 3]), &set_of(&[3, 1]));
    match &out {
        Value::Set(handle) => {
            assert_eq!(handle.items(), vec![Value::Int(1), Value::Int(3)]);
        }
        other => panic!("expected set result, got {}", other.type_name()),
    }
}

#[test]
fn intersect_emits_independent_clones() {
    let inner = RecordHandle::new();
    inner.insert("n", Value::Int(1));
    let a = Value::seq(vec![Value::Record(inner.clone())]);
    let b = Value::seq(vec![Value::record([("n", Value::Int(1))])]);
    let out = intersect(&a, &b);
    inner.insert("n", Value::Int(42));
    assert_eq!(render(&out), "[{n:1}]");
}

#[test]
fn subset_default_demands_a_proper_subset() {
    assert!(subset(&ints(&[1, 2]), &ints(&[1, 2, 3]), false));
    assert!(!subset(&ints(&[1, 2]), &ints(&[1, 2]), false));
    assert!(subset(&ints(&[1, 2]), &ints(&[1, 2]), true));
    assert!(!subset(&ints(&[1, 5]), &ints(&[1, 2, 3]), false));
}

#[test]
fn subset_ignores_element_order() {
    assert!(subset(&set_of(&[2, 1]), &set_of(&[1, 2, 3]), false));
    // Same members in a different stored order are still equal wholes.
    assert!(!subset(&set_of(&[2, 1]), &set_of(&[1, 2]), false));
    assert!(subset(&set_of(&[2, 1]), &set_of(&[1, 2]), true));
}

#[test]
fn union_concatenates_and_dedups_sets() {
    let out = union(&set_of(&[1, 2]), &set_of(&[2, 3]));
    match &out {
        Value::Set(handle) => {
            assert_eq!(
                handle.items(),
                vec![Value::Int(1), Value::Int(2), Value::Int(3)]
            );
        }
        other => panic!("expected set result, got {}", other.type_name()),
    }
    let seq_union = union(&ints(&[1, 2]), &ints(&[2]));
    assert_eq!(render(&seq_union), "[1, 2, 2]");
}

#[test]
fn difference_keeps_unmatched_left_elements() {
    let a = set_of(&[1, 2, 3]);
    let out = difference(&a, &set_of(&[2]));
    match &out {
        Value::Set(handle) => {
            assert_eq!(handle.items(), vec![Value::Int(1), Value::Int(3)]);
        }
        other => panic!("expected set result, got {}", other.type_name()),
    }
    assert!(equals(&a, &set_of(&[1, 2, 3])), "input must be unchanged");
}

#[test]
fn index_of_scans_structurally() {
    let items = vec![ints(&[1]), ints(&[2]), ints(&[2])];
    assert_eq!(index_of(&items, &ints(&[2])), Some(1));
    assert_eq!(index_of(&items, &ints(&[9])), None);
}

#[test]
fn non_collection_operands_contribute_no_elements() {
    let out = intersect(&Value::Int(1), &ints(&[1]));
    assert_eq!(render(&out), "[]");
    assert!(subset(&Value::Int(1), &ints(&[1]), true));
    let out = union(&Value::Nil, &ints(&[1, 2]));
    assert_eq!(render(&out), "[1, 2]");
}

#[test]
fn empty_collections_are_not_proper_subsets_of_themselves() {
    let a = Value::seq(Vec::new());
    let b = Value::seq(Vec::new());
    assert!(!subset(&a, &b, false));
    assert!(subset(&a, &b, true));
    let one = SetHandle::from_items(vec![Value::Int(1)]);
    assert!(subset(&Value::seq(Vec::new()), &Value::Set(one), false));
}
