use std::cell::{Ref, RefCell};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::deep;
use crate::equality::equals;
use crate::render::render;

/// A value of the host language. Primitives carry their content directly;
/// compound kinds are shared handles, so copying a `Value` copies a
/// reference, not the structure. Use [`crate::clone_value`] for a deep copy.
#[derive(Clone)]
pub enum Value {
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Rc<str>),
    Seq(SeqHandle),
    Record(RecordHandle),
    Map(MapHandle),
    Set(SetHandle),
}

impl Value {
    pub fn str(s: impl Into<Rc<str>>) -> Self {
        Value::Str(s.into())
    }

    pub fn int(n: i64) -> Self {
        Value::Int(n)
    }

    pub fn float(n: f64) -> Self {
        Value::Float(n)
    }

    pub fn seq(items: Vec<Value>) -> Self {
        Value::Seq(SeqHandle::from_items(items))
    }

    pub fn record<K, I>(fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let handle = RecordHandle::new();
        for (key, value) in fields {
            handle.insert(key, value);
        }
        Value::Record(handle)
    }

    pub fn map(pairs: Vec<(Value, Value)>) -> Self {
        Value::Map(MapHandle::from_pairs(pairs))
    }

    pub fn set(items: Vec<Value>) -> Self {
        Value::Set(SetHandle::from_items(items))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Seq(_) => "seq",
            Value::Record(_) => "record",
            Value::Map(_) => "map",
            Value::Set(_) => "set",
        }
    }

    pub fn is_compound(&self) -> bool {
        matches!(
            self,
            Value::Seq(_) | Value::Record(_) | Value::Map(_) | Value::Set(_)
        )
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_seq(&self) -> Option<&SeqHandle> {
        match self {
            Value::Seq(h) => Some(h),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&RecordHandle> {
        match self {
            Value::Record(h) => Some(h),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&MapHandle> {
        match self {
            Value::Map(h) => Some(h),
            _ => None,
        }
    }

    pub fn as_set(&self) -> Option<&SetHandle> {
        match self {
            Value::Set(h) => Some(h),
            _ => None,
        }
    }

    // Allocation address of the backing cell; primitives have no identity.
    pub(crate) fn identity(&self) -> Option<usize> {
        match self {
            Value::Seq(h) => Some(h.identity()),
            Value::Record(h) => Some(h.identity()),
            Value::Map(h) => Some(h.identity()),
            Value::Set(h) => Some(h.identity()),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        equals(self, other)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self))
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(Rc::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(Rc::from(s))
    }
}

/// Ordered list of values. The engine never mutates a Seq on its own; the
/// mutation helpers exist for hosts that update storage in place.
#[derive(Clone)]
pub struct SeqHandle(Rc<RefCell<Vec<Value>>>);

impl SeqHandle {
    pub fn new() -> Self {
        Self(Rc::new(RefCell::new(Vec::new())))
    }

    pub fn from_items(items: Vec<Value>) -> Self {
        Self(Rc::new(RefCell::new(items)))
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.borrow().get(index).cloned()
    }

    pub fn set(&self, index: usize, value: Value) {
        if let Some(slot) = self.0.borrow_mut().get_mut(index) {
            *slot = value;
        }
    }

    pub fn push(&self, value: Value) {
        self.0.borrow_mut().push(value);
    }

    pub fn items(&self) -> Vec<Value> {
        self.0.borrow().clone()
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn identity(&self) -> usize {
        Rc::as_ptr(&self.0) as usize
    }

    pub(crate) fn borrow(&self) -> Ref<'_, Vec<Value>> {
        self.0.borrow()
    }
}

impl Default for SeqHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SeqHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&Value::Seq(self.clone()), f)
    }
}

/// String-keyed bag of values. Key order carries no meaning; iteration is
/// sorted by key.
#[derive(Clone)]
pub struct RecordHandle(Rc<RefCell<BTreeMap<String, Value>>>);

impl RecordHandle {
    pub fn new() -> Self {
        Self(Rc::new(RefCell::new(BTreeMap::new())))
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.0.borrow().get(key).cloned()
    }

    pub fn insert(&self, key: impl Into<String>, value: Value) {
        self.0.borrow_mut().insert(key.into(), value);
    }

    pub fn remove(&self, key: &str) -> Option<Value> {
        self.0.borrow_mut().remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.borrow().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn keys(&self) -> Vec<String> {
        self.0.borrow().keys().cloned().collect()
    }

    pub fn fields(&self) -> Vec<(String, Value)> {
        self.0
            .borrow()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn identity(&self) -> usize {
        Rc::as_ptr(&self.0) as usize
    }

    pub(crate) fn borrow(&self) -> Ref<'_, BTreeMap<String, Value>> {
        self.0.borrow()
    }
}

impl Default for RecordHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RecordHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&Value::Record(self.clone()), f)
    }
}

/// Insertion-ordered map keyed by structural equality. Lookups are linear
/// scans through the entry list; no two keys are ever structurally equal.
#[derive(Clone)]
pub struct MapHandle(Rc<RefCell<Vec<(Value, Value)>>>);

impl MapHandle {
    pub fn new() -> Self {
        Self(Rc::new(RefCell::new(Vec::new())))
    }

    /// Duplicate keys collapse to the last-written value.
    pub fn from_pairs(pairs: Vec<(Value, Value)>) -> Self {
        let handle = Self::new();
        for (key, value) in pairs {
            handle.put(key, value);
        }
        handle
    }

    /// Builds from a flattened key/value sequence; an odd trailing key is
    /// paired with Nil.
    pub fn from_flat(items: Vec<Value>) -> Self {
        let handle = Self::new();
        let mut iter = items.into_iter();
        while let Some(key) = iter.next() {
            let value = iter.next().unwrap_or(Value::Nil);
            handle.put(key, value);
        }
        handle
    }

    pub fn put(&self, key: Value, value: Value) {
        let index = self.position(&key);
        match index {
            Some(i) => self.0.borrow_mut()[i].1 = value,
            None => self.0.borrow_mut().push((key, value)),
        }
    }

    pub fn get(&self, key: &Value) -> Option<Value> {
        let entries = self.0.borrow();
        entries
            .iter()
            .find(|(k, _)| equals(k, key))
            .map(|(_, v)| v.clone())
    }

    pub fn remove(&self, key: &Value) -> Option<Value> {
        let index = self.position(key)?;
        let (_, value) = self.0.borrow_mut().remove(index);
        Some(value)
    }

    pub fn contains_key(&self, key: &Value) -> bool {
        self.position(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn keys(&self) -> Vec<Value> {
        self.0.borrow().iter().map(|(k, _)| k.clone()).collect()
    }

    pub fn values(&self) -> Vec<Value> {
        self.0.borrow().iter().map(|(_, v)| v.clone()).collect()
    }

    pub fn entries(&self) -> Vec<(Value, Value)> {
        self.0.borrow().clone()
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    fn position(&self, key: &Value) -> Option<usize> {
        let entries = self.0.borrow();
        entries.iter().position(|(k, _)| equals(k, key))
    }

    // Appends without the key scan; callers must uphold key uniqueness.
    pub(crate) fn push_entry(&self, key: Value, value: Value) {
        self.0.borrow_mut().push((key, value));
    }

    pub(crate) fn identity(&self) -> usize {
        Rc::as_ptr(&self.0) as usize
    }

    pub(crate) fn borrow(&self) -> Ref<'_, Vec<(Value, Value)>> {
        self.0.borrow()
    }
}

impl Default for MapHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MapHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&Value::Map(self.clone()), f)
    }
}

/// Insertion-ordered set deduplicated by structural equality.
#[derive(Clone)]
pub struct SetHandle(Rc<RefCell<Vec<Value>>>);

impl SetHandle {
    pub fn new() -> Self {
        Self(Rc::new(RefCell::new(Vec::new())))
    }

    /// Duplicates collapse to the first occurrence.
    pub fn from_items(items: Vec<Value>) -> Self {
        let handle = Self::new();
        for item in items {
            handle.push(item);
        }
        handle
    }

    /// Appends unless a structurally equal element is already present.
    /// Returns whether the element was inserted.
    pub fn push(&self, value: Value) -> bool {
        if self.contains(&value) {
            return false;
        }
        self.0.borrow_mut().push(value);
        true
    }

    pub fn contains(&self, value: &Value) -> bool {
        let items = self.0.borrow();
        items.iter().any(|item| equals(item, value))
    }

    /// New set: a deep clone of the receiver with every element of `other`
    /// pushed in order. Neither input is mutated.
    pub fn concat(&self, other: &SetHandle) -> SetHandle {
        let out = deep::clone_set(self);
        for item in other.items() {
            out.push(item);
        }
        out
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn items(&self) -> Vec<Value> {
        self.0.borrow().clone()
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn identity(&self) -> usize {
        Rc::as_ptr(&self.0) as usize
    }

    pub(crate) fn borrow(&self) -> Ref<'_, Vec<Value>> {
        self.0.borrow()
    }
}

impl Default for SetHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SetHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&Value::Set(self.clone()), f)
    }
}
