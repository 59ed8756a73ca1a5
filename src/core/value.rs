// dynamic values: sequences, mappings, slots, callables
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use crate::core::error::TypeMismatch;
use crate::core::types::TypeDesc;

/// A value whose type is only known at runtime.
///
/// Scalars and containers compare by value. `Ref` and `Func` compare by
/// identity, like pointers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Str(String),
    Seq(Sequence),
    Map(Mapping),
    Ref(Slot),
    Func(Callable),
}

impl Value {
    pub fn type_desc(&self) -> TypeDesc {
        match self {
            Value::Bool(_) => TypeDesc::Bool,
            Value::Int(_) => TypeDesc::Int,
            Value::Str(_) => TypeDesc::Str,
            Value::Seq(seq) => seq.type_desc(),
            Value::Map(map) => map.type_desc(),
            Value::Ref(slot) => TypeDesc::reference(slot.declared().clone()),
            Value::Func(_) => TypeDesc::Func,
        }
    }

    /// Wraps `value` in a fresh slot and returns a reference to it.
    pub fn reference(value: impl Into<Value>) -> Self {
        Value::Ref(Slot::new(value))
    }

    pub fn func(f: impl Fn(&[Value]) -> Value + 'static) -> Self {
        Value::Func(Callable::new(f))
    }

    pub fn as_seq(&self) -> Option<&Sequence> {
        match self {
            Value::Seq(seq) => Some(seq),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Mapping> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_slot(&self) -> Option<&Slot> {
        match self {
            Value::Ref(slot) => Some(slot),
            _ => None,
        }
    }
}

/// An ordered, homogeneous run of values with a declared element type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sequence {
    elem: TypeDesc,
    items: Vec<Value>,
}

impl Sequence {
    /// Fails on the first item the element type does not accept.
    pub fn new(elem: TypeDesc, items: Vec<Value>) -> Result<Self, TypeMismatch> {
        for (i, item) in items.iter().enumerate() {
            let found = item.type_desc();
            if !elem.accepts(&found) {
                return Err(TypeMismatch::ty(format!("items[{i}]"), elem, found));
            }
        }
        Ok(Self { elem, items })
    }

    pub fn empty(elem: TypeDesc) -> Self {
        Self { elem, items: Vec::new() }
    }

    //caller guarantees every item is accepted by elem
    pub(crate) fn from_checked(elem: TypeDesc, items: Vec<Value>) -> Self {
        Self { elem, items }
    }

    pub fn elem(&self) -> &TypeDesc {
        &self.elem
    }

    pub fn items(&self) -> &[Value] {
        &self.items
    }

    pub fn into_items(self) -> Vec<Value> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn type_desc(&self) -> TypeDesc {
        TypeDesc::seq(self.elem.clone())
    }
}

/// An unordered key -> value container with declared key and value types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapping {
    key: TypeDesc,
    value: TypeDesc,
    entries: HashMap<Value, Value>,
}

impl Mapping {
    /// Validates every key and value. A repeated key keeps the last value.
    pub fn new(
        key: TypeDesc,
        value: TypeDesc,
        entries: impl IntoIterator<Item = (Value, Value)>,
    ) -> Result<Self, TypeMismatch> {
        let mut map = HashMap::new();
        for (i, (k, v)) in entries.into_iter().enumerate() {
            let found = k.type_desc();
            if !key.accepts(&found) {
                return Err(TypeMismatch::ty(format!("keys[{i}]"), key, found));
            }
            let found = v.type_desc();
            if !value.accepts(&found) {
                return Err(TypeMismatch::ty(format!("values[{i}]"), value, found));
            }
            map.insert(k, v);
        }
        Ok(Self { key, value, entries: map })
    }

    pub fn empty(key: TypeDesc, value: TypeDesc) -> Self {
        Self { key, value, entries: HashMap::new() }
    }

    pub fn key_type(&self) -> &TypeDesc {
        &self.key
    }

    pub fn value_type(&self) -> &TypeDesc {
        &self.value
    }

    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> + '_ {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn type_desc(&self) -> TypeDesc {
        TypeDesc::map(self.key.clone(), self.value.clone())
    }
}

impl Hash for Mapping {
    //entries are unordered, so only the parts equal mappings always share
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
        self.value.hash(state);
        self.entries.len().hash(state);
    }
}

/// A caller-owned writable location.
///
/// The declared type is fixed when the slot is created; writes must match it.
/// Clones share the same location.
#[derive(Clone)]
pub struct Slot {
    cell: Rc<RefCell<Value>>,
    declared: TypeDesc,
}

impl Slot {
    pub fn new(value: impl Into<Value>) -> Self {
        let value = value.into();
        let declared = value.type_desc();
        Self { cell: Rc::new(RefCell::new(value)), declared }
    }

    pub fn declared(&self) -> &TypeDesc {
        &self.declared
    }

    pub fn get(&self) -> Value {
        self.cell.borrow().clone()
    }

    pub fn set(&self, value: impl Into<Value>) -> Result<(), TypeMismatch> {
        let value = value.into();
        let found = value.type_desc();
        if !self.declared.accepts(&found) {
            return Err(TypeMismatch::ty("value", self.declared.clone(), found));
        }
        self.cell.replace(value);
        Ok(())
    }

    pub(crate) fn with<R>(&self, f: impl FnOnce(&Value) -> R) -> R {
        f(&self.cell.borrow())
    }

    /// Like `with`, but `None` when this slot is already being visited further
    /// up the stack, i.e. the value reaches itself through references.
    pub(crate) fn visit<R>(&self, f: impl FnOnce(&Value) -> R) -> Option<R> {
        let _guard = VisitGuard::enter(self.addr())?;
        Some(self.with(f))
    }

    //caller has already checked the value against `declared`
    pub(crate) fn write(&self, value: Value) {
        self.cell.replace(value);
    }

    fn addr(&self) -> *const () {
        Rc::as_ptr(&self.cell).cast()
    }
}

thread_local! {
    static VISITING: RefCell<HashSet<*const ()>> = RefCell::new(HashSet::new());
}

//marks a slot as on the current visit path until dropped
struct VisitGuard(*const ());

impl VisitGuard {
    fn enter(addr: *const ()) -> Option<Self> {
        VISITING.with(|v| v.borrow_mut().insert(addr)).then(|| VisitGuard(addr))
    }
}

impl Drop for VisitGuard {
    fn drop(&mut self) {
        VISITING.with(|v| v.borrow_mut().remove(&self.0));
    }
}

impl PartialEq for Slot {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.cell, &other.cell)
    }
}

impl Eq for Slot {}

impl Hash for Slot {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr().hash(state);
    }
}

impl fmt::Debug for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(_guard) = VisitGuard::enter(self.addr()) else {
            return f.debug_tuple("Slot").field(&format_args!("<cycle>")).finish();
        };
        match self.cell.try_borrow() {
            Ok(v) => f.debug_tuple("Slot").field(&*v).finish(),
            Err(_) => f.debug_tuple("Slot").field(&format_args!("<borrowed>")).finish(),
        }
    }
}

/// A function value. Compared and hashed by identity.
#[derive(Clone)]
pub struct Callable(Rc<dyn Fn(&[Value]) -> Value>);

impl Callable {
    pub fn new(f: impl Fn(&[Value]) -> Value + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self, args: &[Value]) -> Value {
        (self.0)(args)
    }

    fn addr(&self) -> *const () {
        Rc::as_ptr(&self.0).cast()
    }
}

impl PartialEq for Callable {
    fn eq(&self, other: &Self) -> bool {
        self.addr() == other.addr()
    }
}

impl Eq for Callable {}

impl Hash for Callable {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr().hash(state);
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callable({:p})", self.addr())
    }
}

/// Rust types with a fixed dynamic counterpart.
pub trait Scalar: Into<Value> {
    fn type_desc() -> TypeDesc;
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_owned())
    }
}

impl Scalar for bool {
    fn type_desc() -> TypeDesc {
        TypeDesc::Bool
    }
}

impl Scalar for i64 {
    fn type_desc() -> TypeDesc {
        TypeDesc::Int
    }
}

impl Scalar for i32 {
    fn type_desc() -> TypeDesc {
        TypeDesc::Int
    }
}

impl Scalar for String {
    fn type_desc() -> TypeDesc {
        TypeDesc::Str
    }
}

impl Scalar for &str {
    fn type_desc() -> TypeDesc {
        TypeDesc::Str
    }
}

impl<T: Scalar> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        let items = items.into_iter().map(Into::into).collect();
        Value::Seq(Sequence::from_checked(T::type_desc(), items))
    }
}

impl<K: Scalar, V: Scalar, S> From<HashMap<K, V, S>> for Value {
    fn from(map: HashMap<K, V, S>) -> Self {
        let entries = map.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        Value::Map(Mapping { key: K::type_desc(), value: V::type_desc(), entries })
    }
}

impl From<Sequence> for Value {
    fn from(v: Sequence) -> Self {
        Value::Seq(v)
    }
}

impl From<Mapping> for Value {
    fn from(v: Mapping) -> Self {
        Value::Map(v)
    }
}

impl From<Slot> for Value {
    fn from(v: Slot) -> Self {
        Value::Ref(v)
    }
}

impl From<Callable> for Value {
    fn from(v: Callable) -> Self {
        Value::Func(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_conversion_carries_element_type_even_when_empty() {
        let v = Value::from(Vec::<String>::new());
        assert_eq!(v.type_desc(), TypeDesc::seq(TypeDesc::Str));

        let v = Value::from(vec![1i64, 2, 3]);
        assert_eq!(v.type_desc(), TypeDesc::seq(TypeDesc::Int));
        assert_eq!(v.as_seq().unwrap().len(), 3);
    }

    #[test]
    fn sequence_new_rejects_heterogeneous_items() {
        let err = Sequence::new(TypeDesc::Str, vec!["a".into(), Value::Int(1)]).unwrap_err();
        assert_eq!(err.argument, "items[1]");
        assert_eq!(err.found, TypeDesc::Int);

        //any takes a mix
        let seq = Sequence::new(TypeDesc::Any, vec!["a".into(), Value::Int(1)]).unwrap();
        assert_eq!(seq.len(), 2);
    }

    #[test]
    fn mapping_new_validates_keys_and_values() {
        let err = Mapping::new(TypeDesc::Str, TypeDesc::Int, [(Value::Int(1), Value::Int(2))])
            .unwrap_err();
        assert_eq!(err.argument, "keys[0]");

        let err = Mapping::new(TypeDesc::Str, TypeDesc::Int, [(Value::from("a"), Value::Bool(true))])
            .unwrap_err();
        assert_eq!(err.argument, "values[0]");

        let m = Mapping::new(
            TypeDesc::Str,
            TypeDesc::Any,
            [
                (Value::from("a"), Value::Int(3)),
                (Value::from("b"), Value::Bool(false)),
                (Value::from("a"), Value::Int(4)),
            ],
        )
        .unwrap();
        assert_eq!(m.len(), 2);
        assert_eq!(m.get(&Value::from("a")), Some(&Value::Int(4)));
    }

    #[test]
    fn slot_set_checks_declared_type() {
        let slot = Slot::new(Vec::<i64>::new());
        assert_eq!(slot.declared(), &TypeDesc::seq(TypeDesc::Int));

        assert!(slot.set(vec!["a"]).is_err());
        assert_eq!(slot.get(), Value::from(Vec::<i64>::new()));

        slot.set(vec![7i64]).unwrap();
        assert_eq!(slot.get(), Value::from(vec![7i64]));
    }

    #[test]
    fn refs_and_funcs_compare_by_identity() {
        let a = Slot::new(1i64);
        let b = Slot::new(1i64);
        assert_eq!(Value::Ref(a.clone()), Value::Ref(a.clone()));
        assert_ne!(Value::Ref(a), Value::Ref(b));

        let f = Callable::new(|args| Value::Int(args.len() as i64));
        let g = Callable::new(|args| Value::Int(args.len() as i64));
        assert_eq!(f, f.clone());
        assert_ne!(f, g);
        assert_eq!(f.call(&[Value::Bool(true)]), Value::Int(1));
    }

    #[test]
    fn debug_of_self_referencing_slot_stops_at_cycle() {
        let slot = Slot::new(Sequence::empty(TypeDesc::Any));
        slot.write(Value::Seq(Sequence::from_checked(TypeDesc::Any, vec![Value::Ref(slot.clone())])));

        let out = format!("{slot:?}");
        assert!(out.contains("<cycle>"));

        //the visit set is cleared afterwards, siblings still print in full
        let other = Slot::new(vec![1i64]);
        let out = format!("{:?}", Value::from(Sequence::from_checked(
            TypeDesc::reference(TypeDesc::seq(TypeDesc::Int)),
            vec![Value::Ref(other.clone()), Value::Ref(other)],
        )));
        assert!(!out.contains("<cycle>"));

        //break the cycle so the Rc is freed
        slot.write(Value::Seq(Sequence::empty(TypeDesc::Any)));
    }

    #[test]
    fn ref_type_wraps_declared_type() {
        let r = Value::reference(vec!["x"]);
        assert_eq!(r.type_desc(), TypeDesc::reference(TypeDesc::seq(TypeDesc::Str)));
    }
}
