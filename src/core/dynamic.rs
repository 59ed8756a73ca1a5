// runtime-checked entry points over Value
//
// Every function validates all of its arguments before touching a
// destination; the algorithms themselves live in `sequence` and `assoc`.
use crate::config::AppendPolicy;
use crate::core::assoc;
use crate::core::error::TypeMismatch;
use crate::core::sequence;
use crate::core::types::{Shape, TypeDesc};
use crate::core::value::{Mapping, Sequence, Slot, Value};

//validation helpers
fn expect_seq<'a>(argument: &str, value: &'a Value) -> Result<&'a Sequence, TypeMismatch> {
    value
        .as_seq()
        .ok_or_else(|| TypeMismatch::shape(argument, Shape::Sequence, value.type_desc()))
}

fn expect_map<'a>(argument: &str, value: &'a Value) -> Result<&'a Mapping, TypeMismatch> {
    value
        .as_map()
        .ok_or_else(|| TypeMismatch::shape(argument, Shape::Associative, value.type_desc()))
}

//returns the slot and the element type its sequence is declared with
fn expect_seq_slot<'a>(argument: &str, value: &'a Value) -> Result<(&'a Slot, TypeDesc), TypeMismatch> {
    let slot = value
        .as_slot()
        .ok_or_else(|| TypeMismatch::reference(argument, Shape::Sequence, value.type_desc()))?;

    match slot.declared().elem() {
        Some(elem) => Ok((slot, elem.clone())),
        None => Err(TypeMismatch::reference(argument, Shape::Sequence, value.type_desc())),
    }
}

//destination element type must take values of `produced`
fn expect_writable(
    argument: &str,
    destination: &Value,
    dest_elem: &TypeDesc,
    produced: &TypeDesc,
) -> Result<(), TypeMismatch> {
    if !dest_elem.accepts(produced) {
        return Err(TypeMismatch::ty(
            argument,
            TypeDesc::reference(TypeDesc::seq(produced.clone())),
            destination.type_desc(),
        ));
    }
    Ok(())
}

fn check_element(elem: &TypeDesc, index: usize, value: &Value) -> Result<Value, TypeMismatch> {
    let found = value.type_desc();
    if !elem.accepts(&found) {
        return Err(TypeMismatch::ty(format!("elements[{index}]"), elem.clone(), found));
    }
    Ok(value.clone())
}

/// Writes the distinct elements of `source` into the sequence behind `destination`.
pub fn unique(source: &Value, destination: &Value) -> Result<(), TypeMismatch> {
    let src = expect_seq("source", source)?;
    let (slot, elem) = expect_seq_slot("destination", destination)?;
    expect_writable("destination", destination, &elem, src.elem())?;

    let items = sequence::unique(src.items());
    slot.write(Value::Seq(Sequence::from_checked(elem, items)));
    Ok(())
}

/// Order-insensitive comparison; both sequences must share an element type.
///
/// Differing lengths give `Ok(false)`. Occurrence counts are not compared.
pub fn slice_equal(a: &Value, b: &Value) -> Result<bool, TypeMismatch> {
    let a = expect_seq("a", a)?;
    let b_seq = expect_seq("b", b)?;

    if a.elem() != b_seq.elem() {
        return Err(TypeMismatch::ty("b", a.type_desc(), b.type_desc()));
    }

    Ok(sequence::slice_equal(a.items(), b_seq.items()))
}

/// Membership by value equality.
///
/// The element only has to be accepted by the sequence's element type, so an
/// `[any]` sequence takes an element of any type rather than failing.
pub fn includes(source: &Value, element: &Value) -> Result<bool, TypeMismatch> {
    let src = expect_seq("source", source)?;

    let found = element.type_desc();
    if !src.elem().accepts(&found) {
        return Err(TypeMismatch::ty("element", src.elem().clone(), found));
    }

    Ok(sequence::includes(src.items(), element))
}

/// `append_uniq_with` under the default `AppendPolicy::Atomic`.
pub fn append_uniq(destination: &Value, elements: &[Value]) -> Result<(), TypeMismatch> {
    append_uniq_with(destination, elements, AppendPolicy::default())
}

/// Appends each element of `elements` not already in the sequence behind
/// `destination`, collapsing repeats within `elements`.
///
/// With `AppendPolicy::Atomic` a bad element leaves the destination as it
/// was. With `AppendPolicy::Partial` the elements before it stay appended.
pub fn append_uniq_with(
    destination: &Value,
    elements: &[Value],
    policy: AppendPolicy,
) -> Result<(), TypeMismatch> {
    let (slot, elem) = expect_seq_slot("destination", destination)?;

    let mut items = slot.with(|v| v.as_seq().map(|s| s.items().to_vec())).unwrap_or_default();
    let checked = elements.iter().enumerate().map(|(i, e)| check_element(&elem, i, e));

    match policy {
        AppendPolicy::Atomic => {
            let valid = checked.collect::<Result<Vec<_>, _>>()?;
            sequence::append_uniq(&mut items, valid);
        }
        AppendPolicy::Partial => {
            for e in checked {
                match e {
                    Ok(v) => sequence::append_uniq(&mut items, [v]),
                    Err(err) => {
                        slot.write(Value::Seq(Sequence::from_checked(elem.clone(), items)));
                        return Err(err);
                    }
                }
            }
        }
    }

    slot.write(Value::Seq(Sequence::from_checked(elem, items)));
    Ok(())
}

/// Writes the elements common to `a` and `b`, each once, into `destination`.
pub fn intersect(a: &Value, b: &Value, destination: &Value) -> Result<(), TypeMismatch> {
    let a_seq = expect_seq("a", a)?;
    let b_seq = expect_seq("b", b)?;

    if a_seq.elem() != b_seq.elem() {
        return Err(TypeMismatch::ty("b", a.type_desc(), b.type_desc()));
    }

    let (slot, elem) = expect_seq_slot("destination", destination)?;
    expect_writable("destination", destination, &elem, a_seq.elem())?;

    let items = sequence::intersect(a_seq.items(), b_seq.items());
    slot.write(Value::Seq(Sequence::from_checked(elem, items)));
    Ok(())
}

pub fn map_keys(source: &Value, destination: &Value) -> Result<(), TypeMismatch> {
    let map = expect_map("source", source)?;
    let (slot, elem) = expect_seq_slot("destination", destination)?;
    expect_writable("destination", destination, &elem, map.key_type())?;

    slot.write(Value::Seq(Sequence::from_checked(elem, assoc::map_keys(map))));
    Ok(())
}

pub fn map_values(source: &Value, destination: &Value) -> Result<(), TypeMismatch> {
    let map = expect_map("source", source)?;
    let (slot, elem) = expect_seq_slot("destination", destination)?;
    expect_writable("destination", destination, &elem, map.value_type())?;

    slot.write(Value::Seq(Sequence::from_checked(elem, assoc::map_values(map))));
    Ok(())
}
