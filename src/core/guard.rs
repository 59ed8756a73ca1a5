// runtime shape predicates
use crate::core::types::Shape;
use crate::core::value::Value;

//classify a value, None for scalars
pub fn shape(value: &Value) -> Option<Shape> {
    match value {
        Value::Ref(_) => Some(Shape::Reference),
        Value::Func(_) => Some(Shape::Callable),
        Value::Seq(_) => Some(Shape::Sequence),
        Value::Map(_) => Some(Shape::Associative),
        Value::Bool(_) | Value::Int(_) | Value::Str(_) => None,
    }
}

pub fn is_reference(value: &Value) -> bool {
    shape(value) == Some(Shape::Reference)
}

pub fn is_callable(value: &Value) -> bool {
    shape(value) == Some(Shape::Callable)
}

pub fn is_sequence(value: &Value) -> bool {
    shape(value) == Some(Shape::Sequence)
}

pub fn is_associative(value: &Value) -> bool {
    shape(value) == Some(Shape::Associative)
}
