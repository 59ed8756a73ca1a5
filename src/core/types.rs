// runtime type descriptors + shapes
use std::fmt;

/// Runtime-observed type of a dynamic value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDesc {
    Any,
    Bool,
    Int,
    Str,
    Seq(Box<TypeDesc>),
    Map(Box<TypeDesc>, Box<TypeDesc>),
    Ref(Box<TypeDesc>),
    Func,
}

impl TypeDesc {
    pub fn seq(elem: TypeDesc) -> Self {
        TypeDesc::Seq(Box::new(elem))
    }

    pub fn map(key: TypeDesc, value: TypeDesc) -> Self {
        TypeDesc::Map(Box::new(key), Box::new(value))
    }

    pub fn reference(target: TypeDesc) -> Self {
        TypeDesc::Ref(Box::new(target))
    }

    /// Whether a value of type `other` may be stored where `self` is declared.
    ///
    /// `Any` takes everything, every other type only itself.
    pub fn accepts(&self, other: &TypeDesc) -> bool {
        matches!(self, TypeDesc::Any) || self == other
    }

    //element type of a sequence descriptor
    pub fn elem(&self) -> Option<&TypeDesc> {
        match self {
            TypeDesc::Seq(elem) => Some(&**elem),
            _ => None,
        }
    }

    pub fn shape(&self) -> Option<Shape> {
        match self {
            TypeDesc::Seq(_) => Some(Shape::Sequence),
            TypeDesc::Map(_, _) => Some(Shape::Associative),
            TypeDesc::Ref(_) => Some(Shape::Reference),
            TypeDesc::Func => Some(Shape::Callable),
            _ => None,
        }
    }
}

impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDesc::Any => f.write_str("any"),
            TypeDesc::Bool => f.write_str("bool"),
            TypeDesc::Int => f.write_str("int"),
            TypeDesc::Str => f.write_str("str"),
            TypeDesc::Seq(elem) => write!(f, "[{elem}]"),
            TypeDesc::Map(k, v) => write!(f, "{{{k}: {v}}}"),
            TypeDesc::Ref(target) => write!(f, "&{target}"),
            TypeDesc::Func => f.write_str("fn"),
        }
    }
}

/// Container-level classification reported by the type guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Reference,
    Callable,
    Sequence,
    Associative,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Reference => f.write_str("a reference"),
            Shape::Callable => f.write_str("a callable"),
            Shape::Sequence => f.write_str("a sequence"),
            Shape::Associative => f.write_str("an associative container"),
        }
    }
}
