// error types
use std::fmt;

use thiserror::Error;

use crate::core::types::{Shape, TypeDesc};

/// What an argument should have been.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expected {
    Shape(Shape),
    //a reference whose referent has this shape
    Reference(Shape),
    Type(TypeDesc),
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Shape(shape) => write!(f, "{shape}"),
            Expected::Reference(shape) => write!(f, "a reference to {shape}"),
            Expected::Type(ty) => write!(f, "a value assignable to `{ty}`"),
        }
    }
}

/// An argument failed the runtime shape or type check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("argument `{argument}` has type `{found}`, expected {expected}")]
pub struct TypeMismatch {
    pub argument: String,
    pub expected: Expected,
    pub found: TypeDesc,
}

impl TypeMismatch {
    pub fn shape(argument: impl Into<String>, expected: Shape, found: TypeDesc) -> Self {
        Self { argument: argument.into(), expected: Expected::Shape(expected), found }
    }

    pub fn reference(argument: impl Into<String>, expected: Shape, found: TypeDesc) -> Self {
        Self { argument: argument.into(), expected: Expected::Reference(expected), found }
    }

    pub fn ty(argument: impl Into<String>, expected: TypeDesc, found: TypeDesc) -> Self {
        Self { argument: argument.into(), expected: Expected::Type(expected), found }
    }
}

#[derive(Debug, Error)]
pub enum EncodingError {
    #[error("json encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("toon encoding failed: {0}")]
    Toon(#[source] Box<dyn std::error::Error + Send + Sync>),
}
