//! Set-like helpers over sequences and associative containers.
//!
//! Two surfaces share the same algorithms:
//!
//! - [`sequence`] and [`assoc`] are generic over element types and checked by
//!   the compiler. They return their results by value.
//! - [`dynamic`] works on runtime-typed [`Value`]s, validates every argument
//!   up front and writes results through a [`Slot`], failing with
//!   [`TypeMismatch`] when shapes or element types do not line up.
//!
//! [`encoding`] turns any `serde::Serialize` value, dynamic values included,
//! into compact or indented JSON, or TOON.

pub mod config;
pub mod core;
pub mod encoding;

pub use crate::config::{AppendPolicy, EncodingConfig};
pub use crate::core::error::{EncodingError, Expected, TypeMismatch};
pub use crate::core::guard::{is_associative, is_callable, is_reference, is_sequence, shape};
pub use crate::core::types::{Shape, TypeDesc};
pub use crate::core::value::{Callable, Mapping, Scalar, Sequence, Slot, Value};
pub use crate::core::{assoc, dynamic, sequence};
pub use crate::encoding::{encode_compact, encode_pretty, encode_pretty_with, encode_toon};
