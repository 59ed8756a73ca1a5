pub mod assoc;
pub mod dynamic;
pub mod error;
pub mod guard;
pub mod sequence;
pub mod types;
pub mod value;
