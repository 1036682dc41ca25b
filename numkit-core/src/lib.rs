//! Numkit Core - Fundamental types
//!
//! This crate provides the core types used throughout Numkit:
//! - `Rational`: Exact fractions with signed Infinity and NaN
//! - `Complex`: Pairs of binary64 floats
//! - `Value`: Tagged union of everything a function can take or return
//! - `wire`: Byte-buffer marshalling for the compute engine
//! - `NumkitError`: Structured errors

mod complex;
mod error;
mod literal;
mod rational;
mod value;
pub mod wire;

pub use complex::Complex;
pub use error::{codes, ErrorContext, ErrorKind, NumkitError};
pub use literal::{parse_complex, parse_rational, LiteralError};
pub use rational::{FormatOptions, Rational};
pub use value::{Value, ValueKind};
pub use wire::{ByteOrder, Marshal, WireError};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::codes;
    pub use crate::{Complex, FormatOptions, NumkitError, Rational, Value, ValueKind};
}
