//! Numkit Engine
//!
//! The compute engine boundary: a catalog of byte-buffer kernels, an
//! in-process implementation of that catalog, and the typed client that
//! marshals values across it.

mod engine;
mod error;
mod kernel;
pub mod native;
mod ops;

pub use engine::{ComputeEngine, EngineResult};
pub use error::EngineError;
pub use kernel::Kernel;
pub use native::NativeEngine;
pub use ops::{Arith, ArithResult};
