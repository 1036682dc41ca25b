//! Numkit Plugin System
//!
//! Provides the pieces every function library plugs into:
//! - `FunctionPlugin`: a named, documented pure function over `Value`s
//! - `PluginRegistry`: case-insensitive lookup, help and catalog
//! - `EvalContext`: engine handle and formatting defaults for a call

mod context;
mod registry;
mod traits;

pub use context::EvalContext;
pub use registry::PluginRegistry;
pub use traits::{ArgMeta, FunctionMeta, FunctionPlugin};

/// Re-export core types for plugin authors
pub mod prelude {
    pub use crate::{ArgMeta, EvalContext, FunctionMeta, FunctionPlugin, PluginRegistry};
    pub use numkit_core::prelude::*;
    pub use numkit_engine::{Arith, Kernel};
}
