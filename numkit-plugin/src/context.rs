//! Evaluation Context

use crate::PluginRegistry;
use numkit_core::{FormatOptions, NumkitError, Value};
use numkit_engine::{Arith, ComputeEngine};
use std::sync::Arc;

/// Evaluation context passed to plugins
#[derive(Clone)]
pub struct EvalContext {
    pub arith: Arith,
    pub registry: Arc<PluginRegistry>,
    pub format: FormatOptions,
}

impl EvalContext {
    /// Native engine, default formatting
    pub fn new(registry: Arc<PluginRegistry>) -> Self {
        Self {
            arith: Arith::native(),
            registry,
            format: FormatOptions::default(),
        }
    }

    pub fn with_engine(mut self, engine: Arc<dyn ComputeEngine>) -> Self {
        self.arith = Arith::new(engine);
        self
    }

    pub fn with_format(mut self, format: FormatOptions) -> Self {
        self.format = format;
        self
    }

    pub fn arith(&self) -> &Arith {
        &self.arith
    }

    /// Call another registered function with this context
    pub fn call(&self, name: &str, args: &[Value]) -> Result<Value, NumkitError> {
        self.registry.call_function(name, args, self)
    }
}

impl std::fmt::Debug for EvalContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvalContext")
            .field("arith", &self.arith)
            .field("functions", &self.registry.len())
            .field("format", &self.format)
            .finish()
    }
}
