//! Logarithm to an arbitrary base

use super::dispatch;
use crate::helpers::{extract_complex, require_args_between};
use numkit_core::{NumkitError, Value};
use numkit_engine::Kernel;
use numkit_plugin::{ArgMeta, EvalContext, FunctionMeta, FunctionPlugin};

pub struct Log;

static LOG_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("x", "Real | Complex", "Argument"),
    ArgMeta::optional("base", "Real | Complex", "Logarithm base", "10"),
];
static LOG_EXAMPLES: [&str; 3] = ["log(1000) → 3", "log(8, 2) → 3", "log(-8, 2) → 3+4.532360141827194i"];
static LOG_RELATED: [&str; 3] = ["ln", "log2", "log10"];

/// Dispatched one-argument kernel by name
fn dispatched(kernel: Kernel, arg: &Value, ctx: &EvalContext) -> Result<Value, NumkitError> {
    match dispatch::find(kernel) {
        Some(spec) => dispatch::apply(spec, arg, ctx),
        None => Err(NumkitError::unknown_function(kernel.entry_point())),
    }
}

/// Real quotient when both sides are real, complex division otherwise
fn quotient(num: Value, den: Value, ctx: &EvalContext) -> Result<Value, NumkitError> {
    match (&num, &den) {
        (Value::Real(a), Value::Real(b)) => Ok(Value::Real(a / b)),
        _ => {
            let a = extract_complex("log", 0, &num)?;
            let b = extract_complex("log", 1, &den)?;
            Ok(Value::Complex(ctx.arith().complex_div(&a, &b)?))
        }
    }
}

impl FunctionPlugin for Log {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "log",
            description: "Logarithm to a base (default 10); complex for negative or complex input",
            usage: "log(x, base?)",
            args: &LOG_ARGS,
            returns: "Real | Complex",
            examples: &LOG_EXAMPLES,
            category: "exponential",
            source: None,
            related: &LOG_RELATED,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Result<Value, NumkitError> {
        require_args_between("log", args, 1, 2)?;
        let x = &args[0];
        let base = match args.get(1) {
            None => return dispatched(Kernel::Log10, x, ctx),
            Some(b) => b,
        };
        match base.as_real() {
            Some(b) if b == 2.0 => dispatched(Kernel::Log2, x, ctx),
            Some(b) if b == 10.0 => dispatched(Kernel::Log10, x, ctx),
            _ => {
                let num = dispatched(Kernel::Ln, x, ctx)?;
                let den = dispatched(Kernel::Ln, base, ctx)?;
                quotient(num, den, ctx)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use numkit_core::{Complex, ErrorKind};
    use numkit_plugin::PluginRegistry;
    use std::sync::Arc;

    fn ctx() -> EvalContext {
        EvalContext::new(Arc::new(PluginRegistry::new()))
    }

    fn log(args: &[Value]) -> Result<Value, NumkitError> {
        Log.call(args, &ctx())
    }

    #[test]
    fn test_dedicated_bases() {
        assert_eq!(log(&[Value::Int(1000)]).unwrap(), Value::Real(3.0));
        assert_eq!(log(&[Value::Int(8), Value::Int(2)]).unwrap(), Value::Real(3.0));
        assert_eq!(log(&[Value::Int(100), Value::Real(10.0)]).unwrap(), Value::Real(2.0));
    }

    #[test]
    fn test_other_base_divides_logarithms() {
        let v = log(&[Value::Int(81), Value::Int(3)]).unwrap();
        assert!((v.as_real().unwrap() - 4.0).abs() < 1e-14);
    }

    #[test]
    fn test_negative_argument_goes_complex() {
        let v = log(&[Value::Int(-8), Value::Int(2)]).unwrap();
        let z = v.as_complex().expect("complex result");
        assert!((z.re - 3.0).abs() < 1e-12);
        assert!((z.im - std::f64::consts::PI / std::f64::consts::LN_2).abs() < 1e-12);

        let v = log(&[Value::Int(-1), Value::Real(std::f64::consts::E)]).unwrap();
        let z = v.as_complex().expect("complex result");
        assert!(z.re.abs() < 1e-12);
        assert!((z.im - std::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn test_complex_base() {
        let v = log(&[Value::Int(-1), Value::Complex(Complex::new(-1.0, 0.0))]).unwrap();
        let z = v.as_complex().unwrap();
        assert!((z.re - 1.0).abs() < 1e-12 && z.im.abs() < 1e-12);
    }

    #[test]
    fn test_arity() {
        let err = log(&[]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::ArityError);
    }
}
