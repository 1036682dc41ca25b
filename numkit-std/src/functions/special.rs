//! Two-argument special functions

use crate::helpers::{extract_complex, extract_real, require_args};
use numkit_core::{NumkitError, Value};
use numkit_engine::Kernel;
use numkit_plugin::{ArgMeta, EvalContext, FunctionMeta, FunctionPlugin};

pub struct Beta;
pub struct BesselJ;
pub struct BesselY;

static BETA_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("a", "Real | Complex", "First parameter"),
    ArgMeta::required("b", "Real | Complex", "Second parameter"),
];
static BETA_EXAMPLES: [&str; 2] = ["beta(2, 3) → 0.08333333333333333", "beta(1+i, 2)"];
static BETA_RELATED: [&str; 1] = ["gamma"];

static BESSEL_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("n", "Int", "Integer order"),
    ArgMeta::required("x", "Real", "Argument"),
];
static BESSEL_J_EXAMPLES: [&str; 2] = ["bessel_j(0, 1) → 0.7651976865579666", "bessel_j(2, 5)"];
static BESSEL_Y_EXAMPLES: [&str; 2] = ["bessel_y(0, 1) → 0.08825696421567697", "bessel_y(2, 5)"];
static BESSEL_J_RELATED: [&str; 1] = ["bessel_y"];
static BESSEL_Y_RELATED: [&str; 1] = ["bessel_j"];

impl FunctionPlugin for Beta {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "beta",
            description: "Beta function B(a, b) = Γ(a)Γ(b)/Γ(a+b)",
            usage: "beta(a, b)",
            args: &BETA_ARGS,
            returns: "Real | Complex",
            examples: &BETA_EXAMPLES,
            category: "special",
            source: None,
            related: &BETA_RELATED,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Result<Value, NumkitError> {
        require_args("beta", args, 2)?;
        let complex_input = args.iter().any(|a| matches!(a, Value::Complex(_)));
        if complex_input {
            let a = extract_complex("beta", 0, &args[0])?;
            let b = extract_complex("beta", 1, &args[1])?;
            return Ok(Value::Complex(ctx.arith().complex_kernel(Kernel::Beta, &[a, b])?));
        }
        let a = extract_real("beta", 0, &args[0])?;
        let b = extract_real("beta", 1, &args[1])?;
        Ok(Value::Real(ctx.arith().real_kernel(Kernel::Beta, &[a, b])?))
    }
}

/// Shared body of the Bessel functions: real arguments only
fn bessel(kernel: Kernel, args: &[Value], ctx: &EvalContext) -> Result<Value, NumkitError> {
    let name = kernel.entry_point();
    require_args(name, args, 2)?;
    for (i, arg) in args.iter().enumerate() {
        if !arg.is_real_scalar() {
            return Err(NumkitError::unsupported_type(name, "real arguments", arg.type_name())
                .at_argument(i)
                .with_suggestion("Bessel functions are only defined here for real input"));
        }
    }
    let n = extract_real(name, 0, &args[0])?;
    let x = extract_real(name, 1, &args[1])?;
    Ok(Value::Real(ctx.arith().real_kernel(kernel, &[n, x])?))
}

impl FunctionPlugin for BesselJ {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "bessel_j",
            description: "Bessel function of the first kind J_n(x)",
            usage: "bessel_j(n, x)",
            args: &BESSEL_ARGS,
            returns: "Real",
            examples: &BESSEL_J_EXAMPLES,
            category: "special",
            source: None,
            related: &BESSEL_J_RELATED,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Result<Value, NumkitError> {
        bessel(Kernel::BesselJ, args, ctx)
    }
}

impl FunctionPlugin for BesselY {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "bessel_y",
            description: "Bessel function of the second kind Y_n(x), x > 0",
            usage: "bessel_y(n, x)",
            args: &BESSEL_ARGS,
            returns: "Real",
            examples: &BESSEL_Y_EXAMPLES,
            category: "special",
            source: None,
            related: &BESSEL_Y_RELATED,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Result<Value, NumkitError> {
        bessel(Kernel::BesselY, args, ctx)
    }
}
