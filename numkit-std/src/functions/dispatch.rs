//! Real/complex dispatch for one-argument functions
//!
//! Each entry pairs a kernel with the real domain on which its real kernel
//! is used. Complex input always goes to the complex kernel; real input
//! outside the domain is promoted to `(x, 0)` first.

use crate::helpers::require_args;
use numkit_core::{Complex, NumkitError, Value};
use numkit_engine::Kernel;
use numkit_plugin::{ArgMeta, EvalContext, FunctionMeta, FunctionPlugin};

/// Real inputs handled by the real kernel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    All,
    /// |x| ≤ 1
    UnitInterval,
    /// x ≥ 1
    AtLeastOne,
    /// x ≥ 0
    NonNegative,
}

impl Domain {
    /// NaN stays on the real path
    pub fn contains(&self, x: f64) -> bool {
        if x.is_nan() {
            return true;
        }
        match self {
            Domain::All => true,
            Domain::UnitInterval => x.abs() <= 1.0,
            Domain::AtLeastOne => x >= 1.0,
            Domain::NonNegative => x >= 0.0,
        }
    }
}

pub struct FunctionSpec {
    pub kernel: Kernel,
    pub usage: &'static str,
    pub domain: Domain,
    pub description: &'static str,
    pub category: &'static str,
    pub examples: &'static [&'static str],
    pub related: &'static [&'static str],
}

impl FunctionSpec {
    pub fn name(&self) -> &'static str {
        self.kernel.entry_point()
    }
}

const fn spec(
    kernel: Kernel,
    usage: &'static str,
    domain: Domain,
    description: &'static str,
    category: &'static str,
    examples: &'static [&'static str],
    related: &'static [&'static str],
) -> FunctionSpec {
    FunctionSpec {
        kernel,
        usage,
        domain,
        description,
        category,
        examples,
        related,
    }
}

pub static FUNCTIONS: [FunctionSpec; 24] = [
    spec(Kernel::Sin, "sin(x)", Domain::All, "Sine", "trig", &["sin(0)", "sin(1+2i)"], &["cos", "tan", "asin"]),
    spec(Kernel::Cos, "cos(x)", Domain::All, "Cosine", "trig", &["cos(0)"], &["sin", "tan", "acos"]),
    spec(Kernel::Tan, "tan(x)", Domain::All, "Tangent", "trig", &["tan(1)"], &["sin", "cos", "atan"]),
    spec(
        Kernel::Asin,
        "asin(x)",
        Domain::UnitInterval,
        "Inverse sine; complex outside [-1, 1]",
        "trig",
        &["asin(0.5)", "asin(2) → 1.5707963267948966-1.3169578969248166i"],
        &["sin", "acos"],
    ),
    spec(
        Kernel::Acos,
        "acos(x)",
        Domain::UnitInterval,
        "Inverse cosine; complex outside [-1, 1]",
        "trig",
        &["acos(0.5)", "acos(-2)"],
        &["cos", "asin"],
    ),
    spec(Kernel::Atan, "atan(x)", Domain::All, "Inverse tangent", "trig", &["atan(1)"], &["tan"]),
    spec(Kernel::Sinh, "sinh(x)", Domain::All, "Hyperbolic sine", "hyperbolic", &["sinh(1)"], &["cosh", "asinh"]),
    spec(Kernel::Cosh, "cosh(x)", Domain::All, "Hyperbolic cosine", "hyperbolic", &["cosh(1)"], &["sinh", "acosh"]),
    spec(Kernel::Tanh, "tanh(x)", Domain::All, "Hyperbolic tangent", "hyperbolic", &["tanh(1)"], &["atanh"]),
    spec(Kernel::Asinh, "asinh(x)", Domain::All, "Inverse hyperbolic sine", "hyperbolic", &["asinh(1)"], &["sinh"]),
    spec(
        Kernel::Acosh,
        "acosh(x)",
        Domain::AtLeastOne,
        "Inverse hyperbolic cosine; complex below 1",
        "hyperbolic",
        &["acosh(2)", "acosh(0)"],
        &["cosh"],
    ),
    spec(
        Kernel::Atanh,
        "atanh(x)",
        Domain::UnitInterval,
        "Inverse hyperbolic tangent; complex outside [-1, 1]",
        "hyperbolic",
        &["atanh(0.5)", "atanh(2)"],
        &["tanh"],
    ),
    spec(Kernel::Exp, "exp(x)", Domain::All, "Exponential", "exponential", &["exp(1)", "exp(3.14159i)"], &["ln"]),
    spec(
        Kernel::Ln,
        "ln(x)",
        Domain::NonNegative,
        "Natural logarithm; complex for negative input",
        "exponential",
        &["ln(1)", "ln(-1) → 0+3.141592653589793i"],
        &["exp", "log", "log2", "log10"],
    ),
    spec(Kernel::Log2, "log2(x)", Domain::NonNegative, "Base-2 logarithm", "exponential", &["log2(8)"], &["ln", "log"]),
    spec(Kernel::Log10, "log10(x)", Domain::NonNegative, "Base-10 logarithm", "exponential", &["log10(1000)"], &["ln", "log"]),
    spec(
        Kernel::Sqrt,
        "sqrt(x)",
        Domain::NonNegative,
        "Square root; complex for negative input",
        "exponential",
        &["sqrt(16)", "sqrt(-4) → 0+2i"],
        &["cbrt"],
    ),
    spec(Kernel::Cbrt, "cbrt(x)", Domain::All, "Real cube root; principal root for complex input", "exponential", &["cbrt(-8)"], &["sqrt"]),
    spec(Kernel::Gamma, "gamma(x)", Domain::All, "Gamma function", "special", &["gamma(5)", "gamma(0.5)"], &["digamma", "beta"]),
    spec(Kernel::Digamma, "digamma(x)", Domain::All, "Digamma function ψ(x)", "special", &["digamma(1)"], &["gamma"]),
    spec(Kernel::Erf, "erf(x)", Domain::All, "Error function", "special", &["erf(1)"], &[]),
    spec(
        Kernel::Zeta,
        "zeta(s)",
        Domain::All,
        "Riemann zeta function; pole at s = 1",
        "special",
        &["zeta(2) → 1.6449340668482264", "zeta(0.5+14.134725141734693i)"],
        &["gamma"],
    ),
    spec(Kernel::AiryAi, "airy_ai(x)", Domain::All, "Airy function Ai", "special", &["airy_ai(0)", "airy_ai(-10)"], &["airy_bi"]),
    spec(Kernel::AiryBi, "airy_bi(x)", Domain::All, "Airy function Bi", "special", &["airy_bi(0)", "airy_bi(1+i)"], &["airy_ai"]),
];

static ARGS: [ArgMeta; 1] = [ArgMeta::required("x", "Real | Complex", "Argument")];

/// Table entry for a kernel, if it is a one-argument function
pub fn find(kernel: Kernel) -> Option<&'static FunctionSpec> {
    FUNCTIONS.iter().find(|s| s.kernel == kernel)
}

/// Evaluate `spec` at `arg`, promoting real input outside its domain
pub fn apply(spec: &FunctionSpec, arg: &Value, ctx: &EvalContext) -> Result<Value, NumkitError> {
    let arith = ctx.arith();
    match arg {
        Value::Complex(z) => Ok(Value::Complex(arith.complex_kernel(spec.kernel, &[*z])?)),
        other => {
            let x = other.as_real().ok_or_else(|| {
                NumkitError::unsupported_type(spec.name(), "a real scalar or Complex", other.type_name())
                    .at_argument(0)
            })?;
            if spec.domain.contains(x) {
                Ok(Value::Real(arith.real_kernel(spec.kernel, &[x])?))
            } else {
                tracing::debug!(function = spec.name(), x, "promoting real argument to complex");
                let z = arith.complex_kernel(spec.kernel, &[Complex::from_real(x)])?;
                Ok(Value::Complex(z))
            }
        }
    }
}

/// Plugin wrapper over a table entry
pub struct Dispatched(pub &'static FunctionSpec);

impl FunctionPlugin for Dispatched {
    fn meta(&self) -> FunctionMeta {
        let spec = self.0;
        FunctionMeta {
            name: spec.name(),
            description: spec.description,
            usage: spec.usage,
            args: &ARGS,
            returns: "Real | Complex",
            examples: spec.examples,
            category: spec.category,
            source: None,
            related: spec.related,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Result<Value, NumkitError> {
        require_args(self.0.name(), args, 1)?;
        apply(self.0, &args[0], ctx)
    }
}
