//! Complex number functions
//!
//! Multiplication, division and powers are delegated to the compute engine.
//! Construction, subtraction and the projections are local.

use crate::helpers::{extract_complex, extract_complexes, extract_real, require_args};
use numkit_core::{Complex, NumkitError, Value};
use numkit_plugin::{ArgMeta, EvalContext, FunctionMeta, FunctionPlugin};

pub struct ComplexFrom;
pub struct ComplexPolar;
pub struct ComplexAdd;
pub struct ComplexSub;
pub struct ComplexMul;
pub struct ComplexDiv;
pub struct ComplexPow;
pub struct ComplexNeg;
pub struct Conj;
pub struct Re;
pub struct Im;
pub struct ComplexAbs;
pub struct ComplexArg;

static FROM_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("x", "Text | Real | Complex", "Literal like 1+2i, or the real part"),
    ArgMeta::optional("im", "Real", "Imaginary part", "0"),
];
static FROM_EXAMPLES: [&str; 3] = ["complex(\"1+2i\") → 1+2i", "complex(3, -4) → 3-4i", "complex(\"2i\") → 0+2i"];

static POLAR_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("r", "Real", "Magnitude"),
    ArgMeta::required("theta", "Real", "Angle in radians"),
];
static POLAR_EXAMPLES: [&str; 1] = ["complex_polar(2, 0) → 2+0i"];

static VARIADIC_ARGS: [ArgMeta; 1] = [ArgMeta::required("...values", "Complex", "Operands or lists of operands")];
static ADD_EXAMPLES: [&str; 1] = ["complex_add(\"1+2i\", \"3+4i\", \"2i\") → 4+8i"];
static MUL_EXAMPLES: [&str; 1] = ["complex_mul(\"1+i\", \"1-i\") → 2+0i"];

static BINARY_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("a", "Complex", "Left operand"),
    ArgMeta::required("b", "Complex", "Right operand"),
];
static SUB_EXAMPLES: [&str; 1] = ["complex_sub(\"4+8i\", \"3+4i\") → 1+4i"];
static DIV_EXAMPLES: [&str; 1] = ["complex_div(\"1+2i\", \"3+4i\") → 0.44+0.08i"];

static POW_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("z", "Complex", "Base"),
    ArgMeta::required("w", "Real | Complex", "Exponent"),
];
static POW_EXAMPLES: [&str; 2] = ["complex_pow(\"i\", 2) → -1+0i", "complex_pow(\"i\", \"i\") → 0.20787957635076193+0i"];
static ARITH_RELATED: [&str; 5] = ["complex_add", "complex_sub", "complex_mul", "complex_div", "complex_pow"];

static UNARY_ARGS: [ArgMeta; 1] = [ArgMeta::required("z", "Complex", "Operand")];
static NEG_EXAMPLES: [&str; 1] = ["complex_neg(\"1-2i\") → -1+2i"];
static CONJ_EXAMPLES: [&str; 1] = ["conj(\"1+2i\") → 1-2i"];
static RE_EXAMPLES: [&str; 1] = ["re(\"3+4i\") → 3"];
static IM_EXAMPLES: [&str; 1] = ["im(\"3+4i\") → 4"];
static ABS_EXAMPLES: [&str; 2] = ["complex_abs(\"3+4i\") → 5", "complex_abs(\"1e300+1e300i\")"];
static ARG_EXAMPLES: [&str; 1] = ["complex_arg(\"-1\") → 3.141592653589793"];
static PART_RELATED: [&str; 5] = ["re", "im", "conj", "complex_abs", "complex_arg"];

fn meta(
    name: &'static str,
    description: &'static str,
    usage: &'static str,
    args: &'static [ArgMeta],
    returns: &'static str,
    examples: &'static [&'static str],
    related: &'static [&'static str],
) -> FunctionMeta {
    FunctionMeta {
        name,
        description,
        usage,
        args,
        returns,
        examples,
        category: "complex",
        source: None,
        related,
    }
}

fn one(func: &str, args: &[Value]) -> Result<Complex, NumkitError> {
    require_args(func, args, 1)?;
    extract_complex(func, 0, &args[0])
}

fn two(func: &str, args: &[Value]) -> Result<(Complex, Complex), NumkitError> {
    require_args(func, args, 2)?;
    Ok((extract_complex(func, 0, &args[0])?, extract_complex(func, 1, &args[1])?))
}

impl FunctionPlugin for ComplexFrom {
    fn meta(&self) -> FunctionMeta {
        meta(
            "complex",
            "Construct a complex number from a literal, a real, or a (re, im) pair",
            "complex(x) | complex(re, im)",
            &FROM_ARGS,
            "Complex",
            &FROM_EXAMPLES,
            &PART_RELATED,
        )
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Result<Value, NumkitError> {
        let z = match args {
            [x] => extract_complex("complex", 0, x)?,
            [re, im] => Complex::new(
                extract_real("complex", 0, re)?,
                extract_real("complex", 1, im)?,
            ),
            _ => return Err(NumkitError::arity("complex", "1 or 2", args.len())),
        };
        Ok(Value::Complex(z))
    }
}

impl FunctionPlugin for ComplexPolar {
    fn meta(&self) -> FunctionMeta {
        meta(
            "complex_polar",
            "Complex number from magnitude and angle",
            "complex_polar(r, theta)",
            &POLAR_ARGS,
            "Complex",
            &POLAR_EXAMPLES,
            &PART_RELATED,
        )
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Result<Value, NumkitError> {
        require_args("complex_polar", args, 2)?;
        let r = extract_real("complex_polar", 0, &args[0])?;
        let theta = extract_real("complex_polar", 1, &args[1])?;
        Ok(Value::Complex(Complex::from_polar(r, theta)))
    }
}

impl FunctionPlugin for ComplexAdd {
    fn meta(&self) -> FunctionMeta {
        meta(
            "complex_add",
            "Sum of any number of complex values (0 for none)",
            "complex_add(a, b, ...)",
            &VARIADIC_ARGS,
            "Complex",
            &ADD_EXAMPLES,
            &ARITH_RELATED,
        )
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Result<Value, NumkitError> {
        let items = extract_complexes("complex_add", args)?;
        Ok(Value::Complex(ctx.arith().complex_add(&items)?))
    }
}

impl FunctionPlugin for ComplexSub {
    fn meta(&self) -> FunctionMeta {
        meta("complex_sub", "Difference a - b", "complex_sub(a, b)", &BINARY_ARGS, "Complex", &SUB_EXAMPLES, &ARITH_RELATED)
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Result<Value, NumkitError> {
        let (a, b) = two("complex_sub", args)?;
        Ok(Value::Complex(ctx.arith().complex_sub(&a, &b)))
    }
}

impl FunctionPlugin for ComplexMul {
    fn meta(&self) -> FunctionMeta {
        meta(
            "complex_mul",
            "Product of any number of complex values (1 for none)",
            "complex_mul(a, b, ...)",
            &VARIADIC_ARGS,
            "Complex",
            &MUL_EXAMPLES,
            &ARITH_RELATED,
        )
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Result<Value, NumkitError> {
        let items = extract_complexes("complex_mul", args)?;
        Ok(Value::Complex(ctx.arith().complex_mul(&items)?))
    }
}

impl FunctionPlugin for ComplexDiv {
    fn meta(&self) -> FunctionMeta {
        meta(
            "complex_div",
            "Quotient a / b by scaled division",
            "complex_div(a, b)",
            &BINARY_ARGS,
            "Complex",
            &DIV_EXAMPLES,
            &ARITH_RELATED,
        )
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Result<Value, NumkitError> {
        let (a, b) = two("complex_div", args)?;
        Ok(Value::Complex(ctx.arith().complex_div(&a, &b)?))
    }
}

impl FunctionPlugin for ComplexPow {
    fn meta(&self) -> FunctionMeta {
        meta(
            "complex_pow",
            "Principal power z^w; a real exponent uses the real-exponent kernel",
            "complex_pow(z, w)",
            &POW_ARGS,
            "Complex",
            &POW_EXAMPLES,
            &ARITH_RELATED,
        )
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Result<Value, NumkitError> {
        require_args("complex_pow", args, 2)?;
        let base = extract_complex("complex_pow", 0, &args[0])?;
        let z = match args[1].as_real() {
            Some(exp) => ctx.arith().complex_pow_real(&base, exp)?,
            None => {
                let exp = extract_complex("complex_pow", 1, &args[1])?;
                ctx.arith().complex_pow_complex(&base, &exp)?
            }
        };
        Ok(Value::Complex(z))
    }
}

impl FunctionPlugin for ComplexNeg {
    fn meta(&self) -> FunctionMeta {
        meta("complex_neg", "Negation", "complex_neg(z)", &UNARY_ARGS, "Complex", &NEG_EXAMPLES, &ARITH_RELATED)
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Result<Value, NumkitError> {
        Ok(Value::Complex(-one("complex_neg", args)?))
    }
}

impl FunctionPlugin for Conj {
    fn meta(&self) -> FunctionMeta {
        meta("conj", "Complex conjugate", "conj(z)", &UNARY_ARGS, "Complex", &CONJ_EXAMPLES, &PART_RELATED)
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Result<Value, NumkitError> {
        Ok(Value::Complex(one("conj", args)?.conj()))
    }
}

impl FunctionPlugin for Re {
    fn meta(&self) -> FunctionMeta {
        meta("re", "Real part", "re(z)", &UNARY_ARGS, "Real", &RE_EXAMPLES, &PART_RELATED)
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Result<Value, NumkitError> {
        Ok(Value::Real(one("re", args)?.re()))
    }
}

impl FunctionPlugin for Im {
    fn meta(&self) -> FunctionMeta {
        meta("im", "Imaginary part", "im(z)", &UNARY_ARGS, "Real", &IM_EXAMPLES, &PART_RELATED)
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Result<Value, NumkitError> {
        Ok(Value::Real(one("im", args)?.im()))
    }
}

impl FunctionPlugin for ComplexAbs {
    fn meta(&self) -> FunctionMeta {
        meta(
            "complex_abs",
            "Magnitude |z| without intermediate overflow",
            "complex_abs(z)",
            &UNARY_ARGS,
            "Real",
            &ABS_EXAMPLES,
            &PART_RELATED,
        )
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Result<Value, NumkitError> {
        Ok(Value::Real(one("complex_abs", args)?.abs()))
    }
}

impl FunctionPlugin for ComplexArg {
    fn meta(&self) -> FunctionMeta {
        meta(
            "complex_arg",
            "Argument in (-π, π]",
            "complex_arg(z)",
            &UNARY_ARGS,
            "Real",
            &ARG_EXAMPLES,
            &PART_RELATED,
        )
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Result<Value, NumkitError> {
        Ok(Value::Real(one("complex_arg", args)?.arg()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use numkit_core::ErrorKind;
    use numkit_plugin::PluginRegistry;
    use std::sync::Arc;

    fn ctx() -> EvalContext {
        EvalContext::new(Arc::new(PluginRegistry::new()))
    }

    fn text(s: &str) -> Value {
        Value::Text(s.to_string())
    }

    fn c(re: f64, im: f64) -> Value {
        Value::Complex(Complex::new(re, im))
    }

    #[test]
    fn test_add_scenario() {
        let v = ComplexAdd
            .call(&[text("1+2i"), text("3+4i"), text("2i")], &ctx())
            .unwrap();
        assert_eq!(v, c(4.0, 8.0));
    }

    #[test]
    fn test_add_and_sub_agree() {
        let ctx = ctx();
        let a = text("1.5-2i");
        let b = text("-0.25+8i");
        let diff = ComplexSub.call(&[a.clone(), b.clone()], &ctx).unwrap();
        let neg_b = ComplexNeg.call(&[b], &ctx).unwrap();
        let sum = ComplexAdd.call(&[a, neg_b], &ctx).unwrap();
        assert_eq!(diff, sum);
    }

    #[test]
    fn test_construction() {
        let ctx = ctx();
        assert_eq!(ComplexFrom.call(&[text("2i")], &ctx).unwrap(), c(0.0, 2.0));
        assert_eq!(ComplexFrom.call(&[Value::Int(3), Value::Int(-4)], &ctx).unwrap(), c(3.0, -4.0));
        let r: numkit_core::Rational = "1/4".parse().unwrap();
        assert_eq!(ComplexFrom.call(&[Value::Rational(r)], &ctx).unwrap(), c(0.25, 0.0));
        let err = ComplexFrom.call(&[text("1+2"), Value::Int(1)], &ctx).unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnsupportedType);
        let err = ComplexFrom.call(&[], &ctx).unwrap_err();
        assert_eq!(err.kind, ErrorKind::ArityError);
    }

    #[test]
    fn test_mul_div() {
        let ctx = ctx();
        assert_eq!(ComplexMul.call(&[text("1+i"), text("1-i")], &ctx).unwrap(), c(2.0, 0.0));
        assert_eq!(ComplexMul.call(&[], &ctx).unwrap(), c(1.0, 0.0));
        let q = ComplexDiv.call(&[text("1+2i"), text("3+4i")], &ctx).unwrap();
        let q = q.as_complex().unwrap();
        assert!((q.re - 0.44).abs() < 1e-15 && (q.im - 0.08).abs() < 1e-15);
        let big = ComplexDiv.call(&[c(1e300, 1e300), c(1e300, 1e300)], &ctx).unwrap();
        let big = big.as_complex().unwrap();
        assert!((big.re - 1.0).abs() < 1e-15 && big.im.abs() < 1e-15);
    }

    #[test]
    fn test_pow_routes_by_exponent_kind() {
        let ctx = ctx();
        let sq = ComplexPow.call(&[text("i"), Value::Int(2)], &ctx).unwrap();
        let sq = sq.as_complex().unwrap();
        assert!((sq.re + 1.0).abs() < 1e-15 && sq.im.abs() < 1e-15);
        let ii = ComplexPow.call(&[text("i"), text("i")], &ctx).unwrap();
        let ii = ii.as_complex().unwrap();
        assert!((ii.re - (-std::f64::consts::FRAC_PI_2).exp()).abs() < 1e-15);
    }

    #[test]
    fn test_projections() {
        let ctx = ctx();
        let z = text("3+4i");
        assert_eq!(Re.call(&[z.clone()], &ctx).unwrap(), Value::Real(3.0));
        assert_eq!(Im.call(&[z.clone()], &ctx).unwrap(), Value::Real(4.0));
        assert_eq!(ComplexAbs.call(&[z.clone()], &ctx).unwrap(), Value::Real(5.0));
        assert_eq!(Conj.call(&[z], &ctx).unwrap(), c(3.0, -4.0));
        let big = ComplexAbs.call(&[c(1e300, 1e300)], &ctx).unwrap();
        assert!(big.as_real().unwrap().is_finite());
        assert_eq!(
            ComplexArg.call(&[Value::Int(-1)], &ctx).unwrap(),
            Value::Real(std::f64::consts::PI)
        );
    }
}
