//! Exact fraction functions
//!
//! Arithmetic goes through the compute engine; negation and reciprocal are
//! computed locally. Arguments may be fractions, integers, floats (taken at
//! their exact binary value) or literal text.

use crate::helpers::{
    extract_flag, extract_int, extract_rational, extract_rationals, require_args,
    require_args_between,
};
use numkit_core::{FormatOptions, NumkitError, Rational, Value};
use numkit_plugin::{ArgMeta, EvalContext, FunctionMeta, FunctionPlugin};

pub struct Frac;
pub struct FracAdd;
pub struct FracMul;
pub struct FracSub;
pub struct FracDiv;
pub struct FracPow;
pub struct FracNeg;
pub struct FracRecip;
pub struct LimitDen;
pub struct FracStr;
pub struct FracMath;

const CATEGORY: &str = "fraction";

static FRAC_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("x", "Text | Int | Real | Fraction", "Literal, number, or numerator"),
    ArgMeta::optional("q", "Int | Fraction", "Denominator", "1"),
];
static FRAC_EXAMPLES: [&str; 5] = [
    "frac(\"5/-4\") → -5/4",
    "frac(-5, 4) → -5/4",
    "frac(\"0.1[6]\") → 1/6",
    "frac(\"1/0\") → ∞",
    "frac(0.1) → 3602879701896397/36028797018963968",
];
static FRAC_RELATED: [&str; 2] = ["limit_den", "frac_str"];

static VARIADIC_ARGS: [ArgMeta; 1] = [ArgMeta::required("...values", "Fraction", "Operands or lists of operands")];
static FRAC_ADD_EXAMPLES: [&str; 2] = ["frac_add(\"1/2\", \"1/3\", \"-1/5\") → 23/30", "frac_add() → 0"];
static FRAC_MUL_EXAMPLES: [&str; 2] = ["frac_mul(\"3/4\", \"2/3\", \"4/5\") → 2/5", "frac_mul() → 1"];

static BINARY_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("a", "Fraction", "Left operand"),
    ArgMeta::required("b", "Fraction", "Right operand"),
];
static FRAC_SUB_EXAMPLES: [&str; 1] = ["frac_sub(\"1/2\", \"1/3\") → 1/6"];
static FRAC_DIV_EXAMPLES: [&str; 2] = ["frac_div(\"1/2\", \"3/4\") → 2/3", "frac_div(1, 0) → ∞"];
static ARITH_RELATED: [&str; 4] = ["frac_add", "frac_sub", "frac_mul", "frac_div"];

static POW_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("x", "Fraction", "Base"),
    ArgMeta::required("n", "Int", "Integer exponent"),
];
static POW_EXAMPLES: [&str; 2] = ["frac_pow(\"2/3\", 3) → 8/27", "frac_pow(\"2/3\", -2) → 9/4"];

static UNARY_ARGS: [ArgMeta; 1] = [ArgMeta::required("x", "Fraction", "Operand")];
static NEG_EXAMPLES: [&str; 1] = ["frac_neg(\"3/4\") → -3/4"];
static RECIP_EXAMPLES: [&str; 2] = ["frac_recip(\"-3/4\") → -4/3", "frac_recip(0) → ∞"];

static LIMIT_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("x", "Fraction | Real", "Value to approximate"),
    ArgMeta::required("max_den", "Int", "Largest allowed denominator (≥ 1)"),
];
static LIMIT_EXAMPLES: [&str; 3] = [
    "limit_den(3.14159265, 10000) → 355/113",
    "limit_den(3.14159265, 100) → 311/99",
    "limit_den(\"-0.3[3]\", 10) → -1/3",
];
static LIMIT_RELATED: [&str; 1] = ["frac"];

static FORMAT_ARGS: [ArgMeta; 4] = [
    ArgMeta::required("x", "Fraction", "Value to render"),
    ArgMeta::optional("plus_sign", "Int", "1 to prefix + on non-negative values", "0"),
    ArgMeta::optional("explicit_one", "Int", "1 to keep a denominator of 1", "0"),
    ArgMeta::optional("ascii_minus", "Int", "0 to use the − glyph", "1"),
];
static STR_EXAMPLES: [&str; 3] = ["frac_str(\"-3/4\") → -3/4", "frac_str(5, 1, 1) → +5/1", "frac_str(\"-1/0\") → -∞"];
static MATH_EXAMPLES: [&str; 2] = ["frac_math(\"3/4\") → frac(3, 4)", "frac_math(\"-1/2\", 0, 0, 0) → −frac(1, 2)"];
static FORMAT_RELATED: [&str; 2] = ["frac_str", "frac_math"];

fn meta(
    name: &'static str,
    description: &'static str,
    usage: &'static str,
    args: &'static [ArgMeta],
    examples: &'static [&'static str],
    related: &'static [&'static str],
) -> FunctionMeta {
    FunctionMeta {
        name,
        description,
        usage,
        args,
        returns: "Fraction",
        examples,
        category: CATEGORY,
        source: None,
        related,
    }
}

fn one(func: &str, args: &[Value], ctx: &EvalContext) -> Result<Rational, NumkitError> {
    require_args(func, args, 1)?;
    extract_rational(func, 0, &args[0], ctx)
}

fn two(func: &str, args: &[Value], ctx: &EvalContext) -> Result<(Rational, Rational), NumkitError> {
    require_args(func, args, 2)?;
    Ok((
        extract_rational(func, 0, &args[0], ctx)?,
        extract_rational(func, 1, &args[1], ctx)?,
    ))
}

/// Flags following the value, defaulting to the context's options
fn format_options(func: &str, args: &[Value], ctx: &EvalContext) -> Result<FormatOptions, NumkitError> {
    require_args_between(func, args, 1, 4)?;
    let defaults = ctx.format;
    Ok(FormatOptions {
        plus_sign: extract_flag(func, 1, args, defaults.plus_sign)?,
        explicit_one: extract_flag(func, 2, args, defaults.explicit_one)?,
        ascii_minus: extract_flag(func, 3, args, defaults.ascii_minus)?,
    })
}

impl FunctionPlugin for Frac {
    fn meta(&self) -> FunctionMeta {
        meta(
            "frac",
            "Construct an exact fraction from a literal, a number, or a (p, q) pair",
            "frac(x) | frac(p, q)",
            &FRAC_ARGS,
            &FRAC_EXAMPLES,
            &FRAC_RELATED,
        )
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Result<Value, NumkitError> {
        match args {
            [x] => Ok(Value::Rational(extract_rational("frac", 0, x, ctx)?)),
            [Value::Int(p), Value::Int(q)] => Ok(Value::Rational(ctx.arith().rational_from_ratio(*p, *q))),
            [p, q] => {
                let p = extract_rational("frac", 0, p, ctx)?;
                let q = extract_rational("frac", 1, q, ctx)?;
                Ok(Value::Rational(ctx.arith().rational_div(&p, &q)?))
            }
            _ => Err(NumkitError::arity("frac", "1 or 2", args.len())),
        }
    }
}

impl FunctionPlugin for FracAdd {
    fn meta(&self) -> FunctionMeta {
        meta(
            "frac_add",
            "Exact sum of any number of fractions (0 for none)",
            "frac_add(a, b, ...)",
            &VARIADIC_ARGS,
            &FRAC_ADD_EXAMPLES,
            &ARITH_RELATED,
        )
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Result<Value, NumkitError> {
        let items = extract_rationals("frac_add", args, ctx)?;
        Ok(Value::Rational(ctx.arith().rational_add(&items)?))
    }
}

impl FunctionPlugin for FracMul {
    fn meta(&self) -> FunctionMeta {
        meta(
            "frac_mul",
            "Exact product of any number of fractions (1 for none)",
            "frac_mul(a, b, ...)",
            &VARIADIC_ARGS,
            &FRAC_MUL_EXAMPLES,
            &ARITH_RELATED,
        )
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Result<Value, NumkitError> {
        let items = extract_rationals("frac_mul", args, ctx)?;
        Ok(Value::Rational(ctx.arith().rational_mul(&items)?))
    }
}

impl FunctionPlugin for FracSub {
    fn meta(&self) -> FunctionMeta {
        meta("frac_sub", "Exact difference a - b", "frac_sub(a, b)", &BINARY_ARGS, &FRAC_SUB_EXAMPLES, &ARITH_RELATED)
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Result<Value, NumkitError> {
        let (a, b) = two("frac_sub", args, ctx)?;
        Ok(Value::Rational(ctx.arith().rational_sub(&a, &b)?))
    }
}

impl FunctionPlugin for FracDiv {
    fn meta(&self) -> FunctionMeta {
        meta(
            "frac_div",
            "Exact quotient a / b; division by zero gives ∞ or NaN",
            "frac_div(a, b)",
            &BINARY_ARGS,
            &FRAC_DIV_EXAMPLES,
            &ARITH_RELATED,
        )
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Result<Value, NumkitError> {
        let (a, b) = two("frac_div", args, ctx)?;
        Ok(Value::Rational(ctx.arith().rational_div(&a, &b)?))
    }
}

impl FunctionPlugin for FracPow {
    fn meta(&self) -> FunctionMeta {
        meta("frac_pow", "Fraction raised to an integer power", "frac_pow(x, n)", &POW_ARGS, &POW_EXAMPLES, &ARITH_RELATED)
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Result<Value, NumkitError> {
        require_args("frac_pow", args, 2)?;
        let base = extract_rational("frac_pow", 0, &args[0], ctx)?;
        let exp = extract_int("frac_pow", 1, &args[1])?;
        Ok(Value::Rational(ctx.arith().rational_pow(&base, exp)?))
    }
}

impl FunctionPlugin for FracNeg {
    fn meta(&self) -> FunctionMeta {
        meta("frac_neg", "Negation", "frac_neg(x)", &UNARY_ARGS, &NEG_EXAMPLES, &ARITH_RELATED)
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Result<Value, NumkitError> {
        let x = one("frac_neg", args, ctx)?;
        Ok(Value::Rational(ctx.arith().rational_neg(&x)))
    }
}

impl FunctionPlugin for FracRecip {
    fn meta(&self) -> FunctionMeta {
        meta("frac_recip", "Reciprocal 1/x", "frac_recip(x)", &UNARY_ARGS, &RECIP_EXAMPLES, &ARITH_RELATED)
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Result<Value, NumkitError> {
        let x = one("frac_recip", args, ctx)?;
        Ok(Value::Rational(ctx.arith().rational_recip(&x)))
    }
}

impl FunctionPlugin for LimitDen {
    fn meta(&self) -> FunctionMeta {
        meta(
            "limit_den",
            "Closest fraction whose denominator is at most max_den",
            "limit_den(x, max_den)",
            &LIMIT_ARGS,
            &LIMIT_EXAMPLES,
            &LIMIT_RELATED,
        )
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Result<Value, NumkitError> {
        require_args("limit_den", args, 2)?;
        let x = extract_rational("limit_den", 0, &args[0], ctx)?;
        let max_den = extract_int("limit_den", 1, &args[1])?;
        Ok(Value::Rational(ctx.arith().limit_den(&x, max_den)?))
    }
}

impl FunctionPlugin for FracStr {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            returns: "Text",
            ..meta(
                "frac_str",
                "Render a fraction as text",
                "frac_str(x, plus_sign?, explicit_one?, ascii_minus?)",
                &FORMAT_ARGS,
                &STR_EXAMPLES,
                &FORMAT_RELATED,
            )
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Result<Value, NumkitError> {
        let opts = format_options("frac_str", args, ctx)?;
        let x = extract_rational("frac_str", 0, &args[0], ctx)?;
        Ok(Value::Text(x.format(&opts)))
    }
}

impl FunctionPlugin for FracMath {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            returns: "Text",
            ..meta(
                "frac_math",
                "Render a fraction as typesetting markup",
                "frac_math(x, plus_sign?, explicit_one?, ascii_minus?)",
                &FORMAT_ARGS,
                &MATH_EXAMPLES,
                &FORMAT_RELATED,
            )
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Result<Value, NumkitError> {
        let opts = format_options("frac_math", args, ctx)?;
        let x = extract_rational("frac_math", 0, &args[0], ctx)?;
        Ok(Value::Text(x.to_math(&opts)))
    }
}
