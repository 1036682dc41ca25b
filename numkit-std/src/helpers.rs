//! Argument extraction shared by the standard functions

use numkit_core::{parse_complex, Complex, NumkitError, Rational, Value};
use numkit_plugin::EvalContext;

pub fn require_args(func: &str, args: &[Value], n: usize) -> Result<(), NumkitError> {
    if args.len() != n {
        return Err(NumkitError::arity(func, &n.to_string(), args.len()));
    }
    Ok(())
}

pub fn require_args_between(
    func: &str,
    args: &[Value],
    min: usize,
    max: usize,
) -> Result<(), NumkitError> {
    if args.len() < min || args.len() > max {
        return Err(NumkitError::arity(
            func,
            &format!("{} to {}", min, max),
            args.len(),
        ));
    }
    Ok(())
}

/// Flatten varargs and lists into one argument sequence
pub fn flatten(args: &[Value]) -> Vec<&Value> {
    let mut out = Vec::new();
    for arg in args {
        match arg {
            Value::List(items) => out.extend(items.iter()),
            other => out.push(other),
        }
    }
    out
}

/// Real scalar view for numeric kernels
pub fn extract_real(func: &str, index: usize, arg: &Value) -> Result<f64, NumkitError> {
    arg.as_real().ok_or_else(|| {
        NumkitError::unsupported_type(func, "a real scalar", arg.type_name()).at_argument(index)
    })
}

/// Exact value of a rational-like argument
///
/// Text goes through the engine's parser; floats convert to their exact
/// binary fraction.
pub fn extract_rational(
    func: &str,
    index: usize,
    arg: &Value,
    ctx: &EvalContext,
) -> Result<Rational, NumkitError> {
    match arg {
        Value::Rational(r) => Ok(r.clone()),
        Value::Int(n) => Ok(Rational::from_integer(*n)),
        Value::Real(x) => ctx.arith().rational_from_float(*x),
        Value::Text(s) => ctx.arith().rational_from_text(s),
        other => Err(NumkitError::unsupported_type(
            func,
            "a rational, integer, float or literal",
            other.type_name(),
        )
        .at_argument(index)),
    }
}

pub fn extract_rationals(
    func: &str,
    args: &[Value],
    ctx: &EvalContext,
) -> Result<Vec<Rational>, NumkitError> {
    flatten(args)
        .into_iter()
        .enumerate()
        .map(|(i, arg)| extract_rational(func, i, arg, ctx))
        .collect()
}

/// Complex view of an argument; real scalars promote to `(x, 0)`
pub fn extract_complex(func: &str, index: usize, arg: &Value) -> Result<Complex, NumkitError> {
    match arg {
        Value::Text(s) => Ok(parse_complex(s)?),
        other => other.to_complex().ok_or_else(|| {
            NumkitError::unsupported_type(func, "a complex value or real scalar", other.type_name())
                .at_argument(index)
        }),
    }
}

pub fn extract_complexes(func: &str, args: &[Value]) -> Result<Vec<Complex>, NumkitError> {
    flatten(args)
        .into_iter()
        .enumerate()
        .map(|(i, arg)| extract_complex(func, i, arg))
        .collect()
}

/// Integer argument; integral floats and rationals are accepted
pub fn extract_int(func: &str, index: usize, arg: &Value) -> Result<i64, NumkitError> {
    let not_integer = || {
        NumkitError::domain_error(format!("{}() expects an integer, got {}", func, arg))
            .in_function(func)
            .at_argument(index)
    };
    match arg {
        Value::Int(n) => Ok(*n),
        Value::Real(x) => {
            if x.fract() == 0.0 && x.abs() < 9.2e18 {
                Ok(*x as i64)
            } else {
                Err(not_integer())
            }
        }
        Value::Rational(r) if r.is_integer() => r.to_string().parse().map_err(|_| not_integer()),
        Value::Rational(_) => Err(not_integer()),
        other => Err(
            NumkitError::unsupported_type(func, "an integer", other.type_name()).at_argument(index),
        ),
    }
}

/// Optional boolean flag given as 0/1
pub fn extract_flag(
    func: &str,
    index: usize,
    args: &[Value],
    default: bool,
) -> Result<bool, NumkitError> {
    match args.get(index) {
        None => Ok(default),
        Some(arg) => Ok(extract_int(func, index, arg)? != 0),
    }
}

/// Integer result, widening to an exact rational past i64
pub fn int_value(n: i128) -> Value {
    match i64::try_from(n) {
        Ok(small) => Value::Int(small),
        Err(_) => Value::Rational(Rational::new(
            n >= 0,
            n.unsigned_abs().into(),
            1u8.into(),
        )),
    }
}
