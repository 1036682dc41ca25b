//! Number theory: thin wrappers over the engine's integer kernels

use crate::helpers::{extract_int, int_value, require_args};
use numkit_core::{NumkitError, Value};
use numkit_plugin::{ArgMeta, EvalContext, FunctionMeta, FunctionPlugin};

pub struct PrimeFactors;
pub struct ExtendedGcd;
pub struct NthPrime;
pub struct PrimePi;

static N_ARGS: [ArgMeta; 1] = [ArgMeta::required("n", "Int", "Integer")];
static GCD_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("a", "Int", "First integer"),
    ArgMeta::required("b", "Int", "Second integer"),
];
static FACTORS_EXAMPLES: [&str; 2] = ["prime_factors(360) → [[2, 3], [3, 2], [5, 1]]", "prime_factors(1) → []"];
static GCD_EXAMPLES: [&str; 2] = ["extended_gcd(240, 46) → [2, -9, 47]", "extended_gcd(0, 0) → [0, 1, 0]"];
static NTH_EXAMPLES: [&str; 2] = ["nth_prime(1) → 2", "nth_prime(1000) → 7919"];
static PI_EXAMPLES: [&str; 2] = ["prime_pi(100) → 25", "prime_pi(1) → 0"];
static RELATED: [&str; 4] = ["prime_factors", "extended_gcd", "nth_prime", "prime_pi"];

fn meta(
    name: &'static str,
    description: &'static str,
    usage: &'static str,
    args: &'static [ArgMeta],
    returns: &'static str,
    examples: &'static [&'static str],
) -> FunctionMeta {
    FunctionMeta {
        name,
        description,
        usage,
        args,
        returns,
        examples,
        category: "number_theory",
        source: None,
        related: &RELATED,
    }
}

impl FunctionPlugin for PrimeFactors {
    fn meta(&self) -> FunctionMeta {
        meta(
            "prime_factors",
            "Prime factorization as ascending [prime, multiplicity] pairs (n ≥ 1)",
            "prime_factors(n)",
            &N_ARGS,
            "List",
            &FACTORS_EXAMPLES,
        )
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Result<Value, NumkitError> {
        require_args("prime_factors", args, 1)?;
        let n = extract_int("prime_factors", 0, &args[0])?;
        let factors = ctx.arith().prime_factors(n)?;
        Ok(Value::List(
            factors
                .into_iter()
                .map(|(p, m)| Value::List(vec![int_value(p.into()), Value::Int(m.into())]))
                .collect(),
        ))
    }
}

impl FunctionPlugin for ExtendedGcd {
    fn meta(&self) -> FunctionMeta {
        meta(
            "extended_gcd",
            "[g, u, v] with g = gcd(a, b) = u·a + v·b and g ≥ 0",
            "extended_gcd(a, b)",
            &GCD_ARGS,
            "List",
            &GCD_EXAMPLES,
        )
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Result<Value, NumkitError> {
        require_args("extended_gcd", args, 2)?;
        let a = extract_int("extended_gcd", 0, &args[0])?;
        let b = extract_int("extended_gcd", 1, &args[1])?;
        let (g, u, v) = ctx.arith().extended_gcd(a, b)?;
        Ok(Value::List(vec![int_value(g), int_value(u), int_value(v)]))
    }
}

impl FunctionPlugin for NthPrime {
    fn meta(&self) -> FunctionMeta {
        meta("nth_prime", "The n-th prime, counting from nth_prime(1) = 2", "nth_prime(n)", &N_ARGS, "Int", &NTH_EXAMPLES)
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Result<Value, NumkitError> {
        require_args("nth_prime", args, 1)?;
        let n = extract_int("nth_prime", 0, &args[0])?;
        Ok(int_value(ctx.arith().nth_prime(n)?.into()))
    }
}

impl FunctionPlugin for PrimePi {
    fn meta(&self) -> FunctionMeta {
        meta("prime_pi", "Number of primes ≤ n", "prime_pi(n)", &N_ARGS, "Int", &PI_EXAMPLES)
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Result<Value, NumkitError> {
        require_args("prime_pi", args, 1)?;
        let n = extract_int("prime_pi", 0, &args[0])?;
        Ok(int_value(ctx.arith().prime_pi(n)?.into()))
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

    fn pair(p: i64, m: i64) -> Value {
        Value::List(vec![Value::Int(p), Value::Int(m)])
    }

    #[test]
    fn test_prime_factors() {
        let ctx = ctx();
        let v = PrimeFactors.call(&[Value::Int(360)], &ctx).unwrap();
        assert_eq!(v, Value::List(vec![pair(2, 3), pair(3, 2), pair(5, 1)]));
        assert_eq!(PrimeFactors.call(&[Value::Int(1)], &ctx).unwrap(), Value::List(vec![]));
        let err = PrimeFactors.call(&[Value::Int(-12)], &ctx).unwrap_err();
        assert_eq!(err.kind, ErrorKind::DomainError);
    }

    #[test]
    fn test_factor_product_and_order() {
        let ctx = ctx();
        let n: i64 = 600_851_475_143;
        let v = PrimeFactors.call(&[Value::Int(n)], &ctx).unwrap();
        let mut product = 1i64;
        let mut last = 0i64;
        for item in v.as_list().unwrap() {
            let pm = item.as_list().unwrap();
            let (p, m) = (pm[0].as_int().unwrap(), pm[1].as_int().unwrap());
            assert!(p > last && m >= 1);
            last = p;
            product *= p.pow(m as u32);
        }
        assert_eq!(product, n);
    }

    #[test]
    fn test_bezout_identity() {
        let ctx = ctx();
        for (a, b) in [(240, 46), (46, 240), (-12, 18), (17, 5), (0, 9), (-9, 0)] {
            let v = ExtendedGcd.call(&[Value::Int(a), Value::Int(b)], &ctx).unwrap();
            let items = v.as_list().unwrap();
            let g = items[0].as_int().unwrap();
            let u = items[1].as_int().unwrap();
            let v = items[2].as_int().unwrap();
            assert!(g >= 0);
            assert_eq!(u * a + v * b, g, "({}, {})", a, b);
            assert_eq!(g, gcd(a, b));
        }
    }

    fn gcd(a: i64, b: i64) -> i64 {
        if b == 0 {
            a.abs()
        } else {
            gcd(b, a % b)
        }
    }

    #[test]
    fn test_prime_counting() {
        let ctx = ctx();
        assert_eq!(NthPrime.call(&[Value::Int(1)], &ctx).unwrap(), Value::Int(2));
        assert_eq!(NthPrime.call(&[Value::Int(1000)], &ctx).unwrap(), Value::Int(7919));
        assert_eq!(PrimePi.call(&[Value::Int(100)], &ctx).unwrap(), Value::Int(25));
        let err = NthPrime.call(&[Value::Int(0)], &ctx).unwrap_err();
        assert_eq!(err.kind, ErrorKind::DomainError);
    }
}
