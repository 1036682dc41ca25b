//! In-process compute engine
//!
//! Exact rational kernels run on dashu, complex kernels on num-complex, and
//! the special functions are implemented here.

mod airy;
mod complex;
mod fraction;
mod primes;
mod special;

use crate::engine::{ComputeEngine, EngineResult};
use crate::{EngineError, Kernel};
use dashu_int::UBig;
use num_complex::Complex64;
use numkit_core::wire::{self, ByteOrder, Marshal};
use numkit_core::{Complex, Rational};

/// Engine backed by pure-Rust libraries
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeEngine;

impl NativeEngine {
    pub fn new() -> Self {
        NativeEngine
    }
}

// ========== Buffer helpers ==========

fn rational(entry: &'static str, buf: &[u8]) -> Result<Rational, EngineError> {
    Rational::decode(buf).map_err(|e| EngineError::malformed(entry, e))
}

fn rationals(entry: &'static str, buf: &[u8]) -> Result<Vec<Rational>, EngineError> {
    Rational::decode_seq(buf).map_err(|e| EngineError::malformed(entry, e))
}

fn float(entry: &'static str, buf: &[u8]) -> Result<f64, EngineError> {
    ByteOrder::Native
        .read_f64(buf)
        .map_err(|e| EngineError::malformed(entry, e))
}

fn native_int(entry: &'static str, buf: &[u8]) -> Result<i64, EngineError> {
    ByteOrder::Native
        .read_i64(buf)
        .map_err(|e| EngineError::malformed(entry, e))
}

fn le_int(entry: &'static str, buf: &[u8]) -> Result<i64, EngineError> {
    ByteOrder::Little
        .read_i64(buf)
        .map_err(|e| EngineError::malformed(entry, e))
}

fn complex_of(entry: &'static str, re: &[u8], im: &[u8]) -> Result<Complex64, EngineError> {
    Ok(Complex64::new(float(entry, re)?, float(entry, im)?))
}

fn complexes(entry: &'static str, buf: &[u8]) -> Result<Vec<Complex64>, EngineError> {
    let items = Complex::decode_seq(buf).map_err(|e| EngineError::malformed(entry, e))?;
    Ok(items.into_iter().map(|z| Complex64::new(z.re, z.im)).collect())
}

fn emit_rational(entry: &'static str, r: &Rational) -> EngineResult {
    r.encode().map_err(|e| EngineError::failure(entry, e.to_string()))
}

fn emit_complex(entry: &'static str, z: Complex64) -> EngineResult {
    Complex::new(z.re, z.im)
        .encode()
        .map_err(|e| EngineError::failure(entry, e.to_string()))
}

fn check_arity(entry: &'static str, expected: usize, got: usize) -> Result<(), EngineError> {
    if expected == got {
        Ok(())
    } else {
        Err(EngineError::Arity {
            entry,
            expected,
            got,
        })
    }
}

/// Bessel order: a float buffer holding an integer
fn bessel_order(entry: &'static str, buf: &[u8]) -> Result<i64, EngineError> {
    let n = float(entry, buf)?;
    if n.fract() != 0.0 || n.abs() > 1e6 {
        return Err(EngineError::domain(
            entry,
            format!("order must be an integer of moderate size, got {}", n),
        ));
    }
    Ok(n as i64)
}

fn real_value(kernel: Kernel, entry: &'static str, args: &[&[u8]]) -> Result<f64, EngineError> {
    let x = float(entry, args[0])?;
    Ok(match kernel {
        Kernel::Sin => x.sin(),
        Kernel::Cos => x.cos(),
        Kernel::Tan => x.tan(),
        Kernel::Asin => x.asin(),
        Kernel::Acos => x.acos(),
        Kernel::Atan => x.atan(),
        Kernel::Sinh => x.sinh(),
        Kernel::Cosh => x.cosh(),
        Kernel::Tanh => x.tanh(),
        Kernel::Asinh => x.asinh(),
        Kernel::Acosh => x.acosh(),
        Kernel::Atanh => x.atanh(),
        Kernel::Exp => x.exp(),
        Kernel::Ln => x.ln(),
        Kernel::Log2 => x.log2(),
        Kernel::Log10 => x.log10(),
        Kernel::Sqrt => x.sqrt(),
        Kernel::Cbrt => x.cbrt(),
        Kernel::Gamma => special::gamma(x),
        Kernel::Digamma => special::digamma(x),
        Kernel::Erf => special::erf(x),
        Kernel::Beta => special::beta(x, float(entry, args[1])?),
        Kernel::Zeta => special::zeta(x),
        Kernel::AiryAi => airy::airy_ai(x),
        Kernel::AiryBi => airy::airy_bi(x),
        Kernel::BesselJ => special::bessel_j(bessel_order(entry, args[0])?, float(entry, args[1])?),
        Kernel::BesselY => special::bessel_y(bessel_order(entry, args[0])?, float(entry, args[1])?),
    })
}

impl ComputeEngine for NativeEngine {
    fn name(&self) -> &'static str {
        "native"
    }

    fn verify(&self, buf: &[u8]) -> bool {
        wire::verify_rational(buf).is_ok()
    }

    // ========== Rational kernels ==========

    fn fraction_parse(&self, text: &[u8]) -> EngineResult {
        const ENTRY: &str = "fraction_parse";
        let text = std::str::from_utf8(text)
            .map_err(|e| EngineError::domain(ENTRY, format!("text is not UTF-8: {}", e)))?;
        let r = numkit_core::parse_rational(text)?;
        emit_rational(ENTRY, &r)
    }

    fn fraction_from_float(&self, x: &[u8]) -> EngineResult {
        const ENTRY: &str = "fraction_from_float";
        emit_rational(ENTRY, &Rational::from_f64(float(ENTRY, x)?))
    }

    fn fraction_add(&self, seq: &[u8]) -> EngineResult {
        const ENTRY: &str = "fraction_add";
        emit_rational(ENTRY, &fraction::add(&rationals(ENTRY, seq)?))
    }

    fn fraction_mul(&self, seq: &[u8]) -> EngineResult {
        const ENTRY: &str = "fraction_mul";
        emit_rational(ENTRY, &fraction::mul(&rationals(ENTRY, seq)?))
    }

    fn fraction_sub(&self, a: &[u8], b: &[u8]) -> EngineResult {
        const ENTRY: &str = "fraction_sub";
        let r = fraction::sub(&rational(ENTRY, a)?, &rational(ENTRY, b)?);
        emit_rational(ENTRY, &r)
    }

    fn fraction_div(&self, a: &[u8], b: &[u8]) -> EngineResult {
        const ENTRY: &str = "fraction_div";
        let r = fraction::div(&rational(ENTRY, a)?, &rational(ENTRY, b)?);
        emit_rational(ENTRY, &r)
    }

    fn fraction_pow(&self, base: &[u8], exp: &[u8]) -> EngineResult {
        const ENTRY: &str = "fraction_pow";
        let r = fraction::pow(&rational(ENTRY, base)?, native_int(ENTRY, exp)?)
            .map_err(|details| EngineError::domain(ENTRY, details))?;
        emit_rational(ENTRY, &r)
    }

    fn fraction_limit_den(&self, x: &[u8], max_den: &[u8]) -> EngineResult {
        const ENTRY: &str = "fraction_limit_den";
        let max_den = native_int(ENTRY, max_den)?;
        if max_den < 1 {
            return Err(EngineError::domain(
                ENTRY,
                format!("maximum denominator must be at least 1, got {}", max_den),
            ));
        }
        let r = fraction::limit_den(&rational(ENTRY, x)?, &UBig::from(max_den.unsigned_abs()));
        emit_rational(ENTRY, &r)
    }

    // ========== Complex kernels ==========

    fn complex_add(&self, seq: &[u8]) -> EngineResult {
        const ENTRY: &str = "complex_add";
        emit_complex(ENTRY, complex::sum(&complexes(ENTRY, seq)?))
    }

    fn complex_mul(&self, seq: &[u8]) -> EngineResult {
        const ENTRY: &str = "complex_mul";
        emit_complex(ENTRY, complex::product(&complexes(ENTRY, seq)?))
    }

    fn complex_div(&self, re1: &[u8], im1: &[u8], re2: &[u8], im2: &[u8]) -> EngineResult {
        const ENTRY: &str = "complex_div";
        let a = complex_of(ENTRY, re1, im1)?;
        let b = complex_of(ENTRY, re2, im2)?;
        emit_complex(ENTRY, complex::div(a, b))
    }

    fn complex_pow_real(&self, re: &[u8], im: &[u8], exp: &[u8]) -> EngineResult {
        const ENTRY: &str = "complex_pow_real";
        let base = complex_of(ENTRY, re, im)?;
        emit_complex(ENTRY, complex::pow_real(base, float(ENTRY, exp)?))
    }

    fn complex_pow_complex(
        &self,
        re1: &[u8],
        im1: &[u8],
        re2: &[u8],
        im2: &[u8],
    ) -> EngineResult {
        const ENTRY: &str = "complex_pow_complex";
        let base = complex_of(ENTRY, re1, im1)?;
        let exp = complex_of(ENTRY, re2, im2)?;
        emit_complex(ENTRY, complex::pow_complex(base, exp))
    }

    // ========== Named functions ==========

    fn real_kernel(&self, kernel: Kernel, args: &[&[u8]]) -> EngineResult {
        let entry = kernel.entry_point();
        check_arity(entry, kernel.arity(), args.len())?;
        let y = real_value(kernel, entry, args)?;
        Ok(ByteOrder::Native.f64_bytes(y).to_vec())
    }

    fn complex_kernel(&self, kernel: Kernel, args: &[&[u8]]) -> EngineResult {
        let entry = kernel.entry_point();
        if !kernel.has_complex() {
            return Err(EngineError::Unsupported(format!("{}_complex", entry)));
        }
        check_arity(entry, 2 * kernel.arity(), args.len())?;
        let zs = args
            .chunks_exact(2)
            .map(|pair| complex_of(entry, pair[0], pair[1]))
            .collect::<Result<Vec<_>, _>>()?;
        let w = complex::apply(kernel, &zs)
            .ok_or_else(|| EngineError::Unsupported(format!("{}_complex", entry)))?;
        emit_complex(entry, w)
    }

    // ========== Number theory ==========

    fn prime_factors(&self, n: &[u8]) -> EngineResult {
        const ENTRY: &str = "prime_factors";
        let n = le_int(ENTRY, n)?;
        if n < 1 {
            return Err(EngineError::domain(
                ENTRY,
                format!("factorization needs a positive integer, got {}", n),
            ));
        }
        wire::encode_factors(&primes::factorize(n as u64))
            .map_err(|e| EngineError::failure(ENTRY, e.to_string()))
    }

    fn extended_gcd(&self, a: &[u8], b: &[u8]) -> EngineResult {
        const ENTRY: &str = "extended_gcd";
        let triple = primes::extended_gcd(le_int(ENTRY, a)?, le_int(ENTRY, b)?);
        wire::encode_triple(triple).map_err(|e| EngineError::failure(ENTRY, e.to_string()))
    }

    fn nth_prime(&self, n: &[u8]) -> EngineResult {
        const ENTRY: &str = "nth_prime";
        let n = le_int(ENTRY, n)?;
        let p = u64::try_from(n)
            .ok()
            .and_then(primes::nth_prime)
            .ok_or_else(|| {
                EngineError::domain(
                    ENTRY,
                    format!("index must be in 1..={}, got {}", primes::MAX_PRIME_INDEX, n),
                )
            })?;
        Ok(ByteOrder::Little.u64_bytes(p).to_vec())
    }

    fn prime_pi(&self, n: &[u8]) -> EngineResult {
        const ENTRY: &str = "prime_pi";
        let n = le_int(ENTRY, n)?;
        let count = if n < 2 {
            Some(0)
        } else {
            primes::prime_pi(n as u64)
        }
        .ok_or_else(|| {
            EngineError::domain(
                ENTRY,
                format!("argument must be at most {}, got {}", primes::MAX_SIEVE, n),
            )
        })?;
        Ok(ByteOrder::Little.u64_bytes(count).to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> NativeEngine {
        NativeEngine::new()
    }

    fn rat(text: &str) -> Rational {
        text.parse().unwrap()
    }

    fn f(x: f64) -> [u8; 8] {
        ByteOrder::Native.f64_bytes(x)
    }

    #[test]
    fn test_fraction_entry_points() {
        let e = engine();
        let seq = Rational::encode_seq(&[rat("1/2"), rat("1/3"), rat("-1/5")]).unwrap();
        let sum = Rational::decode(&e.fraction_add(&seq).unwrap()).unwrap();
        assert_eq!(sum, rat("23/30"));

        let parsed = e.fraction_parse("0.1[6]".as_bytes()).unwrap();
        assert!(e.verify(&parsed));
        assert_eq!(Rational::decode(&parsed).unwrap(), rat("1/6"));

        let exact = Rational::decode(&e.fraction_from_float(&f(0.375)).unwrap()).unwrap();
        assert_eq!(exact, rat("3/8"));
    }

    #[test]
    fn test_limit_den_entry_point() {
        let e = engine();
        let x = rat("3.14159265").encode().unwrap();
        let bound = ByteOrder::Native.i64_bytes(10000);
        let r = Rational::decode(&e.fraction_limit_den(&x, &bound).unwrap()).unwrap();
        assert_eq!(r, rat("355/113"));
        let zero = ByteOrder::Native.i64_bytes(0);
        assert!(matches!(
            e.fraction_limit_den(&x, &zero),
            Err(EngineError::Domain { .. })
        ));
    }

    #[test]
    fn test_malformed_buffers() {
        let e = engine();
        assert!(matches!(
            e.fraction_sub(&[0xff], &[0xff]),
            Err(EngineError::Malformed { .. })
        ));
        assert!(!e.verify(b"not cbor"));
        assert!(e.complex_div(&[0; 8], &[0; 8], &[0; 8], &[0; 4]).is_err());
    }

    #[test]
    fn test_kernels() {
        let e = engine();
        let y = e.real_kernel(Kernel::Sqrt, &[&f(9.0)]).unwrap();
        assert_eq!(ByteOrder::Native.read_f64(&y).unwrap(), 3.0);

        let w = Complex::decode(&e.complex_kernel(Kernel::Sqrt, &[&f(-4.0), &f(0.0)]).unwrap()).unwrap();
        assert!(w.re.abs() < 1e-12);
        assert!((w.im - 2.0).abs() < 1e-12);

        assert!(matches!(
            e.real_kernel(Kernel::Beta, &[&f(1.0)]),
            Err(EngineError::Arity { expected: 2, got: 1, .. })
        ));
        assert!(matches!(
            e.complex_kernel(Kernel::BesselJ, &[&f(0.0), &f(0.0), &f(1.0), &f(0.0)]),
            Err(EngineError::Unsupported(_))
        ));
        assert!(e.real_kernel(Kernel::BesselJ, &[&f(0.5), &f(1.0)]).is_err());
    }

    #[test]
    fn test_zeta_and_airy_kernels() {
        let e = engine();
        let z = e.real_kernel(Kernel::Zeta, &[&f(2.0)]).unwrap();
        let z = ByteOrder::Native.read_f64(&z).unwrap();
        assert!((z - std::f64::consts::PI.powi(2) / 6.0).abs() < 1e-14);

        let ai = e.real_kernel(Kernel::AiryAi, &[&f(1.0)]).unwrap();
        assert!((ByteOrder::Native.read_f64(&ai).unwrap() - 0.135_292_416_312_881_4).abs() < 1e-14);

        let w = Complex::decode(&e.complex_kernel(Kernel::Zeta, &[&f(3.0), &f(100.0)]).unwrap()).unwrap();
        assert!((w.re - 1.095_798_573_414_997_3).abs() < 1e-12);
        assert!((w.im + 0.028_464_249_779_226_95).abs() < 1e-12);

        let b = Complex::decode(&e.complex_kernel(Kernel::AiryBi, &[&f(0.0), &f(1.0)]).unwrap()).unwrap();
        assert!((b.re - 0.648_858_208_330_394_9).abs() < 1e-13);
        assert!((b.im - 0.344_958_634_768_048_4).abs() < 1e-13);
    }

    #[test]
    fn test_complex_sequences() {
        let e = engine();
        let seq = Complex::encode_seq(&[
            Complex::new(1.0, 2.0),
            Complex::new(3.0, 4.0),
            Complex::new(0.0, 2.0),
        ])
        .unwrap();
        let sum = Complex::decode(&e.complex_add(&seq).unwrap()).unwrap();
        assert_eq!(sum, Complex::new(4.0, 8.0));
    }

    #[test]
    fn test_number_theory_is_little_endian() {
        let e = engine();
        let n = ByteOrder::Little.i64_bytes(360);
        let factors = wire::decode_factors(&e.prime_factors(&n).unwrap()).unwrap();
        assert_eq!(factors, vec![(2, 3), (3, 2), (5, 1)]);

        let a = ByteOrder::Little.i64_bytes(240);
        let b = ByteOrder::Little.i64_bytes(46);
        let (g, u, v) = wire::decode_triple(&e.extended_gcd(&a, &b).unwrap()).unwrap();
        assert_eq!((g, u * 240 + v * 46), (2, 2));

        let p = e.nth_prime(&ByteOrder::Little.i64_bytes(10)).unwrap();
        assert_eq!(ByteOrder::Little.read_u64(&p).unwrap(), 29);
        let count = e.prime_pi(&ByteOrder::Little.i64_bytes(-5)).unwrap();
        assert_eq!(ByteOrder::Little.read_u64(&count).unwrap(), 0);

        assert!(e.prime_factors(&ByteOrder::Little.i64_bytes(0)).is_err());
    }
}
