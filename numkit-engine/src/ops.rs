//! Typed operations over a compute engine
//!
//! `Arith` is the client half of the boundary: it marshals values, makes a
//! single engine call, validates the returned buffer and decodes it.
//! Negation, reciprocal, complex subtraction and the `(p, q)` constructor
//! are computed locally.

use crate::engine::{ComputeEngine, EngineResult};
use crate::{Kernel, NativeEngine};
use numkit_core::wire::{self, ByteOrder, Marshal};
use numkit_core::{Complex, NumkitError, Rational};
use std::sync::Arc;

pub type ArithResult<T> = Result<T, NumkitError>;

#[derive(Clone)]
pub struct Arith {
    engine: Arc<dyn ComputeEngine>,
}

impl std::fmt::Debug for Arith {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Arith")
            .field("engine", &self.engine.name())
            .finish()
    }
}

impl Default for Arith {
    fn default() -> Self {
        Self::native()
    }
}

fn encode_err(err: numkit_core::WireError) -> NumkitError {
    NumkitError::from(err).with_note("while encoding engine input")
}

impl Arith {
    pub fn new(engine: Arc<dyn ComputeEngine>) -> Self {
        Self { engine }
    }

    /// Backed by the in-process engine
    pub fn native() -> Self {
        Self::new(Arc::new(NativeEngine::new()))
    }

    pub fn engine(&self) -> &dyn ComputeEngine {
        self.engine.as_ref()
    }

    fn call<F>(&self, entry: &'static str, f: F) -> ArithResult<Vec<u8>>
    where
        F: FnOnce(&dyn ComputeEngine) -> EngineResult,
    {
        tracing::trace!(engine = self.engine.name(), entry, "engine call");
        f(self.engine.as_ref()).map_err(|err| {
            tracing::debug!(engine = self.engine.name(), entry, error = %err, "engine call failed");
            NumkitError::from(err)
        })
    }

    /// Verify, then decode a rational result
    fn rational_result(&self, entry: &'static str, buf: Vec<u8>) -> ArithResult<Rational> {
        if !self.engine.verify(&buf) {
            tracing::debug!(entry, len = buf.len(), "engine returned an invalid rational buffer");
            return Err(NumkitError::invalid_encoding(format!(
                "'{}' returned a buffer that failed verification",
                entry
            )));
        }
        Ok(Rational::decode(&buf)?)
    }

    fn complex_result(&self, buf: Vec<u8>) -> ArithResult<Complex> {
        Ok(Complex::decode(&buf)?)
    }

    // ========== Rational construction ==========

    pub fn rational_from_text(&self, text: &str) -> ArithResult<Rational> {
        let buf = self.call("fraction_parse", |e| e.fraction_parse(text.as_bytes()))?;
        self.rational_result("fraction_parse", buf)
    }

    /// Exact binary value of a float
    pub fn rational_from_float(&self, x: f64) -> ArithResult<Rational> {
        let bytes = ByteOrder::Native.f64_bytes(x);
        let buf = self.call("fraction_from_float", |e| e.fraction_from_float(&bytes))?;
        self.rational_result("fraction_from_float", buf)
    }

    pub fn rational_from_ratio(&self, p: i64, q: i64) -> Rational {
        Rational::from_ratio(p, q)
    }

    // ========== Rational arithmetic ==========

    /// Sum of any number of operands; no operands gives 0
    pub fn rational_add(&self, items: &[Rational]) -> ArithResult<Rational> {
        let seq = Rational::encode_seq(items).map_err(encode_err)?;
        let buf = self.call("fraction_add", |e| e.fraction_add(&seq))?;
        self.rational_result("fraction_add", buf)
    }

    /// Product of any number of operands; no operands gives 1
    pub fn rational_mul(&self, items: &[Rational]) -> ArithResult<Rational> {
        let seq = Rational::encode_seq(items).map_err(encode_err)?;
        let buf = self.call("fraction_mul", |e| e.fraction_mul(&seq))?;
        self.rational_result("fraction_mul", buf)
    }

    pub fn rational_sub(&self, a: &Rational, b: &Rational) -> ArithResult<Rational> {
        let a = a.encode().map_err(encode_err)?;
        let b = b.encode().map_err(encode_err)?;
        let buf = self.call("fraction_sub", |e| e.fraction_sub(&a, &b))?;
        self.rational_result("fraction_sub", buf)
    }

    pub fn rational_div(&self, a: &Rational, b: &Rational) -> ArithResult<Rational> {
        let a = a.encode().map_err(encode_err)?;
        let b = b.encode().map_err(encode_err)?;
        let buf = self.call("fraction_div", |e| e.fraction_div(&a, &b))?;
        self.rational_result("fraction_div", buf)
    }

    pub fn rational_pow(&self, base: &Rational, exp: i64) -> ArithResult<Rational> {
        let base = base.encode().map_err(encode_err)?;
        let exp = ByteOrder::Native.i64_bytes(exp);
        let buf = self.call("fraction_pow", |e| e.fraction_pow(&base, &exp))?;
        self.rational_result("fraction_pow", buf)
    }

    pub fn rational_neg(&self, x: &Rational) -> Rational {
        x.neg()
    }

    pub fn rational_recip(&self, x: &Rational) -> Rational {
        x.recip()
    }

    /// Closest fraction with denominator at most `max_den` (≥ 1)
    pub fn limit_den(&self, x: &Rational, max_den: i64) -> ArithResult<Rational> {
        let x = x.encode().map_err(encode_err)?;
        let bound = ByteOrder::Native.i64_bytes(max_den);
        let buf = self.call("fraction_limit_den", |e| e.fraction_limit_den(&x, &bound))?;
        self.rational_result("fraction_limit_den", buf)
    }

    // ========== Complex arithmetic ==========

    pub fn complex_add(&self, items: &[Complex]) -> ArithResult<Complex> {
        let seq = Complex::encode_seq(items).map_err(encode_err)?;
        let buf = self.call("complex_add", |e| e.complex_add(&seq))?;
        self.complex_result(buf)
    }

    /// Componentwise, no engine call
    pub fn complex_sub(&self, a: &Complex, b: &Complex) -> Complex {
        a.sub(b)
    }

    pub fn complex_mul(&self, items: &[Complex]) -> ArithResult<Complex> {
        let seq = Complex::encode_seq(items).map_err(encode_err)?;
        let buf = self.call("complex_mul", |e| e.complex_mul(&seq))?;
        self.complex_result(buf)
    }

    pub fn complex_div(&self, a: &Complex, b: &Complex) -> ArithResult<Complex> {
        let (re1, im1) = a.encode_parts();
        let (re2, im2) = b.encode_parts();
        let buf = self.call("complex_div", |e| e.complex_div(&re1, &im1, &re2, &im2))?;
        self.complex_result(buf)
    }

    pub fn complex_pow_real(&self, base: &Complex, exp: f64) -> ArithResult<Complex> {
        let (re, im) = base.encode_parts();
        let exp = ByteOrder::Native.f64_bytes(exp);
        let buf = self.call("complex_pow_real", |e| e.complex_pow_real(&re, &im, &exp))?;
        self.complex_result(buf)
    }

    pub fn complex_pow_complex(&self, base: &Complex, exp: &Complex) -> ArithResult<Complex> {
        let (re1, im1) = base.encode_parts();
        let (re2, im2) = exp.encode_parts();
        let buf = self.call("complex_pow_complex", |e| {
            e.complex_pow_complex(&re1, &im1, &re2, &im2)
        })?;
        self.complex_result(buf)
    }

    // ========== Named kernels ==========

    pub fn real_kernel(&self, kernel: Kernel, args: &[f64]) -> ArithResult<f64> {
        let bufs: Vec<[u8; 8]> = args.iter().map(|x| ByteOrder::Native.f64_bytes(*x)).collect();
        let refs: Vec<&[u8]> = bufs.iter().map(|b| b.as_slice()).collect();
        let buf = self.call(kernel.entry_point(), |e| e.real_kernel(kernel, &refs))?;
        Ok(f64::decode(&buf)?)
    }

    pub fn complex_kernel(&self, kernel: Kernel, args: &[Complex]) -> ArithResult<Complex> {
        let bufs: Vec<[u8; 8]> = args
            .iter()
            .flat_map(|z| {
                let (re, im) = z.encode_parts();
                [re, im]
            })
            .collect();
        let refs: Vec<&[u8]> = bufs.iter().map(|b| b.as_slice()).collect();
        let buf = self.call(kernel.entry_point(), |e| e.complex_kernel(kernel, &refs))?;
        self.complex_result(buf)
    }

    // ========== Number theory ==========

    /// Ascending `(prime, multiplicity)` pairs
    pub fn prime_factors(&self, n: i64) -> ArithResult<Vec<(u64, u32)>> {
        let n = ByteOrder::Little.i64_bytes(n);
        let buf = self.call("prime_factors", |e| e.prime_factors(&n))?;
        Ok(wire::decode_factors(&buf)?)
    }

    /// `(g, u, v)` with `g = u·a + v·b`, as the engine returns it
    pub fn extended_gcd(&self, a: i64, b: i64) -> ArithResult<(i128, i128, i128)> {
        let a = ByteOrder::Little.i64_bytes(a);
        let b = ByteOrder::Little.i64_bytes(b);
        let buf = self.call("extended_gcd", |e| e.extended_gcd(&a, &b))?;
        Ok(wire::decode_triple(&buf)?)
    }

    pub fn nth_prime(&self, n: i64) -> ArithResult<u64> {
        let n = ByteOrder::Little.i64_bytes(n);
        let buf = self.call("nth_prime", |e| e.nth_prime(&n))?;
        Ok(ByteOrder::Little.read_u64(&buf)?)
    }

    pub fn prime_pi(&self, n: i64) -> ArithResult<u64> {
        let n = ByteOrder::Little.i64_bytes(n);
        let buf = self.call("prime_pi", |e| e.prime_pi(&n))?;
        Ok(ByteOrder::Little.read_u64(&buf)?)
    }
}
