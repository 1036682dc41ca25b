//! Compute engine interface
//!
//! A compute engine is a fixed catalog of pure functions over byte buffers.
//! Buffers follow `numkit_core::wire`. Implementations hold no per-call
//! state and must be callable from several threads at once.

use crate::{EngineError, Kernel};

pub type EngineResult = Result<Vec<u8>, EngineError>;

/// Stateless numeric backend
pub trait ComputeEngine: Send + Sync {
    fn name(&self) -> &'static str;

    /// Check a rational record before the caller trusts it
    fn verify(&self, buf: &[u8]) -> bool;

    // ========== Rational kernels ==========

    /// UTF-8 literal text to a record
    fn fraction_parse(&self, text: &[u8]) -> EngineResult;
    /// Native-order f64 to its exact record
    fn fraction_from_float(&self, x: &[u8]) -> EngineResult;
    /// Sum of a record sequence
    fn fraction_add(&self, seq: &[u8]) -> EngineResult;
    /// Product of a record sequence
    fn fraction_mul(&self, seq: &[u8]) -> EngineResult;
    fn fraction_sub(&self, a: &[u8], b: &[u8]) -> EngineResult;
    fn fraction_div(&self, a: &[u8], b: &[u8]) -> EngineResult;
    /// Record raised to a native-order i64 power
    fn fraction_pow(&self, base: &[u8], exp: &[u8]) -> EngineResult;
    /// Best approximation with denominator at most a native-order i64
    fn fraction_limit_den(&self, x: &[u8], max_den: &[u8]) -> EngineResult;

    // ========== Complex kernels ==========

    /// Sum of back-to-back 16-byte values
    fn complex_add(&self, seq: &[u8]) -> EngineResult;
    fn complex_mul(&self, seq: &[u8]) -> EngineResult;
    fn complex_div(&self, re1: &[u8], im1: &[u8], re2: &[u8], im2: &[u8]) -> EngineResult;
    fn complex_pow_real(&self, re: &[u8], im: &[u8], exp: &[u8]) -> EngineResult;
    fn complex_pow_complex(&self, re1: &[u8], im1: &[u8], re2: &[u8], im2: &[u8])
        -> EngineResult;

    // ========== Named functions ==========

    /// `kernel.arity()` native-order f64 buffers in, one f64 buffer out
    fn real_kernel(&self, kernel: Kernel, args: &[&[u8]]) -> EngineResult;
    /// `2 * kernel.arity()` buffers (re, im pairs) in, 16 bytes out
    fn complex_kernel(&self, kernel: Kernel, args: &[&[u8]]) -> EngineResult;

    // ========== Number theory (little-endian) ==========

    /// `[[prime, multiplicity], ...]` for an i64 n
    fn prime_factors(&self, n: &[u8]) -> EngineResult;
    /// `[g, u, v]` with `g = u·a + v·b` for i64 a, b
    fn extended_gcd(&self, a: &[u8], b: &[u8]) -> EngineResult;
    /// The n-th prime (1-based) as u64
    fn nth_prime(&self, n: &[u8]) -> EngineResult;
    /// Count of primes ≤ n as u64
    fn prime_pi(&self, n: &[u8]) -> EngineResult;
}
