//! Complex kernels over `num_complex::Complex64`

use super::{airy, special};
use crate::Kernel;
use num_complex::Complex64;
use num_traits::{One, Zero};
use std::f64::consts::{LN_10, LN_2};

pub fn sum(items: &[Complex64]) -> Complex64 {
    items.iter().fold(Complex64::zero(), |acc, z| acc + z)
}

pub fn product(items: &[Complex64]) -> Complex64 {
    items.iter().fold(Complex64::one(), |acc, z| acc * z)
}

/// Smith's scaled division; never forms |b|² directly
pub fn div(a: Complex64, b: Complex64) -> Complex64 {
    if b.re.abs() >= b.im.abs() {
        if b.re == 0.0 && b.im == 0.0 {
            // 0/0 stays NaN, x/0 is infinite in the direction of x
            return Complex64::new(a.re / 0.0, a.im / 0.0);
        }
        let ratio = b.im / b.re;
        let denom = b.re + b.im * ratio;
        Complex64::new(
            (a.re + a.im * ratio) / denom,
            (a.im - a.re * ratio) / denom,
        )
    } else {
        let ratio = b.re / b.im;
        let denom = b.re * ratio + b.im;
        Complex64::new(
            (a.re * ratio + a.im) / denom,
            (a.im * ratio - a.re) / denom,
        )
    }
}

pub fn pow_real(base: Complex64, exp: f64) -> Complex64 {
    if exp == 0.0 {
        return Complex64::one();
    }
    if base.is_zero() {
        return if exp > 0.0 {
            Complex64::zero()
        } else {
            Complex64::new(f64::INFINITY, 0.0)
        };
    }
    base.powf(exp)
}

pub fn pow_complex(base: Complex64, exp: Complex64) -> Complex64 {
    if exp.is_zero() {
        return Complex64::one();
    }
    if base.is_zero() {
        return if exp.re > 0.0 {
            Complex64::zero()
        } else {
            Complex64::new(f64::NAN, f64::NAN)
        };
    }
    base.powc(exp)
}

/// Evaluate a named kernel over ℂ; `None` when it has no complex form
pub fn apply(kernel: Kernel, args: &[Complex64]) -> Option<Complex64> {
    let z = *args.first()?;
    let value = match kernel {
        Kernel::Sin => z.sin(),
        Kernel::Cos => z.cos(),
        Kernel::Tan => z.tan(),
        Kernel::Asin => z.asin(),
        Kernel::Acos => z.acos(),
        Kernel::Atan => z.atan(),
        Kernel::Sinh => z.sinh(),
        Kernel::Cosh => z.cosh(),
        Kernel::Tanh => z.tanh(),
        Kernel::Asinh => z.asinh(),
        Kernel::Acosh => z.acosh(),
        Kernel::Atanh => z.atanh(),
        Kernel::Exp => z.exp(),
        Kernel::Ln => z.ln(),
        Kernel::Log2 => z.ln().unscale(LN_2),
        Kernel::Log10 => z.ln().unscale(LN_10),
        Kernel::Sqrt => z.sqrt(),
        // principal cube root
        Kernel::Cbrt => z.powf(1.0 / 3.0),
        Kernel::Gamma => special::gamma_complex(z),
        Kernel::Digamma => special::digamma_complex(z),
        Kernel::Erf => special::erf_complex(z),
        Kernel::Beta => special::beta_complex(z, *args.get(1)?),
        Kernel::Zeta => special::zeta_complex(z),
        Kernel::AiryAi => airy::airy_ai_complex(z),
        Kernel::AiryBi => airy::airy_bi_complex(z),
        Kernel::BesselJ | Kernel::BesselY => return None,
    };
    Some(value)
}
