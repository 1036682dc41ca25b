//! Airy functions Ai and Bi
//!
//! Ai comes from the Taylor expansion of y'' = z·y stepped out from the
//! origin, or from the asymptotic series once |z| ≥ 9. In the sector where
//! Ai decays the stepping runs inward from the asymptotic region instead,
//! which keeps the growing solution from swamping it. Bi is assembled from
//! Ai on the rotated rays.

use num_complex::Complex64;
use std::f64::consts::{FRAC_PI_3, PI};

const AI_0: f64 = 0.355_028_053_887_817_24;
const AI_PRIME_0: f64 = -0.258_819_403_792_806_8;

/// The asymptotic series reaches double precision from here out
const ASYMPTOTIC_RADIUS: f64 = 9.0;
/// Inside this radius stepping from the origin loses nothing
const SERIES_RADIUS: f64 = 2.0;
const MAX_STEP: f64 = 0.5;

/// e^{2πi/3}
fn omega() -> Complex64 {
    Complex64::from_polar(1.0, 2.0 * FRAC_PI_3)
}

/// (Ai(z), Ai'(z)) for large |z| with |arg z| ≤ 2π/3
fn asymptotic(z: Complex64) -> (Complex64, Complex64) {
    let zeta = z.powf(1.5) * (2.0 / 3.0);
    let ln_quarter = z.ln() / 4.0;
    let step = -zeta.inv();
    let mut power = Complex64::new(1.0, 0.0);
    let (mut sum_u, mut sum_v) = (power, power);
    let mut u = 1.0;
    let mut smallest = f64::INFINITY;
    for k in 1..60 {
        let k = k as f64;
        u *= (6.0 * k - 5.0) * (6.0 * k - 3.0) * (6.0 * k - 1.0) / (216.0 * k * (2.0 * k - 1.0));
        let v = -(6.0 * k + 1.0) / (6.0 * k - 1.0) * u;
        power *= step;
        let term = power * u;
        // the series diverges; stop at its smallest term
        if term.norm() > smallest {
            break;
        }
        sum_u += term;
        sum_v += power * v;
        smallest = term.norm();
        if smallest < 1e-17 * sum_u.norm() {
            break;
        }
    }
    let lead = -zeta - (2.0 * PI.sqrt()).ln();
    (
        (lead - ln_quarter).exp() * sum_u,
        -(lead + ln_quarter).exp() * sum_v,
    )
}

/// One Taylor step of y'' = t·y from `a` to `a + h`
fn taylor_step(a: Complex64, y: Complex64, dy: Complex64, h: Complex64) -> (Complex64, Complex64) {
    let h2 = h * h;
    let h3 = h2 * h;
    // d_n = c_n h^n with c_{n+2} (n+2)(n+1) = a c_n + c_{n-1}
    let (mut older, mut old, mut last) = (y, dy * h, a * h2 * y / 2.0);
    let mut value = older + old + last;
    let mut slope = old + last * 2.0;
    for n in 1..200usize {
        let next = (a * h2 * old + h3 * older) / ((n + 2) * (n + 1)) as f64;
        value += next;
        slope += next * (n + 2) as f64;
        older = old;
        old = last;
        last = next;
        let tail = older.norm().max(old.norm()).max(last.norm());
        if tail <= 1e-17 * value.norm() {
            break;
        }
    }
    (value, slope / h)
}

fn integrate(from: Complex64, y: Complex64, dy: Complex64, to: Complex64) -> (Complex64, Complex64) {
    let span = to - from;
    if span.norm() == 0.0 {
        return (y, dy);
    }
    let steps = (span.norm() / MAX_STEP).ceil().max(1.0) as usize;
    let h = span / steps as f64;
    (0..steps).fold((y, dy), |(y, dy), k| taylor_step(from + h * k as f64, y, dy, h))
}

pub fn airy_ai_complex(z: Complex64) -> Complex64 {
    if !z.is_finite() {
        return Complex64::new(f64::NAN, f64::NAN);
    }
    let r = z.norm();
    let phase = z.arg().abs();
    if r >= ASYMPTOTIC_RADIUS {
        if phase <= 2.0 * FRAC_PI_3 + 1e-9 {
            return asymptotic(z).0;
        }
        // Ai(z) + ω Ai(ωz) + ω² Ai(ω²z) = 0
        let w = omega();
        let w2 = w * w;
        return -w * airy_ai_complex(w * z) - w2 * airy_ai_complex(w2 * z);
    }
    if r > SERIES_RADIUS && phase < FRAC_PI_3 {
        let start = z * (ASYMPTOTIC_RADIUS / r);
        let (ai, ai_prime) = asymptotic(start);
        return integrate(start, ai, ai_prime, z).0;
    }
    integrate(
        Complex64::new(0.0, 0.0),
        Complex64::new(AI_0, 0.0),
        Complex64::new(AI_PRIME_0, 0.0),
        z,
    )
    .0
}

pub fn airy_bi_complex(z: Complex64) -> Complex64 {
    // Bi(z) = e^{iπ/6} Ai(ωz) + e^{-iπ/6} Ai(ω̄z)
    let w = omega();
    let e = Complex64::from_polar(1.0, PI / 6.0);
    e * airy_ai_complex(w * z) + e.conj() * airy_ai_complex(w.conj() * z)
}

pub fn airy_ai(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    if x.is_infinite() {
        return 0.0;
    }
    airy_ai_complex(Complex64::new(x, 0.0)).re
}

pub fn airy_bi(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    if x == f64::NEG_INFINITY {
        return 0.0;
    }
    let value = airy_bi_complex(Complex64::new(x, 0.0)).re;
    if x > 0.0 && !value.is_finite() {
        return f64::INFINITY;
    }
    value
}
