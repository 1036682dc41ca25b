//! Special functions: gamma, digamma, erf, beta, zeta, Bessel J and Y
//!
//! Real and complex versions share the same approximations. Accuracy is
//! around 1e-13 relative for gamma, zeta and erf, 1e-10 for the Bessel
//! integrals.

use num_complex::Complex64;
use std::f64::consts::{FRAC_PI_2, LN_2, PI};

const LANCZOS_G: f64 = 7.0;
const LANCZOS_COEFFS: [f64; 9] = [
    0.999_999_999_999_809_9,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_1,
    -176.615_029_162_140_6,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_572e-6,
    1.505_632_735_149_311_6e-7,
];

fn is_non_positive_integer(x: f64) -> bool {
    x <= 0.0 && x.fract() == 0.0
}

fn lanczos_sum(z: f64) -> f64 {
    LANCZOS_COEFFS
        .iter()
        .enumerate()
        .skip(1)
        .fold(LANCZOS_COEFFS[0], |sum, (i, c)| sum + c / (z + i as f64))
}

fn lanczos_sum_complex(z: Complex64) -> Complex64 {
    LANCZOS_COEFFS
        .iter()
        .enumerate()
        .skip(1)
        .fold(Complex64::new(LANCZOS_COEFFS[0], 0.0), |sum, (i, c)| {
            sum + *c / (z + i as f64)
        })
}

/// ln sin(w), finite for any |Im w|; the branch is arbitrary
fn ln_sin(w: Complex64) -> Complex64 {
    let i = Complex64::i();
    if w.im >= 0.0 {
        -i * w + (((i * w * 2.0).exp() - 1.0) / (i * 2.0)).ln()
    } else {
        i * w + ((1.0 - (-i * w * 2.0).exp()) / (i * 2.0)).ln()
    }
}

/// cot(w) through e^{±2iw}, finite for any |Im w|
fn cot(w: Complex64) -> Complex64 {
    let i = Complex64::i();
    if w.im >= 0.0 {
        let e = (i * w * 2.0).exp();
        i * (e + 1.0) / (e - 1.0)
    } else {
        let e = (-i * w * 2.0).exp();
        i * (1.0 + e) / (1.0 - e)
    }
}

// ========== Gamma ==========

pub fn gamma(x: f64) -> f64 {
    if x.is_nan() || is_non_positive_integer(x) {
        return f64::NAN;
    }
    if x < 0.5 {
        // Γ(x)Γ(1-x) = π/sin(πx)
        return PI / ((PI * x).sin() * gamma(1.0 - x));
    }
    let z = x - 1.0;
    let t = z + LANCZOS_G + 0.5;
    // t^(z+1/2) alone overflows well before Γ does
    let half = t.powf((z + 0.5) / 2.0);
    (2.0 * PI).sqrt() * half * ((-t).exp() * half) * lanczos_sum(z)
}

/// ln Γ(x) for x > 0
pub fn ln_gamma(x: f64) -> f64 {
    if x < 0.5 {
        return ln_gamma(x + 1.0) - x.ln();
    }
    let z = x - 1.0;
    let t = z + LANCZOS_G + 0.5;
    0.5 * (2.0 * PI).ln() + (z + 0.5) * t.ln() - t + lanczos_sum(z).ln()
}

/// A logarithm of Γ(z) for Im z ≠ 0, up to a multiple of 2πi
fn ln_gamma_complex(z: Complex64) -> Complex64 {
    if z.re < 0.5 {
        return PI.ln() - ln_sin(z * PI) - ln_gamma_complex(1.0 - z);
    }
    let z = z - 1.0;
    let t = z + (LANCZOS_G + 0.5);
    0.5 * (2.0 * PI).ln() + (z + 0.5) * t.ln() - t + lanczos_sum_complex(z).ln()
}

pub fn gamma_complex(z: Complex64) -> Complex64 {
    if z.im == 0.0 {
        return Complex64::new(gamma(z.re), 0.0);
    }
    ln_gamma_complex(z).exp()
}

// ========== Digamma ==========

/// ψ(x) for |x| ≥ 10 by the asymptotic series
fn digamma_asymptotic(x: Complex64) -> Complex64 {
    let inv = x.inv();
    let inv2 = inv * inv;
    let tail = inv2
        * (1.0 / 12.0
            - inv2 * (1.0 / 120.0 - inv2 * (1.0 / 252.0 - inv2 * (1.0 / 240.0 - inv2 / 132.0))));
    x.ln() - inv * 0.5 - tail
}

pub fn digamma(x: f64) -> f64 {
    if x.is_nan() || is_non_positive_integer(x) {
        return f64::NAN;
    }
    if x < 0.5 {
        // ψ(1-x) - ψ(x) = π cot(πx)
        return digamma(1.0 - x) - PI / (PI * x).tan();
    }
    let mut x = x;
    let mut shift = 0.0;
    while x < 10.0 {
        shift += 1.0 / x;
        x += 1.0;
    }
    digamma_asymptotic(Complex64::new(x, 0.0)).re - shift
}

pub fn digamma_complex(z: Complex64) -> Complex64 {
    if z.im == 0.0 {
        return Complex64::new(digamma(z.re), 0.0);
    }
    if z.re < 0.5 {
        return digamma_complex(1.0 - z) - PI * cot(z * PI);
    }
    let mut z = z;
    let mut shift = Complex64::new(0.0, 0.0);
    while z.norm() < 10.0 {
        shift += z.inv();
        z += 1.0;
    }
    digamma_asymptotic(z) - shift
}

// ========== Error function ==========

/// Taylor series: erf z = 2/√π Σ (-1)^n z^(2n+1) / (n! (2n+1))
fn erf_series(z: Complex64) -> Complex64 {
    let z2 = z * z;
    let mut term = z;
    let mut sum = z;
    for n in 1..400 {
        term = -term * z2 / n as f64;
        let contribution = term / (2 * n + 1) as f64;
        sum += contribution;
        if contribution.norm() <= 1e-17 * sum.norm() {
            break;
        }
    }
    sum * (2.0 / PI.sqrt())
}

/// Laplace continued fraction for erfc, valid for Re z > 0
fn erfc_continued_fraction(z: Complex64) -> Complex64 {
    let mut tail = z;
    for k in (1..=120).rev() {
        tail = z + (k as f64 / 2.0) / tail;
    }
    (-z * z).exp() / (tail * PI.sqrt())
}

pub fn erf_complex(z: Complex64) -> Complex64 {
    if z.re < 0.0 {
        return -erf_complex(-z);
    }
    if z.norm() < 3.0 || z.re < 2.0 {
        erf_series(z)
    } else {
        Complex64::new(1.0, 0.0) - erfc_continued_fraction(z)
    }
}

pub fn erf(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    if x.is_infinite() {
        return x.signum();
    }
    erf_complex(Complex64::new(x, 0.0)).re
}

// ========== Beta ==========

pub fn beta(a: f64, b: f64) -> f64 {
    if a > 0.0 && b > 0.0 {
        (ln_gamma(a) + ln_gamma(b) - ln_gamma(a + b)).exp()
    } else {
        gamma(a) * gamma(b) / gamma(a + b)
    }
}

pub fn beta_complex(a: Complex64, b: Complex64) -> Complex64 {
    gamma_complex(a) * gamma_complex(b) / gamma_complex(a + b)
}

// ========== Zeta ==========

/// Borwein's acceleration needs about 0.9 more terms per unit of |Im s|
const ZETA_MAX_TERMS: usize = 380;

/// ζ(s) = η(s) / (1 - 2^(1-s)) for Re s ≥ 1/2, η by Borwein's algorithm
///
/// Accurate to ~1e-13 for |Im s| up to a few hundred.
fn zeta_borwein(s: Complex64) -> Complex64 {
    let n = ((30.0 + 0.9 * s.im.abs()).ceil() as usize).min(ZETA_MAX_TERMS);
    let nf = n as f64;
    let mut d = Vec::with_capacity(n + 1);
    let (mut term, mut acc) = (1.0, 1.0);
    d.push(acc);
    for i in 1..=n {
        let i = i as f64;
        term *= 4.0 * (nf + i - 1.0) * (nf - i + 1.0) / ((2.0 * i) * (2.0 * i - 1.0));
        acc += term;
        d.push(acc);
    }
    let dn = d[n];
    let alternating = (0..n).fold(Complex64::new(0.0, 0.0), |sum, k| {
        let sign = if k % 2 == 0 { 1.0 } else { -1.0 };
        sum + (-s * ((k + 1) as f64).ln()).exp() * (sign * (d[k] - dn))
    });
    let eta = -alternating / dn;
    eta / (1.0 - ((1.0 - s) * LN_2).exp())
}

pub fn zeta(s: f64) -> f64 {
    if s.is_nan() || s == f64::NEG_INFINITY {
        return f64::NAN;
    }
    if s == f64::INFINITY {
        return 1.0;
    }
    if s == 1.0 {
        return f64::INFINITY;
    }
    if s == 0.0 {
        return -0.5;
    }
    if s < 0.0 && s % 2.0 == 0.0 {
        return 0.0;
    }
    if s < 0.5 {
        // ζ(s) = 2^s π^(s-1) sin(πs/2) Γ(1-s) ζ(1-s)
        let scale = (s * LN_2 + (s - 1.0) * PI.ln() + ln_gamma(1.0 - s)).exp();
        return scale * (PI * s / 2.0).sin() * zeta(1.0 - s);
    }
    zeta_borwein(Complex64::new(s, 0.0)).re
}

pub fn zeta_complex(s: Complex64) -> Complex64 {
    if s.im == 0.0 {
        return Complex64::new(zeta(s.re), 0.0);
    }
    if s.re < 0.5 {
        // reflection, with every factor but ζ(1-s) in log space
        let ln_scale = s * LN_2
            + (s - 1.0) * PI.ln()
            + ln_sin(s * FRAC_PI_2)
            + ln_gamma_complex(1.0 - s);
        return ln_scale.exp() * zeta_borwein(1.0 - s);
    }
    zeta_borwein(s)
}

// ========== Bessel ==========

/// Beyond this the Hankel expansion is used
const BESSEL_ASYMPTOTIC: f64 = 1.0e4;

/// Hankel expansion: returns (J_n(x), Y_n(x)) for large x
fn bessel_hankel(n: i64, x: f64) -> (f64, f64) {
    let mu = 4.0 * (n as f64) * (n as f64);
    let e = 8.0 * x;
    let p = 1.0 - (mu - 1.0) * (mu - 9.0) / (2.0 * e * e)
        + (mu - 1.0) * (mu - 9.0) * (mu - 25.0) * (mu - 49.0) / (24.0 * e.powi(4));
    let q = (mu - 1.0) / e - (mu - 1.0) * (mu - 9.0) * (mu - 25.0) / (6.0 * e.powi(3));
    let chi = x - (n as f64 / 2.0 + 0.25) * PI;
    let scale = (2.0 / (PI * x)).sqrt();
    (
        scale * (p * chi.cos() - q * chi.sin()),
        scale * (p * chi.sin() + q * chi.cos()),
    )
}

/// Power series for order large against x, where the quadrature only
/// resolves values down to ~1e-16 absolute
fn bessel_j_series(n: i64, x: f64) -> f64 {
    let order = n.unsigned_abs() as f64;
    let half = x.abs() / 2.0;
    let lead = (order * half.ln() - ln_gamma(order + 1.0)).exp();
    let (mut term, mut sum) = (1.0, 1.0);
    for k in 1..300 {
        let k = k as f64;
        term *= -(half * half) / (k * (order + k));
        sum += term;
        if term.abs() < 1e-17 * sum.abs() {
            break;
        }
    }
    // J_{-n} = (-1)^n J_n and J_n(-x) = (-1)^n J_n(x)
    let flips = (n < 0) as u32 + (x < 0.0) as u32;
    if n % 2 != 0 && flips == 1 {
        -lead * sum
    } else {
        lead * sum
    }
}

/// Bessel J_n(x) for integer n
///
/// The integrand of J_n(x) = 1/(2π) ∫ cos(nτ - x sin τ) dτ over a full
/// period is smooth and periodic, so the trapezoid rule converges
/// exponentially once the step resolves its oscillation.
pub fn bessel_j(n: i64, x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    if x.is_infinite() {
        return 0.0;
    }
    if n != 0 && (x / 2.0).powi(2) <= n.unsigned_abs() as f64 + 1.0 {
        return bessel_j_series(n, x);
    }
    if x.abs() > BESSEL_ASYMPTOTIC && x.abs() > (n as f64).powi(2) {
        let (j, _) = bessel_hankel(n.abs(), x.abs());
        let odd_flip = |v: f64, odd: bool| if odd { -v } else { v };
        let j = odd_flip(j, n < 0 && n % 2 != 0);
        return odd_flip(j, x < 0.0 && n % 2 != 0);
    }
    let m = (2.0 * (x.abs() + n.unsigned_abs() as f64)) as usize + 64;
    let step = 2.0 * PI / m as f64;
    let sum: f64 = (0..m)
        .map(|k| {
            let tau = k as f64 * step;
            (n as f64 * tau - x * tau.sin()).cos()
        })
        .sum();
    sum / m as f64
}

/// Composite Simpson's rule over [a, b] with an even number of intervals
fn simpson(f: impl Fn(f64) -> f64, a: f64, b: f64, intervals: usize) -> f64 {
    let n = intervals + intervals % 2;
    let h = (b - a) / n as f64;
    let mut sum = f(a) + f(b);
    for i in 1..n {
        let weight = if i % 2 == 1 { 4.0 } else { 2.0 };
        sum += weight * f(a + i as f64 * h);
    }
    sum * h / 3.0
}

/// Bessel Y_n(x) for integer n and x > 0; -∞ at 0, NaN for x < 0
///
/// Y_n(x) = 1/π ∫₀^π sin(x sin τ - nτ) dτ
///        - 1/π ∫₀^∞ (e^{nt} + (-1)^n e^{-nt}) e^{-x sinh t} dt
pub fn bessel_y(n: i64, x: f64) -> f64 {
    if x.is_nan() || x < 0.0 {
        return f64::NAN;
    }
    if x == 0.0 {
        return f64::NEG_INFINITY;
    }
    if x.is_infinite() {
        return 0.0;
    }
    let sign = if n < 0 && n % 2 != 0 { -1.0 } else { 1.0 };
    let n = n.abs();
    if x > BESSEL_ASYMPTOTIC && x > (n as f64).powi(2) {
        return sign * bessel_hankel(n, x).1;
    }

    let nf = n as f64;
    let oscillating = simpson(
        |tau| (x * tau.sin() - nf * tau).sin(),
        0.0,
        PI,
        4096 + 256 * (x + nf) as usize,
    );

    // Cut the tail where the integrand drops below e^-40 past its peak
    let peak = (nf / x).max(1.0).acosh();
    let mut upper = peak + 1.0;
    while upper < 1000.0 && nf * upper - x * upper.sinh() > -40.0 {
        upper += 0.5;
    }
    let parity = if n % 2 == 0 { 1.0 } else { -1.0 };
    let decaying = simpson(
        |t| ((nf * t - x * t.sinh()).exp()) + parity * ((-nf * t - x * t.sinh()).exp()),
        0.0,
        upper,
        8192,
    );

    sign * (oscillating - decaying) / PI
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol * b.abs().max(1.0)
    }

    fn relative(a: f64, b: f64) -> f64 {
        (a - b).abs() / b.abs()
    }

    fn near(a: Complex64, b: Complex64, tol: f64) -> bool {
        (a - b).norm() <= tol * b.norm()
    }

    #[test]
    fn test_gamma_real() {
        assert!(close(gamma(5.0), 24.0, 1e-12));
        assert!(close(gamma(0.5), PI.sqrt(), 1e-12));
        assert!(close(gamma(-0.5), -2.0 * PI.sqrt(), 1e-12));
        assert!(gamma(0.0).is_nan());
        assert!(gamma(-3.0).is_nan());
    }

    #[test]
    fn test_gamma_complex() {
        // Γ(i) ≈ -0.1549498283 - 0.4980156681i
        let g = gamma_complex(Complex64::new(0.0, 1.0));
        assert!(close(g.re, -0.154_949_828_301_810_7, 1e-10));
        assert!(close(g.im, -0.498_015_668_118_356, 1e-10));
        // Γ(z+1) = zΓ(z)
        let z = Complex64::new(1.5, 2.0);
        let lhs = gamma_complex(z + 1.0);
        let rhs = z * gamma_complex(z);
        assert!((lhs - rhs).norm() < 1e-10 * rhs.norm());
    }

    #[test]
    fn test_digamma() {
        let euler = 0.577_215_664_901_532_9;
        assert!(close(digamma(1.0), -euler, 1e-12));
        assert!(close(digamma(0.5), -euler - 2.0 * 2f64.ln(), 1e-12));
        assert!(close(digamma(10.0), 2.251_752_589_066_721, 1e-12));
        assert!(digamma(-2.0).is_nan());
        // ψ(z+1) = ψ(z) + 1/z
        let z = Complex64::new(0.3, -1.2);
        let diff = digamma_complex(z + 1.0) - digamma_complex(z) - z.inv();
        assert!(diff.norm() < 1e-10);
    }

    #[test]
    fn test_erf() {
        assert_eq!(erf(0.0), 0.0);
        assert!(close(erf(0.5), 0.520_499_877_813_046_5, 1e-13));
        assert!(close(erf(1.0), 0.842_700_792_949_714_9, 1e-13));
        assert!(close(erf(-2.0), -0.995_322_265_018_952_7, 1e-13));
        assert!(close(erf(4.0), 0.999_999_984_582_742_1, 1e-13));
        assert_eq!(erf(f64::NEG_INFINITY), -1.0);
    }

    #[test]
    fn test_erf_complex_symmetry() {
        let z = Complex64::new(0.7, 0.4);
        let conj = erf_complex(z.conj());
        assert!((conj - erf_complex(z).conj()).norm() < 1e-13);
        // erf(1+i) ≈ 1.3161512816979477 + 0.19045346923783471i
        let w = erf_complex(Complex64::new(1.0, 1.0));
        assert!(close(w.re, 1.316_151_281_697_947_7, 1e-10));
        assert!(close(w.im, 0.190_453_469_237_834_7, 1e-10));
    }

    #[test]
    fn test_beta() {
        assert!(close(beta(2.0, 3.0), 1.0 / 12.0, 1e-12));
        assert!(close(beta(0.5, 0.5), PI, 1e-12));
        let b = beta_complex(Complex64::new(2.0, 0.0), Complex64::new(3.0, 0.0));
        assert!(close(b.re, 1.0 / 12.0, 1e-12));
    }

    #[test]
    fn test_bessel_j() {
        assert!(close(bessel_j(0, 1.0), 0.765_197_686_557_966_6, 1e-12));
        assert!(close(bessel_j(1, 2.5), 0.497_094_102_464_274_1, 1e-12));
        assert!(close(bessel_j(2, 10.0), 0.254_630_313_685_120_5, 1e-12));
        assert!(close(bessel_j(-1, 2.5), -0.497_094_102_464_274_1, 1e-12));
        assert_eq!(bessel_j(0, 0.0), 1.0);
    }

    #[test]
    fn test_bessel_y() {
        assert!(close(bessel_y(0, 1.0), 0.088_256_964_215_676_96, 1e-8));
        assert!(close(bessel_y(1, 1.0), -0.781_212_821_300_288_7, 1e-8));
        assert!(close(bessel_y(2, 5.0), 0.367_662_882_605_524_5, 1e-8));
        assert_eq!(bessel_y(0, 0.0), f64::NEG_INFINITY);
        assert!(bessel_y(1, -1.0).is_nan());
    }

    #[test]
    fn test_gamma_near_overflow() {
        assert!(relative(gamma(150.0), 3.808_922_637_630_569_7e260) < 1e-12);
        assert!(relative(gamma(170.0), 4.269_068_009_004_705e304) < 1e-12);
        assert!(relative(gamma(171.0), 7.257_415_615_307_999e306) < 1e-12);
        assert!(relative(ln_gamma(171.0), 7.257_415_615_307_999e306_f64.ln()) < 1e-14);
        assert_eq!(gamma(172.0), f64::INFINITY);
    }

    #[test]
    fn test_gamma_complex_far_from_real_axis() {
        let cases = [
            (
                Complex64::new(0.25, 300.0),
                Complex64::new(-1.310_007_906_260_744_3e-205, -2.207_964_804_036_092_3e-206),
            ),
            (
                Complex64::new(0.5, 200.0),
                Complex64::new(3.881_833_484_497_034e-137, -8.286_541_434_060_954e-137),
            ),
            (
                Complex64::new(0.0, 200.0),
                Complex64::new(-2.206_156_165_509_389e-138, -6.082_809_798_380_234_7e-138),
            ),
            (
                Complex64::new(-3.5, 250.0),
                Complex64::new(1.460_335_239_596_035e-180, -1.087_187_880_594_771_4e-180),
            ),
        ];
        for (z, expected) in cases {
            let g = gamma_complex(z);
            assert!(near(g, expected, 1e-11), "Γ({}) = {}", z, g);
        }
        // |Γ(1/2 + iy)|² = π / cosh(πy)
        let modulus = gamma_complex(Complex64::new(0.5, 200.0)).norm_sqr();
        let ln_expected = PI.ln() - (200.0 * PI - LN_2);
        assert!((modulus.ln() - ln_expected).abs() < 1e-11);
    }

    #[test]
    fn test_digamma_complex_far_from_real_axis() {
        let d = digamma_complex(Complex64::new(0.2, 400.0));
        assert!(near(d, Complex64::new(5.991_464_567_941_391, 1.571_546_327_044_897), 1e-12));
        // the reflection branch stays finite where cot(πz) would overflow
        let z = Complex64::new(-3.3, 250.0);
        let diff = digamma_complex(z + 1.0) - digamma_complex(z) - z.inv();
        assert!(diff.norm() < 1e-12);
    }

    #[test]
    fn test_zeta_real() {
        assert!(close(zeta(2.0), PI * PI / 6.0, 1e-14));
        assert!(close(zeta(3.0), 1.202_056_903_159_594_2, 1e-14));
        assert!(close(zeta(0.5), -1.460_354_508_809_586_8, 1e-14));
        assert!(close(zeta(-1.0), -1.0 / 12.0, 1e-14));
        assert!(close(zeta(-7.0), 1.0 / 240.0, 1e-14));
        assert_eq!(zeta(0.0), -0.5);
        assert_eq!(zeta(-2.0), 0.0);
        assert_eq!(zeta(1.0), f64::INFINITY);
        assert_eq!(zeta(f64::INFINITY), 1.0);
        assert!(zeta(f64::NAN).is_nan());
    }

    #[test]
    fn test_zeta_complex() {
        let cases = [
            (
                Complex64::new(0.0, 1.0),
                Complex64::new(0.003_300_223_685_324_102_9, -0.418_155_449_141_321_7),
            ),
            (
                Complex64::new(3.0, 100.0),
                Complex64::new(1.095_798_573_414_997_3, -0.028_464_249_779_226_95),
            ),
            (
                Complex64::new(2.0, 300.0),
                Complex64::new(1.130_679_300_849_921, -0.181_629_048_366_229_93),
            ),
            (
                Complex64::new(-2.0, 30.0),
                Complex64::new(-46.675_067_801_817_63, 7.506_879_031_028_488),
            ),
            (
                Complex64::new(-0.5, 0.3),
                Complex64::new(-0.182_080_580_340_378_95, -0.103_100_338_727_741_25),
            ),
        ];
        for (s, expected) in cases {
            let z = zeta_complex(s);
            assert!(near(z, expected, 1e-11), "ζ({}) = {}", s, z);
        }
        // first nontrivial zero
        let zero = zeta_complex(Complex64::new(0.5, 14.134_725_141_734_693));
        assert!(zero.norm() < 1e-12);
    }

    #[test]
    fn test_bessel_large_argument() {
        let cases = [
            (0, 100.0, 0.019_985_850_304_223_122, -0.077_244_313_365_083_15),
            (1, 250.0, -0.043_269_038_410_330_75, 0.025_966_992_185_484_582),
            (3, 1000.0, -0.004_827_420_825_203_948, 0.024_765_269_345_790_95),
            (5, 50.0, -0.081_400_247_696_569_64, -0.078_548_413_913_081_65),
            (0, 20_000.0, 0.005_565_974_904_954_946, -0.000_922_448_896_060_731),
        ];
        for (n, x, j, y) in cases {
            assert!((bessel_j(n, x) - j).abs() < 1e-13, "J_{}({})", n, x);
            assert!((bessel_y(n, x) - y).abs() < 1e-10, "Y_{}({})", n, x);
        }
        assert!((bessel_j(2, 12_345.6) - 5.278_899_118_717_242e-4).abs() < 1e-13);
    }

    #[test]
    fn test_bessel_large_order() {
        assert!((bessel_j(20, 30.0) - 0.004_831_019_993_404_064_5).abs() < 1e-13);
        assert!((bessel_y(20, 30.0) + 0.168_481_539_487_426_77).abs() < 1e-10);
        assert!((bessel_j(50, 60.0) + 0.137_982_731_485_352_12).abs() < 1e-13);
        assert!((bessel_y(50, 60.0) - 0.008_641_769_962_674_49).abs() < 1e-10);
        // order well past the argument: values far below the quadrature floor
        assert!(relative(bessel_j(30, 5.0), 2.671_177_278_250_799e-21) < 1e-12);
        assert!(relative(bessel_j(100, 10.0), 6.597_316_064_155_382e-89) < 1e-11);
        assert!(relative(bessel_j(10, 1.0), 2.630_615_123_687_453_4e-10) < 1e-12);
        assert!(relative(bessel_j(-31, 5.0), -bessel_j(31, 5.0)) < 1e-15);
    }
}
