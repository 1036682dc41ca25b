//! Exact rational kernels with IEEE-like special values

use dashu_base::Sign;
use dashu_int::{ops::BitTest, IBig, UBig};
use dashu_ratio::RBig;
use numkit_core::Rational;

/// Upper bound on the bit size of a power result
const MAX_POW_BITS: u128 = 1 << 26;

/// Working form: specials are explicit, finite nonzero values are `RBig`
#[derive(Debug, Clone)]
enum Ext {
    NaN,
    /// `true` for +∞
    Inf(bool),
    /// `true` for +0
    Zero(bool),
    Finite(RBig),
}

impl Ext {
    fn from_rational(r: &Rational) -> Self {
        if r.is_nan() {
            Ext::NaN
        } else if r.is_infinite() {
            Ext::Inf(r.sign())
        } else if r.is_zero() {
            Ext::Zero(r.sign())
        } else {
            let sign = if r.sign() { Sign::Positive } else { Sign::Negative };
            let num = IBig::from_parts(sign, r.numerator().clone());
            Ext::Finite(RBig::from_parts(num, r.denominator().clone()))
        }
    }

    fn into_rational(self) -> Rational {
        match self {
            Ext::NaN => Rational::nan(),
            Ext::Inf(sign) => Rational::infinity(sign),
            Ext::Zero(sign) => Rational::new(sign, UBig::ZERO, UBig::ONE),
            Ext::Finite(r) => {
                let (num, den) = r.into_parts();
                let (sign, magnitude) = num.into_parts();
                // RBig keeps lowest terms
                Rational::from_parts_unchecked(sign == Sign::Positive, magnitude, den)
            }
        }
    }

    fn finite(r: RBig) -> Self {
        if r == RBig::ZERO {
            Ext::Zero(true)
        } else {
            Ext::Finite(r)
        }
    }

    fn is_positive(r: &RBig) -> bool {
        *r > RBig::ZERO
    }

    fn add(self, other: Ext) -> Ext {
        match (self, other) {
            (Ext::NaN, _) | (_, Ext::NaN) => Ext::NaN,
            (Ext::Inf(a), Ext::Inf(b)) => {
                if a == b {
                    Ext::Inf(a)
                } else {
                    Ext::NaN
                }
            }
            (Ext::Inf(a), _) | (_, Ext::Inf(a)) => Ext::Inf(a),
            (Ext::Zero(a), Ext::Zero(b)) => Ext::Zero(a || b),
            (Ext::Zero(_), x) | (x, Ext::Zero(_)) => x,
            (Ext::Finite(a), Ext::Finite(b)) => Ext::finite(a + b),
        }
    }

    fn mul(self, other: Ext) -> Ext {
        match (self, other) {
            (Ext::NaN, _) | (_, Ext::NaN) => Ext::NaN,
            (Ext::Inf(_), Ext::Zero(_)) | (Ext::Zero(_), Ext::Inf(_)) => Ext::NaN,
            (Ext::Inf(a), Ext::Inf(b)) => Ext::Inf(a == b),
            (Ext::Inf(a), Ext::Finite(r)) | (Ext::Finite(r), Ext::Inf(a)) => {
                Ext::Inf(a == Ext::is_positive(&r))
            }
            (Ext::Zero(a), Ext::Zero(b)) => Ext::Zero(a == b),
            (Ext::Zero(a), Ext::Finite(r)) | (Ext::Finite(r), Ext::Zero(a)) => {
                Ext::Zero(a == Ext::is_positive(&r))
            }
            (Ext::Finite(a), Ext::Finite(b)) => Ext::Finite(a * b),
        }
    }

    fn neg(self) -> Ext {
        match self {
            Ext::NaN => Ext::NaN,
            Ext::Inf(s) => Ext::Inf(!s),
            Ext::Zero(s) => Ext::Zero(!s),
            Ext::Finite(r) => Ext::Finite(-r),
        }
    }

    fn recip(self) -> Ext {
        match self {
            Ext::NaN => Ext::NaN,
            Ext::Inf(s) => Ext::Zero(s),
            Ext::Zero(s) => Ext::Inf(s),
            Ext::Finite(r) => Ext::Finite(RBig::ONE / r),
        }
    }
}

// ========== Arithmetic ==========

/// Sum; the empty sum is 0
pub fn add(items: &[Rational]) -> Rational {
    items
        .iter()
        .map(Ext::from_rational)
        .fold(Ext::Zero(true), Ext::add)
        .into_rational()
}

/// Product; the empty product is 1
pub fn mul(items: &[Rational]) -> Rational {
    items
        .iter()
        .map(Ext::from_rational)
        .fold(Ext::Finite(RBig::ONE), Ext::mul)
        .into_rational()
}

pub fn sub(a: &Rational, b: &Rational) -> Rational {
    Ext::from_rational(a)
        .add(Ext::from_rational(b).neg())
        .into_rational()
}

/// x/0 is a signed Infinity, 0/0 is NaN
pub fn div(a: &Rational, b: &Rational) -> Rational {
    Ext::from_rational(a)
        .mul(Ext::from_rational(b).recip())
        .into_rational()
}

/// Integer power by repeated squaring; `x^0` is 1 for every x
pub fn pow(base: &Rational, exp: i64) -> Result<Rational, String> {
    if exp == 0 {
        return Ok(Rational::one());
    }
    let size = base.numerator().bit_len().max(base.denominator().bit_len()) as u128;
    let unit = base.is_finite() && base.numerator() == base.denominator();
    if !unit && size > 1 && size * exp.unsigned_abs() as u128 > MAX_POW_BITS {
        return Err(format!("result of raising to {} is too large", exp));
    }

    let mut result = Ext::Finite(RBig::ONE);
    let mut square = Ext::from_rational(base);
    let mut n = exp.unsigned_abs();
    while n > 0 {
        if n & 1 == 1 {
            result = result.mul(square.clone());
        }
        n >>= 1;
        if n > 0 {
            square = square.clone().mul(square);
        }
    }
    if exp < 0 {
        result = result.recip();
    }
    Ok(result.into_rational())
}

// ========== Best approximation ==========

fn abs_diff(a: &UBig, b: &UBig) -> UBig {
    if a >= b {
        a - b
    } else {
        b - a
    }
}

/// Closest fraction with denominator at most `max_den`
///
/// Walks the continued-fraction convergents of |x| until the next one would
/// exceed the bound, then weighs the best semiconvergent against the last
/// convergent. Ties go to the convergent, which has the smaller denominator.
/// Values whose denominator already fits, and non-finite values, come back
/// unchanged.
pub fn limit_den(x: &Rational, max_den: &UBig) -> Rational {
    if !x.is_finite() || x.denominator() <= max_den {
        return x.clone();
    }
    let (num, den) = (x.numerator(), x.denominator());

    let (mut p0, mut q0, mut p1, mut q1) = (UBig::ZERO, UBig::ONE, UBig::ONE, UBig::ZERO);
    let (mut n, mut d) = (num.clone(), den.clone());
    loop {
        let a = &n / &d;
        let q2 = &q0 + &a * &q1;
        if &q2 > max_den {
            break;
        }
        let p2 = &p0 + &a * &p1;
        p0 = std::mem::replace(&mut p1, p2);
        q0 = std::mem::replace(&mut q1, q2);
        let r = &n - &a * &d;
        n = std::mem::replace(&mut d, r);
    }

    let k = (max_den - &q0) / &q1;
    let semi_p = &p0 + &k * &p1;
    let semi_q = &q0 + &k * &q1;

    // |x - p/q| = |num·q - p·den| / (den·q); the common den cancels
    let err_convergent = abs_diff(&(num * &q1), &(&p1 * den)) * &semi_q;
    let err_semi = abs_diff(&(num * &semi_q), &(&semi_p * den)) * &q1;

    if err_convergent <= err_semi {
        Rational::new(x.sign(), p1, q1)
    } else {
        Rational::new(x.sign(), semi_p, semi_q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rat(text: &str) -> Rational {
        text.parse().unwrap()
    }

    fn rats(texts: &[&str]) -> Vec<Rational> {
        texts.iter().map(|t| rat(t)).collect()
    }

    mod arithmetic_tests {
        use super::*;

        #[test]
        fn test_variadic_add() {
            assert_eq!(add(&rats(&["1/2", "1/3", "-1/5"])), rat("23/30"));
            assert_eq!(add(&[]), Rational::zero());
        }

        #[test]
        fn test_variadic_mul() {
            assert_eq!(mul(&rats(&["3/4", "2/3", "4/5"])), rat("2/5"));
            assert_eq!(mul(&[]), Rational::one());
        }

        #[test]
        fn test_results_are_canonical() {
            let r = add(&rats(&["1/6", "1/3"]));
            assert!(r.is_canonical());
            assert_eq!(r, rat("1/2"));
            assert!(sub(&rat("1/2"), &rat("1/2")).is_canonical());
            assert!(div(&rat("4/9"), &rat("2/3")).is_canonical());
        }

        #[test]
        fn test_division_by_zero_is_a_value() {
            let inf = div(&rat("1"), &rat("0"));
            assert!(inf.is_infinite());
            assert_eq!(inf.signum(), 1);
            let neg_inf = div(&rat("-3"), &rat("0"));
            assert_eq!(neg_inf.signum(), -1);
            assert!(div(&rat("0"), &rat("0")).is_nan());
        }

        #[test]
        fn test_infinity_rules() {
            let inf = Rational::infinity(true);
            let ninf = Rational::infinity(false);
            assert!(add(&[inf.clone(), ninf.clone()]).is_nan());
            assert_eq!(add(&[inf.clone(), rat("5")]), inf);
            assert!(mul(&[inf.clone(), rat("0")]).is_nan());
            assert_eq!(mul(&[ninf.clone(), rat("-2")]), inf);
            assert!(div(&rat("7"), &inf).is_zero());
            assert!(add(&[Rational::nan(), rat("1")]).is_nan());
        }

        #[test]
        fn test_sub_and_div() {
            assert_eq!(sub(&rat("1/2"), &rat("1/3")), rat("1/6"));
            assert_eq!(div(&rat("3/4"), &rat("-3/8")), rat("-2"));
        }

        #[test]
        fn test_pow() {
            assert_eq!(pow(&rat("2/3"), 3).unwrap(), rat("8/27"));
            assert_eq!(pow(&rat("-2/3"), -2).unwrap(), rat("9/4"));
            assert_eq!(pow(&rat("-2"), 3).unwrap(), rat("-8"));
            assert_eq!(pow(&rat("5/7"), 0).unwrap(), rat("1"));
            let z = pow(&rat("0"), -1).unwrap();
            assert!(z.is_infinite());
            assert_eq!(z.signum(), 1);
            assert_eq!(pow(&rat("-1"), i64::MAX).unwrap(), rat("-1"));
            assert!(pow(&rat("3/2"), i64::MAX).is_err());
        }

        #[test]
        fn test_pow_size_guard() {
            // 2^100 has 101 bits
            let big = rat("1267650600228229401496703205376");
            assert_eq!(
                pow(&big, 2).unwrap(),
                rat("1606938044258990275541962092341162602522202993782792835301376")
            );
            assert!(pow(&big, 700_000).is_err());
            assert!(pow(&rat("1/1267650600228229401496703205376"), -700_000).is_err());
        }
    }

    mod limit_den_tests {
        use super::*;

        #[test]
        fn test_pi_approximation() {
            let x = rat("3.14159265");
            assert_eq!(limit_den(&x, &UBig::from(10000u32)), rat("355/113"));
            assert_eq!(limit_den(&x, &UBig::from(100u32)), rat("311/99"));
            assert_eq!(limit_den(&x, &UBig::from(10u32)), rat("22/7"));
        }

        #[test]
        fn test_negative_input() {
            let x = rat("-3.14159265");
            assert_eq!(limit_den(&x, &UBig::from(10000u32)), rat("-355/113"));
        }

        #[test]
        fn test_exact_input_unchanged() {
            let x = rat("7/12");
            assert_eq!(limit_den(&x, &UBig::from(12u8)), x);
            assert!(limit_den(&Rational::nan(), &UBig::ONE).is_nan());
        }

        #[test]
        fn test_denominator_one() {
            assert_eq!(limit_den(&rat("0.4"), &UBig::ONE), rat("0"));
            assert_eq!(limit_den(&rat("0.6"), &UBig::ONE), rat("1"));
            // equidistant from 0 and 1: smaller denominator wins, both are 1
            let half = limit_den(&rat("1/2"), &UBig::ONE);
            assert!(half == rat("0") || half == rat("1"));
        }

        #[test]
        fn test_is_best_within_bound() {
            let x = rat("0.2718281828");
            for bound in 1u32..=40 {
                let best = limit_den(&x, &UBig::from(bound));
                assert!(best.denominator() <= &UBig::from(bound));
                let best_err = sub(&x, &best).abs();
                for q in 1..=bound as i64 {
                    for p in 0..=q {
                        let err = sub(&x, &Rational::from_ratio(p, q)).abs();
                        assert!(err >= best_err, "{}/{} beats {} for bound {}", p, q, best, bound);
                    }
                }
            }
        }
    }
}
