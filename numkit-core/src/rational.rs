//! Exact rational numbers
//!
//! A `Rational` is a sign plus two unsigned magnitudes. The denominator may
//! be zero, which encodes the IEEE-like special values:
//!
//! | num | den | value        |
//! |-----|-----|--------------|
//! | 0   | 0   | NaN          |
//! | ≠0  | 0   | ±Infinity    |
//! | 0   | ≠0  | ±0           |
//! | ≠0  | ≠0  | ordinary     |
//!
//! Constructors always produce the canonical reduced form; values decoded
//! from the wire keep whatever the engine sent.

use crate::literal::{parse_rational, LiteralError};
use dashu_int::{ops::BitTest, UBig};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;

/// Rendering flags for `Rational::format` and `Rational::to_math`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatOptions {
    /// Prefix `+` on nonnegative values
    pub plus_sign: bool,
    /// Render integers as `n/1`
    pub explicit_one: bool,
    /// `-` instead of the minus glyph `−`
    pub ascii_minus: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            plus_sign: false,
            explicit_one: false,
            ascii_minus: true,
        }
    }
}

/// Exact rational number with NaN and signed Infinity
#[derive(Debug, Clone)]
pub struct Rational {
    sign: bool,
    num: UBig,
    den: UBig,
}

fn gcd(a: &UBig, b: &UBig) -> UBig {
    let (mut a, mut b) = (a.clone(), b.clone());
    while b != UBig::ZERO {
        let r = &a % &b;
        a = b;
        b = r;
    }
    a
}

/// x · 2^exp without intermediate overflow of the scale factor
fn scale_pow2(mut x: f64, mut exp: i64) -> f64 {
    while exp > 1000 {
        x *= 2f64.powi(1000);
        exp -= 1000;
    }
    while exp < -1000 {
        x *= 2f64.powi(-1000);
        exp += 1000;
    }
    x * 2f64.powi(exp as i32)
}

impl Rational {
    // ========== Construction ==========

    /// Canonicalizing constructor: `sign` is true for nonnegative values
    pub fn new(sign: bool, num: UBig, den: UBig) -> Self {
        match (num == UBig::ZERO, den == UBig::ZERO) {
            (true, true) => Self::nan(),
            (false, true) => Self::infinity(sign),
            (true, false) => Self {
                sign,
                num,
                den: UBig::ONE,
            },
            (false, false) => {
                let g = gcd(&num, &den);
                if g == UBig::ONE {
                    Self { sign, num, den }
                } else {
                    Self {
                        sign,
                        num: &num / &g,
                        den: &den / &g,
                    }
                }
            }
        }
    }

    /// Keep the parts exactly as given (wire decoding)
    pub fn from_parts_unchecked(sign: bool, num: UBig, den: UBig) -> Self {
        Self { sign, num, den }
    }

    pub fn nan() -> Self {
        Self {
            sign: true,
            num: UBig::ZERO,
            den: UBig::ZERO,
        }
    }

    pub fn infinity(sign: bool) -> Self {
        Self {
            sign,
            num: UBig::ONE,
            den: UBig::ZERO,
        }
    }

    pub fn zero() -> Self {
        Self::from_integer(0)
    }

    pub fn one() -> Self {
        Self::from_integer(1)
    }

    pub fn from_integer(n: i64) -> Self {
        Self {
            sign: n >= 0,
            num: UBig::from(n.unsigned_abs()),
            den: UBig::ONE,
        }
    }

    /// Ratio of two integers: sign is the XOR of the operand signs
    pub fn from_ratio(p: i64, q: i64) -> Self {
        Self::new(
            (p < 0) == (q < 0),
            UBig::from(p.unsigned_abs()),
            UBig::from(q.unsigned_abs()),
        )
    }

    /// Exact value of a binary float: mantissa over a power of two
    pub fn from_f64(x: f64) -> Self {
        if x.is_nan() {
            return Self::nan();
        }
        let sign = !x.is_sign_negative();
        if x.is_infinite() {
            return Self::infinity(sign);
        }
        if x == 0.0 {
            return Self::new(sign, UBig::ZERO, UBig::ONE);
        }
        let bits = x.to_bits();
        let biased = ((bits >> 52) & 0x7ff) as i64;
        let fraction = bits & ((1u64 << 52) - 1);
        let (mantissa, exp) = if biased == 0 {
            (fraction, -1074)
        } else {
            (fraction | (1u64 << 52), biased - 1075)
        };
        let mantissa = UBig::from(mantissa);
        if exp >= 0 {
            Self::new(sign, mantissa << exp as usize, UBig::ONE)
        } else {
            Self::new(sign, mantissa, UBig::ONE << exp.unsigned_abs() as usize)
        }
    }

    // ========== Accessors ==========

    /// Raw sign flag (true = nonnegative)
    pub fn sign(&self) -> bool {
        self.sign
    }

    pub fn numerator(&self) -> &UBig {
        &self.num
    }

    pub fn denominator(&self) -> &UBig {
        &self.den
    }

    pub fn into_parts(self) -> (bool, UBig, UBig) {
        (self.sign, self.num, self.den)
    }

    // ========== Predicates ==========

    pub fn is_nan(&self) -> bool {
        self.den == UBig::ZERO && self.num == UBig::ZERO
    }

    pub fn is_infinite(&self) -> bool {
        self.den == UBig::ZERO && self.num != UBig::ZERO
    }

    pub fn is_finite(&self) -> bool {
        self.den != UBig::ZERO
    }

    /// Zero of either sign
    pub fn is_zero(&self) -> bool {
        self.num == UBig::ZERO && self.den != UBig::ZERO
    }

    pub fn is_integer(&self) -> bool {
        self.den == UBig::ONE
    }

    /// 0 when the numerator is zero (this includes NaN), otherwise ±1
    pub fn signum(&self) -> i8 {
        if self.num == UBig::ZERO {
            0
        } else if self.sign {
            1
        } else {
            -1
        }
    }

    /// Reduced form, or one of the canonical special encodings
    pub fn is_canonical(&self) -> bool {
        if self.is_nan() {
            return true;
        }
        if self.is_infinite() {
            return self.num == UBig::ONE;
        }
        if self.is_zero() {
            return self.den == UBig::ONE;
        }
        gcd(&self.num, &self.den) == UBig::ONE
    }

    // ========== Local exact operations ==========

    pub fn neg(&self) -> Self {
        if self.is_nan() {
            return Self::nan();
        }
        Self {
            sign: !self.sign,
            num: self.num.clone(),
            den: self.den.clone(),
        }
    }

    /// 1/x: zero maps to Infinity of the same sign and back
    pub fn recip(&self) -> Self {
        if self.is_nan() {
            return Self::nan();
        }
        Self::new(self.sign, self.den.clone(), self.num.clone())
    }

    pub fn abs(&self) -> Self {
        if self.is_nan() {
            return Self::nan();
        }
        Self {
            sign: true,
            num: self.num.clone(),
            den: self.den.clone(),
        }
    }

    // ========== Conversion ==========

    /// Nearest f64 (may lose precision)
    pub fn to_f64(&self) -> f64 {
        if self.is_nan() {
            return f64::NAN;
        }
        let magnitude = if self.is_infinite() {
            f64::INFINITY
        } else if self.num == UBig::ZERO {
            0.0
        } else {
            // Quotient with 64-65 significant bits, then rescale
            let shift = self.den.bit_len() as i64 - self.num.bit_len() as i64 + 64;
            let q = if shift >= 0 {
                (&self.num << shift as usize) / &self.den
            } else {
                &self.num / (&self.den << shift.unsigned_abs() as usize)
            };
            match u128::try_from(q) {
                Ok(q) => scale_pow2(q as f64, -shift),
                Err(_) => f64::NAN,
            }
        };
        if self.sign {
            magnitude
        } else {
            -magnitude
        }
    }

    // ========== Display ==========

    fn sign_prefix(&self, opts: &FormatOptions) -> &'static str {
        if self.signum() < 0 {
            if opts.ascii_minus {
                "-"
            } else {
                "\u{2212}"
            }
        } else if opts.plus_sign {
            "+"
        } else {
            ""
        }
    }

    /// Plain text rendering: `3/4`, `-5`, `∞`, `NaN`
    pub fn format(&self, opts: &FormatOptions) -> String {
        if self.is_nan() {
            return "NaN".to_string();
        }
        let prefix = self.sign_prefix(opts);
        if self.is_infinite() {
            format!("{}∞", prefix)
        } else if self.den == UBig::ONE && !opts.explicit_one {
            format!("{}{}", prefix, self.num)
        } else {
            format!("{}{}/{}", prefix, self.num, self.den)
        }
    }

    /// Math markup rendering: `frac(3, 4)`, `-5`, `∞`, `NaN`
    pub fn to_math(&self, opts: &FormatOptions) -> String {
        if self.is_nan() {
            return "NaN".to_string();
        }
        let prefix = self.sign_prefix(opts);
        if self.is_infinite() {
            format!("{}∞", prefix)
        } else if self.den == UBig::ONE && !opts.explicit_one {
            format!("{}{}", prefix, self.num)
        } else {
            format!("{}frac({}, {})", prefix, self.num, self.den)
        }
    }
}

// ========== Trait Implementations ==========

impl std::fmt::Display for Rational {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.format(&FormatOptions::default()))
    }
}

impl std::str::FromStr for Rational {
    type Err = LiteralError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_rational(s)
    }
}

impl From<i64> for Rational {
    fn from(n: i64) -> Self {
        Self::from_integer(n)
    }
}

impl Serialize for Rational {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Rational {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse_rational(&s).map_err(serde::de::Error::custom)
    }
}

/// NaN is never equal to anything; zeros are equal regardless of sign
impl PartialEq for Rational {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.is_nan() || other.is_nan() {
            return None;
        }
        let by_sign = self.signum().cmp(&other.signum());
        if by_sign != Ordering::Equal || self.signum() == 0 {
            return Some(by_sign);
        }
        let magnitude = match (self.is_infinite(), other.is_infinite()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => (&self.num * &other.den).cmp(&(&other.num * &self.den)),
        };
        Some(if self.signum() < 0 {
            magnitude.reverse()
        } else {
            magnitude
        })
    }
}
