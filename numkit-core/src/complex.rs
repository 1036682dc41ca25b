//! Complex numbers as a pair of binary64 floats

use crate::literal::{parse_complex, LiteralError};
use serde::{Deserialize, Serialize};

/// Complex number `re + im·i`
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    pub const I: Complex = Complex { re: 0.0, im: 1.0 };

    pub fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    pub fn from_real(re: f64) -> Self {
        Self { re, im: 0.0 }
    }

    pub fn from_polar(r: f64, theta: f64) -> Self {
        Self {
            re: r * theta.cos(),
            im: r * theta.sin(),
        }
    }

    pub fn re(&self) -> f64 {
        self.re
    }

    pub fn im(&self) -> f64 {
        self.im
    }

    pub fn conj(&self) -> Self {
        Self::new(self.re, -self.im)
    }

    /// Modulus |z|
    pub fn abs(&self) -> f64 {
        self.re.hypot(self.im)
    }

    /// Principal argument in (-π, π]
    pub fn arg(&self) -> f64 {
        self.im.atan2(self.re)
    }

    pub fn norm_sqr(&self) -> f64 {
        self.re * self.re + self.im * self.im
    }

    /// Componentwise difference
    pub fn sub(&self, other: &Complex) -> Self {
        Self::new(self.re - other.re, self.im - other.im)
    }

    pub fn is_nan(&self) -> bool {
        self.re.is_nan() || self.im.is_nan()
    }

    pub fn is_real(&self) -> bool {
        self.im == 0.0
    }
}

impl std::ops::Neg for Complex {
    type Output = Complex;

    fn neg(self) -> Complex {
        Complex::new(-self.re, -self.im)
    }
}

/// `re±|im|i`, always parseable back to the same value
impl std::fmt::Display for Complex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let op = if self.im.is_sign_negative() { '-' } else { '+' };
        write!(f, "{}{}{}i", self.re, op, self.im.abs())
    }
}

impl std::str::FromStr for Complex {
    type Err = LiteralError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_complex(s)
    }
}

impl From<f64> for Complex {
    fn from(re: f64) -> Self {
        Self::from_real(re)
    }
}

impl From<(f64, f64)> for Complex {
    fn from((re, im): (f64, f64)) -> Self {
        Self::new(re, im)
    }
}
