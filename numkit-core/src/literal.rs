//! Literal grammar for rational and complex numbers
//!
//! Rational forms: `3/4`, `5/-4`, `-12`, `0.125`, `0.1[6]` (repeating block),
//! `2.5e-3`, `inf`, `-∞`, `nan`. Complex forms: `1+2i`, `-2-3.5i`, `2i`,
//! `-i`, `4`.
//!
//! Decimal notation converts to an exact fraction; no float is involved.

use crate::{Complex, Rational};
use dashu_int::UBig;
use pest::iterators::{Pair, Pairs};
use pest::Parser;
use pest_derive::Parser;
use thiserror::Error;

/// Largest decimal exponent accepted in rational literals
const MAX_EXPONENT: u64 = 100_000;

#[derive(Parser)]
#[grammar = "literal.pest"]
struct LiteralParser;

/// Error type for literal parsing
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LiteralError {
    #[error("invalid literal '{text}': {details}")]
    Syntax { text: String, details: String },

    #[error("exponent out of range in '{0}'")]
    Overflow(String),
}

impl LiteralError {
    fn syntax(text: &str, details: impl Into<String>) -> Self {
        LiteralError::Syntax {
            text: text.to_string(),
            details: details.into(),
        }
    }
}

/// Parse the single top-level literal under `rule`, returning its content pair.
fn parse_top(rule: Rule, src: &str) -> Result<Pair<'_, Rule>, LiteralError> {
    let mut pairs = LiteralParser::parse(rule, src)
        .map_err(|e| LiteralError::syntax(src, e.variant.message().to_string()))?;
    pairs
        .next()
        .and_then(|top| top.into_inner().next())
        .ok_or_else(|| LiteralError::syntax(src, "empty literal"))
}

/// `false` if a minus sign appears among the pairs
fn sign_of(pairs: Pairs<'_, Rule>) -> bool {
    !pairs.into_iter().any(|p| p.as_rule() == Rule::minus)
}

fn ubig(src: &str, digits: &str) -> Result<UBig, LiteralError> {
    digits
        .parse::<UBig>()
        .map_err(|_| LiteralError::syntax(src, format!("bad digits '{}'", digits)))
}

fn pow10(exp: usize) -> UBig {
    UBig::from(10u8).pow(exp)
}

// ========== Rational ==========

/// Parse a rational literal
pub fn parse_rational(text: &str) -> Result<Rational, LiteralError> {
    let src = text.trim();
    let literal = parse_top(Rule::rational, src)?;
    match literal.as_rule() {
        Rule::infinity => Ok(Rational::infinity(sign_of(literal.into_inner()))),
        Rule::nan => Ok(Rational::nan()),
        Rule::fraction => {
            let mut parts = literal.into_inner();
            let (num_sign, num) = signed_int(src, parts.next())?;
            let (den_sign, den) = signed_int(src, parts.next())?;
            Ok(Rational::new(num_sign == den_sign, num, den))
        }
        Rule::decimal => decimal(src, literal),
        other => Err(LiteralError::syntax(src, format!("unexpected {:?}", other))),
    }
}

fn signed_int(src: &str, pair: Option<Pair<'_, Rule>>) -> Result<(bool, UBig), LiteralError> {
    let pair = pair.ok_or_else(|| LiteralError::syntax(src, "missing integer"))?;
    let mut sign = true;
    let mut magnitude = None;
    for part in pair.into_inner() {
        match part.as_rule() {
            Rule::minus => sign = false,
            Rule::digits => magnitude = Some(ubig(src, part.as_str())?),
            _ => {}
        }
    }
    let magnitude = magnitude.ok_or_else(|| LiteralError::syntax(src, "missing digits"))?;
    Ok((sign, magnitude))
}

/// value = (whole·10^r + rep − whole) / (10^k · (10^r − 1)), scaled by the exponent
fn decimal(src: &str, pair: Pair<'_, Rule>) -> Result<Rational, LiteralError> {
    let mut sign = true;
    let mut int_digits = "";
    let mut frac_digits = "";
    let mut rep_digits = "";
    let mut exponent: i64 = 0;

    for part in pair.into_inner() {
        match part.as_rule() {
            Rule::minus => sign = false,
            Rule::digits => int_digits = part.as_str(),
            Rule::after_point => frac_digits = part.as_str(),
            Rule::repeating => {
                rep_digits = part
                    .into_inner()
                    .next()
                    .map(|d| d.as_str())
                    .unwrap_or("");
            }
            Rule::exponent => exponent = decimal_exponent(src, part)?,
            _ => {}
        }
    }

    let whole_digits = format!("{}{}", int_digits, frac_digits);
    let whole = ubig(src, &whole_digits)?;
    let (mut num, mut den) = if rep_digits.is_empty() {
        (whole, pow10(frac_digits.len()))
    } else {
        let extended = ubig(src, &format!("{}{}", whole_digits, rep_digits))?;
        let block = pow10(rep_digits.len()) - UBig::ONE;
        (extended - whole, pow10(frac_digits.len()) * block)
    };

    if exponent > 0 {
        num *= pow10(exponent as usize);
    } else if exponent < 0 {
        den *= pow10(exponent.unsigned_abs() as usize);
    }

    Ok(Rational::new(sign, num, den))
}

fn decimal_exponent(src: &str, pair: Pair<'_, Rule>) -> Result<i64, LiteralError> {
    let mut negative = false;
    let mut value: Option<u64> = None;
    for part in pair.into_inner() {
        match part.as_rule() {
            Rule::minus => negative = true,
            Rule::digits => {
                value = part.as_str().parse::<u64>().ok();
                if value.map_or(true, |v| v > MAX_EXPONENT) {
                    return Err(LiteralError::Overflow(src.to_string()));
                }
            }
            _ => {}
        }
    }
    let value = value.ok_or_else(|| LiteralError::syntax(src, "missing exponent digits"))? as i64;
    Ok(if negative { -value } else { value })
}

// ========== Complex ==========

/// Parse a complex literal of the form `re±imi`
pub fn parse_complex(text: &str) -> Result<Complex, LiteralError> {
    let src = text.trim();
    let literal = parse_top(Rule::complex, src)?;
    match literal.as_rule() {
        Rule::rectangular => {
            let mut parts = literal.into_inner();
            let re = parts
                .next()
                .ok_or_else(|| LiteralError::syntax(src, "missing real part"))
                .and_then(|p| component(src, p))?;
            let im = parts
                .next()
                .ok_or_else(|| LiteralError::syntax(src, "missing imaginary part"))
                .and_then(|p| component(src, p))?;
            Ok(Complex::new(re, im))
        }
        Rule::imaginary => Ok(Complex::new(0.0, component(src, literal)?)),
        Rule::real => Ok(Complex::new(component(src, literal)?, 0.0)),
        other => Err(LiteralError::syntax(src, format!("unexpected {:?}", other))),
    }
}

/// Signed float component; a missing magnitude (as in `-i`) means 1
fn component(src: &str, pair: Pair<'_, Rule>) -> Result<f64, LiteralError> {
    let mut negative = false;
    let mut magnitude = 1.0;
    for part in pair.into_inner() {
        match part.as_rule() {
            Rule::minus => negative = true,
            Rule::magnitude => {
                magnitude = part
                    .as_str()
                    .to_ascii_lowercase()
                    .parse::<f64>()
                    .map_err(|e| LiteralError::syntax(src, e.to_string()))?;
            }
            _ => {}
        }
    }
    Ok(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rat(sign: bool, num: u64, den: u64) -> Rational {
        Rational::new(sign, UBig::from(num), UBig::from(den))
    }

    #[test]
    fn test_fraction_signs_xor() {
        assert_eq!(parse_rational("5/-4").unwrap(), rat(false, 5, 4));
        assert_eq!(parse_rational("-5/4").unwrap(), rat(false, 5, 4));
        assert_eq!(parse_rational("-5/-4").unwrap(), rat(true, 5, 4));
        assert_eq!(parse_rational("+5/4").unwrap(), rat(true, 5, 4));
    }

    #[test]
    fn test_fraction_is_reduced() {
        let r = parse_rational("6/8").unwrap();
        assert_eq!(r.numerator(), &UBig::from(3u8));
        assert_eq!(r.denominator(), &UBig::from(4u8));
    }

    #[test]
    fn test_special_fractions() {
        let inf = parse_rational("1/0").unwrap();
        assert!(inf.is_infinite());
        assert_eq!(inf.signum(), 1);
        let neg_inf = parse_rational("-3/0").unwrap();
        assert!(neg_inf.is_infinite());
        assert_eq!(neg_inf.signum(), -1);
        assert!(parse_rational("0/0").unwrap().is_nan());
    }

    #[test]
    fn test_decimal() {
        assert_eq!(parse_rational("0.125").unwrap(), rat(true, 1, 8));
        assert_eq!(parse_rational("-2.5").unwrap(), rat(false, 5, 2));
        assert_eq!(parse_rational("7.").unwrap(), rat(true, 7, 1));
        assert_eq!(parse_rational("42").unwrap(), rat(true, 42, 1));
    }

    #[test]
    fn test_repeating_decimal_is_exact() {
        assert_eq!(parse_rational("0.[3]").unwrap(), rat(true, 1, 3));
        assert_eq!(parse_rational("0.1[6]").unwrap(), rat(true, 1, 6));
        assert_eq!(parse_rational("1.[3]").unwrap(), rat(true, 4, 3));
        assert_eq!(parse_rational("0.[142857]").unwrap(), rat(true, 1, 7));
        assert_eq!(parse_rational("-0.[9]").unwrap(), rat(false, 1, 1));
    }

    #[test]
    fn test_exponent() {
        assert_eq!(parse_rational("2.5e3").unwrap(), rat(true, 2500, 1));
        assert_eq!(parse_rational("15E-1").unwrap(), rat(true, 3, 2));
        assert!(matches!(
            parse_rational("1e999999999"),
            Err(LiteralError::Overflow(_))
        ));
    }

    #[test]
    fn test_unicode_minus_and_tokens() {
        assert_eq!(parse_rational("\u{2212}3/4").unwrap(), rat(false, 3, 4));
        assert!(parse_rational("∞").unwrap().is_infinite());
        assert_eq!(parse_rational("-inf").unwrap().signum(), -1);
        assert!(parse_rational("NaN").unwrap().is_nan());
    }

    #[test]
    fn test_rational_rejects_garbage() {
        for bad in ["", "abc", "1/", "/2", "1.2.3", "1.[]", "1.2[3", "3/4/5", "1 2"] {
            assert!(parse_rational(bad).is_err(), "should reject {:?}", bad);
        }
    }

    #[test]
    fn test_complex_forms() {
        assert_eq!(parse_complex("1+2i").unwrap(), Complex::new(1.0, 2.0));
        assert_eq!(parse_complex("-2+3i").unwrap(), Complex::new(-2.0, 3.0));
        assert_eq!(parse_complex("1.5-0.25i").unwrap(), Complex::new(1.5, -0.25));
        assert_eq!(parse_complex("2i").unwrap(), Complex::new(0.0, 2.0));
        assert_eq!(parse_complex("-i").unwrap(), Complex::new(0.0, -1.0));
        assert_eq!(parse_complex("3").unwrap(), Complex::new(3.0, 0.0));
        assert_eq!(parse_complex("1e3-2e-1i").unwrap(), Complex::new(1000.0, -0.2));
    }

    #[test]
    fn test_complex_rejects_garbage() {
        for bad in ["", "i2", "1+2", "1+2j", "++1i", "1 + 2i"] {
            assert!(parse_complex(bad).is_err(), "should reject {:?}", bad);
        }
    }
}
