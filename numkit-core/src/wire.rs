//! Marshalling protocol for the compute-engine boundary
//!
//! Every engine call takes and returns plain byte buffers:
//!
//! - `i64` / `f64`: 8 bytes. General kernels use the platform's native byte
//!   order; the number-theory entry points use little-endian. Both
//!   conventions are part of the boundary and are kept separate.
//! - `Rational`: CBOR map `{"sign": bool, "num": uint, "den": uint}`.
//!   Magnitudes above `u64::MAX` are CBOR bignums (tag 2, big-endian bytes).
//! - `Complex`: 16 bytes, `re` then `im`, native order.
//! - Sequences: a CBOR array of records for rationals, back-to-back fixed
//!   width chunks for the flat kinds.

use crate::{Complex, Rational, Value, ValueKind};
use ciborium::value::Value as Cbor;
use dashu_int::UBig;
use thiserror::Error;

/// CBOR tag for an unsigned bignum
const TAG_UNSIGNED_BIGNUM: u64 = 2;

/// Error raised when a buffer fails validation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WireError {
    #[error("expected {expected} bytes, got {got}")]
    Length { expected: usize, got: usize },

    #[error("malformed CBOR: {0}")]
    Cbor(String),

    #[error("bad rational record: {0}")]
    Record(String),

    #[error("{0} values have no binary encoding")]
    Unencodable(&'static str),
}

fn record_error(details: impl Into<String>) -> WireError {
    WireError::Record(details.into())
}

// ========== Scalars ==========

/// Byte order of a fixed-width scalar buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    Native,
    Little,
}

fn word(bytes: &[u8]) -> Result<[u8; 8], WireError> {
    bytes.try_into().map_err(|_| WireError::Length {
        expected: 8,
        got: bytes.len(),
    })
}

impl ByteOrder {
    pub fn f64_bytes(self, x: f64) -> [u8; 8] {
        match self {
            ByteOrder::Native => x.to_ne_bytes(),
            ByteOrder::Little => x.to_le_bytes(),
        }
    }

    pub fn i64_bytes(self, n: i64) -> [u8; 8] {
        match self {
            ByteOrder::Native => n.to_ne_bytes(),
            ByteOrder::Little => n.to_le_bytes(),
        }
    }

    pub fn u64_bytes(self, n: u64) -> [u8; 8] {
        match self {
            ByteOrder::Native => n.to_ne_bytes(),
            ByteOrder::Little => n.to_le_bytes(),
        }
    }

    pub fn read_f64(self, bytes: &[u8]) -> Result<f64, WireError> {
        let w = word(bytes)?;
        Ok(match self {
            ByteOrder::Native => f64::from_ne_bytes(w),
            ByteOrder::Little => f64::from_le_bytes(w),
        })
    }

    pub fn read_i64(self, bytes: &[u8]) -> Result<i64, WireError> {
        let w = word(bytes)?;
        Ok(match self {
            ByteOrder::Native => i64::from_ne_bytes(w),
            ByteOrder::Little => i64::from_le_bytes(w),
        })
    }

    pub fn read_u64(self, bytes: &[u8]) -> Result<u64, WireError> {
        let w = word(bytes)?;
        Ok(match self {
            ByteOrder::Native => u64::from_ne_bytes(w),
            ByteOrder::Little => u64::from_le_bytes(w),
        })
    }
}

// ========== Marshal ==========

/// A value kind that can cross the engine boundary
pub trait Marshal: Sized {
    const KIND: ValueKind;

    fn encode(&self) -> Result<Vec<u8>, WireError>;

    fn decode(bytes: &[u8]) -> Result<Self, WireError>;

    fn encode_seq(items: &[Self]) -> Result<Vec<u8>, WireError>;

    fn decode_seq(bytes: &[u8]) -> Result<Vec<Self>, WireError>;
}

/// Split a flat buffer into `width`-byte chunks
fn chunks(bytes: &[u8], width: usize) -> Result<std::slice::ChunksExact<'_, u8>, WireError> {
    if bytes.len() % width != 0 {
        return Err(WireError::Length {
            expected: (bytes.len() / width + 1) * width,
            got: bytes.len(),
        });
    }
    Ok(bytes.chunks_exact(width))
}

impl Marshal for i64 {
    const KIND: ValueKind = ValueKind::Int;

    fn encode(&self) -> Result<Vec<u8>, WireError> {
        Ok(ByteOrder::Native.i64_bytes(*self).to_vec())
    }

    fn decode(bytes: &[u8]) -> Result<Self, WireError> {
        ByteOrder::Native.read_i64(bytes)
    }

    fn encode_seq(items: &[Self]) -> Result<Vec<u8>, WireError> {
        Ok(items
            .iter()
            .flat_map(|n| ByteOrder::Native.i64_bytes(*n))
            .collect())
    }

    fn decode_seq(bytes: &[u8]) -> Result<Vec<Self>, WireError> {
        chunks(bytes, 8)?.map(Self::decode).collect()
    }
}

impl Marshal for f64 {
    const KIND: ValueKind = ValueKind::Real;

    fn encode(&self) -> Result<Vec<u8>, WireError> {
        Ok(ByteOrder::Native.f64_bytes(*self).to_vec())
    }

    fn decode(bytes: &[u8]) -> Result<Self, WireError> {
        ByteOrder::Native.read_f64(bytes)
    }

    fn encode_seq(items: &[Self]) -> Result<Vec<u8>, WireError> {
        Ok(items
            .iter()
            .flat_map(|x| ByteOrder::Native.f64_bytes(*x))
            .collect())
    }

    fn decode_seq(bytes: &[u8]) -> Result<Vec<Self>, WireError> {
        chunks(bytes, 8)?.map(Self::decode).collect()
    }
}

impl Complex {
    /// The two flat float buffers a complex kernel takes
    pub fn encode_parts(&self) -> ([u8; 8], [u8; 8]) {
        (
            ByteOrder::Native.f64_bytes(self.re),
            ByteOrder::Native.f64_bytes(self.im),
        )
    }
}

impl Marshal for Complex {
    const KIND: ValueKind = ValueKind::Complex;

    fn encode(&self) -> Result<Vec<u8>, WireError> {
        let (re, im) = self.encode_parts();
        let mut out = Vec::with_capacity(16);
        out.extend_from_slice(&re);
        out.extend_from_slice(&im);
        Ok(out)
    }

    /// First 8 bytes are `re`, the remainder is `im`
    fn decode(bytes: &[u8]) -> Result<Self, WireError> {
        if bytes.len() != 16 {
            return Err(WireError::Length {
                expected: 16,
                got: bytes.len(),
            });
        }
        let (re, im) = bytes.split_at(8);
        Ok(Complex::new(
            ByteOrder::Native.read_f64(re)?,
            ByteOrder::Native.read_f64(im)?,
        ))
    }

    fn encode_seq(items: &[Self]) -> Result<Vec<u8>, WireError> {
        let mut out = Vec::with_capacity(items.len() * 16);
        for z in items {
            out.extend(z.encode()?);
        }
        Ok(out)
    }

    fn decode_seq(bytes: &[u8]) -> Result<Vec<Self>, WireError> {
        chunks(bytes, 16)?.map(Self::decode).collect()
    }
}

// ========== Rational records ==========

fn magnitude_to_cbor(m: &UBig) -> Cbor {
    match u64::try_from(m.clone()) {
        Ok(small) => Cbor::Integer(small.into()),
        Err(_) => Cbor::Tag(
            TAG_UNSIGNED_BIGNUM,
            Box::new(Cbor::Bytes(m.to_be_bytes().to_vec())),
        ),
    }
}

fn magnitude_from_cbor(field: &str, value: Cbor) -> Result<UBig, WireError> {
    match value {
        Cbor::Integer(i) => {
            let n = i128::from(i);
            if n < 0 {
                return Err(record_error(format!("'{}' is negative", field)));
            }
            Ok(UBig::from(n as u128))
        }
        Cbor::Tag(TAG_UNSIGNED_BIGNUM, inner) => match *inner {
            Cbor::Bytes(bytes) => Ok(UBig::from_be_bytes(&bytes)),
            _ => Err(record_error(format!("'{}' bignum tag without bytes", field))),
        },
        _ => Err(record_error(format!("'{}' is not an unsigned integer", field))),
    }
}

pub(crate) fn rational_to_cbor(r: &Rational) -> Cbor {
    Cbor::Map(vec![
        (Cbor::Text("sign".into()), Cbor::Bool(r.sign())),
        (Cbor::Text("num".into()), magnitude_to_cbor(r.numerator())),
        (Cbor::Text("den".into()), magnitude_to_cbor(r.denominator())),
    ])
}

pub(crate) fn rational_from_cbor(value: Cbor) -> Result<Rational, WireError> {
    let entries = match value {
        Cbor::Map(entries) => entries,
        _ => return Err(record_error("expected a map")),
    };

    let mut sign = None;
    let mut num = None;
    let mut den = None;
    for (key, field) in entries {
        let key = match key {
            Cbor::Text(key) => key,
            _ => return Err(record_error("non-text key")),
        };
        match key.as_str() {
            "sign" => match field {
                Cbor::Bool(b) => sign = Some(b),
                _ => return Err(record_error("'sign' is not a bool")),
            },
            "num" => num = Some(magnitude_from_cbor("num", field)?),
            "den" => den = Some(magnitude_from_cbor("den", field)?),
            other => return Err(record_error(format!("unknown field '{}'", other))),
        }
    }

    match (sign, num, den) {
        (Some(sign), Some(num), Some(den)) => Ok(Rational::from_parts_unchecked(sign, num, den)),
        _ => Err(record_error("missing field")),
    }
}

/// Serialize a CBOR value tree
pub fn to_cbor(value: &Cbor) -> Result<Vec<u8>, WireError> {
    let mut out = Vec::new();
    ciborium::ser::into_writer(value, &mut out).map_err(|e| WireError::Cbor(e.to_string()))?;
    Ok(out)
}

/// Parse exactly one CBOR item; trailing bytes are an error
pub fn from_cbor(bytes: &[u8]) -> Result<Cbor, WireError> {
    let mut reader = bytes;
    let value: Cbor =
        ciborium::de::from_reader(&mut reader).map_err(|e| WireError::Cbor(e.to_string()))?;
    if !reader.is_empty() {
        return Err(WireError::Cbor(format!("{} trailing bytes", reader.len())));
    }
    Ok(value)
}

impl Marshal for Rational {
    const KIND: ValueKind = ValueKind::Rational;

    fn encode(&self) -> Result<Vec<u8>, WireError> {
        to_cbor(&rational_to_cbor(self))
    }

    fn decode(bytes: &[u8]) -> Result<Self, WireError> {
        rational_from_cbor(from_cbor(bytes)?)
    }

    fn encode_seq(items: &[Self]) -> Result<Vec<u8>, WireError> {
        to_cbor(&Cbor::Array(items.iter().map(rational_to_cbor).collect()))
    }

    fn decode_seq(bytes: &[u8]) -> Result<Vec<Self>, WireError> {
        match from_cbor(bytes)? {
            Cbor::Array(items) => items.into_iter().map(rational_from_cbor).collect(),
            _ => Err(record_error("expected an array of records")),
        }
    }
}

/// Check that a buffer holds exactly one well-formed rational record
pub fn verify_rational(bytes: &[u8]) -> Result<(), WireError> {
    Rational::decode(bytes).map(|_| ())
}

// ========== Number-theory payloads ==========

/// `[[prime, multiplicity], ...]`
pub fn encode_factors(factors: &[(u64, u32)]) -> Result<Vec<u8>, WireError> {
    let items = factors
        .iter()
        .map(|&(p, m)| Cbor::Array(vec![Cbor::Integer(p.into()), Cbor::Integer(m.into())]))
        .collect();
    to_cbor(&Cbor::Array(items))
}

pub fn decode_factors(bytes: &[u8]) -> Result<Vec<(u64, u32)>, WireError> {
    let items = match from_cbor(bytes)? {
        Cbor::Array(items) => items,
        _ => return Err(record_error("factor list is not an array")),
    };
    items
        .into_iter()
        .map(|item| match item {
            Cbor::Array(pair) => match pair.as_slice() {
                [Cbor::Integer(p), Cbor::Integer(m)] => {
                    let p = u64::try_from(*p).map_err(|_| record_error("prime out of range"))?;
                    let m = u32::try_from(*m)
                        .map_err(|_| record_error("multiplicity out of range"))?;
                    Ok((p, m))
                }
                _ => Err(record_error("factor entry is not [prime, multiplicity]")),
            },
            _ => Err(record_error("factor entry is not an array")),
        })
        .collect()
}

/// `[g, u, v]`
pub fn encode_triple(triple: (i128, i128, i128)) -> Result<Vec<u8>, WireError> {
    let (g, u, v) = triple;
    let to_int = |n: i128| {
        ciborium::value::Integer::try_from(n)
            .map(Cbor::Integer)
            .map_err(|_| record_error("integer out of CBOR range"))
    };
    to_cbor(&Cbor::Array(vec![to_int(g)?, to_int(u)?, to_int(v)?]))
}

pub fn decode_triple(bytes: &[u8]) -> Result<(i128, i128, i128), WireError> {
    match from_cbor(bytes)? {
        Cbor::Array(items) => match items.as_slice() {
            [Cbor::Integer(g), Cbor::Integer(u), Cbor::Integer(v)] => {
                Ok((i128::from(*g), i128::from(*u), i128::from(*v)))
            }
            _ => Err(record_error("expected [g, u, v]")),
        },
        _ => Err(record_error("expected an array")),
    }
}

// ========== Codec table ==========

/// Decoder for one value kind
pub struct Codec {
    pub kind: ValueKind,
    pub decode: fn(&[u8]) -> Result<Value, WireError>,
}

fn decode_int(bytes: &[u8]) -> Result<Value, WireError> {
    i64::decode(bytes).map(Value::Int)
}

fn decode_real(bytes: &[u8]) -> Result<Value, WireError> {
    f64::decode(bytes).map(Value::Real)
}

fn decode_rational(bytes: &[u8]) -> Result<Value, WireError> {
    Rational::decode(bytes).map(Value::Rational)
}

fn decode_complex(bytes: &[u8]) -> Result<Value, WireError> {
    Complex::decode(bytes).map(Value::Complex)
}

static CODECS: [Codec; 4] = [
    Codec {
        kind: ValueKind::Int,
        decode: decode_int,
    },
    Codec {
        kind: ValueKind::Real,
        decode: decode_real,
    },
    Codec {
        kind: ValueKind::Rational,
        decode: decode_rational,
    },
    Codec {
        kind: ValueKind::Complex,
        decode: decode_complex,
    },
];

/// Look up the codec for a kind (None for Text and List)
pub fn codec(kind: ValueKind) -> Option<&'static Codec> {
    CODECS.iter().find(|c| c.kind == kind)
}

/// Encode any value that has a binary form
pub fn encode(value: &Value) -> Result<Vec<u8>, WireError> {
    match value {
        Value::Int(n) => n.encode(),
        Value::Real(x) => x.encode(),
        Value::Rational(r) => r.encode(),
        Value::Complex(z) => z.encode(),
        other => Err(WireError::Unencodable(other.type_name())),
    }
}

/// Decode a buffer as the expected kind
pub fn decode(bytes: &[u8], kind: ValueKind) -> Result<Value, WireError> {
    let codec = codec(kind).ok_or(WireError::Unencodable(kind.name()))?;
    (codec.decode)(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rat(text: &str) -> Rational {
        text.parse().unwrap()
    }

    #[test]
    fn test_byte_orders_differ_only_in_layout() {
        let le = ByteOrder::Little.i64_bytes(-42);
        assert_eq!(le, (-42i64).to_le_bytes());
        assert_eq!(ByteOrder::Little.read_i64(&le).unwrap(), -42);
        let ne = ByteOrder::Native.f64_bytes(2.5);
        assert_eq!(ByteOrder::Native.read_f64(&ne).unwrap(), 2.5);
        assert!(ByteOrder::Little.read_u64(&[1, 2, 3]).is_err());
    }

    #[test]
    fn test_rational_record_fields() {
        let bytes = rat("-3/4").encode().unwrap();
        match from_cbor(&bytes).unwrap() {
            Cbor::Map(entries) => {
                let keys: Vec<_> = entries
                    .iter()
                    .filter_map(|(k, _)| k.as_text().map(str::to_string))
                    .collect();
                assert_eq!(keys, vec!["sign", "num", "den"]);
            }
            other => panic!("expected map, got {:?}", other),
        }
    }

    #[test]
    fn test_rational_round_trip_with_bignums() {
        for text in ["0", "-7/3", "1/0", "-1/0", "-98765432109876543210987654321098765432109876543210/7"] {
            let r = rat(text);
            let back = Rational::decode(&r.encode().unwrap()).unwrap();
            assert_eq!(back, r, "{}", text);
            assert_eq!(back.sign(), r.sign());
        }
        let nan = Rational::decode(&Rational::nan().encode().unwrap()).unwrap();
        assert!(nan.is_nan());
    }

    #[test]
    fn test_rational_sequence() {
        let items = vec![rat("1/2"), rat("1/3"), rat("-1/5")];
        let back = Rational::decode_seq(&Rational::encode_seq(&items).unwrap()).unwrap();
        assert_eq!(back, items);
    }

    #[test]
    fn test_invalid_rational_buffers() {
        assert!(verify_rational(&[]).is_err());
        assert!(verify_rational(&[0xff, 0x00]).is_err());
        // trailing garbage after a valid record
        let mut bytes = rat("1/2").encode().unwrap();
        bytes.push(0);
        assert!(verify_rational(&bytes).is_err());
        // a map missing "den"
        let partial = Cbor::Map(vec![
            (Cbor::Text("sign".into()), Cbor::Bool(true)),
            (Cbor::Text("num".into()), Cbor::Integer(1u64.into())),
        ]);
        assert!(matches!(
            Rational::decode(&to_cbor(&partial).unwrap()),
            Err(WireError::Record(_))
        ));
        // negative magnitude
        let negative = Cbor::Map(vec![
            (Cbor::Text("sign".into()), Cbor::Bool(true)),
            (Cbor::Text("num".into()), Cbor::Integer((-1i64).into())),
            (Cbor::Text("den".into()), Cbor::Integer(1u64.into())),
        ]);
        assert!(Rational::decode(&to_cbor(&negative).unwrap()).is_err());
    }

    #[test]
    fn test_complex_layout() {
        let z = Complex::new(1.5, -2.0);
        let bytes = z.encode().unwrap();
        assert_eq!(bytes.len(), 16);
        assert_eq!(&bytes[..8], &1.5f64.to_ne_bytes());
        assert_eq!(Complex::decode(&bytes).unwrap(), z);
        assert!(matches!(
            Complex::decode(&bytes[..12]),
            Err(WireError::Length { expected: 16, got: 12 })
        ));
    }

    #[test]
    fn test_complex_sequence() {
        let items = vec![Complex::new(1.0, 2.0), Complex::new(3.0, 4.0)];
        let bytes = Complex::encode_seq(&items).unwrap();
        assert_eq!(bytes.len(), 32);
        assert_eq!(Complex::decode_seq(&bytes).unwrap(), items);
        assert!(Complex::decode_seq(&bytes[..20]).is_err());
    }

    #[test]
    fn test_number_theory_payloads() {
        let factors = vec![(2, 3), (3, 2), (5, 1)];
        assert_eq!(decode_factors(&encode_factors(&factors).unwrap()).unwrap(), factors);
        let triple = (6, -1, 1);
        assert_eq!(decode_triple(&encode_triple(triple).unwrap()).unwrap(), triple);
    }

    #[test]
    fn test_codec_table() {
        let v = Value::Rational(rat("5/8"));
        assert_eq!(decode(&encode(&v).unwrap(), ValueKind::Rational).unwrap(), v);
        let v = Value::Int(-9);
        assert_eq!(decode(&encode(&v).unwrap(), ValueKind::Int).unwrap(), v);
        assert!(codec(ValueKind::Text).is_none());
        assert!(matches!(
            encode(&Value::Text("x".into())),
            Err(WireError::Unencodable("Text"))
        ));
    }
}
