//! Conversion procedures between scalar wire payloads and native values.
//!
//! Every procedure receives a [`Conversion`] describing the pair being
//! converted. Decoders get the raw payload (empty for null) and encoders get a
//! value whose variant already matches the native kind.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use cqlcodec_core::{CodecError, IntLayout, NativeType, ScalarKind, Value, WireType};
use cqlcodec_wire::{
    dec_bigint, dec_bool, dec_decimal, dec_double, dec_float, dec_int, dec_short, dec_tiny,
    dec_varint, enc_bigint, enc_bool, enc_decimal, enc_double, enc_float, enc_int, enc_short,
    enc_tiny, enc_varint,
};
use num_bigint::BigInt;
use uuid::Uuid;

use crate::config::IntegerOverflow;

/// One native/wire pair at a dispatch site.
pub struct Conversion<'a> {
    pub native: &'a NativeType,
    /// Primitive kind of `native`, after alias resolution.
    pub kind: ScalarKind,
    pub wire_type: WireType,
    pub overflow: IntegerOverflow,
}

impl Conversion<'_> {
    fn malformed(&self, detail: impl Into<String>) -> CodecError {
        CodecError::malformed(self.wire_type, detail)
    }

    fn mismatch(&self, value: &Value) -> CodecError {
        value.type_mismatch(self.kind.type_name()).into()
    }

    /// Signed layout of a fixed-width integer wire type.
    fn wire_layout(&self) -> Option<IntLayout> {
        let bytes = self.wire_type.int_width()?;
        Some(IntLayout {
            bits: bytes as u32 * 8,
            signed: true,
        })
    }
}

pub type DecodeFn = fn(&Conversion<'_>, &[u8]) -> Result<Value, CodecError>;
pub type EncodeFn = fn(&Conversion<'_>, &Value) -> Result<Vec<u8>, CodecError>;

fn read_int(c: &Conversion<'_>, p: &[u8]) -> i128 {
    match c.wire_type {
        WireType::TinyInt => i128::from(dec_tiny(p)),
        WireType::SmallInt => i128::from(dec_short(p)),
        WireType::Int => i128::from(dec_int(p)),
        _ => i128::from(dec_bigint(p)),
    }
}

/// Write the low-order bits of `v` at the width of the wire type.
fn write_int(c: &Conversion<'_>, wire: IntLayout, v: i128) -> Vec<u8> {
    let v = wire.wrap(v);
    match c.wire_type {
        WireType::TinyInt => enc_tiny(v as i8),
        WireType::SmallInt => enc_short(v as i16),
        WireType::Int => enc_int(v as i32),
        _ => enc_bigint(v as i64),
    }
}

fn int_value(kind: ScalarKind, v: i128) -> Value {
    match kind {
        ScalarKind::I8 => Value::I8(v as i8),
        ScalarKind::I16 => Value::I16(v as i16),
        ScalarKind::I32 => Value::I32(v as i32),
        ScalarKind::I64 => Value::I64(v as i64),
        ScalarKind::Isize => Value::Isize(v as isize),
        ScalarKind::U8 => Value::U8(v as u8),
        ScalarKind::U16 => Value::U16(v as u16),
        ScalarKind::U32 => Value::U32(v as u32),
        ScalarKind::U64 => Value::U64(v as u64),
        _ => Value::Usize(v as usize),
    }
}

// ---------------------------------------------------------------------------
// Fixed-width integers
// ---------------------------------------------------------------------------

pub fn int_to_int(c: &Conversion<'_>, p: &[u8]) -> Result<Value, CodecError> {
    let (Some(wire), Some(native)) = (c.wire_layout(), c.kind.int_layout()) else {
        return Err(CodecError::UnsupportedConversion {
            wire_type: c.wire_type,
            native: c.native.to_string(),
        });
    };
    let raw = read_int(c, p);
    let v = if wire.bits > native.bits {
        match c.overflow {
            IntegerOverflow::Checked if !native.contains(raw) => {
                return Err(CodecError::out_of_range(raw, c.native.to_string()));
            }
            IntegerOverflow::Checked => raw,
            IntegerOverflow::Wrap => native.wrap(raw),
        }
    } else if native.signed {
        raw
    } else {
        // Unsigned widening reinterprets the wire bit pattern.
        IntLayout {
            bits: wire.bits,
            signed: false,
        }
        .wrap(raw)
    };
    Ok(int_value(c.kind, v))
}

pub fn int_from_int(c: &Conversion<'_>, v: &Value) -> Result<Vec<u8>, CodecError> {
    let (Some(wire), Some(native), Some(n)) = (c.wire_layout(), c.kind.int_layout(), v.as_integer())
    else {
        return Err(c.mismatch(v));
    };
    if native.bits > wire.bits && c.overflow == IntegerOverflow::Checked {
        let target = IntLayout {
            bits: wire.bits,
            signed: native.signed,
        };
        if !target.contains(n) {
            return Err(CodecError::out_of_range(n, c.wire_type.as_str()));
        }
    }
    Ok(write_int(c, wire, n))
}

pub fn int_to_string(c: &Conversion<'_>, p: &[u8]) -> Result<Value, CodecError> {
    Ok(Value::string(read_int(c, p).to_string()))
}

pub fn string_to_int(c: &Conversion<'_>, v: &Value) -> Result<Vec<u8>, CodecError> {
    let (Some(wire), Some(s)) = (c.wire_layout(), v.try_str()?) else {
        return Err(c.mismatch(v));
    };
    let n: i128 = s
        .parse()
        .map_err(|_| c.malformed(format!("'{s}' is not an integer")))?;
    if !wire.contains(n) {
        return Err(CodecError::out_of_range(n, c.wire_type.as_str()));
    }
    Ok(write_int(c, wire, n))
}

// ---------------------------------------------------------------------------
// Text and blobs
// ---------------------------------------------------------------------------

pub fn text_to_string(c: &Conversion<'_>, p: &[u8]) -> Result<Value, CodecError> {
    let s = std::str::from_utf8(p).map_err(|e| c.malformed(e.to_string()))?;
    Ok(Value::string(s))
}

pub fn string_to_text(c: &Conversion<'_>, v: &Value) -> Result<Vec<u8>, CodecError> {
    let s = v.try_str()?.ok_or_else(|| c.mismatch(v))?;
    Ok(s.as_bytes().to_vec())
}

pub fn text_to_bytes(_: &Conversion<'_>, p: &[u8]) -> Result<Value, CodecError> {
    Ok(Value::bytes(p))
}

pub fn bytes_to_text(c: &Conversion<'_>, v: &Value) -> Result<Vec<u8>, CodecError> {
    let b = v.try_bytes()?.ok_or_else(|| c.mismatch(v))?;
    Ok(b.to_vec())
}

// ---------------------------------------------------------------------------
// Varint, uuid and inet rendered as text
// ---------------------------------------------------------------------------

pub fn varint_to_string(_: &Conversion<'_>, p: &[u8]) -> Result<Value, CodecError> {
    Ok(Value::string(dec_varint(p).to_string()))
}

pub fn string_to_varint(c: &Conversion<'_>, v: &Value) -> Result<Vec<u8>, CodecError> {
    let s = v.try_str()?.ok_or_else(|| c.mismatch(v))?;
    let n: BigInt = s
        .parse()
        .map_err(|_| c.malformed(format!("'{s}' is not an integer")))?;
    Ok(enc_varint(&n))
}

fn parse_uuid(c: &Conversion<'_>, p: &[u8]) -> Result<Uuid, CodecError> {
    Uuid::from_slice(p).map_err(|_| c.malformed(format!("expected 16 bytes, got {}", p.len())))
}

pub fn uuid_to_string(c: &Conversion<'_>, p: &[u8]) -> Result<Value, CodecError> {
    if p.is_empty() {
        return Ok(Value::string(""));
    }
    Ok(Value::string(parse_uuid(c, p)?.to_string()))
}

pub fn string_to_uuid(c: &Conversion<'_>, v: &Value) -> Result<Vec<u8>, CodecError> {
    let s = v.try_str()?.ok_or_else(|| c.mismatch(v))?;
    if s.is_empty() {
        return Ok(Vec::new());
    }
    let id = Uuid::parse_str(s).map_err(|e| c.malformed(e.to_string()))?;
    Ok(id.as_bytes().to_vec())
}

pub fn uuid_to_bytes(c: &Conversion<'_>, p: &[u8]) -> Result<Value, CodecError> {
    if p.is_empty() {
        return Ok(Value::bytes(p));
    }
    Ok(Value::bytes(parse_uuid(c, p)?.as_bytes()))
}

pub fn bytes_to_uuid(c: &Conversion<'_>, v: &Value) -> Result<Vec<u8>, CodecError> {
    let b = v.try_bytes()?.ok_or_else(|| c.mismatch(v))?;
    if b.is_empty() {
        return Ok(Vec::new());
    }
    Ok(parse_uuid(c, b)?.as_bytes().to_vec())
}

pub fn inet_to_string(c: &Conversion<'_>, p: &[u8]) -> Result<Value, CodecError> {
    let addr = match p.len() {
        0 => return Ok(Value::string("")),
        4 => {
            let mut octets = [0u8; 4];
            octets.copy_from_slice(p);
            IpAddr::V4(Ipv4Addr::from(octets))
        }
        16 => {
            let mut octets = [0u8; 16];
            octets.copy_from_slice(p);
            let v6 = Ipv6Addr::from(octets);
            match v6.to_ipv4_mapped() {
                Some(v4) => IpAddr::V4(v4),
                None => IpAddr::V6(v6),
            }
        }
        n => return Err(c.malformed(format!("expected 4 or 16 bytes, got {n}"))),
    };
    Ok(Value::string(addr.to_string()))
}

pub fn string_to_inet(c: &Conversion<'_>, v: &Value) -> Result<Vec<u8>, CodecError> {
    let s = v.try_str()?.ok_or_else(|| c.mismatch(v))?;
    if s.is_empty() {
        return Ok(Vec::new());
    }
    let addr: IpAddr = s
        .parse()
        .map_err(|_| c.malformed(format!("'{s}' is not an IP address")))?;
    Ok(match addr {
        IpAddr::V4(v4) => v4.octets().to_vec(),
        IpAddr::V6(v6) => v6.octets().to_vec(),
    })
}

// ---------------------------------------------------------------------------
// Arbitrary precision
// ---------------------------------------------------------------------------

/// Every integer wire type is read as two's complement of its full payload.
pub fn varint_to_bigint(_: &Conversion<'_>, p: &[u8]) -> Result<Value, CodecError> {
    Ok(Value::BigInt(dec_varint(p)))
}

pub fn bigint_to_varint(c: &Conversion<'_>, v: &Value) -> Result<Vec<u8>, CodecError> {
    let n = v.try_bigint()?.ok_or_else(|| c.mismatch(v))?;
    Ok(enc_varint(n))
}

pub fn bigint_to_int(c: &Conversion<'_>, v: &Value) -> Result<Vec<u8>, CodecError> {
    let (Some(wire), Some(n)) = (c.wire_layout(), v.try_bigint()?) else {
        return Err(c.mismatch(v));
    };
    let n = i128::try_from(n)
        .ok()
        .filter(|n| wire.contains(*n))
        .ok_or_else(|| CodecError::out_of_range(n, c.wire_type.as_str()))?;
    Ok(write_int(c, wire, n))
}

pub fn decimal_to_decimal(_: &Conversion<'_>, p: &[u8]) -> Result<Value, CodecError> {
    Ok(Value::Decimal(dec_decimal(p)?))
}

pub fn decimal_from_decimal(c: &Conversion<'_>, v: &Value) -> Result<Vec<u8>, CodecError> {
    let d = v.try_decimal()?.ok_or_else(|| c.mismatch(v))?;
    enc_decimal(d)
}

// ---------------------------------------------------------------------------
// Booleans and floats
// ---------------------------------------------------------------------------

pub fn boolean_to_bool(_: &Conversion<'_>, p: &[u8]) -> Result<Value, CodecError> {
    Ok(Value::Bool(dec_bool(p)))
}

pub fn bool_to_boolean(c: &Conversion<'_>, v: &Value) -> Result<Vec<u8>, CodecError> {
    let b = v.try_bool()?.ok_or_else(|| c.mismatch(v))?;
    Ok(enc_bool(b))
}

pub fn float_to_f32(_: &Conversion<'_>, p: &[u8]) -> Result<Value, CodecError> {
    Ok(Value::F32(dec_float(p)))
}

pub fn f32_to_float(c: &Conversion<'_>, v: &Value) -> Result<Vec<u8>, CodecError> {
    let f = v.try_f32()?.ok_or_else(|| c.mismatch(v))?;
    Ok(enc_float(f))
}

pub fn double_to_f64(_: &Conversion<'_>, p: &[u8]) -> Result<Value, CodecError> {
    Ok(Value::F64(dec_double(p)))
}

pub fn f64_to_double(c: &Conversion<'_>, v: &Value) -> Result<Vec<u8>, CodecError> {
    let f = v.try_f64()?.ok_or_else(|| c.mismatch(v))?;
    Ok(enc_double(f))
}
