//! Fixed-width big-endian integers, booleans and floats.
//!
//! Decoding is lenient: a buffer whose length is not exactly the type's width
//! (including the empty payload of a null value) decodes to zero.

use bytes::Buf;

pub fn dec_tiny(mut p: &[u8]) -> i8 {
    if p.len() != 1 {
        return 0;
    }
    p.get_i8()
}

pub fn dec_short(mut p: &[u8]) -> i16 {
    if p.len() != 2 {
        return 0;
    }
    p.get_i16()
}

pub fn dec_int(mut p: &[u8]) -> i32 {
    if p.len() != 4 {
        return 0;
    }
    p.get_i32()
}

pub fn dec_bigint(mut p: &[u8]) -> i64 {
    if p.len() != 8 {
        return 0;
    }
    p.get_i64()
}

/// Any non-zero first byte is true; an empty payload is false.
pub fn dec_bool(p: &[u8]) -> bool {
    p.first().is_some_and(|b| *b != 0)
}

pub fn dec_float(p: &[u8]) -> f32 {
    f32::from_bits(dec_int(p) as u32)
}

pub fn dec_double(p: &[u8]) -> f64 {
    f64::from_bits(dec_bigint(p) as u64)
}

pub fn enc_tiny(v: i8) -> Vec<u8> {
    v.to_be_bytes().to_vec()
}

pub fn enc_short(v: i16) -> Vec<u8> {
    v.to_be_bytes().to_vec()
}

pub fn enc_int(v: i32) -> Vec<u8> {
    v.to_be_bytes().to_vec()
}

pub fn enc_bigint(v: i64) -> Vec<u8> {
    v.to_be_bytes().to_vec()
}

pub fn enc_bool(v: bool) -> Vec<u8> {
    vec![u8::from(v)]
}

pub fn enc_float(v: f32) -> Vec<u8> {
    enc_int(v.to_bits() as i32)
}

pub fn enc_double(v: f64) -> Vec<u8> {
    enc_bigint(v.to_bits() as i64)
}
