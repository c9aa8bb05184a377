//! Two's complement arbitrary-precision integers (`varint`).

use num_bigint::BigInt;

/// Big-endian two's complement; the empty buffer is zero.
pub fn dec_varint(p: &[u8]) -> BigInt {
    BigInt::from_signed_bytes_be(p)
}

/// Minimal two's complement encoding of `v`.
pub fn enc_varint(v: &BigInt) -> Vec<u8> {
    v.to_signed_bytes_be()
}

