//! `decimal`: a 4-byte big-endian scale followed by a varint unscaled value.
//!
//! The value is `unscaled * 10^-scale`.

use bigdecimal::BigDecimal;
use bytes::Buf;
use cqlcodec_core::{CodecError, WireType};

use crate::varint::{dec_varint, enc_varint};

pub fn dec_decimal(p: &[u8]) -> Result<BigDecimal, CodecError> {
    let mut rest = p;
    let scale = rest
        .try_get_i32()
        .map_err(|_| CodecError::malformed(WireType::Decimal, "missing 4-byte scale"))?;
    Ok(BigDecimal::new(dec_varint(rest), i64::from(scale)))
}

pub fn enc_decimal(v: &BigDecimal) -> Result<Vec<u8>, CodecError> {
    let (unscaled, scale) = v.as_bigint_and_exponent();
    let scale = i32::try_from(scale).map_err(|_| CodecError::out_of_range(scale, "decimal scale"))?;
    let mut out = scale.to_be_bytes().to_vec();
    out.extend(enc_varint(&unscaled));
    Ok(out)
}
