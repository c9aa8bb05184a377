//! Binary primitives of the CQL native protocol value encoding.
//!
//! Key components:
//! - [`int`]: big-endian fixed-width integers, booleans and IEEE-754 floats
//! - [`framing`]: `[bytes]` length-prefixed framing with the `-1` null sentinel
//! - [`varint`]: two's complement arbitrary-precision integers
//! - [`decimal`]: scale-prefixed decimals
//!
//! All functions operate on byte slices and know nothing about native types.

pub mod decimal;
pub mod framing;
pub mod int;
pub mod varint;

pub use decimal::{dec_decimal, enc_decimal};
pub use framing::{NULL_LENGTH, append_bytes, append_count, read_bytes, read_count};
pub use int::{
    dec_bigint, dec_bool, dec_double, dec_float, dec_int, dec_short, dec_tiny, enc_bigint,
    enc_bool, enc_double, enc_float, enc_int, enc_short, enc_tiny,
};
pub use varint::{dec_varint, enc_varint};
