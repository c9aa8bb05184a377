//! `[bytes]` framing: a 4-byte big-endian signed length followed by the payload.
//!
//! A negative length (written as [`NULL_LENGTH`]) is a null value without payload.
//! <https://github.com/apache/cassandra/blob/trunk/doc/native_protocol_v4.spec>

use bytes::{Buf, BufMut};
use cqlcodec_core::CodecError;

/// Length written for a null value.
pub const NULL_LENGTH: i32 = -1;

/// Read one framed value from `p`, returning the payload (`None` for null)
/// and the rest of the buffer.
pub fn read_bytes(p: &[u8]) -> Result<(Option<&[u8]>, &[u8]), CodecError> {
    let mut rest = p;
    let size = rest.try_get_i32().map_err(|_| CodecError::LengthMismatch {
        expected: 4,
        available: p.len(),
    })?;
    if size < 0 {
        return Ok((None, rest));
    }
    let size = size as usize;
    if rest.len() < size {
        return Err(CodecError::LengthMismatch {
            expected: size,
            available: rest.len(),
        });
    }
    let (data, rest) = rest.split_at(size);
    Ok((Some(data), rest))
}

/// Append `d` framed; `None` appends the null sentinel only.
pub fn append_bytes(buf: &mut impl BufMut, d: Option<&[u8]>) -> Result<(), CodecError> {
    match d {
        None => buf.put_i32(NULL_LENGTH),
        Some(d) => {
            buf.put_i32(frame_len(d.len())?);
            buf.put_slice(d);
        }
    }
    Ok(())
}

/// Read the 4-byte element count that opens a collection payload.
pub fn read_count(p: &[u8]) -> Result<(usize, &[u8]), CodecError> {
    let mut rest = p;
    let count = rest.try_get_i32().map_err(|_| CodecError::LengthMismatch {
        expected: 4,
        available: p.len(),
    })?;
    // A negative count never describes a real collection; treat it as empty.
    Ok((count.max(0) as usize, rest))
}

pub fn append_count(buf: &mut impl BufMut, count: usize) -> Result<(), CodecError> {
    buf.put_i32(frame_len(count)?);
    Ok(())
}

fn frame_len(len: usize) -> Result<i32, CodecError> {
    i32::try_from(len).map_err(|_| CodecError::out_of_range(len, "[bytes] length"))
}
