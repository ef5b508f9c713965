//! Scalar packing and unpacking, always big-endian.

use bytes::{Buf, BufMut, BytesMut};

use crate::error::{CodecError, Result};

/// Supported unsigned-integer widths in bytes.
pub const UINT_WIDTHS: [usize; 4] = [1, 2, 4, 8];

/// Supported IEEE-754 float widths in bytes.
pub const FLOAT_WIDTHS: [usize; 2] = [4, 8];

/// Append an unsigned integer of the given width, big-endian.
///
/// Fails with [`CodecError::EncodingRange`] when `value` does not fit in
/// `width` bytes; width 8 admits every `u64`.
pub fn pack_uint(value: u64, width: usize, dst: &mut BytesMut) -> Result<()> {
    if !UINT_WIDTHS.contains(&width) {
        return Err(unsupported_uint(width));
    }
    if width < 8 {
        let max = (1u64 << (8 * width as u32)) - 1;
        if value > max {
            return Err(CodecError::EncodingRange { value, width });
        }
    }
    match width {
        1 => dst.put_u8(value as u8),
        2 => dst.put_u16(value as u16),
        4 => dst.put_u32(value as u32),
        _ => dst.put_u64(value),
    }
    Ok(())
}

/// Append an IEEE-754 float of the given width, big-endian.
///
/// Width 4 narrows through `f32` with standard IEEE semantics (values
/// beyond f32 range become infinities); floats are never range-checked.
pub fn pack_float(value: f64, width: usize, dst: &mut BytesMut) -> Result<()> {
    match width {
        4 => dst.put_f32(value as f32),
        8 => dst.put_f64(value),
        _ => return Err(unsupported_float(width)),
    }
    Ok(())
}

/// Read an unsigned integer of the given width, big-endian.
///
/// `src` must hold at least `width` bytes; the caller guarantees this
/// (the decoder's cursor checks before slicing).
pub fn unpack_uint(mut src: &[u8], width: usize) -> Result<u64> {
    debug_assert!(src.len() >= width);
    Ok(match width {
        1 => u64::from(src.get_u8()),
        2 => u64::from(src.get_u16()),
        4 => u64::from(src.get_u32()),
        8 => src.get_u64(),
        _ => return Err(unsupported_uint(width)),
    })
}

/// Read an IEEE-754 float of the given width, big-endian.
pub fn unpack_float(mut src: &[u8], width: usize) -> Result<f64> {
    debug_assert!(src.len() >= width);
    Ok(match width {
        4 => f64::from(src.get_f32()),
        8 => src.get_f64(),
        _ => return Err(unsupported_float(width)),
    })
}

fn unsupported_uint(width: usize) -> CodecError {
    CodecError::UnsupportedWidth {
        width,
        kind: "unsigned integer",
    }
}

fn unsupported_float(width: usize) -> CodecError {
    CodecError::UnsupportedWidth {
        width,
        kind: "float",
    }
}
