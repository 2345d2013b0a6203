//! LEB128 varints as used by network mode. Seven bits of data per byte, low
//! group first, high bit set on every byte but the last. Signed values are
//! zig-zag mapped first so small negative numbers stay short.
//!
//! Only the shortest encoding of a value is accepted when reading. Anything
//! else could not be written back byte for byte.

use std::io::{Read, Write};

use byteorder::{ReadBytesExt, WriteBytesExt};

use crate::error::{Error, Result};

pub(crate) const MAX_VARINT_LEN: usize = 5;
pub(crate) const MAX_VARLONG_LEN: usize = 10;

pub(crate) fn read_var_u32<R: Read>(r: &mut R) -> Result<u32> {
    let value = read_raw(r, MAX_VARINT_LEN, "varint")?;
    u32::try_from(value).map_err(|_| Error::integer_out_of_range("varint"))
}

pub(crate) fn read_var_u64<R: Read>(r: &mut R) -> Result<u64> {
    read_raw(r, MAX_VARLONG_LEN, "varlong")
}

pub(crate) fn read_var_i32<R: Read>(r: &mut R) -> Result<i32> {
    Ok(zigzag_decode_32(read_var_u32(r)?))
}

pub(crate) fn read_var_i64<R: Read>(r: &mut R) -> Result<i64> {
    Ok(zigzag_decode_64(read_var_u64(r)?))
}

pub(crate) fn write_var_u32<W: Write>(w: &mut W, value: u32) -> Result<()> {
    write_raw(w, value as u64)
}

pub(crate) fn write_var_u64<W: Write>(w: &mut W, value: u64) -> Result<()> {
    write_raw(w, value)
}

pub(crate) fn write_var_i32<W: Write>(w: &mut W, value: i32) -> Result<()> {
    write_var_u32(w, zigzag_encode_32(value))
}

pub(crate) fn write_var_i64<W: Write>(w: &mut W, value: i64) -> Result<()> {
    write_var_u64(w, zigzag_encode_64(value))
}

pub(crate) fn zigzag_encode_32(n: i32) -> u32 {
    ((n << 1) ^ (n >> 31)) as u32
}

pub(crate) fn zigzag_decode_32(n: u32) -> i32 {
    ((n >> 1) as i32) ^ -((n & 1) as i32)
}

pub(crate) fn zigzag_encode_64(n: i64) -> u64 {
    ((n << 1) ^ (n >> 63)) as u64
}

pub(crate) fn zigzag_decode_64(n: u64) -> i64 {
    ((n >> 1) as i64) ^ -((n & 1) as i64)
}

fn read_raw<R: Read>(r: &mut R, max_len: usize, what: &str) -> Result<u64> {
    let mut result: u64 = 0;

    for i in 0..max_len {
        let byte = r.read_u8()?;
        let shift = 7 * i as u32;
        let group = (byte & 0x7f) as u64;

        // The last byte of a varlong only has room for one bit.
        if shift == 63 && group > 1 {
            return Err(Error::integer_out_of_range(what));
        }
        result |= group << shift;

        if byte & 0x80 == 0 {
            if i > 0 && byte == 0 {
                return Err(Error::malformed(format!("overlong {}", what)));
            }
            return Ok(result);
        }
    }

    Err(Error::malformed(format!(
        "{} longer than {} bytes",
        what, max_len
    )))
}

fn write_raw<W: Write>(w: &mut W, mut value: u64) -> Result<()> {
    loop {
        let byte = (value & 0x7f) as u8;
        value >>= 7;

        if value == 0 {
            w.write_u8(byte)?;
            return Ok(());
        }
        w.write_u8(byte | 0x80)?;
    }
}
