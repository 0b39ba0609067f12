// Copyright 2026 driedpampas@proton.me
// SPDX-License-Identifier: GPL-3.0-or-later

//! Typed big-endian read/write helpers over buffered byte sources and sinks.
//!
//! Thin wrappers over `byteorder`'s extension traits; every read here is "read-fully" — a short
//! read surfaces as [`crate::error::CloneError::Io`] rather than a partially filled buffer.

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Write};

/// Reads a big-endian `u32`.
pub fn read_u32<R: Read>(reader: &mut R) -> std::io::Result<u32> {
    reader.read_u32::<BigEndian>()
}

/// Writes a big-endian `u32`.
pub fn write_u32<W: Write>(writer: &mut W, v: u32) -> std::io::Result<()> {
    writer.write_u32::<BigEndian>(v)
}

/// Reads a single byte.
pub fn read_u8<R: Read>(reader: &mut R) -> std::io::Result<u8> {
    reader.read_u8()
}

/// Writes a single byte.
pub fn write_u8<W: Write>(writer: &mut W, v: u8) -> std::io::Result<()> {
    writer.write_u8(v)
}

/// Reads `len` bytes into a freshly allocated buffer, failing on short reads.
pub fn read_exact_vec<R: Read>(reader: &mut R, len: usize) -> std::io::Result<Vec<u8>> {
    let mut buf = vec![0u8; len];
    reader.read_exact(&mut buf)?;
    Ok(buf)
}

/// Reads a fixed-size 24-bit big-endian unsigned integer (3 bytes, as used by the Anvil
/// location table's sector-offset field).
pub fn read_u24<R: Read>(reader: &mut R) -> std::io::Result<u32> {
    let mut buf = [0u8; 3];
    reader.read_exact(&mut buf)?;
    Ok(u32::from_be_bytes([0, buf[0], buf[1], buf[2]]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn round_trips_u32() {
        let mut buf = Vec::new();
        write_u32(&mut buf, 0xDEAD_BEEF).unwrap();
        let mut cursor = Cursor::new(buf);
        assert_eq!(read_u32(&mut cursor).unwrap(), 0xDEAD_BEEF);
    }

    #[test]
    fn reads_u24_big_endian() {
        let mut cursor = Cursor::new(vec![0x00, 0x01, 0x02]);
        assert_eq!(read_u24(&mut cursor).unwrap(), 0x0102);
    }

    #[test]
    fn read_exact_vec_fails_on_short_read() {
        let mut cursor = Cursor::new(vec![1, 2, 3]);
        assert!(read_exact_vec(&mut cursor, 10).is_err());
    }
}
