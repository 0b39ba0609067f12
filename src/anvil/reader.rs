// Copyright 2026 driedpampas@proton.me
// SPDX-License-Identifier: GPL-3.0-or-later

//! Reads chunk locations, timestamps, and raw payload bytes from an Anvil region source.

use crate::anvil::{HEADER_SIZE, SECTOR_SIZE, chunk_index};
use crate::byteio::{read_exact_vec, read_u8, read_u24, read_u32};
use crate::error::CloneError;
use std::fs::File;
use std::io::{Cursor, Read, Seek, SeekFrom};
use std::path::Path;

/// Reads an Anvil region file's header and chunk payloads.
///
/// Generalized over any [`Read`] + [`Seek`] source, so tests can drive it over an in-memory
/// `Cursor<Vec<u8>>` instead of a real file.
pub struct RegionReader<R> {
    source: R,
    /// The first 8192 bytes of the region file: the 4096-byte location table followed by the
    /// 4096-byte timestamp table.
    header: [u8; HEADER_SIZE],
}

impl RegionReader<File> {
    /// Opens `path` for random read and snapshots its header.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, CloneError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }
}

impl<R: Read + Seek> RegionReader<R> {
    /// Wraps an already-open source, reading bytes `[0, 8192)` into a header snapshot.
    ///
    /// Fails with [`CloneError::Io`] if the source is shorter than 8192 bytes.
    pub fn from_reader(mut source: R) -> Result<Self, CloneError> {
        source.seek(SeekFrom::Start(0))?;
        let mut header = [0u8; HEADER_SIZE];
        source.read_exact(&mut header)?;
        Ok(RegionReader { source, header })
    }

    /// The 24-bit sector offset of chunk `(x, z)`, or 0 if the chunk has never been generated.
    pub fn offset(&self, x: u32, z: u32) -> u32 {
        let i = chunk_index(x, z) * 4;
        let mut cursor = Cursor::new(&self.header[i..i + 3]);
        read_u24(&mut cursor).expect("3 bytes available by construction")
    }

    /// The number of sectors allocated to chunk `(x, z)`.
    pub fn sectors(&self, x: u32, z: u32) -> u8 {
        let i = chunk_index(x, z) * 4;
        self.header[i + 3]
    }

    /// Reads the raw compressed payload stored at `sector_offset`, returning its compression
    /// scheme byte and the compressed bytes (not yet inflated).
    pub fn chunk_payload(&mut self, sector_offset: u32) -> Result<(u8, Vec<u8>), CloneError> {
        self.source
            .seek(SeekFrom::Start(sector_offset as u64 * SECTOR_SIZE as u64))?;
        let length = read_u32(&mut self.source)? as usize;
        if length < 1 {
            return Err(CloneError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "chunk frame length field is zero",
            )));
        }
        let scheme = read_u8(&mut self.source)?;
        let payload = read_exact_vec(&mut self.source, length - 1)?;
        Ok((scheme, payload))
    }

    /// The raw 4096-byte timestamp table, to be copied verbatim into a clone's destination.
    pub fn timestamps(&self) -> &[u8] {
        &self.header[SECTOR_SIZE..HEADER_SIZE]
    }

    /// Releases the source handle. A consuming method, since there is no "already closed" state
    /// to be idempotent about.
    pub fn close(self) {
        drop(self);
    }
}
