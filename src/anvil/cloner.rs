// Copyright 2026 driedpampas@proton.me
// SPDX-License-Identifier: GPL-3.0-or-later

//! Clones a region file to a new region-grid position, rewriting every chunk's coordinate tags.

use crate::anvil::reader::RegionReader;
use crate::anvil::{HEADER_SIZE, SECTOR_SIZE, SCHEME_ZLIB, chunk_index};
use crate::byteio::{write_u8, write_u32};
use crate::error::CloneError;
use crate::nbt::encode::write_named_tag;
use crate::nbt::parse::parse_named_tag;
use crate::nbt::rewrite::{Displacement, rewrite};
use flate2::Compression;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;
use tracing::{debug, info, warn};

/// Clones every present chunk of `reader` into a freshly created region file at `dest_path`,
/// applying `displacement` to each chunk's coordinate tags.
///
/// The destination is truncated to exactly 8192 bytes before any payload is written, and its
/// location table is populated as chunks are emitted and flushed to disk last, so an error
/// partway through never leaves a header pointing at a partially-written payload.
pub fn clone_region_file<R: Read + Seek, P: AsRef<Path>>(
    reader: &mut RegionReader<R>,
    dest_path: P,
    displacement: Displacement,
) -> Result<(), CloneError> {
    let dest = File::create(dest_path)?;
    clone_region(reader, dest, displacement)
}

/// As [`clone_region_file`], but over an already-open destination (a real file or, in tests, an
/// in-memory cursor).
pub fn clone_region<R: Read + Seek, W: Write + Seek + SetLenIfFile>(
    reader: &mut RegionReader<R>,
    mut dest: W,
    displacement: Displacement,
) -> Result<(), CloneError> {
    dest.set_len_if_file();
    dest.seek(SeekFrom::Start(2 * SECTOR_SIZE as u64))?;

    let mut dest_locations = [0u8; SECTOR_SIZE];
    let mut next_sector: u32 = 2;
    let mut chunks_written: u32 = 0;

    for z in 0..32u32 {
        for x in 0..32u32 {
            let src_off = reader.offset(x, z);
            let src_sectors = reader.sectors(x, z);
            let i = chunk_index(x, z);

            if src_off == 0 && src_sectors == 0 {
                continue;
            }

            let (scheme, compressed) = reader.chunk_payload(src_off)?;
            if scheme != SCHEME_ZLIB {
                warn!(x, z, scheme, "unsupported chunk compression scheme");
                return Err(CloneError::UnsupportedScheme(scheme));
            }

            let mut raw = Vec::new();
            ZlibDecoder::new(&compressed[..])
                .read_to_end(&mut raw)
                .map_err(|e| CloneError::Compression(e.to_string()))?;

            let mut slice = &raw[..];
            let (name, mut tag) = parse_named_tag(&mut slice)?;
            rewrite(None, &mut tag, &displacement);

            let mut rewritten = Vec::new();
            write_named_tag(&mut rewritten, &name, &tag)?;

            let mut compressed_out = Vec::new();
            {
                let mut encoder = ZlibEncoder::new(&mut compressed_out, Compression::new(1));
                encoder
                    .write_all(&rewritten)
                    .map_err(|e| CloneError::Compression(e.to_string()))?;
                encoder
                    .finish()
                    .map_err(|e| CloneError::Compression(e.to_string()))?;
            }

            let stored_length = (compressed_out.len() + 1) as u32;
            let frame_len = 4 + stored_length as usize;
            let sectors_needed = frame_len.div_ceil(SECTOR_SIZE);
            if sectors_needed > u8::MAX as usize {
                warn!(i, sectors_needed, "chunk needs too many sectors");
                return Err(CloneError::SectorOverflow(i, sectors_needed as u64));
            }
            let pad = sectors_needed * SECTOR_SIZE - frame_len;

            write_u32(&mut dest, stored_length)?;
            write_u8(&mut dest, SCHEME_ZLIB)?;
            dest.write_all(&compressed_out)?;
            if pad > 0 {
                dest.write_all(&vec![0u8; pad])?;
            }

            debug!(
                x,
                z,
                compressed_len = compressed.len(),
                decompressed_len = raw.len(),
                sectors = sectors_needed,
                "cloned chunk"
            );

            let entry = i * 4;
            dest_locations[entry] = (next_sector >> 16) as u8;
            dest_locations[entry + 1] = (next_sector >> 8) as u8;
            dest_locations[entry + 2] = next_sector as u8;
            dest_locations[entry + 3] = sectors_needed as u8;

            next_sector += sectors_needed as u32;
            chunks_written += 1;
        }
    }

    dest.flush()?;
    dest.seek(SeekFrom::Start(0))?;
    dest.write_all(&dest_locations)?;
    dest.write_all(reader.timestamps())?;
    dest.flush()?;

    info!(
        chunks_written,
        sectors = next_sector, "region clone complete"
    );

    Ok(())
}

/// Small helper trait so [`clone_region`] can truncate a real file to the header size without
/// requiring every `Write + Seek` test double to implement `set_len`.
pub trait SetLenIfFile {
    fn set_len_if_file(&mut self);
}

impl SetLenIfFile for File {
    fn set_len_if_file(&mut self) {
        let _ = self.set_len(HEADER_SIZE as u64);
    }
}

impl SetLenIfFile for std::io::Cursor<Vec<u8>> {
    fn set_len_if_file(&mut self) {
        let len = self.get_ref().len();
        if len < HEADER_SIZE {
            self.get_mut().resize(HEADER_SIZE, 0);
        }
    }
}

impl<T: SetLenIfFile + ?Sized> SetLenIfFile for &mut T {
    fn set_len_if_file(&mut self) {
        (**self).set_len_if_file();
    }
}
