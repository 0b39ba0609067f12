// Copyright 2026 driedpampas@proton.me
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error types for region cloning.

use crate::nbt::parse::ParseError;
use thiserror::Error;

/// Errors that can occur while cloning an Anvil region file.
#[derive(Debug, Error)]
pub enum CloneError {
    /// An I/O error occurred reading the source or writing the destination.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A zlib stream failed to inflate or deflate (corrupt chunk payload).
    #[error("compression error: {0}")]
    Compression(String),

    /// Malformed NBT data was encountered while parsing a chunk's payload.
    #[error("NBT error: {0}")]
    Nbt(#[from] ParseError),

    /// A chunk's compression scheme was not zlib (2).
    #[error("unsupported compression scheme {0} (only zlib (2) is supported)")]
    UnsupportedScheme(u8),

    /// A rewritten chunk's re-compressed payload needs more than 255 sectors.
    #[error("chunk at index {0} needs {1} sectors, which cannot be represented (max 255)")]
    SectorOverflow(usize, u64),
}
