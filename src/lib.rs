// Copyright 2026 driedpampas@proton.me
// SPDX-License-Identifier: GPL-3.0-or-later

#![cfg_attr(docsrs, feature(doc_cfg))]

//! # anvil-clone
//!
//! Clones a Minecraft Anvil region file to a new region-grid position, rewriting every
//! world-coordinate tag embedded in its chunks so the clone behaves as though it had always
//! lived at the destination.
//!
//! - [`anvil::reader::RegionReader`] opens a region file and exposes its chunk locations,
//!   sector counts, and raw compressed payloads.
//! - [`nbt`] is the NBT data model, byte-exact parser and encoder that chunk payloads are
//!   decoded through.
//! - [`nbt::rewrite`] walks a parsed chunk and displaces its coordinate tags in place.
//! - [`anvil::cloner::clone_region_file`] orchestrates the whole pipeline: decompress, parse,
//!   rewrite, encode, recompress, and repack into a fresh region file.

pub mod anvil;
pub mod byteio;
pub mod error;
pub mod nbt;
