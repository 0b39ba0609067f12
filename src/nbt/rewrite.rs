// Copyright 2026 driedpampas@proton.me
// SPDX-License-Identifier: GPL-3.0-or-later

//! Rewrites world-coordinate tags in a parsed NBT tree by a fixed displacement.

use crate::nbt::NbtTag;

/// An immutable displacement to apply to every coordinate-bearing tag in a chunk.
///
/// `chunk_x`/`chunk_z` apply to chunk-grid coordinates (`xPos`/`zPos`/`ChunkX`/`ChunkZ`),
/// `block_x`/`block_z` apply to world block coordinates (`x`/`z` and their aliases, and `Pos`
/// list elements).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Displacement {
    pub chunk_x: i32,
    pub chunk_z: i32,
    pub block_x: i32,
    pub block_z: i32,
}

impl Displacement {
    /// Derives a displacement from a source region's coordinates to a destination region's.
    pub fn new(from_rx: i32, from_rz: i32, to_rx: i32, to_rz: i32) -> Self {
        let chunk_x = (to_rx - from_rx) * 32;
        let chunk_z = (to_rz - from_rz) * 32;
        Displacement {
            chunk_x,
            chunk_z,
            block_x: chunk_x * 16,
            block_z: chunk_z * 16,
        }
    }
}

const CHUNK_X_NAMES: &[&str] = &["xPos", "ChunkX"];
const CHUNK_Z_NAMES: &[&str] = &["zPos", "ChunkZ"];
const BLOCK_X_ALIASES: &[&str] = &[
    "posX",
    "TileX",
    "xTile",
    "SleepingX",
    "BoundX",
    "HomePosX",
    "TravelPosX",
    "APX",
    "AX",
    "TreasurePosX",
];
const BLOCK_Z_ALIASES: &[&str] = &[
    "posZ",
    "TileZ",
    "zTile",
    "SleepingZ",
    "BoundZ",
    "HomePosZ",
    "TravelPosZ",
    "APZ",
    "AZ",
    "TreasurePosZ",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CoordClass {
    ChunkX,
    ChunkZ,
    BlockX,
    BlockZ,
}

fn classify(name: &str) -> Option<CoordClass> {
    if CHUNK_X_NAMES.contains(&name) {
        return Some(CoordClass::ChunkX);
    }
    if CHUNK_Z_NAMES.contains(&name) {
        return Some(CoordClass::ChunkZ);
    }
    if name.eq_ignore_ascii_case("x") || BLOCK_X_ALIASES.contains(&name) {
        return Some(CoordClass::BlockX);
    }
    if name.eq_ignore_ascii_case("z") || BLOCK_Z_ALIASES.contains(&name) {
        return Some(CoordClass::BlockZ);
    }
    None
}

/// Mutates `tag` in place, applying `displacement` to every coordinate tag it contains.
///
/// `name` is the tag's own name within its parent `Compound`, or `None` if `tag` is a list
/// element or the root of the tree — names exist only on compound members, so this is the only
/// place a coordinate name can ever be matched against.
pub fn rewrite(name: Option<&str>, tag: &mut NbtTag, displacement: &Displacement) {
    if let (Some(name), NbtTag::Int(v)) = (name, &mut *tag) {
        if let Some(class) = classify(name) {
            match class {
                CoordClass::ChunkX => *v += displacement.chunk_x,
                CoordClass::ChunkZ => *v += displacement.chunk_z,
                CoordClass::BlockX => *v += displacement.block_x,
                CoordClass::BlockZ => *v += displacement.block_z,
            }
            return;
        }
    }

    if name == Some("Pos") {
        if let NbtTag::List(element_type, elements) = tag {
            if elements.len() == 3 {
                match *element_type {
                    6 => {
                        if let NbtTag::Double(x) = &mut elements[0] {
                            *x += displacement.block_x as f64;
                        }
                        if let NbtTag::Double(z) = &mut elements[2] {
                            *z += displacement.block_z as f64;
                        }
                        return;
                    }
                    3 => {
                        if let NbtTag::Int(x) = &mut elements[0] {
                            *x += displacement.block_x;
                        }
                        if let NbtTag::Int(z) = &mut elements[2] {
                            *z += displacement.block_z;
                        }
                        return;
                    }
                    _ => {}
                }
            }
        }
    }

    match tag {
        NbtTag::List(_, elements) => {
            for element in elements {
                rewrite(None, element, displacement);
            }
        }
        NbtTag::Compound(map) => {
            for (key, value) in map.iter_mut() {
                rewrite(Some(key.as_str()), value, displacement);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn displacement(dx_chunks: i32, dz_chunks: i32) -> Displacement {
        Displacement {
            chunk_x: dx_chunks,
            chunk_z: dz_chunks,
            block_x: dx_chunks * 16,
            block_z: dz_chunks * 16,
        }
    }

    #[test]
    fn new_derives_chunk_and_block_displacement_from_region_coords() {
        let d = Displacement::new(0, 0, 1, 2);
        assert_eq!(d.chunk_x, 32);
        assert_eq!(d.chunk_z, 64);
        assert_eq!(d.block_x, 512);
        assert_eq!(d.block_z, 1024);
    }

    #[test]
    fn chunk_and_nested_level_coords_are_rewritten() {
        let mut level = IndexMap::new();
        level.insert("xPos".to_string(), NbtTag::Int(0));
        level.insert("zPos".to_string(), NbtTag::Int(0));

        let mut root = IndexMap::new();
        root.insert("xPos".to_string(), NbtTag::Int(0));
        root.insert("zPos".to_string(), NbtTag::Int(0));
        root.insert("Level".to_string(), NbtTag::Compound(level));

        let mut tag = NbtTag::Compound(root);
        let d = Displacement::new(0, 0, 1, 2);
        rewrite(None, &mut tag, &d);

        let NbtTag::Compound(map) = &tag else { panic!() };
        assert_eq!(map["xPos"], NbtTag::Int(32));
        assert_eq!(map["zPos"], NbtTag::Int(64));
        let NbtTag::Compound(level) = &map["Level"] else { panic!() };
        assert_eq!(level["xPos"], NbtTag::Int(32));
        assert_eq!(level["zPos"], NbtTag::Int(64));
    }

    #[test]
    fn double_pos_list_shifts_x_and_z_leaves_y() {
        let mut tag = NbtTag::List(6, vec![NbtTag::Double(10.5), NbtTag::Double(64.0), NbtTag::Double(-3.25)]);
        let d = displacement(-1, 0);
        rewrite(Some("Pos"), &mut tag, &d);
        assert_eq!(
            tag,
            NbtTag::List(6, vec![NbtTag::Double(-501.5), NbtTag::Double(64.0), NbtTag::Double(-3.25)])
        );
    }

    #[test]
    fn int_pos_list_shifts_x_and_z_leaves_y() {
        let mut tag = NbtTag::List(3, vec![NbtTag::Int(100), NbtTag::Int(64), NbtTag::Int(-50)]);
        let d = displacement(2, -1);
        rewrite(Some("Pos"), &mut tag, &d);
        assert_eq!(tag, NbtTag::List(3, vec![NbtTag::Int(132), NbtTag::Int(64), NbtTag::Int(-66)]));
    }

    #[test]
    fn pos_list_of_unexpected_shape_is_left_unchanged() {
        let original = NbtTag::List(6, vec![NbtTag::Double(1.0), NbtTag::Double(2.0), NbtTag::Double(3.0), NbtTag::Double(4.0)]);
        let mut tag = original.clone();
        let d = displacement(5, 5);
        rewrite(Some("Pos"), &mut tag, &d);
        assert_eq!(tag, original);
    }

    #[test]
    fn bare_x_and_z_are_case_insensitive() {
        let mut map = IndexMap::new();
        map.insert("X".to_string(), NbtTag::Int(0));
        map.insert("Z".to_string(), NbtTag::Int(0));
        let mut tag = NbtTag::Compound(map);
        let d = displacement(1, 1);
        rewrite(None, &mut tag, &d);
        let NbtTag::Compound(map) = &tag else { panic!() };
        assert_eq!(map["X"], NbtTag::Int(16));
        assert_eq!(map["Z"], NbtTag::Int(16));
    }

    #[test]
    fn block_alias_names_are_matched_exact_case_only() {
        let mut map = IndexMap::new();
        map.insert("posX".to_string(), NbtTag::Int(0));
        map.insert("POSX".to_string(), NbtTag::Int(0));
        let mut tag = NbtTag::Compound(map);
        let d = displacement(1, 1);
        rewrite(None, &mut tag, &d);
        let NbtTag::Compound(map) = &tag else { panic!() };
        assert_eq!(map["posX"], NbtTag::Int(16));
        assert_eq!(map["POSX"], NbtTag::Int(0));
    }

    #[test]
    fn non_int_x_tag_is_never_rewritten() {
        let mut map = IndexMap::new();
        map.insert("x".to_string(), NbtTag::String("not a coordinate".to_string()));
        let mut tag = NbtTag::Compound(map);
        let d = displacement(1, 1);
        rewrite(None, &mut tag, &d);
        let NbtTag::Compound(map) = &tag else { panic!() };
        assert_eq!(map["x"], NbtTag::String("not a coordinate".to_string()));
    }

    #[test]
    fn list_of_compounds_descends_into_each_element() {
        let mut entity = IndexMap::new();
        entity.insert("x".to_string(), NbtTag::Int(5));
        let items = NbtTag::List(10, vec![NbtTag::Compound(entity)]);

        let mut root = IndexMap::new();
        root.insert("Items".to_string(), items);
        let mut tag = NbtTag::Compound(root);

        let d = displacement(1, 0);
        rewrite(None, &mut tag, &d);

        let NbtTag::Compound(map) = &tag else { panic!() };
        let NbtTag::List(_, elements) = &map["Items"] else { panic!() };
        let NbtTag::Compound(entity) = &elements[0] else { panic!() };
        assert_eq!(entity["x"], NbtTag::Int(21));
    }

    #[test]
    fn zero_displacement_is_a_no_op() {
        let mut map = IndexMap::new();
        map.insert("xPos".to_string(), NbtTag::Int(7));
        let mut tag = NbtTag::Compound(map);
        let d = displacement(0, 0);
        rewrite(None, &mut tag, &d);
        let NbtTag::Compound(map) = &tag else { panic!() };
        assert_eq!(map["xPos"], NbtTag::Int(7));
    }
}
