//! Read-only voxel access contract and a block-based sparse volume.

use std::collections::HashMap;

use glam::IVec3;

use crate::box3::Box3;

/// The color of empty space.
pub const EMPTY_VOXEL: [u8; 4] = [0, 0, 0, 0];

/// Read-only random access to voxel colors.
///
/// `Cursor` is opaque locality state that a traversal threads through
/// sequential nearby lookups. Each traversal starts from
/// `Cursor::default()`; sharing a cursor across volumes or reusing one
/// after mutating the source is a caller error.
pub trait VoxelSource {
    type Cursor: Default;

    /// Color of the voxel at `pos`. Alpha 0 means empty space.
    fn color_at(&self, cursor: &mut Self::Cursor, pos: IVec3) -> [u8; 4];

    /// Bounding box of the non-empty voxels, or None when the source
    /// holds none.
    fn bounding_box(&self) -> Option<Box3>;
}

/// Edge length of one storage block.
pub const BLOCK_SIZE: i32 = 16;

const BLOCK_VOXELS: usize = (BLOCK_SIZE * BLOCK_SIZE * BLOCK_SIZE) as usize;

struct Block {
    voxels: Box<[[u8; 4]; BLOCK_VOXELS]>,
}

impl Block {
    fn new() -> Self {
        Self {
            voxels: Box::new([EMPTY_VOXEL; BLOCK_VOXELS]),
        }
    }

    fn index(local: IVec3) -> usize {
        ((local.z * BLOCK_SIZE + local.y) * BLOCK_SIZE + local.x) as usize
    }
}

/// Splits a world position into (block coordinate, in-block coordinate).
fn split_pos(pos: IVec3) -> (IVec3, IVec3) {
    let size = IVec3::splat(BLOCK_SIZE);
    (pos.div_euclid(size), pos.rem_euclid(size))
}

/// Sparse RGBA voxel volume stored as 16^3 blocks.
///
/// Blocks live in a dense `Vec`; a coordinate map resolves block keys to
/// vec indices. Reads of unset space return [`EMPTY_VOXEL`].
#[derive(Default)]
pub struct SparseVolume {
    blocks: Vec<Block>,
    index: HashMap<IVec3, usize>,
}

/// Lookup cursor caching the most recently accessed block, so runs of
/// nearby lookups skip the coordinate map.
#[derive(Debug, Clone, Copy, Default)]
pub struct VolumeCursor {
    block: Option<(IVec3, usize)>,
}

impl SparseVolume {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the voxel at `pos`. Alpha 0 stores empty space.
    pub fn set_at(&mut self, pos: IVec3, color: [u8; 4]) {
        let (key, local) = split_pos(pos);
        let slot = match self.index.get(&key) {
            Some(&slot) => slot,
            None => {
                self.blocks.push(Block::new());
                let slot = self.blocks.len() - 1;
                self.index.insert(key, slot);
                slot
            }
        };
        self.blocks[slot].voxels[Block::index(local)] = color;
    }

    /// Fills the axis-aligned region [min, max) with one color.
    pub fn fill(&mut self, min: IVec3, max: IVec3, color: [u8; 4]) {
        for z in min.z..max.z {
            for y in min.y..max.y {
                for x in min.x..max.x {
                    self.set_at(IVec3::new(x, y, z), color);
                }
            }
        }
    }

    pub fn clear(&mut self) {
        self.blocks.clear();
        self.index.clear();
    }
}

impl VoxelSource for SparseVolume {
    type Cursor = VolumeCursor;

    fn color_at(&self, cursor: &mut VolumeCursor, pos: IVec3) -> [u8; 4] {
        let (key, local) = split_pos(pos);
        let slot = match cursor.block {
            Some((cached, slot)) if cached == key => Some(slot),
            _ => {
                let found = self.index.get(&key).copied();
                cursor.block = found.map(|slot| (key, slot));
                found
            }
        };
        match slot {
            Some(slot) => self.blocks[slot].voxels[Block::index(local)],
            None => EMPTY_VOXEL,
        }
    }

    fn bounding_box(&self) -> Option<Box3> {
        let mut min = IVec3::MAX;
        let mut max = IVec3::MIN;
        let mut any = false;
        for (key, &slot) in &self.index {
            let origin = *key * BLOCK_SIZE;
            let block = &self.blocks[slot];
            for z in 0..BLOCK_SIZE {
                for y in 0..BLOCK_SIZE {
                    for x in 0..BLOCK_SIZE {
                        let local = IVec3::new(x, y, z);
                        if block.voxels[Block::index(local)][3] == 0 {
                            continue;
                        }
                        let pos = origin + local;
                        min = min.min(pos);
                        max = max.max(pos);
                        any = true;
                    }
                }
            }
        }
        // A voxel at p occupies the unit cell [p, p + 1).
        any.then(|| Box3::from_min_max(min.as_vec3(), (max + IVec3::ONE).as_vec3()))
    }
}
