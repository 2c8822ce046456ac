//! Flattens layered voxel volumes into a 2D slice-sheet raster.

use glam::IVec3;

use crate::box3::Box3;
use crate::volume::VoxelSource;

/// Layer material. Only the base color's alpha participates in
/// compositing: it multiplies the layer's voxel alphas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub base_color: [f32; 4],
}

impl Default for Material {
    fn default() -> Self {
        Self {
            base_color: [1.0; 4],
        }
    }
}

/// One compositing layer: a voxel volume plus visibility and material.
///
/// Layers composite in their declared sequence order; the first layer of
/// a slice export is the bottom of the stack.
#[derive(Debug, Clone, Copy)]
pub struct SliceLayer<'a, V> {
    pub visible: bool,
    pub volume: Option<&'a V>,
    pub material: Option<Material>,
}

impl<'a, V> SliceLayer<'a, V> {
    pub fn new(volume: &'a V) -> Self {
        Self {
            visible: true,
            volume: Some(volume),
            material: None,
        }
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = Some(material);
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    fn material_alpha(&self) -> f32 {
        self.material.map(|m| m.base_color[3]).unwrap_or(1.0)
    }
}

/// RGBA8 raster packing a width x height x depth voxel cuboid as
/// `depth` side-by-side height-tall tiles, one per z slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliceRaster {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    pub pixels: Vec<u8>,
}

impl SliceRaster {
    fn new(width: u32, height: u32, depth: u32) -> Self {
        Self {
            width,
            height,
            depth,
            pixels: vec![0; (width * height * depth * 4) as usize],
        }
    }

    /// Width of the exported image: all depth slices side by side.
    pub fn image_width(&self) -> u32 {
        self.width * self.depth
    }

    pub fn image_height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Byte offset of the cell (x, y, z) in the slice sheet.
    fn offset(&self, x: u32, y: u32, z: u32) -> usize {
        ((y * self.width * self.depth + z * self.width + x) * 4) as usize
    }

    /// Color of the cell (x, y, z).
    pub fn pixel(&self, x: u32, y: u32, z: u32) -> [u8; 4] {
        let i = self.offset(x, y, z);
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }
}

/// Composites `layers` into a slice-sheet raster.
///
/// The raster covers `bbox` when given, else the union of the layers'
/// volume bounds; with neither, it is zero-sized. Dimensions are twice
/// the box's half-extents per axis (truncated, clamped at zero), so a
/// degenerate box also yields a zero-sized raster rather than an error.
///
/// Layers composite in declared order, bottom first, each with a fresh
/// cursor. Each visible layer's voxels are blended over the shared
/// raster with the standard non-premultiplied "over" operator, the
/// layer's material alpha scaling only that layer's contribution. Voxels
/// with native alpha 0 contribute nothing and leave the pixel untouched.
pub fn composite_slices<V: VoxelSource>(
    bbox: Option<Box3>,
    layers: &[SliceLayer<'_, V>],
) -> SliceRaster {
    let bbox = bbox.or_else(|| {
        layers
            .iter()
            .filter_map(|layer| layer.volume.and_then(|v| v.bounding_box()))
            .reduce(|a, b| a.union(&b))
    });
    let Some(bbox) = bbox else {
        return SliceRaster::new(0, 0, 0);
    };

    let w = ((bbox.half_extents.x * 2.0) as i32).max(0);
    let h = ((bbox.half_extents.y * 2.0) as i32).max(0);
    let d = ((bbox.half_extents.z * 2.0) as i32).max(0);
    let start = (bbox.center - bbox.half_extents).as_ivec3();
    let mut raster = SliceRaster::new(w as u32, h as u32, d as u32);

    for layer in layers {
        if !layer.visible {
            continue;
        }
        let Some(volume) = layer.volume else {
            continue;
        };
        let material_alpha = layer.material_alpha();
        let mut cursor = V::Cursor::default();

        for z in 0..d {
            for y in 0..h {
                for x in 0..w {
                    let pos = start + IVec3::new(x, y, z);
                    let c = volume.color_at(&mut cursor, pos);
                    if c[3] == 0 {
                        continue;
                    }

                    let idx = raster.offset(x as u32, y as u32, z as u32);
                    let src_a = (c[3] as f32 / 255.0) * material_alpha;
                    let dst_a = raster.pixels[idx + 3] as f32 / 255.0;
                    let out_a = src_a + dst_a * (1.0 - src_a);
                    if out_a > 0.0 {
                        for ch in 0..3 {
                            let src = c[ch] as f32 * src_a;
                            let dst = raster.pixels[idx + ch] as f32 * dst_a * (1.0 - src_a);
                            raster.pixels[idx + ch] = ((src + dst) / out_a) as u8;
                        }
                        raster.pixels[idx + 3] = (out_a * 255.0) as u8;
                    }
                }
            }
        }
    }

    raster
}
