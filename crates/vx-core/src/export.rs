//! PNG slice-sheet export and its companion metadata file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::box3::Box3;
use crate::slices::{SliceLayer, SliceRaster, composite_slices};
use crate::volume::VoxelSource;

/// Errors reported by the slice-sheet exporter.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ExportError {
    #[error("failed to encode image: {0}")]
    Image(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("failed to write metadata: {0}")]
    Metadata(String),
}

/// Companion metadata recorded next to an exported slice sheet.
///
/// The dimensions always describe the raster that was actually written;
/// rotation tags accumulate across exports to the same path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SliceSheetMeta {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    #[serde(default)]
    pub rotations: Vec<String>,
}

/// Composites `layers` and writes the slice sheet to `path` as an RGBA8
/// PNG of (width x depth) by height pixels, plus a sibling `.json`
/// companion file.
///
/// Rotation tags already present in the companion file are kept, in
/// their existing order, with new tags appended. A zero-sized raster
/// (no layers, degenerate box) writes nothing and is not an error.
/// Returns the composited raster so callers can inspect what was
/// written.
pub fn export_png_slices<V: VoxelSource>(
    path: impl AsRef<Path>,
    bbox: Option<Box3>,
    layers: &[SliceLayer<'_, V>],
    rotations: &[String],
) -> Result<SliceRaster, ExportError> {
    let path = path.as_ref();
    let raster = composite_slices(bbox, layers);
    if raster.is_empty() {
        tracing::warn!("Nothing to export to {:?}: empty slice raster", path);
        return Ok(raster);
    }

    image::save_buffer(
        path,
        &raster.pixels,
        raster.image_width(),
        raster.image_height(),
        image::ColorType::Rgba8,
    )
    .map_err(|e| ExportError::Image(e.to_string()))?;
    write_metadata(path, &raster, rotations)?;

    tracing::info!(
        "Exported slice sheet {:?} ({}x{}x{})",
        path,
        raster.width,
        raster.height,
        raster.depth
    );
    Ok(raster)
}

/// Path of the companion file for a slice sheet.
pub fn metadata_path(path: &Path) -> PathBuf {
    path.with_extension("json")
}

fn write_metadata(path: &Path, raster: &SliceRaster, rotations: &[String]) -> Result<(), ExportError> {
    let meta_path = metadata_path(path);

    let mut merged = match std::fs::read_to_string(&meta_path) {
        Ok(content) => match serde_json::from_str::<SliceSheetMeta>(&content) {
            Ok(existing) => existing.rotations,
            Err(e) => {
                tracing::warn!("Ignoring unreadable metadata at {:?}: {}", meta_path, e);
                Vec::new()
            }
        },
        Err(_) => Vec::new(),
    };
    for tag in rotations {
        if !merged.iter().any(|t| t == tag) {
            merged.push(tag.clone());
        }
    }

    let meta = SliceSheetMeta {
        width: raster.width,
        height: raster.height,
        depth: raster.depth,
        rotations: merged,
    };
    let content =
        serde_json::to_string_pretty(&meta).map_err(|e| ExportError::Metadata(e.to_string()))?;
    std::fs::write(&meta_path, content).map_err(|e| ExportError::Io(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::volume::SparseVolume;
    use glam::{IVec3, Vec3};

    fn tagged(tags: &[&str]) -> Vec<String> {
        tags.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_export_writes_png_and_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slices.png");

        let mut volume = SparseVolume::new();
        volume.fill(IVec3::splat(-2), IVec3::splat(2), [80, 90, 100, 255]);
        let bbox = Box3::from_center_half_extents(Vec3::ZERO, Vec3::splat(2.0));

        let raster =
            export_png_slices(&path, Some(bbox), &[SliceLayer::new(&volume)], &tagged(&["n"]))
                .unwrap();
        assert_eq!(raster.image_width(), 16);
        assert_eq!(raster.image_height(), 4);
        assert!(path.exists());

        let meta: SliceSheetMeta =
            serde_json::from_str(&std::fs::read_to_string(metadata_path(&path)).unwrap()).unwrap();
        assert_eq!((meta.width, meta.height, meta.depth), (4, 4, 4));
        assert_eq!(meta.rotations, tagged(&["n"]));

        // The PNG on disk round-trips to the same pixels.
        let decoded = image::open(&path).unwrap().into_rgba8();
        assert_eq!(decoded.width(), 16);
        assert_eq!(decoded.height(), 4);
        assert_eq!(decoded.as_raw(), &raster.pixels);
    }

    #[test]
    fn test_existing_rotation_tags_are_merged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slices.png");
        let meta_path = metadata_path(&path);
        std::fs::write(
            &meta_path,
            r#"{"width":1,"height":1,"depth":1,"rotations":["n","e"]}"#,
        )
        .unwrap();

        let mut volume = SparseVolume::new();
        volume.set_at(IVec3::ZERO, [1, 2, 3, 255]);
        let bbox = Box3::from_min_max(Vec3::ZERO, Vec3::ONE);

        export_png_slices(
            &path,
            Some(bbox),
            &[SliceLayer::new(&volume)],
            &tagged(&["e", "s"]),
        )
        .unwrap();

        let meta: SliceSheetMeta =
            serde_json::from_str(&std::fs::read_to_string(&meta_path).unwrap()).unwrap();
        assert_eq!(meta.rotations, tagged(&["n", "e", "s"]));
    }

    #[test]
    fn test_empty_raster_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slices.png");

        let raster = export_png_slices::<SparseVolume>(&path, None, &[], &[]).unwrap();
        assert!(raster.is_empty());
        assert!(!path.exists());
        assert!(!metadata_path(&path).exists());
    }
}
