//! VX Editor Core
//!
//! CPU-side geometry for the voxel editor's model-substitution
//! subsystem:
//! - [`mesh::MeshData`] and the procedural shape constructors in
//!   [`shapes`]
//! - OBJ import with flat-normal synthesis ([`obj`])
//! - The read-only voxel access contract and a block-based sparse
//!   volume ([`volume`])
//! - The layered slice compositor ([`slices`]) and PNG slice-sheet
//!   export ([`export`])

pub mod box3;
pub mod export;
pub mod mesh;
pub mod normals;
pub mod obj;
pub mod shapes;
pub mod slices;
pub mod vertex;
pub mod volume;

pub use box3::Box3;
pub use export::{ExportError, SliceSheetMeta, export_png_slices};
pub use mesh::MeshData;
pub use obj::{CornerIndex, ImportError, IndexedMesh, flatten, load_obj};
pub use slices::{Material, SliceLayer, SliceRaster, composite_slices};
pub use vertex::{ModelVertex, OPAQUE_WHITE};
pub use volume::{SparseVolume, VolumeCursor, VoxelSource};
