//! Fixed-capacity model registry for voxel substitution.
//!
//! Maps small integer model ids to meshes that stand in for the default
//! unit cube when individual voxels are drawn. Id 0 is reserved: it
//! always means "render the canonical cube" and is never stored here.

use crate::model::Model3d;

/// Number of addressable model slots, including the reserved id 0.
pub const MAX_MODELS: usize = 256;

/// Registration errors. Both are caller programming errors, reported
/// and never fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("model id 0 is reserved for normal cube rendering")]
    InvalidId,
    #[error("model id {0} exceeds maximum {max}", max = MAX_MODELS - 1)]
    IdOutOfRange(u32),
}

struct ModelSlot {
    model: Model3d,
    name: Option<String>,
}

/// Fixed 256-slot id to model table.
///
/// Each occupied slot uniquely owns its model; replacing or clearing a
/// slot drops the previous occupant, which releases its CPU vertices
/// and GPU buffer together. Absent ids are a normal query outcome, used
/// by the renderer to fall back to the canonical cube.
pub struct ModelRegistry {
    slots: Vec<Option<ModelSlot>>,
    count: usize,
}

impl ModelRegistry {
    /// Creates an empty registry with all slots free.
    pub fn new() -> Self {
        let mut slots = Vec::new();
        slots.resize_with(MAX_MODELS, || None);
        tracing::info!("Model registry initialized");
        Self { slots, count: 0 }
    }

    /// Re-initializes an empty registry. On a populated registry this is
    /// a no-op that logs a warning; use [`ModelRegistry::clear`] first
    /// to tear down.
    pub fn init(&mut self) {
        if self.count > 0 {
            tracing::warn!("Model registry already initialized");
            return;
        }
        tracing::info!("Model registry initialized");
    }

    /// Validates an id arriving from external data (voxel payloads,
    /// scene files). The `u8`-typed entry points cannot be out of
    /// range; raw integers can.
    pub fn validate_id(raw: u32) -> Result<u8, RegistryError> {
        if raw == 0 {
            return Err(RegistryError::InvalidId);
        }
        if raw >= MAX_MODELS as u32 {
            return Err(RegistryError::IdOutOfRange(raw));
        }
        Ok(raw as u8)
    }

    /// Registers `model` under `id`, replacing any previous occupant.
    ///
    /// The replaced model is dropped, releasing its GPU buffer. Id 0 is
    /// rejected.
    pub fn register(
        &mut self,
        id: u8,
        model: Model3d,
        name: Option<String>,
    ) -> Result<(), RegistryError> {
        if id == 0 {
            tracing::error!("Model id 0 is reserved for normal cube rendering");
            return Err(RegistryError::InvalidId);
        }

        let slot = &mut self.slots[id as usize];
        if slot.is_some() {
            tracing::warn!("Model id {} already registered, replacing", id);
        } else {
            self.count += 1;
        }
        *slot = Some(ModelSlot { model, name });
        tracing::debug!("Registered model id {}", id);
        Ok(())
    }

    /// Returns the model registered under `id`.
    ///
    /// Id 0 and empty slots resolve to None, never an error; the caller
    /// falls back to the canonical cube.
    pub fn get(&self, id: u8) -> Option<&Model3d> {
        if id == 0 {
            return None;
        }
        self.slots[id as usize].as_ref().map(|s| &s.model)
    }

    /// Mutable access to a registered model (for uploads during draws).
    pub fn get_mut(&mut self, id: u8) -> Option<&mut Model3d> {
        if id == 0 {
            return None;
        }
        self.slots[id as usize].as_mut().map(|s| &mut s.model)
    }

    /// Number of occupied slots. The reserved id 0 never counts.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Display name for `id`. Id 0 is always the default cube.
    pub fn display_name(&self, id: u8) -> Option<&str> {
        if id == 0 {
            return Some("Cube");
        }
        self.slots[id as usize].as_ref().and_then(|s| s.name.as_deref())
    }

    /// Occupied ids in ascending order, excluding the reserved id 0.
    pub fn occupied_ids(&self) -> impl Iterator<Item = u8> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(id, _)| id as u8)
    }

    /// Drops every registered model, releasing CPU vertices and GPU
    /// buffers together.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
        self.count = 0;
        tracing::info!("Model registry cleared");
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::new()
    }
}
