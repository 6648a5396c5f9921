//! High-level terrain system owning the current mesh.

use super::mesh::{HeightmapMesh, Mesh};
use crate::error::Result;
use crate::params::TerrainConfig;

/// Terrain configuration plus the most recently built mesh
pub struct TerrainSystem {
    config: TerrainConfig,
    mesh: Option<Mesh>,
}

impl TerrainSystem {
    /// Create a terrain system; no mesh exists until the first rebuild
    pub fn new(config: TerrainConfig) -> Self {
        config.fractal.warn_if_degenerate();
        Self { config, mesh: None }
    }

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    /// Current mesh, if one has been built
    pub fn mesh(&self) -> Option<&Mesh> {
        self.mesh.as_ref()
    }

    /// Rebuild the mesh from scratch at a new resolution.
    ///
    /// On error the previous mesh stays in place.
    pub fn rebuild(&mut self, width: usize, height: usize) -> Result<&Mesh> {
        let mesh = HeightmapMesh::build(width, height, &self.config)?;
        Ok(&*self.mesh.insert(mesh))
    }

    /// Swap in a new configuration and rebuild at `width` x `height`.
    ///
    /// Configuration and mesh change together or not at all.
    pub fn reconfigure(
        &mut self,
        config: TerrainConfig,
        width: usize,
        height: usize,
    ) -> Result<&Mesh> {
        config.fractal.warn_if_degenerate();
        let mesh = HeightmapMesh::build(width, height, &config)?;
        self.config = config;
        Ok(&*self.mesh.insert(mesh))
    }
}
