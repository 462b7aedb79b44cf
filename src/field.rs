//! The static particle lattice.
//!
//! Particles form a regular grid on a plane; all motion happens in the
//! vertex stage, driven by the trail texture. The CPU builds the lattice
//! once and never touches it again.

use bytemuck::{Pod, Zeroable};

/// Per-particle vertex data, laid out for the instance buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct ParticleVertex {
    /// Rest position on the field plane (z = 0).
    pub position: [f32; 3],
    /// Per-particle phase angle in [0, 2π), fixed at creation.
    pub phase: f32,
    /// Texture coordinate into the base picture and trail surface.
    pub uv: [f32; 2],
    pub _pad: [f32; 2],
}

/// Configuration for the particle lattice.
#[derive(Debug, Clone)]
pub struct FieldConfig {
    /// Particles per side; total count is this squared.
    pub grid_resolution: u32,
    /// World-space side length of the field plane.
    pub extent: f32,
    /// Seed for the per-particle phase angles.
    pub seed: u32,
}

impl FieldConfig {
    pub fn new(grid_resolution: u32) -> Self {
        assert!(grid_resolution > 0, "grid resolution must be non-zero");
        Self {
            grid_resolution,
            extent: 10.0,
            seed: 1,
        }
    }

    pub fn with_extent(mut self, extent: f32) -> Self {
        self.extent = extent;
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self::new(128)
    }
}

/// A grid of particles covering the field plane.
pub struct ParticleField {
    config: FieldConfig,
    vertices: Vec<ParticleVertex>,
}

impl ParticleField {
    /// Build the lattice. Positions are cell centers mapped to
    /// `[-extent/2, extent/2]²`; phases come from a seeded hash so the
    /// layout is deterministic across runs.
    pub fn new(config: FieldConfig) -> Self {
        let n = config.grid_resolution;
        let mut vertices = Vec::with_capacity((n * n) as usize);
        for row in 0..n {
            for col in 0..n {
                let u = (col as f32 + 0.5) / n as f32;
                let v = (row as f32 + 0.5) / n as f32;
                let index = row * n + col;
                let phase =
                    pseudo_random(index.wrapping_add(config.seed)) * std::f32::consts::TAU;
                vertices.push(ParticleVertex {
                    position: [
                        (u - 0.5) * config.extent,
                        (v - 0.5) * config.extent,
                        0.0,
                    ],
                    phase,
                    uv: [u, v],
                    _pad: [0.0; 2],
                });
            }
        }
        Self { config, vertices }
    }

    pub fn count(&self) -> u32 {
        self.config.grid_resolution * self.config.grid_resolution
    }

    pub fn extent(&self) -> f32 {
        self.config.extent
    }

    pub fn vertices(&self) -> &[ParticleVertex] {
        &self.vertices
    }

    pub fn vertex_stride() -> u64 {
        std::mem::size_of::<ParticleVertex>() as u64
    }
}

fn pseudo_random(seed: u32) -> f32 {
    let x = seed.wrapping_mul(1103515245).wrapping_add(12345);
    let x = x ^ (x >> 16);
    (x & 0x7FFFFFFF) as f32 / 0x7FFFFFFF as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_is_resolution_squared() {
        let field = ParticleField::new(FieldConfig::new(16));
        assert_eq!(field.count(), 256);
        assert_eq!(field.vertices().len(), 256);
    }

    #[test]
    fn test_positions_span_extent() {
        let field = ParticleField::new(FieldConfig::new(8).with_extent(10.0));
        for v in field.vertices() {
            assert!(v.position[0].abs() <= 5.0);
            assert!(v.position[1].abs() <= 5.0);
            assert_eq!(v.position[2], 0.0);
        }
        // Cell centers: the outermost particle sits half a cell in from
        // the edge.
        let first = field.vertices()[0];
        assert!((first.position[0] - (-5.0 + 10.0 / 16.0)).abs() < 1e-5);
    }

    #[test]
    fn test_uvs_in_unit_square() {
        let field = ParticleField::new(FieldConfig::new(8));
        for v in field.vertices() {
            assert!(v.uv[0] > 0.0 && v.uv[0] < 1.0);
            assert!(v.uv[1] > 0.0 && v.uv[1] < 1.0);
        }
    }

    #[test]
    fn test_phases_in_range() {
        let field = ParticleField::new(FieldConfig::new(32));
        for v in field.vertices() {
            assert!(v.phase >= 0.0);
            assert!(v.phase < std::f32::consts::TAU + 1e-4);
        }
    }

    #[test]
    fn test_phases_vary() {
        let field = ParticleField::new(FieldConfig::new(8));
        let first = field.vertices()[0].phase;
        assert!(field.vertices().iter().any(|v| (v.phase - first).abs() > 0.1));
    }

    #[test]
    fn test_deterministic_for_seed() {
        let a = ParticleField::new(FieldConfig::new(16).with_seed(42));
        let b = ParticleField::new(FieldConfig::new(16).with_seed(42));
        for (va, vb) in a.vertices().iter().zip(b.vertices()) {
            assert_eq!(va.phase, vb.phase);
            assert_eq!(va.position, vb.position);
        }
    }

    #[test]
    fn test_seed_changes_phases() {
        let a = ParticleField::new(FieldConfig::new(16).with_seed(1));
        let b = ParticleField::new(FieldConfig::new(16).with_seed(2));
        let differing = a
            .vertices()
            .iter()
            .zip(b.vertices())
            .filter(|(va, vb)| va.phase != vb.phase)
            .count();
        assert!(differing > 0);
    }

    #[test]
    fn test_vertex_stride() {
        assert_eq!(ParticleField::vertex_stride(), 32);
    }
}
