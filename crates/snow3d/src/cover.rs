//! Persistent snow-cover field.
//!
//! A fixed-topology grid of surface vertices over the ground plateau, plus
//! four cosmetic skirt strips along its edges. Each vertex carries a coverage
//! value in [0, 1+] that only ever grows; once a vertex saturates, further
//! deposits raise its height instead. The field is a monotone accumulator
//! with one mutating operation (`deposit`) and derived normals for rendering.

use glam::Vec3;

use crate::constants::{
    COVER_BASE_HEIGHT, COVER_DIVISIONS, COVER_HALF_EXTENT, DEPOSIT_RADIUS, DEPOSIT_STRENGTH,
    SATURATED_HEIGHT_GAIN,
};

/// Settled-snow surface. Interior vertices come first in all per-vertex
/// arrays, followed by the four skirt strips.
#[derive(Clone, Debug)]
pub struct SnowCover {
    divisions: usize,
    positions: Vec<Vec3>,
    coverage: Vec<f32>,
    normals: Vec<Vec3>,
    interior_len: usize,
}

impl SnowCover {
    /// Build the grid: `(divisions + 1)²` interior vertices spanning
    /// `[-half_extent, half_extent]` on X and Z at the base height, then one
    /// skirt strip per edge with coverage pinned at 1 and outward normals.
    /// Topology never changes after this.
    pub fn new(divisions: usize, half_extent: f32) -> Self {
        let k = divisions;
        let step = 2.0 * half_extent / k as f32;
        let side = k + 1;

        let mut positions = Vec::with_capacity(side * side + 4 * side);
        let mut coverage = Vec::with_capacity(positions.capacity());
        let mut normals = Vec::with_capacity(positions.capacity());

        for i in 0..side {
            let z = -half_extent + i as f32 * step;
            for j in 0..side {
                let x = -half_extent + j as f32 * step;
                positions.push(Vec3::new(x, COVER_BASE_HEIGHT, z));
                coverage.push(0.0);
                normals.push(Vec3::Y);
            }
        }
        let interior_len = positions.len();

        // Skirts: -Z edge, +X edge, +Z edge, -X edge, wound to face outward.
        let edges: [(fn(f32, f32) -> Vec3, Vec3); 4] = [
            (|t, he| Vec3::new(-he + t, COVER_BASE_HEIGHT, -he), Vec3::NEG_Z),
            (|t, he| Vec3::new(he, COVER_BASE_HEIGHT, -he + t), Vec3::X),
            (|t, he| Vec3::new(he - t, COVER_BASE_HEIGHT, he), Vec3::Z),
            (|t, he| Vec3::new(-he, COVER_BASE_HEIGHT, he - t), Vec3::NEG_X),
        ];
        for (place, normal) in edges {
            for i in 0..side {
                positions.push(place(i as f32 * step, half_extent));
                coverage.push(1.0);
                normals.push(normal);
            }
        }

        Self {
            divisions,
            positions,
            coverage,
            normals,
            interior_len,
        }
    }

    /// Absorb one landed flake at `query`.
    ///
    /// Every interior vertex within `DEPOSIT_RADIUS` (full 3D Euclidean
    /// distance; landings sit near y = 0 so the ground-plane distance
    /// dominates) gains `min(DEPOSIT_STRENGTH, DEPOSIT_STRENGTH / dist)`
    /// coverage. A vertex at or past saturation additionally rises by
    /// `SATURATED_HEIGHT_GAIN` times the influence. Skirt vertices never
    /// participate.
    pub fn deposit(&mut self, query: Vec3) {
        for idx in 0..self.interior_len {
            let dist = (query - self.positions[idx]).length();
            if dist > DEPOSIT_RADIUS {
                continue;
            }
            // dist == 0 gives +inf, which the min collapses to the cap.
            let amount = (DEPOSIT_STRENGTH / dist).min(DEPOSIT_STRENGTH);
            self.coverage[idx] += amount;
            if self.coverage[idx] >= 1.0 {
                self.positions[idx].y += SATURATED_HEIGHT_GAIN * amount;
            }
        }
    }

    /// Recompute interior normals from the current height field by averaging
    /// the face normals of the grid's triangles. Skirt normals stay fixed.
    /// Derived state for the renderer only; `deposit` does not call this.
    pub fn recompute_normals(&mut self) {
        let side = self.divisions + 1;
        for n in self.normals[..self.interior_len].iter_mut() {
            *n = Vec3::ZERO;
        }

        for i in 0..self.divisions {
            for j in 0..self.divisions {
                let v00 = i * side + j;
                let v10 = i * side + j + 1;
                let v01 = (i + 1) * side + j;
                let v11 = (i + 1) * side + j + 1;

                let a = self.positions[v00];
                let b = self.positions[v10];
                let c = self.positions[v01];
                let d = self.positions[v11];

                // Two triangles per cell, wound so the normals point up.
                let n0 = (c - a).cross(b - a);
                let n1 = (c - b).cross(d - b);

                for (tri, n) in [([v00, v10, v01], n0), ([v10, v11, v01], n1)] {
                    let n = n.normalize_or_zero();
                    for v in tri {
                        self.normals[v] += n;
                    }
                }
            }
        }

        for n in self.normals[..self.interior_len].iter_mut() {
            *n = n.normalize_or(Vec3::Y);
        }
    }

    /// Grid divisions per axis.
    pub fn divisions(&self) -> usize {
        self.divisions
    }

    /// Vertices of the deposit-receiving interior grid.
    pub fn interior_len(&self) -> usize {
        self.interior_len
    }

    /// All vertex positions, interior first, then skirts.
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Per-vertex coverage, same ordering as `positions`.
    pub fn coverage(&self) -> &[f32] {
        &self.coverage
    }

    /// Per-vertex normals, same ordering as `positions`.
    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    /// Index of the interior vertex at grid coordinates (row, col).
    pub fn vertex_index(&self, row: usize, col: usize) -> usize {
        debug_assert!(row <= self.divisions && col <= self.divisions);
        row * (self.divisions + 1) + col
    }

    /// Interior vertex nearest to a world-space point, by ground-plane
    /// position.
    pub fn nearest_vertex(&self, query: Vec3) -> usize {
        let mut best = 0;
        let mut best_dist = f32::INFINITY;
        for (idx, pos) in self.positions[..self.interior_len].iter().enumerate() {
            let d = (query.x - pos.x).powi(2) + (query.z - pos.z).powi(2);
            if d < best_dist {
                best_dist = d;
                best = idx;
            }
        }
        best
    }
}

impl Default for SnowCover {
    fn default() -> Self {
        Self::new(COVER_DIVISIONS, COVER_HALF_EXTENT)
    }
}
