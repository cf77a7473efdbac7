// src/object.rs
use rustc_hash::FxHashSet;

use crate::constraints::{CollisionConstraint, Constraint, Edge};
use crate::error::PhysicsError;
use crate::math::{Aabb, Real, Real3};

/// A tetrahedron within a `TetraObject` (spec §3, §4.C).
///
/// `rest_volume` is fixed at construction. `normals`/`edges`/`center` are a
/// transient cache, valid only while `initialized` is true;
/// `invalidate_tetra_cache` (called once per step) clears the flag so the
/// next `ensure_initialized`
/// recomputes them from current positions. `old_center` holds the previous
/// step's `center`, letting collision collection derive a per-tetra
/// tangential displacement (`dp_tang`, spec §9) that no constraint
/// currently consumes.
#[derive(Clone, Debug)]
pub struct Tetrahedron {
    pub vs: [u32; 4],
    pub rest_volume: Real,
    pub aabb: Aabb,
    pub center: Real3,
    pub old_center: Real3,
    pub normals: [Real3; 4],
    pub edges: [Real3; 6],
    pub initialized: bool,
    /// Compliance/lambda for a tetrahedron-volume constraint record (spec
    /// §4.B). No solver in §4.G defines a volume-preservation update, so
    /// these are carried but never projected, matching the teacher source.
    pub compliance: Real,
    lambda: Real,
}

impl Tetrahedron {
    fn new(vs: [u32; 4], rest_volume: Real, compliance: Real) -> Self {
        Self {
            vs,
            rest_volume,
            aabb: Aabb::from_point(Real3::ZERO),
            center: Real3::ZERO,
            old_center: Real3::ZERO,
            normals: [Real3::ZERO; 4],
            edges: [Real3::ZERO; 6],
            initialized: false,
            compliance,
            lambda: 0.0,
        }
    }

    /// Marks the cache stale so the next `ensure_initialized` recomputes it.
    /// Distinct from `Constraint::reset`, which only zeroes `lambda`.
    pub fn invalidate_cache(&mut self) {
        self.initialized = false;
    }

    fn update_aabb(&mut self, ps: &[Real3; 4]) {
        let mut aabb = Aabb::from_point(ps[0]);
        aabb.expand(ps[1]);
        aabb.expand(ps[2]);
        aabb.expand(ps[3]);
        self.aabb = aabb;
    }

    /// Recomputes cached face normals, edge vectors, and center from
    /// `ps` (the tetrahedron's four current world-space vertices),
    /// unless already done this step. Outward face normals are oriented
    /// away from the opposite vertex, per spec §4.D.
    pub fn ensure_initialized(&mut self, ps: &[Real3; 4]) {
        if self.initialized {
            return;
        }

        self.old_center = self.center;

        let face = |a: Real3, b: Real3, c: Real3, opp: Real3| -> Real3 {
            let mut normal = (b - a).cross(c - a).normalize_or_zero();
            let center = (a + b + c) / 3.0;
            if normal.dot(opp - center) > 0.0 {
                normal = -normal;
            }
            normal
        };

        self.normals[0] = face(ps[0], ps[1], ps[2], ps[3]);
        self.normals[1] = face(ps[0], ps[2], ps[3], ps[1]);
        self.normals[2] = face(ps[0], ps[1], ps[3], ps[2]);
        self.normals[3] = face(ps[1], ps[2], ps[3], ps[0]);

        self.edges[0] = ps[1] - ps[0];
        self.edges[1] = ps[2] - ps[0];
        self.edges[2] = ps[3] - ps[0];
        self.edges[3] = ps[2] - ps[1];
        self.edges[4] = ps[3] - ps[1];
        self.edges[5] = ps[3] - ps[2];

        self.center = (ps[0] + ps[1] + ps[2] + ps[3]) / 4.0;

        self.initialized = true;
    }
}

impl Constraint for Tetrahedron {
    fn compliance(&self) -> Real {
        self.compliance
    }
    fn lambda(&self) -> Real {
        self.lambda
    }
    fn lambda_mut(&mut self) -> &mut Real {
        &mut self.lambda
    }
}

fn tetra_volume(x1: Real3, x2: Real3, x3: Real3, x4: Real3) -> Real {
    let v1 = x2 - x1;
    let v2 = x3 - x1;
    let v3 = x4 - x1;
    (v1.cross(v2)).dot(v3).abs() / 6.0
}

/// A simulated deformable object: its vertex arrays, tetrahedra, structural
/// edges, and per-vertex collision slots (spec §3, §4.C).
pub struct TetraObject {
    pub positions: Vec<Real3>,
    pub old_positions: Vec<Real3>,
    pub velocities: Vec<Real3>,
    pub inv_masses: Vec<Real>,

    pub tetras: Vec<Tetrahedron>,
    pub edges: Vec<Edge>,

    pub vertex_edges: Vec<Vec<u32>>,
    pub vertex_tetras: Vec<Vec<u32>>,

    /// Collision incidence lists, cleared at the start of each step's
    /// collection phase and rebuilt while collecting collisions (spec §5).
    pub(crate) vertex_collision_incidences: Vec<Vec<u32>>,
    /// One collision-goal slot per vertex, re-seeded every step.
    pub vertex_collisions: Vec<CollisionConstraint>,

    pub aabb: Aabb,
}

impl TetraObject {
    fn build(
        positions: Vec<Real3>,
        tetra_indices: Vec<[u32; 4]>,
        edge_compliance: Real,
    ) -> Self {
        let n = positions.len();

        let mut tetras = Vec::with_capacity(tetra_indices.len());
        let mut vertex_tetras = vec![Vec::new(); n];
        let mut unique_edges: FxHashSet<(u32, u32)> = FxHashSet::default();

        for (ti, vs) in tetra_indices.into_iter().enumerate() {
            let [a, b, c, d] = vs;
            let ps = [
                positions[a as usize],
                positions[b as usize],
                positions[c as usize],
                positions[d as usize],
            ];
            let volume = tetra_volume(ps[0], ps[1], ps[2], ps[3]);
            tetras.push(Tetrahedron::new(vs, volume, 0.0));

            vertex_tetras[a as usize].push(ti as u32);
            vertex_tetras[b as usize].push(ti as u32);
            vertex_tetras[c as usize].push(ti as u32);
            vertex_tetras[d as usize].push(ti as u32);

            for i in 0..4 {
                for j in (i + 1)..4 {
                    let (v1, v2) = (vs[i], vs[j]);
                    unique_edges.insert((v1.min(v2), v1.max(v2)));
                }
            }
        }

        let mut ordered_edges: Vec<(u32, u32)> = unique_edges.into_iter().collect();
        ordered_edges.sort_unstable();

        let mut edges = Vec::with_capacity(ordered_edges.len());
        let mut vertex_edges = vec![Vec::new(); n];
        for (ei, (v1, v2)) in ordered_edges.into_iter().enumerate() {
            let rest_length = positions[v1 as usize].distance(positions[v2 as usize]);
            edges.push(Edge::new(v1, v2, rest_length, edge_compliance));
            vertex_edges[v1 as usize].push(ei as u32);
            vertex_edges[v2 as usize].push(ei as u32);
        }

        let old_positions = positions.clone();

        let mut obj = Self {
            positions,
            old_positions,
            velocities: vec![Real3::ZERO; n],
            inv_masses: vec![1.0; n],
            tetras,
            edges,
            vertex_edges,
            vertex_tetras,
            vertex_collision_incidences: vec![Vec::new(); n],
            vertex_collisions: vec![CollisionConstraint::inactive(0.0); n],
            aabb: Aabb::from_point(Real3::ZERO),
        };
        obj.update_aabb();
        obj
    }

    /// Validates loader-supplied geometry (spec §7: out-of-range or
    /// duplicate indices within a tetrahedron fail at load) and builds a
    /// `TetraObject` from it.
    pub fn from_geometry(
        positions: Vec<Real3>,
        tetra_indices: Vec<[u32; 4]>,
        edge_compliance: Real,
    ) -> Result<Self, PhysicsError> {
        let n = positions.len();
        for vs in &tetra_indices {
            for &v in vs {
                if v as usize >= n {
                    return Err(PhysicsError::InvalidGeometry(format!(
                        "tetra vertex index {v} out of range (have {n} vertices)"
                    )));
                }
            }
            let mut sorted = *vs;
            sorted.sort_unstable();
            if sorted[0] == sorted[1] || sorted[1] == sorted[2] || sorted[2] == sorted[3] {
                return Err(PhysicsError::InvalidGeometry(format!(
                    "tetra {vs:?} has duplicate vertex indices"
                )));
            }
        }
        Ok(Self::build(positions, tetra_indices, edge_compliance))
    }

    pub fn num_vertices(&self) -> usize {
        self.positions.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn num_tetras(&self) -> usize {
        self.tetras.len()
    }

    pub fn tetra_points(&self, tetra_idx: usize) -> [Real3; 4] {
        let vs = self.tetras[tetra_idx].vs;
        [
            self.positions[vs[0] as usize],
            self.positions[vs[1] as usize],
            self.positions[vs[2] as usize],
            self.positions[vs[3] as usize],
        ]
    }

    pub fn translate(&mut self, v: Real3) {
        for p in &mut self.positions {
            *p += v;
        }
        self.update_aabb();
    }

    pub fn set_velocity(&mut self, v: Real3) {
        for vel in &mut self.velocities {
            *vel = v;
        }
    }

    /// Recomputes the object AABB and each tetrahedron's AABB from current
    /// positions (spec §4.C).
    pub fn update_aabb(&mut self) {
        if self.positions.is_empty() {
            return;
        }
        let mut aabb = Aabb::from_point(self.positions[0]);
        for &p in &self.positions[1..] {
            aabb.expand(p);
        }
        self.aabb = aabb;

        for tetra in &mut self.tetras {
            let ps = [
                self.positions[tetra.vs[0] as usize],
                self.positions[tetra.vs[1] as usize],
                self.positions[tetra.vs[2] as usize],
                self.positions[tetra.vs[3] as usize],
            ];
            tetra.update_aabb(&ps);
        }
    }

    /// Marks every tetrahedron uninitialised so cached normals/edges/center
    /// are recomputed on next demand (spec §4.C, §9, §4.F step 1).
    pub fn invalidate_tetra_cache(&mut self) {
        for tetra in &mut self.tetras {
            tetra.invalidate_cache();
        }
    }

    /// Pins a vertex by zeroing its inverse mass (spec §6: the loader marks
    /// fixed vertices this way).
    pub fn pin(&mut self, vertex: u32) {
        self.inv_masses[vertex as usize] = 0.0;
    }

    pub fn pin_all(&mut self, vertices: &[u32]) {
        for &v in vertices {
            self.pin(v);
        }
    }

    /// Driver mutator: repositions a fixed vertex between steps. The
    /// integrator never overwrites a vertex with `inv_mass == 0.0`, so an
    /// external script drives it entirely through this method.
    pub fn set_position(&mut self, vertex: u32, pos: Real3) {
        self.positions[vertex as usize] = pos;
    }
}

/// Builds a 9-vertex (8 corners + center) box decomposed into 12
/// face-based tetrahedra, vertex/tetra ordering per spec §8 scenario B
/// (grounded on `original_source/object.cpp::create_box`).
pub fn create_box(origin: Real3, width: Real, height: Real, depth: Real, edge_compliance: Real) -> TetraObject {
    let hw = width / 2.0;
    let hh = height / 2.0;
    let hd = depth / 2.0;

    let c = Real3::new(origin.x + hw, origin.y + hh, origin.z + hd);

    let a1 = Real3::new(c.x - hw, c.y + hh, c.z - hd);
    let a2 = Real3::new(c.x - hw, c.y + hh, c.z + hd);
    let a3 = Real3::new(c.x + hw, c.y + hh, c.z + hd);
    let a4 = Real3::new(c.x + hw, c.y + hh, c.z - hd);
    let b1 = Real3::new(c.x - hw, c.y - hh, c.z - hd);
    let b2 = Real3::new(c.x - hw, c.y - hh, c.z + hd);
    let b3 = Real3::new(c.x + hw, c.y - hh, c.z + hd);
    let b4 = Real3::new(c.x + hw, c.y - hh, c.z - hd);

    // 0..=7 corners, 8 = center
    let positions = vec![a1, a2, a3, a4, b1, b2, b3, b4, c];

    let tetras: Vec<[u32; 4]> = vec![
        [1, 0, 2, 8],
        [2, 0, 3, 8],
        [4, 5, 7, 8],
        [7, 5, 6, 8],
        [7, 6, 3, 8],
        [3, 6, 2, 8],
        [1, 4, 0, 8],
        [5, 4, 1, 8],
        [3, 4, 7, 8],
        [0, 4, 3, 8],
        [1, 6, 5, 8],
        [2, 6, 1, 8],
    ];

    TetraObject::build(positions, tetras, edge_compliance)
}
