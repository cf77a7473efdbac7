// src/collision/sat.rs
use crate::math::{Real, Real3};

/// Default separating-axis overlap below which a contact is treated as a
/// graze rather than a real collision (spec §4.D). Exposed as a tunable on
/// `PhysicsConfig`; this constant is only the fallback default.
pub const DEFAULT_NOT_COLLISION_THRESHOLD: Real = 1e-3;

/// Result of a tetrahedron-tetrahedron SAT test (spec §4.D).
#[derive(Clone, Copy, Debug)]
pub struct CollisionInfo {
    pub intersecting: bool,
    /// Minimum translation vector axis, pointing from tetra1 toward tetra2.
    pub axis: Real3,
    /// Penetration depth along `axis`.
    pub penetration: Real,
}

impl CollisionInfo {
    fn none() -> Self {
        Self {
            intersecting: false,
            axis: Real3::ZERO,
            penetration: 0.0,
        }
    }
}

const FACES: [[usize; 3]; 4] = [[0, 1, 2], [0, 2, 3], [0, 1, 3], [1, 2, 3]];
const OPPOSITE: [usize; 4] = [3, 1, 2, 0];

fn push_face_normals(ps: &[Real3; 4], axes: &mut Vec<(Real3, u8)>, owner: u8) {
    let centroid = (ps[0] + ps[1] + ps[2] + ps[3]) / 4.0;
    for (face, &opp) in FACES.iter().zip(OPPOSITE.iter()) {
        let a = ps[face[0]];
        let b = ps[face[1]];
        let c = ps[face[2]];
        let mut normal = (b - a).cross(c - a).normalize_or_zero();
        if normal == Real3::ZERO {
            continue;
        }
        if normal.dot(ps[opp] - centroid) > 0.0 {
            normal = -normal;
        }
        axes.push((normal, owner));
    }
}

fn edge_vectors(ps: &[Real3; 4]) -> [Real3; 6] {
    [
        ps[1] - ps[0],
        ps[2] - ps[0],
        ps[3] - ps[0],
        ps[2] - ps[1],
        ps[3] - ps[1],
        ps[3] - ps[2],
    ]
}

fn push_edge_cross_axes(e1: &[Real3; 6], e2: &[Real3; 6], axes: &mut Vec<(Real3, u8)>) {
    for a in e1 {
        for b in e2 {
            let axis = a.cross(*b);
            let normalized = axis.normalize_or_zero();
            if normalized != Real3::ZERO {
                axes.push((normalized, 0));
            }
        }
    }
}

fn project(ps: &[Real3; 4], axis: Real3) -> (Real, Real) {
    let mut min = ps[0].dot(axis);
    let mut max = min;
    for &p in &ps[1..] {
        let d = p.dot(axis);
        min = min.min(d);
        max = max.max(d);
    }
    (min, max)
}

/// Separating-axis test between two tetrahedra, each given as four
/// world-space vertices. Tests the 4+4 face normals and up to 36
/// edge-cross-product axes; returns the minimum-penetration axis oriented
/// from tetra1 toward tetra2 (spec §4.D).
pub fn sat_tet_tet(p1: [Real3; 4], p2: [Real3; 4], not_collision_threshold: Real) -> CollisionInfo {
    let mut axes: Vec<(Real3, u8)> = Vec::with_capacity(4 + 4 + 36);
    push_face_normals(&p1, &mut axes, 1);
    push_face_normals(&p2, &mut axes, 2);

    let e1 = edge_vectors(&p1);
    let e2 = edge_vectors(&p2);
    push_edge_cross_axes(&e1, &e2, &mut axes);

    let mut min_overlap = Real::INFINITY;
    let mut min_axis = Real3::ZERO;
    let mut min_owner = 0u8;

    for (axis, owner) in axes {
        let (min1, max1) = project(&p1, axis);
        let (min2, max2) = project(&p2, axis);

        let overlap = max1.min(max2) - min1.max(min2);
        if overlap < 0.0 {
            return CollisionInfo::none();
        }
        if overlap < min_overlap {
            min_overlap = overlap;
            min_axis = axis;
            min_owner = owner;
        }
    }

    if min_overlap < not_collision_threshold {
        return CollisionInfo::none();
    }

    if min_owner == 2 {
        min_axis = -min_axis;
    }

    let center1 = (p1[0] + p1[1] + p1[2] + p1[3]) / 4.0;
    let center2 = (p2[0] + p2[1] + p2[2] + p2[3]) / 4.0;
    if min_owner == 0 && min_axis.dot(center2 - center1) < 0.0 {
        min_axis = -min_axis;
    }

    CollisionInfo {
        intersecting: true,
        axis: min_axis,
        penetration: min_overlap,
    }
}
