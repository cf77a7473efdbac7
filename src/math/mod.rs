// src/math/mod.rs
mod aabb;

pub use aabb::Aabb;

/// Double-precision scalar, per spec §3.
pub type Real = f64;
/// 3-vector. Re-exported from `glam` so embedders get the usual vector API
/// (add/sub/scale/dot/cross/normalize) for free.
pub type Real3 = glam::DVec3;
/// 3x3 matrix, reserved for future inertia/rotation use.
pub type Real3x3 = glam::DMat3;

/// Compares `len(a - b)` against `threshold` without taking a square root.
#[inline]
pub fn distance_at_least(a: Real3, b: Real3, threshold: Real) -> bool {
    (a - b).length_squared() >= threshold * threshold
}

/// Compares `len(v)` against `threshold` without taking a square root.
#[inline]
pub fn length_at_least(v: Real3, threshold: Real) -> bool {
    v.length_squared() >= threshold * threshold
}
