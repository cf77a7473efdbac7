// src/scene.rs
use crate::constraints::SpringConstraint;
use crate::error::PhysicsError;
use crate::math::Real3;
use crate::object::TetraObject;

/// Owns every simulated object plus the cross-object springs between them
/// (spec §3, §9). Springs reference objects by index rather than by
/// pointer so the scene never forms an ownership cycle.
#[derive(Default)]
pub struct Scene {
    pub objects: Vec<TetraObject>,
    pub springs: Vec<SpringConstraint>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_object(&mut self, object: TetraObject) -> usize {
        self.objects.push(object);
        self.objects.len() - 1
    }

    pub fn add_spring(&mut self, spring: SpringConstraint) {
        self.springs.push(spring);
    }

    pub fn clear_springs(&mut self) {
        self.springs.clear();
    }

    pub fn get_object(&self, index: usize) -> Result<&TetraObject, PhysicsError> {
        self.objects.get(index).ok_or(PhysicsError::IndexOutOfRange {
            index,
            len: self.objects.len(),
        })
    }

    pub fn get_object_mut(&mut self, index: usize) -> Result<&mut TetraObject, PhysicsError> {
        let len = self.objects.len();
        self.objects
            .get_mut(index)
            .ok_or(PhysicsError::IndexOutOfRange { index, len })
    }

    /// Mean of every object's center of mass (unweighted, geometric helper
    /// used for e.g. camera framing; spec §9 supplemented feature).
    pub fn center(&self) -> Real3 {
        if self.objects.is_empty() {
            return Real3::ZERO;
        }
        let mut sum = Real3::ZERO;
        let mut count = 0usize;
        for obj in &self.objects {
            for &p in &obj.positions {
                sum += p;
                count += 1;
            }
        }
        if count == 0 {
            Real3::ZERO
        } else {
            sum / count as f64
        }
    }
}

/// Returns mutable references to two distinct objects by index, for solving
/// a spring that spans objects (spec §9). Takes the object slice directly
/// (rather than `&mut Scene`) so callers can still hold `&mut scene.springs`
/// at the same time. Errors if either index is out of range or the indices
/// are equal.
pub(crate) fn split_objects_mut(
    objects: &mut [TetraObject],
    a: usize,
    b: usize,
) -> Result<(&mut TetraObject, &mut TetraObject), PhysicsError> {
    let len = objects.len();
    if a >= len {
        return Err(PhysicsError::IndexOutOfRange { index: a, len });
    }
    if b >= len {
        return Err(PhysicsError::IndexOutOfRange { index: b, len });
    }
    if a == b {
        return Err(PhysicsError::InvalidGeometry(format!(
            "spring endpoints reference the same object index {a} on both sides"
        )));
    }
    if a < b {
        let (left, right) = objects.split_at_mut(b);
        Ok((&mut left[a], &mut right[0]))
    } else {
        let (left, right) = objects.split_at_mut(a);
        Ok((&mut right[0], &mut left[b]))
    }
}
