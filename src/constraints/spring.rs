// src/constraints/spring.rs
use super::Constraint;
use crate::math::Real;

/// Cross-object spring constraint (spec §3). Distinct from an `Edge` because
/// its two vertices belong to different objects, referenced by index into
/// the owning `Scene` (spec §9: back-references are relations, not
/// ownership — no raw pointers, no cycles).
#[derive(Clone, Copy, Debug)]
pub struct SpringConstraint {
    pub object1: usize,
    pub vertex1: u32,
    pub object2: usize,
    pub vertex2: u32,
    pub rest_length: Real,
    pub compliance: Real,
    lambda: Real,
}

impl SpringConstraint {
    pub fn new(
        object1: usize,
        vertex1: u32,
        object2: usize,
        vertex2: u32,
        rest_length: Real,
        compliance: Real,
    ) -> Self {
        Self {
            object1,
            vertex1,
            object2,
            vertex2,
            rest_length,
            compliance,
            lambda: 0.0,
        }
    }
}

impl Constraint for SpringConstraint {
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
