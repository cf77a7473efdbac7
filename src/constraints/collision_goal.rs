// src/constraints/collision_goal.rs
use super::Constraint;
use crate::math::{Real, Real3};

/// Per-vertex collision goal constraint. One slot exists per vertex of each
/// object and is re-seeded every step (spec §3, §4.F step 3).
#[derive(Clone, Copy, Debug)]
pub struct CollisionConstraint {
    pub goal_position: Real3,
    pub active: bool,
    pub compliance: Real,
    lambda: Real,
}

impl CollisionConstraint {
    pub fn inactive(compliance: Real) -> Self {
        Self {
            goal_position: Real3::ZERO,
            active: false,
            compliance,
            lambda: 0.0,
        }
    }
}

impl Constraint for CollisionConstraint {
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
