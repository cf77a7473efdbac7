// src/engine/config.rs
use crate::collision::DEFAULT_NOT_COLLISION_THRESHOLD;
use crate::math::{Real, Real3};

/// Tunables for a single `XpbdIntegrator` (spec §6). Every field has a
/// sensible default; construct with `..Default::default()` to override
/// only what matters for a given scene.
#[derive(Clone, Debug)]
pub struct PhysicsConfig {
    /// Constant acceleration applied to every non-fixed vertex each step.
    pub gravity: Real3,
    /// Step size in seconds. XPBD compliance scales with this, so changing
    /// it between steps is valid but changes effective stiffness.
    pub dt: Real,
    /// Number of Gauss-Seidel relaxation sweeps over edges, springs, and
    /// collision goals within a single step (spec §4.F, §9).
    pub solver_iterations: usize,
    /// Default compliance for structural edge constraints, used by
    /// `create_box` and any loader that doesn't set its own per-edge value.
    pub edge_compliance: Real,
    /// Default compliance for cross-object spring constraints.
    pub spring_compliance: Real,
    /// Compliance applied to every per-vertex collision goal constraint.
    pub collision_compliance: Real,
    /// Minimum SAT overlap treated as a real collision; shallower contacts
    /// are ignored (spec §4.D).
    pub not_collision_threshold: Real,
    /// Ground plane height. Every non-fixed vertex is clamped to
    /// `y >= ground_y` at the end of each step (spec §4.F step 7).
    pub ground_y: Real,
}

/// Default step rate (spec §6): `dt = 1.0 / steps_per_second`.
pub const DEFAULT_STEPS_PER_SECOND: Real = 240.0;

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Real3::new(0.0, -9.81, 0.0),
            dt: 1.0 / DEFAULT_STEPS_PER_SECOND,
            solver_iterations: 10,
            edge_compliance: 0.0,
            spring_compliance: 0.0,
            collision_compliance: 0.0,
            not_collision_threshold: DEFAULT_NOT_COLLISION_THRESHOLD,
            ground_y: -2.0,
        }
    }
}

impl PhysicsConfig {
    /// Builds a config with `dt` derived from a step rate, per spec §6.
    pub fn with_steps_per_second(steps_per_second: Real) -> Self {
        Self {
            dt: 1.0 / steps_per_second,
            ..Self::default()
        }
    }
}
