// src/engine/integrator.rs
use crate::collision::{collect_collisions, seed_collision_goals};
use crate::constraints::Constraint;
use crate::engine::config::PhysicsConfig;
use crate::engine::solver::{solve_collisions, solve_edges};
use crate::math::Real;
use crate::scene::Scene;

/// Drives a `Scene` through the XPBD step sequence (spec §4.F): invalidate
/// the tetra cache, collect collisions against last step's positions, seed
/// per-vertex collision goals, predict this step's positions, reset every
/// constraint's lambda, Gauss-Seidel solve (edges, springs, collisions),
/// then clamp to the floor, derive velocities, and refresh AABBs.
pub struct XpbdIntegrator {
    pub config: PhysicsConfig,
}

impl XpbdIntegrator {
    pub fn new(config: PhysicsConfig) -> Self {
        Self { config }
    }

    /// Builds an integrator with `dt` derived from a step rate (spec §6).
    pub fn init(steps_per_second: Real) -> Self {
        Self::new(PhysicsConfig::with_steps_per_second(steps_per_second))
    }

    pub fn step(&self, scene: &mut Scene) {
        let dt = self.config.dt;

        self.invalidate_tetra_cache(scene);

        let collisions = {
            let _span = tracing::trace_span!("collect_collisions").entered();
            collect_collisions(&mut scene.objects, self.config.not_collision_threshold)
        };
        {
            let _span = tracing::trace_span!("seed_collision_goals").entered();
            seed_collision_goals(&mut scene.objects, &collisions, self.config.collision_compliance);
        }

        self.predict(scene, dt);
        self.reset_lambdas(scene);
        self.solve(scene, dt);
        self.finish_step(scene, dt);
    }

    /// Step 1: mark every tetrahedron's cached normals/edges/center stale.
    fn invalidate_tetra_cache(&self, scene: &mut Scene) {
        let _span = tracing::trace_span!("invalidate_tetra_cache").entered();
        for object in &mut scene.objects {
            object.invalidate_tetra_cache();
        }
    }

    /// Step 4: integrate non-fixed vertices under gravity; fixed vertices
    /// are left for an external driver to position.
    fn predict(&self, scene: &mut Scene, dt: Real) {
        let _span = tracing::trace_span!("predict").entered();
        let gravity = self.config.gravity;
        for object in &mut scene.objects {
            for i in 0..object.num_vertices() {
                object.old_positions[i] = object.positions[i];
                if object.inv_masses[i] == 0.0 {
                    continue;
                }
                object.velocities[i] += gravity * dt;
                object.positions[i] += object.velocities[i] * dt;
            }
        }
    }

    /// Step 5: zero every edge, tetrahedron, spring, and collision-goal
    /// lambda. Goal positions/active flags set in step 3 are untouched.
    fn reset_lambdas(&self, scene: &mut Scene) {
        let _span = tracing::trace_span!("reset_lambdas").entered();
        for object in &mut scene.objects {
            for edge in &mut object.edges {
                edge.reset();
            }
            for tetra in &mut object.tetras {
                tetra.reset();
            }
            for vertex_coll in &mut object.vertex_collisions {
                vertex_coll.reset();
            }
        }
        for spring in &mut scene.springs {
            spring.reset();
        }
    }

    /// Step 6: Gauss-Seidel sweeps over edges, then springs, then
    /// collisions, `solver_iterations` times.
    fn solve(&self, scene: &mut Scene, dt: Real) {
        let _span = tracing::trace_span!("solve").entered();
        for _ in 0..self.config.solver_iterations {
            for object in &mut scene.objects {
                solve_edges(object, dt);
            }
            for spring_idx in 0..scene.springs.len() {
                let (o1, o2) = {
                    let spring = &scene.springs[spring_idx];
                    (spring.object1, spring.object2)
                };
                if let Ok((object1, object2)) =
                    crate::scene::split_objects_mut(&mut scene.objects, o1, o2)
                {
                    crate::engine::solver::solve_spring(
                        object1,
                        object2,
                        &mut scene.springs[spring_idx],
                        dt,
                    );
                }
            }
            for object in &mut scene.objects {
                solve_collisions(object, dt);
            }
        }
    }

    /// Step 7: clamp every non-fixed vertex to the ground plane, derive its
    /// velocity from the (possibly clamped) position delta, then refresh
    /// the object's AABB against the final positions.
    fn finish_step(&self, scene: &mut Scene, dt: Real) {
        let _span = tracing::trace_span!("finish_step").entered();
        let ground_y = self.config.ground_y;
        for object in &mut scene.objects {
            for i in 0..object.num_vertices() {
                if object.inv_masses[i] == 0.0 {
                    continue;
                }
                object.positions[i].y = object.positions[i].y.max(ground_y);
                object.velocities[i] = (object.positions[i] - object.old_positions[i]) / dt;
            }
            object.update_aabb();
        }
    }
}
