// src/collision/broad.rs
use crate::collision::sat::sat_tet_tet;
use crate::constraints::CollisionConstraint;
use crate::math::Real;
use crate::object::TetraObject;

/// A confirmed tetra-tetra collision, produced once per overlapping pair
/// per step (spec §4.D, §5).
#[derive(Clone, Copy, Debug)]
pub struct Collision {
    pub object1: usize,
    pub tetra1: usize,
    pub object2: usize,
    pub tetra2: usize,
    pub axis: crate::math::Real3,
    pub penetration: Real,
    /// Component of relative tetra-center motion orthogonal to `axis`,
    /// tracked per spec §9 but not consumed by any constraint yet.
    pub dp_tang: crate::math::Real3,
}

/// Broad phase (object AABB) then narrow phase (tetra AABB, then SAT) over
/// every distinct pair of objects. Self-collision within one object is not
/// considered (spec §4.D Non-goals).
pub fn collect_collisions(objects: &mut [TetraObject], not_collision_threshold: Real) -> Vec<Collision> {
    for obj in objects.iter_mut() {
        for incidences in &mut obj.vertex_collision_incidences {
            incidences.clear();
        }
    }

    let mut collisions = Vec::new();

    for o1 in 0..objects.len() {
        for o2 in (o1 + 1)..objects.len() {
            if !objects[o1].aabb.intersects(&objects[o2].aabb) {
                continue;
            }

            for t1 in 0..objects[o1].tetras.len() {
                for t2 in 0..objects[o2].tetras.len() {
                    if !objects[o1].tetras[t1]
                        .aabb
                        .intersects(&objects[o2].tetras[t2].aabb)
                    {
                        continue;
                    }

                    let p1 = objects[o1].tetra_points(t1);
                    let p2 = objects[o2].tetra_points(t2);
                    let info = sat_tet_tet(p1, p2, not_collision_threshold);
                    if !info.intersecting {
                        continue;
                    }

                    // Cache is stale from the previous step (marked
                    // uninitialised in step 1); refresh only confirmed
                    // collisions since nothing else consumes `center`.
                    objects[o1].tetras[t1].ensure_initialized(&p1);
                    objects[o2].tetras[t2].ensure_initialized(&p2);

                    let center1 = objects[o1].tetras[t1].center;
                    let old_center1 = objects[o1].tetras[t1].old_center;
                    let center2 = objects[o2].tetras[t2].center;
                    let old_center2 = objects[o2].tetras[t2].old_center;
                    let dp = (center1 - old_center1) - (center2 - old_center2);
                    let dp_tang = dp - dp.dot(info.axis) * info.axis;

                    let idx = collisions.len() as u32;
                    collisions.push(Collision {
                        object1: o1,
                        tetra1: t1,
                        object2: o2,
                        tetra2: t2,
                        axis: info.axis,
                        penetration: info.penetration,
                        dp_tang,
                    });

                    let vs1 = objects[o1].tetras[t1].vs;
                    for v in vs1 {
                        objects[o1].vertex_collision_incidences[v as usize].push(idx);
                    }
                    let vs2 = objects[o2].tetras[t2].vs;
                    for v in vs2 {
                        objects[o2].vertex_collision_incidences[v as usize].push(idx);
                    }
                }
            }
        }
    }

    collisions
}

/// Re-seeds each vertex's collision-goal constraint from the collisions its
/// tetrahedra participate in this step (spec §4.F step 3). A vertex shared
/// by several colliding incidences averages their contributions; an
/// uninvolved vertex's goal constraint is left inactive.
pub fn seed_collision_goals(
    objects: &mut [TetraObject],
    collisions: &[Collision],
    collision_compliance: Real,
) {
    for (obj_idx, obj) in objects.iter_mut().enumerate() {
        for vertex in 0..obj.num_vertices() {
            let incidences = &obj.vertex_collision_incidences[vertex];
            if incidences.is_empty() {
                obj.vertex_collisions[vertex] = CollisionConstraint::inactive(collision_compliance);
                continue;
            }

            let position = obj.positions[vertex];
            let mut offset = crate::math::Real3::ZERO;
            for &idx in incidences {
                let c = &collisions[idx as usize];
                let half_penetration = c.axis * (c.penetration / 2.0);
                if c.object1 == obj_idx {
                    offset -= half_penetration;
                } else {
                    offset += half_penetration;
                }
            }
            offset /= incidences.len() as Real;

            let mut goal = CollisionConstraint::inactive(collision_compliance);
            goal.goal_position = position + offset;
            goal.active = true;
            obj.vertex_collisions[vertex] = goal;
        }
    }
}
