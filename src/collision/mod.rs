// src/collision/mod.rs
mod broad;
mod sat;

pub use broad::{collect_collisions, seed_collision_goals, Collision};
pub use sat::{sat_tet_tet, CollisionInfo, DEFAULT_NOT_COLLISION_THRESHOLD};
