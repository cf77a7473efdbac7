// src/lib.rs
pub mod collision;
pub mod constraints;
pub mod engine;
pub mod error;
pub mod math;
pub mod object;
pub mod scene;

pub use engine::{PhysicsConfig, XpbdIntegrator};
pub use error::PhysicsError;
pub use math::{Real, Real3};
pub use object::{create_box, TetraObject};
pub use scene::Scene;
