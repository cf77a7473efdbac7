// src/constraints/edge.rs
use super::Constraint;
use crate::math::Real;

/// Edge constraint between two vertices of the same object (spec §3, §4.G).
///
/// `rest_length` is fixed at construction time to the initial Euclidean
/// distance between the two vertices; it never changes afterward.
#[derive(Clone, Copy, Debug)]
pub struct Edge {
    pub v1: u32,
    pub v2: u32,
    pub rest_length: Real,
    pub compliance: Real,
    lambda: Real,
}

impl Edge {
    pub fn new(v1: u32, v2: u32, rest_length: Real, compliance: Real) -> Self {
        Self {
            v1,
            v2,
            rest_length,
            compliance,
            lambda: 0.0,
        }
    }
}

impl Constraint for Edge {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_is_idempotent() {
        let mut e = Edge::new(0, 1, 1.0, 0.0);
        *e.lambda_mut() = 3.5;
        e.reset();
        assert_eq!(e.lambda(), 0.0);
        e.reset();
        assert_eq!(e.lambda(), 0.0);
    }
}
