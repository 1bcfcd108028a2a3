// src/types.rs
// Shared value types and aliases

use serde::Serialize;
use std::fmt;

/// X, Y, Z triple (meters or meters per second); Z is vertical.
pub type Vec3 = [f64; 3];

/// The two throwing disciplines separated by peak hand speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ImplementKind {
    ShotPut,
    Discus,
}

impl fmt::Display for ImplementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImplementKind::ShotPut => write!(f, "shot put"),
            ImplementKind::Discus => write!(f, "discus"),
        }
    }
}

pub fn horizontal_norm(v: &Vec3) -> f64 {
    (v[0] * v[0] + v[1] * v[1]).sqrt()
}

pub fn norm(v: &Vec3) -> f64 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

// src/types.rs
