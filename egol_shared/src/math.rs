//! Math types.
//!
//! This module intentionally stays small and deterministic.
//! It avoids SIMD/unsafe and focuses on stable semantics.

use serde::{Deserialize, Serialize};

/// 3D vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }

    pub fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }

    pub fn scale(self, s: f32) -> Self {
        Self::new(self.x * s, self.y * s, self.z * s)
    }

    /// Linear blend towards `to`.
    ///
    /// `t` is not clamped: values outside $[0,1]$ extrapolate along the same line.
    pub fn lerp(self, to: Self, t: f32) -> Self {
        self.add(to.sub(self).scale(t))
    }
}

/// Position as it arrives on the wire.
///
/// The simulation emits named components, older records carry a plain
/// `[x, y, z]` triple. Both decode into the same [`Vec3`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PositionSpec {
    Named {
        #[serde(default)]
        x: f32,
        #[serde(default)]
        y: f32,
        #[serde(default)]
        z: f32,
    },
    Triple(Vec<f32>),
}

impl From<PositionSpec> for Vec3 {
    fn from(spec: PositionSpec) -> Self {
        match spec {
            PositionSpec::Named { x, y, z } => Vec3::new(x, y, z),
            PositionSpec::Triple(v) => {
                let at = |i: usize| v.get(i).copied().unwrap_or(0.0);
                Vec3::new(at(0), at(1), at(2))
            }
        }
    }
}

impl From<&PositionSpec> for Vec3 {
    fn from(spec: &PositionSpec) -> Self {
        spec.clone().into()
    }
}

impl From<Vec3> for PositionSpec {
    fn from(v: Vec3) -> Self {
        PositionSpec::Named {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

impl From<[f32; 3]> for PositionSpec {
    fn from(v: [f32; 3]) -> Self {
        PositionSpec::Triple(v.to_vec())
    }
}
