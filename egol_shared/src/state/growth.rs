//! State of developing organisms.

use serde::Serialize;

use super::{AuthoritativeState, StateKind, StateSpec, UpdatePolicy, DEFAULT_ENERGY};
use crate::{
    error::{Result, StateError},
    math::Vec3,
};

/// Physical growth of an organism.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrowthState {
    #[serde(rename = "type")]
    pub kind: Option<StateKind>,
    pub energy: Option<f32>,
    pub position: Vec3,
    pub size: Option<f32>,
    pub maturity: Option<f32>,
}

/// `base * (1 - t) + to * t`; absent if either side is absent.
fn mix(base: Option<f32>, to: Option<f32>, t: f32) -> Option<f32> {
    Some(base? * (1.0 - t) + to? * t)
}

impl AuthoritativeState for GrowthState {
    const UPDATE_POLICY: UpdatePolicy = UpdatePolicy::Overwrite;

    fn from_spec(spec: Option<&StateSpec>) -> Result<Self> {
        let spec = spec.ok_or(StateError::InvalidArgument("state"))?;
        Ok(Self {
            kind: spec.kind,
            energy: Some(spec.energy.unwrap_or(DEFAULT_ENERGY)),
            position: spec.position_or_origin(),
            size: spec.size,
            maturity: spec.maturity,
        })
    }

    /// Blends every field and takes the mode of `next`.
    ///
    /// `maturity` and `energy` start from the previous `size`, not from their
    /// own previous values.
    fn blended(&self, next: &Self, t: f32) -> Self {
        Self {
            kind: next.kind,
            energy: mix(self.size, next.energy, t),
            position: self.position.lerp(next.position, t),
            size: mix(self.size, next.size, t),
            maturity: mix(self.size, next.maturity, t),
        }
    }

    fn apply_authoritative(&mut self, patch: &StateSpec) {
        let policy = Self::UPDATE_POLICY;
        policy.assign(&mut self.kind, patch.kind);
        policy.assign(&mut self.size, patch.size);
        policy.assign(&mut self.energy, patch.energy);
        policy.assign_or(
            &mut self.position,
            patch.position.as_ref().map(Vec3::from),
            Vec3::ZERO,
        );
        policy.assign(&mut self.maturity, patch.maturity);
    }
}
