//! State of mobile, decision-making organisms.

use serde::Serialize;

use super::{AuthoritativeState, StateKind, StateSpec, Target, UpdatePolicy, DEFAULT_ENERGY};
use crate::{
    error::{Result, StateError},
    math::Vec3,
};

/// Action, target and heading of an organism.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BehavioralState {
    #[serde(rename = "type")]
    pub kind: Option<StateKind>,
    pub energy: f32,
    /// Attacking / defending / consuming.
    pub target: Option<Target>,
    /// Seeking / fleeing position.
    pub position: Vec3,
    /// Heading in radians.
    pub rotation: f32,
}

impl AuthoritativeState for BehavioralState {
    const UPDATE_POLICY: UpdatePolicy = UpdatePolicy::Selective;

    fn from_spec(spec: Option<&StateSpec>) -> Result<Self> {
        let spec = spec.ok_or(StateError::InvalidArgument("state"))?;
        Ok(Self {
            kind: spec.kind,
            energy: spec.energy.unwrap_or(DEFAULT_ENERGY),
            target: spec.target.clone(),
            position: spec.position_or_origin(),
            rotation: spec.rotation.unwrap_or(0.0),
        })
    }

    /// Only the position moves, and only while the next state is alive.
    /// Mode, target and heading snap to the previous state; energy resets to
    /// [`DEFAULT_ENERGY`].
    fn blended(&self, next: &Self, t: f32) -> Self {
        let position = match next.kind {
            Some(StateKind::Alive) => self.position.lerp(next.position, t),
            _ => self.position,
        };
        Self {
            kind: self.kind,
            energy: DEFAULT_ENERGY,
            target: self.target.clone(),
            position,
            rotation: self.rotation,
        }
    }

    fn apply_authoritative(&mut self, patch: &StateSpec) {
        let policy = Self::UPDATE_POLICY;
        policy.assign(&mut self.target, patch.target.clone());
        policy.assign_or(
            &mut self.position,
            patch.position.as_ref().map(Vec3::from),
            Vec3::ZERO,
        );
        policy.assign_or(&mut self.rotation, patch.rotation, 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{organism::OrganismId, state::Update};

    fn state(kind: StateKind, pos: [f32; 3]) -> BehavioralState {
        BehavioralState::from_spec(Some(&StateSpec {
            kind: Some(kind),
            position: Some(pos.into()),
            ..Default::default()
        }))
        .unwrap()
    }

    #[test]
    fn missing_spec_is_invalid_argument() {
        assert_eq!(
            BehavioralState::from_spec(None),
            Err(StateError::InvalidArgument("state"))
        );
    }

    #[test]
    fn defaults_fill_position_energy_rotation() {
        let s = BehavioralState::from_spec(Some(&StateSpec::default())).unwrap();
        assert_eq!(s.position, Vec3::ZERO);
        assert_eq!(s.energy, 1.0);
        assert_eq!(s.rotation, 0.0);
        assert_eq!(s.kind, None);
        assert_eq!(s.target, None);
    }

    #[test]
    fn energy_is_not_clamped() {
        let s = BehavioralState::from_spec(Some(&StateSpec {
            energy: Some(4.5),
            ..Default::default()
        }))
        .unwrap();
        assert_eq!(s.energy, 4.5);
    }

    #[test]
    fn alive_blend_endpoints_and_midpoint() {
        let prev = state(StateKind::Alive, [0.0, 0.0, 0.0]);
        let next = Update::new(state(StateKind::Alive, [2.0, 0.0, 0.0]));

        assert_eq!(prev.interpolate(&next, 0.0).unwrap().position, prev.position);
        assert_eq!(
            prev.interpolate(&next, 1.0).unwrap().position,
            Vec3::new(2.0, 0.0, 0.0)
        );
        assert_eq!(
            prev.interpolate(&next, 0.5).unwrap().position,
            Vec3::new(1.0, 0.0, 0.0)
        );
    }

    #[test]
    fn dead_state_does_not_move() {
        let prev = state(StateKind::Dead, [1.0, 1.0, 1.0]);
        let next = Update::new(state(StateKind::Dead, [9.0, 9.0, 9.0]));
        for t in [0.0, 0.3, 1.0, 2.0] {
            assert_eq!(prev.interpolate(&next, t).unwrap().position, prev.position);
        }
    }

    #[test]
    fn blend_keeps_previous_mode_target_rotation() {
        let mut prev = state(StateKind::Attacking, [0.0, 0.0, 0.0]);
        prev.target = Some(Target::Organism(OrganismId::from("prey")));
        prev.rotation = 0.25;
        let mut next = state(StateKind::Alive, [4.0, 0.0, 0.0]);
        next.target = None;
        next.rotation = 3.0;

        let mid = prev.blended(&next, 0.5);
        assert_eq!(mid.kind, Some(StateKind::Attacking));
        assert_eq!(mid.target, prev.target);
        assert_eq!(mid.rotation, 0.25);
        assert_eq!(mid.position, Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn blend_resets_energy() {
        let mut prev = state(StateKind::Alive, [0.0, 0.0, 0.0]);
        prev.energy = 0.3;
        let mut next = state(StateKind::Alive, [2.0, 0.0, 0.0]);
        next.energy = 0.2;
        let mid = prev.interpolate(&Update::new(next), 0.5).unwrap();
        assert_eq!(mid.energy, DEFAULT_ENERGY);
        assert_eq!(prev.energy, 0.3);
    }

    #[test]
    fn blend_is_pure() {
        let prev = state(StateKind::Alive, [0.0, 0.0, 0.0]);
        let next = Update::new(state(StateKind::Alive, [2.0, 2.0, 0.0]));
        let before = (prev.clone(), next.clone());
        let a = prev.interpolate(&next, 0.7).unwrap();
        let b = prev.interpolate(&next, 0.7).unwrap();
        assert_eq!(a, b);
        assert_eq!((prev, next), before);
    }

    #[test]
    fn update_only_writes_present_fields() {
        let mut s = state(StateKind::Alive, [1.0, 2.0, 3.0]);
        s.target = Some(Target::Point(Vec3::new(5.0, 5.0, 5.0)));

        s.apply_authoritative(&StateSpec {
            rotation: Some(1.5),
            ..Default::default()
        });
        assert_eq!(s.rotation, 1.5);
        assert_eq!(s.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(s.target, Some(Target::Point(Vec3::new(5.0, 5.0, 5.0))));
    }

    #[test]
    fn update_applies_zero_rotation() {
        let mut s = state(StateKind::Alive, [0.0, 0.0, 0.0]);
        s.rotation = 2.0;
        s.apply_authoritative(&StateSpec {
            rotation: Some(0.0),
            ..Default::default()
        });
        assert_eq!(s.rotation, 0.0);
    }

    #[test]
    fn update_ignores_null_fields() {
        let mut s = state(StateKind::Alive, [1.0, 2.0, 3.0]);
        s.target = Some(Target::Organism(OrganismId::from("x")));
        let before = s.clone();

        let patch: StateSpec = serde_json::from_str(r#"{"target":null,"position":null}"#).unwrap();
        s.apply_authoritative(&patch);
        assert_eq!(s, before);
    }

    #[test]
    fn update_never_touches_mode_or_energy() {
        let mut s = state(StateKind::Alive, [0.0, 0.0, 0.0]);
        s.apply_authoritative(&StateSpec {
            kind: Some(StateKind::Dead),
            energy: Some(0.0),
            position: Some([3.0, 0.0, 0.0].into()),
            ..Default::default()
        });
        assert_eq!(s.kind, Some(StateKind::Alive));
        assert_eq!(s.energy, 1.0);
        assert_eq!(s.position, Vec3::new(3.0, 0.0, 0.0));
    }
}
