//! Organism state.
//!
//! The server sends authoritative states at its tick rate; the client renders
//! at its own rate and blends between the previous and the next authoritative
//! state every frame.
//!
//! Two operations are kept apart:
//! - [`AuthoritativeState::apply_authoritative`] mutates a state in place when
//!   a new tick arrives.
//! - [`AuthoritativeState::blended`] is pure and returns a fresh state somewhere
//!   between two snapshots.
//!
//! Each variant picks an [`UpdatePolicy`] that decides how a partial payload is
//! written into it.

mod behavioral;
mod growth;

use serde::{Deserialize, Serialize};

pub use behavioral::BehavioralState;
pub use growth::GrowthState;

use crate::{
    error::{Result, StateError},
    math::{PositionSpec, Vec3},
    organism::OrganismId,
};

/// Energy assigned when a state record does not carry one.
pub const DEFAULT_ENERGY: f32 = 1.0;

/// Discrete behavioral/lifecycle mode.
///
/// Transitions are whatever the server sends; no transition table is enforced here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateKind {
    Alive,
    Dead,
    Attacking,
    Defending,
    Consuming,
    Seeking,
    Fleeing,
}

/// What an organism is currently acting on. Never owns the referenced organism.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    Organism(OrganismId),
    Point(Vec3),
}

/// Keyed state record used for construction and as the update payload.
///
/// JSON `null` and a missing key both decode to `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StateSpec {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<StateKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub energy: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<Target>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<PositionSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maturity: Option<f32>,
}

impl StateSpec {
    pub(crate) fn position_or_origin(&self) -> Vec3 {
        self.position.as_ref().map(Vec3::from).unwrap_or(Vec3::ZERO)
    }
}

/// Network update carrying the next authoritative state.
#[derive(Debug, Clone, PartialEq)]
pub struct Update<S> {
    pub state: Option<S>,
}

impl<S> Update<S> {
    pub fn new(state: S) -> Self {
        Self { state: Some(state) }
    }

    /// Borrows the next state or reports the update as malformed.
    pub fn next_state(&self) -> Result<&S> {
        self.state
            .as_ref()
            .ok_or_else(|| StateError::MalformedUpdate("update carries no state".to_string()))
    }
}

/// How a partial payload is written into an existing state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdatePolicy {
    /// Only fields present in the payload are written.
    Selective,
    /// Every field is written; absent payload fields clear the stored value.
    Overwrite,
}

impl UpdatePolicy {
    /// Writes `incoming` into `slot` according to the policy.
    pub fn assign<T>(self, slot: &mut Option<T>, incoming: Option<T>) {
        match self {
            UpdatePolicy::Selective => {
                if incoming.is_some() {
                    *slot = incoming;
                }
            }
            UpdatePolicy::Overwrite => *slot = incoming,
        }
    }

    /// Like [`UpdatePolicy::assign`] for fields that always hold a value;
    /// an overwrite with nothing resets to `fallback`.
    pub fn assign_or<T>(self, slot: &mut T, incoming: Option<T>, fallback: T) {
        match (self, incoming) {
            (_, Some(v)) => *slot = v,
            (UpdatePolicy::Selective, None) => {}
            (UpdatePolicy::Overwrite, None) => *slot = fallback,
        }
    }
}

/// Shared capability of every state variant.
pub trait AuthoritativeState: Sized {
    const UPDATE_POLICY: UpdatePolicy;

    /// Builds a state from its record. `None` is an [`StateError::InvalidArgument`].
    fn from_spec(spec: Option<&StateSpec>) -> Result<Self>;

    /// Pure blend from `self` (previous authoritative state) towards `next`.
    ///
    /// `t` is nominally in $[0,1]$ but is not clamped.
    fn blended(&self, next: &Self, t: f32) -> Self;

    /// Blends towards the state carried by `update`.
    fn interpolate(&self, update: &Update<Self>, t: f32) -> Result<Self> {
        Ok(self.blended(update.next_state()?, t))
    }

    /// Makes `patch` the new authoritative state, following [`Self::UPDATE_POLICY`].
    fn apply_authoritative(&mut self, patch: &StateSpec);
}

/// Selects the state variant of an organism.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EntityCategory {
    #[default]
    Behavioral,
    Growth,
}

/// State of a single organism, one of the two variants.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityState {
    Behavioral(BehavioralState),
    Growth(GrowthState),
}

impl EntityState {
    pub fn from_spec(category: EntityCategory, spec: Option<&StateSpec>) -> Result<Self> {
        Ok(match category {
            EntityCategory::Behavioral => Self::Behavioral(BehavioralState::from_spec(spec)?),
            EntityCategory::Growth => Self::Growth(GrowthState::from_spec(spec)?),
        })
    }

    pub fn category(&self) -> EntityCategory {
        match self {
            Self::Behavioral(_) => EntityCategory::Behavioral,
            Self::Growth(_) => EntityCategory::Growth,
        }
    }

    pub fn kind(&self) -> Option<StateKind> {
        match self {
            Self::Behavioral(s) => s.kind,
            Self::Growth(s) => s.kind,
        }
    }

    pub fn position(&self) -> Vec3 {
        match self {
            Self::Behavioral(s) => s.position,
            Self::Growth(s) => s.position,
        }
    }

    /// Pure blend towards `next`. Both states must be the same variant.
    pub fn blended(&self, next: &Self, t: f32) -> Result<Self> {
        match (self, next) {
            (Self::Behavioral(a), Self::Behavioral(b)) => Ok(Self::Behavioral(a.blended(b, t))),
            (Self::Growth(a), Self::Growth(b)) => Ok(Self::Growth(a.blended(b, t))),
            (a, b) => Err(StateError::MalformedUpdate(format!(
                "cannot blend {:?} state towards {:?} state",
                a.category(),
                b.category()
            ))),
        }
    }

    pub fn interpolate(&self, update: &Update<Self>, t: f32) -> Result<Self> {
        self.blended(update.next_state()?, t)
    }

    /// Writes `patch` using the policy of the stored variant.
    pub fn apply_authoritative(&mut self, patch: &StateSpec) {
        match self {
            Self::Behavioral(s) => s.apply_authoritative(patch),
            Self::Growth(s) => s.apply_authoritative(patch),
        }
    }

    pub fn update_policy(&self) -> UpdatePolicy {
        match self {
            Self::Behavioral(_) => BehavioralState::UPDATE_POLICY,
            Self::Growth(_) => GrowthState::UPDATE_POLICY,
        }
    }
}
