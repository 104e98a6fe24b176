//! Organism attributes.
//!
//! The combat/biological profile of an organism. Created once when the
//! organism's family is established and never mutated afterwards.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StateError};

/// Categorical family tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Family(pub u32);

/// Attribute record as it arrives on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AttributesSpec {
    pub family: Family,
    pub offense: f32,
    pub defense: f32,
    pub agility: f32,
    pub reproductivity: f32,
    pub size: f32,
    pub range: f32,
    pub perception: f32,
    pub speed: f32,
}

/// Immutable attribute profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attributes {
    family: Family,
    offense: f32,
    defense: f32,
    agility: f32,
    reproductivity: f32,
    size: f32,
    range: f32,
    perception: f32,
    speed: f32,
}

impl Attributes {
    /// Copies every field of `spec` verbatim. No range checks are applied.
    pub fn from_spec(spec: Option<&AttributesSpec>) -> Result<Self> {
        let spec = spec.ok_or(StateError::InvalidArgument("attribute"))?;
        Ok(Self {
            family: spec.family,
            offense: spec.offense,
            defense: spec.defense,
            agility: spec.agility,
            reproductivity: spec.reproductivity,
            size: spec.size,
            range: spec.range,
            perception: spec.perception,
            speed: spec.speed,
        })
    }

    pub fn family(&self) -> Family {
        self.family
    }

    pub fn offense(&self) -> f32 {
        self.offense
    }

    pub fn defense(&self) -> f32 {
        self.defense
    }

    pub fn agility(&self) -> f32 {
        self.agility
    }

    pub fn reproductivity(&self) -> f32 {
        self.reproductivity
    }

    /// Coordinate-space size.
    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn range(&self) -> f32 {
        self.range
    }

    pub fn perception(&self) -> f32 {
        self.perception
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }
}
