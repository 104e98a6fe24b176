//! Organism records.
//!
//! An organism owns exactly one [`Attributes`] profile and one [`EntityState`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    attributes::{Attributes, AttributesSpec},
    error::Result,
    state::{EntityCategory, EntityState, StateSpec},
};

/// Opaque organism id assigned by the simulation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrganismId(pub String);

impl From<&str> for OrganismId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for OrganismId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Full organism as sent to newly connected clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganismRecord {
    pub id: OrganismId,
    #[serde(default)]
    pub category: EntityCategory,
    #[serde(default)]
    pub attributes: Option<AttributesSpec>,
    #[serde(default)]
    pub state: Option<StateSpec>,
}

/// Per-tick update for one organism.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganismUpdate {
    pub id: OrganismId,
    #[serde(default)]
    pub state: Option<StateSpec>,
}

/// Client-side organism.
#[derive(Debug, Clone, PartialEq)]
pub struct Organism {
    pub id: OrganismId,
    pub attributes: Attributes,
    pub state: EntityState,
}

impl Organism {
    /// Builds an organism, failing if either the attribute or the state record is missing.
    pub fn from_record(record: &OrganismRecord) -> Result<Self> {
        Ok(Self {
            id: record.id.clone(),
            attributes: Attributes::from_spec(record.attributes.as_ref())?,
            state: EntityState::from_spec(record.category, record.state.as_ref())?,
        })
    }
}
