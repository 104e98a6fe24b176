//! Fixtures shared by the integration tests.

use egol_shared::{
    attributes::{AttributesSpec, Family},
    math::PositionSpec,
    net::Message,
    organism::{OrganismId, OrganismRecord, OrganismUpdate},
    state::{EntityCategory, StateKind, StateSpec},
};

/// State record for an organism at `(x, y, 0)`.
pub fn spec_at(kind: StateKind, x: f32, y: f32) -> StateSpec {
    StateSpec {
        kind: Some(kind),
        position: Some(PositionSpec::from([x, y, 0.0])),
        ..Default::default()
    }
}

pub fn record(id: &str, category: EntityCategory, state: StateSpec) -> OrganismRecord {
    OrganismRecord {
        id: OrganismId::from(id),
        category,
        attributes: Some(AttributesSpec {
            family: Family(1),
            offense: 3.0,
            defense: 4.0,
            speed: 2.0,
            ..Default::default()
        }),
        state: Some(state),
    }
}

pub fn update(id: &str, state: StateSpec) -> OrganismUpdate {
    OrganismUpdate {
        id: OrganismId::from(id),
        state: Some(state),
    }
}

/// Newline-delimited JSON, one message per line.
pub fn to_jsonl(messages: &[Message]) -> serde_json::Result<String> {
    let mut out = String::new();
    for msg in messages {
        out.push_str(&serde_json::to_string(msg)?);
        out.push('\n');
    }
    Ok(out)
}
