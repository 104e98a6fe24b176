//! Wire envelope.
//!
//! The simulation pushes one JSON message per tick:
//! - `state`: the full population, sent once to a newly connected client.
//! - `update`: the next authoritative state of every organism.
//!
//! Transport is left to the embedding application.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::organism::{OrganismRecord, OrganismUpdate};

/// Message payload, tagged by the `type` key next to `data`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum Payload {
    State(Vec<OrganismRecord>),
    Update(Vec<OrganismUpdate>),
}

/// Message envelope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    #[serde(flatten)]
    pub payload: Option<Payload>,
    pub success: bool,
}

impl Message {
    pub fn state(records: Vec<OrganismRecord>) -> Self {
        Self {
            payload: Some(Payload::State(records)),
            success: true,
        }
    }

    pub fn update(updates: Vec<OrganismUpdate>) -> Self {
        Self {
            payload: Some(Payload::Update(updates)),
            success: true,
        }
    }
}

/// Convenience codec helpers.
pub fn encode_to_bytes(msg: &Message) -> serde_json::Result<Bytes> {
    Ok(Bytes::from(serde_json::to_vec(msg)?))
}

pub fn decode_from_bytes(b: &[u8]) -> serde_json::Result<Message> {
    serde_json::from_slice(b)
}
