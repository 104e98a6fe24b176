//! Client world view.
//!
//! The view maintains:
//! - The authoritative state of every known organism
//! - The pending (next) authoritative state per organism
//! - Snapshot history for interpolation
//!
//! A new `update` message promotes every pending state into its organism with
//! [`EntityState::apply_authoritative`], then the new states become pending.
//! Each rendered frame blends the authoritative state towards the pending one.

use std::collections::{BTreeMap, HashMap};

use anyhow::Context;
use egol_shared::{
    config::ClientConfig,
    error::StateError,
    net::{Message, Payload},
    organism::{Organism, OrganismId, OrganismRecord, OrganismUpdate},
    state::{EntityState, StateSpec, Update},
};
use tracing::{debug, info, warn};

use crate::interp::{SnapshotBuffer, WorldSnapshot};

/// Next authoritative state of one organism.
#[derive(Debug, Clone)]
struct Pending {
    /// Raw payload, written into the organism on promotion.
    patch: Option<StateSpec>,
    /// Fully built next state, used for blending.
    update: Update<EntityState>,
}

/// Client-side population and its interpolation state.
pub struct WorldView {
    organisms: BTreeMap<OrganismId, Organism>,
    pending: HashMap<OrganismId, Pending>,
    tick: u64,
    pub snaps: SnapshotBuffer,
    history: usize,
}

impl WorldView {
    pub fn new(cfg: &ClientConfig) -> Self {
        Self {
            organisms: BTreeMap::new(),
            pending: HashMap::new(),
            tick: 0,
            snaps: SnapshotBuffer::new(cfg.history),
            history: cfg.history,
        }
    }

    /// Number of authoritative ticks applied since the last full state.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn len(&self) -> usize {
        self.organisms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.organisms.is_empty()
    }

    pub fn organism(&self, id: &OrganismId) -> Option<&Organism> {
        self.organisms.get(id)
    }

    pub fn organisms(&self) -> impl Iterator<Item = &Organism> {
        self.organisms.values()
    }

    /// Dispatches one message from the simulation.
    pub fn handle_message(&mut self, msg: Message) -> anyhow::Result<()> {
        if !msg.success {
            warn!("Simulation reported a failed message");
            return Ok(());
        }
        match msg.payload {
            Some(Payload::State(records)) => self.load_population(&records),
            Some(Payload::Update(updates)) => self.apply_updates(updates),
            None => {
                debug!("Acknowledgement without payload");
                Ok(())
            }
        }
    }

    /// Replaces the population with a full state.
    pub fn load_population(&mut self, records: &[OrganismRecord]) -> anyhow::Result<()> {
        let organisms = records
            .iter()
            .map(|r| {
                Organism::from_record(r)
                    .map(|o| (o.id.clone(), o))
                    .with_context(|| format!("build organism {}", r.id))
            })
            .collect::<anyhow::Result<BTreeMap<_, _>>>()?;

        info!(organisms = organisms.len(), "Population loaded");

        self.organisms = organisms;
        self.pending.clear();
        self.tick = 0;
        self.snaps = SnapshotBuffer::new(self.history);
        let initial = self.authoritative_snapshot();
        self.snaps.push(initial);
        Ok(())
    }

    /// Promotes the pending states and stores `updates` as the new pending states.
    ///
    /// Every next state is built before anything is promoted, so a rejected
    /// update leaves the view untouched.
    pub fn apply_updates(&mut self, updates: Vec<OrganismUpdate>) -> anyhow::Result<()> {
        let mut incoming = Vec::with_capacity(updates.len());
        for update in updates {
            let Some(organism) = self.organisms.get(&update.id) else {
                warn!(organism = %update.id, "Update for unknown organism");
                continue;
            };
            let next = update
                .state
                .as_ref()
                .map(|spec| EntityState::from_spec(organism.state.category(), Some(spec)))
                .transpose()
                .with_context(|| format!("build next state of {}", update.id))?;
            incoming.push((
                update.id,
                Pending {
                    patch: update.state,
                    update: Update { state: next },
                },
            ));
        }

        for (id, pending) in self.pending.drain() {
            let Some(organism) = self.organisms.get_mut(&id) else {
                continue;
            };
            match pending.patch {
                Some(patch) => organism.state.apply_authoritative(&patch),
                None => debug!(organism = %id, "Pending update had no state"),
            }
        }
        self.tick += 1;
        self.pending.extend(incoming);

        let next = self.next_snapshot();
        self.snaps.push(next);
        debug!(tick = self.tick, pending = self.pending.len(), "Updates applied");
        Ok(())
    }

    /// Blends every organism towards its pending state.
    ///
    /// Organisms without a pending update render their authoritative state.
    pub fn frame(&self, t: f32) -> Result<Vec<(OrganismId, EntityState)>, StateError> {
        self.organisms
            .iter()
            .map(|(id, organism)| {
                let state = match self.pending.get(id) {
                    Some(p) => organism.state.interpolate(&p.update, t),
                    None => Ok(organism.state.clone()),
                };
                state.map(|s| (id.clone(), s))
            })
            .collect()
    }

    /// Current authoritative states.
    pub fn authoritative_snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            tick: self.tick,
            organisms: self
                .organisms
                .iter()
                .map(|(id, o)| (id.clone(), o.state.clone()))
                .collect(),
        }
    }

    /// Pending states, falling back to the authoritative state where none is pending.
    pub fn next_snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            tick: self.tick,
            organisms: self
                .organisms
                .iter()
                .map(|(id, o)| {
                    let state = self
                        .pending
                        .get(id)
                        .and_then(|p| p.update.state.clone())
                        .unwrap_or_else(|| o.state.clone());
                    (id.clone(), state)
                })
                .collect(),
        }
    }
}
