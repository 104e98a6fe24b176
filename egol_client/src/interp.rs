//! Interpolation.
//!
//! The server sends discrete snapshots at tick boundaries.
//! The client renders at its own rate and interpolates organism states.

use std::{collections::VecDeque, sync::Arc, time::Duration};

use egol_shared::{
    config::ClientConfig,
    error::StateError,
    organism::OrganismId,
    state::EntityState,
};

/// Converts time since the last tick into an interpolation factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameClock {
    tick_interval: Duration,
    clamp: bool,
}

impl FrameClock {
    pub fn new(tick_interval: Duration, clamp: bool) -> Self {
        Self {
            tick_interval,
            clamp,
        }
    }

    pub fn from_config(cfg: &ClientConfig) -> Self {
        Self::new(cfg.tick_interval(), cfg.clamp_factor)
    }

    /// `elapsed / tick_interval`. Past the next tick this extrapolates unless clamping is on.
    pub fn factor(&self, elapsed: Duration) -> f32 {
        if self.tick_interval.is_zero() {
            return 1.0;
        }
        self.shape(elapsed.as_secs_f32() / self.tick_interval.as_secs_f32())
    }

    /// Applies the clamping policy to a raw factor.
    pub fn shape(&self, t: f32) -> f32 {
        if self.clamp {
            t.clamp(0.0, 1.0)
        } else {
            t
        }
    }
}

/// Authoritative states of every organism at one tick.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WorldSnapshot {
    pub tick: u64,
    pub organisms: Vec<(OrganismId, EntityState)>,
}

impl WorldSnapshot {
    pub fn find(&self, id: &OrganismId) -> Option<&EntityState> {
        self.organisms
            .iter()
            .find(|(oid, _)| oid == id)
            .map(|(_, s)| s)
    }

    /// Blends every organism present in both snapshots.
    pub fn blend_towards(
        &self,
        next: &WorldSnapshot,
        t: f32,
    ) -> Result<Vec<(OrganismId, EntityState)>, StateError> {
        self.organisms
            .iter()
            .filter_map(|(id, prev)| next.find(id).map(|n| (id, prev, n)))
            .map(|(id, prev, n)| prev.blended(n, t).map(|s| (id.clone(), s)))
            .collect()
    }
}

/// Buffered snapshot history for interpolation.
pub struct SnapshotBuffer {
    history: VecDeque<Arc<WorldSnapshot>>,
    max: usize,
}

impl SnapshotBuffer {
    pub fn new(max: usize) -> Self {
        Self {
            history: VecDeque::new(),
            max: max.max(2),
        }
    }

    pub fn push(&mut self, snap: impl Into<Arc<WorldSnapshot>>) {
        self.history.push_back(snap.into());
        while self.history.len() > self.max {
            self.history.pop_front();
        }
    }

    /// Returns the number of buffered snapshots.
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Returns true if no snapshots are buffered.
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// The two newest snapshots, older first.
    pub fn latest_pair(&self) -> Option<(&Arc<WorldSnapshot>, &Arc<WorldSnapshot>)> {
        let n = self.history.len();
        if n < 2 {
            return None;
        }
        Some((&self.history[n - 2], &self.history[n - 1]))
    }

    /// Gets an interpolated state for an organism given a fractional alpha.
    ///
    /// `alpha` is nominally in $[0,1]$ where 0 = older snapshot, 1 = newer.
    /// `None` if fewer than two snapshots are buffered or the organism is missing from either.
    pub fn interp_organism(
        &self,
        id: &OrganismId,
        alpha: f32,
    ) -> Option<Result<EntityState, StateError>> {
        let (a, b) = self.latest_pair()?;
        match (a.find(id), b.find(id)) {
            (Some(pa), Some(pb)) => Some(pa.blended(pb, alpha)),
            _ => None,
        }
    }

    pub fn last_snapshot(&self) -> Option<&Arc<WorldSnapshot>> {
        self.history.back()
    }
}
