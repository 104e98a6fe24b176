//! Snapshot handoff between a simulation thread and a render thread.
//!
//! The simulation side never mutates a snapshot after publishing it. Each
//! publish builds a new [`FramePair`] and swaps it into a `watch` channel, so a
//! reader always blends from two snapshots that cannot change under it.

use std::{sync::Arc, time::Instant};

use egol_shared::{error::StateError, organism::OrganismId, state::EntityState};
use tokio::sync::watch;

use crate::interp::WorldSnapshot;

/// Two consecutive authoritative snapshots.
#[derive(Debug, Clone)]
pub struct FramePair {
    pub previous: Arc<WorldSnapshot>,
    pub next: Arc<WorldSnapshot>,
    /// When `next` was published; frame factors are measured from here.
    pub published_at: Instant,
}

impl FramePair {
    pub fn tick(&self) -> u64 {
        self.next.tick
    }

    pub fn blend(&self, id: &OrganismId, t: f32) -> Option<Result<EntityState, StateError>> {
        let prev = self.previous.find(id)?;
        let next = self.next.find(id)?;
        Some(prev.blended(next, t))
    }

    pub fn blend_all(&self, t: f32) -> Result<Vec<(OrganismId, EntityState)>, StateError> {
        self.previous.blend_towards(&self.next, t)
    }
}

/// Creates a publisher/reader pair seeded with `initial` on both sides of the first pair.
pub fn channel(initial: impl Into<Arc<WorldSnapshot>>) -> (SnapshotPublisher, SnapshotReader) {
    let initial = initial.into();
    let pair = FramePair {
        previous: initial.clone(),
        next: initial.clone(),
        published_at: Instant::now(),
    };
    let (tx, rx) = watch::channel(Arc::new(pair));
    (
        SnapshotPublisher { tx, latest: initial },
        SnapshotReader { rx },
    )
}

/// Simulation side of the handoff.
pub struct SnapshotPublisher {
    tx: watch::Sender<Arc<FramePair>>,
    latest: Arc<WorldSnapshot>,
}

impl SnapshotPublisher {
    /// Publishes `snap` as the next authoritative snapshot.
    pub fn publish(&mut self, snap: impl Into<Arc<WorldSnapshot>>) {
        let next = snap.into();
        let previous = std::mem::replace(&mut self.latest, next.clone());
        self.tx.send_replace(Arc::new(FramePair {
            previous,
            next,
            published_at: Instant::now(),
        }));
    }

    /// Number of live readers.
    pub fn readers(&self) -> usize {
        self.tx.receiver_count()
    }
}

/// Render side of the handoff.
#[derive(Clone)]
pub struct SnapshotReader {
    rx: watch::Receiver<Arc<FramePair>>,
}

impl SnapshotReader {
    /// The most recently published pair.
    pub fn current(&self) -> Arc<FramePair> {
        self.rx.borrow().clone()
    }

    /// Waits for the next publish. Fails once the publisher is dropped.
    pub async fn changed(&mut self) -> anyhow::Result<Arc<FramePair>> {
        self.rx.changed().await?;
        Ok(self.rx.borrow_and_update().clone())
    }
}
