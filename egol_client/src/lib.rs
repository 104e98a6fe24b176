//! `egol_client`
//!
//! Client-side systems:
//! - Application of authoritative updates to the known population
//! - Frame clock turning elapsed time into an interpolation factor
//! - Snapshot history for interpolation
//! - Snapshot handoff for a render thread separate from the simulation feed

pub mod handoff;
pub mod interp;
pub mod view;

pub use view::WorldView;
