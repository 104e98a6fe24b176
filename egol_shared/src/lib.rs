//! `egol_shared`
//!
//! Data model shared by the egol client crates.
//!
//! Design goals:
//! - Plain owned values; no interior mutability, safe to hand across threads.
//! - Construction and blending errors are typed and always propagated.
//! - No `unsafe`.

pub mod attributes;
pub mod config;
pub mod error;
pub mod math;
pub mod net;
pub mod organism;
pub mod state;

pub mod prelude {
    //! Commonly used exports.

    pub use crate::attributes::*;
    pub use crate::config::*;
    pub use crate::error::StateError;
    pub use crate::math::*;
    pub use crate::net::*;
    pub use crate::organism::*;
    pub use crate::state::*;
}
