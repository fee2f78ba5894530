#![warn(unreachable_pub, missing_debug_implementations)]

//! The core `dashsweep` data model. This crate defines the parameter space of
//! a streaming-simulation sweep ([`ConfigSpace`]), the [`Configuration`]
//! values it enumerates, and the derived on-disk [`OutputLayout`]. Nothing in
//! this crate performs I/O.

#[macro_use]
mod ident;

mod config;
mod layout;
mod space;

pub use config::{AdaptationAlgorithm, Configuration, SimulationId, TransportProtocol};
pub use layout::{engine_log_dir, OutputLayout};
pub use space::{ConfigSpace, SpaceError};
