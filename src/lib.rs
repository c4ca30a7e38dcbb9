//! Fixed-tick space shooter engine.
//!
//! The library owns every gameplay rule; the binary in `main.rs` is only a
//! terminal host that feeds input, calls `Simulation::tick` on a timer and
//! paints whatever the engine drew.

pub mod config;
pub mod entities;
pub mod error;
pub mod fleet;
pub mod rng;
pub mod shapes;
pub mod simulation;
pub mod surface;

pub use config::SimConfig;
pub use error::ConfigError;
pub use simulation::{Outcome, Simulation};
