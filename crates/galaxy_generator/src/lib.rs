//! Spiral galaxy point-cloud generation.
//!
//! Turns a [`GalaxyParameters`] snapshot into four index-aligned vertex
//! buffers (position, color, per-point scale, randomness offset). Generation
//! is a pure function of the parameters and the random source handed in, so
//! a seeded rng reproduces a galaxy exactly.
mod error;
mod generator;
mod parameters;

pub use error::GalaxyError;
pub use generator::{CHUNK_SIZE, GalaxyBuffers, GalaxyPoint, branch_angle, color_mix_factor, generate_galaxy};
pub use parameters::GalaxyParameters;

pub mod prelude {
    pub use crate::{GalaxyBuffers, GalaxyError, GalaxyParameters, generate_galaxy};
}
