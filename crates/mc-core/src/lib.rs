//! Core data model and vocabulary shared across the simulation crates.
//!
//! Defines the flat entity record and world store, the PRNG, physical
//! constants, and the fundamental geometric/state types. Has no
//! dependency on any propagator, AI, or runner logic — those live in
//! `mc-astro`, `mc-tactics-ai`, `mc-sim`, and `mc-runner` respectively.

pub mod constants;
pub mod entity;
pub mod enums;
pub mod error;
pub mod events;
pub mod prng;
pub mod state;
pub mod vector;
pub mod world;

pub use entity::MCEntity;
pub use error::{MCError, MCResult};
pub use vector::{Quat, Vec3};
pub use world::MCWorld;
