//! Scenario parsing and the per-tick system pipeline for the Monte
//! Carlo tactics engine. Everything here operates on the flat
//! `mc_core::world::MCWorld` store; no module keeps its own copy of
//! entity state between ticks.

pub mod aircraft_configs;
pub mod events;
pub mod flight3dof;
pub mod json_ext;
pub mod pipeline;
pub mod radar;
pub mod scenario;
pub mod weapons_a2a;
pub mod weapons_kinetic;
pub mod weapons_sam;

pub use pipeline::tick;
pub use scenario::parse_scenario;
