//! Tactics AI: orbital combat targeting and the waypoint/intercept
//! steering laws. Every function here is pure over entity snapshots —
//! no entity-store dependency, so the tick pipeline stays the only
//! thing that mutates the world.

pub mod orbital_combat;
pub mod waypoint_intercept;
