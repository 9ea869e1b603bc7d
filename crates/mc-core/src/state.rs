//! Orbital state representations shared by the propagators.

use serde::{Deserialize, Serialize};

use crate::enums::FrameTag;
use crate::vector::{Quat, Vec3};

/// Full kinematic state used by the RK4 integrator and Kepler path.
///
/// `time` is seconds since a scenario-local reference epoch. `frame` tags
/// the interpretation of `position`/`velocity`; core math operates in
/// `J2000Eci` for Earth-centered work and `HeliocentricJ2000` for
/// interplanetary work. Frame tags must match when combining vectors —
/// nothing here converts between frames implicitly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StateVector {
    pub position: Vec3,
    pub velocity: Vec3,
    pub attitude: Quat,
    pub angular_velocity: Vec3,
    pub time: f64,
    pub frame: FrameTag,
}

impl Default for StateVector {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            attitude: Quat::IDENTITY,
            angular_velocity: Vec3::ZERO,
            time: 0.0,
            frame: FrameTag::J2000Eci,
        }
    }
}

impl StateVector {
    pub fn new(position: Vec3, velocity: Vec3, frame: FrameTag) -> Self {
        Self {
            position,
            velocity,
            frame,
            ..Default::default()
        }
    }

    /// A pure kinematic derivative: `position_deriv = velocity`,
    /// `velocity_deriv = acceleration`. All other fields are left at
    /// their default (unused by the RK4 integrator's weighted sum).
    pub fn derivative(velocity: Vec3, acceleration: Vec3, frame: FrameTag) -> Self {
        Self {
            position: velocity,
            velocity: acceleration,
            frame,
            ..Default::default()
        }
    }
}

/// Classical orbital elements. Angles in radians except `semi_major_axis`
/// in metres.
///
/// Invariant: `0 <= eccentricity < 1` on the Kepler propagation path;
/// `eccentricity >= 1` (hyperbolic) is not propagated by the MC tick
/// engine and triggers the linear-propagation fallback described in the
/// Kepler solver's contract.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitalElements {
    pub semi_major_axis: f64,
    pub eccentricity: f64,
    pub inclination: f64,
    pub raan: f64,
    pub arg_periapsis: f64,
    pub true_anomaly: f64,
    pub mean_anomaly: f64,
}

impl Default for OrbitalElements {
    fn default() -> Self {
        Self {
            semi_major_axis: crate::constants::EARTH_RADIUS + 400_000.0,
            eccentricity: 0.0,
            inclination: 0.0,
            raan: 0.0,
            arg_periapsis: 0.0,
            true_anomaly: 0.0,
            mean_anomaly: 0.0,
        }
    }
}

/// Which perturbations the acceleration composer includes, plus the
/// parameters those perturbations need.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerturbationConfig {
    pub j2: bool,
    pub j3: bool,
    pub j4: bool,
    pub moon: bool,
    pub sun: bool,
    pub srp: bool,
    pub drag: bool,

    /// Cross-sectional area for SRP, m^2.
    pub srp_area: f64,
    /// Spacecraft mass for SRP, kg.
    pub srp_mass: f64,
    /// Radiation pressure coefficient.
    pub srp_cr: f64,

    /// Drag coefficient.
    pub drag_cd: f64,
    /// Cross-sectional area for drag, m^2.
    pub drag_area: f64,
    /// Spacecraft mass for drag, kg.
    pub drag_mass: f64,

    /// Julian date at simulation time zero.
    pub epoch_jd: f64,
}

impl Default for PerturbationConfig {
    fn default() -> Self {
        Self {
            j2: false,
            j3: false,
            j4: false,
            moon: false,
            sun: false,
            srp: false,
            drag: false,
            srp_area: 10.0,
            srp_mass: 500.0,
            srp_cr: 1.3,
            drag_cd: 2.2,
            drag_area: 10.0,
            drag_mass: 500.0,
            epoch_jd: crate::constants::J2000_EPOCH_JD,
        }
    }
}
