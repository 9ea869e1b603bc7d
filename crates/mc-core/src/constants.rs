//! Crate-wide physical and simulation constants.
//!
//! All bodies this simulator cares about (Earth, gravity field, the Sun,
//! the atmosphere) are described here once, read-only, loaded at process
//! start as plain `const`s — no mutable globals anywhere in the crate,
//! per the architectural mandate that cyclic/global state from the
//! original engine is replaced with explicit values threaded through
//! function arguments.

/// Earth gravitational parameter, m^3/s^2.
pub const EARTH_MU: f64 = 3.986_004_418e14;

/// Earth mean equatorial radius, metres.
pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// Earth mean radius (spherical approximation used for geodesy), metres.
pub const EARTH_RADIUS_MEAN: f64 = 6_371_000.0;

/// WGS-84 flattening-derived eccentricity squared.
pub const WGS84_E2: f64 = 0.006_694_379_990_14;

/// Earth's second zonal harmonic (oblateness).
pub const EARTH_J2: f64 = 1.082_63e-3;

/// Earth's third zonal harmonic.
pub const EARTH_J3: f64 = -2.532_7e-6;

/// Earth's fourth zonal harmonic.
pub const EARTH_J4: f64 = -1.619_6e-6;

/// Earth rotation rate, rad/s.
pub const OMEGA_EARTH: f64 = 7.292_115_9e-5;

/// Moon gravitational parameter, m^3/s^2.
pub const MOON_MU: f64 = 4.9048695e12;

/// Moon mean radius, metres.
pub const MOON_RADIUS: f64 = 1_737_400.0;

/// Mean Earth-Moon distance, metres.
pub const EARTH_MOON_DISTANCE: f64 = 384_400_000.0;

/// Moon orbital inclination to the ecliptic, radians (5.145 degrees, simplified fixed node).
pub const MOON_INCLINATION: f64 = 0.089_797_19;

/// Moon mean longitude at J2000 epoch, radians.
pub const MOON_L0_J2000: f64 = 0.0;

/// Sun gravitational parameter, m^3/s^2.
pub const SUN_MU: f64 = 1.327_124_4e20;

/// One astronomical unit, metres.
pub const AU: f64 = 1.495_978_707e11;

/// Mean obliquity of the ecliptic at J2000, radians (23.439281 degrees).
pub const OBLIQUITY_J2000: f64 = 0.409_092_804;

/// Solar radiation pressure at 1 AU, N/m^2.
pub const P_SUN_1AU: f64 = 4.56e-6;

/// Seconds in a Julian day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Julian date of the J2000.0 epoch.
pub const J2000_EPOCH_JD: f64 = 2_451_545.0;
