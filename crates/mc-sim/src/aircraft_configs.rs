//! The named aircraft configuration table (component L support data).
//!
//! Sixteen named airframes plus the alias table the scenario parser
//! uses to resolve a `components.physics.config` string to
//! aerodynamic/propulsion numbers.

use mc_core::entity::AeroConfig;

/// One named airframe's loaded numbers, before the per-degree-to-per-
/// radian `cl_alpha` conversion the scenario parser applies at load time.
#[derive(Debug, Clone, Copy)]
struct RawConfig {
    mass: f64,
    wing_area: f64,
    aspect_ratio: f64,
    cd0: f64,
    oswald: f64,
    /// Per-degree, as tabulated by the source.
    cl_alpha_per_deg: f64,
    cl_max: f64,
    thrust_mil: f64,
    thrust_ab: f64,
    max_g: f64,
    max_aoa_deg: f64,
    max_roll_rate_deg: f64,
    max_pitch_rate_deg: f64,
    idle_thrust_frac: f64,
}

const F16: RawConfig = RawConfig { mass: 12_000.0, wing_area: 27.87, aspect_ratio: 3.55, cd0: 0.0175, oswald: 0.85, cl_alpha_per_deg: 0.08, cl_max: 1.6, thrust_mil: 79_000.0, thrust_ab: 127_000.0, max_g: 9.0, max_aoa_deg: 25.0, max_roll_rate_deg: 280.0, max_pitch_rate_deg: 30.0, idle_thrust_frac: 0.05 };
const MIG29: RawConfig = RawConfig { mass: 15_000.0, wing_area: 38.0, aspect_ratio: 3.5, cd0: 0.020, oswald: 0.82, cl_alpha_per_deg: 0.075, cl_max: 1.4, thrust_mil: 81_000.0, thrust_ab: 110_000.0, max_g: 9.0, max_aoa_deg: 28.0, max_roll_rate_deg: 260.0, max_pitch_rate_deg: 28.0, idle_thrust_frac: 0.05 };
const AWACS: RawConfig = RawConfig { mass: 147_000.0, wing_area: 283.0, aspect_ratio: 7.7, cd0: 0.030, oswald: 0.80, cl_alpha_per_deg: 0.06, cl_max: 1.4, thrust_mil: 372_000.0, thrust_ab: 372_000.0, max_g: 2.5, max_aoa_deg: 14.0, max_roll_rate_deg: 45.0, max_pitch_rate_deg: 10.0, idle_thrust_frac: 0.05 };
const F15: RawConfig = RawConfig { mass: 24_500.0, wing_area: 56.5, aspect_ratio: 3.0, cd0: 0.019, oswald: 0.82, cl_alpha_per_deg: 0.075, cl_max: 1.5, thrust_mil: 130_000.0, thrust_ab: 210_000.0, max_g: 9.0, max_aoa_deg: 30.0, max_roll_rate_deg: 280.0, max_pitch_rate_deg: 30.0, idle_thrust_frac: 0.05 };
const SU27: RawConfig = RawConfig { mass: 23_430.0, wing_area: 62.0, aspect_ratio: 3.5, cd0: 0.021, oswald: 0.82, cl_alpha_per_deg: 0.075, cl_max: 1.5, thrust_mil: 152_000.0, thrust_ab: 245_000.0, max_g: 9.0, max_aoa_deg: 30.0, max_roll_rate_deg: 270.0, max_pitch_rate_deg: 28.0, idle_thrust_frac: 0.05 };
const F22: RawConfig = RawConfig { mass: 29_300.0, wing_area: 78.0, aspect_ratio: 2.36, cd0: 0.015, oswald: 0.80, cl_alpha_per_deg: 0.075, cl_max: 1.4, thrust_mil: 156_000.0, thrust_ab: 312_000.0, max_g: 9.0, max_aoa_deg: 60.0, max_roll_rate_deg: 300.0, max_pitch_rate_deg: 40.0, idle_thrust_frac: 0.05 };
const F35: RawConfig = RawConfig { mass: 22_470.0, wing_area: 42.7, aspect_ratio: 2.68, cd0: 0.015, oswald: 0.78, cl_alpha_per_deg: 0.07, cl_max: 1.3, thrust_mil: 125_000.0, thrust_ab: 191_000.0, max_g: 9.0, max_aoa_deg: 50.0, max_roll_rate_deg: 280.0, max_pitch_rate_deg: 30.0, idle_thrust_frac: 0.05 };
const F18: RawConfig = RawConfig { mass: 21_320.0, wing_area: 46.45, aspect_ratio: 4.0, cd0: 0.020, oswald: 0.82, cl_alpha_per_deg: 0.08, cl_max: 1.5, thrust_mil: 124_000.0, thrust_ab: 190_000.0, max_g: 7.5, max_aoa_deg: 35.0, max_roll_rate_deg: 260.0, max_pitch_rate_deg: 28.0, idle_thrust_frac: 0.05 };
const A10: RawConfig = RawConfig { mass: 14_865.0, wing_area: 47.01, aspect_ratio: 6.54, cd0: 0.032, oswald: 0.85, cl_alpha_per_deg: 0.09, cl_max: 1.8, thrust_mil: 40_000.0, thrust_ab: 40_000.0, max_g: 7.33, max_aoa_deg: 20.0, max_roll_rate_deg: 180.0, max_pitch_rate_deg: 20.0, idle_thrust_frac: 0.05 };
const SU35: RawConfig = RawConfig { mass: 25_300.0, wing_area: 62.0, aspect_ratio: 3.78, cd0: 0.020, oswald: 0.83, cl_alpha_per_deg: 0.08, cl_max: 1.5, thrust_mil: 172_000.0, thrust_ab: 286_000.0, max_g: 9.0, max_aoa_deg: 30.0, max_roll_rate_deg: 280.0, max_pitch_rate_deg: 30.0, idle_thrust_frac: 0.05 };
const SU57: RawConfig = RawConfig { mass: 25_000.0, wing_area: 78.8, aspect_ratio: 2.52, cd0: 0.015, oswald: 0.80, cl_alpha_per_deg: 0.075, cl_max: 1.4, thrust_mil: 176_000.0, thrust_ab: 360_000.0, max_g: 9.0, max_aoa_deg: 60.0, max_roll_rate_deg: 270.0, max_pitch_rate_deg: 35.0, idle_thrust_frac: 0.05 };
const B2: RawConfig = RawConfig { mass: 152_600.0, wing_area: 478.0, aspect_ratio: 5.74, cd0: 0.018, oswald: 0.90, cl_alpha_per_deg: 0.06, cl_max: 1.2, thrust_mil: 340_000.0, thrust_ab: 340_000.0, max_g: 2.5, max_aoa_deg: 15.0, max_roll_rate_deg: 60.0, max_pitch_rate_deg: 10.0, idle_thrust_frac: 0.04 };
const BOMBER_FAST: RawConfig = RawConfig { mass: 148_000.0, wing_area: 181.0, aspect_ratio: 9.6, cd0: 0.020, oswald: 0.82, cl_alpha_per_deg: 0.07, cl_max: 1.3, thrust_mil: 360_000.0, thrust_ab: 600_000.0, max_g: 3.0, max_aoa_deg: 18.0, max_roll_rate_deg: 90.0, max_pitch_rate_deg: 12.0, idle_thrust_frac: 0.04 };
const C17: RawConfig = RawConfig { mass: 265_350.0, wing_area: 353.0, aspect_ratio: 7.57, cd0: 0.022, oswald: 0.82, cl_alpha_per_deg: 0.085, cl_max: 1.8, thrust_mil: 480_000.0, thrust_ab: 480_000.0, max_g: 2.5, max_aoa_deg: 15.0, max_roll_rate_deg: 45.0, max_pitch_rate_deg: 8.0, idle_thrust_frac: 0.04 };
const TRANSPORT: RawConfig = RawConfig { mass: 70_300.0, wing_area: 162.1, aspect_ratio: 10.08, cd0: 0.025, oswald: 0.85, cl_alpha_per_deg: 0.09, cl_max: 2.0, thrust_mil: 64_000.0, thrust_ab: 64_000.0, max_g: 2.5, max_aoa_deg: 15.0, max_roll_rate_deg: 60.0, max_pitch_rate_deg: 10.0, idle_thrust_frac: 0.05 };
const MQ9: RawConfig = RawConfig { mass: 4_760.0, wing_area: 38.0, aspect_ratio: 10.53, cd0: 0.020, oswald: 0.88, cl_alpha_per_deg: 0.09, cl_max: 1.6, thrust_mil: 6_700.0, thrust_ab: 6_700.0, max_g: 3.0, max_aoa_deg: 15.0, max_roll_rate_deg: 60.0, max_pitch_rate_deg: 10.0, idle_thrust_frac: 0.06 };
const RQ4: RawConfig = RawConfig { mass: 14_628.0, wing_area: 50.0, aspect_ratio: 31.84, cd0: 0.015, oswald: 0.92, cl_alpha_per_deg: 0.10, cl_max: 1.5, thrust_mil: 35_000.0, thrust_ab: 35_000.0, max_g: 2.0, max_aoa_deg: 12.0, max_roll_rate_deg: 30.0, max_pitch_rate_deg: 8.0, idle_thrust_frac: 0.05 };

/// Resolve a scenario's `components.physics.config` string to an
/// `AeroConfig`, converting `cl_alpha` from per-degree (as tabulated) to
/// per-radian at load time, matching `apply_aircraft_config`. Unknown
/// names fall back to `f16`.
pub fn lookup(name: &str) -> AeroConfig {
    let raw = match name {
        "f16" => F16,
        "f15" => F15,
        "f22" => F22,
        "f35" => F35,
        "f18" => F18,
        "a10" => A10,
        "mig29" => MIG29,
        "su27" => SU27,
        "su35" => SU35,
        "su57" => SU57,
        "awacs" => AWACS,
        "bomber" | "b2" => B2,
        "bomber_fast" => BOMBER_FAST,
        "transport" => TRANSPORT,
        "c17" => C17,
        "drone_male" | "mq9" => MQ9,
        "drone_hale" | "rq4" => RQ4,
        _ => F16,
    };

    AeroConfig {
        mass: raw.mass,
        wing_area: raw.wing_area,
        aspect_ratio: raw.aspect_ratio,
        cd0: raw.cd0,
        oswald: raw.oswald,
        cl_alpha: raw.cl_alpha_per_deg * (180.0 / std::f64::consts::PI),
        cl_max: raw.cl_max,
        thrust_mil: raw.thrust_mil,
        thrust_ab: raw.thrust_ab,
        max_g: raw.max_g,
        max_aoa_rad: raw.max_aoa_deg.to_radians(),
        max_roll_rate_rad: raw.max_roll_rate_deg.to_radians(),
        max_pitch_rate_rad: raw.max_pitch_rate_deg.to_radians(),
        idle_thrust_frac: raw.idle_thrust_frac,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_name_falls_back_to_f16() {
        let known = lookup("f16");
        let unknown = lookup("nonexistent-type");
        assert_eq!(known.mass, unknown.mass);
        assert_eq!(known.thrust_mil, unknown.thrust_mil);
    }

    #[test]
    fn aliases_resolve_to_the_same_config() {
        assert_eq!(lookup("bomber").mass, lookup("b2").mass);
        assert_eq!(lookup("drone_male").mass, lookup("mq9").mass);
        assert_eq!(lookup("drone_hale").mass, lookup("rq4").mass);
    }

    #[test]
    fn cl_alpha_is_converted_to_per_radian() {
        let f16 = lookup("f16");
        // 0.08 per-degree -> ~4.58 per-radian.
        assert!((f16.cl_alpha - 0.08 * (180.0 / std::f64::consts::PI)).abs() < 1e-9);
        assert!(f16.cl_alpha > 1.0, "per-radian cl_alpha should be much larger than per-degree");
    }

    #[test]
    fn a10_has_no_afterburner() {
        let a10 = lookup("a10");
        assert_eq!(a10.thrust_mil, a10.thrust_ab);
    }
}
