//! US Standard Atmosphere 1976, truncated to the layers the simulator's
//! altitude range actually needs (sea level through 71 km, plus an
//! exponential-decay tail above that for the drag model's 200 km gate).
//!
//! Uses the standard seven-layer base-pressure recursion and the usual
//! geometric-to-geopotential altitude conversion.

const R_AIR: f64 = 287.058;
const GAMMA_AIR: f64 = 1.4;
const G0: f64 = 9.806_65;
const R_EARTH_GEOPOTENTIAL: f64 = 6_356_766.0;
const T0: f64 = 288.15;
const P0: f64 = 101_325.0;
pub const RHO0: f64 = 1.225;

const H_TOP: f64 = 84_852.0;
const T_TOP: f64 = 186.946;
const SCALE_HEIGHT: f64 = 8500.0;

/// Base geopotential altitudes of the seven standard layers, metres.
const LAYER_BASE_ALT: [f64; 7] = [0.0, 11_000.0, 20_000.0, 32_000.0, 47_000.0, 51_000.0, 71_000.0];
/// Base temperatures at each layer, kelvin.
const LAYER_BASE_TEMP: [f64; 7] = [288.15, 216.65, 216.65, 228.65, 270.65, 270.65, 214.65];
/// Lapse rate within each layer, K/m.
const LAYER_LAPSE: [f64; 7] = [-0.0065, 0.0, 0.001, 0.0028, 0.0, -0.0028, -0.002];

/// Atmospheric state at a given geometric altitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtmosphereState {
    pub temperature_k: f64,
    pub pressure_pa: f64,
    pub density_kg_m3: f64,
    pub speed_of_sound_mps: f64,
}

fn geometric_to_geopotential(h: f64) -> f64 {
    R_EARTH_GEOPOTENTIAL * h / (R_EARTH_GEOPOTENTIAL + h)
}

/// Base pressures at each layer boundary, computed once from the
/// recursive hydrostatic relation (isothermal layers use the exponential
/// form, gradient layers the power-law form).
fn layer_base_pressures() -> [f64; 7] {
    let mut p = [0.0; 7];
    p[0] = P0;
    for i in 1..7 {
        let dh = LAYER_BASE_ALT[i] - LAYER_BASE_ALT[i - 1];
        let tb = LAYER_BASE_TEMP[i - 1];
        let lapse = LAYER_LAPSE[i - 1];
        p[i] = if lapse.abs() < 1e-12 {
            p[i - 1] * (-G0 * dh / (R_AIR * tb)).exp()
        } else {
            let t_top = tb + lapse * dh;
            p[i - 1] * (t_top / tb).powf(-G0 / (lapse * R_AIR))
        };
    }
    p
}

/// Query the atmosphere at a given geometric altitude above the WGS-84
/// ellipsoid, metres. Negative altitude clamps to sea level; altitude
/// above `H_TOP` uses an exponential decay anchored at the top-of-table
/// density, which is adequate for the drag model's 200 km gate (density
/// there is negligible regardless).
pub fn atmosphere_at(altitude_m: f64) -> AtmosphereState {
    if altitude_m <= 0.0 {
        return AtmosphereState {
            temperature_k: T0,
            pressure_pa: P0,
            density_kg_m3: RHO0,
            speed_of_sound_mps: (GAMMA_AIR * R_AIR * T0).sqrt(),
        };
    }

    let h_geop = geometric_to_geopotential(altitude_m);
    let base_p = layer_base_pressures();

    if h_geop > H_TOP {
        let p_top = base_p[6] * (T_TOP / LAYER_BASE_TEMP[6]).powf(-G0 / (LAYER_LAPSE[6] * R_AIR));
        let rho_top = p_top / (R_AIR * T_TOP);
        let dh = altitude_m - H_TOP;
        let rho = rho_top * (-dh / SCALE_HEIGHT).exp();
        let p = p_top * (-dh / SCALE_HEIGHT).exp();
        return AtmosphereState {
            temperature_k: T_TOP,
            pressure_pa: p,
            density_kg_m3: rho,
            speed_of_sound_mps: (GAMMA_AIR * R_AIR * T_TOP).sqrt(),
        };
    }

    let mut layer = 0;
    for i in (0..7).rev() {
        if h_geop >= LAYER_BASE_ALT[i] {
            layer = i;
            break;
        }
    }

    let dh = h_geop - LAYER_BASE_ALT[layer];
    let tb = LAYER_BASE_TEMP[layer];
    let lapse = LAYER_LAPSE[layer];
    let t = tb + lapse * dh;
    let p = if lapse.abs() < 1e-12 {
        base_p[layer] * (-G0 * dh / (R_AIR * tb)).exp()
    } else {
        base_p[layer] * (t / tb).powf(-G0 / (lapse * R_AIR))
    };
    let rho = p / (R_AIR * t);

    AtmosphereState {
        temperature_k: t,
        pressure_pa: p,
        density_kg_m3: rho,
        speed_of_sound_mps: (GAMMA_AIR * R_AIR * t).sqrt(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sea_level_matches_standard_day() {
        let s = atmosphere_at(0.0);
        assert!((s.density_kg_m3 - RHO0).abs() < 1e-6);
        assert!((s.pressure_pa - P0).abs() < 1e-3);
    }

    #[test]
    fn negative_altitude_clamps_to_sea_level() {
        let s = atmosphere_at(-500.0);
        assert_eq!(s.density_kg_m3, RHO0);
    }

    #[test]
    fn density_decreases_monotonically_with_altitude() {
        let alts = [0.0, 5_000.0, 11_000.0, 20_000.0, 32_000.0, 47_000.0, 71_000.0, 90_000.0];
        let densities: Vec<f64> = alts.iter().map(|&a| atmosphere_at(a).density_kg_m3).collect();
        for w in densities.windows(2) {
            assert!(w[0] > w[1], "density should decrease with altitude: {w:?}");
        }
    }

    #[test]
    fn above_200km_density_is_negligible() {
        let s = atmosphere_at(200_000.0);
        assert!(s.density_kg_m3 < 1e-9, "density too high at 200km: {}", s.density_kg_m3);
    }

    #[test]
    fn tropopause_temperature_is_216_65k() {
        let s = atmosphere_at(11_000.0);
        assert!((s.temperature_k - 216.65).abs() < 0.1);
    }
}
