//! Fundamental geometric types: 3-vectors and unit quaternions.
//!
//! Re-exports `glam`'s double-precision types under the vocabulary this
//! crate uses throughout (`Vec3`, `Quat`), since every position, velocity,
//! and acceleration in this simulator is a physical quantity in metres or
//! metres/second and needs f64 precision, not the f32 `glam::Vec3`.

pub use glam::DQuat as Quat;
pub use glam::DVec3 as Vec3;

/// Re-enforce the unit-quaternion invariant after repeated integration.
///
/// `StateVector::attitude` drifts away from unit length under repeated
/// RK4 steps; callers that integrate attitude should renormalize every
/// step rather than letting the drift accumulate.
pub fn renormalize(q: Quat) -> Quat {
    q.normalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renormalize_fixes_drifted_quaternion() {
        let q = Quat::from_xyzw(0.1, 0.2, 0.3, 0.9);
        let n = renormalize(q);
        assert!(
            (n.length() - 1.0).abs() < 1e-12,
            "expected unit length, got {}",
            n.length()
        );
    }

    #[test]
    fn vec3_cross_and_dot_match_textbook() {
        let a = Vec3::new(1.0, 0.0, 0.0);
        let b = Vec3::new(0.0, 1.0, 0.0);
        assert_eq!(a.cross(b), Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(a.dot(b), 0.0);
    }
}
