//! Math utilities and types
//!
//! Re-exports the nalgebra algebra this library is built on and defines the
//! shared numeric tolerances used by the intersection and distance engines.

pub use nalgebra::{RealField, UnitQuaternion, Vector3};

/// 3D vector over a generic real scalar.
pub type Vec3<T> = Vector3<T>;

/// Unit rotation quaternion over a generic real scalar.
pub type Quat<T> = UnitQuaternion<T>;

/// World up axis (Y-up right-handed convention).
#[must_use]
pub fn up_axis<T: RealField + Copy>() -> Vec3<T> {
    Vec3::y()
}

/// Any unit vector perpendicular to the unit vector `dir`.
#[must_use]
pub fn perpendicular_to<T: RealField + Copy>(dir: &Vec3<T>) -> Vec3<T> {
    let candidate = if dir.x.abs() < dir.y.abs().max(dir.z.abs()) {
        Vec3::x()
    } else {
        Vec3::y()
    };
    dir.cross(&candidate).normalize()
}

/// Clamp a scalar to the closed unit interval.
#[must_use]
pub fn clamp01<T: RealField + Copy>(value: T) -> T {
    if value < T::zero() {
        T::zero()
    } else if value > T::one() {
        T::one()
    } else {
        value
    }
}

/// Shared numeric thresholds, parameterized by the working scalar.
pub mod tolerance {
    use nalgebra::RealField;

    /// Magnitude below which a scalar counts as zero.
    pub const NEAR_ZERO: f64 = 1.0e-4;

    /// Padding added to cross-product separating axes so near-parallel edge
    /// pairs do not produce spurious separations.
    pub const AXIS_EPSILON: f64 = 1.0e-6;

    /// The near-zero threshold converted into the working scalar.
    #[must_use]
    pub fn near_zero<T: RealField + Copy>() -> T {
        nalgebra::convert(NEAR_ZERO)
    }

    /// The separating-axis padding converted into the working scalar.
    #[must_use]
    pub fn axis_epsilon<T: RealField + Copy>() -> T {
        nalgebra::convert(AXIS_EPSILON)
    }

    /// True when `value` lies within the near-zero threshold of zero.
    #[must_use]
    pub fn is_nearly_zero<T: RealField + Copy>(value: T) -> bool {
        value.abs() < near_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp01_bounds() {
        assert_eq!(clamp01(-0.5_f64), 0.0);
        assert_eq!(clamp01(0.25_f64), 0.25);
        assert_eq!(clamp01(1.5_f64), 1.0);
    }

    #[test]
    fn test_is_nearly_zero_threshold() {
        assert!(tolerance::is_nearly_zero(1.0e-5_f64));
        assert!(tolerance::is_nearly_zero(-1.0e-5_f64));
        assert!(!tolerance::is_nearly_zero(1.0e-3_f64));
    }

    #[test]
    fn test_up_axis_is_y() {
        let up: Vec3<f32> = up_axis();
        assert_eq!(up, Vec3::new(0.0, 1.0, 0.0));
    }
}
