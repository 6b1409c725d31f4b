//! Solid sphere.

use serde::{Deserialize, Serialize};

use crate::error::ShapeError;
use crate::foundation::math::{up_axis, Quat, RealField, Vec3};
use crate::shapes::{cube_root, validate_scale_factor};

/// A solid sphere described by its center and radius.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Sphere<T: RealField + Copy> {
    radius: T,
    position: Vec3<T>,
    volume: T,
}

impl<T: RealField + Copy> Sphere<T> {
    /// Create a sphere with the given `radius` centered at `position`.
    ///
    /// `radius` must be non-negative; a zero radius yields a valid degenerate
    /// sphere.
    #[must_use]
    pub fn new(radius: T, position: Vec3<T>) -> Self {
        debug_assert!(radius >= T::zero(), "sphere radius must be non-negative");
        let four_thirds: T = nalgebra::convert(4.0 / 3.0);
        Self {
            radius,
            position,
            volume: four_thirds * T::pi() * radius * radius * radius,
        }
    }

    /// Sphere radius.
    #[must_use]
    pub fn radius(&self) -> T {
        self.radius
    }

    /// Center position.
    #[must_use]
    pub fn position(&self) -> Vec3<T> {
        self.position
    }

    /// Orientation; always the identity for a sphere.
    #[must_use]
    pub fn rotation(&self) -> Quat<T> {
        Quat::identity()
    }

    /// Radius of the enclosing sphere; the sphere's own radius.
    #[must_use]
    pub fn containing_radius(&self) -> T {
        self.radius
    }

    /// Enclosed volume.
    #[must_use]
    pub fn volume(&self) -> T {
        self.volume
    }

    /// Smallest linear extent; the diameter.
    #[must_use]
    pub fn smallest_dimension(&self) -> T {
        self.radius + self.radius
    }

    /// Extremal point along the up axis.
    #[must_use]
    pub fn highest_point(&self) -> Vec3<T> {
        self.position + up_axis() * self.radius
    }

    /// Extremal point along the down axis.
    #[must_use]
    pub fn lowest_point(&self) -> Vec3<T> {
        self.position - up_axis() * self.radius
    }

    /// Closed-region membership: the boundary counts as inside.
    #[must_use]
    pub fn is_point_within(&self, point: &Vec3<T>) -> bool {
        (point - self.position).norm_squared() <= self.radius * self.radius
    }

    /// Copy of this sphere at a new position.
    #[must_use]
    pub fn with_position(&self, position: Vec3<T>) -> Self {
        Self::new(self.radius, position)
    }

    /// Copy with a rotation applied; a no-op for a sphere.
    #[must_use]
    pub fn with_rotation(&self, _rotation: Quat<T>) -> Self {
        *self
    }

    /// Scale the radius by `factor`.
    ///
    /// # Errors
    /// Returns [`ShapeError::NegativeScaleFactor`] when `factor < 0`.
    pub fn scale_by_dimension(&self, factor: T) -> Result<Self, ShapeError> {
        validate_scale_factor(factor)?;
        Ok(Self::new(self.radius * factor, self.position))
    }

    /// Scale the volume by `factor`, i.e. the radius by `factor^(1/3)`.
    /// A zero factor produces a degenerate zero-radius sphere.
    ///
    /// # Errors
    /// Returns [`ShapeError::NegativeScaleFactor`] when `factor < 0`.
    pub fn scale_volume(&self, factor: T) -> Result<Self, ShapeError> {
        validate_scale_factor(factor)?;
        if factor == T::zero() {
            return Ok(Self::new(T::zero(), self.position));
        }
        Ok(Self::new(self.radius * cube_root(factor), self.position))
    }
}

impl<T: RealField + Copy> PartialEq for Sphere<T> {
    fn eq(&self, other: &Self) -> bool {
        self.radius == other.radius && self.position == other.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f64 = 1.0e-12;

    #[test]
    fn test_sphere_volume() {
        let sphere = Sphere::new(2.0_f64, Vec3::zeros());
        let expected = 4.0 / 3.0 * std::f64::consts::PI * 8.0;
        assert_relative_eq!(sphere.volume(), expected, epsilon = EPSILON);
    }

    #[test]
    fn test_sphere_membership_is_closed() {
        let sphere = Sphere::new(1.0_f64, Vec3::zeros());
        assert!(sphere.is_point_within(&Vec3::new(1.0, 0.0, 0.0)));
        assert!(sphere.is_point_within(&Vec3::new(0.5, 0.5, 0.0)));
        assert!(!sphere.is_point_within(&Vec3::new(1.0, 0.5, 0.0)));
    }

    #[test]
    fn test_sphere_extremal_points() {
        let sphere = Sphere::new(2.0_f64, Vec3::new(0.0, 1.0, 0.0));
        assert_relative_eq!(
            sphere.highest_point(),
            Vec3::new(0.0, 3.0, 0.0),
            epsilon = EPSILON
        );
        assert_relative_eq!(
            sphere.lowest_point(),
            Vec3::new(0.0, -1.0, 0.0),
            epsilon = EPSILON
        );
    }

    #[test]
    fn test_scale_volume_cube_root_law() {
        let sphere = Sphere::new(1.0_f64, Vec3::zeros());
        let scaled = sphere.scale_volume(8.0).unwrap();
        assert_relative_eq!(scaled.radius(), 2.0, epsilon = 1.0e-9);
        assert_relative_eq!(scaled.volume(), sphere.volume() * 8.0, epsilon = 1.0e-9);
    }

    #[test]
    fn test_scale_volume_zero_is_degenerate() {
        let sphere = Sphere::new(3.0_f64, Vec3::new(1.0, 2.0, 3.0));
        let collapsed = sphere.scale_volume(0.0).unwrap();
        assert_eq!(collapsed.radius(), 0.0);
        assert_eq!(collapsed.position(), sphere.position());
    }

    #[test]
    fn test_scale_identity() {
        let sphere = Sphere::new(1.5_f64, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(sphere.scale_by_dimension(1.0).unwrap(), sphere);
        assert_eq!(sphere.scale_volume(1.0).unwrap(), sphere);
    }
}
