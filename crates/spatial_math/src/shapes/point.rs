//! Single point: the degenerate zero-volume shape.

use serde::{Deserialize, Serialize};

use crate::error::ShapeError;
use crate::foundation::math::{tolerance, Quat, RealField, Vec3};
use crate::shapes::validate_scale_factor;

/// A single point in world space, treated as a zero-extent solid.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SinglePoint<T: RealField + Copy> {
    position: Vec3<T>,
}

impl<T: RealField + Copy> SinglePoint<T> {
    /// Create a point at `position`.
    #[must_use]
    pub fn new(position: Vec3<T>) -> Self {
        Self { position }
    }

    /// Center position.
    #[must_use]
    pub fn position(&self) -> Vec3<T> {
        self.position
    }

    /// Orientation; always the identity for a point.
    #[must_use]
    pub fn rotation(&self) -> Quat<T> {
        Quat::identity()
    }

    /// Radius of the enclosing sphere; zero for a point.
    #[must_use]
    pub fn containing_radius(&self) -> T {
        T::zero()
    }

    /// Enclosed volume; zero for a point.
    #[must_use]
    pub fn volume(&self) -> T {
        T::zero()
    }

    /// Smallest linear extent; zero for a point.
    #[must_use]
    pub fn smallest_dimension(&self) -> T {
        T::zero()
    }

    /// Extremal point along the up axis; the point itself.
    #[must_use]
    pub fn highest_point(&self) -> Vec3<T> {
        self.position
    }

    /// Extremal point along the down axis; the point itself.
    #[must_use]
    pub fn lowest_point(&self) -> Vec3<T> {
        self.position
    }

    /// Membership test: true when `point` coincides with this point within
    /// the shared tolerance.
    #[must_use]
    pub fn is_point_within(&self, point: &Vec3<T>) -> bool {
        tolerance::is_nearly_zero((point - self.position).norm())
    }

    /// Copy of this point at a new position.
    #[must_use]
    pub fn with_position(&self, position: Vec3<T>) -> Self {
        Self::new(position)
    }

    /// Copy with a rotation applied; a no-op for a point.
    #[must_use]
    pub fn with_rotation(&self, _rotation: Quat<T>) -> Self {
        *self
    }

    /// Scale every linear extent by `factor`; a point is unaffected.
    ///
    /// # Errors
    /// Returns [`ShapeError::NegativeScaleFactor`] when `factor < 0`.
    pub fn scale_by_dimension(&self, factor: T) -> Result<Self, ShapeError> {
        validate_scale_factor(factor)?;
        Ok(*self)
    }

    /// Scale the volume by `factor`; a point is unaffected.
    ///
    /// # Errors
    /// Returns [`ShapeError::NegativeScaleFactor`] when `factor < 0`.
    pub fn scale_volume(&self, factor: T) -> Result<Self, ShapeError> {
        validate_scale_factor(factor)?;
        Ok(*self)
    }
}

impl<T: RealField + Copy> PartialEq for SinglePoint<T> {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_membership() {
        let point = SinglePoint::new(Vec3::new(1.0_f64, 2.0, 3.0));
        assert!(point.is_point_within(&Vec3::new(1.0, 2.0, 3.0)));
        assert!(point.is_point_within(&Vec3::new(1.0, 2.0, 3.00001)));
        assert!(!point.is_point_within(&Vec3::new(1.0, 2.0, 3.1)));
    }

    #[test]
    fn test_point_scaling_is_identity() {
        let point = SinglePoint::new(Vec3::new(1.0_f64, 0.0, 0.0));
        assert_eq!(point.scale_by_dimension(4.0).unwrap(), point);
        assert_eq!(point.scale_volume(0.0).unwrap(), point);
    }

    #[test]
    fn test_negative_scale_rejected() {
        let point = SinglePoint::new(Vec3::zeros());
        assert!(point.scale_by_dimension(-1.0_f64).is_err());
        assert!(point.scale_volume(-0.5_f64).is_err());
    }
}
