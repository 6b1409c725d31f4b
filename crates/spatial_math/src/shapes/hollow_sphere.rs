//! Hollow sphere: the annular shell between two concentric radii.

use serde::{Deserialize, Serialize};

use crate::error::ShapeError;
use crate::foundation::math::{up_axis, Quat, RealField, Vec3};
use crate::shapes::{cube_root, validate_scale_factor};

/// The shell of material between an inner and an outer sphere sharing one
/// center. Points strictly inside the inner radius are in the cavity, not in
/// the shape.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HollowSphere<T: RealField + Copy> {
    inner_radius: T,
    outer_radius: T,
    position: Vec3<T>,
    volume: T,
}

impl<T: RealField + Copy> HollowSphere<T> {
    /// Create a shell with the given radii centered at `position`.
    ///
    /// Requires `0 <= inner_radius <= outer_radius`.
    #[must_use]
    pub fn new(inner_radius: T, outer_radius: T, position: Vec3<T>) -> Self {
        debug_assert!(
            inner_radius >= T::zero() && inner_radius <= outer_radius,
            "hollow sphere radii must satisfy 0 <= inner <= outer"
        );
        let four_thirds: T = nalgebra::convert(4.0 / 3.0);
        let outer_cubed = outer_radius * outer_radius * outer_radius;
        let inner_cubed = inner_radius * inner_radius * inner_radius;
        Self {
            inner_radius,
            outer_radius,
            position,
            volume: four_thirds * T::pi() * (outer_cubed - inner_cubed),
        }
    }

    /// Radius of the inner cavity.
    #[must_use]
    pub fn inner_radius(&self) -> T {
        self.inner_radius
    }

    /// Outer radius of the shell.
    #[must_use]
    pub fn outer_radius(&self) -> T {
        self.outer_radius
    }

    /// Center position.
    #[must_use]
    pub fn position(&self) -> Vec3<T> {
        self.position
    }

    /// Orientation; always the identity for a shell.
    #[must_use]
    pub fn rotation(&self) -> Quat<T> {
        Quat::identity()
    }

    /// Radius of the enclosing sphere; the outer radius.
    #[must_use]
    pub fn containing_radius(&self) -> T {
        self.outer_radius
    }

    /// Volume of the shell material.
    #[must_use]
    pub fn volume(&self) -> T {
        self.volume
    }

    /// Smallest linear extent; the shell thickness.
    #[must_use]
    pub fn smallest_dimension(&self) -> T {
        self.outer_radius - self.inner_radius
    }

    /// Extremal point along the up axis.
    #[must_use]
    pub fn highest_point(&self) -> Vec3<T> {
        self.position + up_axis() * self.outer_radius
    }

    /// Extremal point along the down axis.
    #[must_use]
    pub fn lowest_point(&self) -> Vec3<T> {
        self.position - up_axis() * self.outer_radius
    }

    /// Closed-region membership: distance from the center lies in
    /// `[inner_radius, outer_radius]`.
    #[must_use]
    pub fn is_point_within(&self, point: &Vec3<T>) -> bool {
        let distance_sq = (point - self.position).norm_squared();
        distance_sq >= self.inner_radius * self.inner_radius
            && distance_sq <= self.outer_radius * self.outer_radius
    }

    /// True when the distance band `[min_distance, max_distance]`, measured
    /// from this shell's center, overlaps the shell material. This is the
    /// shell-intersection rule shared by every shape pairing: a connected
    /// shape whose center distances span that band touches the shell iff the
    /// band meets `[inner_radius, outer_radius]`.
    #[must_use]
    pub fn distance_band_overlaps_shell(&self, min_distance: T, max_distance: T) -> bool {
        min_distance <= self.outer_radius && max_distance >= self.inner_radius
    }

    /// Copy of this shell at a new position.
    #[must_use]
    pub fn with_position(&self, position: Vec3<T>) -> Self {
        Self::new(self.inner_radius, self.outer_radius, position)
    }

    /// Copy with a rotation applied; a no-op for a shell.
    #[must_use]
    pub fn with_rotation(&self, _rotation: Quat<T>) -> Self {
        *self
    }

    /// Scale both radii by `factor`.
    ///
    /// # Errors
    /// Returns [`ShapeError::NegativeScaleFactor`] when `factor < 0`.
    pub fn scale_by_dimension(&self, factor: T) -> Result<Self, ShapeError> {
        validate_scale_factor(factor)?;
        Ok(Self::new(
            self.inner_radius * factor,
            self.outer_radius * factor,
            self.position,
        ))
    }

    /// Scale the volume by `factor`, i.e. both radii by `factor^(1/3)`.
    /// A zero factor produces a degenerate zero-radius shell.
    ///
    /// # Errors
    /// Returns [`ShapeError::NegativeScaleFactor`] when `factor < 0`.
    pub fn scale_volume(&self, factor: T) -> Result<Self, ShapeError> {
        validate_scale_factor(factor)?;
        if factor == T::zero() {
            return Ok(Self::new(T::zero(), T::zero(), self.position));
        }
        let linear = cube_root(factor);
        Ok(Self::new(
            self.inner_radius * linear,
            self.outer_radius * linear,
            self.position,
        ))
    }
}

impl<T: RealField + Copy> PartialEq for HollowSphere<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner_radius == other.inner_radius
            && self.outer_radius == other.outer_radius
            && self.position == other.position
    }
}
