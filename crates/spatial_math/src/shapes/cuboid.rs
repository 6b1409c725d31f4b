//! Oriented cuboid (box) with full-extent axes and a unit-quaternion
//! orientation. The eight corners are precomputed at construction, ordered so
//! consecutive corners (including the wraparound) are joined by box edges.

use serde::{Deserialize, Serialize};

use crate::error::ShapeError;
use crate::foundation::math::{Quat, RealField, Vec3};
use crate::shapes::{cube_root, validate_scale_factor};

/// Corner sign pattern forming a closed edge cycle over the box graph:
/// each consecutive pair (and the final wraparound) differs in exactly one
/// coordinate.
const CORNER_CYCLE: [[f64; 3]; 8] = [
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, 1.0, 1.0],
    [1.0, 1.0, 1.0],
    [1.0, -1.0, 1.0],
    [-1.0, -1.0, 1.0],
];

/// A solid oriented box described by full extents along its three local axes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cuboid<T: RealField + Copy> {
    extents: Vec3<T>,
    position: Vec3<T>,
    rotation: Quat<T>,
    corners: [Vec3<T>; 8],
    containing_radius: T,
    volume: T,
}

impl<T: RealField + Copy> Cuboid<T> {
    /// Create a box with the given full `extents`, centered at `position`
    /// with orientation `rotation`.
    ///
    /// All extents must be non-negative; zero extents yield a valid
    /// degenerate box.
    #[must_use]
    pub fn new(extents: Vec3<T>, position: Vec3<T>, rotation: Quat<T>) -> Self {
        debug_assert!(
            extents.x >= T::zero() && extents.y >= T::zero() && extents.z >= T::zero(),
            "cuboid extents must be non-negative"
        );
        let half: T = nalgebra::convert(0.5);
        let half_extents = extents * half;
        let corners = std::array::from_fn(|i| {
            let signs = CORNER_CYCLE[i];
            let local = Vec3::new(
                half_extents.x * nalgebra::convert(signs[0]),
                half_extents.y * nalgebra::convert(signs[1]),
                half_extents.z * nalgebra::convert(signs[2]),
            );
            position + rotation.transform_vector(&local)
        });
        Self {
            extents,
            position,
            rotation,
            corners,
            containing_radius: half_extents.norm(),
            volume: extents.x * extents.y * extents.z,
        }
    }

    /// Axis-aligned box constructor: identity rotation.
    #[must_use]
    pub fn axis_aligned(extents: Vec3<T>, position: Vec3<T>) -> Self {
        Self::new(extents, position, Quat::identity())
    }

    /// Full extent along the local X axis.
    #[must_use]
    pub fn axis_x(&self) -> T {
        self.extents.x
    }

    /// Full extent along the local Y axis.
    #[must_use]
    pub fn axis_y(&self) -> T {
        self.extents.y
    }

    /// Full extent along the local Z axis.
    #[must_use]
    pub fn axis_z(&self) -> T {
        self.extents.z
    }

    /// Full extents as a vector.
    #[must_use]
    pub fn extents(&self) -> Vec3<T> {
        self.extents
    }

    /// Half extents as a vector.
    #[must_use]
    pub fn half_extents(&self) -> Vec3<T> {
        self.extents * nalgebra::convert::<f64, T>(0.5)
    }

    /// Center position.
    #[must_use]
    pub fn position(&self) -> Vec3<T> {
        self.position
    }

    /// Box orientation.
    #[must_use]
    pub fn rotation(&self) -> Quat<T> {
        self.rotation
    }

    /// The eight world-space corners, ordered as an edge cycle: consecutive
    /// corners (including the wraparound pair) are joined by box edges.
    #[must_use]
    pub fn corners(&self) -> &[Vec3<T>; 8] {
        &self.corners
    }

    /// Radius of the enclosing sphere; half the main diagonal.
    #[must_use]
    pub fn containing_radius(&self) -> T {
        self.containing_radius
    }

    /// Enclosed volume.
    #[must_use]
    pub fn volume(&self) -> T {
        self.volume
    }

    /// Smallest of the three full extents.
    #[must_use]
    pub fn smallest_dimension(&self) -> T {
        self.extents.x.min(self.extents.y).min(self.extents.z)
    }

    /// Corner with the greatest up-axis coordinate.
    #[must_use]
    pub fn highest_point(&self) -> Vec3<T> {
        let mut best = self.corners[0];
        for corner in &self.corners[1..] {
            if corner.y > best.y {
                best = *corner;
            }
        }
        best
    }

    /// Corner with the least up-axis coordinate.
    #[must_use]
    pub fn lowest_point(&self) -> Vec3<T> {
        let mut best = self.corners[0];
        for corner in &self.corners[1..] {
            if corner.y < best.y {
                best = *corner;
            }
        }
        best
    }

    /// Express a world-space point in the box's local frame (center at the
    /// origin, axes aligned with the local extents).
    #[must_use]
    pub fn to_local(&self, point: &Vec3<T>) -> Vec3<T> {
        self.rotation.inverse_transform_vector(&(point - self.position))
    }

    /// Express a world-space direction in the box's local frame.
    #[must_use]
    pub fn to_local_vector(&self, vector: &Vec3<T>) -> Vec3<T> {
        self.rotation.inverse_transform_vector(vector)
    }

    /// Closed-region membership: transform into the local frame and test each
    /// coordinate against the half extent.
    #[must_use]
    pub fn is_point_within(&self, point: &Vec3<T>) -> bool {
        let local = self.to_local(point);
        let half = self.half_extents();
        local.x.abs() <= half.x && local.y.abs() <= half.y && local.z.abs() <= half.z
    }

    /// Minimum distance from a world-space point to this box (Arvo: clamp
    /// each local coordinate independently). Zero for contained points.
    #[must_use]
    pub fn distance_to_point(&self, point: &Vec3<T>) -> T {
        let local = self.to_local(point);
        let half = self.half_extents();
        let clamped = Vec3::new(
            local.x.clamp(-half.x, half.x),
            local.y.clamp(-half.y, half.y),
            local.z.clamp(-half.z, half.z),
        );
        (local - clamped).norm()
    }

    /// Maximum distance from a world-space point to any point of this box;
    /// attained at the corner farthest per local axis.
    #[must_use]
    pub fn farthest_point_distance(&self, point: &Vec3<T>) -> T {
        let local = self.to_local(point);
        let half = self.half_extents();
        let spread = Vec3::new(
            local.x.abs() + half.x,
            local.y.abs() + half.y,
            local.z.abs() + half.z,
        );
        spread.norm()
    }

    /// Copy of this box at a new position.
    #[must_use]
    pub fn with_position(&self, position: Vec3<T>) -> Self {
        Self::new(self.extents, position, self.rotation)
    }

    /// Copy of this box with a new orientation.
    #[must_use]
    pub fn with_rotation(&self, rotation: Quat<T>) -> Self {
        Self::new(self.extents, self.position, rotation)
    }

    /// Scale all three extents by `factor`.
    ///
    /// # Errors
    /// Returns [`ShapeError::NegativeScaleFactor`] when `factor < 0`.
    pub fn scale_by_dimension(&self, factor: T) -> Result<Self, ShapeError> {
        validate_scale_factor(factor)?;
        Ok(Self::new(self.extents * factor, self.position, self.rotation))
    }

    /// Scale the volume by `factor`, i.e. each extent by `factor^(1/3)`.
    /// A zero factor produces a degenerate zero-extent box.
    ///
    /// # Errors
    /// Returns [`ShapeError::NegativeScaleFactor`] when `factor < 0`.
    pub fn scale_volume(&self, factor: T) -> Result<Self, ShapeError> {
        validate_scale_factor(factor)?;
        if factor == T::zero() {
            return Ok(Self::new(Vec3::zeros(), self.position, self.rotation));
        }
        Ok(Self::new(
            self.extents * cube_root(factor),
            self.position,
            self.rotation,
        ))
    }
}

impl<T: RealField + Copy> PartialEq for Cuboid<T> {
    fn eq(&self, other: &Self) -> bool {
        self.extents == other.extents
            && self.position == other.position
            && self.rotation == other.rotation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f64 = 1.0e-12;

    fn unit_cube() -> Cuboid<f64> {
        Cuboid::axis_aligned(Vec3::new(2.0, 2.0, 2.0), Vec3::zeros())
    }

    #[test]
    fn test_corner_cycle_forms_edges() {
        // Consecutive corners (with wraparound) must differ in exactly one
        // coordinate, i.e. be joined by a box edge.
        let cube = unit_cube();
        let corners = cube.corners();
        for i in 0..8 {
            let a = corners[i];
            let b = corners[(i + 1) % 8];
            let diff = b - a;
            let changed = [diff.x, diff.y, diff.z]
                .iter()
                .filter(|d| d.abs() > 1.0e-9)
                .count();
            assert_eq!(changed, 1, "corners {i} and {} are not edge-adjacent", (i + 1) % 8);
        }
    }

    #[test]
    fn test_point_membership_axis_aligned() {
        let cube = unit_cube();
        assert!(cube.is_point_within(&Vec3::new(0.5, 0.5, 0.5)));
        assert!(cube.is_point_within(&Vec3::new(1.0, 1.0, 1.0)));
        assert!(!cube.is_point_within(&Vec3::new(1.5, 0.0, 0.0)));
    }

    #[test]
    fn test_point_membership_rotated() {
        // Cube rotated 45 degrees about Z: the world X axis now pierces an
        // edge, so points past the half-extent along X but inside the
        // diagonal remain within.
        let rotation = Quat::from_axis_angle(&Vec3::z_axis(), std::f64::consts::FRAC_PI_4);
        let cube = Cuboid::new(Vec3::new(2.0, 2.0, 2.0), Vec3::zeros(), rotation);
        assert!(cube.is_point_within(&Vec3::new(1.2, 0.0, 0.0)));
        assert!(!cube.is_point_within(&Vec3::new(1.2, 1.2, 0.0)));
    }

    #[test]
    fn test_containing_radius_is_half_diagonal() {
        let cube = unit_cube();
        assert_relative_eq!(cube.containing_radius(), 3.0_f64.sqrt(), epsilon = EPSILON);
    }

    #[test]
    fn test_distance_to_point_arvo() {
        let cube = unit_cube();
        assert_relative_eq!(cube.distance_to_point(&Vec3::new(0.5, 0.0, 0.0)), 0.0, epsilon = EPSILON);
        assert_relative_eq!(cube.distance_to_point(&Vec3::new(3.0, 0.0, 0.0)), 2.0, epsilon = EPSILON);
        assert_relative_eq!(
            cube.distance_to_point(&Vec3::new(2.0, 2.0, 0.0)),
            2.0_f64.sqrt(),
            epsilon = EPSILON
        );
    }

    #[test]
    fn test_farthest_point_distance() {
        let cube = unit_cube();
        // From the center, the farthest points are the corners.
        assert_relative_eq!(
            cube.farthest_point_distance(&Vec3::zeros()),
            3.0_f64.sqrt(),
            epsilon = EPSILON
        );
        // From (3,0,0) the farthest corner is at (-1, ±1, ±1).
        assert_relative_eq!(
            cube.farthest_point_distance(&Vec3::new(3.0, 0.0, 0.0)),
            18.0_f64.sqrt(),
            epsilon = EPSILON
        );
    }

    #[test]
    fn test_volume_and_smallest_dimension() {
        let cuboid = Cuboid::axis_aligned(Vec3::new(1.0, 2.0, 3.0), Vec3::zeros());
        assert_relative_eq!(cuboid.volume(), 6.0, epsilon = EPSILON);
        assert_relative_eq!(cuboid.smallest_dimension(), 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_scale_volume_cube_root_law() {
        let cuboid = Cuboid::axis_aligned(Vec3::new(1.0, 2.0, 3.0), Vec3::zeros());
        let scaled = cuboid.scale_volume(8.0).unwrap();
        assert_relative_eq!(scaled.axis_x(), 2.0, epsilon = 1.0e-9);
        assert_relative_eq!(scaled.axis_y(), 4.0, epsilon = 1.0e-9);
        assert_relative_eq!(scaled.axis_z(), 6.0, epsilon = 1.0e-9);
        assert_relative_eq!(scaled.volume(), cuboid.volume() * 8.0, epsilon = 1.0e-9);
    }

    #[test]
    fn test_equality_ignores_derived_fields() {
        let a = Cuboid::axis_aligned(Vec3::new(1.0, 1.0, 1.0), Vec3::zeros());
        let b = Cuboid::axis_aligned(Vec3::new(1.0, 1.0, 1.0), Vec3::zeros());
        assert_eq!(a, b);
        assert_ne!(a, a.with_position(Vec3::new(1.0, 0.0, 0.0)));
    }
}
