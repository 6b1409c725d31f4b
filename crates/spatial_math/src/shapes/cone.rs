//! Solid cone: apex at `position`, base circle at `position + axis`.

use serde::{Deserialize, Serialize};

use crate::error::ShapeError;
use crate::foundation::math::{perpendicular_to, tolerance, up_axis, Quat, RealField, Vec3};
use crate::shapes::{cube_root, validate_scale_factor};

/// A solid right circular cone. The apex sits at `position`; the base circle
/// of the given `radius` lies in the plane through `position + axis`,
/// perpendicular to `axis`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Cone<T: RealField + Copy> {
    axis: Vec3<T>,
    radius: T,
    position: Vec3<T>,
    length: T,
    containing_radius: T,
    volume: T,
}

impl<T: RealField + Copy> Cone<T> {
    /// Create a cone with the given `axis` (direction and length), base
    /// `radius`, and apex `position`.
    ///
    /// `radius` must be non-negative; a zero-length axis or zero radius
    /// yields a valid degenerate cone.
    #[must_use]
    pub fn new(axis: Vec3<T>, radius: T, position: Vec3<T>) -> Self {
        debug_assert!(radius >= T::zero(), "cone radius must be non-negative");
        let length = axis.norm();
        let third: T = nalgebra::convert(1.0 / 3.0);
        Self {
            axis,
            radius,
            position,
            length,
            containing_radius: (length * length + radius * radius).sqrt(),
            volume: T::pi() * radius * radius * length * third,
        }
    }

    /// Axis vector (direction and length) from apex to base center.
    #[must_use]
    pub fn axis(&self) -> Vec3<T> {
        self.axis
    }

    /// Base circle radius.
    #[must_use]
    pub fn radius(&self) -> T {
        self.radius
    }

    /// Apex position.
    #[must_use]
    pub fn position(&self) -> Vec3<T> {
        self.position
    }

    /// Axis length (cone height).
    #[must_use]
    pub fn length(&self) -> T {
        self.length
    }

    /// Center of the base circle.
    #[must_use]
    pub fn base_center(&self) -> Vec3<T> {
        self.position + self.axis
    }

    /// Unit axis direction, or `None` for a degenerate zero-length axis.
    #[must_use]
    pub fn axis_direction(&self) -> Option<Vec3<T>> {
        if tolerance::is_nearly_zero(self.length) {
            None
        } else {
            Some(self.axis / self.length)
        }
    }

    /// Squared cosine of the half-angle between the axis and the lateral
    /// surface: `len² / (len² + r²)`. One for a degenerate needle or point.
    #[must_use]
    pub fn half_angle_cos_squared(&self) -> T {
        let len_sq = self.length * self.length;
        let denom = len_sq + self.radius * self.radius;
        if tolerance::is_nearly_zero(denom) {
            T::one()
        } else {
            len_sq / denom
        }
    }

    /// Orientation; the identity, since a cone's orientation is carried by
    /// its axis vector.
    #[must_use]
    pub fn rotation(&self) -> Quat<T> {
        Quat::identity()
    }

    /// Radius of the sphere around the apex enclosing the whole cone:
    /// the distance from the apex to the base rim.
    #[must_use]
    pub fn containing_radius(&self) -> T {
        self.containing_radius
    }

    /// Enclosed volume.
    #[must_use]
    pub fn volume(&self) -> T {
        self.volume
    }

    /// Smallest linear extent: the lesser of base diameter and height.
    #[must_use]
    pub fn smallest_dimension(&self) -> T {
        (self.radius + self.radius).min(self.length)
    }

    /// Extremal point along the up axis.
    #[must_use]
    pub fn highest_point(&self) -> Vec3<T> {
        let rim = self.base_rim_extreme(up_axis());
        if self.position.y >= rim.y {
            self.position
        } else {
            rim
        }
    }

    /// Extremal point along the down axis.
    #[must_use]
    pub fn lowest_point(&self) -> Vec3<T> {
        let rim = self.base_rim_extreme(-up_axis());
        if self.position.y <= rim.y {
            self.position
        } else {
            rim
        }
    }

    /// Point of the base rim extremal along `direction`. The extremes of the
    /// solid cone lie on the apex or the base rim, so this supports the
    /// highest/lowest queries.
    fn base_rim_extreme(&self, direction: Vec3<T>) -> Vec3<T> {
        let base = self.base_center();
        let Some(dir) = self.axis_direction() else {
            return base;
        };
        let in_plane = direction - dir * direction.dot(&dir);
        let norm = in_plane.norm();
        if tolerance::is_nearly_zero(norm) {
            // Base circle is perpendicular to the query direction; every rim
            // point is extremal, pick any.
            let perp = perpendicular_to(&dir);
            return base + perp * self.radius;
        }
        base + in_plane * (self.radius / norm)
    }

    /// Closed-region membership: height along the axis in `[0, length]` and
    /// radial offset within the linearly shrinking local radius.
    #[must_use]
    pub fn is_point_within(&self, point: &Vec3<T>) -> bool {
        let Some(dir) = self.axis_direction() else {
            // Degenerate cone: a point at the apex.
            return tolerance::is_nearly_zero((point - self.position).norm());
        };
        let offset = point - self.position;
        let height = offset.dot(&dir);
        if height < T::zero() || height > self.length {
            return false;
        }
        let radial_sq = (offset - dir * height).norm_squared();
        let local_radius = self.radius * height / self.length;
        radial_sq <= local_radius * local_radius
    }

    /// Minimum distance from `point` to the solid cone; zero for contained
    /// points. Works in the 2D axial cross-section: the solid is the triangle
    /// with vertices (0,0), (len,0), (len,r) in (height, radial) coordinates,
    /// and exterior distance is attained on the slant or base edge.
    #[must_use]
    pub fn distance_to_point(&self, point: &Vec3<T>) -> T {
        let Some(dir) = self.axis_direction() else {
            return (point - self.position).norm();
        };
        let offset = point - self.position;
        let height = offset.dot(&dir);
        let radial = (offset - dir * height).norm();
        if self.is_point_within(point) {
            return T::zero();
        }
        let slant = point_segment_distance_2d(
            height,
            radial,
            T::zero(),
            T::zero(),
            self.length,
            self.radius,
        );
        let base = point_segment_distance_2d(
            height,
            radial,
            self.length,
            T::zero(),
            self.length,
            self.radius,
        );
        slant.min(base)
    }

    /// Maximum distance from `point` to any point of the cone; attained at
    /// the apex or on the base rim.
    #[must_use]
    pub fn farthest_point_distance(&self, point: &Vec3<T>) -> T {
        let apex_distance = (self.position - point).norm();
        let Some(dir) = self.axis_direction() else {
            return apex_distance;
        };
        let to_base = point - self.base_center();
        let axial = to_base.dot(&dir);
        let radial = (to_base - dir * axial).norm();
        let rim_reach = radial + self.radius;
        let rim_distance = (axial * axial + rim_reach * rim_reach).sqrt();
        apex_distance.max(rim_distance)
    }

    /// Copy of this cone with its apex at a new position.
    #[must_use]
    pub fn with_position(&self, position: Vec3<T>) -> Self {
        Self::new(self.axis, self.radius, position)
    }

    /// Copy with the axis vector rotated by `rotation`.
    #[must_use]
    pub fn with_rotation(&self, rotation: Quat<T>) -> Self {
        Self::new(rotation.transform_vector(&self.axis), self.radius, self.position)
    }

    /// Scale the axis and base radius by `factor`.
    ///
    /// # Errors
    /// Returns [`ShapeError::NegativeScaleFactor`] when `factor < 0`.
    pub fn scale_by_dimension(&self, factor: T) -> Result<Self, ShapeError> {
        validate_scale_factor(factor)?;
        Ok(Self::new(self.axis * factor, self.radius * factor, self.position))
    }

    /// Scale the volume by `factor`, i.e. axis and radius by `factor^(1/3)`.
    /// A zero factor produces a degenerate point-like cone at the apex.
    ///
    /// # Errors
    /// Returns [`ShapeError::NegativeScaleFactor`] when `factor < 0`.
    pub fn scale_volume(&self, factor: T) -> Result<Self, ShapeError> {
        validate_scale_factor(factor)?;
        if factor == T::zero() {
            return Ok(Self::new(Vec3::zeros(), T::zero(), self.position));
        }
        let linear = cube_root(factor);
        Ok(Self::new(self.axis * linear, self.radius * linear, self.position))
    }
}

impl<T: RealField + Copy> PartialEq for Cone<T> {
    fn eq(&self, other: &Self) -> bool {
        self.axis == other.axis
            && self.radius == other.radius
            && self.position == other.position
    }
}

/// Distance from the 2D point `(px, py)` to the segment from `(ax, ay)` to
/// `(bx, by)`.
fn point_segment_distance_2d<T: RealField + Copy>(
    px: T,
    py: T,
    ax: T,
    ay: T,
    bx: T,
    by: T,
) -> T {
    let dx = bx - ax;
    let dy = by - ay;
    let len_sq = dx * dx + dy * dy;
    let t = if tolerance::is_nearly_zero(len_sq) {
        T::zero()
    } else {
        (((px - ax) * dx + (py - ay) * dy) / len_sq).clamp(T::zero(), T::one())
    };
    let cx = ax + dx * t - px;
    let cy = ay + dy * t - py;
    (cx * cx + cy * cy).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f64 = 1.0e-12;

    fn unit_cone() -> Cone<f64> {
        // Apex at origin, opening along +Y to a base of radius 1 at y = 2.
        Cone::new(Vec3::new(0.0, 2.0, 0.0), 1.0, Vec3::zeros())
    }

    #[test]
    fn test_cone_volume() {
        let cone = unit_cone();
        let expected = std::f64::consts::PI * 1.0 * 2.0 / 3.0;
        assert_relative_eq!(cone.volume(), expected, epsilon = EPSILON);
    }

    #[test]
    fn test_containing_radius_reaches_rim() {
        let cone = unit_cone();
        assert_relative_eq!(cone.containing_radius(), 5.0_f64.sqrt(), epsilon = EPSILON);
    }

    #[test]
    fn test_point_membership() {
        let cone = unit_cone();
        assert!(cone.is_point_within(&Vec3::new(0.0, 0.0, 0.0)));
        assert!(cone.is_point_within(&Vec3::new(0.0, 1.0, 0.0)));
        // At height 1 the local radius is 0.5.
        assert!(cone.is_point_within(&Vec3::new(0.5, 1.0, 0.0)));
        assert!(!cone.is_point_within(&Vec3::new(0.6, 1.0, 0.0)));
        // Base rim is inside, beyond the base plane is not.
        assert!(cone.is_point_within(&Vec3::new(1.0, 2.0, 0.0)));
        assert!(!cone.is_point_within(&Vec3::new(0.0, 2.1, 0.0)));
        assert!(!cone.is_point_within(&Vec3::new(0.0, -0.1, 0.0)));
    }

    #[test]
    fn test_distance_to_point() {
        let cone = unit_cone();
        assert_relative_eq!(cone.distance_to_point(&Vec3::new(0.0, 1.0, 0.0)), 0.0, epsilon = EPSILON);
        // Directly below the apex.
        assert_relative_eq!(cone.distance_to_point(&Vec3::new(0.0, -1.0, 0.0)), 1.0, epsilon = EPSILON);
        // Directly above the base center.
        assert_relative_eq!(cone.distance_to_point(&Vec3::new(0.0, 3.0, 0.0)), 1.0, epsilon = EPSILON);
        // Sideways from the base rim.
        assert_relative_eq!(cone.distance_to_point(&Vec3::new(3.0, 2.0, 0.0)), 2.0, epsilon = EPSILON);
    }

    #[test]
    fn test_farthest_point_distance() {
        let cone = unit_cone();
        // From the apex the farthest point is the base rim.
        assert_relative_eq!(
            cone.farthest_point_distance(&Vec3::zeros()),
            5.0_f64.sqrt(),
            epsilon = EPSILON
        );
        // From far below the apex, still the rim.
        assert_relative_eq!(
            cone.farthest_point_distance(&Vec3::new(0.0, -2.0, 0.0)),
            (16.0_f64 + 1.0).sqrt(),
            epsilon = EPSILON
        );
    }

    #[test]
    fn test_highest_and_lowest_points() {
        let cone = unit_cone();
        let high = cone.highest_point();
        let low = cone.lowest_point();
        assert_relative_eq!(high.y, 2.0, epsilon = EPSILON);
        assert_relative_eq!(low.y, 0.0, epsilon = EPSILON);

        // Sideways cone: the rim reaches above the apex.
        let sideways = Cone::new(Vec3::new(2.0, 0.0, 0.0), 1.0, Vec3::zeros());
        assert_relative_eq!(sideways.highest_point().y, 1.0, epsilon = EPSILON);
        assert_relative_eq!(sideways.lowest_point().y, -1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_degenerate_cone_is_a_point() {
        let cone = Cone::new(Vec3::zeros(), 0.0_f64, Vec3::new(1.0, 1.0, 1.0));
        assert!(cone.is_point_within(&Vec3::new(1.0, 1.0, 1.0)));
        assert!(!cone.is_point_within(&Vec3::new(1.0, 1.0, 2.0)));
        assert_relative_eq!(cone.distance_to_point(&Vec3::new(1.0, 1.0, 3.0)), 2.0, epsilon = EPSILON);
    }

    #[test]
    fn test_scale_volume_cube_root_law() {
        let cone = unit_cone();
        let scaled = cone.scale_volume(27.0).unwrap();
        assert_relative_eq!(scaled.length(), 6.0, epsilon = 1.0e-9);
        assert_relative_eq!(scaled.radius(), 3.0, epsilon = 1.0e-9);
        assert_relative_eq!(scaled.volume(), cone.volume() * 27.0, epsilon = 1.0e-9);
    }
}
