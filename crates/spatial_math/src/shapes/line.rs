//! Finite line segment.

use serde::{Deserialize, Serialize};

use crate::distance::{point_segment_distance, segment_segment_distance, SegmentDistance};
use crate::error::ShapeError;
use crate::foundation::math::{tolerance, Quat, RealField, Vec3};
use crate::shapes::{cube_root, validate_scale_factor};

/// A finite segment stored as a direction-and-length vector (`path`) plus its
/// midpoint (`position`). The endpoints are derived once at construction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Line<T: RealField + Copy> {
    path: Vec3<T>,
    position: Vec3<T>,
    start: Vec3<T>,
    end: Vec3<T>,
    length: T,
}

impl<T: RealField + Copy> Line<T> {
    /// Create a segment with the given `path` vector centered on `position`.
    ///
    /// The endpoints are `position ± path / 2`; a zero-length path yields a
    /// valid degenerate segment.
    #[must_use]
    pub fn new(path: Vec3<T>, position: Vec3<T>) -> Self {
        let half: T = nalgebra::convert(0.5);
        let half_path = path * half;
        Self {
            path,
            position,
            start: position - half_path,
            end: position + half_path,
            length: path.norm(),
        }
    }

    /// Create a segment from its two endpoints.
    #[must_use]
    pub fn from_endpoints(start: Vec3<T>, end: Vec3<T>) -> Self {
        let half: T = nalgebra::convert(0.5);
        Self::new(end - start, (start + end) * half)
    }

    /// Direction-and-length vector of the segment.
    #[must_use]
    pub fn path(&self) -> Vec3<T> {
        self.path
    }

    /// Midpoint of the segment.
    #[must_use]
    pub fn position(&self) -> Vec3<T> {
        self.position
    }

    /// First endpoint.
    #[must_use]
    pub fn start(&self) -> Vec3<T> {
        self.start
    }

    /// Second endpoint.
    #[must_use]
    pub fn end(&self) -> Vec3<T> {
        self.end
    }

    /// Segment length.
    #[must_use]
    pub fn length(&self) -> T {
        self.length
    }

    /// Orientation; the identity, since a segment's orientation is carried by
    /// its path vector.
    #[must_use]
    pub fn rotation(&self) -> Quat<T> {
        Quat::identity()
    }

    /// Radius of the enclosing sphere; half the segment length.
    #[must_use]
    pub fn containing_radius(&self) -> T {
        self.length * nalgebra::convert(0.5)
    }

    /// Enclosed volume; zero for a segment.
    #[must_use]
    pub fn volume(&self) -> T {
        T::zero()
    }

    /// Smallest linear extent; zero (a segment has no cross-section).
    #[must_use]
    pub fn smallest_dimension(&self) -> T {
        T::zero()
    }

    /// Endpoint with the greater up-axis coordinate.
    #[must_use]
    pub fn highest_point(&self) -> Vec3<T> {
        if self.start.y >= self.end.y {
            self.start
        } else {
            self.end
        }
    }

    /// Endpoint with the lesser up-axis coordinate.
    #[must_use]
    pub fn lowest_point(&self) -> Vec3<T> {
        if self.start.y <= self.end.y {
            self.start
        } else {
            self.end
        }
    }

    /// Distance from `point` to the segment, along with the closest point on
    /// the segment.
    #[must_use]
    pub fn distance_to_point(&self, point: &Vec3<T>) -> (T, Vec3<T>) {
        point_segment_distance(point, &self.start, &self.end)
    }

    /// Closest points between this segment and `other`. Exact for parallel
    /// and degenerate segments.
    #[must_use]
    pub fn distance_to_line(&self, other: &Self) -> SegmentDistance<T> {
        segment_segment_distance(&self.start, &self.end, &other.start, &other.end)
    }

    /// Membership test: true when `point` lies on the segment within the
    /// shared tolerance.
    #[must_use]
    pub fn is_point_within(&self, point: &Vec3<T>) -> bool {
        tolerance::is_nearly_zero(self.distance_to_point(point).0)
    }

    /// Copy of this segment centered at a new midpoint.
    #[must_use]
    pub fn with_position(&self, position: Vec3<T>) -> Self {
        Self::new(self.path, position)
    }

    /// Copy with the path vector rotated by `rotation`.
    #[must_use]
    pub fn with_rotation(&self, rotation: Quat<T>) -> Self {
        Self::new(rotation.transform_vector(&self.path), self.position)
    }

    /// Scale the path vector by `factor`; the midpoint is unchanged.
    ///
    /// # Errors
    /// Returns [`ShapeError::NegativeScaleFactor`] when `factor < 0`.
    pub fn scale_by_dimension(&self, factor: T) -> Result<Self, ShapeError> {
        validate_scale_factor(factor)?;
        Ok(Self::new(self.path * factor, self.position))
    }

    /// Scale the volume by `factor`. A segment has no volume, so the path is
    /// scaled by `factor^(1/3)` for consistency with the other shapes; a zero
    /// factor collapses the segment to its midpoint.
    ///
    /// # Errors
    /// Returns [`ShapeError::NegativeScaleFactor`] when `factor < 0`.
    pub fn scale_volume(&self, factor: T) -> Result<Self, ShapeError> {
        validate_scale_factor(factor)?;
        if factor == T::zero() {
            return Ok(Self::new(Vec3::zeros(), self.position));
        }
        Ok(Self::new(self.path * cube_root(factor), self.position))
    }
}

impl<T: RealField + Copy> PartialEq for Line<T> {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path && self.position == other.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f64 = 1.0e-12;

    #[test]
    fn test_endpoints_derived_from_midpoint() {
        let line = Line::new(Vec3::new(2.0_f64, 0.0, 0.0), Vec3::new(1.0, 1.0, 0.0));
        assert_relative_eq!(line.start(), Vec3::new(0.0, 1.0, 0.0), epsilon = EPSILON);
        assert_relative_eq!(line.end(), Vec3::new(2.0, 1.0, 0.0), epsilon = EPSILON);
        assert_relative_eq!(line.length(), 2.0, epsilon = EPSILON);
        assert_relative_eq!(line.containing_radius(), 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_from_endpoints_round_trip() {
        let line = Line::from_endpoints(Vec3::new(1.0_f64, 2.0, 3.0), Vec3::new(3.0, 2.0, 3.0));
        assert_relative_eq!(line.position(), Vec3::new(2.0, 2.0, 3.0), epsilon = EPSILON);
        assert_relative_eq!(line.path(), Vec3::new(2.0, 0.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_distance_to_point_clamps() {
        let line = Line::from_endpoints(Vec3::new(0.0_f64, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        let (distance, closest) = line.distance_to_point(&Vec3::new(3.0, 0.0, 0.0));
        assert_relative_eq!(distance, 2.0, epsilon = EPSILON);
        assert_relative_eq!(closest, Vec3::new(1.0, 0.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_point_membership_on_segment() {
        let line = Line::from_endpoints(Vec3::new(0.0_f64, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        assert!(line.is_point_within(&Vec3::new(0.5, 0.0, 0.0)));
        assert!(line.is_point_within(&Vec3::new(1.0, 0.0, 0.0)));
        assert!(!line.is_point_within(&Vec3::new(1.5, 0.0, 0.0)));
        assert!(!line.is_point_within(&Vec3::new(0.5, 0.5, 0.0)));
    }

    #[test]
    fn test_highest_and_lowest_points() {
        let line = Line::from_endpoints(Vec3::new(0.0_f64, -1.0, 0.0), Vec3::new(0.0, 2.0, 0.0));
        assert_relative_eq!(line.highest_point(), Vec3::new(0.0, 2.0, 0.0), epsilon = EPSILON);
        assert_relative_eq!(line.lowest_point(), Vec3::new(0.0, -1.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_rotation_turns_path() {
        let line = Line::new(Vec3::new(2.0_f64, 0.0, 0.0), Vec3::zeros());
        let quarter_turn = Quat::from_axis_angle(&Vec3::z_axis(), std::f64::consts::FRAC_PI_2);
        let rotated = line.with_rotation(quarter_turn);
        assert_relative_eq!(rotated.path(), Vec3::new(0.0, 2.0, 0.0), epsilon = 1.0e-9);
        assert_relative_eq!(rotated.position(), line.position(), epsilon = EPSILON);
    }

    #[test]
    fn test_degenerate_segment_queries() {
        let line = Line::new(Vec3::zeros(), Vec3::new(1.0_f64, 1.0, 1.0));
        let (distance, closest) = line.distance_to_point(&Vec3::new(1.0, 1.0, 2.0));
        assert_relative_eq!(distance, 1.0, epsilon = EPSILON);
        assert_relative_eq!(closest, Vec3::new(1.0, 1.0, 1.0), epsilon = EPSILON);
    }
}
