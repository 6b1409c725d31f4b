//! Shape model: six immutable solid variants behind one closed enum.
//!
//! Every variant precomputes its derived invariants (containing radius,
//! volume, extremal points) at construction, so queries never mutate state
//! and instances are freely shared across threads.

use serde::{Deserialize, Serialize};

use crate::error::ShapeError;
use crate::foundation::math::{Quat, RealField, Vec3};
use crate::intersect;

mod cone;
mod cuboid;
mod hollow_sphere;
mod line;
mod point;
mod sphere;

pub use cone::Cone;
pub use cuboid::Cuboid;
pub use hollow_sphere::HollowSphere;
pub use line::Line;
pub use point::SinglePoint;
pub use sphere::Sphere;

/// Closed tag identifying a shape variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    /// Zero-extent point.
    Point,
    /// Finite line segment.
    Line,
    /// Solid sphere.
    Sphere,
    /// Annular shell between two concentric spheres.
    HollowSphere,
    /// Oriented box.
    Cuboid,
    /// Solid right circular cone.
    Cone,
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Point => "point",
            Self::Line => "line",
            Self::Sphere => "sphere",
            Self::HollowSphere => "hollow sphere",
            Self::Cuboid => "cuboid",
            Self::Cone => "cone",
        };
        f.write_str(name)
    }
}

/// The closed set of solid shapes.
///
/// Intersection dispatch runs through a single exhaustive match over
/// unordered variant pairs, which makes `a.intersects(&b)` symmetric by
/// construction: both orders reach the same arm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape<T: RealField + Copy> {
    /// Zero-extent point.
    Point(SinglePoint<T>),
    /// Finite line segment.
    Line(Line<T>),
    /// Solid sphere.
    Sphere(Sphere<T>),
    /// Annular shell.
    HollowSphere(HollowSphere<T>),
    /// Oriented box.
    Cuboid(Cuboid<T>),
    /// Solid cone.
    Cone(Cone<T>),
}

impl<T: RealField + Copy> Shape<T> {
    /// Point shape at `position`.
    #[must_use]
    pub fn point(position: Vec3<T>) -> Self {
        Self::Point(SinglePoint::new(position))
    }

    /// Segment with the given path vector and midpoint.
    #[must_use]
    pub fn line(path: Vec3<T>, position: Vec3<T>) -> Self {
        Self::Line(Line::new(path, position))
    }

    /// Sphere with the given radius and center.
    #[must_use]
    pub fn sphere(radius: T, position: Vec3<T>) -> Self {
        Self::Sphere(Sphere::new(radius, position))
    }

    /// Shell with the given inner and outer radii and center.
    #[must_use]
    pub fn hollow_sphere(inner_radius: T, outer_radius: T, position: Vec3<T>) -> Self {
        Self::HollowSphere(HollowSphere::new(inner_radius, outer_radius, position))
    }

    /// Oriented box with the given full extents, center, and orientation.
    #[must_use]
    pub fn cuboid(extents: Vec3<T>, position: Vec3<T>, rotation: Quat<T>) -> Self {
        Self::Cuboid(Cuboid::new(extents, position, rotation))
    }

    /// Cone with the given axis, base radius, and apex position.
    #[must_use]
    pub fn cone(axis: Vec3<T>, radius: T, position: Vec3<T>) -> Self {
        Self::Cone(Cone::new(axis, radius, position))
    }

    /// The variant tag.
    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Point(_) => ShapeKind::Point,
            Self::Line(_) => ShapeKind::Line,
            Self::Sphere(_) => ShapeKind::Sphere,
            Self::HollowSphere(_) => ShapeKind::HollowSphere,
            Self::Cuboid(_) => ShapeKind::Cuboid,
            Self::Cone(_) => ShapeKind::Cone,
        }
    }

    /// Center position (segment midpoint for a line, apex for a cone).
    #[must_use]
    pub fn position(&self) -> Vec3<T> {
        match self {
            Self::Point(s) => s.position(),
            Self::Line(s) => s.position(),
            Self::Sphere(s) => s.position(),
            Self::HollowSphere(s) => s.position(),
            Self::Cuboid(s) => s.position(),
            Self::Cone(s) => s.position(),
        }
    }

    /// Orientation; the identity for every variant whose orientation is
    /// carried by a direction vector or meaningless.
    #[must_use]
    pub fn rotation(&self) -> Quat<T> {
        match self {
            Self::Point(s) => s.rotation(),
            Self::Line(s) => s.rotation(),
            Self::Sphere(s) => s.rotation(),
            Self::HollowSphere(s) => s.rotation(),
            Self::Cuboid(s) => s.rotation(),
            Self::Cone(s) => s.rotation(),
        }
    }

    /// Radius of a sphere centered at `position()` enclosing the shape;
    /// used for O(1) rejection ahead of the exact pair tests.
    #[must_use]
    pub fn containing_radius(&self) -> T {
        match self {
            Self::Point(s) => s.containing_radius(),
            Self::Line(s) => s.containing_radius(),
            Self::Sphere(s) => s.containing_radius(),
            Self::HollowSphere(s) => s.containing_radius(),
            Self::Cuboid(s) => s.containing_radius(),
            Self::Cone(s) => s.containing_radius(),
        }
    }

    /// Enclosed volume.
    #[must_use]
    pub fn volume(&self) -> T {
        match self {
            Self::Point(s) => s.volume(),
            Self::Line(s) => s.volume(),
            Self::Sphere(s) => s.volume(),
            Self::HollowSphere(s) => s.volume(),
            Self::Cuboid(s) => s.volume(),
            Self::Cone(s) => s.volume(),
        }
    }

    /// Smallest linear extent of the shape.
    #[must_use]
    pub fn smallest_dimension(&self) -> T {
        match self {
            Self::Point(s) => s.smallest_dimension(),
            Self::Line(s) => s.smallest_dimension(),
            Self::Sphere(s) => s.smallest_dimension(),
            Self::HollowSphere(s) => s.smallest_dimension(),
            Self::Cuboid(s) => s.smallest_dimension(),
            Self::Cone(s) => s.smallest_dimension(),
        }
    }

    /// Extremal point along the up axis.
    #[must_use]
    pub fn highest_point(&self) -> Vec3<T> {
        match self {
            Self::Point(s) => s.highest_point(),
            Self::Line(s) => s.highest_point(),
            Self::Sphere(s) => s.highest_point(),
            Self::HollowSphere(s) => s.highest_point(),
            Self::Cuboid(s) => s.highest_point(),
            Self::Cone(s) => s.highest_point(),
        }
    }

    /// Extremal point along the down axis.
    #[must_use]
    pub fn lowest_point(&self) -> Vec3<T> {
        match self {
            Self::Point(s) => s.lowest_point(),
            Self::Line(s) => s.lowest_point(),
            Self::Sphere(s) => s.lowest_point(),
            Self::HollowSphere(s) => s.lowest_point(),
            Self::Cuboid(s) => s.lowest_point(),
            Self::Cone(s) => s.lowest_point(),
        }
    }

    /// Closed-region membership test; the boundary counts as inside.
    #[must_use]
    pub fn is_point_within(&self, point: &Vec3<T>) -> bool {
        match self {
            Self::Point(s) => s.is_point_within(point),
            Self::Line(s) => s.is_point_within(point),
            Self::Sphere(s) => s.is_point_within(point),
            Self::HollowSphere(s) => s.is_point_within(point),
            Self::Cuboid(s) => s.is_point_within(point),
            Self::Cone(s) => s.is_point_within(point),
        }
    }

    /// Symmetric intersection predicate over the closed shape set.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        intersect::shapes_intersect(self, other)
    }

    /// Copy of this shape at a new position.
    #[must_use]
    pub fn with_position(&self, position: Vec3<T>) -> Self {
        match self {
            Self::Point(s) => Self::Point(s.with_position(position)),
            Self::Line(s) => Self::Line(s.with_position(position)),
            Self::Sphere(s) => Self::Sphere(s.with_position(position)),
            Self::HollowSphere(s) => Self::HollowSphere(s.with_position(position)),
            Self::Cuboid(s) => Self::Cuboid(s.with_position(position)),
            Self::Cone(s) => Self::Cone(s.with_position(position)),
        }
    }

    /// Copy of this shape with a rotation applied. A no-op for points,
    /// spheres, and shells; lines and cones rotate their direction vectors;
    /// cuboids replace their orientation.
    #[must_use]
    pub fn with_rotation(&self, rotation: Quat<T>) -> Self {
        match self {
            Self::Point(s) => Self::Point(s.with_rotation(rotation)),
            Self::Line(s) => Self::Line(s.with_rotation(rotation)),
            Self::Sphere(s) => Self::Sphere(s.with_rotation(rotation)),
            Self::HollowSphere(s) => Self::HollowSphere(s.with_rotation(rotation)),
            Self::Cuboid(s) => Self::Cuboid(s.with_rotation(rotation)),
            Self::Cone(s) => Self::Cone(s.with_rotation(rotation)),
        }
    }

    /// Scale every linear extent by `factor`.
    ///
    /// # Errors
    /// Returns [`ShapeError::NegativeScaleFactor`] when `factor < 0`.
    pub fn scale_by_dimension(&self, factor: T) -> Result<Self, ShapeError> {
        Ok(match self {
            Self::Point(s) => Self::Point(s.scale_by_dimension(factor)?),
            Self::Line(s) => Self::Line(s.scale_by_dimension(factor)?),
            Self::Sphere(s) => Self::Sphere(s.scale_by_dimension(factor)?),
            Self::HollowSphere(s) => Self::HollowSphere(s.scale_by_dimension(factor)?),
            Self::Cuboid(s) => Self::Cuboid(s.scale_by_dimension(factor)?),
            Self::Cone(s) => Self::Cone(s.scale_by_dimension(factor)?),
        })
    }

    /// Scale the volume by `factor`; each linear extent scales by
    /// `factor^(1/3)`, and a zero factor produces a degenerate shape at the
    /// same position.
    ///
    /// # Errors
    /// Returns [`ShapeError::NegativeScaleFactor`] when `factor < 0`.
    pub fn scale_volume(&self, factor: T) -> Result<Self, ShapeError> {
        Ok(match self {
            Self::Point(s) => Self::Point(s.scale_volume(factor)?),
            Self::Line(s) => Self::Line(s.scale_volume(factor)?),
            Self::Sphere(s) => Self::Sphere(s.scale_volume(factor)?),
            Self::HollowSphere(s) => Self::HollowSphere(s.scale_volume(factor)?),
            Self::Cuboid(s) => Self::Cuboid(s.scale_volume(factor)?),
            Self::Cone(s) => Self::Cone(s.scale_volume(factor)?),
        })
    }
}

/// Reject negative scale factors at the API boundary.
pub(crate) fn validate_scale_factor<T: RealField + Copy>(factor: T) -> Result<(), ShapeError> {
    if factor < T::zero() {
        Err(ShapeError::negative_scale_factor(&factor))
    } else {
        Ok(())
    }
}

/// Cube root of a non-negative scalar, used to turn a volume factor into a
/// linear one.
pub(crate) fn cube_root<T: RealField + Copy>(value: T) -> T {
    value.powf(nalgebra::convert(1.0 / 3.0))
}
