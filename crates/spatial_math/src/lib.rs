//! Generic-precision spatial math library.
//!
//! Provides six immutable solid-shape primitives (point, line segment,
//! sphere, hollow sphere, oriented cuboid, cone) together with a pairwise
//! intersection engine and exact closest-point queries. All shapes are
//! generic over the scalar type through [`nalgebra::RealField`], so the same
//! algorithms run on `f32`, `f64`, or any other real-field backing.
//!
//! Shapes are plain immutable values: every transform (`with_position`,
//! `with_rotation`, the scaling operations) returns a new instance, and every
//! query is a pure function safe to call from any thread.
//!
//! # Example
//!
//! ```
//! use spatial_math::{Shape, Vec3};
//!
//! let a: Shape<f64> = Shape::sphere(1.0, Vec3::zeros());
//! let b = Shape::sphere(1.0, Vec3::new(3.0, 0.0, 0.0));
//! assert!(!a.intersects(&b));
//! ```

pub mod distance;
pub mod error;
pub mod foundation;
pub mod shapes;

mod intersect;

pub use distance::SegmentDistance;
pub use error::ShapeError;
pub use foundation::math::{Quat, Vec3};
pub use shapes::{Cone, Cuboid, HollowSphere, Line, Shape, ShapeKind, SinglePoint, Sphere};
