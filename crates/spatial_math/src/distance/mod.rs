//! Closest-point and distance queries for points and finite segments.
//!
//! The segment/segment routine follows Eberly's robust formulation: minimize
//! the squared-distance function over the unit parameter square, clamping
//! each root and walking the feasible boundary when the unconstrained minimum
//! falls outside. It is exact for parallel and zero-length segments.

use crate::foundation::math::{clamp01, tolerance, RealField, Vec3};

/// Result of a closest-point query between two finite segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentDistance<T: RealField + Copy> {
    /// Minimum distance between the two segments.
    pub distance: T,
    /// Parameters of the closest points, each in `[0, 1]` along its segment.
    pub parameters: [T; 2],
    /// Closest point on the first and second segment respectively.
    pub closest: [Vec3<T>; 2],
}

/// Closest point to `point` on the segment from `start` to `end`.
///
/// A zero-length segment resolves to `start`.
#[must_use]
pub fn closest_point_on_segment<T: RealField + Copy>(
    point: &Vec3<T>,
    start: &Vec3<T>,
    end: &Vec3<T>,
) -> Vec3<T> {
    let dir = end - start;
    let len_sq = dir.norm_squared();
    if tolerance::is_nearly_zero(len_sq) {
        return *start;
    }
    let t = clamp01((point - start).dot(&dir) / len_sq);
    start + dir * t
}

/// Distance from `point` to the segment, along with the closest point.
#[must_use]
pub fn point_segment_distance<T: RealField + Copy>(
    point: &Vec3<T>,
    start: &Vec3<T>,
    end: &Vec3<T>,
) -> (T, Vec3<T>) {
    let closest = closest_point_on_segment(point, start, end);
    ((point - closest).norm(), closest)
}

/// Root of the linear function `h` with `h(0) = h0` and `h(1) = h1`, clamped
/// to `[0, 1]`. `slope` is `h1 - h0`; a degenerate (constant) function
/// resolves to an endpoint rather than dividing by zero.
fn get_clamped_root<T: RealField + Copy>(slope: T, h0: T, h1: T) -> T {
    if h0 < T::zero() {
        if h1 > T::zero() {
            let root = -h0 / slope;
            if root > T::one() {
                nalgebra::convert::<f64, T>(0.5)
            } else {
                root
            }
        } else {
            T::one()
        }
    } else {
        T::zero()
    }
}

/// Working state for the boundary walk of the segment/segment minimization.
struct SquareMinimizer<T: RealField + Copy> {
    b: T,
    c: T,
    e: T,
    f00: T,
    f10: T,
    g00: T,
    g10: T,
    g01: T,
    g11: T,
}

impl<T: RealField + Copy> SquareMinimizer<T> {
    /// Find where the line `F = 0` crosses the boundary of the parameter
    /// square. Returns the entry/exit edges (0 = s-edge at t=0 is not used
    /// here; edges are 0: s=0, 1: s=1, 2: t=0, 3: t=1) and the two boundary
    /// points `(s, t)` of the crossing.
    fn compute_intersection(&self, s_value: [T; 2], classify: [i8; 2]) -> ([u8; 2], [[T; 2]; 2]) {
        let mut edge = [0u8; 2];
        let mut end = [[T::zero(); 2]; 2];

        let half: T = nalgebra::convert(0.5);
        let t_at = |f: T| -> T {
            if tolerance::is_nearly_zero(self.b) {
                half
            } else {
                let t = f / self.b;
                if t < T::zero() || t > T::one() {
                    half
                } else {
                    t
                }
            }
        };

        if classify[0] < 0 {
            edge[0] = 0;
            end[0][0] = T::zero();
            end[0][1] = t_at(self.f00);
            if classify[1] == 0 {
                edge[1] = 3;
                end[1][0] = s_value[1];
                end[1][1] = T::one();
            } else {
                edge[1] = 1;
                end[1][0] = T::one();
                end[1][1] = t_at(self.f10);
            }
        } else if classify[0] == 0 {
            edge[0] = 2;
            end[0][0] = s_value[0];
            end[0][1] = T::zero();
            if classify[1] < 0 {
                edge[1] = 0;
                end[1][0] = T::zero();
                end[1][1] = t_at(self.f00);
            } else if classify[1] == 0 {
                edge[1] = 3;
                end[1][0] = s_value[1];
                end[1][1] = T::one();
            } else {
                edge[1] = 1;
                end[1][0] = T::one();
                end[1][1] = t_at(self.f10);
            }
        } else {
            edge[0] = 1;
            end[0][0] = T::one();
            end[0][1] = t_at(self.f10);
            if classify[1] == 0 {
                edge[1] = 3;
                end[1][0] = s_value[1];
                end[1][1] = T::one();
            } else {
                edge[1] = 0;
                end[1][0] = T::zero();
                end[1][1] = t_at(self.f00);
            }
        }

        (edge, end)
    }

    /// Walk the feasible boundary between the two crossing points and return
    /// the parameters minimizing the squared distance.
    fn compute_minimum_parameters(&self, edge: [u8; 2], end: [[T; 2]; 2]) -> [T; 2] {
        let delta = end[1][1] - end[0][1];
        let h0 = delta * (-self.b * end[0][0] + self.c * end[0][1] - self.e);
        if h0 >= T::zero() {
            return match edge[0] {
                0 => [T::zero(), get_clamped_root(self.c, self.g00, self.g01)],
                1 => [T::one(), get_clamped_root(self.c, self.g10, self.g11)],
                _ => [end[0][0], end[0][1]],
            };
        }

        let h1 = delta * (-self.b * end[1][0] + self.c * end[1][1] - self.e);
        if h1 <= T::zero() {
            return match edge[1] {
                0 => [T::zero(), get_clamped_root(self.c, self.g00, self.g01)],
                1 => [T::one(), get_clamped_root(self.c, self.g10, self.g11)],
                _ => [end[1][0], end[1][1]],
            };
        }

        let z = clamp01(h0 / (h0 - h1));
        let omz = T::one() - z;
        [
            omz * end[0][0] + z * end[1][0],
            omz * end[0][1] + z * end[1][1],
        ]
    }
}

/// Closest points between the finite segments `p0..p1` and `q0..q1`.
#[must_use]
pub fn segment_segment_distance<T: RealField + Copy>(
    p0: &Vec3<T>,
    p1: &Vec3<T>,
    q0: &Vec3<T>,
    q1: &Vec3<T>,
) -> SegmentDistance<T> {
    let p1mp0 = p1 - p0;
    let q1mq0 = q1 - q0;
    let p0mq0 = p0 - q0;

    let a = p1mp0.dot(&p1mp0);
    let b = p1mp0.dot(&q1mq0);
    let c = q1mq0.dot(&q1mq0);
    let d = p1mp0.dot(&p0mq0);
    let e = q1mq0.dot(&p0mq0);

    // Values of the derivative halves F(s,t) = a s - b t + d and
    // G(s,t) = -b s + c t - e at the corners of the parameter square.
    let f00 = d;
    let f10 = f00 + a;
    let f01 = f00 - b;
    let f11 = f10 - b;

    let g00 = -e;
    let g10 = g00 - b;
    let g01 = g00 + c;
    let g11 = g10 + c;

    let parameters = if a > T::zero() && c > T::zero() {
        // Both segments have positive length.
        let s_value = [
            get_clamped_root(a, f00, f10),
            get_clamped_root(a, f01, f11),
        ];
        let classify = [
            classify_parameter(s_value[0]),
            classify_parameter(s_value[1]),
        ];

        if classify[0] == -1 && classify[1] == -1 {
            [T::zero(), get_clamped_root(c, g00, g01)]
        } else if classify[0] == 1 && classify[1] == 1 {
            [T::one(), get_clamped_root(c, g10, g11)]
        } else {
            let minimizer = SquareMinimizer {
                b,
                c,
                e,
                f00,
                f10,
                g00,
                g10,
                g01,
                g11,
            };
            let (edge, end) = minimizer.compute_intersection(s_value, classify);
            minimizer.compute_minimum_parameters(edge, end)
        }
    } else if a > T::zero() {
        // Second segment is a point.
        [get_clamped_root(a, f00, f10), T::zero()]
    } else if c > T::zero() {
        // First segment is a point.
        [T::zero(), get_clamped_root(c, g00, g01)]
    } else {
        // Both segments are points.
        [T::zero(), T::zero()]
    };

    let closest = [
        p0 + p1mp0 * parameters[0],
        q0 + q1mq0 * parameters[1],
    ];
    let distance = (closest[1] - closest[0]).norm();

    SegmentDistance {
        distance,
        parameters,
        closest,
    }
}

fn classify_parameter<T: RealField + Copy>(value: T) -> i8 {
    if value <= T::zero() {
        -1
    } else if value >= T::one() {
        1
    } else {
        0
    }
}
