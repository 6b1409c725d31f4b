//! Oriented-box / cone intersection.
//!
//! The test runs in the box's local frame. Cheap acceptance tests (apex
//! containment, cone-axis slab crossing, base disc against the box) run
//! first; the remaining contact configurations must involve the box surface
//! facing the apex, so the apex is classified per local axis against the box
//! slabs (0 = below, 1 = straddling, 2 = above) and the resulting index
//! selects the silhouette polygon of candidate corners from a 27-entry
//! table. Polygon vertices are tested against the cone's quadratic surface,
//! and each polygon edge is refined by solving the surface function along
//! the edge.

use crate::foundation::math::{tolerance, RealField, Vec3};
use crate::intersect::{segment_intersects_aabb, segment_intersects_cone};
use crate::shapes::{Cone, Cuboid};

/// Silhouette polygons of a box as seen from an exterior point, keyed by the
/// per-axis slab classification `cx + 3*cy + 9*cz` (0 = below the slab,
/// 1 = inside, 2 = above). Entries are corner indices in bit order
/// (bit 0 = +x, bit 1 = +y, bit 2 = +z), padded with -1; consecutive entries
/// (with wraparound) are joined by box edges. Index 13 is the all-straddling
/// cell, where the viewer is inside the box and no silhouette exists.
const SILHOUETTE: [[i8; 6]; 27] = [
    [1, 5, 4, 6, 2, 3],       //  0 (0,0,0)
    [0, 2, 3, 1, 5, 4],       //  1 (1,0,0)
    [0, 2, 3, 7, 5, 4],       //  2 (2,0,0)
    [0, 4, 6, 2, 3, 1],       //  3 (0,1,0)
    [0, 2, 3, 1, -1, -1],     //  4 (1,1,0)
    [0, 2, 3, 7, 5, 1],       //  5 (2,1,0)
    [0, 4, 6, 7, 3, 1],       //  6 (0,2,0)
    [0, 2, 6, 7, 3, 1],       //  7 (1,2,0)
    [0, 2, 6, 7, 5, 1],       //  8 (2,2,0)
    [0, 1, 5, 4, 6, 2],       //  9 (0,0,1)
    [0, 1, 5, 4, -1, -1],     // 10 (1,0,1)
    [0, 1, 3, 7, 5, 4],       // 11 (2,0,1)
    [0, 4, 6, 2, -1, -1],     // 12 (0,1,1)
    [-1, -1, -1, -1, -1, -1], // 13 (1,1,1)
    [1, 3, 7, 5, -1, -1],     // 14 (2,1,1)
    [0, 4, 6, 7, 3, 2],       // 15 (0,2,1)
    [2, 6, 7, 3, -1, -1],     // 16 (1,2,1)
    [1, 3, 2, 6, 7, 5],       // 17 (2,2,1)
    [0, 1, 5, 7, 6, 2],       // 18 (0,0,2)
    [0, 1, 5, 7, 6, 4],       // 19 (1,0,2)
    [0, 1, 3, 7, 6, 4],       // 20 (2,0,2)
    [0, 4, 5, 7, 6, 2],       // 21 (0,1,2)
    [4, 5, 7, 6, -1, -1],     // 22 (1,1,2)
    [1, 3, 7, 6, 4, 5],       // 23 (2,1,2)
    [0, 4, 5, 7, 3, 2],       // 24 (0,2,2)
    [2, 6, 4, 5, 7, 3],       // 25 (1,2,2)
    [1, 3, 2, 6, 4, 5],       // 26 (2,2,2)
];

fn classify<T: RealField + Copy>(value: T, half: T) -> usize {
    if value < -half {
        0
    } else if value > half {
        2
    } else {
        1
    }
}

fn corner_by_bits<T: RealField + Copy>(bits: i8, half: &Vec3<T>) -> Vec3<T> {
    Vec3::new(
        if bits & 1 != 0 { half.x } else { -half.x },
        if bits & 2 != 0 { half.y } else { -half.y },
        if bits & 4 != 0 { half.z } else { -half.z },
    )
}

fn aabb_contains<T: RealField + Copy>(point: &Vec3<T>, half: &Vec3<T>) -> bool {
    point.x.abs() <= half.x && point.y.abs() <= half.y && point.z.abs() <= half.z
}

/// Exact test of a flat disc against an axis-aligned box centered at the
/// origin. The disc intersects the box iff its center is inside, or the
/// line where the disc's plane meets some face plane carries a point that
/// lies both within the disc chord and within the face rectangle.
fn disc_intersects_aabb<T: RealField + Copy>(
    center: &Vec3<T>,
    normal: &Vec3<T>,
    radius: T,
    half: &Vec3<T>,
) -> bool {
    if aabb_contains(center, half) {
        return true;
    }
    for axis in 0..3 {
        let n_axis = normal[axis];
        // Squared sine of the angle between the disc plane and the face
        // plane; zero means the planes are parallel and another face pair
        // resolves the contact.
        let tilt_sq = T::one() - n_axis * n_axis;
        if tolerance::is_nearly_zero(tilt_sq) {
            continue;
        }
        // In-plane direction of steepest approach toward the face plane and
        // the unit direction of the plane/plane intersection line.
        let mut toward_face = *normal * (-n_axis);
        toward_face[axis] += T::one();
        let mut axis_unit = Vec3::zeros();
        axis_unit[axis] = T::one();
        let line_dir = normal.cross(&axis_unit) / tilt_sq.sqrt();

        for sign in [-T::one(), T::one()] {
            let face = sign * half[axis];
            // toward_face[axis] == tilt_sq, so this lands on the face plane.
            let t = (face - center[axis]) / tilt_sq;
            let on_line = center + toward_face * t;
            let offset_sq = (on_line - center).norm_squared();
            if offset_sq > radius * radius {
                continue;
            }
            // Chord of the disc along the intersection line, clipped by the
            // two remaining slabs of the face rectangle.
            let half_chord = (radius * radius - offset_sq).sqrt();
            let mut s_min = -half_chord;
            let mut s_max = half_chord;
            let mut feasible = true;
            for other in 0..3 {
                if other == axis {
                    continue;
                }
                if tolerance::is_nearly_zero(line_dir[other]) {
                    if on_line[other].abs() > half[other] {
                        feasible = false;
                        break;
                    }
                } else {
                    let inv = T::one() / line_dir[other];
                    let mut t1 = (-half[other] - on_line[other]) * inv;
                    let mut t2 = (half[other] - on_line[other]) * inv;
                    if t1 > t2 {
                        std::mem::swap(&mut t1, &mut t2);
                    }
                    s_min = s_min.max(t1);
                    s_max = s_max.min(t2);
                    if s_min > s_max {
                        feasible = false;
                        break;
                    }
                }
            }
            if feasible {
                return true;
            }
        }
    }
    false
}

/// True when the oriented box and the solid cone overlap.
pub(crate) fn box_intersects_cone<T: RealField + Copy>(bx: &Cuboid<T>, cone: &Cone<T>) -> bool {
    let half = bx.half_extents();
    let apex = bx.to_local(&cone.position());

    if cone.axis_direction().is_none() {
        // Degenerate cone: a point at the apex.
        return aabb_contains(&apex, &half);
    }

    // Apex inside the box.
    if aabb_contains(&apex, &half) {
        return true;
    }

    let axis = bx.to_local_vector(&cone.axis());

    // Cone axis crossing the box.
    let base = apex + axis;
    if segment_intersects_aabb(&apex, &base, &half) {
        return true;
    }

    let local_cone = Cone::new(axis, cone.radius(), apex);

    // Base disc dipping into the box. This is the one contact configuration
    // the silhouette stages below cannot see: the rim can sink through a
    // face interior without any box edge entering the cone.
    if let Some(dir) = local_cone.axis_direction() {
        if disc_intersects_aabb(&base, &dir, cone.radius(), &half) {
            return true;
        }
    }

    // Candidate silhouette polygon facing the apex.
    let index =
        classify(apex.x, half.x) + 3 * classify(apex.y, half.y) + 9 * classify(apex.z, half.z);
    let polygon = &SILHOUETTE[index];
    let count = polygon.iter().filter(|bits| **bits >= 0).count();

    // Polygon vertices against the cone's quadratic surface.
    for bits in polygon.iter().take(count) {
        if local_cone.is_point_within(&corner_by_bits(*bits, &half)) {
            return true;
        }
    }

    // Refine along each polygon edge: solve the surface function along the
    // edge for lateral or base crossings.
    for k in 0..count {
        let va = corner_by_bits(polygon[k], &half);
        let vb = corner_by_bits(polygon[(k + 1) % count], &half);
        if segment_intersects_cone(&va, &vb, &local_cone) {
            return true;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Quat;

    fn unit_cube() -> Cuboid<f64> {
        Cuboid::axis_aligned(Vec3::new(2.0, 2.0, 2.0), Vec3::zeros())
    }

    #[test]
    fn test_silhouette_edges_are_box_edges() {
        // Consecutive corner indices in every table entry must differ in
        // exactly one bit, i.e. be joined by a box edge.
        for (index, polygon) in SILHOUETTE.iter().enumerate() {
            let count = polygon.iter().filter(|bits| **bits >= 0).count();
            for k in 0..count {
                let a = polygon[k];
                let b = polygon[(k + 1) % count];
                assert_eq!(
                    (a ^ b).count_ones(),
                    1,
                    "entry {index}: corners {a} and {b} are not edge-adjacent"
                );
            }
        }
    }

    #[test]
    fn test_apex_inside_box() {
        let cone = Cone::new(Vec3::new(0.0, 5.0, 0.0), 1.0, Vec3::new(0.5, 0.5, 0.5));
        assert!(box_intersects_cone(&unit_cube(), &cone));
    }

    #[test]
    fn test_axis_piercing_box() {
        // Apex well outside, axis passing straight through the cube.
        let cone = Cone::new(Vec3::new(-10.0, 0.0, 0.0), 1.0, Vec3::new(5.0, 0.0, 0.0));
        assert!(box_intersects_cone(&unit_cube(), &cone));
    }

    #[test]
    fn test_lateral_surface_clips_corner() {
        // Apex above the cube, cone opening downward but tilted so only its
        // flank sweeps across the top face corner region.
        let cone = Cone::new(Vec3::new(2.0, -2.0, 0.0), 1.2, Vec3::new(-2.0, 3.0, 0.0));
        assert!(box_intersects_cone(&unit_cube(), &cone));
    }

    #[test]
    fn test_cone_next_to_box_misses() {
        // Narrow cone pointing away from the cube.
        let cone = Cone::new(Vec3::new(5.0, 0.0, 0.0), 0.5, Vec3::new(2.0, 0.0, 0.0));
        assert!(!box_intersects_cone(&unit_cube(), &cone));
    }

    #[test]
    fn test_wide_cone_touches_face_through_rim() {
        // Apex beyond the +X face, axis pointing away, but the wide base rim
        // swings back across the face plane.
        let cone = Cone::new(Vec3::new(0.5, 0.0, 0.0), 3.0, Vec3::new(1.5, 0.0, 0.0));
        assert!(!box_intersects_cone(&unit_cube(), &cone));

        // Same geometry but with the apex close enough that the slant
        // surface crosses the corner edge.
        let near = Cone::new(Vec3::new(1.0, 0.0, 0.0), 4.0, Vec3::new(0.5, 1.5, 0.0));
        assert!(box_intersects_cone(&unit_cube(), &near));
    }

    #[test]
    fn test_base_rim_dipping_through_face() {
        // Apex above the top face with a nearly horizontal axis: the low
        // edge of the base disc sinks through the face interior while the
        // axis stays outside the cube and no cube edge enters the cone.
        // The point (0.727, 0.834, 0) lies in both solids.
        let dipping = Cone::new(
            Vec3::new(0.796, -0.0796, 0.0),
            0.6,
            Vec3::new(0.0, 1.5, 0.0),
        );
        assert!(box_intersects_cone(&unit_cube(), &dipping));
        assert!(unit_cube().is_point_within(&Vec3::new(0.727, 0.834, 0.0)));
        assert!(dipping.is_point_within(&Vec3::new(0.727, 0.834, 0.0)));

        // Same cone raised clear of the face.
        let clear = Cone::new(
            Vec3::new(0.796, -0.0796, 0.0),
            0.6,
            Vec3::new(0.0, 2.5, 0.0),
        );
        assert!(!box_intersects_cone(&unit_cube(), &clear));
    }

    #[test]
    fn test_rotated_box() {
        // Cube rotated 45 degrees about Z presents an edge toward the cone.
        let rotation = Quat::from_axis_angle(&Vec3::z_axis(), std::f64::consts::FRAC_PI_4);
        let cube = Cuboid::new(Vec3::new(2.0, 2.0, 2.0), Vec3::zeros(), rotation);
        // The rotated cube reaches sqrt(2) along X.
        let touching = Cone::new(Vec3::new(-1.0, 0.0, 0.0), 0.5, Vec3::new(2.2, 0.0, 0.0));
        assert!(box_intersects_cone(&cube, &touching));
        let missing = Cone::new(Vec3::new(1.0, 0.0, 0.0), 0.5, Vec3::new(2.2, 0.0, 0.0));
        assert!(!box_intersects_cone(&cube, &missing));
    }

    #[test]
    fn test_degenerate_cone_is_a_point() {
        let inside = Cone::new(Vec3::zeros(), 0.0, Vec3::new(0.5, 0.0, 0.0));
        let outside = Cone::new(Vec3::zeros(), 0.0, Vec3::new(5.0, 0.0, 0.0));
        assert!(box_intersects_cone(&unit_cube(), &inside));
        assert!(!box_intersects_cone(&unit_cube(), &outside));
    }
}
