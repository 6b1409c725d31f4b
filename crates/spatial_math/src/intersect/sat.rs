//! Separating-axis test between two oriented boxes.
//!
//! Gottschalk's 15-axis formulation: the three face normals of each box plus
//! the nine cross products of edge direction pairs, all evaluated in the
//! first box's local frame. Any single separating axis terminates the test.

use crate::foundation::math::{tolerance, RealField};
use crate::shapes::Cuboid;

/// True when the two oriented boxes overlap (shared boundary counts).
pub(crate) fn boxes_intersect<T: RealField + Copy>(a: &Cuboid<T>, b: &Cuboid<T>) -> bool {
    let ea = a.half_extents();
    let eb = b.half_extents();

    let ma = a.rotation().to_rotation_matrix().into_inner();
    let mb = b.rotation().to_rotation_matrix().into_inner();

    // B's axes and the center offset expressed in A's frame.
    let r = ma.transpose() * mb;
    let t = ma.transpose() * (b.position() - a.position());

    // Epsilon padding keeps near-parallel edge pairs from producing a
    // spurious null separating axis.
    let eps = tolerance::axis_epsilon::<T>();
    let abs_r = r.map(|entry| entry.abs() + eps);

    // A's three face normals.
    for i in 0..3 {
        let ra = ea[i];
        let rb = eb[0] * abs_r[(i, 0)] + eb[1] * abs_r[(i, 1)] + eb[2] * abs_r[(i, 2)];
        if t[i].abs() > ra + rb {
            return false;
        }
    }

    // B's three face normals.
    for j in 0..3 {
        let ra = ea[0] * abs_r[(0, j)] + ea[1] * abs_r[(1, j)] + ea[2] * abs_r[(2, j)];
        let rb = eb[j];
        let projection = (t[0] * r[(0, j)] + t[1] * r[(1, j)] + t[2] * r[(2, j)]).abs();
        if projection > ra + rb {
            return false;
        }
    }

    // Nine cross products of edge directions, one from each box.
    for i in 0..3 {
        let i1 = (i + 1) % 3;
        let i2 = (i + 2) % 3;
        for j in 0..3 {
            let j1 = (j + 1) % 3;
            let j2 = (j + 2) % 3;
            let ra = ea[i1] * abs_r[(i2, j)] + ea[i2] * abs_r[(i1, j)];
            let rb = eb[j1] * abs_r[(i, j2)] + eb[j2] * abs_r[(i, j1)];
            let projection = (t[i2] * r[(i1, j)] - t[i1] * r[(i2, j)]).abs();
            if projection > ra + rb {
                return false;
            }
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{Quat, Vec3};

    fn cube_at(x: f64, y: f64, z: f64) -> Cuboid<f64> {
        Cuboid::axis_aligned(Vec3::new(2.0, 2.0, 2.0), Vec3::new(x, y, z))
    }

    #[test]
    fn test_overlapping_axis_aligned_boxes() {
        assert!(boxes_intersect(&cube_at(0.0, 0.0, 0.0), &cube_at(1.5, 0.0, 0.0)));
    }

    #[test]
    fn test_touching_faces_count_as_intersecting() {
        assert!(boxes_intersect(&cube_at(0.0, 0.0, 0.0), &cube_at(2.0, 0.0, 0.0)));
    }

    #[test]
    fn test_separated_axis_aligned_boxes() {
        assert!(!boxes_intersect(&cube_at(0.0, 0.0, 0.0), &cube_at(2.5, 0.0, 0.0)));
        assert!(!boxes_intersect(&cube_at(0.0, 0.0, 0.0), &cube_at(0.0, 3.0, 0.0)));
    }

    #[test]
    fn test_rotated_box_reaches_farther() {
        // A cube rotated 45 degrees about Z extends sqrt(2) along X, so it
        // touches a unit-half-extent neighbor an axis-aligned cube misses.
        let rotation = Quat::from_axis_angle(&Vec3::z_axis(), std::f64::consts::FRAC_PI_4);
        let rotated = Cuboid::new(Vec3::new(2.0, 2.0, 2.0), Vec3::new(2.3, 0.0, 0.0), rotation);
        let axis_aligned = cube_at(2.3, 0.0, 0.0);

        let origin = cube_at(0.0, 0.0, 0.0);
        assert!(!boxes_intersect(&origin, &axis_aligned));
        assert!(boxes_intersect(&origin, &rotated));
    }

    #[test]
    fn test_edge_cross_axis_separation() {
        // Two long thin boxes crossing at right angles but offset along Z:
        // only an edge-cross axis separates them.
        let a = Cuboid::axis_aligned(Vec3::new(10.0, 1.0, 1.0), Vec3::zeros());
        let rotation = Quat::from_axis_angle(&Vec3::z_axis(), std::f64::consts::FRAC_PI_2);
        let b = Cuboid::new(Vec3::new(10.0, 1.0, 1.0), Vec3::new(0.0, 0.0, 1.5), rotation);
        assert!(!boxes_intersect(&a, &b));

        let touching = Cuboid::new(Vec3::new(10.0, 1.0, 1.0), Vec3::new(0.0, 0.0, 0.5), rotation);
        assert!(boxes_intersect(&a, &touching));
    }

    #[test]
    fn test_degenerate_zero_extent_box() {
        let flat = Cuboid::axis_aligned(Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.5, 0.5, 0.5));
        assert!(boxes_intersect(&cube_at(0.0, 0.0, 0.0), &flat));
    }
}
