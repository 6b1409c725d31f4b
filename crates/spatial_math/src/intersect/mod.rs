//! Pairwise intersection engine.
//!
//! Every unordered pair of shape variants has exactly one authoritative
//! routine, reached through a single exhaustive match; both argument orders
//! land on the same arm, so `a.intersects(b) == b.intersects(a)` holds by
//! construction. A containing-radius rejection runs before any exact test.

use log::trace;

use crate::distance::point_segment_distance;
use crate::foundation::math::{perpendicular_to, tolerance, RealField, Vec3};
use crate::shapes::{Cone, Cuboid, HollowSphere, Line, Shape, Sphere};

mod box_cone;
mod sat;

/// Symmetric intersection test over the closed shape set.
pub(crate) fn shapes_intersect<T: RealField + Copy>(a: &Shape<T>, b: &Shape<T>) -> bool {
    // Broad phase: centers farther apart than the containing radii can
    // reach cannot touch. The near-zero pad keeps the rejection consistent
    // with the tolerance used by the exact membership tests.
    let separation = (b.position() - a.position()).norm();
    let reach = a.containing_radius() + b.containing_radius() + tolerance::near_zero();
    if separation > reach {
        trace!(
            "broad-phase rejection: {} vs {} at separation {separation:?}",
            a.kind(),
            b.kind()
        );
        return false;
    }

    use Shape::{Cone as Cn, Cuboid as Cb, HollowSphere as Hs, Line as Ln, Point as Pt, Sphere as Sp};
    match (a, b) {
        (Pt(p), other) | (other, Pt(p)) => other.is_point_within(&p.position()),

        (Ln(x), Ln(y)) => line_line(x, y),
        (Ln(l), Sp(s)) | (Sp(s), Ln(l)) => line_sphere(l, s),
        (Ln(l), Hs(h)) | (Hs(h), Ln(l)) => line_hollow_sphere(l, h),
        (Ln(l), Cb(c)) | (Cb(c), Ln(l)) => line_cuboid(l, c),
        (Ln(l), Cn(c)) | (Cn(c), Ln(l)) => line_cone(l, c),

        (Sp(x), Sp(y)) => sphere_sphere(x, y),
        (Sp(s), Hs(h)) | (Hs(h), Sp(s)) => sphere_hollow_sphere(s, h),
        (Sp(s), Cb(c)) | (Cb(c), Sp(s)) => sphere_cuboid(s, c),
        (Sp(s), Cn(c)) | (Cn(c), Sp(s)) => sphere_cone(s, c),

        (Hs(x), Hs(y)) => hollow_hollow(x, y),
        (Hs(h), Cb(c)) | (Cb(c), Hs(h)) => cuboid_hollow_sphere(c, h),
        (Hs(h), Cn(c)) | (Cn(c), Hs(h)) => cone_hollow_sphere(c, h),

        (Cb(x), Cb(y)) => sat::boxes_intersect(x, y),
        (Cb(bx), Cn(cn)) | (Cn(cn), Cb(bx)) => box_cone::box_intersects_cone(bx, cn),

        (Cn(x), Cn(y)) => cone_cone(x, y),
    }
}

/// Two finite segments intersect when their closest distance vanishes.
/// Robust for parallel, collinear, and degenerate segments.
fn line_line<T: RealField + Copy>(a: &Line<T>, b: &Line<T>) -> bool {
    tolerance::is_nearly_zero(a.distance_to_line(b).distance)
}

fn line_sphere<T: RealField + Copy>(line: &Line<T>, sphere: &Sphere<T>) -> bool {
    let (distance, _) = line.distance_to_point(&sphere.position());
    distance <= sphere.radius()
}

/// The segment's distance band from the shell center is
/// `[closest-point distance, farthest-endpoint distance]`; the segment
/// touches shell material iff that band overlaps `[inner, outer]`. A segment
/// trapped entirely inside the cavity fails the band test.
fn line_hollow_sphere<T: RealField + Copy>(line: &Line<T>, shell: &HollowSphere<T>) -> bool {
    let center = shell.position();
    let (min_distance, _) = line.distance_to_point(&center);
    let max_distance = (line.start() - center)
        .norm()
        .max((line.end() - center).norm());
    shell.distance_band_overlaps_shell(min_distance, max_distance)
}

fn line_cuboid<T: RealField + Copy>(line: &Line<T>, cuboid: &Cuboid<T>) -> bool {
    let start = cuboid.to_local(&line.start());
    let end = cuboid.to_local(&line.end());
    segment_intersects_aabb(&start, &end, &cuboid.half_extents())
}

fn line_cone<T: RealField + Copy>(line: &Line<T>, cone: &Cone<T>) -> bool {
    segment_intersects_cone(&line.start(), &line.end(), cone)
}

fn sphere_sphere<T: RealField + Copy>(a: &Sphere<T>, b: &Sphere<T>) -> bool {
    let radius_sum = a.radius() + b.radius();
    (b.position() - a.position()).norm_squared() <= radius_sum * radius_sum
}

fn sphere_hollow_sphere<T: RealField + Copy>(sphere: &Sphere<T>, shell: &HollowSphere<T>) -> bool {
    let separation = (sphere.position() - shell.position()).norm();
    let min_distance = (separation - sphere.radius()).max(T::zero());
    let max_distance = separation + sphere.radius();
    shell.distance_band_overlaps_shell(min_distance, max_distance)
}

/// Arvo's algorithm: clamp the sphere center into the box in the box's
/// local frame and compare against the radius.
fn sphere_cuboid<T: RealField + Copy>(sphere: &Sphere<T>, cuboid: &Cuboid<T>) -> bool {
    cuboid.distance_to_point(&sphere.position()) <= sphere.radius()
}

fn sphere_cone<T: RealField + Copy>(sphere: &Sphere<T>, cone: &Cone<T>) -> bool {
    cone.distance_to_point(&sphere.position()) <= sphere.radius()
}

/// Shell/shell: the distance band of shell `b`'s material measured from
/// `a`'s center must overlap `a`'s own material band.
fn hollow_hollow<T: RealField + Copy>(a: &HollowSphere<T>, b: &HollowSphere<T>) -> bool {
    let separation = (b.position() - a.position()).norm();
    let min_distance = if separation >= b.outer_radius() {
        separation - b.outer_radius()
    } else if separation <= b.inner_radius() {
        b.inner_radius() - separation
    } else {
        T::zero()
    };
    let max_distance = separation + b.outer_radius();
    a.distance_band_overlaps_shell(min_distance, max_distance)
}

fn cuboid_hollow_sphere<T: RealField + Copy>(cuboid: &Cuboid<T>, shell: &HollowSphere<T>) -> bool {
    let center = shell.position();
    shell.distance_band_overlaps_shell(
        cuboid.distance_to_point(&center),
        cuboid.farthest_point_distance(&center),
    )
}

fn cone_hollow_sphere<T: RealField + Copy>(cone: &Cone<T>, shell: &HollowSphere<T>) -> bool {
    let center = shell.position();
    shell.distance_band_overlaps_shell(
        cone.distance_to_point(&center),
        cone.farthest_point_distance(&center),
    )
}

/// Rim samples per cone in the cone/cone boundary stage.
const CONE_RIM_SAMPLES: usize = 16;

/// Cone/cone test: apex containment each way, each axis segment against the
/// other cone, then the sampled-boundary stage in both directions.
fn cone_cone<T: RealField + Copy>(a: &Cone<T>, b: &Cone<T>) -> bool {
    if a.is_point_within(&b.position()) || b.is_point_within(&a.position()) {
        return true;
    }
    if segment_intersects_cone(&a.position(), &a.base_center(), b)
        || segment_intersects_cone(&b.position(), &b.base_center(), a)
    {
        return true;
    }
    cone_boundary_touches(a, b) || cone_boundary_touches(b, a)
}

/// Boundary stage for the cone/cone pair: slant segments from the apex to
/// rim samples, and the chords between consecutive samples, each run through
/// the exact segment/cone test against the other cone.
///
/// Every tested segment lies within the first cone's solid, so a hit is
/// always a genuine common point; misses are possible only for thin overlaps
/// that dodge all sampled boundary curves.
fn cone_boundary_touches<T: RealField + Copy>(cone: &Cone<T>, other: &Cone<T>) -> bool {
    let Some(dir) = cone.axis_direction() else {
        // Degenerate cone: its apex was already tested.
        return false;
    };
    let apex = cone.position();
    let base = cone.base_center();
    let radius = cone.radius();
    let u = perpendicular_to(&dir);
    let v = dir.cross(&u);
    let step: T = T::two_pi() / nalgebra::convert::<f64, T>(CONE_RIM_SAMPLES as f64);
    let mut prev = base + u * radius;
    for k in 1..=CONE_RIM_SAMPLES {
        let angle = step * nalgebra::convert::<f64, T>(k as f64);
        let point = base + (u * angle.cos() + v * angle.sin()) * radius;
        if segment_intersects_cone(&apex, &point, other)
            || segment_intersects_cone(&prev, &point, other)
        {
            return true;
        }
        prev = point;
    }
    false
}

/// Slab test for a segment against an axis-aligned box centered at the
/// origin with the given half extents.
pub(crate) fn segment_intersects_aabb<T: RealField + Copy>(
    start: &Vec3<T>,
    end: &Vec3<T>,
    half: &Vec3<T>,
) -> bool {
    let delta = end - start;
    let mut t_min = T::zero();
    let mut t_max = T::one();
    for i in 0..3 {
        if tolerance::is_nearly_zero(delta[i]) {
            if start[i].abs() > half[i] {
                return false;
            }
        } else {
            let inv = T::one() / delta[i];
            let mut t1 = (-half[i] - start[i]) * inv;
            let mut t2 = (half[i] - start[i]) * inv;
            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
            }
            t_min = t_min.max(t1);
            t_max = t_max.min(t2);
            if t_min > t_max {
                return false;
            }
        }
    }
    true
}

/// Segment against a solid finite cone: endpoint containment, lateral
/// quadratic-surface crossings restricted to the cone's height range, and
/// base-disc crossings.
pub(crate) fn segment_intersects_cone<T: RealField + Copy>(
    start: &Vec3<T>,
    end: &Vec3<T>,
    cone: &Cone<T>,
) -> bool {
    if cone.is_point_within(start) || cone.is_point_within(end) {
        return true;
    }
    let Some(dir) = cone.axis_direction() else {
        // Degenerate cone: a point at the apex.
        return tolerance::is_nearly_zero(
            point_segment_distance(&cone.position(), start, end).0,
        );
    };

    let length = cone.length();
    let cos_sq = cone.half_angle_cos_squared();
    let edge = end - start;
    let offset = start - cone.position();
    let dir_dot_edge = dir.dot(&edge);
    let dir_dot_offset = dir.dot(&offset);

    // Lateral surface: roots of the cone's quadratic surface function along
    // the segment, accepted only within the height range of the solid cone.
    let two: T = nalgebra::convert(2.0);
    let c2 = dir_dot_edge * dir_dot_edge - cos_sq * edge.norm_squared();
    let c1 = two * (dir_dot_edge * dir_dot_offset - cos_sq * edge.dot(&offset));
    let c0 = dir_dot_offset * dir_dot_offset - cos_sq * offset.norm_squared();

    let mut roots = [T::zero(); 2];
    let mut root_count = 0;
    if tolerance::is_nearly_zero(c2) {
        if !tolerance::is_nearly_zero(c1) {
            roots[0] = -c0 / c1;
            root_count = 1;
        }
    } else {
        let discriminant = c1 * c1 - nalgebra::convert::<f64, T>(4.0) * c2 * c0;
        if discriminant >= T::zero() {
            let sqrt_disc = discriminant.sqrt();
            let inv = T::one() / (two * c2);
            roots[0] = (-c1 - sqrt_disc) * inv;
            roots[1] = (-c1 + sqrt_disc) * inv;
            root_count = 2;
        }
    }
    for root in roots.iter().take(root_count) {
        if *root < T::zero() || *root > T::one() {
            continue;
        }
        let height = dir_dot_offset + *root * dir_dot_edge;
        if height >= T::zero() && height <= length {
            return true;
        }
    }

    // Base disc: crossing of the base plane within the base radius.
    if !tolerance::is_nearly_zero(dir_dot_edge) {
        let t = (length - dir_dot_offset) / dir_dot_edge;
        if t >= T::zero() && t <= T::one() {
            let at_plane = offset + edge * t;
            let radial = at_plane - dir * length;
            if radial.norm_squared() <= cone.radius() * cone.radius() {
                return true;
            }
        }
    }

    false
}
