// Homing: steer agents back toward the flock's home region.
//
// The further an agent strays from `home_center`, the more its target
// orientation is pulled toward "look straight at home". The pull is capped at
// HOME_BLEND_MAX so repulsion always keeps some say, even at the boundary.

use glam::{Mat3, Quat, Vec3};

use super::repulsion::Repulsion;

/// Weight given to the pure home-seeking rotation when `home_factor == 1`.
pub const HOME_BLEND_MAX: f32 = 0.95;

/// `clamp01(distance / home_radius)`: 0 at the centre, 1 at or beyond the radius.
///
/// A non-positive radius treats every agent as already at the boundary.
#[inline]
pub fn home_factor(distance_from_center: f32, home_radius: f32) -> f32 {
    if home_radius > 0.0 {
        (distance_from_center / home_radius).clamp(0.0, 1.0)
    } else {
        1.0
    }
}

/// Rotation whose local +Z points along `forward` and whose local +Y lies in
/// the plane of `forward` and `up`.
///
/// Returns `None` for a zero-length `forward`. When `forward` is parallel to
/// `up` an arbitrary perpendicular is used as the right axis.
pub fn look_rotation(forward: Vec3, up: Vec3) -> Option<Quat> {
    let z = forward.try_normalize()?;
    let x = up
        .cross(z)
        .try_normalize()
        .unwrap_or_else(|| z.any_orthonormal_vector());
    let y = z.cross(x);
    Some(Quat::from_mat3(&Mat3::from_cols(x, y, z)).normalize())
}

/// Target orientation for an agent at `self_pos`.
///
/// 1. Look along `repulsion.direction + to_center` (or `fallback` when that
///    direction is degenerate).
/// 2. Apply the jitter: `angle_x` about local up, then `angle_y` about local right.
/// 3. Slerp toward `look_rotation(to_center)` by `HOME_BLEND_MAX * home_factor`.
///
/// An agent exactly at `home_center` has no home direction; step 3 is skipped
/// and repulsion alone decides.
pub fn blend(
    self_pos: Vec3,
    home_center: Vec3,
    home_radius: f32,
    repulsion: &Repulsion,
    up: Vec3,
    fallback: Quat,
) -> Quat {
    let to_center = home_center - self_pos;
    let distance = to_center.length();

    let home = if distance > 0.0 { look_rotation(to_center, up) } else { None };

    let base = look_rotation(repulsion.direction + to_center, up)
        .or(home)
        .unwrap_or(fallback);

    let raw = if repulsion.has_jitter() {
        base * Quat::from_axis_angle(Vec3::Y, repulsion.angle_x.to_radians())
            * Quat::from_axis_angle(Vec3::X, repulsion.angle_y.to_radians())
    } else {
        base
    };

    let target = match home {
        Some(home) => raw.slerp(home, HOME_BLEND_MAX * home_factor(distance, home_radius)),
        None => raw,
    };
    target.normalize()
}
