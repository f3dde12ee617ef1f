// Short-range repulsion from sampled neighbours.

use glam::{Vec2, Vec3};
use rand::Rng;

/// Below this distance two agents count as touching. Instead of a direction
/// (which would be ill-conditioned) they get a random angular kick.
pub const NEAR_CONTACT_DISTANCE: f32 = 0.02;

/// Net repulsion from one neighbour window.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Repulsion {
    /// Accumulated yaw jitter in degrees.
    pub angle_x: f32,
    /// Accumulated pitch jitter in degrees.
    pub angle_y: f32,
    /// Unnormalised push away from neighbours. Longer means more crowded.
    pub direction: Vec3,
}

impl Repulsion {
    pub const ZERO: Repulsion = Repulsion { angle_x: 0.0, angle_y: 0.0, direction: Vec3::ZERO };

    pub fn has_jitter(&self) -> bool {
        self.angle_x != 0.0 || self.angle_y != 0.0
    }
}

/// Distance-to-strength weight: `1 / (1 + d)`.
///
/// 1 at contact, strictly decreasing, never singular.
#[inline]
pub fn falloff(distance: f32) -> f32 {
    1.0 / (1.0 + distance)
}

/// Sum the repulsion from every neighbour position in `neighbors`.
///
/// `repel_angle` scales the near-contact kick: each touching neighbour adds
/// `repel_angle.x * U(-2, 2)` to `angle_x` and `repel_angle.y * U(-2, 2)` to
/// `angle_y`.
pub fn accumulate<I, R>(self_pos: Vec3, neighbors: I, rng: &mut R, repel_angle: Vec2) -> Repulsion
where
    I: IntoIterator<Item = Vec3>,
    R: Rng + ?Sized,
{
    let mut out = Repulsion::ZERO;

    for neighbor in neighbors {
        let away = self_pos - neighbor;
        let distance = away.length();

        if distance < NEAR_CONTACT_DISTANCE {
            out.angle_x += repel_angle.x * rng.gen_range(-2.0..2.0);
            out.angle_y += repel_angle.y * rng.gen_range(-2.0..2.0);
        } else {
            out.direction += (away / distance) * falloff(distance);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn falloff_is_one_at_contact_and_strictly_decreasing() {
        assert_eq!(falloff(0.0), 1.0);
        let mut prev = falloff(0.0);
        for i in 1..2000 {
            let v = falloff(i as f32 * 0.05);
            assert!(v > 0.0 && v <= 1.0);
            assert!(v < prev);
            prev = v;
        }
    }

    #[test]
    fn no_neighbors_means_no_repulsion() {
        let mut rng = SmallRng::seed_from_u64(1);
        let r = accumulate(Vec3::ZERO, std::iter::empty(), &mut rng, Vec2::splat(270.0));
        assert_eq!(r, Repulsion::ZERO);
    }

    #[test]
    fn near_contact_adds_only_jitter() {
        let mut rng = SmallRng::seed_from_u64(11);
        let me = Vec3::new(1.0, 1.0, 1.0);
        let other = me + Vec3::new(0.01, 0.0, 0.0);
        let r = accumulate(me, [other], &mut rng, Vec2::new(180.0, 360.0));
        assert_eq!(r.direction, Vec3::ZERO);
        assert!(r.has_jitter());
        assert!(r.angle_x.abs() <= 360.0);
        assert!(r.angle_y.abs() <= 720.0);
    }

    #[test]
    fn distant_neighbor_pushes_away_with_falloff_weight() {
        let mut rng = SmallRng::seed_from_u64(3);
        let r = accumulate(Vec3::ZERO, [Vec3::new(0.0, 0.0, 3.0)], &mut rng, Vec2::splat(270.0));
        assert!(!r.has_jitter());
        assert!((r.direction - Vec3::new(0.0, 0.0, -0.25)).length() < 1e-6);
    }

    #[test]
    fn closer_neighbors_push_harder() {
        let mut rng = SmallRng::seed_from_u64(3);
        let near = accumulate(Vec3::ZERO, [Vec3::X * 0.5], &mut rng, Vec2::ZERO);
        let far = accumulate(Vec3::ZERO, [Vec3::X * 5.0], &mut rng, Vec2::ZERO);
        assert!(near.direction.length() > far.direction.length());
    }
}
