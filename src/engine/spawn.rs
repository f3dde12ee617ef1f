// Initial transforms for new agents.

use std::f32::consts::TAU;

use glam::{Quat, Vec3};
use rand::Rng;

use super::components::AgentTransform;
use super::config::SpawnConfig;
use super::random::RandomSource;

/// One agent placed uniformly inside the spawn sphere, facing a uniformly
/// random direction.
pub fn spawn_agent<R: Rng + ?Sized>(rng: &mut R, spawn: &SpawnConfig) -> AgentTransform {
    let offset = if spawn.radius > 0.0 {
        random_in_unit_sphere(rng) * spawn.radius
    } else {
        Vec3::ZERO
    };

    AgentTransform {
        position: spawn.center + offset,
        orientation: random_orientation(rng),
        scale: Vec3::splat(spawn.scale),
    }
}

/// Spawn agents `first..first + count`, each from its own index-keyed stream.
pub fn spawn_range(
    random: &RandomSource,
    spawn: &SpawnConfig,
    first: usize,
    count: usize,
) -> impl Iterator<Item = AgentTransform> {
    let (random, spawn) = (*random, *spawn);
    (first..first + count).map(move |index| spawn_agent(&mut random.spawn_rng(index), &spawn))
}

fn random_in_unit_sphere<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    loop {
        let p = Vec3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
        if p.length_squared() <= 1.0 {
            return p;
        }
    }
}

// Shoemake's method: uniform over SO(3).
fn random_orientation<R: Rng + ?Sized>(rng: &mut R) -> Quat {
    let u1: f32 = rng.r#gen();
    let u2: f32 = rng.gen_range(0.0..TAU);
    let u3: f32 = rng.gen_range(0.0..TAU);
    let a = (1.0 - u1).sqrt();
    let b = u1.sqrt();
    Quat::from_xyzw(a * u2.sin(), a * u2.cos(), b * u3.sin(), b * u3.cos()).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawned_agents_are_valid_and_inside_sphere() {
        let random = RandomSource::new(99);
        let spawn = SpawnConfig { center: Vec3::new(1.0, 2.0, 3.0), radius: 4.0, scale: 0.5 };
        for t in spawn_range(&random, &spawn, 0, 500) {
            assert!(t.is_valid());
            assert!(t.position.distance(spawn.center) <= 4.0 + 1e-4);
            assert_eq!(t.scale, Vec3::splat(0.5));
        }
    }

    #[test]
    fn zero_radius_stacks_on_center() {
        let random = RandomSource::new(1);
        let spawn = SpawnConfig { radius: 0.0, ..Default::default() };
        assert!(spawn_range(&random, &spawn, 0, 10).all(|t| t.position == spawn.center));
    }

    #[test]
    fn spawning_is_keyed_by_index() {
        let random = RandomSource::new(5);
        let spawn = SpawnConfig::default();
        let all: Vec<_> = spawn_range(&random, &spawn, 0, 20).collect();
        let tail: Vec<_> = spawn_range(&random, &spawn, 10, 10).collect();
        assert_eq!(&all[10..], &tail[..]);
    }
}
