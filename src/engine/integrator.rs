// Per-agent update: move, look around, turn.

use rand::Rng;

use super::components::AgentTransform;
use super::config::SimulationParams;
use super::homing;
use super::repulsion;
use super::sampler;

/// Advance agent `index` by one tick.
///
/// `snapshot` is the whole flock as it was before this tick started; only the
/// returned value is new. The agent skips its own slot when it falls inside
/// the sampled window.
pub fn step<R: Rng + ?Sized>(
    agent: &AgentTransform,
    index: usize,
    snapshot: &[AgentTransform],
    delta_time: f32,
    params: &SimulationParams,
    rng: &mut R,
) -> AgentTransform {
    let position = agent.position + agent.forward() * params.move_speed * delta_time;

    let window = sampler::sample_window(snapshot.len(), params.search_range, rng);
    let neighbors = snapshot[window.range()]
        .iter()
        .enumerate()
        .filter(|&(offset, _)| window.start + offset != index)
        .map(|(_, other)| other.position);
    let repulsion = repulsion::accumulate(position, neighbors, rng, params.repel_angle);

    let target = homing::blend(
        position,
        params.home_center,
        params.home_radius,
        &repulsion,
        params.home_up,
        agent.orientation,
    );

    AgentTransform {
        position,
        orientation: agent.orientation.slerp(target, params.agility).normalize(),
        scale: agent.scale,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Quat, Vec3};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn lone_agent_at_home_only_moves_forward() {
        let orientation = Quat::from_rotation_y(0.3);
        let params = SimulationParams { move_speed: 2.0, home_center: Vec3::ZERO, ..Default::default() };
        let dt = 0.5;
        // Start one step "behind" home so the moved position lands on the centre.
        let forward = orientation * Vec3::Z;
        let start = -forward * params.move_speed * dt;
        let agent = AgentTransform::new(start, orientation, Vec3::ONE);

        let mut rng = SmallRng::seed_from_u64(4);
        let out = step(&agent, 0, &[agent], dt, &params, &mut rng);

        assert!((out.position - (start + forward * params.move_speed * dt)).length() < 1e-6);
        assert!(out.orientation.abs_diff_eq(orientation, 1e-5));
        assert_eq!(out.scale, agent.scale);
    }

    #[test]
    fn orientation_stays_unit_length() {
        let params = SimulationParams::default();
        let flock: Vec<_> = (0..32)
            .map(|i| AgentTransform::from_position(Vec3::new(i as f32 * 0.01, 0.0, 0.0)))
            .collect();
        let mut rng = SmallRng::seed_from_u64(77);
        for (i, agent) in flock.iter().enumerate() {
            let out = step(agent, i, &flock, 0.016, &params, &mut rng);
            assert!(out.is_valid(), "{out:?}");
        }
    }

    #[test]
    fn agility_one_snaps_to_target() {
        let params = SimulationParams {
            agility: 1.0,
            move_speed: 0.0,
            home_radius: 1.0,
            ..Default::default()
        };
        let agent = AgentTransform::from_position(Vec3::new(0.0, 0.0, 50.0));
        let mut rng = SmallRng::seed_from_u64(0);
        let out = step(&agent, 0, &[agent], 0.1, &params, &mut rng);
        // Far outside the radius with no neighbours: 95% of the way to "look home",
        // and the raw look already is "look home".
        assert!((out.forward() - Vec3::NEG_Z).length() < 1e-4);
    }
}
