use flock_sim::engine::config::POPULATION_STEP;
use flock_sim::engine::homing::{self, HOME_BLEND_MAX};
use flock_sim::engine::repulsion::{self, NEAR_CONTACT_DISTANCE};
use flock_sim::engine::sampler::sample_window;
use flock_sim::engine::{AgentTransform, Simulation, SimulationConfig, SimulationParams};
use glam::{Quat, Vec2, Vec3};
use rand::SeedableRng;
use rand::rngs::SmallRng;

fn config(population: usize, seed: u64) -> SimulationConfig {
    SimulationConfig { population, seed, ..Default::default() }
}

#[test]
fn orientations_stay_unit_after_many_ticks() {
    let mut sim = Simulation::new(config(1000, 21)).expect("valid config");
    for _ in 0..30 {
        sim.run_tick(0.015);
        for t in sim.transforms() {
            assert!((t.orientation.length() - 1.0).abs() < 1e-4, "{t:?}");
            assert!(t.position.is_finite());
        }
    }
}

#[test]
fn identical_starting_transforms_stay_well_defined() {
    // Every agent stacked on the same point with the same heading.
    let flock = vec![AgentTransform::default(); 64];
    let mut sim = Simulation::with_transforms(SimulationParams::default(), 3, 8, flock).unwrap();
    for _ in 0..10 {
        sim.run_tick(0.015);
    }
    assert!(sim.transforms().iter().all(AgentTransform::is_valid));
}

#[test]
fn sampler_windows_never_leave_the_buffer() {
    let mut rng = SmallRng::seed_from_u64(0xABCD);
    for len in 0..40usize {
        for search_range in 1..12usize {
            let w = sample_window(len, search_range, &mut rng);
            assert!(w.start <= w.end);
            assert!(w.end <= len);
            if len > 0 {
                assert!(w.start < len);
            }
        }
    }
}

#[test]
fn falloff_shape() {
    assert_eq!(repulsion::falloff(0.0), 1.0);
    assert!(repulsion::falloff(1.0) < repulsion::falloff(0.5));
    assert!(repulsion::falloff(1.0e6) > 0.0);
}

#[test]
fn lone_agent_at_home_keeps_heading_and_moves_forward() {
    let orientation = Quat::from_euler(glam::EulerRot::YXZ, 0.4, -0.2, 0.1);
    let start = Vec3::new(3.0, -1.0, 2.0);
    let (speed, dt) = (0.75, 0.2);
    let moved = start + (orientation * Vec3::Z) * speed * dt;

    let params = SimulationParams { move_speed: speed, home_center: moved, ..Default::default() };
    let agent = AgentTransform::new(start, orientation, Vec3::splat(1.5));
    let mut sim = Simulation::with_transforms(params, 9, 1, vec![agent]).unwrap();
    sim.run_tick(dt);

    let out = sim.transforms()[0];
    assert_eq!(out.position, moved);
    assert!(out.orientation.abs_diff_eq(orientation, 1e-5));
    assert_eq!(out.scale, agent.scale);
}

#[test]
fn home_factor_is_clamped_everywhere() {
    for d in [0.0f32, 0.1, 9.99, 10.0, 10.01, 1e3, 1e9, f32::MAX] {
        let f = homing::home_factor(d, 10.0);
        assert!((0.0..=1.0).contains(&f), "d={d} f={f}");
    }
}

#[test]
fn same_seed_same_flock() {
    let mut a = Simulation::new(config(800, 77)).unwrap();
    let mut b = Simulation::new(config(800, 77)).unwrap();
    assert_eq!(a.transforms(), b.transforms());
    a.run_tick(0.015);
    b.run_tick(0.015);
    assert_eq!(a.transforms(), b.transforms());
}

#[test]
fn straying_agent_turns_toward_home_by_agility() {
    // population 1, home radius 10, agent 20 away: home factor saturates and
    // the target is the pure "look at centre" rotation.
    let params = SimulationParams {
        move_speed: 0.0,
        home_center: Vec3::ZERO,
        home_radius: 10.0,
        agility: 0.2,
        ..Default::default()
    };
    let position = Vec3::new(20.0, 0.0, 0.0);
    let current = Quat::from_rotation_x(-0.5);
    let mut sim = Simulation::with_transforms(
        params,
        1,
        1,
        vec![AgentTransform::new(position, current, Vec3::ONE)],
    )
    .unwrap();
    sim.run_tick(0.015);

    assert_eq!(homing::home_factor(position.length(), params.home_radius), 1.0);
    assert_eq!(HOME_BLEND_MAX * homing::home_factor(20.0, 10.0), 0.95);

    let look_home = homing::look_rotation(-position, params.home_up).unwrap();
    let expected = current.slerp(look_home, params.agility).normalize();
    let got = sim.transforms()[0].orientation;
    assert!(got.abs_diff_eq(expected, 1e-4) || got.abs_diff_eq(-expected, 1e-4), "{got:?} vs {expected:?}");
}

#[test]
fn touching_agents_only_jitter() {
    let mut rng = SmallRng::seed_from_u64(2024);
    let me = Vec3::new(0.5, 0.5, 0.5);
    let other = me + Vec3::new(0.0, 0.01, 0.0);
    assert!(me.distance(other) < NEAR_CONTACT_DISTANCE);

    let r = repulsion::accumulate(me, [other], &mut rng, Vec2::new(270.0, 270.0));
    assert_eq!(r.direction, Vec3::ZERO);
    assert!(r.angle_x != 0.0 || r.angle_y != 0.0);
}

#[test]
fn growing_adds_exactly_one_step_of_fresh_agents() {
    let mut sim = Simulation::new(config(600, 5)).unwrap();
    sim.run_tick(0.015);
    let before = sim.transforms().to_vec();

    sim.grow_population();

    let after = sim.transforms();
    assert_eq!(after.len(), before.len() + POPULATION_STEP);
    assert_eq!(&after[..before.len()], &before[..]);
    assert!(after[before.len()..].iter().all(AgentTransform::is_valid));

    // The grown flock keeps ticking.
    sim.run_tick(0.015);
    assert_eq!(sim.population(), 600 + POPULATION_STEP);
}

#[test]
fn params_change_applies_on_next_tick() {
    let mut sim = Simulation::new(config(200, 1)).unwrap();
    let frozen = SimulationParams { move_speed: 0.0, ..*sim.params() };
    sim.set_params(frozen).unwrap();
    let before: Vec<_> = sim.transforms().iter().map(|t| t.position).collect();
    sim.run_tick(0.5);
    let after: Vec<_> = sim.transforms().iter().map(|t| t.position).collect();
    assert_eq!(before, after);
}
