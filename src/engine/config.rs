// Simulation configuration.
//
// Plain structs with defaults; no file format. The viewer (or any other host)
// builds one, optionally tweaks it, and hands it to `Simulation`.

use glam::{Vec2, Vec3};
use log::warn;
use thiserror::Error;

/// Smallest population accepted by `Simulation::new` and `set_population`.
pub const MIN_POPULATION: usize = 200;
/// Largest population accepted by `Simulation::new` and `set_population`.
pub const MAX_POPULATION: usize = 100_000;
/// Agents added or removed by one grow/shrink request.
pub const POPULATION_STEP: usize = 200;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f32 },
    #[error("home_radius must be > 0, got {0}")]
    HomeRadius(f32),
    #[error("agility must be in (0, 1], got {0}")]
    Agility(f32),
    #[error("search_range must be >= 1")]
    SearchRange,
    #[error("home_up must be a non-zero vector")]
    HomeUp,
    #[error("batch_size must be >= 1")]
    BatchSize,
    #[error("tick_interval must be >= 0, got {0}")]
    TickInterval(f32),
}

/// Per-tick tuning knobs. Read-only while a tick runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationParams {
    /// Forward speed in units per second.
    pub move_speed: f32,
    /// Maximum extra slots past the window start an agent may inspect. >= 1.
    pub search_range: usize,
    /// Near-contact kick scale in degrees. `x` drives yaw, `y` drives pitch.
    pub repel_angle: Vec2,
    pub home_center: Vec3,
    /// Distance at which the homing pull saturates. > 0.
    pub home_radius: f32,
    /// Unit up vector for look rotations.
    pub home_up: Vec3,
    /// Fraction of the gap to the target orientation closed each tick. (0, 1].
    pub agility: f32,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            move_speed: 0.5,
            search_range: 10,
            repel_angle: Vec2::new(270.0, 270.0),
            home_center: Vec3::ZERO,
            home_radius: 5.0,
            home_up: Vec3::Y,
            agility: 0.05,
        }
    }
}

impl SimulationParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        finite("move_speed", self.move_speed)?;
        finite("home_radius", self.home_radius)?;
        finite("agility", self.agility)?;
        finite("repel_angle.x", self.repel_angle.x)?;
        finite("repel_angle.y", self.repel_angle.y)?;
        for (axis, v) in ["home_center.x", "home_center.y", "home_center.z"]
            .into_iter()
            .zip(self.home_center.to_array())
        {
            finite(axis, v)?;
        }
        if self.search_range == 0 {
            return Err(ConfigError::SearchRange);
        }
        if self.home_radius <= 0.0 {
            return Err(ConfigError::HomeRadius(self.home_radius));
        }
        if !(self.agility > 0.0 && self.agility <= 1.0) {
            return Err(ConfigError::Agility(self.agility));
        }
        if self.home_up.try_normalize().is_none() {
            return Err(ConfigError::HomeUp);
        }
        Ok(())
    }

    /// Copy with every field forced into its legal range.
    ///
    /// Non-finite values fall back to the defaults. `home_up` is renormalised.
    pub fn sanitized(&self) -> Self {
        let d = Self::default();
        let pick = |v: f32, fallback: f32| if v.is_finite() { v } else { fallback };
        let fixed = Self {
            move_speed: pick(self.move_speed, d.move_speed),
            search_range: self.search_range.max(1),
            repel_angle: if self.repel_angle.is_finite() { self.repel_angle } else { d.repel_angle },
            home_center: if self.home_center.is_finite() { self.home_center } else { d.home_center },
            home_radius: pick(self.home_radius, d.home_radius).max(f32::EPSILON),
            home_up: self.home_up.try_normalize().unwrap_or(d.home_up),
            agility: pick(self.agility, d.agility).clamp(f32::EPSILON, 1.0),
        };
        if fixed != *self {
            warn!("simulation params out of range, sanitised: {:?} -> {:?}", self, fixed);
        }
        fixed
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { field, value })
    }
}

/// Where newly created agents appear.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnConfig {
    pub center: Vec3,
    /// Agents are placed uniformly inside this sphere. 0 stacks them on `center`.
    pub radius: f32,
    /// Uniform scale given to every new agent.
    pub scale: f32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self { center: Vec3::ZERO, radius: 0.5, scale: 1.0 }
    }
}

/// Everything needed to build a `Simulation`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    /// Clamped to `[MIN_POPULATION, MAX_POPULATION]`.
    pub population: usize,
    pub seed: u64,
    /// Agents per rayon task. Tuning only; any value >= 1 is correct.
    pub batch_size: usize,
    /// Minimum seconds between ticks (see `TickClock`).
    pub tick_interval: f32,
    pub spawn: SpawnConfig,
    pub params: SimulationParams,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            population: 5000,
            seed: 1,
            batch_size: 64,
            tick_interval: 0.015,
            spawn: SpawnConfig::default(),
            params: SimulationParams::default(),
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.params.validate()?;
        if self.batch_size == 0 {
            return Err(ConfigError::BatchSize);
        }
        if !(self.tick_interval >= 0.0) {
            return Err(ConfigError::TickInterval(self.tick_interval));
        }
        finite("spawn.radius", self.spawn.radius)?;
        finite("spawn.scale", self.spawn.scale)?;
        Ok(())
    }

    pub fn clamp_population(population: usize) -> usize {
        population.clamp(MIN_POPULATION, MAX_POPULATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(SimulationConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_out_of_range_params() {
        let p = SimulationParams { agility: 0.0, ..Default::default() };
        assert_eq!(p.validate(), Err(ConfigError::Agility(0.0)));

        let p = SimulationParams { home_radius: -1.0, ..Default::default() };
        assert_eq!(p.validate(), Err(ConfigError::HomeRadius(-1.0)));

        let p = SimulationParams { search_range: 0, ..Default::default() };
        assert_eq!(p.validate(), Err(ConfigError::SearchRange));

        let p = SimulationParams { home_up: Vec3::ZERO, ..Default::default() };
        assert_eq!(p.validate(), Err(ConfigError::HomeUp));

        let c = SimulationConfig { batch_size: 0, ..Default::default() };
        assert_eq!(c.validate(), Err(ConfigError::BatchSize));
    }

    #[test]
    fn sanitized_params_always_validate() {
        let bad = SimulationParams {
            move_speed: f32::NAN,
            search_range: 0,
            repel_angle: Vec2::new(f32::INFINITY, 1.0),
            home_center: Vec3::ZERO,
            home_radius: -3.0,
            home_up: Vec3::new(0.0, 5.0, 0.0),
            agility: 7.0,
        };
        let fixed = bad.sanitized();
        assert_eq!(fixed.validate(), Ok(()));
        assert_eq!(fixed.agility, 1.0);
        assert_eq!(fixed.search_range, 1);
        assert!(fixed.home_up.is_normalized());
    }

    #[test]
    fn population_is_clamped() {
        assert_eq!(SimulationConfig::clamp_population(3), MIN_POPULATION);
        assert_eq!(SimulationConfig::clamp_population(10_000_000), MAX_POPULATION);
        assert_eq!(SimulationConfig::clamp_population(1234), 1234);
    }
}
