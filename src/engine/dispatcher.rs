// Tick driver: fans the per-agent step out over rayon and owns the buffers.
//
// Double-buffered. Every task reads `front` (the flock as it was when the tick
// started) and writes only its own chunk of `back`. After the join the two are
// swapped, so results never depend on which task ran first.
//
// Resizing and restarting need `&mut self`, so they cannot overlap a tick.

use std::time::Instant;

use log::{debug, info};
use rayon::prelude::*;

use super::components::{AgentTransform, TransformBuffer};
use super::config::{ConfigError, POPULATION_STEP, SimulationConfig, SimulationParams, SpawnConfig};
use super::integrator;
use super::random::RandomSource;
use super::spawn;

/// Bookkeeping from the most recent tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickStats {
    /// Ticks completed since construction or the last restart.
    pub tick: u64,
    pub population: usize,
    /// Wall time of the last `run_tick`, in milliseconds.
    pub last_tick_ms: f32,
}

pub struct Simulation {
    front: TransformBuffer,
    back: TransformBuffer,
    params: SimulationParams,
    spawn: SpawnConfig,
    random: RandomSource,
    batch_size: usize,
    stats: TickStats,
}

impl Simulation {
    /// Build a flock of `config.population` agents (clamped to the legal range),
    /// spawned from `config.spawn`.
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let population = SimulationConfig::clamp_population(config.population);
        let random = RandomSource::new(config.seed);
        let mut front = TransformBuffer::with_capacity(population);
        for t in spawn::spawn_range(&random, &config.spawn, 0, population) {
            front.push(t);
        }

        info!(
            "simulation created: {} agents, seed {}, batch {}",
            population, config.seed, config.batch_size
        );

        Ok(Self::from_parts(front, config.params, config.spawn, random, config.batch_size))
    }

    /// Build a flock from explicit starting transforms. No population clamp.
    pub fn with_transforms(
        params: SimulationParams,
        seed: u64,
        batch_size: usize,
        transforms: Vec<AgentTransform>,
    ) -> Result<Self, ConfigError> {
        params.validate()?;
        if batch_size == 0 {
            return Err(ConfigError::BatchSize);
        }
        Ok(Self::from_parts(
            TransformBuffer::new(transforms),
            params,
            SpawnConfig::default(),
            RandomSource::new(seed),
            batch_size,
        ))
    }

    fn from_parts(
        front: TransformBuffer,
        params: SimulationParams,
        spawn: SpawnConfig,
        random: RandomSource,
        batch_size: usize,
    ) -> Self {
        let back = front.clone();
        let stats = TickStats { tick: 0, population: front.len(), last_tick_ms: 0.0 };
        Self { front, back, params, spawn, random, batch_size, stats }
    }

    /// Advance every agent by `delta_time` seconds. Returns once all slots are written.
    pub fn run_tick(&mut self, delta_time: f32) {
        debug_assert_eq!(self.front.len(), self.back.len(), "buffers resized mid-tick");

        let started = Instant::now();
        let snapshot = self.front.as_slice();
        let params = &self.params;
        let random = self.random;
        let tick = self.stats.tick;
        let batch = self.batch_size;

        self.back
            .as_mut_slice()
            .par_chunks_mut(batch)
            .enumerate()
            .for_each(|(chunk, slots)| {
                let first = chunk * batch;
                for (offset, slot) in slots.iter_mut().enumerate() {
                    let index = first + offset;
                    let mut rng = random.agent_rng(tick, index);
                    *slot = integrator::step(&snapshot[index], index, snapshot, delta_time, params, &mut rng);
                }
            });

        std::mem::swap(&mut self.front, &mut self.back);

        self.stats = TickStats {
            tick: tick + 1,
            population: self.front.len(),
            last_tick_ms: started.elapsed().as_secs_f32() * 1000.0,
        };
    }

    /// Resize the flock. New agents are spawned; existing ones keep their transforms.
    /// Clamped to `[MIN_POPULATION, MAX_POPULATION]`.
    pub fn set_population(&mut self, population: usize) {
        let target = SimulationConfig::clamp_population(population);
        let current = self.front.len();
        if target == current {
            return;
        }

        if target > current {
            for t in spawn::spawn_range(&self.random, &self.spawn, current, target - current) {
                self.front.push(t);
            }
        } else {
            self.front.truncate(target);
        }
        self.back.copy_from(&self.front);
        self.stats.population = target;

        debug!("population {} -> {}", current, target);
    }

    pub fn grow_population(&mut self) {
        self.set_population(self.front.len() + POPULATION_STEP);
    }

    pub fn shrink_population(&mut self) {
        self.set_population(self.front.len().saturating_sub(POPULATION_STEP));
    }

    /// Respawn the current population from the seed and reset the tick counter.
    pub fn restart(&mut self) {
        let population = self.front.len();
        self.front.truncate(0);
        for t in spawn::spawn_range(&self.random, &self.spawn, 0, population) {
            self.front.push(t);
        }
        self.back.copy_from(&self.front);
        self.stats = TickStats { tick: 0, population, last_tick_ms: 0.0 };

        debug!("simulation restarted with {} agents", population);
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    /// Replace the tuning knobs. Takes effect on the next tick.
    pub fn set_params(&mut self, params: SimulationParams) -> Result<(), ConfigError> {
        params.validate()?;
        self.params = params;
        Ok(())
    }

    pub fn set_spawn(&mut self, spawn: SpawnConfig) {
        self.spawn = spawn;
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn set_batch_size(&mut self, batch_size: usize) -> Result<(), ConfigError> {
        if batch_size == 0 {
            return Err(ConfigError::BatchSize);
        }
        self.batch_size = batch_size;
        Ok(())
    }

    pub fn population(&self) -> usize {
        self.front.len()
    }

    pub fn stats(&self) -> TickStats {
        self.stats
    }

    /// Published state: the flock as of the last completed tick.
    pub fn buffer(&self) -> &TransformBuffer {
        &self.front
    }

    pub fn transforms(&self) -> &[AgentTransform] {
        self.front.as_slice()
    }
}
