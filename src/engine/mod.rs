// Engine module - flocking kernel
//
// Leaves first: components -> random -> sampler -> repulsion -> homing ->
// integrator -> dispatcher. `config`, `spawn` and `clock` are the host-facing
// pieces around them.

pub mod clock;
pub mod components;
pub mod config;
pub mod dispatcher;
pub mod homing;
pub mod integrator;
pub mod random;
pub mod repulsion;
pub mod sampler;
pub mod spawn;

// Re-export commonly used items
pub use clock::TickClock;
pub use components::{AgentTransform, TransformBuffer};
pub use config::{ConfigError, SimulationConfig, SimulationParams, SpawnConfig};
pub use dispatcher::{Simulation, TickStats};
pub use random::RandomSource;
