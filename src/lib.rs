// Flocking simulation kernel.
// The `engine` module is the whole simulation; the `flock_sim` binary is a
// thin viewer on top of it.

pub mod engine;
