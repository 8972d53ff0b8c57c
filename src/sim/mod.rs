//! Particle simulation
//!
//! Everything that decides where particles are lives here. This module must
//! stay deterministic:
//! - Time only comes in as a tick argument
//! - Randomness only from the injected source
//! - Stable iteration order (by particle ID)
//! - No windowing or platform dependencies

pub mod color;
pub mod kinematics;
pub mod random;
pub mod state;
pub mod tick;

pub use color::ParticleColor;
pub use kinematics::{Launch, is_out_of_bounds, to_surface_coords};
pub use random::RandomSource;
pub use state::{Particle, ParticleId, ParticleRegistry, SimStats, Simulation};
pub use tick::SimulateReport;
