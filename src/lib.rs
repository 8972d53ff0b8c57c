//! Fireworks - a decorative particle overlay
//!
//! Core modules:
//! - `sim`: Particle simulation (kinematics, sampling, registry, ticks)
//! - `surface`: Drawable-area abstraction plus an in-memory implementation
//! - `clock`: Monotonic time sources
//! - `scheduler`: The two periodic timers driving spawn/simulate ticks
//! - `display`: DPI scale and taskbar offset helpers
//! - `settings`: Host configuration

pub mod clock;
pub mod display;
pub mod error;
pub mod scheduler;
pub mod settings;
pub mod sim;
pub mod surface;

pub use clock::{Clock, ManualClock, MonotonicClock, Timestamp};
pub use error::{SettingsError, SurfaceError};
pub use scheduler::Scheduler;
pub use settings::Settings;
pub use sim::Simulation;
pub use surface::{HeadlessSurface, Surface};

/// Simulation constants
pub mod consts {
    /// Downward acceleration (units/s²)
    pub const GRAVITY: f64 = 98.0;
    /// Particles further than this from the launch point horizontally are removed
    pub const MAX_HORIZONTAL_DISTANCE: f64 = 200.0;
    /// Particles that fall below -MAX_VERTICAL_DISTANCE are removed
    pub const MAX_VERTICAL_DISTANCE: f64 = 100.0;

    /// Launch speed range: [MIN_LAUNCH_SPEED, MIN_LAUNCH_SPEED + LAUNCH_SPEED_SPREAD)
    pub const MIN_LAUNCH_SPEED: f64 = 200.0;
    pub const LAUNCH_SPEED_SPREAD: f64 = 100.0;

    /// Launch angle range in degrees: [MIN_LAUNCH_ANGLE, MIN_LAUNCH_ANGLE + LAUNCH_ANGLE_SPREAD)
    pub const MIN_LAUNCH_ANGLE: f64 = 45.0;
    pub const LAUNCH_ANGLE_SPREAD: f64 = 90.0;

    /// Diameter of a particle dot (device-independent units)
    pub const PARTICLE_SIZE: f64 = 5.0;

    /// Default spawn tick period (50 Hz)
    pub const SPAWN_INTERVAL_MS: u64 = 20;
    /// Default simulate tick period (50 Hz)
    pub const SIMULATE_INTERVAL_MS: u64 = 20;
    /// Maximum ticks a single timer may fire per pump before backlog is dropped
    pub const MAX_CATCH_UP_TICKS: u32 = 8;
}

/// Convert degrees to radians
#[inline]
pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}
