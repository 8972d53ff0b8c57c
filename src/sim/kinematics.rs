//! Projectile motion and the bounds policy
//!
//! Positions are in simulation space: origin at the launch point, x to the
//! right, y up. Surfaces use screen space (y down), see [`to_surface_coords`].

use glam::DVec2;

use super::random::RandomSource;
use crate::consts::*;
use crate::degrees_to_radians;

/// Immutable launch parameters of a particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Launch {
    /// Initial speed (units/s)
    pub speed: f64,
    /// Launch angle from horizontal, degrees
    pub angle_degrees: f64,
}

impl Launch {
    pub fn new(speed: f64, angle_degrees: f64) -> Self {
        Self {
            speed,
            angle_degrees,
        }
    }

    /// Draw a speed in [200, 300) then an angle in [45, 135)
    pub fn sample<R: RandomSource + ?Sized>(rng: &mut R) -> Self {
        let speed = rng.next_uniform() * LAUNCH_SPEED_SPREAD + MIN_LAUNCH_SPEED;
        let angle_degrees = rng.next_uniform() * LAUNCH_ANGLE_SPREAD + MIN_LAUNCH_ANGLE;
        Self {
            speed,
            angle_degrees,
        }
    }

    /// Initial velocity vector
    pub fn velocity(&self) -> DVec2 {
        let angle = degrees_to_radians(self.angle_degrees);
        DVec2::new(self.speed * angle.cos(), self.speed * angle.sin())
    }

    /// Displacement from the launch point after `elapsed` seconds
    pub fn displacement(&self, elapsed: f64) -> DVec2 {
        let v = self.velocity();
        DVec2::new(
            v.x * elapsed,
            v.y * elapsed - 0.5 * GRAVITY * elapsed * elapsed,
        )
    }
}

/// True once a particle has left the visible region
pub fn is_out_of_bounds(pos: DVec2) -> bool {
    pos.x.abs() > MAX_HORIZONTAL_DISTANCE || pos.y < -MAX_VERTICAL_DISTANCE
}

/// Simulation space -> surface space.
///
/// The launch point sits at the horizontal middle of the bottom edge.
pub fn to_surface_coords(pos: DVec2, bounds: (f64, f64)) -> DVec2 {
    let (width, height) = bounds;
    DVec2::new(pos.x + width / 2.0, height - pos.y)
}
