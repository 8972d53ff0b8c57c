//! Spawn and simulate ticks
//!
//! Both ticks take the instant they run at, so a host can drive them from any
//! clock (real or manual) and replays stay exact.

use super::color::ParticleColor;
use super::kinematics::{Launch, is_out_of_bounds, to_surface_coords};
use super::random::RandomSource;
use super::state::{ParticleId, Simulation};
use crate::clock::Timestamp;
use crate::consts::PARTICLE_SIZE;
use crate::error::SurfaceError;
use crate::surface::Surface;

/// Outcome of one simulate tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimulateReport {
    /// Particles moved to their new position
    pub placed: usize,
    /// Particles that left the bounds and were removed
    pub removed: usize,
}

impl<R: RandomSource, H> Simulation<R, H> {
    /// Spawn exactly one particle with freshly sampled launch parameters.
    ///
    /// Draw order is speed, angle, color.
    pub fn spawn_tick<S>(&mut self, now: Timestamp, surface: &mut S) -> Result<ParticleId, SurfaceError>
    where
        S: Surface<Handle = H>,
    {
        let launch = Launch::sample(&mut self.rng);
        let color = ParticleColor::sample(&mut self.rng);
        self.spawn_with(now, launch, color, surface)
    }
}

impl<R, H> Simulation<R, H> {
    /// Spawn a particle with explicit parameters.
    ///
    /// The handle is created first; if that fails nothing is inserted.
    pub fn spawn_with<S>(
        &mut self,
        now: Timestamp,
        launch: Launch,
        color: ParticleColor,
        surface: &mut S,
    ) -> Result<ParticleId, SurfaceError>
    where
        S: Surface<Handle = H>,
    {
        let handle = surface.create_handle(color, PARTICLE_SIZE)?;
        let id = self.registry.insert(now, launch, color, handle);
        self.stats.spawned += 1;
        Ok(id)
    }

    /// Advance every live particle to `now`, placing or removing it.
    ///
    /// Iterates a snapshot of ids taken before any removal. The first surface
    /// error aborts the tick and is returned.
    pub fn simulate_tick<S>(&mut self, now: Timestamp, surface: &mut S) -> Result<SimulateReport, SurfaceError>
    where
        S: Surface<Handle = H>,
    {
        let bounds = surface.bounds();
        let mut report = SimulateReport::default();

        for id in self.registry.snapshot() {
            let Some(particle) = self.registry.get(id) else {
                continue;
            };
            let pos = particle.position_at(now, self.vertical_offset);

            if is_out_of_bounds(pos) {
                surface.remove_handle(particle.handle())?;
                self.registry.remove(id);
                self.stats.removed += 1;
                report.removed += 1;
            } else {
                let target = to_surface_coords(pos, bounds);
                surface.move_handle(particle.handle(), target.x, target.y)?;
                report.placed += 1;
            }
        }

        if report.removed > 0 {
            log::debug!(
                "simulate: placed {}, removed {}, live {}",
                report.placed,
                report.removed,
                self.registry.len()
            );
        }
        Ok(report)
    }

    /// Remove every particle and release its handle (shutdown).
    ///
    /// Every release is attempted. Particles whose handle the surface refused
    /// stay registered, and the first such error is returned.
    pub fn clear<S>(&mut self, surface: &mut S) -> Result<usize, SurfaceError>
    where
        S: Surface<Handle = H>,
    {
        let mut released = 0;
        let mut first_error = None;

        for id in self.registry.snapshot() {
            let Some(particle) = self.registry.get(id) else {
                continue;
            };
            match surface.remove_handle(particle.handle()) {
                Ok(()) => {
                    self.registry.remove(id);
                    self.stats.removed += 1;
                    released += 1;
                }
                Err(e) => {
                    log::warn!("Failed to release particle {}: {e}", id.0);
                    first_error.get_or_insert(e);
                }
            }
        }

        log::info!("Cleared {released} particles");
        match first_error {
            Some(e) => Err(e),
            None => Ok(released),
        }
    }
}
