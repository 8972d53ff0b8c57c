//! The two periodic timers that drive the simulation
//!
//! The host calls [`Scheduler::pump`] from its event loop with the current
//! time. Each timer fires for every period that has elapsed, capped at
//! `MAX_CATCH_UP_TICKS` per pump so a stalled host cannot trigger an
//! unbounded burst. Older periods are skipped before anything fires, so the
//! ticks that do run are the most recent ones.
//!
//! Tie-break: when a spawn tick and a simulate tick fall due at the same
//! instant, the spawn tick runs first, so a new particle is placed at its
//! launch point in the same pump.

use std::time::Duration;

use crate::clock::Timestamp;
use crate::consts::MAX_CATCH_UP_TICKS;
use crate::error::SurfaceError;
use crate::settings::Settings;
use crate::sim::{RandomSource, Simulation};
use crate::surface::Surface;

/// Which periodic process a tick belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickKind {
    Spawn,
    Simulate,
}

/// A fixed-period timer
#[derive(Debug, Clone)]
pub struct PeriodicTimer {
    interval: Duration,
    next_due: Timestamp,
    running: bool,
}

impl PeriodicTimer {
    /// Timer whose first tick is one interval after `start`
    pub fn new(interval: Duration, start: Timestamp) -> Self {
        Self {
            interval,
            next_due: start + interval,
            running: true,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Next deadline, if running
    pub fn next_due(&self) -> Option<Timestamp> {
        self.running.then_some(self.next_due)
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    fn is_due(&self, now: Timestamp) -> bool {
        self.running && self.next_due <= now
    }

    /// Consume the current deadline, returning the instant it was due at
    fn fire(&mut self) -> Timestamp {
        let due = self.next_due;
        self.next_due = due + self.interval;
        due
    }

    /// Number of deadlines at or before `now`
    fn due_count(&self, now: Timestamp) -> u32 {
        if !self.is_due(now) {
            return 0;
        }
        let behind = now.as_duration() - self.next_due.as_duration();
        let periods = behind.as_nanos() / self.interval.as_nanos().max(1) + 1;
        periods.min(u32::MAX as u128) as u32
    }

    /// Skip deadlines so at most `keep` remain due at `now`; returns how many
    /// were skipped
    fn skip_backlog(&mut self, now: Timestamp, keep: u32) -> u32 {
        let skipped = self.due_count(now).saturating_sub(keep);
        if skipped > 0 {
            self.next_due = self.next_due + self.interval * skipped;
        }
        skipped
    }
}

/// What a pump did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PumpReport {
    pub spawn_ticks: u32,
    pub simulate_ticks: u32,
    /// Ticks skipped because the host fell too far behind
    pub dropped_ticks: u32,
}

/// Owner of the spawn and simulate timers
#[derive(Debug, Clone)]
pub struct Scheduler {
    spawn: PeriodicTimer,
    simulate: PeriodicTimer,
}

impl Scheduler {
    pub fn new(spawn_interval: Duration, simulate_interval: Duration, start: Timestamp) -> Self {
        Self {
            spawn: PeriodicTimer::new(spawn_interval, start),
            simulate: PeriodicTimer::new(simulate_interval, start),
        }
    }

    pub fn from_settings(settings: &Settings, start: Timestamp) -> Self {
        Self::new(settings.spawn_interval(), settings.simulate_interval(), start)
    }

    /// False once a tick has failed
    pub fn is_running(&self) -> bool {
        self.spawn.is_running() || self.simulate.is_running()
    }

    /// Stop both timers
    pub fn stop(&mut self) {
        self.spawn.stop();
        self.simulate.stop();
    }

    /// Earliest pending deadline
    pub fn next_due(&self) -> Option<Timestamp> {
        match (self.spawn.next_due(), self.simulate.next_due()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Run every tick due at or before `now`.
    ///
    /// Any tick error halts both timers and is returned; later pumps do
    /// nothing.
    pub fn pump<R, S>(
        &mut self,
        now: Timestamp,
        sim: &mut Simulation<R, S::Handle>,
        surface: &mut S,
    ) -> Result<PumpReport, SurfaceError>
    where
        R: RandomSource,
        S: Surface,
    {
        let mut report = PumpReport {
            dropped_ticks: self.drop_backlog(now),
            ..Default::default()
        };

        while let Some(kind) = self.next_kind(now, &report) {
            let result = match kind {
                TickKind::Spawn => {
                    let at = self.spawn.fire();
                    report.spawn_ticks += 1;
                    sim.spawn_tick(at, surface).map(|_| ())
                }
                TickKind::Simulate => {
                    let at = self.simulate.fire();
                    report.simulate_ticks += 1;
                    sim.simulate_tick(at, surface).map(|_| ())
                }
            };

            if let Err(e) = result {
                log::error!("{kind:?} tick failed, stopping animation: {e}");
                self.stop();
                return Err(e);
            }
        }

        Ok(report)
    }

    /// Pick the next timer to fire, spawn first on ties
    fn next_kind(&self, now: Timestamp, report: &PumpReport) -> Option<TickKind> {
        let spawn = self.spawn.is_due(now) && report.spawn_ticks < MAX_CATCH_UP_TICKS;
        let simulate = self.simulate.is_due(now) && report.simulate_ticks < MAX_CATCH_UP_TICKS;
        match (spawn, simulate) {
            (true, true) if self.simulate.next_due < self.spawn.next_due => Some(TickKind::Simulate),
            (true, _) => Some(TickKind::Spawn),
            (false, true) => Some(TickKind::Simulate),
            (false, false) => None,
        }
    }

    fn drop_backlog(&mut self, now: Timestamp) -> u32 {
        let mut dropped = 0;
        for (name, timer) in [("spawn", &mut self.spawn), ("simulate", &mut self.simulate)] {
            let skipped = timer.skip_backlog(now, MAX_CATCH_UP_TICKS);
            if skipped > 0 {
                log::warn!("{name} timer fell behind, dropping {skipped} ticks");
                dropped += skipped;
            }
        }
        dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Launch, ParticleColor};
    use crate::surface::{HeadlessHandle, HeadlessSurface};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn ms(millis: u64) -> Timestamp {
        Timestamp::from_millis(millis)
    }

    fn setup() -> (Scheduler, Simulation<Pcg32, HeadlessHandle>, HeadlessSurface) {
        let interval = Duration::from_millis(20);
        (
            Scheduler::new(interval, interval, Timestamp::ZERO),
            Simulation::new(Pcg32::seed_from_u64(5), 0.0),
            HeadlessSurface::new(800.0, 600.0),
        )
    }

    /// Surface whose moves always fail
    struct BrokenSurface(HeadlessSurface);

    impl Surface for BrokenSurface {
        type Handle = HeadlessHandle;

        fn create_handle(&mut self, color: ParticleColor, size: f64) -> Result<HeadlessHandle, SurfaceError> {
            self.0.create_handle(color, size)
        }

        fn move_handle(&mut self, _: &HeadlessHandle, _: f64, _: f64) -> Result<(), SurfaceError> {
            Err(SurfaceError::Backend("device lost".into()))
        }

        fn remove_handle(&mut self, handle: &HeadlessHandle) -> Result<(), SurfaceError> {
            self.0.remove_handle(handle)
        }

        fn bounds(&self) -> (f64, f64) {
            self.0.bounds()
        }
    }

    #[test]
    fn test_nothing_due_before_first_interval() {
        let (mut scheduler, mut sim, mut surface) = setup();
        let report = scheduler.pump(ms(19), &mut sim, &mut surface).unwrap();
        assert_eq!(report, PumpReport::default());
        assert_eq!(scheduler.next_due(), Some(ms(20)));
    }

    #[test]
    fn test_spawn_runs_before_simulate_on_tie() {
        let (mut scheduler, mut sim, mut surface) = setup();
        let report = scheduler.pump(ms(20), &mut sim, &mut surface).unwrap();
        assert_eq!(report.spawn_ticks, 1);
        assert_eq!(report.simulate_ticks, 1);

        // The simulate tick already saw the new particle
        let particle = sim.registry().iter().next().unwrap();
        let placement = surface.placement(particle.handle()).unwrap();
        assert!(placement.pos.is_some());
    }

    #[test]
    fn test_ticks_receive_their_due_instant() {
        let (mut scheduler, mut sim, mut surface) = setup();
        scheduler.pump(ms(65), &mut sim, &mut surface).unwrap();
        let spawn_times: Vec<Timestamp> = sim.registry().iter().map(|p| p.spawn_time()).collect();
        assert_eq!(spawn_times, vec![ms(20), ms(40), ms(60)]);
        assert_eq!(scheduler.next_due(), Some(ms(80)));
    }

    #[test]
    fn test_independent_intervals() {
        let mut scheduler = Scheduler::new(Duration::from_millis(50), Duration::from_millis(20), Timestamp::ZERO);
        let mut sim: Simulation<Pcg32, HeadlessHandle> = Simulation::new(Pcg32::seed_from_u64(1), 0.0);
        let mut surface = HeadlessSurface::new(800.0, 600.0);

        let report = scheduler.pump(ms(100), &mut sim, &mut surface).unwrap();
        assert_eq!(report.spawn_ticks, 2);
        assert_eq!(report.simulate_ticks, 5);
        assert_eq!(sim.len(), 2);
    }

    #[test]
    fn test_backlog_is_capped_and_dropped() {
        let (mut scheduler, mut sim, mut surface) = setup();
        // 50 periods elapsed at once
        let report = scheduler.pump(ms(1000), &mut sim, &mut surface).unwrap();
        assert_eq!(report.spawn_ticks, MAX_CATCH_UP_TICKS);
        assert_eq!(report.simulate_ticks, MAX_CATCH_UP_TICKS);
        assert_eq!(report.dropped_ticks, 2 * (50 - MAX_CATCH_UP_TICKS));
        assert_eq!(scheduler.next_due(), Some(ms(1020)));
        assert_eq!(sim.len(), surface.handle_count());
    }

    #[test]
    fn test_stall_fires_most_recent_periods() {
        let (mut scheduler, mut sim, mut surface) = setup();
        scheduler.pump(ms(1000), &mut sim, &mut surface).unwrap();

        let spawn_times: Vec<Timestamp> = sim.registry().iter().map(|p| p.spawn_time()).collect();
        let expected: Vec<Timestamp> = (43..=50).map(|i| ms(i * 20)).collect();
        assert_eq!(spawn_times, expected);

        // Next frame: every catch-up particle is still near its launch point
        scheduler.pump(ms(1020), &mut sim, &mut surface).unwrap();
        for particle in sim.registry().iter() {
            let pos = particle.position_at(ms(1020), 0.0);
            assert!(pos.y < 50.0, "particle already {} units up", pos.y);
        }
    }

    #[test]
    fn test_tick_failure_stops_both_timers() {
        let interval = Duration::from_millis(20);
        let mut scheduler = Scheduler::new(interval, interval, Timestamp::ZERO);
        let mut sim: Simulation<Pcg32, HeadlessHandle> = Simulation::new(Pcg32::seed_from_u64(1), 0.0);
        let mut surface = BrokenSurface(HeadlessSurface::new(800.0, 600.0));

        let result = scheduler.pump(ms(20), &mut sim, &mut surface);
        assert!(result.is_err());
        assert!(!scheduler.is_running());
        assert_eq!(scheduler.next_due(), None);

        // Halted: nothing else is spawned
        let report = scheduler.pump(ms(200), &mut sim, &mut surface).unwrap();
        assert_eq!(report, PumpReport::default());
        assert_eq!(sim.len(), 1);
    }

    #[test]
    fn test_steady_run_keeps_invariant() {
        let (mut scheduler, mut sim, mut surface) = setup();
        sim.spawn_with(Timestamp::ZERO, Launch::new(250.0, 45.0), ParticleColor::Gold, &mut surface)
            .unwrap();
        for step in 1..=500u64 {
            scheduler.pump(ms(step * 20), &mut sim, &mut surface).unwrap();
            assert_eq!(sim.len(), surface.handle_count());
        }
        assert_eq!(sim.stats().spawned, 501);
        assert!(sim.stats().removed > 0);
    }
}
