//! Fireworks headless host
//!
//! Drives the simulation against an in-memory surface on the monotonic clock.
//! A windowed host would swap `HeadlessSurface` for its own `Surface` and call
//! `Scheduler::pump` from its event loop in the same way.
//!
//! Usage: `fireworks [settings.json]`

use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use rand::SeedableRng;
use rand_pcg::Pcg32;

use fireworks::{Clock, HeadlessSurface, MonotonicClock, Scheduler, Settings, Simulation};

/// How often the host logs population stats
const REPORT_INTERVAL: Duration = Duration::from_secs(5);

fn main() {
    env_logger::init();
    log::info!("Fireworks (headless) starting...");

    let path = std::env::args().nth(1).map(PathBuf::from);
    let settings = match Settings::load(path.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    let seed = settings.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default()
    });
    log::info!("Seed: {seed}");

    let clock = MonotonicClock::new();
    let mut surface = HeadlessSurface::new(settings.surface_width, settings.surface_height);
    let mut sim = Simulation::new(Pcg32::seed_from_u64(seed), settings.effective_vertical_offset());
    let mut scheduler = Scheduler::from_settings(&settings, clock.now());
    let mut next_report = clock.now() + REPORT_INTERVAL;

    while let Some(due) = scheduler.next_due() {
        let now = clock.now();
        if due > now {
            std::thread::sleep(due.as_duration() - now.as_duration());
        }

        let now = clock.now();
        if let Err(e) = scheduler.pump(now, &mut sim, &mut surface) {
            log::error!("Animation halted: {e}");
            if let Err(e) = sim.clear(&mut surface) {
                log::error!("Failed to release particles: {e}");
            }
            std::process::exit(1);
        }

        if now >= next_report {
            let stats = sim.stats();
            log::info!(
                "live {} (spawned {}, removed {}), handles {}",
                sim.len(),
                stats.spawned,
                stats.removed,
                surface.handle_count()
            );
            next_report = now + REPORT_INTERVAL;
        }
    }
}
