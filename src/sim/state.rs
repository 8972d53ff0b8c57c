//! Particle entities and the live-particle registry

use glam::DVec2;

use super::color::ParticleColor;
use super::kinematics::Launch;
use crate::clock::Timestamp;

/// Stable particle identifier, assigned on insertion and never reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParticleId(pub u64);

/// A live particle.
///
/// Launch parameters, color and spawn time are fixed at creation; only the
/// derived position changes. The handle belongs to this entry alone.
#[derive(Debug)]
pub struct Particle<H> {
    id: ParticleId,
    spawn_time: Timestamp,
    launch: Launch,
    color: ParticleColor,
    handle: H,
}

impl<H> Particle<H> {
    pub fn id(&self) -> ParticleId {
        self.id
    }

    pub fn spawn_time(&self) -> Timestamp {
        self.spawn_time
    }

    pub fn launch(&self) -> Launch {
        self.launch
    }

    pub fn color(&self) -> ParticleColor {
        self.color
    }

    pub fn handle(&self) -> &H {
        &self.handle
    }

    /// Seconds since spawn (never negative)
    pub fn elapsed(&self, now: Timestamp) -> f64 {
        now.elapsed_since(self.spawn_time)
    }

    /// Position in simulation space at `now`, raised by `vertical_offset`
    pub fn position_at(&self, now: Timestamp, vertical_offset: f64) -> DVec2 {
        self.launch.displacement(self.elapsed(now)) + DVec2::new(0.0, vertical_offset)
    }
}

/// The live-particle set
///
/// Entries stay sorted by id (ids are handed out in increasing order), which
/// keeps iteration order stable and makes lookup a binary search.
#[derive(Debug)]
pub struct ParticleRegistry<H> {
    particles: Vec<Particle<H>>,
    next_id: u64,
}

impl<H> Default for ParticleRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> ParticleRegistry<H> {
    pub fn new() -> Self {
        Self {
            particles: Vec::new(),
            next_id: 1,
        }
    }

    /// Insert a new particle, returning its id
    pub fn insert(
        &mut self,
        spawn_time: Timestamp,
        launch: Launch,
        color: ParticleColor,
        handle: H,
    ) -> ParticleId {
        let id = ParticleId(self.next_id);
        self.next_id += 1;
        self.particles.push(Particle {
            id,
            spawn_time,
            launch,
            color,
            handle,
        });
        id
    }

    pub fn get(&self, id: ParticleId) -> Option<&Particle<H>> {
        self.index_of(id).map(|i| &self.particles[i])
    }

    pub fn contains(&self, id: ParticleId) -> bool {
        self.index_of(id).is_some()
    }

    /// Take a particle out of the registry
    pub fn remove(&mut self, id: ParticleId) -> Option<Particle<H>> {
        self.index_of(id).map(|i| self.particles.remove(i))
    }

    /// Ids of every live particle at this instant, in insertion order
    pub fn snapshot(&self) -> Vec<ParticleId> {
        self.particles.iter().map(|p| p.id).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle<H>> {
        self.particles.iter()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    fn index_of(&self, id: ParticleId) -> Option<usize> {
        self.particles.binary_search_by_key(&id, |p| p.id).ok()
    }
}

/// Cumulative lifecycle counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimStats {
    pub spawned: u64,
    pub removed: u64,
}

impl SimStats {
    pub fn live(&self) -> u64 {
        self.spawned - self.removed
    }
}

/// Simulation context: the registry, its random source and the launch offset
///
/// Ticks live in `tick.rs`. All mutation goes through `&mut self`, so two
/// ticks can never interleave.
#[derive(Debug)]
pub struct Simulation<R, H> {
    pub(super) rng: R,
    pub(super) vertical_offset: f64,
    pub(super) registry: ParticleRegistry<H>,
    pub(super) stats: SimStats,
}

impl<R, H> Simulation<R, H> {
    /// Create an empty simulation.
    ///
    /// `vertical_offset` raises the launch point (e.g. above a taskbar) and is
    /// fixed for the life of the simulation. A non-finite offset would stop
    /// the vertical removal check from ever firing, so it is replaced by 0.
    pub fn new(rng: R, vertical_offset: f64) -> Self {
        let vertical_offset = if vertical_offset.is_finite() {
            vertical_offset
        } else {
            log::warn!("Ignoring non-finite vertical offset {vertical_offset}");
            0.0
        };
        log::info!("Simulation created (vertical offset {vertical_offset})");
        Self {
            rng,
            vertical_offset,
            registry: ParticleRegistry::new(),
            stats: SimStats::default(),
        }
    }

    pub fn registry(&self) -> &ParticleRegistry<H> {
        &self.registry
    }

    pub fn stats(&self) -> SimStats {
        self.stats
    }

    pub fn vertical_offset(&self) -> f64 {
        self.vertical_offset
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }
}
