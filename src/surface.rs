//! Drawable surface abstraction
//!
//! The simulation only ever talks to a [`Surface`]: it creates one handle per
//! particle, moves it every simulate tick, and releases it on removal. The
//! coordinate system has its origin at the top-left with y growing downward.

use std::collections::HashMap;

use glam::DVec2;

use crate::error::SurfaceError;
use crate::sim::ParticleColor;

/// The drawable area particles are rendered onto
pub trait Surface {
    /// Opaque reference to one particle's visual
    type Handle;

    /// Create a visual for a new particle
    fn create_handle(&mut self, color: ParticleColor, size: f64) -> Result<Self::Handle, SurfaceError>;

    /// Place a visual at surface coordinates `(x, y)`
    fn move_handle(&mut self, handle: &Self::Handle, x: f64, y: f64) -> Result<(), SurfaceError>;

    /// Destroy a visual.
    ///
    /// The caller drops its handle only once this succeeds, so a failed
    /// removal leaves the particle and its visual paired.
    fn remove_handle(&mut self, handle: &Self::Handle) -> Result<(), SurfaceError>;

    /// Current `(width, height)` of the drawable area
    fn bounds(&self) -> (f64, f64);
}

/// Handle issued by [`HeadlessSurface`]
///
/// Deliberately not `Clone`: the registry entry is its only owner.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct HeadlessHandle(u64);

impl HeadlessHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// What a headless surface knows about one live visual
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub color: ParticleColor,
    pub size: f64,
    /// Last position set via `move_handle` (None until first placement)
    pub pos: Option<DVec2>,
}

/// In-memory surface that records handles and their placements
#[derive(Debug)]
pub struct HeadlessSurface {
    width: f64,
    height: f64,
    visuals: HashMap<u64, Placement>,
    next_id: u64,
}

impl HeadlessSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            visuals: HashMap::new(),
            next_id: 1,
        }
    }

    /// Change the drawable area (e.g. window resized)
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// Number of live handles
    pub fn handle_count(&self) -> usize {
        self.visuals.len()
    }

    pub fn placement(&self, handle: &HeadlessHandle) -> Option<&Placement> {
        self.visuals.get(&handle.0)
    }

    /// Iterate all live visuals (unordered)
    pub fn placements(&self) -> impl Iterator<Item = &Placement> {
        self.visuals.values()
    }
}

impl Surface for HeadlessSurface {
    type Handle = HeadlessHandle;

    fn create_handle(&mut self, color: ParticleColor, size: f64) -> Result<HeadlessHandle, SurfaceError> {
        if !(size.is_finite() && size > 0.0) {
            return Err(SurfaceError::CreateFailed(format!("invalid size {size}")));
        }
        let id = self.next_id;
        self.next_id += 1;
        self.visuals.insert(id, Placement { color, size, pos: None });
        Ok(HeadlessHandle(id))
    }

    fn move_handle(&mut self, handle: &HeadlessHandle, x: f64, y: f64) -> Result<(), SurfaceError> {
        let placement = self
            .visuals
            .get_mut(&handle.0)
            .ok_or(SurfaceError::UnknownHandle(handle.0))?;
        placement.pos = Some(DVec2::new(x, y));
        Ok(())
    }

    fn remove_handle(&mut self, handle: &HeadlessHandle) -> Result<(), SurfaceError> {
        self.visuals
            .remove(&handle.0)
            .map(|_| ())
            .ok_or(SurfaceError::UnknownHandle(handle.0))
    }

    fn bounds(&self) -> (f64, f64) {
        (self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_lifecycle() {
        let mut surface = HeadlessSurface::new(800.0, 600.0);
        let handle = surface.create_handle(ParticleColor::Gold, 5.0).unwrap();
        assert_eq!(surface.handle_count(), 1);
        assert_eq!(surface.placement(&handle).unwrap().pos, None);

        surface.move_handle(&handle, 400.0, 600.0).unwrap();
        assert_eq!(
            surface.placement(&handle).unwrap().pos,
            Some(DVec2::new(400.0, 600.0))
        );

        surface.remove_handle(&handle).unwrap();
        assert_eq!(surface.handle_count(), 0);

        let result = surface.remove_handle(&handle);
        assert!(matches!(result, Err(SurfaceError::UnknownHandle(_))));
    }

    #[test]
    fn test_handles_are_unique() {
        let mut surface = HeadlessSurface::new(800.0, 600.0);
        let a = surface.create_handle(ParticleColor::Red, 5.0).unwrap();
        let b = surface.create_handle(ParticleColor::Red, 5.0).unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_invalid_size_rejected() {
        let mut surface = HeadlessSurface::new(800.0, 600.0);
        let result = surface.create_handle(ParticleColor::Blue, 0.0);
        assert!(matches!(result, Err(SurfaceError::CreateFailed(_))));
        assert_eq!(surface.handle_count(), 0);
    }

    #[test]
    fn test_resize_updates_bounds() {
        let mut surface = HeadlessSurface::new(800.0, 600.0);
        surface.resize(1920.0, 1080.0);
        assert_eq!(surface.bounds(), (1920.0, 1080.0));
    }
}
