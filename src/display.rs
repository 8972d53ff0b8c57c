//! Display metrics: DPI scale and the taskbar launch offset
//!
//! Querying the OS for these numbers is the host's job; this module only
//! turns raw pixel measurements into device-independent units.

use serde::{Deserialize, Serialize};

/// DPI of a display at 100% scaling
pub const BASE_DPI: f64 = 96.0;

/// Device pixels per device-independent unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayScale {
    pub x: f64,
    pub y: f64,
}

impl Default for DisplayScale {
    fn default() -> Self {
        Self { x: 1.0, y: 1.0 }
    }
}

impl DisplayScale {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Scale from a reported DPI pair (96 DPI = 1.0)
    pub fn from_dpi(dpi_x: f64, dpi_y: f64) -> Self {
        Self {
            x: dpi_x / BASE_DPI,
            y: dpi_y / BASE_DPI,
        }
    }

    /// DPI pair equivalent to this scale
    pub fn dpi(&self) -> (f64, f64) {
        (self.x * BASE_DPI, self.y * BASE_DPI)
    }
}

/// Launch-point offset for a taskbar docked at the bottom of the screen.
///
/// `screen_height_px` is the full screen height and `work_area_bottom_px` the
/// bottom edge of the usable work area, both in device pixels. The pixel gap
/// is divided by the horizontal scale factor and truncated to whole units.
pub fn taskbar_offset(screen_height_px: i32, work_area_bottom_px: i32, scale: DisplayScale) -> f64 {
    let taskbar_px = (screen_height_px - work_area_bottom_px).max(0);
    if !(scale.x.is_finite() && scale.x > 0.0) {
        log::warn!("Ignoring invalid display scale {}", scale.x);
        return taskbar_px as f64;
    }
    (taskbar_px as f64 / scale.x).trunc()
}
