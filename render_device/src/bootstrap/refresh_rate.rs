/// Refresh-rate negotiation

use crate::driver::{DisplayMode, RefreshRate};

/// Refresh rate of the mode matching `width` x `height`
///
/// Scans the whole list without stopping at the first hit: when several
/// modes share the resolution, the last one in the list wins. Returns `None`
/// when no mode matches; the caller decides the fallback.
pub fn select_refresh_rate(modes: &[DisplayMode], width: u32, height: u32) -> Option<RefreshRate> {
    let mut selected = None;
    for mode in modes {
        if mode.width == width && mode.height == height {
            selected = Some(mode.refresh_rate);
        }
    }
    selected
}

#[cfg(test)]
#[path = "refresh_rate_tests.rs"]
mod tests;
