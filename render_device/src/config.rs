/// Device configuration and fixed design constants

use std::f32::consts::FRAC_PI_4;

use crate::driver::{CreateDeviceFlags, FeatureLevel, Format};
use crate::error::{Error, Result};

/// Back-buffer pixel format, also used for the display-mode query
pub const BACK_BUFFER_FORMAT: Format = Format::R8G8B8A8_UNORM;

/// Depth buffer format (24-bit depth, 8-bit stencil)
pub const DEPTH_BUFFER_FORMAT: Format = Format::D24_UNORM_S8_UINT;

/// The only feature level requested at device creation
pub const MINIMUM_FEATURE_LEVEL: FeatureLevel = FeatureLevel::Level11_0;

/// Vertical field of view of the perspective projection (45 degrees)
pub const FIELD_OF_VIEW_Y: f32 = FRAC_PI_4;

/// Stencil reference value bound with the depth-stencil state
pub const DEPTH_STENCIL_REF: u32 = 1;

/// Device configuration
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceConfig {
    /// Back-buffer width in pixels
    pub screen_width: u32,
    /// Back-buffer height in pixels
    pub screen_height: u32,
    /// Lock presentation to the monitor refresh rate
    pub vsync_enabled: bool,
    /// Exclusive full-screen instead of windowed
    pub fullscreen: bool,
    /// Far plane distance
    pub screen_depth: f32,
    /// Near plane distance
    pub screen_near: f32,
    /// Request the driver debug layer
    pub debug_layer: bool,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            screen_width: 800,
            screen_height: 600,
            vsync_enabled: true,
            fullscreen: false,
            screen_depth: 1000.0,
            screen_near: 0.1,
            debug_layer: false,
        }
    }
}

impl DeviceConfig {
    /// Reject parameters no driver call could succeed with
    pub fn validate(&self) -> Result<()> {
        if self.screen_width == 0 || self.screen_height == 0 {
            return Err(Error::InvalidConfiguration(format!(
                "screen size must be non-zero, got {}x{}",
                self.screen_width, self.screen_height
            )));
        }
        if !self.screen_near.is_finite() || !self.screen_depth.is_finite() {
            return Err(Error::InvalidConfiguration(
                "near and far planes must be finite".to_string(),
            ));
        }
        if self.screen_near <= 0.0 || self.screen_near >= self.screen_depth {
            return Err(Error::InvalidConfiguration(format!(
                "planes must satisfy 0 < near < far, got near = {} far = {}",
                self.screen_near, self.screen_depth
            )));
        }
        Ok(())
    }

    /// Device creation flags implied by this configuration
    pub fn create_device_flags(&self) -> CreateDeviceFlags {
        if self.debug_layer {
            CreateDeviceFlags::DEBUG
        } else {
            CreateDeviceFlags::empty()
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
