/*!
# Render Device

Device bootstrap and frame lifecycle on top of a Direct3D 11 style driver.

The crate negotiates a display configuration with the primary adapter and
monitor, creates the device/swap-chain/context triple, builds the fixed
pipeline state (render target, depth-stencil buffer and state, rasterizer
state, viewport, projection matrices) and exposes a begin/end scene contract.

## Architecture

- **GraphicsDriver**: entry point into the native driver (factory, joint device creation)
- **DisplayFactory / Adapter / Output**: adapter, monitor and display-mode enumeration
- **Device / DeviceContext / SwapChain**: resource creation, binding and presentation
- **bootstrap**: the ordered initialization stages, one small function each
- **RenderDevice**: composes the stages and drives frames

Driver handles are reference counted (`Rc`); views and states keep the
resources they were built from alive. A native backend lives in
`render_device_d3d11`; `rd::mock` runs everything headless.
*/

// Internal modules
mod error;
mod render_device;
pub mod log;
pub mod config;
pub mod driver;
pub mod bootstrap;

// Main rd namespace module
pub mod rd {
    // Error types
    pub use crate::error::{Error, Result};

    // Device facade
    pub use crate::render_device::RenderDevice;

    // Configuration
    pub use crate::config::DeviceConfig;

    // Driver traits and value types
    pub use crate::driver::*;

    // Logging sub-module (types only, macros are exported at the crate root)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Bootstrap stages
    pub mod bootstrap {
        pub use crate::bootstrap::*;
    }

    // Headless driver
    pub mod mock {
        pub use crate::driver::mock_driver::*;
    }
}

// Re-export math library at crate root
pub use glam;
