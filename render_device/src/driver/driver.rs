/// GraphicsDriver trait - entry point into the native graphics driver
///
/// Mirrors the DXGI/Direct3D 11 object model: a factory enumerates adapters,
/// an adapter enumerates outputs (monitors), an output lists its display
/// modes, and the driver jointly creates the swap chain, device and
/// immediate context.
///
/// Handles are reference counted with `Rc`. The whole device layer lives on
/// the thread that created it, so none of these traits require `Send`.

use std::rc::Rc;

use crate::driver::{
    AdapterDesc, CreateDeviceFlags, Device, DeviceContext, DisplayMode, DriverResult,
    FeatureLevel, Format, SwapChain, SwapChainDesc,
};

/// The three handles produced by joint device creation
///
/// The context and the swap chain each hold a reference to the device, so
/// the device is released last whatever handles a caller keeps.
pub struct DeviceTriple {
    pub swap_chain: Rc<dyn SwapChain>,
    pub device: Rc<dyn Device>,
    pub context: Rc<dyn DeviceContext>,
}

/// Native graphics driver
pub trait GraphicsDriver {
    /// Driver name for diagnostics (e.g. "d3d11", "mock")
    fn name(&self) -> &str;

    /// Create the graphics-infrastructure factory used for enumeration
    fn create_factory(&self) -> DriverResult<Rc<dyn DisplayFactory>>;

    /// Create swap chain, device and immediate context in one call
    ///
    /// # Arguments
    ///
    /// * `desc` - Swap chain descriptor
    /// * `feature_levels` - Acceptable feature levels, most preferred first
    /// * `flags` - Device creation flags
    fn create_device_and_swap_chain(
        &self,
        desc: &SwapChainDesc,
        feature_levels: &[FeatureLevel],
        flags: CreateDeviceFlags,
    ) -> DriverResult<DeviceTriple>;
}

/// Factory enumerating the adapters of the machine
pub trait DisplayFactory {
    /// Adapter at `index` (0 = primary); `DXGI_ERROR_NOT_FOUND` past the end
    fn enum_adapter(&self, index: u32) -> DriverResult<Rc<dyn Adapter>>;
}

/// Physical or virtual graphics adapter
pub trait Adapter {
    fn desc(&self) -> DriverResult<AdapterDesc>;

    /// Output (monitor) at `index` (0 = primary); `DXGI_ERROR_NOT_FOUND` past the end
    fn enum_output(&self, index: u32) -> DriverResult<Rc<dyn Output>>;
}

/// Adapter output (monitor)
pub trait Output {
    /// First phase of the display-mode query: number of modes for `format`
    fn display_mode_count(&self, format: Format) -> DriverResult<u32>;

    /// Second phase: fill at most `count` modes
    ///
    /// Returns `DXGI_ERROR_MORE_DATA` if more than `count` modes exist.
    fn display_modes(&self, format: Format, count: u32) -> DriverResult<Vec<DisplayMode>>;
}
