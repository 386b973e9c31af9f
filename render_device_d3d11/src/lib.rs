/*!
# Render Device - Direct3D 11 Backend

Direct3D 11 / DXGI implementation of the render_device driver traits.

Enumeration uses a DXGI 1.0 factory. The device, immediate context and swap
chain come from a single `D3D11CreateDeviceAndSwapChain` call on the default
hardware adapter. Resources keep their creation descriptors so the device
layer can read them back without querying the driver.

Only builds on Windows; on other targets the crate is empty.

```no_run
# #[cfg(windows)]
# fn run(window: raw_window_handle::RawWindowHandle) -> render_device::rd::Result<()> {
use render_device::rd::RenderDevice;
use render_device_d3d11::rd::D3D11Driver;

let driver = D3D11Driver::new();
let device = RenderDevice::initialize(&driver, 800, 600, true, window, false, 1000.0, 0.1)?;
device.begin_scene(0.0, 0.0, 0.0, 1.0);
device.end_scene()?;
device.shutdown()?;
# Ok(())
# }
```
*/

// D3D11 implementation modules
#[cfg(windows)]
mod d3d11_format;
#[cfg(windows)]
mod d3d11_resource;
#[cfg(windows)]
mod d3d11_device;
#[cfg(windows)]
mod d3d11_swap_chain;
#[cfg(windows)]
mod d3d11_driver;

pub mod rd {
    #[cfg(windows)]
    pub use crate::d3d11_driver::{Adapter, D3D11Driver, Factory, Output};
    #[cfg(windows)]
    pub use crate::d3d11_device::{Context, Device};
    #[cfg(windows)]
    pub use crate::d3d11_swap_chain::SwapChain;
    #[cfg(windows)]
    pub use crate::d3d11_resource::{
        DepthStencilState, DepthStencilView, RasterizerState, RenderTargetView, Texture2D,
    };
}
