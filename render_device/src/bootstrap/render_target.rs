/// Render target view over the swap chain's back buffer

use std::rc::Rc;

use crate::driver::{Device, DeviceContext, DepthStencilView, RenderTargetView, SwapChain};
use crate::error::{Error, Result};
use crate::device_err;

const SOURCE: &str = "render_device::render_target";

/// Create a view over back buffer 0
///
/// The back-buffer handle obtained here is dropped as soon as the view
/// exists; the view keeps the texture alive.
pub fn create_render_target_view(
    device: &Rc<dyn Device>,
    swap_chain: &Rc<dyn SwapChain>,
) -> Result<Rc<dyn RenderTargetView>> {
    let back_buffer = swap_chain.get_buffer(0).map_err(|code| {
        device_err!(SOURCE, Error::resource_creation("Getting the back buffer", code))
    })?;

    let view = device.create_render_target_view(&back_buffer).map_err(|code| {
        device_err!(SOURCE, Error::resource_creation("Creating the render target view", code))
    })?;

    drop(back_buffer);
    Ok(view)
}

/// Bind the render target view and depth-stencil view to the output merger
pub fn bind_render_targets(
    context: &Rc<dyn DeviceContext>,
    render_target: &Rc<dyn RenderTargetView>,
    depth_stencil: &Rc<dyn DepthStencilView>,
) {
    context.om_set_render_targets(render_target, Some(depth_stencil));
}

#[cfg(test)]
#[path = "render_target_tests.rs"]
mod tests;
