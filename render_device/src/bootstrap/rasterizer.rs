/// Fixed rasterizer state

use std::rc::Rc;

use crate::driver::{CullMode, Device, DeviceContext, FillMode, RasterizerDesc, RasterizerState};
use crate::error::{Error, Result};
use crate::device_err;

const SOURCE: &str = "render_device::rasterizer";

/// Solid fill, back-face culling, clockwise front faces, no depth bias
pub fn build_rasterizer_descriptor() -> RasterizerDesc {
    RasterizerDesc {
        fill_mode: FillMode::Solid,
        cull_mode: CullMode::Back,
        front_counter_clockwise: false,
        depth_bias: 0,
        depth_bias_clamp: 0.0,
        slope_scaled_depth_bias: 0.0,
        depth_clip_enable: true,
        scissor_enable: false,
        multisample_enable: false,
        antialiased_line_enable: false,
    }
}

/// Create the rasterizer state and bind it to the context
///
/// There is no separate bind call; the state stays bound until replaced.
pub fn create_and_bind_rasterizer_state(
    device: &Rc<dyn Device>,
    context: &Rc<dyn DeviceContext>,
    desc: &RasterizerDesc,
) -> Result<Rc<dyn RasterizerState>> {
    let state = device.create_rasterizer_state(desc).map_err(|code| {
        device_err!(SOURCE, Error::resource_creation("Creating the rasterizer state", code))
    })?;

    context.rs_set_state(&state);
    Ok(state)
}

#[cfg(test)]
#[path = "rasterizer_tests.rs"]
mod tests;
