/// Depth buffer, depth-stencil state and depth-stencil view
///
/// The descriptor builders are pure and carry the fixed depth/stencil policy:
/// - depth test on, writes on, `Less`
/// - stencil on with full masks, always passing
/// - front faces increment on depth failure, back faces decrement

use std::rc::Rc;

use crate::config::{DEPTH_BUFFER_FORMAT, DEPTH_STENCIL_REF};
use crate::driver::{
    BindFlags, ComparisonFunc, DepthStencilDesc, DepthStencilOpDesc, DepthStencilState,
    DepthStencilView, DepthStencilViewDesc, DepthWriteMask, Device, DeviceContext, DsvDimension,
    ResourceUsage, SampleDesc, StencilOp, Texture2D, Texture2DDesc,
};
use crate::error::{Error, Result};
use crate::device_err;

const SOURCE: &str = "render_device::depth_stencil";

/// Depth buffer texture, the state bound with it and the view over it
pub struct DepthStencilResources {
    pub view: Rc<dyn DepthStencilView>,
    pub state: Rc<dyn DepthStencilState>,
    pub texture: Rc<dyn Texture2D>,
}

// ===== DEPTH BUFFER =====

/// Descriptor of a `width` x `height` depth buffer with 8-bit stencil
pub fn build_depth_buffer_descriptor(width: u32, height: u32) -> Texture2DDesc {
    Texture2DDesc {
        width,
        height,
        mip_levels: 1,
        array_size: 1,
        format: DEPTH_BUFFER_FORMAT,
        sample_desc: SampleDesc::SINGLE,
        usage: ResourceUsage::Default,
        bind_flags: BindFlags::DEPTH_STENCIL,
        cpu_access_flags: 0,
        misc_flags: 0,
    }
}

pub fn create_depth_stencil_texture(
    device: &Rc<dyn Device>,
    width: u32,
    height: u32,
) -> Result<Rc<dyn Texture2D>> {
    device
        .create_texture_2d(&build_depth_buffer_descriptor(width, height))
        .map_err(|code| {
            device_err!(SOURCE, Error::resource_creation("Creating the depth buffer texture", code))
        })
}

// ===== DEPTH STENCIL STATE =====

pub fn build_depth_stencil_state_descriptor() -> DepthStencilDesc {
    DepthStencilDesc {
        depth_enable: true,
        depth_write_mask: DepthWriteMask::All,
        depth_func: ComparisonFunc::Less,
        stencil_enable: true,
        stencil_read_mask: 0xFF,
        stencil_write_mask: 0xFF,
        front_face: DepthStencilOpDesc {
            stencil_fail_op: StencilOp::Keep,
            stencil_depth_fail_op: StencilOp::Incr,
            stencil_pass_op: StencilOp::Keep,
            stencil_func: ComparisonFunc::Always,
        },
        back_face: DepthStencilOpDesc {
            stencil_fail_op: StencilOp::Keep,
            stencil_depth_fail_op: StencilOp::Decr,
            stencil_pass_op: StencilOp::Keep,
            stencil_func: ComparisonFunc::Always,
        },
    }
}

/// Create the depth-stencil state and bind it with stencil reference 1
pub fn create_depth_stencil_state(
    device: &Rc<dyn Device>,
    context: &Rc<dyn DeviceContext>,
    desc: &DepthStencilDesc,
) -> Result<Rc<dyn DepthStencilState>> {
    let state = device.create_depth_stencil_state(desc).map_err(|code| {
        device_err!(SOURCE, Error::resource_creation("Creating the depth stencil state", code))
    })?;

    context.om_set_depth_stencil_state(&state, DEPTH_STENCIL_REF);
    Ok(state)
}

// ===== DEPTH STENCIL VIEW =====

pub fn build_depth_stencil_view_descriptor() -> DepthStencilViewDesc {
    DepthStencilViewDesc {
        format: DEPTH_BUFFER_FORMAT,
        view_dimension: DsvDimension::Texture2D,
        mip_slice: 0,
    }
}

/// Create a view over `texture`; the view keeps the texture alive
pub fn create_depth_stencil_view(
    device: &Rc<dyn Device>,
    texture: &Rc<dyn Texture2D>,
    desc: &DepthStencilViewDesc,
) -> Result<Rc<dyn DepthStencilView>> {
    device.create_depth_stencil_view(texture, desc).map_err(|code| {
        device_err!(SOURCE, Error::resource_creation("Creating the depth stencil view", code))
    })
}

#[cfg(test)]
#[path = "depth_stencil_tests.rs"]
mod tests;
