/// Device and Context - D3D11 implementation of Device and DeviceContext

use std::rc::Rc;

use render_device::device_warn;
use render_device::rd::{
    ClearFlags, DepthStencilDesc, DepthStencilState as RdDepthStencilState,
    DepthStencilView as RdDepthStencilView, DepthStencilViewDesc, Device as RdDevice,
    DeviceContext as RdDeviceContext, DriverResult, FeatureLevel, RasterizerDesc,
    RasterizerState as RdRasterizerState, RenderTargetView as RdRenderTargetView, StatusCode,
    Texture2D as RdTexture2D, Texture2DDesc, Viewport,
};
use windows::Win32::Graphics::Direct3D11::{ID3D11Device, ID3D11DeviceContext};

use crate::d3d11_format::{
    clear_flags_to_d3d, depth_stencil_desc_to_d3d, depth_stencil_view_desc_to_d3d,
    rasterizer_desc_to_d3d, status_of, texture_2d_desc_to_d3d, viewport_to_d3d,
};
use crate::d3d11_resource::{
    native_depth_stencil_state, native_depth_stencil_view, native_rasterizer_state,
    native_render_target_view, native_texture, DepthStencilState, DepthStencilView,
    RasterizerState, RenderTargetView, Texture2D,
};

const SOURCE: &str = "render_device_d3d11::Context";

/// Unwrap the out-parameter of a successful create call
fn created<T>(out: Option<T>) -> DriverResult<T> {
    out.ok_or(StatusCode::E_FAIL)
}

// ===== DEVICE =====

/// D3D11 device
pub struct Device {
    pub(crate) native: ID3D11Device,
    pub(crate) feature_level: FeatureLevel,
}

impl RdDevice for Device {
    fn feature_level(&self) -> FeatureLevel {
        self.feature_level
    }

    fn create_texture_2d(&self, desc: &Texture2DDesc) -> DriverResult<Rc<dyn RdTexture2D>> {
        let native_desc = texture_2d_desc_to_d3d(desc);
        let mut out = None;
        unsafe { self.native.CreateTexture2D(&native_desc, None, Some(&mut out)) }
            .map_err(|e| status_of(&e))?;

        Ok(Rc::new(Texture2D {
            native: created(out)?,
            desc: *desc,
        }))
    }

    fn create_render_target_view(
        &self,
        resource: &Rc<dyn RdTexture2D>,
    ) -> DriverResult<Rc<dyn RdRenderTargetView>> {
        let texture = native_texture(resource).ok_or(StatusCode::E_INVALIDARG)?;
        let mut out = None;
        unsafe { self.native.CreateRenderTargetView(texture, None, Some(&mut out)) }
            .map_err(|e| status_of(&e))?;

        Ok(Rc::new(RenderTargetView {
            native: created(out)?,
            resource: Rc::clone(resource),
        }))
    }

    fn create_depth_stencil_view(
        &self,
        resource: &Rc<dyn RdTexture2D>,
        desc: &DepthStencilViewDesc,
    ) -> DriverResult<Rc<dyn RdDepthStencilView>> {
        let texture = native_texture(resource).ok_or(StatusCode::E_INVALIDARG)?;
        let native_desc = depth_stencil_view_desc_to_d3d(desc);
        let mut out = None;
        unsafe { self.native.CreateDepthStencilView(texture, Some(&native_desc), Some(&mut out)) }
            .map_err(|e| status_of(&e))?;

        Ok(Rc::new(DepthStencilView {
            native: created(out)?,
            resource: Rc::clone(resource),
            desc: *desc,
        }))
    }

    fn create_depth_stencil_state(
        &self,
        desc: &DepthStencilDesc,
    ) -> DriverResult<Rc<dyn RdDepthStencilState>> {
        let native_desc = depth_stencil_desc_to_d3d(desc);
        let mut out = None;
        unsafe { self.native.CreateDepthStencilState(&native_desc, Some(&mut out)) }
            .map_err(|e| status_of(&e))?;

        Ok(Rc::new(DepthStencilState {
            native: created(out)?,
            desc: *desc,
        }))
    }

    fn create_rasterizer_state(
        &self,
        desc: &RasterizerDesc,
    ) -> DriverResult<Rc<dyn RdRasterizerState>> {
        let native_desc = rasterizer_desc_to_d3d(desc);
        let mut out = None;
        unsafe { self.native.CreateRasterizerState(&native_desc, Some(&mut out)) }
            .map_err(|e| status_of(&e))?;

        Ok(Rc::new(RasterizerState {
            native: created(out)?,
            desc: *desc,
        }))
    }
}

// ===== CONTEXT =====

/// D3D11 immediate context
///
/// The native context holds its own references to bound objects. Objects
/// created by another driver are ignored with a warning.
pub struct Context {
    pub(crate) native: ID3D11DeviceContext,
    pub(crate) device: Rc<dyn RdDevice>,
}

impl RdDeviceContext for Context {
    fn device(&self) -> Rc<dyn RdDevice> {
        Rc::clone(&self.device)
    }

    fn om_set_render_targets(
        &self,
        render_target: &Rc<dyn RdRenderTargetView>,
        depth_stencil: Option<&Rc<dyn RdDepthStencilView>>,
    ) {
        let Some(rtv) = native_render_target_view(render_target) else {
            device_warn!(SOURCE, "om_set_render_targets: foreign render target view ignored");
            return;
        };
        let dsv = depth_stencil.and_then(native_depth_stencil_view);

        unsafe { self.native.OMSetRenderTargets(Some(&[Some(rtv.clone())]), dsv) };
    }

    fn om_set_depth_stencil_state(&self, state: &Rc<dyn RdDepthStencilState>, stencil_ref: u32) {
        match native_depth_stencil_state(state) {
            Some(native) => unsafe { self.native.OMSetDepthStencilState(native, stencil_ref) },
            None => device_warn!(SOURCE, "om_set_depth_stencil_state: foreign state ignored"),
        }
    }

    fn rs_set_state(&self, state: &Rc<dyn RdRasterizerState>) {
        match native_rasterizer_state(state) {
            Some(native) => unsafe { self.native.RSSetState(native) },
            None => device_warn!(SOURCE, "rs_set_state: foreign state ignored"),
        }
    }

    fn rs_set_viewports(&self, viewport: &Viewport) {
        unsafe { self.native.RSSetViewports(Some(&[viewport_to_d3d(viewport)])) };
    }

    fn clear_render_target_view(&self, view: &Rc<dyn RdRenderTargetView>, color: [f32; 4]) {
        match native_render_target_view(view) {
            Some(native) => unsafe { self.native.ClearRenderTargetView(native, &color) },
            None => device_warn!(SOURCE, "clear_render_target_view: foreign view ignored"),
        }
    }

    fn clear_depth_stencil_view(
        &self,
        view: &Rc<dyn RdDepthStencilView>,
        flags: ClearFlags,
        depth: f32,
        stencil: u8,
    ) {
        match native_depth_stencil_view(view) {
            Some(native) => unsafe {
                self.native
                    .ClearDepthStencilView(native, clear_flags_to_d3d(flags), depth, stencil)
            },
            None => device_warn!(SOURCE, "clear_depth_stencil_view: foreign view ignored"),
        }
    }
}
