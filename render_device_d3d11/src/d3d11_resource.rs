/// Resources, views and states - D3D11 implementation of the resource traits
///
/// Each wrapper owns one COM reference and the descriptor it was created
/// with. COM releases the native object when the wrapper is dropped.

use std::any::Any;
use std::rc::Rc;

use render_device::rd::{
    DepthStencilDesc, DepthStencilState as RdDepthStencilState,
    DepthStencilView as RdDepthStencilView, DepthStencilViewDesc, RasterizerDesc,
    RasterizerState as RdRasterizerState, RenderTargetView as RdRenderTargetView,
    Texture2D as RdTexture2D, Texture2DDesc,
};
use windows::Win32::Graphics::Direct3D11::{
    ID3D11DepthStencilState, ID3D11DepthStencilView, ID3D11RasterizerState,
    ID3D11RenderTargetView, ID3D11Texture2D,
};

/// D3D11 2D texture
pub struct Texture2D {
    pub(crate) native: ID3D11Texture2D,
    pub(crate) desc: Texture2DDesc,
}

impl RdTexture2D for Texture2D {
    fn desc(&self) -> Texture2DDesc {
        self.desc
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// D3D11 render target view
pub struct RenderTargetView {
    pub(crate) native: ID3D11RenderTargetView,
    /// Texture the view was created from
    pub(crate) resource: Rc<dyn RdTexture2D>,
}

impl RdRenderTargetView for RenderTargetView {
    fn resource(&self) -> Rc<dyn RdTexture2D> {
        Rc::clone(&self.resource)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// D3D11 depth-stencil view
pub struct DepthStencilView {
    pub(crate) native: ID3D11DepthStencilView,
    pub(crate) resource: Rc<dyn RdTexture2D>,
    pub(crate) desc: DepthStencilViewDesc,
}

impl RdDepthStencilView for DepthStencilView {
    fn resource(&self) -> Rc<dyn RdTexture2D> {
        Rc::clone(&self.resource)
    }

    fn desc(&self) -> DepthStencilViewDesc {
        self.desc
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub struct DepthStencilState {
    pub(crate) native: ID3D11DepthStencilState,
    pub(crate) desc: DepthStencilDesc,
}

impl RdDepthStencilState for DepthStencilState {
    fn desc(&self) -> DepthStencilDesc {
        self.desc
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub struct RasterizerState {
    pub(crate) native: ID3D11RasterizerState,
    pub(crate) desc: RasterizerDesc,
}

impl RdRasterizerState for RasterizerState {
    fn desc(&self) -> RasterizerDesc {
        self.desc
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ===== DOWNCASTS =====

/// Native texture behind a trait object, `None` if it comes from another driver
pub(crate) fn native_texture(texture: &Rc<dyn RdTexture2D>) -> Option<&ID3D11Texture2D> {
    texture.as_any().downcast_ref::<Texture2D>().map(|t| &t.native)
}

pub(crate) fn native_render_target_view(
    view: &Rc<dyn RdRenderTargetView>,
) -> Option<&ID3D11RenderTargetView> {
    view.as_any().downcast_ref::<RenderTargetView>().map(|v| &v.native)
}

pub(crate) fn native_depth_stencil_view(
    view: &Rc<dyn RdDepthStencilView>,
) -> Option<&ID3D11DepthStencilView> {
    view.as_any().downcast_ref::<DepthStencilView>().map(|v| &v.native)
}

pub(crate) fn native_depth_stencil_state(
    state: &Rc<dyn RdDepthStencilState>,
) -> Option<&ID3D11DepthStencilState> {
    state.as_any().downcast_ref::<DepthStencilState>().map(|s| &s.native)
}

pub(crate) fn native_rasterizer_state(
    state: &Rc<dyn RdRasterizerState>,
) -> Option<&ID3D11RasterizerState> {
    state.as_any().downcast_ref::<RasterizerState>().map(|s| &s.native)
}
