/// Device and DeviceContext traits - resource creation and command submission

use std::rc::Rc;

use crate::driver::{
    ClearFlags, DepthStencilDesc, DepthStencilState, DepthStencilView, DepthStencilViewDesc,
    DriverResult, FeatureLevel, RasterizerDesc, RasterizerState, RenderTargetView, Texture2D,
    Texture2DDesc, Viewport,
};

/// Logical graphics device, used to create every GPU resource
pub trait Device {
    /// Feature level the device was created with
    fn feature_level(&self) -> FeatureLevel;

    fn create_texture_2d(&self, desc: &Texture2DDesc) -> DriverResult<Rc<dyn Texture2D>>;

    /// Create a view covering the whole resource
    ///
    /// The view keeps `resource` alive.
    fn create_render_target_view(
        &self,
        resource: &Rc<dyn Texture2D>,
    ) -> DriverResult<Rc<dyn RenderTargetView>>;

    /// Create a depth-stencil view; the view keeps `resource` alive
    fn create_depth_stencil_view(
        &self,
        resource: &Rc<dyn Texture2D>,
        desc: &DepthStencilViewDesc,
    ) -> DriverResult<Rc<dyn DepthStencilView>>;

    fn create_depth_stencil_state(
        &self,
        desc: &DepthStencilDesc,
    ) -> DriverResult<Rc<dyn DepthStencilState>>;

    fn create_rasterizer_state(
        &self,
        desc: &RasterizerDesc,
    ) -> DriverResult<Rc<dyn RasterizerState>>;
}

/// Immediate context: the single point through which bind and clear commands flow
///
/// These calls cannot fail at the native API level, so they return nothing.
/// Bound objects stay referenced by the context until replaced.
pub trait DeviceContext {
    /// Device this context belongs to
    ///
    /// The context holds a reference to it, so the device is never released
    /// before the context.
    fn device(&self) -> Rc<dyn Device>;

    /// Bind one render target and an optional depth-stencil view to the output merger
    fn om_set_render_targets(
        &self,
        render_target: &Rc<dyn RenderTargetView>,
        depth_stencil: Option<&Rc<dyn DepthStencilView>>,
    );

    fn om_set_depth_stencil_state(&self, state: &Rc<dyn DepthStencilState>, stencil_ref: u32);

    fn rs_set_state(&self, state: &Rc<dyn RasterizerState>);

    fn rs_set_viewports(&self, viewport: &Viewport);

    fn clear_render_target_view(&self, view: &Rc<dyn RenderTargetView>, color: [f32; 4]);

    fn clear_depth_stencil_view(
        &self,
        view: &Rc<dyn DepthStencilView>,
        flags: ClearFlags,
        depth: f32,
        stencil: u8,
    );
}
