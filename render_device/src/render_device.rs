/// RenderDevice - device bootstrap and per-frame begin/end contract
///
/// `initialize` runs the bootstrap stages in dependency order:
///
/// adapter → monitor → mode list → refresh rate → swap chain descriptor →
/// device/context/swap chain → render target view → depth buffer →
/// depth-stencil state → depth-stencil view → rasterizer state → viewport →
/// matrices
///
/// Any failure aborts the whole call. Everything acquired so far is dropped on
/// the way out, so a failed initialization never leaves a usable-looking
/// device behind.

use std::rc::Rc;

use glam::Mat4;
use raw_window_handle::RawWindowHandle;

use crate::bootstrap::{
    bind_render_targets, build_depth_stencil_state_descriptor, build_depth_stencil_view_descriptor,
    build_rasterizer_descriptor, build_swap_chain_descriptor, build_viewport, compute_projection,
    create_and_bind_rasterizer_state, create_depth_stencil_state, create_depth_stencil_texture,
    create_depth_stencil_view, create_device_and_swap_chain, create_render_target_view,
    get_factory, get_primary_adapter, get_primary_monitor, list_display_modes, read_adapter_info,
    select_refresh_rate, AdapterInfo, DepthStencilResources, DeviceCore, ProjectionState,
};
use crate::config::{DeviceConfig, BACK_BUFFER_FORMAT};
use crate::driver::{
    ClearFlags, DepthStencilView, Device, DeviceContext, GraphicsDriver, RasterizerState,
    RefreshRate, RenderTargetView, SwapChain, Viewport,
};
use crate::error::{Error, Result};
use crate::{device_err, device_info, device_warn};

const SOURCE: &str = "render_device::RenderDevice";

/// Fully initialized device, swap chain, context and pipeline state
///
/// Not `Send`: every call must come from the thread that created it.
pub struct RenderDevice {
    // Field order is release order: views and states before the core triple
    rasterizer_state: Rc<dyn RasterizerState>,
    depth_stencil: DepthStencilResources,
    render_target_view: Rc<dyn RenderTargetView>,
    core: DeviceCore,

    projection: ProjectionState,
    viewport: Viewport,
    adapter: AdapterInfo,
    refresh_rate: RefreshRate,
    vsync_enabled: bool,
    screen_width: u32,
    screen_height: u32,
}

impl RenderDevice {
    /// Initialize the device for a window
    ///
    /// # Arguments
    ///
    /// * `driver` - Native graphics driver
    /// * `screen_width` / `screen_height` - Back-buffer size in pixels
    /// * `vsync_enabled` - Lock presentation to the negotiated refresh rate
    /// * `window` - Native window the swap chain presents to
    /// * `fullscreen` - Exclusive full-screen instead of windowed
    /// * `screen_depth` / `screen_near` - Far and near planes
    ///
    /// # Example
    ///
    /// ```no_run
    /// use render_device::rd::RenderDevice;
    /// use render_device::rd::mock::{mock_window_handle, MockDriver};
    ///
    /// let driver = MockDriver::new();
    /// let device = RenderDevice::initialize(
    ///     &driver, 800, 600, true, mock_window_handle(), false, 1000.0, 0.1,
    /// )?;
    ///
    /// device.begin_scene(0.0, 0.0, 0.0, 1.0);
    /// device.end_scene()?;
    /// device.shutdown()?;
    /// # Ok::<(), render_device::rd::Error>(())
    /// ```
    #[allow(clippy::too_many_arguments)]
    pub fn initialize(
        driver: &dyn GraphicsDriver,
        screen_width: u32,
        screen_height: u32,
        vsync_enabled: bool,
        window: RawWindowHandle,
        fullscreen: bool,
        screen_depth: f32,
        screen_near: f32,
    ) -> Result<Self> {
        let config = DeviceConfig {
            screen_width,
            screen_height,
            vsync_enabled,
            fullscreen,
            screen_depth,
            screen_near,
            ..DeviceConfig::default()
        };
        Self::from_config(driver, &config, window)
    }

    /// Initialize the device from a `DeviceConfig`
    pub fn from_config(
        driver: &dyn GraphicsDriver,
        config: &DeviceConfig,
        window: RawWindowHandle,
    ) -> Result<Self> {
        config.validate().map_err(|err| device_err!(SOURCE, err))?;
        let (width, height) = (config.screen_width, config.screen_height);

        // ===== ENUMERATION =====

        let factory = get_factory(driver)?;
        let adapter = get_primary_adapter(&factory)?;
        let monitor = get_primary_monitor(&adapter)?;
        let modes = list_display_modes(&monitor, BACK_BUFFER_FORMAT)?;

        let refresh_rate = match select_refresh_rate(&modes, width, height) {
            Some(rate) => rate,
            None => {
                device_warn!(
                    SOURCE,
                    "No display mode matches {}x{}, presenting with an unconstrained refresh rate",
                    width,
                    height
                );
                RefreshRate::UNCONSTRAINED
            }
        };

        let adapter_info = read_adapter_info(&adapter)?;
        device_info!(SOURCE, "Display Adapter = {}", adapter_info.name);
        device_info!(SOURCE, "Memory = {}MB", adapter_info.memory_mb);
        device_info!(
            SOURCE,
            "Refresh Rate = {} / {}",
            refresh_rate.numerator,
            refresh_rate.denominator
        );

        drop(modes);
        drop(monitor);
        drop(adapter);
        drop(factory);

        // ===== DEVICE AND SWAP CHAIN =====

        let swap_chain_desc = build_swap_chain_descriptor(
            width,
            height,
            refresh_rate,
            window,
            config.fullscreen,
            config.vsync_enabled,
        );
        let core = create_device_and_swap_chain(driver, &swap_chain_desc, config.create_device_flags())?;

        // ===== PIPELINE STATE =====

        let render_target_view = create_render_target_view(&core.device, core.swap_chain.get())?;

        let depth_texture = create_depth_stencil_texture(&core.device, width, height)?;
        let depth_state = create_depth_stencil_state(
            &core.device,
            &core.context,
            &build_depth_stencil_state_descriptor(),
        )?;
        let depth_view = create_depth_stencil_view(
            &core.device,
            &depth_texture,
            &build_depth_stencil_view_descriptor(),
        )?;
        bind_render_targets(&core.context, &render_target_view, &depth_view);

        let rasterizer_state = create_and_bind_rasterizer_state(
            &core.device,
            &core.context,
            &build_rasterizer_descriptor(),
        )?;

        let viewport = build_viewport(width, height);
        core.context.rs_set_viewports(&viewport);

        let projection = compute_projection(width, height, config.screen_near, config.screen_depth);

        device_info!(
            SOURCE,
            "Display Mode: {}, {} ({}, vsync {})",
            width,
            height,
            if config.fullscreen { "full-screen" } else { "windowed" },
            if config.vsync_enabled { "on" } else { "off" }
        );

        Ok(Self {
            rasterizer_state,
            depth_stencil: DepthStencilResources {
                view: depth_view,
                state: depth_state,
                texture: depth_texture,
            },
            render_target_view,
            core,
            projection,
            viewport,
            adapter: adapter_info,
            refresh_rate,
            vsync_enabled: config.vsync_enabled,
            screen_width: width,
            screen_height: height,
        })
    }

    // ===== FRAME =====

    /// Clear the render target to the color, depth to 1.0 and stencil to 0
    pub fn begin_scene(&self, red: f32, green: f32, blue: f32, alpha: f32) {
        let context = &self.core.context;
        context.clear_render_target_view(&self.render_target_view, [red, green, blue, alpha]);
        context.clear_depth_stencil_view(
            &self.depth_stencil.view,
            ClearFlags::DEPTH | ClearFlags::STENCIL,
            1.0,
            0,
        );
    }

    /// Present the back buffer
    ///
    /// With vsync on this blocks until the next vertical blank.
    pub fn end_scene(&self) -> Result<()> {
        let sync_interval = if self.vsync_enabled { 1 } else { 0 };
        self.core
            .swap_chain
            .get()
            .present(sync_interval)
            .map_err(|code| device_err!(SOURCE, Error::PresentFailure { code }))
    }

    /// Take the swap chain out of exclusive full-screen mode
    ///
    /// Call before releasing the device. Safe to call more than once; dropping
    /// the device does it as well.
    pub fn shutdown(&self) -> Result<()> {
        self.core.swap_chain.leave_fullscreen()
    }

    // ===== ACCESSORS =====

    pub fn device(&self) -> &Rc<dyn Device> {
        &self.core.device
    }

    pub fn context(&self) -> &Rc<dyn DeviceContext> {
        &self.core.context
    }

    pub fn swap_chain(&self) -> &Rc<dyn SwapChain> {
        self.core.swap_chain.get()
    }

    pub fn render_target_view(&self) -> &Rc<dyn RenderTargetView> {
        &self.render_target_view
    }

    pub fn depth_stencil_view(&self) -> &Rc<dyn DepthStencilView> {
        &self.depth_stencil.view
    }

    pub fn rasterizer_state(&self) -> &Rc<dyn RasterizerState> {
        &self.rasterizer_state
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection.projection_matrix
    }

    pub fn world_matrix(&self) -> Mat4 {
        self.projection.world_matrix
    }

    pub fn ortho_matrix(&self) -> Mat4 {
        self.projection.ortho_matrix
    }

    /// Adapter name and dedicated video memory in MB
    pub fn video_card_info(&self) -> (&str, u64) {
        (&self.adapter.name, self.adapter.memory_mb)
    }

    /// Negotiated refresh rate (0/1 when no display mode matched)
    pub fn refresh_rate(&self) -> RefreshRate {
        self.refresh_rate
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn vsync_enabled(&self) -> bool {
        self.vsync_enabled
    }

    pub fn screen_size(&self) -> (u32, u32) {
        (self.screen_width, self.screen_height)
    }
}

#[cfg(test)]
#[path = "render_device_tests.rs"]
mod tests;
