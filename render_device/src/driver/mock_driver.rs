/// Mock graphics driver (no GPU required)
///
/// An in-memory implementation of every driver trait. It lets the bootstrap
/// pipeline and the frame driver run headless, and records everything a test
/// needs to check ownership discipline:
/// - live object count per kind, creation and release order
/// - the command stream seen by the immediate context and swap chain
/// - blocking (vsync) presents
/// - release failures (a swap chain released while in exclusive full-screen)
///
/// One driver call can be made to fail with a chosen status code.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::num::NonZeroIsize;
use std::rc::Rc;

use raw_window_handle::{RawWindowHandle, Win32WindowHandle};
use rustc_hash::FxHashMap;

use crate::driver::{
    Adapter, AdapterDesc, BindFlags, ClearFlags, CreateDeviceFlags, DepthStencilDesc,
    DepthStencilState, DepthStencilView, DepthStencilViewDesc, Device, DeviceContext,
    DeviceTriple, DisplayFactory, DisplayMode, DriverResult, FeatureLevel, Format,
    GraphicsDriver, Output, RasterizerDesc, RasterizerState, RenderTargetView, ResourceUsage,
    StatusCode, SwapChain, SwapChainDesc, Texture2D, Texture2DDesc, Viewport,
};

// ============================================================================
// Steps, object kinds and commands
// ============================================================================

/// Driver calls that can be made to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MockStep {
    CreateFactory,
    EnumAdapter,
    AdapterDesc,
    EnumOutput,
    DisplayModeCount,
    DisplayModeList,
    CreateDeviceAndSwapChain,
    GetBuffer,
    CreateTexture2D,
    CreateRenderTargetView,
    CreateDepthStencilState,
    CreateDepthStencilView,
    CreateRasterizerState,
    Present,
    SetFullscreenState,
}

/// Kinds of reference-counted driver objects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MockObjectKind {
    Factory,
    Adapter,
    Output,
    Device,
    Context,
    SwapChain,
    Texture2D,
    RenderTargetView,
    DepthStencilView,
    DepthStencilState,
    RasterizerState,
}

/// Commands observed by the mock context and swap chain
#[derive(Debug, Clone, PartialEq)]
pub enum MockCommand {
    SetRenderTargets { with_depth_stencil: bool },
    SetDepthStencilState { desc: DepthStencilDesc, stencil_ref: u32 },
    SetRasterizerState(RasterizerDesc),
    SetViewport(Viewport),
    ClearRenderTarget([f32; 4]),
    ClearDepthStencil { flags: ClearFlags, depth: f32, stencil: u8 },
    Present { sync_interval: u32 },
    SetFullscreenState(bool),
}

// ============================================================================
// Mock Ledger
// ============================================================================

#[derive(Debug, Default)]
struct LedgerState {
    live: FxHashMap<MockObjectKind, usize>,
    created: Vec<MockObjectKind>,
    released: Vec<MockObjectKind>,
    calls: Vec<MockStep>,
    commands: Vec<MockCommand>,
    blocking_waits: usize,
    release_failures: Vec<String>,
}

/// Shared record of everything the mock driver did
///
/// Cloning yields another handle onto the same record.
#[derive(Debug, Clone, Default)]
pub struct MockLedger {
    state: Rc<RefCell<LedgerState>>,
}

impl MockLedger {
    /// Objects of `kind` currently alive
    pub fn live_count(&self, kind: MockObjectKind) -> usize {
        self.state.borrow().live.get(&kind).copied().unwrap_or(0)
    }

    /// All objects currently alive
    pub fn total_live(&self) -> usize {
        self.state.borrow().live.values().sum()
    }

    /// Objects of `kind` ever created
    pub fn created_count(&self, kind: MockObjectKind) -> usize {
        self.state.borrow().created.iter().filter(|k| **k == kind).count()
    }

    pub fn creation_order(&self) -> Vec<MockObjectKind> {
        self.state.borrow().created.clone()
    }

    pub fn release_order(&self) -> Vec<MockObjectKind> {
        self.state.borrow().released.clone()
    }

    /// Driver calls in the order they were made (including failed ones)
    pub fn calls(&self) -> Vec<MockStep> {
        self.state.borrow().calls.clone()
    }

    pub fn commands(&self) -> Vec<MockCommand> {
        self.state.borrow().commands.clone()
    }

    pub fn present_count(&self) -> usize {
        self.state
            .borrow()
            .commands
            .iter()
            .filter(|c| matches!(c, MockCommand::Present { .. }))
            .count()
    }

    /// Presents that blocked until the vertical blank
    pub fn blocking_waits(&self) -> usize {
        self.state.borrow().blocking_waits
    }

    pub fn release_failures(&self) -> Vec<String> {
        self.state.borrow().release_failures.clone()
    }

    fn track(&self, kind: MockObjectKind) -> MockHandle {
        {
            let mut state = self.state.borrow_mut();
            *state.live.entry(kind).or_insert(0) += 1;
            state.created.push(kind);
        }
        crate::device_trace!("render_device::mock", "Creating {:?} instance", kind);
        MockHandle { kind, ledger: self.clone() }
    }

    fn record_call(&self, step: MockStep) {
        self.state.borrow_mut().calls.push(step);
    }

    fn record_command(&self, command: MockCommand) {
        self.state.borrow_mut().commands.push(command);
    }

    fn record_blocking_wait(&self) {
        self.state.borrow_mut().blocking_waits += 1;
    }

    fn record_release_failure(&self, message: String) {
        self.state.borrow_mut().release_failures.push(message);
    }
}

/// Reference-count token: registers an object on creation, releases it on drop
#[derive(Debug)]
struct MockHandle {
    kind: MockObjectKind,
    ledger: MockLedger,
}

impl Drop for MockHandle {
    fn drop(&mut self) {
        {
            let mut state = self.ledger.state.borrow_mut();
            if let Some(count) = state.live.get_mut(&self.kind) {
                *count = count.saturating_sub(1);
            }
            state.released.push(self.kind);
        }
        crate::device_trace!("render_device::mock", "Releasing {:?} instance", self.kind);
    }
}

// ============================================================================
// Mock Settings
// ============================================================================

#[derive(Debug, Clone)]
struct MockSettings {
    adapter_description: Vec<u16>,
    dedicated_video_memory: u64,
    display_modes: Vec<DisplayMode>,
    max_feature_level: FeatureLevel,
    adapter_count: u32,
    output_count: u32,
    failure: Option<(MockStep, StatusCode)>,
    ledger: MockLedger,
}

impl MockSettings {
    /// Record the call and fail it if it is the injected failure
    fn check(&self, step: MockStep) -> DriverResult<()> {
        self.ledger.record_call(step);
        match self.failure {
            Some((failing, code)) if failing == step => Err(code),
            _ => Ok(()),
        }
    }
}

/// Placeholder native window for headless runs; the mock never dereferences it
pub fn mock_window_handle() -> RawWindowHandle {
    RawWindowHandle::Win32(Win32WindowHandle::new(NonZeroIsize::MAX))
}

fn encode_description(name: &str) -> Vec<u16> {
    name.encode_utf16().chain(std::iter::once(0)).collect()
}

// ============================================================================
// Mock Driver
// ============================================================================

/// Mock driver with one adapter, one monitor and four 60 Hz display modes by default
#[derive(Debug, Clone)]
pub struct MockDriver {
    settings: Rc<MockSettings>,
}

impl Default for MockDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDriver {
    pub fn new() -> Self {
        Self {
            settings: Rc::new(MockSettings {
                adapter_description: encode_description("Mock Display Adapter"),
                dedicated_video_memory: 2048 * 1024 * 1024,
                display_modes: vec![
                    DisplayMode::new(640, 480, 60, 1),
                    DisplayMode::new(800, 600, 60, 1),
                    DisplayMode::new(1024, 768, 60, 1),
                    DisplayMode::new(1920, 1080, 60, 1),
                ],
                max_feature_level: FeatureLevel::Level11_1,
                adapter_count: 1,
                output_count: 1,
                failure: None,
                ledger: MockLedger::default(),
            }),
        }
    }

    fn settings_mut(&mut self) -> &mut MockSettings {
        Rc::make_mut(&mut self.settings)
    }

    /// Replace the monitor's display-mode list
    pub fn with_display_modes(mut self, modes: Vec<DisplayMode>) -> Self {
        self.settings_mut().display_modes = modes;
        self
    }

    /// Adapter name and dedicated video memory in bytes
    pub fn with_adapter(mut self, name: &str, dedicated_video_memory: u64) -> Self {
        let settings = self.settings_mut();
        settings.adapter_description = encode_description(name);
        settings.dedicated_video_memory = dedicated_video_memory;
        self
    }

    /// Raw UTF-16 adapter description, for malformed-name scenarios
    pub fn with_adapter_description(mut self, description: Vec<u16>) -> Self {
        self.settings_mut().adapter_description = description;
        self
    }

    pub fn with_adapter_count(mut self, count: u32) -> Self {
        self.settings_mut().adapter_count = count;
        self
    }

    pub fn with_output_count(mut self, count: u32) -> Self {
        self.settings_mut().output_count = count;
        self
    }

    /// Highest feature level the mock hardware supports
    pub fn with_max_feature_level(mut self, level: FeatureLevel) -> Self {
        self.settings_mut().max_feature_level = level;
        self
    }

    /// Make the driver call `step` fail with `code`
    pub fn failing_at(mut self, step: MockStep, code: StatusCode) -> Self {
        self.settings_mut().failure = Some((step, code));
        self
    }

    /// Shared ledger of this driver and every object it creates
    pub fn ledger(&self) -> MockLedger {
        self.settings.ledger.clone()
    }
}

impl GraphicsDriver for MockDriver {
    fn name(&self) -> &str {
        "mock"
    }

    fn create_factory(&self) -> DriverResult<Rc<dyn DisplayFactory>> {
        self.settings.check(MockStep::CreateFactory)?;
        Ok(Rc::new(MockFactory {
            _handle: self.settings.ledger.track(MockObjectKind::Factory),
            settings: self.settings.clone(),
        }))
    }

    fn create_device_and_swap_chain(
        &self,
        desc: &SwapChainDesc,
        feature_levels: &[FeatureLevel],
        _flags: CreateDeviceFlags,
    ) -> DriverResult<DeviceTriple> {
        self.settings.check(MockStep::CreateDeviceAndSwapChain)?;

        if desc.width == 0 || desc.height == 0 || desc.buffer_count == 0 {
            return Err(StatusCode::E_INVALIDARG);
        }
        let feature_level = feature_levels
            .iter()
            .copied()
            .find(|level| *level <= self.settings.max_feature_level)
            .ok_or(StatusCode::DXGI_ERROR_UNSUPPORTED)?;

        let ledger = &self.settings.ledger;
        let device: Rc<dyn Device> = Rc::new(MockDevice {
            _handle: ledger.track(MockObjectKind::Device),
            settings: self.settings.clone(),
            feature_level,
        });
        let context: Rc<dyn DeviceContext> = Rc::new(MockContext {
            _handle: ledger.track(MockObjectKind::Context),
            ledger: ledger.clone(),
            bindings: RefCell::new(MockBindings::default()),
            device: device.clone(),
        });
        let back_buffer: Rc<dyn Texture2D> = Rc::new(MockTexture2D {
            _handle: ledger.track(MockObjectKind::Texture2D),
            desc: Texture2DDesc {
                width: desc.width,
                height: desc.height,
                mip_levels: 1,
                array_size: 1,
                format: desc.format,
                sample_desc: desc.sample_desc,
                usage: ResourceUsage::Default,
                bind_flags: BindFlags::RENDER_TARGET,
                cpu_access_flags: 0,
                misc_flags: 0,
            },
        });
        let swap_chain: Rc<dyn SwapChain> = Rc::new(MockSwapChain {
            _handle: ledger.track(MockObjectKind::SwapChain),
            settings: self.settings.clone(),
            desc: *desc,
            fullscreen: Cell::new(!desc.windowed),
            back_buffer,
            device: device.clone(),
        });

        Ok(DeviceTriple { swap_chain, device, context })
    }
}

// ============================================================================
// Mock Factory / Adapter / Output
// ============================================================================

struct MockFactory {
    _handle: MockHandle,
    settings: Rc<MockSettings>,
}

impl DisplayFactory for MockFactory {
    fn enum_adapter(&self, index: u32) -> DriverResult<Rc<dyn Adapter>> {
        self.settings.check(MockStep::EnumAdapter)?;
        if index >= self.settings.adapter_count {
            return Err(StatusCode::DXGI_ERROR_NOT_FOUND);
        }
        Ok(Rc::new(MockAdapter {
            _handle: self.settings.ledger.track(MockObjectKind::Adapter),
            settings: self.settings.clone(),
        }))
    }
}

struct MockAdapter {
    _handle: MockHandle,
    settings: Rc<MockSettings>,
}

impl Adapter for MockAdapter {
    fn desc(&self) -> DriverResult<AdapterDesc> {
        self.settings.check(MockStep::AdapterDesc)?;
        Ok(AdapterDesc {
            description: self.settings.adapter_description.clone(),
            dedicated_video_memory: self.settings.dedicated_video_memory,
        })
    }

    fn enum_output(&self, index: u32) -> DriverResult<Rc<dyn Output>> {
        self.settings.check(MockStep::EnumOutput)?;
        if index >= self.settings.output_count {
            return Err(StatusCode::DXGI_ERROR_NOT_FOUND);
        }
        Ok(Rc::new(MockOutput {
            _handle: self.settings.ledger.track(MockObjectKind::Output),
            settings: self.settings.clone(),
        }))
    }
}

struct MockOutput {
    _handle: MockHandle,
    settings: Rc<MockSettings>,
}

impl MockOutput {
    fn modes_for(&self, format: Format) -> Vec<DisplayMode> {
        self.settings
            .display_modes
            .iter()
            .filter(|mode| mode.format == format)
            .copied()
            .collect()
    }
}

impl Output for MockOutput {
    fn display_mode_count(&self, format: Format) -> DriverResult<u32> {
        self.settings.check(MockStep::DisplayModeCount)?;
        Ok(self.modes_for(format).len() as u32)
    }

    fn display_modes(&self, format: Format, count: u32) -> DriverResult<Vec<DisplayMode>> {
        self.settings.check(MockStep::DisplayModeList)?;
        let modes = self.modes_for(format);
        if modes.len() > count as usize {
            return Err(StatusCode::DXGI_ERROR_MORE_DATA);
        }
        Ok(modes)
    }
}

// ============================================================================
// Mock Device
// ============================================================================

struct MockDevice {
    _handle: MockHandle,
    settings: Rc<MockSettings>,
    feature_level: FeatureLevel,
}

impl Device for MockDevice {
    fn feature_level(&self) -> FeatureLevel {
        self.feature_level
    }

    fn create_texture_2d(&self, desc: &Texture2DDesc) -> DriverResult<Rc<dyn Texture2D>> {
        self.settings.check(MockStep::CreateTexture2D)?;
        if desc.width == 0 || desc.height == 0 || desc.mip_levels == 0 || desc.array_size == 0 {
            return Err(StatusCode::E_INVALIDARG);
        }
        Ok(Rc::new(MockTexture2D {
            _handle: self.settings.ledger.track(MockObjectKind::Texture2D),
            desc: *desc,
        }))
    }

    fn create_render_target_view(
        &self,
        resource: &Rc<dyn Texture2D>,
    ) -> DriverResult<Rc<dyn RenderTargetView>> {
        self.settings.check(MockStep::CreateRenderTargetView)?;
        if !resource.desc().bind_flags.contains(BindFlags::RENDER_TARGET) {
            return Err(StatusCode::E_INVALIDARG);
        }
        Ok(Rc::new(MockRenderTargetView {
            _handle: self.settings.ledger.track(MockObjectKind::RenderTargetView),
            resource: resource.clone(),
        }))
    }

    fn create_depth_stencil_view(
        &self,
        resource: &Rc<dyn Texture2D>,
        desc: &DepthStencilViewDesc,
    ) -> DriverResult<Rc<dyn DepthStencilView>> {
        self.settings.check(MockStep::CreateDepthStencilView)?;
        let texture = resource.desc();
        if !texture.bind_flags.contains(BindFlags::DEPTH_STENCIL) || texture.format != desc.format {
            return Err(StatusCode::E_INVALIDARG);
        }
        Ok(Rc::new(MockDepthStencilView {
            _handle: self.settings.ledger.track(MockObjectKind::DepthStencilView),
            resource: resource.clone(),
            desc: *desc,
        }))
    }

    fn create_depth_stencil_state(
        &self,
        desc: &DepthStencilDesc,
    ) -> DriverResult<Rc<dyn DepthStencilState>> {
        self.settings.check(MockStep::CreateDepthStencilState)?;
        Ok(Rc::new(MockDepthStencilState {
            _handle: self.settings.ledger.track(MockObjectKind::DepthStencilState),
            desc: *desc,
        }))
    }

    fn create_rasterizer_state(
        &self,
        desc: &RasterizerDesc,
    ) -> DriverResult<Rc<dyn RasterizerState>> {
        self.settings.check(MockStep::CreateRasterizerState)?;
        Ok(Rc::new(MockRasterizerState {
            _handle: self.settings.ledger.track(MockObjectKind::RasterizerState),
            desc: *desc,
        }))
    }
}

// ============================================================================
// Mock Context
// ============================================================================

/// Objects currently bound to the context (kept alive while bound)
#[derive(Default)]
struct MockBindings {
    render_target: Option<Rc<dyn RenderTargetView>>,
    depth_stencil_view: Option<Rc<dyn DepthStencilView>>,
    depth_stencil_state: Option<Rc<dyn DepthStencilState>>,
    rasterizer_state: Option<Rc<dyn RasterizerState>>,
}

struct MockContext {
    _handle: MockHandle,
    ledger: MockLedger,
    bindings: RefCell<MockBindings>,
    // Released after the context itself
    device: Rc<dyn Device>,
}

impl DeviceContext for MockContext {
    fn device(&self) -> Rc<dyn Device> {
        self.device.clone()
    }

    fn om_set_render_targets(
        &self,
        render_target: &Rc<dyn RenderTargetView>,
        depth_stencil: Option<&Rc<dyn DepthStencilView>>,
    ) {
        let mut bindings = self.bindings.borrow_mut();
        bindings.render_target = Some(render_target.clone());
        bindings.depth_stencil_view = depth_stencil.cloned();
        self.ledger.record_command(MockCommand::SetRenderTargets {
            with_depth_stencil: depth_stencil.is_some(),
        });
    }

    fn om_set_depth_stencil_state(&self, state: &Rc<dyn DepthStencilState>, stencil_ref: u32) {
        self.bindings.borrow_mut().depth_stencil_state = Some(state.clone());
        self.ledger.record_command(MockCommand::SetDepthStencilState {
            desc: state.desc(),
            stencil_ref,
        });
    }

    fn rs_set_state(&self, state: &Rc<dyn RasterizerState>) {
        self.bindings.borrow_mut().rasterizer_state = Some(state.clone());
        self.ledger.record_command(MockCommand::SetRasterizerState(state.desc()));
    }

    fn rs_set_viewports(&self, viewport: &Viewport) {
        self.ledger.record_command(MockCommand::SetViewport(*viewport));
    }

    fn clear_render_target_view(&self, _view: &Rc<dyn RenderTargetView>, color: [f32; 4]) {
        self.ledger.record_command(MockCommand::ClearRenderTarget(color));
    }

    fn clear_depth_stencil_view(
        &self,
        _view: &Rc<dyn DepthStencilView>,
        flags: ClearFlags,
        depth: f32,
        stencil: u8,
    ) {
        self.ledger.record_command(MockCommand::ClearDepthStencil { flags, depth, stencil });
    }
}

// ============================================================================
// Mock SwapChain
// ============================================================================

struct MockSwapChain {
    _handle: MockHandle,
    settings: Rc<MockSettings>,
    desc: SwapChainDesc,
    fullscreen: Cell<bool>,
    back_buffer: Rc<dyn Texture2D>,
    device: Rc<dyn Device>,
}

impl SwapChain for MockSwapChain {
    fn device(&self) -> Rc<dyn Device> {
        self.device.clone()
    }

    fn desc(&self) -> DriverResult<SwapChainDesc> {
        Ok(self.desc)
    }

    fn get_buffer(&self, index: u32) -> DriverResult<Rc<dyn Texture2D>> {
        self.settings.check(MockStep::GetBuffer)?;
        if index >= self.desc.buffer_count {
            return Err(StatusCode::DXGI_ERROR_INVALID_CALL);
        }
        Ok(self.back_buffer.clone())
    }

    fn present(&self, sync_interval: u32) -> DriverResult<()> {
        self.settings.check(MockStep::Present)?;
        self.settings.ledger.record_command(MockCommand::Present { sync_interval });
        if sync_interval > 0 {
            self.settings.ledger.record_blocking_wait();
        }
        Ok(())
    }

    fn set_fullscreen_state(&self, fullscreen: bool) -> DriverResult<()> {
        self.settings.check(MockStep::SetFullscreenState)?;
        self.fullscreen.set(fullscreen);
        self.settings.ledger.record_command(MockCommand::SetFullscreenState(fullscreen));
        Ok(())
    }

    fn fullscreen_state(&self) -> DriverResult<bool> {
        Ok(self.fullscreen.get())
    }
}

impl Drop for MockSwapChain {
    fn drop(&mut self) {
        if self.fullscreen.get() {
            self.settings.ledger.record_release_failure(
                "swap chain released while in exclusive full-screen mode".to_string(),
            );
        }
    }
}

// ============================================================================
// Mock resources
// ============================================================================

struct MockTexture2D {
    _handle: MockHandle,
    desc: Texture2DDesc,
}

impl Texture2D for MockTexture2D {
    fn desc(&self) -> Texture2DDesc {
        self.desc
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

struct MockRenderTargetView {
    _handle: MockHandle,
    resource: Rc<dyn Texture2D>,
}

impl RenderTargetView for MockRenderTargetView {
    fn resource(&self) -> Rc<dyn Texture2D> {
        self.resource.clone()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

struct MockDepthStencilView {
    _handle: MockHandle,
    resource: Rc<dyn Texture2D>,
    desc: DepthStencilViewDesc,
}

impl DepthStencilView for MockDepthStencilView {
    fn resource(&self) -> Rc<dyn Texture2D> {
        self.resource.clone()
    }

    fn desc(&self) -> DepthStencilViewDesc {
        self.desc
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

struct MockDepthStencilState {
    _handle: MockHandle,
    desc: DepthStencilDesc,
}

impl DepthStencilState for MockDepthStencilState {
    fn desc(&self) -> DepthStencilDesc {
        self.desc
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

struct MockRasterizerState {
    _handle: MockHandle,
    desc: RasterizerDesc,
}

impl RasterizerState for MockRasterizerState {
    fn desc(&self) -> RasterizerDesc {
        self.desc
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "mock_driver_tests.rs"]
mod tests;
