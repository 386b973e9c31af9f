//! Unit tests for RenderDevice
//!
//! Runs the whole bootstrap pipeline and the frame driver against the mock
//! driver and checks the ledger it keeps.

use std::rc::Rc;

use crate::config::DeviceConfig;
use crate::driver::mock_driver::{
    mock_window_handle, MockCommand, MockDriver, MockObjectKind, MockStep,
};
use crate::driver::{
    ClearFlags, DisplayMode, FeatureLevel, RefreshRate, StatusCode, Viewport,
};
use crate::error::{Error, Result};
use crate::render_device::RenderDevice;

// ============================================================================
// TEST HELPERS
// ============================================================================

fn init(driver: &MockDriver, vsync_enabled: bool, fullscreen: bool) -> Result<RenderDevice> {
    RenderDevice::initialize(driver, 800, 600, vsync_enabled, mock_window_handle(), fullscreen, 1000.0, 0.1)
}

fn single_mode_driver() -> MockDriver {
    MockDriver::new().with_display_modes(vec![DisplayMode::new(800, 600, 60, 1)])
}

/// Every driver call made by initialization, with the error variant its failure maps to
fn initialization_steps() -> Vec<(MockStep, &'static str)> {
    vec![
        (MockStep::CreateFactory, "DeviceQueryFailure"),
        (MockStep::EnumAdapter, "DeviceQueryFailure"),
        (MockStep::EnumOutput, "DeviceQueryFailure"),
        (MockStep::DisplayModeCount, "DeviceQueryFailure"),
        (MockStep::DisplayModeList, "DeviceQueryFailure"),
        (MockStep::AdapterDesc, "AdapterInfoFailure"),
        (MockStep::CreateDeviceAndSwapChain, "DeviceCreationFailure"),
        (MockStep::GetBuffer, "ResourceCreationFailure"),
        (MockStep::CreateRenderTargetView, "ResourceCreationFailure"),
        (MockStep::CreateTexture2D, "ResourceCreationFailure"),
        (MockStep::CreateDepthStencilState, "ResourceCreationFailure"),
        (MockStep::CreateDepthStencilView, "ResourceCreationFailure"),
        (MockStep::CreateRasterizerState, "ResourceCreationFailure"),
    ]
}

// ============================================================================
// END-TO-END
// ============================================================================

#[test]
fn test_end_to_end_800x600_single_mode() {
    let driver = single_mode_driver();
    let device = init(&driver, true, false).unwrap();

    assert_eq!(device.refresh_rate(), RefreshRate::new(60, 1));
    assert_eq!(device.swap_chain().desc().unwrap().refresh_rate, RefreshRate::new(60, 1));

    let projection = device.projection_matrix();
    let aspect = projection.y_axis.y / projection.x_axis.x;
    assert!((aspect - 800.0 / 600.0).abs() < 1e-4);

    assert_eq!(device.screen_size(), (800, 600));
    assert!(device.vsync_enabled());
    assert_eq!(device.device().feature_level(), FeatureLevel::Level11_0);
}

#[test]
fn test_accessors_expose_pipeline_state() {
    let driver = MockDriver::new().with_adapter("Accessor Adapter", 3 * 1024 * 1024 * 1024);
    let device = init(&driver, true, false).unwrap();

    assert_eq!(device.video_card_info(), ("Accessor Adapter", 3072));
    assert_eq!(device.world_matrix(), glam::Mat4::IDENTITY);
    assert_eq!(device.ortho_matrix().x_axis.x, 2.0 / 800.0);
    assert_eq!(
        device.viewport(),
        Viewport { top_left_x: 0.0, top_left_y: 0.0, width: 800.0, height: 600.0, min_depth: 0.0, max_depth: 1.0 }
    );
    assert_eq!(device.render_target_view().resource().desc().width, 800);
    assert_eq!(device.depth_stencil_view().resource().desc().height, 600);
    assert!(device.rasterizer_state().desc().depth_clip_enable);
}

#[test]
fn test_initialization_binds_pipeline_state_in_order() {
    let driver = MockDriver::new();
    let ledger = driver.ledger();
    let _device = init(&driver, true, false).unwrap();

    let commands = ledger.commands();
    assert_eq!(commands.len(), 4);
    assert!(matches!(commands[0], MockCommand::SetDepthStencilState { stencil_ref: 1, .. }));
    assert_eq!(commands[1], MockCommand::SetRenderTargets { with_depth_stencil: true });
    assert!(matches!(commands[2], MockCommand::SetRasterizerState(_)));
    assert!(matches!(commands[3], MockCommand::SetViewport(_)));
}

#[test]
fn test_enumeration_handles_are_released_after_initialization() {
    let driver = MockDriver::new();
    let ledger = driver.ledger();
    let _device = init(&driver, true, false).unwrap();

    assert_eq!(ledger.live_count(MockObjectKind::Factory), 0);
    assert_eq!(ledger.live_count(MockObjectKind::Adapter), 0);
    assert_eq!(ledger.live_count(MockObjectKind::Output), 0);
    assert_eq!(ledger.live_count(MockObjectKind::Device), 1);
    assert_eq!(ledger.live_count(MockObjectKind::Context), 1);
    assert_eq!(ledger.live_count(MockObjectKind::SwapChain), 1);
    assert_eq!(ledger.live_count(MockObjectKind::RenderTargetView), 1);
    assert_eq!(ledger.live_count(MockObjectKind::DepthStencilView), 1);
    assert_eq!(ledger.live_count(MockObjectKind::DepthStencilState), 1);
    assert_eq!(ledger.live_count(MockObjectKind::RasterizerState), 1);
    // Back buffer and depth buffer
    assert_eq!(ledger.live_count(MockObjectKind::Texture2D), 2);
}

#[test]
fn test_from_config_requests_debug_layer() {
    let driver = MockDriver::new();
    let config = DeviceConfig { debug_layer: true, vsync_enabled: false, ..DeviceConfig::default() };

    let device = RenderDevice::from_config(&driver, &config, mock_window_handle()).unwrap();
    assert!(!device.vsync_enabled());
    assert_eq!(device.swap_chain().desc().unwrap().refresh_rate, RefreshRate::UNCONSTRAINED);
}

// ============================================================================
// REFRESH RATE NEGOTIATION
// ============================================================================

#[test]
fn test_last_matching_mode_is_negotiated() {
    let driver = MockDriver::new().with_display_modes(vec![
        DisplayMode::new(800, 600, 60, 1),
        DisplayMode::new(800, 600, 75, 1),
        DisplayMode::new(1024, 768, 120, 1),
    ]);
    let device = init(&driver, true, false).unwrap();
    assert_eq!(device.refresh_rate(), RefreshRate::new(75, 1));
}

#[test]
fn test_no_matching_mode_falls_back_to_unconstrained() {
    let driver = MockDriver::new().with_display_modes(vec![DisplayMode::new(1024, 768, 60, 1)]);
    let device = init(&driver, true, false).unwrap();

    assert_eq!(device.refresh_rate(), RefreshRate::new(0, 1));
    assert_eq!(device.swap_chain().desc().unwrap().refresh_rate, RefreshRate::new(0, 1));
}

#[test]
fn test_empty_mode_list_falls_back_to_unconstrained() {
    let driver = MockDriver::new().with_display_modes(Vec::new());
    let device = init(&driver, true, false).unwrap();
    assert_eq!(device.refresh_rate(), RefreshRate::UNCONSTRAINED);
}

// ============================================================================
// ALL-OR-NOTHING INITIALIZATION
// ============================================================================

#[test]
fn test_any_failing_step_leaks_nothing() {
    for fullscreen in [false, true] {
        for (step, variant) in initialization_steps() {
            let driver = MockDriver::new().failing_at(step, StatusCode::E_FAIL);
            let ledger = driver.ledger();

            let err = init(&driver, true, fullscreen).err().unwrap();
            assert!(format!("{:?}", err).starts_with(variant), "{:?} produced {:?}", step, err);
            assert_eq!(err.status_code(), Some(StatusCode::E_FAIL));
            assert_eq!(ledger.total_live(), 0, "{:?} leaked driver objects", step);
            assert!(ledger.release_failures().is_empty(), "{:?} released a full-screen swap chain", step);
        }
    }
}

#[test]
fn test_failing_step_stops_the_pipeline() {
    let driver = MockDriver::new().failing_at(MockStep::CreateDepthStencilState, StatusCode::E_OUTOFMEMORY);
    let ledger = driver.ledger();

    assert!(init(&driver, true, false).is_err());

    let calls = ledger.calls();
    assert_eq!(calls.last(), Some(&MockStep::CreateDepthStencilState));
    assert!(!calls.contains(&MockStep::CreateDepthStencilView));
    assert!(!calls.contains(&MockStep::CreateRasterizerState));
}

#[test]
fn test_invalid_configuration_makes_no_driver_call() {
    let driver = MockDriver::new();
    let ledger = driver.ledger();

    let result = RenderDevice::initialize(&driver, 0, 600, true, mock_window_handle(), false, 1000.0, 0.1);
    assert!(matches!(result, Err(Error::InvalidConfiguration(_))));

    let result = RenderDevice::initialize(&driver, 800, 600, true, mock_window_handle(), false, 0.1, 1000.0);
    assert!(matches!(result, Err(Error::InvalidConfiguration(_))));

    assert!(ledger.calls().is_empty());
}

// ============================================================================
// FRAME DRIVER
// ============================================================================

#[test]
fn test_begin_scene_clears_color_depth_and_stencil() {
    let driver = MockDriver::new();
    let ledger = driver.ledger();
    let device = init(&driver, false, false).unwrap();
    let setup = ledger.commands().len();

    device.begin_scene(0.5, 0.25, 0.125, 1.0);
    device.begin_scene(0.5, 0.25, 0.125, 1.0);

    let frame = ledger.commands().split_off(setup);
    let expected = [
        MockCommand::ClearRenderTarget([0.5, 0.25, 0.125, 1.0]),
        MockCommand::ClearDepthStencil { flags: ClearFlags::DEPTH | ClearFlags::STENCIL, depth: 1.0, stencil: 0 },
    ];
    assert_eq!(frame, [expected.clone(), expected].concat());
}

#[test]
fn test_end_scene_without_vsync_never_blocks() {
    let driver = MockDriver::new();
    let ledger = driver.ledger();
    let device = init(&driver, false, false).unwrap();

    device.begin_scene(0.0, 0.0, 0.0, 1.0);
    device.end_scene().unwrap();

    assert_eq!(ledger.present_count(), 1);
    assert_eq!(ledger.blocking_waits(), 0);
    assert!(ledger.commands().contains(&MockCommand::Present { sync_interval: 0 }));
}

#[test]
fn test_end_scene_with_vsync_blocks_once() {
    let driver = single_mode_driver();
    let ledger = driver.ledger();
    let device = init(&driver, true, false).unwrap();

    device.begin_scene(0.0, 0.0, 0.0, 1.0);
    device.end_scene().unwrap();

    assert_eq!(ledger.present_count(), 1);
    assert_eq!(ledger.blocking_waits(), 1);
    assert!(ledger.commands().contains(&MockCommand::Present { sync_interval: 1 }));
}

#[test]
fn test_present_failure_is_propagated() {
    let driver = MockDriver::new().failing_at(MockStep::Present, StatusCode::DXGI_ERROR_DEVICE_REMOVED);
    let ledger = driver.ledger();
    let device = init(&driver, true, false).unwrap();

    device.begin_scene(0.0, 0.0, 0.0, 1.0);
    let result = device.end_scene();
    assert_eq!(result, Err(Error::PresentFailure { code: StatusCode::DXGI_ERROR_DEVICE_REMOVED }));
    assert_eq!(ledger.present_count(), 0);
}

// ============================================================================
// SHUTDOWN AND RELEASE
// ============================================================================

#[test]
fn test_fullscreen_shutdown_then_release() {
    let driver = single_mode_driver();
    let ledger = driver.ledger();
    let device = init(&driver, true, true).unwrap();
    assert!(device.swap_chain().fullscreen_state().unwrap());

    device.shutdown().unwrap();
    assert!(!device.swap_chain().fullscreen_state().unwrap());
    drop(device);

    assert!(ledger.release_failures().is_empty());
    assert_eq!(ledger.total_live(), 0);
}

#[test]
fn test_shutdown_is_idempotent() {
    let driver = MockDriver::new();
    let ledger = driver.ledger();
    let device = init(&driver, true, true).unwrap();

    device.shutdown().unwrap();
    device.shutdown().unwrap();
    drop(device);

    let switches = ledger
        .commands()
        .into_iter()
        .filter(|c| *c == MockCommand::SetFullscreenState(false))
        .count();
    assert_eq!(switches, 1);
}

#[test]
fn test_drop_without_shutdown_leaves_fullscreen() {
    let driver = MockDriver::new();
    let ledger = driver.ledger();
    let device = init(&driver, true, true).unwrap();

    drop(device);

    assert!(ledger.commands().contains(&MockCommand::SetFullscreenState(false)));
    assert!(ledger.release_failures().is_empty());
    assert_eq!(ledger.total_live(), 0);
}

#[test]
fn test_shutdown_failure_is_reported() {
    let driver = MockDriver::new()
        .failing_at(MockStep::SetFullscreenState, StatusCode::DXGI_ERROR_NOT_CURRENTLY_AVAILABLE);
    let device = init(&driver, true, true).unwrap();

    let err = device.shutdown().err().unwrap();
    assert!(matches!(err, Error::ShutdownFailure { .. }));
    assert_eq!(err.status_code(), Some(StatusCode::DXGI_ERROR_NOT_CURRENTLY_AVAILABLE));
}

#[test]
fn test_core_triple_release_order() {
    let driver = MockDriver::new();
    let ledger = driver.ledger();
    let device = init(&driver, true, false).unwrap();

    drop(device);

    let order = ledger.release_order();
    let position = |kind: MockObjectKind| order.iter().position(|k| *k == kind).unwrap();
    assert!(position(MockObjectKind::Context) < position(MockObjectKind::SwapChain));
    assert!(position(MockObjectKind::SwapChain) < position(MockObjectKind::Device));
    assert_eq!(order.last(), Some(&MockObjectKind::Device));
}

#[test]
fn test_cloned_context_and_swap_chain_keep_the_device_alive() {
    let driver = MockDriver::new();
    let ledger = driver.ledger();
    let device = init(&driver, true, false).unwrap();
    let context = Rc::clone(device.context());
    let swap_chain = Rc::clone(device.swap_chain());

    drop(device);

    assert_eq!(ledger.live_count(MockObjectKind::Device), 1);
    assert_eq!(ledger.live_count(MockObjectKind::Context), 1);
    assert_eq!(ledger.live_count(MockObjectKind::SwapChain), 1);

    drop(context);
    drop(swap_chain);

    assert_eq!(ledger.total_live(), 0);
    assert_eq!(ledger.release_order().last(), Some(&MockObjectKind::Device));
}
