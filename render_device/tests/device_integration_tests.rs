//! Integration tests for the RenderDevice lifecycle
//!
//! Drives initialization, frames and shutdown through the public API against
//! the mock driver. No GPU required.
//!
//! Run with: cargo test --test device_integration_tests

use render_device::rd::mock::{mock_window_handle, MockCommand, MockDriver, MockObjectKind, MockStep};
use render_device::rd::{DeviceConfig, DisplayMode, Error, RefreshRate, RenderDevice, StatusCode};

// ============================================================================
// LIFECYCLE TESTS
// ============================================================================

#[test]
fn test_integration_full_lifecycle() {
    // Step 1: Initialize against a monitor exposing a single mode
    let driver = MockDriver::new().with_display_modes(vec![DisplayMode::new(800, 600, 60, 1)]);
    let ledger = driver.ledger();
    let device = RenderDevice::initialize(&driver, 800, 600, true, mock_window_handle(), false, 1000.0, 0.1)
        .expect("initialization should succeed");

    // Step 2: Verify negotiated state
    assert_eq!(device.refresh_rate(), RefreshRate::new(60, 1));
    let projection = device.projection_matrix();
    assert!((projection.y_axis.y / projection.x_axis.x - 4.0 / 3.0).abs() < 1e-4);

    // Step 3: Render a few frames
    for frame in 0..3 {
        device.begin_scene(0.1 * frame as f32, 0.2, 0.3, 1.0);
        device.end_scene().expect("present should succeed");
    }
    assert_eq!(ledger.present_count(), 3);
    assert_eq!(ledger.blocking_waits(), 3);

    // Step 4: Shutdown and release
    device.shutdown().expect("shutdown should succeed");
    drop(device);
    assert_eq!(ledger.total_live(), 0);
    assert!(ledger.release_failures().is_empty());
}

#[test]
fn test_integration_fullscreen_lifecycle() {
    let driver = MockDriver::new();
    let ledger = driver.ledger();
    let config = DeviceConfig { fullscreen: true, vsync_enabled: false, ..DeviceConfig::default() };

    let device = RenderDevice::from_config(&driver, &config, mock_window_handle())
        .expect("initialization should succeed");
    assert!(device.swap_chain().fullscreen_state().unwrap());
    assert!(!device.swap_chain().desc().unwrap().windowed);

    device.begin_scene(0.0, 0.0, 0.0, 1.0);
    device.end_scene().unwrap();
    assert_eq!(ledger.blocking_waits(), 0);

    device.shutdown().unwrap();
    drop(device);

    assert!(ledger.commands().contains(&MockCommand::SetFullscreenState(false)));
    assert!(ledger.release_failures().is_empty());
    assert_eq!(ledger.total_live(), 0);
}

#[test]
fn test_integration_failed_initialization_leaves_nothing_behind() {
    let driver = MockDriver::new()
        .failing_at(MockStep::CreateDepthStencilView, StatusCode::E_OUTOFMEMORY);
    let ledger = driver.ledger();

    let result = RenderDevice::initialize(&driver, 1024, 768, true, mock_window_handle(), true, 1000.0, 0.1);
    match result {
        Err(Error::ResourceCreationFailure { step, code }) => {
            assert!(step.contains("depth stencil view"));
            assert_eq!(code, StatusCode::E_OUTOFMEMORY);
        }
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("initialization should fail"),
    }

    assert_eq!(ledger.total_live(), 0);
    assert!(ledger.release_failures().is_empty());
    assert_eq!(ledger.created_count(MockObjectKind::Device), 1);
}

#[test]
fn test_integration_device_removed_during_frame() {
    let driver = MockDriver::new()
        .failing_at(MockStep::Present, StatusCode::DXGI_ERROR_DEVICE_REMOVED);
    let device = RenderDevice::initialize(&driver, 800, 600, true, mock_window_handle(), false, 1000.0, 0.1)
        .expect("initialization should succeed");

    device.begin_scene(0.0, 0.0, 0.0, 1.0);
    let err = device.end_scene().err().unwrap();
    assert_eq!(err.status_code(), Some(StatusCode::DXGI_ERROR_DEVICE_REMOVED));

    // The device stays usable for shutdown
    assert!(device.shutdown().is_ok());
}

#[test]
fn test_integration_video_card_info() {
    let driver = MockDriver::new().with_adapter("Integration GPU", 512 * 1024 * 1024);
    let device = RenderDevice::from_config(&driver, &DeviceConfig::default(), mock_window_handle()).unwrap();

    let (name, memory_mb) = device.video_card_info();
    assert_eq!(name, "Integration GPU");
    assert_eq!(memory_mb, 512);
}
