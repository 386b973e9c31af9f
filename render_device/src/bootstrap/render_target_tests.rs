//! Unit tests for render_target.rs

use crate::bootstrap::render_target::*;
use crate::bootstrap::swap_chain_factory::{build_swap_chain_descriptor, create_device_and_swap_chain, DeviceCore};
use crate::driver::mock_driver::{mock_window_handle, MockDriver, MockObjectKind, MockStep};
use crate::driver::{BindFlags, CreateDeviceFlags, RefreshRate, StatusCode};
use crate::error::Error;

fn create_core(driver: &MockDriver) -> DeviceCore {
    let desc = build_swap_chain_descriptor(800, 600, RefreshRate::new(60, 1), mock_window_handle(), false, true);
    create_device_and_swap_chain(driver, &desc, CreateDeviceFlags::empty()).unwrap()
}

#[test]
fn test_view_covers_back_buffer() {
    let driver = MockDriver::new();
    let ledger = driver.ledger();
    let core = create_core(&driver);

    let view = create_render_target_view(&core.device, core.swap_chain.get()).unwrap();
    let texture = view.resource().desc();
    assert_eq!((texture.width, texture.height), (800, 600));
    assert!(texture.bind_flags.contains(BindFlags::RENDER_TARGET));
    assert_eq!(ledger.live_count(MockObjectKind::RenderTargetView), 1);
    // Only the swap chain's own back buffer exists
    assert_eq!(ledger.live_count(MockObjectKind::Texture2D), 1);
}

#[test]
fn test_view_keeps_back_buffer_alive() {
    let driver = MockDriver::new();
    let ledger = driver.ledger();
    let core = create_core(&driver);

    let view = create_render_target_view(&core.device, core.swap_chain.get()).unwrap();
    drop(core);
    assert_eq!(ledger.live_count(MockObjectKind::Texture2D), 1);

    drop(view);
    assert_eq!(ledger.total_live(), 0);
}

#[test]
fn test_get_buffer_failure() {
    let driver = MockDriver::new().failing_at(MockStep::GetBuffer, StatusCode::DXGI_ERROR_INVALID_CALL);
    let core = create_core(&driver);

    let err = create_render_target_view(&core.device, core.swap_chain.get()).err().unwrap();
    assert!(matches!(err, Error::ResourceCreationFailure { .. }));
    assert!(err.step().contains("back buffer"));
}

#[test]
fn test_view_creation_failure() {
    let driver = MockDriver::new().failing_at(MockStep::CreateRenderTargetView, StatusCode::E_OUTOFMEMORY);
    let ledger = driver.ledger();
    let core = create_core(&driver);

    let err = create_render_target_view(&core.device, core.swap_chain.get()).err().unwrap();
    assert!(matches!(err, Error::ResourceCreationFailure { .. }));
    assert_eq!(err.status_code(), Some(StatusCode::E_OUTOFMEMORY));
    assert_eq!(ledger.live_count(MockObjectKind::RenderTargetView), 0);
}
