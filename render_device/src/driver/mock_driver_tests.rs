/// Unit tests for MockDriver and the ledger it shares with its objects

use std::rc::Rc;

use crate::driver::mock_driver::*;
use crate::driver::{
    BindFlags, ClearFlags, CreateDeviceFlags, DepthStencilViewDesc, DisplayMode, DsvDimension,
    FeatureLevel, Format, GraphicsDriver, RefreshRate, ResourceUsage, SampleDesc, Scaling,
    ScanlineOrdering, StatusCode, SwapChainDesc, SwapEffect, Texture2DDesc,
};

fn swap_chain_desc(windowed: bool) -> SwapChainDesc {
    SwapChainDesc {
        width: 640,
        height: 480,
        refresh_rate: RefreshRate::new(60, 1),
        format: Format::R8G8B8A8_UNORM,
        scanline_ordering: ScanlineOrdering::Unspecified,
        scaling: Scaling::Unspecified,
        sample_desc: SampleDesc::SINGLE,
        render_target_output: true,
        buffer_count: 1,
        output_window: mock_window_handle(),
        windowed,
        swap_effect: SwapEffect::Discard,
        flags: 0,
    }
}

fn depth_desc(width: u32, height: u32) -> Texture2DDesc {
    Texture2DDesc {
        width,
        height,
        mip_levels: 1,
        array_size: 1,
        format: Format::D24_UNORM_S8_UINT,
        sample_desc: SampleDesc::SINGLE,
        usage: ResourceUsage::Default,
        bind_flags: BindFlags::DEPTH_STENCIL,
        cpu_access_flags: 0,
        misc_flags: 0,
    }
}

// ============================================================================
// Defaults and builder
// ============================================================================

#[test]
fn test_default_topology() {
    let driver = MockDriver::new();
    assert_eq!(driver.name(), "mock");

    let factory = driver.create_factory().unwrap();
    let adapter = factory.enum_adapter(0).unwrap();
    assert_eq!(factory.enum_adapter(1).err(), Some(StatusCode::DXGI_ERROR_NOT_FOUND));

    let desc = adapter.desc().unwrap();
    assert_eq!(String::from_utf16_lossy(&desc.description), "Mock Display Adapter\u{0}");
    assert_eq!(desc.dedicated_video_memory, 2048 * 1024 * 1024);

    let output = adapter.enum_output(0).unwrap();
    assert_eq!(adapter.enum_output(1).err(), Some(StatusCode::DXGI_ERROR_NOT_FOUND));
    assert_eq!(output.display_mode_count(Format::R8G8B8A8_UNORM).unwrap(), 4);
    assert_eq!(output.display_mode_count(Format::B8G8R8A8_UNORM).unwrap(), 0);
}

#[test]
fn test_builder_does_not_affect_clones() {
    let base = MockDriver::new();
    let custom = base.clone().with_display_modes(vec![DisplayMode::new(320, 240, 30, 1)]);

    let count = |driver: &MockDriver| {
        let factory = driver.create_factory().unwrap();
        let adapter = factory.enum_adapter(0).unwrap();
        let output = adapter.enum_output(0).unwrap();
        output.display_mode_count(Format::R8G8B8A8_UNORM).unwrap()
    };
    assert_eq!(count(&base), 4);
    assert_eq!(count(&custom), 1);
}

#[test]
fn test_mode_list_sized_too_small() {
    let driver = MockDriver::new();
    let factory = driver.create_factory().unwrap();
    let adapter = factory.enum_adapter(0).unwrap();
    let output = adapter.enum_output(0).unwrap();

    assert_eq!(
        output.display_modes(Format::R8G8B8A8_UNORM, 2).err(),
        Some(StatusCode::DXGI_ERROR_MORE_DATA)
    );
    assert_eq!(output.display_modes(Format::R8G8B8A8_UNORM, 4).unwrap().len(), 4);
}

#[test]
fn test_failure_injection_is_recorded() {
    let driver = MockDriver::new().failing_at(MockStep::CreateFactory, StatusCode::E_OUTOFMEMORY);
    let ledger = driver.ledger();

    assert_eq!(driver.create_factory().err(), Some(StatusCode::E_OUTOFMEMORY));
    assert_eq!(ledger.calls(), vec![MockStep::CreateFactory]);
    assert_eq!(ledger.total_live(), 0);
}

// ============================================================================
// Ledger
// ============================================================================

#[test]
fn test_ledger_tracks_live_objects() {
    let driver = MockDriver::new();
    let ledger = driver.ledger();

    let factory = driver.create_factory().unwrap();
    let first = factory.enum_adapter(0).unwrap();
    let second = factory.enum_adapter(0).unwrap();
    assert_eq!(ledger.live_count(MockObjectKind::Adapter), 2);
    assert_eq!(ledger.created_count(MockObjectKind::Adapter), 2);

    drop(first);
    assert_eq!(ledger.live_count(MockObjectKind::Adapter), 1);
    drop(second);
    drop(factory);
    assert_eq!(ledger.total_live(), 0);
    assert_eq!(ledger.created_count(MockObjectKind::Adapter), 2);
    assert_eq!(
        ledger.release_order(),
        vec![MockObjectKind::Adapter, MockObjectKind::Adapter, MockObjectKind::Factory]
    );
}

#[test]
fn test_joint_creation_order() {
    let driver = MockDriver::new();
    let ledger = driver.ledger();

    let _triple = driver
        .create_device_and_swap_chain(&swap_chain_desc(true), &[FeatureLevel::Level11_0], CreateDeviceFlags::empty())
        .unwrap();
    assert_eq!(
        ledger.creation_order(),
        vec![
            MockObjectKind::Device,
            MockObjectKind::Context,
            MockObjectKind::Texture2D,
            MockObjectKind::SwapChain,
        ]
    );
}

#[test]
fn test_feature_level_negotiation() {
    let driver = MockDriver::new().with_max_feature_level(FeatureLevel::Level10_1);
    let levels = [FeatureLevel::Level11_0, FeatureLevel::Level10_1];

    let triple = driver
        .create_device_and_swap_chain(&swap_chain_desc(true), &levels, CreateDeviceFlags::empty())
        .unwrap();
    assert_eq!(triple.device.feature_level(), FeatureLevel::Level10_1);

    let result = driver.create_device_and_swap_chain(
        &swap_chain_desc(true),
        &[FeatureLevel::Level11_0],
        CreateDeviceFlags::empty(),
    );
    assert!(result.is_err());
}

#[test]
fn test_zero_sized_swap_chain_is_rejected() {
    let driver = MockDriver::new();
    let desc = SwapChainDesc { width: 0, ..swap_chain_desc(true) };

    let result = driver.create_device_and_swap_chain(&desc, &[FeatureLevel::Level11_0], CreateDeviceFlags::empty());
    assert!(matches!(result, Err(StatusCode::E_INVALIDARG)));
}

// ============================================================================
// Swap chain
// ============================================================================

#[test]
fn test_present_records_blocking_waits() {
    let driver = MockDriver::new();
    let ledger = driver.ledger();
    let triple = driver
        .create_device_and_swap_chain(&swap_chain_desc(true), &[FeatureLevel::Level11_0], CreateDeviceFlags::empty())
        .unwrap();

    triple.swap_chain.present(0).unwrap();
    triple.swap_chain.present(1).unwrap();
    triple.swap_chain.present(0).unwrap();

    assert_eq!(ledger.present_count(), 3);
    assert_eq!(ledger.blocking_waits(), 1);
}

#[test]
fn test_get_buffer_returns_the_back_buffer() {
    let driver = MockDriver::new();
    let triple = driver
        .create_device_and_swap_chain(&swap_chain_desc(true), &[FeatureLevel::Level11_0], CreateDeviceFlags::empty())
        .unwrap();

    let first = triple.swap_chain.get_buffer(0).unwrap();
    let second = triple.swap_chain.get_buffer(0).unwrap();
    assert!(Rc::ptr_eq(&first, &second));
    assert_eq!(first.desc().bind_flags, BindFlags::RENDER_TARGET);
    assert_eq!((first.desc().width, first.desc().height), (640, 480));
    assert_eq!(triple.swap_chain.get_buffer(1).err(), Some(StatusCode::DXGI_ERROR_INVALID_CALL));
}

#[test]
fn test_fullscreen_release_is_a_release_failure() {
    let driver = MockDriver::new();
    let ledger = driver.ledger();
    let triple = driver
        .create_device_and_swap_chain(&swap_chain_desc(false), &[FeatureLevel::Level11_0], CreateDeviceFlags::empty())
        .unwrap();
    assert!(triple.swap_chain.fullscreen_state().unwrap());

    drop(triple);
    assert_eq!(ledger.release_failures().len(), 1);
    assert_eq!(ledger.total_live(), 0);
}

#[test]
fn test_windowed_release_is_clean() {
    let driver = MockDriver::new();
    let ledger = driver.ledger();
    let triple = driver
        .create_device_and_swap_chain(&swap_chain_desc(false), &[FeatureLevel::Level11_0], CreateDeviceFlags::empty())
        .unwrap();

    triple.swap_chain.set_fullscreen_state(false).unwrap();
    drop(triple);

    assert!(ledger.release_failures().is_empty());
    assert_eq!(ledger.commands(), vec![MockCommand::SetFullscreenState(false)]);
}

#[test]
fn test_context_and_swap_chain_hold_the_device() {
    let driver = MockDriver::new();
    let ledger = driver.ledger();
    let triple = driver
        .create_device_and_swap_chain(&swap_chain_desc(true), &[FeatureLevel::Level11_0], CreateDeviceFlags::empty())
        .unwrap();
    let context = Rc::clone(&triple.context);
    let swap_chain = Rc::clone(&triple.swap_chain);
    drop(triple);

    assert_eq!(ledger.live_count(MockObjectKind::Device), 1);
    assert_eq!(context.device().feature_level(), FeatureLevel::Level11_0);
    assert_eq!(swap_chain.device().feature_level(), FeatureLevel::Level11_0);

    drop(context);
    assert_eq!(ledger.live_count(MockObjectKind::Device), 1);
    drop(swap_chain);
    assert_eq!(ledger.total_live(), 0);
    assert_eq!(ledger.release_order().last(), Some(&MockObjectKind::Device));
}

// ============================================================================
// Device and context
// ============================================================================

#[test]
fn test_views_keep_resources_alive() {
    let driver = MockDriver::new();
    let ledger = driver.ledger();
    let triple = driver
        .create_device_and_swap_chain(&swap_chain_desc(true), &[FeatureLevel::Level11_0], CreateDeviceFlags::empty())
        .unwrap();

    let texture = triple.device.create_texture_2d(&depth_desc(640, 480)).unwrap();
    let view_desc = DepthStencilViewDesc {
        format: Format::D24_UNORM_S8_UINT,
        view_dimension: DsvDimension::Texture2D,
        mip_slice: 0,
    };
    let view = triple.device.create_depth_stencil_view(&texture, &view_desc).unwrap();
    assert!(Rc::ptr_eq(&view.resource(), &texture));

    drop(texture);
    assert_eq!(ledger.live_count(MockObjectKind::Texture2D), 2);
    drop(view);
    assert_eq!(ledger.live_count(MockObjectKind::Texture2D), 1);
}

#[test]
fn test_view_format_must_match_texture() {
    let driver = MockDriver::new();
    let triple = driver
        .create_device_and_swap_chain(&swap_chain_desc(true), &[FeatureLevel::Level11_0], CreateDeviceFlags::empty())
        .unwrap();
    let texture = triple.device.create_texture_2d(&depth_desc(640, 480)).unwrap();
    let view_desc = DepthStencilViewDesc {
        format: Format::R8G8B8A8_UNORM,
        view_dimension: DsvDimension::Texture2D,
        mip_slice: 0,
    };

    assert!(triple.device.create_depth_stencil_view(&texture, &view_desc).is_err());
}

#[test]
fn test_render_target_view_requires_render_target_binding() {
    let driver = MockDriver::new();
    let triple = driver
        .create_device_and_swap_chain(&swap_chain_desc(true), &[FeatureLevel::Level11_0], CreateDeviceFlags::empty())
        .unwrap();
    let depth = triple.device.create_texture_2d(&depth_desc(640, 480)).unwrap();

    assert!(triple.device.create_render_target_view(&depth).is_err());
}

#[test]
fn test_context_holds_bound_objects() {
    let driver = MockDriver::new();
    let ledger = driver.ledger();
    let triple = driver
        .create_device_and_swap_chain(&swap_chain_desc(true), &[FeatureLevel::Level11_0], CreateDeviceFlags::empty())
        .unwrap();
    let back_buffer = triple.swap_chain.get_buffer(0).unwrap();
    let view = triple.device.create_render_target_view(&back_buffer).unwrap();

    triple.context.om_set_render_targets(&view, None);
    triple.context.clear_render_target_view(&view, [1.0, 0.0, 0.0, 1.0]);
    drop(view);
    assert_eq!(ledger.live_count(MockObjectKind::RenderTargetView), 1);

    assert_eq!(
        ledger.commands(),
        vec![
            MockCommand::SetRenderTargets { with_depth_stencil: false },
            MockCommand::ClearRenderTarget([1.0, 0.0, 0.0, 1.0]),
        ]
    );

    drop(back_buffer);
    drop(triple);
    assert_eq!(ledger.total_live(), 0);
}

#[test]
fn test_clear_depth_stencil_is_recorded() {
    let driver = MockDriver::new();
    let ledger = driver.ledger();
    let triple = driver
        .create_device_and_swap_chain(&swap_chain_desc(true), &[FeatureLevel::Level11_0], CreateDeviceFlags::empty())
        .unwrap();
    let texture = triple.device.create_texture_2d(&depth_desc(640, 480)).unwrap();
    let view_desc = DepthStencilViewDesc {
        format: Format::D24_UNORM_S8_UINT,
        view_dimension: DsvDimension::Texture2D,
        mip_slice: 0,
    };
    let view = triple.device.create_depth_stencil_view(&texture, &view_desc).unwrap();

    triple.context.clear_depth_stencil_view(&view, ClearFlags::DEPTH, 0.5, 3);
    assert_eq!(
        ledger.commands(),
        vec![MockCommand::ClearDepthStencil { flags: ClearFlags::DEPTH, depth: 0.5, stencil: 3 }]
    );
}
