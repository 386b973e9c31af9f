/// Conversions between render_device value types and D3D11/DXGI structures
///
/// Pure functions, no device required.

use std::ffi::c_void;

use raw_window_handle::RawWindowHandle;
use render_device::rd::{
    BindFlags, ClearFlags, ComparisonFunc, CreateDeviceFlags, CullMode, DepthStencilDesc,
    DepthStencilOpDesc, DepthStencilViewDesc, DepthWriteMask, DisplayMode, DsvDimension,
    FeatureLevel, FillMode, Format, RasterizerDesc, RefreshRate, ResourceUsage, SampleDesc,
    Scaling, ScanlineOrdering, StatusCode, StencilOp, SwapChainDesc, SwapEffect, Texture2DDesc,
    Viewport,
};
use windows::Win32::Foundation::{BOOL, HWND};
use windows::Win32::Graphics::Direct3D::{
    D3D_FEATURE_LEVEL, D3D_FEATURE_LEVEL_10_0, D3D_FEATURE_LEVEL_10_1, D3D_FEATURE_LEVEL_11_0,
    D3D_FEATURE_LEVEL_11_1,
};
use windows::Win32::Graphics::Direct3D11::*;
use windows::Win32::Graphics::Dxgi::Common::*;
use windows::Win32::Graphics::Dxgi::*;

// ===== STATUS =====

pub(crate) fn status_of(error: &windows::core::Error) -> StatusCode {
    StatusCode(error.code().0)
}

// ===== FORMATS =====

pub(crate) fn format_to_dxgi(format: Format) -> DXGI_FORMAT {
    match format {
        Format::UNKNOWN => DXGI_FORMAT_UNKNOWN,
        Format::R8G8B8A8_UNORM => DXGI_FORMAT_R8G8B8A8_UNORM,
        Format::B8G8R8A8_UNORM => DXGI_FORMAT_B8G8R8A8_UNORM,
        Format::D24_UNORM_S8_UINT => DXGI_FORMAT_D24_UNORM_S8_UINT,
    }
}

pub(crate) fn format_from_dxgi(format: DXGI_FORMAT) -> Format {
    match format {
        DXGI_FORMAT_R8G8B8A8_UNORM => Format::R8G8B8A8_UNORM,
        DXGI_FORMAT_B8G8R8A8_UNORM => Format::B8G8R8A8_UNORM,
        DXGI_FORMAT_D24_UNORM_S8_UINT => Format::D24_UNORM_S8_UINT,
        _ => Format::UNKNOWN,
    }
}

fn scanline_ordering_to_dxgi(ordering: ScanlineOrdering) -> DXGI_MODE_SCANLINE_ORDER {
    match ordering {
        ScanlineOrdering::Unspecified => DXGI_MODE_SCANLINE_ORDER_UNSPECIFIED,
        ScanlineOrdering::Progressive => DXGI_MODE_SCANLINE_ORDER_PROGRESSIVE,
        ScanlineOrdering::UpperFieldFirst => DXGI_MODE_SCANLINE_ORDER_UPPER_FIELD_FIRST,
        ScanlineOrdering::LowerFieldFirst => DXGI_MODE_SCANLINE_ORDER_LOWER_FIELD_FIRST,
    }
}

fn scanline_ordering_from_dxgi(ordering: DXGI_MODE_SCANLINE_ORDER) -> ScanlineOrdering {
    match ordering {
        DXGI_MODE_SCANLINE_ORDER_PROGRESSIVE => ScanlineOrdering::Progressive,
        DXGI_MODE_SCANLINE_ORDER_UPPER_FIELD_FIRST => ScanlineOrdering::UpperFieldFirst,
        DXGI_MODE_SCANLINE_ORDER_LOWER_FIELD_FIRST => ScanlineOrdering::LowerFieldFirst,
        _ => ScanlineOrdering::Unspecified,
    }
}

fn scaling_to_dxgi(scaling: Scaling) -> DXGI_MODE_SCALING {
    match scaling {
        Scaling::Unspecified => DXGI_MODE_SCALING_UNSPECIFIED,
        Scaling::Centered => DXGI_MODE_SCALING_CENTERED,
        Scaling::Stretched => DXGI_MODE_SCALING_STRETCHED,
    }
}

fn scaling_from_dxgi(scaling: DXGI_MODE_SCALING) -> Scaling {
    match scaling {
        DXGI_MODE_SCALING_CENTERED => Scaling::Centered,
        DXGI_MODE_SCALING_STRETCHED => Scaling::Stretched,
        _ => Scaling::Unspecified,
    }
}

pub(crate) fn display_mode_from_dxgi(mode: &DXGI_MODE_DESC) -> DisplayMode {
    DisplayMode {
        width: mode.Width,
        height: mode.Height,
        refresh_rate: RefreshRate::new(mode.RefreshRate.Numerator, mode.RefreshRate.Denominator),
        format: format_from_dxgi(mode.Format),
        scanline_ordering: scanline_ordering_from_dxgi(mode.ScanlineOrdering),
        scaling: scaling_from_dxgi(mode.Scaling),
    }
}

fn sample_desc_to_dxgi(sample_desc: SampleDesc) -> DXGI_SAMPLE_DESC {
    DXGI_SAMPLE_DESC {
        Count: sample_desc.count,
        Quality: sample_desc.quality,
    }
}

// ===== DEVICE CREATION =====

pub(crate) fn feature_level_to_d3d(level: FeatureLevel) -> D3D_FEATURE_LEVEL {
    match level {
        FeatureLevel::Level10_0 => D3D_FEATURE_LEVEL_10_0,
        FeatureLevel::Level10_1 => D3D_FEATURE_LEVEL_10_1,
        FeatureLevel::Level11_0 => D3D_FEATURE_LEVEL_11_0,
        FeatureLevel::Level11_1 => D3D_FEATURE_LEVEL_11_1,
    }
}

/// `None` for levels outside the 10.0..=11.1 range
pub(crate) fn feature_level_from_d3d(level: D3D_FEATURE_LEVEL) -> Option<FeatureLevel> {
    match level {
        D3D_FEATURE_LEVEL_10_0 => Some(FeatureLevel::Level10_0),
        D3D_FEATURE_LEVEL_10_1 => Some(FeatureLevel::Level10_1),
        D3D_FEATURE_LEVEL_11_0 => Some(FeatureLevel::Level11_0),
        D3D_FEATURE_LEVEL_11_1 => Some(FeatureLevel::Level11_1),
        _ => None,
    }
}

pub(crate) fn create_device_flags_to_d3d(flags: CreateDeviceFlags) -> D3D11_CREATE_DEVICE_FLAG {
    let mut native = 0;
    if flags.contains(CreateDeviceFlags::SINGLETHREADED) {
        native |= D3D11_CREATE_DEVICE_SINGLETHREADED.0;
    }
    if flags.contains(CreateDeviceFlags::DEBUG) {
        native |= D3D11_CREATE_DEVICE_DEBUG.0;
    }
    if flags.contains(CreateDeviceFlags::BGRA_SUPPORT) {
        native |= D3D11_CREATE_DEVICE_BGRA_SUPPORT.0;
    }
    D3D11_CREATE_DEVICE_FLAG(native)
}

/// Native window of a Win32 handle, `E_INVALIDARG` for any other platform
pub(crate) fn hwnd_of(window: RawWindowHandle) -> Result<HWND, StatusCode> {
    match window {
        RawWindowHandle::Win32(handle) => Ok(HWND(handle.hwnd.get() as *mut c_void)),
        _ => Err(StatusCode::E_INVALIDARG),
    }
}

fn swap_effect_to_dxgi(effect: SwapEffect) -> DXGI_SWAP_EFFECT {
    match effect {
        SwapEffect::Discard => DXGI_SWAP_EFFECT_DISCARD,
        SwapEffect::Sequential => DXGI_SWAP_EFFECT_SEQUENTIAL,
        SwapEffect::FlipSequential => DXGI_SWAP_EFFECT_FLIP_SEQUENTIAL,
        SwapEffect::FlipDiscard => DXGI_SWAP_EFFECT_FLIP_DISCARD,
    }
}

pub(crate) fn swap_chain_desc_to_dxgi(desc: &SwapChainDesc) -> Result<DXGI_SWAP_CHAIN_DESC, StatusCode> {
    Ok(DXGI_SWAP_CHAIN_DESC {
        BufferDesc: DXGI_MODE_DESC {
            Width: desc.width,
            Height: desc.height,
            RefreshRate: DXGI_RATIONAL {
                Numerator: desc.refresh_rate.numerator,
                Denominator: desc.refresh_rate.denominator,
            },
            Format: format_to_dxgi(desc.format),
            ScanlineOrdering: scanline_ordering_to_dxgi(desc.scanline_ordering),
            Scaling: scaling_to_dxgi(desc.scaling),
        },
        SampleDesc: sample_desc_to_dxgi(desc.sample_desc),
        BufferUsage: if desc.render_target_output {
            DXGI_USAGE_RENDER_TARGET_OUTPUT
        } else {
            DXGI_USAGE(0)
        },
        BufferCount: desc.buffer_count,
        OutputWindow: hwnd_of(desc.output_window)?,
        Windowed: BOOL::from(desc.windowed),
        SwapEffect: swap_effect_to_dxgi(desc.swap_effect),
        Flags: desc.flags,
    })
}

// ===== TEXTURES =====

fn usage_to_d3d(usage: ResourceUsage) -> D3D11_USAGE {
    match usage {
        ResourceUsage::Default => D3D11_USAGE_DEFAULT,
        ResourceUsage::Immutable => D3D11_USAGE_IMMUTABLE,
        ResourceUsage::Dynamic => D3D11_USAGE_DYNAMIC,
        ResourceUsage::Staging => D3D11_USAGE_STAGING,
    }
}

fn bind_flags_to_d3d(flags: BindFlags) -> u32 {
    let mut native = 0;
    if flags.contains(BindFlags::SHADER_RESOURCE) {
        native |= D3D11_BIND_SHADER_RESOURCE.0 as u32;
    }
    if flags.contains(BindFlags::RENDER_TARGET) {
        native |= D3D11_BIND_RENDER_TARGET.0 as u32;
    }
    if flags.contains(BindFlags::DEPTH_STENCIL) {
        native |= D3D11_BIND_DEPTH_STENCIL.0 as u32;
    }
    native
}

pub(crate) fn texture_2d_desc_to_d3d(desc: &Texture2DDesc) -> D3D11_TEXTURE2D_DESC {
    D3D11_TEXTURE2D_DESC {
        Width: desc.width,
        Height: desc.height,
        MipLevels: desc.mip_levels,
        ArraySize: desc.array_size,
        Format: format_to_dxgi(desc.format),
        SampleDesc: sample_desc_to_dxgi(desc.sample_desc),
        Usage: usage_to_d3d(desc.usage),
        BindFlags: bind_flags_to_d3d(desc.bind_flags),
        CPUAccessFlags: desc.cpu_access_flags,
        MiscFlags: desc.misc_flags,
    }
}

/// Descriptor of back buffer 0 as implied by the swap chain descriptor
pub(crate) fn back_buffer_desc(desc: &SwapChainDesc) -> Texture2DDesc {
    Texture2DDesc {
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
    }
}

// ===== DEPTH STENCIL =====

fn comparison_to_d3d(func: ComparisonFunc) -> D3D11_COMPARISON_FUNC {
    match func {
        ComparisonFunc::Never => D3D11_COMPARISON_NEVER,
        ComparisonFunc::Less => D3D11_COMPARISON_LESS,
        ComparisonFunc::Equal => D3D11_COMPARISON_EQUAL,
        ComparisonFunc::LessEqual => D3D11_COMPARISON_LESS_EQUAL,
        ComparisonFunc::Greater => D3D11_COMPARISON_GREATER,
        ComparisonFunc::NotEqual => D3D11_COMPARISON_NOT_EQUAL,
        ComparisonFunc::GreaterEqual => D3D11_COMPARISON_GREATER_EQUAL,
        ComparisonFunc::Always => D3D11_COMPARISON_ALWAYS,
    }
}

fn stencil_op_to_d3d(op: StencilOp) -> D3D11_STENCIL_OP {
    match op {
        StencilOp::Keep => D3D11_STENCIL_OP_KEEP,
        StencilOp::Zero => D3D11_STENCIL_OP_ZERO,
        StencilOp::Replace => D3D11_STENCIL_OP_REPLACE,
        StencilOp::IncrSat => D3D11_STENCIL_OP_INCR_SAT,
        StencilOp::DecrSat => D3D11_STENCIL_OP_DECR_SAT,
        StencilOp::Invert => D3D11_STENCIL_OP_INVERT,
        StencilOp::Incr => D3D11_STENCIL_OP_INCR,
        StencilOp::Decr => D3D11_STENCIL_OP_DECR,
    }
}

fn stencil_face_to_d3d(face: &DepthStencilOpDesc) -> D3D11_DEPTH_STENCILOP_DESC {
    D3D11_DEPTH_STENCILOP_DESC {
        StencilFailOp: stencil_op_to_d3d(face.stencil_fail_op),
        StencilDepthFailOp: stencil_op_to_d3d(face.stencil_depth_fail_op),
        StencilPassOp: stencil_op_to_d3d(face.stencil_pass_op),
        StencilFunc: comparison_to_d3d(face.stencil_func),
    }
}

pub(crate) fn depth_stencil_desc_to_d3d(desc: &DepthStencilDesc) -> D3D11_DEPTH_STENCIL_DESC {
    D3D11_DEPTH_STENCIL_DESC {
        DepthEnable: BOOL::from(desc.depth_enable),
        DepthWriteMask: match desc.depth_write_mask {
            DepthWriteMask::Zero => D3D11_DEPTH_WRITE_MASK_ZERO,
            DepthWriteMask::All => D3D11_DEPTH_WRITE_MASK_ALL,
        },
        DepthFunc: comparison_to_d3d(desc.depth_func),
        StencilEnable: BOOL::from(desc.stencil_enable),
        StencilReadMask: desc.stencil_read_mask,
        StencilWriteMask: desc.stencil_write_mask,
        FrontFace: stencil_face_to_d3d(&desc.front_face),
        BackFace: stencil_face_to_d3d(&desc.back_face),
    }
}

pub(crate) fn depth_stencil_view_desc_to_d3d(desc: &DepthStencilViewDesc) -> D3D11_DEPTH_STENCIL_VIEW_DESC {
    match desc.view_dimension {
        DsvDimension::Texture2D => D3D11_DEPTH_STENCIL_VIEW_DESC {
            Format: format_to_dxgi(desc.format),
            ViewDimension: D3D11_DSV_DIMENSION_TEXTURE2D,
            Anonymous: D3D11_DEPTH_STENCIL_VIEW_DESC_0 {
                Texture2D: D3D11_TEX2D_DSV { MipSlice: desc.mip_slice },
            },
            ..Default::default()
        },
        DsvDimension::Texture2DMultisampled => D3D11_DEPTH_STENCIL_VIEW_DESC {
            Format: format_to_dxgi(desc.format),
            ViewDimension: D3D11_DSV_DIMENSION_TEXTURE2DMS,
            ..Default::default()
        },
    }
}

pub(crate) fn clear_flags_to_d3d(flags: ClearFlags) -> u32 {
    let mut native = 0;
    if flags.contains(ClearFlags::DEPTH) {
        native |= D3D11_CLEAR_DEPTH.0 as u32;
    }
    if flags.contains(ClearFlags::STENCIL) {
        native |= D3D11_CLEAR_STENCIL.0 as u32;
    }
    native
}

// ===== RASTERIZER =====

pub(crate) fn rasterizer_desc_to_d3d(desc: &RasterizerDesc) -> D3D11_RASTERIZER_DESC {
    D3D11_RASTERIZER_DESC {
        FillMode: match desc.fill_mode {
            FillMode::Wireframe => D3D11_FILL_WIREFRAME,
            FillMode::Solid => D3D11_FILL_SOLID,
        },
        CullMode: match desc.cull_mode {
            CullMode::None => D3D11_CULL_NONE,
            CullMode::Front => D3D11_CULL_FRONT,
            CullMode::Back => D3D11_CULL_BACK,
        },
        FrontCounterClockwise: BOOL::from(desc.front_counter_clockwise),
        DepthBias: desc.depth_bias,
        DepthBiasClamp: desc.depth_bias_clamp,
        SlopeScaledDepthBias: desc.slope_scaled_depth_bias,
        DepthClipEnable: BOOL::from(desc.depth_clip_enable),
        ScissorEnable: BOOL::from(desc.scissor_enable),
        MultisampleEnable: BOOL::from(desc.multisample_enable),
        AntialiasedLineEnable: BOOL::from(desc.antialiased_line_enable),
    }
}

pub(crate) fn viewport_to_d3d(viewport: &Viewport) -> D3D11_VIEWPORT {
    D3D11_VIEWPORT {
        TopLeftX: viewport.top_left_x,
        TopLeftY: viewport.top_left_y,
        Width: viewport.width,
        Height: viewport.height,
        MinDepth: viewport.min_depth,
        MaxDepth: viewport.max_depth,
    }
}

#[cfg(test)]
#[path = "d3d11_format_tests.rs"]
mod tests;
