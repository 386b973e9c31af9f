/// Value types exchanged with the graphics driver

use bitflags::bitflags;
use raw_window_handle::RawWindowHandle;

// ===== FORMATS AND DISPLAY MODES =====

/// Pixel format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum Format {
    UNKNOWN,
    R8G8B8A8_UNORM,
    B8G8R8A8_UNORM,
    D24_UNORM_S8_UINT,
}

/// Refresh rate as a rational number of hertz
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RefreshRate {
    pub numerator: u32,
    pub denominator: u32,
}

impl RefreshRate {
    /// 0/1: lets the driver present as fast as it can
    pub const UNCONSTRAINED: RefreshRate = RefreshRate { numerator: 0, denominator: 1 };

    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Self { numerator, denominator }
    }

    /// Rate in hertz (0.0 when the denominator is zero)
    pub fn hz(&self) -> f64 {
        if self.denominator == 0 {
            0.0
        } else {
            self.numerator as f64 / self.denominator as f64
        }
    }
}

/// Scanline ordering of a display mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScanlineOrdering {
    #[default]
    Unspecified,
    Progressive,
    UpperFieldFirst,
    LowerFieldFirst,
}

/// Scaling of a display mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Scaling {
    #[default]
    Unspecified,
    Centered,
    Stretched,
}

/// One entry of a monitor's display-mode list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DisplayMode {
    pub width: u32,
    pub height: u32,
    pub refresh_rate: RefreshRate,
    pub format: Format,
    pub scanline_ordering: ScanlineOrdering,
    pub scaling: Scaling,
}

impl DisplayMode {
    pub fn new(width: u32, height: u32, numerator: u32, denominator: u32) -> Self {
        Self {
            width,
            height,
            refresh_rate: RefreshRate::new(numerator, denominator),
            format: Format::R8G8B8A8_UNORM,
            scanline_ordering: ScanlineOrdering::Unspecified,
            scaling: Scaling::Unspecified,
        }
    }
}

/// Raw adapter description as reported by the driver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterDesc {
    /// NUL-terminated UTF-16 adapter name
    pub description: Vec<u16>,
    /// Dedicated video memory in bytes
    pub dedicated_video_memory: u64,
}

// ===== DEVICE CREATION =====

/// Direct3D feature level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FeatureLevel {
    Level10_0,
    Level10_1,
    Level11_0,
    Level11_1,
}

bitflags! {
    /// Device creation flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CreateDeviceFlags: u32 {
        const SINGLETHREADED = 0x1;
        const DEBUG = 0x2;
        const BGRA_SUPPORT = 0x20;
    }
}

/// Multisampling parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SampleDesc {
    pub count: u32,
    pub quality: u32,
}

impl SampleDesc {
    /// Multisampling off
    pub const SINGLE: SampleDesc = SampleDesc { count: 1, quality: 0 };
}

/// What happens to back-buffer contents after present
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwapEffect {
    Discard,
    Sequential,
    FlipSequential,
    FlipDiscard,
}

/// Swap chain descriptor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwapChainDesc {
    pub width: u32,
    pub height: u32,
    pub refresh_rate: RefreshRate,
    pub format: Format,
    pub scanline_ordering: ScanlineOrdering,
    pub scaling: Scaling,
    pub sample_desc: SampleDesc,
    /// Back buffers are used as render target output
    pub render_target_output: bool,
    pub buffer_count: u32,
    pub output_window: RawWindowHandle,
    pub windowed: bool,
    pub swap_effect: SwapEffect,
    pub flags: u32,
}

// ===== TEXTURES =====

/// How the GPU and CPU access a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceUsage {
    Default,
    Immutable,
    Dynamic,
    Staging,
}

bitflags! {
    /// Pipeline stages a resource can be bound to
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BindFlags: u32 {
        const SHADER_RESOURCE = 0x8;
        const RENDER_TARGET = 0x20;
        const DEPTH_STENCIL = 0x40;
    }
}

/// 2D texture descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Texture2DDesc {
    pub width: u32,
    pub height: u32,
    pub mip_levels: u32,
    pub array_size: u32,
    pub format: Format,
    pub sample_desc: SampleDesc,
    pub usage: ResourceUsage,
    pub bind_flags: BindFlags,
    pub cpu_access_flags: u32,
    pub misc_flags: u32,
}

// ===== DEPTH STENCIL =====

/// Comparison used by depth and stencil tests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonFunc {
    Never,
    Less,
    Equal,
    LessEqual,
    Greater,
    NotEqual,
    GreaterEqual,
    Always,
}

/// Stencil buffer operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StencilOp {
    Keep,
    Zero,
    Replace,
    IncrSat,
    DecrSat,
    Invert,
    Incr,
    Decr,
}

/// Which part of the depth buffer can be written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DepthWriteMask {
    Zero,
    All,
}

/// Stencil operations for one face orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DepthStencilOpDesc {
    pub stencil_fail_op: StencilOp,
    pub stencil_depth_fail_op: StencilOp,
    pub stencil_pass_op: StencilOp,
    pub stencil_func: ComparisonFunc,
}

/// Depth-stencil state descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DepthStencilDesc {
    pub depth_enable: bool,
    pub depth_write_mask: DepthWriteMask,
    pub depth_func: ComparisonFunc,
    pub stencil_enable: bool,
    pub stencil_read_mask: u8,
    pub stencil_write_mask: u8,
    pub front_face: DepthStencilOpDesc,
    pub back_face: DepthStencilOpDesc,
}

/// Resource dimension seen through a depth-stencil view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DsvDimension {
    Texture2D,
    Texture2DMultisampled,
}

/// Depth-stencil view descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DepthStencilViewDesc {
    pub format: Format,
    pub view_dimension: DsvDimension,
    pub mip_slice: u32,
}

bitflags! {
    /// Parts of a depth-stencil view to clear
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ClearFlags: u32 {
        const DEPTH = 0x1;
        const STENCIL = 0x2;
    }
}

// ===== RASTERIZER =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FillMode {
    Wireframe,
    Solid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CullMode {
    None,
    Front,
    Back,
}

/// Rasterizer state descriptor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterizerDesc {
    pub fill_mode: FillMode,
    pub cull_mode: CullMode,
    pub front_counter_clockwise: bool,
    pub depth_bias: i32,
    pub depth_bias_clamp: f32,
    pub slope_scaled_depth_bias: f32,
    pub depth_clip_enable: bool,
    pub scissor_enable: bool,
    pub multisample_enable: bool,
    pub antialiased_line_enable: bool,
}

/// Viewport in render-target pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub top_left_x: f32,
    pub top_left_y: f32,
    pub width: f32,
    pub height: f32,
    pub min_depth: f32,
    pub max_depth: f32,
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;
