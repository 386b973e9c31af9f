/// D3D11Driver - Direct3D 11 / DXGI implementation of GraphicsDriver
///
/// Enumeration goes through a DXGI 1.0 factory; the device, immediate context
/// and swap chain are created in one `D3D11CreateDeviceAndSwapChain` call on
/// the default hardware adapter.

use std::rc::Rc;

use render_device::device_debug;
use render_device::rd::{
    Adapter as RdAdapter, AdapterDesc, CreateDeviceFlags, Device as RdDevice, DeviceTriple,
    DisplayFactory, DisplayMode, DriverResult, FeatureLevel, Format, GraphicsDriver,
    Output as RdOutput, StatusCode, SwapChainDesc,
};
use windows::Win32::Graphics::Direct3D::{D3D_DRIVER_TYPE_HARDWARE, D3D_FEATURE_LEVEL};
use windows::Win32::Graphics::Direct3D11::{D3D11CreateDeviceAndSwapChain, D3D11_SDK_VERSION};
use windows::Win32::Graphics::Dxgi::Common::DXGI_MODE_DESC;
use windows::Win32::Graphics::Dxgi::{
    CreateDXGIFactory, IDXGIAdapter, IDXGIFactory, IDXGIOutput, DXGI_ENUM_MODES_INTERLACED,
};

use crate::d3d11_device::{Context, Device};
use crate::d3d11_format::{
    create_device_flags_to_d3d, display_mode_from_dxgi, feature_level_from_d3d,
    feature_level_to_d3d, format_to_dxgi, status_of, swap_chain_desc_to_dxgi,
};
use crate::d3d11_swap_chain::SwapChain;

const SOURCE: &str = "render_device_d3d11::D3D11Driver";

/// Direct3D 11 driver on the default hardware adapter
#[derive(Debug, Default, Clone, Copy)]
pub struct D3D11Driver;

impl D3D11Driver {
    pub fn new() -> Self {
        Self
    }
}

impl GraphicsDriver for D3D11Driver {
    fn name(&self) -> &str {
        "d3d11"
    }

    fn create_factory(&self) -> DriverResult<Rc<dyn DisplayFactory>> {
        let native = unsafe { CreateDXGIFactory::<IDXGIFactory>() }.map_err(|e| status_of(&e))?;
        Ok(Rc::new(Factory { native }))
    }

    fn create_device_and_swap_chain(
        &self,
        desc: &SwapChainDesc,
        feature_levels: &[FeatureLevel],
        flags: CreateDeviceFlags,
    ) -> DriverResult<DeviceTriple> {
        let native_desc = swap_chain_desc_to_dxgi(desc)?;
        let levels: Vec<D3D_FEATURE_LEVEL> =
            feature_levels.iter().copied().map(feature_level_to_d3d).collect();

        let mut swap_chain = None;
        let mut device = None;
        let mut context = None;
        let mut level = D3D_FEATURE_LEVEL::default();

        unsafe {
            D3D11CreateDeviceAndSwapChain(
                None,
                D3D_DRIVER_TYPE_HARDWARE,
                None,
                create_device_flags_to_d3d(flags),
                if levels.is_empty() { None } else { Some(levels.as_slice()) },
                D3D11_SDK_VERSION,
                Some(&native_desc),
                Some(&mut swap_chain),
                Some(&mut device),
                Some(&mut level),
                Some(&mut context),
            )
        }
        .map_err(|e| status_of(&e))?;

        let (Some(swap_chain), Some(device), Some(context)) = (swap_chain, device, context) else {
            return Err(StatusCode::E_FAIL);
        };
        let feature_level =
            feature_level_from_d3d(level).ok_or(StatusCode::DXGI_ERROR_UNSUPPORTED)?;

        device_debug!(SOURCE, "D3D11CreateDeviceAndSwapChain succeeded ({:?})", feature_level);

        let device: Rc<dyn RdDevice> = Rc::new(Device {
            native: device,
            feature_level,
        });

        Ok(DeviceTriple {
            swap_chain: Rc::new(SwapChain {
                native: swap_chain,
                desc: *desc,
                device: Rc::clone(&device),
            }),
            context: Rc::new(Context {
                native: context,
                device: Rc::clone(&device),
            }),
            device,
        })
    }
}

// ===== ENUMERATION =====

/// DXGI factory
pub struct Factory {
    native: IDXGIFactory,
}

impl DisplayFactory for Factory {
    fn enum_adapter(&self, index: u32) -> DriverResult<Rc<dyn RdAdapter>> {
        let native = unsafe { self.native.EnumAdapters(index) }.map_err(|e| status_of(&e))?;
        Ok(Rc::new(Adapter { native }))
    }
}

/// DXGI adapter
pub struct Adapter {
    native: IDXGIAdapter,
}

impl RdAdapter for Adapter {
    fn desc(&self) -> DriverResult<AdapterDesc> {
        let desc = unsafe { self.native.GetDesc() }.map_err(|e| status_of(&e))?;
        Ok(AdapterDesc {
            description: desc.Description.to_vec(),
            dedicated_video_memory: desc.DedicatedVideoMemory as u64,
        })
    }

    fn enum_output(&self, index: u32) -> DriverResult<Rc<dyn RdOutput>> {
        let native = unsafe { self.native.EnumOutputs(index) }.map_err(|e| status_of(&e))?;
        Ok(Rc::new(Output { native }))
    }
}

/// DXGI output (monitor)
pub struct Output {
    native: IDXGIOutput,
}

impl RdOutput for Output {
    fn display_mode_count(&self, format: Format) -> DriverResult<u32> {
        let mut count = 0u32;
        unsafe {
            self.native.GetDisplayModeList(
                format_to_dxgi(format),
                DXGI_ENUM_MODES_INTERLACED,
                &mut count,
                None,
            )
        }
        .map_err(|e| status_of(&e))?;
        Ok(count)
    }

    fn display_modes(&self, format: Format, count: u32) -> DriverResult<Vec<DisplayMode>> {
        let mut filled = count;
        let mut modes = vec![DXGI_MODE_DESC::default(); count as usize];
        unsafe {
            self.native.GetDisplayModeList(
                format_to_dxgi(format),
                DXGI_ENUM_MODES_INTERLACED,
                &mut filled,
                Some(modes.as_mut_ptr()),
            )
        }
        .map_err(|e| status_of(&e))?;

        modes.truncate(filled as usize);
        Ok(modes.iter().map(display_mode_from_dxgi).collect())
    }
}
