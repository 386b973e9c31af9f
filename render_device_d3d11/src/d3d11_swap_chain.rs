/// SwapChain - D3D11 implementation of the SwapChain trait

use std::rc::Rc;

use render_device::rd::{
    Device as RdDevice, DriverResult, StatusCode, SwapChain as RdSwapChain, SwapChainDesc,
    Texture2D as RdTexture2D,
};
use windows::Win32::Foundation::BOOL;
use windows::Win32::Graphics::Direct3D11::ID3D11Texture2D;
use windows::Win32::Graphics::Dxgi::{IDXGIOutput, IDXGISwapChain, DXGI_PRESENT};

use crate::d3d11_format::{back_buffer_desc, status_of};
use crate::d3d11_resource::Texture2D;

/// DXGI swap chain
///
/// Created jointly with the device by `D3D11Driver`. Leaving exclusive
/// full-screen before release is the owner's job.
pub struct SwapChain {
    pub(crate) native: IDXGISwapChain,
    /// Descriptor the swap chain was created with
    pub(crate) desc: SwapChainDesc,
    pub(crate) device: Rc<dyn RdDevice>,
}

impl RdSwapChain for SwapChain {
    fn device(&self) -> Rc<dyn RdDevice> {
        Rc::clone(&self.device)
    }

    fn desc(&self) -> DriverResult<SwapChainDesc> {
        Ok(self.desc)
    }

    fn get_buffer(&self, index: u32) -> DriverResult<Rc<dyn RdTexture2D>> {
        if index >= self.desc.buffer_count {
            return Err(StatusCode::DXGI_ERROR_INVALID_CALL);
        }

        let native = unsafe { self.native.GetBuffer::<ID3D11Texture2D>(index) }
            .map_err(|e| status_of(&e))?;

        Ok(Rc::new(Texture2D {
            native,
            desc: back_buffer_desc(&self.desc),
        }))
    }

    fn present(&self, sync_interval: u32) -> DriverResult<()> {
        unsafe { self.native.Present(sync_interval, DXGI_PRESENT(0)) }
            .ok()
            .map_err(|e| status_of(&e))
    }

    fn set_fullscreen_state(&self, fullscreen: bool) -> DriverResult<()> {
        unsafe { self.native.SetFullscreenState(BOOL::from(fullscreen), None::<&IDXGIOutput>) }
            .map_err(|e| status_of(&e))
    }

    fn fullscreen_state(&self) -> DriverResult<bool> {
        let mut fullscreen = BOOL::default();
        unsafe { self.native.GetFullscreenState(Some(&mut fullscreen as *mut BOOL), None) }
            .map_err(|e| status_of(&e))?;
        Ok(fullscreen.as_bool())
    }
}
