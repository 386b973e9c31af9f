/// Swap chain descriptor and joint device creation
///
/// The swap chain, the device and its immediate context are created by a
/// single driver call and owned together by `DeviceCore`.

use std::rc::Rc;

use raw_window_handle::RawWindowHandle;

use crate::config::{BACK_BUFFER_FORMAT, MINIMUM_FEATURE_LEVEL};
use crate::driver::{
    CreateDeviceFlags, Device, DeviceContext, GraphicsDriver, RefreshRate, SampleDesc,
    Scaling, ScanlineOrdering, SwapChain, SwapChainDesc, SwapEffect,
};
use crate::error::{Error, Result};
use crate::{device_err, device_info, device_warn};

const SOURCE: &str = "render_device::swap_chain_factory";

/// Swap chain descriptor for a single-buffered window swap chain
///
/// # Arguments
///
/// * `refresh_rate` - Negotiated rate, only used when `vsync_enabled` is set;
///   otherwise the descriptor carries the unconstrained rate 0/1
pub fn build_swap_chain_descriptor(
    width: u32,
    height: u32,
    refresh_rate: RefreshRate,
    window: RawWindowHandle,
    fullscreen: bool,
    vsync_enabled: bool,
) -> SwapChainDesc {
    SwapChainDesc {
        width,
        height,
        refresh_rate: if vsync_enabled { refresh_rate } else { RefreshRate::UNCONSTRAINED },
        format: BACK_BUFFER_FORMAT,
        scanline_ordering: ScanlineOrdering::Unspecified,
        scaling: Scaling::Unspecified,
        sample_desc: SampleDesc::SINGLE,
        render_target_output: true,
        buffer_count: 1,
        output_window: window,
        windowed: !fullscreen,
        swap_effect: SwapEffect::Discard,
        flags: 0,
    }
}

// ============================================================================
// OwnedSwapChain
// ============================================================================

/// Swap chain handle that leaves exclusive full-screen before it is released
pub struct OwnedSwapChain {
    inner: Rc<dyn SwapChain>,
}

impl OwnedSwapChain {
    pub fn new(inner: Rc<dyn SwapChain>) -> Self {
        Self { inner }
    }

    pub fn get(&self) -> &Rc<dyn SwapChain> {
        &self.inner
    }

    /// Switch back to windowed mode if the swap chain is full-screen
    ///
    /// A no-op when already windowed, so it can run any number of times.
    pub fn leave_fullscreen(&self) -> Result<()> {
        // An unreadable state is treated as full-screen
        let fullscreen = self.inner.fullscreen_state().unwrap_or(true);
        if !fullscreen {
            return Ok(());
        }
        self.inner.set_fullscreen_state(false).map_err(|code| {
            device_err!(SOURCE, Error::shutdown("Leaving exclusive full-screen mode", code))
        })
    }
}

impl Drop for OwnedSwapChain {
    fn drop(&mut self) {
        if let Err(err) = self.leave_fullscreen() {
            device_warn!(SOURCE, "Swap chain released while still full-screen: {}", err);
        }
    }
}

// ============================================================================
// DeviceCore
// ============================================================================

/// Immediate context, swap chain and device, created together
///
/// Fields drop in declaration order: context, then swap chain, then device.
/// The context and the swap chain also hold the device, so clones handed out
/// by the accessors never outlive it.
pub struct DeviceCore {
    pub context: Rc<dyn DeviceContext>,
    pub swap_chain: OwnedSwapChain,
    pub device: Rc<dyn Device>,
}

/// Create swap chain, device and immediate context in one driver call
///
/// Only `MINIMUM_FEATURE_LEVEL` is requested; there is no fallback chain.
pub fn create_device_and_swap_chain(
    driver: &dyn GraphicsDriver,
    desc: &SwapChainDesc,
    flags: CreateDeviceFlags,
) -> Result<DeviceCore> {
    let triple = driver
        .create_device_and_swap_chain(desc, &[MINIMUM_FEATURE_LEVEL], flags)
        .map_err(|code| {
            device_err!(
                SOURCE,
                Error::device_creation("Creating the device, swap chain and immediate context", code)
            )
        })?;

    device_info!(
        SOURCE,
        "Device created on '{}' driver at {:?}",
        driver.name(),
        triple.device.feature_level()
    );

    Ok(DeviceCore {
        context: triple.context,
        swap_chain: OwnedSwapChain::new(triple.swap_chain),
        device: triple.device,
    })
}

#[cfg(test)]
#[path = "swap_chain_factory_tests.rs"]
mod tests;
