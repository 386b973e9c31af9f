/// Adapter and monitor enumeration
///
/// Queries the graphics infrastructure for the primary adapter, its primary
/// output and the display modes that output supports for a pixel format.
/// The handles are passed explicitly from one step to the next.

use std::rc::Rc;

use crate::driver::{
    Adapter, DisplayFactory, DisplayMode, Format, GraphicsDriver, Output, StatusCode,
};
use crate::error::{Error, Result};
use crate::{device_debug, device_err};

const SOURCE: &str = "render_device::enumerator";

/// Longest adapter name kept, in UTF-16 code units
pub const MAX_ADAPTER_NAME_LEN: usize = 128;

/// Adapter name and dedicated video memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterInfo {
    pub name: String,
    /// Dedicated video memory in megabytes
    pub memory_mb: u64,
}

/// Create the factory used for every enumeration call
pub fn get_factory(driver: &dyn GraphicsDriver) -> Result<Rc<dyn DisplayFactory>> {
    driver.create_factory().map_err(|code| {
        device_err!(SOURCE, Error::device_query("Creating the graphics infrastructure factory", code))
    })
}

/// Adapter 0 of the factory
pub fn get_primary_adapter(factory: &Rc<dyn DisplayFactory>) -> Result<Rc<dyn Adapter>> {
    factory.enum_adapter(0).map_err(|code| {
        device_err!(SOURCE, Error::device_query("Enumerating the primary adapter", code))
    })
}

/// Output 0 (monitor) of the adapter
pub fn get_primary_monitor(adapter: &Rc<dyn Adapter>) -> Result<Rc<dyn Output>> {
    adapter.enum_output(0).map_err(|code| {
        device_err!(SOURCE, Error::device_query("Enumerating the primary adapter output", code))
    })
}

/// Every display mode of `monitor` for `format`
///
/// Two-phase query: the mode count first, then a list sized to that count.
/// Both phases must succeed.
pub fn list_display_modes(monitor: &Rc<dyn Output>, format: Format) -> Result<Vec<DisplayMode>> {
    let count = monitor.display_mode_count(format).map_err(|code| {
        device_err!(SOURCE, Error::device_query("Counting the display modes of the monitor", code))
    })?;

    let modes = monitor.display_modes(format, count).map_err(|code| {
        device_err!(SOURCE, Error::device_query("Listing the display modes of the monitor", code))
    })?;

    for mode in &modes {
        device_debug!(
            SOURCE,
            "Display Mode: {}, {} @ {} / {}",
            mode.width,
            mode.height,
            mode.refresh_rate.numerator,
            mode.refresh_rate.denominator
        );
    }

    Ok(modes)
}

/// Read the adapter name and dedicated video memory
pub fn read_adapter_info(adapter: &Rc<dyn Adapter>) -> Result<AdapterInfo> {
    let desc = adapter.desc().map_err(|code| {
        device_err!(SOURCE, Error::adapter_info("Reading the adapter description", code))
    })?;

    let name = decode_adapter_name(&desc.description).ok_or_else(|| {
        device_err!(
            SOURCE,
            Error::adapter_info("Converting the adapter name", StatusCode::E_FAIL)
        )
    })?;

    Ok(AdapterInfo {
        name,
        memory_mb: desc.dedicated_video_memory / 1024 / 1024,
    })
}

/// Decode a NUL-terminated UTF-16 name, `None` if it is not valid UTF-16
fn decode_adapter_name(description: &[u16]) -> Option<String> {
    let len = description
        .iter()
        .position(|c| *c == 0)
        .unwrap_or(description.len())
        .min(MAX_ADAPTER_NAME_LEN);
    String::from_utf16(&description[..len]).ok()
}

#[cfg(test)]
#[path = "enumerator_tests.rs"]
mod tests;
