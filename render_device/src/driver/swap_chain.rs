/// SwapChain trait - for window presentation

use std::rc::Rc;

use crate::driver::{Device, DriverResult, SwapChainDesc, Texture2D};

/// Swap chain owning the presentable back buffers of a window
///
/// Must be taken out of exclusive full-screen mode before it is released.
pub trait SwapChain {
    /// Device the swap chain was created with; kept alive by the swap chain
    fn device(&self) -> Rc<dyn Device>;

    /// Descriptor the swap chain was created with
    fn desc(&self) -> DriverResult<SwapChainDesc>;

    /// Back buffer at `index`
    ///
    /// Returns a new reference; drop it as soon as a view has been created.
    fn get_buffer(&self, index: u32) -> DriverResult<Rc<dyn Texture2D>>;

    /// Present the back buffer
    ///
    /// # Arguments
    ///
    /// * `sync_interval` - 0 presents immediately, 1 blocks until the next vertical blank
    fn present(&self, sync_interval: u32) -> DriverResult<()>;

    /// Enter (`true`) or leave (`false`) exclusive full-screen mode
    fn set_fullscreen_state(&self, fullscreen: bool) -> DriverResult<()>;

    fn fullscreen_state(&self) -> DriverResult<bool>;
}
