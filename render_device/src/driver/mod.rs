/// Driver module - the boundary between the device layer and the native graphics driver

// Module declarations
pub mod status;
pub mod types;
pub mod driver;
pub mod device;
pub mod swap_chain;
pub mod resource;

// Re-export everything from driver.rs
pub use driver::*;

// Re-export from other modules
pub use status::*;
pub use types::*;
pub use device::*;
pub use swap_chain::*;
pub use resource::*;

// Headless implementation of every driver trait
pub mod mock_driver;
