/// Bootstrap module - the ordered initialization pipeline
///
/// Each stage is a small function returning `Result`. The stages are composed
/// by `RenderDevice::initialize`; any failure short-circuits the remaining
/// stages and dropping what was already built releases it.

pub mod enumerator;
pub mod refresh_rate;
pub mod swap_chain_factory;
pub mod render_target;
pub mod depth_stencil;
pub mod rasterizer;
pub mod projection;

pub use enumerator::*;
pub use refresh_rate::*;
pub use swap_chain_factory::*;
pub use render_target::*;
pub use depth_stencil::*;
pub use rasterizer::*;
pub use projection::*;
