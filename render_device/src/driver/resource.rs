/// Resource, view and state traits
///
/// Backends downcast through `as_any()` to reach their native objects.

use std::any::Any;
use std::rc::Rc;

use crate::driver::{DepthStencilDesc, DepthStencilViewDesc, RasterizerDesc, Texture2DDesc};

pub trait Texture2D {
    fn desc(&self) -> Texture2DDesc;

    fn as_any(&self) -> &dyn Any;
}

pub trait RenderTargetView {
    /// Texture kept alive by this view
    fn resource(&self) -> Rc<dyn Texture2D>;

    fn as_any(&self) -> &dyn Any;
}

pub trait DepthStencilView {
    /// Texture kept alive by this view
    fn resource(&self) -> Rc<dyn Texture2D>;

    fn desc(&self) -> DepthStencilViewDesc;

    fn as_any(&self) -> &dyn Any;
}

/// Immutable depth-stencil configuration object
pub trait DepthStencilState {
    fn desc(&self) -> DepthStencilDesc;

    fn as_any(&self) -> &dyn Any;
}

/// Immutable rasterizer configuration object
pub trait RasterizerState {
    fn desc(&self) -> RasterizerDesc;

    fn as_any(&self) -> &dyn Any;
}
