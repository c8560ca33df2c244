mod frame;
mod null_renderer;
mod palette;
mod primitives;

pub use frame::{AxisPrimitives, FrameKind, RenderFrame};
pub use null_renderer::NullRenderer;
pub use palette::Palette;
pub use primitives::{
    ClipRect, Color, LinePrimitive, PolylinePrimitive, TextHAlign, TextPrimitive,
};

use crate::core::Viewport;
use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` and
/// must replace whatever they showed before with it, so a redraw is one
/// clear-then-draw operation from the caller's perspective.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;

    /// Called before the first frame and on every viewport change, so backends
    /// that own a target surface can match its size.
    fn resize(&mut self, _viewport: Viewport) -> ChartResult<()> {
        Ok(())
    }
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};
