use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, LinePrimitive, PolylinePrimitive, TextPrimitive};

/// What a frame depicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameKind {
    Chart,
    Fallback,
}

/// Vector primitives of one axis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisPrimitives {
    pub lines: Vec<LinePrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl AxisPrimitives {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.texts.is_empty()
    }

    fn validate(&self) -> ChartResult<()> {
        for line in &self.lines {
            line.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }
        Ok(())
    }
}

/// Complete, backend-agnostic scene for one redraw.
///
/// Backends clear the whole surface with `clear_color`, stroke `series` on the
/// raster layer, then draw the axis overlay and free labels on top. A frame
/// is always whole; there is no incremental update.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub kind: FrameKind,
    pub clear_color: Color,
    pub series: Vec<PolylinePrimitive>,
    pub x_axis: AxisPrimitives,
    pub y_axis: AxisPrimitives,
    pub texts: Vec<TextPrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport, kind: FrameKind, clear_color: Color) -> Self {
        Self {
            viewport,
            kind,
            clear_color,
            series: Vec::new(),
            x_axis: AxisPrimitives::default(),
            y_axis: AxisPrimitives::default(),
            texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_series(mut self, polyline: PolylinePrimitive) -> Self {
        self.series.push(polyline);
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: TextPrimitive) -> Self {
        self.texts.push(text);
        self
    }

    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.kind == FrameKind::Fallback
    }

    /// Total line primitives across both axes.
    #[must_use]
    pub fn axis_line_count(&self) -> usize {
        self.x_axis.lines.len() + self.y_axis.lines.len()
    }

    /// Total text primitives across both axes and free labels.
    #[must_use]
    pub fn text_count(&self) -> usize {
        self.x_axis.texts.len() + self.y_axis.texts.len() + self.texts.len()
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        self.clear_color.validate()?;

        for polyline in &self.series {
            polyline.validate()?;
        }
        self.x_axis.validate()?;
        self.y_axis.validate()?;
        for text in &self.texts {
            text.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
            && self.x_axis.is_empty()
            && self.y_axis.is_empty()
            && self.texts.is_empty()
    }
}
