use serde::{Deserialize, Serialize};

use crate::core::{Margins, PlotArea, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::interaction::ZoomBehavior;
use crate::render::{Color, Palette};

pub const DEFAULT_LINE_WIDTH: f64 = 1.5;
pub const DEFAULT_TICK_COUNT: usize = 10;
pub const DEFAULT_TICK_SIZE_PX: f64 = 6.0;
pub const DEFAULT_TICK_PADDING_PX: f64 = 3.0;
pub const DEFAULT_AXIS_FONT_SIZE_PX: f64 = 10.0;
pub const DEFAULT_FALLBACK_MESSAGE: &str = "No data available";

/// Tick and label styling shared by both axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisStyle {
    #[serde(default = "default_tick_count")]
    pub x_tick_count: usize,
    #[serde(default = "default_tick_count")]
    pub y_tick_count: usize,
    #[serde(default = "default_tick_size_px")]
    pub tick_size_px: f64,
    #[serde(default = "default_tick_padding_px")]
    pub tick_padding_px: f64,
    #[serde(default = "default_axis_font_size_px")]
    pub font_size_px: f64,
    #[serde(default = "default_axis_color")]
    pub color: Color,
    #[serde(default = "default_axis_line_width")]
    pub line_width: f64,
}

impl Default for AxisStyle {
    fn default() -> Self {
        Self {
            x_tick_count: default_tick_count(),
            y_tick_count: default_tick_count(),
            tick_size_px: default_tick_size_px(),
            tick_padding_px: default_tick_padding_px(),
            font_size_px: default_axis_font_size_px(),
            color: default_axis_color(),
            line_width: default_axis_line_width(),
        }
    }
}

impl AxisStyle {
    pub fn validate(self) -> ChartResult<()> {
        if self.x_tick_count == 0 || self.y_tick_count == 0 {
            return Err(ChartError::InvalidData(
                "axis tick count must be > 0".to_owned(),
            ));
        }
        for (name, value) in [
            ("tick size", self.tick_size_px),
            ("tick padding", self.tick_padding_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "axis {name} must be finite and >= 0"
                )));
            }
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "axis font size must be finite and > 0".to_owned(),
            ));
        }
        if !self.line_width.is_finite() || self.line_width <= 0.0 {
            return Err(ChartError::InvalidData(
                "axis line width must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Render surface configuration of a [`crate::api::ChartView`].
///
/// Serializable so hosts can persist chart setup; every field falls back to
/// its default when absent from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartViewConfig {
    #[serde(default)]
    pub viewport: Viewport,
    #[serde(default)]
    pub margins: Margins,
    #[serde(default)]
    pub palette: Palette,
    #[serde(default = "default_line_width")]
    pub line_width: f64,
    #[serde(default)]
    pub zoom: ZoomBehavior,
    #[serde(default)]
    pub axis: AxisStyle,
    #[serde(default = "default_clear_color")]
    pub clear_color: Color,
    #[serde(default = "default_fallback_message")]
    pub fallback_message: String,
}

impl Default for ChartViewConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            margins: Margins::default(),
            palette: Palette::default(),
            line_width: default_line_width(),
            zoom: ZoomBehavior::default(),
            axis: AxisStyle::default(),
            clear_color: default_clear_color(),
            fallback_message: default_fallback_message(),
        }
    }
}

impl ChartViewConfig {
    /// Creates the default config sized to `viewport`.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self::default().with_viewport(viewport)
    }

    #[must_use]
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    #[must_use]
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    #[must_use]
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    #[must_use]
    pub fn with_line_width(mut self, line_width: f64) -> Self {
        self.line_width = line_width;
        self
    }

    #[must_use]
    pub fn with_zoom_behavior(mut self, zoom: ZoomBehavior) -> Self {
        self.zoom = zoom;
        self
    }

    #[must_use]
    pub fn with_axis_style(mut self, axis: AxisStyle) -> Self {
        self.axis = axis;
        self
    }

    #[must_use]
    pub fn with_clear_color(mut self, clear_color: Color) -> Self {
        self.clear_color = clear_color;
        self
    }

    #[must_use]
    pub fn with_fallback_message(mut self, message: impl Into<String>) -> Self {
        self.fallback_message = message.into();
        self
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse chart view config: {e}")))
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize chart view config: {e}"))
        })
    }

    /// Checks the whole config, including that the margins leave a plot area.
    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        self.margins.validate()?;
        PlotArea::resolve(self.viewport, self.margins)?;
        if !self.line_width.is_finite() || self.line_width <= 0.0 {
            return Err(ChartError::InvalidData(
                "line width must be finite and > 0".to_owned(),
            ));
        }
        if self.palette.is_empty() {
            return Err(ChartError::InvalidData(
                "palette must contain at least one color".to_owned(),
            ));
        }
        self.zoom.validate()?;
        self.axis.validate()?;
        self.clear_color.validate()?;
        if self.fallback_message.is_empty() {
            return Err(ChartError::InvalidData(
                "fallback message must not be empty".to_owned(),
            ));
        }
        Ok(())
    }
}

fn default_tick_count() -> usize {
    DEFAULT_TICK_COUNT
}

fn default_tick_size_px() -> f64 {
    DEFAULT_TICK_SIZE_PX
}

fn default_tick_padding_px() -> f64 {
    DEFAULT_TICK_PADDING_PX
}

fn default_axis_font_size_px() -> f64 {
    DEFAULT_AXIS_FONT_SIZE_PX
}

fn default_axis_color() -> Color {
    Color::rgb(0.0, 0.0, 0.0)
}

fn default_axis_line_width() -> f64 {
    1.0
}

fn default_line_width() -> f64 {
    DEFAULT_LINE_WIDTH
}

fn default_clear_color() -> Color {
    Color::rgb(1.0, 1.0, 1.0)
}

fn default_fallback_message() -> String {
    DEFAULT_FALLBACK_MESSAGE.to_owned()
}
