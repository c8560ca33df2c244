use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Immutable, ordered color table assigned cyclically to series by index.
///
/// Clones share the same table, so a palette injected into a chart view is
/// never mutated behind its back.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Arc<[Color]>,
}

impl Palette {
    pub fn new(colors: Vec<Color>) -> ChartResult<Self> {
        if colors.is_empty() {
            return Err(ChartError::InvalidData(
                "palette must contain at least one color".to_owned(),
            ));
        }
        for color in &colors {
            color.validate()?;
        }
        Ok(Self {
            colors: colors.into(),
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    #[must_use]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Color for series `index`: `palette[index % len]`.
    #[must_use]
    pub fn color_for(&self, index: usize) -> Color {
        self.colors[index % self.colors.len()]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: Arc::from([
                Color::from_rgb8(0x1f, 0x77, 0xb4),
                Color::from_rgb8(0xff, 0x7f, 0x0e),
                Color::from_rgb8(0x2c, 0xa0, 0x2c),
            ]),
        }
    }
}

impl Serialize for Palette {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.colors().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Palette {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let colors = Vec::<Color>::deserialize(deserializer)?;
        Self::new(colors).map_err(serde::de::Error::custom)
    }
}
