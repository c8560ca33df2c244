use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::LinearScale;
use crate::error::{ChartError, ChartResult};

pub const DEFAULT_MIN_ZOOM_SCALE: f64 = 1.0;
pub const DEFAULT_MAX_ZOOM_SCALE: f64 = 20.0;
pub const DEFAULT_WHEEL_SENSITIVITY: f64 = 0.002;

/// Horizontal scale/translate transform applied on top of the base x scale.
///
/// A pixel `x` of the base mapping is shown at `x * scale + translate_x`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomTransform {
    pub scale: f64,
    pub translate_x: f64,
}

impl ZoomTransform {
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        translate_x: 0.0,
    };

    #[must_use]
    pub fn apply_x(self, x: f64) -> f64 {
        x * self.scale + self.translate_x
    }

    #[must_use]
    pub fn invert_x(self, x: f64) -> f64 {
        (x - self.translate_x) / self.scale
    }

    /// Returns a copy of `base` whose domain is what the transformed view
    /// shows across the unchanged pixel range.
    pub fn rescale_x(self, base: LinearScale) -> ChartResult<LinearScale> {
        let (r0, r1) = base.range();
        let domain = (
            base.invert(self.invert_x(r0)),
            base.invert(self.invert_x(r1)),
        );
        base.with_domain(domain)
    }

    #[must_use]
    pub fn is_identity(self) -> bool {
        self == Self::IDENTITY
    }
}

impl Default for ZoomTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Unit of a wheel delta, mirroring DOM `WheelEvent.deltaMode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WheelDeltaMode {
    #[default]
    Pixel,
    Line,
    Page,
}

/// One gesture update delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ZoomGesture {
    /// Wheel notch; negative `delta_y` zooms in around `anchor_x`.
    Wheel {
        delta_y: f64,
        delta_mode: WheelDeltaMode,
        anchor_x: f64,
    },
    /// Pointer drag by `delta_x` pixels since the previous update.
    Drag { delta_x: f64 },
    ScaleBy { factor: f64, anchor_x: f64 },
    ScaleTo { scale: f64, anchor_x: f64 },
    Reset,
}

/// Zoom limits and wheel tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomBehavior {
    pub min_scale: f64,
    pub max_scale: f64,
    /// Exponent per pixel of wheel delta; line and page deltas scale it up.
    pub wheel_sensitivity: f64,
}

impl Default for ZoomBehavior {
    fn default() -> Self {
        Self {
            min_scale: DEFAULT_MIN_ZOOM_SCALE,
            max_scale: DEFAULT_MAX_ZOOM_SCALE,
            wheel_sensitivity: DEFAULT_WHEEL_SENSITIVITY,
        }
    }
}

impl ZoomBehavior {
    pub fn validate(self) -> ChartResult<Self> {
        if !self.min_scale.is_finite() || self.min_scale < 1.0 {
            return Err(ChartError::InvalidData(
                "zoom min scale must be finite and >= 1".to_owned(),
            ));
        }
        if !self.max_scale.is_finite() || self.max_scale < self.min_scale {
            return Err(ChartError::InvalidData(
                "zoom max scale must be finite and >= min scale".to_owned(),
            ));
        }
        if !self.wheel_sensitivity.is_finite() || self.wheel_sensitivity <= 0.0 {
            return Err(ChartError::InvalidData(
                "wheel sensitivity must be finite and > 0".to_owned(),
            ));
        }
        Ok(self)
    }

    fn wheel_exponent(self, delta_y: f64, mode: WheelDeltaMode) -> f64 {
        let per_unit = match mode {
            WheelDeltaMode::Pixel => self.wheel_sensitivity,
            WheelDeltaMode::Line => self.wheel_sensitivity * 25.0,
            WheelDeltaMode::Page => self.wheel_sensitivity * 500.0,
        };
        -delta_y * per_unit
    }
}

/// Horizontal zoom/pan state machine.
///
/// Every accepted gesture is composed into the current transform and then
/// constrained: the scale stays within the configured bounds and the
/// visible window never leaves the pixel extent of the plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomController {
    transform: ZoomTransform,
    behavior: ZoomBehavior,
    extent: (f64, f64),
}

impl ZoomController {
    pub fn new(behavior: ZoomBehavior, extent: (f64, f64)) -> ChartResult<Self> {
        let behavior = behavior.validate()?;
        validate_extent(extent)?;
        Ok(Self {
            transform: ZoomTransform::IDENTITY,
            behavior,
            extent,
        })
    }

    #[must_use]
    pub fn transform(&self) -> ZoomTransform {
        self.transform
    }

    #[must_use]
    pub fn behavior(&self) -> ZoomBehavior {
        self.behavior
    }

    /// Horizontal pixel extent the visible window is confined to.
    #[must_use]
    pub fn extent(&self) -> (f64, f64) {
        self.extent
    }

    /// Visible window expressed in base pixel coordinates.
    #[must_use]
    pub fn visible_window(&self) -> (f64, f64) {
        (
            self.transform.invert_x(self.extent.0),
            self.transform.invert_x(self.extent.1),
        )
    }

    /// Replaces the pixel extent (after a resize) and re-constrains the
    /// current transform. Returns whether the transform changed.
    pub fn set_extent(&mut self, extent: (f64, f64)) -> ChartResult<bool> {
        validate_extent(extent)?;
        self.extent = extent;
        Ok(self.commit(self.transform))
    }

    pub fn reset(&mut self) -> bool {
        self.commit(ZoomTransform::IDENTITY)
    }

    /// Composes one gesture into the current transform.
    ///
    /// Out-of-bounds results are clamped silently. Non-finite input is
    /// rejected and leaves the state untouched. Returns whether the
    /// transform changed.
    pub fn apply(&mut self, gesture: ZoomGesture) -> ChartResult<bool> {
        let current = self.transform;
        let proposed = match gesture {
            ZoomGesture::Wheel {
                delta_y,
                delta_mode,
                anchor_x,
            } => {
                ensure_finite(delta_y, "wheel delta")?;
                ensure_finite(anchor_x, "zoom anchor")?;
                let exponent = self.behavior.wheel_exponent(delta_y, delta_mode);
                self.scaled_about(current.scale * 2f64.powf(exponent), anchor_x)
            }
            ZoomGesture::Drag { delta_x } => {
                ensure_finite(delta_x, "drag delta")?;
                ZoomTransform {
                    translate_x: current.translate_x + delta_x,
                    ..current
                }
            }
            ZoomGesture::ScaleBy { factor, anchor_x } => {
                ensure_finite(anchor_x, "zoom anchor")?;
                if !factor.is_finite() || factor <= 0.0 {
                    return Err(ChartError::InvalidData(
                        "zoom factor must be finite and > 0".to_owned(),
                    ));
                }
                self.scaled_about(current.scale * factor, anchor_x)
            }
            ZoomGesture::ScaleTo { scale, anchor_x } => {
                ensure_finite(anchor_x, "zoom anchor")?;
                if !scale.is_finite() || scale <= 0.0 {
                    return Err(ChartError::InvalidData(
                        "zoom scale must be finite and > 0".to_owned(),
                    ));
                }
                self.scaled_about(scale, anchor_x)
            }
            ZoomGesture::Reset => ZoomTransform::IDENTITY,
        };

        let changed = self.commit(proposed);
        trace!(
            ?gesture,
            scale = self.transform.scale,
            translate_x = self.transform.translate_x,
            changed,
            "zoom gesture"
        );
        Ok(changed)
    }

    /// Rescales the base x mapping with the current transform.
    pub fn rescale_x(&self, base: LinearScale) -> ChartResult<LinearScale> {
        self.transform.rescale_x(base)
    }

    fn scaled_about(&self, target_scale: f64, anchor_x: f64) -> ZoomTransform {
        let scale = target_scale.clamp(self.behavior.min_scale, self.behavior.max_scale);
        if scale == self.transform.scale {
            return self.transform;
        }
        let anchor_base = self.transform.invert_x(anchor_x);
        ZoomTransform {
            scale,
            translate_x: anchor_x - anchor_base * scale,
        }
    }

    fn commit(&mut self, proposed: ZoomTransform) -> bool {
        let constrained = self.constrain(proposed);
        let changed = constrained != self.transform;
        self.transform = constrained;
        changed
    }

    fn constrain(&self, proposed: ZoomTransform) -> ZoomTransform {
        let scale = proposed
            .scale
            .clamp(self.behavior.min_scale, self.behavior.max_scale);
        let transform = ZoomTransform { scale, ..proposed };

        let (x0, x1) = self.extent;
        let overflow_left = transform.invert_x(x0) - x0;
        let overflow_right = transform.invert_x(x1) - x1;
        let shift = if overflow_right > overflow_left {
            (overflow_left + overflow_right) / 2.0
        } else if overflow_left < 0.0 {
            overflow_left
        } else if overflow_right > 0.0 {
            overflow_right
        } else {
            0.0
        };

        ZoomTransform {
            scale,
            translate_x: transform.translate_x + shift * scale,
        }
    }
}

fn ensure_finite(value: f64, what: &str) -> ChartResult<()> {
    if !value.is_finite() {
        return Err(ChartError::InvalidData(format!("{what} must be finite")));
    }
    Ok(())
}

fn validate_extent(extent: (f64, f64)) -> ChartResult<()> {
    if !extent.0.is_finite() || !extent.1.is_finite() || extent.1 <= extent.0 {
        return Err(ChartError::InvalidData(
            "zoom extent must be finite with end > start".to_owned(),
        ));
    }
    Ok(())
}
