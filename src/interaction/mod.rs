mod gesture;
mod zoom;

pub use gesture::{GestureBinding, GestureHub};
pub use zoom::{
    DEFAULT_MAX_ZOOM_SCALE, DEFAULT_MIN_ZOOM_SCALE, DEFAULT_WHEEL_SENSITIVITY, WheelDeltaMode,
    ZoomBehavior, ZoomController, ZoomGesture, ZoomTransform,
};
