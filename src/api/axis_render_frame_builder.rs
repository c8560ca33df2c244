use crate::core::{LinearScale, PlotArea};
use crate::render::{AxisPrimitives, LinePrimitive, TextHAlign, TextPrimitive};

use super::AxisStyle;
use super::axis_label_format::format_tick_label;

/// Builds the bottom axis at the plot's bottom edge.
///
/// Layout: a domain line across the scale range closed by outer ticks, one
/// downward tick per tick value, and a label centered under each tick.
#[must_use]
pub fn build_x_axis(scale: LinearScale, plot_area: PlotArea, style: AxisStyle) -> AxisPrimitives {
    let axis_y = plot_area.bottom;
    let (r0, r1) = scale.range();
    let tick_end = axis_y + style.tick_size_px;
    let label_top = tick_end + style.tick_padding_px;
    let mut axis = AxisPrimitives::default();

    axis.lines.extend([
        axis_line(style, r0, tick_end, r0, axis_y),
        axis_line(style, r0, axis_y, r1, axis_y),
        axis_line(style, r1, axis_y, r1, tick_end),
    ]);

    let step = scale.tick_step(style.x_tick_count);
    for value in scale.ticks(style.x_tick_count) {
        let x = scale.map(value);
        axis.lines.push(axis_line(style, x, axis_y, x, tick_end));
        axis.texts.push(TextPrimitive::new(
            format_tick_label(value, step),
            x,
            label_top,
            style.font_size_px,
            style.color,
            TextHAlign::Center,
        ));
    }
    axis
}

/// Builds the left axis at the plot's left edge, with leftward ticks and
/// right-aligned labels vertically centered on each tick.
#[must_use]
pub fn build_y_axis(scale: LinearScale, plot_area: PlotArea, style: AxisStyle) -> AxisPrimitives {
    let axis_x = plot_area.left;
    let (r0, r1) = scale.range();
    let tick_end = axis_x - style.tick_size_px;
    let label_right = tick_end - style.tick_padding_px;
    let mut axis = AxisPrimitives::default();

    axis.lines.extend([
        axis_line(style, tick_end, r0, axis_x, r0),
        axis_line(style, axis_x, r0, axis_x, r1),
        axis_line(style, axis_x, r1, tick_end, r1),
    ]);

    let step = scale.tick_step(style.y_tick_count);
    for value in scale.ticks(style.y_tick_count) {
        let y = scale.map(value);
        axis.lines.push(axis_line(style, axis_x, y, tick_end, y));
        axis.texts.push(TextPrimitive::new(
            format_tick_label(value, step),
            label_right,
            y - style.font_size_px / 2.0,
            style.font_size_px,
            style.color,
            TextHAlign::Right,
        ));
    }
    axis
}

fn axis_line(style: AxisStyle, x1: f64, y1: f64, x2: f64, y2: f64) -> LinePrimitive {
    LinePrimitive::new(x1, y1, x2, y2, style.line_width, style.color)
}

#[cfg(test)]
mod tests {
    use super::{build_x_axis, build_y_axis};
    use crate::api::AxisStyle;
    use crate::core::{LinearScale, Margins, PlotArea, Viewport};
    use crate::render::TextHAlign;

    fn plot_area() -> PlotArea {
        PlotArea::resolve(Viewport::new(400, 300), Margins::default()).expect("plot area")
    }

    #[test]
    fn x_axis_ticks_point_down_from_plot_bottom() {
        let area = plot_area();
        let scale = LinearScale::new((0.0, 10.0), area.x_range()).expect("scale");
        let axis = build_x_axis(scale, area, AxisStyle::default());

        assert_eq!(axis.texts.len(), 11);
        assert_eq!(axis.lines.len(), 3 + 11);
        let first_tick = axis.lines[3];
        assert_eq!((first_tick.x1, first_tick.y1), (70.0, 250.0));
        assert_eq!((first_tick.x2, first_tick.y2), (70.0, 256.0));
        assert_eq!(axis.texts[0].text, "0");
        assert_eq!(axis.texts[0].y, 259.0);
        assert_eq!(axis.texts[0].h_align, TextHAlign::Center);
    }

    #[test]
    fn y_axis_labels_are_right_aligned_left_of_ticks() {
        let area = plot_area();
        let scale = LinearScale::new((0.0, 1.0), area.y_range()).expect("scale");
        let axis = build_y_axis(scale, area, AxisStyle::default());

        let last = axis.texts.last().expect("label");
        assert_eq!(last.text, "1.0");
        assert_eq!(last.x, 61.0);
        assert_eq!(last.h_align, TextHAlign::Right);
        assert!(axis.lines.iter().all(|line| line.x1 <= 70.0 && line.x2 <= 70.0));
    }
}
