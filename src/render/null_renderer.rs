use crate::error::ChartResult;
use crate::render::{FrameKind, RenderFrame, Renderer};

/// No-op renderer used by tests and headless usage.
///
/// It still validates frame content and records what the last frame asked
/// for, so tests can observe redraw behavior without a real surface.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_kind: Option<FrameKind>,
    pub last_series_count: usize,
    pub last_segment_count: usize,
    pub last_axis_line_count: usize,
    pub last_text_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_kind = Some(frame.kind);
        self.last_series_count = frame.series.len();
        self.last_segment_count = frame
            .series
            .iter()
            .map(|polyline| polyline.segment_count())
            .sum();
        self.last_axis_line_count = frame.axis_line_count();
        self.last_text_count = frame.text_count();
        Ok(())
    }
}
