use crate::error::ExplorerResult;
use crate::render::{RenderFrame, Renderer};

/// No-op renderer for tests and headless sessions.
///
/// Frames are still validated so invalid geometry fails the same way it would
/// on a real backend.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_line_count: usize,
    pub last_marker_count: usize,
    pub last_text_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ExplorerResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_line_count = frame.lines.len();
        self.last_marker_count = frame.markers.len();
        self.last_text_count = frame.texts.len();
        Ok(())
    }
}
