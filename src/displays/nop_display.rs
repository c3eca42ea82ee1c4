use opencv::core::Mat;

use crate::displays::RenderSink;

/// Renders nothing and never reports a key, so the loop only ends with the
/// stream.
#[derive(Debug, Default)]
pub struct NopDisplay {
    frames: u64,
}

impl NopDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl RenderSink for NopDisplay {
    fn render(&mut self, _annotated: &Mat, _diagnostic: &Mat) -> opencv::Result<()> {
        self.frames += 1;
        Ok(())
    }

    fn poll_key(&mut self) -> opencv::Result<Option<char>> {
        Ok(None)
    }
}
