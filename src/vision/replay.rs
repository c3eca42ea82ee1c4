use std::collections::VecDeque;

use opencv::core::Mat;

use crate::vision::FrameSource;

/// Plays back a fixed list of frames, then reports end of stream.
pub struct ReplaySource {
    frames: VecDeque<Mat>,
}

impl ReplaySource {
    pub fn new(frames: Vec<Mat>) -> Self {
        ReplaySource {
            frames: frames.into(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl FrameSource for ReplaySource {
    fn next_frame(&mut self) -> Option<Mat> {
        self.frames.pop_front()
    }
}
