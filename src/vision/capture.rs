use opencv::{
    prelude::*,
    videoio::{CAP_ANY, VideoCapture},
};

use crate::{app::PipCountError, vision::FrameSource};

pub struct CameraSource {
    cam: VideoCapture,
    device: i32,
}

impl CameraSource {
    pub fn open(device: i32) -> Result<Self, PipCountError> {
        log::info!("Starting video capture on device {}", device);
        let cam = VideoCapture::new(device, CAP_ANY)?;
        if !cam.is_opened()? {
            return Err(PipCountError::CaptureUnavailable(device));
        }
        log::info!("Video capture opened");

        Ok(Self { cam, device })
    }
}

impl FrameSource for CameraSource {
    fn next_frame(&mut self) -> Option<Mat> {
        let mut frame = Mat::default();
        match self.cam.read(&mut frame) {
            Ok(true) if !frame.empty() => Some(frame),
            Ok(_) => None,
            Err(e) => {
                log::error!("Failed to read frame from device {}: {}", self.device, e);
                None
            }
        }
    }
}
