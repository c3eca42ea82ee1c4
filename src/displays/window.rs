use opencv::{
    core::{Mat, ToInputArray},
    highgui::{self, WINDOW_AUTOSIZE},
};

use crate::displays::RenderSink;

struct WinInfo {
    name: &'static str,
    x: i32,
    y: i32,
}

/// HighGUI windows for the annotated capture and the preprocessed frame.
pub struct WindowDisplay {
    key_wait_msec: i32,
}

impl WindowDisplay {
    const CAPTURE_WIN: WinInfo = WinInfo {
        name: "Video Capture",
        x: 32,
        y: 32,
    };
    const DIAGNOSTIC_WIN: WinInfo = WinInfo {
        name: "Image",
        x: 700,
        y: 32,
    };
    const KEY_WAIT_MSEC: i32 = 10;

    pub fn new() -> opencv::Result<Self> {
        log::info!("Opening windows");
        Self::create_window(Self::CAPTURE_WIN)?;
        Self::create_window(Self::DIAGNOSTIC_WIN)?;
        Ok(Self {
            key_wait_msec: Self::KEY_WAIT_MSEC,
        })
    }

    fn create_window(win: WinInfo) -> opencv::Result<()> {
        highgui::named_window(win.name, WINDOW_AUTOSIZE)?;
        highgui::move_window(win.name, win.x, win.y)
    }

    fn show_window(win: WinInfo, mat: &impl ToInputArray) -> opencv::Result<()> {
        highgui::imshow(win.name, mat)
    }
}

impl RenderSink for WindowDisplay {
    fn render(&mut self, annotated: &Mat, diagnostic: &Mat) -> opencv::Result<()> {
        Self::show_window(Self::CAPTURE_WIN, annotated)?;
        Self::show_window(Self::DIAGNOSTIC_WIN, diagnostic)
    }

    fn poll_key(&mut self) -> opencv::Result<Option<char>> {
        let key = highgui::wait_key(self.key_wait_msec)?;
        if key < 0 {
            return Ok(None);
        }
        Ok(char::from_u32((key & 0xff) as u32))
    }
}

impl Drop for WindowDisplay {
    fn drop(&mut self) {
        if let Err(e) = highgui::destroy_all_windows() {
            log::warn!("Failed to close windows: {}", e);
        }
    }
}
