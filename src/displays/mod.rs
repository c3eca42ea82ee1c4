use opencv::core::Mat;

mod annotate;
mod nop_display;
mod window;

pub use annotate::{CountedObject, annotate};
pub use nop_display::NopDisplay;
pub use window::WindowDisplay;

pub const KEY_ESCAPE: char = '\u{1b}';

pub trait RenderSink {
    /// Shows the annotated capture alongside the binary image the locator
    /// searched.
    fn render(&mut self, annotated: &Mat, diagnostic: &Mat) -> opencv::Result<()>;

    /// Waits briefly for a key press.
    fn poll_key(&mut self) -> opencv::Result<Option<char>>;
}

pub fn is_quit_key(key: char) -> bool {
    key == 'q' || key == KEY_ESCAPE
}
