use opencv::core::Mat;

mod capture;
pub mod locator;
pub mod pips;
mod replay;
pub mod toolkit;

pub use capture::CameraSource;
pub use locator::{AcceptedObject, CandidateRegion, locate};
pub use pips::count_pips;
pub use replay::ReplaySource;

/// Frame-level preparation turning a capture into the binary image the
/// locator searches.
#[derive(PartialEq, Clone, Debug)]
pub struct PreprocessSettings {
    pub brightness: f64,
    pub blur_kernel: i32,
}

impl PreprocessSettings {
    pub const DEFAULT: Self = PreprocessSettings {
        brightness: 150.0,
        blur_kernel: 5,
    };
}

impl Default for PreprocessSettings {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// The area window accepts faces roughly 45 to 63 px across, which ties
/// detection to a fixed camera distance.
#[derive(PartialEq, Clone, Debug)]
pub struct LocatorSettings {
    pub max_aspect_deviation: f64,
    pub min_area: f64,
    pub max_area: f64,
    pub min_separation: f64,
}

impl LocatorSettings {
    pub const DEFAULT: Self = LocatorSettings {
        max_aspect_deviation: 0.25,
        min_area: 2000.0,
        max_area: 4000.0,
        min_separation: 10.0,
    };
}

impl Default for LocatorSettings {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(PartialEq, Clone, Debug)]
pub struct PipSettings {
    pub canonical_size: i32,
    pub brightness: f64,
    pub blur_kernel: i32,
    pub min_inertia_ratio: f32,
}

impl PipSettings {
    pub const DEFAULT: Self = PipSettings {
        canonical_size: 150,
        brightness: 150.0,
        blur_kernel: 4,
        min_inertia_ratio: 0.5,
    };
}

impl Default for PipSettings {
    fn default() -> Self {
        Self::DEFAULT
    }
}

pub trait FrameSource {
    /// Next captured frame, or `None` once the stream has ended.
    fn next_frame(&mut self) -> Option<Mat>;
}

/// Brighten, grey, blur, then Otsu. The returned image is what the locator
/// searches and what the diagnostic window shows.
pub fn preprocess(frame: &Mat, settings: &PreprocessSettings) -> opencv::Result<Mat> {
    let bright = toolkit::brighten(frame, settings.brightness)?;
    let grey = toolkit::grayscale(&bright)?;
    let blurred = toolkit::blur(&grey, settings.blur_kernel)?;
    toolkit::binarize(&blurred)
}
