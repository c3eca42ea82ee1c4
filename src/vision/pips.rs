use opencv::{
    core::{Mat, Point},
    prelude::*,
};

use crate::vision::{PipSettings, toolkit};

const FILL_WHITE: f64 = 255.0;

/// Counts the round markings on a single die face.
///
/// The face is normalised to a square of `canonical_size`, brightened,
/// greyed, blurred and binarized. Flooding from the four corners then turns
/// the background and the die outline white so only enclosed pips remain as
/// dark blobs.
pub fn count_pips(face: &Mat, settings: &PipSettings) -> opencv::Result<usize> {
    let side = settings.canonical_size;
    let resized = toolkit::resize(face, side, side)?;
    let bright = toolkit::brighten(&resized, settings.brightness)?;
    let grey = toolkit::grayscale(&bright)?;
    let blurred = toolkit::blur(&grey, settings.blur_kernel)?;
    let mut binary = toolkit::binarize(&blurred)?;

    let last = side - 1;
    for corner in [
        Point::new(0, 0),
        Point::new(0, last),
        Point::new(last, 0),
        Point::new(last, last),
    ] {
        binary = toolkit::flood_fill(&binary, corner, FILL_WHITE)?;
    }

    let keypoints = toolkit::detect_blobs(&binary, settings.min_inertia_ratio)?;
    Ok(keypoints.len())
}

/// Crops `bounds` out of `frame` and counts the pips inside it.
pub fn count_pips_in(
    frame: &Mat,
    bounds: opencv::core::Rect,
    settings: &PipSettings,
) -> opencv::Result<usize> {
    let face = frame.roi(bounds)?.clone_pointee();
    count_pips(&face, settings)
}
