use opencv::{
    core::{self, KeyPoint, Mat, Point, Rect, Scalar, Size, Vec4i, Vector},
    features2d::{SimpleBlobDetector, SimpleBlobDetector_Params},
    imgproc::{self, CHAIN_APPROX_SIMPLE, COLOR_BGR2GRAY, COLOR_BGRA2GRAY, RETR_TREE, THRESH_OTSU},
    prelude::*,
};

// Each wrapper returns a fresh buffer and leaves its input untouched.

pub type Contours = Vector<Vector<Point>>;

const BINARY_MAX: f64 = 255.0;

pub fn resize(src: &Mat, width: i32, height: i32) -> opencv::Result<Mat> {
    let mut dst = Mat::default();
    imgproc::resize(
        src,
        &mut dst,
        Size::new(width, height),
        0.0,
        0.0,
        imgproc::INTER_LINEAR,
    )?;
    Ok(dst)
}

/// Adds `delta` to every channel, saturating at the type limits.
pub fn brighten(src: &Mat, delta: f64) -> opencv::Result<Mat> {
    let mut dst = Mat::default();
    src.convert_to(&mut dst, -1, 1.0, delta)?;
    Ok(dst)
}

/// BGR or BGRA to single channel. Images that already have one channel are
/// copied.
pub fn grayscale(src: &Mat) -> opencv::Result<Mat> {
    let code = match src.channels() {
        1 => return Ok(src.clone()),
        4 => COLOR_BGRA2GRAY,
        _ => COLOR_BGR2GRAY,
    };
    let mut dst = Mat::default();
    imgproc::cvt_color_def(src, &mut dst, code)?;
    Ok(dst)
}

/// Normalised box filter with a square kernel.
pub fn blur(src: &Mat, kernel: i32) -> opencv::Result<Mat> {
    let mut dst = Mat::default();
    imgproc::blur(
        src,
        &mut dst,
        Size::new(kernel, kernel),
        Point::new(-1, -1),
        core::BORDER_DEFAULT,
    )?;
    Ok(dst)
}

/// Otsu binarization of an 8 bit single channel image.
pub fn binarize(src: &Mat) -> opencv::Result<Mat> {
    let mut dst = Mat::default();
    imgproc::threshold(src, &mut dst, 0.0, BINARY_MAX, THRESH_OTSU)?;
    Ok(dst)
}

pub fn flood_fill(src: &Mat, seed: Point, value: f64) -> opencv::Result<Mat> {
    let mut dst = src.clone();
    let mut bounds = Rect::default();
    imgproc::flood_fill(
        &mut dst,
        seed,
        Scalar::all(value),
        &mut bounds,
        Scalar::default(),
        Scalar::default(),
        4,
    )?;
    Ok(dst)
}

/// Tree hierarchy, simple chain approximation. The hierarchy itself is not
/// consumed downstream so only the point lists are returned.
pub fn find_contours(binary: &Mat) -> opencv::Result<Contours> {
    let mut contours = Contours::new();
    let mut hierarchy = Vector::<Vec4i>::new();
    imgproc::find_contours_with_hierarchy(
        binary,
        &mut contours,
        &mut hierarchy,
        RETR_TREE,
        CHAIN_APPROX_SIMPLE,
        Point::new(0, 0),
    )?;
    Ok(contours)
}

pub fn min_area_rect(points: &Vector<Point>) -> opencv::Result<core::RotatedRect> {
    imgproc::min_area_rect(points)
}

pub fn bounding_rect(points: &Vector<Point>) -> opencv::Result<Rect> {
    imgproc::bounding_rect(points)
}

/// Dark blob detection with OpenCV defaults except for the inertia filter.
pub fn detect_blobs(src: &Mat, min_inertia_ratio: f32) -> opencv::Result<Vector<KeyPoint>> {
    let mut params = SimpleBlobDetector_Params::default()?;
    params.filter_by_inertia = true;
    params.min_inertia_ratio = min_inertia_ratio;

    let mut detector = SimpleBlobDetector::create(params)?;
    let mut keypoints = Vector::<KeyPoint>::new();
    detector.detect(src, &mut keypoints, &core::no_array())?;
    Ok(keypoints)
}
