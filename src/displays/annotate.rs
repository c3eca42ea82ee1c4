use opencv::{
    core::{Mat, Point, Scalar, VecN},
    imgproc::{self, FONT_HERSHEY_COMPLEX_SMALL, FONT_HERSHEY_TRIPLEX, LINE_8},
};

use crate::vision::AcceptedObject;

const ORANGE: VecN<f64, 4> = VecN([0.0, 153.0, 255.0, 0.0]);
const LABEL_OFFSET: i32 = 20;

/// A located die and the pips found on it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CountedObject {
    pub object: AcceptedObject,
    pub pips: usize,
}

/// Draws boxes and labels for every die with pips, plus the running total,
/// onto a copy of `frame`.
pub fn annotate(frame: &Mat, objects: &[CountedObject], total: i64) -> opencv::Result<Mat> {
    let mut out = frame.clone();

    for object in objects.iter().filter(|o| o.pips > 0) {
        let bounds = object.object.bounds;
        imgproc::put_text(
            &mut out,
            &format!("val: {}", object.pips),
            Point::new(bounds.x, bounds.y + bounds.height + LABEL_OFFSET),
            FONT_HERSHEY_COMPLEX_SMALL,
            0.8,
            Scalar::all(255.0),
            1,
            LINE_8,
            false,
        )?;
        imgproc::rectangle(&mut out, bounds, ORANGE, 2, LINE_8, 0)?;
    }

    imgproc::put_text(
        &mut out,
        &format!("Total: {}", total),
        Point::new(0, 50),
        FONT_HERSHEY_TRIPLEX,
        1.8,
        ORANGE,
        3,
        LINE_8,
        false,
    )?;

    Ok(out)
}
