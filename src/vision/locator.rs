use opencv::{
    core::{Mat, Point2f, Rect, Size2f},
    prelude::*,
};

use crate::vision::{LocatorSettings, toolkit};

/// Rotated rectangle enclosing one contour.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CandidateRegion {
    pub center: Point2f,
    pub size: Size2f,
    pub angle: f32,
}

impl CandidateRegion {
    pub fn new(center: Point2f, size: Size2f, angle: f32) -> Self {
        Self {
            center,
            size,
            angle,
        }
    }

    pub fn area(&self) -> f64 {
        f64::from(self.size.width) * f64::from(self.size.height)
    }

    /// `|width / height - 1|`. Not symmetric: a 40x50 rectangle deviates by
    /// 0.2, a 50x40 one by 0.25.
    pub fn aspect_deviation(&self) -> f64 {
        (f64::from(self.size.width) / f64::from(self.size.height) - 1.0).abs()
    }

    pub fn is_degenerate(&self) -> bool {
        self.size.width <= 0.0 || self.size.height <= 0.0
    }

    pub fn distance_to(&self, other: &CandidateRegion) -> f64 {
        let dx = f64::from(self.center.x) - f64::from(other.center.x);
        let dy = f64::from(self.center.y) - f64::from(other.center.y);
        dx.hypot(dy)
    }

    fn is_die_shaped(&self, settings: &LocatorSettings) -> bool {
        if self.is_degenerate() {
            return false;
        }
        let area = self.area();
        self.aspect_deviation() < settings.max_aspect_deviation
            && area > settings.min_area
            && area < settings.max_area
    }
}

impl From<opencv::core::RotatedRect> for CandidateRegion {
    fn from(rect: opencv::core::RotatedRect) -> Self {
        Self::new(rect.center, rect.size, rect.angle)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AcceptedObject {
    pub region: CandidateRegion,
    /// Axis-aligned box of the contour, clipped to the frame.
    pub bounds: Rect,
}

/// Applies the shape and size filters followed by centre deduplication.
/// Returns the indices of the surviving candidates in their original order.
pub fn accept_candidates(candidates: &[CandidateRegion], settings: &LocatorSettings) -> Vec<usize> {
    let mut accepted: Vec<usize> = Vec::new();

    for (index, candidate) in candidates.iter().enumerate() {
        if !candidate.is_die_shaped(settings) {
            continue;
        }

        let duplicate = accepted
            .iter()
            .any(|&kept| candidate.distance_to(&candidates[kept]) < settings.min_separation);
        if duplicate {
            log::trace!(
                "Dropping duplicate candidate at ({:.1}, {:.1})",
                candidate.center.x,
                candidate.center.y
            );
            continue;
        }

        accepted.push(index);
    }

    accepted
}

/// Finds die faces in a preprocessed binary frame. Results follow contour
/// discovery order, so the same input always yields the same output.
pub fn locate(binary: &Mat, settings: &LocatorSettings) -> opencv::Result<Vec<AcceptedObject>> {
    let contours = toolkit::find_contours(binary)?;
    let frame_bounds = Rect::new(0, 0, binary.cols(), binary.rows());

    let mut candidates = Vec::with_capacity(contours.len());
    for contour in contours.iter() {
        candidates.push(CandidateRegion::from(toolkit::min_area_rect(&contour)?));
    }

    let mut objects = Vec::new();
    for index in accept_candidates(&candidates, settings) {
        let contour = contours.get(index)?;
        let bounds = toolkit::bounding_rect(&contour)? & frame_bounds;
        if bounds.width <= 0 || bounds.height <= 0 {
            continue;
        }
        objects.push(AcceptedObject {
            region: candidates[index],
            bounds,
        });
    }

    Ok(objects)
}

#[cfg(test)]
mod tests {
    use super::*;
    use opencv::{
        core::{CV_8UC1, Scalar},
        imgproc,
    };

    fn square_at(x: f32, y: f32, side: f32) -> CandidateRegion {
        CandidateRegion::new(Point2f::new(x, y), Size2f::new(side, side), 0.0)
    }

    fn sized(width: f32, height: f32) -> CandidateRegion {
        CandidateRegion::new(Point2f::new(100.0, 100.0), Size2f::new(width, height), 0.0)
    }

    fn blank_binary() -> Mat {
        Mat::new_rows_cols_with_default(240, 320, CV_8UC1, Scalar::all(0.0)).unwrap()
    }

    fn fill(binary: &mut Mat, rect: Rect) {
        imgproc::rectangle(
            binary,
            rect,
            Scalar::all(255.0),
            imgproc::FILLED,
            imgproc::LINE_8,
            0,
        )
        .unwrap();
    }

    #[test]
    fn square_has_no_aspect_deviation() {
        for side in [1.0, 10.0, 50.0, 500.0] {
            let region = sized(side, side);
            assert_eq!(region.aspect_deviation(), 0.0);
            assert!(region.aspect_deviation() < LocatorSettings::DEFAULT.max_aspect_deviation);
        }
    }

    #[test]
    fn area_window_is_exclusive() {
        let settings = LocatorSettings::DEFAULT;
        // 40 x 50 deviates by 0.2, 62.5 x 64 by ~0.023, both pass the shape test
        let candidates = [sized(40.0, 50.0), sized(62.5, 64.0), sized(50.0, 50.0)];
        assert_eq!(candidates[0].area(), 2000.0);
        assert_eq!(candidates[1].area(), 4000.0);

        assert_eq!(accept_candidates(&candidates, &settings), vec![2]);
    }

    #[test]
    fn elongated_rectangles_are_rejected() {
        let candidates = [sized(30.0, 80.0), sized(50.0, 40.0), sized(45.0, 50.0)];
        assert_eq!(
            accept_candidates(&candidates, &LocatorSettings::DEFAULT),
            vec![2]
        );
    }

    #[test]
    fn degenerate_rectangles_are_rejected() {
        let candidates = [sized(0.0, 50.0), sized(50.0, 0.0), sized(0.0, 0.0)];
        assert!(accept_candidates(&candidates, &LocatorSettings::DEFAULT).is_empty());
    }

    #[test]
    fn duplicates_closer_than_separation_are_dropped() {
        let settings = LocatorSettings::DEFAULT;

        let exactly_apart = [square_at(100.0, 100.0, 50.0), square_at(110.0, 100.0, 50.0)];
        assert_eq!(accept_candidates(&exactly_apart, &settings), vec![0, 1]);

        let just_inside = [square_at(100.0, 100.0, 50.0), square_at(109.999, 100.0, 50.0)];
        assert_eq!(accept_candidates(&just_inside, &settings), vec![0]);
    }

    #[test]
    fn first_seen_duplicate_wins() {
        let candidates = [
            square_at(100.0, 100.0, 48.0),
            square_at(103.0, 104.0, 56.0),
            square_at(200.0, 100.0, 50.0),
        ];
        assert_eq!(
            accept_candidates(&candidates, &LocatorSettings::DEFAULT),
            vec![0, 2]
        );
    }

    #[test]
    fn rejected_candidates_do_not_suppress_later_ones() {
        // The tiny square shares a centre with the die but never gets accepted
        let candidates = [square_at(100.0, 100.0, 5.0), square_at(100.0, 100.0, 50.0)];
        assert_eq!(
            accept_candidates(&candidates, &LocatorSettings::DEFAULT),
            vec![1]
        );
    }

    #[test]
    fn empty_frame_yields_nothing() {
        let objects = locate(&blank_binary(), &LocatorSettings::DEFAULT).unwrap();
        assert!(objects.is_empty());
    }

    #[test]
    fn locates_squares_inside_the_area_window() {
        let mut binary = blank_binary();
        fill(&mut binary, Rect::new(20, 20, 50, 50));
        fill(&mut binary, Rect::new(200, 120, 55, 55));
        // too small
        fill(&mut binary, Rect::new(120, 20, 20, 20));
        // too elongated
        fill(&mut binary, Rect::new(20, 150, 120, 30));

        let objects = locate(&binary, &LocatorSettings::DEFAULT).unwrap();

        assert_eq!(objects.len(), 2);
        let mut bounds: Vec<Rect> = objects.iter().map(|o| o.bounds).collect();
        bounds.sort_by_key(|r| r.x);
        assert_eq!(bounds[0], Rect::new(20, 20, 50, 50));
        assert_eq!(bounds[1], Rect::new(200, 120, 55, 55));
    }

    #[test]
    fn nested_outlines_count_once() {
        let mut binary = blank_binary();
        imgproc::rectangle(
            &mut binary,
            Rect::new(100, 80, 56, 56),
            Scalar::all(255.0),
            3,
            imgproc::LINE_8,
            0,
        )
        .unwrap();

        let objects = locate(&binary, &LocatorSettings::DEFAULT).unwrap();
        assert_eq!(objects.len(), 1);
    }

    #[test]
    fn locate_is_repeatable() {
        let mut binary = blank_binary();
        fill(&mut binary, Rect::new(20, 20, 50, 50));
        fill(&mut binary, Rect::new(200, 120, 55, 55));

        let first = locate(&binary, &LocatorSettings::DEFAULT).unwrap();
        let second = locate(&binary, &LocatorSettings::DEFAULT).unwrap();
        assert_eq!(first, second);
    }
}
