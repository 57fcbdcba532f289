//! Pointer containment checks for click-away dismissal

use dropkit_core::{Point, Rect};

/// Whether `point` falls outside every one of `regions`.
///
/// An empty region list means everything is outside.
pub fn is_outside(point: Point, regions: &[Rect]) -> bool {
    !regions.iter().any(|r| r.contains(point))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inside_any_region() {
        let trigger = Rect::new(0.0, 0.0, 100.0, 40.0);
        let list = Rect::new(0.0, 44.0, 100.0, 200.0);
        assert!(!is_outside(Point::new(50.0, 20.0), &[trigger, list]));
        assert!(!is_outside(Point::new(50.0, 100.0), &[trigger, list]));
    }

    #[test]
    fn test_gap_between_regions_is_outside() {
        let trigger = Rect::new(0.0, 0.0, 100.0, 40.0);
        let list = Rect::new(0.0, 44.0, 100.0, 200.0);
        assert!(is_outside(Point::new(50.0, 42.0), &[trigger, list]));
        assert!(is_outside(Point::new(300.0, 20.0), &[trigger, list]));
    }

    #[test]
    fn test_no_regions() {
        assert!(is_outside(Point::new(0.0, 0.0), &[]));
    }
}
