use smithay::utils::{Point, Rectangle, Size};

/// Whether the rectangle covers no area.
///
/// Failed lookups produce a default (zero) rectangle, so this is checked before dividing by a
/// rectangle's size.
pub fn is_empty<Kind>(rect: Rectangle<f64, Kind>) -> bool {
    rect.size.w <= 0. || rect.size.h <= 0.
}

/// Returns the point inside `rect` closest to `point`.
pub fn closest_point<Kind>(
    rect: Rectangle<f64, Kind>,
    point: Point<f64, Kind>,
) -> Point<f64, Kind> {
    // Stay one unit away from the far edges, which are not part of the rectangle.
    let max_x = rect.loc.x + (rect.size.w - 1.).max(0.);
    let max_y = rect.loc.y + (rect.size.h - 1.).max(0.);
    Point::from((
        point.x.clamp(rect.loc.x, max_x),
        point.y.clamp(rect.loc.y, max_y),
    ))
}

/// Scales the rectangle about `center`.
pub fn scale_about<Kind>(
    rect: Rectangle<f64, Kind>,
    center: Point<f64, Kind>,
    factor: f64,
) -> Rectangle<f64, Kind> {
    let loc = (rect.loc - center).upscale(factor) + center;
    Rectangle::new(loc, rect.size.upscale(factor))
}

/// Grows the rectangle by `amount` on every side.
pub fn expand<Kind>(rect: Rectangle<f64, Kind>, amount: f64) -> Rectangle<f64, Kind> {
    Rectangle::new(
        rect.loc - Point::from((amount, amount)),
        rect.size + Size::from((amount * 2., amount * 2.)),
    )
}

/// Non-empty intersection of two rectangles, if any.
pub fn intersects<Kind>(a: Rectangle<f64, Kind>, b: Rectangle<f64, Kind>) -> bool {
    a.intersection(b).is_some_and(|r| !is_empty(r))
}

#[cfg(test)]
mod tests {
    use smithay::utils::Logical;

    use super::*;

    #[test]
    fn closest_point_clamps_inside() {
        let rect: Rectangle<f64, Logical> = Rectangle::new((10., 10.).into(), (100., 50.).into());
        assert_eq!(
            closest_point(rect, Point::from((0., 30.))),
            Point::from((10., 30.))
        );
        assert_eq!(
            closest_point(rect, Point::from((500., 500.))),
            Point::from((109., 59.))
        );
        assert!(rect.contains(closest_point(rect, Point::from((500., -3.)))));
    }

    #[test]
    fn scale_about_keeps_center() {
        let rect: Rectangle<f64, Logical> = Rectangle::new((0., 0.).into(), (100., 100.).into());
        let scaled = scale_about(rect, Point::from((50., 50.)), 0.5);
        assert_eq!(scaled, Rectangle::new((25., 25.).into(), (50., 50.).into()));
    }

    #[test]
    fn empty_rectangles() {
        assert!(is_empty(Rectangle::<f64, Logical>::default()));
        assert!(!is_empty(Rectangle::<f64, Logical>::new(
            (0., 0.).into(),
            (1., 1.).into()
        )));
        assert_eq!(
            expand(Rectangle::<f64, Logical>::default(), 2.),
            Rectangle::new((-2., -2.).into(), (4., 4.).into())
        );
    }
}
