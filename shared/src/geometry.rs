use serde::{Deserialize, Serialize};

/// A pixel coordinate on the surface.
///
/// Coordinates may fall outside the surface; stamps placed there are clipped.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// On-screen bounding box of the canvas, in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClientRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Maps viewport coordinates onto surface pixels, undoing any CSS scaling of
/// the canvas element.
pub fn map_client_point(
    client_x: f64,
    client_y: f64,
    rect: ClientRect,
    surface_width: u32,
    surface_height: u32,
) -> Option<Point> {
    if !(rect.width > 0.0 && rect.height > 0.0) {
        return None;
    }
    if !client_x.is_finite() || !client_y.is_finite() {
        return None;
    }
    let scale_x = f64::from(surface_width) / rect.width;
    let scale_y = f64::from(surface_height) / rect.height;
    let x = ((client_x - rect.left) * scale_x).floor();
    let y = ((client_y - rect.top) * scale_y).floor();
    Some(Point::new(x as i32, y as i32))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(left: f64, top: f64, width: f64, height: f64) -> ClientRect {
        ClientRect {
            left,
            top,
            width,
            height,
        }
    }

    #[test]
    fn downscaled_canvas_maps_to_intrinsic_pixels() {
        let point = map_client_point(70.0, 70.0, rect(0.0, 0.0, 140.0, 140.0), 280, 280);
        assert_eq!(point, Some(Point::new(140, 140)));
    }

    #[test]
    fn offset_is_subtracted_before_scaling() {
        let point = map_client_point(110.0, 60.0, rect(40.0, 20.0, 140.0, 140.0), 280, 280);
        assert_eq!(point, Some(Point::new(140, 80)));
    }

    #[test]
    fn fractional_positions_are_floored() {
        let point = map_client_point(10.9, 3.2, rect(0.0, 0.0, 280.0, 280.0), 280, 280);
        assert_eq!(point, Some(Point::new(10, 3)));

        let point = map_client_point(-0.5, 0.0, rect(0.0, 0.0, 280.0, 280.0), 280, 280);
        assert_eq!(point, Some(Point::new(-1, 0)));
    }

    #[test]
    fn anisotropic_scaling_uses_each_axis() {
        let point = map_client_point(50.0, 50.0, rect(0.0, 0.0, 100.0, 200.0), 280, 280);
        assert_eq!(point, Some(Point::new(140, 70)));
    }

    #[test]
    fn collapsed_rect_yields_nothing() {
        assert_eq!(
            map_client_point(1.0, 1.0, rect(0.0, 0.0, 0.0, 140.0), 280, 280),
            None
        );
        assert_eq!(
            map_client_point(f64::NAN, 1.0, rect(0.0, 0.0, 140.0, 140.0), 280, 280),
            None
        );
    }
}
