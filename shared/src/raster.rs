use crate::geometry::Point;
use crate::surface::Surface;
use crate::tool::ToolState;

/// Paints one square stamp of the active tool centered on `point`.
pub fn stamp(surface: &mut Surface, point: Point, tools: &ToolState) {
    let size = tools.stamp_size();
    let half = (size / 2) as i32;
    surface.fill_rect(
        point.x.saturating_sub(half),
        point.y.saturating_sub(half),
        size,
        size,
        tools.stamp_color(),
    );
}

/// Stamps every point of the 8-connected line from `start` to `end`,
/// both endpoints included.
pub fn draw_line(surface: &mut Surface, start: Point, end: Point, tools: &ToolState) {
    for point in LinePoints::new(start, end) {
        stamp(surface, point, tools);
    }
}

/// Points of the 8-connected line from `start` to `end`, in that order.
///
/// Yields `start` first and `end` last. Consecutive points never differ by
/// more than one on either axis. The walk always runs from the smaller
/// endpoint so that `A -> B` and `B -> A` cover the same pixels; the error
/// term breaks ties differently depending on direction.
#[derive(Clone, Debug)]
pub struct LinePoints {
    inner: std::vec::IntoIter<Point>,
}

impl LinePoints {
    pub fn new(start: Point, end: Point) -> Self {
        let reversed = (end.x, end.y) < (start.x, start.y);
        let (from, to) = if reversed { (end, start) } else { (start, end) };
        let mut points: Vec<Point> = BresenhamWalk::new(from, to).collect();
        if reversed {
            points.reverse();
        }
        Self {
            inner: points.into_iter(),
        }
    }
}

impl Iterator for LinePoints {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for LinePoints {}

impl std::iter::FusedIterator for LinePoints {}

/// Integer error-accumulation walk; stops exactly on the end point.
struct BresenhamWalk {
    x: i64,
    y: i64,
    end_x: i64,
    end_y: i64,
    dx: i64,
    dy: i64,
    step_x: i64,
    step_y: i64,
    err: i64,
    done: bool,
}

impl BresenhamWalk {
    fn new(start: Point, end: Point) -> Self {
        let (x0, y0) = (i64::from(start.x), i64::from(start.y));
        let (x1, y1) = (i64::from(end.x), i64::from(end.y));
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        Self {
            x: x0,
            y: y0,
            end_x: x1,
            end_y: y1,
            dx,
            dy,
            step_x: if x0 < x1 { 1 } else { -1 },
            step_y: if y0 < y1 { 1 } else { -1 },
            err: dx + dy,
            done: false,
        }
    }
}

impl Iterator for BresenhamWalk {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.done {
            return None;
        }
        let current = Point::new(self.x as i32, self.y as i32);
        if self.x == self.end_x && self.y == self.end_y {
            self.done = true;
            return Some(current);
        }
        let e2 = 2 * self.err;
        if e2 >= self.dy {
            self.err += self.dy;
            self.x += self.step_x;
        }
        if e2 <= self.dx {
            self.err += self.dx;
            self.y += self.step_y;
        }
        Some(current)
    }
}
