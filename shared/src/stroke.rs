use crate::geometry::Point;
use crate::raster::{draw_line, stamp};
use crate::surface::Surface;
use crate::tool::ToolState;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum StrokeState {
    #[default]
    Idle,
    Active { last: Point },
}

/// Turns pointer down/move/up events into stamps and line segments.
///
/// Each handler returns `true` when it changed the surface.
#[derive(Clone, Debug, Default)]
pub struct StrokeSession {
    state: StrokeState,
}

impl StrokeSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> StrokeState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, StrokeState::Active { .. })
    }

    /// Starts a stroke and marks `point`, so a tap without movement leaves a dot.
    pub fn pointer_down(&mut self, surface: &mut Surface, tools: &ToolState, point: Point) -> bool {
        stamp(surface, point, tools);
        self.state = StrokeState::Active { last: point };
        true
    }

    pub fn pointer_move(&mut self, surface: &mut Surface, tools: &ToolState, point: Point) -> bool {
        let StrokeState::Active { last } = self.state else {
            return false;
        };
        draw_line(surface, last, point, tools);
        self.state = StrokeState::Active { last: point };
        true
    }

    /// Ends the stroke. Returns whether a stroke was in progress.
    pub fn pointer_up(&mut self) -> bool {
        let was_active = self.is_active();
        self.state = StrokeState::Idle;
        was_active
    }

    pub fn pointer_leave(&mut self) -> bool {
        self.pointer_up()
    }

    pub fn pointer_cancel(&mut self) -> bool {
        self.pointer_up()
    }
}
