use web_sys::{CanvasRenderingContext2d, Element, HtmlCanvasElement};

use pixelpad_shared::{StrokeSession, Surface, ToolState};

use crate::dom::DomIndicator;
use crate::indicators::IndicatorRegistry;
use crate::submit::SubmissionTracker;

pub struct State {
    pub canvas: HtmlCanvasElement,
    pub ctx: CanvasRenderingContext2d,
    pub surface: Surface,
    pub tools: ToolState,
    pub session: StrokeSession,
    pub active_pointer: Option<i32>,
    pub indicators: IndicatorRegistry<DomIndicator>,
    pub submissions: SubmissionTracker,
    pub meta: Option<Element>,
}

impl State {
    pub fn new(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d) -> Self {
        let tools = ToolState::default();
        let surface = Surface::new(canvas.width(), canvas.height(), tools.background);
        Self {
            canvas,
            ctx,
            surface,
            tools,
            session: StrokeSession::new(),
            active_pointer: None,
            indicators: IndicatorRegistry::new(),
            submissions: SubmissionTracker::default(),
            meta: None,
        }
    }

    pub fn clear(&mut self) {
        self.surface.clear(self.tools.background);
    }
}
