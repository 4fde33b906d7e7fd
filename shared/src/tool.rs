use serde::{Deserialize, Serialize};

use crate::surface::Rgb;

pub const DEFAULT_DRAW_SIZE: u32 = 8;
pub const DEFAULT_ERASE_SIZE: u32 = 20;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tool {
    Draw,
    Erase,
}

impl Tool {
    pub fn cursor(self) -> &'static str {
        match self {
            Tool::Draw => "crosshair",
            Tool::Erase => "cell",
        }
    }
}

/// Active tool plus the brush size bound to each tool.
///
/// Owned by one sketchpad and passed to the stamp renderer explicitly.
#[derive(Clone, Debug, PartialEq)]
pub struct ToolState {
    active: Tool,
    draw_size: u32,
    erase_size: u32,
    pub ink: Rgb,
    pub background: Rgb,
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            active: Tool::Draw,
            draw_size: DEFAULT_DRAW_SIZE,
            erase_size: DEFAULT_ERASE_SIZE,
            ink: Rgb::BLACK,
            background: Rgb::WHITE,
        }
    }
}

impl ToolState {
    pub fn tool(&self) -> Tool {
        self.active
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.active = tool;
    }

    pub fn brush_size(&self, tool: Tool) -> u32 {
        match tool {
            Tool::Draw => self.draw_size,
            Tool::Erase => self.erase_size,
        }
    }

    pub fn set_brush_size(&mut self, tool: Tool, size: u32) {
        match tool {
            Tool::Draw => self.draw_size = size,
            Tool::Erase => self.erase_size = size,
        }
    }

    pub fn stamp_color(&self) -> Rgb {
        match self.active {
            Tool::Draw => self.ink,
            Tool::Erase => self.background,
        }
    }

    pub fn stamp_size(&self) -> u32 {
        self.brush_size(self.active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_drawing_with_ink() {
        let tools = ToolState::default();
        assert_eq!(tools.tool(), Tool::Draw);
        assert_eq!(tools.stamp_color(), Rgb::BLACK);
        assert_eq!(tools.stamp_size(), DEFAULT_DRAW_SIZE);
    }

    #[test]
    fn erase_uses_background_and_its_own_size() {
        let mut tools = ToolState::default();
        tools.set_tool(Tool::Erase);
        assert_eq!(tools.stamp_color(), Rgb::WHITE);
        assert_eq!(tools.stamp_size(), DEFAULT_ERASE_SIZE);
    }

    #[test]
    fn sizes_are_independent_per_tool() {
        let mut tools = ToolState::default();
        tools.set_brush_size(Tool::Draw, 3);
        tools.set_brush_size(Tool::Erase, 30);
        assert_eq!(tools.stamp_size(), 3);
        tools.set_tool(Tool::Erase);
        assert_eq!(tools.stamp_size(), 30);
        tools.set_tool(Tool::Draw);
        assert_eq!(tools.brush_size(Tool::Draw), 3);
    }

    #[test]
    fn cursor_follows_tool() {
        assert_eq!(Tool::Draw.cursor(), "crosshair");
        assert_eq!(Tool::Erase.cursor(), "cell");
    }
}
