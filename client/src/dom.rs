use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlButtonElement, HtmlCanvasElement, HtmlElement, HtmlInputElement,
    PointerEvent,
};

use pixelpad_shared::{map_client_point, ClientRect, Point, Tool};

use crate::indicators::IndicatorView;

pub fn get_element<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    let element = document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("Missing element: {id}")))?;
    element
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("Invalid element type: {id}")))
}

pub fn find_element<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document.get_element_by_id(id)?.dyn_into::<T>().ok()
}

pub fn set_tool_button(button: &HtmlButtonElement, active: bool) {
    let pressed = if active { "true" } else { "false" };
    let _ = button.set_attribute("aria-pressed", pressed);
    let _ = button.class_list().toggle_with_force("active", active);
}

pub fn set_canvas_cursor(canvas: &HtmlCanvasElement, tool: Tool) {
    let _ = canvas.style().set_property("cursor", tool.cursor());
}

pub fn set_visible(element: &HtmlElement, visible: bool) {
    element.set_hidden(!visible);
}

/// Reads a range input as a brush size, falling back to 1 for empty input.
pub fn read_size(input: &HtmlInputElement) -> u32 {
    let value = input.value_as_number();
    if value.is_finite() && value >= 1.0 {
        value as u32
    } else {
        1
    }
}

pub fn update_size_label(label: &Element, size: u32) {
    label.set_text_content(Some(&format!("{size} px")));
}

pub fn client_rect(canvas: &HtmlCanvasElement) -> ClientRect {
    let rect = canvas.get_bounding_client_rect();
    ClientRect {
        left: rect.left(),
        top: rect.top(),
        width: rect.width(),
        height: rect.height(),
    }
}

pub fn event_to_point(canvas: &HtmlCanvasElement, event: &PointerEvent) -> Option<Point> {
    map_client_point(
        f64::from(event.client_x()),
        f64::from(event.client_y()),
        client_rect(canvas),
        canvas.width(),
        canvas.height(),
    )
}

/// One label chip: a swatch element holding the label name and its value.
pub struct DomIndicator {
    root: HtmlElement,
    value: HtmlElement,
}

impl DomIndicator {
    pub fn create(document: &Document, container: &Element, label: &str) -> Result<Self, JsValue> {
        let root = document.create_element("div")?.dyn_into::<HtmlElement>()?;
        root.set_class_name("indicator");
        root.set_attribute("data-label", label)?;

        let name = document.create_element("span")?;
        name.set_class_name("indicator-name");
        name.set_text_content(Some(label));

        let value = document.create_element("span")?.dyn_into::<HtmlElement>()?;
        value.set_class_name("indicator-value");

        root.append_child(&name)?;
        root.append_child(&value)?;
        container.append_child(&root)?;
        Ok(Self { root, value })
    }
}

impl IndicatorView for DomIndicator {
    fn set_color(&self, color: &str) {
        let _ = self.root.style().set_property("background-color", color);
    }

    fn set_text(&self, text: &str) {
        self.value.set_text_content(Some(text));
    }
}
