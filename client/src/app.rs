use std::cell::{Cell, RefCell};
use std::rc::Rc;

use js_sys::Reflect;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    CanvasRenderingContext2d, Element, Event, EventTarget, HtmlButtonElement, HtmlCanvasElement,
    HtmlElement, HtmlInputElement, PointerEvent, Window,
};

use pixelpad_shared::Tool;

use crate::dom::{
    event_to_point, find_element, get_element, read_size, set_canvas_cursor, set_tool_button,
    set_visible, update_size_label, DomIndicator,
};
use crate::net::fetch_labels;
use crate::render::redraw_or_log;
use crate::state::State;
use crate::submit::submit;

fn debug_enabled(window: &Window) -> bool {
    let search = window.location().search().ok().unwrap_or_default();
    search.contains("debug=1") || search.contains("debug=true")
}

fn document_ready_state(document: &web_sys::Document) -> Option<String> {
    Reflect::get(document.as_ref(), &JsValue::from_str("readyState"))
        .ok()?
        .as_string()
}

fn listen<E>(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(E) + 'static,
) -> Result<(), JsValue>
where
    E: FromWasmAbi + 'static,
{
    let closure = Closure::<dyn FnMut(E)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Tool buttons and the size control that belongs to each tool.
struct ToolControls {
    pencil_button: HtmlButtonElement,
    eraser_button: HtmlButtonElement,
    draw_size_group: Option<HtmlElement>,
    erase_size_group: Option<HtmlElement>,
}

impl ToolControls {
    fn sync(&self, state: &State) {
        let tool = state.tools.tool();
        set_tool_button(&self.pencil_button, tool == Tool::Draw);
        set_tool_button(&self.eraser_button, tool == Tool::Erase);
        set_canvas_cursor(&state.canvas, tool);
        if let Some(group) = &self.draw_size_group {
            set_visible(group, tool == Tool::Draw);
        }
        if let Some(group) = &self.erase_size_group {
            set_visible(group, tool == Tool::Erase);
        }
    }
}

#[wasm_bindgen(start)]
pub fn run() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("Missing window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("Missing document"))?;
    let started = Rc::new(Cell::new(false));

    if document_ready_state(&document).as_deref() == Some("complete") {
        started.set(true);
        return start_app();
    }

    let onload_started = started.clone();
    listen(window.as_ref(), "load", move |_: Event| {
        if onload_started.replace(true) {
            return;
        }
        if let Err(err) = start_app() {
            web_sys::console::error_1(&err);
        }
    })
}

fn start_app() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("Missing window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("Missing document"))?;

    let level = if debug_enabled(&window) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    if console_log::init_with_level(level).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }

    let canvas: HtmlCanvasElement = get_element(&document, "board")?;
    let ctx = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("Missing canvas context"))?
        .dyn_into::<CanvasRenderingContext2d>()?;
    let _ = canvas.style().set_property("touch-action", "none");

    let pencil_button: HtmlButtonElement = get_element(&document, "pencil")?;
    let eraser_button: HtmlButtonElement = get_element(&document, "eraser")?;
    let draw_size: HtmlInputElement = get_element(&document, "drawSize")?;
    let draw_size_label: Element = get_element(&document, "drawSizeLabel")?;
    let erase_size: HtmlInputElement = get_element(&document, "eraseSize")?;
    let erase_size_label: Element = get_element(&document, "eraseSizeLabel")?;
    let clear_button: HtmlButtonElement = get_element(&document, "clear")?;
    let send_button: HtmlButtonElement = get_element(&document, "send")?;
    let labels_el: Element = get_element(&document, "labels")?;
    let auto_send: Option<HtmlInputElement> = find_element(&document, "autoSend");

    let controls = Rc::new(ToolControls {
        pencil_button: pencil_button.clone(),
        eraser_button: eraser_button.clone(),
        draw_size_group: find_element(&document, "drawSizeGroup"),
        erase_size_group: find_element(&document, "eraseSizeGroup"),
    });

    let state = Rc::new(RefCell::new(State::new(canvas.clone(), ctx)));
    {
        let mut state = state.borrow_mut();
        state.meta = document.get_element_by_id("meta");
        for (tool, input, label) in [
            (Tool::Draw, &draw_size, &draw_size_label),
            (Tool::Erase, &erase_size, &erase_size_label),
        ] {
            let size = read_size(input);
            state.tools.set_brush_size(tool, size);
            update_size_label(label, size);
        }
        controls.sync(&state);
        redraw_or_log(&state);
        log::info!(
            "Sketchpad ready {}x{}",
            state.surface.width(),
            state.surface.height()
        );
    }

    {
        let window = window.clone();
        let state = state.clone();
        let document = document.clone();
        spawn_local(async move {
            let labels = match fetch_labels(&window).await {
                Ok(labels) => labels,
                Err(error) => {
                    log::error!("Failed to load labels: {error}");
                    return;
                }
            };
            let mut state = state.borrow_mut();
            match state
                .indicators
                .materialize(&labels, |label| DomIndicator::create(&document, &labels_el, label))
            {
                Ok(created) => log::info!("Registered {created} label indicators"),
                Err(error) => log::error!("Failed to create label indicator: {error:?}"),
            }
        });
    }

    {
        let state = state.clone();
        let canvas_cb = canvas.clone();
        listen(canvas.as_ref(), "pointerdown", move |event: PointerEvent| {
            if !event.is_primary() || event.button() != 0 {
                return;
            }
            event.prevent_default();
            let Some(point) = event_to_point(&canvas_cb, &event) else {
                return;
            };
            let mut state = state.borrow_mut();
            let State {
                surface,
                tools,
                session,
                ..
            } = &mut *state;
            if session.pointer_down(surface, tools, point) {
                state.active_pointer = Some(event.pointer_id());
                redraw_or_log(&state);
            }
        })?;
    }

    {
        let state = state.clone();
        let canvas_cb = canvas.clone();
        listen(canvas.as_ref(), "pointermove", move |event: PointerEvent| {
            let mut state = state.borrow_mut();
            if state.active_pointer != Some(event.pointer_id()) {
                return;
            }
            event.prevent_default();
            let Some(point) = event_to_point(&canvas_cb, &event) else {
                return;
            };
            let State {
                surface,
                tools,
                session,
                ..
            } = &mut *state;
            if session.pointer_move(surface, tools, point) {
                redraw_or_log(&state);
            }
        })?;
    }

    for event_name in ["pointerup", "pointerleave", "pointercancel"] {
        let state = state.clone();
        let window = window.clone();
        let auto_send = auto_send.clone();
        listen(canvas.as_ref(), event_name, move |event: PointerEvent| {
            let ended = {
                let mut state = state.borrow_mut();
                if state.active_pointer != Some(event.pointer_id()) {
                    return;
                }
                state.active_pointer = None;
                match event_name {
                    "pointerup" => state.session.pointer_up(),
                    "pointerleave" => state.session.pointer_leave(),
                    _ => state.session.pointer_cancel(),
                }
            };
            event.prevent_default();
            let auto_send = auto_send.as_ref().is_some_and(|input| input.checked());
            if ended && auto_send {
                submit(&window, &state);
            }
        })?;
    }

    for (tool, button) in [(Tool::Draw, &pencil_button), (Tool::Erase, &eraser_button)] {
        let state = state.clone();
        let controls = controls.clone();
        listen(button.as_ref(), "click", move |_: Event| {
            let mut state = state.borrow_mut();
            state.tools.set_tool(tool);
            controls.sync(&state);
            log::debug!("Tool set to {tool:?}");
        })?;
    }

    for (tool, input, label) in [
        (Tool::Draw, draw_size.clone(), draw_size_label.clone()),
        (Tool::Erase, erase_size.clone(), erase_size_label.clone()),
    ] {
        let state = state.clone();
        let input_cb = input.clone();
        listen(input.as_ref(), "input", move |_: Event| {
            let size = read_size(&input_cb);
            state.borrow_mut().tools.set_brush_size(tool, size);
            update_size_label(&label, size);
        })?;
    }

    {
        let state = state.clone();
        listen(clear_button.as_ref(), "click", move |_: Event| {
            let mut state = state.borrow_mut();
            state.clear();
            redraw_or_log(&state);
        })?;
    }

    {
        let state = state.clone();
        let window = window.clone();
        listen(send_button.as_ref(), "click", move |_: Event| {
            submit(&window, &state);
        })?;
    }

    Ok(())
}
