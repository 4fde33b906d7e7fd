use wasm_bindgen::{Clamped, JsValue};
use web_sys::ImageData;

use crate::state::State;

/// Copies the whole surface onto the canvas.
pub fn redraw(state: &State) -> Result<(), JsValue> {
    let rgba = state.surface.to_rgba();
    let image = ImageData::new_with_u8_clamped_array_and_sh(
        Clamped(&rgba),
        state.surface.width(),
        state.surface.height(),
    )?;
    state.ctx.put_image_data(&image, 0.0, 0.0)
}

pub fn redraw_or_log(state: &State) {
    if let Err(error) = redraw(state) {
        log::error!("Canvas redraw failed: {error:?}");
    }
}
