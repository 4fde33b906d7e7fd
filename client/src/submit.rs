use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use web_sys::Window;

use pixelpad_shared::{encode_png_data_url, PredictRequest, PredictResponse};

use crate::indicators::{IndicatorRegistry, IndicatorView};
use crate::net::request_prediction;
use crate::state::State;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

/// Numbers submissions so that only the most recently started one is shown.
///
/// Overlapping submissions are not blocked; a response is dropped when a
/// newer submission was started before it arrived.
#[derive(Debug, Default)]
pub struct SubmissionTracker {
    issued: u64,
}

impl SubmissionTracker {
    pub fn begin(&mut self) -> Ticket {
        self.issued += 1;
        Ticket(self.issued)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.issued
    }
}

/// Sends the current surface for classification and shows the result.
pub fn submit(window: &Window, state: &Rc<RefCell<State>>) {
    let (ticket, request) = {
        let mut state = state.borrow_mut();
        let image_data_url = match encode_png_data_url(&state.surface) {
            Ok(url) => url,
            Err(error) => {
                log::error!("Failed to encode surface: {error}");
                return;
            }
        };
        (state.submissions.begin(), PredictRequest { image_data_url })
    };
    log::debug!(
        "Submitting {:?} bytes={}",
        ticket,
        request.image_data_url.len()
    );

    let window = window.clone();
    let state = state.clone();
    spawn_local(async move {
        let result = match request_prediction(&window, &request).await {
            Ok(result) => result,
            Err(error) => {
                log::warn!("Prediction failed: {error}");
                return;
            }
        };
        let state = state.borrow();
        if state.indicators.is_empty() {
            log::warn!("Prediction arrived before any label indicator exists");
        }
        if !apply_if_current(&state.submissions, ticket, &state.indicators, &result) {
            log::debug!("Dropping superseded prediction {ticket:?}");
            return;
        }
        log::info!("Predicted {}", result.predicted);
        if let Some(meta) = &state.meta {
            show_raw_response(meta, &result);
        }
    });
}

/// Shows `result` on `indicators` when `ticket` is still the newest
/// submission. Returns whether it was shown.
pub fn apply_if_current<V: IndicatorView>(
    tracker: &SubmissionTracker,
    ticket: Ticket,
    indicators: &IndicatorRegistry<V>,
    result: &PredictResponse,
) -> bool {
    if !tracker.is_current(ticket) {
        return false;
    }
    indicators.reconcile(result);
    true
}

fn show_raw_response(meta: &web_sys::Element, result: &PredictResponse) {
    match serde_json::to_string_pretty(result) {
        Ok(text) => meta.set_text_content(Some(&text)),
        Err(error) => log::warn!("Failed to format response: {error}"),
    }
}
