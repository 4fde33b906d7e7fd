use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response, Window};

use pixelpad_shared::{ErrorBody, PredictRequest, PredictResponse};

pub const LABELS_PATH: &str = "/labels";
pub const PREDICT_PATH: &str = "/predict";

#[derive(Error, Debug, PartialEq)]
pub enum NetError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("decode error: {0}")]
    Decode(String),
}

fn transport(value: JsValue) -> NetError {
    NetError::Transport(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}

/// Fetches the label names the backend can predict, in display order.
pub async fn fetch_labels(window: &Window) -> Result<Vec<String>, NetError> {
    let request = Request::new_with_str(LABELS_PATH).map_err(transport)?;
    let text = fetch_text(window, &request).await?;
    parse_labels(&text)
}

pub async fn request_prediction(
    window: &Window,
    payload: &PredictRequest,
) -> Result<PredictResponse, NetError> {
    let body = serde_json::to_string(payload).map_err(|error| NetError::Decode(error.to_string()))?;
    let init = RequestInit::new();
    init.set_method("POST");
    init.set_body(&JsValue::from_str(&body));
    let request = Request::new_with_str_and_init(PREDICT_PATH, &init).map_err(transport)?;
    request
        .headers()
        .set("Content-Type", "application/json")
        .map_err(transport)?;
    let text = fetch_text(window, &request).await?;
    parse_prediction(&text)
}

async fn fetch_text(window: &Window, request: &Request) -> Result<String, NetError> {
    let response = JsFuture::from(window.fetch_with_request(request))
        .await
        .map_err(transport)?;
    let response: Response = response
        .dyn_into()
        .map_err(|_| NetError::Transport("fetch did not resolve to a Response".into()))?;
    let text = JsFuture::from(response.text().map_err(transport)?)
        .await
        .map_err(transport)?
        .as_string()
        .ok_or_else(|| NetError::Decode("response body is not text".into()))?;
    if !response.ok() {
        return Err(NetError::Transport(status_message(
            response.status(),
            &response.status_text(),
            &text,
        )));
    }
    Ok(text)
}

fn status_message(status: u16, status_text: &str, body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(error) if error.details.is_empty() => format!("HTTP {status}: {}", error.error),
        Ok(error) => format!("HTTP {status}: {} ({})", error.error, error.details),
        Err(_) => format!("HTTP {status} {status_text}"),
    }
}

pub fn parse_labels(text: &str) -> Result<Vec<String>, NetError> {
    serde_json::from_str(text).map_err(|error| NetError::Decode(error.to_string()))
}

pub fn parse_prediction(text: &str) -> Result<PredictResponse, NetError> {
    serde_json::from_str(text).map_err(|error| NetError::Decode(error.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_keep_backend_order() {
        let labels = parse_labels(r#"["ice_cream","crab"]"#).unwrap();
        assert_eq!(labels, vec!["ice_cream", "crab"]);
    }

    #[test]
    fn malformed_bodies_are_decode_errors() {
        assert!(matches!(parse_labels("{}"), Err(NetError::Decode(_))));
        assert!(matches!(
            parse_prediction("<html>oops</html>"),
            Err(NetError::Decode(_))
        ));
        assert!(matches!(
            parse_prediction(r#"{"output":{}}"#),
            Err(NetError::Decode(_))
        ));
    }

    #[test]
    fn prediction_parses() {
        let response =
            parse_prediction(r#"{"predicted":"crab","output":{"crab":"91.20%","ice_cream":"8.80%"}}"#)
                .unwrap();
        assert_eq!(response.predicted, "crab");
        assert_eq!(response.output["ice_cream"], "8.80%");
    }

    #[test]
    fn error_status_uses_server_message_when_present() {
        let body = r#"{"error":"invalid image","details":"not an image data URL"}"#;
        assert_eq!(
            status_message(400, "Bad Request", body),
            "HTTP 400: invalid image (not an image data URL)"
        );
        assert_eq!(
            status_message(502, "Bad Gateway", "upstream down"),
            "HTTP 502 Bad Gateway"
        );
    }
}
