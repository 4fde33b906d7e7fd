use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub mod data_url;
pub mod geometry;
pub mod raster;
pub mod stroke;
pub mod surface;
pub mod tool;

pub use data_url::{decode_data_url, encode_png_data_url, DataUrlError, PNG_DATA_URL_PREFIX};
pub use geometry::{map_client_point, ClientRect, Point};
pub use raster::{draw_line, stamp, LinePoints};
pub use stroke::StrokeSession;
pub use surface::{Rgb, Surface};
pub use tool::{Tool, ToolState};

/// Body of `POST /predict`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PredictRequest {
    #[serde(rename = "imageDataURL")]
    pub image_data_url: String,
}

/// Response of `POST /predict`.
///
/// `output` maps a label name to a percentage string such as `"87.30%"`. It
/// need not cover every label the backend knows about.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct PredictResponse {
    pub predicted: String,
    #[serde(default)]
    pub output: BTreeMap<String, String>,
}

/// Error body returned by the server for rejected requests.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default)]
    pub details: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predict_request_uses_camel_case_key() {
        let request = PredictRequest {
            image_data_url: "data:image/png;base64,AAAA".to_string(),
        };
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"imageDataURL":"data:image/png;base64,AAAA"}"#);
    }

    #[test]
    fn predict_response_parses_partial_output() {
        let json = r#"{"predicted":"dog","output":{"dog":"87.3%"}}"#;
        let response: PredictResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.predicted, "dog");
        assert_eq!(response.output.len(), 1);
        assert_eq!(response.output["dog"], "87.3%");
    }

    #[test]
    fn predict_response_tolerates_missing_output() {
        let response: PredictResponse = serde_json::from_str(r#"{"predicted":"cat"}"#).unwrap();
        assert!(response.output.is_empty());
    }
}
