use axum::extract::State;
use axum::Json;

use pixelpad_shared::{PredictRequest, PredictResponse};

use crate::classifier::predict;
use crate::error::ApiError;
use crate::preprocess::{decode_image, normalize};
use crate::state::AppState;

pub async fn labels_handler(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.classifier.labels().to_vec())
}

pub async fn predict_handler(
    State(state): State<AppState>,
    Json(request): Json<PredictRequest>,
) -> Result<Json<PredictResponse>, ApiError> {
    let image = decode_image(&request.image_data_url)?;
    let input = normalize(&image, state.classifier.input_side());
    let response = predict(state.classifier.as_ref(), &input)?;
    log::info!(
        "Predicted {} from {}x{} image",
        response.predicted,
        image.width(),
        image.height()
    );
    Ok(Json(response))
}
