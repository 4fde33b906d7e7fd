use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use pixelpad_shared::{DataUrlError, ErrorBody};

use crate::classifier::ModelError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("invalid image data URL")]
    DataUrl(#[from] DataUrlError),

    #[error("could not decode image")]
    Image(#[from] image::ImageError),

    #[error("classification failed")]
    Model(#[from] ModelError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::DataUrl(_) | ApiError::Image(_) => StatusCode::BAD_REQUEST,
            ApiError::Model(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn body(&self) -> ErrorBody {
        let details = match self {
            ApiError::DataUrl(error) => error.to_string(),
            ApiError::Image(error) => error.to_string(),
            ApiError::Model(error) => error.to_string(),
        };
        ErrorBody {
            error: self.to_string(),
            details,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("{self}: {:?}", self.body().details);
        } else {
            log::warn!("Rejected request: {self}: {}", self.body().details);
        }
        (status, Json(self.body())).into_response()
    }
}
