use std::sync::Arc;

use crate::classifier::Classifier;

#[derive(Clone)]
pub struct AppState {
    pub classifier: Arc<dyn Classifier>,
}
