use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use pixelpad_shared::PredictResponse;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("failed to read model file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse model file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid model: {0}")]
    Invalid(String),

    #[error("expected {expected} inputs, got {actual}")]
    InputSize { expected: usize, actual: usize },

    #[error("classifier returned {actual} scores for {expected} labels")]
    OutputSize { expected: usize, actual: usize },
}

/// A model that scores a normalized square grayscale image.
pub trait Classifier: Send + Sync {
    /// Label names, in the order of the scores returned by `forward`.
    fn labels(&self) -> &[String];

    /// Side length of the square input, in pixels.
    fn input_side(&self) -> u32;

    /// Returns one probability per label.
    fn forward(&self, input: &[f32]) -> Result<Vec<f32>, ModelError>;
}

/// Softmax over `weights · input + bias`.
#[derive(Deserialize, Debug, Clone)]
pub struct LinearModel {
    labels: Vec<String>,
    input_side: u32,
    weights: Vec<Vec<f32>>,
    bias: Vec<f32>,
}

impl LinearModel {
    pub fn from_json(text: &str) -> Result<Self, ModelError> {
        let model: LinearModel = serde_json::from_str(text)?;
        model.validate()?;
        Ok(model)
    }

    pub async fn load(path: &Path) -> Result<Self, ModelError> {
        let text = tokio::fs::read_to_string(path).await?;
        Self::from_json(&text)
    }

    fn validate(&self) -> Result<(), ModelError> {
        if self.labels.is_empty() {
            return Err(ModelError::Invalid("no labels".into()));
        }
        if self.input_side == 0 {
            return Err(ModelError::Invalid("input_side must be positive".into()));
        }
        if self.weights.len() != self.labels.len() || self.bias.len() != self.labels.len() {
            return Err(ModelError::Invalid(format!(
                "{} labels but {} weight rows and {} biases",
                self.labels.len(),
                self.weights.len(),
                self.bias.len()
            )));
        }
        let inputs = self.input_len();
        if let Some(row) = self.weights.iter().position(|row| row.len() != inputs) {
            return Err(ModelError::Invalid(format!(
                "weight row {row} has {} entries, expected {inputs}",
                self.weights[row].len()
            )));
        }
        Ok(())
    }

    fn input_len(&self) -> usize {
        self.input_side as usize * self.input_side as usize
    }
}

impl Classifier for LinearModel {
    fn labels(&self) -> &[String] {
        &self.labels
    }

    fn input_side(&self) -> u32 {
        self.input_side
    }

    fn forward(&self, input: &[f32]) -> Result<Vec<f32>, ModelError> {
        if input.len() != self.input_len() {
            return Err(ModelError::InputSize {
                expected: self.input_len(),
                actual: input.len(),
            });
        }
        let logits: Vec<f32> = self
            .weights
            .iter()
            .zip(&self.bias)
            .map(|(row, bias)| row.iter().zip(input).map(|(w, x)| w * x).sum::<f32>() + bias)
            .collect();
        Ok(softmax(&logits))
    }
}

fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|value| (value - max).exp()).collect();
    let total: f32 = exps.iter().sum();
    exps.into_iter().map(|value| value / total).collect()
}

/// Runs the classifier and formats its scores as percentages.
pub fn predict(classifier: &dyn Classifier, input: &[f32]) -> Result<PredictResponse, ModelError> {
    let labels = classifier.labels();
    if labels.is_empty() {
        return Err(ModelError::Invalid("no labels".into()));
    }
    let scores = classifier.forward(input)?;
    if scores.len() != labels.len() {
        return Err(ModelError::OutputSize {
            expected: labels.len(),
            actual: scores.len(),
        });
    }
    let mut best = 0;
    for (index, score) in scores.iter().enumerate() {
        if *score > scores[best] {
            best = index;
        }
    }
    let output: BTreeMap<String, String> = labels
        .iter()
        .zip(&scores)
        .map(|(label, score)| (label.clone(), format!("{:.2}%", score * 100.0)))
        .collect();
    Ok(PredictResponse {
        predicted: labels[best].clone(),
        output,
    })
}
