use pixelpad_shared::PredictResponse;

pub const NEUTRAL_COLOR: &str = "#e5e7eb";
pub const ACTIVE_COLOR: &str = "#93c5fd";
pub const PREDICTED_COLOR: &str = "#22c55e";

/// Visual element showing one label's confidence.
pub trait IndicatorView {
    fn set_color(&self, color: &str);
    fn set_text(&self, text: &str);
}

/// Indicators keyed by label name, kept in the order the labels were
/// registered.
pub struct IndicatorRegistry<V> {
    indicators: Vec<(String, V)>,
}

impl<V> Default for IndicatorRegistry<V> {
    fn default() -> Self {
        Self {
            indicators: Vec::new(),
        }
    }
}

impl<V: IndicatorView> IndicatorRegistry<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.indicators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indicators.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.indicators.iter().map(|(label, _)| label.as_str())
    }

    pub fn get(&self, label: &str) -> Option<&V> {
        self.indicators
            .iter()
            .find(|(name, _)| name == label)
            .map(|(_, view)| view)
    }

    /// Creates an indicator for every label that does not have one yet and
    /// returns how many were created. Stops at the first failed creation.
    pub fn materialize<E>(
        &mut self,
        labels: &[String],
        mut create: impl FnMut(&str) -> Result<V, E>,
    ) -> Result<usize, E> {
        let mut created = 0;
        for label in labels {
            if self.get(label).is_some() {
                continue;
            }
            let view = create(label)?;
            view.set_color(NEUTRAL_COLOR);
            view.set_text("");
            self.indicators.push((label.clone(), view));
            created += 1;
        }
        Ok(created)
    }

    pub fn reset(&self) {
        for (_, view) in &self.indicators {
            view.set_color(NEUTRAL_COLOR);
            view.set_text("");
        }
    }

    /// Shows `result` on the indicators. Labels missing from the result stay
    /// neutral; labels without an indicator are ignored.
    pub fn reconcile(&self, result: &PredictResponse) {
        self.reset();
        for (label, confidence) in &result.output {
            let Some(view) = self.get(label) else {
                continue;
            };
            let color = if *label == result.predicted {
                PREDICTED_COLOR
            } else {
                ACTIVE_COLOR
            };
            view.set_color(color);
            view.set_text(&format_confidence(confidence));
        }
    }
}

/// `"87.3%"` -> `"87%"`. Values that do not parse as a number are shown as
/// received.
pub fn format_confidence(raw: &str) -> String {
    let trimmed = raw.trim();
    let number = trimmed.trim_end_matches('%').trim();
    match number.parse::<f64>() {
        Ok(value) if value.is_finite() => format!("{}%", value.round() as i64),
        _ => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::BTreeMap;

    use super::*;

    #[derive(Default)]
    struct FakeIndicator {
        color: RefCell<String>,
        text: RefCell<String>,
    }

    impl IndicatorView for FakeIndicator {
        fn set_color(&self, color: &str) {
            *self.color.borrow_mut() = color.to_string();
        }

        fn set_text(&self, text: &str) {
            *self.text.borrow_mut() = text.to_string();
        }
    }

    fn registry(labels: &[&str]) -> IndicatorRegistry<FakeIndicator> {
        let labels: Vec<String> = labels.iter().map(|label| label.to_string()).collect();
        let mut registry = IndicatorRegistry::new();
        registry
            .materialize(&labels, |_| Ok::<_, ()>(FakeIndicator::default()))
            .unwrap();
        registry
    }

    fn response(predicted: &str, output: &[(&str, &str)]) -> PredictResponse {
        PredictResponse {
            predicted: predicted.to_string(),
            output: output
                .iter()
                .map(|(label, value)| (label.to_string(), value.to_string()))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    fn shown(registry: &IndicatorRegistry<FakeIndicator>, label: &str) -> (String, String) {
        let view = registry.get(label).unwrap();
        (view.color.borrow().clone(), view.text.borrow().clone())
    }

    #[test]
    fn reconcile_highlights_prediction_and_rounds() {
        let registry = registry(&["cat", "dog"]);
        registry.reconcile(&response("dog", &[("dog", "87.3%"), ("cat", "12.7%")]));
        assert_eq!(
            shown(&registry, "dog"),
            (PREDICTED_COLOR.to_string(), "87%".to_string())
        );
        assert_eq!(
            shown(&registry, "cat"),
            (ACTIVE_COLOR.to_string(), "13%".to_string())
        );
    }

    #[test]
    fn empty_output_resets_everything() {
        let registry = registry(&["cat", "dog"]);
        registry.reconcile(&response("dog", &[("dog", "87.3%"), ("cat", "12.7%")]));
        registry.reconcile(&response("dog", &[]));
        for label in ["cat", "dog"] {
            assert_eq!(
                shown(&registry, label),
                (NEUTRAL_COLOR.to_string(), String::new())
            );
        }
    }

    #[test]
    fn labels_absent_from_result_stay_neutral() {
        let registry = registry(&["cat", "dog", "crab"]);
        registry.reconcile(&response("cat", &[("cat", "99.0%")]));
        assert_eq!(
            shown(&registry, "crab"),
            (NEUTRAL_COLOR.to_string(), String::new())
        );
        assert_eq!(shown(&registry, "cat").1, "99%");
    }

    #[test]
    fn unknown_labels_are_ignored() {
        let registry = registry(&["cat"]);
        registry.reconcile(&response("eel", &[("eel", "70%"), ("cat", "30%")]));
        assert_eq!(registry.len(), 1);
        assert!(registry.get("eel").is_none());
        assert_eq!(
            shown(&registry, "cat"),
            (ACTIVE_COLOR.to_string(), "30%".to_string())
        );
    }

    #[test]
    fn materialize_keeps_order_and_skips_known_labels() {
        let mut registry = registry(&["ice_cream", "crab"]);
        let more = vec!["crab".to_string(), "duck".to_string()];
        let created = registry
            .materialize(&more, |_| Ok::<_, ()>(FakeIndicator::default()))
            .unwrap();
        assert_eq!(created, 1);
        assert_eq!(
            registry.labels().collect::<Vec<_>>(),
            vec!["ice_cream", "crab", "duck"]
        );
    }

    #[test]
    fn materialize_propagates_creation_errors() {
        let mut registry: IndicatorRegistry<FakeIndicator> = IndicatorRegistry::new();
        assert!(registry.is_empty());
        let labels = vec!["a".to_string(), "b".to_string()];
        let result = registry.materialize(&labels, |label| {
            if label == "b" {
                Err("no container")
            } else {
                Ok(FakeIndicator::default())
            }
        });
        assert_eq!(result, Err("no container"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn confidence_formatting() {
        assert_eq!(format_confidence("87.30%"), "87%");
        assert_eq!(format_confidence("12.50%"), "13%");
        assert_eq!(format_confidence(" 0.4 % "), "0%");
        assert_eq!(format_confidence("100"), "100%");
        assert_eq!(format_confidence("n/a"), "n/a");
    }
}
