use std::fmt;

use ndarray::Array4;

/// Side length the model expects for its square RGB input.
pub const INPUT_SIZE: u32 = 224;

/// NHWC batch of one normalized RGB image, shape `(1, 224, 224, 3)`.
pub type InputTensor = Array4<f32>;

/// Class names, index-aligned with the model's output vector.
pub const CLASS_LABELS: [&str; 16] = [
    "rov",
    "trash_fabric",
    "plant",
    "trash_rubber",
    "trash_metal",
    "animal_fish",
    "animal_eel",
    "trash_etc",
    "trash_fishing_gear",
    "trash_paper",
    "trash_wood",
    "animal_starfish",
    "animal_shells",
    "animal_crab",
    "animal_etc",
    "trash_plastic",
];

#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResult {
    pub label: String,
    /// Probability of `label` scaled to a percentage.
    pub confidence: f32,
}

impl PredictionResult {
    /// Confidence as shown on the page, e.g. `90.00%`.
    pub fn confidence_display(&self) -> String {
        format!("{:.2}%", self.confidence)
    }
}

impl fmt::Display for PredictionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.confidence_display())
    }
}
