use std::path::Path;

use tract_onnx::prelude::*;
use tracing::{debug, info};

use crate::error::ClassifyError;
use crate::models::{InputTensor, PredictionResult, INPUT_SIZE};
use crate::preprocess::preprocess;

/// Anything that maps an input tensor to a vector of class scores.
pub trait Model: Send + Sync {
    fn infer(&self, input: &InputTensor) -> Result<Vec<f32>, ClassifyError>;
}

type OnnxPlan = SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

/// ONNX graph loaded once and optimized for a fixed `(1, 224, 224, 3)` input.
pub struct OnnxModel {
    plan: OnnxPlan,
}

impl OnnxModel {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ClassifyError> {
        let path = path.as_ref();
        let load_err = |e: TractError| ClassifyError::ModelLoad {
            path: path.to_path_buf(),
            reason: format!("{:#}", e),
        };

        let side = INPUT_SIZE as usize;
        let plan = tract_onnx::onnx()
            .model_for_path(path)
            .map_err(load_err)?
            .with_input_fact(
                0,
                InferenceFact::dt_shape(f32::datum_type(), tvec!(1, side, side, 3)),
            )
            .map_err(load_err)?
            .into_optimized()
            .map_err(load_err)?
            .into_runnable()
            .map_err(load_err)?;

        info!(path = %path.display(), "loaded ONNX model");
        Ok(Self { plan })
    }
}

impl Model for OnnxModel {
    fn infer(&self, input: &InputTensor) -> Result<Vec<f32>, ClassifyError> {
        let data: Vec<f32> = input.iter().copied().collect();
        let tensor = Tensor::from_shape(input.shape(), &data)
            .map_err(|e| ClassifyError::Inference(format!("{:#}", e)))?;

        let outputs = self
            .plan
            .run(tvec!(tensor.into()))
            .map_err(|e| ClassifyError::Inference(format!("{:#}", e)))?;

        let scores = outputs
            .first()
            .ok_or_else(|| ClassifyError::Inference("model returned no outputs".to_string()))?
            .to_array_view::<f32>()
            .map_err(|e| ClassifyError::Inference(format!("{:#}", e)))?
            .iter()
            .copied()
            .collect();
        Ok(scores)
    }
}

/// Index of the largest score. Ties go to the lowest index and NaN never wins.
pub fn argmax(scores: &[f32]) -> Option<usize> {
    scores
        .iter()
        .enumerate()
        .filter(|(_, v)| !v.is_nan())
        .fold(None, |best: Option<(usize, f32)>, (i, &v)| match best {
            Some((_, b)) if v <= b => best,
            _ => Some((i, v)),
        })
        .map(|(i, _)| i)
}

/// A model paired with the label table its outputs are aligned to.
pub struct Classifier {
    model: Box<dyn Model>,
    labels: &'static [&'static str],
}

impl Classifier {
    /// Runs the model once on a blank image and rejects it unless it yields
    /// exactly one score per label.
    pub fn new(
        model: Box<dyn Model>,
        labels: &'static [&'static str],
    ) -> Result<Self, ClassifyError> {
        let side = INPUT_SIZE as usize;
        let blank = InputTensor::zeros((1, side, side, 3));
        let actual = model.infer(&blank)?.len();
        if actual != labels.len() {
            return Err(ClassifyError::LabelMismatch {
                expected: labels.len(),
                actual,
            });
        }
        debug!(classes = actual, "model output matches label table");
        Ok(Self { model, labels })
    }

    pub fn classify(&self, input: &InputTensor) -> Result<PredictionResult, ClassifyError> {
        let scores = self.model.infer(input)?;
        if scores.len() != self.labels.len() {
            return Err(ClassifyError::Inference(format!(
                "expected {} scores, got {}",
                self.labels.len(),
                scores.len()
            )));
        }
        let index = argmax(&scores)
            .ok_or_else(|| ClassifyError::Inference("model output has no valid score".to_string()))?;

        Ok(PredictionResult {
            label: self.labels[index].to_string(),
            confidence: scores[index] * 100.0,
        })
    }

    pub fn classify_bytes(&self, bytes: &[u8]) -> Result<PredictionResult, ClassifyError> {
        let input = preprocess(bytes)?;
        self.classify(&input)
    }
}
