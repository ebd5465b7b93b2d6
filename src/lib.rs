//! Web form that classifies uploaded sea debris photos with a pre-trained
//! ONNX model and renders the predicted class back into the page.

pub mod classifier;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod page;
pub mod preprocess;

pub use classifier::{Classifier, Model, OnnxModel};
pub use error::ClassifyError;
pub use models::{InputTensor, PredictionResult, CLASS_LABELS};
