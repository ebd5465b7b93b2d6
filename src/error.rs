use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong between receiving an upload and rendering a
/// prediction, plus the two startup failures around the model artifact.
#[derive(Error, Debug)]
pub enum ClassifyError {
    #[error("no file field in the submitted form")]
    NoFileUploaded,

    #[error("file field submitted without a filename")]
    NoFileSelected,

    #[error("failed to read upload: {0}")]
    Upload(String),

    #[error("upload exceeds {limit} bytes")]
    TooLarge { limit: usize },

    /// The bytes could not be decoded as an image.
    #[error("{0}")]
    Decode(#[from] image::ImageError),

    /// The model failed to run or produced an unusable output.
    #[error("inference failed: {0}")]
    Inference(String),

    #[error("failed to load model at '{path}': {reason}")]
    ModelLoad { path: PathBuf, reason: String },

    #[error("model produces {actual} scores but the label table has {expected} entries")]
    LabelMismatch { expected: usize, actual: usize },
}

impl ClassifyError {
    /// Text shown on the page for a failed request.
    ///
    /// Inference failures stay generic; their cause only goes to the log.
    pub fn user_message(&self) -> String {
        match self {
            ClassifyError::NoFileUploaded => "No file uploaded.".to_string(),
            ClassifyError::NoFileSelected => "No file selected.".to_string(),
            ClassifyError::Decode(e) => format!("Error processing image: {}", e),
            ClassifyError::TooLarge { limit } => {
                format!("Error processing image: upload exceeds {} bytes.", limit)
            }
            ClassifyError::Upload(_) => "Error processing image: the upload could not be read.".to_string(),
            ClassifyError::Inference(_)
            | ClassifyError::ModelLoad { .. }
            | ClassifyError::LabelMismatch { .. } => {
                "Error processing image: the model could not classify this image.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_errors_use_the_form_messages() {
        assert_eq!(ClassifyError::NoFileUploaded.user_message(), "No file uploaded.");
        assert_eq!(ClassifyError::NoFileSelected.user_message(), "No file selected.");
    }

    #[test]
    fn inference_cause_is_not_shown() {
        let err = ClassifyError::Inference("shape mismatch at node conv_1".to_string());
        let message = err.user_message();
        assert!(message.starts_with("Error processing image:"));
        assert!(!message.contains("conv_1"));
    }

    #[test]
    fn decode_error_is_formatted_into_the_message() {
        let err = ClassifyError::from(image::load_from_memory(b"not an image").unwrap_err());
        let message = err.user_message();
        assert!(message.starts_with("Error processing image: "));
        assert!(message.len() > "Error processing image: ".len());
    }
}
