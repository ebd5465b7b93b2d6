use std::path::PathBuf;

use clap::Parser;

/// Sea debris image classifier
#[derive(Parser, Debug, Clone)]
#[command(name = "sea-debris-classifier")]
#[command(version)]
#[command(about = "Web form that classifies uploaded sea debris images")]
pub struct Settings {
    /// Address to bind to
    #[arg(long, env = "CLASSIFIER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "CLASSIFIER_PORT", default_value_t = 5000)]
    pub port: u16,

    /// ONNX model taking a (1, 224, 224, 3) image and returning 16 class scores
    #[arg(short, long, env = "CLASSIFIER_MODEL", default_value = "best_model.onnx")]
    pub model: PathBuf,

    /// Largest accepted upload, in bytes
    #[arg(long, env = "CLASSIFIER_MAX_UPLOAD_BYTES", default_value_t = 16 * 1024 * 1024)]
    pub max_upload_bytes: usize,
}

impl Settings {
    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}
