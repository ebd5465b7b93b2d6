use minijinja::{context, Environment};

use crate::models::PredictionResult;

// `.html` turns on auto-escaping
const INDEX: &str = "index.html";

/// What goes under the upload form.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Empty,
    Prediction(PredictionResult),
    Error(String),
}

/// Compiled page templates, built once at startup.
pub struct Pages {
    env: Environment<'static>,
}

impl Pages {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template(INDEX, include_str!("../templates/index.html"))?;
        Ok(Self { env })
    }

    pub fn render(&self, outcome: &Outcome) -> Result<String, minijinja::Error> {
        let (prediction, confidence, error) = match outcome {
            Outcome::Empty => (None, None, None),
            Outcome::Prediction(result) => (
                Some(result.label.clone()),
                Some(result.confidence_display()),
                None,
            ),
            Outcome::Error(message) => (None, None, Some(message.clone())),
        };

        self.env
            .get_template(INDEX)?
            .render(context! { prediction, confidence, error })
    }
}
