use actix_multipart::Multipart;
use actix_web::{http::header::ContentType, web, HttpResponse};
use futures_util::StreamExt;
use tracing::{debug, error, info, warn};

use crate::classifier::Classifier;
use crate::error::ClassifyError;
use crate::models::PredictionResult;
use crate::page::{Outcome, Pages};

/// Largest file upload accepted, in bytes.
#[derive(Debug, Clone, Copy)]
pub struct UploadLimit(pub usize);

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/")
            .route(web::get().to(index))
            .route(web::post().to(classify)),
    );
}

pub async fn index(pages: web::Data<Pages>) -> HttpResponse {
    page(&pages, &Outcome::Empty)
}

/// Every failure is rendered into the page; the status stays 200.
pub async fn classify(
    classifier: web::Data<Classifier>,
    pages: web::Data<Pages>,
    limit: web::Data<UploadLimit>,
    payload: Multipart,
) -> HttpResponse {
    let outcome = match classify_upload(classifier, limit.0, payload).await {
        Ok(result) => {
            info!(label = %result.label, confidence = %result.confidence_display(), "classified upload");
            Outcome::Prediction(result)
        }
        Err(e) => {
            match &e {
                ClassifyError::NoFileUploaded | ClassifyError::NoFileSelected => {
                    debug!(error = %e, "rejected form submission")
                }
                ClassifyError::Decode(_)
                | ClassifyError::Upload(_)
                | ClassifyError::TooLarge { .. } => warn!(error = %e, "could not read uploaded image"),
                _ => error!(error = %e, "classification failed"),
            }
            Outcome::Error(e.user_message())
        }
    };
    page(&pages, &outcome)
}

fn page(pages: &Pages, outcome: &Outcome) -> HttpResponse {
    match pages.render(outcome) {
        Ok(html) => HttpResponse::Ok()
            .content_type(ContentType::html())
            .body(html),
        Err(e) => {
            error!(error = %e, "failed to render page");
            HttpResponse::InternalServerError().finish()
        }
    }
}

async fn classify_upload(
    classifier: web::Data<Classifier>,
    limit: usize,
    payload: Multipart,
) -> Result<PredictionResult, ClassifyError> {
    let bytes = read_file_field(payload, limit).await?;

    // decode + inference are CPU bound
    web::block(move || classifier.classify_bytes(&bytes))
        .await
        .map_err(|e| ClassifyError::Inference(e.to_string()))?
}

/// Pulls the bytes of the `file` upload out of the form, skipping any other
/// fields. A stream that is not multipart at all counts as no upload.
async fn read_file_field(mut payload: Multipart, limit: usize) -> Result<Vec<u8>, ClassifyError> {
    while let Some(item) = payload.next().await {
        let mut field = match item {
            Ok(field) => field,
            Err(e) => {
                debug!(error = %e, "multipart stream unreadable");
                return Err(ClassifyError::NoFileUploaded);
            }
        };

        let disposition = field.content_disposition();
        let name = disposition.get_name().map(str::to_owned);
        let filename = disposition.get_filename().map(str::to_owned);

        // a part without a filename is a plain form value, not a file
        let filename = match (name.as_deref(), filename) {
            (Some("file"), Some(filename)) => filename,
            _ => {
                while let Some(chunk) = field.next().await {
                    chunk.map_err(|e| ClassifyError::Upload(e.to_string()))?;
                }
                continue;
            }
        };
        if filename.is_empty() {
            return Err(ClassifyError::NoFileSelected);
        }
        debug!(%filename, "receiving upload");

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let data = chunk.map_err(|e| ClassifyError::Upload(e.to_string()))?;
            if bytes.len() + data.len() > limit {
                return Err(ClassifyError::TooLarge { limit });
            }
            bytes.extend_from_slice(&data);
        }
        return Ok(bytes);
    }

    Err(ClassifyError::NoFileUploaded)
}
