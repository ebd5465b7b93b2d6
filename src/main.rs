use actix_web::{web, App, HttpServer};
use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sea_debris_classifier::config::Settings;
use sea_debris_classifier::handlers::{self, UploadLimit};
use sea_debris_classifier::page::Pages;
use sea_debris_classifier::{Classifier, OnnxModel, CLASS_LABELS};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    let model = OnnxModel::load(&settings.model).context("model is required to start")?;
    let classifier = web::Data::new(
        Classifier::new(Box::new(model), &CLASS_LABELS)
            .context("model does not match the label table")?,
    );
    let pages = web::Data::new(Pages::new().context("page template is invalid")?);
    let limit = web::Data::new(UploadLimit(settings.max_upload_bytes));

    let (host, port) = settings.bind_address();
    info!("Server running at http://{}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(classifier.clone())
            .app_data(pages.clone())
            .app_data(limit.clone())
            .configure(handlers::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await?;

    Ok(())
}
