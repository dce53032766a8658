pub mod api; // HTTP surface
pub mod classifier; // Image normalizer + inference adapter
pub mod config;
pub mod models;
pub mod prediction;
pub mod reference; // Curated condition table + related-condition resolver

use std::net::SocketAddr;
use std::sync::Arc;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::api::{start_api_server, ApiContext};
use crate::classifier::{load_classifier, ClassifierError, CLASS_LABELS};
use crate::config::{ConfigError, ServerConfig};
use crate::reference::{ReferenceError, ReferenceTable};

/// Conditions under which the process refuses to serve traffic.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("Configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Reference table: {0}")]
    Reference(#[from] ReferenceError),

    #[error("Classifier: {0}")]
    Classifier(#[from] ClassifierError),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },
}

/// Load and cross-check everything the handlers share.
pub fn build_context(config: &ServerConfig) -> Result<ApiContext, StartupError> {
    let table = match &config.reference_path {
        Some(path) => ReferenceTable::load(path)?,
        None => ReferenceTable::bundled()?,
    };
    table.validate(&CLASS_LABELS)?;

    tracing::info!(model = %config.model_path.display(), "Loading classifier");
    let classifier = load_classifier(&config.model_path)?;

    tracing::info!(
        backend = classifier.backend(),
        input_shape = ?[1, config::IMAGE_SIZE, config::IMAGE_SIZE, 3],
        "Classifier ready"
    );
    tracing::info!("Detectable diseases: {}", CLASS_LABELS.join(", "));
    tracing::info!("Total diseases in database: {}", table.len());

    Ok(ApiContext::new(
        Arc::new(table),
        Arc::from(classifier),
        config.max_upload_bytes,
    ))
}

/// Process entry point: configure logging, load shared state, serve until Ctrl-C.
pub async fn run() -> Result<(), StartupError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let config = ServerConfig::from_env()?;
    let ctx = build_context(&config)?;

    let addr = config.bind_addr();
    let mut server = start_api_server(ctx, addr)
        .await
        .map_err(|source| StartupError::Bind { addr, source })?;
    tracing::info!("Server listening on http://{}", server.session.server_addr);

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }
    server.shutdown();
    server.wait().await;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_model_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let config = ServerConfig {
            model_path: dir.path().join("skin_disease_model.onnx"),
            ..ServerConfig::default()
        };
        match build_context(&config) {
            Err(StartupError::Classifier(ClassifierError::ModelNotFound(path))) => {
                assert_eq!(path, config.model_path);
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("startup should fail without a model"),
        }
    }

    #[test]
    fn invalid_reference_override_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let table_path = dir.path().join("diseases.json");
        std::fs::write(&table_path, "[]").unwrap();
        let config = ServerConfig {
            model_path: dir.path().join("model.onnx"),
            reference_path: Some(table_path),
            ..ServerConfig::default()
        };
        assert!(matches!(
            build_context(&config),
            Err(StartupError::Reference(ReferenceError::Empty))
        ));
    }

    #[test]
    fn startup_error_messages_name_the_cause() {
        let err = StartupError::Classifier(ClassifierError::ModelNotFound("m.onnx".into()));
        assert_eq!(err.to_string(), "Classifier: Model not found at m.onnx");
    }
}
