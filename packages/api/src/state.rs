//! Process-wide action wrappers, built once from settings.

use tokio::sync::OnceCell;

use crate::actions::Actions;
use crate::backend::HttpBackend;
use crate::settings::Settings;

static ACTIONS: OnceCell<Actions<HttpBackend>> = OnceCell::const_new();

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("invalid settings: {0}")]
    Settings(#[from] config::ConfigError),
    #[error("cannot build http client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Get or initialize the shared [`Actions`].
/// Loads `.env`, then [`Settings::load`].
pub async fn get_actions() -> Result<&'static Actions<HttpBackend>, StartupError> {
    ACTIONS
        .get_or_try_init(|| async {
            dotenvy::dotenv().ok();
            let settings = Settings::load()?;
            tracing::info!(backend = %settings.service.url, "backend configured");
            let backend = HttpBackend::new(&settings)?;
            Ok(Actions::new(backend, &settings))
        })
        .await
}
