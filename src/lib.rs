mod app;
mod config;
pub(crate) mod handlers;
mod init;
pub(crate) mod middleware;
pub(crate) mod supabase;
pub(crate) mod utils;

mod docs;

pub use config::Settings;
pub use handlers::error::AppError;
pub use init::{init_tracing, StartupError};

use axum::Router;

#[cfg(feature = "integration_tests")]
pub use app::build_app;

#[cfg(feature = "integration_tests")]
pub use handlers::types::DeleteResponse;

#[cfg(feature = "integration_tests")]
pub use supabase::Todo;

use tracing::{info, instrument};

#[instrument(name = "init_app", skip_all)]
pub fn init_app(settings: Settings) -> Result<Router, StartupError> {
    info!(settings = ?settings, "init_app with settings");

    app::build_app(settings)
}
