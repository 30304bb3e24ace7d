pub mod app;
mod config;
pub mod dispatch;
pub mod error;
pub mod i18n;
pub mod logging;
pub mod predict;
pub mod session;
pub mod state;
#[cfg(test)]
mod test_support;
pub mod theme;
pub mod ui;
pub mod view;

pub use config::{load_startup_settings, StartupSettings, DEFAULT_SERVER_URL};
pub use error::{AppError, AppResult};

/// Entrypoint used by the binary.
pub fn run() -> AppResult<()> {
    logging::init();
    i18n::verify_catalog()?;

    let settings = config::load_startup_settings();
    tracing::info!(
        server_url = %settings.server_url,
        locale = settings.locale.as_str(),
        theme = settings.theme.as_str(),
        "starting palm classifier"
    );

    let app = app::App::new(settings);
    app.start()?;

    tracing::info!("palm classifier exited");
    Ok(())
}
