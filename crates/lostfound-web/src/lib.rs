pub mod error;
pub mod form;
pub mod pages;
pub mod render;
pub mod state;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::services::ServeFile;

pub use error::AppError;
pub use state::{AppState, SiteInfo};

/// Builds the site's router. `max_upload_bytes` caps submission bodies,
/// photo included.
pub fn router(state: AppState, max_upload_bytes: usize) -> Router {
    let logo = ServeFile::new(&state.site.logo_path);

    Router::new()
        .route("/", get(pages::show_page))
        .route("/submit", post(pages::submit_report))
        .route("/static/style.css", get(pages::stylesheet))
        .route("/health", get(pages::health))
        .route_service("/logo", logo)
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}
