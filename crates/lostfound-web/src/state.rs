use std::path::PathBuf;
use std::sync::Arc;

use lostfound_store::ReportStore;
use serde::Serialize;

use crate::render::Renderer;

/// Shared application state for all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ReportStore>,
    pub renderer: Arc<Renderer>,
    pub site: Arc<SiteInfo>,
}

impl AppState {
    pub fn new(store: Arc<dyn ReportStore>, site: SiteInfo) -> Result<Self, minijinja::Error> {
        Ok(Self {
            store,
            renderer: Arc::new(Renderer::new()?),
            site: Arc::new(site),
        })
    }
}

/// Static facts about the deployment shown on every page.
#[derive(Debug, Clone)]
pub struct SiteInfo {
    pub name: String,
    /// Optional logo; the sidebar omits it when the file is missing.
    pub logo_path: PathBuf,
}

impl SiteInfo {
    /// Checked per render so a logo dropped in place shows up without a restart.
    pub fn context(&self) -> SiteContext {
        SiteContext {
            name: self.name.clone(),
            has_logo: self.logo_path.is_file(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SiteContext {
    pub name: String,
    pub has_logo: bool,
}
