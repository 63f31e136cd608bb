use crate::export::ExportLayout;
use crate::questions::SetFetcher;
use crate::session::SessionManager;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// The single response session; the mutex serializes all mutation
    pub manager: Arc<Mutex<SessionManager>>,

    /// Built-in question set fetcher
    pub fetcher: Arc<dyn SetFetcher>,

    /// Column layout for exports
    pub export_layout: ExportLayout,
}

impl AppState {
    pub fn new(manager: SessionManager, fetcher: Arc<dyn SetFetcher>) -> Self {
        Self {
            manager: Arc::new(Mutex::new(manager)),
            fetcher,
            export_layout: ExportLayout::default(),
        }
    }

    pub fn with_export_layout(mut self, layout: ExportLayout) -> Self {
        self.export_layout = layout;
        self
    }
}
