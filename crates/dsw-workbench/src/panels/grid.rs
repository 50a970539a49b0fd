//! Data grid: preview of the active dataset.

use std::sync::Arc;

use dsw_gateway::{Backend, ColumnDef, PreviewRequest, PreviewResponse};
use dsw_state::{ViewStore, DEFAULT_DATASET_ID};

/// Data grid controller.
pub struct DataGridPanel {
    backend: Arc<dyn Backend>,
    view: ViewStore,
    limit: u32,
    dataset_id: Option<String>,
    filter: String,
    grid: Option<PreviewResponse>,
    last_error: Option<String>,
}

impl DataGridPanel {
    pub fn new(backend: Arc<dyn Backend>, view: ViewStore, limit: u32) -> Self {
        Self {
            backend,
            view,
            limit,
            dataset_id: None,
            filter: String::new(),
            grid: None,
            last_error: None,
        }
    }

    /// Dataset the view store points at, or the fallback.
    pub fn target_dataset(&self) -> String {
        self.view
            .active_dataset_id()
            .unwrap_or_else(|| DEFAULT_DATASET_ID.to_string())
    }

    /// Reload if the active dataset changed since the last load.
    ///
    /// A dataset switch clears the filter. Returns whether a load happened.
    pub async fn sync(&mut self) -> bool {
        let target = self.target_dataset();
        if self.dataset_id.as_deref() == Some(target.as_str()) {
            return false;
        }
        tracing::debug!(dataset = %target, "dataset changed, resetting filter");
        self.dataset_id = Some(target);
        self.filter.clear();
        self.refresh().await;
        true
    }

    /// Fetch the preview with the current filter.
    ///
    /// On failure the previous grid stays on screen.
    pub async fn refresh(&mut self) -> bool {
        let dataset = match &self.dataset_id {
            Some(id) => id.clone(),
            None => {
                let target = self.target_dataset();
                self.dataset_id = Some(target.clone());
                target
            }
        };
        let request = PreviewRequest::new(dataset.as_str(), self.limit).with_filter(self.filter.as_str());

        match self.backend.preview(&request).await {
            Ok(grid) => {
                tracing::debug!(%dataset, rows = grid.data.len(), "preview loaded");
                self.grid = Some(grid);
                self.last_error = None;
                true
            }
            Err(e) => {
                tracing::warn!(%dataset, error = %e, "preview failed");
                self.last_error = Some(e.user_message());
                false
            }
        }
    }

    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
    }

    /// Apply the filter typed in the toolbar.
    pub async fn run_filter(&mut self) -> bool {
        self.refresh().await
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Dataset of the grid currently shown.
    pub fn dataset_id(&self) -> Option<&str> {
        self.dataset_id.as_deref()
    }

    pub fn grid(&self) -> Option<&PreviewResponse> {
        self.grid.as_ref()
    }

    pub fn columns(&self) -> &[ColumnDef] {
        self.grid.as_ref().map(|g| g.columns.as_slice()).unwrap_or_default()
    }

    pub fn row_count(&self) -> usize {
        self.grid.as_ref().map_or(0, |g| g.data.len())
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
