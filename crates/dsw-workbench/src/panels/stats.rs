//! Statistics dashboard.

use std::sync::Arc;

use dsw_gateway::{Backend, ChartPoint, StatsRequest, StatsResponse, StatsSummary};
use dsw_state::{AnalysisType, ViewStore, DEFAULT_DATASET_ID};

/// Statistics panel controller.
pub struct StatsPanel {
    backend: Arc<dyn Backend>,
    view: ViewStore,
    column: String,
    /// Dataset and analysis of the last request.
    loaded_for: Option<(String, AnalysisType)>,
    result: Option<StatsResponse>,
    last_error: Option<String>,
}

impl StatsPanel {
    pub fn new(backend: Arc<dyn Backend>, view: ViewStore, column: impl Into<String>) -> Self {
        Self {
            backend,
            view,
            column: column.into(),
            loaded_for: None,
            result: None,
            last_error: None,
        }
    }

    fn target(&self) -> (String, AnalysisType) {
        let dataset = self
            .view
            .active_dataset_id()
            .unwrap_or_else(|| DEFAULT_DATASET_ID.to_string());
        (dataset, self.view.active_analysis_type())
    }

    /// Re-fetch if the dataset or analysis type changed. Returns whether a
    /// fetch happened.
    pub async fn sync(&mut self) -> bool {
        if self.loaded_for.as_ref() == Some(&self.target()) {
            return false;
        }
        self.refresh().await;
        true
    }

    /// Fetch statistics for the current target.
    ///
    /// On failure the previous chart stays.
    pub async fn refresh(&mut self) -> bool {
        let (dataset, analysis) = self.target();
        self.loaded_for = Some((dataset.clone(), analysis));
        let request = StatsRequest::new(dataset.as_str(), self.column.as_str(), analysis.as_str());

        match self.backend.analyze_stats(&request).await {
            Ok(result) => {
                tracing::debug!(%dataset, %analysis, chart = ?result.chart_type, "stats loaded");
                self.result = Some(result);
                self.last_error = None;
                true
            }
            Err(e) => {
                tracing::warn!(%dataset, %analysis, error = %e, "stats request failed");
                self.last_error = Some(e.user_message());
                false
            }
        }
    }

    /// Probe a different column on the next [`Self::sync`].
    pub fn set_column(&mut self, column: impl Into<String>) {
        self.column = column.into();
        self.loaded_for = None;
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn result(&self) -> Option<&StatsResponse> {
        self.result.as_ref()
    }

    pub fn title(&self) -> Option<&str> {
        self.result.as_ref().map(|r| r.title.as_str())
    }

    pub fn points(&self) -> Vec<ChartPoint> {
        self.result.as_ref().map(StatsResponse::points).unwrap_or_default()
    }

    pub fn is_heatmap(&self) -> bool {
        self.result.as_ref().is_some_and(StatsResponse::is_heatmap)
    }

    pub fn summary(&self) -> Option<&StatsSummary> {
        self.result.as_ref().and_then(StatsResponse::summary)
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Badge text for the analysis being shown.
    pub fn type_label(&self) -> &'static str {
        self.view.active_analysis_type().short_label()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_carries_analysis_wire_name() {
        for analysis in AnalysisType::ALL {
            let request = StatsRequest::new("loan_data_v2", "loan_amount", analysis.as_str());
            let json = serde_json::to_value(&request).unwrap();
            assert_eq!(json["type"], serde_json::to_value(analysis).unwrap());
        }
    }
}
