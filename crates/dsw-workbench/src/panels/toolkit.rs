//! Right-panel analysis toolkit.

use dsw_state::{AnalysisType, LayoutStore, ViewStore, DEFAULT_DATASET_ID};

use crate::events::{EventBus, WorkbenchEvent};

/// Toolkit panel controller.
#[derive(Debug, Clone)]
pub struct ToolkitPanel {
    bus: EventBus,
    layout: LayoutStore,
    view: ViewStore,
}

impl ToolkitPanel {
    pub fn new(bus: EventBus, layout: LayoutStore, view: ViewStore) -> Self {
        Self { bus, layout, view }
    }

    pub fn tools(&self) -> &'static [AnalysisType] {
        &AnalysisType::ALL
    }

    /// Run `analysis` on the active dataset.
    pub fn select_tool(&self, analysis: AnalysisType) {
        self.bus.publish(WorkbenchEvent::ToolSelected(analysis));
    }

    pub fn active_tool(&self) -> AnalysisType {
        self.view.active_analysis_type()
    }

    /// Dataset the tools will run against.
    pub fn active_source(&self) -> String {
        self.view
            .active_dataset_id()
            .unwrap_or_else(|| DEFAULT_DATASET_ID.to_string())
    }

    pub fn resize(&self, delta: f64) {
        self.layout.resize_right(delta);
    }

    pub fn close(&self) {
        self.layout.set_right(false);
    }
}
