//! Domain events and the bus that carries them.
//!
//! Panels raise events instead of writing into stores they don't own. The
//! bus delivers synchronously on the publishing thread, so every subscriber
//! has run by the time `publish` returns.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use dsw_gateway::PublishResponse;
use dsw_state::{AnalysisType, Listeners, ScriptLanguage, Subscription};

/// What a finished script run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptOutcome {
    /// A SQL run materialized a result table.
    Table { name: String, row_count: u64 },
    /// The kernel ran the code; this is what it printed.
    Output(String),
    /// The kernel reported an error.
    Failed(String),
}

impl ScriptOutcome {
    /// Text shown in the Script Lab output pane.
    pub fn console_text(&self) -> String {
        match self {
            Self::Table { name, .. } => {
                format!("Query executed successfully.\nTable '{name}' generated.")
            }
            Self::Output(text) => text.clone(),
            Self::Failed(error) => format!("Error:\n{error}"),
        }
    }
}

/// Something that happened in one panel and may matter to others.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkbenchEvent {
    /// A script run completed.
    ScriptExecuted {
        script_id: String,
        language: ScriptLanguage,
        outcome: ScriptOutcome,
    },
    /// The backend confirmed a Python variable was published.
    VariablePublished(PublishResponse),
    /// The user opened a table (schema tree or session list).
    DatasetOpened { name: String },
    /// The user picked an analysis tool.
    ToolSelected(AnalysisType),
}

impl WorkbenchEvent {
    /// Short name for logs.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::ScriptExecuted { .. } => "script_executed",
            Self::VariablePublished(_) => "variable_published",
            Self::DatasetOpened { .. } => "dataset_opened",
            Self::ToolSelected(_) => "tool_selected",
        }
    }
}

/// Synchronous publish/subscribe channel for [`WorkbenchEvent`]s.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    listeners: Listeners<WorkbenchEvent>,
    disposed: Arc<AtomicBool>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `event` to every subscriber, in subscription order.
    pub fn publish(&self, event: WorkbenchEvent) {
        if self.disposed.load(Ordering::Acquire) {
            tracing::debug!(event = event.kind(), "event dropped: bus disposed");
            return;
        }
        tracing::debug!(event = event.kind(), subscribers = self.listeners.len(), "publishing event");
        self.listeners.notify(&event);
    }

    pub fn subscribe(&self, listener: impl Fn(&WorkbenchEvent) + Send + Sync + 'static) -> Subscription {
        if self.disposed.load(Ordering::Acquire) {
            return Subscription::inert();
        }
        self.listeners.subscribe(listener)
    }

    /// Detach all subscribers and drop later events.
    pub fn dispose(&self) {
        self.disposed.store(true, Ordering::Release);
        self.listeners.clear();
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_publish_reaches_subscribers_in_order() {
        let bus = EventBus::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        let first = Arc::clone(&log);
        let second = Arc::clone(&log);
        let _a = bus.subscribe(move |e| first.lock().unwrap().push(format!("a:{}", e.kind())));
        let _b = bus.subscribe(move |e| second.lock().unwrap().push(format!("b:{}", e.kind())));

        bus.publish(WorkbenchEvent::ToolSelected(AnalysisType::Missing));

        assert_eq!(*log.lock().unwrap(), vec!["a:tool_selected", "b:tool_selected"]);
    }

    #[test]
    fn test_disposed_bus_drops_events() {
        let bus = EventBus::new();
        let hits = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&hits);
        let _sub = bus.subscribe(move |_| *counter.lock().unwrap() += 1);

        bus.dispose();
        bus.publish(WorkbenchEvent::DatasetOpened {
            name: "app_logs".to_string(),
        });

        assert_eq!(*hits.lock().unwrap(), 0);
        assert!(bus.is_disposed());
    }

    #[test]
    fn test_console_text() {
        let outcome = ScriptOutcome::Table {
            name: "result_20250101120000".to_string(),
            row_count: 10,
        };
        assert_eq!(
            outcome.console_text(),
            "Query executed successfully.\nTable 'result_20250101120000' generated."
        );
        assert_eq!(ScriptOutcome::Failed("boom".to_string()).console_text(), "Error:\nboom");
    }
}
