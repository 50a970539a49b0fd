//! Cross-store coordination.
//!
//! The coordinator is the only place where an event in one panel turns into
//! writes on stores owned by another:
//!
//! | Event | Effect |
//! |-------|--------|
//! | `ScriptExecuted` with a table | new session table, prepended |
//! | `VariablePublished` | new session table from the confirmed name and rows |
//! | `DatasetOpened` | active dataset set, view switched to Data |
//! | `ToolSelected` | analysis type set, view switched to Stats |

use chrono::Utc;
use dsw_state::{ActiveView, SessionTable, SessionTableRegistry, Subscription, TableKind, ViewStore};

use crate::events::{EventBus, ScriptOutcome, WorkbenchEvent};
use crate::stores::Stores;

/// Applies [`WorkbenchEvent`]s to the stores. Detaches when dropped.
#[derive(Debug)]
pub struct Coordinator {
    _subscription: Subscription,
}

impl Coordinator {
    /// Subscribe to `bus` and route its events into `stores`.
    pub fn attach(bus: &EventBus, stores: &Stores) -> Self {
        let view = stores.view.clone();
        let session = stores.session.clone();
        let subscription = bus.subscribe(move |event| apply(event, &view, &session));
        Self {
            _subscription: subscription,
        }
    }
}

/// Apply one event.
pub fn apply(event: &WorkbenchEvent, view: &ViewStore, session: &SessionTableRegistry) {
    match event {
        WorkbenchEvent::ScriptExecuted {
            script_id, outcome, ..
        } => {
            if let ScriptOutcome::Table { name, row_count } = outcome {
                tracing::info!(%script_id, table = %name, rows = row_count, "script produced a session table");
                session.add_table(SessionTable::named(name.clone(), *row_count));
            }
        }
        WorkbenchEvent::VariablePublished(published) => {
            tracing::info!(table = %published.published_name, rows = published.rows, "variable published");
            session.add_table(SessionTable {
                id: published.published_name.clone(),
                name: published.published_name.clone(),
                row_count: published.rows,
                created_at: Utc::now(),
                kind: TableKind::Table,
            });
        }
        WorkbenchEvent::DatasetOpened { name } => {
            view.set_active_dataset_id(Some(name.clone()));
            view.set_active_view(ActiveView::Data);
        }
        WorkbenchEvent::ToolSelected(analysis) => {
            view.set_active_analysis_type(*analysis);
            view.set_active_view(ActiveView::Stats);
        }
    }
}
