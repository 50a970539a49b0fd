//! Variable explorer: live Python variables and published tables.

use std::sync::Arc;
use std::time::Duration;

use dsw_gateway::{Backend, PublishRequest, PublishResponse, RuntimeVariable};
use dsw_state::{SessionTable, SessionTableRegistry, Store, Subscription};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use super::{NO_PUBLISHED_TABLES, NO_VARIABLES};
use crate::error::Result;
use crate::events::{EventBus, WorkbenchEvent};

/// Owns a polling task. Dropping the handle aborts the task.
#[derive(Debug)]
pub struct PollHandle {
    task: JoinHandle<()>,
}

impl PollHandle {
    /// Abort the task now.
    pub fn stop(self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Variable explorer controller.
pub struct VariableExplorer {
    backend: Arc<dyn Backend>,
    bus: EventBus,
    session: SessionTableRegistry,
    session_id: String,
    interval: Duration,
    variables: Store<Vec<RuntimeVariable>>,
    poll: Option<PollHandle>,
}

impl VariableExplorer {
    pub fn new(
        backend: Arc<dyn Backend>,
        bus: EventBus,
        session: SessionTableRegistry,
        session_id: impl Into<String>,
        interval: Duration,
    ) -> Self {
        Self {
            backend,
            bus,
            session,
            session_id: session_id.into(),
            interval,
            variables: Store::new(Vec::new()),
            poll: None,
        }
    }

    /// Start polling the kernel's variables. Must run inside a tokio runtime.
    ///
    /// The first poll happens one interval after mounting. Mounting twice
    /// keeps the existing task.
    pub fn mount(&mut self) {
        if self.poll.is_some() {
            return;
        }
        let backend = Arc::clone(&self.backend);
        let store = self.variables.clone();
        let session_id = self.session_id.clone();
        let period = self.interval;

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                match backend.python_variables(&session_id).await {
                    Ok(variables) => store.set(variables),
                    Err(e) => tracing::debug!(error = %e, "variable poll failed"),
                }
            }
        });
        tracing::debug!(interval = ?period, "variable polling started");
        self.poll = Some(PollHandle { task });
    }

    /// Stop polling.
    pub fn unmount(&mut self) {
        if self.poll.take().is_some() {
            tracing::debug!("variable polling stopped");
        }
    }

    pub fn is_polling(&self) -> bool {
        self.poll.as_ref().is_some_and(|p| !p.is_finished())
    }

    /// Fetch the variables once, outside the polling schedule.
    pub async fn refresh(&self) -> Result<Vec<RuntimeVariable>> {
        let variables = self.backend.python_variables(&self.session_id).await?;
        self.variables.set(variables.clone());
        Ok(variables)
    }

    /// Last polled variables.
    pub fn variables(&self) -> Vec<RuntimeVariable> {
        self.variables.get()
    }

    pub fn subscribe_variables(
        &self,
        listener: impl Fn(&Vec<RuntimeVariable>) + Send + Sync + 'static,
    ) -> Subscription {
        self.variables.subscribe(listener)
    }

    pub fn variables_placeholder(&self) -> Option<&'static str> {
        self.variables.with(Vec::is_empty).then_some(NO_VARIABLES)
    }

    /// Publish a variable as a SQL table, under `table_name` if given.
    ///
    /// The session table appears once the backend confirms the name.
    pub async fn publish(&self, var_name: &str, table_name: Option<String>) -> Result<PublishResponse> {
        let request = PublishRequest {
            session_id: self.session_id.clone(),
            var_name: var_name.to_string(),
            table_name,
        };
        match self.backend.publish_variable(&request).await {
            Ok(published) => {
                self.bus.publish(WorkbenchEvent::VariablePublished(published.clone()));
                Ok(published)
            }
            Err(e) => {
                tracing::warn!(%var_name, error = %e, "publish failed");
                Err(e.into())
            }
        }
    }

    /// Tables available to SQL, newest first.
    pub fn published_tables(&self) -> Vec<SessionTable> {
        self.session.tables()
    }

    pub fn published_placeholder(&self) -> Option<&'static str> {
        self.session.is_empty().then_some(NO_PUBLISHED_TABLES)
    }
}

impl Drop for VariableExplorer {
    fn drop(&mut self) {
        self.unmount();
    }
}
