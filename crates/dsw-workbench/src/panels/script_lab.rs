//! Script Lab: editor buffers and script execution.

use std::ops::Range;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use dsw_gateway::{Backend, GatewayError, PythonRunRequest, SqlRunRequest, NETWORK_ERROR_MESSAGE};
use dsw_state::{Script, ScriptLanguage, ScriptRegistry};
use rand::Rng;
use tracing::Instrument;

use crate::error::{Result, WorkbenchError};
use crate::events::{EventBus, ScriptOutcome, WorkbenchEvent};
use crate::settings::{ScriptSettings, SqlExecution};

/// Output shown when a Python run succeeds without printing.
pub const NO_OUTPUT: &str = "Done (No Output)";

/// Row count range of a simulated SQL result.
const SIMULATED_ROWS: Range<u64> = 100..5100;

/// What the Script Lab sidebar lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SidebarMode {
    #[default]
    Scripts,
    Variables,
}

impl SidebarMode {
    /// Mode matching a script language.
    pub const fn for_language(language: ScriptLanguage) -> Self {
        match language {
            ScriptLanguage::Python => Self::Variables,
            ScriptLanguage::Sql => Self::Scripts,
        }
    }
}

/// Whether a run covers the whole buffer or the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Full,
    Selection,
}

/// Script Lab controller.
pub struct ScriptLab {
    backend: Arc<dyn Backend>,
    bus: EventBus,
    scripts: ScriptRegistry,
    settings: ScriptSettings,
    session_id: String,
    sidebar: SidebarMode,
    synced_language: Option<ScriptLanguage>,
    selection: Option<Range<usize>>,
    output: Option<String>,
    executing: bool,
}

impl ScriptLab {
    pub fn new(
        backend: Arc<dyn Backend>,
        bus: EventBus,
        scripts: ScriptRegistry,
        settings: ScriptSettings,
        session_id: impl Into<String>,
    ) -> Self {
        let mut lab = Self {
            backend,
            bus,
            scripts,
            settings,
            session_id: session_id.into(),
            sidebar: SidebarMode::default(),
            synced_language: None,
            selection: None,
            output: None,
            executing: false,
        };
        lab.sync_sidebar();
        lab
    }

    // ------------------------------------------------------------------
    // Buffers
    // ------------------------------------------------------------------

    pub fn scripts(&self) -> Vec<Script> {
        self.scripts.scripts()
    }

    pub fn active_script(&self) -> Option<Script> {
        self.scripts.active_script()
    }

    /// Open a new buffer and focus it.
    pub fn add_script(&mut self, language: ScriptLanguage) -> String {
        let id = self.scripts.add_script(language);
        self.selection = None;
        self.sync_sidebar();
        id
    }

    /// Replace the active buffer's text.
    pub fn edit_active(&mut self, content: impl Into<String>) -> bool {
        let Some(id) = self.scripts.active_script_id() else {
            return false;
        };
        self.selection = None;
        self.scripts.update_script(&id, content)
    }

    pub fn select_script(&mut self, id: &str) {
        self.scripts.set_active_script(id);
        self.selection = None;
        self.sync_sidebar();
    }

    pub fn delete_script(&mut self, id: &str) -> bool {
        let removed = self.scripts.delete_script(id);
        self.sync_sidebar();
        removed
    }

    // ------------------------------------------------------------------
    // Sidebar and selection
    // ------------------------------------------------------------------

    /// Follow the active script's language when it changes.
    ///
    /// A manual [`Self::set_sidebar_mode`] sticks until the language changes.
    fn sync_sidebar(&mut self) {
        let language = self.scripts.active_language();
        if language != self.synced_language {
            if let Some(language) = language {
                self.sidebar = SidebarMode::for_language(language);
            }
            self.synced_language = language;
        }
    }

    pub fn sidebar_mode(&self) -> SidebarMode {
        self.sidebar
    }

    pub fn set_sidebar_mode(&mut self, mode: SidebarMode) {
        self.sidebar = mode;
    }

    /// Byte range selected in the editor, `None` to clear.
    pub fn set_selection(&mut self, selection: Option<Range<usize>>) {
        self.selection = selection;
    }

    fn selected_code<'a>(&self, content: &'a str) -> Option<&'a str> {
        self.selection
            .clone()
            .and_then(|range| content.get(range))
            .filter(|code| !code.trim().is_empty())
    }

    pub fn run_mode(&self) -> RunMode {
        match self.active_script() {
            Some(script) if self.selected_code(&script.content).is_some() => RunMode::Selection,
            _ => RunMode::Full,
        }
    }

    /// Label of the run button.
    pub fn run_label(&self) -> &'static str {
        if self.executing {
            return "Running...";
        }
        if self.run_mode() == RunMode::Selection {
            return "Run Selection";
        }
        match self.scripts.active_language() {
            Some(ScriptLanguage::Python) => "Run Python",
            _ => "Run SQL",
        }
    }

    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    pub fn is_executing(&self) -> bool {
        self.executing
    }

    pub fn set_sql_execution(&mut self, mode: SqlExecution) {
        self.settings.sql_execution = mode;
    }

    // ------------------------------------------------------------------
    // Execution
    // ------------------------------------------------------------------

    /// Run the selection, or the whole active buffer.
    ///
    /// Completed runs raise [`WorkbenchEvent::ScriptExecuted`] before this
    /// returns. Backend failures render into the output pane and are
    /// returned without an event.
    pub async fn run(&mut self) -> Result<ScriptOutcome> {
        let Some(script) = self.active_script() else {
            self.output = Some(WorkbenchError::NoActiveScript.user_message());
            return Err(WorkbenchError::NoActiveScript);
        };
        let code = self
            .selected_code(&script.content)
            .unwrap_or(&script.content)
            .to_string();

        let span = tracing::info_span!(
            "script_run",
            script_id = %script.id,
            language = %script.language,
            mode = ?self.run_mode(),
        );

        self.executing = true;
        self.output = None;
        let result = self.execute(script.language, code).instrument(span).await;
        self.executing = false;

        match result {
            Ok(outcome) => {
                self.output = Some(outcome.console_text());
                self.bus.publish(WorkbenchEvent::ScriptExecuted {
                    script_id: script.id,
                    language: script.language,
                    outcome: outcome.clone(),
                });
                Ok(outcome)
            }
            Err(e) => {
                self.output = Some(failure_text(&e));
                Err(e.into())
            }
        }
    }

    async fn execute(&self, language: ScriptLanguage, code: String) -> dsw_gateway::Result<ScriptOutcome> {
        match (language, self.settings.sql_execution) {
            (ScriptLanguage::Python, _) => self.run_python(code).await,
            (ScriptLanguage::Sql, SqlExecution::Backend) => self.run_sql(code).await,
            (ScriptLanguage::Sql, SqlExecution::Simulated) => {
                Ok(simulate_sql(self.settings.simulated_latency()).await)
            }
        }
    }

    async fn run_python(&self, code: String) -> dsw_gateway::Result<ScriptOutcome> {
        let request = PythonRunRequest {
            session_id: self.session_id.clone(),
            code,
        };
        let response = self.backend.run_python(&request).await?;
        if response.is_success() {
            tracing::info!(variables = response.variables.len(), "python run finished");
            let stdout = if response.stdout.is_empty() {
                NO_OUTPUT.to_string()
            } else {
                response.stdout
            };
            Ok(ScriptOutcome::Output(stdout))
        } else {
            let error = response.error.unwrap_or_default();
            tracing::info!(%error, "python run raised");
            Ok(ScriptOutcome::Failed(error))
        }
    }

    async fn run_sql(&self, sql: String) -> dsw_gateway::Result<ScriptOutcome> {
        let request = SqlRunRequest {
            session_id: self.session_id.clone(),
            sql,
            limit: self.settings.sql_row_limit,
        };
        let response = self.backend.run_sql(&request).await?;
        let outcome = ScriptOutcome::Table {
            name: result_table_name(),
            row_count: response.row_count(),
        };
        tracing::info!(?outcome, "sql run finished");
        Ok(outcome)
    }
}

/// Fabricate a SQL result locally after `latency`.
async fn simulate_sql(latency: Duration) -> ScriptOutcome {
    tokio::time::sleep(latency).await;
    let row_count = rand::thread_rng().gen_range(SIMULATED_ROWS);
    let outcome = ScriptOutcome::Table {
        name: result_table_name(),
        row_count,
    };
    tracing::info!(?outcome, "simulated sql run finished");
    outcome
}

/// `result_<YYYYMMDDHHMMSS>` in UTC.
fn result_table_name() -> String {
    format!("result_{}", Utc::now().format("%Y%m%d%H%M%S"))
}

fn failure_text(err: &GatewayError) -> String {
    if err.is_transport() {
        NETWORK_ERROR_MESSAGE.to_string()
    } else {
        format!("Error:\n{}", err.user_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sidebar_follows_language() {
        assert_eq!(SidebarMode::for_language(ScriptLanguage::Python), SidebarMode::Variables);
        assert_eq!(SidebarMode::for_language(ScriptLanguage::Sql), SidebarMode::Scripts);
    }

    #[test]
    fn test_result_table_name_shape() {
        let name = result_table_name();
        let stamp = name.strip_prefix("result_").unwrap();
        assert_eq!(stamp.len(), 14);
        assert!(stamp.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_failure_text() {
        let network = GatewayError::Network("connection refused".to_string());
        assert_eq!(failure_text(&network), "Network Error: Failed to reach backend");

        let status = GatewayError::Status {
            status: 400,
            detail: "Parser Error: near FORM".to_string(),
        };
        assert_eq!(failure_text(&status), "Error:\nParser Error: near FORM");
    }
}
