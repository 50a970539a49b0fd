//! Panel controllers.
//!
//! Each panel owns its local state (loading flags, form fields, cached
//! backend responses) and reaches shared state through the stores and the
//! event bus it was handed by [`crate::Workbench`].

mod connection_form;
mod explorer;
mod grid;
mod script_lab;
mod stats;
mod toolkit;
mod variables;

pub use connection_form::ConnectionForm;
pub use explorer::{ExplorerPanel, SchemaNode};
pub use grid::DataGridPanel;
pub use script_lab::{RunMode, ScriptLab, SidebarMode};
pub use stats::StatsPanel;
pub use toolkit::ToolkitPanel;
pub use variables::{PollHandle, VariableExplorer};

// Empty-state text shown in place of a list.
pub const NO_CONNECTIONS: &str = "No connections found.";
pub const NO_TABLES: &str = "No tables found.";
pub const NO_SESSION_TABLES: &str = "No session tables. Run SQL to generate.";
pub const NO_PUBLISHED_TABLES: &str = "No tables published yet.";
pub const NO_VARIABLES: &str = "No active variables.";
