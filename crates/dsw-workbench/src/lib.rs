//! Application layer of the DataSnail workbench.
//!
//! Wires the UI stores from `dsw-state` to the backend from `dsw-gateway`:
//!
//! - [`Stores`]: every store, built and disposed together
//! - [`EventBus`] / [`WorkbenchEvent`]: what panels announce
//! - [`Coordinator`]: the one place events become cross-store writes
//! - [`panels`]: explorer, connection form, grid, stats, script lab,
//!   variable explorer, toolkit
//! - [`Workbench`]: root object owning all of the above
//! - [`settings`]: TOML settings in the platform config folder

pub mod coordinator;
pub mod error;
pub mod events;
pub mod panels;
pub mod settings;
pub mod stores;
pub mod workbench;

pub use coordinator::Coordinator;
pub use error::{Result, WorkbenchError};
pub use events::{EventBus, ScriptOutcome, WorkbenchEvent};
pub use settings::{Settings, SqlExecution};
pub use stores::Stores;
pub use workbench::{MODEL_CENTER_PLACEHOLDER, MainContent, Workbench};
