//! UI state stores for the DataSnail workbench.
//!
//! Each store owns one slice of UI state and is an explicitly constructed,
//! cloneable handle (`create()` / `dispose()`), not a process-wide singleton:
//!
//! - **LayoutStore**: panel visibility, panel sizes, full-screen save/restore
//! - **ViewStore**: active main view, selected dataset, analysis type
//! - **ScriptRegistry**: open SQL/Python buffers and the active one
//! - **SessionTableRegistry**: tables produced during the session
//! - **TabRegistry**: secondary tabs and the active one
//!
//! Stores never reference each other. Cross-store effects are applied by the
//! application layer, which subscribes to one store (or to domain events) and
//! calls into another.

pub mod layout;
pub mod observable;
pub mod scripts;
pub mod session;
pub mod tabs;
pub mod view;

pub use layout::{LayoutState, LayoutStore, PanelLimits, PanelVisibility};
pub use observable::{Listeners, Store, Subscription};
pub use scripts::{Script, ScriptLanguage, ScriptRegistry, ScriptsState};
pub use session::{SessionState, SessionTable, SessionTableRegistry, TableKind};
pub use tabs::{NewTab, Tab, TabKind, TabRegistry, TabsState};
pub use view::{ActiveView, AnalysisType, DEFAULT_DATASET_ID, ViewState, ViewStore};
