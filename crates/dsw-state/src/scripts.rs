//! Script registry - open SQL/Python buffers and the active one.
//!
//! # Invariants
//!
//! - Script ids are unique (random UUIDs).
//! - Default names are unique within the registry.
//! - Deleting the active script re-selects the first remaining script in
//!   list order, or nothing when the list is empty.
//!
//! `set_active_script` is unconditional: callers are expected to pass ids
//! they got from this registry.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::observable::{Store, Subscription};

const SQL_TEMPLATE: &str = "-- New Query\nSELECT * FROM loan_data_v2 LIMIT 10;";
const PYTHON_TEMPLATE: &str = "# New Script\nimport pandas as pd\n\nprint(\"Hello from Python\")";

/// Name suffixes are the last six digits of the creation timestamp.
const NAME_MODULUS: i64 = 1_000_000;

// =============================================================================
// LANGUAGE
// =============================================================================

/// Kernel a script runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptLanguage {
    Sql,
    Python,
}

impl ScriptLanguage {
    /// File extension used for default names.
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Sql => "sql",
            Self::Python => "py",
        }
    }

    /// Content a new buffer starts with.
    pub const fn template(&self) -> &'static str {
        match self {
            Self::Sql => SQL_TEMPLATE,
            Self::Python => PYTHON_TEMPLATE,
        }
    }

    /// Guess the language from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "sql" => Some(Self::Sql),
            "py" => Some(Self::Python),
            _ => None,
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Sql => "SQL",
            Self::Python => "Python",
        }
    }
}

impl fmt::Display for ScriptLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// SCRIPT
// =============================================================================

/// An editable script buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    pub id: String,
    pub name: String,
    pub language: ScriptLanguage,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Script registry slice of the UI state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptsState {
    pub scripts: Vec<Script>,
    pub active_script_id: Option<String>,
}

impl ScriptsState {
    /// The active script, if the active id resolves.
    pub fn active_script(&self) -> Option<&Script> {
        let id = self.active_script_id.as_deref()?;
        self.scripts.iter().find(|s| s.id == id)
    }

    fn unique_name(&self, language: ScriptLanguage, now: DateTime<Utc>) -> String {
        let mut suffix = now.timestamp_millis().rem_euclid(NAME_MODULUS);
        loop {
            let name = format!("script_{suffix:06}.{}", language.extension());
            if !self.scripts.iter().any(|s| s.name == name) {
                return name;
            }
            suffix = (suffix + 1) % NAME_MODULUS;
        }
    }
}

// =============================================================================
// STORE
// =============================================================================

/// Observable script registry.
#[derive(Debug, Clone)]
pub struct ScriptRegistry {
    store: Store<ScriptsState>,
}

impl ScriptRegistry {
    /// Create an empty registry with no active script.
    pub fn create() -> Self {
        Self::create_with(Vec::new())
    }

    /// Create a registry holding `scripts`; the first one becomes active.
    pub fn create_with(scripts: Vec<Script>) -> Self {
        let active_script_id = scripts.first().map(|s| s.id.clone());
        Self {
            store: Store::new(ScriptsState {
                scripts,
                active_script_id,
            }),
        }
    }

    pub fn dispose(&self) {
        self.store.dispose();
    }

    pub fn state(&self) -> ScriptsState {
        self.store.get()
    }

    pub fn subscribe(&self, listener: impl Fn(&ScriptsState) + Send + Sync + 'static) -> Subscription {
        self.store.subscribe(listener)
    }

    /// All scripts in list order.
    pub fn scripts(&self) -> Vec<Script> {
        self.store.with(|s| s.scripts.clone())
    }

    pub fn script(&self, id: &str) -> Option<Script> {
        self.store
            .with(|s| s.scripts.iter().find(|script| script.id == id).cloned())
    }

    pub fn active_script_id(&self) -> Option<String> {
        self.store.with(|s| s.active_script_id.clone())
    }

    pub fn active_script(&self) -> Option<Script> {
        self.store.with(|s| s.active_script().cloned())
    }

    /// Language of the active script.
    pub fn active_language(&self) -> Option<ScriptLanguage> {
        self.store.with(|s| s.active_script().map(|script| script.language))
    }

    /// Open a new buffer seeded with the language template and make it active.
    ///
    /// Returns the new script's id.
    pub fn add_script(&self, language: ScriptLanguage) -> String {
        let id = Uuid::new_v4().simple().to_string();
        let now = Utc::now();
        self.store.update(|s| {
            let script = Script {
                id: id.clone(),
                name: s.unique_name(language, now),
                language,
                content: language.template().to_string(),
                created_at: now,
            };
            tracing::debug!(script_id = %script.id, name = %script.name, "script added");
            s.scripts.push(script);
            s.active_script_id = Some(id.clone());
        });
        id
    }

    /// Replace the content of a script. Returns `false` if the id is unknown.
    pub fn update_script(&self, id: &str, content: impl Into<String>) -> bool {
        let content = content.into();
        self.store.update(|s| match s.scripts.iter_mut().find(|script| script.id == id) {
            Some(script) => {
                script.content = content;
                true
            }
            None => false,
        })
    }

    /// Focus a script. The id is not checked against the list.
    pub fn set_active_script(&self, id: impl Into<String>) {
        let id = id.into();
        self.store.update(|s| s.active_script_id = Some(id));
    }

    /// Remove a script. Returns `false` if the id is unknown.
    pub fn delete_script(&self, id: &str) -> bool {
        self.store.update(|s| {
            let before = s.scripts.len();
            s.scripts.retain(|script| script.id != id);
            if s.active_script_id.as_deref() == Some(id) {
                s.active_script_id = s.scripts.first().map(|script| script.id.clone());
            }
            s.scripts.len() != before
        })
    }
}

impl Default for ScriptRegistry {
    fn default() -> Self {
        Self::create()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_script_activates_and_seeds_template() {
        let registry = ScriptRegistry::create();
        let id = registry.add_script(ScriptLanguage::Sql);

        let script = registry.active_script().unwrap();
        assert_eq!(script.id, id);
        assert_eq!(script.language, ScriptLanguage::Sql);
        assert!(script.content.starts_with("-- New Query"));
        assert!(script.name.starts_with("script_"));
        assert!(script.name.ends_with(".sql"));
    }

    #[test]
    fn test_names_stay_unique_within_one_millisecond() {
        let registry = ScriptRegistry::create();
        for _ in 0..50 {
            registry.add_script(ScriptLanguage::Python);
        }
        let mut names: Vec<String> = registry.scripts().into_iter().map(|s| s.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 50);
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let registry = ScriptRegistry::create();
        let id = registry.add_script(ScriptLanguage::Sql);
        let before = registry.state();

        assert!(!registry.update_script("missing", "SELECT 1"));
        assert_eq!(registry.state(), before);
        assert_eq!(registry.active_script_id().as_deref(), Some(id.as_str()));
    }

    #[test]
    fn test_update_does_not_change_active() {
        let registry = ScriptRegistry::create();
        let first = registry.add_script(ScriptLanguage::Sql);
        let second = registry.add_script(ScriptLanguage::Sql);

        assert!(registry.update_script(&first, "SELECT 2"));
        assert_eq!(registry.active_script_id(), Some(second));
        assert_eq!(registry.script(&first).unwrap().content, "SELECT 2");
    }

    #[test]
    fn test_delete_inactive_keeps_active() {
        let registry = ScriptRegistry::create();
        let first = registry.add_script(ScriptLanguage::Sql);
        let second = registry.add_script(ScriptLanguage::Sql);

        assert!(registry.delete_script(&first));
        assert_eq!(registry.active_script_id(), Some(second));
    }

    #[test]
    fn test_set_active_is_unconditional() {
        let registry = ScriptRegistry::create();
        registry.set_active_script("ghost");
        assert_eq!(registry.active_script_id().as_deref(), Some("ghost"));
        assert!(registry.active_script().is_none());
    }

    #[test]
    fn test_language_from_extension() {
        assert_eq!(ScriptLanguage::from_extension("PY"), Some(ScriptLanguage::Python));
        assert_eq!(ScriptLanguage::from_extension("sql"), Some(ScriptLanguage::Sql));
        assert_eq!(ScriptLanguage::from_extension("txt"), None);
    }
}
