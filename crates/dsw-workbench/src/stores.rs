//! The store bundle handed to panels.

use chrono::Utc;
use dsw_state::{
    LayoutStore, Script, ScriptLanguage, ScriptRegistry, SessionTable, SessionTableRegistry, Tab,
    TabKind, TabRegistry, ViewStore, DEFAULT_DATASET_ID,
};
use uuid::Uuid;

use crate::settings::Settings;

/// Every UI store, constructed together and disposed together.
#[derive(Debug, Clone)]
pub struct Stores {
    pub layout: LayoutStore,
    pub view: ViewStore,
    pub scripts: ScriptRegistry,
    pub session: SessionTableRegistry,
    pub tabs: TabRegistry,
}

impl Stores {
    /// Empty stores with default layout and view.
    pub fn create() -> Self {
        Self {
            layout: LayoutStore::create(),
            view: ViewStore::create(),
            scripts: ScriptRegistry::create(),
            session: SessionTableRegistry::create(),
            tabs: TabRegistry::create(),
        }
    }

    /// Default stores seeded with the sample script, session table and grid tab.
    pub fn with_demo_content() -> Self {
        Self {
            scripts: ScriptRegistry::create_with(vec![demo_script()]),
            session: SessionTableRegistry::create_with(vec![demo_session_table()]),
            tabs: TabRegistry::create_with(vec![demo_tab()]),
            ..Self::create()
        }
    }

    /// Stores laid out and seeded according to `settings`.
    pub fn from_settings(settings: &Settings) -> Self {
        let base = if settings.demo.seed_demo_content {
            Self::with_demo_content()
        } else {
            Self::create()
        };
        Self {
            layout: LayoutStore::create_with(
                settings.layout.initial_state(),
                settings.layout.limits,
            ),
            ..base
        }
    }

    /// Dispose every store.
    pub fn dispose(&self) {
        self.layout.dispose();
        self.view.dispose();
        self.scripts.dispose();
        self.session.dispose();
        self.tabs.dispose();
    }
}

impl Default for Stores {
    fn default() -> Self {
        Self::create()
    }
}

fn demo_script() -> Script {
    Script {
        id: Uuid::new_v4().simple().to_string(),
        name: "analysis_v1.sql".to_string(),
        language: ScriptLanguage::Sql,
        content: format!("SELECT * FROM {DEFAULT_DATASET_ID} WHERE grade = 'A' LIMIT 100;"),
        created_at: Utc::now(),
    }
}

fn demo_session_table() -> SessionTable {
    SessionTable {
        id: "result_init".to_string(),
        ..SessionTable::named("analysis_result_v1", 1500)
    }
}

fn demo_tab() -> Tab {
    Tab {
        id: Uuid::new_v4().to_string(),
        kind: TabKind::Grid,
        title: DEFAULT_DATASET_ID.to_string(),
        data: Some(serde_json::json!({ "datasetId": DEFAULT_DATASET_ID })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_is_empty() {
        let stores = Stores::create();
        assert!(stores.scripts.scripts().is_empty());
        assert!(stores.session.is_empty());
        assert!(stores.tabs.tabs().is_empty());
    }

    #[test]
    fn test_demo_content_is_active() {
        let stores = Stores::with_demo_content();

        let script = stores.scripts.active_script().unwrap();
        assert_eq!(script.name, "analysis_v1.sql");
        assert_eq!(stores.session.tables()[0].name, "analysis_result_v1");
        assert_eq!(stores.tabs.active_tab().unwrap().title, "loan_data_v2");
    }

    #[test]
    fn test_from_settings_applies_layout_and_demo_flag() {
        let mut settings = Settings::default();
        settings.demo.seed_demo_content = false;
        settings.layout.left_width = 5000.0;

        let stores = Stores::from_settings(&settings);

        assert!(stores.scripts.scripts().is_empty());
        assert_eq!(stores.layout.state().left_width, settings.layout.limits.max_side_width);
    }

    #[test]
    fn test_from_settings_with_inverted_limits() {
        let settings: Settings = toml::from_str(
            r#"
            [layout.limits]
            max_side_width = 150.0
            min_bottom_height = nan
            "#,
        )
        .unwrap();

        let stores = Stores::from_settings(&settings);

        let limits = stores.layout.limits();
        assert_eq!((limits.min_side_width, limits.max_side_width), (150.0, 180.0));
        assert_eq!(limits.min_bottom_height, 80.0);
        stores.layout.resize_left(-1000.0);
        assert_eq!(stores.layout.state().left_width, 150.0);
    }

    #[test]
    fn test_bundles_are_independent() {
        let a = Stores::create();
        let b = Stores::create();
        a.scripts.add_script(ScriptLanguage::Sql);
        assert!(b.scripts.scripts().is_empty());
    }
}
