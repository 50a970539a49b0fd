use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use dsw_state::{
    NewTab, ScriptLanguage, ScriptRegistry, SessionTable, SessionTableRegistry, TabKind,
    TabRegistry, ViewStore,
};

#[test]
fn deleting_active_script_selects_first_remaining() {
    let registry = ScriptRegistry::create();
    let first = registry.add_script(ScriptLanguage::Sql);
    let second = registry.add_script(ScriptLanguage::Python);
    let third = registry.add_script(ScriptLanguage::Sql);
    registry.set_active_script(second.clone());

    assert!(registry.delete_script(&second));
    assert_eq!(registry.active_script_id(), Some(first.clone()));

    assert!(registry.delete_script(&first));
    assert_eq!(registry.active_script_id(), Some(third.clone()));

    assert!(registry.delete_script(&third));
    assert_eq!(registry.active_script_id(), None);
    assert!(registry.scripts().is_empty());
}

#[test]
fn closing_active_middle_tab_selects_last_remaining() {
    let tabs = TabRegistry::create();
    let _a = tabs.add_tab(NewTab::new(TabKind::Grid, "A"));
    let b = tabs.add_tab(NewTab::new(TabKind::Grid, "B"));
    let c = tabs.add_tab(NewTab::new(TabKind::Grid, "C"));
    tabs.set_active_tab(b.clone());

    tabs.close_tab(&b);

    assert_eq!(tabs.active_tab_id(), Some(c));
    let titles: Vec<String> = tabs.tabs().into_iter().map(|t| t.title).collect();
    assert_eq!(titles, vec!["A", "C"]);
}

#[test]
fn session_tables_are_newest_first() {
    let registry = SessionTableRegistry::create();
    registry.add_table(SessionTable::named("t1", 10));
    registry.add_table(SessionTable::named("t2", 20));

    let names: Vec<String> = registry.tables().into_iter().map(|t| t.name).collect();
    assert_eq!(names, vec!["t2", "t1"]);
}

#[test]
fn two_sql_scripts_have_distinct_ids_and_names() {
    let registry = ScriptRegistry::create();
    let a = registry.add_script(ScriptLanguage::Sql);
    let b = registry.add_script(ScriptLanguage::Sql);

    assert_ne!(a, b);
    let a = registry.script(&a).expect("first script");
    let b = registry.script(&b).expect("second script");
    assert_ne!(a.name, b.name);
}

#[test]
fn python_script_edit_keeps_identity() {
    let registry = ScriptRegistry::create();
    assert!(registry.active_script_id().is_none());

    let id = registry.add_script(ScriptLanguage::Python);
    let created = registry.active_script().expect("active script");
    assert_eq!(created.language, ScriptLanguage::Python);
    assert!(created.content.contains("import"));

    assert!(registry.update_script(&id, "x=1"));

    let edited = registry.script(&id).expect("edited script");
    assert_eq!(edited.content, "x=1");
    assert_eq!(edited.id, created.id);
    assert_eq!(edited.name, created.name);
    assert_eq!(edited.language, created.language);
}

#[test]
fn closing_first_of_two_tabs_leaves_second_active() {
    let tabs = TabRegistry::create();
    let t1 = tabs.add_tab(NewTab::new(TabKind::Grid, "t1"));
    let t2 = tabs.add_tab(NewTab::new(TabKind::Sql, "t2"));

    tabs.close_tab(&t1);

    let remaining = tabs.tabs();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].title, "t2");
    assert_eq!(tabs.active_tab_id(), Some(t2));
}

#[test]
fn stores_are_independent_instances() {
    let first = ViewStore::create();
    let second = ViewStore::create();

    first.set_active_dataset_id(Some("app_logs".to_string()));

    assert_eq!(second.active_dataset_id().as_deref(), Some("loan_data_v2"));
}

#[test]
fn subscriber_sees_each_table_once() {
    let registry = SessionTableRegistry::create();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let _sub = registry.subscribe(move |state| {
        let newest = state.tables.first().map(|t| t.name.clone());
        sink.lock().expect("sink").push(newest);
    });

    registry.add_table(SessionTable::named("a", 1));
    registry.add_table(SessionTable::named("b", 2));

    let seen = seen.lock().expect("seen").clone();
    assert_eq!(seen, vec![Some("a".to_string()), Some("b".to_string())]);
}

#[test]
fn disposed_registry_stops_notifying() {
    let registry = ScriptRegistry::create();
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let _sub = registry.subscribe(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    registry.add_script(ScriptLanguage::Sql);
    registry.dispose();
    registry.add_script(ScriptLanguage::Sql);

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(registry.scripts().len(), 2);
}
