//! Order editing against a file store, and how a running session reacts.

use dockorder_config::{OrderStore, TomlFileStore};
use dockorder_engine::{EngineError, Entry, GroupKey, OrderEditor, Region, Session};
use tempfile::tempdir;

use crate::common::{ScriptedBar, key, orders_file, tok, toks, write_orders};

#[test]
fn forget_removes_only_the_named_entry() {
    let dir = tempdir().unwrap();
    let path = orders_file(dir.path());
    write_orders(
        &path,
        &["a", "appindicator-kstatusnotifieritem-Steam", "b"],
        &[],
        &[],
    );

    let mut editor = OrderEditor::new(TomlFileStore::open(&path).unwrap());
    assert!(
        editor
            .forget(Region::Left, &Entry::GroupPlaceholder(key("Steam")))
            .unwrap()
    );
    assert!(
        !editor
            .forget(Region::Center, &Entry::Plain(tok("a")))
            .unwrap()
    );

    let reopened = TomlFileStore::open(&path).unwrap();
    assert_eq!(reopened.get(Region::Left), ["a", "b"]);
}

#[test]
fn moving_a_missing_entry_reports_its_region() {
    let dir = tempdir().unwrap();
    let path = orders_file(dir.path());
    write_orders(&path, &["a"], &[], &[]);

    let mut editor = OrderEditor::new(TomlFileStore::open(&path).unwrap());
    let err = editor
        .move_entry(&Entry::Plain(tok("zzz")), Region::Left, Region::Right, 0)
        .unwrap_err();

    assert!(matches!(
        err,
        EngineError::EntryNotFound { region: Region::Left, .. }
    ));
    assert_eq!(err.to_string(), "'zzz' is not in the left order");
}

#[test]
fn moving_a_group_carries_all_members() {
    let dir = tempdir().unwrap();
    let path = orders_file(dir.path());
    write_orders(
        &path,
        &["files"],
        &[],
        &["appindicator-kstatusnotifieritem-Chat", "power"],
    );

    let store = TomlFileStore::open(&path).unwrap();
    let mut bar = ScriptedBar::new()
        .grouped("chat-a", "Chat")
        .grouped("chat-b", "Chat")
        .preload(Region::Left, &["files"])
        .preload(Region::Right, &["chat-a", "chat-b", "power"]);
    let mut session = Session::start(store, &mut bar.live).unwrap();

    let mut editor = OrderEditor::new(TomlFileStore::open(&path).unwrap());
    let chat = Entry::GroupPlaceholder(GroupKey::new("Chat").unwrap());
    editor
        .move_entry(&chat, Region::Right, Region::Left, 0)
        .unwrap();
    assert_eq!(editor.region_of(&chat), Some(Region::Left));

    session.engine_mut().store_mut().reload().unwrap();
    session.settings_changed(&mut bar.live).unwrap();

    assert_eq!(
        bar.children(Region::Left),
        toks(&["chat-a", "chat-b", "files"])
    );
    assert_eq!(bar.children(Region::Right), toks(&["power"]));
}

#[test]
fn forgetting_a_docked_entry_returns_it_at_the_merge_end() {
    let dir = tempdir().unwrap();
    let path = orders_file(dir.path());
    write_orders(&path, &[], &[], &["tray", "volume", "power"]);

    let store = TomlFileStore::open(&path).unwrap();
    let mut bar = ScriptedBar::new().preload(Region::Right, &["tray", "volume", "power"]);
    let mut session = Session::start(store, &mut bar.live).unwrap();

    let mut editor = OrderEditor::new(TomlFileStore::open(&path).unwrap());
    editor
        .forget(Region::Right, &Entry::Plain(tok("power")))
        .unwrap();

    session.engine_mut().store_mut().reload().unwrap();
    session.settings_changed(&mut bar.live).unwrap();

    assert_eq!(
        bar.children(Region::Right),
        toks(&["power", "tray", "volume"])
    );
    assert_eq!(
        TomlFileStore::open(&path).unwrap().get(Region::Right),
        ["power", "tray", "volume"]
    );
}
