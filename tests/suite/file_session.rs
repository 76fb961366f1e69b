//! Sessions backed by a TOML orders file on disk.

use std::fs;

use dockorder_config::{OrderStore, TomlFileStore};
use dockorder_engine::{Entry, OrderEditor, Region, Session};
use tempfile::tempdir;

use crate::common::{ScriptedBar, orders_file, tok, toks, write_orders};

#[test]
fn configured_order_survives_a_restart() {
    let dir = tempdir().unwrap();
    let path = orders_file(dir.path());

    let store = TomlFileStore::open(&path).unwrap();
    let mut bar = ScriptedBar::new();
    let mut session = Session::start(store, &mut bar.live).unwrap();
    for name in ["a", "b", "c"] {
        bar.dock(&mut session, name, Region::Left).unwrap();
    }
    session.end();

    let mut editor = OrderEditor::new(TomlFileStore::open(&path).unwrap());
    editor
        .move_entry(&Entry::Plain(tok("c")), Region::Left, Region::Left, 0)
        .unwrap();

    let store = TomlFileStore::open(&path).unwrap();
    let mut bar = ScriptedBar::new();
    let mut session = Session::start(store, &mut bar.live).unwrap();
    for name in ["b", "c", "a"] {
        bar.dock(&mut session, name, Region::Left).unwrap();
    }

    assert_eq!(bar.children(Region::Left), toks(&["c", "a", "b"]));
    assert_eq!(session.end().get(Region::Left), ["c", "a", "b"]);
}

#[test]
fn external_edit_moves_entry_across_regions() {
    let dir = tempdir().unwrap();
    let path = orders_file(dir.path());
    write_orders(&path, &["a", "b", "c"], &[], &[]);

    let store = TomlFileStore::open(&path).unwrap();
    let mut bar = ScriptedBar::new().preload(Region::Left, &["a", "b", "c"]);
    let mut session = Session::start(store, &mut bar.live).unwrap();

    let mut editor = OrderEditor::new(TomlFileStore::open(&path).unwrap());
    editor
        .move_entry(&Entry::Plain(tok("c")), Region::Left, Region::Center, 0)
        .unwrap();

    let reloaded = session.engine_mut().store_mut().reload().unwrap();
    assert_eq!(reloaded, [Region::Left, Region::Center]);

    let handled = session.settings_changed(&mut bar.live).unwrap();
    assert_eq!(handled, [Region::Left, Region::Center]);
    assert_eq!(bar.children(Region::Left), toks(&["a", "b"]));
    assert_eq!(bar.children(Region::Center), toks(&["c"]));
}

#[test]
fn own_writes_are_not_handled_twice() {
    let dir = tempdir().unwrap();
    let path = orders_file(dir.path());
    write_orders(&path, &["a"], &[], &[]);

    let store = TomlFileStore::open(&path).unwrap();
    let mut bar = ScriptedBar::new().preload(Region::Left, &["a"]);
    let mut session = Session::start(store, &mut bar.live).unwrap();

    bar.dock(&mut session, "x", Region::Left).unwrap();

    assert!(session.settings_changed(&mut bar.live).unwrap().is_empty());
    assert!(session.engine_mut().store_mut().reload().unwrap().is_empty());
    assert_eq!(bar.children(Region::Left), toks(&["a", "x"]));
}

#[test]
fn session_writes_keep_hand_written_comments() {
    let dir = tempdir().unwrap();
    let path = orders_file(dir.path());
    write_orders(&path, &["activities"], &["dateMenu"], &["quickSettings"]);

    let store = TomlFileStore::open(&path).unwrap();
    let mut bar = ScriptedBar::new()
        .grouped("nc-1", "Nextcloud")
        .preload(Region::Right, &["quickSettings"]);
    let mut session = Session::start(store, &mut bar.live).unwrap();
    bar.dock(&mut session, "nc-1", Region::Right).unwrap();
    session.end();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("# panel layout"));
    assert!(content.contains("center-box-order = [\"dateMenu\"]"));

    let reopened = TomlFileStore::open(&path).unwrap();
    assert_eq!(
        reopened.get(Region::Right),
        ["appindicator-kstatusnotifieritem-Nextcloud", "quickSettings"]
    );
}

#[test]
fn stale_entries_stay_in_the_file() {
    let dir = tempdir().unwrap();
    let path = orders_file(dir.path());
    write_orders(&path, &["gone", "a"], &[], &[]);

    let store = TomlFileStore::open(&path).unwrap();
    let mut bar = ScriptedBar::new().preload(Region::Left, &["a", "new"]);
    let session = Session::start(store, &mut bar.live).unwrap();

    assert_eq!(bar.children(Region::Left), toks(&["a", "new"]));
    assert_eq!(session.end().get(Region::Left), ["gone", "a", "new"]);
}
