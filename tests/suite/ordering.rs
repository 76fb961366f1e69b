//! Ordering scenarios driven through a session and the insertion hook.

use dockorder_config::{MemoryStore, OrderStore};
use dockorder_engine::{LiveSet, Region, Session};

use crate::common::{ScriptedBar, tok, toks};

#[test]
fn entries_appearing_out_of_order_land_in_configured_slots() {
    let store = MemoryStore::new().with_order(Region::Left, ["a", "b", "c", "d"]);
    let mut bar = ScriptedBar::new();
    let mut session = Session::start(store, &mut bar.live).unwrap();

    bar.dock(&mut session, "c", Region::Left).unwrap();
    bar.dock(&mut session, "a", Region::Left).unwrap();
    bar.dock(&mut session, "d", Region::Left).unwrap();
    bar.dock(&mut session, "b", Region::Left).unwrap();

    assert_eq!(bar.children(Region::Left), toks(&["a", "b", "c", "d"]));
    assert_eq!(session.engine().apply_order(Region::Left, &mut bar.live), 0);
}

#[test]
fn insertion_skips_configured_but_absent_predecessors() {
    let store = MemoryStore::new().with_order(Region::Left, ["a", "b", "c", "d"]);
    let mut bar = ScriptedBar::new().preload(Region::Left, &["a"]);
    let mut session = Session::start(store, &mut bar.live).unwrap();

    let index = bar.dock(&mut session, "c", Region::Left).unwrap();

    assert_eq!(index, 1);
    assert_eq!(
        session
            .engine()
            .compute_restricted_valid_order(Region::Left, &bar.live),
        toks(&["a", "c"])
    );
}

#[test]
fn removed_entries_drop_out_of_the_visible_order_only() {
    let store = MemoryStore::new().with_order(Region::Left, ["a", "b", "c"]);
    let mut bar = ScriptedBar::new().preload(Region::Left, &["a", "b", "c"]);
    let mut session = Session::start(store, &mut bar.live).unwrap();

    bar.undock(&mut session, "b");

    let engine = session.engine();
    assert_eq!(
        engine.compute_restricted_valid_order(Region::Left, &bar.live),
        toks(&["a", "c"])
    );
    assert_eq!(engine.store().get(Region::Left), ["a", "b", "c"]);
}

#[test]
fn returning_entry_reclaims_its_slot() {
    let store = MemoryStore::new();
    let mut bar = ScriptedBar::new();
    let mut session = Session::start(store, &mut bar.live).unwrap();
    for name in ["a", "b", "c"] {
        bar.dock(&mut session, name, Region::Center).unwrap();
    }

    bar.undock(&mut session, "b");
    bar.dock(&mut session, "x", Region::Center).unwrap();
    bar.dock(&mut session, "b", Region::Center).unwrap();

    assert_eq!(bar.children(Region::Center), toks(&["a", "b", "c", "x"]));
}

#[test]
fn right_region_reproduces_dock_order() {
    let mut bar = ScriptedBar::new();
    let mut session = Session::start(MemoryStore::new(), &mut bar.live).unwrap();

    for name in ["x", "y", "z"] {
        let index = bar.dock(&mut session, name, Region::Right).unwrap();
        assert_eq!(index, 0);
    }

    let docked = bar.children(Region::Right);
    assert_eq!(
        session
            .engine()
            .compute_restricted_valid_order(Region::Right, &bar.live),
        docked
    );
    assert_eq!(session.engine().apply_order(Region::Right, &mut bar.live), 0);
    assert_eq!(session.engine().apply_order(Region::Right, &mut bar.live), 0);
    assert_eq!(bar.children(Region::Right), docked);
}

#[test]
fn right_region_grows_toward_the_center() {
    let store = MemoryStore::new().with_order(Region::Right, ["volume", "power"]);
    let mut bar = ScriptedBar::new().preload(Region::Right, &["volume", "power"]);
    let mut session = Session::start(store, &mut bar.live).unwrap();

    bar.dock(&mut session, "tray", Region::Right).unwrap();

    assert_eq!(
        bar.children(Region::Right),
        toks(&["tray", "volume", "power"])
    );
    assert_eq!(
        session.engine().store().get(Region::Right),
        ["tray", "volume", "power"]
    );
}

#[test]
fn same_token_in_two_regions_follows_its_live_region() {
    let store = MemoryStore::new()
        .with_order(Region::Left, ["a", "shared"])
        .with_order(Region::Center, ["shared", "b"]);
    let mut bar = ScriptedBar::new()
        .preload(Region::Left, &["a"])
        .preload(Region::Center, &["b", "shared"]);

    let session = Session::start(store, &mut bar.live).unwrap();
    let engine = session.engine();

    assert_eq!(bar.children(Region::Center), toks(&["shared", "b"]));
    assert_eq!(
        engine.compute_restricted_valid_order(Region::Left, &bar.live),
        toks(&["a"])
    );
    assert_eq!(
        engine.compute_valid_order(Region::Left, &bar.live),
        toks(&["a", "shared"])
    );
    assert_eq!(bar.live.region_of(&tok("shared")), Some(Region::Center));
}
