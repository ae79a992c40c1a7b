//! End-to-end overlay tests against a recording in-memory store.
//!
//! These cover the cross-module contracts: the canonical directory/list
//! scenario, the exact synchronize replay order, and failure propagation
//! through `synchronize_all`.

use std::sync::Arc;

use anyhow::Result;

use lazykv_cache::{CacheDirectory, ListOverlay, Representative};
use lazykv_store::{MemoryStore, RecordingStore, StoreClient, StoreOp};
use lazykv_types::{CacheError, TypeTag, Value};

#[test]
fn test_directory_list_scenario() -> Result<()> {
    let store = Arc::new(RecordingStore::in_memory());
    let mut dir = CacheDirectory::new(store.clone());

    // Absent value synchronizes to a deleted remote key.
    dir.set("foo", Value::Absent)?;
    dir.synchronize_all()?;
    assert_eq!(store.inner().type_of("foo")?, TypeTag::None);

    // Replace with an unseeded list and buffer one append.
    dir.insert(
        "foo",
        Representative::List(ListOverlay::new(dir.store(), "foo")),
    );
    dir.get("foo")?
        .as_list_mut()
        .expect("list representative")
        .push_right("bar");
    dir.synchronize_all()?;
    assert_eq!(store.inner().list_contents("foo").unwrap(), vec!["bar"]);

    // Buffer more edits; the pop resolves locally without remote calls.
    store.take_ops();
    {
        let list = dir.get("foo")?.as_list_mut().expect("list representative");
        list.push_right("baz");
        list.push_left("foo");
        assert_eq!(list.pop_right()?, Some("baz".to_string()));
    }
    assert!(store.ops().is_empty(), "pop_right must not touch the store");

    dir.synchronize_all()?;
    assert_eq!(
        store.inner().list_contents("foo").unwrap(),
        vec!["foo", "bar"]
    );
    Ok(())
}

#[test]
fn test_synchronize_replay_order() -> Result<()> {
    let store = Arc::new(RecordingStore::in_memory());
    let mut overlay = ListOverlay::seeded(
        store.clone(),
        "l",
        vec!["s1".to_string(), "s2".to_string()],
    );

    overlay.remove_value("ghost", 1); // unresolved, defers to remote
    overlay.push_left("l1");
    overlay.push_left("l2");
    overlay.push_right("r1");
    overlay.synchronize()?;

    let key = |k: &str| k.to_string();
    assert_eq!(
        store.ops(),
        vec![
            // Snapshot flush: delete then right-push in snapshot order.
            StoreOp::Delete { key: key("l") },
            StoreOp::PushRight {
                key: key("l"),
                value: "s1".into()
            },
            StoreOp::PushRight {
                key: key("l"),
                value: "s2".into()
            },
            // Left-pushes in reverse buffer order, so "l2" (pushed last)
            // ends up at the remote head.
            StoreOp::PushLeft {
                key: key("l"),
                value: "l1".into()
            },
            StoreOp::PushLeft {
                key: key("l"),
                value: "l2".into()
            },
            // Right-pushes in buffer order.
            StoreOp::PushRight {
                key: key("l"),
                value: "r1".into()
            },
            // Removals last, regardless of when they were issued.
            StoreOp::RemoveByValue {
                key: key("l"),
                value: "ghost".into(),
                count: 1
            },
        ]
    );
    assert_eq!(
        store.inner().list_contents("l").unwrap(),
        vec!["l2", "l1", "s1", "s2", "r1"]
    );
    Ok(())
}

#[test]
fn test_synchronize_all_partial_flush_on_failure() -> Result<()> {
    let store = Arc::new(MemoryStore::new());
    // A scalar already lives where the second representative will push,
    // so its sync fails with a wrong-type protocol error.
    store.set("clash", "scalar")?;

    let mut dir = CacheDirectory::new(store.clone());
    dir.set("a", Value::from("1"))?;
    let mut clash = ListOverlay::new(dir.store(), "clash");
    clash.push_right("x");
    dir.insert("clash", Representative::List(clash));
    dir.set("z", Value::from("3"))?;

    let err = dir.synchronize_all().unwrap_err();
    assert!(matches!(err, CacheError::Store(_)));

    // The key before the failure is flushed; the one after is untouched.
    assert_eq!(store.get("a")?, Some("1".to_string()));
    assert_eq!(store.get("z")?, None);
    Ok(())
}

#[test]
fn test_materialized_list_round_trip_through_directory() -> Result<()> {
    let store = Arc::new(MemoryStore::new());
    let mut dir = CacheDirectory::new(store.clone());

    dir.set(
        "queue",
        Value::Sequence(vec!["a".to_string(), "b".to_string(), "c".to_string()]),
    )?;
    {
        let list = dir.get("queue")?.as_list_mut().expect("list representative");
        list.remove_value("b", 1);
        list.push_left("head");
    }
    dir.synchronize_all()?;
    assert_eq!(
        store.list_contents("queue").unwrap(),
        vec!["head", "a", "c"]
    );

    // Post-sync edits buffer fresh and flush coherently against the
    // retained snapshot.
    dir.get("queue")?
        .as_list_mut()
        .expect("list representative")
        .push_right("tail");
    dir.synchronize_all()?;
    assert_eq!(
        store.list_contents("queue").unwrap(),
        vec!["head", "a", "c", "tail"]
    );
    Ok(())
}
