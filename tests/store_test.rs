use std::thread;

use memkv::{MemStore, Result, Store, StoreError, Value};

#[test]
fn the_string_scenario() -> Result<()> {
    let store = MemStore::new();
    store.set("foo".to_owned(), "bar".to_owned())?;
    assert_eq!(store.get("foo")?, Some(Value::Str("bar".to_owned())));

    store.rename("foo", "baz".to_owned())?;
    assert_eq!(store.get("baz")?, Some(Value::Str("bar".to_owned())));
    assert_eq!(store.get("foo")?, None);

    match store.rename("foo", "baz".to_owned()) {
        Err(StoreError::NoSuchKey) => {}
        other => panic!("expected NoSuchKey, got {:?}", other),
    }
    // the failed rename must not have disturbed anything.
    assert_eq!(store.get("baz")?, Some(Value::Str("bar".to_owned())));
    Ok(())
}

#[test]
fn the_hash_scenario() -> Result<()> {
    let store = MemStore::new();
    store.hset("myhash1".to_owned(), "field1".to_owned(), "Hello".to_owned())?;
    store.hset("myhash1".to_owned(), "field2".to_owned(), "World".to_owned())?;
    assert_eq!(store.hget("myhash1", "field1")?, Some("Hello".to_owned()));
    assert_eq!(store.hget("myhash1", "field2")?, Some("World".to_owned()));
    Ok(())
}

#[test]
fn clones_share_one_key_space() -> Result<()> {
    let store = MemStore::new();
    let other = store.clone();
    store.set("shared".to_owned(), "yes".to_owned())?;
    assert_eq!(other.get("shared")?, Some(Value::Str("yes".to_owned())));
    other.flush_all()?;
    assert_eq!(store.get("shared")?, None);
    Ok(())
}

/// Two threads race to rename the same source; the move is a single
/// critical section, so exactly one of them can win.
#[test]
fn racing_renames_have_exactly_one_winner() -> Result<()> {
    for _ in 0..64 {
        let store = MemStore::new();
        store.set("src".to_owned(), "prize".to_owned())?;
        let contenders: Vec<_> = ["a", "b"]
            .iter()
            .map(|dest| {
                let store = store.clone();
                let dest = dest.to_string();
                thread::spawn(move || store.rename("src", dest))
            })
            .collect();
        let outcomes: Vec<Result<()>> = contenders
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect();
        let winners = outcomes.iter().filter(|o| o.is_ok()).count();
        assert_eq!(winners, 1, "outcomes: {:?}", outcomes);
        assert!(outcomes.iter().any(|o| match o {
            Err(StoreError::NoSuchKey) => true,
            _ => false,
        }));
        // the prize moved exactly once and the source is gone.
        assert_eq!(store.get("src")?, None);
        let landed = [store.get("a")?, store.get("b")?]
            .iter()
            .filter(|v| v.is_some())
            .count();
        assert_eq!(landed, 1);
    }
    Ok(())
}

/// Concurrent writers to the same hash never lose each other's fields.
#[test]
fn concurrent_hset_keeps_every_field() -> Result<()> {
    let store = MemStore::new();
    let writers: Vec<_> = (0..8)
        .map(|w| {
            let store = store.clone();
            thread::spawn(move || -> Result<()> {
                for i in 0..50 {
                    store.hset(
                        "hammered".to_owned(),
                        format!("w{}-{}", w, i),
                        "x".to_owned(),
                    )?;
                }
                Ok(())
            })
        })
        .collect();
    for handle in writers {
        handle.join().unwrap()?;
    }
    for w in 0..8 {
        for i in 0..50 {
            let field = format!("w{}-{}", w, i);
            assert_eq!(store.hget("hammered", &field)?, Some("x".to_owned()));
        }
    }
    Ok(())
}

#[test]
fn flush_under_concurrent_writes_leaves_a_consistent_store() -> Result<()> {
    let store = MemStore::new();
    let writers: Vec<_> = (0..4)
        .map(|w| {
            let store = store.clone();
            thread::spawn(move || -> Result<()> {
                for i in 0..100 {
                    store.set(format!("k{}-{}", w, i), "v".to_owned())?;
                }
                Ok(())
            })
        })
        .collect();
    let flusher = {
        let store = store.clone();
        thread::spawn(move || -> Result<()> {
            for _ in 0..10 {
                store.flush_all()?;
            }
            Ok(())
        })
    };
    for handle in writers {
        handle.join().unwrap()?;
    }
    flusher.join().unwrap()?;
    // after the dust settles a final flush leaves nothing behind.
    store.flush_all()?;
    assert!(store.is_empty()?);
    Ok(())
}
