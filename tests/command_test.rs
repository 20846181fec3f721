use memkv::command::{dispatch, Command, Reply};
use memkv::resp::Value as Wire;
use memkv::MemStore;

/// push one request through parse and dispatch, as the server does.
fn run(store: &MemStore, parts: Vec<Wire>) -> Wire {
    match Command::parse(&parts) {
        Ok(command) => dispatch(command, store),
        Err(err) => Reply::from(err),
    }
    .into_wire()
}

fn req(parts: &[&str]) -> Vec<Wire> {
    parts.iter().map(|s| Wire::from(*s)).collect()
}

fn ok() -> Wire {
    Wire::Simple("OK".to_owned())
}

#[test]
fn get_returns_the_value_after_set() {
    let store = MemStore::new();
    assert_eq!(run(&store, req(&["SET", "foo", "bar"])), ok());
    assert_eq!(run(&store, req(&["GET", "foo"])), Wire::Bulk("bar".to_owned()));
}

#[test]
fn rename_works() {
    let store = MemStore::new();
    assert_eq!(run(&store, req(&["SET", "foo", "bar"])), ok());
    assert_eq!(run(&store, req(&["RENAME", "foo", "baz"])), ok());
    assert_eq!(run(&store, req(&["GET", "baz"])), Wire::Bulk("bar".to_owned()));
    assert_eq!(run(&store, req(&["GET", "foo"])), Wire::Null);
}

#[test]
fn rename_of_non_existent_key_returns_an_error() {
    let store = MemStore::new();
    assert_eq!(
        run(&store, req(&["RENAME", "foo", "baz"])),
        Wire::Error("ERROR: NO_SUCH_KEY".to_owned())
    );
    // and the store is unchanged afterward.
    assert_eq!(run(&store, req(&["GET", "baz"])), Wire::Null);
}

#[test]
fn hset_and_hget() {
    let store = MemStore::new();
    assert_eq!(run(&store, req(&["HSET", "myhash1", "field1", "Hello"])), Wire::Int(1));
    assert_eq!(run(&store, req(&["HSET", "myhash1", "field2", "World"])), Wire::Int(1));
    assert_eq!(
        run(&store, req(&["HGET", "myhash1", "field1"])),
        Wire::Bulk("Hello".to_owned())
    );
    assert_eq!(
        run(&store, req(&["HGET", "myhash1", "field2"])),
        Wire::Bulk("World".to_owned())
    );
}

#[test]
fn hset_converts_numeric_hash_field_to_string() {
    let store = MemStore::new();
    let request = vec![
        Wire::from("HSET"),
        Wire::from("myhash"),
        Wire::Int(1),
        Wire::from("hello"),
    ];
    assert_eq!(run(&store, request), Wire::Int(1));
    assert_eq!(
        run(&store, req(&["HGET", "myhash", "1"])),
        Wire::Bulk("hello".to_owned())
    );
    // and the numeric form reads it back too.
    let numeric_read = vec![Wire::from("HGET"), Wire::from("myhash"), Wire::Int(1)];
    assert_eq!(run(&store, numeric_read), Wire::Bulk("hello".to_owned()));
}

#[test]
fn hset_on_a_string_key_reports_wrongtype_and_keeps_the_string() {
    let store = MemStore::new();
    assert_eq!(run(&store, req(&["SET", "k", "original"])), ok());
    assert_eq!(
        run(&store, req(&["HSET", "k", "f", "v"])),
        Wire::Error("ERROR: WRONGTYPE".to_owned())
    );
    assert_eq!(run(&store, req(&["GET", "k"])), Wire::Bulk("original".to_owned()));
}

#[test]
fn flushall_isolates_scenarios() {
    let store = MemStore::new();
    run(&store, req(&["SET", "foo", "bar"]));
    run(&store, req(&["HSET", "h", "f", "v"]));
    assert_eq!(run(&store, req(&["FLUSHALL"])), ok());
    assert_eq!(run(&store, req(&["GET", "foo"])), Wire::Null);
    assert_eq!(run(&store, req(&["HGET", "h", "f"])), Wire::Null);
    // reset leaves a store that behaves like a fresh one.
    assert!(store.is_empty().unwrap());
}

#[test]
fn protocol_errors_never_touch_the_store() {
    let store = MemStore::new();
    assert_eq!(
        run(&store, req(&["SET", "only-a-key"])),
        Wire::Error("ERROR: WRONG_ARITY".to_owned())
    );
    assert_eq!(
        run(&store, req(&["SUBSCRIBE", "chan"])),
        Wire::Error("ERROR: UNKNOWN_COMMAND".to_owned())
    );
    assert!(store.is_empty().unwrap());
}

#[test]
fn session_commands_are_acknowledged() {
    let store = MemStore::new();
    assert_eq!(
        run(&store, req(&["CLIENT", "SETINFO", "lib-name", "test"])),
        ok()
    );
}
