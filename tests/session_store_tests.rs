use course_calendar::{
    JsonFileSessionStore, PersistenceError, Role, Session, SessionError, SessionStore,
};
use std::fs;
use tempfile::tempdir;

fn signed_in_session() -> Session {
    let mut session = Session::default();
    session.sign_in(Some("abc.def.ghi".to_string()), 7, Role::Student);
    session.cart.add(3);
    session.cart.add(3);
    session.cart.add(9);
    session
}

#[test]
fn missing_session_file_loads_empty_session() {
    let dir = tempdir().unwrap();
    let store = JsonFileSessionStore::new(dir.path().join("session.json"));
    let session = store.load_session().unwrap();
    assert_eq!(session, Session::default());
    assert!(!session.is_signed_in());
}

#[test]
fn json_store_saves_and_loads_session() {
    let dir = tempdir().unwrap();
    let store = JsonFileSessionStore::new(dir.path().join("session.json"));
    let session = signed_in_session();
    store.save_session(&session).unwrap();

    let loaded = store.load_session().unwrap();
    assert_eq!(loaded, session);
    assert_eq!(loaded.cart.quantity(3), 2);
    assert_eq!(loaded.cart.total_items(), 3);
    assert_eq!(loaded.bearer_header().as_deref(), Some("Bearer abc.def.ghi"));

    let raw = fs::read_to_string(store.path()).unwrap();
    assert!(raw.contains("\"role\": \"STUDENT\""));
}

#[test]
fn last_write_wins() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("session.json");
    let first = JsonFileSessionStore::new(&path);
    let second = JsonFileSessionStore::new(&path);

    first.save_session(&signed_in_session()).unwrap();
    let mut other = Session::default();
    other.sign_in(None, 100, Role::Teacher);
    second.save_session(&other).unwrap();

    assert_eq!(first.load_session().unwrap(), other);
}

#[test]
fn corrupt_session_file_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("session.json");
    fs::write(&path, "not json").unwrap();
    let err = JsonFileSessionStore::new(&path).load_session().unwrap_err();
    assert!(matches!(err, PersistenceError::Serialization(_)));
}

#[test]
fn sign_out_clears_everything() {
    let mut session = signed_in_session();
    session.sign_out();
    assert_eq!(session, Session::default());
    assert!(session.cart.is_empty());
    assert_eq!(session.bearer_header(), None);
}

#[test]
fn roles_parse_case_insensitively() {
    assert_eq!("teacher".parse::<Role>().unwrap(), Role::Teacher);
    assert_eq!(" ADMIN ".parse::<Role>().unwrap(), Role::Admin);
    assert_eq!(
        "janitor".parse::<Role>(),
        Err(SessionError::UnknownRole("janitor".to_string()))
    );
    assert_eq!(Role::Student.to_string(), "STUDENT");
}

#[cfg(feature = "sqlite")]
#[test]
fn sqlite_store_keeps_a_single_session() {
    use course_calendar::SqliteSessionStore;

    let dir = tempdir().unwrap();
    let store = SqliteSessionStore::new(dir.path().join("session.db")).unwrap();
    assert_eq!(store.load_session().unwrap(), Session::default());

    store.save_session(&signed_in_session()).unwrap();
    let mut teacher = Session::default();
    teacher.sign_in(None, 100, Role::Teacher);
    store.save_session(&teacher).unwrap();

    assert_eq!(store.load_session().unwrap(), teacher);
}
