use super::{PersistenceError, PersistenceResult, SessionStore};
use crate::session::Session;
use rusqlite::{Connection, OptionalExtension, params};
use std::sync::Mutex;

pub struct SqliteSessionStore {
    connection: Mutex<Connection>,
}

impl SqliteSessionStore {
    pub fn new<P: AsRef<std::path::Path>>(path: P) -> PersistenceResult<Self> {
        let connection = Connection::open(path)?;
        Self::initialize_schema(&connection)?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    pub fn in_memory() -> PersistenceResult<Self> {
        let connection = Connection::open_in_memory()?;
        Self::initialize_schema(&connection)?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    fn initialize_schema(connection: &Connection) -> PersistenceResult<()> {
        let ddl = r#"
            CREATE TABLE IF NOT EXISTS client_session (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                session_json TEXT NOT NULL
            );
        "#;
        connection.execute_batch(ddl)?;
        Ok(())
    }

    fn lock(&self) -> PersistenceResult<std::sync::MutexGuard<'_, Connection>> {
        self.connection
            .lock()
            .map_err(|_| PersistenceError::InvalidData("sqlite mutex poisoned".to_string()))
    }
}

impl SessionStore for SqliteSessionStore {
    fn save_session(&self, session: &Session) -> PersistenceResult<()> {
        let json = serde_json::to_string(session)?;
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM client_session", [])?;
        tx.execute(
            "INSERT INTO client_session (id, session_json) VALUES (1, ?1)",
            params![json],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn load_session(&self) -> PersistenceResult<Session> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT session_json FROM client_session WHERE id = 1")?;
        let stored: Option<String> = stmt.query_row([], |row| row.get(0)).optional()?;

        match stored {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Session::default()),
        }
    }
}
