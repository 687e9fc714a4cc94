use super::{PersistenceError, PersistenceResult, SessionStore};
use crate::catalog::{CatalogError, CatalogSnapshot};
use crate::event::CalendarEvent;
use crate::session::Session;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub fn save_catalog_to_json<P: AsRef<Path>>(
    catalog: &CatalogSnapshot,
    path: P,
) -> PersistenceResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, catalog)?;
    Ok(())
}

pub fn load_catalog_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<CatalogSnapshot> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let catalog: CatalogSnapshot =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| {
            CatalogError::Payload {
                endpoint: "catalog",
                source,
            }
        })?;
    info!(
        path = %path.display(),
        courses = catalog.courses.len(),
        registrations = catalog.registrations.len(),
        "catalog loaded"
    );
    Ok(catalog)
}

pub fn save_events_to_json<P: AsRef<Path>>(
    events: &[CalendarEvent],
    path: P,
) -> PersistenceResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, events)?;
    Ok(())
}

#[derive(Serialize)]
struct EventCsvRecord<'a> {
    title: &'a str,
    start: String,
    end: String,
    all_day: bool,
}

impl<'a> From<&'a CalendarEvent> for EventCsvRecord<'a> {
    fn from(event: &'a CalendarEvent) -> Self {
        Self {
            title: &event.title,
            start: event.start.to_rfc3339(),
            end: event.end.to_rfc3339(),
            all_day: event.all_day,
        }
    }
}

pub fn save_events_to_csv<P: AsRef<Path>>(
    events: &[CalendarEvent],
    path: P,
) -> PersistenceResult<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for event in events {
        writer.serialize(EventCsvRecord::from(event))?;
    }
    writer.flush()?;
    Ok(())
}

/// Session kept as a pretty-printed JSON document on disk.
#[derive(Debug, Clone)]
pub struct JsonFileSessionStore {
    path: PathBuf,
}

impl JsonFileSessionStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for JsonFileSessionStore {
    fn save_session(&self, session: &Session) -> PersistenceResult<()> {
        let file = File::create(&self.path)?;
        serde_json::to_writer_pretty(file, session)?;
        Ok(())
    }

    /// A missing file is an empty session; a corrupt one is an error.
    fn load_session(&self) -> PersistenceResult<Session> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no stored session");
                return Ok(Session::default());
            }
            Err(err) => return Err(PersistenceError::Io(err)),
        };
        let session = serde_json::from_reader(BufReader::new(file))?;
        Ok(session)
    }
}
