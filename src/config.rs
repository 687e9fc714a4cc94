use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use chrono::FixedOffset;
use thiserror::Error;
use tracing::info;

use crate::projector::ScheduleProjector;

pub const UTC_OFFSET_VAR: &str = "COURSE_CALENDAR_UTC_OFFSET";
pub const HTTP_ADDR_VAR: &str = "COURSE_CALENDAR_HTTP_ADDR";
pub const CATALOG_VAR: &str = "COURSE_CALENDAR_CATALOG";
pub const SESSION_VAR: &str = "COURSE_CALENDAR_SESSION";

const DEFAULT_HTTP_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_SESSION_PATH: &str = "session.json";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid UTC offset '{0}' (expected e.g. +07:00)")]
    InvalidOffset(String),
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub utc_offset: FixedOffset,
    pub http_addr: SocketAddr,
    pub catalog_path: Option<PathBuf>,
    pub session_path: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup; unset keys fall back to
    /// defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let utc_offset = match lookup(UTC_OFFSET_VAR) {
            Some(raw) => parse_utc_offset(&raw)?,
            None => {
                info!("{UTC_OFFSET_VAR} not set, using default: +07:00");
                ScheduleProjector::default().offset()
            }
        };

        let http_addr = lookup(HTTP_ADDR_VAR)
            .unwrap_or_else(|| {
                info!("{HTTP_ADDR_VAR} not set, using default: {DEFAULT_HTTP_ADDR}");
                DEFAULT_HTTP_ADDR.to_string()
            })
            .parse::<SocketAddr>()
            .map_err(|err| ConfigError::InvalidValue {
                key: HTTP_ADDR_VAR,
                message: err.to_string(),
            })?;

        let catalog_path = lookup(CATALOG_VAR)
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        let session_path = lookup(SESSION_VAR)
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_PATH));

        Ok(Self {
            utc_offset,
            http_addr,
            catalog_path,
            session_path,
        })
    }

    pub fn projector(&self) -> ScheduleProjector {
        ScheduleProjector::new(self.utc_offset)
    }
}

/// Parse `±HH:MM`, `±HHMM`, `±H` or `Z`/`UTC` into a fixed offset.
pub fn parse_utc_offset(raw: &str) -> Result<FixedOffset, ConfigError> {
    let invalid = || ConfigError::InvalidOffset(raw.to_string());
    let value = raw.trim();
    if value.eq_ignore_ascii_case("z") || value.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0).ok_or_else(invalid);
    }

    let (sign, rest) = match value.as_bytes().first() {
        Some(b'+') => (1, &value[1..]),
        Some(b'-') => (-1, &value[1..]),
        Some(_) => (1, value),
        None => return Err(invalid()),
    };
    if !rest.is_ascii() {
        return Err(invalid());
    }

    let (hours, minutes) = match rest.split_once(':') {
        Some((h, m)) => (h, m),
        None if rest.len() == 4 => rest.split_at(2),
        None => (rest, "0"),
    };
    let hours: i32 = hours.parse().map_err(|_| invalid())?;
    let minutes: i32 = minutes.parse().map_err(|_| invalid())?;
    if !(0..=23).contains(&hours) || !(0..=59).contains(&minutes) {
        return Err(invalid());
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}
