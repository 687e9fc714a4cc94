use std::collections::HashMap;
use std::path::PathBuf;

use chrono::FixedOffset;
use course_calendar::{AppConfig, ConfigError, parse_utc_offset};

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_apply_when_nothing_is_set() {
    let config = AppConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(config.utc_offset, FixedOffset::east_opt(7 * 3600).unwrap());
    assert_eq!(config.http_addr.to_string(), "0.0.0.0:3000");
    assert_eq!(config.catalog_path, None);
    assert_eq!(config.session_path, PathBuf::from("session.json"));
    assert_eq!(config.projector().offset(), config.utc_offset);
}

#[test]
fn values_are_read_from_the_lookup() {
    let config = AppConfig::from_lookup(lookup(&[
        ("COURSE_CALENDAR_UTC_OFFSET", "-05:30"),
        ("COURSE_CALENDAR_HTTP_ADDR", "127.0.0.1:8080"),
        ("COURSE_CALENDAR_CATALOG", "catalog.json"),
        ("COURSE_CALENDAR_SESSION", "/tmp/s.json"),
    ]))
    .unwrap();
    assert_eq!(
        config.utc_offset,
        FixedOffset::west_opt(5 * 3600 + 30 * 60).unwrap()
    );
    assert_eq!(config.http_addr.port(), 8080);
    assert_eq!(config.catalog_path, Some(PathBuf::from("catalog.json")));
    assert_eq!(config.session_path, PathBuf::from("/tmp/s.json"));
}

#[test]
fn malformed_values_are_errors() {
    assert!(matches!(
        AppConfig::from_lookup(lookup(&[("COURSE_CALENDAR_HTTP_ADDR", "localhost")])),
        Err(ConfigError::InvalidValue { .. })
    ));
    assert!(matches!(
        AppConfig::from_lookup(lookup(&[("COURSE_CALENDAR_UTC_OFFSET", "+7h")])),
        Err(ConfigError::InvalidOffset(_))
    ));
}

#[test]
fn offsets_parse_in_several_spellings() {
    let plus_seven = FixedOffset::east_opt(7 * 3600).unwrap();
    assert_eq!(parse_utc_offset("+07:00").unwrap(), plus_seven);
    assert_eq!(parse_utc_offset("+0700").unwrap(), plus_seven);
    assert_eq!(parse_utc_offset("7").unwrap(), plus_seven);
    assert_eq!(parse_utc_offset("Z").unwrap(), FixedOffset::east_opt(0).unwrap());
    assert_eq!(
        parse_utc_offset("-03:30").unwrap(),
        FixedOffset::west_opt(3 * 3600 + 1800).unwrap()
    );
    assert!(parse_utc_offset("+25:00").is_err());
    assert!(parse_utc_offset("").is_err());
    assert!(matches!(
        parse_utc_offset("+1éa"),
        Err(ConfigError::InvalidOffset(raw)) if raw == "+1éa"
    ));
    assert!(parse_utc_offset("-0é0").is_err());
}
