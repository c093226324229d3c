//! Tests for settings file loading

use peopledir_common::config::{Settings, DEFAULT_BIND_ADDR};
use peopledir_common::Error;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

#[test]
fn test_load_full_config_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
bind_addr = "0.0.0.0:9000"
database_path = "/tmp/people.db"
db_max_connections = 3
log_level = "debug"

[api]
age_url = "http://localhost:1/age"
gender_url = "http://localhost:1/gender"
nation_url = "http://localhost:1/nation"
timeout_secs = 5
"#
    )
    .unwrap();

    let settings = Settings::load(Some(file.path())).unwrap();

    assert_eq!(settings.bind_addr, "0.0.0.0:9000");
    assert_eq!(settings.database_path, PathBuf::from("/tmp/people.db"));
    assert_eq!(settings.db_max_connections, 3);
    assert_eq!(settings.log_level, "debug");
    assert_eq!(settings.api.gender_url, "http://localhost:1/gender");
    assert_eq!(settings.api.timeout_secs, 5);
}

#[test]
fn test_load_partial_config_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[api]\ntimeout_secs = 2").unwrap();

    let settings = Settings::load(Some(file.path())).unwrap();

    assert_eq!(settings.bind_addr, DEFAULT_BIND_ADDR);
    assert_eq!(settings.api.timeout_secs, 2);
    assert_eq!(settings.api.nation_url, "https://api.nationalize.io/");
}

#[test]
fn test_missing_explicit_file_is_error() {
    let result = Settings::load(Some(Path::new("/nonexistent/peopledir.toml")));
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_invalid_toml_is_error() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "bind_addr = ").unwrap();

    let result = Settings::load(Some(file.path()));
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_unknown_key_is_error() {
    let result = Settings::from_toml_str("listen = \"x\"\n");
    assert!(matches!(result, Err(Error::Config(_))));
}
