use std::fs;
use std::time::Duration;

use gracile_app::platform::app::parse_command;
use gracile_app::platform::app::Command;
use gracile_app::platform::cli::{Cli, FormChoice};
use gracile_app::platform::config::{AppConfig, ConfigError};
use gracile_app::platform::logging::LogDestination;
use gracile_core::{FieldName, FormKind};
use tempfile::TempDir;

#[test]
fn missing_path_uses_defaults() {
    let config = AppConfig::load(None).unwrap();
    assert_eq!(config, AppConfig::default());
    assert_eq!(config.form_kind(), FormKind::AddSubscription);
    assert_eq!(config.log, LogDestination::File);
}

#[test]
fn ron_file_overrides_selected_fields() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("gracile.ron");
    fs::write(
        &path,
        r#"(
            base_url: "http://localhost:8080",
            form: Process,
            request_timeout_ms: 1500,
            log: Off,
        )"#,
    )
    .unwrap();

    let config = AppConfig::load(Some(path.as_path())).unwrap();
    assert_eq!(config.base_url, "http://localhost:8080");
    assert_eq!(config.form_kind(), FormKind::Process);
    assert_eq!(config.log, LogDestination::Off);

    let settings = config.submit_settings();
    assert_eq!(settings.request_timeout, Duration::from_millis(1500));
    assert_eq!(settings.max_bytes, AppConfig::default().max_reply_bytes);
}

#[test]
fn unreadable_and_invalid_files_are_errors() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("missing.ron");
    assert!(matches!(
        AppConfig::load(Some(missing.as_path())),
        Err(ConfigError::Read { .. })
    ));

    let broken = temp.path().join("broken.ron");
    fs::write(&broken, "(form: Nope)").unwrap();
    assert!(matches!(
        AppConfig::load(Some(broken.as_path())),
        Err(ConfigError::Parse { .. })
    ));
}

#[test]
fn cli_flags_win_over_config() {
    let cli = Cli {
        form: Some(FormChoice::Process),
        base_url: Some("http://cli.example.com".to_string()),
        rss_url: Some("http://example.com/feed".to_string()),
        ..Cli::default()
    };

    let config = AppConfig::default().with_overrides(&cli);
    assert_eq!(config.form, FormChoice::Process);
    assert_eq!(config.base_url, "http://cli.example.com");
    assert_eq!(
        cli.prefilled(),
        vec![(FieldName::RssUrl, "http://example.com/feed")]
    );
}

#[test]
fn session_commands_parse() {
    assert_eq!(
        parse_command("  set daily_amount  5 ").unwrap(),
        Some(Command::Set {
            field: FieldName::DailyAmount,
            value: "5".to_string()
        })
    );
    assert_eq!(parse_command("submit").unwrap(), Some(Command::Submit));
    assert_eq!(parse_command("").unwrap(), None);
    assert!(parse_command("set email a@b").is_err());
}
