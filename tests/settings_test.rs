use std::time::Duration;

use mooring::config::Settings;

#[test]
fn given_default_settings_when_looking_up_postgres_profile_then_profile_is_present() {
    let settings = Settings::default();

    let profile = settings.profile("postgres").expect("builtin profile");

    assert_eq!(profile.image, "postgres");
    assert_eq!(profile.tag, "16");
    assert_eq!(profile.service_port, 5432);
    assert_eq!(
        profile.env.get("POSTGRES_USER").map(String::as_str),
        Some("postgres")
    );
    assert!(profile.ready_log_line.is_some());
}

#[test]
fn given_unknown_name_when_looking_up_profile_then_returns_none() {
    let settings = Settings::default();

    assert!(settings.profile("redis").is_none());
}

#[test]
fn given_no_override_when_building_connect_options_then_timeouts_are_five_minutes() {
    let options = Settings::default().connect_options();

    assert_eq!(options.connect_timeout, Duration::from_secs(300));
    assert_eq!(options.max_wait, Duration::from_secs(300));
}

#[test]
fn given_no_override_when_reading_logging_settings_then_level_is_info_plain_format() {
    let settings = Settings::default();

    assert_eq!(settings.logging.level, "info");
    assert!(!settings.logging.enable_json);
}
