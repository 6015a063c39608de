use super::load_config;
use super::settings::Settings;
use serial_test::serial;

#[test]
fn test_default_settings() {
    let settings = Settings::default();
    assert_eq!(settings.server.host, "127.0.0.1");
    assert_eq!(settings.server.port, 8080);
    assert_eq!(settings.cors.allowed_origin, "http://localhost:3000");
    assert_eq!(settings.store.base_url, "http://localhost:5000");
    assert_eq!(settings.store.request_timeout_secs, 10);
    assert!(settings.relay.route_by_booking);
}

#[test]
#[serial]
fn test_load_config_falls_back_to_defaults() {
    temp_env::with_vars_unset(["SERVER_HOST", "SERVER_PORT"], || {
        let settings = load_config().expect("load_config should succeed");
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.server.port, 8080);
        assert!(settings.relay.route_by_booking);
    });
}

#[test]
#[serial]
fn test_environment_overrides_server_settings() {
    temp_env::with_vars(
        [("SERVER_HOST", Some("0.0.0.0")), ("SERVER_PORT", Some("9091"))],
        || {
            let settings = load_config().expect("load_config should succeed");
            assert_eq!(settings.server.host, "0.0.0.0");
            assert_eq!(settings.server.port, 9091);
            // Untouched sections keep their defaults
            assert_eq!(settings.cors.allowed_origin, "http://localhost:3000");
        },
    );
}
