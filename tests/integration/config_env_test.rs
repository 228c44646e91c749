//! Environment-driven configuration
//!
//! These tests mutate process environment variables, so they run serially.

use forum_client::client::config::{
    Config, API_BASE_URL_VAR, REQUEST_TIMEOUT_VAR, TOKEN_VAR, VOTE_TIMEOUT_VAR,
};
use forum_client::shared::config::ConfigError;
use serial_test::serial;
use std::time::Duration;

fn clear_env() {
    for var in [API_BASE_URL_VAR, REQUEST_TIMEOUT_VAR, VOTE_TIMEOUT_VAR, TOKEN_VAR] {
        std::env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_from_env_defaults() {
    clear_env();

    let config = assert_ok!(Config::from_env());

    assert_eq!(config.app().api_base_url, "https://forum-api.dicoding.dev/v1");
    assert_eq!(config.app().request_timeout, Duration::from_secs(15));
    assert_eq!(config.app().vote_timeout, Duration::from_secs(10));
    assert!(config.token().is_none());
}

#[test]
#[serial]
fn test_from_env_overrides() {
    clear_env();
    std::env::set_var(API_BASE_URL_VAR, "http://localhost:5000/v1/");
    std::env::set_var(VOTE_TIMEOUT_VAR, "4");
    std::env::set_var(TOKEN_VAR, "token-from-env");

    let config = assert_ok!(Config::from_env());
    clear_env();

    assert_eq!(config.api_url("/threads"), "http://localhost:5000/v1/threads");
    assert_eq!(config.app().vote_timeout, Duration::from_secs(4));
    assert_eq!(config.token(), Some("token-from-env"));
}

#[test]
#[serial]
fn test_from_env_rejects_bad_values() {
    clear_env();
    std::env::set_var(REQUEST_TIMEOUT_VAR, "soon");
    let result = Config::from_env();
    clear_env();
    assert_err!(result, ConfigError::InvalidValue("FORUM_REQUEST_TIMEOUT_SECS", _));

    std::env::set_var(VOTE_TIMEOUT_VAR, "0");
    let result = Config::from_env();
    clear_env();
    assert_err!(result, ConfigError::InvalidValue("vote_timeout", _));

    std::env::set_var(API_BASE_URL_VAR, "forum.example");
    let result = Config::from_env();
    clear_env();
    assert_err!(result, ConfigError::InvalidUrl(_));
}
