use super::*;

use std::sync::{Mutex, MutexGuard};

static ENV_LOCK: Mutex<()> = Mutex::new(());

fn env_lock() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// # Safety
/// Callers must hold `env_lock()` so no other test touches the env.
unsafe fn clear_staffdesk_env() {
    unsafe {
        std::env::remove_var("STAFFDESK_API_URL");
        std::env::remove_var("STAFFDESK_TOKEN_KEY");
        std::env::remove_var("STAFFDESK_REQUEST_TIMEOUT_SECS");
        std::env::remove_var("STAFFDESK_CONNECT_TIMEOUT_SECS");
    }
}

#[test]
fn from_env_uses_defaults() {
    let _env = env_lock();
    unsafe { clear_staffdesk_env() };

    let cfg = ClientConfig::from_env().unwrap();
    assert_eq!(cfg, ClientConfig::default());
    assert_eq!(cfg.api_base_url, "http://localhost:3009");
    assert_eq!(cfg.token_key, "token");
}

#[test]
fn from_env_parses_overrides() {
    let _env = env_lock();
    unsafe {
        clear_staffdesk_env();
        std::env::set_var("STAFFDESK_API_URL", "https://staff.example.test/api//");
        std::env::set_var("STAFFDESK_TOKEN_KEY", "staff_token");
        std::env::set_var("STAFFDESK_REQUEST_TIMEOUT_SECS", "5");
        std::env::set_var("STAFFDESK_CONNECT_TIMEOUT_SECS", "2");
    }

    let cfg = ClientConfig::from_env().unwrap();
    assert_eq!(cfg.api_base_url, "https://staff.example.test/api");
    assert_eq!(cfg.token_key, "staff_token");
    assert_eq!(cfg.request_timeout_secs, 5);
    assert_eq!(cfg.connect_timeout_secs, 2);

    unsafe { clear_staffdesk_env() };
}

#[test]
fn from_env_rejects_bad_timeout() {
    let _env = env_lock();
    unsafe {
        clear_staffdesk_env();
        std::env::set_var("STAFFDESK_REQUEST_TIMEOUT_SECS", "soon");
    }

    let err = ClientConfig::from_env().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidNumber { var: "STAFFDESK_REQUEST_TIMEOUT_SECS", .. }));

    unsafe { clear_staffdesk_env() };
}

#[test]
fn from_env_rejects_blank_token_key() {
    let _env = env_lock();
    unsafe {
        clear_staffdesk_env();
        std::env::set_var("STAFFDESK_TOKEN_KEY", "  ");
    }

    let err = ClientConfig::from_env().unwrap_err().to_string();
    assert!(err.contains("STAFFDESK_TOKEN_KEY"));

    unsafe { clear_staffdesk_env() };
}

#[test]
fn with_api_base_url_trims_trailing_slash() {
    let cfg = ClientConfig::default().with_api_base_url("http://10.0.0.5:3009/");
    assert_eq!(cfg.api_base_url, "http://10.0.0.5:3009");
}
