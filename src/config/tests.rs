use super::*;
use crate::matcher::MatchMode;
use serial_test::serial;
use std::env;
use std::net::IpAddr;
use std::path::PathBuf;

fn with_env_vars<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, value) in vars {
        unsafe { env::set_var(key, value) };
    }

    let result = f();

    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, _) in vars {
        unsafe { env::remove_var(key) };
    }

    result
}

fn clear_faqmatch_env() {
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    unsafe {
        env::remove_var("FAQMATCH_PORT");
        env::remove_var("FAQMATCH_BIND_ADDR");
        env::remove_var("FAQMATCH_DB_PATH");
        env::remove_var("FAQMATCH_MODE");
        env::remove_var("FAQMATCH_GEMINI_API_KEY");
        env::remove_var("FAQMATCH_GEMINI_BASE_URL");
        env::remove_var("FAQMATCH_EMBEDDING_MODEL");
        env::remove_var("FAQMATCH_SIMILARITY_THRESHOLD");
        env::remove_var("FAQMATCH_TOP_K");
        env::remove_var("FAQMATCH_EMBED_RETRIES");
        env::remove_var("FAQMATCH_EMBED_BACKOFF_MS");
        env::remove_var("FAQMATCH_EMBED_TIMEOUT_SECS");
    }
}

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.port, 3000);
    assert_eq!(
        config.bind_addr,
        IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1))
    );
    assert_eq!(config.db_path, PathBuf::from("./faq.db"));
    assert_eq!(config.mode, MatchMode::Semantic);
    assert!(config.gemini_api_key.is_none());
    assert_eq!(config.embedding_model, "embedding-001");
    assert_eq!(config.similarity_threshold, 0.70);
    assert_eq!(config.top_k, 3);
    assert_eq!(config.embed_retries, 2);
}

#[test]
fn test_socket_addr() {
    let config = Config::default();
    assert_eq!(config.socket_addr(), "127.0.0.1:3000");

    let config = Config {
        port: 8080,
        bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(0, 0, 0, 0)),
        ..Default::default()
    };
    assert_eq!(config.socket_addr(), "0.0.0.0:8080");
}

#[test]
#[serial]
fn test_from_env_with_defaults() {
    clear_faqmatch_env();

    let config = Config::from_env().expect("should parse with defaults");

    assert_eq!(config.port, 3000);
    assert_eq!(config.mode, MatchMode::Semantic);
}

#[test]
#[serial]
fn test_from_env_custom_port() {
    clear_faqmatch_env();

    with_env_vars(&[("FAQMATCH_PORT", "8080")], || {
        let config = Config::from_env().expect("should parse");
        assert_eq!(config.port, 8080);
    });
}

#[test]
#[serial]
fn test_from_env_literal_mode() {
    clear_faqmatch_env();

    with_env_vars(&[("FAQMATCH_MODE", "literal")], || {
        let config = Config::from_env().expect("should parse");
        assert_eq!(config.mode, MatchMode::Literal);
    });
}

#[test]
#[serial]
fn test_from_env_invalid_mode() {
    clear_faqmatch_env();

    with_env_vars(&[("FAQMATCH_MODE", "fuzzy")], || {
        let result = Config::from_env();
        assert!(result.is_err());

        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::InvalidMode { .. }));
        assert!(err.to_string().contains("fuzzy"));
    });
}

#[test]
#[serial]
fn test_invalid_port_zero() {
    clear_faqmatch_env();

    with_env_vars(&[("FAQMATCH_PORT", "0")], || {
        let result = Config::from_env();
        assert!(result.is_err());

        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort { .. }));
        assert!(err.to_string().contains("invalid port"));
    });
}

#[test]
#[serial]
fn test_invalid_port_not_number() {
    clear_faqmatch_env();

    with_env_vars(&[("FAQMATCH_PORT", "not_a_port")], || {
        let result = Config::from_env();
        assert!(result.is_err());
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::PortParseError { .. }
        ));
    });
}

#[test]
#[serial]
fn test_invalid_bind_addr() {
    clear_faqmatch_env();

    with_env_vars(&[("FAQMATCH_BIND_ADDR", "not.an.ip.address")], || {
        let result = Config::from_env();
        assert!(result.is_err());
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::InvalidBindAddr { .. }
        ));
    });
}

#[test]
#[serial]
fn test_threshold_override_and_bounds() {
    clear_faqmatch_env();

    with_env_vars(&[("FAQMATCH_SIMILARITY_THRESHOLD", "0.85")], || {
        let config = Config::from_env().expect("should parse");
        assert_eq!(config.similarity_threshold, 0.85);
    });

    with_env_vars(&[("FAQMATCH_SIMILARITY_THRESHOLD", "1.5")], || {
        let result = Config::from_env();
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::InvalidThreshold { .. }
        ));
    });

    with_env_vars(&[("FAQMATCH_SIMILARITY_THRESHOLD", "warm")], || {
        let result = Config::from_env();
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::InvalidThreshold { .. }
        ));
    });
}

#[test]
#[serial]
fn test_invalid_retries_uses_default() {
    clear_faqmatch_env();

    with_env_vars(&[("FAQMATCH_EMBED_RETRIES", "not_a_number")], || {
        let config = Config::from_env().expect("should parse with fallback");
        assert_eq!(config.embed_retries, 2);
    });
}

#[test]
fn test_validate_semantic_requires_api_key() {
    let config = Config {
        mode: MatchMode::Semantic,
        gemini_api_key: None,
        ..Default::default()
    };

    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::MissingEnvVar { .. }));
    assert!(err.to_string().contains("FAQMATCH_GEMINI_API_KEY"));
}

#[test]
fn test_validate_literal_mode_needs_no_key() {
    let config = Config {
        mode: MatchMode::Literal,
        gemini_api_key: None,
        ..Default::default()
    };

    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_rejects_zero_top_k() {
    let config = Config {
        mode: MatchMode::Literal,
        top_k: 0,
        ..Default::default()
    };

    assert!(matches!(
        config.validate().unwrap_err(),
        ConfigError::InvalidTopK { .. }
    ));
}

#[test]
#[serial]
fn test_full_config_parse() {
    clear_faqmatch_env();

    with_env_vars(
        &[
            ("FAQMATCH_PORT", "8080"),
            ("FAQMATCH_BIND_ADDR", "0.0.0.0"),
            ("FAQMATCH_DB_PATH", "/var/lib/faqmatch/faq.db"),
            ("FAQMATCH_MODE", "semantic"),
            ("FAQMATCH_GEMINI_API_KEY", "test-key"),
            ("FAQMATCH_GEMINI_BASE_URL", "http://localhost:9000"),
            ("FAQMATCH_EMBEDDING_MODEL", "embedding-002"),
            ("FAQMATCH_TOP_K", "5"),
            ("FAQMATCH_EMBED_BACKOFF_MS", "100"),
            ("FAQMATCH_EMBED_TIMEOUT_SECS", "5"),
        ],
        || {
            let config = Config::from_env().expect("should parse full config");
            config.validate().expect("should validate");

            assert_eq!(config.port, 8080);
            assert_eq!(config.db_path, PathBuf::from("/var/lib/faqmatch/faq.db"));
            assert_eq!(config.gemini_api_key.as_deref(), Some("test-key"));
            assert_eq!(config.gemini_base_url, "http://localhost:9000");
            assert_eq!(config.embedding_model, "embedding-002");
            assert_eq!(config.top_k, 5);
            assert_eq!(config.socket_addr(), "0.0.0.0:8080");

            let policy = config.retry_policy();
            assert_eq!(policy.max_retries, 2);
            assert_eq!(policy.backoff, std::time::Duration::from_millis(100));
            assert_eq!(policy.request_timeout, std::time::Duration::from_secs(5));
        },
    );
}

#[test]
fn test_error_messages_are_descriptive() {
    let err = ConfigError::InvalidPort {
        value: "0".to_string(),
    };
    assert!(err.to_string().contains("invalid port"));
    assert!(err.to_string().contains("1 and 65535"));

    let err = ConfigError::MissingEnvVar {
        name: "FAQMATCH_GEMINI_API_KEY",
    };
    assert!(err.to_string().contains("FAQMATCH_GEMINI_API_KEY"));
}
