// End-to-end behavior of secrets loading and namespace injection

use saveus_settings::{
    load_config, load_secrets, ConfigError, ConfigLoader, Environment, SecretsError,
    SecretsStatus, Settings,
};
use serde_json::json;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_secrets(dir: &Path, contents: &str) {
    fs::write(dir.join("secrets.json"), contents).unwrap();
}

#[test]
fn test_well_formed_document_becomes_readable_settings() {
    let dir = TempDir::new().unwrap();
    write_secrets(dir.path(), r#"{"A": 1, "B": "x"}"#);

    let config = load_config(dir.path(), &Environment::default()).unwrap();

    assert_eq!(config.secrets.status, SecretsStatus::Loaded { keys: 2 });
    assert_eq!(config.secrets.document.get("A"), Some(&json!(1)));
    assert_eq!(config.secrets.document.get("B"), Some(&json!("x")));
    assert_eq!(config.namespace.get("A"), Some(&json!(1)));
    assert_eq!(config.namespace.get("B"), Some(&json!("x")));
    assert_eq!(config.namespace.get_as::<i64>("A").unwrap(), Some(1));
    assert!(config.overridden.is_empty());
}

#[test]
fn test_missing_file_does_not_fail() {
    let dir = TempDir::new().unwrap();

    let config = load_config(dir.path(), &Environment::default()).unwrap();

    assert_eq!(config.secrets.status, SecretsStatus::Missing);
    assert!(config.secrets.document.is_empty());
    assert!(config.overridden.is_empty());
    assert_eq!(config.settings, Settings::with_base_dir(dir.path()));
}

#[test]
fn test_malformed_file_does_not_fail() {
    let dir = TempDir::new().unwrap();
    write_secrets(dir.path(), "{\"SECRET_KEY\": \"abc\",}");

    let config = load_config(dir.path(), &Environment::default()).unwrap();

    match config.secrets.status {
        SecretsStatus::Malformed { ref detail } => {
            assert!(detail.contains("line 1"), "detail was: {detail}");
        }
        ref other => panic!("Expected Malformed status, got {other:?}"),
    }
    assert!(config.secrets.document.is_empty());
    assert!(!config.namespace.contains("SECRET_KEY"));
    assert!(config.settings.secret_key.is_none());
}

#[test]
fn test_document_overrides_static_setting() {
    let dir = TempDir::new().unwrap();
    write_secrets(dir.path(), r#"{"DEBUG": true}"#);

    let config = load_config(dir.path(), &Environment::default()).unwrap();

    assert_eq!(config.namespace.get("DEBUG"), Some(&json!(true)));
    assert!(config.settings.debug);
    assert_eq!(config.overridden, vec!["DEBUG".to_string()]);
}

#[test]
fn test_nested_document_value_replaces_whole_setting() {
    let dir = TempDir::new().unwrap();
    write_secrets(
        dir.path(),
        r#"{"DATABASES": {"default": {"NAME": "saveus_prod", "PASSWORD": "pw", "PORT": "3307"}}}"#,
    );

    let config = load_config(dir.path(), &Environment::default()).unwrap();
    let db = config.settings.default_database().unwrap();

    assert_eq!(db.name, "saveus_prod");
    assert_eq!(db.port, 3307);
    assert_eq!(db.password.as_ref().map(|p| p.expose()), Some("pw"));
    // fields the document omits fall back to defaults
    assert_eq!(db.engine, "django.db.backends.mysql");
    assert_eq!(db.user, "admin");
}

#[test]
fn test_social_providers_come_from_document() {
    let dir = TempDir::new().unwrap();
    write_secrets(
        dir.path(),
        r#"{"SOCIALACCOUNT_PROVIDERS": {"kakao": {"APP": {"client_id": "cid", "secret": "s"}}}}"#,
    );

    let config = load_config(dir.path(), &Environment::default()).unwrap();

    assert_eq!(
        config.settings.socialaccount_providers.get("kakao"),
        Some(&json!({"APP": {"client_id": "cid", "secret": "s"}}))
    );
}

#[test]
fn test_unknown_keys_stay_in_namespace() {
    let dir = TempDir::new().unwrap();
    write_secrets(dir.path(), r#"{"ODSAY_API_KEY": "k", "kakao map": [1, 2]}"#);

    let config = load_config(dir.path(), &Environment::default()).unwrap();

    assert_eq!(config.namespace.get("ODSAY_API_KEY"), Some(&json!("k")));
    assert_eq!(config.namespace.get("kakao map"), Some(&json!([1, 2])));
}

#[test]
fn test_injection_follows_document_order() {
    let dir = TempDir::new().unwrap();
    write_secrets(dir.path(), r#"{"ZZZ": 1, "AAA": 2, "MMM": 3}"#);

    let config = load_config(dir.path(), &Environment::default()).unwrap();
    let injected: Vec<_> = config
        .namespace
        .keys()
        .filter(|k| ["ZZZ", "AAA", "MMM"].contains(k))
        .collect();

    assert_eq!(injected, vec!["ZZZ", "AAA", "MMM"]);
}

#[test]
fn test_missing_signing_key_is_not_a_load_error() {
    let dir = TempDir::new().unwrap();
    let env = Environment::from_pairs([("PATH", "/usr/bin")]);

    let config = load_config(dir.path(), &env).unwrap();

    assert!(config.settings.signing_key().is_none());
    assert!(config.settings.simple_jwt.signing_key.is_none());
    assert!(matches!(
        config.settings.require_signing_key(),
        Err(ConfigError::MissingSigningKey)
    ));
}

#[test]
fn test_signing_key_from_process_environment() {
    let dir = TempDir::new().unwrap();

    temp_env::with_var("SECRET_KEY", Some("from-env"), || {
        let config = load_config(dir.path(), &Environment::from_process()).unwrap();
        assert_eq!(config.settings.require_signing_key().unwrap().expose(), "from-env");
    });

    temp_env::with_var_unset("SECRET_KEY", || {
        let config = load_config(dir.path(), &Environment::from_process()).unwrap();
        assert!(config.settings.signing_key().is_none());
    });
}

#[test]
fn test_signing_key_not_taken_from_document() {
    let dir = TempDir::new().unwrap();
    write_secrets(dir.path(), r#"{"SECRET_KEY": "django-secret"}"#);

    let config = load_config(dir.path(), &Environment::default()).unwrap();

    assert_eq!(
        config.settings.secret_key.as_ref().map(|k| k.expose()),
        Some("django-secret")
    );
    assert!(config.settings.signing_key().is_none());
}

#[test]
fn test_environment_overrides_document() {
    let dir = TempDir::new().unwrap();
    write_secrets(dir.path(), r#"{"DEBUG": true}"#);
    let env = Environment::from_pairs([("SAVEUS_DEBUG", "false")]);

    let config = load_config(dir.path(), &env).unwrap();

    assert!(!config.settings.debug);
    assert_eq!(config.namespace.get("DEBUG"), Some(&json!(true)));
}

#[test]
fn test_loading_twice_is_identical() {
    let dir = TempDir::new().unwrap();
    write_secrets(dir.path(), r#"{"B": [1, {"c": null}], "A": 1.5, "DEBUG": true}"#);
    let env = Environment::from_pairs([("SECRET_KEY", "k")]);

    let first = load_config(dir.path(), &env).unwrap();
    let second = load_config(dir.path(), &env).unwrap();

    assert_eq!(first.secrets, second.secrets);
    assert_eq!(first.namespace, second.namespace);
    assert_eq!(first.settings, second.settings);
}

#[test]
fn test_non_object_document_aborts_loading() {
    let dir = TempDir::new().unwrap();
    write_secrets(dir.path(), r#""just a string""#);

    let err = load_config(dir.path(), &Environment::default()).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<SecretsError>(),
        Some(SecretsError::NotAnObject { found: "string", .. })
    ));
}

#[test]
fn test_unreadable_secrets_path_aborts_loading() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("secrets.json")).unwrap();

    let err = load_config(dir.path(), &Environment::default()).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<SecretsError>(),
        Some(SecretsError::Io { .. })
    ));
}

#[test]
fn test_invalid_document_settings_fail_validation() {
    let dir = TempDir::new().unwrap();
    write_secrets(
        dir.path(),
        r#"{"CORS_ALLOWED_ORIGINS": ["https://jiyoung.pythonanywhere.comhttp://localhost:8080"]}"#,
    );

    let err = load_config(dir.path(), &Environment::default()).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::InvalidOrigin { .. })
    ));
}

#[test]
fn test_load_secrets_directly_matches_loader() {
    let dir = TempDir::new().unwrap();
    write_secrets(dir.path(), r#"{"X": "y"}"#);

    let direct = load_secrets(dir.path().join("secrets.json")).unwrap();
    let via_loader = ConfigLoader::new(dir.path())
        .load(&Environment::default())
        .unwrap()
        .secrets;

    assert_eq!(direct, via_loader);
}
