use saveus_settings::cli::{Cli, Commands};
use saveus_settings::infrastructure::logging::{LogFormat, RotationPolicy};
use clap::Parser;
use std::path::PathBuf;

#[test]
fn test_parse_show_defaults() {
    let cli = temp_env::with_var_unset("SAVEUS_BASE_DIR", || {
        Cli::try_parse_from(["saveus-settings", "show"]).unwrap()
    });

    match cli.command {
        Commands::Show(args) => {
            assert!(args.key.is_none());
            assert!(!args.resolved);
        }
        _ => panic!("Wrong command"),
    }
    assert_eq!(cli.base_dir, PathBuf::from("."));
    assert!(!cli.json);
    assert!(!cli.no_dotenv);
    assert_eq!(cli.log_level, "warn");
    assert_eq!(cli.log_format, LogFormat::Pretty);
    assert!(cli.log_dir.is_none());
}

#[test]
fn test_parse_show_key_resolved() {
    let cli =
        Cli::try_parse_from(["saveus-settings", "show", "SIMPLE_JWT", "--resolved"]).unwrap();

    match cli.command {
        Commands::Show(args) => {
            assert_eq!(args.key.as_deref(), Some("SIMPLE_JWT"));
            assert!(args.resolved);
        }
        _ => panic!("Wrong command"),
    }
}

#[test]
fn test_parse_check_strict() {
    let cli = Cli::try_parse_from(["saveus-settings", "check", "--strict"]).unwrap();

    match cli.command {
        Commands::Check(args) => assert!(args.strict),
        _ => panic!("Wrong command"),
    }
}

#[test]
fn test_parse_secrets_overrides_only() {
    let cli = Cli::try_parse_from(["saveus-settings", "secrets", "--overrides-only"]).unwrap();

    match cli.command {
        Commands::Secrets(args) => assert!(args.overrides_only),
        _ => panic!("Wrong command"),
    }
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from([
        "saveus-settings",
        "check",
        "--json",
        "--base-dir",
        "/srv/saveus",
        "--no-dotenv",
        "--log-level",
        "debug",
        "--log-format",
        "json",
        "--log-dir",
        "/var/log/saveus",
        "--log-rotation",
        "hourly",
    ])
    .unwrap();

    assert!(cli.json);
    assert!(cli.no_dotenv);
    assert_eq!(cli.base_dir, PathBuf::from("/srv/saveus"));

    let log = cli.log_config();
    assert_eq!(log.level, "debug");
    assert_eq!(log.format, LogFormat::Json);
    assert_eq!(log.log_dir, Some(PathBuf::from("/var/log/saveus")));
    assert_eq!(log.rotation, RotationPolicy::Hourly);

    let ctx = cli.context();
    assert!(ctx.json);
    assert!(!ctx.dotenv);
    assert_eq!(ctx.base_dir, PathBuf::from("/srv/saveus"));
}

#[test]
fn test_base_dir_from_environment() {
    let cli = temp_env::with_var("SAVEUS_BASE_DIR", Some("/opt/saveus"), || {
        Cli::try_parse_from(["saveus-settings", "secrets"]).unwrap()
    });

    assert_eq!(cli.base_dir, PathBuf::from("/opt/saveus"));
}

#[test]
fn test_invalid_arguments_rejected() {
    assert!(Cli::try_parse_from(["saveus-settings"]).is_err());
    assert!(Cli::try_parse_from(["saveus-settings", "deploy"]).is_err());
    assert!(Cli::try_parse_from(["saveus-settings", "show", "--log-format", "xml"]).is_err());
    assert!(Cli::try_parse_from(["saveus-settings", "check", "--strict", "extra"]).is_err());
}
