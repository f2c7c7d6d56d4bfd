use clap::{CommandFactory, Parser};
use cratelink::config::CratelinkConfig;
use cratelink::error::Error;
use cratelink::tooling::cli::{Cli, CliContext, Commands};
use std::path::PathBuf;

use crate::integration::support::Workspace;

#[test]
fn parse_valid_command_matrix() {
    let cases: Vec<Vec<&str>> = vec![
        vec!["cratelink"],
        vec!["cratelink", "link"],
        vec!["cratelink", "shard"],
        vec!["cratelink", "--dry-run"],
        vec!["cratelink", "--index-dir", "./index", "--mirror-dir", "./mirror"],
        vec!["cratelink", "link", "--threads", "8", "--log-path", "run.log"],
        vec!["cratelink", "shard", "--mirror-dir", "/srv/mirror", "--dry-run"],
        vec!["cratelink", "--archive-ext", "crate", "--log-level", "debug"],
        vec!["cratelink", "--log-format", "json", "--log-output", "stderr"],
        vec!["cratelink", "--config", "cratelink.toml"],
    ];

    for args in cases {
        let parsed = Cli::try_parse_from(args.clone());
        assert!(parsed.is_ok(), "expected valid parse for args: {args:?}");
    }
}

#[test]
fn parse_rejects_invalid_arguments() {
    assert!(Cli::try_parse_from(["cratelink", "--threads", "many"]).is_err());
    assert!(Cli::try_parse_from(["cratelink", "publish"]).is_err());
    assert!(Cli::try_parse_from(["cratelink", "--index-dir"]).is_err());
}

#[test]
fn help_lists_subcommands_and_flags() {
    let help = <Cli as CommandFactory>::command().render_long_help().to_string();
    for needle in ["link", "shard", "--index-dir", "--mirror-dir", "--threads", "--dry-run"] {
        assert!(help.contains(needle), "help is missing {needle}");
    }
}

#[test]
fn link_command_runs_against_configured_trees() {
    let ws = Workspace::new();
    ws.archive("foo-1.0.0.crate");
    ws.record_file("3/f/foo", &[r#"{"vers":"1.0.0"}"#]);

    let cli = Cli::try_parse_from([
        "cratelink",
        "--index-dir",
        ws.index.to_str().unwrap(),
        "--mirror-dir",
        ws.mirror.to_str().unwrap(),
        "--threads",
        "2",
    ])
    .unwrap();
    let mut config = CratelinkConfig::default();
    cli.apply_overrides(&mut config);
    assert_eq!(cli.command(), Commands::Link);

    CliContext::new(config).execute(cli.command()).unwrap();
    assert!(ws.mirror.join("foo-1.0.0.metadata.json").is_file());
}

#[test]
fn missing_mirror_aborts_before_work() {
    let ws = Workspace::new();
    ws.record_file("3/f/foo", &[r#"{"vers":"1.0.0"}"#]);
    let config = CratelinkConfig {
        index_dir: ws.index.clone(),
        mirror_dir: PathBuf::from("/nonexistent/cratelink/mirror"),
        ..CratelinkConfig::default()
    };

    let result = CliContext::new(config).execute(Commands::Link);
    match result {
        Err(Error::MissingDirectory { role, path }) => {
            assert_eq!(role, "Mirror");
            assert_eq!(path, PathBuf::from("/nonexistent/cratelink/mirror"));
        }
        other => panic!("expected missing mirror, got {other:?}"),
    }
}
