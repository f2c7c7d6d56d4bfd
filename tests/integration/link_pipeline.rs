use cratelink::organize::{organize, OrganizeOptions};
use cratelink::types::ProcessingTally;
use std::fs;

use crate::integration::support::{metadata_files, Workspace};

fn options(ws: &Workspace, dry_run: bool) -> OrganizeOptions {
    OrganizeOptions {
        index_root: ws.index.clone(),
        mirror_root: ws.mirror.clone(),
        workers: 3,
        dry_run,
        archive_extension: "crate".to_string(),
    }
}

#[test]
fn real_run_writes_metadata_beside_resolved_archive() {
    let ws = Workspace::new();
    ws.archive("foo-1.0.0.crate");
    ws.record_file("3/f/foo", &[r#"{"vers":"1.0.0"}"#, r#"{"vers":"2.0.0"}"#]);

    let report = organize(&options(&ws, false)).unwrap();

    assert_eq!(report.files, 1);
    assert_eq!(report.tally, ProcessingTally::new(1, 2));
    assert_eq!(metadata_files(&ws.mirror), vec!["foo-1.0.0.metadata.json"]);
    assert_eq!(
        fs::read_to_string(ws.mirror.join("foo-1.0.0.metadata.json")).unwrap(),
        "{\n  \"vers\": \"1.0.0\"\n}"
    );
}

#[test]
fn dry_run_reports_same_tally_and_writes_nothing() {
    let ws = Workspace::new();
    ws.archive("foo-1.0.0.crate");
    ws.record_file("3/f/foo", &[r#"{"vers":"1.0.0"}"#, r#"{"vers":"2.0.0"}"#]);

    let dry = organize(&options(&ws, true)).unwrap();
    assert!(metadata_files(&ws.mirror).is_empty());

    let real = organize(&options(&ws, false)).unwrap();
    assert_eq!(dry, real);
}

#[test]
fn sharded_mirror_gets_metadata_in_shard_directories() {
    let ws = Workspace::new();
    ws.archive("S/SE-SH/serde-1.0.0.crate");
    ws.archive("S/SE-SH/serde-1.0.1.crate");
    ws.archive("0-9/0-2/1password-0.1.0.crate");
    ws.record_file(
        "se/rd/serde",
        &[
            r#"{"name":"serde","vers":"1.0.0","deps":[],"cksum":"aa","features":{},"yanked":false}"#,
            r#"{"name":"serde","vers":"1.0.1","deps":[],"cksum":"bb","features":{},"yanked":true}"#,
        ],
    );
    ws.record_file("1p/as/1password", &[r#"{"name":"1password","vers":"0.1.0"}"#]);

    let report = organize(&options(&ws, false)).unwrap();

    assert_eq!(report.tally, ProcessingTally::new(3, 3));
    assert_eq!(
        metadata_files(&ws.mirror),
        vec![
            "0-9/0-2/1password-0.1.0.metadata.json",
            "S/SE-SH/serde-1.0.0.metadata.json",
            "S/SE-SH/serde-1.0.1.metadata.json",
        ]
    );
    let written = fs::read_to_string(ws.mirror.join("S/SE-SH/serde-1.0.1.metadata.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(value["yanked"], serde_json::Value::Bool(true));
    assert_eq!(value["cksum"], "bb");
}

#[test]
fn pruned_and_skipped_index_entries_are_not_processed() {
    let ws = Workspace::new();
    ws.archive("foo-1.0.0.crate");
    ws.record_file("config.json", &[r#"{"dl":"https://example.invalid","vers":"1.0.0"}"#]);
    ws.record_file(".git/objects/foo", &[r#"{"vers":"1.0.0"}"#]);
    ws.record_file("tools/build.py", &[r#"{"vers":"1.0.0"}"#]);
    ws.record_file("README.md", &[r#"{"vers":"1.0.0"}"#]);

    let report = organize(&options(&ws, true)).unwrap();

    assert_eq!(report.files, 0);
    assert_eq!(report.tally, ProcessingTally::default());
}

#[test]
fn rerunning_produces_identical_output() {
    let ws = Workspace::new();
    ws.archive("foo-1.0.0.crate");
    ws.archive("bar-0.2.0.crate");
    ws.record_file("3/f/foo", &[r#"{"vers":"1.0.0","features":{"std":[]},"name":"foo"}"#]);
    ws.record_file("3/b/bar", &[r#"{"vers":"0.2.0","name":"bar"}"#]);

    let first = organize(&options(&ws, false)).unwrap();
    let snapshot: Vec<Vec<u8>> = metadata_files(&ws.mirror)
        .iter()
        .map(|p| fs::read(ws.mirror.join(p)).unwrap())
        .collect();

    let second = organize(&options(&ws, false)).unwrap();
    let again: Vec<Vec<u8>> = metadata_files(&ws.mirror)
        .iter()
        .map(|p| fs::read(ws.mirror.join(p)).unwrap())
        .collect();

    assert_eq!(first, second);
    assert_eq!(snapshot, again);
}

#[test]
fn empty_index_is_a_successful_run() {
    let ws = Workspace::new();
    ws.archive("foo-1.0.0.crate");

    let report = organize(&options(&ws, false)).unwrap();

    assert_eq!(report.files, 0);
    assert_eq!(report.tally, ProcessingTally::default());
}
