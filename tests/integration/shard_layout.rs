use cratelink::organize::{organize, OrganizeOptions};
use cratelink::shard::{shard_mirror, ShardOptions};
use cratelink::types::ProcessingTally;

use crate::integration::support::{metadata_files, Workspace};

#[test]
fn shard_then_link_places_metadata_in_shards() {
    let ws = Workspace::new();
    ws.archive("serde-1.0.0.crate");
    ws.archive("tokio-1.0.0.crate");
    ws.record_file("se/rd/serde", &[r#"{"vers":"1.0.0"}"#]);
    ws.record_file("to/ki/tokio", &[r#"{"vers":"1.0.0"}"#]);

    let sharded = shard_mirror(&ShardOptions {
        mirror_root: ws.mirror.clone(),
        workers: 2,
        dry_run: false,
    })
    .unwrap();
    assert_eq!(sharded.moved, 2);
    assert!(ws.mirror.join("S/SE-SH/serde-1.0.0.crate").is_file());
    assert!(ws.mirror.join("T/TM-TP/tokio-1.0.0.crate").is_file());

    let report = organize(&OrganizeOptions {
        index_root: ws.index.clone(),
        mirror_root: ws.mirror.clone(),
        workers: 2,
        dry_run: false,
        archive_extension: "crate".to_string(),
    })
    .unwrap();

    assert_eq!(report.tally, ProcessingTally::new(2, 2));
    assert_eq!(
        metadata_files(&ws.mirror),
        vec![
            "S/SE-SH/serde-1.0.0.metadata.json",
            "T/TM-TP/tokio-1.0.0.metadata.json",
        ]
    );
}

#[test]
fn shard_leaves_existing_subdirectories_alone() {
    let ws = Workspace::new();
    ws.archive("S/SE-SH/serde-1.0.0.crate");
    ws.archive("anyhow-1.0.0.crate");

    let report = shard_mirror(&ShardOptions {
        mirror_root: ws.mirror.clone(),
        workers: 1,
        dry_run: false,
    })
    .unwrap();

    assert_eq!(report.total, 1);
    assert!(ws.mirror.join("S/SE-SH/serde-1.0.0.crate").is_file());
    assert!(ws.mirror.join("A/AM-AP/anyhow-1.0.0.crate").is_file());
}
