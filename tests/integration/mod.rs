//! Integration tests for linking index metadata to mirrored crates

mod cli_contracts;
mod link_pipeline;
mod shard_layout;
mod support;
