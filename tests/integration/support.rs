use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Index and mirror trees under one temporary directory
pub struct Workspace {
    _temp: TempDir,
    pub index: PathBuf,
    pub mirror: PathBuf,
}

impl Workspace {
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let index = temp.path().join("index");
        let mirror = temp.path().join("mirror");
        fs::create_dir_all(&index).unwrap();
        fs::create_dir_all(&mirror).unwrap();
        Self {
            _temp: temp,
            index,
            mirror,
        }
    }

    /// Write a record file at `relative` under the index, one JSON object per line
    pub fn record_file(&self, relative: &str, lines: &[&str]) -> PathBuf {
        write(&self.index.join(relative), lines.join("\n").as_bytes())
    }

    pub fn archive(&self, relative: &str) -> PathBuf {
        write(&self.mirror.join(relative), b"crate bytes")
    }
}

fn write(path: &Path, contents: &[u8]) -> PathBuf {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
    path.to_path_buf()
}

/// Every `*.metadata.json` file under `root`, relative and sorted
pub fn metadata_files(root: &Path) -> Vec<String> {
    let mut found: Vec<String> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_name().to_string_lossy().ends_with(".metadata.json"))
        .map(|entry| {
            entry
                .path()
                .strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();
    found.sort();
    found
}
