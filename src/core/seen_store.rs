use crate::core::SeenStore;
use crate::utils::error::Result;
use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Line-delimited id file on local disk.
#[derive(Debug, Clone)]
pub struct FileSeenStore {
    path: PathBuf,
}

impl FileSeenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

pub fn parse_seen_ids(content: &str) -> HashSet<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn render_seen_ids(seen: &HashSet<String>) -> String {
    let mut ids: Vec<&String> = seen.iter().collect();
    ids.sort();

    let mut out = String::new();
    for id in ids {
        out.push_str(id);
        out.push('\n');
    }
    out
}

impl SeenStore for FileSeenStore {
    async fn load(&self) -> Result<HashSet<String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => {
                let seen = parse_seen_ids(&content);
                tracing::debug!("Loaded {} seen id(s) from {}", seen.len(), self.path.display());
                Ok(seen)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No seen-id file at {}, starting empty", self.path.display());
                Ok(HashSet::new())
            }
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                tracing::warn!(
                    "⚠️ Seen-id file {} is not valid UTF-8, treating as empty",
                    self.path.display()
                );
                Ok(HashSet::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, seen: &HashSet<String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        // 先寫暫存檔再 rename，避免中途中斷留下半個檔案
        let temp = self.temp_path();
        tokio::fs::write(&temp, render_seen_ids(seen)).await?;
        tokio::fs::rename(&temp, &self.path).await?;

        tracing::debug!("Saved {} seen id(s) to {}", seen.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileSeenStore::new(dir.path().join("seen_jobs.txt"));

        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = FileSeenStore::new(dir.path().join("seen_jobs.txt"));
        let seen: HashSet<String> = ["b".to_string(), "a".to_string()].into();

        store.save(&seen).await.unwrap();

        assert_eq!(store.load().await.unwrap(), seen);
        let content = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(content, "a\nb\n");
        assert!(!dir.path().join("seen_jobs.txt.tmp").exists());
    }

    #[tokio::test]
    async fn test_resave_of_loaded_set_is_byte_equivalent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("seen_jobs.txt");
        std::fs::write(&path, "job-2\njob-1\njob-3\n").unwrap();
        let store = FileSeenStore::new(&path);

        let loaded = store.load().await.unwrap();
        store.save(&loaded).await.unwrap();

        let mut before: Vec<&str> = vec!["job-2", "job-1", "job-3"];
        before.sort();
        let after = std::fs::read_to_string(&path).unwrap();
        let mut after_lines: Vec<&str> = after.lines().collect();
        after_lines.sort();
        assert_eq!(before, after_lines);
        assert!(after.ends_with('\n'));
    }

    #[tokio::test]
    async fn test_blank_lines_and_whitespace_ignored() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("seen_jobs.txt");
        std::fs::write(&path, "  abc123  \n\n\r\ndef456\r\n").unwrap();

        let seen = FileSeenStore::new(&path).load().await.unwrap();

        assert_eq!(seen.len(), 2);
        assert!(seen.contains("abc123"));
        assert!(seen.contains("def456"));
    }

    #[tokio::test]
    async fn test_invalid_utf8_treated_as_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("seen_jobs.txt");
        std::fs::write(&path, [0xff, 0xfe, 0x00, 0x41]).unwrap();

        assert!(FileSeenStore::new(&path).load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_creates_parent_dirs_and_replaces_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state").join("seen_jobs.txt");
        let store = FileSeenStore::new(&path);

        store.save(&["old".to_string()].into()).await.unwrap();
        store.save(&["new".to_string()].into()).await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new\n");
    }
}
