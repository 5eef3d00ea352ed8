use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Result;
use async_trait::async_trait;

use super::port::AnalysisCache;

/// Directory-backed cache: one JSON blob per key, file name derived by
/// sanitizing the key.
pub struct DirCache {
    root: PathBuf,
}

impl DirCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirCache { root: root.into() }
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        let sanitized: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.root.join(format!("{sanitized}.json"))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl AnalysisCache for DirCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        match std::fs::read(self.entry_path(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> Result<()> {
        std::fs::create_dir_all(&self.root)?;
        std::fs::write(self.entry_path(key), value)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    fn temp_root(name: &str) -> PathBuf {
        env::temp_dir().join(format!("exam_roster_analyzer_{name}"))
    }

    #[tokio::test]
    async fn test_dir_round_trip() {
        let root = temp_root("dir_cache_rt");
        let _ = fs::remove_dir_all(&root);

        let cache = DirCache::new(&root);
        assert_eq!(cache.get("excel-roster.xlsx-123").await.unwrap(), None);

        cache
            .put("excel-roster.xlsx-123", b"{}".to_vec())
            .await
            .unwrap();
        assert_eq!(
            cache.get("excel-roster.xlsx-123").await.unwrap(),
            Some(b"{}".to_vec())
        );

        fs::remove_dir_all(&root).unwrap();
    }

    #[tokio::test]
    async fn test_keys_with_odd_characters_map_to_safe_names() {
        let root = temp_root("dir_cache_names");
        let _ = fs::remove_dir_all(&root);

        let cache = DirCache::new(&root);
        cache
            .put("excel-ورقة التلاميذ.xlsx-9", b"x".to_vec())
            .await
            .unwrap();
        assert_eq!(
            cache.get("excel-ورقة التلاميذ.xlsx-9").await.unwrap(),
            Some(b"x".to_vec())
        );

        fs::remove_dir_all(&root).unwrap();
    }
}
