//! Asset loading
//!
//! The one genuinely asynchronous concern: reading sample bytes off disk
//! before the presentation starts. A missing asset never stops the show;
//! the cue that needed it degrades to a logged no-op.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Errors while fetching asset bytes.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("asset not found: {path}")]
    NotFound { path: PathBuf },
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Which cue namespace an asset belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetKind {
    Music,
    Sfx,
}

/// One entry of a scene's audio manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetSpec {
    pub key: String,
    pub path: PathBuf,
    pub kind: AssetKind,
}

impl AssetSpec {
    pub fn music(key: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            key: key.into(),
            path: path.into(),
            kind: AssetKind::Music,
        }
    }

    pub fn sfx(key: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            key: key.into(),
            path: path.into(),
            kind: AssetKind::Sfx,
        }
    }
}

/// Source of sample bytes.
#[async_trait]
pub trait SampleSource {
    async fn load(&self, path: &Path) -> Result<Vec<u8>, AssetError>;
}

/// Reads samples from an asset directory.
pub struct FsSampleSource {
    base: PathBuf,
}

impl FsSampleSource {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }
}

#[async_trait]
impl SampleSource for FsSampleSource {
    async fn load(&self, path: &Path) -> Result<Vec<u8>, AssetError> {
        let full = self.base.join(path);
        tokio::fs::read(&full).await.map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                AssetError::NotFound { path: full.clone() }
            } else {
                AssetError::Io { path: full.clone(), source }
            }
        })
    }
}

/// Source that serves empty samples for every path; the headless player
/// uses it when no asset directory is around.
pub struct NullSampleSource;

#[async_trait]
impl SampleSource for NullSampleSource {
    async fn load(&self, _path: &Path) -> Result<Vec<u8>, AssetError> {
        Ok(Vec::new())
    }
}

/// Content fingerprint used by the dump tooling to spot duplicate or
/// changed samples.
pub fn fingerprint(bytes: &[u8]) -> String {
    format!("{:x}", md5::compute(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fs_source_reports_missing_assets() {
        let source = FsSampleSource::new("/definitely/not/here");
        let err = source.load(Path::new("track.ogg")).await.unwrap_err();
        assert!(matches!(err, AssetError::NotFound { .. }));
    }

    #[tokio::test]
    async fn null_source_always_answers() {
        let source = NullSampleSource;
        let bytes = source.load(Path::new("whatever.ogg")).await.unwrap();
        assert!(bytes.is_empty());
    }

    #[test]
    fn fingerprints_differ_by_content() {
        assert_ne!(fingerprint(b"abc"), fingerprint(b"abd"));
        assert_eq!(fingerprint(b"abc"), fingerprint(b"abc"));
    }
}
