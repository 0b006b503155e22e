//! The post collection file: loading, backing up and rewriting it.

use crate::record::FeedRecord;
use std::{
    fs::{self, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;
use thiserror::Error;
use time::UtcDateTime;
use tracing::{debug, info};
use wishfeed_common::model::{
    ModelValidationError,
    post::{Feed, Post},
};

pub type Result<T, E = StoreError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Post collection {} does not exist", .0.display())]
    NotFound(PathBuf),
    #[error("Could not read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("Could not write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("Could not write backup {}: {source}", path.display())]
    Backup { path: PathBuf, source: io::Error },
    #[error("Post collection {} is not valid JSON: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Post #{index} is invalid: {source}")]
    InvalidPost {
        index: usize,
        source: ModelValidationError,
    },
}

/// A collection as read from disk, with the verbatim text kept for the backup.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct LoadedFeed {
    pub raw: String,
    pub feed: Feed,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct FeedStore {
    path: PathBuf,
}

impl FeedStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Feed> {
        self.load_raw().map(|loaded| loaded.feed)
    }

    pub fn load_raw(&self) -> Result<LoadedFeed> {
        let raw = fs::read_to_string(&self.path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                StoreError::NotFound(self.path.clone())
            } else {
                StoreError::Read {
                    path: self.path.clone(),
                    source,
                }
            }
        })?;

        let record: FeedRecord =
            serde_json::from_str(&raw).map_err(|source| StoreError::Json {
                path: self.path.clone(),
                source,
            })?;

        let posts = record
            .tweets
            .into_iter()
            .enumerate()
            .map(|(index, post)| {
                Post::try_from(post).map_err(|source| StoreError::InvalidPost { index, source })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(path = %self.path.display(), posts = posts.len(), "Loaded post collection");

        Ok(LoadedFeed {
            raw,
            feed: Feed { posts },
        })
    }

    /// Path the backup taken at `now` is written to: `<stem>-backup-<unix millis>.json`
    /// next to the collection.
    #[must_use]
    pub fn backup_path(&self, now: UtcDateTime) -> PathBuf {
        let stem = self
            .path
            .file_stem()
            .map_or_else(|| "feed".into(), |stem| stem.to_string_lossy());
        let millis = now.unix_timestamp_nanos() / 1_000_000;

        self.path.with_file_name(format!("{stem}-backup-{millis}.json"))
    }

    /// Writes `raw` to a new backup file. An existing backup with the same name is never
    /// overwritten; that case fails with [`StoreError::Backup`].
    pub fn backup(&self, raw: &str, now: UtcDateTime) -> Result<PathBuf> {
        let path = self.backup_path(now);
        let backup_error = |source: io::Error| StoreError::Backup {
            path: path.clone(),
            source,
        };

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(backup_error)?;
        file.write_all(raw.as_bytes()).map_err(backup_error)?;

        info!(path = %path.display(), "Backed up post collection");
        Ok(path)
    }

    /// Rewrites the collection through a temporary file in the same directory, so
    /// readers see either the old or the new collection.
    pub fn save(&self, feed: &Feed) -> Result<()> {
        let write_error = |source: io::Error| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        let json = serde_json::to_string_pretty(&FeedRecord::from(feed.clone())).map_err(
            |source| StoreError::Json {
                path: self.path.clone(),
                source,
            },
        )?;

        let directory = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut file = NamedTempFile::new_in(directory).map_err(write_error)?;
        file.write_all(json.as_bytes()).map_err(write_error)?;
        file.persist(&self.path)
            .map_err(|err| write_error(err.error))?;

        info!(path = %self.path.display(), posts = feed.posts.len(), "Saved post collection");
        Ok(())
    }

    /// Backs up `raw`, then saves `feed`. The collection is left untouched when the
    /// backup cannot be written.
    pub fn replace(&self, raw: &str, feed: &Feed, now: UtcDateTime) -> Result<PathBuf> {
        let backup = self.backup(raw, now)?;
        self.save(feed)?;

        Ok(backup)
    }
}
