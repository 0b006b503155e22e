//! Media discovery backed by one directory per post under a media root.

use std::{
    fs, io,
    path::PathBuf,
};
use tracing::{debug, info, warn};
use wishfeed_common::{
    discovery::MediaSource,
    media::{AVATAR_FILE_NAME, is_media_file_name},
    model::{Id, post::PostMarker},
};

pub const DEFAULT_URL_PREFIX: &str = "/img";

/// Looks for media in `<root>/<post id>/` and reports it as `<url prefix>/<post id>/<file>`.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct MediaDirectory {
    root: PathBuf,
    url_prefix: String,
}

impl MediaDirectory {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, url_prefix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            url_prefix: url_prefix.into(),
        }
    }

    fn post_directory(&self, post_id: &Id<PostMarker>) -> PathBuf {
        self.root.join(post_id.get())
    }

    fn url(&self, post_id: &Id<PostMarker>, file_name: &str) -> String {
        let prefix = self.url_prefix.trim_end_matches('/');
        format!("{prefix}/{post_id}/{file_name}")
    }

    fn media_file_names(&self, post_id: &Id<PostMarker>) -> io::Result<Vec<String>> {
        let mut names = Vec::new();

        for entry in fs::read_dir(self.post_directory(post_id))? {
            let entry = entry?;
            let Ok(name) = entry.file_name().into_string() else {
                warn!(post = %post_id, name = ?entry.file_name(), "Skipping non UTF-8 file name");
                continue;
            };

            if !entry.path().is_file() || !is_media_file_name(&name) {
                debug!(post = %post_id, %name, "Skipping entry");
                continue;
            }

            names.push(name);
        }

        // File names like 00.png, 01.mp4 set the display order.
        names.sort();
        Ok(names)
    }
}

impl MediaSource for MediaDirectory {
    fn discover(&self, post_id: &Id<PostMarker>) -> Vec<String> {
        match self.media_file_names(post_id) {
            Ok(names) => names.iter().map(|name| self.url(post_id, name)).collect(),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!(post = %post_id, "No media directory");
                Vec::new()
            }
            Err(err) => {
                warn!(post = %post_id, error = %err, "Could not read media directory");
                Vec::new()
            }
        }
    }

    fn avatar(&self, post_id: &Id<PostMarker>) -> Option<String> {
        self.post_directory(post_id)
            .join(AVATAR_FILE_NAME)
            .is_file()
            .then(|| self.url(post_id, AVATAR_FILE_NAME))
    }
}
