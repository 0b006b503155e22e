//! Classification of media files by extension.

/// File name reserved for a post author's avatar inside the post's media directory.
pub const AVATAR_FILE_NAME: &str = "avatar.png";

pub const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];
pub const VIDEO_EXTENSIONS: [&str; 4] = ["mp4", "webm", "mov", "avi"];

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub enum MediaKind {
    Image,
    Video,
    Unknown,
}

/// Classifies a file path or URL by the text after its last `.`, ignoring case.
#[must_use]
pub fn classify(path: &str) -> MediaKind {
    let Some((_, extension)) = path.rsplit_once('.') else {
        return MediaKind::Unknown;
    };

    let is_one_of = |extensions: &[&str]| {
        extensions
            .iter()
            .any(|known| known.eq_ignore_ascii_case(extension))
    };

    if is_one_of(&IMAGE_EXTENSIONS) {
        MediaKind::Image
    } else if is_one_of(&VIDEO_EXTENSIONS) {
        MediaKind::Video
    } else {
        MediaKind::Unknown
    }
}

/// Whether a directory entry name counts as post media.
///
/// Hidden entries, the avatar and anything [`classify`] cannot place are excluded.
#[must_use]
pub fn is_media_file_name(name: &str) -> bool {
    !name.starts_with('.') && name != AVATAR_FILE_NAME && classify(name) != MediaKind::Unknown
}
