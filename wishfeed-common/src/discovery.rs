use crate::model::{Id, post::PostMarker};

/// Where a post's media files come from.
///
/// Implementations never fail: a post without a media directory simply has no media.
pub trait MediaSource {
    /// Media URLs for the post, in display order.
    fn discover(&self, post_id: &Id<PostMarker>) -> Vec<String>;

    /// Canonical avatar URL, if the post's directory has an avatar.
    fn avatar(&self, post_id: &Id<PostMarker>) -> Option<String>;
}

impl<S: MediaSource + ?Sized> MediaSource for &S {
    fn discover(&self, post_id: &Id<PostMarker>) -> Vec<String> {
        (**self).discover(post_id)
    }

    fn avatar(&self, post_id: &Id<PostMarker>) -> Option<String> {
        (**self).avatar(post_id)
    }
}
