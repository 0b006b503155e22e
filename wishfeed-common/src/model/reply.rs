use crate::model::{Id, author::Author, post::PostMarker};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

const SYNTHETIC_REPLY_INFIX: &str = "-reply-";

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct ReplyMarker;

#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize, Serialize)]
pub struct Reply {
    pub id: Id<ReplyMarker>,
    pub author: Author,
    pub content: String,
    pub timestamp: String,
    pub likes: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub media: Vec<String>,
}

impl Reply {
    #[must_use]
    pub fn is_synthetic_of(&self, post_id: &Id<PostMarker>) -> bool {
        is_synthetic_reply_id(&self.id, post_id)
    }
}

/// Id of the reply carrying overflow chunk `chunk_index` (1-based) of a post.
#[must_use]
pub fn synthetic_reply_id(post_id: &Id<PostMarker>, chunk_index: usize) -> Id<ReplyMarker> {
    // A valid post id followed by the suffix is still valid.
    Id(
        format!("{post_id}{SYNTHETIC_REPLY_INFIX}{chunk_index}"),
        PhantomData,
    )
}

/// Whether `reply_id` is exactly `{post_id}-reply-{digits}`.
#[must_use]
pub fn is_synthetic_reply_id(reply_id: &Id<ReplyMarker>, post_id: &Id<PostMarker>) -> bool {
    reply_id
        .get()
        .strip_prefix(post_id.get())
        .and_then(|rest| rest.strip_prefix(SYNTHETIC_REPLY_INFIX))
        .is_some_and(|index| !index.is_empty() && index.bytes().all(|b| b.is_ascii_digit()))
}
