//! Replies that carry a post's overflow media.

use crate::model::{
    Id,
    author::Author,
    post::PostMarker,
    reply::{Reply, synthetic_reply_id},
};
use serde::Deserialize;

/// Text placed in synthetic replies.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplyContentStyle {
    /// Media-only replies.
    #[default]
    Empty,
    /// A `(續 n/total)` marker counting chunks, the post itself being chunk 1.
    Continued,
}

impl ReplyContentStyle {
    fn content(self, chunk_index: usize, chunk_count: usize) -> String {
        match self {
            ReplyContentStyle::Empty => String::new(),
            ReplyContentStyle::Continued => format!("(續 {}/{chunk_count})", chunk_index + 1),
        }
    }
}

/// Builds one reply per chunk after the first.
///
/// `chunks` is the full chunk list, chunk 0 included; chunk 0 belongs to the post body.
/// Output is fully determined by the inputs, so regenerating replies is idempotent.
#[must_use]
pub fn synthesize_replies(
    post_id: &Id<PostMarker>,
    author: &Author,
    chunks: &[Vec<String>],
    timestamp: &str,
    style: ReplyContentStyle,
) -> Vec<Reply> {
    chunks
        .iter()
        .enumerate()
        .skip(1)
        .map(|(chunk_index, chunk)| Reply {
            id: synthetic_reply_id(post_id, chunk_index),
            author: author.clone(),
            content: style.content(chunk_index, chunks.len()),
            timestamp: timestamp.to_owned(),
            likes: 0,
            media: chunk.clone(),
        })
        .collect()
}
