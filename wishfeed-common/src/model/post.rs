use crate::model::{Id, author::Author, reply::Reply};
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct PostMarker;

/// A top-level feed entry.
///
/// `media` holds at most one chunk; overflow media lives in synthetic replies.
/// `reply_count` mirrors `replies.len()` once the post has been reconciled.
#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Id<PostMarker>,
    pub author: Author,
    pub content: String,
    pub timestamp: String,
    pub likes: u64,
    pub retweets: u64,
    pub reply_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_liked: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_retweeted: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub media: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub replies: Vec<Reply>,
}

impl Post {
    #[must_use]
    pub fn new(id: Id<PostMarker>, author: Author) -> Self {
        Self {
            id,
            author,
            content: String::new(),
            timestamp: String::new(),
            likes: 0,
            retweets: 0,
            reply_count: 0,
            is_liked: None,
            is_retweeted: None,
            media: Vec::new(),
            replies: Vec::new(),
        }
    }
}

/// The whole persisted collection, in display order.
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
pub struct Feed {
    pub posts: Vec<Post>,
}

impl Feed {
    #[must_use]
    pub fn find(&self, id: &Id<PostMarker>) -> Option<&Post> {
        self.posts.iter().find(|post| &post.id == id)
    }
}
