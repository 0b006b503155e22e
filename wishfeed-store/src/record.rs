use serde::{Deserialize, Serialize};
use wishfeed_common::model::{
    Id, ModelValidationError,
    author::{Author, Username},
    post::{Feed, Post, PostMarker},
    reply::Reply,
};

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
pub(crate) struct FeedRecord {
    #[serde(default)]
    pub tweets: Vec<PostRecord>,
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PostRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub author: AuthorRecord,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub retweets: u64,
    #[serde(default)]
    pub replies: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_liked: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_retweeted: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub media: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub replies_data: Vec<ReplyRecord>,
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
pub(crate) struct ReplyRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub author: AuthorRecord,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub likes: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub media: Vec<String>,
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
pub(crate) struct AuthorRecord {
    #[serde(default)]
    pub name: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl TryFrom<AuthorRecord> for Author {
    type Error = ModelValidationError;

    fn try_from(value: AuthorRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            name: value.name,
            username: Username::new(value.username)?,
            avatar: value.avatar,
        })
    }
}

impl TryFrom<PostRecord> for Post {
    type Error = ModelValidationError;

    fn try_from(value: PostRecord) -> Result<Self, Self::Error> {
        let id = value.id.ok_or(ModelValidationError::MissingPostId)?;
        let id: Id<PostMarker> = Id::new(id)?;

        let replies = value
            .replies_data
            .into_iter()
            .map(|reply| -> Result<Reply, ModelValidationError> {
                let reply_id = reply
                    .id
                    .ok_or_else(|| ModelValidationError::MissingReplyId(id.to_string()))?;

                Ok(Reply {
                    id: Id::new(reply_id)?,
                    author: reply.author.try_into()?,
                    content: reply.content,
                    timestamp: reply.timestamp,
                    likes: reply.likes,
                    media: reply.media,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id,
            author: value.author.try_into()?,
            content: value.content,
            timestamp: value.timestamp,
            likes: value.likes,
            retweets: value.retweets,
            reply_count: value.replies,
            is_liked: value.is_liked,
            is_retweeted: value.is_retweeted,
            media: value.media,
            replies,
        })
    }
}

impl From<Author> for AuthorRecord {
    fn from(value: Author) -> Self {
        Self {
            name: value.name,
            username: value.username.into_inner(),
            avatar: value.avatar,
        }
    }
}

impl From<Reply> for ReplyRecord {
    fn from(value: Reply) -> Self {
        Self {
            id: Some(value.id.into_inner()),
            author: value.author.into(),
            content: value.content,
            timestamp: value.timestamp,
            likes: value.likes,
            media: value.media,
        }
    }
}

impl From<Post> for PostRecord {
    fn from(value: Post) -> Self {
        Self {
            id: Some(value.id.into_inner()),
            author: value.author.into(),
            content: value.content,
            timestamp: value.timestamp,
            likes: value.likes,
            retweets: value.retweets,
            replies: value.reply_count,
            is_liked: value.is_liked,
            is_retweeted: value.is_retweeted,
            media: value.media,
            replies_data: value.replies.into_iter().map(ReplyRecord::from).collect(),
        }
    }
}

impl From<Feed> for FeedRecord {
    fn from(value: Feed) -> Self {
        Self {
            tweets: value.posts.into_iter().map(PostRecord::from).collect(),
        }
    }
}
