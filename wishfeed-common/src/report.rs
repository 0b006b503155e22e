use crate::model::{
    Id,
    post::{Post, PostMarker},
    reply::{Reply, ReplyMarker},
};

/// Where media is attached across a feed, for checking a reconciled collection.
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash)]
pub struct MediaReport {
    pub avatars: usize,
    pub post_media: usize,
    pub reply_media: usize,
    pub entries: Vec<ReportEntry>,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub enum ReportEntry {
    Avatar {
        post: Id<PostMarker>,
        avatar: String,
    },
    PostMedia {
        post: Id<PostMarker>,
        media: Vec<String>,
    },
    ReplyMedia {
        post: Id<PostMarker>,
        reply: Id<ReplyMarker>,
        media: Vec<String>,
    },
}

impl MediaReport {
    #[must_use]
    pub fn from_posts(posts: &[Post]) -> Self {
        let mut report = Self::default();

        for post in posts {
            if let Some(avatar) = &post.author.avatar {
                report.avatars += 1;
                report.entries.push(ReportEntry::Avatar {
                    post: post.id.clone(),
                    avatar: avatar.clone(),
                });
            }

            if !post.media.is_empty() {
                report.post_media += post.media.len();
                report.entries.push(ReportEntry::PostMedia {
                    post: post.id.clone(),
                    media: post.media.clone(),
                });
            }

            for Reply { id, media, .. } in &post.replies {
                if !media.is_empty() {
                    report.reply_media += media.len();
                    report.entries.push(ReportEntry::ReplyMedia {
                        post: post.id.clone(),
                        reply: id.clone(),
                        media: media.clone(),
                    });
                }
            }
        }

        report
    }

    #[must_use]
    pub fn total_media(&self) -> usize {
        self.post_media + self.reply_media
    }
}
