//! Brings posts in line with the media currently on disk.

use crate::{
    chunk::{InvalidChunkSizeError, MEDIA_CHUNK_SIZE, split},
    discovery::MediaSource,
    model::{
        Id,
        post::{Post, PostMarker},
    },
    synthesize::{ReplyContentStyle, synthesize_replies},
};
use std::ops::AddAssign;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Clone, Eq, PartialEq, Debug, Hash, Error)]
pub enum ReconcileError {
    #[error("Post with id {0} was not found.")]
    PostNotFound(Id<PostMarker>),
    #[error(transparent)]
    ChunkSize(#[from] InvalidChunkSizeError),
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Hash)]
pub struct ReconcileSummary {
    pub posts_processed: usize,
    pub posts_with_media: usize,
    pub media_files: usize,
    pub synthetic_replies: usize,
    pub avatars: usize,
}

impl AddAssign for ReconcileSummary {
    fn add_assign(&mut self, rhs: Self) {
        self.posts_processed += rhs.posts_processed;
        self.posts_with_media += rhs.posts_with_media;
        self.media_files += rhs.media_files;
        self.synthetic_replies += rhs.synthetic_replies;
        self.avatars += rhs.avatars;
    }
}

#[derive(Clone, Debug, Default)]
pub struct Reconciler<S> {
    source: S,
    reply_content: ReplyContentStyle,
}

impl<S: MediaSource> Reconciler<S> {
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            source,
            reply_content: ReplyContentStyle::default(),
        }
    }

    #[must_use]
    pub fn with_reply_content(mut self, reply_content: ReplyContentStyle) -> Self {
        self.reply_content = reply_content;
        self
    }

    /// Reconciles a single post in place.
    ///
    /// The first chunk of discovered media goes to the post, later chunks become
    /// synthetic replies appended after the manual ones. Synthetic replies from earlier
    /// runs are always dropped first, so running this twice gives the same post.
    pub fn reconcile_post(&self, post: &mut Post) -> Result<ReconcileSummary, ReconcileError> {
        let files = self.source.discover(&post.id);

        // Resolved before synthesis so synthetic replies copy the current avatar.
        post.author.avatar = self.source.avatar(&post.id);

        let post_id = &post.id;
        post.replies.retain(|reply| !reply.is_synthetic_of(post_id));

        let chunks = split(&files, MEDIA_CHUNK_SIZE)?;
        let synthetic = synthesize_replies(
            &post.id,
            &post.author,
            &chunks,
            &post.timestamp,
            self.reply_content,
        );

        if files.is_empty() {
            debug!(post = %post.id, "No media found");
        } else {
            info!(
                post = %post.id,
                files = files.len(),
                replies = synthetic.len(),
                "Attached media"
            );
        }

        let summary = ReconcileSummary {
            posts_processed: 1,
            posts_with_media: usize::from(!files.is_empty()),
            media_files: files.len(),
            synthetic_replies: synthetic.len(),
            avatars: usize::from(post.author.avatar.is_some()),
        };

        post.media = chunks.into_iter().next().unwrap_or_default();
        post.replies.extend(synthetic);
        post.reply_count = post.replies.len();

        Ok(summary)
    }

    /// Reconciles every post, in order.
    pub fn reconcile_all(&self, posts: &mut [Post]) -> Result<ReconcileSummary, ReconcileError> {
        let mut summary = ReconcileSummary::default();
        for post in posts {
            summary += self.reconcile_post(post)?;
        }

        Ok(summary)
    }

    /// Reconciles only the post with the given id.
    pub fn reconcile_one(
        &self,
        posts: &mut [Post],
        id: &Id<PostMarker>,
    ) -> Result<ReconcileSummary, ReconcileError> {
        let post = posts
            .iter_mut()
            .find(|post| &post.id == id)
            .ok_or_else(|| ReconcileError::PostNotFound(id.clone()))?;

        self.reconcile_post(post)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        discovery::MediaSource,
        model::{
            Id,
            author::{Author, Username},
            post::{Post, PostMarker},
            reply::Reply,
        },
        reconcile::{ReconcileError, ReconcileSummary, Reconciler},
        synthesize::ReplyContentStyle,
    };
    use std::collections::{HashMap, HashSet};

    #[derive(Default)]
    struct FakeMedia {
        files: HashMap<String, Vec<String>>,
        avatars: HashSet<String>,
    }

    impl FakeMedia {
        fn with_files(mut self, post_id: &str, count: usize) -> Self {
            let files = (0..count)
                .map(|n| format!("/img/{post_id}/{n:02}.png"))
                .collect();
            self.files.insert(post_id.to_owned(), files);
            self
        }

        fn with_avatar(mut self, post_id: &str) -> Self {
            self.avatars.insert(post_id.to_owned());
            self
        }
    }

    impl MediaSource for FakeMedia {
        fn discover(&self, post_id: &Id<PostMarker>) -> Vec<String> {
            self.files.get(post_id.get()).cloned().unwrap_or_default()
        }

        fn avatar(&self, post_id: &Id<PostMarker>) -> Option<String> {
            self.avatars
                .contains(post_id.get())
                .then(|| format!("/img/{post_id}/avatar.png"))
        }
    }

    fn author(username: &str) -> Author {
        Author {
            name: username.to_uppercase(),
            username: Username::new(username.to_owned()).unwrap(),
            avatar: None,
        }
    }

    fn post(id: &str) -> Post {
        let mut post = Post::new(Id::new(id).unwrap(), author(&format!("user{id}")));
        post.timestamp = "2025/06/01 12:00:00".to_owned();
        post
    }

    fn reply(id: &str) -> Reply {
        Reply {
            id: Id::new(id).unwrap(),
            author: author("fan"),
            content: "生日快樂".to_owned(),
            timestamp: "2025/06/02 08:00:00".to_owned(),
            likes: 3,
            media: Vec::new(),
        }
    }

    fn reply_ids(post: &Post) -> Vec<&str> {
        post.replies.iter().map(|reply| reply.id.get()).collect()
    }

    #[test]
    fn nine_files_and_a_manual_reply() {
        let media = FakeMedia::default().with_files("5", 9);
        let files = media.files["5"].clone();
        let reconciler = Reconciler::new(&media);

        let mut post = post("5");
        post.replies.push(reply("5-fan-1"));
        let manual = post.replies[0].clone();

        let summary = reconciler.reconcile_post(&mut post).unwrap();

        assert_eq!(post.media, files[0..4]);
        assert_eq!(reply_ids(&post), ["5-fan-1", "5-reply-1", "5-reply-2"]);
        assert_eq!(post.replies[0], manual);
        assert_eq!(post.replies[1].media, files[4..8]);
        assert_eq!(post.replies[2].media, files[8..9]);
        assert_eq!(post.reply_count, 3);

        assert_eq!(
            summary,
            ReconcileSummary {
                posts_processed: 1,
                posts_with_media: 1,
                media_files: 9,
                synthetic_replies: 2,
                avatars: 0,
            }
        );
    }

    #[test]
    fn no_media_clears_synthetic_replies() {
        let media = FakeMedia::default();
        let reconciler = Reconciler::new(&media);

        let mut post = post("7");
        post.media = vec!["/img/7/00.png".to_owned()];
        post.replies = vec![reply("7-reply-1"), reply("7-reply-2")];
        post.reply_count = 2;
        post.author.avatar = Some("/img/7/avatar.png".to_owned());

        reconciler.reconcile_post(&mut post).unwrap();

        assert!(post.media.is_empty());
        assert!(post.replies.is_empty());
        assert_eq!(post.reply_count, 0);
        assert_eq!(post.author.avatar, None);
    }

    #[test]
    fn media_counts() {
        for count in 0..=17 {
            let media = FakeMedia::default().with_files("3", count);
            let reconciler = Reconciler::new(&media);

            let mut post = post("3");
            reconciler.reconcile_post(&mut post).unwrap();

            assert_eq!(post.media.len(), count.min(4));
            assert_eq!(post.replies.len(), count.div_ceil(4).saturating_sub(1));
            assert_eq!(post.reply_count, post.replies.len());

            let rebuilt: Vec<_> = post
                .media
                .iter()
                .chain(post.replies.iter().flat_map(|reply| &reply.media))
                .cloned()
                .collect();
            assert_eq!(rebuilt, media.discover(&post.id));
        }
    }

    #[test]
    fn idempotent() {
        let media = FakeMedia::default()
            .with_files("1", 6)
            .with_files("2", 13)
            .with_avatar("2");
        let reconciler = Reconciler::new(&media).with_reply_content(ReplyContentStyle::Continued);

        let mut posts = vec![post("1"), post("2"), post("3")];
        posts[1].replies = vec![reply("2-reply-1"), reply("2-thanks"), reply("2-reply-9")];

        reconciler.reconcile_all(&mut posts).unwrap();
        let first = posts.clone();
        reconciler.reconcile_all(&mut posts).unwrap();

        assert_eq!(posts, first);
        assert_eq!(
            reply_ids(&posts[1]),
            ["2-thanks", "2-reply-1", "2-reply-2", "2-reply-3"]
        );
    }

    #[test]
    fn manual_replies_keep_their_order() {
        let media = FakeMedia::default().with_files("4", 5);
        let reconciler = Reconciler::new(&media);

        let mut post = post("4");
        post.replies = vec![
            reply("4-a"),
            reply("4-reply-1"),
            reply("4-reply-later"),
            reply("4-reply-2"),
            reply("44-reply-1"),
        ];

        for _ in 0..3 {
            reconciler.reconcile_post(&mut post).unwrap();
            assert_eq!(
                reply_ids(&post),
                ["4-a", "4-reply-later", "44-reply-1", "4-reply-1"]
            );
        }
    }

    #[test]
    fn avatar_is_copied_into_synthetic_replies() {
        let media = FakeMedia::default().with_files("9", 5).with_avatar("9");
        let reconciler = Reconciler::new(&media);

        let mut post = post("9");
        let summary = reconciler.reconcile_post(&mut post).unwrap();

        let avatar = Some("/img/9/avatar.png".to_owned());
        assert_eq!(post.author.avatar, avatar);
        assert_eq!(post.replies[0].author.avatar, avatar);
        assert_eq!(summary.avatars, 1);
    }

    #[test]
    fn reconcile_one_post() {
        let media = FakeMedia::default().with_files("1", 5).with_files("2", 5);
        let reconciler = Reconciler::new(&media);
        let mut posts = vec![post("1"), post("2")];

        let summary = reconciler
            .reconcile_one(&mut posts, &Id::new("2").unwrap())
            .unwrap();

        assert_eq!(summary.posts_processed, 1);
        assert!(posts[0].media.is_empty());
        assert_eq!(posts[1].media.len(), 4);

        let missing = Id::new("99").unwrap();
        assert_eq!(
            reconciler.reconcile_one(&mut posts, &missing),
            Err(ReconcileError::PostNotFound(missing))
        );
    }
}
