use crate::{AppError, config::Env};
use time::UtcDateTime;
use tracing::info;
use wishfeed_common::{
    model::Id,
    reconcile::{ReconcileSummary, Reconciler},
    report::{MediaReport, ReportEntry},
};
use wishfeed_store::{
    discovery::MediaDirectory,
    store::{FeedStore, LoadedFeed},
};

/// Reconciles the collection against the media directory and rewrites it, keeping a
/// backup of the previous contents.
pub fn reconcile(env: &Env, post_id: Option<&str>) -> Result<ReconcileSummary, AppError> {
    let store = FeedStore::new(&env.posts_file);
    let media = MediaDirectory::new(&env.media_root, env.media_url_prefix.as_str());
    let reconciler = Reconciler::new(media).with_reply_content(env.reply_content);

    let LoadedFeed { raw, mut feed } = store.load_raw()?;
    info!(
        path = %store.path().display(),
        posts = feed.posts.len(),
        "Reconciling posts with media in {}",
        env.media_root.display()
    );

    let summary = match post_id {
        Some(post_id) => reconciler.reconcile_one(&mut feed.posts, &Id::new(post_id)?)?,
        None => reconciler.reconcile_all(&mut feed.posts)?,
    };

    store.replace(&raw, &feed, UtcDateTime::now())?;

    Ok(summary)
}

pub fn print_summary(summary: &ReconcileSummary) {
    println!(
        "Processed {} posts, {} with media: {} media files, {} synthetic replies, {} avatars",
        summary.posts_processed,
        summary.posts_with_media,
        summary.media_files,
        summary.synthetic_replies,
        summary.avatars,
    );
}

pub fn verify(env: &Env) -> Result<MediaReport, AppError> {
    let feed = FeedStore::new(&env.posts_file).load()?;

    Ok(MediaReport::from_posts(&feed.posts))
}

pub fn print_report(report: &MediaReport) {
    for entry in &report.entries {
        match entry {
            ReportEntry::Avatar { post, avatar } => println!("post {post}: avatar {avatar}"),
            ReportEntry::PostMedia { post, media } => {
                println!("post {post}: {} media", media.len());
                print_media(media);
            }
            ReportEntry::ReplyMedia { post, reply, media } => {
                println!("post {post} reply {reply}: {} media", media.len());
                print_media(media);
            }
        }
    }

    println!();
    println!("Posts with avatars: {}", report.avatars);
    println!("Media on posts: {}", report.post_media);
    println!("Media on replies: {}", report.reply_media);
    println!("Media in total: {}", report.total_media());
}

fn print_media(media: &[String]) {
    for (index, url) in media.iter().enumerate() {
        println!("  {}. {url}", index + 1);
    }
}
