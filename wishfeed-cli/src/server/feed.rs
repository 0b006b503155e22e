use std::sync::Arc;
use time::UtcDateTime;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use wishfeed_common::{
    cache::{CacheLookup, Cached, get_or_fetch},
    model::post::Feed,
    util::PositiveDuration,
};
use wishfeed_store::store::{FeedStore, StoreError};

/// The post collection as served, reloaded from disk once the cached copy expires.
#[derive(Debug)]
pub struct FeedSource {
    store: FeedStore,
    ttl: PositiveDuration,
    cache: Mutex<Option<Cached<Arc<Feed>>>>,
}

impl FeedSource {
    #[must_use]
    pub fn new(store: FeedStore, ttl: PositiveDuration) -> Self {
        Self {
            store,
            ttl,
            cache: Mutex::new(None),
        }
    }

    pub async fn feed(&self) -> Result<Arc<Feed>, StoreError> {
        self.feed_at(UtcDateTime::now()).await
    }

    pub async fn feed_at(&self, now: UtcDateTime) -> Result<Arc<Feed>, StoreError> {
        let mut cache = self.cache.lock().await;

        let lookup = get_or_fetch(cache.take(), now, self.ttl, || {
            self.store.load().map(Arc::new)
        })?;

        match &lookup {
            CacheLookup::Hit(_) => debug!("Serving cached posts"),
            CacheLookup::Refreshed(cached) => {
                info!(posts = cached.data.posts.len(), "Loaded posts");
            }
            CacheLookup::Stale { error, .. } => {
                warn!(%error, "Reloading posts failed, serving stale posts");
            }
        }

        let cached = lookup.into_cached();
        let feed = Arc::clone(&cached.data);
        *cache = Some(cached);

        Ok(feed)
    }
}
