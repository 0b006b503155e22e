//! Time-boxed caching of a fetched value, with the cache owned by the caller.

use crate::util::PositiveDuration;
use time::UtcDateTime;

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Cached<T> {
    pub data: T,
    pub fetched_at: UtcDateTime,
}

impl<T> Cached<T> {
    #[must_use]
    pub fn new(data: T, fetched_at: UtcDateTime) -> Self {
        Self { data, fetched_at }
    }

    #[must_use]
    pub fn is_fresh(&self, now: UtcDateTime, ttl: PositiveDuration) -> bool {
        now - self.fetched_at < ttl.get()
    }
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub enum CacheLookup<T, E> {
    /// The cache was fresh and `fetch` was not called.
    Hit(Cached<T>),
    /// `fetch` succeeded.
    Refreshed(Cached<T>),
    /// `fetch` failed and the expired cache is still served.
    Stale { cached: Cached<T>, error: E },
}

impl<T, E> CacheLookup<T, E> {
    #[must_use]
    pub fn into_cached(self) -> Cached<T> {
        match self {
            CacheLookup::Hit(cached)
            | CacheLookup::Refreshed(cached)
            | CacheLookup::Stale { cached, .. } => cached,
        }
    }
}

/// Returns the cached value while it is younger than `ttl`, otherwise calls `fetch`.
///
/// Fails only when `fetch` fails and there is nothing cached to fall back on.
pub fn get_or_fetch<T, E>(
    cache: Option<Cached<T>>,
    now: UtcDateTime,
    ttl: PositiveDuration,
    fetch: impl FnOnce() -> Result<T, E>,
) -> Result<CacheLookup<T, E>, E> {
    match cache {
        Some(cached) if cached.is_fresh(now, ttl) => Ok(CacheLookup::Hit(cached)),
        cache => match (fetch(), cache) {
            (Ok(data), _) => Ok(CacheLookup::Refreshed(Cached::new(data, now))),
            (Err(error), Some(cached)) => Ok(CacheLookup::Stale { cached, error }),
            (Err(error), None) => Err(error),
        },
    }
}
