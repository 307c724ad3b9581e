//! Render cache and invalidation signaling for the public read surfaces.
//!
//! Every public GET is cached as the JSON value it would serve, keyed by
//! [`CacheKey`]. Each key carries a [`ContentTag`] (the entity class it
//! depends on) and optionally the slug of a single record. Writes signal
//! invalidation by tag - "drop every cached entry whose tag matches this
//! write" - instead of enumerating route paths by hand, so a new public
//! surface can't silently fall out of the invalidation set.
//!
//! Invalidation is advisory and fire-and-forget: no ordering guarantee, no
//! acknowledgement. A missed signal degrades to a temporarily stale page
//! (bounded by the TTL), never to incorrect data in the store.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde_json::Value;

use crate::error::AppError;

/// Entity class a cached entry depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentTag {
    Posts,
    Works,
    Goals,
    MediaImages,
}

/// Cache key for one public read surface.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    /// Published post list.
    PostList,
    /// Published post detail, by slug.
    Post(String),
    /// Public case-study list.
    WorkList,
    /// Public case-study detail, by slug.
    Work(String),
    /// All goals grouped by category.
    GoalBoard,
    /// Gallery of image media.
    GalleryImages,
}

impl CacheKey {
    /// The entity class this entry depends on.
    #[must_use]
    pub const fn tag(&self) -> ContentTag {
        match self {
            Self::PostList | Self::Post(_) => ContentTag::Posts,
            Self::WorkList | Self::Work(_) => ContentTag::Works,
            Self::GoalBoard => ContentTag::Goals,
            Self::GalleryImages => ContentTag::MediaImages,
        }
    }

    /// The slug this entry depends on, if it is a detail page.
    #[must_use]
    pub fn slug(&self) -> Option<&str> {
        match self {
            Self::Post(slug) | Self::Work(slug) => Some(slug),
            _ => None,
        }
    }
}

/// TTL backstop: even a missed invalidation heals within this window.
const CACHE_TTL: Duration = Duration::from_secs(15 * 60);

/// Upper bound on cached surfaces; the site has a handful of lists plus one
/// entry per published slug.
const CACHE_CAPACITY: u64 = 1024;

/// Cache of rendered public responses, with tag-based invalidation.
#[derive(Clone)]
pub struct RenderCache {
    inner: Cache<CacheKey, Value>,
}

impl RenderCache {
    /// Create a cache with the standard TTL and capacity.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(CACHE_CAPACITY)
                .time_to_live(CACHE_TTL)
                .support_invalidation_closures()
                .build(),
        }
    }

    /// Serve `key` from cache, computing it with `load` on a miss.
    ///
    /// Errors are not cached - a failed load is retried on the next request.
    ///
    /// # Errors
    ///
    /// Propagates the error from `load`.
    pub async fn fetch<Fut>(&self, key: CacheKey, load: Fut) -> Result<Value, AppError>
    where
        Fut: Future<Output = Result<Value, AppError>>,
    {
        self.inner
            .try_get_with(key, load)
            .await
            .map_err(unshare_error)
    }

    /// Signal that an entity class changed.
    ///
    /// Drops every list-level entry with this tag, plus detail entries for
    /// the given slugs. On a slug-changing update, pass both the old and the
    /// new slug so the old detail page can't serve stale content forever.
    ///
    /// Fire-and-forget: failures are logged and swallowed.
    pub fn invalidate<I, S>(&self, tag: ContentTag, slugs: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let slugs: HashSet<String> = slugs.into_iter().map(Into::into).collect();
        let result = self.inner.invalidate_entries_if(move |key, _| {
            key.tag() == tag && key.slug().is_none_or(|slug| slugs.contains(slug))
        });
        if let Err(e) = result {
            tracing::warn!(error = %e, ?tag, "cache invalidation signal failed");
        }
    }

    /// Flush moka's pending internal work. Only needed by tests that want
    /// deterministic visibility of invalidations.
    pub async fn run_pending_tasks(&self) {
        self.inner.run_pending_tasks().await;
    }

    /// Whether a key currently has a live entry.
    #[must_use]
    pub fn contains(&self, key: &CacheKey) -> bool {
        self.inner.contains_key(key)
    }
}

impl Default for RenderCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Recover an owned error from moka's shared wrapper.
///
/// `try_get_with` hands concurrent waiters the same `Arc`'d error. Not-found
/// keeps its identity (it drives a 404); everything else collapses to an
/// internal error carrying the message.
fn unshare_error(err: Arc<AppError>) -> AppError {
    Arc::try_unwrap(err).unwrap_or_else(|shared| match &*shared {
        AppError::NotFound(message) => AppError::NotFound(message.clone()),
        AppError::Unauthorized(message) => AppError::Unauthorized(message.clone()),
        AppError::BadRequest(message) => AppError::BadRequest(message.clone()),
        other => AppError::Internal(other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    async fn seed(cache: &RenderCache, key: CacheKey, value: Value) {
        let got = cache
            .fetch(key, async move { Ok(value) })
            .await
            .expect("seed load");
        assert!(got.is_object() || got.is_array() || got.is_string());
    }

    #[tokio::test]
    async fn test_fetch_caches_value() {
        let cache = RenderCache::new();
        seed(&cache, CacheKey::PostList, json!({"posts": []})).await;

        // Second fetch must not run the loader.
        let got = cache
            .fetch(CacheKey::PostList, async {
                Err(AppError::Internal("loader ran on a hit".into()))
            })
            .await
            .expect("cached value");
        assert_eq!(got, json!({"posts": []}));
    }

    #[tokio::test]
    async fn test_errors_are_not_cached() {
        let cache = RenderCache::new();
        let err = cache
            .fetch(CacheKey::PostList, async {
                Err(AppError::NotFound("nope".into()))
            })
            .await
            .expect_err("load fails");
        assert!(matches!(err, AppError::NotFound(_)));

        // A later fetch runs the loader again and can succeed.
        let got = cache
            .fetch(CacheKey::PostList, async { Ok(json!("fresh")) })
            .await
            .expect("second load");
        assert_eq!(got, json!("fresh"));
    }

    #[tokio::test]
    async fn test_tag_invalidation_drops_list_and_matching_slugs() {
        let cache = RenderCache::new();
        seed(&cache, CacheKey::PostList, json!("list")).await;
        seed(&cache, CacheKey::Post("hello".into()), json!("hello")).await;
        seed(&cache, CacheKey::Post("other".into()), json!("other")).await;
        seed(&cache, CacheKey::WorkList, json!("works")).await;

        cache.invalidate(ContentTag::Posts, ["hello".to_string()]);
        cache.run_pending_tasks().await;

        assert!(!cache.contains(&CacheKey::PostList));
        assert!(!cache.contains(&CacheKey::Post("hello".into())));
        // Untouched slug and unrelated tag survive.
        assert!(cache.contains(&CacheKey::Post("other".into())));
        assert!(cache.contains(&CacheKey::WorkList));
    }

    #[tokio::test]
    async fn test_slug_rename_invalidates_old_and_new() {
        let cache = RenderCache::new();
        seed(&cache, CacheKey::Post("old-slug".into()), json!("old")).await;
        seed(&cache, CacheKey::Post("new-slug".into()), json!("new")).await;

        // The update path passes both slugs.
        cache.invalidate(
            ContentTag::Posts,
            ["old-slug".to_string(), "new-slug".to_string()],
        );
        cache.run_pending_tasks().await;

        assert!(!cache.contains(&CacheKey::Post("old-slug".into())));
        assert!(!cache.contains(&CacheKey::Post("new-slug".into())));
    }

    #[tokio::test]
    async fn test_goal_and_gallery_tags_are_independent() {
        let cache = RenderCache::new();
        seed(&cache, CacheKey::GoalBoard, json!("goals")).await;
        seed(&cache, CacheKey::GalleryImages, json!("images")).await;

        cache.invalidate(ContentTag::Goals, Vec::<String>::new());
        cache.run_pending_tasks().await;

        assert!(!cache.contains(&CacheKey::GoalBoard));
        assert!(cache.contains(&CacheKey::GalleryImages));
    }

    #[test]
    fn test_key_tags() {
        assert_eq!(CacheKey::PostList.tag(), ContentTag::Posts);
        assert_eq!(CacheKey::Post("x".into()).tag(), ContentTag::Posts);
        assert_eq!(CacheKey::Work("x".into()).tag(), ContentTag::Works);
        assert_eq!(CacheKey::GoalBoard.tag(), ContentTag::Goals);
        assert_eq!(CacheKey::GalleryImages.tag(), ContentTag::MediaImages);
        assert_eq!(CacheKey::Post("x".into()).slug(), Some("x"));
        assert_eq!(CacheKey::PostList.slug(), None);
    }
}
