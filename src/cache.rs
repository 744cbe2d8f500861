use std::time::{Duration, Instant};

use anyhow::Result;
use async_trait::async_trait;
use futures_util::future::BoxFuture;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Deferred load of a cached value. Only polled on a cache miss.
pub type LoadFuture<'a, T> = BoxFuture<'a, Result<T>>;

/// Get-or-populate cache for one collection
#[async_trait]
pub trait Cache<T>: Send + Sync
where
    T: Clone + Send + Sync + 'static,
{
    /// Return the cached value, running `load` to fill the cache if it is
    /// empty or expired. A failed load leaves the cache untouched.
    async fn get_or_populate<'a>(&self, load: LoadFuture<'a, T>) -> Result<T>;

    /// Drop the cached value so the next read loads again
    async fn invalidate(&self);
}

struct Entry<T> {
    value: T,
    stored_at: Instant,
}

/// In-process cache with an optional time-to-live.
///
/// No lock is held while loading, so concurrent misses may each load; the
/// last one to finish wins.
pub struct TtlCache<T> {
    name: &'static str,
    ttl: Option<Duration>,
    slot: RwLock<Option<Entry<T>>>,
}

impl<T> TtlCache<T> {
    /// `ttl` of `None` keeps the value until [`Cache::invalidate`]
    pub fn new(name: &'static str, ttl: Option<Duration>) -> Self {
        Self {
            name,
            ttl,
            slot: RwLock::new(None),
        }
    }

    fn is_fresh(&self, entry: &Entry<T>) -> bool {
        match self.ttl {
            Some(ttl) => entry.stored_at.elapsed() < ttl,
            None => true,
        }
    }
}

#[async_trait]
impl<T> Cache<T> for TtlCache<T>
where
    T: Clone + Send + Sync + 'static,
{
    async fn get_or_populate<'a>(&self, load: LoadFuture<'a, T>) -> Result<T> {
        {
            let slot = self.slot.read().await;
            if let Some(entry) = slot.as_ref() {
                if self.is_fresh(entry) {
                    return Ok(entry.value.clone());
                }
            }
        }

        debug!("Cache {} miss, loading", self.name);
        let value = load.await?;

        let mut slot = self.slot.write().await;
        *slot = Some(Entry {
            value: value.clone(),
            stored_at: Instant::now(),
        });

        Ok(value)
    }

    async fn invalidate(&self) {
        info!("Cache {} invalidated", self.name);
        *self.slot.write().await = None;
    }
}

/// Cache that never stores anything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopCache;

#[async_trait]
impl<T> Cache<T> for NoopCache
where
    T: Clone + Send + Sync + 'static,
{
    async fn get_or_populate<'a>(&self, load: LoadFuture<'a, T>) -> Result<T> {
        load.await
    }

    async fn invalidate(&self) {}
}
