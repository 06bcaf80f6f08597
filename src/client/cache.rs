use std::time::Duration;
use tokio::time::Instant;

/// Single-value cache that goes stale `ttl` after the last `put`.
#[derive(Debug)]
pub struct TtlCache<T> {
    ttl: Duration,
    entry: Option<(Instant, T)>,
}

impl<T: Clone> TtlCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, entry: None }
    }

    /// The cached value while it is fresh.
    pub fn get(&self) -> Option<T> {
        self.entry
            .as_ref()
            .filter(|(at, _)| at.elapsed() < self.ttl)
            .map(|(_, v)| v.clone())
    }

    /// The cached value regardless of age; used as a fallback on errors.
    pub fn last(&self) -> Option<T> {
        self.entry.as_ref().map(|(_, v)| v.clone())
    }

    pub fn put(&mut self, value: T) {
        self.entry = Some((Instant::now(), value));
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn expires_after_ttl() {
        let mut cache = TtlCache::new(Duration::from_secs(30));
        assert_eq!(cache.get(), None::<u32>);

        cache.put(7);
        tokio::time::advance(Duration::from_secs(29)).await;
        assert_eq!(cache.get(), Some(7));

        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(cache.get(), None);
        assert_eq!(cache.last(), Some(7));

        cache.invalidate();
        assert_eq!(cache.last(), None);
    }
}
