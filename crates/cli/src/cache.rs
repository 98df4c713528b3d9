//! Store directory cache.
//!
//! The directory changes rarely, so the client keeps one copy with an
//! injected TTL policy: `None` keeps entries until explicitly invalidated,
//! `Some(ttl)` expires them after that long.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use domain::models::store::StoreInfo;

pub struct StoreCache {
    ttl: Option<Duration>,
    fetched_at: Option<Instant>,
    stores: Option<BTreeMap<String, StoreInfo>>,
}

impl StoreCache {
    pub fn new(ttl: Option<Duration>) -> Self {
        Self {
            ttl,
            fetched_at: None,
            stores: None,
        }
    }

    /// The cached directory, unless empty or expired.
    pub fn get(&self) -> Option<&BTreeMap<String, StoreInfo>> {
        let stores = self.stores.as_ref()?;
        if let (Some(ttl), Some(fetched_at)) = (self.ttl, self.fetched_at) {
            if fetched_at.elapsed() >= ttl {
                return None;
            }
        }
        Some(stores)
    }

    pub fn put(&mut self, stores: BTreeMap<String, StoreInfo>) {
        self.stores = Some(stores);
        self.fetched_at = Some(Instant::now());
    }

    pub fn invalidate(&mut self) {
        self.stores = None;
        self.fetched_at = None;
    }
}
