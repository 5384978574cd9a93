//! Bounded render cache.
//!
//! Finished bitmaps are cached by gradient content and target size so
//! repeated requests (window resizes bouncing back, tab switches) publish
//! without recomputation. The bound exists only to stop pathological
//! thrash; eviction is least-recently-used via a monotonic access counter.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use aurora_gradient::model::SpaceGradient;

use crate::raster::Bitmap;

/// Cache key: gradient content, target pixel size, and dither intent.
///
/// Content-hashed, not identity-hashed, so two equal gradients share an
/// entry. `dithered` keeps the low-quality rasters produced during drags
/// and transitions from ever answering a full-quality request.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct RenderKey {
    pub content: u64,
    pub width: u32,
    pub height: u32,
    pub dithered: bool,
}

impl RenderKey {
    pub fn for_request(
        gradient: &SpaceGradient,
        width: u32,
        height: u32,
        dithered: bool,
    ) -> Self {
        Self {
            content: gradient.content_hash(),
            width,
            height,
            dithered,
        }
    }
}

#[derive(Debug)]
struct Entry {
    bitmap: Arc<Bitmap>,
    last_access: u64,
}

#[derive(Debug)]
struct Inner {
    map: HashMap<RenderKey, Entry>,
    access_counter: u64,
}

/// Thread-safe bounded LRU of finished bitmaps.
///
/// Shared between the background worker (insert) and the publish step
/// (get); a plain mutex is sufficient since entries are `Arc`-cheap to
/// clone out and operations are short.
#[derive(Debug)]
pub struct RenderCache {
    inner: Mutex<Inner>,
    capacity: usize,
}

pub const DEFAULT_CAPACITY: usize = 8;

impl RenderCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(Inner {
                map: HashMap::new(),
                access_counter: 0,
            }),
            capacity: capacity.max(1),
        }
    }

    /// Fetches a cached bitmap, refreshing its recency.
    pub fn get(&self, key: &RenderKey) -> Option<Arc<Bitmap>> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.access_counter += 1;
        let counter = inner.access_counter;
        let entry = inner.map.get_mut(key)?;
        entry.last_access = counter;
        Some(Arc::clone(&entry.bitmap))
    }

    /// Inserts a bitmap, evicting the least recently used entry when over
    /// capacity.
    pub fn insert(&self, key: RenderKey, bitmap: Arc<Bitmap>) {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.access_counter += 1;
        let counter = inner.access_counter;
        inner.map.insert(
            key,
            Entry {
                bitmap,
                last_access: counter,
            },
        );

        if inner.map.len() > self.capacity {
            if let Some(oldest) = inner
                .map
                .iter()
                .min_by_key(|(_, e)| e.last_access)
                .map(|(k, _)| *k)
            {
                inner.map.remove(&oldest);
                log::debug!("render cache evicted {oldest:?}");
            }
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for RenderCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
