//! Frontier queue with built-in dedup
//!
//! The frontier holds discovered-but-not-yet-fetched URLs plus the all-time
//! seen set used for dedup. Both live behind a single mutex so that
//! dedup-and-enqueue is atomic: no two workers can both win a race on the
//! same normalized key.

use crate::url::normalize;
use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;
use url::Url;

/// Thread-safe queue of not-yet-visited normalized URLs
pub struct Frontier {
    inner: Mutex<FrontierInner>,
}

struct FrontierInner {
    queue: VecDeque<Url>,
    seen: HashSet<String>,
}

impl Frontier {
    /// Creates an empty frontier
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(FrontierInner {
                queue: VecDeque::new(),
                seen: HashSet::new(),
            }),
        }
    }

    /// Normalizes and enqueues the start URL, marking it seen for dedup
    pub fn seed(&self, url: Url) {
        self.offer(url);
    }

    /// Non-blocking pop of the next URL; `None` when the queue is empty
    pub fn try_dequeue(&self) -> Option<Url> {
        let mut inner = self.inner.lock().unwrap();
        inner.queue.pop_front()
    }

    /// Offers a URL to the frontier
    ///
    /// The URL is normalized first; if the normalized key was already seen
    /// this is a no-op returning false. Otherwise the key is marked seen, the
    /// URL is enqueued, and true is returned. A normalized key is therefore
    /// enqueued at most once for the lifetime of a crawl run.
    pub fn offer(&self, url: Url) -> bool {
        let normalized = match normalize(url) {
            Ok(u) => u,
            Err(_) => return false,
        };

        let mut inner = self.inner.lock().unwrap();
        if !inner.seen.insert(normalized.as_str().to_string()) {
            return false;
        }
        inner.queue.push_back(normalized);
        true
    }

    /// Returns the number of URLs waiting in the queue
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().queue.len()
    }

    /// Returns whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.inner.lock().unwrap().queue.is_empty()
    }
}

impl Default for Frontier {
    fn default() -> Self {
        Self::new()
    }
}
