use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Severity of a user-visible notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A recoverable, user-facing message (failed request, match alert, ...).
#[derive(Debug, Clone)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub body: String,
    pub created_at: Instant,
    pub ttl: Duration,
}

impl Notice {
    /// Creates an info notice with a 5-second TTL.
    pub fn info(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::with_level(NoticeLevel::Info, title, body, Duration::from_secs(5))
    }

    /// Creates a warning notice with an 8-second TTL.
    pub fn warning(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::with_level(NoticeLevel::Warning, title, body, Duration::from_secs(8))
    }

    /// Creates an error notice with a 10-second TTL.
    pub fn error(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::with_level(NoticeLevel::Error, title, body, Duration::from_secs(10))
    }

    fn with_level(
        level: NoticeLevel,
        title: impl Into<String>,
        body: impl Into<String>,
        ttl: Duration,
    ) -> Self {
        Self {
            level,
            title: title.into(),
            body: body.into(),
            created_at: Instant::now(),
            ttl,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.ttl
    }
}

/// Bounded notice queue. Expired entries are evicted on every access and the
/// oldest entry is dropped when full.
#[derive(Debug)]
pub struct NoticeQueue {
    items: VecDeque<Notice>,
    capacity: usize,
    /// Index of the first notice not yet returned by [`NoticeQueue::take_unseen`].
    unseen_from: usize,
}

impl NoticeQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
            unseen_from: 0,
        }
    }

    pub fn push(&mut self, notice: Notice) {
        tracing::debug!(level = ?notice.level, title = %notice.title, "notice raised");
        self.evict_expired();
        if self.items.len() >= self.capacity {
            self.items.pop_front();
            self.unseen_from = self.unseen_from.saturating_sub(1);
        }
        self.items.push_back(notice);
    }

    /// Currently visible (non-expired) notices, oldest first.
    pub fn visible(&mut self) -> Vec<&Notice> {
        self.evict_expired();
        self.items.iter().collect()
    }

    /// Notices pushed since the last call, for consoles that print once.
    pub fn take_unseen(&mut self) -> Vec<Notice> {
        let start = self.unseen_from.min(self.items.len());
        let fresh: Vec<Notice> = self.items.iter().skip(start).cloned().collect();
        self.unseen_from = self.items.len();
        fresh
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn evict_expired(&mut self) {
        let before = self.items.len();
        let mut removed_unseen_prefix = 0;
        let mut idx = 0;
        let unseen_from = self.unseen_from;
        self.items.retain(|n| {
            let keep = !n.is_expired();
            if !keep && idx < unseen_from {
                removed_unseen_prefix += 1;
            }
            idx += 1;
            keep
        });
        if self.items.len() != before {
            self.unseen_from = unseen_from - removed_unseen_prefix;
        }
    }
}

impl Default for NoticeQueue {
    fn default() -> Self {
        Self::new(16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_visible() {
        let mut queue = NoticeQueue::new(4);
        queue.push(Notice::error("Plan failed", "HTTP 500"));
        queue.push(Notice::info("Match", "new errand near your route"));
        let visible = queue.visible();
        assert_eq!(visible.len(), 2);
        assert_eq!(visible[0].level, NoticeLevel::Error);
    }

    #[test]
    fn capacity_drops_oldest() {
        let mut queue = NoticeQueue::new(2);
        queue.push(Notice::info("a", ""));
        queue.push(Notice::info("b", ""));
        queue.push(Notice::info("c", ""));
        let titles: Vec<_> = queue.visible().iter().map(|n| n.title.clone()).collect();
        assert_eq!(titles, vec!["b", "c"]);
    }

    #[test]
    fn expired_notices_are_evicted() {
        let mut queue = NoticeQueue::new(4);
        let mut stale = Notice::warning("old", "");
        stale.ttl = Duration::ZERO;
        queue.push(stale);
        queue.push(Notice::info("fresh", ""));
        let visible = queue.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].title, "fresh");
    }

    #[test]
    fn take_unseen_returns_each_notice_once() {
        let mut queue = NoticeQueue::new(8);
        queue.push(Notice::info("one", ""));
        assert_eq!(queue.take_unseen().len(), 1);
        assert!(queue.take_unseen().is_empty());
        queue.push(Notice::info("two", ""));
        let fresh = queue.take_unseen();
        assert_eq!(fresh.len(), 1);
        assert_eq!(fresh[0].title, "two");
    }

    #[test]
    fn take_unseen_survives_overflow() {
        let mut queue = NoticeQueue::new(2);
        queue.push(Notice::info("a", ""));
        queue.push(Notice::info("b", ""));
        queue.push(Notice::info("c", ""));
        let titles: Vec<_> = queue.take_unseen().into_iter().map(|n| n.title).collect();
        assert_eq!(titles, vec!["b", "c"]);
    }
}
