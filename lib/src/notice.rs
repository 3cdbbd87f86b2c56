//! Non-blocking user feedback: notices are queued and rendered by the UI.

use std::{collections::VecDeque, time::Duration};

use n0_future::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum NoticeLevel {
    #[display("info")]
    Info,
    #[display("success")]
    Success,
    #[display("warning")]
    Warning,
    #[display("error")]
    Error,
}

/// One user-visible message.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("{text}")]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, text)
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, text)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedNotice {
    pub id: u64,
    pub notice: Notice,
    /// `None` keeps the notice until it is dismissed.
    pub expires_at: Option<Instant>,
}

/// Bounded FIFO of notices. Pushing past capacity drops the oldest entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeQueue {
    next_id: u64,
    capacity: usize,
    items: VecDeque<QueuedNotice>,
}

impl Default for NoticeQueue {
    fn default() -> Self {
        Self::with_capacity(8)
    }
}

impl NoticeQueue {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            next_id: 0,
            capacity,
            items: VecDeque::with_capacity(capacity),
        }
    }

    /// Queues a notice and returns its id.
    pub fn push(&mut self, notice: Notice) -> u64 {
        self.insert(notice, None)
    }

    /// Queues a notice that [`NoticeQueue::expire`] removes once `ttl` has
    /// passed after `now`.
    pub fn push_expiring(&mut self, notice: Notice, ttl: Duration, now: Instant) -> u64 {
        self.insert(notice, Some(now + ttl))
    }

    fn insert(&mut self, notice: Notice, expires_at: Option<Instant>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        if self.items.len() == self.capacity {
            self.items.pop_front();
        }
        self.items.push_back(QueuedNotice {
            id,
            notice,
            expires_at,
        });
        id
    }

    /// Drops every notice whose deadline is at or before `now` and returns
    /// how many were removed.
    pub fn expire(&mut self, now: Instant) -> usize {
        let before = self.items.len();
        self.items
            .retain(|item| item.expires_at.is_none_or(|at| at > now));
        before - self.items.len()
    }

    /// Earliest deadline among the queued notices.
    pub fn next_expiry(&self) -> Option<Instant> {
        self.items.iter().filter_map(|item| item.expires_at).min()
    }

    pub fn extend(&mut self, notices: impl IntoIterator<Item = Notice>) -> Vec<u64> {
        notices.into_iter().map(|notice| self.push(notice)).collect()
    }

    /// Removes a notice. Returns false when it was already gone.
    pub fn dismiss(&mut self, id: u64) -> bool {
        match self.items.iter().position(|item| item.id == id) {
            Some(idx) => {
                self.items.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &QueuedNotice> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oldest_is_dropped_at_capacity() {
        let mut queue = NoticeQueue::with_capacity(2);
        let first = queue.push(Notice::info("one"));
        queue.push(Notice::info("two"));
        queue.push(Notice::error("three"));

        assert_eq!(queue.len(), 2);
        assert!(!queue.dismiss(first));
        let texts: Vec<_> = queue.iter().map(|n| n.notice.text.as_str()).collect();
        assert_eq!(texts, ["two", "three"]);
    }

    #[test]
    fn ids_are_not_reused_after_dismiss() {
        let mut queue = NoticeQueue::default();
        let ids = queue.extend([Notice::info("a"), Notice::warning("b")]);
        assert_eq!(ids, [0, 1]);
        assert!(queue.dismiss(1));
        assert!(!queue.dismiss(1));
        assert_eq!(queue.push(Notice::success("c")), 2);
    }

    #[test]
    fn expiring_notices_leave_after_their_ttl() {
        let now = Instant::now();
        let ttl = Duration::from_secs(3);
        let mut queue = NoticeQueue::default();
        let sticky = queue.push(Notice::info("sticky"));
        queue.push_expiring(Notice::success("welcome"), ttl, now);
        queue.push_expiring(Notice::info("later"), ttl * 2, now);

        assert_eq!(queue.next_expiry(), Some(now + ttl));
        assert_eq!(queue.expire(now + ttl - Duration::from_millis(1)), 0);
        assert_eq!(queue.expire(now + ttl), 1);
        assert_eq!(queue.next_expiry(), Some(now + ttl * 2));
        assert_eq!(queue.expire(now + ttl * 10), 1);

        let ids: Vec<_> = queue.iter().map(|item| item.id).collect();
        assert_eq!(ids, [sticky]);
        assert_eq!(queue.next_expiry(), None);
    }

    #[test]
    fn dismissed_notice_does_not_count_as_expired() {
        let now = Instant::now();
        let mut queue = NoticeQueue::default();
        let id = queue.push_expiring(Notice::error("boom"), Duration::from_secs(1), now);
        assert!(queue.dismiss(id));
        assert_eq!(queue.expire(now + Duration::from_secs(5)), 0);
        assert!(queue.is_empty());
    }

    #[test]
    fn zero_capacity_still_holds_one() {
        let mut queue = NoticeQueue::with_capacity(0);
        queue.push(Notice::info("a"));
        queue.push(Notice::info("b"));
        assert_eq!(queue.len(), 1);
        queue.clear();
        assert!(queue.is_empty());
    }
}
