//! Capped, insertion-ordered store of submitted labels.
//!
//! The store is the source of truth for which labels exist. It also keeps the
//! motion parameters generated for each label, so re-entering the animation
//! view reuses them instead of drawing new ones.

use std::collections::VecDeque;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use marquee_motion::MotionParameters;

use crate::error::StoreError;

/// Stable identifier of a submitted label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LabelId(pub u64);

impl fmt::Display for LabelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "label-{}", self.0)
    }
}

/// One submitted label.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LabelEntry {
    /// Stable id.
    pub id: LabelId,
    /// Trimmed display text.
    pub text: String,
    /// Submission time in milliseconds.
    pub submitted_at_ms: u64,
    /// Motion generated for this label, once it has been animated.
    pub motion: Option<MotionParameters>,
}

/// A change to the store's membership or contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreChange {
    /// A label was appended.
    Added(LabelId),
    /// The oldest label was dropped to make room.
    Evicted(LabelId),
    /// All labels were removed.
    Cleared(Vec<LabelId>),
    /// Motion parameters were recorded for a label.
    MotionAssigned(LabelId),
}

/// Handle returned by [`LabelStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&StoreChange) + Send>;

/// Ring buffer of at most `capacity` labels, oldest first.
pub struct LabelStore {
    entries: VecDeque<LabelEntry>,
    capacity: usize,
    max_text_len: usize,
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl fmt::Debug for LabelStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LabelStore")
            .field("entries", &self.entries)
            .field("capacity", &self.capacity)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Default for LabelStore {
    fn default() -> Self {
        Self::new(5, 50)
    }
}

impl LabelStore {
    /// Creates an empty store.
    pub fn new(capacity: usize, max_text_len: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity,
            max_text_len,
            next_id: 1,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Maximum number of labels.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no labels.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if the next submission will evict the oldest label.
    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    /// Labels, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &LabelEntry> {
        self.entries.iter()
    }

    /// Looks up a label.
    pub fn get(&self, id: LabelId) -> Option<&LabelEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Returns true if `id` is present.
    pub fn contains(&self, id: LabelId) -> bool {
        self.get(id).is_some()
    }

    /// Appends a label, evicting the oldest one first when full.
    ///
    /// The text is trimmed; empty or over-long text is rejected and leaves
    /// the store untouched.
    pub fn submit(&mut self, text: &str, now_ms: u64) -> Result<LabelId, StoreError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(StoreError::EmptyText);
        }
        let len = text.chars().count();
        if len > self.max_text_len {
            return Err(StoreError::TextTooLong {
                len,
                max: self.max_text_len,
            });
        }

        let mut evicted = Vec::new();
        while self.entries.len() >= self.capacity {
            match self.entries.pop_front() {
                Some(entry) => evicted.push(entry.id),
                None => break,
            }
        }

        let id = LabelId(self.next_id);
        self.next_id += 1;
        self.entries.push_back(LabelEntry {
            id,
            text: text.to_string(),
            submitted_at_ms: now_ms,
            motion: None,
        });

        for old in evicted {
            self.notify(&StoreChange::Evicted(old));
        }
        self.notify(&StoreChange::Added(id));
        Ok(id)
    }

    /// Removes every label.
    pub fn clear(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        let ids = self.entries.drain(..).map(|e| e.id).collect();
        self.notify(&StoreChange::Cleared(ids));
    }

    /// Records the motion generated for `id`.
    ///
    /// Parameters are written once; later calls for the same id are ignored
    /// so a label's motion never changes. Returns true if stored.
    pub fn assign_motion(&mut self, id: LabelId, motion: MotionParameters) -> bool {
        let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) else {
            return false;
        };
        if entry.motion.is_some() {
            return false;
        }
        entry.motion = Some(motion);
        self.notify(&StoreChange::MotionAssigned(id));
        true
    }

    /// Registers a change listener.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&StoreChange) + Send + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns true if it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    fn notify(&mut self, change: &StoreChange) {
        for (_, listener) in &mut self.listeners {
            listener(change);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_motion::MotionConfig;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_submit_trims_and_assigns_ids() {
        let mut store = LabelStore::default();
        let a = store.submit("  hello  ", 10).unwrap();
        let b = store.submit("world", 20).unwrap();

        assert!(b > a);
        assert_eq!(store.get(a).unwrap().text, "hello");
        assert_eq!(store.get(b).unwrap().submitted_at_ms, 20);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_submit_rejects_bad_text() {
        let mut store = LabelStore::new(5, 4);
        assert_eq!(store.submit("   ", 0), Err(StoreError::EmptyText));
        assert_eq!(
            store.submit("toolong", 0),
            Err(StoreError::TextTooLong { len: 7, max: 4 })
        );
        assert!(store.is_empty());
        // Limit counts characters, not bytes.
        assert!(store.submit("éééé", 0).is_ok());
    }

    #[test]
    fn test_sixth_evicts_oldest() {
        let mut store = LabelStore::default();
        let ids: Vec<_> = (0..5)
            .map(|i| store.submit(&format!("label {i}"), i).unwrap())
            .collect();
        assert_eq!(store.len(), store.capacity());
        assert!(store.is_full());

        let sixth = store.submit("sixth", 5).unwrap();

        assert_eq!(store.len(), 5);
        assert!(!store.contains(ids[0]));
        let order: Vec<_> = store.entries().map(|e| e.id).collect();
        assert_eq!(order, vec![ids[1], ids[2], ids[3], ids[4], sixth]);
    }

    #[test]
    fn test_listeners_see_eviction_before_add() {
        let mut store = LabelStore::new(1, 50);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        store.subscribe(move |change| sink.lock().unwrap().push(change.clone()));

        let a = store.submit("a", 0).unwrap();
        let b = store.submit("b", 1).unwrap();
        store.clear();

        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                StoreChange::Added(a),
                StoreChange::Evicted(a),
                StoreChange::Added(b),
                StoreChange::Cleared(vec![b]),
            ]
        );
    }

    #[test]
    fn test_unsubscribe() {
        let mut store = LabelStore::default();
        let count = Arc::new(Mutex::new(0));
        let sink = Arc::clone(&count);
        let sub = store.subscribe(move |_| *sink.lock().unwrap() += 1);

        store.submit("a", 0).unwrap();
        assert!(store.unsubscribe(sub));
        store.submit("b", 0).unwrap();

        assert_eq!(*count.lock().unwrap(), 1);
        assert!(!store.unsubscribe(sub));
    }

    #[test]
    fn test_motion_assigned_once() {
        let mut store = LabelStore::default();
        let id = store.submit("a", 0).unwrap();
        let config = MotionConfig::default();
        let mut rng = StdRng::seed_from_u64(3);
        let first = marquee_motion::generate(&config, &mut rng);
        let second = marquee_motion::generate(&config, &mut rng);

        assert!(store.assign_motion(id, first));
        assert!(!store.assign_motion(id, second));
        assert_eq!(store.get(id).unwrap().motion, Some(first));
        assert!(!store.assign_motion(LabelId(999), first));
    }

    #[test]
    fn test_clear_empty_is_silent() {
        let mut store = LabelStore::default();
        let count = Arc::new(Mutex::new(0));
        let sink = Arc::clone(&count);
        store.subscribe(move |_| *sink.lock().unwrap() += 1);
        store.clear();
        assert_eq!(*count.lock().unwrap(), 0);
    }
}
