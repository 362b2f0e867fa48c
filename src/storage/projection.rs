//! Local mirrors of collections
//!
//! A projection never reads a collection directly. It holds the latest
//! snapshot delivered by a subscription, and tracks which of its own writes
//! have not been echoed back yet so callers can show them as in flight.

use std::collections::HashMap;
use std::sync::mpsc::{Receiver, TryRecvError};

use super::collection::Document;

#[derive(Debug, Clone)]
enum Pending<T> {
    /// Waiting for a version different from the one seen at write time
    Write { seen: Option<T> },
    /// Waiting for the document to disappear
    Delete,
}

/// Subscription-fed view of one collection
pub struct Projection<T: Document> {
    feed: Receiver<Vec<T>>,
    docs: Vec<T>,
    pending: HashMap<T::Id, Pending<T>>,
    connected: bool,
}

impl<T: Document> Projection<T> {
    pub fn new(feed: Receiver<Vec<T>>) -> Self {
        let mut projection = Self {
            feed,
            docs: Vec::new(),
            pending: HashMap::new(),
            connected: true,
        };
        projection.pump();
        projection
    }

    /// Drain the feed, keep the newest snapshot and settle pending writes
    ///
    /// Returns whether a snapshot arrived.
    pub fn pump(&mut self) -> bool {
        let mut latest = None;
        loop {
            match self.feed.try_recv() {
                Ok(snapshot) => latest = Some(snapshot),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if self.connected {
                        tracing::warn!(collection = T::COLLECTION, "Projection feed closed");
                    }
                    self.connected = false;
                    break;
                }
            }
        }

        match latest {
            Some(snapshot) => {
                self.docs = snapshot;
                self.settle();
                true
            }
            None => false,
        }
    }

    fn settle(&mut self) {
        let docs = &self.docs;
        self.pending.retain(|id, pending| {
            let current = docs.iter().find(|d| d.id() == *id);
            match pending {
                Pending::Delete => current.is_some(),
                Pending::Write { seen } => current == seen.as_ref(),
            }
        });
    }

    /// Record a create or update that has been issued for `id`
    pub fn mark_pending(&mut self, id: T::Id) {
        let seen = self.get(id).cloned();
        self.pending.insert(id, Pending::Write { seen });
    }

    /// Record a delete that has been issued for `id`
    pub fn mark_pending_delete(&mut self, id: T::Id) {
        self.pending.insert(id, Pending::Delete);
    }

    pub fn is_pending(&self, id: T::Id) -> bool {
        self.pending.contains_key(&id)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn docs(&self) -> &[T] {
        &self.docs
    }

    pub fn get(&self, id: T::Id) -> Option<&T> {
        self.docs.iter().find(|d| d.id() == id)
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Priority, Task, TaskStatus};
    use crate::storage::collection::Collection;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn task(title: &str) -> Task {
        Task::new(title, NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(), Priority::Medium)
    }

    #[test]
    fn test_mirrors_collection() {
        let temp = TempDir::new().unwrap();
        let tasks: Collection<Task> = Collection::new(temp.path().join("tasks.json"));
        let existing = tasks.create(task("Existing")).unwrap();

        let mut view = Projection::new(tasks.subscribe().unwrap());
        assert_eq!(view.docs().len(), 1);
        assert!(view.get(existing.id).is_some());

        tasks.create(task("New")).unwrap();
        assert_eq!(view.docs().len(), 1);
        assert!(view.pump());
        assert_eq!(view.docs().len(), 2);
        assert!(!view.pump());
    }

    #[test]
    fn test_pending_write_clears_on_echo() {
        let temp = TempDir::new().unwrap();
        let tasks: Collection<Task> = Collection::new(temp.path().join("tasks.json"));
        let created = tasks.create(task("Toggle me")).unwrap();
        let mut view = Projection::new(tasks.subscribe().unwrap());

        view.mark_pending(created.id);
        assert!(view.is_pending(created.id));

        let mut done = created.clone();
        done.status = TaskStatus::Done;
        tasks.update(done).unwrap();

        view.pump();
        assert!(!view.is_pending(created.id));
        assert_eq!(view.get(created.id).unwrap().status, TaskStatus::Done);
    }

    #[test]
    fn test_pending_delete_clears_when_gone() {
        let temp = TempDir::new().unwrap();
        let tasks: Collection<Task> = Collection::new(temp.path().join("tasks.json"));
        let a = tasks.create(task("A")).unwrap();
        let b = tasks.create(task("B")).unwrap();
        let mut view = Projection::new(tasks.subscribe().unwrap());

        view.mark_pending_delete(a.id);
        view.mark_pending(b.id);

        // An unrelated echo does not settle either
        tasks.create(task("C")).unwrap();
        view.pump();
        assert!(view.is_pending(a.id));
        assert!(view.is_pending(b.id));

        tasks.delete(a.id).unwrap();
        view.pump();
        assert!(!view.is_pending(a.id));
        assert_eq!(view.pending_count(), 1);
    }

    #[test]
    fn test_closed_feed_keeps_last_snapshot() {
        let temp = TempDir::new().unwrap();
        let tasks: Collection<Task> = Collection::new(temp.path().join("tasks.json"));
        tasks.create(task("A")).unwrap();
        let mut view = Projection::new(tasks.subscribe().unwrap());
        drop(tasks);

        assert!(!view.pump());
        assert!(!view.is_connected());
        assert_eq!(view.docs().len(), 1);
    }
}
