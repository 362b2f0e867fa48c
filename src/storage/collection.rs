//! Named document collections
//!
//! Each collection is an insertion-ordered list of documents persisted as a
//! single JSON file. Writes go to a scratch copy which is saved and then
//! swapped in, so a failed save leaves memory and disk untouched. After every
//! committed change the new snapshot is pushed to all live subscribers.

use std::fmt;
use std::hash::Hash;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Mutex, RwLock};

use serde::{de::DeserializeOwned, Serialize};

use crate::audit::EntityType;
use crate::error::{CreatorFlowError, CreatorFlowResult};

use super::file_io::{read_json, write_json_atomic};

/// A record stored in a [`Collection`]
pub trait Document: Clone + PartialEq + Serialize + DeserializeOwned + Send + 'static {
    type Id: Copy + Eq + Hash + Ord + fmt::Debug + fmt::Display + Send;

    /// File stem under `data/`
    const COLLECTION: &'static str;

    const ENTITY: EntityType;

    /// New documents go to the front instead of the back
    const NEWEST_FIRST: bool = false;

    fn id(&self) -> Self::Id;

    /// Whether user input (full id, short id or prefix) refers to this document
    fn matches_id(&self, input: &str) -> bool;

    /// Human-readable name for listings and the audit log
    fn label(&self) -> String;
}

/// One write inside a batch
#[derive(Debug, Clone)]
pub enum WriteOp<T: Document> {
    Create(T),
    Update(T),
    Delete(T::Id),
}

/// What a committed write did, with the snapshots needed for auditing
#[derive(Debug, Clone, PartialEq)]
pub enum Change<T> {
    Created(T),
    Updated { before: T, after: T },
    Deleted(T),
}

/// An ordered, persisted, observable set of documents
pub struct Collection<T: Document> {
    path: PathBuf,
    docs: RwLock<Vec<T>>,
    subscribers: Mutex<Vec<Sender<Vec<T>>>>,
}

fn lock_error(e: impl fmt::Display) -> CreatorFlowError {
    CreatorFlowError::Storage(format!("Failed to acquire collection lock: {}", e))
}

impl<T: Document> Collection<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            docs: RwLock::new(Vec::new()),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Load documents from disk, replacing what is in memory
    pub fn load(&self) -> CreatorFlowResult<()> {
        let loaded: Vec<T> = read_json(&self.path)?;
        tracing::debug!(
            collection = T::COLLECTION,
            count = loaded.len(),
            "Loaded collection"
        );
        let mut docs = self.docs.write().map_err(lock_error)?;
        *docs = loaded;
        drop(docs);
        self.notify()
    }

    /// All documents in collection order
    pub fn snapshot(&self) -> CreatorFlowResult<Vec<T>> {
        Ok(self.docs.read().map_err(lock_error)?.clone())
    }

    pub fn get(&self, id: T::Id) -> CreatorFlowResult<Option<T>> {
        let docs = self.docs.read().map_err(lock_error)?;
        Ok(docs.iter().find(|d| d.id() == id).cloned())
    }

    /// Look a document up from user input
    ///
    /// Ambiguous short ids resolve to nothing rather than to an arbitrary match.
    pub fn find(&self, input: &str) -> CreatorFlowResult<Option<T>> {
        let docs = self.docs.read().map_err(lock_error)?;
        let mut matches = docs.iter().filter(|d| d.matches_id(input));
        Ok(match (matches.next(), matches.next()) {
            (Some(doc), None) => Some(doc.clone()),
            _ => None,
        })
    }

    pub fn len(&self) -> CreatorFlowResult<usize> {
        Ok(self.docs.read().map_err(lock_error)?.len())
    }

    pub fn is_empty(&self) -> CreatorFlowResult<bool> {
        Ok(self.len()? == 0)
    }

    pub fn create(&self, doc: T) -> CreatorFlowResult<T> {
        match self.commit_single(WriteOp::Create(doc))? {
            Change::Created(doc) => Ok(doc),
            other => Err(unexpected(other)),
        }
    }

    /// Replace a document by id, returning the previous version
    pub fn update(&self, doc: T) -> CreatorFlowResult<Change<T>> {
        self.commit_single(WriteOp::Update(doc))
    }

    /// Remove a document by id, returning it
    pub fn delete(&self, id: T::Id) -> CreatorFlowResult<T> {
        match self.commit_single(WriteOp::Delete(id))? {
            Change::Deleted(doc) => Ok(doc),
            other => Err(unexpected(other)),
        }
    }

    fn commit_single(&self, op: WriteOp<T>) -> CreatorFlowResult<Change<T>> {
        let mut changes = self.commit_batch(vec![op])?;
        changes
            .pop()
            .ok_or_else(|| CreatorFlowError::Storage("Write produced no change".into()))
    }

    /// Apply every write or none of them
    ///
    /// The batch runs against a copy of the documents; any missing id or
    /// duplicate create aborts it. On success the copy is saved with a single
    /// file write, swapped in, and subscribers get one new snapshot.
    pub fn commit_batch(&self, ops: Vec<WriteOp<T>>) -> CreatorFlowResult<Vec<Change<T>>> {
        let mut docs = self.docs.write().map_err(lock_error)?;
        let mut scratch = docs.clone();
        let mut changes = Vec::with_capacity(ops.len());

        for op in ops {
            changes.push(apply(&mut scratch, op)?);
        }

        if changes.is_empty() {
            return Ok(changes);
        }

        if let Err(e) = write_json_atomic(&self.path, &scratch) {
            tracing::error!(collection = T::COLLECTION, error = %e, "Failed to persist batch");
            return Err(e);
        }
        *docs = scratch;
        drop(docs);

        tracing::debug!(
            collection = T::COLLECTION,
            writes = changes.len(),
            "Committed batch"
        );
        self.notify()?;
        Ok(changes)
    }

    /// Live feed of snapshots
    ///
    /// The receiver gets the current snapshot right away and another one
    /// after every committed change. Dropping it unsubscribes.
    pub fn subscribe(&self) -> CreatorFlowResult<Receiver<Vec<T>>> {
        let (tx, rx) = mpsc::channel();
        let current = self.snapshot()?;
        // The receiver is still in hand, so this send cannot fail
        let _ = tx.send(current);
        self.subscribers.lock().map_err(lock_error)?.push(tx);
        Ok(rx)
    }

    pub fn subscriber_count(&self) -> CreatorFlowResult<usize> {
        Ok(self.subscribers.lock().map_err(lock_error)?.len())
    }

    fn notify(&self) -> CreatorFlowResult<()> {
        let mut subscribers = self.subscribers.lock().map_err(lock_error)?;
        if subscribers.is_empty() {
            return Ok(());
        }
        let snapshot = self.snapshot()?;
        subscribers.retain(|tx| tx.send(snapshot.clone()).is_ok());
        Ok(())
    }
}

fn unexpected<T: Document>(change: Change<T>) -> CreatorFlowError {
    let kind = match change {
        Change::Created(_) => "create",
        Change::Updated { .. } => "update",
        Change::Deleted(_) => "delete",
    };
    CreatorFlowError::Storage(format!(
        "Unexpected {} result in {}",
        kind,
        T::COLLECTION
    ))
}

fn not_found<T: Document>(id: T::Id) -> CreatorFlowError {
    CreatorFlowError::NotFound {
        entity_type: T::ENTITY.label(),
        identifier: id.to_string(),
    }
}

fn apply<T: Document>(docs: &mut Vec<T>, op: WriteOp<T>) -> CreatorFlowResult<Change<T>> {
    match op {
        WriteOp::Create(doc) => {
            if docs.iter().any(|d| d.id() == doc.id()) {
                return Err(CreatorFlowError::Duplicate {
                    entity_type: T::ENTITY.label(),
                    identifier: doc.id().to_string(),
                });
            }
            if T::NEWEST_FIRST {
                docs.insert(0, doc.clone());
            } else {
                docs.push(doc.clone());
            }
            Ok(Change::Created(doc))
        }
        WriteOp::Update(doc) => {
            let id = doc.id();
            let slot = docs
                .iter_mut()
                .find(|d| d.id() == id)
                .ok_or_else(|| not_found::<T>(id))?;
            let before = std::mem::replace(slot, doc.clone());
            Ok(Change::Updated { before, after: doc })
        }
        WriteOp::Delete(id) => {
            let index = docs
                .iter()
                .position(|d| d.id() == id)
                .ok_or_else(|| not_found::<T>(id))?;
            Ok(Change::Deleted(docs.remove(index)))
        }
    }
}
