//! Task history structures.
//!
//! Deleted and completed tasks leave the store as `TaskSummary` copies. The
//! recovery stack feeds redo; the completion stack only grows. The insertion
//! queue records the code of every task ever added.

use crate::store::TaskStore;
use crate::task::{TaskCode, TaskRecord, TaskSummary};

/// Last-in-first-out history of deleted tasks.
#[derive(Debug, Default)]
pub struct RecoveryStack {
    entries: Vec<TaskSummary>,
}

impl RecoveryStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, summary: TaskSummary) {
        self.entries.push(summary);
    }

    /// Take the most recently deleted summary.
    pub fn pop(&mut self) -> Option<TaskSummary> {
        self.entries.pop()
    }

    /// The summary that the next redo would restore.
    pub fn peek(&self) -> Option<&TaskSummary> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries from most recently deleted to oldest.
    pub fn iter(&self) -> impl Iterator<Item = &TaskSummary> + '_ {
        self.entries.iter().rev()
    }
}

/// Append-only history of finished tasks.
#[derive(Debug, Default)]
pub struct CompletionStack {
    entries: Vec<TaskSummary>,
}

impl CompletionStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, summary: TaskSummary) {
        self.entries.push(summary);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries from most recently completed to oldest.
    pub fn iter(&self) -> impl Iterator<Item = &TaskSummary> + '_ {
        self.entries.iter().rev()
    }
}

/// Creation-order log of task codes.
///
/// Codes are looked up in the store on demand; a code whose task has since
/// been deleted or finished simply resolves to nothing.
#[derive(Debug, Default)]
pub struct InsertionQueue {
    codes: Vec<TaskCode>,
}

impl InsertionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, code: TaskCode) {
        self.codes.push(code);
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Every code ever enqueued, oldest first. Read by `TaskService::snapshot`.
    pub fn codes(&self) -> &[TaskCode] {
        &self.codes
    }

    /// Logged tasks still pending in `store`, in creation order. Read by
    /// `TaskService::snapshot`.
    pub fn live<'a>(&'a self, store: &'a TaskStore) -> impl Iterator<Item = &'a TaskRecord> + 'a {
        self.codes.iter().filter_map(move |&code| store.get(code))
    }
}
