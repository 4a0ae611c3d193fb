//! Task service façade.
//!
//! `TaskService` holds the store, the three history structures and the code
//! counter. Every use-case runs to completion against that state and reports
//! its outcome as a `Result`; nothing else mutates the structures.

use serde::Serialize;
use tracing::{debug, info};

use crate::error::TaskError;
use crate::fields::{SortKey, StoreOrder};
use crate::history::{CompletionStack, InsertionQueue, RecoveryStack};
use crate::store::TaskStore;
use crate::task::{Deadline, TaskCode, TaskRecord, TaskSummary};

/// Deadline given to a task restored by redo.
pub const REDO_DEADLINE: Deadline = Deadline {
    day: 1,
    month: 1,
    year: 2025,
};

/// Category given to a task restored by redo.
pub const REDO_CATEGORY: &str = "General";

/// Serializable view of the whole session.
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub order: StoreOrder,
    pub next_code: TaskCode,
    pub tasks: Vec<&'a TaskRecord>,
    pub completed: Vec<&'a TaskSummary>,
    pub recoverable: Vec<&'a TaskSummary>,
    /// Every code issued, oldest first.
    pub created: &'a [TaskCode],
    /// Codes from `created` that are still pending.
    pub pending_by_creation: Vec<TaskCode>,
}

/// Single owner of all task state for one session.
#[derive(Debug)]
pub struct TaskService {
    store: TaskStore,
    recovery: RecoveryStack,
    completed: CompletionStack,
    insertions: InsertionQueue,
    next_code: TaskCode,
}

impl Default for TaskService {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskService {
    pub fn new() -> Self {
        TaskService {
            store: TaskStore::new(),
            recovery: RecoveryStack::new(),
            completed: CompletionStack::new(),
            insertions: InsertionQueue::new(),
            next_code: 1,
        }
    }

    /// Add the three sample tasks used for demos.
    pub fn seed_samples(&mut self) {
        self.add("Complete React Project", 1, Deadline::new(10, 6, 2024), "Work");
        self.add("Buy Groceries", 3, Deadline::new(8, 6, 2024), "Shopping");
        self.add("Study Data Structures", 2, Deadline::new(15, 6, 2024), "Study");
    }

    /// Create a task and return its newly issued code.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        priority: i32,
        deadline: Deadline,
        category: impl Into<String>,
    ) -> TaskCode {
        let code = self.next_code;
        self.next_code += 1;

        let record = TaskRecord {
            code,
            name: name.into(),
            priority,
            deadline,
            category: category.into(),
        };
        let position = self.store.insert(record);
        self.insertions.enqueue(code);

        debug!(code, priority, position, "task added");
        code
    }

    /// Remove a pending task, keeping its name and priority for redo.
    pub fn delete(&mut self, code: TaskCode) -> Result<TaskSummary, TaskError> {
        let Some(record) = self.store.remove_by_code(code) else {
            debug!(code, "delete: task not found");
            return Err(TaskError::NotFound(code));
        };
        let summary = record.into_summary();
        self.recovery.push(summary.clone());
        debug!(code, depth = self.recovery.len(), "task deleted");
        Ok(summary)
    }

    /// Move a pending task into the completed history.
    pub fn finish(&mut self, code: TaskCode) -> Result<TaskSummary, TaskError> {
        let Some(record) = self.store.remove_by_code(code) else {
            debug!(code, "finish: task not found");
            return Err(TaskError::NotFound(code));
        };
        let summary = record.into_summary();
        self.completed.push(summary.clone());
        debug!(code, "task finished");
        Ok(summary)
    }

    /// Re-add the most recently deleted task under a new code.
    ///
    /// Only the name and priority were kept, so the restored task gets
    /// `REDO_DEADLINE` and `REDO_CATEGORY`.
    pub fn redo(&mut self) -> Result<&TaskRecord, TaskError> {
        let summary = self.recovery.pop().ok_or(TaskError::NothingToRedo)?;
        let code = self.add(summary.name, summary.priority, REDO_DEADLINE, REDO_CATEGORY);
        info!(code, "deleted task restored");
        self.store.get(code).ok_or(TaskError::NotFound(code))
    }

    /// Pending tasks whose name or category contains `keyword`, in store order.
    pub fn search(&self, keyword: &str) -> Result<Vec<&TaskRecord>, TaskError> {
        if self.store.is_empty() {
            return Err(TaskError::EmptyStore);
        }
        let hits: Vec<_> = self.store.iter().filter(|r| r.matches(keyword)).collect();
        if hits.is_empty() {
            return Err(TaskError::NoMatches(keyword.to_string()));
        }
        Ok(hits)
    }

    /// Pending tasks whose category is exactly `category`, in store order.
    pub fn filter_by_category(&self, category: &str) -> Result<Vec<&TaskRecord>, TaskError> {
        if self.store.is_empty() {
            return Err(TaskError::EmptyStore);
        }
        let hits: Vec<_> = self
            .store
            .iter()
            .filter(|r| r.category == category)
            .collect();
        if hits.is_empty() {
            return Err(TaskError::NoCategoryMatches(category.to_string()));
        }
        Ok(hits)
    }

    /// Every pending task in current store order.
    pub fn list_all(&self) -> Result<Vec<&TaskRecord>, TaskError> {
        if self.store.is_empty() {
            return Err(TaskError::EmptyStore);
        }
        Ok(self.store.iter().collect())
    }

    /// Completed tasks, most recent first.
    pub fn list_completed(&self) -> Result<Vec<&TaskSummary>, TaskError> {
        if self.completed.is_empty() {
            return Err(TaskError::NoCompletedTasks);
        }
        Ok(self.completed.iter().collect())
    }

    pub fn sort_by_priority(&mut self) {
        self.store.sort_by_priority();
        info!("tasks sorted by priority");
    }

    pub fn sort_by_deadline(&mut self) {
        self.store.sort_by_deadline();
        info!("tasks sorted by deadline");
    }

    pub fn sort_by_name(&mut self) {
        self.store.sort_by_name();
        info!("tasks sorted by name");
    }

    pub fn sort(&mut self, key: SortKey) {
        match key {
            SortKey::Priority => self.sort_by_priority(),
            SortKey::Deadline => self.sort_by_deadline(),
            SortKey::Name => self.sort_by_name(),
        }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn recovery(&self) -> &RecoveryStack {
        &self.recovery
    }

    pub fn completed(&self) -> &CompletionStack {
        &self.completed
    }

    pub fn insertions(&self) -> &InsertionQueue {
        &self.insertions
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            order: self.store.order(),
            next_code: self.next_code,
            tasks: self.store.iter().collect(),
            completed: self.completed.iter().collect(),
            recoverable: self.recovery.iter().collect(),
            created: self.insertions.codes(),
            pending_by_creation: self.insertions.live(&self.store).map(|r| r.code).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn names(service: &TaskService) -> Vec<&str> {
        service.store().iter().map(|r| r.name.as_str()).collect()
    }

    fn codes(service: &TaskService) -> Vec<TaskCode> {
        service.store().iter().map(|r| r.code).collect()
    }

    /// Report (code 1, p2) and Email (code 2, p1).
    #[fixture]
    fn service() -> TaskService {
        let mut service = TaskService::new();
        assert_eq!(service.add("Report", 2, Deadline::new(10, 6, 2025), "Work"), 1);
        assert_eq!(service.add("Email", 1, Deadline::new(1, 1, 2025), "Work"), 2);
        service
    }

    #[rstest]
    fn list_all_orders_by_priority(service: TaskService) {
        let listed: Vec<_> = service
            .list_all()
            .expect("store is not empty")
            .iter()
            .map(|r| (r.name.as_str(), r.code))
            .collect();
        assert_eq!(listed, vec![("Email", 2), ("Report", 1)]);
    }

    #[rstest]
    fn delete_then_redo_issues_new_code_with_placeholders(mut service: TaskService) {
        let deleted = service.delete(1).expect("code 1 exists");
        assert_eq!(deleted.name, "Report");
        assert_eq!(service.recovery().peek(), Some(&deleted));
        assert_eq!(names(&service), vec!["Email"]);

        let restored = service.redo().expect("one task to redo").clone();
        assert_eq!(restored.code, 3);
        assert_eq!(restored.name, "Report");
        assert_eq!(restored.priority, 2);
        assert_eq!(restored.deadline, REDO_DEADLINE);
        assert_eq!(restored.category, REDO_CATEGORY);
        assert!(service.recovery().is_empty());
        assert_eq!(codes(&service), vec![2, 3]);
    }

    #[rstest]
    fn finish_moves_task_to_completed_history(mut service: TaskService) {
        let done = service.finish(2).expect("code 2 exists");
        assert_eq!(done.name, "Email");
        assert_eq!(names(&service), vec!["Report"]);

        let completed: Vec<_> = service
            .list_completed()
            .expect("one completed task")
            .iter()
            .map(|s| (s.name.as_str(), s.priority))
            .collect();
        assert_eq!(completed, vec![("Email", 1)]);
        assert!(service.recovery().is_empty());
    }

    #[rstest]
    fn deleting_or_finishing_a_missing_code_is_not_found(mut service: TaskService) {
        assert_eq!(service.delete(99), Err(TaskError::NotFound(99)));
        assert_eq!(service.finish(99), Err(TaskError::NotFound(99)));
        assert_eq!(service.store().len(), 2);
        assert!(service.recovery().is_empty());
        assert!(service.completed().is_empty());
    }

    #[rstest]
    fn a_finished_code_cannot_be_finished_or_deleted_again(mut service: TaskService) {
        service.finish(1).expect("code 1 exists");
        assert_eq!(service.finish(1), Err(TaskError::NotFound(1)));
        assert_eq!(service.delete(1), Err(TaskError::NotFound(1)));
        assert_eq!(service.completed().len(), 1);
    }

    #[test]
    fn redo_on_empty_history_reports_nothing_to_redo() {
        let mut service = TaskService::new();
        assert_eq!(service.redo().map(|r| r.code), Err(TaskError::NothingToRedo));
    }

    #[test]
    fn codes_increase_without_reuse_after_deletions() {
        let mut service = TaskService::new();
        let mut issued = Vec::new();
        for i in 0..5 {
            let code = service.add(format!("t{i}"), i % 3, Deadline::new(1, 1, 2025), "x");
            issued.push(code);
            if i % 2 == 0 {
                service.delete(code).expect("just added");
            }
        }
        service.redo().expect("deletions were made");
        issued.push(service.insertions().codes().last().copied().unwrap_or_default());
        assert_eq!(issued, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(service.insertions().codes(), &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn equal_priorities_keep_insertion_order() {
        let mut service = TaskService::new();
        for (name, priority) in [("a", 3), ("b", 1), ("c", 3), ("d", 1), ("e", 2)] {
            service.add(name, priority, Deadline::new(1, 1, 2025), "x");
        }
        assert_eq!(names(&service), vec!["b", "d", "e", "a", "c"]);
    }

    #[test]
    fn search_distinguishes_empty_store_from_no_matches() {
        let mut service = TaskService::new();
        assert_eq!(service.search("x"), Err(TaskError::EmptyStore));

        service.add("Write report", 2, Deadline::new(1, 1, 2025), "Work");
        assert_eq!(
            service.search("Gym"),
            Err(TaskError::NoMatches("Gym".to_string()))
        );
    }

    #[rstest]
    fn search_matches_name_or_category_in_store_order(mut service: TaskService) {
        service.add("Gym", 3, Deadline::new(1, 1, 2025), "Health");
        service.add("Plan sprint", 0, Deadline::new(1, 1, 2025), "Work");

        let hits: Vec<_> = service
            .search("Work")
            .expect("matches exist")
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(hits, vec!["Plan sprint", "Email", "Report"]);

        assert_eq!(service.search("work"), Err(TaskError::NoMatches("work".to_string())));
    }

    #[rstest]
    fn category_filter_is_exact(mut service: TaskService) {
        service.add("Gym", 3, Deadline::new(1, 1, 2025), "Health");
        let hits: Vec<_> = service
            .filter_by_category("Health")
            .expect("one health task")
            .iter()
            .map(|r| r.code)
            .collect();
        assert_eq!(hits, vec![3]);
        assert_eq!(
            service.filter_by_category("Heal"),
            Err(TaskError::NoCategoryMatches("Heal".to_string()))
        );
    }

    #[rstest]
    fn deadline_sort_then_add_restores_priority_order(mut service: TaskService) {
        service.add("Gym", 3, Deadline::new(1, 1, 2020), "Health");
        service.sort_by_deadline();
        assert_eq!(names(&service), vec!["Gym", "Email", "Report"]);

        service.add("Call", 1, Deadline::new(1, 1, 2030), "Home");
        assert_eq!(service.store().order(), StoreOrder::Priority);
        assert_eq!(names(&service), vec!["Email", "Call", "Report", "Gym"]);
    }

    #[rstest]
    fn sort_key_dispatches(mut service: TaskService) {
        service.sort(SortKey::Deadline);
        assert_eq!(service.store().order(), StoreOrder::Deadline);
        assert_eq!(codes(&service), vec![2, 1]);
        service.sort(SortKey::Name);
        assert_eq!(service.store().order(), StoreOrder::Name);
        assert_eq!(codes(&service), vec![2, 1]);
        service.sort(SortKey::Priority);
        assert_eq!(service.store().order(), StoreOrder::Priority);
        assert_eq!(codes(&service), vec![2, 1]);
    }

    #[test]
    fn empty_lists_report_empty() {
        let service = TaskService::new();
        assert_eq!(service.list_all(), Err(TaskError::EmptyStore));
        assert_eq!(service.list_completed(), Err(TaskError::NoCompletedTasks));
    }

    #[test]
    fn samples_take_the_first_codes() {
        let mut service = TaskService::new();
        service.seed_samples();
        assert_eq!(codes(&service), vec![1, 3, 2]);
        assert_eq!(service.add("Next", 1, Deadline::new(1, 1, 2025), "x"), 4);
    }

    #[rstest]
    fn snapshot_serializes_current_state(mut service: TaskService) {
        service.delete(1).expect("code 1 exists");
        service.finish(2).expect("code 2 exists");
        let json = serde_json::to_value(service.snapshot()).expect("snapshot serializes");

        assert_eq!(json["next_code"], 3);
        assert_eq!(json["order"], "priority");
        assert_eq!(json["tasks"].as_array().map(Vec::len), Some(0));
        assert_eq!(json["completed"][0]["name"], "Email");
        assert_eq!(json["recoverable"][0]["name"], "Report");
        assert_eq!(json["created"], serde_json::json!([1, 2]));
        assert_eq!(json["pending_by_creation"], serde_json::json!([]));
    }

    #[rstest]
    fn snapshot_lists_pending_tasks_in_creation_order(mut service: TaskService) {
        service.add("Gym", 3, Deadline::new(1, 1, 2025), "Health");
        service.finish(1).expect("code 1 exists");
        let snapshot = service.snapshot();
        assert_eq!(snapshot.created, &[1, 2, 3]);
        assert_eq!(snapshot.pending_by_creation, vec![2, 3]);
    }
}
