//! Ordered storage for pending tasks.
//!
//! The `TaskStore` owns every live `TaskRecord`. Records are kept in ascending
//! priority with insertion order preserved among equal priorities, unless a
//! deadline or name sort has temporarily replaced that ordering.

use crate::fields::StoreOrder;
use crate::task::{TaskCode, TaskRecord};

/// In-memory ordered collection of pending tasks.
#[derive(Debug, Default)]
pub struct TaskStore {
    records: Vec<TaskRecord>,
    order: StoreOrder,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The ordering currently held.
    pub fn order(&self) -> StoreOrder {
        self.order
    }

    /// Insert a record after every record whose priority is less than or
    /// equal to its own.
    ///
    /// If the store was left in deadline or name order, priority order is restored
    /// first. Returns the position the record landed at.
    pub fn insert(&mut self, record: TaskRecord) -> usize {
        if self.order != StoreOrder::Priority {
            self.sort_by_priority();
        }
        let at = self
            .records
            .partition_point(|existing| existing.priority <= record.priority);
        self.records.insert(at, record);
        at
    }

    /// Detach the record with the given code.
    pub fn remove_by_code(&mut self, code: TaskCode) -> Option<TaskRecord> {
        let at = self.records.iter().position(|r| r.code == code)?;
        Some(self.records.remove(at))
    }

    /// Get a record by code.
    pub fn get(&self, code: TaskCode) -> Option<&TaskRecord> {
        self.records.iter().find(|r| r.code == code)
    }

    /// Records in current order, head to tail.
    pub fn iter(&self) -> std::slice::Iter<'_, TaskRecord> {
        self.records.iter()
    }

    /// Re-establish ascending priority order.
    ///
    /// Codes are issued in insertion order, so ties fall back to the code.
    pub fn sort_by_priority(&mut self) {
        self.records.sort_by_key(|r| (r.priority, r.code));
        self.order = StoreOrder::Priority;
    }

    /// Order by deadline (year, month, day) ascending. Stable among equal
    /// deadlines.
    pub fn sort_by_deadline(&mut self) {
        self.records.sort_by_key(|r| r.deadline.sort_key());
        self.order = StoreOrder::Deadline;
    }

    /// Order alphabetically by name, ignoring case first and then comparing
    /// exactly. Stable among equal names.
    pub fn sort_by_name(&mut self) {
        self.records
            .sort_by(|a, b| {
                a.name
                    .to_lowercase()
                    .cmp(&b.name.to_lowercase())
                    .then_with(|| a.name.cmp(&b.name))
            });
        self.order = StoreOrder::Name;
    }
}

impl<'a> IntoIterator for &'a TaskStore {
    type Item = &'a TaskRecord;
    type IntoIter = std::slice::Iter<'a, TaskRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Deadline;
    use rstest::{fixture, rstest};

    fn record(code: TaskCode, priority: i32, deadline: Deadline) -> TaskRecord {
        TaskRecord {
            code,
            name: format!("task-{code}"),
            priority,
            deadline,
            category: "Work".to_string(),
        }
    }

    fn codes(store: &TaskStore) -> Vec<TaskCode> {
        store.iter().map(|r| r.code).collect()
    }

    #[fixture]
    fn store() -> TaskStore {
        let mut store = TaskStore::new();
        store.insert(record(1, 3, Deadline::new(5, 3, 2025)));
        store.insert(record(2, 1, Deadline::new(1, 1, 2026)));
        store.insert(record(3, 3, Deadline::new(20, 1, 2025)));
        store.insert(record(4, 2, Deadline::new(20, 1, 2025)));
        store
    }

    #[test]
    fn insert_into_empty_store_is_sole_element() {
        let mut store = TaskStore::new();
        assert_eq!(store.insert(record(1, 4, Deadline::new(1, 1, 2025))), 0);
        assert_eq!(codes(&store), vec![1]);
    }

    #[rstest]
    fn insert_keeps_priority_order_with_ties_in_insertion_order(store: TaskStore) {
        assert_eq!(codes(&store), vec![2, 4, 1, 3]);
    }

    #[rstest]
    fn insert_places_new_record_before_first_strictly_greater(mut store: TaskStore) {
        let at = store.insert(record(5, 2, Deadline::new(1, 1, 2025)));
        assert_eq!(at, 2);
        assert_eq!(codes(&store), vec![2, 4, 5, 1, 3]);
    }

    #[rstest]
    fn insert_with_highest_priority_number_appends(mut store: TaskStore) {
        store.insert(record(5, 99, Deadline::new(1, 1, 2025)));
        assert_eq!(codes(&store).last(), Some(&5));
    }

    #[rstest]
    fn remove_by_code_detaches_record(mut store: TaskStore) {
        let removed = store.remove_by_code(4).map(|r| r.code);
        assert_eq!(removed, Some(4));
        assert_eq!(codes(&store), vec![2, 1, 3]);
        assert!(store.get(4).is_none());
    }

    #[rstest]
    fn remove_missing_code_leaves_store_untouched(mut store: TaskStore) {
        assert!(store.remove_by_code(42).is_none());
        assert_eq!(store.len(), 4);
    }

    #[rstest]
    fn iteration_is_restartable(store: TaskStore) {
        let first: Vec<_> = store.iter().map(|r| r.code).collect();
        let second: Vec<_> = (&store).into_iter().map(|r| r.code).collect();
        assert_eq!(first, second);
    }

    #[rstest]
    fn sort_by_deadline_orders_year_month_day_stably(mut store: TaskStore) {
        store.sort_by_deadline();
        assert_eq!(store.order(), StoreOrder::Deadline);
        // 4 and 3 share a deadline; 4 was ahead of 3 in priority order.
        assert_eq!(codes(&store), vec![4, 3, 1, 2]);
    }

    #[rstest]
    fn sort_by_priority_is_idempotent(mut store: TaskStore) {
        let before = codes(&store);
        store.sort_by_priority();
        assert_eq!(codes(&store), before);
    }

    #[test]
    fn sort_by_name_ignores_case() {
        let mut store = TaskStore::new();
        for (code, name) in [(1, "gym"), (2, "Email"), (3, "report"), (4, "Buy milk")] {
            store.insert(TaskRecord {
                name: name.to_string(),
                ..record(code, 1, Deadline::new(1, 1, 2025))
            });
        }
        store.sort_by_name();
        assert_eq!(store.order(), StoreOrder::Name);
        assert_eq!(codes(&store), vec![4, 2, 1, 3]);
    }

    #[rstest]
    fn insert_after_name_sort_restores_priority_order(mut store: TaskStore) {
        store.sort_by_name();
        store.insert(record(5, 1, Deadline::new(1, 1, 2025)));
        assert_eq!(store.order(), StoreOrder::Priority);
        assert_eq!(codes(&store), vec![2, 5, 4, 1, 3]);
    }

    #[rstest]
    fn insert_after_deadline_sort_restores_priority_order(mut store: TaskStore) {
        store.sort_by_deadline();
        store.insert(record(5, 2, Deadline::new(1, 1, 2020)));
        assert_eq!(store.order(), StoreOrder::Priority);
        assert_eq!(codes(&store), vec![2, 4, 5, 1, 3]);
    }
}
