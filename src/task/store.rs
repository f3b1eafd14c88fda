//! In-memory ordered task list.
//!
//! Every effective mutation publishes a fresh `Arc<Vec<_>>`; published
//! snapshots are never written to again, so `Arc::ptr_eq` on two snapshots
//! tells whether anything changed in between. Unchanged tasks keep their
//! `Arc<Task>` across mutations.

use super::{seed::seed_tasks, Task};
use log::*;
use std::sync::Arc;
use tokio::sync::watch;

/// Immutable view of the store contents at one point in time.
///
pub type Tasks = Arc<Vec<Arc<Task>>>;

/// Holds the ordered task list and notifies subscribers of changes.
///
pub struct TaskStore {
    tx: watch::Sender<Tasks>,
}

impl Default for TaskStore {
    fn default() -> Self {
        TaskStore::new()
    }
}

impl TaskStore {
    /// Return a new empty store.
    ///
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Arc::new(Vec::new()));
        TaskStore { tx }
    }

    /// Return a new store already holding the sample tasks.
    ///
    pub fn seeded() -> Self {
        let store = TaskStore::new();
        store.seed();
        store
    }

    /// Replace the contents with the sample tasks.
    ///
    pub fn seed(&self) {
        self.replace(seed_tasks());
    }

    /// Replace the contents with the given tasks.
    ///
    pub fn replace(&self, tasks: Vec<Task>) {
        debug!("Replacing task store contents with {} tasks.", tasks.len());
        self.tx
            .send_replace(Arc::new(tasks.into_iter().map(Arc::new).collect()));
    }

    /// Append the task. Returns false without change if the id is taken.
    ///
    pub fn add(&self, task: Task) -> bool {
        self.tx.send_if_modified(|tasks| {
            if tasks.iter().any(|t| t.id == task.id) {
                debug!("Task {} already exists; skipping add.", task.id);
                return false;
            }
            let mut next = Vec::with_capacity(tasks.len() + 1);
            next.extend(tasks.iter().cloned());
            next.push(Arc::new(task));
            *tasks = Arc::new(next);
            true
        })
    }

    /// Replace the task with the same id. Returns false if there is none.
    ///
    pub fn update(&self, task: Task) -> bool {
        self.tx.send_if_modified(|tasks| {
            let Some(index) = tasks.iter().position(|t| t.id == task.id) else {
                debug!("Task {} not found; skipping update.", task.id);
                return false;
            };
            let mut next: Vec<Arc<Task>> = tasks.iter().cloned().collect();
            next[index] = Arc::new(task);
            *tasks = Arc::new(next);
            true
        })
    }

    /// Remove the task with the given id. Returns false if there is none.
    ///
    pub fn remove(&self, id: i64) -> bool {
        self.tx.send_if_modified(|tasks| {
            if !tasks.iter().any(|t| t.id == id) {
                debug!("Task {} not found; skipping remove.", id);
                return false;
            }
            *tasks = Arc::new(tasks.iter().filter(|t| t.id != id).cloned().collect());
            true
        })
    }

    /// Return the task with the given id.
    ///
    pub fn get(&self, id: i64) -> Option<Arc<Task>> {
        self.tx.borrow().iter().find(|t| t.id == id).cloned()
    }

    /// Return the position of the task with the given id.
    ///
    pub fn position(&self, id: i64) -> Option<usize> {
        self.tx.borrow().iter().position(|t| t.id == id)
    }

    /// Return the current contents.
    ///
    pub fn snapshot(&self) -> Tasks {
        Arc::clone(&self.tx.borrow())
    }

    pub fn len(&self) -> usize {
        self.tx.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tx.borrow().is_empty()
    }

    /// Return a receiver that observes every published snapshot.
    ///
    pub fn subscribe(&self) -> watch::Receiver<Tasks> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::{Fake, Faker};
    use std::collections::HashSet;

    fn ids(store: &TaskStore) -> Vec<i64> {
        store.snapshot().iter().map(|t| t.id).collect()
    }

    #[test]
    fn test_seed_has_twelve_tasks() {
        let store = TaskStore::seeded();
        assert_eq!(store.len(), 12);
        assert_eq!(ids(&store), (1..=12).collect::<Vec<i64>>());
    }

    #[test]
    fn test_add_then_lookup() {
        let store = TaskStore::seeded();
        let task = Task::new(1000, "X", "Y");
        assert!(store.add(task.clone()));
        assert_eq!(store.len(), 13);
        assert_eq!(*store.get(1000).unwrap(), task);
        assert_eq!(ids(&store).last(), Some(&1000));
    }

    #[test]
    fn test_add_generated_tasks_lookup() {
        let store = TaskStore::new();
        for _ in 0..20 {
            let task: Task = Faker.fake();
            let added = store.add(task.clone());
            if added {
                assert_eq!(*store.get(task.id).unwrap(), task);
            } else {
                assert!(store.get(task.id).is_some());
            }
        }
    }

    #[test]
    fn test_add_duplicate_id_is_noop() {
        let store = TaskStore::seeded();
        let before = store.snapshot();
        assert!(!store.add(Task::new(1, "Dup", "Dup")));
        assert!(Arc::ptr_eq(&before, &store.snapshot()));
        assert_eq!(store.get(1).unwrap().title, "Complete React Native Project");
    }

    #[test]
    fn test_add_then_remove_restores_contents() {
        let store = TaskStore::seeded();
        let before: HashSet<Task> = store.snapshot().iter().map(|t| (**t).clone()).collect();
        store.add(Task::new(1000, "X", "Y"));
        store.remove(1000);
        let after: HashSet<Task> = store.snapshot().iter().map(|t| (**t).clone()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_update_replaces_only_matching_task() {
        let store = TaskStore::seeded();
        let before = store.snapshot();
        assert!(store.update(Task::new(3, "New", "New")));
        let after = store.snapshot();

        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(after.len(), before.len());
        for (old, new) in before.iter().zip(after.iter()) {
            if old.id == 3 {
                assert_eq!(new.title, "New");
                assert_eq!(new.description, "New");
            } else {
                assert!(Arc::ptr_eq(old, new));
            }
        }
        // The earlier snapshot is untouched.
        assert_eq!(before[2].title, "Morning Workout Routine");
    }

    #[test]
    fn test_update_missing_is_noop() {
        let store = TaskStore::seeded();
        let before = store.snapshot();
        assert!(!store.update(Task::new(99, "Nope", "Nope")));
        assert!(Arc::ptr_eq(&before, &store.snapshot()));
    }

    #[test]
    fn test_remove_missing_is_idempotent() {
        let store = TaskStore::seeded();
        let before = store.snapshot();
        assert!(!store.remove(42));
        assert!(!store.remove(42));
        assert!(Arc::ptr_eq(&before, &store.snapshot()));
    }

    #[test]
    fn test_remove_preserves_order() {
        let store = TaskStore::seeded();
        assert!(store.remove(5));
        assert_eq!(ids(&store), vec![1, 2, 3, 4, 6, 7, 8, 9, 10, 11, 12]);
        assert_eq!(store.position(6), Some(4));
    }

    #[test]
    fn test_subscribers_see_mutations() {
        let store = TaskStore::seeded();
        let mut rx = store.subscribe();
        rx.borrow_and_update();
        assert!(!rx.has_changed().unwrap());

        store.remove(999);
        assert!(!rx.has_changed().unwrap());

        store.remove(1);
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().len(), 11);
    }

    #[test]
    fn test_stores_are_independent() {
        let a = TaskStore::seeded();
        let b = TaskStore::seeded();
        a.remove(1);
        assert_eq!(a.len(), 11);
        assert_eq!(b.len(), 12);
    }
}
