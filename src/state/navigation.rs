//! Navigation-related state types.
//!
//! Routes carry their payloads; results travelling back to the task list go
//! through a [`ParamSlot`], which hands its value out at most once.

use crate::task::Task;
use log::*;

/// Identifies one mounted view. Ids are never reused within a navigator.
///
pub type ViewId = u64;

/// Specifying how the task form was opened.
///
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum FormMode {
    Add,
    Edit { task: Task },
}

/// Specifying the different views and their parameters.
///
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Route {
    Splash,
    SignIn,
    Register,
    TaskList,
    TaskDetail { task: Task },
    TaskForm(FormMode),
}

impl Route {
    /// Return whether the route belongs to the signed-in flow.
    ///
    pub fn requires_session(&self) -> bool {
        matches!(
            self,
            Route::TaskList | Route::TaskDetail { .. } | Route::TaskForm(_)
        )
    }
}

/// Results delivered to the task list when a child view finishes.
///
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ListOutcome {
    NewTask(Task),
    DeletedTaskId(i64),
}

/// Specifying the confirmation popups.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Popup {
    Logout,
    DeleteTask { id: i64 },
}

impl Popup {
    pub fn title(&self) -> &'static str {
        match self {
            Popup::Logout => "Logout",
            Popup::DeleteTask { .. } => "Delete Task",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Popup::Logout => "Are you sure you want to logout from the app?",
            Popup::DeleteTask { .. } => "Are you sure you want to delete this task?",
        }
    }

    pub fn confirm_label(&self) -> &'static str {
        match self {
            Popup::Logout => "Logout",
            Popup::DeleteTask { .. } => "Delete",
        }
    }
}

/// Single-value mailbox consumed by `take`.
///
#[derive(Debug, Clone)]
pub struct ParamSlot<T> {
    value: Option<T>,
}

impl<T> Default for ParamSlot<T> {
    fn default() -> Self {
        ParamSlot { value: None }
    }
}

impl<T: std::fmt::Debug> ParamSlot<T> {
    /// Place a value, replacing one that was never consumed.
    ///
    pub fn deliver(&mut self, value: T) {
        if let Some(stale) = self.value.replace(value) {
            warn!("Dropping unconsumed navigation parameter {:?}.", stale);
        }
    }

    /// Take the value out, leaving the slot empty.
    ///
    pub fn take(&mut self) -> Option<T> {
        self.value.take()
    }

    pub fn is_pending(&self) -> bool {
        self.value.is_some()
    }
}

/// A mounted view.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewEntry {
    pub id: ViewId,
    pub route: Route,
}

/// Stack of mounted views.
///
#[derive(Debug)]
pub struct Navigator {
    stack: Vec<ViewEntry>,
    next_id: ViewId,
    list_params: ParamSlot<ListOutcome>,
}

impl Default for Navigator {
    fn default() -> Self {
        Navigator::new(Route::Splash)
    }
}

impl Navigator {
    pub fn new(root: Route) -> Self {
        Navigator {
            stack: vec![ViewEntry { id: 0, route: root }],
            next_id: 1,
            list_params: ParamSlot::default(),
        }
    }

    fn mount(&mut self, route: Route) -> ViewEntry {
        let entry = ViewEntry {
            id: self.next_id,
            route,
        };
        self.next_id += 1;
        entry
    }

    /// Return the top view.
    ///
    pub fn current(&self) -> &ViewEntry {
        // The stack always holds its root.
        &self.stack[self.stack.len() - 1]
    }

    pub fn current_route(&self) -> &Route {
        &self.current().route
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Return whether the view is still on the stack.
    ///
    pub fn is_mounted(&self, id: ViewId) -> bool {
        self.stack.iter().any(|e| e.id == id)
    }

    /// Return the route of a mounted view.
    ///
    pub fn route_of(&self, id: ViewId) -> Option<&Route> {
        self.stack.iter().find(|e| e.id == id).map(|e| &e.route)
    }

    /// Push a view and return its id.
    ///
    pub fn push(&mut self, route: Route) -> ViewId {
        debug!("Navigating to {:?}.", route);
        let entry = self.mount(route);
        let id = entry.id;
        self.stack.push(entry);
        id
    }

    /// Pop the top view unless it is the root.
    ///
    pub fn pop(&mut self) -> Option<ViewEntry> {
        if self.stack.len() > 1 {
            self.stack.pop()
        } else {
            None
        }
    }

    /// Discard every view and mount a new root.
    ///
    pub fn reset(&mut self, route: Route) -> ViewId {
        debug!("Resetting navigation to {:?}.", route);
        let entry = self.mount(route);
        let id = entry.id;
        self.stack = vec![entry];
        self.list_params = ParamSlot::default();
        id
    }

    /// Unwind to the nearest view matching the predicate. Returns false
    /// and leaves the stack alone if there is none.
    ///
    fn unwind_to(&mut self, matches: impl Fn(&Route) -> bool) -> bool {
        match self.stack.iter().rposition(|e| matches(&e.route)) {
            Some(index) => {
                self.stack.truncate(index + 1);
                true
            }
            None => false,
        }
    }

    /// Unwind to the task detail view and show the updated snapshot.
    ///
    pub fn return_to_detail(&mut self, updated: Task) -> bool {
        if !self.unwind_to(|r| matches!(r, Route::TaskDetail { .. })) {
            warn!("No task detail view to return to.");
            return false;
        }
        let top = self.stack.len() - 1;
        self.stack[top].route = Route::TaskDetail { task: updated };
        true
    }

    /// Unwind to the task list and leave it the outcome.
    ///
    pub fn return_to_list(&mut self, outcome: ListOutcome) -> bool {
        if !self.unwind_to(|r| matches!(r, Route::TaskList)) {
            warn!("No task list view to return to.");
            return false;
        }
        self.list_params.deliver(outcome);
        true
    }

    /// Consume the outcome waiting for the task list.
    ///
    pub fn take_list_outcome(&mut self) -> Option<ListOutcome> {
        self.list_params.take()
    }

    pub fn has_list_outcome(&self) -> bool {
        self.list_params.is_pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: i64) -> Task {
        Task::new(id, format!("Task {}", id), "Body")
    }

    #[test]
    fn test_route_requires_session() {
        assert!(!Route::Splash.requires_session());
        assert!(!Route::SignIn.requires_session());
        assert!(!Route::Register.requires_session());
        assert!(Route::TaskList.requires_session());
        assert!(Route::TaskDetail { task: task(1) }.requires_session());
        assert!(Route::TaskForm(FormMode::Add).requires_session());
    }

    #[test]
    fn test_param_slot_consumed_once() {
        let mut slot = ParamSlot::default();
        slot.deliver(ListOutcome::DeletedTaskId(3));
        assert!(slot.is_pending());
        assert_eq!(slot.take(), Some(ListOutcome::DeletedTaskId(3)));
        assert_eq!(slot.take(), None);
        assert!(!slot.is_pending());
    }

    #[test]
    fn test_push_pop_keeps_root() {
        let mut nav = Navigator::new(Route::TaskList);
        let form = nav.push(Route::TaskForm(FormMode::Add));
        assert!(nav.is_mounted(form));
        assert_eq!(nav.depth(), 2);
        assert!(nav.pop().is_some());
        assert!(!nav.is_mounted(form));
        assert!(nav.pop().is_none());
        assert_eq!(nav.current_route(), &Route::TaskList);
    }

    #[test]
    fn test_route_of_covered_view() {
        let mut nav = Navigator::new(Route::SignIn);
        let sign_in = nav.current().id;
        let register = nav.push(Route::Register);
        assert_eq!(nav.route_of(sign_in), Some(&Route::SignIn));
        assert_eq!(nav.route_of(register), Some(&Route::Register));
        nav.pop();
        assert_eq!(nav.route_of(register), None);
    }

    #[test]
    fn test_ids_are_not_reused() {
        let mut nav = Navigator::new(Route::TaskList);
        let first = nav.push(Route::TaskForm(FormMode::Add));
        nav.pop();
        let second = nav.push(Route::TaskForm(FormMode::Add));
        assert_ne!(first, second);
        assert!(!nav.is_mounted(first));
    }

    #[test]
    fn test_return_to_list_after_add() {
        let mut nav = Navigator::new(Route::TaskList);
        nav.push(Route::TaskForm(FormMode::Add));
        assert!(nav.return_to_list(ListOutcome::NewTask(task(1000))));
        assert_eq!(nav.current_route(), &Route::TaskList);
        assert_eq!(nav.take_list_outcome(), Some(ListOutcome::NewTask(task(1000))));
        assert_eq!(nav.take_list_outcome(), None);
    }

    #[test]
    fn test_return_to_detail_after_edit() {
        let mut nav = Navigator::new(Route::TaskList);
        let detail = nav.push(Route::TaskDetail { task: task(3) });
        nav.push(Route::TaskForm(FormMode::Edit { task: task(3) }));

        let updated = Task::new(3, "New", "New");
        assert!(nav.return_to_detail(updated.clone()));
        assert_eq!(nav.current().id, detail);
        assert_eq!(nav.current_route(), &Route::TaskDetail { task: updated });
        assert_eq!(nav.depth(), 2);
        assert!(!nav.has_list_outcome());
    }

    #[test]
    fn test_return_to_missing_view_is_noop() {
        let mut nav = Navigator::new(Route::SignIn);
        nav.push(Route::Register);
        assert!(!nav.return_to_list(ListOutcome::DeletedTaskId(1)));
        assert!(!nav.return_to_detail(task(1)));
        assert_eq!(nav.current_route(), &Route::Register);
        assert!(!nav.has_list_outcome());
    }

    #[test]
    fn test_reset_clears_stack_and_params() {
        let mut nav = Navigator::new(Route::TaskList);
        let detail = nav.push(Route::TaskDetail { task: task(1) });
        nav.return_to_list(ListOutcome::DeletedTaskId(1));
        let root = nav.reset(Route::SignIn);
        assert_eq!(nav.depth(), 1);
        assert_eq!(nav.current().id, root);
        assert!(!nav.is_mounted(detail));
        assert!(!nav.has_list_outcome());
    }
}
