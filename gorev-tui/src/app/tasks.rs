use gorev_api::Todo;

/// The canonical ordered task list for the current session.
///
/// Order is significant: it drives both display and the persisted
/// reorder. Every mutation is one atomic step from snapshot to
/// snapshot; nothing outside this type touches the underlying vec.
#[derive(Debug, Default)]
pub struct TaskList {
    items: Vec<Todo>,
}

impl TaskList {
    /// Wholesale replacement, used on load. Never merges.
    pub fn replace_all(&mut self, items: Vec<Todo>) {
        self.items = items;
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// New tasks go to the front, matching the server's ordering of a
    /// freshly created entry.
    pub fn prepend(&mut self, todo: Todo) {
        self.items.insert(0, todo);
    }

    /// Replace the entry with the same id by the server's authoritative
    /// version. Returns false when the id is no longer present.
    pub fn reconcile(&mut self, updated: Todo) -> bool {
        match self.items.iter_mut().find(|t| t.id == updated.id) {
            Some(slot) => {
                *slot = updated;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.items.len();
        self.items.retain(|t| t.id != id);
        self.items.len() != before
    }

    /// Single-element move: take `source` out and reinsert it at
    /// `target`'s index, shifting everything in between by one. Not a
    /// swap. No-op (returns false) when the ids are equal or either is
    /// unknown.
    pub fn move_by_id(&mut self, source: i64, target: i64) -> bool {
        if source == target {
            return false;
        }
        let (Some(from), Some(to)) = (self.position(source), self.position(target)) else {
            return false;
        };
        let moved = self.items.remove(from);
        self.items.insert(to, moved);
        true
    }

    fn position(&self, id: i64) -> Option<usize> {
        self.items.iter().position(|t| t.id == id)
    }

    pub fn get(&self, id: i64) -> Option<&Todo> {
        self.items.iter().find(|t| t.id == id)
    }

    /// The full id sequence in display order, as sent to the reorder
    /// endpoint.
    pub fn ids(&self) -> Vec<i64> {
        self.items.iter().map(|t| t.id).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Todo> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.items.iter().filter(|t| !t.completed).count()
    }

    pub fn completed_count(&self) -> usize {
        self.items.iter().filter(|t| t.completed).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: i64, title: &str) -> Todo {
        Todo {
            id,
            title: title.to_string(),
            completed: false,
            due_date: None,
        }
    }

    fn list(ids: &[i64]) -> TaskList {
        let mut tasks = TaskList::default();
        tasks.replace_all(ids.iter().map(|&id| task(id, "t")).collect());
        tasks
    }

    // ids A=1 B=2 C=3 D=4; dragging A onto C must give [B, C, A, D]
    #[test]
    fn move_forward_lands_at_target_index() {
        let mut tasks = list(&[1, 2, 3, 4]);
        assert!(tasks.move_by_id(1, 3));
        assert_eq!(tasks.ids(), vec![2, 3, 1, 4]);
    }

    #[test]
    fn move_backward_lands_at_target_index() {
        let mut tasks = list(&[1, 2, 3, 4]);
        assert!(tasks.move_by_id(4, 2));
        assert_eq!(tasks.ids(), vec![1, 4, 2, 3]);
    }

    #[test]
    fn move_preserves_relative_order_of_others() {
        let mut tasks = list(&[1, 2, 3, 4, 5]);
        tasks.move_by_id(2, 5);
        assert_eq!(tasks.ids(), vec![1, 3, 4, 2, 5]);
    }

    #[test]
    fn move_to_self_or_unknown_is_noop() {
        let mut tasks = list(&[1, 2, 3]);
        assert!(!tasks.move_by_id(2, 2));
        assert!(!tasks.move_by_id(9, 1));
        assert!(!tasks.move_by_id(1, 9));
        assert_eq!(tasks.ids(), vec![1, 2, 3]);
    }

    #[test]
    fn prepend_puts_new_task_first() {
        let mut tasks = list(&[1, 2]);
        tasks.prepend(task(3, "new"));
        assert_eq!(tasks.ids(), vec![3, 1, 2]);
    }

    #[test]
    fn reconcile_replaces_matching_entry_wholesale() {
        let mut tasks = list(&[1, 2]);
        let updated = Todo {
            id: 2,
            title: "renamed".to_string(),
            completed: true,
            due_date: Some("2024-03-10".to_string()),
        };
        assert!(tasks.reconcile(updated.clone()));
        assert_eq!(tasks.get(2), Some(&updated));
        assert!(!tasks.reconcile(task(9, "ghost")));
    }

    #[test]
    fn remove_by_id() {
        let mut tasks = list(&[1, 2, 3]);
        assert!(tasks.remove(2));
        assert_eq!(tasks.ids(), vec![1, 3]);
        assert!(!tasks.remove(2));
    }

    #[test]
    fn counts() {
        let mut tasks = list(&[1, 2, 3]);
        let mut done = task(2, "t");
        done.completed = true;
        tasks.reconcile(done);
        assert_eq!(tasks.active_count(), 2);
        assert_eq!(tasks.completed_count(), 1);
    }
}
