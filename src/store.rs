use crate::model::{TodoError, TodoId, TodoItem, TodoList};
use crate::storage::{load_list, save_list, SlotLocation};
use chrono::NaiveDate;

/// Owns the to-do collection and the pending draft text. Mutations apply to
/// memory first, then write the whole collection through to the storage slot;
/// a failed write is surfaced but the in-memory change stands.
pub struct TodoStore {
    items: TodoList,
    draft: String,
    location: SlotLocation,
}

impl TodoStore {
    /// The load completes before the store exists, so no mutation can race
    /// the initial read.
    pub fn load(location: SlotLocation) -> Result<Self, TodoError> {
        let items = load_list(&location).map_err(TodoError::Persistence)?;
        Ok(TodoStore {
            items,
            draft: String::new(),
            location,
        })
    }

    pub fn items(&self) -> &TodoList {
        &self.items
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn draft_push(&mut self, ch: char) {
        self.draft.push(ch);
    }

    pub fn draft_backspace(&mut self) {
        self.draft.pop();
    }

    pub fn reset_draft(&mut self) {
        self.draft.clear();
    }

    /// Commits the draft as a new item on `date`. An empty or whitespace-only
    /// draft is rejected and nothing changes.
    pub fn add_todo(&mut self, date: NaiveDate) -> Result<TodoId, TodoError> {
        let content = self.draft.trim();
        if content.is_empty() {
            return Err(TodoError::EmptyContent);
        }
        let id = self.items.add(content.to_string(), date);
        self.persist()?;
        Ok(id)
    }

    pub fn toggle_todo(&mut self, id: TodoId) -> Result<(), TodoError> {
        self.items.toggle(id)?;
        self.persist()
    }

    pub fn remove_todo(&mut self, id: TodoId) -> Result<(), TodoError> {
        self.items.remove(id)?;
        self.persist()
    }

    pub fn items_for_date(&self, date: NaiveDate) -> Vec<&TodoItem> {
        self.items.for_date(date)
    }

    pub fn has_any_for_date(&self, date: NaiveDate) -> bool {
        self.items.has_any_for_date(date)
    }

    fn persist(&self) -> Result<(), TodoError> {
        save_list(&self.location, &self.items).map_err(TodoError::Persistence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn store_in(dir: &tempfile::TempDir) -> TodoStore {
        TodoStore::load(SlotLocation::in_dir(dir.path())).unwrap()
    }

    #[test]
    fn starts_empty_when_slot_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.items().is_empty());
        assert_eq!(store.draft(), "");
    }

    #[test]
    fn add_commits_draft_and_writes_through() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store.set_draft("buy milk");
        let id = store.add_todo(date(2024, 3, 15)).unwrap();
        store.reset_draft();
        assert_eq!(id, 1);
        assert_eq!(store.draft(), "");

        let item = store.items().get(id).unwrap();
        assert_eq!(item.content, "buy milk");
        assert_eq!(item.date, date(2024, 3, 15));
        assert!(!item.is_success);

        // A fresh load sees the committed item without any explicit save.
        let reloaded = store_in(&dir);
        assert_eq!(reloaded.items(), store.items());
    }

    #[test]
    fn empty_draft_add_is_rejected_and_mutates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        assert!(matches!(
            store.add_todo(date(2024, 3, 15)),
            Err(TodoError::EmptyContent)
        ));
        store.set_draft("   ");
        assert!(matches!(
            store.add_todo(date(2024, 3, 15)),
            Err(TodoError::EmptyContent)
        ));
        assert!(store.items().is_empty());
    }

    #[test]
    fn draft_edits_accumulate_until_reset() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        for ch in "walk".chars() {
            store.draft_push(ch);
        }
        store.draft_backspace();
        assert_eq!(store.draft(), "wal");
        store.reset_draft();
        assert_eq!(store.draft(), "");
    }

    #[test]
    fn toggle_and_remove_write_through() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store.set_draft("a");
        let a = store.add_todo(date(2024, 5, 1)).unwrap();
        store.set_draft("b");
        let b = store.add_todo(date(2024, 5, 1)).unwrap();

        store.toggle_todo(a).unwrap();
        let reloaded = store_in(&dir);
        assert!(reloaded.items().get(a).unwrap().is_success);

        store.remove_todo(b).unwrap();
        assert!(!store.has_any_for_date(date(2024, 5, 2)));
        assert_eq!(store.items_for_date(date(2024, 5, 1)).len(), 1);
        let reloaded = store_in(&dir);
        assert!(reloaded.items().get(b).is_none());
    }

    #[test]
    fn missing_ids_error_without_touching_state_or_disk() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store.set_draft("a");
        store.add_todo(date(2024, 5, 1)).unwrap();
        assert!(matches!(
            store.toggle_todo(42),
            Err(TodoError::NotFound(42))
        ));
        assert!(matches!(
            store.remove_todo(42),
            Err(TodoError::NotFound(42))
        ));
        let reloaded = store_in(&dir);
        assert_eq!(reloaded.items().len(), 1);
    }

    #[test]
    fn derived_views_follow_the_selected_day() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store.set_draft("monday");
        store.add_todo(date(2024, 7, 1)).unwrap();
        store.set_draft("tuesday");
        store.add_todo(date(2024, 7, 2)).unwrap();

        let monday: Vec<_> = store
            .items_for_date(date(2024, 7, 1))
            .into_iter()
            .map(|t| t.content.as_str())
            .collect();
        assert_eq!(monday, vec!["monday"]);
        assert!(store.has_any_for_date(date(2024, 7, 2)));
        assert!(!store.has_any_for_date(date(2024, 7, 3)));
    }
}
