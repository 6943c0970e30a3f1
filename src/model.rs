use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type TodoId = u64;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TodoItem {
    pub id: TodoId,
    pub content: String,
    pub date: NaiveDate,
    #[serde(rename = "isSuccess")]
    pub is_success: bool,
}

/// The whole to-do collection, insertion-ordered. Serializes as a plain list
/// of `{id, content, date, isSuccess}` records.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct TodoList {
    items: Vec<TodoItem>,
}

#[derive(thiserror::Error, Debug)]
pub enum TodoError {
    #[error("todo content must not be empty")]
    EmptyContent,
    #[error("todo not found: {0}")]
    NotFound(TodoId),
    #[error("persistence failed: {0}")]
    Persistence(anyhow::Error),
}

impl TodoList {
    pub fn new() -> Self {
        TodoList { items: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TodoItem> {
        self.items.iter()
    }

    pub fn get(&self, id: TodoId) -> Option<&TodoItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Ids stay unique even after deletions: the next id is one past the
    /// largest live id, never a reused slot.
    fn next_id(&self) -> TodoId {
        self.items.iter().map(|item| item.id).max().unwrap_or(0) + 1
    }

    pub fn add(&mut self, content: String, date: NaiveDate) -> TodoId {
        let id = self.next_id();
        self.items.push(TodoItem {
            id,
            content,
            date,
            is_success: false,
        });
        id
    }

    pub fn toggle(&mut self, id: TodoId) -> Result<(), TodoError> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(TodoError::NotFound(id))?;
        item.is_success = !item.is_success;
        Ok(())
    }

    pub fn remove(&mut self, id: TodoId) -> Result<TodoItem, TodoError> {
        let idx = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or(TodoError::NotFound(id))?;
        Ok(self.items.remove(idx))
    }

    pub fn for_date(&self, date: NaiveDate) -> Vec<&TodoItem> {
        self.items.iter().filter(|item| item.date == date).collect()
    }

    pub fn has_any_for_date(&self, date: NaiveDate) -> bool {
        self.items.iter().any(|item| item.date == date)
    }
}
