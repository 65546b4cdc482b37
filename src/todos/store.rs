//! In-memory todo store.
//!
//! Records are addressed by 1-based position, not by their `id` field. After
//! a removal the records behind it move up one position but keep their
//! stored `id`, so `id` and position drift apart. New ids are `len + 1`,
//! which can repeat an id still held by a later record.

use parking_lot::Mutex;

use super::model::{Todo, TodoFields};

/// Shared, mutex-guarded sequence of todos. One per [`App`](crate::App);
/// share it with `Arc`.
#[derive(Debug, Default)]
pub struct TodoStore {
    todos: Mutex<Vec<Todo>>,
}

impl TodoStore {
    pub fn new(todos: Vec<Todo>) -> Self {
        Self { todos: Mutex::new(todos) }
    }

    /// A store holding the five sample records the service starts with.
    pub fn seeded() -> Self {
        Self::new(seed())
    }

    pub fn len(&self) -> usize {
        self.todos.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.lock().is_empty()
    }

    /// All todos in order, or only those whose title or description contains
    /// `query`. An empty query matches everything.
    pub fn list(&self, query: Option<&str>) -> Vec<Todo> {
        let todos = self.todos.lock();
        match query.filter(|q| !q.is_empty()) {
            Some(q) => todos.iter().filter(|t| t.mentions(q)).cloned().collect(),
            None => todos.clone(),
        }
    }

    /// Appends a todo with `id = len + 1` and returns it.
    pub fn create(&self, fields: TodoFields) -> Todo {
        let mut todos = self.todos.lock();
        let todo = Todo {
            id: todos.len() as u64 + 1,
            title: fields.title,
            description: fields.description,
            completed: fields.completed,
        };
        todos.push(todo.clone());
        todo
    }

    pub fn get(&self, position: usize) -> Option<Todo> {
        let index = position.checked_sub(1)?;
        self.todos.lock().get(index).cloned()
    }

    /// Overwrites title, description and completed with `fields`, including
    /// clearing any that `fields` leaves out. Returns the updated record.
    pub fn replace_fields(&self, position: usize, fields: TodoFields) -> Option<Todo> {
        let index = position.checked_sub(1)?;
        let mut todos = self.todos.lock();
        let todo = todos.get_mut(index)?;
        todo.title = fields.title;
        todo.description = fields.description;
        todo.completed = fields.completed;
        Some(todo.clone())
    }

    /// Removes the record at `position`, shifting later records up.
    pub fn remove(&self, position: usize) -> Option<Todo> {
        let index = position.checked_sub(1)?;
        let mut todos = self.todos.lock();
        (index < todos.len()).then(|| todos.remove(index))
    }
}

fn seed() -> Vec<Todo> {
    vec![
        Todo::new(1, "Complete project proposal", "Write and finalize the project proposal document", false),
        Todo::new(2, "Prepare presentation slides", "Create slides for the upcoming presentation", false),
        Todo::new(3, "Review code changes", "Review and provide feedback on recent code changes", true),
        Todo::new(4, "Meeting with client", "Discuss project requirements and timeline with the client", false),
        Todo::new(5, "Update website content", "Add new blog post and update product descriptions", true),
    ]
}
