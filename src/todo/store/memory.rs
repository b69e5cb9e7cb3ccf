use super::DataStore;
use crate::error::{Result, TodoError};
use crate::model::{Record, RecordId};
use std::collections::BTreeMap;

/// In-memory storage for testing and development.
/// Does NOT persist data.
pub struct InMemoryStore<T> {
    items: BTreeMap<RecordId, T>,
    closed: usize,
}

impl<T> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self {
            items: BTreeMap::new(),
            closed: 0,
        }
    }
}

impl<T> InMemoryStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times `close` has been called.
    pub fn close_count(&self) -> usize {
        self.closed
    }
}

impl<T: Record> DataStore<T> for InMemoryStore<T> {
    fn save_item(&mut self, id: RecordId, item: T) -> Result<()> {
        self.items.insert(id, item);
        Ok(())
    }

    fn remove_item(&mut self, id: RecordId) -> Result<()> {
        self.items.remove(&id);
        Ok(())
    }

    fn get_item(&self, id: RecordId) -> Result<T> {
        self.items
            .get(&id)
            .cloned()
            .ok_or(TodoError::ItemNotFound(id))
    }

    fn get_items(&self) -> Vec<T> {
        self.items.values().cloned().collect()
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn close(&mut self) -> Result<()> {
        self.closed += 1;
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{Category, Status, Task};
    use chrono::NaiveDate;

    pub struct StoreFixture {
        pub tasks: InMemoryStore<Task>,
        pub categories: InMemoryStore<Category>,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                tasks: InMemoryStore::new(),
                categories: InMemoryStore::new(),
            }
        }

        pub fn with_category(mut self, id: RecordId, title: &str) -> Self {
            let mut category = Category::new(title.to_string());
            category.id = id;
            self.categories.save_item(id, category).unwrap();
            self
        }

        pub fn with_task(mut self, id: RecordId, title: &str, category_id: RecordId) -> Self {
            let due = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
            let mut task = Task::new(
                title.to_string(),
                format!("Description for {}", title),
                due,
                Status::Pending,
                category_id,
            );
            task.id = id;
            self.tasks.save_item(id, task).unwrap();
            self
        }
    }
}
