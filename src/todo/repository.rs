//! # Repository
//!
//! A [`Repository`] wraps exactly one [`DataStore`] and is the only thing the
//! command layer talks to. It owns three policies the store knows nothing about:
//!
//! - **Identity**: `save` always assigns a fresh id, `update` always keeps one.
//! - **Domain errors**: store misses become `NotFound { kind, .. }` so callers
//!   see "task not found" rather than a generic store error.
//! - **Wrapping**: save and delete failures are prefixed with the entity name.

use crate::error::{Result, TodoError};
use crate::model::{Record, RecordId};
use crate::store::DataStore;
use std::marker::PhantomData;

pub struct Repository<T: Record, S: DataStore<T>> {
    store: S,
    _record: PhantomData<T>,
}

impl<T: Record, S: DataStore<T>> Repository<T, S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            _record: PhantomData,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn get(&self, id: RecordId) -> Result<T> {
        self.store
            .get_item(id)
            .map_err(|_| TodoError::NotFound { kind: T::KIND, id })
    }

    pub fn list(&self) -> Vec<T> {
        self.store.get_items()
    }

    /// Store `record` as a new entry and return it with its assigned id.
    ///
    /// The id is `len + 1`, moved forward past ids that are still in use, so a
    /// save never replaces an existing record. Any id already set on `record`
    /// is ignored.
    pub fn save(&mut self, mut record: T) -> Result<T> {
        let id = self.next_id();
        record.set_id(id);
        self.store
            .save_item(id, record.clone())
            .map_err(|e| TodoError::SaveFailed {
                kind: T::KIND,
                source: Box::new(e),
            })?;
        tracing::debug!(kind = %T::KIND, id, "saved record");
        Ok(record)
    }

    /// Replace an existing entry, keeping its id.
    pub fn update(&mut self, record: T) -> Result<T> {
        let id = record.id();
        self.get(id)?;
        self.store
            .save_item(id, record.clone())
            .map_err(|e| TodoError::SaveFailed {
                kind: T::KIND,
                source: Box::new(e),
            })?;
        tracing::debug!(kind = %T::KIND, id, "updated record");
        Ok(record)
    }

    pub fn delete(&mut self, id: RecordId) -> Result<T> {
        let existing = self.get(id)?;
        self.store
            .remove_item(id)
            .map_err(|e| TodoError::DeleteFailed {
                kind: T::KIND,
                source: Box::new(e),
            })?;
        tracing::debug!(kind = %T::KIND, id, "deleted record");
        Ok(existing)
    }

    pub fn close_storage(&mut self) -> Result<()> {
        self.store.close()
    }

    fn next_id(&self) -> RecordId {
        let mut id = self.store.len() as RecordId + 1;
        while self.store.get_item(id).is_ok() {
            id += 1;
        }
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, EntityKind};
    use crate::store::memory::InMemoryStore;

    /// Store whose writes always fail, for the wrapping paths.
    struct BrokenStore(InMemoryStore<Category>);

    impl DataStore<Category> for BrokenStore {
        fn save_item(&mut self, _id: RecordId, _item: Category) -> Result<()> {
            Err(TodoError::Io(std::io::Error::other("read-only")))
        }

        fn remove_item(&mut self, _id: RecordId) -> Result<()> {
            Err(TodoError::Io(std::io::Error::other("read-only")))
        }

        fn get_item(&self, id: RecordId) -> Result<Category> {
            self.0.get_item(id)
        }

        fn get_items(&self) -> Vec<Category> {
            self.0.get_items()
        }

        fn len(&self) -> usize {
            self.0.len()
        }

        fn close(&mut self) -> Result<()> {
            Err(TodoError::Io(std::io::Error::other("disk full")))
        }
    }

    /// Store that refuses to hand out copies of its records.
    struct NoListingStore(InMemoryStore<Category>);

    impl DataStore<Category> for NoListingStore {
        fn save_item(&mut self, id: RecordId, item: Category) -> Result<()> {
            self.0.save_item(id, item)
        }

        fn remove_item(&mut self, id: RecordId) -> Result<()> {
            self.0.remove_item(id)
        }

        fn get_item(&self, id: RecordId) -> Result<Category> {
            self.0.get_item(id)
        }

        fn get_items(&self) -> Vec<Category> {
            panic!("id assignment must not copy the collection")
        }

        fn len(&self) -> usize {
            self.0.len()
        }

        fn close(&mut self) -> Result<()> {
            self.0.close()
        }
    }

    fn repo() -> Repository<Category, InMemoryStore<Category>> {
        Repository::new(InMemoryStore::new())
    }

    fn titles(repo: &Repository<Category, InMemoryStore<Category>>) -> Vec<(RecordId, String)> {
        let mut out: Vec<_> = repo.list().into_iter().map(|c| (c.id, c.title)).collect();
        out.sort();
        out
    }

    #[test]
    fn save_list_delete_scenario() {
        let mut repo = repo();

        repo.save(Category::new("Work".into())).unwrap();
        assert_eq!(titles(&repo), vec![(1, "Work".to_string())]);

        repo.save(Category::new("Home".into())).unwrap();
        assert_eq!(
            titles(&repo),
            vec![(1, "Work".to_string()), (2, "Home".to_string())]
        );

        repo.delete(1).unwrap();
        assert!(matches!(
            repo.get(1),
            Err(TodoError::NotFound {
                kind: EntityKind::Category,
                id: 1
            })
        ));
        assert_eq!(titles(&repo), vec![(2, "Home".to_string())]);
    }

    #[test]
    fn save_ignores_caller_id() {
        let mut repo = repo();
        repo.save(Category::new("A".into())).unwrap();
        repo.save(Category::new("B".into())).unwrap();

        let mut input = Category::new("C".into());
        input.id = 42;
        let saved = repo.save(input).unwrap();

        assert_eq!(saved.id, 3);
        assert_eq!(repo.get(3).unwrap().title, "C");
        assert!(repo.get(42).is_err());
    }

    #[test]
    fn save_after_delete_does_not_overwrite() {
        let mut repo = repo();
        repo.save(Category::new("Work".into())).unwrap();
        repo.save(Category::new("Home".into())).unwrap();
        repo.delete(1).unwrap();

        let saved = repo.save(Category::new("Gym".into())).unwrap();

        assert_eq!(saved.id, 3);
        assert_eq!(repo.get(2).unwrap().title, "Home");
        assert_eq!(repo.list().len(), 2);
    }

    #[test]
    fn update_keeps_id() {
        let mut repo = repo();
        let mut work = repo.save(Category::new("Work".into())).unwrap();
        repo.save(Category::new("Home".into())).unwrap();

        work.title = "Office".into();
        let updated = repo.update(work).unwrap();

        assert_eq!(updated.id, 1);
        assert_eq!(repo.get(1).unwrap().title, "Office");
        assert_eq!(repo.list().len(), 2);
    }

    #[test]
    fn update_requires_existing_record() {
        let mut repo = repo();
        let mut ghost = Category::new("Ghost".into());
        ghost.id = 9;

        assert!(matches!(
            repo.update(ghost),
            Err(TodoError::NotFound { id: 9, .. })
        ));
        assert!(repo.list().is_empty());
    }

    #[test]
    fn delete_absent_errors_and_changes_nothing() {
        let mut repo = repo();
        repo.save(Category::new("Work".into())).unwrap();

        let err = repo.delete(5).unwrap_err();
        assert_eq!(err.to_string(), "category not found: 5");
        assert_eq!(repo.list().len(), 1);
    }

    #[test]
    fn store_failures_are_wrapped() {
        let mut inner = InMemoryStore::new();
        let mut existing = Category::new("Work".into());
        existing.id = 1;
        inner.save_item(1, existing).unwrap();
        let mut repo = Repository::new(BrokenStore(inner));

        let err = repo.delete(1).unwrap_err();
        assert!(err.to_string().starts_with("failed to delete category: "));
        assert_eq!(repo.list().len(), 1);

        let err = repo.save(Category::new("Home".into())).unwrap_err();
        assert!(matches!(err, TodoError::SaveFailed { .. }));

        assert!(repo.close_storage().is_err());
    }

    #[test]
    fn close_delegates_to_store() {
        let mut repo = repo();
        repo.close_storage().unwrap();
        repo.close_storage().unwrap();
        assert_eq!(repo.store().close_count(), 2);
    }

    #[test]
    fn save_counts_records_without_listing_them() {
        let mut repo = Repository::new(NoListingStore(InMemoryStore::new()));
        assert_eq!(repo.save(Category::new("Work".into())).unwrap().id, 1);
        assert_eq!(repo.save(Category::new("Home".into())).unwrap().id, 2);
        repo.delete(1).unwrap();
        assert_eq!(repo.save(Category::new("Gym".into())).unwrap().id, 3);
    }
}
