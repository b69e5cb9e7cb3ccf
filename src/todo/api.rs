//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for every todo operation, whatever UI drives it.
//!
//! [`TodoApi`] owns the task and category repositories. It is built once at
//! startup, handed to the UI, and closed once at shutdown, which makes the
//! store lifecycle (open → operate → close) explicit.
//!
//! ## Generic Over DataStore
//!
//! `TodoApi<TS, CS>` is generic over both storage backends:
//! - Production: `TodoApi<FileStore<Task>, FileStore<Category>>`
//! - Testing: `TodoApi<InMemoryStore<Task>, InMemoryStore<Category>>`
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: That belongs in `commands/*.rs`
//! - **I/O**: No stdout, stderr or prompting
//! - **Presentation**: Returns data structures, not strings

use crate::commands;
use crate::error::Result;
use crate::model::{Category, RecordId, Task};
use crate::repository::Repository;
use crate::store::DataStore;

pub struct TodoApi<TS, CS>
where
    TS: DataStore<Task>,
    CS: DataStore<Category>,
{
    tasks: Repository<Task, TS>,
    categories: Repository<Category, CS>,
    paths: commands::TodoPaths,
}

impl<TS, CS> TodoApi<TS, CS>
where
    TS: DataStore<Task>,
    CS: DataStore<Category>,
{
    pub fn new(task_store: TS, category_store: CS, paths: commands::TodoPaths) -> Self {
        Self {
            tasks: Repository::new(task_store),
            categories: Repository::new(category_store),
            paths,
        }
    }

    pub fn create_task(&mut self, new: commands::NewTask) -> Result<commands::CmdResult> {
        commands::tasks::create(&mut self.tasks, &self.categories, new)
    }

    pub fn list_tasks(&self) -> Result<commands::CmdResult> {
        commands::tasks::list(&self.tasks, &self.categories)
    }

    pub fn get_task(&self, id: RecordId) -> Result<Task> {
        self.tasks.get(id)
    }

    pub fn update_task(
        &mut self,
        id: RecordId,
        changes: commands::TaskUpdate,
    ) -> Result<commands::CmdResult> {
        commands::tasks::update(&mut self.tasks, &self.categories, id, changes)
    }

    pub fn delete_task(&mut self, id: RecordId) -> Result<commands::CmdResult> {
        commands::tasks::delete(&mut self.tasks, id)
    }

    pub fn create_category(&mut self, title: &str) -> Result<commands::CmdResult> {
        commands::categories::create(&mut self.categories, title)
    }

    pub fn list_categories(&self) -> Result<commands::CmdResult> {
        commands::categories::list(&self.categories)
    }

    pub fn get_category(&self, id: RecordId) -> Result<Category> {
        self.categories.get(id)
    }

    pub fn update_category(&mut self, id: RecordId, title: &str) -> Result<commands::CmdResult> {
        commands::categories::update(&mut self.categories, id, title)
    }

    pub fn delete_category(&mut self, id: RecordId) -> Result<commands::CmdResult> {
        commands::categories::delete(&mut self.categories, &self.tasks, id)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.paths, action)
    }

    pub fn paths(&self) -> &commands::TodoPaths {
        &self.paths
    }

    /// Flush every repository. All of them are attempted; the first failure
    /// is returned.
    pub fn close(&mut self) -> Result<()> {
        let tasks = self.tasks.close_storage();
        let categories = self.categories.close_storage();
        tracing::info!(
            tasks_ok = tasks.is_ok(),
            categories_ok = categories.is_ok(),
            "storage closed"
        );
        tasks.and(categories)
    }

    #[cfg(any(test, feature = "test_utils"))]
    pub fn stores(&self) -> (&TS, &CS) {
        (self.tasks.store(), self.categories.store())
    }
}

pub use crate::commands::config::ConfigAction;
pub use commands::{
    CmdMessage, CmdResult, MessageLevel, NewTask, TaskUpdate, TaskView, TodoPaths,
};
