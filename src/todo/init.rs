use crate::api::{TodoApi, TodoPaths};
use crate::config::TodoConfig;
use crate::error::{Result, TodoError};
use crate::model::{Category, Task};
use crate::store::fs::FileStore;
use directories::BaseDirs;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Overrides the data directory (useful for tests and for keeping several lists).
pub const HOME_ENV: &str = "TODO_HOME";

pub type FileApi = TodoApi<FileStore<Task>, FileStore<Category>>;

pub struct TodoContext {
    pub api: FileApi,
    pub config: TodoConfig,
}

/// `$TODO_HOME` when set, otherwise `<user config dir>/todo`.
pub fn data_dir() -> Result<PathBuf> {
    resolve_data_dir(std::env::var_os(HOME_ENV))
}

fn resolve_data_dir(home_override: Option<OsString>) -> Result<PathBuf> {
    if let Some(home) = home_override.filter(|h| !h.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    BaseDirs::new()
        .map(|dirs| dirs.config_dir().join("todo"))
        .ok_or_else(|| TodoError::Api("Could not determine the user config directory".into()))
}

/// Load the configuration and open both collections under `data_dir`.
///
/// Any failure to open a collection is returned: the application cannot run
/// on top of a missing or corrupt store.
pub fn initialize(data_dir: &Path) -> Result<TodoContext> {
    let config = match TodoConfig::load(data_dir) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "ignoring unreadable config, using defaults");
            TodoConfig::default()
        }
    };

    let tasks = FileStore::<Task>::for_record(data_dir)?.with_pretty(config.pretty_json);
    let categories = FileStore::<Category>::for_record(data_dir)?.with_pretty(config.pretty_json);
    let api = TodoApi::new(tasks, categories, TodoPaths::new(data_dir.to_path_buf()));

    Ok(TodoContext { api, config })
}
