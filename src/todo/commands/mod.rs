use crate::config::TodoConfig;
use crate::error::{Result, TodoError};
use crate::model::{Category, RecordId, Status, Task};
use chrono::NaiveDate;
use std::path::PathBuf;

pub mod categories;
pub mod config;
pub mod tasks;

#[derive(Debug, Clone)]
pub struct TodoPaths {
    pub data_dir: PathBuf,
}

impl TodoPaths {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn collection_file(&self, name: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", name))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// A task paired with the title of the category it points at.
/// `category` is `None` when the reference is dangling.
#[derive(Debug, Clone)]
pub struct TaskView {
    pub task: Task,
    pub category: Option<String>,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_tasks: Vec<Task>,
    pub affected_categories: Vec<Category>,
    pub listed_tasks: Vec<TaskView>,
    pub listed_categories: Vec<Category>,
    pub config: Option<TodoConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed_tasks(mut self, tasks: Vec<TaskView>) -> Self {
        self.listed_tasks = tasks;
        self
    }

    pub fn with_listed_categories(mut self, categories: Vec<Category>) -> Self {
        self.listed_categories = categories;
        self
    }

    pub fn with_config(mut self, config: TodoConfig) -> Self {
        self.config = Some(config);
        self
    }
}

/// Field values for a task that does not exist yet.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub status: Status,
    pub category_id: RecordId,
}

/// Changes to an existing task. `None` leaves the field as it is.
#[derive(Debug, Clone, Default)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub status: Option<Status>,
    pub category_id: Option<RecordId>,
}

/// Trim and reject empty titles.
pub fn normalize_title(title: &str) -> Result<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(TodoError::validation("title", "title cannot be empty"));
    }
    Ok(title.to_string())
}

pub fn parse_due_date(input: &str, format: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), format).map_err(|e| {
        TodoError::validation(
            "due date",
            format!("'{}' does not match {} ({})", input.trim(), format, e),
        )
    })
}

pub fn parse_status(input: &str) -> Result<Status> {
    input
        .parse()
        .map_err(|msg: String| TodoError::validation("status", msg))
}

pub fn parse_id(input: &str) -> Result<RecordId> {
    let input = input.trim();
    match input.parse::<RecordId>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(TodoError::validation(
            "id",
            format!("'{}' is not a positive number", input),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titles_are_trimmed_and_required() {
        assert_eq!(normalize_title("  Work ").unwrap(), "Work");
        assert!(matches!(
            normalize_title("   "),
            Err(TodoError::Validation { .. })
        ));
    }

    #[test]
    fn due_dates_follow_the_format() {
        let date = parse_due_date("2024-02-29", "%Y-%m-%d").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());

        let date = parse_due_date("01/03/2024", "%d/%m/%Y").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());

        assert!(parse_due_date("2023-02-29", "%Y-%m-%d").is_err());
        assert!(parse_due_date("tomorrow", "%Y-%m-%d").is_err());
    }

    #[test]
    fn ids_must_be_positive() {
        assert_eq!(parse_id(" 4 ").unwrap(), 4);
        assert!(parse_id("0").is_err());
        assert!(parse_id("-1").is_err());
        assert!(parse_id("x").is_err());
    }

    #[test]
    fn status_errors_are_validation_errors() {
        assert_eq!(parse_status("2").unwrap(), Status::Pending);
        assert!(matches!(
            parse_status("soon"),
            Err(TodoError::Validation { .. })
        ));
    }
}
