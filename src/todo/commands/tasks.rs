use crate::commands::{normalize_title, CmdMessage, CmdResult, NewTask, TaskUpdate, TaskView};
use crate::error::Result;
use crate::model::{Category, RecordId, Task};
use crate::repository::Repository;
use crate::store::DataStore;

pub fn create<TS, CS>(
    tasks: &mut Repository<Task, TS>,
    categories: &Repository<Category, CS>,
    new: NewTask,
) -> Result<CmdResult>
where
    TS: DataStore<Task>,
    CS: DataStore<Category>,
{
    let title = normalize_title(&new.title)?;
    let task = Task::new(
        title,
        new.description.trim().to_string(),
        new.due_date,
        new.status,
        new.category_id,
    );
    let task = tasks.save(task)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Task created (#{}): {}",
        task.id, task.title
    )));
    if categories.get(task.category_id).is_err() {
        result.add_message(CmdMessage::warning(format!(
            "Category #{} does not exist, the task is listed under \"unknown\"",
            task.category_id
        )));
    }
    result.affected_tasks.push(task);
    Ok(result)
}

/// All tasks, sorted by id, each with its category title resolved.
pub fn list<TS, CS>(
    tasks: &Repository<Task, TS>,
    categories: &Repository<Category, CS>,
) -> Result<CmdResult>
where
    TS: DataStore<Task>,
    CS: DataStore<Category>,
{
    let mut listed: Vec<TaskView> = tasks
        .list()
        .into_iter()
        .map(|task| {
            let category = categories.get(task.category_id).ok().map(|c| c.title);
            TaskView { task, category }
        })
        .collect();
    listed.sort_by_key(|view| view.task.id);

    Ok(CmdResult::default().with_listed_tasks(listed))
}

pub fn update<TS, CS>(
    tasks: &mut Repository<Task, TS>,
    categories: &Repository<Category, CS>,
    id: RecordId,
    changes: TaskUpdate,
) -> Result<CmdResult>
where
    TS: DataStore<Task>,
    CS: DataStore<Category>,
{
    let mut task = tasks.get(id)?;
    if let Some(title) = changes.title {
        task.title = normalize_title(&title)?;
    }
    if let Some(description) = changes.description {
        task.description = description.trim().to_string();
    }
    if let Some(due_date) = changes.due_date {
        task.due_date = due_date;
    }
    if let Some(status) = changes.status {
        task.status = status;
    }
    if let Some(category_id) = changes.category_id {
        task.category_id = category_id;
    }
    let task = tasks.update(task)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Task updated (#{}): {}",
        task.id, task.title
    )));
    if changes.category_id.is_some() && categories.get(task.category_id).is_err() {
        result.add_message(CmdMessage::warning(format!(
            "Category #{} does not exist, the task is listed under \"unknown\"",
            task.category_id
        )));
    }
    result.affected_tasks.push(task);
    Ok(result)
}

pub fn delete<TS: DataStore<Task>>(
    tasks: &mut Repository<Task, TS>,
    id: RecordId,
) -> Result<CmdResult> {
    let task = tasks.delete(id)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Task deleted (#{}): {}",
        task.id, task.title
    )));
    result.affected_tasks.push(task);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::error::TodoError;
    use crate::model::Status;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;
    use chrono::NaiveDate;

    type Tasks = Repository<Task, InMemoryStore<Task>>;
    type Categories = Repository<Category, InMemoryStore<Category>>;

    fn repos(fixture: StoreFixture) -> (Tasks, Categories) {
        (
            Repository::new(fixture.tasks),
            Repository::new(fixture.categories),
        )
    }

    fn new_task(title: &str, category_id: RecordId) -> NewTask {
        NewTask {
            title: title.to_string(),
            description: "  details ".to_string(),
            due_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            status: Status::Pending,
            category_id,
        }
    }

    #[test]
    fn creates_task_with_sequential_id() {
        let (mut tasks, categories) = repos(StoreFixture::new().with_category(1, "Work"));

        create(&mut tasks, &categories, new_task("First", 1)).unwrap();
        let result = create(&mut tasks, &categories, new_task("Second", 1)).unwrap();

        let task = &result.affected_tasks[0];
        assert_eq!(task.id, 2);
        assert_eq!(task.description, "details");
        assert!(result
            .messages
            .iter()
            .all(|m| m.level == MessageLevel::Success));
    }

    #[test]
    fn create_rejects_empty_title() {
        let (mut tasks, categories) = repos(StoreFixture::new());
        let err = create(&mut tasks, &categories, new_task("  ", 1)).unwrap_err();
        assert!(matches!(err, TodoError::Validation { .. }));
        assert!(tasks.list().is_empty());
    }

    #[test]
    fn create_warns_on_dangling_category() {
        let (mut tasks, categories) = repos(StoreFixture::new());
        let result = create(&mut tasks, &categories, new_task("Orphan", 99)).unwrap();
        assert_eq!(tasks.list().len(), 1);
        assert!(result
            .messages
            .iter()
            .any(|m| m.level == MessageLevel::Warning));
    }

    #[test]
    fn list_resolves_categories_and_tolerates_dangling_ones() {
        let (tasks, categories) = repos(
            StoreFixture::new()
                .with_category(1, "Work")
                .with_task(2, "Report", 1)
                .with_task(1, "Lost", 99),
        );

        let result = list(&tasks, &categories).unwrap();
        let listed = &result.listed_tasks;

        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].task.title, "Lost");
        assert_eq!(listed[0].category, None);
        assert_eq!(listed[1].category.as_deref(), Some("Work"));
    }

    #[test]
    fn update_changes_fields_and_keeps_id() {
        let (mut tasks, categories) = repos(
            StoreFixture::new()
                .with_task(1, "One", 1)
                .with_task(2, "Two", 1),
        );

        let changes = TaskUpdate {
            title: Some("Two, revised".into()),
            status: Some(Status::Done),
            ..TaskUpdate::default()
        };
        update(&mut tasks, &categories, 2, changes).unwrap();

        let task = tasks.get(2).unwrap();
        assert_eq!(task.title, "Two, revised");
        assert_eq!(task.status, Status::Done);
        assert_eq!(task.description, "Description for Two");
        assert_eq!(tasks.list().len(), 2);
    }

    #[test]
    fn update_missing_task_is_not_found() {
        let (mut tasks, categories) = repos(StoreFixture::new());
        let err = update(&mut tasks, &categories, 3, TaskUpdate::default()).unwrap_err();
        assert_eq!(err.to_string(), "task not found: 3");
    }

    #[test]
    fn delete_removes_task() {
        let (mut tasks, _) = repos(StoreFixture::new().with_task(1, "One", 1));

        let result = delete(&mut tasks, 1).unwrap();
        assert_eq!(result.affected_tasks[0].title, "One");
        assert!(tasks.list().is_empty());
        assert!(delete(&mut tasks, 1).is_err());
    }
}
