use crate::commands::{normalize_title, CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Category, RecordId, Task};
use crate::repository::Repository;
use crate::store::DataStore;

pub fn create<CS: DataStore<Category>>(
    categories: &mut Repository<Category, CS>,
    title: &str,
) -> Result<CmdResult> {
    let category = categories.save(Category::new(normalize_title(title)?))?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Category created (#{}): {}",
        category.id, category.title
    )));
    result.affected_categories.push(category);
    Ok(result)
}

pub fn list<CS: DataStore<Category>>(categories: &Repository<Category, CS>) -> Result<CmdResult> {
    let mut listed = categories.list();
    listed.sort_by_key(|c| c.id);
    Ok(CmdResult::default().with_listed_categories(listed))
}

pub fn update<CS: DataStore<Category>>(
    categories: &mut Repository<Category, CS>,
    id: RecordId,
    title: &str,
) -> Result<CmdResult> {
    let mut category = categories.get(id)?;
    category.title = normalize_title(title)?;
    let category = categories.update(category)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Category updated (#{}): {}",
        category.id, category.title
    )));
    result.affected_categories.push(category);
    Ok(result)
}

/// Delete a category. Tasks pointing at it are left alone and will show up
/// under "unknown".
pub fn delete<TS, CS>(
    categories: &mut Repository<Category, CS>,
    tasks: &Repository<Task, TS>,
    id: RecordId,
) -> Result<CmdResult>
where
    TS: DataStore<Task>,
    CS: DataStore<Category>,
{
    let category = categories.delete(id)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Category deleted (#{}): {}",
        category.id, category.title
    )));

    let orphaned = tasks
        .list()
        .iter()
        .filter(|t| t.category_id == category.id)
        .count();
    if orphaned > 0 {
        result.add_message(CmdMessage::warning(format!(
            "{} task(s) still reference category #{}",
            orphaned, category.id
        )));
    }
    result.affected_categories.push(category);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    fn empty() -> Repository<Category, InMemoryStore<Category>> {
        Repository::new(InMemoryStore::new())
    }

    #[test]
    fn create_list_delete_scenario() {
        let mut categories = empty();
        let tasks: Repository<Task, InMemoryStore<Task>> = Repository::new(InMemoryStore::new());

        create(&mut categories, "Work").unwrap();
        let listed = list(&categories).unwrap().listed_categories;
        assert_eq!(listed.len(), 1);
        assert_eq!((listed[0].id, listed[0].title.as_str()), (1, "Work"));

        create(&mut categories, "Home").unwrap();
        let ids: Vec<_> = list(&categories)
            .unwrap()
            .listed_categories
            .iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec![1, 2]);

        delete(&mut categories, &tasks, 1).unwrap();
        assert!(categories.get(1).is_err());
        let listed = list(&categories).unwrap().listed_categories;
        assert_eq!(listed.len(), 1);
        assert_eq!((listed[0].id, listed[0].title.as_str()), (2, "Home"));
    }

    #[test]
    fn update_renames_in_place() {
        let mut categories = empty();
        create(&mut categories, "Wrok").unwrap();

        update(&mut categories, 1, " Work ").unwrap();
        assert_eq!(categories.get(1).unwrap().title, "Work");
        assert!(update(&mut categories, 1, "").is_err());
        assert!(update(&mut categories, 2, "Home").is_err());
    }

    #[test]
    fn delete_warns_about_orphaned_tasks() {
        let fixture = StoreFixture::new()
            .with_category(1, "Work")
            .with_task(1, "Report", 1)
            .with_task(2, "Slides", 1);
        let mut categories = Repository::new(fixture.categories);
        let tasks = Repository::new(fixture.tasks);

        let result = delete(&mut categories, &tasks, 1).unwrap();
        let warning = result
            .messages
            .iter()
            .find(|m| m.level == MessageLevel::Warning)
            .unwrap();
        assert!(warning.content.starts_with("2 task(s)"));
        assert_eq!(tasks.list().len(), 2);
    }

    #[test]
    fn delete_absent_category_errors() {
        let mut categories = empty();
        let tasks: Repository<Task, InMemoryStore<Task>> = Repository::new(InMemoryStore::new());
        let err = delete(&mut categories, &tasks, 1).unwrap_err();
        assert_eq!(err.to_string(), "category not found: 1");
    }
}
