use chrono::{Local, NaiveDate};
use colored::{ColoredString, Colorize};
use std::fmt::Write;
use timeago::Formatter;
use todo::api::{CmdMessage, MessageLevel, TaskView};
use todo::config::TodoConfig;
use todo::model::{Category, Status};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const STATUS_WIDTH: usize = 9;
const CATEGORY_WIDTH: usize = 16;
const DUE_WIDTH: usize = 30;
const FALLBACK_DATE_FORMAT: &str = "%Y-%m-%d";
const UNKNOWN_CATEGORY: &str = "unknown";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_error(message: &str) {
    eprintln!("{}", message.red());
}

pub(super) fn print_tasks(tasks: &[TaskView], date_format: &str) {
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }

    let today = Local::now().date_naive();
    let id_width = tasks
        .iter()
        .map(|view| format!("#{} ", view.task.id).width())
        .max()
        .unwrap_or(0);

    for view in tasks {
        let task = &view.task;
        let idx_str = format!("{:<width$}", format!("#{} ", task.id), width = id_width);
        let status = format!("{:<width$}", task.status.to_string(), width = STATUS_WIDTH);

        let category = view.category.as_deref().unwrap_or(UNKNOWN_CATEGORY);
        let category = truncate_to_width(category, CATEGORY_WIDTH);
        let category_padding = CATEGORY_WIDTH.saturating_sub(category.width());
        let category_colored = if view.category.is_some() {
            category.cyan()
        } else {
            category.dimmed()
        };

        let due = format!(
            "{} ({})",
            format_date(task.due_date, date_format),
            format_due(task.due_date, today)
        );
        let due = format!("{:>width$}", due, width = DUE_WIDTH);

        let fixed_width = id_width + STATUS_WIDTH + 1 + CATEGORY_WIDTH + 1 + DUE_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed_width);
        let title = truncate_to_width(&task.title, available);
        let padding = available.saturating_sub(title.width());

        println!(
            "{}{} {}{} {}{}{}",
            idx_str.yellow(),
            status_colored(task.status, &status),
            title.bold(),
            " ".repeat(padding),
            category_colored,
            " ".repeat(category_padding),
            due.dimmed()
        );
        if !task.description.is_empty() {
            let indent = " ".repeat(id_width + STATUS_WIDTH + 1);
            let text = truncate_to_width(&task.description, LINE_WIDTH - indent.len());
            println!("{}{}", indent, text.dimmed());
        }
    }
}

pub(super) fn print_categories(categories: &[Category]) {
    if categories.is_empty() {
        println!("No categories found.");
        return;
    }
    for category in categories {
        println!(
            "{} {}",
            format!("#{}", category.id).yellow(),
            category.title.bold()
        );
    }
}

pub(super) fn print_config(config: &TodoConfig) {
    for key in TodoConfig::KEYS {
        if let Some(value) = config.get(key) {
            println!("{} = {}", key, value);
        }
    }
}

/// Status menu shown while creating or editing a task.
pub(super) fn print_status_menu() {
    for status in Status::all() {
        println!(
            "  {}) {}",
            status.code(),
            status_colored(*status, &status.to_string())
        );
    }
}

fn status_colored(status: Status, label: &str) -> ColoredString {
    match status {
        Status::Done => label.green(),
        Status::Pending => label.yellow(),
        Status::Failed => label.red(),
    }
}

/// Format with the configured pattern, falling back to ISO dates when the
/// pattern cannot render a date.
pub(super) fn format_date(date: NaiveDate, format: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(format)).is_err() {
        out.clear();
        let _ = write!(out, "{}", date.format(FALLBACK_DATE_FORMAT));
    }
    out
}

/// Human distance between a due date and today.
pub(super) fn format_due(due: NaiveDate, today: NaiveDate) -> String {
    let days = due.signed_duration_since(today).num_days();
    if days == 0 {
        return "due today".to_string();
    }

    let span = std::time::Duration::from_secs(days.unsigned_abs() * 86_400);
    if days < 0 {
        Formatter::new().convert(span)
    } else {
        let mut formatter = Formatter::new();
        formatter.ago("left");
        formatter.convert(span)
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn due_dates_are_relative_to_today() {
        let today = day(2024, 3, 10);
        assert_eq!(format_due(today, today), "due today");
        assert_eq!(format_due(day(2024, 3, 7), today), "3 days ago");
        assert_eq!(format_due(day(2024, 3, 13), today), "3 days left");
        assert_eq!(format_due(day(2024, 3, 11), today), "1 day left");
    }

    #[test]
    fn dates_use_the_configured_format() {
        let date = day(2024, 3, 1);
        assert_eq!(format_date(date, "%d/%m/%Y"), "01/03/2024");
        assert_eq!(format_date(date, "%Q"), "2024-03-01");
    }

    #[test]
    fn truncation_respects_display_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("exactly10!", 10), "exactly10!");
        assert_eq!(truncate_to_width("a longer title", 6), "a lon…");
        let wide = truncate_to_width("日本語のタイトル", 7);
        assert!(wide.width() <= 7);
        assert!(wide.ends_with('…'));
    }
}
