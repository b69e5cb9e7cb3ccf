//! # Command Loop
//!
//! `run()` wires the session together: parse argv, install logging, open the
//! collections, start the input worker and the signal listener, then hand
//! control to the loop.
//!
//! Handlers are generic over the storage backends and the [`Prompter`], so
//! tests drive them with in-memory stores and scripted answers. A handler
//! that sees a cancelled prompt returns before touching the API.

use super::input::{Cancel, Console, Prompter};
use super::render::{
    format_date, print_categories, print_config, print_error, print_messages, print_status_menu,
    print_tasks,
};
use super::setup::{joined_title, parse_shell_line, Cli, Commands};
use super::signals;
use clap::Parser;
use todo::api::{ConfigAction, NewTask, TaskUpdate, TodoApi};
use todo::commands::{normalize_title, parse_due_date, parse_id, parse_status};
use todo::config::TodoConfig;
use todo::error::{Result, TodoError};
use todo::init::{data_dir, initialize, TodoContext};
use todo::logging;
use todo::model::{Category, RecordId, Task};
use todo::store::DataStore;

struct AppContext<TS, CS>
where
    TS: DataStore<Task>,
    CS: DataStore<Category>,
{
    api: TodoApi<TS, CS>,
    config: TodoConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let dir = data_dir()?;
    tracing::debug!(data_dir = %dir.display(), "starting");
    let TodoContext { api, config } = initialize(&dir)?;
    let mut ctx = AppContext { api, config };

    let (mut console, events) = Console::start();
    if let Err(e) = signals::listen(events) {
        tracing::warn!(error = %e, "could not install signal handlers");
    }

    let mut flow = match cli.command {
        Some(command) => execute_reporting(&mut ctx, &mut console, command),
        None => Flow::Continue,
    };

    while flow == Flow::Continue {
        let line = match console.next_command() {
            Some(line) => line,
            None => break,
        };
        let command = match parse_shell_line(&line) {
            None => continue,
            Some(Ok(command)) => command,
            Some(Err(e)) => {
                // Covers `help` as well as unknown commands
                let _ = e.print();
                continue;
            }
        };
        flow = execute_reporting(&mut ctx, &mut console, command);
    }

    match console.cancelled() {
        Some(Cancel::Shutdown) => {
            println!();
            tracing::info!("shutting down on signal");
            if console.left_terminal_raw() {
                print_error("Interrupted mid-edit; run `reset` if the terminal stops echoing.");
            }
        }
        Some(Cancel::Eof) => println!(),
        None => {}
    }
    shutdown(&mut ctx)
}

fn shutdown<TS, CS>(ctx: &mut AppContext<TS, CS>) -> Result<()>
where
    TS: DataStore<Task>,
    CS: DataStore<Category>,
{
    println!("Bye!");
    if let Err(e) = ctx.api.close() {
        print_error("Your changes could not be saved.");
        return Err(e);
    }
    Ok(())
}

/// Run one command, printing any error. Errors never end the session.
fn execute_reporting<TS, CS, P>(
    ctx: &mut AppContext<TS, CS>,
    prompter: &mut P,
    command: Commands,
) -> Flow
where
    TS: DataStore<Task>,
    CS: DataStore<Category>,
    P: Prompter,
{
    match execute(ctx, prompter, command) {
        Ok(flow) => flow,
        Err(e) => {
            print_error(&format!("Error: {}", e));
            Flow::Continue
        }
    }
}

fn execute<TS, CS, P>(
    ctx: &mut AppContext<TS, CS>,
    prompter: &mut P,
    command: Commands,
) -> Result<Flow>
where
    TS: DataStore<Task>,
    CS: DataStore<Category>,
    P: Prompter,
{
    match command {
        Commands::CreateTask { title } => {
            handle_create_task(ctx, prompter, joined_title(&title))?
        }
        Commands::ListTasks => handle_list_tasks(ctx)?,
        Commands::UpdateTask { id } => handle_update_task(ctx, prompter, id)?,
        Commands::RemoveTask { id } => handle_remove_task(ctx, prompter, id)?,
        Commands::CreateCategory { title } => {
            handle_create_category(ctx, prompter, joined_title(&title))?
        }
        Commands::ListCategory => handle_list_categories(ctx)?,
        Commands::UpdateCategory { id } => handle_update_category(ctx, prompter, id)?,
        Commands::RemoveCategory { id } => handle_remove_category(ctx, prompter, id)?,
        Commands::Config { key, value } => handle_config(ctx, key, value)?,
        Commands::Exit => return Ok(Flow::Exit),
    }
    Ok(Flow::Continue)
}

fn handle_create_task<TS, CS, P>(
    ctx: &mut AppContext<TS, CS>,
    prompter: &mut P,
    title: Option<String>,
) -> Result<()>
where
    TS: DataStore<Task>,
    CS: DataStore<Category>,
    P: Prompter,
{
    let attempts = ctx.config.max_attempts;
    let date_format = ctx.config.date_format.clone();

    let title = match title {
        Some(title) => normalize_title(&title)?,
        None => match ask(prompter, "Title", attempts, normalize_title)? {
            Some(title) => title,
            None => return Ok(()),
        },
    };
    let description = match prompter.prompt("Description (optional)") {
        Some(description) => description,
        None => return Ok(()),
    };
    let due_label = format!("Due date ({})", date_format);
    let due_date = match ask(prompter, &due_label, attempts, |s| {
        parse_due_date(s, &date_format)
    })? {
        Some(date) => date,
        None => return Ok(()),
    };
    print_status_menu();
    let status = match ask(prompter, "Status", attempts, parse_status)? {
        Some(status) => status,
        None => return Ok(()),
    };
    print_categories(&ctx.api.list_categories()?.listed_categories);
    let category_id = match ask(prompter, "Category id", attempts, parse_id)? {
        Some(id) => id,
        None => return Ok(()),
    };

    let result = ctx.api.create_task(NewTask {
        title,
        description,
        due_date,
        status,
        category_id,
    })?;
    print_messages(&result.messages);
    handle_list_tasks(ctx)
}

fn handle_list_tasks<TS, CS>(ctx: &AppContext<TS, CS>) -> Result<()>
where
    TS: DataStore<Task>,
    CS: DataStore<Category>,
{
    let result = ctx.api.list_tasks()?;
    print_tasks(&result.listed_tasks, &ctx.config.date_format);
    print_messages(&result.messages);
    Ok(())
}

/// Every field is offered with its current value; accepting keeps it.
fn handle_update_task<TS, CS, P>(
    ctx: &mut AppContext<TS, CS>,
    prompter: &mut P,
    id: Option<String>,
) -> Result<()>
where
    TS: DataStore<Task>,
    CS: DataStore<Category>,
    P: Prompter,
{
    let attempts = ctx.config.max_attempts;
    let date_format = ctx.config.date_format.clone();

    let id = match resolve_id(prompter, id, "Task id", attempts)? {
        Some(id) => id,
        None => return Ok(()),
    };
    let task = ctx.api.get_task(id)?;

    let title =
        match ask_with_default(prompter, "Title", &task.title, attempts, normalize_title)? {
            Some(title) => title,
            None => return Ok(()),
        };
    let description = match prompter.prompt_with_default("Description", &task.description) {
        Some(description) => description,
        None => return Ok(()),
    };
    let due_label = format!("Due date ({})", date_format);
    let current_due = format_date(task.due_date, &date_format);
    let due_date = match ask_with_default(prompter, &due_label, &current_due, attempts, |s| {
        parse_due_date(s, &date_format)
    })? {
        Some(date) => date,
        None => return Ok(()),
    };
    print_status_menu();
    let current_status = task.status.to_string();
    let status =
        match ask_with_default(prompter, "Status", &current_status, attempts, parse_status)? {
            Some(status) => status,
            None => return Ok(()),
        };
    print_categories(&ctx.api.list_categories()?.listed_categories);
    let current_category = task.category_id.to_string();
    let category_id =
        match ask_with_default(prompter, "Category id", &current_category, attempts, parse_id)? {
            Some(id) => id,
            None => return Ok(()),
        };

    let changes = TaskUpdate {
        title: Some(title),
        description: Some(description),
        due_date: Some(due_date),
        status: Some(status),
        category_id: Some(category_id),
    };
    let result = ctx.api.update_task(id, changes)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_remove_task<TS, CS, P>(
    ctx: &mut AppContext<TS, CS>,
    prompter: &mut P,
    id: Option<String>,
) -> Result<()>
where
    TS: DataStore<Task>,
    CS: DataStore<Category>,
    P: Prompter,
{
    let id = match resolve_id(prompter, id, "Task id", ctx.config.max_attempts)? {
        Some(id) => id,
        None => return Ok(()),
    };
    let result = ctx.api.delete_task(id)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_create_category<TS, CS, P>(
    ctx: &mut AppContext<TS, CS>,
    prompter: &mut P,
    title: Option<String>,
) -> Result<()>
where
    TS: DataStore<Task>,
    CS: DataStore<Category>,
    P: Prompter,
{
    let title = match title {
        Some(title) => title,
        None => match ask(prompter, "Title", ctx.config.max_attempts, normalize_title)? {
            Some(title) => title,
            None => return Ok(()),
        },
    };
    let result = ctx.api.create_category(&title)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list_categories<TS, CS>(ctx: &AppContext<TS, CS>) -> Result<()>
where
    TS: DataStore<Task>,
    CS: DataStore<Category>,
{
    let result = ctx.api.list_categories()?;
    print_categories(&result.listed_categories);
    print_messages(&result.messages);
    Ok(())
}

fn handle_update_category<TS, CS, P>(
    ctx: &mut AppContext<TS, CS>,
    prompter: &mut P,
    id: Option<String>,
) -> Result<()>
where
    TS: DataStore<Task>,
    CS: DataStore<Category>,
    P: Prompter,
{
    let attempts = ctx.config.max_attempts;
    let id = match resolve_id(prompter, id, "Category id", attempts)? {
        Some(id) => id,
        None => return Ok(()),
    };
    let category = ctx.api.get_category(id)?;
    let title = match ask_with_default(
        prompter,
        "Title",
        &category.title,
        attempts,
        normalize_title,
    )? {
        Some(title) => title,
        None => return Ok(()),
    };
    let result = ctx.api.update_category(id, &title)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_remove_category<TS, CS, P>(
    ctx: &mut AppContext<TS, CS>,
    prompter: &mut P,
    id: Option<String>,
) -> Result<()>
where
    TS: DataStore<Task>,
    CS: DataStore<Category>,
    P: Prompter,
{
    let id = match resolve_id(prompter, id, "Category id", ctx.config.max_attempts)? {
        Some(id) => id,
        None => return Ok(()),
    };
    let result = ctx.api.delete_category(id)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config<TS, CS>(
    ctx: &AppContext<TS, CS>,
    key: Option<String>,
    value: Option<String>,
) -> Result<()>
where
    TS: DataStore<Task>,
    CS: DataStore<Category>,
{
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = ctx.api.config(action)?;
    if show_all {
        if let Some(config) = &result.config {
            print_config(config);
        }
    }
    print_messages(&result.messages);
    Ok(())
}

/// Use the id given on the command line, or ask for one.
fn resolve_id<P: Prompter>(
    prompter: &mut P,
    given: Option<String>,
    label: &str,
    attempts: u32,
) -> Result<Option<RecordId>> {
    match given {
        Some(raw) => parse_id(&raw).map(Some),
        None => ask(prompter, label, attempts, parse_id),
    }
}

/// Prompt until `parse` accepts the answer. `Ok(None)` means input was
/// cancelled; running out of attempts aborts the command.
fn ask<T, P, F>(prompter: &mut P, label: &str, attempts: u32, parse: F) -> Result<Option<T>>
where
    P: Prompter,
    F: Fn(&str) -> Result<T>,
{
    for _ in 0..attempts.max(1) {
        let input = match prompter.prompt(label) {
            Some(input) => input,
            None => return Ok(None),
        };
        match parse(&input) {
            Ok(value) => return Ok(Some(value)),
            Err(e) => print_error(&e.to_string()),
        }
    }
    Err(gave_up(label, attempts))
}

fn ask_with_default<T, P, F>(
    prompter: &mut P,
    label: &str,
    default: &str,
    attempts: u32,
    parse: F,
) -> Result<Option<T>>
where
    P: Prompter,
    F: Fn(&str) -> Result<T>,
{
    for _ in 0..attempts.max(1) {
        let input = match prompter.prompt_with_default(label, default) {
            Some(input) => input,
            None => return Ok(None),
        };
        match parse(&input) {
            Ok(value) => return Ok(Some(value)),
            Err(e) => print_error(&e.to_string()),
        }
    }
    Err(gave_up(label, attempts))
}

fn gave_up(label: &str, attempts: u32) -> TodoError {
    TodoError::Api(format!(
        "no valid {} after {} attempt(s)",
        label.to_lowercase(),
        attempts.max(1)
    ))
}
