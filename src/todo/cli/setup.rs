use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "todo", bin_name = "todo", version)]
#[command(about = "Interactive to-do list manager", long_about = None)]
pub struct Cli {
    /// Command to run before the interactive prompt starts
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// One line typed at the interactive prompt. Uses the same commands as the
/// command line, without the binary name.
#[derive(Parser, Debug)]
#[command(name = "todo", no_binary_name = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Create a task (prompts for the remaining fields)
    #[command(display_order = 1)]
    CreateTask {
        /// Title words (joined with spaces, prompted for when omitted)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        title: Vec<String>,
    },

    /// List all tasks
    #[command(alias = "ls", display_order = 2)]
    ListTasks,

    /// Edit a task, field by field
    #[command(display_order = 3)]
    UpdateTask {
        /// Id of the task (prompted for when omitted)
        id: Option<String>,
    },

    /// Delete a task
    #[command(alias = "rm", display_order = 4)]
    RemoveTask {
        /// Id of the task (prompted for when omitted)
        id: Option<String>,
    },

    /// Create a category
    #[command(display_order = 10)]
    CreateCategory {
        /// Title words (joined with spaces, prompted for when omitted)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        title: Vec<String>,
    },

    /// List all categories
    #[command(alias = "list-categories", display_order = 11)]
    ListCategory,

    /// Rename a category
    #[command(display_order = 12)]
    UpdateCategory {
        /// Id of the category (prompted for when omitted)
        id: Option<String>,
    },

    /// Delete a category
    #[command(display_order = 13)]
    RemoveCategory {
        /// Id of the category (prompted for when omitted)
        id: Option<String>,
    },

    /// Get or set configuration
    #[command(display_order = 20)]
    Config {
        /// Configuration key (date-format, max-attempts, pretty-json)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Save everything and quit
    #[command(alias = "quit", display_order = 30)]
    Exit,
}

/// Parse a line typed at the prompt. Blank lines yield `None`.
///
/// Words are split on whitespace only: there is no shell quoting, so quote
/// characters are kept as typed. Title words may start with `-`.
pub fn parse_shell_line(line: &str) -> Option<Result<Commands, clap::Error>> {
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.is_empty() {
        return None;
    }
    Some(ShellLine::try_parse_from(words).map(|parsed| parsed.command))
}

/// Join title words given on the command line. `None` when there are none.
pub fn joined_title(words: &[String]) -> Option<String> {
    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}
