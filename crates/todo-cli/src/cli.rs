use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use todo_domain::Priority;

#[derive(Parser)]
#[command(name = "todo")]
#[command(about = "Per-user to-do lists with priority columns", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the document store file (falls back to store_file in config.toml)
    #[arg(long, short, global = true, value_name = "FILE", env = "TODO_FILE")]
    pub file: Option<PathBuf>,

    /// Id of the signed-in user (falls back to [user] in config.toml)
    #[arg(long, global = true, env = "TODO_USER_ID")]
    pub user_id: Option<String>,

    /// Email of the signed-in user
    #[arg(long, global = true, env = "TODO_USER_EMAIL")]
    pub email: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List operations
    List(ListCommand),
    /// Task operations
    Task(TaskCommand),
    /// Report tasks present in more than one list
    Reconcile,
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Args)]
pub struct ListCommand {
    #[command(subcommand)]
    pub action: ListAction,
}

#[derive(Subcommand)]
pub enum ListAction {
    /// Create a new list
    Create {
        #[arg(long)]
        name: String,
    },
    /// Show every list with its tasks by priority
    Show,
}

#[derive(Args)]
pub struct TaskCommand {
    #[command(subcommand)]
    pub action: TaskAction,
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task to a list
    Add(TaskAddArgs),
    /// Change the priority of a task within its list
    Priority {
        #[arg(long)]
        list: String,
        #[arg(long)]
        task: String,
        #[arg(long)]
        priority: Priority,
    },
    /// Move a task to another list
    Move {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        #[arg(long)]
        task: String,
        #[arg(long)]
        priority: Priority,
    },
    /// Drag a task and drop it on a list, optionally inside a priority zone
    Drop {
        #[arg(long)]
        from: String,
        #[arg(long)]
        task: String,
        #[arg(long)]
        to: String,
        /// Priority zone to drop into; omit to drop on the list itself
        #[arg(long)]
        zone: Option<Priority>,
    },
}

#[derive(Args)]
pub struct TaskAddArgs {
    #[arg(long)]
    pub list: String,
    #[arg(long)]
    pub title: String,
    #[arg(long, default_value = "")]
    pub description: String,
    /// Due date as YYYY-MM-DD
    #[arg(long)]
    pub due: Option<NaiveDate>,
    #[arg(long, default_value_t = Priority::Low)]
    pub priority: Priority,
}
