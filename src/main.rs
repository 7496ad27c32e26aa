use clap::{Parser, Subcommand};
use colored::Colorize;
use eyre::{Result, eyre};
use std::path::PathBuf;
use std::process;
use todostore::{Config, Filter, Slot, SqliteSlot, StoreError, Task, TaskId, TaskStore};
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "todo")]
#[command(about = "To-do list with persistent storage")]
#[command(version = env!("GIT_DESCRIBE"))]
struct Cli {
    /// Path to a config file (default: <config dir>/todostore/config.yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the task database (overrides config)
    #[arg(short, long)]
    store_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a task
    Add {
        /// Task text; words are joined with spaces
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },

    /// Flip a task between open and completed
    Toggle {
        /// Row number as shown by `list`
        n: usize,
    },

    /// Mark a task completed
    Done { n: usize },

    /// Mark a task open again
    Undone { n: usize },

    /// Delete a task
    Remove { n: usize },

    /// Delete all completed tasks
    ClearCompleted,

    /// Show tasks
    List {
        /// all, active or completed (default from config)
        #[arg(short, long)]
        filter: Option<Filter>,
    },

    /// Show the number of tasks
    Count,
}

/// Failure of one subcommand
#[derive(Debug, Error)]
enum CommandError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("No task at row {row} ({count} tasks)")]
    NoSuchRow { row: usize, count: usize },
}

impl CommandError {
    /// Errors shown as a warning line instead of a failure report
    fn is_user_facing(&self) -> bool {
        match self {
            CommandError::Store(e) => e.is_validation(),
            CommandError::NoSuchRow { .. } => true,
        }
    }
}

fn main() -> Result<()> {
    // Logs go to stderr so rendered rows on stdout stay clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;
    let store_path = cli.store_path.unwrap_or_else(|| config.store_path.clone());

    let slot = SqliteSlot::open(&store_path)?;
    debug!(path = ?slot.path(), "Opened task database");
    let mut store = TaskStore::load_with_key(slot, config.key.clone()).map_err(|e| eyre!(e))?;
    store.set_filter(config.default_filter);

    match run(&mut store, cli.command) {
        Ok(()) => Ok(()),
        Err(e @ CommandError::NoSuchRow { .. }) => {
            eprintln!("{}", e.to_string().red());
            process::exit(1);
        }
        Err(e) if e.is_user_facing() => {
            eprintln!("{}", e.to_string().yellow());
            process::exit(1);
        }
        Err(e) => Err(eyre!(e)),
    }
}

fn run<S: Slot>(store: &mut TaskStore<S>, command: Commands) -> Result<(), CommandError> {
    match command {
        Commands::Add { text } => {
            store.add(&text.join(" "))?;
            print_list(store);
        }
        Commands::Toggle { n } => {
            let id = resolve_row(store, n)?;
            store.toggle(id)?;
            print_list(store);
        }
        Commands::Done { n } => {
            let id = resolve_row(store, n)?;
            store.set_completed(id, true)?;
            print_list(store);
        }
        Commands::Undone { n } => {
            let id = resolve_row(store, n)?;
            store.set_completed(id, false)?;
            print_list(store);
        }
        Commands::Remove { n } => {
            let id = resolve_row(store, n)?;
            let removed = store.remove(id)?;
            println!("Removed: {}", removed.text());
            print_list(store);
        }
        Commands::ClearCompleted => {
            let removed = store.clear_completed()?;
            println!("Cleared {} completed", removed);
            print_list(store);
        }
        Commands::List { filter } => {
            if let Some(filter) = filter {
                store.set_filter(filter);
            }
            print_list(store);
        }
        Commands::Count => {
            println!("{}", counter_line(store.len()));
        }
    }

    Ok(())
}

/// Map a 1-based row number onto the id of that task
fn resolve_row<S: Slot>(store: &TaskStore<S>, n: usize) -> Result<TaskId, CommandError> {
    row_id(store, n).ok_or(CommandError::NoSuchRow {
        row: n,
        count: store.len(),
    })
}

fn row_id<S: Slot>(store: &TaskStore<S>, n: usize) -> Option<TaskId> {
    let index = n.checked_sub(1)?;
    store
        .view(Filter::All)
        .find(|(i, _)| *i == index)
        .map(|(_, task)| task.id())
}

fn print_list<S: Slot>(store: &TaskStore<S>) {
    for (index, task) in store.visible() {
        println!("{}", render_row(index, task));
    }
    println!("{}", counter_line(store.len()));
}

/// One rendered row; numbers are positions in the full list, 1-based
fn render_row(index: usize, task: &Task) -> String {
    let mark = if task.completed() { "[x]" } else { "[ ]" };
    let text = if task.completed() {
        task.text().dimmed().strikethrough().to_string()
    } else {
        task.text().to_string()
    };
    format!("{:>3}. {} {}", index + 1, mark, text)
}

fn counter_line(count: usize) -> String {
    format!("{} tugas", count)
}
