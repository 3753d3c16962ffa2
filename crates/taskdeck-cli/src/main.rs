//! # taskdeck-cli
//!
//! The `taskdeck` binary: a command-line management surface (list, add,
//! edit, delete, run) over the task repository, and the interactive
//! picker when invoked with no subcommand.

mod exec;

use std::io::Write;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use taskdeck_core::errors::DeckError;
use taskdeck_core::task::{Task, TaskCreateParams, TaskUpdateParams};
use taskdeck_engine::TaskService;
use taskdeck_store::Config;

/// taskdeck: save shell commands as tasks and fuzzy-find one to run.
#[derive(Parser, Debug)]
#[command(name = "taskdeck", version, about = "Manage and run command-line tasks")]
struct Cli {
    /// Print the path of the tasks file and exit.
    #[arg(long)]
    tasks_path: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all defined tasks.
    List,
    /// Add a new task.
    Add {
        /// Name of the task.
        #[arg(long)]
        name: String,
        /// Command string to execute.
        #[arg(long)]
        cmd: String,
        /// Working directory (default: home).
        #[arg(long)]
        cwd: Option<String>,
        /// Optional description.
        #[arg(long)]
        desc: Option<String>,
    },
    /// Edit an existing task by id or unique name.
    Edit {
        /// Id or unique name of the task to edit.
        reference: String,
        /// New name.
        #[arg(long)]
        name: Option<String>,
        /// New command string.
        #[arg(long)]
        cmd: Option<String>,
        /// New working directory.
        #[arg(long)]
        cwd: Option<String>,
        /// New description.
        #[arg(long)]
        desc: Option<String>,
    },
    /// Delete a task by id or unique name.
    Delete {
        /// Id or unique name of the task to delete.
        reference: String,
        /// Skip the confirmation prompt.
        #[arg(long)]
        force: bool,
    },
    /// Resolve a task by id or unique name and run it.
    Run {
        /// Id or unique name of the task to run.
        reference: String,
    },
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            report(&e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    use tracing_subscriber::EnvFilter;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("TASKDECK_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Print an error; ambiguity additionally lists the candidate ids so the
/// user can re-specify, distinguishing "too many matched" from "nothing
/// matched".
fn report(err: &anyhow::Error) {
    eprintln!("error: {err:#}");
    if let Some(DeckError::AmbiguousName { candidates, .. }) = err.downcast_ref::<DeckError>() {
        eprintln!("matching ids:");
        for id in candidates {
            eprintln!("  {id}");
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = Config::from_env();
    if cli.tasks_path {
        println!("{}", config.tasks_path().display());
        return Ok(ExitCode::SUCCESS);
    }

    let mut service = TaskService::open(&config).context("failed to open the task store")?;
    match cli.command {
        Some(Command::List) => {
            list(&service);
            Ok(ExitCode::SUCCESS)
        }
        Some(Command::Add {
            name,
            cmd,
            cwd,
            desc,
        }) => {
            let task = service.create(TaskCreateParams {
                name,
                command: cmd,
                cwd,
                description: desc,
            })?;
            println!("Task '{}' added with id {}", task.name, task.id);
            Ok(ExitCode::SUCCESS)
        }
        Some(Command::Edit {
            reference,
            name,
            cmd,
            cwd,
            desc,
        }) => {
            let update = TaskUpdateParams {
                name,
                command: cmd,
                cwd,
                description: desc,
            };
            if update.is_empty() {
                println!("No changes specified for the task.");
                return Ok(ExitCode::SUCCESS);
            }
            let task = service.modify(&reference, &update)?;
            println!("Task '{}' updated.", task.name);
            Ok(ExitCode::SUCCESS)
        }
        Some(Command::Delete { reference, force }) => delete(&mut service, &reference, force),
        Some(Command::Run { reference }) => {
            let task = service.find(&reference)?.clone();
            execute(&mut service, &task)
        }
        None => pick_and_run(&mut service),
    }
}

fn list(service: &TaskService) {
    let tasks = service.list_all();
    if tasks.is_empty() {
        println!("No tasks defined yet.");
        return;
    }
    println!("{:<38} {:<25} {:<30} {}", "ID", "Name", "CWD", "Description");
    for task in tasks {
        println!(
            "{:<38} {:<25} {:<30} {}",
            task.id,
            task.name,
            task.cwd,
            truncate(&task.description, 40)
        );
    }
}

fn delete(service: &mut TaskService, reference: &str, force: bool) -> Result<ExitCode> {
    let task = service.find(reference)?.clone();
    if !force {
        let prompt = format!(
            "Delete task '{}' (id: {})? [y/N]: ",
            task.name, task.id
        );
        if !confirm(&prompt)? {
            println!("Deletion cancelled.");
            return Ok(ExitCode::SUCCESS);
        }
    }
    let removed = service.destroy(task.id.as_str())?;
    println!("Task '{}' deleted.", removed.name);
    Ok(ExitCode::SUCCESS)
}

fn pick_and_run(service: &mut TaskService) -> Result<ExitCode> {
    let invoked_from = current_dir_string();
    let picked =
        taskdeck_tui::pick(service, &invoked_from).context("interactive picker failed")?;
    match picked {
        Some(task) => execute(service, &task),
        None => Ok(ExitCode::SUCCESS),
    }
}

fn execute(service: &mut TaskService, task: &Task) -> Result<ExitCode> {
    let status = exec::run_task(task)?;
    let _ = service.mark_run(task.id.as_str(), &current_dir_string())?;
    match status.code() {
        Some(0) => Ok(ExitCode::SUCCESS),
        Some(code) => {
            eprintln!("command exited with status {code}");
            Ok(ExitCode::from(u8::try_from(code).unwrap_or(1)))
        }
        None => {
            eprintln!("command terminated by signal");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn current_dir_string() -> String {
    std::env::current_dir()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "~".to_string())
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt}");
    std::io::stdout().flush().context("failed to flush stdout")?;
    let mut line = String::new();
    let _ = std::io::stdin()
        .read_line(&mut line)
        .context("failed to read confirmation")?;
    Ok(line.trim().eq_ignore_ascii_case("y"))
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max).collect();
    format!("{kept}...")
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
