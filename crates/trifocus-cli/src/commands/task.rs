//! Task management commands for CLI.

use chrono::{Local, NaiveDate};
use clap::Subcommand;
use trifocus_core::{Config, Effort, JobContext, NewTask, Priority, PriorityEngine, Task, ViewFilter};

use super::{open_store, report};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a new task
    Add {
        /// Task title
        title: String,
        /// Job context: somosum, vibe-teen or ipe
        #[arg(long, default_value = "somosum")]
        job: JobContext,
        /// Deadline as YYYY-MM-DD (default: today)
        #[arg(long)]
        deadline: Option<NaiveDate>,
        /// Priority: high, medium or low
        #[arg(long, default_value = "medium")]
        priority: Priority,
        /// Effort: easy, medium or hard
        #[arg(long, default_value = "medium")]
        effort: Effort,
        /// Free-form notes
        #[arg(long)]
        description: Option<String>,
    },
    /// List tasks in priority order
    List {
        /// View: all, somosum, vibe-teen or ipe
        #[arg(long, default_value = "all")]
        view: ViewFilter,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show task details
    Show {
        /// Task ID
        id: String,
    },
    /// Flip a task between pending and done
    Toggle {
        /// Task ID
        id: String,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: String,
    },
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut store = open_store(&config)?;

    match action {
        TaskAction::Add {
            title,
            job,
            deadline,
            priority,
            effort,
            description,
        } => {
            let deadline = deadline.unwrap_or_else(|| Local::now().date_naive());
            let mut candidate = NewTask::new(title, job, deadline)
                .with_priority(priority)
                .with_effort(effort);
            if let Some(d) = description {
                candidate = candidate.with_description(d);
            }
            let update = store.add(candidate)?;
            if let Some(warning) = &update.warning {
                report(warning);
            }
            if let Some(task) = update.tasks.last() {
                println!("Task created: {}", task.id);
            }
        }
        TaskAction::List { view, json } => {
            let ordered = PriorityEngine::new().order(store.tasks(), view);
            if json {
                println!("{}", serde_json::to_string_pretty(&ordered)?);
            } else if ordered.is_empty() {
                println!("No tasks in view: {view}");
            } else {
                for task in &ordered {
                    println!("{}", format_line(task));
                }
                println!("{} pending", store.pending_count());
            }
        }
        TaskAction::Show { id } => {
            let task = store.get(&id).ok_or(format!("Task not found: {id}"))?;
            println!("{}", serde_json::to_string_pretty(task)?);
        }
        TaskAction::Toggle { id } => {
            if store.get(&id).is_none() {
                return Err(format!("Task not found: {id}").into());
            }
            let update = store.toggle_completed(&id);
            if let Some(warning) = &update.warning {
                report(warning);
            }
            let done = update.tasks.iter().any(|t| t.id == id && t.completed);
            println!("Task {id} marked {}", if done { "done" } else { "pending" });
        }
        TaskAction::Delete { id } => {
            if store.get(&id).is_none() {
                return Err(format!("Task not found: {id}").into());
            }
            let update = store.delete(&id);
            if let Some(warning) = &update.warning {
                report(warning);
            }
            println!("Task deleted: {id}");
        }
    }
    Ok(())
}

fn format_line(task: &Task) -> String {
    format!(
        "[{}] {}  {}  {:<9}  {}/{}  {}",
        if task.completed { "x" } else { " " },
        task.id,
        task.deadline,
        task.job.label(),
        task.priority.label(),
        task.effort.label(),
        task.title
    )
}
