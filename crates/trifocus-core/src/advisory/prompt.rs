//! Prompt construction for the advisory operations.

use indoc::formatdoc;
use serde::Serialize;

use crate::error::AdvisoryError;
use crate::task::{JobContext, Task};

/// Task fields shared with the advisory service. Ids and timestamps stay local.
#[derive(Debug, Serialize)]
struct PromptTask<'a> {
    title: &'a str,
    job: &'static str,
    deadline: String,
    priority: &'static str,
    effort: &'static str,
}

impl<'a> From<&'a Task> for PromptTask<'a> {
    fn from(task: &'a Task) -> Self {
        Self {
            title: &task.title,
            job: task.job.label(),
            deadline: task.deadline.format("%Y-%m-%d").to_string(),
            priority: task.priority.label(),
            effort: task.effort.label(),
        }
    }
}

fn job_overview() -> String {
    JobContext::ALL
        .iter()
        .enumerate()
        .map(|(i, job)| format!("{}. {}: {}.", i + 1, job.label(), job.nature()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Prompt asking for today's plan over the pending tasks.
pub fn advice_prompt(pending: &[&Task], language: &str) -> String {
    let tasks: Vec<PromptTask<'_>> = pending.iter().map(|t| PromptTask::from(*t)).collect();
    let tasks_json = serde_json::to_string(&tasks).unwrap_or_else(|_| "[]".to_string());

    formatdoc! {"
        Act as a personal productivity assistant who specializes in juggling multiple work contexts.

        The user holds three jobs:
        {jobs}

        The user prioritizes:
        1. Imminent deadlines.
        2. High priority.
        3. Ease of execution (\"Easy\" effort first, to build momentum).

        Here is the current list of pending tasks (JSON):
        {tasks_json}

        Analyze the list and provide:
        1. A short \"plan of attack\" for today, saying which task to do first and why.
        2. A quick tip on switching between these contexts (for example creative vs teaching work) based on the tasks listed.

        Keep the tone encouraging, organized and direct. Answer in {language}. Use simple Markdown.
        ",
        jobs = job_overview(),
    }
}

/// Prompt asking for 3 to 5 actionable sub-steps of one task.
pub fn breakdown_prompt(title: &str, job: JobContext, language: &str) -> String {
    formatdoc! {"
        I have a complex task for my work at {job}: \"{title}\".
        Break this task into 3 to 5 smaller, actionable sub-tasks so I can get started easily.
        Answer in {language} with a JSON array of short strings.
        ",
        job = job.label(),
    }
}

/// Decode a step list, tolerating a Markdown code fence around the JSON.
///
/// Blank entries are dropped and surrounding whitespace trimmed.
pub fn parse_step_list(text: &str) -> Result<Vec<String>, AdvisoryError> {
    let trimmed = text.trim();
    let json = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.trim_end().strip_suffix("```"))
        .unwrap_or(trimmed);

    let steps: Vec<String> = serde_json::from_str(json.trim())
        .map_err(|e| AdvisoryError::MalformedResponse(e.to_string()))?;

    Ok(steps
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect())
}
