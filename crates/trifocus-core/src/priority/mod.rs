//! Deterministic backlog ordering.
//!
//! Tasks are compared key by key, first decisive key wins:
//! 1. Completion (open tasks first)
//! 2. Deadline (earliest first)
//! 3. Priority weight (highest first)
//! 4. Effort weight (easiest first, quick wins build momentum)
//!
//! The sort is stable, so tasks tied on all four keys keep their
//! collection order.

pub mod ranks;

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::task::{JobContext, Task};

pub use ranks::{RankTables, DEFAULT_RANKS};

/// Which tasks a view shows.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ViewFilter {
    /// Dashboard: every job context.
    #[default]
    All,
    /// Exactly one job context.
    Job(JobContext),
}

impl ViewFilter {
    /// Exact enum equality; no fuzzy matching on the job.
    pub fn admits(&self, task: &Task) -> bool {
        match self {
            ViewFilter::All => true,
            ViewFilter::Job(job) => task.job == *job,
        }
    }
}

impl fmt::Display for ViewFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewFilter::All => f.write_str("all"),
            ViewFilter::Job(job) => write!(f, "{job}"),
        }
    }
}

impl FromStr for ViewFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" | "dashboard" => Ok(ViewFilter::All),
            _ => s.parse().map(ViewFilter::Job),
        }
    }
}

/// Orders tasks using a fixed set of [`RankTables`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PriorityEngine {
    ranks: RankTables,
}

impl PriorityEngine {
    /// Engine with [`DEFAULT_RANKS`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom rank tables
    pub fn with_ranks(ranks: RankTables) -> Self {
        Self { ranks }
    }

    pub fn ranks(&self) -> &RankTables {
        &self.ranks
    }

    /// Compare two tasks on completion, deadline, priority, then effort.
    pub fn compare(&self, a: &Task, b: &Task) -> Ordering {
        a.completed
            .cmp(&b.completed)
            .then_with(|| a.deadline.cmp(&b.deadline))
            .then_with(|| {
                self.ranks
                    .priority_weight(b.priority)
                    .cmp(&self.ranks.priority_weight(a.priority))
            })
            .then_with(|| {
                self.ranks
                    .effort_weight(a.effort)
                    .cmp(&self.ranks.effort_weight(b.effort))
            })
    }

    /// Filter `tasks` by `filter`, then sort the survivors.
    ///
    /// Pure: the input slice is never reordered, and the same input always
    /// yields the same output.
    pub fn order<'a>(&self, tasks: &'a [Task], filter: ViewFilter) -> Vec<&'a Task> {
        let mut view: Vec<&Task> = tasks.iter().filter(|t| filter.admits(t)).collect();
        // `sort_by` is stable; full ties must keep collection order.
        view.sort_by(|a, b| self.compare(a, b));
        view
    }
}

/// Order `tasks` with the default rank tables.
pub fn order(tasks: &[Task], filter: ViewFilter) -> Vec<&Task> {
    PriorityEngine::new().order(tasks, filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{Effort, Priority};
    use chrono::{DateTime, NaiveDate};

    fn task(id: &str, deadline: &str, priority: Priority, effort: Effort) -> Task {
        Task {
            id: id.into(),
            title: format!("Task {id}"),
            description: None,
            job: JobContext::SomosUm,
            deadline: deadline.parse::<NaiveDate>().unwrap(),
            priority,
            effort,
            completed: false,
            created_at: DateTime::from_timestamp_millis(0).unwrap(),
        }
    }

    fn ids(view: &[&Task]) -> Vec<String> {
        view.iter().map(|t| t.id.clone()).collect()
    }

    #[test]
    fn empty_collection_gives_empty_view() {
        assert!(order(&[], ViewFilter::All).is_empty());
    }

    #[test]
    fn deadline_then_priority_scenario() {
        let tasks = vec![
            task("easy-low", "2025-06-01", Priority::Low, Effort::Easy),
            task("hard-high", "2025-06-01", Priority::High, Effort::Hard),
            task("medium-high-may", "2025-05-01", Priority::High, Effort::Medium),
        ];
        let view = order(&tasks, ViewFilter::All);
        assert_eq!(ids(&view), ["medium-high-may", "hard-high", "easy-low"]);
    }

    #[test]
    fn incomplete_precedes_completed_regardless_of_other_keys() {
        let mut done = task("done", "2020-01-01", Priority::High, Effort::Easy);
        done.completed = true;
        let open = task("open", "2030-01-01", Priority::Low, Effort::Hard);
        let tasks = vec![done, open];
        assert_eq!(ids(&order(&tasks, ViewFilter::All)), ["open", "done"]);
    }

    #[test]
    fn deadlines_compare_as_calendar_dates() {
        let tasks = vec![
            task("new-year", "2025-01-01", Priority::Medium, Effort::Medium),
            task("christmas", "2024-12-25", Priority::Medium, Effort::Medium),
            task("march", "2024-03-01", Priority::Medium, Effort::Medium),
        ];
        assert_eq!(
            ids(&order(&tasks, ViewFilter::All)),
            ["march", "christmas", "new-year"]
        );
    }

    #[test]
    fn priority_breaks_deadline_ties() {
        let tasks = vec![
            task("low", "2025-01-01", Priority::Low, Effort::Medium),
            task("high", "2025-01-01", Priority::High, Effort::Medium),
            task("medium", "2025-01-01", Priority::Medium, Effort::Medium),
        ];
        assert_eq!(ids(&order(&tasks, ViewFilter::All)), ["high", "medium", "low"]);
    }

    #[test]
    fn effort_breaks_priority_ties() {
        let tasks = vec![
            task("hard", "2025-01-01", Priority::High, Effort::Hard),
            task("medium", "2025-01-01", Priority::High, Effort::Medium),
            task("easy", "2025-01-01", Priority::High, Effort::Easy),
        ];
        assert_eq!(ids(&order(&tasks, ViewFilter::All)), ["easy", "medium", "hard"]);
    }

    #[test]
    fn full_ties_keep_collection_order() {
        let tasks = vec![
            task("first", "2025-01-01", Priority::High, Effort::Easy),
            task("second", "2025-01-01", Priority::High, Effort::Easy),
            task("third", "2025-01-01", Priority::High, Effort::Easy),
        ];
        assert_eq!(
            ids(&order(&tasks, ViewFilter::All)),
            ["first", "second", "third"]
        );
    }

    #[test]
    fn job_filter_keeps_only_matching_context() {
        let mut teen = task("teen", "2025-01-02", Priority::Low, Effort::Easy);
        teen.job = JobContext::VibeTeen;
        let mut ipe = task("ipe", "2025-01-01", Priority::High, Effort::Easy);
        ipe.job = JobContext::Ipe;
        let tasks = vec![teen, ipe];

        let view = order(&tasks, ViewFilter::Job(JobContext::VibeTeen));
        assert_eq!(ids(&view), ["teen"]);
        // Input is untouched.
        assert_eq!(tasks[0].id, "teen");
        assert_eq!(tasks[1].id, "ipe");
    }

    #[test]
    fn custom_ranks_change_the_policy() {
        let inverted = RankTables {
            priority: [(Priority::High, 1), (Priority::Medium, 2), (Priority::Low, 3)],
            ..DEFAULT_RANKS
        };
        let engine = PriorityEngine::with_ranks(inverted);
        let tasks = vec![
            task("high", "2025-01-01", Priority::High, Effort::Easy),
            task("low", "2025-01-01", Priority::Low, Effort::Easy),
        ];
        assert_eq!(ids(&engine.order(&tasks, ViewFilter::All)), ["low", "high"]);
    }

    #[test]
    fn view_filter_parses_dashboard_and_jobs() {
        assert_eq!("all".parse::<ViewFilter>().unwrap(), ViewFilter::All);
        assert_eq!("Dashboard".parse::<ViewFilter>().unwrap(), ViewFilter::All);
        assert_eq!(
            "ipe".parse::<ViewFilter>().unwrap(),
            ViewFilter::Job(JobContext::Ipe)
        );
        assert!("weekend".parse::<ViewFilter>().is_err());
    }
}
