//! Task model for the three-job backlog.
//!
//! Enum variants serialize to the strings the TriFocus web app
//! wrote to local storage ("Alta", "Vibe Teen", ...) so exported backlogs
//! load unchanged. English aliases are accepted when reading.

pub mod id;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

pub use id::{IdGenerator, SequentialIds, UuidIds};

/// Employment context a task belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum JobContext {
    /// University students ministry: videos, posts, writing.
    #[serde(rename = "SomosUm", alias = "somosum")]
    SomosUm,
    /// Teen ministry: discipleship, Saturday services, camps.
    #[serde(rename = "Vibe Teen", alias = "vibe-teen", alias = "vibeteen")]
    VibeTeen,
    /// Religious education teacher: preparing and teaching classes.
    #[serde(rename = "IPE", alias = "ipe")]
    Ipe,
}

impl JobContext {
    pub const ALL: [JobContext; 3] = [JobContext::SomosUm, JobContext::VibeTeen, JobContext::Ipe];

    /// Display label, identical to the persisted value.
    pub fn label(&self) -> &'static str {
        match self {
            JobContext::SomosUm => "SomosUm",
            JobContext::VibeTeen => "Vibe Teen",
            JobContext::Ipe => "IPE",
        }
    }

    /// Short description of the kind of work done in this context.
    pub fn nature(&self) -> &'static str {
        match self {
            JobContext::SomosUm => "Baptist university students ministry: videos, posts, writing",
            JobContext::VibeTeen => {
                "Teen ministry: discipleship, Saturday services, camps"
            }
            JobContext::Ipe => "Religious education teacher: preparing and teaching classes",
        }
    }

    fn slug(&self) -> &'static str {
        match self {
            JobContext::SomosUm => "somosum",
            JobContext::VibeTeen => "vibe-teen",
            JobContext::Ipe => "ipe",
        }
    }
}

impl fmt::Display for JobContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for JobContext {
    type Err = ValidationError;

    /// Accepts the label ("Vibe Teen") or the slug ("vibe-teen").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        JobContext::ALL
            .into_iter()
            .find(|job| job.label() == needle || job.slug().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "job".into(),
                message: format!("unknown job context '{s}' (expected somosum, vibe-teen or ipe)"),
            })
    }
}

/// Importance of a task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Priority {
    #[serde(rename = "Alta", alias = "high")]
    High,
    #[serde(rename = "Média", alias = "medium")]
    Medium,
    #[serde(rename = "Baixa", alias = "low")]
    Low,
}

impl Priority {
    pub fn label(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Priority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" | "alta" => Ok(Priority::High),
            "medium" | "média" | "media" => Ok(Priority::Medium),
            "low" | "baixa" => Ok(Priority::Low),
            _ => Err(ValidationError::InvalidValue {
                field: "priority".into(),
                message: format!("unknown priority '{s}' (expected high, medium or low)"),
            }),
        }
    }
}

/// Effort needed to finish a task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Effort {
    #[serde(rename = "Fácil", alias = "easy")]
    Easy,
    #[serde(rename = "Médio", alias = "medium")]
    Medium,
    #[serde(rename = "Difícil", alias = "hard")]
    Hard,
}

impl Effort {
    pub fn label(&self) -> &'static str {
        match self {
            Effort::Easy => "Easy",
            Effort::Medium => "Medium",
            Effort::Hard => "Hard",
        }
    }
}

impl Default for Effort {
    fn default() -> Self {
        Effort::Medium
    }
}

impl fmt::Display for Effort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Effort {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" | "fácil" | "facil" => Ok(Effort::Easy),
            "medium" | "médio" | "medio" => Ok(Effort::Medium),
            "hard" | "difícil" | "dificil" => Ok(Effort::Hard),
            _ => Err(ValidationError::InvalidValue {
                field: "effort".into(),
                message: format!("unknown effort '{s}' (expected easy, medium or hard)"),
            }),
        }
    }
}

/// A unit of work in the backlog.
///
/// Only [`TaskStore`](crate::store::TaskStore) constructs tasks; callers
/// describe new work with [`NewTask`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier, never reused
    pub id: String,
    /// Task title
    pub title: String,
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Employment context
    pub job: JobContext,
    /// Due date (YYYY-MM-DD)
    pub deadline: NaiveDate,
    pub priority: Priority,
    pub effort: Effort,
    /// Whether the task is completed
    pub completed: bool,
    /// Creation time, stored as epoch milliseconds
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

/// Candidate for [`TaskStore::add`](crate::store::TaskStore::add).
///
/// Carries every task field except the ones the store assigns
/// (`id`, `completed`, `created_at`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub job: JobContext,
    pub deadline: NaiveDate,
    pub priority: Priority,
    pub effort: Effort,
}

impl NewTask {
    /// Candidate with medium priority and medium effort, the defaults of the
    /// add-task form.
    pub fn new(title: impl Into<String>, job: JobContext, deadline: NaiveDate) -> Self {
        Self {
            title: title.into(),
            description: None,
            job,
            deadline,
            priority: Priority::default(),
            effort: Effort::default(),
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_effort(mut self, effort: Effort) -> Self {
        self.effort = effort;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Check the candidate and normalize its text fields.
    ///
    /// Titles are trimmed; a blank description becomes `None`.
    pub fn validate(self) -> Result<Self, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        let description = self
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        Ok(Self {
            title: title.to_string(),
            description,
            ..self
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn task_serializes_with_web_app_wire_names() {
        let task = Task {
            id: "abc123".into(),
            title: "Gravar vídeo".into(),
            description: None,
            job: JobContext::VibeTeen,
            deadline: date("2025-06-01"),
            priority: Priority::High,
            effort: Effort::Easy,
            completed: false,
            created_at: DateTime::from_timestamp_millis(1_717_000_000_123).unwrap(),
        };

        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["job"], "Vibe Teen");
        assert_eq!(json["priority"], "Alta");
        assert_eq!(json["effort"], "Fácil");
        assert_eq!(json["deadline"], "2025-06-01");
        assert_eq!(json["createdAt"], 1_717_000_000_123i64);
        assert!(json.get("description").is_none());
    }

    #[test]
    fn task_reads_web_app_local_storage_entry() {
        let raw = r#"{
            "id": "k3j9x0a1b",
            "title": "Preparar aula",
            "description": "Capítulo 3",
            "job": "IPE",
            "deadline": "2024-12-25",
            "priority": "Baixa",
            "effort": "Difícil",
            "completed": true,
            "createdAt": 1700000000000
        }"#;

        let task: Task = serde_json::from_str(raw).unwrap();
        assert_eq!(task.job, JobContext::Ipe);
        assert_eq!(task.priority, Priority::Low);
        assert_eq!(task.effort, Effort::Hard);
        assert_eq!(task.description.as_deref(), Some("Capítulo 3"));
        assert!(task.completed);
    }

    #[test]
    fn enum_aliases_are_accepted_on_read() {
        let p: Priority = serde_json::from_str("\"high\"").unwrap();
        let e: Effort = serde_json::from_str("\"easy\"").unwrap();
        let j: JobContext = serde_json::from_str("\"vibe-teen\"").unwrap();
        assert_eq!(p, Priority::High);
        assert_eq!(e, Effort::Easy);
        assert_eq!(j, JobContext::VibeTeen);
    }

    #[test]
    fn free_form_enum_values_are_rejected() {
        assert!(serde_json::from_str::<Priority>("\"urgent\"").is_err());
        assert!(serde_json::from_str::<JobContext>("\"Freelance\"").is_err());
    }

    #[test]
    fn job_context_parses_label_and_slug() {
        assert_eq!("Vibe Teen".parse::<JobContext>().unwrap(), JobContext::VibeTeen);
        assert_eq!("IPE".parse::<JobContext>().unwrap(), JobContext::Ipe);
        assert_eq!("somosum".parse::<JobContext>().unwrap(), JobContext::SomosUm);
        assert!("teen".parse::<JobContext>().is_err());
    }

    #[test]
    fn priority_and_effort_parse_case_insensitively() {
        assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!("Baixa".parse::<Priority>().unwrap(), Priority::Low);
        assert_eq!("hard".parse::<Effort>().unwrap(), Effort::Hard);
        assert!("trivial".parse::<Effort>().is_err());
    }

    #[test]
    fn validate_rejects_blank_title() {
        let candidate = NewTask::new("   ", JobContext::Ipe, date("2025-01-01"));
        assert_eq!(candidate.validate(), Err(ValidationError::EmptyTitle));
    }

    #[test]
    fn validate_trims_title_and_drops_blank_description() {
        let candidate = NewTask::new("  Plan camp  ", JobContext::VibeTeen, date("2025-01-01"))
            .with_description("  ");
        let valid = candidate.validate().unwrap();
        assert_eq!(valid.title, "Plan camp");
        assert_eq!(valid.description, None);
    }

    #[test]
    fn new_task_defaults_to_medium() {
        let candidate = NewTask::new("Post", JobContext::SomosUm, date("2025-01-01"));
        assert_eq!(candidate.priority, Priority::Medium);
        assert_eq!(candidate.effort, Effort::Medium);
    }
}
