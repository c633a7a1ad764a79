//! # TriFocus Core Library
//!
//! Business logic for TriFocus, a single backlog for someone working three
//! jobs at once. The CLI binary is a thin layer over this crate; any other
//! front-end calls the same three components.
//!
//! ## Architecture
//!
//! - **Task Store**: in-memory collection, written through to an injected
//!   storage backend after every mutation
//! - **Prioritization Engine**: pure ordering by completion, deadline,
//!   priority and effort, with per-job view filtering
//! - **Advisory Client**: optional daily plan and task breakdown from an
//!   external text-generation service, degrading to displayable fallbacks
//!
//! ## Key Components
//!
//! - [`TaskStore`]: load / add / toggle_completed / delete
//! - [`PriorityEngine`]: `order(tasks, filter)`
//! - [`AdvisoryClient`]: `get_prioritization_advice`, `breakdown_task`
//! - [`Config`]: Application configuration management

pub mod advisory;
pub mod error;
pub mod priority;
pub mod storage;
pub mod store;
pub mod task;

pub use advisory::{AdvisoryClient, AdvisoryOutcome, GeminiBackend, GenerationBackend};
pub use error::{AdvisoryError, CoreError, PersistenceWarning, ValidationError};
pub use priority::{PriorityEngine, RankTables, ViewFilter};
pub use storage::{Config, Database, MemoryStorage, TaskStorage};
pub use store::{StoreUpdate, TaskStore};
pub use task::{Effort, JobContext, NewTask, Priority, Task};
