//! Authoritative in-memory task collection with write-through persistence.
//!
//! Every successful mutation rewrites the whole collection to the injected
//! [`TaskStorage`]. Storage failures never undo a mutation: they come back
//! as a [`PersistenceWarning`] next to the updated collection.

use chrono::{SubsecRound, Utc};

use crate::error::{CoreError, PersistenceOp, PersistenceWarning, ValidationError};
use crate::storage::TaskStorage;
use crate::task::{IdGenerator, NewTask, Task, UuidIds};

/// Result of a mutation: the full collection afterwards plus any storage
/// problem hit while persisting it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreUpdate {
    pub tasks: Vec<Task>,
    pub warning: Option<PersistenceWarning>,
}

/// Single source of truth for the session's tasks.
pub struct TaskStore<S, G = UuidIds> {
    storage: S,
    ids: G,
    tasks: Vec<Task>,
    load_warning: Option<PersistenceWarning>,
}

impl<S: TaskStorage> TaskStore<S, UuidIds> {
    /// Load the persisted collection with UUID identifiers.
    ///
    /// Never fails: missing data gives an empty collection, and unreadable
    /// or malformed data gives an empty collection plus a warning available
    /// through [`TaskStore::load_warning`].
    pub fn load(storage: S) -> Self {
        Self::load_with_ids(storage, UuidIds)
    }
}

impl<S: TaskStorage, G: IdGenerator> TaskStore<S, G> {
    /// Load the persisted collection, assigning new ids with `ids`.
    pub fn load_with_ids(storage: S, ids: G) -> Self {
        let (tasks, load_warning) = match storage.read() {
            Ok(None) => (Vec::new(), None),
            Ok(Some(document)) => match serde_json::from_str::<Vec<Task>>(&document) {
                Ok(tasks) => (tasks, None),
                Err(e) => (
                    Vec::new(),
                    Some(PersistenceWarning::new(PersistenceOp::Decode, e.to_string())),
                ),
            },
            Err(e) => (
                Vec::new(),
                Some(PersistenceWarning::new(PersistenceOp::Read, e.to_string())),
            ),
        };

        match &load_warning {
            Some(warning) => tracing::warn!("{warning}; starting with an empty collection"),
            None => tracing::debug!(count = tasks.len(), "loaded task collection"),
        }

        Self {
            storage,
            ids,
            tasks,
            load_warning,
        }
    }

    /// Problem encountered while loading, if any.
    pub fn load_warning(&self) -> Option<&PersistenceWarning> {
        self.load_warning.as_ref()
    }

    /// Tasks in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Number of tasks not yet completed.
    pub fn pending_count(&self) -> usize {
        self.tasks.iter().filter(|t| !t.completed).count()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Create a task from `candidate` and append it.
    ///
    /// # Errors
    /// Returns [`ValidationError::EmptyTitle`] for a blank title; the
    /// collection is left untouched.
    pub fn add(&mut self, candidate: NewTask) -> Result<StoreUpdate, ValidationError> {
        let candidate = candidate.validate()?;
        let task = Task {
            id: self.fresh_id(),
            title: candidate.title,
            description: candidate.description,
            job: candidate.job,
            deadline: candidate.deadline,
            priority: candidate.priority,
            effort: candidate.effort,
            completed: false,
            // Persisted as epoch millis, so keep the in-memory copy equal
            // to what a reload produces.
            created_at: Utc::now().trunc_subsecs(3),
        };
        tracing::debug!(id = %task.id, job = %task.job, "adding task");
        self.tasks.push(task);
        Ok(self.commit())
    }

    /// Flip the completion flag of task `id`. Unknown ids are ignored.
    pub fn toggle_completed(&mut self, id: &str) -> StoreUpdate {
        match self.tasks.iter().position(|t| t.id == id) {
            Some(index) => {
                let task = &mut self.tasks[index];
                task.completed = !task.completed;
                self.commit()
            }
            None => self.unchanged(),
        }
    }

    /// Remove task `id`. Unknown ids are ignored.
    pub fn delete(&mut self, id: &str) -> StoreUpdate {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            return self.unchanged();
        }
        self.commit()
    }

    fn fresh_id(&mut self) -> String {
        loop {
            let id = self.ids.next_id();
            if self.get(&id).is_none() {
                return id;
            }
            tracing::warn!(%id, "generated id already in use, retrying");
        }
    }

    fn commit(&mut self) -> StoreUpdate {
        let warning = self.persist();
        StoreUpdate {
            tasks: self.tasks.clone(),
            warning,
        }
    }

    fn unchanged(&self) -> StoreUpdate {
        StoreUpdate {
            tasks: self.tasks.clone(),
            warning: None,
        }
    }

    fn persist(&mut self) -> Option<PersistenceWarning> {
        let result = serde_json::to_string(&self.tasks)
            .map_err(CoreError::from)
            .and_then(|document| self.storage.write(&document));

        match result {
            Ok(()) => None,
            Err(e) => {
                let warning = PersistenceWarning::new(PersistenceOp::Write, e.to_string());
                tracing::warn!("{warning}");
                Some(warning)
            }
        }
    }
}
