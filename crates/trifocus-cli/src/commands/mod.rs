pub mod advise;
pub mod auth;
pub mod config;
pub mod task;

use trifocus_core::storage::DatabaseRecord;
use trifocus_core::{Config, Database, PersistenceWarning, TaskStore};

/// Open the task store configured in `config`.
///
/// A load warning is reported but never fatal: the store starts empty.
pub fn open_store(config: &Config) -> Result<TaskStore<DatabaseRecord>, Box<dyn std::error::Error>> {
    let db = Database::open(&config.storage.database_file)?;
    let store = TaskStore::load(db.record(config.storage.tasks_key.clone()));
    if let Some(warning) = store.load_warning() {
        report(warning);
    }
    Ok(store)
}

pub fn report(warning: &PersistenceWarning) {
    eprintln!("warning: {warning}");
}
