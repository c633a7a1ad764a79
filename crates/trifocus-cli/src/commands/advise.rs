//! Advisory commands: daily plan and task breakdown.

use trifocus_core::advisory::credentials::resolve_api_key;
use trifocus_core::{AdvisoryClient, AdvisoryOutcome, Config, GeminiBackend};

use super::open_store;

fn client(config: &Config) -> Result<AdvisoryClient<GeminiBackend>, Box<dyn std::error::Error>> {
    let backend = GeminiBackend::from_config(&config.advisory)?;
    let client = AdvisoryClient::from_config(
        backend,
        resolve_api_key(&config.advisory),
        &config.advisory,
    );
    tracing::debug!(model = client.model(), configured = client.is_configured(), "advisory client ready");
    Ok(client)
}

pub fn advise() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let store = open_store(&config)?;
    let client = client(&config)?;

    let runtime = tokio::runtime::Runtime::new()?;
    let outcome = runtime.block_on(client.get_prioritization_advice(store.tasks()));
    println!("{}", outcome.into_value());
    Ok(())
}

pub fn breakdown(id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let store = open_store(&config)?;
    let task = store.get(id).ok_or(format!("Task not found: {id}"))?;
    let client = client(&config)?;

    let runtime = tokio::runtime::Runtime::new()?;
    let outcome = runtime.block_on(client.breakdown_task(&task.title, task.job));
    if let AdvisoryOutcome::Ready(_) = outcome {
        println!("{}", task.title);
    }
    for (n, step) in outcome.into_value().iter().enumerate() {
        println!("{}. {step}", n + 1);
    }
    Ok(())
}
