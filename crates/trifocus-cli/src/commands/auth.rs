use clap::Subcommand;
use trifocus_core::advisory::credentials::{self, keyring_store, CredentialSource, KEYRING_KEY};
use trifocus_core::Config;

#[derive(Subcommand)]
pub enum AuthAction {
    /// Store the advisory API key in the OS keyring
    Login {
        /// API key for the advisory service
        #[arg(long)]
        token: String,
    },
    /// Remove the stored API key
    Logout,
    /// Check which credential would be used
    Status,
}

pub fn run(action: AuthAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        AuthAction::Login { token } => {
            let token = token.trim();
            if token.is_empty() {
                return Err("API key must not be empty".into());
            }
            keyring_store::set(KEYRING_KEY, token)?;
            println!("API key saved to keyring.");
        }
        AuthAction::Logout => {
            keyring_store::delete(KEYRING_KEY)?;
            println!("API key removed from keyring.");
        }
        AuthAction::Status => {
            let config = Config::load_or_default();
            match credentials::resolve(&config.advisory) {
                Some((_, CredentialSource::Env(name))) => {
                    println!("Authenticated (from environment variable {name})");
                }
                Some((_, CredentialSource::Keyring)) => println!("Authenticated (from keyring)"),
                None => println!("Not authenticated"),
            }
        }
    }
    Ok(())
}
