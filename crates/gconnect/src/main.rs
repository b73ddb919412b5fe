mod cli;
mod error;
mod mem;

use std::path::PathBuf;

use clap::Parser;
use dialoguer::{Input, Password};
use gconnect_api::{ConnectClient, Credentials};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let tokens = token_dir(&cli)?;
    let mut client = ConnectClient::new(cli.region.into())?;

    // Try the persisted token bundle first; on any auth failure fall back
    // to credential login and persist fresh tokens for next time.
    match client.resume(&tokens).await {
        Ok(profile) => info!("resumed session for {}", profile.full_name),
        Err(e) if e.is_auth_error() => {
            info!("stored session unusable ({e}), logging in with credentials");
            let credentials = prompt_credentials(cli.email.as_deref())?;
            let profile = client.login(&credentials).await?;
            info!("logged in as {}", profile.full_name);
            if let Err(e) = client.persist(&tokens) {
                warn!("could not persist token bundle: {e}");
            } else {
                info!("tokens stored in {} for future use", tokens.display());
            }
        }
        Err(e) => return Err(e.into()),
    }

    let date = cli
        .date
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let stats = client.get_user_summary(date).await?;

    if cli.dry_run || cli.mem_key.is_none() {
        if cli.mem_key.is_none() && !cli.dry_run {
            warn!("no mem.ai API key set, printing stats instead");
        }
        println!(
            "{}",
            serde_json::to_string_pretty(&stats).unwrap_or_else(|_| stats.to_string())
        );
        return Ok(());
    }

    let key = cli.mem_key.as_deref().unwrap_or_default();
    mem::publish(key, date, &stats).await?;
    println!("Posted health stats for {date} to mem.ai");

    Ok(())
}

/// The token directory: flag/env first, then `~/.gconnect`.
fn token_dir(cli: &Cli) -> Result<PathBuf, CliError> {
    if let Some(ref dir) = cli.tokens {
        return Ok(dir.clone());
    }
    dirs::home_dir()
        .map(|home| home.join(".gconnect"))
        .ok_or(CliError::NoTokenDir)
}

/// Ask for whichever credentials weren't supplied via flags/env.
fn prompt_credentials(email: Option<&str>) -> Result<Credentials, CliError> {
    let email = match email {
        Some(e) => e.to_owned(),
        None => Input::new().with_prompt("Login e-mail").interact_text()?,
    };
    let password = Password::new().with_prompt("Enter password").interact()?;

    Ok(Credentials::new(email, password))
}
