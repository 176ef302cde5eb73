// Console driver for the sakila film store

mod screens;

use anyhow::Context;
use clap::Parser;
use common::config::Settings;
use common::db::{DbPool, FilmRepository, MySqlFilmRepository};
use std::io::{self, Write};
use tracing::{error, info};

/// Run the film screens against the sakila database
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Database username
    username: String,
    /// Database password
    password: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load().context("Failed to load configuration")?;
    settings
        .validate()
        .map_err(|reason| anyhow::anyhow!("Invalid configuration: {}", reason))?;

    common::telemetry::init_logging(&settings.observability)?;

    let database = settings
        .database
        .clone()
        .with_credentials(cli.username, cli.password);
    info!(address = %database.address(), "Configuration loaded");

    let pool = DbPool::new(&database).await.map_err(|e| {
        error!(error = %e, "Failed to initialize database pool");
        e
    })?;
    let repo = MySqlFilmRepository::new(pool.clone());

    let failures = run_screens(&repo).await?;

    pool.close().await;

    if failures > 0 {
        anyhow::bail!("{} screen(s) failed", failures);
    }
    Ok(())
}

/// Run every screen in order; a failing screen is reported and the rest still run
async fn run_screens(repo: &dyn FilmRepository) -> anyhow::Result<usize> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout().lock();
    let mut failures = 0;

    report(screens::display_all_films(repo, &mut out).await, &mut failures);
    report(
        screens::display_film_search(repo, &mut input, &mut out).await,
        &mut failures,
    );
    report(screens::display_create_film(repo, &mut out).await, &mut failures);
    report(screens::display_update_film(repo, &mut out).await, &mut failures);
    report(screens::display_delete_film(repo, &mut out).await, &mut failures);

    out.flush()?;
    Ok(failures)
}

fn report(result: anyhow::Result<()>, failures: &mut usize) {
    if let Err(e) = result {
        error!(error = %e, "Screen failed");
        eprintln!("There was an error: {:#}", e);
        *failures += 1;
    }
}
