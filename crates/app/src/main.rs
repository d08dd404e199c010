//! Resumer - Main Entry Point
//!
//! Obtains a bearer token, lists the user's resumes and republishes the
//! selected ones, one after another.

mod cli;
mod report;

use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use resumer_application::ports::CredentialStore;
use resumer_application::{AcquireToken, AuthorizeUser, UpdateResumes};
use resumer_domain::Settings;
use resumer_infrastructure::{
    ConsoleLinkPresenter, FileCredentialStore, InquireResumeSelector, OAuth2TokenClient,
    ReqwestResumeApi, SettingsLoader, SystemBrowser, TcpRedirectListener,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, RESUME_ENV, TOKEN_ENV};

/// Exit status when at least one resume was not republished.
const PARTIAL_FAILURE: u8 = 2;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_settings(cli: &Cli) -> Result<Settings> {
    let loader = match &cli.config {
        Some(path) => SettingsLoader::new().with_file(path),
        None => SettingsLoader::new(),
    };
    loader.load().context("failed to load settings")
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing();

    let settings = load_settings(&cli)?;
    let token_env = std::env::var(TOKEN_ENV).ok();
    let resume_env = std::env::var(RESUME_ENV).ok();
    let selection = cli::resume_selection(cli.resume.as_deref(), resume_env.as_deref())?;
    let supplied = cli::supplied_token(cli.token.as_deref(), token_env.as_deref());

    let store = FileCredentialStore::new(&settings.token_file);
    let browser = (!cli.no_browser).then(SystemBrowser::new);
    let mut flow = AuthorizeUser::new(
        TcpRedirectListener::new(&settings.redirect),
        browser,
        ConsoleLinkPresenter::new(),
        settings.provider.clone(),
        settings.redirect.clone(),
    );
    if let Some(seconds) = cli.timeout {
        flow = flow.with_timeout(Duration::from_secs(seconds));
    }
    let endpoint = OAuth2TokenClient::new(&settings.provider)?;

    let acquired = AcquireToken::new(store.clone(), flow, endpoint)
        .execute(supplied)
        .await
        .context("failed to obtain a bearer token")?;
    info!(origin = %acquired.origin, "Authorized");

    let api = ReqwestResumeApi::new(&settings.provider, settings.publish.clone())?;
    let updater = UpdateResumes::new(api, InquireResumeSelector::new());

    let listing = updater.list(&acquired.token).await.with_context(|| {
        format!(
            "failed to list resumes; if the token has expired, delete {} and run again",
            store.location()
        )
    })?;

    println!("Your resumes:");
    for resume in &listing.items {
        println!("{}", report::listing_line(resume));
    }

    let ids = updater.select(&selection, &listing).await?;
    if ids.is_empty() {
        info!("Nothing to update");
        return Ok(ExitCode::SUCCESS);
    }

    let report = updater
        .republish_each(&acquired.token, &ids, &listing)
        .await;

    println!("Update results:");
    for entry in &report.entries {
        println!("{}", report::report_line(entry));
    }
    info!(
        succeeded = report.succeeded(),
        failed = report.failed(),
        "Update finished"
    );

    if report.all_published() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(PARTIAL_FAILURE))
    }
}
