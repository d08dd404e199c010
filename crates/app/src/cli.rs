//! Command line arguments and their environment fallbacks.

use std::path::PathBuf;

use clap::Parser;
use resumer_application::{AcquiredToken, TokenOrigin};
use resumer_domain::{BearerToken, DomainResult, ResumeSelection, input};

/// Environment variable read when `--token` is not given.
pub const TOKEN_ENV: &str = "BEARER_TOKEN";

/// Environment variable read when `--resume` is not given.
pub const RESUME_ENV: &str = "RESUME_IDS_2UP";

/// Bumps the publication date of your hh.ru resumes.
#[derive(Debug, Parser)]
#[command(name = "resumer", version, about)]
pub struct Cli {
    /// Bearer token to use instead of the stored one. Falls back to `BEARER_TOKEN`.
    #[arg(short = 't', long, value_name = "TOKEN")]
    pub token: Option<String>,

    /// Comma-separated resume ids, or `*` for all of them. Falls back to
    /// `RESUME_IDS_2UP`; without either you are asked.
    #[arg(short = 'r', long = "resume", value_name = "IDS")]
    pub resume: Option<String>,

    /// Config file to read instead of the default location.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the authorization link instead of opening a browser.
    #[arg(long)]
    pub no_browser: bool,

    /// Stop waiting for the OAuth redirect after this many seconds.
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,
}

/// Picks the first given value; blank and `.` count as not given.
fn first_given<'a>(values: [Option<&'a str>; 2]) -> Option<(usize, &'a str)> {
    values
        .into_iter()
        .enumerate()
        .find_map(|(index, value)| value.filter(|v| input::is_given(v)).map(|v| (index, v)))
}

/// Token from the command line, else from the environment.
#[must_use]
pub fn supplied_token(cli: Option<&str>, env: Option<&str>) -> Option<AcquiredToken> {
    let (index, raw) = first_given([cli, env])?;
    let origin = if index == 0 {
        TokenOrigin::CommandLine
    } else {
        TokenOrigin::Environment
    };
    BearerToken::parse(raw).map(|token| AcquiredToken { token, origin })
}

/// Resume selection from the command line, else from the environment.
///
/// # Errors
/// Returns `InvalidResumeId` for ids that are not plain tokens.
pub fn resume_selection(cli: Option<&str>, env: Option<&str>) -> DomainResult<ResumeSelection> {
    first_given([cli, env]).map_or(Ok(ResumeSelection::Prompt), |(_, raw)| {
        ResumeSelection::parse(raw)
    })
}
