//! jira-branch - land on the git branch for a Jira issue

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use jira_branch::config::{Flags, Settings};
use jira_branch::jira::Client;
use jira_branch::prompt::TerminalPrompt;
use jira_branch::{Config, switch};
use std::path::PathBuf;

/// Pick an assigned Jira issue and switch to its local branch
#[derive(Parser)]
#[command(name = "jira-branch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the git repository (defaults to the current directory)
    #[arg(long)]
    repo: Option<PathBuf>,

    /// URL of the Jira host
    #[arg(long = "jira-host")]
    jira_host: Option<String>,

    /// Jira username
    #[arg(long = "jira-user")]
    jira_user: Option<String>,

    /// Jira API token
    #[arg(long = "jira-token")]
    jira_token: Option<String>,

    /// Remote branch new branches are created from (default: origin/master)
    #[arg(long)]
    upstream: Option<String>,

    /// Jira search listing the issues to choose from
    #[arg(long)]
    jql: Option<String>,

    /// Path to a JSON settings file
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Cli {
    fn flags(&self) -> Flags {
        Flags {
            repo: self.repo.clone(),
            jira_host: self.jira_host.clone(),
            jira_user: self.jira_user.clone(),
            jira_token: self.jira_token.clone(),
            upstream: self.upstream.clone(),
            jql: self.jql.clone(),
        }
    }
}

fn init_logging() {
    // Log to /tmp/jira-branch.log - tail with: tail -f /tmp/jira-branch.log
    // Set DEBUG=0-3 to control verbosity (0=off, 1=warn, 2=info, 3=debug)
    let debug_level = std::env::var("DEBUG")
        .ok()
        .and_then(|v| v.parse::<u8>().ok())
        .unwrap_or(0);

    if debug_level > 0 {
        let level = match debug_level {
            1 => tracing::Level::WARN,
            2 => tracing::Level::INFO,
            _ => tracing::Level::DEBUG,
        };

        let file_appender = tracing_appender::rolling::never("/tmp", "jira-branch.log");
        tracing_subscriber::fmt()
            .with_writer(file_appender)
            .with_max_level(level)
            .with_ansi(false)
            .init();
    }
}

fn main() -> Result<()> {
    init_logging();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Let --help and --version exit normally
            if e.kind() == clap::error::ErrorKind::DisplayHelp
                || e.kind() == clap::error::ErrorKind::DisplayVersion
            {
                e.exit();
            }
            // For actual errors, show error + help
            eprintln!("error: {}\n", e.kind());
            Cli::command().print_help()?;
            std::process::exit(1);
        }
    };

    let settings = Settings::load(cli.config.as_deref())?;
    let cwd = std::env::current_dir().context("Failed to read the current directory")?;
    let config = Config::resolve(cli.flags(), settings, cwd)?;
    tracing::debug!(?config, "Resolved configuration");

    let tracker = Client::new(
        &config.jira_host,
        &config.jira_user,
        &config.jira_token,
        config.timeout,
        config.max_results,
    );
    let mut prompt = TerminalPrompt::new();

    let switched = switch::run(&config, &tracker, &mut prompt)?;
    println!("{switched}");
    Ok(())
}
