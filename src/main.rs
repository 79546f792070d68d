use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context as _, bail};
use clap::{Parser, ValueEnum};
use tracing::warn;

use release_channels::config::Config;
use release_channels::release::{Context, ReleaseError, ReleaseResolver, ReleaseSet};

#[derive(Parser)]
#[command(name = "release-channels")]
#[command(
    version,
    about = "Show the stable, latest (rc/beta) and edge (alpha) releases of a GitHub repository"
)]
struct Cli {
    /// Repository in OWNER/REPO form (e.g. kubernetes/minikube)
    repository: String,

    /// Print only the stable version tag
    #[arg(long)]
    stable_only: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Path to a JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// GitHub API base URL
    #[arg(long)]
    base_url: Option<String>,

    /// GitHub token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Deadline for the whole lookup in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout only carries the result
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn,release_channels=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(run(cli))
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let (owner, repo) = parse_repository(&cli.repository)?;
    let config = load_config(&cli)?;

    let resolver = ReleaseResolver::github(&config.github)?;

    let (ctx, cancel) = Context::cancellable();
    let ctx = ctx.with_timeout(Duration::from_millis(config.timeout_ms));
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    });

    if cli.stable_only {
        let version = resolver.stable_version(&ctx, owner, repo).await?;
        println!("{version}");
        return Ok(());
    }

    match resolver.get_releases(&ctx, owner, repo).await {
        Ok(releases) => print_releases(&releases, cli.format),
        Err(ReleaseError::CommitNotFound { releases, missing }) => {
            print_releases(&releases, cli.format)?;
            bail!("unable to find commits for {}", missing.join(", "))
        }
        Err(err) => Err(err).with_context(|| format!("failed to resolve releases of {owner}/{repo}")),
    }
}

fn parse_repository(repository: &str) -> anyhow::Result<(&str, &str)> {
    match repository.split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
            Ok((owner, repo))
        }
        _ => bail!("expected OWNER/REPO, got {repository:?}"),
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_default()?,
    };

    if let Some(base_url) = &cli.base_url {
        config.github.base_url = base_url.clone();
    }
    if let Some(token) = &cli.token {
        config.github.token = Some(token.clone());
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config.timeout_ms = timeout_ms;
    }
    if config.github.token.is_none() {
        warn!("No GitHub token configured; unauthenticated requests are heavily rate limited");
    }

    Ok(config)
}

fn print_releases(releases: &ReleaseSet, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            for (channel, release) in releases.iter() {
                println!("{:<8}{:<24}{}", channel, release.tag, release.commit);
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(releases)?),
    }
    Ok(())
}
