use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tag_resolver::cli::{build_resolver, resolve_all};
use tag_resolver::config::{self, ResolverConfig};
use tag_resolver::logging;
use tag_resolver::version::types::ResolveRequest;

#[derive(Parser)]
#[command(name = "tag-resolver")]
#[command(version, about = "Resolve version specifiers to GitHub release tags")]
struct Cli {
    /// Config file (defaults to $XDG_CONFIG_HOME/tag-resolver/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write JSON logs to the data directory instead of stderr
    #[arg(long, global = true)]
    log_file: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve targets of the form owner/project[@specifier]
    Resolve {
        #[arg(required = true)]
        targets: Vec<ResolveRequest>,

        /// Specifier that resolves to the newest release
        #[arg(long)]
        default_branch: Option<String>,

        /// GitHub API base URL
        #[arg(long)]
        github_url: Option<String>,

        /// Timeout per target in milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let guard = if cli.log_file {
        Some(logging::init_file(&config::log_path())?)
    } else {
        logging::init_stderr();
        None
    };

    let config_path = cli.config.unwrap_or_else(config::config_path);
    let mut config = config::load_config(&config_path)?;

    match cli.command {
        Command::Resolve {
            targets,
            default_branch,
            github_url,
            timeout_ms,
        } => {
            apply_overrides(&mut config, default_branch, github_url, timeout_ms);
            config.validate()?;
            let ok = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?
                .block_on(run_resolve(&config, targets));
            if !ok {
                drop(guard);
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn apply_overrides(
    config: &mut ResolverConfig,
    default_branch: Option<String>,
    github_url: Option<String>,
    timeout_ms: Option<u64>,
) {
    if let Some(branch) = default_branch {
        config.default_branch = branch;
    }
    if let Some(url) = github_url {
        config.github.base_url = url;
    }
    if let Some(ms) = timeout_ms {
        config.fetch_timeout_ms = ms;
    }
}

/// Prints one line per target; returns false if any target failed
async fn run_resolve(config: &ResolverConfig, targets: Vec<ResolveRequest>) -> bool {
    let resolver = build_resolver(config);
    let timeout = Duration::from_millis(config.fetch_timeout_ms);

    let mut ok = true;
    for outcome in resolve_all(&resolver, targets, timeout).await {
        match &outcome.result {
            Ok(tag) => println!("{} {}", outcome.label(), tag),
            Err(e) => {
                eprintln!("{}: {}", outcome.label(), e);
                ok = false;
            }
        }
    }
    ok
}
