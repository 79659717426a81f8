//! relkit - CLI entry point.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use git2::Repository;
use tracing_subscriber::EnvFilter;

use relkit::config::{self, ReleaseOptions};
use relkit::github::{PrNotifier, ReleaseNotary, build_client, resolve_target};
use relkit::pipeline::{run_release, validate_pr_title};
use relkit::registry::{NpmRegistry, check_npm_installed};

/// Release automation for conventional-commit plugin packages.
#[derive(Parser, Debug)]
#[command(name = "relkit")]
#[command(about = "Classify conventional commits, bump the version, publish, and notify PRs")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the release pipeline.
    Release {
        /// Preview everything without mutating the manifest, tags, registry,
        /// or GitHub (PR preview comments still post when --pr-number is set)
        #[arg(short = 'd', long)]
        dry_run: bool,

        /// Prerelease identifier (e.g. beta), yielding X.Y.Z-beta.0 published
        /// under a matching dist-tag
        #[arg(short = 'p', long)]
        prerelease: Option<String>,

        /// Target one PR with a preview/result comment instead of scanning
        /// commit subjects for #123 references
        #[arg(long)]
        pr_number: Option<u64>,

        /// Directory containing the package to release
        #[arg(long, default_value = ".")]
        plugin_path: PathBuf,
    },

    /// Check that a PR title's implied bump matches the commits in range.
    ValidatePr {
        /// The pull request title to validate
        #[arg(short = 't', long)]
        pr_title: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let repo = Repository::open(".")
        .context("Not a git repository. Run relkit from within a git repository.")?;

    match cli.command {
        Command::Release {
            dry_run,
            prerelease,
            pr_number,
            plugin_path,
        } => {
            check_npm_installed().context("npm is required to build and publish")?;

            let options = ReleaseOptions {
                dry_run,
                prerelease,
                plugin_path,
                pr_number,
            };

            // Credentials and repo identity are resolved once here and
            // passed explicitly; missing pieces surface as structured
            // failures in the steps that need them.
            let client = build_client(config::github_token().as_deref())
                .context("Failed to build GitHub client")?;
            let target = resolve_target(&repo).ok();
            let workdir = repo
                .workdir()
                .context("Bare repositories are not supported")?
                .to_path_buf();

            let notary = ReleaseNotary::new(client.clone(), target.clone(), &workdir);
            let notifier = PrNotifier::new(client, target);

            let result = run_release(&repo, &options, &NpmRegistry, &notary, &notifier).await;

            if result.skipped {
                let reason = result
                    .skip_reason
                    .map(|r| r.as_str())
                    .unwrap_or("unknown");
                println!("Skipped release ({})", reason);
                return Ok(());
            }

            if !result.success {
                let error = result.error.unwrap_or_else(|| "unknown failure".to_string());
                anyhow::bail!("Release failed: {}", error);
            }

            if let Some(version) = &result.version {
                if options.dry_run {
                    println!("Dry run complete. Would have released v{}", version);
                } else {
                    println!("Released v{}", version);
                }
            }
            Ok(())
        }

        Command::ValidatePr { pr_title } => {
            let outcome = validate_pr_title(&repo, &pr_title)
                .context("Failed to validate PR title against commit history")?;

            println!("{}", outcome.message);
            if !outcome.ok {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}
