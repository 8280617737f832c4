//! `freedom-checkr`: order package versions and vote on whether a project is free software.
//!
//! # Flow (`check`)
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Load config (`config::load_config`).
//! 3. Load the package or project record (`loader`), optionally filtered by version.
//! 4. Prepare the Gentoo free-license set, fetching it only when a Gentoo package is present.
//! 5. Poll reference repositories (`vote::FreedomChecker`).
//! 6. Render the requested report (`report`).
//! 7. Exit `0` (free), `1` (non-free), `3` (unknown) or `2` (usage/input error).
//!
//! The engines live in the `freedom_checkr` library; this binary only wires them up.

mod cli;

use std::cmp::Ordering;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command, ReportFormat};
use freedom_checkr::config::{load_config, GentooConfig};
use freedom_checkr::license::groups::{FreeLicenseCache, LicenseGroupsFile, StaticLicenseGroups};
use freedom_checkr::license::Evaluator;
use freedom_checkr::models::{Subject, Verdict, VoteReport};
use freedom_checkr::reference::{ReferenceRegistry, RepositoryRule};
use freedom_checkr::version::compare::{compare_versions, Version};
use freedom_checkr::version::constraint::VersionConstraint;
use freedom_checkr::vote::FreedomChecker;
use freedom_checkr::{loader, registry, report};

const EXIT_USAGE: i32 = 2;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {:#}", e);
            EXIT_USAGE
        }
    };
    std::process::exit(code);
}

/// `RUST_LOG` wins; otherwise `--verbose` selects `debug` over the default `warn`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Command::Compare { left, right } => {
            let symbol = match compare_versions(&left, &right) {
                Ordering::Less => "<",
                Ordering::Equal => "=",
                Ordering::Greater => ">",
            };
            println!("{}", symbol);
            Ok(0)
        }
        Command::Sort { versions } => {
            let mut versions: Vec<Version> = versions.into_iter().map(Version::new).collect();
            versions.sort();
            for version in &versions {
                println!("{}", version);
            }
            Ok(0)
        }
        Command::Check {
            file,
            name,
            online,
            version_filter,
            report: format,
        } => {
            let cwd = std::env::current_dir().context("Failed to resolve current directory")?;
            let config = load_config(&cwd, cli.config.as_deref())?;

            let mut subject = loader::load_subject(&file, name.as_deref())?;
            if let Some(filter) = version_filter {
                let constraint: VersionConstraint = filter.parse()?;
                subject = loader::filter_by_version(subject, &constraint);
                info!(
                    "{} package(s) match {}",
                    subject.packages().len(),
                    constraint
                );
            }

            let registry = ReferenceRegistry::builtin();
            let needs_gentoo = needs_gentoo_licenses(registry, &subject);
            let free_licenses = free_license_cache(&config.gentoo, online && needs_gentoo).await;

            let checker = FreedomChecker::new(registry, &free_licenses)
                .with_threshold(config.voting.threshold);
            let mut votes: Vec<VoteReport> = Vec::new();
            let tally = checker.tally(&subject, &mut votes);
            let verdict = checker.verdict(&tally);

            match format {
                ReportFormat::Terminal => {
                    report::terminal::render(subject.name(), &votes, &tally, verdict, cli.quiet)
                }
                ReportFormat::Json => {
                    println!("{}", report::json::render(subject.name(), &votes, verdict)?)
                }
            }

            Ok(match verdict {
                Verdict::Free => 0,
                Verdict::NonFree => 1,
                Verdict::Unknown => 3,
            })
        }
    }
}

/// Whether any package will be judged by the Gentoo license grammar.
fn needs_gentoo_licenses(registry: &ReferenceRegistry, subject: &Subject) -> bool {
    subject.packages().iter().any(|package| {
        matches!(
            registry.find(&package.repo, package.subrepo.as_deref()),
            Some((_, repository)) if matches!(repository.rule, RepositoryRule::Evaluator(Evaluator::Gentoo))
        )
    })
}

/// Pick the source of Gentoo free-license identifiers: the network when
/// `fetch` is set, then a configured local copy, else nothing (Gentoo abstains).
async fn free_license_cache(gentoo: &GentooConfig, fetch: bool) -> FreeLicenseCache {
    let free_groups = gentoo.free_groups.clone();

    if fetch {
        match fetch_license_groups(&gentoo.license_groups_url).await {
            Ok(Some(text)) => {
                return FreeLicenseCache::new(StaticLicenseGroups { text, free_groups })
            }
            Ok(None) => {}
            Err(e) => warn!("Failed to fetch license groups: {:#}", e),
        }
    }

    match &gentoo.license_groups_file {
        Some(path) => FreeLicenseCache::new(LicenseGroupsFile {
            path: path.clone(),
            free_groups,
        }),
        None => FreeLicenseCache::unavailable(
            "no license groups source (use --online or set gentoo.license-groups-file)",
        ),
    }
}

async fn fetch_license_groups(url: &str) -> Result<Option<String>> {
    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .build()?;
    registry::gentoo::fetch_license_groups(&client, url).await
}
