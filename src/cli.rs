use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "freedom-checkr",
    about = "Compare package versions and vote on license freedom across distributions",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Config file [default: ./.freedom-checkr/config.toml, fallback ~/.config/freedom-checkr/config.toml]
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log every vote and lookup to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print the verdict
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decide whether a package or project is free software
    Check {
        /// JSON file holding a package object or a project (array of packages)
        file: PathBuf,

        /// Project name when the file holds a bare array [default: file stem]
        #[arg(long)]
        name: Option<String>,

        /// Fetch Gentoo license groups over HTTP when needed
        #[arg(long)]
        online: bool,

        /// Only poll packages whose version satisfies this bound, e.g. '<=2.0'
        #[arg(long, value_name = "CONSTRAINT")]
        version_filter: Option<String>,

        /// Report format
        #[arg(long, default_value = "terminal", value_name = "FORMAT")]
        report: ReportFormat,
    },

    /// Compare two versions; prints '<', '=' or '>'
    Compare { left: String, right: String },

    /// Print versions from oldest to newest
    Sort {
        #[arg(required = true)]
        versions: Vec<String>,
    },
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
}
