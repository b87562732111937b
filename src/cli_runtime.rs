use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use benchdash::model::{ComparisonKind, DashboardConfig};
use benchdash::tui::TuiRunOptions;

use crate::Commands;

#[derive(Parser)]
#[command(name = "benchdash")]
#[command(about = "Benchmark comparison dashboard", long_about = None)]
pub(crate) struct Cli {
    /// Benchmark API base URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// JSON config file
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Comparison page: fk | macrobench
    #[arg(long, global = true, value_parser = parse_kind)]
    kind: Option<ComparisonKind>,

    /// Query string of a shared dashboard link
    #[arg(long, global = true)]
    query: Option<String>,

    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn parse_kind(raw: &str) -> Result<ComparisonKind, String> {
    ComparisonKind::parse(raw).ok_or_else(|| format!("unknown comparison kind: {}", raw))
}

pub(crate) struct Settings {
    pub(crate) config: DashboardConfig,
    pub(crate) kind: ComparisonKind,
    pub(crate) query: String,
}

impl Cli {
    fn settings(&self) -> Result<Settings> {
        let mut config = match &self.config {
            Some(path) => DashboardConfig::load(path)?,
            None => DashboardConfig::default(),
        };
        if let Some(url) = &self.api_url {
            config.api_url = url.clone();
        }
        Ok(Settings {
            config,
            kind: self.kind.unwrap_or_default(),
            query: self.query.clone().unwrap_or_default(),
        })
    }
}

pub(crate) fn run() -> Result<()> {
    let cli = Cli::parse();
    let settings = cli.settings().context("load settings")?;

    match cli.command {
        None => {
            let share_url = benchdash::tui::run_with_options(TuiRunOptions {
                config: settings.config,
                kind: settings.kind,
                query: settings.query,
                verbose: cli.verbose,
            })?;
            println!("{}", share_url);
        }
        Some(command) => {
            benchdash::logging::init_stderr(cli.verbose);
            crate::cli_exec::handle_command(&settings, command)?
        }
    }

    Ok(())
}
