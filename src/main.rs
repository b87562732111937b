use anyhow::Result;
use clap::Subcommand;

mod cli_exec;
mod cli_runtime;

#[derive(Subcommand)]
enum Commands {
    /// List known branches and release tags
    Refs {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Fetch and print one comparison
    Compare {
        /// Old ref (also the single ref of the foreign-keys comparison)
        #[arg(long, alias = "sha")]
        old: Option<String>,
        /// New ref (macrobench comparisons)
        #[arg(long)]
        new: Option<String>,
        #[arg(long)]
        old_workload: Option<String>,
        #[arg(long)]
        new_workload: Option<String>,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the display title and commit link for a ref
    Link {
        /// Branch/tag hash or any commit prefix
        value: String,
    },
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    cli_runtime::run()
}
